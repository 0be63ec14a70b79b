use crate::schema::DayResult;
use log::debug;

/// Drops trailing days without activity. Sheets pre-allocate columns for the
/// whole month, so unfilled future days show up as all-zero blocks.
///
/// If every day is inactive the input is returned unchanged; the result is
/// never empty unless the input was.
pub fn trim_trailing_inactive_days(mut days: Vec<DayResult>) -> Vec<DayResult> {
    let keep = match days.iter().rposition(|day| day.has_activity) {
        Some(last_active) => last_active + 1,
        None => return days,
    };

    if keep < days.len() {
        debug!("Dropping {} trailing inactive day(s)", days.len() - keep);
        days.truncate(keep);
    }

    days
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(day_number: u32, has_activity: bool) -> DayResult {
        DayResult {
            day_number,
            date_label: format!("Day {}", day_number),
            has_activity,
            products: Vec::new(),
        }
    }

    fn numbers(days: &[DayResult]) -> Vec<u32> {
        days.iter().map(|d| d.day_number).collect()
    }

    #[test]
    fn test_trailing_inactive_days_dropped() {
        let days = vec![day(1, true), day(2, false), day(3, false)];
        assert_eq!(numbers(&trim_trailing_inactive_days(days)), vec![1]);
    }

    #[test]
    fn test_all_inactive_kept() {
        let days = vec![day(1, false), day(2, false)];
        assert_eq!(numbers(&trim_trailing_inactive_days(days)), vec![1, 2]);
    }

    #[test]
    fn test_interior_gaps_kept() {
        let days = vec![day(1, true), day(2, false), day(3, true), day(4, false)];
        assert_eq!(numbers(&trim_trailing_inactive_days(days)), vec![1, 2, 3]);
    }

    #[test]
    fn test_leading_inactive_kept() {
        let days = vec![day(1, false), day(2, true)];
        assert_eq!(numbers(&trim_trailing_inactive_days(days)), vec![1, 2]);
    }

    #[test]
    fn test_empty_input() {
        assert!(trim_trailing_inactive_days(Vec::new()).is_empty());
    }
}
