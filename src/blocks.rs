use crate::cell::cell_at;
use crate::header::HeaderClassifier;
use crate::schema::{ColumnRole, DayBlock, LedgerConfig};
use log::debug;

/// Number of day blocks a sheet of `total_columns` columns holds:
/// `floor((total_columns - base_offset) / block_width)`, clamped to `[1, max_days]`.
pub fn day_block_count(total_columns: usize, config: &LedgerConfig) -> usize {
    let available = total_columns.saturating_sub(config.base_offset);
    let raw = available / config.block_width.max(1);
    let clamped = raw.clamp(1, config.max_days.max(1));

    if clamped != raw {
        debug!(
            "Day block count clamped from {} to {} ({} columns)",
            raw, clamped, total_columns
        );
    }

    clamped
}

/// Lays out the contiguous day blocks of a sheet, labelling each from its
/// header cell. A `<number> <keyword>` cell such as `"5 ยกมา"` is a sub-header,
/// not a day label.
pub fn locate_day_blocks(
    header_row: &[String],
    total_columns: usize,
    config: &LedgerConfig,
) -> Vec<DayBlock> {
    let classifier = HeaderClassifier::new(&config.vocabulary);

    (0..day_block_count(total_columns, config))
        .map(|index| {
            let day_number = index as u32 + 1;
            let start_column = config.base_offset + index * config.block_width;
            let date_label = split_date_label(cell_at(header_row, start_column))
                .map(|(label, _)| label)
                .filter(|label| classifier.classify(label) == ColumnRole::Ignored)
                .unwrap_or_else(|| format!("Day {}", day_number));

            DayBlock {
                day_number,
                start_column,
                date_label,
            }
        })
        .collect()
}

/// Splits a leading `<number> <token>` day label (e.g. `"1 มี.ค."`) off a
/// header cell. Returns the label, digits as written, and whatever text
/// follows it.
pub fn split_date_label(text: &str) -> Option<(String, &str)> {
    let text = text.trim_start();

    let number_end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    if number_end == 0 {
        return None;
    }
    let number = &text[..number_end];

    let after_number = &text[number_end..];
    let token_start = after_number.len() - after_number.trim_start().len();
    if token_start == 0 {
        return None;
    }

    let token_text = &after_number[token_start..];
    let token_end = token_text
        .find(char::is_whitespace)
        .unwrap_or(token_text.len());
    if token_end == 0 {
        return None;
    }

    let label = format!("{} {}", number, &token_text[..token_end]);
    Some((label, &token_text[token_end..]))
}
