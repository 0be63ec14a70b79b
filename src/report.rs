use crate::schema::{DayResult, ProductDayRecord};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub day_number: u32,
    pub date_label: String,
    pub product_count: usize,
    pub total_brought_forward: f64,
    pub total_received: f64,
    pub total_sold: f64,
    pub total_waste: f64,
    pub total_remain: f64,
    pub negative_remain_count: usize,
}

impl DaySummary {
    pub fn from_day(day: &DayResult) -> Self {
        let mut summary = Self {
            day_number: day.day_number,
            date_label: day.date_label.clone(),
            product_count: day.products.len(),
            ..Self::default()
        };

        for record in &day.products {
            summary.total_brought_forward += record.brought_forward;
            summary.total_received += record.received;
            summary.total_sold += record.sold;
            summary.total_waste += record.waste;
            summary.total_remain += record.remain;
            if record.remain < 0.0 {
                summary.negative_remain_count += 1;
            }
        }

        summary
    }
}

/// The most recent day with any sales, or the last day when nothing sold.
pub fn select_active_day(days: &[DayResult]) -> Option<&DayResult> {
    days.iter()
        .rev()
        .find(|day| day.products.iter().any(|p| p.sold != 0.0))
        .or_else(|| days.last())
}

/// Case-insensitive substring match on name, code or category.
pub fn search_products<'a>(records: &'a [ProductDayRecord], query: &str) -> Vec<&'a ProductDayRecord> {
    let query = query.trim().to_lowercase();
    records
        .iter()
        .filter(|r| {
            query.is_empty()
                || r.name.to_lowercase().contains(&query)
                || r.code.to_lowercase().contains(&query)
                || r.category.to_lowercase().contains(&query)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    Code,
    Name,
    Category,
    BroughtForward,
    Received,
    Sold,
    Waste,
    Remain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Stable sort on one record column.
pub fn sort_products(records: &mut [ProductDayRecord], key: SortKey, direction: SortDirection) {
    records.sort_by(|a, b| {
        let ordering = compare_by(a, b, key);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

fn compare_by(a: &ProductDayRecord, b: &ProductDayRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Code => a.code.cmp(&b.code),
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::Category => a.category.cmp(&b.category),
        SortKey::BroughtForward => a.brought_forward.total_cmp(&b.brought_forward),
        SortKey::Received => a.received.total_cmp(&b.received),
        SortKey::Sold => a.sold.total_cmp(&b.sold),
        SortKey::Waste => a.waste.total_cmp(&b.waste),
        SortKey::Remain => a.remain.total_cmp(&b.remain),
    }
}

/// Stock as shown to a reader. The records themselves keep negative values.
pub fn display_remain(remain: f64) -> f64 {
    remain.max(0.0)
}

pub fn to_json(days: &[DayResult]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(days)
}

pub fn to_csv(days: &[DayResult]) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "Day",
        "Date",
        "Code",
        "Name",
        "Category",
        "Brought Forward",
        "Received",
        "Sold",
        "Waste",
        "Remain",
    ])?;

    for day in days {
        for record in &day.products {
            writer.write_record([
                day.day_number.to_string(),
                record.date.clone(),
                record.code.clone(),
                record.name.clone(),
                record.category.clone(),
                record.brought_forward.to_string(),
                record.received.to_string(),
                record.sold.to_string(),
                record.waste.to_string(),
                record.remain.to_string(),
            ])?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn to_markdown(day: &DayResult) -> String {
    let summary = DaySummary::from_day(day);
    let mut output = String::new();

    output.push_str(&format!("# Stock for {} (day {})\n\n", day.date_label, day.day_number));
    output.push_str(&format!(
        "**Received:** {} | **Sold:** {} | **Waste:** {} | **Remain:** {}\n\n",
        summary.total_received,
        summary.total_sold,
        summary.total_waste,
        display_remain(summary.total_remain)
    ));

    output.push_str("| Code | Name | Category | B/F | Received | Sold | Waste | Remain |\n");
    output.push_str("|---|---|---|---:|---:|---:|---:|---:|\n");
    for record in &day.products {
        let marker = if record.remain < 0.0 { " ⚠️" } else { "" };
        output.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} | {}{} |\n",
            record.code,
            record.name,
            record.category,
            record.brought_forward,
            record.received,
            record.sold,
            record.waste,
            display_remain(record.remain),
            marker
        ));
    }

    output
}
