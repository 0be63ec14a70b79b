//! # Stock Ledger
//!
//! A library for turning a wide daily-inventory spreadsheet export into a
//! per-day, per-product stock ledger with carry-forward integrity.
//!
//! ## Core Concepts
//!
//! - **Day Blocks**: After a fixed run of product identity columns, the sheet repeats
//!   one 8-column block per calendar day
//! - **Header Vocabulary**: Block columns are recognised by keywords in their (Thai or
//!   English) header text, not by position
//! - **Carry-Forward**: Each day's closing stock becomes the next day's opening stock
//! - **Stock Conservation**: `remain = broughtForward + received - sold - waste` for every
//!   product on every day
//! - **Fail-Safe Cells**: Blank, dashed or unreadable cells count as zero; non-product rows
//!   are skipped; the pipeline itself never fails on bad data
//!
//! ## Example
//!
//! ```rust,ignore
//! use stock_ledger::*;
//!
//! let sheet = read_sheet_from_path("daily_stock.csv")?;
//! let days = process_stock_sheet(&LedgerConfig::default(), &sheet)?;
//!
//! if let Some(day) = select_active_day(&days) {
//!     println!("{}", to_markdown(day));
//! }
//! ```

pub mod blocks;
pub mod cell;
pub mod engine;
pub mod error;
pub mod extractor;
pub mod filter;
pub mod header;
pub mod ingestion;
pub mod report;
pub mod schema;
pub mod session;
pub mod verification;

pub use blocks::{day_block_count, locate_day_blocks, split_date_label};
pub use cell::{normalize_cell, normalize_number};
pub use engine::{reconcile_sheet, CarryState, Reconciler};
pub use error::{Result, StockLedgerError};
pub use extractor::{
    extract_block_figures, validate_row, BlockFigures, ProductIdentity, RowOutcome, SkipReason,
};
pub use filter::trim_trailing_inactive_days;
pub use header::HeaderClassifier;
pub use ingestion::*;
pub use report::*;
pub use schema::*;
pub use session::{LedgerSession, LoadTicket, Snapshot};
pub use verification::{verify_ledger, LedgerVerifier, NegativeRemain, VerificationReport};

use log::{debug, info};

pub struct StockLedgerProcessor;

impl StockLedgerProcessor {
    pub fn process(config: &LedgerConfig, sheet: &[Vec<String>]) -> Result<Vec<DayResult>> {
        config.validate()?;

        let total_columns = sheet.iter().map(Vec::len).max().unwrap_or(0);
        info!(
            "Processing stock sheet with {} rows and {} columns",
            sheet.len(),
            total_columns
        );

        let days = reconcile_sheet(sheet, config);
        let reconciled = days.len();
        let days = trim_trailing_inactive_days(days);

        debug!(
            "Reconciled {} day(s), {} retained after trimming",
            reconciled,
            days.len()
        );

        Ok(days)
    }

    pub fn process_with_verification(
        config: &LedgerConfig,
        sheet: &[Vec<String>],
        tolerance: f64,
    ) -> Result<(Vec<DayResult>, VerificationReport)> {
        let days = Self::process(config, sheet)?;

        let report = verify_ledger(&days, tolerance)?;
        if !report.negative_remain.is_empty() {
            debug!(
                "{} record(s) closed with negative stock",
                report.negative_remain.len()
            );
        }

        Ok((days, report))
    }
}

pub fn process_stock_sheet(config: &LedgerConfig, sheet: &[Vec<String>]) -> Result<Vec<DayResult>> {
    StockLedgerProcessor::process(config, sheet)
}

pub fn process_with_verification(
    config: &LedgerConfig,
    sheet: &[Vec<String>],
    tolerance: f64,
) -> Result<(Vec<DayResult>, VerificationReport)> {
    StockLedgerProcessor::process_with_verification(config, sheet, tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_end_to_end_processing() {
        let mut header = vec!["หมวด", "รหัส", "ชื่อสินค้า", "", "", "", "", ""];
        for day in 1..=3 {
            header.push(if day == 1 { "1 มี.ค. ยกมา" } else { "" });
            header.extend(["รับ", "รับ(รวม)", "ขายเงินสด", "ขายโอน", "ทิ้ง", "หมายเหตุ", ""]);
        }
        let mut row = vec!["เบเกอรี่", "A01", "ครัวซองต์", "", "", "", "", ""];
        row.extend(["10", "5", "5", "2", "1", "0", "", ""]);
        row.extend(["", "3", "", "3", "", "", "", ""]);

        let sheet = sheet(&[header.as_slice(), row.as_slice()]);
        let days = process_stock_sheet(&LedgerConfig::default(), &sheet).unwrap();

        // Day 3 is pre-allocated but empty and is trimmed.
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date_label, "1 มี.ค.");
        assert_eq!(days[1].date_label, "Day 2");
        assert_eq!(days[0].products[0].remain, 12.0);
        assert_eq!(days[1].products[0].brought_forward, 12.0);
        assert_eq!(days[1].products[0].remain, 12.0);
    }

    #[test]
    fn test_process_with_verification() {
        let sheet = sheet(&[
            &["c", "k", "n", "", "", "", "", "", "ยกมา", "รับ", "ขาย", "ทิ้ง", "", "", "", ""],
            &["Drinks", "B01", "Latte", "", "", "", "", "", "1", "", "4", "", "", "", "", ""],
        ]);

        let (days, report) =
            process_with_verification(&LedgerConfig::default(), &sheet, 0.0).unwrap();
        assert_eq!(days.len(), 1);
        assert_eq!(report.records_checked, 1);
        assert_eq!(report.negative_remain.len(), 1);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let config = LedgerConfig {
            block_width: 0,
            ..LedgerConfig::default()
        };
        assert!(process_stock_sheet(&config, &[]).is_err());
    }

    #[test]
    fn test_degenerate_sheet_yields_single_day() {
        let sheet = sheet(&[&["a", "b"], &["x", "", "z"]]);
        let days = process_stock_sheet(&LedgerConfig::default(), &sheet).unwrap();
        assert_eq!(days.len(), 1);
        assert!(days[0].products.is_empty());
    }
}
