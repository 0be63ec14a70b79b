use crate::error::{Result, StockLedgerError};
use crate::schema::{DayResult, ProductDayRecord};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegativeRemain {
    pub day_number: u32,
    pub code: String,
    pub remain: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub records_checked: usize,
    /// Inconsistent sheet figures. Reported, never corrected.
    pub negative_remain: Vec<NegativeRemain>,
}

/// Checks the two ledger invariants over a reconciled run:
/// `remain = broughtForward + received - sold - waste` for every record, and
/// `broughtForward(d) = remain(d-1)` for every product present the day before.
pub struct LedgerVerifier {
    tolerance: f64,
}

impl LedgerVerifier {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance: tolerance.abs(),
        }
    }

    pub fn verify(&self, days: &[DayResult]) -> Result<VerificationReport> {
        let mut report = VerificationReport::default();
        let mut previous: Option<(u32, HashMap<&str, f64>)> = None;

        for day in days {
            let mut seen_today: HashSet<&str> = HashSet::new();

            for record in &day.products {
                self.check_conservation(day.day_number, record)?;

                // Repeated codes chain within the day, so only the first
                // occurrence opens from yesterday's stock.
                let first_today = seen_today.insert(record.code.as_str());
                if let (true, Some((prev_day, remains))) = (first_today, &previous) {
                    if *prev_day + 1 == day.day_number {
                        if let Some(&previous_remain) = remains.get(record.code.as_str()) {
                            self.check_continuity(day.day_number, record, previous_remain)?;
                        }
                    }
                }

                if record.remain < 0.0 {
                    report.negative_remain.push(NegativeRemain {
                        day_number: day.day_number,
                        code: record.code.clone(),
                        remain: record.remain,
                    });
                }

                report.records_checked += 1;
            }

            let closing: HashMap<&str, f64> = day
                .products
                .iter()
                .map(|r| (r.code.as_str(), r.remain))
                .collect();
            previous = Some((day.day_number, closing));
        }

        Ok(report)
    }

    fn check_conservation(&self, day_number: u32, record: &ProductDayRecord) -> Result<()> {
        let expected = record.brought_forward + record.received - record.sold - record.waste;
        let difference = (expected - record.remain).abs();
        if !difference.is_finite() || difference > self.tolerance {
            return Err(StockLedgerError::ConservationViolation {
                day: day_number,
                code: record.code.clone(),
                expected,
                actual: record.remain,
            });
        }
        Ok(())
    }

    fn check_continuity(
        &self,
        day_number: u32,
        record: &ProductDayRecord,
        previous_remain: f64,
    ) -> Result<()> {
        let difference = (record.brought_forward - previous_remain).abs();
        if !difference.is_finite() || difference > self.tolerance {
            return Err(StockLedgerError::ContinuityViolation {
                day: day_number,
                code: record.code.clone(),
                brought_forward: record.brought_forward,
                previous_remain,
            });
        }
        Ok(())
    }
}

pub fn verify_ledger(days: &[DayResult], tolerance: f64) -> Result<VerificationReport> {
    LedgerVerifier::new(tolerance).verify(days)
}
