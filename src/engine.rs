use crate::blocks::locate_day_blocks;
use crate::cell::normalize_number;
use crate::extractor::{extract_block_figures, validate_row, ProductIdentity, RowOutcome};
use crate::header::HeaderClassifier;
use crate::schema::{DayBlock, DayResult, LedgerConfig, ProductDayRecord};
use log::debug;
use std::collections::HashMap;

/// Most recent closing stock per product code, for one processing run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarryState {
    remains: HashMap<String, f64>,
}

impl CarryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, code: &str) -> Option<f64> {
        self.remains.get(code).copied()
    }

    pub fn set(&mut self, code: &str, remain: f64) {
        self.remains.insert(code.to_string(), remain);
    }

    pub fn contains(&self, code: &str) -> bool {
        self.remains.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.remains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remains.is_empty()
    }
}

/// A validated product row, borrowed from the sheet.
pub struct ProductRow<'s> {
    pub identity: ProductIdentity,
    pub cells: &'s [String],
}

pub struct Reconciler<'a> {
    config: &'a LedgerConfig,
}

impl<'a> Reconciler<'a> {
    pub fn new(config: &'a LedgerConfig) -> Self {
        Self { config }
    }

    /// Product rows of the sheet (row 0 excluded), in sheet order.
    pub fn product_rows<'s>(&self, sheet: &'s [Vec<String>]) -> Vec<ProductRow<'s>> {
        sheet
            .iter()
            .enumerate()
            .skip(1)
            .filter_map(|(index, cells)| match validate_row(cells, self.config) {
                RowOutcome::Valid(identity) => Some(ProductRow {
                    identity,
                    cells: cells.as_slice(),
                }),
                RowOutcome::Skipped(reason) => {
                    debug!("Skipping sheet row {}: {:?}", index, reason);
                    None
                }
            })
            .collect()
    }

    /// Walks the blocks in increasing day order, threading `carry` from one
    /// day to the next. Returns every day, active or not, and the final state.
    pub fn reconcile(
        &self,
        sheet: &[Vec<String>],
        blocks: &[DayBlock],
        mut carry: CarryState,
    ) -> (Vec<DayResult>, CarryState) {
        let empty = Vec::new();
        let header_row = sheet.first().unwrap_or(&empty);
        let products = self.product_rows(sheet);

        let mut ordered: Vec<&DayBlock> = blocks.iter().collect();
        ordered.sort_by_key(|b| b.day_number);

        let days = ordered
            .into_iter()
            .map(|block| self.reconcile_day(header_row, &products, block, &mut carry))
            .collect();

        (days, carry)
    }

    pub fn reconcile_day(
        &self,
        header_row: &[String],
        products: &[ProductRow<'_>],
        block: &DayBlock,
        carry: &mut CarryState,
    ) -> DayResult {
        let vocabulary = &self.config.vocabulary;
        let roles = HeaderClassifier::new(vocabulary).classify_block(
            header_row,
            block.start_column,
            self.config.block_width,
        );

        let mut records = Vec::with_capacity(products.len());
        let mut has_activity = false;

        for product in products {
            let code = product.identity.code.as_str();
            let figures = extract_block_figures(product.cells, block, &roles);
            has_activity |= figures.has_activity();

            let mut brought_forward = carry.get(code).unwrap_or(0.0);
            if block.day_number == 1 && !carry.contains(code) && figures.brought_forward_sheet > 0.0
            {
                brought_forward = figures.brought_forward_sheet;
            }

            let remain =
                normalize_number(brought_forward + figures.received - figures.sold - figures.waste);
            carry.set(code, remain);

            if remain < 0.0 {
                debug!(
                    "Negative remain {} for product {} on day {}",
                    remain, code, block.day_number
                );
            }

            records.push(ProductDayRecord {
                date: block.date_label.clone(),
                code: product.identity.code.clone(),
                name: product.identity.name.clone(),
                category: product.identity.category.clone(),
                brought_forward,
                received: figures.received,
                sold: figures.sold,
                waste: figures.waste,
                remain,
            });
        }

        DayResult {
            day_number: block.day_number,
            date_label: block.date_label.clone(),
            has_activity,
            products: records,
        }
    }
}

/// Locates the day blocks of `sheet` and reconciles them with a fresh
/// [`CarryState`]. No trailing-day filtering is applied.
pub fn reconcile_sheet(sheet: &[Vec<String>], config: &LedgerConfig) -> Vec<DayResult> {
    let total_columns = sheet.iter().map(Vec::len).max().unwrap_or(0);
    let empty = Vec::new();
    let header_row = sheet.first().unwrap_or(&empty);
    let blocks = locate_day_blocks(header_row, total_columns, config);

    let (days, _) = Reconciler::new(config).reconcile(sheet, &blocks, CarryState::new());
    days
}
