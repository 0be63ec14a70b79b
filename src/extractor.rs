use crate::cell::{cell_at, normalize_cell, normalize_number};
use crate::schema::{ColumnRole, DayBlock, LedgerConfig};
use serde::{Deserialize, Serialize};

/// Descriptive identity of a product row. `code` is the key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductIdentity {
    pub category: String,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    MissingCategory,
    MissingCode,
    MissingName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Valid(ProductIdentity),
    Skipped(SkipReason),
}

impl RowOutcome {
    pub fn identity(&self) -> Option<&ProductIdentity> {
        match self {
            RowOutcome::Valid(identity) => Some(identity),
            RowOutcome::Skipped(_) => None,
        }
    }
}

/// Raw per-day figures read from one product row and one day block.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BlockFigures {
    /// Opening balance as written in the sheet; only day 1 is expected to have one.
    pub brought_forward_sheet: f64,
    pub received: f64,
    pub sold: f64,
    pub waste: f64,
}

impl BlockFigures {
    /// Whether the sheet states any movement for this row and day.
    pub fn has_activity(&self) -> bool {
        self.brought_forward_sheet != 0.0
            || self.received != 0.0
            || self.sold != 0.0
            || self.waste != 0.0
    }
}

/// Separator, total and blank rows fail this check.
pub fn validate_row(row: &[String], config: &LedgerConfig) -> RowOutcome {
    let category = cell_at(row, config.category_column).trim();
    let code = cell_at(row, config.code_column).trim();
    let name = cell_at(row, config.name_column).trim();

    if category.is_empty() {
        return RowOutcome::Skipped(SkipReason::MissingCategory);
    }
    if code.is_empty() {
        return RowOutcome::Skipped(SkipReason::MissingCode);
    }
    if name.is_empty() {
        return RowOutcome::Skipped(SkipReason::MissingName);
    }

    RowOutcome::Valid(ProductIdentity {
        category: category.to_string(),
        code: code.to_string(),
        name: name.to_string(),
    })
}

/// Aggregates the columns of one block by role:
/// brought forward keeps the last value seen, received keeps the largest
/// magnitude (duplicated received columns are common), sold and waste add up
/// magnitudes. Totals that overflow read as zero, like any other unusable cell.
pub fn extract_block_figures(row: &[String], block: &DayBlock, roles: &[ColumnRole]) -> BlockFigures {
    let mut figures = BlockFigures::default();

    for (position, role) in roles.iter().enumerate() {
        if *role == ColumnRole::Ignored {
            continue;
        }

        let value = normalize_cell(cell_at(row, block.start_column + position));
        match role {
            ColumnRole::BroughtForward => figures.brought_forward_sheet = value,
            ColumnRole::Received => figures.received = figures.received.max(value.abs()),
            ColumnRole::Sold => figures.sold += value.abs(),
            ColumnRole::Waste => figures.waste += value.abs(),
            ColumnRole::Ignored => {}
        }
    }

    figures.sold = normalize_number(figures.sold);
    figures.waste = normalize_number(figures.waste);
    figures
}
