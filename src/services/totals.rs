//! Running totals over GRN and invoice line items.
//!
//! Nothing here is recomputed automatically: callers refresh totals after
//! every add, edit or removal of a line.

use thiserror::Error;

use crate::domain::line_item::LineItem;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TotalsError {
    #[error("line {index}: {field} must be a finite, non-negative number")]
    InvalidAmount { index: usize, field: &'static str },
    #[error("line {index}: amount is too large to be represented")]
    Overflow { index: usize },
}

fn check_amount(value: f64, index: usize, field: &'static str) -> Result<f64, TotalsError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(TotalsError::InvalidAmount { index, field })
    }
}

fn finite(value: f64, index: usize) -> Result<f64, TotalsError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TotalsError::Overflow { index })
    }
}

fn checked_line_total(item: &LineItem, index: usize) -> Result<f64, TotalsError> {
    check_amount(item.unit_price, index, "unitPrice")?;
    finite(item.computed_total(), index)
}

/// Sums the line totals of `items`, computing `quantity * unit_price` for
/// lines whose total has not been filled in. Returns `0.0` for no items.
pub fn recompute_total(items: &[LineItem]) -> Result<f64, TotalsError> {
    items
        .iter()
        .enumerate()
        .try_fold(0.0, |total, (index, item)| {
            let line_total = match item.line_total {
                Some(value) => check_amount(value, index, "lineTotal")?,
                None => checked_line_total(item, index)?,
            };
            finite(total + line_total, index)
        })
}

/// Recomputes every line total from its quantity and unit price.
///
/// Items are left untouched when any line fails validation.
pub fn refresh_line_totals(items: &mut [LineItem]) -> Result<(), TotalsError> {
    let totals = items
        .iter()
        .enumerate()
        .map(|(index, item)| checked_line_total(item, index))
        .collect::<Result<Vec<_>, _>>()?;

    for (item, total) in items.iter_mut().zip(totals) {
        item.line_total = Some(total);
    }
    Ok(())
}
