use serde::{Deserialize, Serialize};

use crate::domain::types::{Money, ProductId};

/// Row of a goods-receive note or invoice draft.
///
/// `line_total` is `None` until it has been computed for the current
/// quantity and unit price. The setters keep it in sync; items built from
/// request payloads may carry anything and are checked when totals are
/// computed.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: ProductId,
    #[serde(alias = "soLuong")]
    pub quantity: u32,
    #[serde(alias = "unitCost")]
    pub unit_price: f64,
    #[serde(default, alias = "thanhTien")]
    pub line_total: Option<f64>,
}

impl LineItem {
    /// Creates an item with its total computed.
    #[must_use]
    pub fn priced(product_id: ProductId, quantity: u32, unit_price: Money) -> Self {
        let mut item = Self {
            product_id,
            quantity,
            unit_price: unit_price.get(),
            line_total: None,
        };
        item.recompute();
        item
    }

    /// `quantity * unit_price`, regardless of the stored total.
    pub fn computed_total(&self) -> f64 {
        f64::from(self.quantity) * self.unit_price
    }

    pub fn recompute(&mut self) {
        self.line_total = Some(self.computed_total());
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.recompute();
    }

    pub fn set_unit_price(&mut self, unit_price: Money) {
        self.unit_price = unit_price.get();
        self.recompute();
    }
}
