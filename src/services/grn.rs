//! Pricing of goods-receive-note drafts before they are submitted.

use serde::{Deserialize, Serialize};

use crate::domain::line_item::LineItem;
use crate::domain::types::ProductId;
use crate::repository::ProductReader;
use crate::services::ServiceResult;
use crate::services::price_resolver::{PriceNameCache, ResolutionSource};
use crate::services::totals::recompute_total;

/// Row as entered on the GRN form: a product and the received quantity.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftLine {
    pub product_id: String,
    #[serde(alias = "soLuong")]
    pub quantity: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct PricedLine {
    #[serde(flatten)]
    pub item: LineItem,
    pub name: String,
    pub source: ResolutionSource,
}

/// Priced draft with its running total.
#[derive(Clone, Debug, Serialize)]
pub struct GrnDraft {
    pub lines: Vec<PricedLine>,
    pub total: f64,
    /// Products priced with the zero placeholder, in line order.
    pub unresolved: Vec<ProductId>,
}

/// Resolves the unit cost and name of every line and totals the draft.
pub async fn price_grn_draft<R>(
    cache: &PriceNameCache,
    repo: &R,
    lines: Vec<DraftLine>,
) -> ServiceResult<GrnDraft>
where
    R: ProductReader + ?Sized,
{
    let lines = lines
        .into_iter()
        .map(|line| -> ServiceResult<(ProductId, u32)> {
            Ok((ProductId::new(line.product_id)?, line.quantity))
        })
        .collect::<ServiceResult<Vec<_>>>()?;

    let mut priced = Vec::with_capacity(lines.len());
    let mut unresolved = Vec::new();

    for (product_id, quantity) in lines {
        let resolution = cache.resolve(repo, &product_id).await;
        if resolution.is_placeholder() {
            unresolved.push(product_id.clone());
        }
        priced.push(PricedLine {
            item: LineItem::priced(product_id, quantity, resolution.value.price),
            name: resolution.value.name,
            source: resolution.source,
        });
    }

    if !unresolved.is_empty() {
        log::warn!("{} GRN lines priced with placeholder values", unresolved.len());
    }

    let items: Vec<LineItem> = priced.iter().map(|line| line.item.clone()).collect();
    let total = recompute_total(&items)?;

    Ok(GrnDraft {
        lines: priced,
        total,
        unresolved,
    })
}
