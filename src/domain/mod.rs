//! Domain entities shared by the catalog services and the HTTP layer.

pub mod category;
pub mod feature;
pub mod line_item;
pub mod product;
pub mod types;
