pub mod category_tree;
pub mod errors;
pub mod features;
pub mod grn;
pub mod price_resolver;
pub mod products;
pub mod totals;

pub use errors::{ServiceError, ServiceResult};
