//! Product catalog domain module.
//!
//! Products are immutable pricing reference data: the source that order line
//! items snapshot their sku and unit cost from at association time.

pub mod product;

pub use product::Product;
