//! Store capabilities and the in-memory transactional implementation.
//!
//! The persistence engine proper is out of scope; what the application needs
//! from it is captured as capability traits: query reference data, load and
//! stage order aggregates, and commit a per-request unit of work.

pub mod memory;
pub mod repository;

pub use memory::InMemoryStore;
pub use repository::{
    DiscountCatalog, OrderRepository, ProductCatalog, StoreError, StoreResult, UnitOfWork,
};
