//! Infrastructure Layer
//!
//! Storage backends for the repository traits.

pub mod memory;
pub mod postgres;

pub use memory::MemoryCatalogRepository;
pub use postgres::PgCatalogRepository;
