//! Inventory Domain
//!
//! Inventory items: a name unique regardless of case, an optional description,
//! a reference to a unit of measure owned by another service, and three
//! positive decimal amounts (standard cost, units per purchase UOM, reorder point).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, audit events
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐      ┌─────────────┐
//! │   Service   │ ───► │ UOM Client  │  ← remote existence check
//! └──────┬──────┘      └─────────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory / Postgres)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← DTOs, paging, entity
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_inventory::{
//!     handlers,
//!     repository::InMemoryInventoryItemRepository,
//!     service::InventoryItemService,
//!     uom_client::{HttpUomClient, UomClientConfig},
//! };
//!
//! # fn main() -> Result<(), domain_inventory::InventoryError> {
//! let repository = InMemoryInventoryItemRepository::new();
//! let uom_client = HttpUomClient::new(UomClientConfig::default())?;
//! let service = InventoryItemService::new(repository, uom_client);
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod uom_client;

// Re-export commonly used types
pub use error::{InventoryError, InventoryResult};
pub use models::{
    CreateInventoryItem, InventoryItem, NameQuery, Page, PageParams, PageRequest, Sort,
    SortDirection, SortField, UpdateInventoryItem,
};
pub use postgres::PgInventoryItemRepository;
pub use repository::{InMemoryInventoryItemRepository, InventoryItemRepository};
pub use service::InventoryItemService;
pub use uom_client::{HttpUomClient, UomClient, UomClientConfig};
