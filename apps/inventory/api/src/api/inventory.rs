use axum::Router;
use domain_inventory::{InventoryItemService, PgInventoryItemRepository, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgInventoryItemRepository::new(state.db.clone());
    let service = InventoryItemService::new(repository, state.uom_client.clone());
    handlers::router(service)
}
