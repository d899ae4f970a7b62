use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{InventoryError, InventoryResult};
use crate::models::{CreateInventoryItem, InventoryItem, Page, PageRequest, UpdateInventoryItem};
use crate::repository::InventoryItemRepository;
use crate::uom_client::UomClient;

/// Service layer for inventory item business rules
///
/// Rule order matters: field validation, duplicate name, unit-of-measure
/// verification, then the write. Nothing is written when an earlier step fails.
pub struct InventoryItemService<R: InventoryItemRepository, U: UomClient> {
    repository: Arc<R>,
    uom_client: Arc<U>,
}

impl<R: InventoryItemRepository, U: UomClient> Clone for InventoryItemService<R, U> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            uom_client: Arc::clone(&self.uom_client),
        }
    }
}

impl<R: InventoryItemRepository, U: UomClient> InventoryItemService<R, U> {
    pub fn new(repository: R, uom_client: U) -> Self {
        Self {
            repository: Arc::new(repository),
            uom_client: Arc::new(uom_client),
        }
    }

    #[instrument(skip(self, input), fields(name = %input.name, uom_id = input.base_unit_of_measure_id))]
    pub async fn create(&self, input: CreateInventoryItem) -> InventoryResult<InventoryItem> {
        input.validate()?;

        if self.repository.exists_by_name(&input.name).await? {
            return Err(InventoryError::name_conflict(input.name));
        }

        self.uom_client
            .verify_exists(input.base_unit_of_measure_id)
            .await?;

        // The unique index still settles a race with a concurrent create
        self.repository.insert(input).await
    }

    #[instrument(skip(self, input), fields(item_id = id, name = %input.name, uom_id = input.base_unit_of_measure_id))]
    pub async fn update(
        &self,
        id: i64,
        input: UpdateInventoryItem,
    ) -> InventoryResult<InventoryItem> {
        input.validate()?;

        let existing = self.find_by_id(id).await?;

        if existing.name != input.name
            && self
                .repository
                .exists_by_name_excluding(&input.name, id)
                .await?
        {
            return Err(InventoryError::name_conflict(input.name));
        }

        self.uom_client
            .verify_exists(input.base_unit_of_measure_id)
            .await?;

        self.repository.update(existing.replaced_with(input)).await
    }

    #[instrument(skip(self), fields(item_id = id))]
    pub async fn delete_by_id(&self, id: i64) -> InventoryResult<()> {
        if !self.repository.exists_by_id(id).await? {
            return Err(InventoryError::not_found(id));
        }

        self.repository.delete_by_id(id).await
    }

    pub async fn find_by_id(&self, id: i64) -> InventoryResult<InventoryItem> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| InventoryError::not_found(id))
    }

    pub async fn find_all(&self, page: PageRequest) -> InventoryResult<Page<InventoryItem>> {
        self.repository.find_all(page).await
    }

    /// Page of items whose name contains `fragment`, ignoring case
    pub async fn find_all_by_name(
        &self,
        fragment: &str,
        page: PageRequest,
    ) -> InventoryResult<Page<InventoryItem>> {
        if fragment.trim().is_empty() {
            return Err(InventoryError::InvalidData(
                "Parameter 'name' must not be blank".to_string(),
            ));
        }

        self.repository
            .find_by_name_contains(fragment.to_string(), page)
            .await
    }

    pub async fn is_name_taken(&self, name: &str) -> InventoryResult<bool> {
        self.repository.exists_by_name(name).await
    }
}
