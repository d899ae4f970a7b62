use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{InventoryError, InventoryResult};
use crate::models::{
    CreateInventoryItem, InventoryItem, Page, PageRequest, SortDirection, SortField,
};

/// Repository trait for InventoryItem persistence
///
/// Name comparisons are case-insensitive in every implementation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryItemRepository: Send + Sync {
    /// Persist a new item and return it with its assigned id
    async fn insert(&self, input: CreateInventoryItem) -> InventoryResult<InventoryItem>;

    async fn find_by_id(&self, id: i64) -> InventoryResult<Option<InventoryItem>>;

    async fn find_all(&self, page: PageRequest) -> InventoryResult<Page<InventoryItem>>;

    /// Items whose name contains `fragment`, ignoring case
    async fn find_by_name_contains(
        &self,
        fragment: String,
        page: PageRequest,
    ) -> InventoryResult<Page<InventoryItem>>;

    async fn exists_by_name(&self, name: &str) -> InventoryResult<bool>;

    /// Like `exists_by_name` but ignores the item with id `exclude_id`
    async fn exists_by_name_excluding(&self, name: &str, exclude_id: i64) -> InventoryResult<bool>;

    async fn exists_by_id(&self, id: i64) -> InventoryResult<bool>;

    /// Replace every mutable field of an existing item
    async fn update(&self, item: InventoryItem) -> InventoryResult<InventoryItem>;

    async fn delete_by_id(&self, id: i64) -> InventoryResult<()>;
}

#[derive(Debug, Default)]
struct Store {
    items: BTreeMap<i64, InventoryItem>,
    last_id: i64,
}

impl Store {
    fn name_taken(&self, name: &str, exclude_id: Option<i64>) -> bool {
        let needle = name.to_lowercase();
        self.items
            .values()
            .any(|i| Some(i.id) != exclude_id && i.name.to_lowercase() == needle)
    }
}

/// In-memory implementation of InventoryItemRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryInventoryItemRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryInventoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn compare(a: &InventoryItem, b: &InventoryItem, field: SortField) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortField::Description => a.description.cmp(&b.description),
        SortField::BaseUnitOfMeasureId => a.base_unit_of_measure_id.cmp(&b.base_unit_of_measure_id),
        SortField::StandardCost => a.standard_cost.cmp(&b.standard_cost),
        SortField::UnitPerPurchaseUom => a.unit_per_purchase_uom.cmp(&b.unit_per_purchase_uom),
        SortField::ReorderPointQuantity => a.reorder_point_quantity.cmp(&b.reorder_point_quantity),
    }
}

fn paginate(mut items: Vec<InventoryItem>, page: &PageRequest) -> Page<InventoryItem> {
    items.sort_by(|a, b| {
        let ordering = compare(a, b, page.sort.field);
        let ordering = match page.sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        };
        ordering.then(a.id.cmp(&b.id))
    });

    let total = items.len() as u64;
    let content = items
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.size as usize)
        .collect();

    Page::new(content, page, total)
}

#[async_trait]
impl InventoryItemRepository for InMemoryInventoryItemRepository {
    async fn insert(&self, input: CreateInventoryItem) -> InventoryResult<InventoryItem> {
        let mut store = self.store.write().await;

        if store.name_taken(&input.name, None) {
            return Err(InventoryError::name_conflict(input.name));
        }

        store.last_id += 1;
        let item = InventoryItem {
            id: store.last_id,
            name: input.name,
            description: input.description,
            base_unit_of_measure_id: input.base_unit_of_measure_id,
            standard_cost: input.standard_cost,
            unit_per_purchase_uom: input.unit_per_purchase_uom,
            reorder_point_quantity: input.reorder_point_quantity,
        };
        store.items.insert(item.id, item.clone());

        tracing::info!(item_id = item.id, "Created inventory item");
        Ok(item)
    }

    async fn find_by_id(&self, id: i64) -> InventoryResult<Option<InventoryItem>> {
        let store = self.store.read().await;
        Ok(store.items.get(&id).cloned())
    }

    async fn find_all(&self, page: PageRequest) -> InventoryResult<Page<InventoryItem>> {
        let store = self.store.read().await;
        Ok(paginate(store.items.values().cloned().collect(), &page))
    }

    async fn find_by_name_contains(
        &self,
        fragment: String,
        page: PageRequest,
    ) -> InventoryResult<Page<InventoryItem>> {
        let store = self.store.read().await;
        let needle = fragment.to_lowercase();
        let matching = store
            .items
            .values()
            .filter(|i| i.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        Ok(paginate(matching, &page))
    }

    async fn exists_by_name(&self, name: &str) -> InventoryResult<bool> {
        Ok(self.store.read().await.name_taken(name, None))
    }

    async fn exists_by_name_excluding(&self, name: &str, exclude_id: i64) -> InventoryResult<bool> {
        Ok(self.store.read().await.name_taken(name, Some(exclude_id)))
    }

    async fn exists_by_id(&self, id: i64) -> InventoryResult<bool> {
        Ok(self.store.read().await.items.contains_key(&id))
    }

    async fn update(&self, item: InventoryItem) -> InventoryResult<InventoryItem> {
        let mut store = self.store.write().await;

        if !store.items.contains_key(&item.id) {
            return Err(InventoryError::not_found(item.id));
        }
        if store.name_taken(&item.name, Some(item.id)) {
            return Err(InventoryError::name_conflict(item.name));
        }

        store.items.insert(item.id, item.clone());

        tracing::info!(item_id = item.id, "Updated inventory item");
        Ok(item)
    }

    async fn delete_by_id(&self, id: i64) -> InventoryResult<()> {
        let mut store = self.store.write().await;

        if store.items.remove(&id).is_none() {
            return Err(InventoryError::not_found(id));
        }

        tracing::info!(item_id = id, "Deleted inventory item");
        Ok(())
    }
}
