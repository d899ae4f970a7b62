use async_trait::async_trait;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, SqlErr, TransactionTrait,
};

use crate::entity::{ActiveModel, Column, Entity};
use crate::error::{InventoryError, InventoryResult};
use crate::models::{
    CreateInventoryItem, InventoryItem, Page, PageRequest, SortDirection, SortField,
};
use crate::repository::InventoryItemRepository;

/// PostgreSQL implementation of InventoryItemRepository
///
/// Writes run in their own transaction. Name uniqueness is backed by the
/// `LOWER(name)` unique index; a violation surfaces as a name conflict.
#[derive(Clone)]
pub struct PgInventoryItemRepository {
    db: DatabaseConnection,
}

impl PgInventoryItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn fetch_page(
        &self,
        query: Select<Entity>,
        page: PageRequest,
    ) -> InventoryResult<Page<InventoryItem>> {
        let order = match page.sort.direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        };
        let paginator = query
            .order_by(sort_column(page.sort.field), order)
            .order_by_asc(Column::Id)
            .paginate(&self.db, page.size);

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.page).await?;

        Ok(Page::new(
            models.into_iter().map(Into::into).collect(),
            &page,
            total,
        ))
    }
}

fn sort_column(field: SortField) -> Column {
    match field {
        SortField::Id => Column::Id,
        SortField::Name => Column::Name,
        SortField::Description => Column::Description,
        SortField::BaseUnitOfMeasureId => Column::BaseUnitOfMeasureId,
        SortField::StandardCost => Column::StandardCost,
        SortField::UnitPerPurchaseUom => Column::UnitPerPurchaseUom,
        SortField::ReorderPointQuantity => Column::ReorderPointQuantity,
    }
}

/// Case-insensitive name equality, served by the `LOWER(name)` index
fn name_equals(name: &str) -> SimpleExpr {
    Expr::cust_with_values("LOWER(name) = LOWER(?)", [name.to_string()])
}

/// `%fragment%` with LIKE wildcards in the fragment matched literally
fn contains_pattern(fragment: &str) -> String {
    let escaped = fragment
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn map_write_error(err: DbErr, name: &str) -> InventoryError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::info!(name = %name, %detail, "Unique index rejected inventory item name");
            InventoryError::name_conflict(name)
        }
        _ => err.into(),
    }
}

#[async_trait]
impl InventoryItemRepository for PgInventoryItemRepository {
    async fn insert(&self, input: CreateInventoryItem) -> InventoryResult<InventoryItem> {
        let name = input.name.clone();
        let txn = self.db.begin().await?;

        let model = ActiveModel::from(input)
            .insert(&txn)
            .await
            .map_err(|e| map_write_error(e, &name))?;
        txn.commit().await?;

        tracing::info!(item_id = model.id, "Created inventory item");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: i64) -> InventoryResult<Option<InventoryItem>> {
        let result = Entity::find_by_id(id).one(&self.db).await?.map(Into::into);
        Ok(result)
    }

    async fn find_all(&self, page: PageRequest) -> InventoryResult<Page<InventoryItem>> {
        self.fetch_page(Entity::find(), page).await
    }

    async fn find_by_name_contains(
        &self,
        fragment: String,
        page: PageRequest,
    ) -> InventoryResult<Page<InventoryItem>> {
        let query = Entity::find().filter(Expr::cust_with_values(
            "LOWER(name) LIKE ?",
            [contains_pattern(&fragment)],
        ));
        self.fetch_page(query, page).await
    }

    async fn exists_by_name(&self, name: &str) -> InventoryResult<bool> {
        let count = Entity::find().filter(name_equals(name)).count(&self.db).await?;
        Ok(count > 0)
    }

    async fn exists_by_name_excluding(&self, name: &str, exclude_id: i64) -> InventoryResult<bool> {
        let count = Entity::find()
            .filter(name_equals(name))
            .filter(Column::Id.ne(exclude_id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn exists_by_id(&self, id: i64) -> InventoryResult<bool> {
        let count = Entity::find()
            .filter(Column::Id.eq(id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn update(&self, item: InventoryItem) -> InventoryResult<InventoryItem> {
        let txn = self.db.begin().await?;

        // Row lock so a concurrent delete cannot slip between the check and the write
        let current = Entity::find_by_id(item.id)
            .lock_exclusive()
            .one(&txn)
            .await?;
        if current.is_none() {
            return Err(InventoryError::not_found(item.id));
        }

        let model = ActiveModel::from(&item)
            .update(&txn)
            .await
            .map_err(|e| map_write_error(e, &item.name))?;
        txn.commit().await?;

        tracing::info!(item_id = item.id, "Updated inventory item");
        Ok(model.into())
    }

    async fn delete_by_id(&self, id: i64) -> InventoryResult<()> {
        let txn = self.db.begin().await?;

        let result = Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(InventoryError::not_found(id));
        }
        txn.commit().await?;

        tracing::info!(item_id = id, "Deleted inventory item");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Model;
    use rust_decimal::dec;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, RuntimeErr};

    fn model(id: i64, name: &str) -> Model {
        Model {
            id,
            name: name.to_string(),
            description: None,
            base_unit_of_measure_id: 1,
            standard_cost: dec!(0.05),
            unit_per_purchase_uom: dec!(100),
            reorder_point_quantity: dec!(500),
        }
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("Bolt"), "%bolt%");
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn test_errors_without_driver_code_pass_through() {
        let err = DbErr::Exec(RuntimeErr::Internal(
            "duplicate key value violates unique constraint \"ux_inventory_items_name_lower\""
                .to_string(),
        ));
        assert!(matches!(
            map_write_error(err, "Bolt"),
            InventoryError::Database(_)
        ));
    }

    #[tokio::test]
    async fn test_find_by_id_maps_model() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(7, "Bolt-M6")]])
            .into_connection();
        let repo = PgInventoryItemRepository::new(db);

        let item = repo.find_by_id(7).await.unwrap().unwrap();
        assert_eq!(item.id, 7);
        assert_eq!(item.name, "Bolt-M6");
        assert_eq!(item.standard_cost, dec!(0.05));
    }

    #[tokio::test]
    async fn test_delete_missing_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let repo = PgInventoryItemRepository::new(db);

        let err = repo.delete_by_id(99).await.unwrap_err();
        assert!(matches!(err, InventoryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<Model>::new()])
            .into_connection();
        let repo = PgInventoryItemRepository::new(db);

        let err = repo.update(model(5, "Nut").into()).await.unwrap_err();
        assert!(matches!(err, InventoryError::NotFound { .. }));
    }
}
