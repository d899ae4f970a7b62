use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InventoryItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InventoryItems::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(InventoryItems::Name, 100))
                    .col(string_len_null(InventoryItems::Description, 200))
                    .col(
                        big_integer(InventoryItems::BaseUnitOfMeasureId)
                            .check(Expr::col(InventoryItems::BaseUnitOfMeasureId).gt(0)),
                    )
                    .col(
                        decimal_len(InventoryItems::StandardCost, 12, 2)
                            .check(Expr::col(InventoryItems::StandardCost).gt(0)),
                    )
                    .col(
                        decimal_len(InventoryItems::UnitPerPurchaseUom, 12, 2)
                            .check(Expr::col(InventoryItems::UnitPerPurchaseUom).gt(0)),
                    )
                    .col(
                        decimal_len(InventoryItems::ReorderPointQuantity, 12, 2)
                            .check(Expr::col(InventoryItems::ReorderPointQuantity).gt(0)),
                    )
                    .to_owned(),
            )
            .await?;

        // Names are unique regardless of case; the index settles concurrent creates
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS ux_inventory_items_name_lower ON inventory_items (LOWER(name))",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP INDEX IF EXISTS ux_inventory_items_name_lower")
            .await?;

        manager
            .drop_table(Table::drop().table(InventoryItems::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum InventoryItems {
    Table,
    Id,
    Name,
    Description,
    BaseUnitOfMeasureId,
    StandardCost,
    UnitPerPurchaseUom,
    ReorderPointQuantity,
}
