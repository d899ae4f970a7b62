use crate::models::{CreateInventoryItem, InventoryItem};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

/// Sea-ORM Entity for the inventory_items table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "inventory_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub base_unit_of_measure_id: i64,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub standard_cost: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub unit_per_purchase_uom: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub reorder_point_quantity: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for InventoryItem {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            base_unit_of_measure_id: model.base_unit_of_measure_id,
            standard_cost: model.standard_cost,
            unit_per_purchase_uom: model.unit_per_purchase_uom,
            reorder_point_quantity: model.reorder_point_quantity,
        }
    }
}

// The id is left to the identity column
impl From<CreateInventoryItem> for ActiveModel {
    fn from(input: CreateInventoryItem) -> Self {
        ActiveModel {
            id: NotSet,
            name: Set(input.name),
            description: Set(input.description),
            base_unit_of_measure_id: Set(input.base_unit_of_measure_id),
            standard_cost: Set(input.standard_cost),
            unit_per_purchase_uom: Set(input.unit_per_purchase_uom),
            reorder_point_quantity: Set(input.reorder_point_quantity),
        }
    }
}

// Full replacement of an existing row, keyed by id
impl From<&InventoryItem> for ActiveModel {
    fn from(item: &InventoryItem) -> Self {
        ActiveModel {
            id: Set(item.id),
            name: Set(item.name.clone()),
            description: Set(item.description.clone()),
            base_unit_of_measure_id: Set(item.base_unit_of_measure_id),
            standard_cost: Set(item.standard_cost),
            unit_per_purchase_uom: Set(item.unit_per_purchase_uom),
            reorder_point_quantity: Set(item.reorder_point_quantity),
        }
    }
}
