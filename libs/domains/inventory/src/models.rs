use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::LazyLock;
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::error::InventoryError;

/// Entity label used in user-facing messages
pub const INVENTORY_ITEM: &str = "Inventory Item";

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;
/// Highest page index whose offset still fits a signed 64-bit SQL OFFSET
pub const MAX_PAGE_INDEX: u64 = i64::MAX as u64 / MAX_PAGE_SIZE;

/// `field` or `field,asc` / `field,desc`
static SORT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z]+)\s*(?:,\s*([A-Za-z]+)\s*)?$").expect("valid regex")
});

/// Exclusive upper bound of the integer part of a money/quantity value (10 digits)
static MONEY_INTEGER_LIMIT: LazyLock<Decimal> =
    LazyLock::new(|| Decimal::from(10_000_000_000_i64));

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

/// Strictly positive, at most 10 integer digits and 2 fraction digits.
fn validate_money(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        return Err(ValidationError::new("positive").with_message("must be greater than 0".into()));
    }
    if value.normalize().scale() > 2 || value.trunc() >= *MONEY_INTEGER_LIMIT {
        return Err(ValidationError::new("digits").with_message(
            "numeric value out of bounds (<10 digits>.<2 digits> expected)".into(),
        ));
    }
    Ok(())
}

/// Inventory item as stored and returned over the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    /// Store-assigned identifier
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Reference into the unit-of-measure catalog
    pub base_unit_of_measure_id: i64,
    #[schema(value_type = String, example = "0.05")]
    pub standard_cost: Decimal,
    /// Conversion factor from the purchase unit to the base unit
    #[schema(value_type = String, example = "100.00")]
    pub unit_per_purchase_uom: Decimal,
    /// Quantity that should trigger replenishment
    #[schema(value_type = String, example = "500.00")]
    pub reorder_point_quantity: Decimal,
}

impl InventoryItem {
    /// New record value carrying this item's id and every field of `update`.
    pub fn replaced_with(&self, update: UpdateInventoryItem) -> Self {
        Self {
            id: self.id,
            name: update.name,
            description: update.description,
            base_unit_of_measure_id: update.base_unit_of_measure_id,
            standard_cost: update.standard_cost,
            unit_per_purchase_uom: update.unit_per_purchase_uom,
            reorder_point_quantity: update.reorder_point_quantity,
        }
    }
}

/// DTO for creating a new inventory item
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInventoryItem {
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    #[schema(example = "Bolt-M6")]
    pub name: String,

    #[validate(length(max = 200))]
    pub description: Option<String>,

    #[validate(range(min = 1))]
    #[schema(example = 1)]
    pub base_unit_of_measure_id: i64,

    #[validate(custom(function = "validate_money"))]
    #[schema(value_type = String, example = "0.05")]
    pub standard_cost: Decimal,

    #[validate(custom(function = "validate_money"))]
    #[schema(value_type = String, example = "100")]
    pub unit_per_purchase_uom: Decimal,

    #[validate(custom(function = "validate_money"))]
    #[schema(value_type = String, example = "500")]
    pub reorder_point_quantity: Decimal,
}

/// DTO for replacing an inventory item; every field is required
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInventoryItem {
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub name: String,

    #[validate(length(max = 200))]
    pub description: Option<String>,

    #[validate(range(min = 1))]
    pub base_unit_of_measure_id: i64,

    #[validate(custom(function = "validate_money"))]
    #[schema(value_type = String)]
    pub standard_cost: Decimal,

    #[validate(custom(function = "validate_money"))]
    #[schema(value_type = String)]
    pub unit_per_purchase_uom: Decimal,

    #[validate(custom(function = "validate_money"))]
    #[schema(value_type = String)]
    pub reorder_point_quantity: Decimal,
}

/// Sortable columns, named as they appear on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum SortField {
    Id,
    #[default]
    Name,
    Description,
    BaseUnitOfMeasureId,
    StandardCost,
    UnitPerPurchaseUom,
    ReorderPointQuantity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl FromStr for Sort {
    type Err = InventoryError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || InventoryError::InvalidData(format!("Invalid sort '{raw}'"));

        let captures = SORT_REGEX.captures(raw).ok_or_else(invalid)?;
        let field = captures
            .get(1)
            .and_then(|m| SortField::from_str(m.as_str()).ok())
            .ok_or_else(invalid)?;
        let direction = match captures.get(2) {
            Some(m) => SortDirection::from_str(m.as_str()).map_err(|_| invalid())?,
            None => SortDirection::Asc,
        };

        Ok(Self { field, direction })
    }
}

/// Paging query parameters (`?page=0&size=20&sort=name,asc`)
#[derive(Debug, Clone, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Zero-based page index
    #[serde(default)]
    #[validate(range(max = MAX_PAGE_INDEX))]
    #[param(default = 0, minimum = 0)]
    pub page: u64,

    /// Page size
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100))]
    #[param(default = 20, minimum = 1, maximum = 100)]
    pub size: u64,

    /// `field[,asc|desc]`, defaults to `name,asc`
    #[param(example = "standardCost,desc")]
    pub sort: Option<String>,
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: None,
        }
    }
}

/// Validated paging request handed to repositories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
    pub sort: Sort,
}

impl PageRequest {
    pub fn new(page: u64, size: u64) -> Self {
        Self {
            page: page.min(MAX_PAGE_INDEX),
            size: size.clamp(1, MAX_PAGE_SIZE),
            sort: Sort::default(),
        }
    }

    pub fn sorted_by(mut self, field: SortField, direction: SortDirection) -> Self {
        self.sort = Sort { field, direction };
        self
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

impl TryFrom<PageParams> for PageRequest {
    type Error = InventoryError;

    fn try_from(params: PageParams) -> Result<Self, Self::Error> {
        let sort = match params.sort.as_deref() {
            Some(raw) if !raw.trim().is_empty() => raw.parse()?,
            _ => Sort::default(),
        };

        Ok(Self {
            page: params.page.min(MAX_PAGE_INDEX),
            size: params.size.clamp(1, MAX_PAGE_SIZE),
            sort,
        })
    }
}

/// One page of results
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    /// Zero-based page index
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
    pub first: bool,
    pub last: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let total_pages = total_elements.div_ceil(request.size);
        Self {
            content,
            page: request.page,
            size: request.size,
            total_elements,
            total_pages,
            first: request.page == 0,
            last: request.page.saturating_add(1) >= total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            first: self.first,
            last: self.last,
        }
    }
}

/// `?name=` query parameter for search and name checks
#[derive(Debug, Clone, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct NameQuery {
    /// Name or name fragment, required and non-blank
    #[validate(length(max = 100))]
    pub name: Option<String>,
}

impl NameQuery {
    /// The `name` parameter, rejecting a missing or blank value.
    pub fn required(self) -> Result<String, InventoryError> {
        match self.name {
            None => Err(InventoryError::InvalidData(
                axum_helpers::errors::messages::parameter_missing("name"),
            )),
            Some(name) if name.trim().is_empty() => Err(InventoryError::InvalidData(
                "Parameter 'name' must not be blank".to_string(),
            )),
            Some(name) => Ok(name),
        }
    }
}
