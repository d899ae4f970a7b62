use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, IdPath, ValidatedJson, ValidatedQuery,
    errors::handlers::method_not_allowed,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse, ServiceUnavailableResponse,
    },
    extract_ip_from_headers, extract_user_agent,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::InventoryResult;
use crate::models::{
    CreateInventoryItem, InventoryItem, NameQuery, Page, PageParams, PageRequest,
    UpdateInventoryItem,
};
use crate::repository::InventoryItemRepository;
use crate::service::InventoryItemService;
use crate::uom_client::UomClient;

pub const TAG: &str = "Inventory Items";

type SharedService<R, U> = Arc<InventoryItemService<R, U>>;

/// OpenAPI documentation for the Inventory Item API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_items,
        create_item,
        search_items,
        check_name,
        get_item,
        update_item,
        delete_item,
    ),
    components(
        schemas(InventoryItem, CreateInventoryItem, UpdateInventoryItem),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            ConflictResponse,
            ServiceUnavailableResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Inventory item management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the inventory item router with all HTTP endpoints
pub fn router<R, U>(service: InventoryItemService<R, U>) -> Router
where
    R: InventoryItemRepository + 'static,
    U: UomClient + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_items::<R, U>).post(create_item::<R, U>))
        .route("/search", get(search_items::<R, U>))
        .route("/check-name", get(check_name::<R, U>))
        .route(
            "/{id}",
            get(get_item::<R, U>)
                .put(update_item::<R, U>)
                .delete(delete_item::<R, U>),
        )
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(shared_service)
}

fn audit(
    action: &str,
    id: Option<i64>,
    outcome: AuditOutcome,
    headers: &HeaderMap,
    details: serde_json::Value,
) {
    AuditEvent::new(action, id.map(|id| format!("inventory_item:{}", id)), outcome)
        .with_ip(extract_ip_from_headers(headers))
        .with_user_agent(extract_user_agent(headers))
        .with_details(details)
        .log();
}

/// List inventory items, one page at a time
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(PageParams),
    responses(
        (status = 200, description = "Page of inventory items", body = Page<InventoryItem>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_items<R: InventoryItemRepository, U: UomClient>(
    State(service): State<SharedService<R, U>>,
    ValidatedQuery(params): ValidatedQuery<PageParams>,
) -> InventoryResult<Json<Page<InventoryItem>>> {
    let page = service.find_all(PageRequest::try_from(params)?).await?;
    Ok(Json(page))
}

/// Create a new inventory item
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateInventoryItem,
    responses(
        (status = 201, description = "Inventory item created", body = InventoryItem),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 503, response = ServiceUnavailableResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_item<R: InventoryItemRepository, U: UomClient>(
    State(service): State<SharedService<R, U>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateInventoryItem>,
) -> InventoryResult<impl IntoResponse> {
    let name = input.name.clone();

    match service.create(input).await {
        Ok(item) => {
            audit(
                "inventory_item.create",
                Some(item.id),
                AuditOutcome::Success,
                &headers,
                json!({ "name": item.name, "base_unit_of_measure_id": item.base_unit_of_measure_id }),
            );
            Ok((StatusCode::CREATED, Json(item)))
        }
        Err(err) => {
            audit(
                "inventory_item.create",
                None,
                AuditOutcome::Failure,
                &headers,
                json!({ "name": name, "reason": err.to_string() }),
            );
            Err(err)
        }
    }
}

/// Search inventory items by name fragment (case-insensitive)
#[utoipa::path(
    get,
    path = "/search",
    tag = TAG,
    params(NameQuery, PageParams),
    responses(
        (status = 200, description = "Page of matching inventory items", body = Page<InventoryItem>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_items<R: InventoryItemRepository, U: UomClient>(
    State(service): State<SharedService<R, U>>,
    ValidatedQuery(query): ValidatedQuery<NameQuery>,
    ValidatedQuery(params): ValidatedQuery<PageParams>,
) -> InventoryResult<Json<Page<InventoryItem>>> {
    let name = query.required()?;
    let page = service
        .find_all_by_name(&name, PageRequest::try_from(params)?)
        .await?;
    Ok(Json(page))
}

/// Check whether a name is already used by an inventory item (case-insensitive)
#[utoipa::path(
    get,
    path = "/check-name",
    tag = TAG,
    params(NameQuery),
    responses(
        (status = 200, description = "true if the name is taken", body = bool),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn check_name<R: InventoryItemRepository, U: UomClient>(
    State(service): State<SharedService<R, U>>,
    ValidatedQuery(query): ValidatedQuery<NameQuery>,
) -> InventoryResult<Json<bool>> {
    let name = query.required()?;
    Ok(Json(service.is_name_taken(&name).await?))
}

/// Get an inventory item by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Inventory item ID")
    ),
    responses(
        (status = 200, description = "Inventory item found", body = InventoryItem),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_item<R: InventoryItemRepository, U: UomClient>(
    State(service): State<SharedService<R, U>>,
    IdPath(id): IdPath,
) -> InventoryResult<Json<InventoryItem>> {
    let item = service.find_by_id(id).await?;
    Ok(Json(item))
}

/// Replace an inventory item
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Inventory item ID")
    ),
    request_body = UpdateInventoryItem,
    responses(
        (status = 200, description = "Inventory item updated", body = InventoryItem),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 503, response = ServiceUnavailableResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_item<R: InventoryItemRepository, U: UomClient>(
    State(service): State<SharedService<R, U>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateInventoryItem>,
) -> InventoryResult<Json<InventoryItem>> {
    match service.update(id, input).await {
        Ok(item) => {
            audit(
                "inventory_item.update",
                Some(id),
                AuditOutcome::Success,
                &headers,
                json!({ "name": item.name }),
            );
            Ok(Json(item))
        }
        Err(err) => {
            audit(
                "inventory_item.update",
                Some(id),
                AuditOutcome::Failure,
                &headers,
                json!({ "reason": err.to_string() }),
            );
            Err(err)
        }
    }
}

/// Delete an inventory item
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Inventory item ID")
    ),
    responses(
        (status = 204, description = "Inventory item deleted"),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_item<R: InventoryItemRepository, U: UomClient>(
    State(service): State<SharedService<R, U>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
) -> InventoryResult<impl IntoResponse> {
    let result = service.delete_by_id(id).await;

    let outcome = match &result {
        Ok(()) => AuditOutcome::Success,
        Err(_) => AuditOutcome::Failure,
    };
    let details = match &result {
        Ok(()) => json!({}),
        Err(err) => json!({ "reason": err.to_string() }),
    };
    audit("inventory_item.delete", Some(id), outcome, &headers, details);

    result.map(|()| StatusCode::NO_CONTENT)
}
