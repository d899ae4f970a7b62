//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "code": 1001,
        "value": "UNEXPECTED_ERROR",
        "message": "An unexpected error occurred",
        "timestamp": "2025-01-01T12:00:00Z",
        "path": "/api/v1/inventory-item"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "code": 1002,
        "value": "INVALID_DATA",
        "message": "Request validation failed: name (length)",
        "timestamp": "2025-01-01T12:00:00Z",
        "path": "/api/v1/inventory-item",
        "details": {
            "name": [{
                "code": "length",
                "message": null,
                "params": {"min": 1, "max": 100, "value": ""}
            }]
        }
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Invalid identifier",
    content_type = "application/json",
    example = json!({
        "code": 1002,
        "value": "INVALID_DATA",
        "message": "Invalid id 'abc': expected a positive integer",
        "timestamp": "2025-01-01T12:00:00Z",
        "path": "/api/v1/inventory-item/abc"
    })
)]
pub struct BadRequestIdResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "code": 1004,
        "value": "RESOURCE_NOT_FOUND",
        "message": "Inventory Item with id '42' was not found",
        "timestamp": "2025-01-01T12:00:00Z",
        "path": "/api/v1/inventory-item/42"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Conflict - Resource already exists",
    content_type = "application/json",
    example = json!({
        "code": 1003,
        "value": "RESOURCE_CONFLICT",
        "message": "Inventory Item with name 'Bolt-M6' already exists",
        "timestamp": "2025-01-01T12:00:00Z",
        "path": "/api/v1/inventory-item"
    })
)]
pub struct ConflictResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Service Unavailable",
    content_type = "application/json",
    example = json!({
        "code": 1006,
        "value": "SERVICE_UNAVAILABLE",
        "message": "Unit of measure service is temporarily unavailable, please retry later",
        "timestamp": "2025-01-01T12:00:00Z",
        "path": "/api/v1/inventory-item"
    })
)]
pub struct ServiceUnavailableResponse(pub ErrorResponse);
