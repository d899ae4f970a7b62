//! User-facing error messages.
//!
//! Messages are built from the values passed in; nothing here reads ambient state.

use std::fmt::Display;

pub const VALIDATION_FAILED: &str = "Request validation failed";
pub const ROUTE_NOT_FOUND: &str = "The requested resource was not found";
pub const INTERNAL_ERROR: &str = "An unexpected error occurred";
pub const INTEGRITY_VIOLATION: &str =
    "The request conflicts with the current state of the resource";

/// `"<entity> with <field> '<value>' was not found"`
pub fn not_found(entity: &str, field: &str, value: impl Display) -> String {
    format!("{entity} with {field} '{value}' was not found")
}

/// `"<entity> with <field> '<value>' already exists"`
pub fn already_exists(entity: &str, field: &str, value: impl Display) -> String {
    format!("{entity} with {field} '{value}' already exists")
}

pub fn parameter_missing(parameter: &str) -> String {
    format!("Required parameter '{parameter}' is missing")
}

pub fn method_not_supported(method: impl Display) -> String {
    format!("Request method '{method}' is not supported for this resource")
}

pub fn service_unavailable(service: &str) -> String {
    format!("{service} is temporarily unavailable, please retry later")
}
