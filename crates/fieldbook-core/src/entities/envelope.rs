//! Decoding of paginated list and search responses
//!
//! ```json
//! { "products": [...], "page": 2, "per_page": 20, "total": 42, "has_more": true }
//! ```
//!
//! A bare JSON array is accepted as the item sequence of a single,
//! complete page. Any other shape is a decode error.

use serde_json::Value;

use super::Entity;
use crate::error::{DashboardError, Result};

/// One page of entities plus the backend's pagination state
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub has_more: bool,
    pub total: u64,
}

impl<T> Page<T> {
    /// A page with no successors
    pub fn complete(items: Vec<T>) -> Self {
        let total = items.len() as u64;
        Self {
            items,
            page: 1,
            has_more: false,
            total,
        }
    }
}

/// Decode a list/search body for entity `T`, requested as page `requested_page`
pub fn decode_list<T: Entity>(body: Value, requested_page: u32) -> Result<Page<T>> {
    let entity = T::KIND.items_key();
    let decode_err = |message: String| DashboardError::Decode { entity, message };

    match body {
        Value::Array(_) => {
            let items: Vec<T> =
                serde_json::from_value(body).map_err(|e| decode_err(e.to_string()))?;
            let total = items.len() as u64;
            Ok(Page {
                items,
                page: requested_page,
                has_more: false,
                total,
            })
        }
        Value::Object(mut map) => {
            let raw_items = map
                .remove(entity)
                .ok_or_else(|| decode_err(format!("missing `{}` array", entity)))?;
            if !raw_items.is_array() {
                return Err(decode_err(format!("`{}` is not an array", entity)));
            }
            let items: Vec<T> =
                serde_json::from_value(raw_items).map_err(|e| decode_err(e.to_string()))?;

            let page = match map.get("page") {
                None | Some(Value::Null) => requested_page,
                Some(v) => v
                    .as_u64()
                    .and_then(|p| u32::try_from(p).ok())
                    .ok_or_else(|| decode_err(format!("invalid `page`: {}", v)))?,
            };
            let has_more = match map.get("has_more") {
                None | Some(Value::Null) => false,
                Some(v) => v
                    .as_bool()
                    .ok_or_else(|| decode_err(format!("invalid `has_more`: {}", v)))?,
            };
            let total = match map.get("total") {
                None | Some(Value::Null) => items.len() as u64,
                Some(v) => v
                    .as_u64()
                    .ok_or_else(|| decode_err(format!("invalid `total`: {}", v)))?,
            };

            Ok(Page {
                items,
                page,
                has_more,
                total,
            })
        }
        other => Err(decode_err(format!("expected object or array, got {}", other))),
    }
}
