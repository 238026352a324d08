//! Shared test helpers for binding tests

use serde_json::json;

use crate::bind::DataMap;

/// A data map with basic scalar values.
pub(super) fn simple_data() -> DataMap {
    DataMap::from_json(json!({
        "name": "Ada",
        "count": 42,
        "price": 9.99,
        "enabled": true,
        "empty": null,
    }))
    .unwrap()
}

/// A data map with nested objects and compound values.
pub(super) fn nested_data() -> DataMap {
    DataMap::from_json(json!({
        "user": { "name": "Ada", "email": "ada@example.com" },
        "tags": ["a", "b"],
        "user.name": "flat wins",
    }))
    .unwrap()
}
