use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Check if a JSON object has no members.
///
/// Used as a `skip_serializing_if` predicate for free-form `meta` objects.
///
/// # Examples
///
/// ```
/// use jsonapi_util::is_empty::is_empty_map;
///
/// let mut meta = serde_json::Map::new();
/// assert!(is_empty_map(&meta));
///
/// meta.insert("count".to_string(), serde_json::json!(1));
/// assert!(!is_empty_map(&meta));
/// ```
pub fn is_empty_map(obj: &Map<String, Value>) -> bool {
    obj.is_empty()
}

/// Check if a sorted map (e.g. a `links` or `relationships` table) is empty.
pub fn is_empty_btree<V>(obj: &BTreeMap<String, V>) -> bool {
    obj.is_empty()
}

/// Check if an optional JSON value carries nothing worth emitting.
///
/// `None`, `null` and `{}` are empty. Scalars, arrays and non-empty objects
/// are not.
pub fn is_empty_value(value: &Option<Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Object(map)) => map.is_empty(),
        Some(_) => false,
    }
}
