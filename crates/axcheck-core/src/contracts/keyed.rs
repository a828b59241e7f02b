//! Keyed-mapping encoding of snapshot records.
//!
//! The presentation layer receives every record as a flat string-keyed map.
//! Field names come from the serde attributes on [`ServiceRecord`] and
//! [`AppRecord`]; the constants below list them for consumers that build or
//! validate maps by hand.
//!
//! [`ServiceRecord`]: crate::domain::ServiceRecord
//! [`AppRecord`]: crate::domain::AppRecord

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::ports::IntrospectionError;

/// Keys of a service record map, in declaration order.
pub const SERVICE_RECORD_KEYS: [&str; 8] = [
    "packageName",
    "serviceName",
    "serviceLabel",
    "description",
    "canRetrieveWindowContent",
    "canRequestTouchExploration",
    "canRequestEnhancedWebAccessibility",
    "settingsActivityName",
];

/// Keys of an app record map, in declaration order.
pub const APP_RECORD_KEYS: [&str; 7] = [
    "packageName",
    "appName",
    "versionName",
    "versionCode",
    "installerPackageName",
    "isSystemApp",
    "installTime",
];

/// Encode a record as a keyed map.
pub fn to_keyed<T: Serialize>(record: &T) -> Result<Map<String, Value>, IntrospectionError> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map),
        other => Err(IntrospectionError::Serialization(format!(
            "record encoded as {other} instead of a map"
        ))),
    }
}

/// Decode a record from a keyed map.
pub fn from_keyed<T: DeserializeOwned>(map: Map<String, Value>) -> Result<T, IntrospectionError> {
    Ok(serde_json::from_value(Value::Object(map))?)
}

/// Encode a sequence of records as a JSON array of keyed maps.
pub fn to_keyed_list<T: Serialize>(records: &[T]) -> Result<Value, IntrospectionError> {
    records
        .iter()
        .map(|record| to_keyed(record).map(Value::Object))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}
