//! The shape shared by every CRUD resource the console manages.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::Validate;

use kidscare_core::{AppError, AppResult};

/// A record type served by a `getAll`/`getById`/`create`/`update`/`delete`
/// endpoint family.
pub trait Resource: DeserializeOwned + Serialize + Clone + Send + Sync + 'static {
    /// Payload accepted by `POST {ENDPOINT}/`.
    type Create: Serialize + DeserializeOwned + Validate + Send + Sync;
    /// Payload accepted by `PUT {ENDPOINT}/{id}`; unset fields are omitted.
    type Update: Serialize + DeserializeOwned + Validate + Send + Sync;

    /// API path prefix, e.g. `/children`.
    const ENDPOINT: &'static str;
    /// Human-readable singular name used in messages.
    const LABEL: &'static str;

    /// Server-assigned identifier.
    fn id(&self) -> i64;

    /// Build a create payload from `key=value` fields and check required ones.
    fn create_from_fields(fields: &[String]) -> AppResult<Self::Create> {
        payload_from_fields(fields)
    }

    /// Build an update payload from `key=value` fields.
    fn update_from_fields(fields: &[String]) -> AppResult<Self::Update> {
        payload_from_fields(fields)
    }
}

/// Parse `key=value` pairs into a JSON object of strings.
///
/// Values stay text; payload types convert id fields themselves, so a phone
/// number or a room called `101` is never turned into a number.
pub fn parse_fields(fields: &[String]) -> AppResult<Map<String, Value>> {
    let mut map = Map::new();
    for field in fields {
        let (key, raw) = field
            .split_once('=')
            .ok_or_else(|| AppError::validation(format!("Expected key=value, got '{field}'")))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(AppError::validation(format!("Empty field name in '{field}'")));
        }
        map.insert(key.to_string(), Value::String(raw.to_string()));
    }
    Ok(map)
}

/// Deserialize and validate a payload from `key=value` fields.
pub fn payload_from_fields<T>(fields: &[String]) -> AppResult<T>
where
    T: DeserializeOwned + Validate,
{
    let map = parse_fields(fields)?;
    let payload: T = serde_json::from_value(Value::Object(map))
        .map_err(|e| AppError::validation(format!("Invalid fields: {e}")))?;
    payload
        .validate()
        .map_err(|e| AppError::validation(format!("Missing or invalid fields: {e}")))?;
    Ok(payload)
}
