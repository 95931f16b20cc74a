//! Response envelope decoding.
//!
//! Lists usually arrive as `{ data: [...], pagination: {...} }` and single
//! records as `{ <entity>: {...} }`, but not every endpoint agrees. List
//! parsing probes the known shapes in a fixed order before giving up.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::ClientError;
use crate::models::Pagination;

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Option<Pagination>,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.pagination.as_ref().is_some_and(|p| p.has_next)
    }
}

fn take_array(value: &mut Value, pointer: &str) -> Option<Value> {
    let slot = if pointer.is_empty() {
        value
    } else {
        value.pointer_mut(pointer)?
    };
    slot.is_array().then(|| slot.take())
}

fn take_object(value: &mut Value, pointer: &str) -> Option<Value> {
    let slot = if pointer.is_empty() {
        value
    } else {
        value.pointer_mut(pointer)?
    };
    slot.is_object().then(|| slot.take())
}

/// Decode a list response for `entity_key` (e.g. `"documents"`).
///
/// Shapes tried, in order: bare array, `data`, `<entity_key>`,
/// `data.<entity_key>`, `items`.
pub fn parse_list<T: DeserializeOwned>(mut value: Value, entity_key: &str) -> Result<Page<T>, ClientError> {
    let pagination = ["/pagination", "/data/pagination", "/meta/pagination"]
        .iter()
        .find_map(|p| value.pointer(p).cloned())
        .and_then(|p| serde_json::from_value::<Pagination>(p).ok());

    let probes = [
        String::new(),
        "/data".to_string(),
        format!("/{}", entity_key),
        format!("/data/{}", entity_key),
        "/items".to_string(),
    ];
    let array = probes
        .iter()
        .find_map(|p| take_array(&mut value, p))
        .ok_or_else(|| {
            ClientError::Decode(format!("no {} list found in response", entity_key))
        })?;

    Ok(Page {
        items: serde_json::from_value(array)?,
        pagination,
    })
}

/// Decode a single-record response for `entity_key` (e.g. `"task"`).
///
/// Shapes tried, in order: `<entity_key>`, `data.<entity_key>`, `data`,
/// the bare object.
pub fn parse_entity<T: DeserializeOwned>(mut value: Value, entity_key: &str) -> Result<T, ClientError> {
    let probes = [
        format!("/{}", entity_key),
        format!("/data/{}", entity_key),
        "/data".to_string(),
        String::new(),
    ];
    let object = probes
        .iter()
        .find_map(|p| take_object(&mut value, p))
        .ok_or_else(|| ClientError::Decode(format!("no {} found in response", entity_key)))?;
    Ok(serde_json::from_value(object)?)
}
