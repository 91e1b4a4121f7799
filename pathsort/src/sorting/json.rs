//! JSON documents as sortable entities
//!
//! Objects expose their members as properties, so any value that serializes
//! through serde can be sorted by the names it serializes with.

use super::apply::{reorder_by_indices, sort_indices_by};
use super::comparator::Comparator;
use super::properties::{Properties, PropertyResult};
use super::value::{AsValue, Value};
use crate::error::Result;
use ordered_float::OrderedFloat;
use serde::Serialize;
use serde_json::{Map, Number, Value as JsonValue};
use std::borrow::Cow;
use tracing::trace;

impl AsValue for JsonValue {
    fn as_value(&self) -> Option<Value<'_>> {
        match self {
            JsonValue::Null => None,
            JsonValue::Bool(flag) => Some(Value::Bool(*flag)),
            JsonValue::Number(number) => Some(number_value(number)),
            JsonValue::String(text) => Some(Value::Str(Cow::Borrowed(text.as_str()))),
            JsonValue::Array(_) | JsonValue::Object(_) => {
                Some(Value::object(self))
            }
        }
    }
}

fn number_value(number: &Number) -> Value<'static> {
    if let Some(value) = number.as_u64() {
        Value::UInt(value)
    } else if let Some(value) = number.as_i64() {
        Value::Int(value)
    } else {
        Value::Float(OrderedFloat(number.as_f64().unwrap_or(f64::NAN)))
    }
}

impl Properties for JsonValue {
    fn property(&self, name: &str) -> PropertyResult<'_> {
        match self {
            JsonValue::Object(members) => members.property(name),
            _ => Ok(None),
        }
    }
}

impl Properties for Map<String, JsonValue> {
    fn property(&self, name: &str) -> PropertyResult<'_> {
        Ok(self.get(name).and_then(AsValue::as_value))
    }
}

impl<T: Serialize> Comparator<T> {
    /// Sort items by their serialized JSON form.
    ///
    /// Each item is serialized once; property paths refer to the serialized
    /// member names, so serde renames apply. On error the slice is left
    /// untouched.
    pub fn sort_serialized(&self, items: &mut [T]) -> Result<()> {
        if self.is_unsorted() {
            return Ok(());
        }

        let views = items
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        trace!(items = views.len(), "materialized JSON views for sorting");

        let indices = sort_indices_by(views.len(), |a, b| {
            self.compare_entities(&views[a], &views[b])
        })?;
        reorder_by_indices(items, indices);
        Ok(())
    }
}
