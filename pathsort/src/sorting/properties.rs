//! Named property access for sortable entities
//!
//! Entities expose their fields by name through [`Properties`]. Each lookup
//! distinguishes three outcomes:
//!
//! - `Ok(Some(value))`: the property exists and holds a value
//! - `Ok(None)`: the property is absent on this type, or holds null
//! - `Err(PropertyError::Unreadable { .. })`: the property exists but its
//!   reader failed
//!
//! Implementations are usually generated with [`properties!`](crate::properties),
//! while string-keyed maps and JSON documents implement the trait directly.

use super::value::{AsValue, Value};
use crate::error::PropertyError;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::rc::Rc;
use std::sync::Arc;

/// Outcome of a single named property lookup
pub type PropertyResult<'a> = Result<Option<Value<'a>>, PropertyError>;

/// Capability to read a property by name
pub trait Properties {
    /// Look up `name` on this entity
    fn property(&self, name: &str) -> PropertyResult<'_>;
}

impl<P: Properties + ?Sized> Properties for &P {
    fn property(&self, name: &str) -> PropertyResult<'_> {
        (**self).property(name)
    }
}

impl<P: Properties + ?Sized> Properties for Box<P> {
    fn property(&self, name: &str) -> PropertyResult<'_> {
        (**self).property(name)
    }
}

impl<P: Properties + ?Sized> Properties for Arc<P> {
    fn property(&self, name: &str) -> PropertyResult<'_> {
        (**self).property(name)
    }
}

impl<P: Properties + ?Sized> Properties for Rc<P> {
    fn property(&self, name: &str) -> PropertyResult<'_> {
        (**self).property(name)
    }
}

impl<V: AsValue, S: BuildHasher> Properties for HashMap<String, V, S> {
    fn property(&self, name: &str) -> PropertyResult<'_> {
        Ok(self.get(name).and_then(AsValue::as_value))
    }
}

impl<V: AsValue> Properties for BTreeMap<String, V> {
    fn property(&self, name: &str) -> PropertyResult<'_> {
        Ok(self.get(name).and_then(AsValue::as_value))
    }
}

/// Generate a [`Properties`] implementation from a field table.
///
/// Scalar fields map through [`AsValue`]; fields marked `as object` hold a
/// nested entity and map through [`AsObject`](crate::AsObject). Names not in
/// the table resolve to `None`.
///
/// ```
/// use pathsort::properties;
///
/// struct Artist {
///     name: String,
/// }
///
/// struct Album {
///     title: String,
///     year: Option<u16>,
///     artist: Option<Box<Artist>>,
/// }
///
/// properties!(Artist { "name" => name });
/// properties!(Album {
///     "title" => title,
///     "year" => year,
///     "artist" => artist as object,
/// });
/// ```
#[macro_export]
macro_rules! properties {
    ($ty:ty { $($name:literal => $field:ident $(as $kind:ident)?),* $(,)? }) => {
        impl $crate::Properties for $ty {
            fn property(&self, name: &str) -> $crate::PropertyResult<'_> {
                $(
                    if name == $name {
                        return Ok($crate::__property_value!(
                            &self.$field $(, $kind)?
                        ));
                    }
                )*
                Ok(None)
            }
        }

        impl $crate::AsObject for $ty {
            fn as_object(&self) -> Option<$crate::Value<'_>> {
                Some($crate::Value::object(self))
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __property_value {
    ($value:expr, object) => {
        $crate::AsObject::as_object($value)
    };
    ($value:expr) => {
        $crate::AsValue::as_value($value)
    };
}
