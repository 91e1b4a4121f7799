//! Leaf values produced by property lookups
//!
//! A [`Value`] is what a property path resolves to. Scalars carry an explicit
//! three-way comparison; nested entities are carried as [`Value::Object`] so
//! path walking can continue through them.

use super::properties::Properties;
use chrono::{DateTime, NaiveDate, Utc};
use ordered_float::OrderedFloat;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use uuid::Uuid;

/// A property value that can take part in a sort
#[derive(Clone)]
pub enum Value<'a> {
    /// `false` before `true`
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Unsigned integer
    UInt(u64),
    /// Float; NaN sorts after every other number
    Float(OrderedFloat<f64>),
    /// Text, compared bytewise
    Str(Cow<'a, str>),
    /// Point in time
    Timestamp(DateTime<Utc>),
    /// Calendar date
    Date(NaiveDate),
    /// UUID, compared by its bytes
    Uuid(Uuid),
    /// A nested entity; only reachable further down a path
    Object(&'a dyn Properties),
}

/// Coarse grouping used to order values of different kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueKind {
    /// [`Value::Bool`]
    Bool,
    /// [`Value::Int`], [`Value::UInt`] and [`Value::Float`]
    Number,
    /// [`Value::Str`]
    Str,
    /// [`Value::Timestamp`]
    Timestamp,
    /// [`Value::Date`]
    Date,
    /// [`Value::Uuid`]
    Uuid,
    /// [`Value::Object`]
    Object,
}

impl<'a> Value<'a> {
    /// Wrap a nested entity
    pub fn object<P: Properties>(entity: &'a P) -> Self {
        Value::Object(entity)
    }

    /// Kind used when values are not directly comparable
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) | Value::UInt(_) | Value::Float(_) => {
                ValueKind::Number
            }
            Value::Str(_) => ValueKind::Str,
            Value::Timestamp(_) => ValueKind::Timestamp,
            Value::Date(_) => ValueKind::Date,
            Value::Uuid(_) => ValueKind::Uuid,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// Text content, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    /// Nested entity, if this is an object
    pub fn as_object(&self) -> Option<&'a dyn Properties> {
        match self {
            Value::Object(entity) => Some(*entity),
            _ => None,
        }
    }

    /// Natural ordering between two present values.
    ///
    /// Integers and floats compare numerically across representations.
    /// Values of unrelated kinds are not mutually comparable; they fall back
    /// to [`ValueKind`] order so the result stays a total order. Two objects
    /// compare equal.
    pub fn compare(&self, other: &Value<'_>) -> Ordering {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::UInt(a), Value::UInt(b)) => a.cmp(b),
            (Value::Int(a), Value::UInt(b)) => compare_signed(*a, *b),
            (Value::UInt(a), Value::Int(b)) => compare_signed(*b, *a).reverse(),
            (Value::Float(a), Value::Float(b)) => a.cmp(b),
            (Value::Int(a), Value::Float(b)) => {
                compare_integer(i128::from(*a), b.0)
            }
            (Value::UInt(a), Value::Float(b)) => {
                compare_integer(i128::from(*a), b.0)
            }
            (Value::Float(a), Value::Int(b)) => {
                compare_integer(i128::from(*b), a.0).reverse()
            }
            (Value::Float(a), Value::UInt(b)) => {
                compare_integer(i128::from(*b), a.0).reverse()
            }
            (Value::Str(a), Value::Str(b)) => a.as_ref().cmp(b.as_ref()),
            (Value::Timestamp(a), Value::Timestamp(b)) => a.cmp(b),
            (Value::Date(a), Value::Date(b)) => a.cmp(b),
            (Value::Uuid(a), Value::Uuid(b)) => a.cmp(b),
            (Value::Object(_), Value::Object(_)) => Ordering::Equal,
            (a, b) => a.kind().cmp(&b.kind()),
        }
    }
}

/// `2^127`, the first float magnitude past the `i128` range
const I128_BOUND: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

/// Exact comparison of an integer against a float.
///
/// The float's integral part is compared as an integer and its fraction
/// breaks ties; integers above 2^53 are never rounded through `f64`. NaN
/// sorts after every number, as in [`OrderedFloat`].
fn compare_integer(int: i128, float: f64) -> Ordering {
    if float.is_nan() {
        return Ordering::Less;
    }

    let floor = float.floor();
    if floor >= I128_BOUND {
        return Ordering::Less;
    }
    if floor < -I128_BOUND {
        return Ordering::Greater;
    }

    // Integral and within range, so the cast is exact
    match int.cmp(&(floor as i128)) {
        Ordering::Equal if float > floor => Ordering::Less,
        decided => decided,
    }
}

fn compare_signed(signed: i64, unsigned: u64) -> Ordering {
    match u64::try_from(signed) {
        Ok(value) => value.cmp(&unsigned),
        Err(_) => Ordering::Less,
    }
}

impl PartialEq for Value<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Value::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Value::UInt(v) => f.debug_tuple("UInt").field(v).finish(),
            Value::Float(v) => f.debug_tuple("Float").field(&v.0).finish(),
            Value::Str(v) => f.debug_tuple("Str").field(v).finish(),
            Value::Timestamp(v) => {
                f.debug_tuple("Timestamp").field(v).finish()
            }
            Value::Date(v) => f.debug_tuple("Date").field(v).finish(),
            Value::Uuid(v) => f.debug_tuple("Uuid").field(v).finish(),
            Value::Object(_) => f.write_str("Object(..)"),
        }
    }
}

macro_rules! value_from {
    ($variant:ident as $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for Value<'_> {
                fn from(value: $source) -> Self {
                    Value::$variant(value as $target)
                }
            }
        )+
    };
}

value_from!(Int as i64: i8, i16, i32, i64, isize);
value_from!(UInt as u64: u8, u16, u32, u64, usize);

impl From<bool> for Value<'_> {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f32> for Value<'_> {
    fn from(value: f32) -> Self {
        Value::Float(OrderedFloat(f64::from(value)))
    }
}

impl From<f64> for Value<'_> {
    fn from(value: f64) -> Self {
        Value::Float(OrderedFloat(value))
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(value: &'a str) -> Self {
        Value::Str(Cow::Borrowed(value))
    }
}

impl<'a> From<&'a String> for Value<'a> {
    fn from(value: &'a String) -> Self {
        Value::Str(Cow::Borrowed(value.as_str()))
    }
}

impl From<String> for Value<'_> {
    fn from(value: String) -> Self {
        Value::Str(Cow::Owned(value))
    }
}

impl<'a> From<Cow<'a, str>> for Value<'a> {
    fn from(value: Cow<'a, str>) -> Self {
        Value::Str(value)
    }
}

impl From<DateTime<Utc>> for Value<'_> {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Timestamp(value)
    }
}

impl From<NaiveDate> for Value<'_> {
    fn from(value: NaiveDate) -> Self {
        Value::Date(value)
    }
}

impl From<Uuid> for Value<'_> {
    fn from(value: Uuid) -> Self {
        Value::Uuid(value)
    }
}

/// Field types that expose themselves as a sortable [`Value`].
///
/// `None` means the field holds no value and sorts as null.
pub trait AsValue {
    /// The value to sort by, or `None` for null
    fn as_value(&self) -> Option<Value<'_>>;
}

macro_rules! as_value_copy {
    ($($source:ty),+) => {
        $(
            impl AsValue for $source {
                fn as_value(&self) -> Option<Value<'_>> {
                    Some(Value::from(*self))
                }
            }
        )+
    };
}

as_value_copy!(
    bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64,
    DateTime<Utc>, NaiveDate, Uuid
);

impl AsValue for str {
    fn as_value(&self) -> Option<Value<'_>> {
        Some(Value::from(self))
    }
}

impl AsValue for String {
    fn as_value(&self) -> Option<Value<'_>> {
        Some(Value::from(self.as_str()))
    }
}

impl AsValue for Cow<'_, str> {
    fn as_value(&self) -> Option<Value<'_>> {
        Some(Value::from(self.as_ref()))
    }
}

impl<V: AsValue> AsValue for Option<V> {
    fn as_value(&self) -> Option<Value<'_>> {
        self.as_ref().and_then(AsValue::as_value)
    }
}

impl<V: AsValue + ?Sized> AsValue for &V {
    fn as_value(&self) -> Option<Value<'_>> {
        (**self).as_value()
    }
}

impl<V: AsValue + ?Sized> AsValue for Box<V> {
    fn as_value(&self) -> Option<Value<'_>> {
        (**self).as_value()
    }
}

/// Field types that hold a nested entity
pub trait AsObject {
    /// The nested entity wrapped as [`Value::Object`], or `None` for null
    fn as_object(&self) -> Option<Value<'_>>;
}

impl<P: Properties> AsObject for Option<P> {
    fn as_object(&self) -> Option<Value<'_>> {
        self.as_ref().map(Value::object)
    }
}

impl<P: Properties + ?Sized> AsObject for Box<P> {
    fn as_object(&self) -> Option<Value<'_>> {
        Some(Value::object(self))
    }
}

impl<P: Properties + ?Sized> AsObject for Arc<P> {
    fn as_object(&self) -> Option<Value<'_>> {
        Some(Value::object(self))
    }
}

impl<P: Properties + ?Sized> AsObject for Rc<P> {
    fn as_object(&self) -> Option<Value<'_>> {
        Some(Value::object(self))
    }
}
