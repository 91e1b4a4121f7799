//! Sort specifications: directions, single-key orders and multi-key sorts

use super::comparator::Comparator;
use crate::error::{Result, SortError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sort order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first
    #[default]
    #[serde(alias = "asc", alias = "ASC", alias = "ASCENDING")]
    Ascending,
    /// Largest first
    #[serde(alias = "desc", alias = "DESC", alias = "DESCENDING")]
    Descending,
}

impl SortDirection {
    /// Whether this is [`SortDirection::Ascending`]
    pub const fn is_ascending(self) -> bool {
        matches!(self, SortDirection::Ascending)
    }

    /// Whether this is [`SortDirection::Descending`]
    pub const fn is_descending(self) -> bool {
        matches!(self, SortDirection::Descending)
    }

    /// The opposite direction
    pub const fn reverse(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Orient a natural-order comparison result
    #[inline]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim();
        if value.eq_ignore_ascii_case("asc")
            || value.eq_ignore_ascii_case("ascending")
        {
            Ok(SortDirection::Ascending)
        } else if value.eq_ignore_ascii_case("desc")
            || value.eq_ignore_ascii_case("descending")
        {
            Ok(SortDirection::Descending)
        } else {
            Err(SortError::InvalidDirection(s.to_string()))
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => f.write_str("asc"),
            SortDirection::Descending => f.write_str("desc"),
        }
    }
}

/// One sort key: a property path and the direction to order it in
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    property: String,
    #[serde(default)]
    direction: SortDirection,
}

impl Order {
    /// Order on `property` in `direction`
    pub fn new(direction: SortDirection, property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction,
        }
    }

    /// Ascending order on `property`
    pub fn by(property: impl Into<String>) -> Self {
        Self::asc(property)
    }

    /// Ascending order on `property`
    pub fn asc(property: impl Into<String>) -> Self {
        Self::new(SortDirection::Ascending, property)
    }

    /// Descending order on `property`
    pub fn desc(property: impl Into<String>) -> Self {
        Self::new(SortDirection::Descending, property)
    }

    /// Dot-delimited property path
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Direction of this key
    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Whether this key sorts ascending
    pub fn is_ascending(&self) -> bool {
        self.direction.is_ascending()
    }

    /// Whether this key sorts descending
    pub fn is_descending(&self) -> bool {
        self.direction.is_descending()
    }

    /// Same property, new direction
    pub fn with_direction(&self, direction: SortDirection) -> Self {
        Self::new(direction, self.property.clone())
    }

    /// Same direction, new property
    pub fn with_property(&self, property: impl Into<String>) -> Self {
        Self::new(self.direction, property)
    }

    /// Same property, opposite direction
    pub fn reverse(&self) -> Self {
        self.with_direction(self.direction.reverse())
    }
}

impl FromStr for Order {
    type Err = SortError;

    /// Parses `property` or `property,direction`.
    fn from_str(s: &str) -> Result<Self> {
        let (property, direction) = match s.split_once(',') {
            Some((property, direction)) if direction.trim().is_empty() => {
                (property, SortDirection::default())
            }
            Some((property, direction)) => (property, direction.parse()?),
            None => (s, SortDirection::default()),
        };

        let property = property.trim();
        if property.is_empty() {
            return Err(SortError::EmptyProperty);
        }

        Ok(Order::new(direction, property))
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.property, self.direction)
    }
}

/// Ordered list of sort keys; earlier orders take precedence
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Sort {
    orders: Vec<Order>,
}

impl Sort {
    /// A sort without keys; its comparator treats every pair as equal
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// Sort every property in `properties` in the same direction
    pub fn by<I, S>(direction: SortDirection, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        properties
            .into_iter()
            .map(|property| Order::new(direction, property))
            .collect()
    }

    /// Sort by the given orders, first order first
    pub fn by_orders(orders: impl IntoIterator<Item = Order>) -> Self {
        orders.into_iter().collect()
    }

    /// Parse repeated `sort=property,direction` request parameters.
    /// Blank parameters are skipped.
    pub fn from_params<I, S>(params: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut orders = Vec::new();
        for param in params {
            let param = param.as_ref();
            if param.trim().is_empty() {
                continue;
            }
            orders.push(param.parse()?);
        }
        Ok(Self { orders })
    }

    /// Append `other`'s orders after this sort's orders
    pub fn and(mut self, other: Sort) -> Self {
        self.orders.extend(other.orders);
        self
    }

    /// Append a single order as the lowest-priority key
    pub fn then_by(mut self, order: Order) -> Self {
        self.orders.push(order);
        self
    }

    /// Same keys, all ascending
    pub fn ascending(self) -> Self {
        self.with_direction(SortDirection::Ascending)
    }

    /// Same keys, all descending
    pub fn descending(self) -> Self {
        self.with_direction(SortDirection::Descending)
    }

    /// Flip the direction of every key
    pub fn reverse(&self) -> Self {
        self.orders.iter().map(Order::reverse).collect()
    }

    fn with_direction(self, direction: SortDirection) -> Self {
        self.orders
            .into_iter()
            .map(|order| Order { direction, ..order })
            .collect()
    }

    /// Whether any keys are present
    pub fn is_sorted(&self) -> bool {
        !self.orders.is_empty()
    }

    /// Whether there are no keys
    pub fn is_unsorted(&self) -> bool {
        self.orders.is_empty()
    }

    /// First order on exactly `property`, if any
    pub fn order_for(&self, property: &str) -> Option<&Order> {
        self.orders.iter().find(|order| order.property == property)
    }

    /// Orders in precedence order
    pub fn iter(&self) -> std::slice::Iter<'_, Order> {
        self.orders.iter()
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Same as [`is_unsorted`](Self::is_unsorted)
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Build the comparator for this sort
    pub fn comparator<T>(&self) -> Comparator<T> {
        Comparator::new(self)
    }
}

impl FromStr for Sort {
    type Err = SortError;

    /// Parses `;`-separated orders, e.g. `name,desc;subEntity.name`.
    fn from_str(s: &str) -> Result<Self> {
        Sort::from_params(s.split(';'))
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, order) in self.orders.iter().enumerate() {
            if index > 0 {
                f.write_str(";")?;
            }
            write!(f, "{order}")?;
        }
        Ok(())
    }
}

impl From<Order> for Sort {
    fn from(order: Order) -> Self {
        Self {
            orders: vec![order],
        }
    }
}

impl FromIterator<Order> for Sort {
    fn from_iter<I: IntoIterator<Item = Order>>(iter: I) -> Self {
        Self {
            orders: iter.into_iter().collect(),
        }
    }
}

impl Extend<Order> for Sort {
    fn extend<I: IntoIterator<Item = Order>>(&mut self, iter: I) {
        self.orders.extend(iter);
    }
}

impl IntoIterator for Sort {
    type Item = Order;
    type IntoIter = std::vec::IntoIter<Order>;

    fn into_iter(self) -> Self::IntoIter {
        self.orders.into_iter()
    }
}

impl<'a> IntoIterator for &'a Sort {
    type Item = &'a Order;
    type IntoIter = std::slice::Iter<'a, Order>;

    fn into_iter(self) -> Self::IntoIter {
        self.orders.iter()
    }
}
