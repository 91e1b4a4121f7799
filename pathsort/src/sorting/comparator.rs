//! Comparator construction from sort specifications
//!
//! [`comparator_of`] turns a [`Sort`] into a [`Comparator`]:
//!
//! - every [`Order`](super::Order) becomes a key comparator over its
//!   property path
//! - missing keys sort before present keys, in both directions
//! - keys are consulted left to right; the first non-equal result wins
//! - an unsorted specification compares every pair as equal
//!
//! Building never fails. Paths are only resolved when two entities are
//! compared, which is also when an unreadable property is reported.

use super::path::PropertyPath;
use super::properties::Properties;
use super::types::{Sort, SortDirection};
use super::value::Value;
use crate::error::Result;
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, warn};

/// Build a comparator for entities of type `T` from `sort`
pub fn comparator_of<T>(sort: &Sort) -> Comparator<T> {
    Comparator::new(sort)
}

/// Comparison for a single sort key
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct KeyComparator {
    path: PropertyPath,
    direction: SortDirection,
}

impl KeyComparator {
    fn compare<E: Properties>(&self, a: &E, b: &E) -> Result<Ordering> {
        let left = self.resolve(a)?;
        let right = self.resolve(b)?;

        // Nulls first regardless of direction
        Ok(match (left, right) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(left), Some(right)) => {
                self.direction.apply(left.compare(&right))
            }
        })
    }

    fn resolve<'e, E: Properties>(
        &self,
        entity: &'e E,
    ) -> Result<Option<Value<'e>>> {
        self.path.resolve(entity).inspect_err(|err| {
            warn!(path = %self.path, error = %err, "sort key could not be read");
        })
    }
}

/// A reusable, stateless comparison over entities of type `T`.
///
/// Cloning is cheap; clones share the key list. The comparator is `Send` and
/// `Sync` whatever `T` is.
pub struct Comparator<T> {
    keys: Arc<[KeyComparator]>,
    _entity: PhantomData<fn(&T)>,
}

impl<T> Comparator<T> {
    /// Same as [`comparator_of`]
    pub fn new(sort: &Sort) -> Self {
        let keys: Arc<[KeyComparator]> = sort
            .iter()
            .map(|order| KeyComparator {
                path: PropertyPath::parse(order.property()),
                direction: order.direction(),
            })
            .collect();

        debug!(keys = keys.len(), sort = %sort, "built sort comparator");

        Self {
            keys,
            _entity: PhantomData,
        }
    }

    /// Comparator that reports every pair as equal
    pub fn unsorted() -> Self {
        Self::new(&Sort::unsorted())
    }

    /// Whether this comparator has no keys
    pub fn is_unsorted(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of sort keys
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Compare any two entities against this comparator's keys.
    pub(crate) fn compare_entities<E: Properties>(
        &self,
        a: &E,
        b: &E,
    ) -> Result<Ordering> {
        for key in self.keys.iter() {
            match key.compare(a, b)? {
                Ordering::Equal => continue,
                decided => return Ok(decided),
            }
        }
        Ok(Ordering::Equal)
    }
}

impl<T: Properties> Comparator<T> {
    /// Three-way comparison of two entities.
    ///
    /// Fails only when a property along one of the paths exists but cannot
    /// be read.
    pub fn compare(&self, a: &T, b: &T) -> Result<Ordering> {
        self.compare_entities(a, b)
    }

    /// Like [`compare`](Self::compare), with absent entities sorting first
    pub fn compare_nullable(
        &self,
        a: Option<&T>,
        b: Option<&T>,
    ) -> Result<Ordering> {
        match (a, b) {
            (None, None) => Ok(Ordering::Equal),
            (None, Some(_)) => Ok(Ordering::Less),
            (Some(_), None) => Ok(Ordering::Greater),
            (Some(a), Some(b)) => self.compare(a, b),
        }
    }

    /// Plain comparison closure for APIs such as `slice::sort_by`.
    ///
    /// # Panics
    ///
    /// The closure panics with the underlying [`SortError`](crate::SortError)
    /// message when a property cannot be read. Use
    /// [`sort`](Self::sort) to get the error as a value instead.
    pub fn as_fn(&self) -> impl Fn(&T, &T) -> Ordering + '_ {
        move |a: &T, b: &T| match self.compare(a, b) {
            Ok(ordering) => ordering,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> Clone for Comparator<T> {
    fn clone(&self) -> Self {
        Self {
            keys: Arc::clone(&self.keys),
            _entity: PhantomData,
        }
    }
}

impl<T> Default for Comparator<T> {
    fn default() -> Self {
        Self::unsorted()
    }
}

impl<T> fmt::Debug for Comparator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comparator")
            .field("keys", &self.keys)
            .field("entity", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T> From<&Sort> for Comparator<T> {
    fn from(sort: &Sort) -> Self {
        Comparator::new(sort)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Order, PropertyError, PropertyResult, SortError};

    #[derive(Debug, Clone)]
    struct Row {
        a: Option<i64>,
        b: Option<&'static str>,
    }

    impl Properties for Row {
        fn property(&self, name: &str) -> PropertyResult<'_> {
            match name {
                "a" => Ok(self.a.map(Value::from)),
                "b" => Ok(self.b.map(Value::from)),
                "broken" => Err(PropertyError::unreadable("broken", "no reader")),
                _ => Ok(None),
            }
        }
    }

    fn row(a: Option<i64>, b: Option<&'static str>) -> Row {
        Row { a, b }
    }

    #[test]
    fn test_unsorted_compares_equal() {
        let comparator = Comparator::<Row>::unsorted();
        assert!(comparator.is_unsorted());
        assert_eq!(
            comparator.compare(&row(Some(1), None), &row(Some(2), None)).unwrap(),
            Ordering::Equal
        );
    }

    #[test]
    fn test_single_key_directions() {
        let low = row(Some(1), None);
        let high = row(Some(2), None);

        let ascending = comparator_of::<Row>(&Sort::from(Order::asc("a")));
        assert_eq!(ascending.compare(&low, &high).unwrap(), Ordering::Less);

        let descending = comparator_of::<Row>(&Sort::from(Order::desc("a")));
        assert_eq!(descending.compare(&low, &high).unwrap(), Ordering::Greater);
    }

    #[test]
    fn test_null_keys_first_in_both_directions() {
        let missing = row(None, None);
        let present = row(Some(5), None);

        for order in [Order::asc("a"), Order::desc("a")] {
            let comparator = comparator_of::<Row>(&Sort::from(order));
            assert_eq!(
                comparator.compare(&missing, &present).unwrap(),
                Ordering::Less
            );
            assert_eq!(
                comparator.compare(&present, &missing).unwrap(),
                Ordering::Greater
            );
            assert_eq!(
                comparator.compare(&missing, &missing).unwrap(),
                Ordering::Equal
            );
        }
    }

    #[test]
    fn test_later_keys_break_ties() {
        let sort = Sort::by_orders([Order::asc("a"), Order::desc("b")]);
        let comparator = comparator_of::<Row>(&sort);

        let x = row(Some(1), Some("x"));
        let y = row(Some(1), Some("y"));
        assert_eq!(comparator.compare(&x, &y).unwrap(), Ordering::Greater);

        let first = row(Some(0), Some("a"));
        assert_eq!(comparator.compare(&first, &y).unwrap(), Ordering::Less);
    }

    #[test]
    fn test_unreadable_key_is_reported_lazily() {
        let sort = Sort::by_orders([Order::asc("a"), Order::asc("broken")]);
        let comparator = comparator_of::<Row>(&sort);

        // Decided by the first key; the broken key is never read
        let decided = comparator.compare(&row(Some(1), None), &row(Some(2), None));
        assert_eq!(decided.unwrap(), Ordering::Less);

        let tied = comparator.compare(&row(Some(1), None), &row(Some(1), None));
        assert!(matches!(
            tied,
            Err(SortError::UnreadableProperty { ref property, .. }) if property == "broken"
        ));
    }

    #[test]
    fn test_null_entities_sort_first() {
        let comparator = comparator_of::<Row>(&Sort::from(Order::asc("a")));
        let present = row(None, None);
        assert_eq!(
            comparator.compare_nullable(None, Some(&present)).unwrap(),
            Ordering::Less
        );
        assert_eq!(
            comparator.compare_nullable(Some(&present), None).unwrap(),
            Ordering::Greater
        );
        assert_eq!(comparator.compare_nullable(None, None).unwrap(), Ordering::Equal);
    }

    #[test]
    fn test_as_fn_drives_std_sort() {
        let comparator = comparator_of::<Row>(&Sort::from(Order::desc("a")));
        let mut rows = vec![row(Some(1), None), row(Some(3), None), row(None, None)];
        rows.sort_by(comparator.as_fn());
        let keys: Vec<_> = rows.iter().map(|r| r.a).collect();
        assert_eq!(keys, vec![None, Some(3), Some(1)]);
    }

    #[test]
    #[should_panic(expected = "could not get value from specified property: broken")]
    fn test_as_fn_panics_on_unreadable_property() {
        let comparator = comparator_of::<Row>(&Sort::from(Order::asc("broken")));
        let mut rows = vec![row(Some(1), None), row(Some(2), None)];
        rows.sort_by(comparator.as_fn());
    }

    #[test]
    fn test_comparator_is_send_and_sync() {
        fn assert_send_sync<S: Send + Sync>() {}
        assert_send_sync::<Comparator<Row>>();
        assert_send_sync::<Comparator<std::rc::Rc<Row>>>();
    }
}
