//! Applying comparators to slices
//!
//! Sorting goes through a permutation of indices first and only touches the
//! caller's slice once every comparison succeeded, so a failed sort leaves
//! the input exactly as it was.

use super::comparator::Comparator;
use super::properties::Properties;
use crate::error::{Result, SortError};
use std::cmp::Ordering;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Slices shorter than this are sorted sequentially by [`Comparator::par_sort`]
#[cfg(feature = "parallel")]
pub const PARALLEL_THRESHOLD: usize = 10_000;

impl<T: Properties> Comparator<T> {
    /// Stable sort of `items`.
    ///
    /// On error the slice is left untouched.
    pub fn sort(&self, items: &mut [T]) -> Result<()> {
        if self.is_unsorted() {
            return Ok(());
        }

        let indices = sort_indices_by(items.len(), |a, b| {
            self.compare(&items[a], &items[b])
        })?;
        reorder_by_indices(items, indices);
        Ok(())
    }

    /// Consume and return `items` in sorted order
    pub fn sorted(&self, mut items: Vec<T>) -> Result<Vec<T>> {
        self.sort(&mut items)?;
        Ok(items)
    }

    /// Stable sort where absent entities come first
    pub fn sort_nullable(&self, items: &mut [Option<T>]) -> Result<()> {
        let indices = sort_indices_by(items.len(), |a, b| {
            self.compare_nullable(items[a].as_ref(), items[b].as_ref())
        })?;
        reorder_by_indices(items, indices);
        Ok(())
    }

    /// Whether `items` is already in this comparator's order
    pub fn is_sorted(&self, items: &[T]) -> Result<bool> {
        for pair in items.windows(2) {
            if self.compare(&pair[0], &pair[1])? == Ordering::Greater {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

#[cfg(feature = "parallel")]
impl<T: Properties + Send + Sync> Comparator<T> {
    /// Stable parallel sort for large slices.
    ///
    /// Falls back to [`sort`](Self::sort) below [`PARALLEL_THRESHOLD`]. On
    /// error the slice is left untouched.
    pub fn par_sort(&self, items: &mut [T]) -> Result<()> {
        if items.len() < PARALLEL_THRESHOLD {
            return self.sort(items);
        }

        let failure = std::sync::OnceLock::new();
        let mut indices: Vec<usize> = (0..items.len()).collect();
        {
            let view: &[T] = items;
            indices.par_sort_by(|&a, &b| {
                if failure.get().is_some() {
                    return Ordering::Equal;
                }
                self.compare(&view[a], &view[b]).unwrap_or_else(|err| {
                    let _ = failure.set(err);
                    Ordering::Equal
                })
            });
        }

        if let Some(err) = failure.into_inner() {
            return Err(err);
        }
        reorder_by_indices(items, indices);
        Ok(())
    }
}

/// Sort `0..len` with a fallible comparison.
///
/// After the first failure the remaining comparisons report `Equal` and the
/// error is returned once the underlying sort finishes.
pub(crate) fn sort_indices_by<F>(len: usize, mut compare: F) -> Result<Vec<usize>>
where
    F: FnMut(usize, usize) -> Result<Ordering>,
{
    let mut indices: Vec<usize> = (0..len).collect();
    let mut failure: Option<SortError> = None;

    indices.sort_by(|&a, &b| {
        if failure.is_some() {
            return Ordering::Equal;
        }
        compare(a, b).unwrap_or_else(|err| {
            failure = Some(err);
            Ordering::Equal
        })
    });

    match failure {
        Some(err) => Err(err),
        None => Ok(indices),
    }
}

/// Reorder items in-place so position `i` receives the item that was at
/// `indices[i]`.
///
/// Follows each permutation cycle with swaps, so `T` needs no `Clone`.
pub(crate) fn reorder_by_indices<T>(items: &mut [T], mut indices: Vec<usize>) {
    debug_assert_eq!(
        items.len(),
        indices.len(),
        "Indices length must match items length"
    );

    for start in 0..indices.len() {
        if indices[start] == start {
            continue;
        }

        let mut current = start;
        loop {
            let source = indices[current];
            indices[current] = current;
            if source == start {
                break;
            }
            items.swap(current, source);
            current = source;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reorder_by_indices() {
        let mut items = vec!["a", "b", "c", "d"];
        let indices = vec![3, 1, 0, 2]; // d, b, a, c

        reorder_by_indices(&mut items, indices);

        assert_eq!(items, vec!["d", "b", "a", "c"]);
    }

    #[test]
    fn test_reorder_handles_multiple_cycles() {
        let mut items: Vec<String> =
            ["a", "b", "c", "d", "e"].iter().map(|s| s.to_string()).collect();
        // two cycles: (0 1) and (2 4 3)
        let indices = vec![1, 0, 4, 2, 3];

        reorder_by_indices(&mut items, indices);

        assert_eq!(items, vec!["b", "a", "e", "c", "d"]);
    }

    #[test]
    fn test_sort_indices_is_stable() {
        let keys = [2, 1, 2, 1];
        let indices =
            sort_indices_by(keys.len(), |a, b| Ok(keys[a].cmp(&keys[b])))
                .unwrap();
        assert_eq!(indices, vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_sort_indices_reports_first_failure() {
        let mut calls = 0;
        let result = sort_indices_by(5, |_, _| {
            calls += 1;
            Err(SortError::EmptyProperty)
        });
        assert!(matches!(result, Err(SortError::EmptyProperty)));
        assert_eq!(calls, 1);
    }
}
