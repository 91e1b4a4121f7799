//! # pathsort
//!
//! Builds comparators from sort specifications expressed as property paths.
//!
//! ## Overview
//!
//! A [`Sort`] is an ordered list of [`Order`]s, each naming a dot-delimited
//! property path (`subEntity.name`) and a [`SortDirection`]. [`comparator_of`]
//! turns it into a [`Comparator`] that:
//!
//! - compares entities key by key, later keys only breaking ties
//! - places missing or null keys first, in ascending and descending order
//! - treats an unsorted specification as "everything is equal", so stable
//!   sorts keep the input order
//! - reports a property that exists but cannot be read as
//!   [`SortError::UnreadableProperty`] when it is compared
//!
//! Entities expose their fields through the [`Properties`] trait, usually
//! generated with [`properties!`]. JSON documents and string-keyed maps
//! implement it out of the box, and [`Comparator::sort_serialized`] sorts any
//! `serde::Serialize` type through its JSON form.
//!
//! ## Feature Flags
//!
//! - `parallel`: enables [`Comparator::par_sort`] through rayon
//!
//! ## Examples
//!
//! ```
//! use pathsort::{Sort, SortDirection, comparator_of, properties};
//!
//! struct Entity {
//!     name: Option<String>,
//!     sub_entity: Option<Box<Entity>>,
//! }
//!
//! properties!(Entity {
//!     "name" => name,
//!     "subEntity" => sub_entity as object,
//! });
//!
//! fn entity(sub_name: Option<&str>) -> Entity {
//!     Entity {
//!         name: None,
//!         sub_entity: sub_name.map(|name| {
//!             Box::new(Entity {
//!                 name: Some(name.to_string()),
//!                 sub_entity: None,
//!             })
//!         }),
//!     }
//! }
//!
//! # fn main() -> Result<(), pathsort::SortError> {
//! let mut items = vec![entity(Some("A")), entity(None), entity(Some("B"))];
//!
//! let sort = Sort::by(SortDirection::Descending, ["subEntity.name"]);
//! comparator_of::<Entity>(&sort).sort(&mut items)?;
//!
//! let names: Vec<_> = items
//!     .iter()
//!     .map(|e| e.sub_entity.as_ref().and_then(|s| s.name.as_deref()))
//!     .collect();
//! assert_eq!(names, vec![None, Some("B"), Some("A")]);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

/// Error types for parsing and comparison
pub mod error;

/// Sort specifications, property access and comparators
pub mod sorting;

pub use error::{PropertyError, Result, SortError};
pub use sorting::*;
