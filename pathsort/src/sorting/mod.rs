//! Sorting module for property-path comparators
//!
//! This module provides:
//! - Sort specification types (directions, orders, sorts)
//! - Named property access for entities and JSON documents
//! - Comparator construction and application to slices

pub mod apply;
pub mod comparator;
pub mod json;
pub mod path;
pub mod properties;
pub mod types;
pub mod value;


#[cfg(feature = "parallel")]
pub use apply::PARALLEL_THRESHOLD;
pub use comparator::*;
pub use path::*;
pub use properties::*;
pub use types::*;
pub use value::*;
