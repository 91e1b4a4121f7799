use thiserror::Error;

/// Errors surfaced while parsing sort specifications or applying comparators.
#[derive(Error, Debug)]
pub enum SortError {
    /// A property along a sort path exists but its reader failed.
    #[error(
        "could not get value from specified property: {property} (path `{path}`): {reason}"
    )]
    UnreadableProperty {
        /// Name of the property that failed
        property: String,
        /// Full path being resolved
        path: String,
        /// Reason given by the property reader
        reason: String,
    },

    /// A direction string other than `asc`/`desc`.
    #[error(
        "invalid sort direction `{0}`; has to be either `asc` or `desc` (case insensitive)"
    )]
    InvalidDirection(String),

    /// An order string without a property.
    #[error("sort order is missing a property name")]
    EmptyProperty,

    /// Items could not be serialized for [`sort_serialized`](crate::Comparator::sort_serialized).
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failure reported by a [`Properties`](crate::Properties) implementation.
///
/// Absent properties are not errors; implementations return `Ok(None)` for
/// them. This type is reserved for properties that exist but cannot be read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropertyError {
    /// The property exists but its reader failed
    #[error("property `{property}` cannot be read: {reason}")]
    Unreadable {
        /// Property name
        property: String,
        /// Why it could not be read
        reason: String,
    },
}

impl PropertyError {
    /// Shorthand for [`PropertyError::Unreadable`]
    pub fn unreadable(
        property: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        PropertyError::Unreadable {
            property: property.into(),
            reason: reason.into(),
        }
    }
}

/// Result type used across the crate
pub type Result<T> = std::result::Result<T, SortError>;
