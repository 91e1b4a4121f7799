//! Dot-delimited property paths

use super::properties::Properties;
use super::value::Value;
use crate::error::{PropertyError, Result, SortError};
use std::fmt;

/// A parsed property path such as `subEntity.name`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PropertyPath {
    raw: String,
    segments: Vec<String>,
}

impl PropertyPath {
    /// Split a path on `.`; empty segments are dropped, so an empty path has
    /// no segments at all. Segments are used verbatim, whitespace included.
    pub fn parse(path: &str) -> Self {
        let segments = path
            .split('.')
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            raw: path.to_string(),
            segments,
        }
    }

    /// The path as it was written
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Property names in walking order
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// Whether the path resolves to the entity itself
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Walk the path starting at `entity`.
    ///
    /// Returns `Ok(None)` as soon as a step is null, absent, or lands on a
    /// scalar that has no further properties. A path without segments
    /// resolves to the entity itself.
    pub fn resolve<'e, E: Properties>(
        &self,
        entity: &'e E,
    ) -> Result<Option<Value<'e>>> {
        let mut current = Value::object(entity);

        for segment in &self.segments {
            let Some(properties) = current.as_object() else {
                return Ok(None);
            };

            match properties.property(segment) {
                Ok(Some(next)) => current = next,
                Ok(None) => return Ok(None),
                Err(PropertyError::Unreadable { property, reason }) => {
                    return Err(SortError::UnreadableProperty {
                        property,
                        path: self.raw.clone(),
                        reason,
                    });
                }
            }
        }

        Ok(Some(current))
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for PropertyPath {
    fn from(path: &str) -> Self {
        PropertyPath::parse(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Leaf {
        name: Option<String>,
    }

    struct Node {
        child: Option<Box<Leaf>>,
        locked: bool,
    }

    crate::properties!(Leaf { "name" => name });

    impl Properties for Node {
        fn property(&self, name: &str) -> crate::PropertyResult<'_> {
            match name {
                "child" => Ok(crate::AsObject::as_object(&self.child)),
                "locked" if self.locked => {
                    Err(PropertyError::unreadable("locked", "access denied"))
                }
                "locked" => Ok(Some(Value::from(false))),
                _ => Ok(None),
            }
        }
    }

    fn node(name: Option<&str>) -> Node {
        Node {
            child: Some(Box::new(Leaf {
                name: name.map(str::to_string),
            })),
            locked: false,
        }
    }

    #[test]
    fn test_parse_segments() {
        let path = PropertyPath::parse("subEntity.name");
        assert_eq!(path.segments().collect::<Vec<_>>(), vec!["subEntity", "name"]);
        assert_eq!(path.as_str(), "subEntity.name");

        let sloppy = PropertyPath::parse(".a..b.");
        assert_eq!(sloppy.segments().collect::<Vec<_>>(), vec!["a", "b"]);

        assert!(PropertyPath::parse("").is_empty());
    }

    #[test]
    fn test_resolve_nested_value() {
        let path = PropertyPath::parse("child.name");
        let entity = node(Some("A"));
        assert_eq!(path.resolve(&entity).unwrap(), Some(Value::from("A")));
    }

    #[test]
    fn test_resolve_short_circuits_on_null() {
        let path = PropertyPath::parse("child.name");
        let entity = Node {
            child: None,
            locked: false,
        };
        assert!(path.resolve(&entity).unwrap().is_none());
    }

    #[test]
    fn test_resolve_missing_property_is_null() {
        let path = PropertyPath::parse("child.unknown");
        assert!(path.resolve(&node(Some("A"))).unwrap().is_none());

        let through_scalar = PropertyPath::parse("child.name.length");
        assert!(through_scalar.resolve(&node(Some("A"))).unwrap().is_none());
    }

    #[test]
    fn test_resolve_unreadable_property_fails() {
        let path = PropertyPath::parse("locked");
        let mut entity = node(None);
        entity.locked = true;

        match path.resolve(&entity) {
            Err(SortError::UnreadableProperty { property, path, .. }) => {
                assert_eq!(property, "locked");
                assert_eq!(path, "locked");
            }
            other => panic!("expected unreadable property, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_path_resolves_to_entity() {
        let entity = node(None);
        let resolved = PropertyPath::parse("").resolve(&entity).unwrap();
        assert!(resolved.and_then(|value| value.as_object()).is_some());
    }

    #[test]
    fn test_segments_are_not_trimmed() {
        let padded = PropertyPath::parse("child. name");
        assert_eq!(padded.segments().collect::<Vec<_>>(), vec!["child", " name"]);

        let entity = node(Some("A"));
        assert!(padded.resolve(&entity).unwrap().is_none());
    }
}
