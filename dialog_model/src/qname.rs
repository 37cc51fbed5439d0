//! Qualified names - the identifiers of interaction units.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

use crate::error::{ModelError, ModelResult};

/// A namespace-qualified name identifying a node in the interaction and scope trees.
///
/// Equality, hashing and ordering are structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QName {
    namespace: String,
    local_part: String,
}

impl QName {
    /// Create a qualified name from its two parts.
    ///
    /// # Panics
    ///
    /// Panics if either part contains `:` or the local part is blank. Use
    /// [`QName::try_new`] for names that come from outside the program.
    #[track_caller]
    pub fn new(namespace: impl Into<String>, local_part: impl Into<String>) -> Self {
        match Self::try_new(namespace, local_part) {
            Ok(name) => name,
            Err(err) => panic!("{}", err),
        }
    }

    /// Create a qualified name, rejecting parts that would not read back
    /// from their `Display` form.
    pub fn try_new(
        namespace: impl Into<String>,
        local_part: impl Into<String>,
    ) -> ModelResult<Self> {
        let namespace = namespace.into();
        let local_part = local_part.into();

        if namespace.contains(':') || local_part.contains(':') || local_part.trim().is_empty() {
            return Err(ModelError::InvalidQName(format!("{}:{}", namespace, local_part)));
        }

        Ok(Self {
            namespace,
            local_part,
        })
    }

    /// Create a name without a namespace.
    pub fn local(local_part: impl Into<String>) -> Self {
        Self::new("", local_part)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn local_part(&self) -> &str {
        &self.local_part
    }
}

impl std::fmt::Display for QName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.local_part)
        } else {
            write!(f, "{}:{}", self.namespace, self.local_part)
        }
    }
}

impl FromStr for QName {
    type Err = ModelError;

    /// Parse `namespace:local` or a bare `local`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, local_part) = s.split_once(':').unwrap_or(("", s));
        Self::try_new(namespace, local_part).map_err(|_| ModelError::InvalidQName(s.to_string()))
    }
}

impl Serialize for QName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for QName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_qualified() {
        let name: QName = "app:profiles".parse().unwrap();
        assert_eq!(name.namespace(), "app");
        assert_eq!(name.local_part(), "profiles");
        assert_eq!(name.to_string(), "app:profiles");
    }

    #[test]
    fn test_parse_bare_local() {
        let name: QName = "servers".parse().unwrap();
        assert_eq!(name, QName::local("servers"));
        assert_eq!(name.to_string(), "servers");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("a:b:c".parse::<QName>().is_err());
        assert!("app:".parse::<QName>().is_err());
        assert!("".parse::<QName>().is_err());
    }

    #[test]
    fn test_try_new_rejects_unreadable_parts() {
        assert!(matches!(
            QName::try_new("a:b", "c"),
            Err(ModelError::InvalidQName(raw)) if raw == "a:b:c"
        ));
        assert!(QName::try_new("app", "x:y").is_err());
        assert!(QName::try_new("app", " ").is_err());

        let name = QName::try_new("app", "tabs").unwrap();
        assert_eq!(name.to_string().parse::<QName>().unwrap(), name);
    }

    #[test]
    #[should_panic(expected = "a:b:c")]
    fn test_new_panics_on_colon_in_namespace() {
        QName::new("a:b", "c");
    }

    #[test]
    fn test_structural_equality() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(QName::new("app", "a"));
        set.insert(QName::new("app", "a"));
        set.insert(QName::new("other", "a"));

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_serde_as_string() {
        let name = QName::new("app", "tabs");
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"app:tabs\"");

        let back: QName = serde_json::from_str(&json).unwrap();
        assert_eq!(back, name);
    }
}
