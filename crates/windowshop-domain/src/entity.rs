//! Entity kinds and document references.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed set of document collections the admin CRUD layer may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Users,
    Products,
    Orders,
    Measurements,
    Photos,
}

/// Returned when a collection name is outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported entity type: {0}")]
pub struct UnsupportedEntity(pub String);

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        Self::Users,
        Self::Products,
        Self::Orders,
        Self::Measurements,
        Self::Photos,
    ];

    /// Collection name, also used as the path segment and the reference prefix.
    pub fn collection(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Products => "products",
            Self::Orders => "orders",
            Self::Measurements => "measurements",
            Self::Photos => "photos",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}

impl FromStr for EntityKind {
    type Err = UnsupportedEntity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.collection() == s)
            .ok_or_else(|| UnsupportedEntity(s.to_owned()))
    }
}

/// Points at one document: `<collection>/<key>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub key: String,
}

/// Returned when a reference string is not `<collection>/<key>`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed entity reference: {0}")]
pub struct MalformedRef(pub String);

impl EntityRef {
    pub fn new(kind: EntityKind, key: impl Into<String>) -> Self {
        Self {
            kind,
            key: key.into(),
        }
    }

    pub fn user(key: impl Into<String>) -> Self {
        Self::new(EntityKind::Users, key)
    }

    pub fn product(key: impl Into<String>) -> Self {
        Self::new(EntityKind::Products, key)
    }

    pub fn order(key: impl Into<String>) -> Self {
        Self::new(EntityKind::Orders, key)
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.key)
    }
}

impl FromStr for EntityRef {
    type Err = MalformedRef;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (collection, key) = s.split_once('/').ok_or_else(|| MalformedRef(s.to_owned()))?;
        if key.is_empty() || key.contains('/') {
            return Err(MalformedRef(s.to_owned()));
        }
        let kind = collection
            .parse::<EntityKind>()
            .map_err(|_| MalformedRef(s.to_owned()))?;
        Ok(Self::new(kind, key))
    }
}

impl Serialize for EntityRef {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EntityRef {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
