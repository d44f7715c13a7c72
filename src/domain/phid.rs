//! PHIDs and object identifiers.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::AppError;

static PHID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^PHID-([A-Z]+)-([a-z0-9]+)$").expect("PHID pattern must compile")
});

/// Object kind encoded in the second segment of a PHID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhidKind {
    Task,
    User,
    Project,
    Column,
    Commit,
    Space,
    Policy,
}

impl PhidKind {
    /// The literal tag used inside PHIDs of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            PhidKind::Task => "TASK",
            PhidKind::User => "USER",
            PhidKind::Project => "PROJ",
            PhidKind::Column => "PCOL",
            PhidKind::Commit => "CMIT",
            PhidKind::Space => "SPCE",
            PhidKind::Policy => "PLCY",
        }
    }

    /// Example value quoted in validation messages.
    pub fn example(&self) -> &'static str {
        match self {
            PhidKind::Task => "PHID-TASK-yi2nwyjcvkwskag5ncqx",
            PhidKind::User => "PHID-USER-5z3dxbnyaxn4g2p6wbqr",
            PhidKind::Project => "PHID-PROJ-vfbyd6pr2o5mtbz7ssie",
            PhidKind::Column => "PHID-PCOL-w7quz3vyzzgqkyxcanha",
            PhidKind::Commit => "PHID-CMIT-2yv3zlcokeuttqxbiwj4",
            PhidKind::Space => "PHID-SPCE-6l6v7ipxx6a7zkjlxvru",
            PhidKind::Policy => "PHID-PLCY-cx4ahopkb3ryqqhsqgmn",
        }
    }
}

impl fmt::Display for PhidKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A PHID whose kind has been checked against an expected [`PhidKind`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Phid(String);

impl Phid {
    /// Validate `value` as a PHID of the given kind.
    pub fn of_kind(value: &str, kind: PhidKind) -> Result<Self, AppError> {
        if matches_kind(value, kind) {
            Ok(Self(value.to_string()))
        } else {
            Err(AppError::InvalidPhid { kind, value: value.to_string() })
        }
    }

    /// Return the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Phid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

fn matches_kind(value: &str, kind: PhidKind) -> bool {
    PHID_PATTERN
        .captures(value)
        .and_then(|caps| caps.get(1))
        .is_some_and(|tag| tag.as_str() == kind.as_str())
}

/// True iff every element matches `^PHID-<KIND>-[a-z0-9]+$`.
pub fn validate_phid_kind<S: AsRef<str>>(values: &[S], kind: PhidKind) -> bool {
    values.iter().all(|value| matches_kind(value.as_ref(), kind))
}

/// Validate a whole list, failing on the first token of the wrong shape.
pub fn parse_phid_list(values: Vec<String>, kind: PhidKind) -> Result<Vec<Phid>, AppError> {
    values.into_iter().map(|value| Phid::of_kind(&value, kind)).collect()
}

/// Reference to a single object: a numeric ID or a PHID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectIdentifier {
    Id(u64),
    Phid(String),
}

impl ObjectIdentifier {
    /// Parse an identifier that must refer to an object of `kind`.
    pub fn for_kind(input: &str, kind: PhidKind) -> Result<Self, AppError> {
        let identifier: ObjectIdentifier = input.parse()?;
        if let ObjectIdentifier::Phid(value) = &identifier {
            Phid::of_kind(value, kind)?;
        }
        Ok(identifier)
    }
}

impl FromStr for ObjectIdentifier {
    type Err = AppError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(AppError::InvalidIdentifier(input.to_string()));
        }
        if trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return trimmed
                .parse::<u64>()
                .map(ObjectIdentifier::Id)
                .map_err(|_| AppError::InvalidIdentifier(input.to_string()));
        }
        if PHID_PATTERN.is_match(trimmed) {
            return Ok(ObjectIdentifier::Phid(trimmed.to_string()));
        }
        Err(AppError::InvalidIdentifier(input.to_string()))
    }
}

impl fmt::Display for ObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectIdentifier::Id(id) => write!(f, "{}", id),
            ObjectIdentifier::Phid(phid) => f.write_str(phid),
        }
    }
}

impl Serialize for ObjectIdentifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ObjectIdentifier::Id(id) => serializer.serialize_u64(*id),
            ObjectIdentifier::Phid(phid) => serializer.serialize_str(phid),
        }
    }
}

impl<'de> Deserialize<'de> for ObjectIdentifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
