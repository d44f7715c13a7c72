//! Constraint builders: flat form values to structured search filters.
//!
//! Each resource has a form type with one optional slot per recognized field
//! and a constraints type mirroring the filter object expected by the
//! corresponding `*.search` endpoint. Unspecified fields never produce keys.

pub mod project;
pub mod task;
pub mod user;

use serde::Serialize;

use super::AppError;
use super::parse::{parse_number, specified, split_list, split_numbers};
use super::phid::{Phid, PhidKind, parse_phid_list};

pub use project::{ProjectConstraints, ProjectSearchForm, ProjectStatus};
pub use task::{TaskConstraints, TaskSearchForm, TaskTriggerForm};
pub use user::{UserConstraints, UserSearchForm};

/// A built filter object.
pub trait FilterSpec: Serialize + Default + PartialEq + Sized {
    /// True when no constraint was specified.
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Names of the filter keys present in the serialized object.
    fn keys(&self) -> Result<Vec<String>, AppError> {
        let value = serde_json::to_value(self)?;
        Ok(value.as_object().map(|map| map.keys().cloned().collect()).unwrap_or_default())
    }

    /// The filter, or `None` when empty so callers can omit the parameter.
    fn into_option(self) -> Option<Self> {
        if self.is_empty() { None } else { Some(self) }
    }
}

fn list(value: &Option<String>) -> Option<Vec<String>> {
    specified(value).map(split_list).filter(|tokens| !tokens.is_empty())
}

fn numbers(field: &str, value: &Option<String>) -> Result<Option<Vec<i64>>, AppError> {
    match specified(value) {
        Some(raw) => {
            let parsed = split_numbers(field, raw)?;
            Ok(if parsed.is_empty() { None } else { Some(parsed) })
        }
        None => Ok(None),
    }
}

fn number(field: &str, value: &Option<String>) -> Result<Option<i64>, AppError> {
    specified(value).map(|raw| parse_number(field, raw)).transpose()
}

fn text(value: &Option<String>) -> Option<String> {
    specified(value).map(str::to_string)
}

fn phids(value: &Option<String>, kind: PhidKind) -> Result<Option<Vec<Phid>>, AppError> {
    list(value).map(|tokens| parse_phid_list(tokens, kind)).transpose()
}
