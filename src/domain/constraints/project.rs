//! Project search constraints.

use serde::{Deserialize, Serialize};

use super::{FilterSpec, list, numbers, phids, text};
use crate::domain::AppError;
use crate::domain::parse::specified;
use crate::domain::phid::{Phid, PhidKind};

/// Raw project search form.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ProjectSearchForm {
    pub ids: Option<String>,
    pub phids: Option<String>,
    pub slugs: Option<String>,
    pub members: Option<String>,
    pub watchers: Option<String>,
    pub status: Option<String>,
    pub is_milestone: Option<bool>,
    pub is_root: Option<bool>,
    pub min_depth: Option<i64>,
    pub max_depth: Option<i64>,
    pub subtypes: Option<String>,
    pub icons: Option<String>,
    pub colors: Option<String>,
    pub parents: Option<String>,
    pub ancestors: Option<String>,
    pub query: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Active,
    Archived,
    All,
}

impl ProjectStatus {
    fn parse(value: &str) -> Result<Self, AppError> {
        match value.trim() {
            "active" => Ok(ProjectStatus::Active),
            "archived" => Ok(ProjectStatus::Archived),
            "all" => Ok(ProjectStatus::All),
            other => Err(AppError::InvalidOption {
                field: "status".to_string(),
                value: other.to_string(),
                expected: "active, archived, all".to_string(),
            }),
        }
    }
}

/// Filter object for `project.search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConstraints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phids: Option<Vec<Phid>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slugs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watchers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_milestone: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_root: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_depth: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtypes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icons: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parents: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ancestors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl FilterSpec for ProjectConstraints {}

impl ProjectSearchForm {
    /// Build the `project.search` constraints; `phids` must all be PROJ PHIDs.
    pub fn build_constraints(&self) -> Result<ProjectConstraints, AppError> {
        Ok(ProjectConstraints {
            ids: numbers("ids", &self.ids)?,
            phids: phids(&self.phids, PhidKind::Project)?,
            slugs: list(&self.slugs),
            members: list(&self.members),
            watchers: list(&self.watchers),
            status: specified(&self.status).map(ProjectStatus::parse).transpose()?,
            is_milestone: self.is_milestone,
            is_root: self.is_root,
            min_depth: self.min_depth,
            max_depth: self.max_depth,
            subtypes: list(&self.subtypes),
            icons: list(&self.icons),
            colors: list(&self.colors),
            parents: list(&self.parents),
            ancestors: list(&self.ancestors),
            query: text(&self.query),
        })
    }
}
