//! Attachment selections for search requests.

use std::collections::BTreeMap;

use super::AppError;

/// A named sub-resource that a search can embed in each returned record.
pub trait Attachment: Copy + Ord + Sized + 'static {
    /// Resource name used in error messages.
    const RESOURCE: &'static str;
    /// Every attachment the resource offers.
    const ALL: &'static [Self];

    /// Wire name of the attachment.
    fn as_str(&self) -> &'static str;

    /// Look up an attachment by its wire name.
    fn parse(name: &str) -> Result<Self, AppError> {
        let name = name.trim();
        Self::ALL.iter().copied().find(|a| a.as_str() == name).ok_or_else(|| {
            AppError::InvalidAttachment {
                resource: Self::RESOURCE.to_string(),
                name: name.to_string(),
                available: Self::ALL.iter().map(|a| a.as_str()).collect::<Vec<_>>().join(", "),
            }
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TaskAttachment {
    Columns,
    Projects,
    Subscribers,
}

impl Attachment for TaskAttachment {
    const RESOURCE: &'static str = "task";
    const ALL: &'static [Self] =
        &[TaskAttachment::Columns, TaskAttachment::Projects, TaskAttachment::Subscribers];

    fn as_str(&self) -> &'static str {
        match self {
            TaskAttachment::Columns => "columns",
            TaskAttachment::Projects => "projects",
            TaskAttachment::Subscribers => "subscribers",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProjectAttachment {
    Members,
    Watchers,
    Ancestors,
}

impl Attachment for ProjectAttachment {
    const RESOURCE: &'static str = "project";
    const ALL: &'static [Self] =
        &[ProjectAttachment::Members, ProjectAttachment::Watchers, ProjectAttachment::Ancestors];

    fn as_str(&self) -> &'static str {
        match self {
            ProjectAttachment::Members => "members",
            ProjectAttachment::Watchers => "watchers",
            ProjectAttachment::Ancestors => "ancestors",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum UserAttachment {
    Availability,
}

impl Attachment for UserAttachment {
    const RESOURCE: &'static str = "user";
    const ALL: &'static [Self] = &[UserAttachment::Availability];

    fn as_str(&self) -> &'static str {
        match self {
            UserAttachment::Availability => "availability",
        }
    }
}

/// Boolean flags object sent as the `attachments` parameter.
pub type AttachmentFlags = BTreeMap<String, bool>;

/// Turn a list of attachment names into flags.
///
/// An empty selection yields `None` so the parameter is omitted entirely.
pub fn attachment_flags<A: Attachment>(names: &[String]) -> Result<Option<AttachmentFlags>, AppError> {
    let mut flags = AttachmentFlags::new();
    for name in names {
        let attachment = A::parse(name)?;
        flags.insert(attachment.as_str().to_string(), true);
    }
    Ok(if flags.is_empty() { None } else { Some(flags) })
}
