//! User search constraints.

use serde::{Deserialize, Serialize};

use super::{FilterSpec, list, number, numbers, phids, text};
use crate::domain::AppError;
use crate::domain::phid::{Phid, PhidKind};

/// Raw user search form.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct UserSearchForm {
    pub ids: Option<String>,
    pub phids: Option<String>,
    pub usernames: Option<String>,
    pub name_like: Option<String>,
    pub is_admin: Option<bool>,
    pub is_disabled: Option<bool>,
    pub is_bot: Option<bool>,
    pub is_mailing_list: Option<bool>,
    pub needs_approval: Option<bool>,
    pub mfa: Option<bool>,
    pub created_after: Option<String>,
    pub created_before: Option<String>,
    pub query: Option<String>,
}

/// Filter object for `user.search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserConstraints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phids: Option<Vec<Phid>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usernames: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_like: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_bot: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_mailing_list: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub needs_approval: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mfa: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_start: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_end: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl FilterSpec for UserConstraints {}

impl UserSearchForm {
    pub fn build_constraints(&self) -> Result<UserConstraints, AppError> {
        Ok(UserConstraints {
            ids: numbers("ids", &self.ids)?,
            phids: phids(&self.phids, PhidKind::User)?,
            usernames: list(&self.usernames),
            name_like: text(&self.name_like),
            is_admin: self.is_admin,
            is_disabled: self.is_disabled,
            is_bot: self.is_bot,
            is_mailing_list: self.is_mailing_list,
            needs_approval: self.needs_approval,
            mfa: self.mfa,
            created_start: number("createdAfter", &self.created_after)?,
            created_end: number("createdBefore", &self.created_before)?,
            query: text(&self.query),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn build(value: serde_json::Value) -> Result<UserConstraints, AppError> {
        serde_json::from_value::<UserSearchForm>(value).unwrap().build_constraints()
    }

    #[test]
    fn joined_window_is_renamed() {
        let constraints = build(json!({ "createdAfter": "10", "createdBefore": "20" })).unwrap();
        assert_eq!(
            serde_json::to_value(&constraints).unwrap(),
            json!({ "createdStart": 10, "createdEnd": 20 })
        );
    }

    #[test]
    fn flags_pass_through() {
        let constraints = build(json!({ "isBot": false, "isAdmin": true, "mfa": true })).unwrap();
        assert_eq!(
            serde_json::to_value(&constraints).unwrap(),
            json!({ "isAdmin": true, "isBot": false, "mfa": true })
        );
    }

    #[test]
    fn usernames_and_name_like() {
        let constraints = build(json!({ "usernames": "alice, bob", "nameLike": "ali" })).unwrap();
        assert_eq!(constraints.usernames, Some(vec!["alice".to_string(), "bob".to_string()]));
        assert_eq!(constraints.name_like.as_deref(), Some("ali"));
    }

    #[test]
    fn phids_must_be_user_phids() {
        let err = build(json!({ "phids": "PHID-USER-ok,PHID-PROJ-no" })).unwrap_err();
        assert!(matches!(err, AppError::InvalidPhid { kind: PhidKind::User, .. }));
    }
}
