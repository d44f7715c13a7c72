//! User commands.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};

use super::form::{load_form, set};
use crate::app::Action;
use crate::domain::{AppError, UserSearchForm};

#[derive(Subcommand)]
pub enum UserCommands {
    /// Search users
    #[clap(visible_alias = "s")]
    Search(UserSearchArgs),
}

#[derive(Args, Debug, Default)]
pub struct UserSearchArgs {
    /// JSON file with search fields
    #[arg(long)]
    form: Option<PathBuf>,
    #[arg(long)]
    ids: Option<String>,
    /// Comma-separated user PHIDs
    #[arg(long)]
    phids: Option<String>,
    #[arg(long)]
    usernames: Option<String>,
    #[arg(long)]
    name_like: Option<String>,
    #[arg(long, value_name = "BOOL")]
    is_admin: Option<bool>,
    #[arg(long, value_name = "BOOL")]
    is_disabled: Option<bool>,
    #[arg(long, value_name = "BOOL")]
    is_bot: Option<bool>,
    #[arg(long, value_name = "BOOL")]
    is_mailing_list: Option<bool>,
    #[arg(long, value_name = "BOOL")]
    needs_approval: Option<bool>,
    #[arg(long, value_name = "BOOL")]
    mfa: Option<bool>,
    #[arg(long)]
    created_after: Option<String>,
    #[arg(long)]
    created_before: Option<String>,
    #[arg(long)]
    query: Option<String>,
    /// Attachments to include: availability
    #[arg(long = "attach", value_delimiter = ',')]
    attachments: Vec<String>,
    #[arg(long)]
    limit: Option<u32>,
}

impl UserSearchArgs {
    fn into_action(self) -> Result<Action, AppError> {
        let mut form: UserSearchForm = load_form(self.form.as_deref())?;
        set(&mut form.ids, self.ids);
        set(&mut form.phids, self.phids);
        set(&mut form.usernames, self.usernames);
        set(&mut form.name_like, self.name_like);
        set(&mut form.is_admin, self.is_admin);
        set(&mut form.is_disabled, self.is_disabled);
        set(&mut form.is_bot, self.is_bot);
        set(&mut form.is_mailing_list, self.is_mailing_list);
        set(&mut form.needs_approval, self.needs_approval);
        set(&mut form.mfa, self.mfa);
        set(&mut form.created_after, self.created_after);
        set(&mut form.created_before, self.created_before);
        set(&mut form.query, self.query);
        Ok(Action::SearchUsers { form, attachments: self.attachments, limit: self.limit })
    }
}

pub fn run_user(command: UserCommands, config: Option<&Path>) -> Result<(), AppError> {
    let UserCommands::Search(args) = command;
    let action = args.into_action()?;
    let records = crate::execute(config, action)?;
    super::print_json(&records)
}
