//! phorge-flow: query and mutate Phorge tasks, projects and users over Conduit.
//!
//! Flat, comma-separated form input is turned into typed `*.search`
//! constraints and `maniphest.edit` transactions, sent with one remote call,
//! and returned as JSON records.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

use std::path::Path;

use adapters::FileWatermarkStore;
use domain::configuration::load_config;

pub use app::{Action, Dispatcher, PollEvent, ProjectOption, RefreshPolicy, TaskPoller};
pub use domain::{
    AppError, ConduitConfig, ProjectSearchForm, Record, TaskMutationForm, TaskSearchForm,
    TaskTriggerForm, UserSearchForm,
};

/// Run one action against the server configured by `config` and the
/// environment.
pub fn execute(config: Option<&Path>, action: Action) -> Result<Vec<Record>, AppError> {
    app::connect(&load_config(config)?)?.execute(action)
}

/// Confirm the configured credentials with `user.whoami`.
pub fn whoami(config: Option<&Path>) -> Result<Record, AppError> {
    app::connect(&load_config(config)?)?.verify_credentials()
}

/// All projects as name/PHID options, minus `selected`.
pub fn project_options(
    config: Option<&Path>,
    selected: &[String],
) -> Result<Vec<ProjectOption>, AppError> {
    app::connect(&load_config(config)?)?.project_options(selected)
}

/// Poll for tasks matching `event` since the watermark stored at `state`.
///
/// `now` is stored as the new watermark after a successful fetch.
pub fn poll(
    config: Option<&Path>,
    state: &Path,
    event: PollEvent,
    filters: &TaskTriggerForm,
    now: i64,
) -> Result<Vec<Record>, AppError> {
    let client = app::http_client(&load_config(config)?)?;
    TaskPoller::new(client, FileWatermarkStore::new(state)).poll(event, filters, now)
}
