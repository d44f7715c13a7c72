//! Watermark-based polling for new or changed tasks.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, info};

use super::dispatcher::to_records;
use crate::domain::{AppError, Record, TaskTriggerForm};
use crate::ports::{ConduitClient, SearchRequest, WatermarkStore};

/// Watermark used when nothing has been polled yet.
pub const INITIAL_WATERMARK: i64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollEvent {
    TaskCreated,
    TaskUpdated,
}

impl PollEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            PollEvent::TaskCreated => "taskCreated",
            PollEvent::TaskUpdated => "taskUpdated",
        }
    }
}

impl fmt::Display for PollEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PollEvent {
    type Err = AppError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim() {
            "taskCreated" | "task-created" => Ok(PollEvent::TaskCreated),
            "taskUpdated" | "task-updated" => Ok(PollEvent::TaskUpdated),
            other => Err(AppError::InvalidOption {
                field: "event".into(),
                value: other.to_string(),
                expected: "taskCreated, taskUpdated".into(),
            }),
        }
    }
}

pub struct TaskPoller<C: ConduitClient, S: WatermarkStore> {
    client: C,
    store: S,
}

impl<C: ConduitClient, S: WatermarkStore> TaskPoller<C, S> {
    pub fn new(client: C, store: S) -> Self {
        Self { client, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetch tasks created or modified since the last successful poll.
    ///
    /// `now` (Unix seconds) becomes the new watermark, but only once the
    /// search succeeded.
    pub fn poll(
        &mut self,
        event: PollEvent,
        filters: &TaskTriggerForm,
        now: i64,
    ) -> Result<Vec<Record>, AppError> {
        let last_poll = self.store.load()?.unwrap_or(INITIAL_WATERMARK);
        debug!("Last poll time: {}, Current time: {}", last_poll, now);

        let mut constraints = filters.build_constraints()?;
        match event {
            PollEvent::TaskCreated => constraints.created_start = Some(last_poll),
            PollEvent::TaskUpdated => constraints.modified_start = Some(last_poll),
        }

        let request = SearchRequest::new(constraints, None);
        let tasks = self
            .client
            .search_tasks(&request)
            .map_err(|err| AppError::operation("Error polling tasks", err))?;

        self.store.save(now)?;
        info!(event = %event, count = tasks.len(), "poll complete");
        to_records(&tasks)
    }
}
