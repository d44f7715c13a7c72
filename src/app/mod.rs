pub mod cli;
mod dispatcher;
mod poller;
mod project_options;

pub use dispatcher::{Action, Dispatcher, connect, http_client};
pub use poller::{INITIAL_WATERMARK, PollEvent, TaskPoller};
pub use project_options::{ProjectOption, ProjectOptionCache, RefreshPolicy};
