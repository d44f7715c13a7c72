mod conduit_client;
mod watermark_store;

pub use conduit_client::{ConduitClient, SearchRequest};
pub use watermark_store::WatermarkStore;
