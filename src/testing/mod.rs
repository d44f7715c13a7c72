mod fake_conduit_client;
mod memory_watermark_store;

pub use fake_conduit_client::{FakeConduitClient, RecordedCall, conduit_object};
pub use memory_watermark_store::MemoryWatermarkStore;
