pub mod conduit_http;
pub mod form_encoding;
pub mod watermark_file;

pub use conduit_http::HttpConduitClient;
pub use watermark_file::FileWatermarkStore;
