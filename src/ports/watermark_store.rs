//! Poll watermark persistence port.

use crate::domain::AppError;

/// Stores the Unix timestamp (seconds) of the last successful poll.
pub trait WatermarkStore {
    /// Read the stored watermark; `None` when nothing was recorded yet.
    fn load(&self) -> Result<Option<i64>, AppError>;

    /// Record a new watermark.
    fn save(&mut self, timestamp: i64) -> Result<(), AppError>;
}
