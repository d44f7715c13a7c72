use crate::domain::AppError;
use crate::ports::WatermarkStore;

#[derive(Debug, Clone, Default)]
pub struct MemoryWatermarkStore {
    pub value: Option<i64>,
    pub saves: usize,
}

impl MemoryWatermarkStore {
    pub fn at(timestamp: i64) -> Self {
        Self { value: Some(timestamp), saves: 0 }
    }
}

impl WatermarkStore for MemoryWatermarkStore {
    fn load(&self) -> Result<Option<i64>, AppError> {
        Ok(self.value)
    }

    fn save(&mut self, timestamp: i64) -> Result<(), AppError> {
        self.value = Some(timestamp);
        self.saves += 1;
        Ok(())
    }
}
