mod storage;

pub use storage::{CsvStorage, SharedStorage, Storage};

#[cfg(test)]
pub use storage::MemoryStorage;
