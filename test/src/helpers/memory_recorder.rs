use std::sync::{Arc, Mutex, MutexGuard};

use blackbox_server::{Recorder, RecorderError};
use blackbox_shared::DecisionTuple;

/// Everything a `MemoryRecorder` was handed
#[derive(Default, Debug)]
pub struct MemoryRecord {
    pub decisions: Vec<(u64, DecisionTuple)>,
    pub states: Vec<(u64, Vec<(String, String)>)>,
    pub meta: Vec<(String, String)>,
    pub flushes: usize,
    pub shutdowns: usize,
}

/// Recorder that keeps everything in memory. Clones share one record, so a
/// test can keep a handle after boxing one into a `DecisionMaker`.
#[derive(Clone, Default)]
pub struct MemoryRecorder {
    record: Arc<Mutex<MemoryRecord>>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self) -> MutexGuard<'_, MemoryRecord> {
        match self.record.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Recorder for MemoryRecorder {
    fn save(&mut self, decisions: &DecisionTuple, tick: u64) -> Result<(), RecorderError> {
        self.record().decisions.push((tick, decisions.clone()));
        Ok(())
    }

    fn save_state(&mut self, tick: u64, fields: &[(String, String)]) -> Result<(), RecorderError> {
        self.record().states.push((tick, fields.to_vec()));
        Ok(())
    }

    fn save_meta(&mut self, entries: &[(&str, String)]) -> Result<(), RecorderError> {
        self.record()
            .meta
            .extend(entries.iter().map(|(key, value)| (key.to_string(), value.clone())));
        Ok(())
    }

    fn flush(&mut self) -> Result<(), RecorderError> {
        self.record().flushes += 1;
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), RecorderError> {
        self.record().shutdowns += 1;
        Ok(())
    }
}
