use blackbox_shared::DecisionTuple;

use super::error::RecorderError;

/// Which kinds of data a session records
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DataCollectionSettings {
    pub environment_data: bool,
    /// Per-tick snapshot fields sent to the black box
    pub car_data: bool,
    pub human_data: bool,
    /// Per-tick decisions received from the black box
    pub intervention_data: bool,
    /// A header describing the session
    pub meta_data: bool,
}

impl DataCollectionSettings {
    pub fn all() -> Self {
        Self {
            environment_data: true,
            car_data: true,
            human_data: true,
            intervention_data: true,
            meta_data: true,
        }
    }
}

/// Storage sink for a session. Called once per tick and once at the end.
pub trait Recorder: Send {
    /// Records the decisions answering `tick`
    fn save(&mut self, decisions: &DecisionTuple, tick: u64) -> Result<(), RecorderError>;

    /// Records the snapshot fields sent for `tick`
    fn save_state(&mut self, _tick: u64, _fields: &[(String, String)]) -> Result<(), RecorderError> {
        Ok(())
    }

    /// Records key/value pairs describing the session
    fn save_meta(&mut self, _entries: &[(&str, String)]) -> Result<(), RecorderError> {
        Ok(())
    }

    fn flush(&mut self) -> Result<(), RecorderError>;

    /// Flushes and releases the sink. Later saves fail with `Closed`.
    fn shutdown(&mut self) -> Result<(), RecorderError>;
}
