pub(crate) mod error;
mod file_recorder;
mod recorder;

pub use error::RecorderError;
pub use file_recorder::FileRecorder;
pub use recorder::{DataCollectionSettings, Recorder};
