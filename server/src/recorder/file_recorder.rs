use std::{
    fs::File,
    path::{Path, PathBuf},
};

use blackbox_shared::{DecisionAxis, DecisionTuple};
use csv::{Writer, WriterBuilder};
use log::info;

use super::{error::RecorderError, recorder::Recorder};

const DECISION_HEADER: [&str; 6] = ["tick", "accel", "brake", "steer", "gear", "lights"];

const DECISION_AXES: [DecisionAxis; 5] = [
    DecisionAxis::Accel,
    DecisionAxis::Brake,
    DecisionAxis::Steer,
    DecisionAxis::Gear,
    DecisionAxis::Lights,
];

struct CsvFile {
    path: PathBuf,
    writer: Writer<File>,
}

impl CsvFile {
    // flexible: meta comment records are one field wide
    fn create(path: PathBuf) -> Result<Self, RecorderError> {
        let writer = WriterBuilder::new()
            .flexible(true)
            .from_path(&path)
            .map_err(|error| RecorderError::create_failed(&path, &error.into()))?;
        Ok(Self { path, writer })
    }

    fn write_record<I, F>(&mut self, record: I) -> Result<(), RecorderError>
    where
        I: IntoIterator<Item = F>,
        F: AsRef<[u8]>,
    {
        self.writer
            .write_record(record)
            .map_err(|error| RecorderError::write_failed(&self.path, &error.into()))
    }

    fn flush(&mut self) -> Result<(), RecorderError> {
        self.writer
            .flush()
            .map_err(|error| RecorderError::write_failed(&self.path, &error))
    }
}

/// Records a session as CSV.
///
/// Decisions go to the given file, one row per answered tick with an empty
/// cell for every axis that was not set. Snapshot fields go to a sibling
/// `.state.csv` file, created on first use.
pub struct FileRecorder {
    decisions: Option<CsvFile>,
    states: Option<CsvFile>,
    state_path: PathBuf,
    closed: bool,
}

impl FileRecorder {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, RecorderError> {
        let path = path.as_ref();
        let mut decisions = CsvFile::create(path.to_path_buf())?;
        decisions.write_record(DECISION_HEADER)?;
        info!("Recording decisions to {}", path.display());
        Ok(Self {
            decisions: Some(decisions),
            states: None,
            state_path: path.with_extension("state.csv"),
            closed: false,
        })
    }

    pub fn state_path(&self) -> &Path {
        &self.state_path
    }

    fn decisions(&mut self) -> Result<&mut CsvFile, RecorderError> {
        self.decisions.as_mut().ok_or(RecorderError::Closed)
    }
}

fn decision_row(decisions: &DecisionTuple, tick: u64) -> Vec<String> {
    let cells = DECISION_AXES.iter().map(|axis| {
        if decisions.contains(*axis) {
            decisions.amount(*axis).to_string()
        } else {
            String::new()
        }
    });
    std::iter::once(tick.to_string()).chain(cells).collect()
}

impl Recorder for FileRecorder {
    fn save(&mut self, decisions: &DecisionTuple, tick: u64) -> Result<(), RecorderError> {
        let row = decision_row(decisions, tick);
        self.decisions()?.write_record(&row)
    }

    fn save_state(&mut self, tick: u64, fields: &[(String, String)]) -> Result<(), RecorderError> {
        if self.closed {
            return Err(RecorderError::Closed);
        }
        if self.states.is_none() {
            let mut states = CsvFile::create(self.state_path.clone())?;
            let names = fields.iter().map(|(name, _)| name.as_str());
            states.write_record(std::iter::once("tick").chain(names))?;
            self.states = Some(states);
        }
        let tick = tick.to_string();
        let values = fields.iter().map(|(_, value)| value.as_str());
        match self.states.as_mut() {
            Some(states) => states.write_record(std::iter::once(tick.as_str()).chain(values)),
            None => Err(RecorderError::Closed),
        }
    }

    fn save_meta(&mut self, entries: &[(&str, String)]) -> Result<(), RecorderError> {
        let decisions = self.decisions()?;
        for (key, value) in entries {
            decisions.write_record([format!("# {key}: {value}")])?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), RecorderError> {
        self.decisions()?.flush()?;
        if let Some(states) = self.states.as_mut() {
            states.flush()?;
        }
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), RecorderError> {
        if self.closed {
            return Ok(());
        }
        let result = self.flush();
        self.decisions = None;
        self.states = None;
        self.closed = true;
        info!("Recorder shut down");
        result
    }
}
