use std::sync::Arc;

use blackbox_shared::DrivingSnapshot;

/// One tick's state as received from the simulator, keyed by DATAORDER
#[derive(Clone, Debug, PartialEq)]
pub struct DataFrame {
    tick: u64,
    names: Arc<[String]>,
    values: Vec<String>,
}

impl DataFrame {
    pub(crate) fn new(tick: u64, names: Arc<[String]>, values: Vec<String>) -> Self {
        Self {
            tick,
            names,
            values,
        }
    }

    /// Number of requests received before this one
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.names
            .iter()
            .position(|field| field == name)
            .and_then(|index| self.values.get(index))
            .map(String::as_str)
    }

    /// The field parsed as a number, `None` if absent or not numeric
    pub fn get_f32(&self, name: &str) -> Option<f32> {
        self.get(name).and_then(|value| value.trim().parse().ok())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names
            .iter()
            .zip(&self.values)
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl DrivingSnapshot for DataFrame {
    fn value(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_string)
    }
}
