use crate::protocol::error::ProtocolError;

/// Read-only access to the current tick's car and track telemetry, by the
/// field names used in DATAORDER.
pub trait DrivingSnapshot {
    /// Printable value of `name`, or `None` if the snapshot has no such field
    fn value(&self, name: &str) -> Option<String>;
}

/// Plain telemetry for one car. Serves as the default snapshot and as the
/// reference decoder for tick requests.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CarState {
    /// m/s
    pub speed: f32,
    pub gear: i32,
    pub rpm: f32,
    pub steer: f32,
    pub accel: f32,
    pub brake: f32,
    pub lights: bool,
    /// Lateral distance to the track centre line
    pub to_middle: f32,
    /// Distance along the track from the start line
    pub to_start: f32,
    /// Heading relative to the track, radians
    pub yaw: f32,
    pub track_width: f32,
}

impl CarState {
    pub const FIELD_NAMES: [&'static str; 11] = [
        "Speed",
        "Gear",
        "Rpm",
        "Steer",
        "Accel",
        "Brake",
        "Lights",
        "ToMiddle",
        "ToStart",
        "Yaw",
        "TrackWidth",
    ];

    /// Rebuilds a car state from a tick request's values. Fields not listed
    /// keep their defaults.
    pub fn from_fields(names: &[String], values: &[String]) -> Result<Self, ProtocolError> {
        if names.len() != values.len() {
            return Err(ProtocolError::FieldCountMismatch {
                expected: names.len(),
                got: values.len(),
            });
        }
        let mut state = CarState::default();
        for (name, value) in names.iter().zip(values) {
            state.set_field(name, value)?;
        }
        Ok(state)
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<(), ProtocolError> {
        let invalid = || ProtocolError::InvalidFieldValue {
            name: name.to_string(),
            value: value.to_string(),
        };
        let float = || value.trim().parse::<f32>().map_err(|_| invalid());
        match name {
            "Speed" => self.speed = float()?,
            "Gear" => self.gear = value.trim().parse().map_err(|_| invalid())?,
            "Rpm" => self.rpm = float()?,
            "Steer" => self.steer = float()?,
            "Accel" => self.accel = float()?,
            "Brake" => self.brake = float()?,
            "Lights" => self.lights = value.trim().parse().map_err(|_| invalid())?,
            "ToMiddle" => self.to_middle = float()?,
            "ToStart" => self.to_start = float()?,
            "Yaw" => self.yaw = float()?,
            "TrackWidth" => self.track_width = float()?,
            _ => {
                return Err(ProtocolError::UnknownField {
                    name: name.to_string(),
                })
            }
        }
        Ok(())
    }
}

impl DrivingSnapshot for CarState {
    fn value(&self, name: &str) -> Option<String> {
        let value = match name {
            "Speed" => self.speed.to_string(),
            "Gear" => self.gear.to_string(),
            "Rpm" => self.rpm.to_string(),
            "Steer" => self.steer.to_string(),
            "Accel" => self.accel.to_string(),
            "Brake" => self.brake.to_string(),
            "Lights" => self.lights.to_string(),
            "ToMiddle" => self.to_middle.to_string(),
            "ToStart" => self.to_start.to_string(),
            "Yaw" => self.yaw.to_string(),
            "TrackWidth" => self.track_width.to_string(),
            _ => return None,
        };
        Some(value)
    }
}
