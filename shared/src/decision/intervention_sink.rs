/// A non-authoritative cue shown or played to the driver
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Indication {
    Accelerate { amount: f32 },
    Brake { amount: f32 },
    Steer { amount: f32 },
    Gear { gear: i32 },
    Lights { on: bool },
    /// Baseline: hold the wheel where it is
    NeutralSteer,
    /// Baseline: hold the current speed
    NeutralSpeed,
    /// Baseline: steer straight ahead
    SteerStraight,
    /// Baseline: keep accelerating
    KeepAccelerating,
}

/// An authoritative override of one control, already clamped to its range
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlCommand {
    /// `[0, 1]`
    Accel(f32),
    /// `[0, 1]`
    Brake(f32),
    /// `[-1, 1]`, negative is left
    Steer(f32),
    Gear(i32),
    Lights(bool),
}

/// Receives indications and control overrides. The UI, audio and car
/// actuation behind it live outside this crate.
pub trait InterventionSink {
    fn indicate(&mut self, indication: Indication);
    fn intervene(&mut self, command: ControlCommand);
}
