use blackbox_shared::{ControlCommand, Indication, InterventionSink};

/// Records everything an executor asks of the car and the driver
#[derive(Default, Debug)]
pub struct RecordingSink {
    pub indications: Vec<Indication>,
    pub commands: Vec<ControlCommand>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indications produced by individual decisions, without baseline cues
    pub fn decision_indications(&self) -> usize {
        self.indications
            .iter()
            .filter(|indication| !is_baseline(indication))
            .count()
    }

    pub fn baseline_indications(&self) -> usize {
        self.indications.iter().filter(|indication| is_baseline(indication)).count()
    }

    pub fn clear(&mut self) {
        self.indications.clear();
        self.commands.clear();
    }
}

fn is_baseline(indication: &Indication) -> bool {
    matches!(
        indication,
        Indication::NeutralSteer
            | Indication::NeutralSpeed
            | Indication::SteerStraight
            | Indication::KeepAccelerating
    )
}

impl InterventionSink for RecordingSink {
    fn indicate(&mut self, indication: Indication) {
        self.indications.push(indication);
    }

    fn intervene(&mut self, command: ControlCommand) {
        self.commands.push(command);
    }
}
