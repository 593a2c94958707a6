use super::{
    allowed_actions::AllowedActions,
    axis::DecisionAxis,
    intervention_sink::{ControlCommand, Indication, InterventionSink},
};

/// One decided control axis and its value.
///
/// Accel and Brake are in `[0, 1]`, Steer in `[-1, 1]`, Gear is a gear
/// number, Lights is on when non-zero. Values outside those ranges are
/// clamped when applied as an intervention.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Decision {
    Accel(f32),
    Brake(f32),
    Steer(f32),
    Gear(f32),
    Lights(f32),
}

impl Decision {
    pub fn new(axis: DecisionAxis, amount: f32) -> Self {
        match axis {
            DecisionAxis::Accel => Decision::Accel(amount),
            DecisionAxis::Brake => Decision::Brake(amount),
            DecisionAxis::Steer => Decision::Steer(amount),
            DecisionAxis::Gear => Decision::Gear(amount),
            DecisionAxis::Lights => Decision::Lights(amount),
        }
    }

    pub fn axis(&self) -> DecisionAxis {
        match self {
            Decision::Accel(_) => DecisionAxis::Accel,
            Decision::Brake(_) => DecisionAxis::Brake,
            Decision::Steer(_) => DecisionAxis::Steer,
            Decision::Gear(_) => DecisionAxis::Gear,
            Decision::Lights(_) => DecisionAxis::Lights,
        }
    }

    pub fn amount(&self) -> f32 {
        match self {
            Decision::Accel(amount)
            | Decision::Brake(amount)
            | Decision::Steer(amount)
            | Decision::Gear(amount)
            | Decision::Lights(amount) => *amount,
        }
    }

    /// NaN and infinities mean the axis is not usable this tick
    pub fn is_usable(&self) -> bool {
        self.amount().is_finite()
    }

    /// Tells the driver what the black box would do
    pub fn run_indicate_commands(&self, sink: &mut dyn InterventionSink) {
        let indication = match *self {
            Decision::Accel(amount) => Indication::Accelerate { amount },
            Decision::Brake(amount) => Indication::Brake { amount },
            Decision::Steer(amount) => Indication::Steer { amount },
            Decision::Gear(amount) => Indication::Gear {
                gear: gear_number(amount),
            },
            Decision::Lights(amount) => Indication::Lights { on: amount != 0.0 },
        };
        sink.indicate(indication);
    }

    /// Applies the decision to the car if `allowed` permits this axis.
    /// Returns whether a command was issued.
    pub fn run_intervene_commands(
        &self,
        allowed: AllowedActions,
        sink: &mut dyn InterventionSink,
    ) -> bool {
        if !allowed.allows(self.axis()) {
            return false;
        }
        let command = match *self {
            Decision::Accel(amount) => ControlCommand::Accel(amount.clamp(0.0, 1.0)),
            Decision::Brake(amount) => ControlCommand::Brake(amount.clamp(0.0, 1.0)),
            Decision::Steer(amount) => ControlCommand::Steer(amount.clamp(-1.0, 1.0)),
            Decision::Gear(amount) => ControlCommand::Gear(gear_number(amount)),
            Decision::Lights(amount) => ControlCommand::Lights(amount != 0.0),
        };
        sink.intervene(command);
        true
    }
}

fn gear_number(amount: f32) -> i32 {
    amount.round() as i32
}
