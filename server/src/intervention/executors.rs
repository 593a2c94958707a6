use blackbox_shared::{AllowedActions, Decision, DecisionAxis, Indication, InterventionSink};
use log::warn;

use super::{intervention_executor::InterventionExecutor, intervention_type::InterventionType};

fn usable(decisions: &[Decision]) -> impl Iterator<Item = &Decision> {
    decisions.iter().filter(|decision| {
        let usable = decision.is_usable();
        if !usable {
            warn!("Skipping {} decision with value {}", decision.axis(), decision.amount());
        }
        usable
    })
}

fn indicate_and_intervene(
    decisions: &[Decision],
    allowed: AllowedActions,
    sink: &mut dyn InterventionSink,
) {
    for decision in usable(decisions) {
        decision.run_indicate_commands(sink);
        if !decision.run_intervene_commands(allowed, sink) {
            warn!("Intervention on {} is not allowed", decision.axis());
        }
    }
}

/// Never indicates, never intervenes
pub struct NoSignalsExecutor;

impl InterventionExecutor for NoSignalsExecutor {
    fn intervention_type(&self) -> InterventionType {
        InterventionType::NoSignals
    }

    fn run_decision(
        &mut self,
        _decisions: &[Decision],
        _allowed: AllowedActions,
        _sink: &mut dyn InterventionSink,
    ) {
    }
}

/// Indicates every decision, never intervenes
pub struct OnlySignalsExecutor;

impl InterventionExecutor for OnlySignalsExecutor {
    fn intervention_type(&self) -> InterventionType {
        InterventionType::OnlySignals
    }

    fn run_decision(
        &mut self,
        decisions: &[Decision],
        _allowed: AllowedActions,
        sink: &mut dyn InterventionSink,
    ) {
        for decision in usable(decisions) {
            decision.run_indicate_commands(sink);
        }
    }
}

/// Indicates every decision and intervenes where allowed
pub struct SharedControlExecutor;

impl InterventionExecutor for SharedControlExecutor {
    fn intervention_type(&self) -> InterventionType {
        InterventionType::SharedControl
    }

    fn run_decision(
        &mut self,
        decisions: &[Decision],
        allowed: AllowedActions,
        sink: &mut dyn InterventionSink,
    ) {
        indicate_and_intervene(decisions, allowed, sink);
    }
}

/// Shows the neutral steer/speed baseline, then indicates every decision and
/// intervenes where allowed
pub struct CompleteTakeoverExecutor;

impl InterventionExecutor for CompleteTakeoverExecutor {
    fn intervention_type(&self) -> InterventionType {
        InterventionType::CompleteTakeover
    }

    fn run_decision(
        &mut self,
        decisions: &[Decision],
        allowed: AllowedActions,
        sink: &mut dyn InterventionSink,
    ) {
        if decisions.is_empty() {
            return;
        }
        sink.indicate(Indication::NeutralSteer);
        sink.indicate(Indication::NeutralSpeed);
        indicate_and_intervene(decisions, allowed, sink);
    }
}

/// Indicates every decision and intervenes where allowed, and cues
/// straight steering and accelerating on the axes it may drive
pub struct AutonomousAIExecutor;

impl InterventionExecutor for AutonomousAIExecutor {
    fn intervention_type(&self) -> InterventionType {
        InterventionType::AutonomousAI
    }

    fn run_decision(
        &mut self,
        decisions: &[Decision],
        allowed: AllowedActions,
        sink: &mut dyn InterventionSink,
    ) {
        if decisions.is_empty() {
            return;
        }
        indicate_and_intervene(decisions, allowed, sink);
        if allowed.allows(DecisionAxis::Steer) {
            sink.indicate(Indication::SteerStraight);
        }
        if allowed.allows(DecisionAxis::Accel) {
            sink.indicate(Indication::KeepAccelerating);
        }
    }
}
