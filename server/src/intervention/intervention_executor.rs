use blackbox_shared::{AllowedActions, Decision, InterventionSink};

use super::intervention_type::InterventionType;

/// Turns a tick's active decisions into indications and interventions
/// according to one policy.
pub trait InterventionExecutor: Send {
    fn intervention_type(&self) -> InterventionType;

    /// `decisions` is most-recent first. An empty slice is a no-op. Decisions
    /// whose value is not finite are skipped.
    fn run_decision(
        &mut self,
        decisions: &[Decision],
        allowed: AllowedActions,
        sink: &mut dyn InterventionSink,
    );
}
