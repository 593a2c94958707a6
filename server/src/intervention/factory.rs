use super::{
    executors::{
        AutonomousAIExecutor, CompleteTakeoverExecutor, NoSignalsExecutor, OnlySignalsExecutor,
        SharedControlExecutor,
    },
    intervention_executor::InterventionExecutor,
    intervention_type::InterventionType,
};

pub struct InterventionFactory;

impl InterventionFactory {
    pub fn create_intervention_executor(kind: InterventionType) -> Box<dyn InterventionExecutor> {
        match kind {
            InterventionType::NoSignals => Box::new(NoSignalsExecutor),
            InterventionType::OnlySignals => Box::new(OnlySignalsExecutor),
            InterventionType::SharedControl => Box::new(SharedControlExecutor),
            InterventionType::CompleteTakeover => Box::new(CompleteTakeoverExecutor),
            InterventionType::AutonomousAI => Box::new(AutonomousAIExecutor),
        }
    }
}
