mod executors;
mod factory;
mod intervention_executor;
mod intervention_type;

pub use executors::{
    AutonomousAIExecutor, CompleteTakeoverExecutor, NoSignalsExecutor, OnlySignalsExecutor,
    SharedControlExecutor,
};
pub use factory::InterventionFactory;
pub use intervention_executor::InterventionExecutor;
pub use intervention_type::{InterventionType, UnknownInterventionType};
