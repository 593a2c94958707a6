mod decision_maker;
mod decision_maker_config;

pub use decision_maker::DecisionMaker;
pub use decision_maker_config::DecisionMakerConfig;
