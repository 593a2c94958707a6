pub mod allowed_actions;
pub mod axis;
pub mod decision;
pub mod decision_tuple;
pub mod intervention_sink;
