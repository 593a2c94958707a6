mod black_box_client;
mod client_config;
mod data_frame;
mod decision_policy;

pub use black_box_client::{BlackBoxClient, Request};
pub use client_config::ClientConfig;
pub use data_frame::DataFrame;
pub use decision_policy::DecisionPolicy;
