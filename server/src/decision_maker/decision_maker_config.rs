use blackbox_shared::{AllowedActions, SocketConfig};

use crate::{
    intervention::InterventionType, recorder::DataCollectionSettings, session::SessionConfig,
};

/// Contains Config properties which will be used by a `DecisionMaker`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecisionMakerConfig {
    /// Where to listen for the black box
    pub socket: SocketConfig,
    pub session: SessionConfig,
    /// Policy used to act on decisions. May be changed at runtime.
    pub intervention_type: InterventionType,
    /// Axes the black box may override
    pub allowed_actions: AllowedActions,
    pub data_collection: DataCollectionSettings,
}

impl Default for DecisionMakerConfig {
    fn default() -> Self {
        Self {
            socket: SocketConfig::default(),
            session: SessionConfig::default(),
            intervention_type: InterventionType::default(),
            allowed_actions: AllowedActions::all(),
            data_collection: DataCollectionSettings::default(),
        }
    }
}
