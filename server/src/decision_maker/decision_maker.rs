use blackbox_shared::{AllowedActions, DrivingSnapshot, InterventionSink, ProtocolError, Transport};
use log::{error, info, warn};

use crate::{
    error::BlackBoxError,
    intervention::{InterventionExecutor, InterventionFactory, InterventionType},
    recorder::{DataCollectionSettings, Recorder},
    session::{BlackBoxSession, DecisionReply},
    transport::ServerSocketAsync,
};

use super::decision_maker_config::DecisionMakerConfig;

/// Drives the black box once per tick: sends the snapshot, collects the
/// decisions, hands them to the intervention policy and records them.
///
/// Owns its session, executor and recorder. Any transport or protocol
/// failure tears the session down; later calls return `NotInitialized` until
/// a new session is initialized.
pub struct DecisionMaker<T: Transport = ServerSocketAsync> {
    config: DecisionMakerConfig,
    session: Option<BlackBoxSession<T>>,
    executor: Box<dyn InterventionExecutor>,
    recorder: Option<Box<dyn Recorder>>,
    last_reply: Option<DecisionReply>,
}

impl DecisionMaker<ServerSocketAsync> {
    /// Listens on the configured address, waits for the black box to
    /// connect, then runs the handshake and negotiation.
    pub fn initialize(&mut self) -> Result<(), BlackBoxError> {
        if self.session.is_some() {
            return Err(BlackBoxError::AlreadyInitialized);
        }
        let mut socket = ServerSocketAsync::new(self.config.socket.clone());
        socket.initialize()?;
        socket.await_client_connection()?;
        self.initialize_with(socket)
    }
}

impl<T: Transport> DecisionMaker<T> {
    pub fn new(config: DecisionMakerConfig) -> Self {
        let executor = InterventionFactory::create_intervention_executor(config.intervention_type);
        Self {
            config,
            session: None,
            executor,
            recorder: None,
            last_reply: None,
        }
    }

    pub fn with_recorder(mut self, recorder: Box<dyn Recorder>) -> Self {
        self.recorder = Some(recorder);
        self
    }

    pub fn config(&self) -> &DecisionMakerConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&BlackBoxSession<T>> {
        self.session.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.session.is_some()
    }

    /// The most recent decisions applied
    pub fn last_reply(&self) -> Option<&DecisionReply> {
        self.last_reply.as_ref()
    }

    /// Runs the handshake and negotiation over an already connected transport
    pub fn initialize_with(&mut self, transport: T) -> Result<(), BlackBoxError> {
        if self.session.is_some() {
            return Err(BlackBoxError::AlreadyInitialized);
        }
        let mut session = BlackBoxSession::new(transport, self.config.session.clone());
        if let Err(error) = session.initialize() {
            error!("Black box initialization failed: {error}");
            return Err(error.into());
        }

        if self.config.data_collection.meta_data {
            if let (Some(recorder), Some(order)) =
                (self.recorder.as_mut(), session.variable_order())
            {
                recorder.save_meta(&[
                    ("intervention_type", self.config.intervention_type.to_string()),
                    ("mode", format!("{:?}", self.config.session.mode)),
                    ("data_order", order.data_order().join(" ")),
                    ("action_order", order.action_order().join(" ")),
                ])?;
            }
        }

        self.session = Some(session);
        self.last_reply = None;
        Ok(())
    }

    /// One tick. Returns whether decisions were applied this tick; `false`
    /// means "no decision yet" in asynchronous mode.
    ///
    /// A reply is always handed to the intervention policy before anything is
    /// recorded. A recorder failure is returned after that and leaves the
    /// session running.
    pub fn decide<S: DrivingSnapshot + ?Sized>(
        &mut self,
        snapshot: &S,
        tick: u64,
        sink: &mut dyn InterventionSink,
    ) -> Result<bool, BlackBoxError> {
        let session = self.session.as_mut().ok_or(BlackBoxError::NotInitialized)?;
        let exchange = match session.exchange(snapshot, tick) {
            Ok(exchange) => exchange,
            Err(error) => {
                self.tear_down(&error);
                return Err(error.into());
            }
        };

        let applied = match exchange.reply {
            Some(reply) => {
                let active = reply.decisions.active_decisions();
                self.executor
                    .run_decision(&active, self.config.allowed_actions, sink);
                self.last_reply = Some(reply);
                true
            }
            None => false,
        };

        // only what the black box actually saw this tick
        let state_recorded = if exchange.sent && self.config.data_collection.car_data {
            self.record_state(snapshot, tick)
        } else {
            Ok(())
        };
        let decisions_recorded = if applied && self.config.data_collection.intervention_data {
            self.record_decisions()
        } else {
            Ok(())
        };
        state_recorded.and(decisions_recorded)?;
        Ok(applied)
    }

    fn record_decisions(&mut self) -> Result<(), BlackBoxError> {
        if let (Some(recorder), Some(reply)) = (self.recorder.as_mut(), self.last_reply.as_ref()) {
            if let Err(error) = recorder.save(&reply.decisions, reply.tick) {
                warn!("Could not record tick {} decisions: {error}", reply.tick);
                return Err(error.into());
            }
        }
        Ok(())
    }

    fn record_state<S: DrivingSnapshot + ?Sized>(
        &mut self,
        snapshot: &S,
        tick: u64,
    ) -> Result<(), BlackBoxError> {
        let (Some(recorder), Some(session)) = (self.recorder.as_mut(), self.session.as_ref())
        else {
            return Ok(());
        };
        let Some(order) = session.variable_order() else {
            return Ok(());
        };
        let fields: Vec<(String, String)> = order
            .data_order()
            .iter()
            .filter_map(|name| snapshot.value(name).map(|value| (name.clone(), value)))
            .collect();
        recorder.save_state(tick, &fields)?;
        Ok(())
    }

    /// Switches the intervention policy. Takes effect on the next tick.
    pub fn change_settings(&mut self, intervention_type: InterventionType) {
        info!("Intervention type changed to {intervention_type}");
        self.config.intervention_type = intervention_type;
        self.executor = InterventionFactory::create_intervention_executor(intervention_type);
    }

    pub fn set_allowed_actions(&mut self, allowed_actions: AllowedActions) {
        self.config.allowed_actions = allowed_actions;
    }

    pub fn set_data_collection_settings(&mut self, settings: DataCollectionSettings) {
        self.config.data_collection = settings;
    }

    /// Flushes recorded data to storage
    pub fn save_data(&mut self) -> Result<(), BlackBoxError> {
        if let Some(recorder) = self.recorder.as_mut() {
            recorder.flush()?;
        }
        Ok(())
    }

    /// Stops the black box, closes the connection and shuts the recorder
    /// down. Idempotent.
    pub fn shutdown_black_box(&mut self) -> Result<(), BlackBoxError> {
        let stopped = match self.session.take() {
            Some(mut session) => session.stop().map_err(|error| {
                warn!("Black box did not stop cleanly: {error}");
                BlackBoxError::from(error)
            }),
            None => Ok(()),
        };
        let recorded = match self.recorder.as_mut() {
            Some(recorder) => recorder.shutdown().map_err(BlackBoxError::from),
            None => Ok(()),
        };
        stopped.and(recorded)
    }

    fn tear_down(&mut self, cause: &ProtocolError) {
        error!("Black box session failed, closing: {cause}");
        if let Some(mut session) = self.session.take() {
            session.close();
        }
    }
}
