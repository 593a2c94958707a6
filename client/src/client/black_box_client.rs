use std::sync::Arc;

use blackbox_shared::{
    open_handshake, receive_orders, resolve_action_order, send_orders, DecisionAxis,
    DecisionTuple, MessageChannel, OrderSource, ProtocolError, ProtocolMessage, SessionState,
    SocketConfig, Transport, VariableOrder,
};
use log::{debug, info};

use crate::transport::ClientSocketAsync;

use super::{client_config::ClientConfig, data_frame::DataFrame, decision_policy::DecisionPolicy};

/// What the simulator asked for
#[derive(Clone, Debug, PartialEq)]
pub enum Request {
    /// State for one tick; answer with `send_decisions`
    Data(DataFrame),
    /// End of session; answer with `acknowledge_stop`
    Stop,
}

/// Black-box side of one simulator connection
pub struct BlackBoxClient<T: Transport = ClientSocketAsync> {
    channel: MessageChannel<T>,
    config: ClientConfig,
    state: SessionState,
    order: Option<VariableOrder>,
    data_names: Arc<[String]>,
    action_axes: Vec<DecisionAxis>,
    requests: u64,
}

impl BlackBoxClient<ClientSocketAsync> {
    /// Connects to the simulator and runs the handshake and negotiation
    pub fn connect(socket: SocketConfig, config: ClientConfig) -> Result<Self, ProtocolError> {
        let mut transport = ClientSocketAsync::new(socket);
        transport.initialize()?;
        let mut client = Self::new(transport, config);
        client.start()?;
        Ok(client)
    }
}

impl<T: Transport> BlackBoxClient<T> {
    /// Wraps a connected transport. Call `start` before anything else.
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self {
            channel: MessageChannel::new(transport),
            config,
            state: SessionState::Disconnected,
            order: None,
            data_names: Arc::from(Vec::new()),
            action_axes: Vec::new(),
            requests: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn variable_order(&self) -> Option<&VariableOrder> {
        self.order.as_ref()
    }

    /// Tick requests answered so far
    pub fn ticks_served(&self) -> u64 {
        if self.state == SessionState::AwaitingDecision {
            self.requests - 1
        } else {
            self.requests
        }
    }

    pub fn is_connected(&self) -> bool {
        self.channel.is_connected()
    }

    /// Sends `"AI ACTIVE"`, waits for `"OK"`, then negotiates the orders.
    /// On failure the connection is closed.
    pub fn start(&mut self) -> Result<(), ProtocolError> {
        if self.order.is_some() {
            return Err(ProtocolError::AlreadyNegotiated);
        }
        if self.state != SessionState::Disconnected {
            return Err(ProtocolError::NotReady { state: self.state });
        }
        let result = self.handshake_and_negotiate();
        if result.is_err() {
            self.close();
        }
        result
    }

    fn handshake_and_negotiate(&mut self) -> Result<(), ProtocolError> {
        self.state = SessionState::Handshaking;
        open_handshake(&mut self.channel, self.config.handshake_attempts)?;

        self.state = SessionState::Negotiating;
        let order = match &self.config.orders {
            OrderSource::Local(order) => {
                resolve_action_order(order.action_order())?;
                send_orders(&mut self.channel, order)?;
                order.clone()
            }
            OrderSource::Remote => receive_orders(&mut self.channel)?,
        };
        self.action_axes = resolve_action_order(order.action_order())?;
        self.data_names = Arc::from(order.data_order());
        self.order = Some(order);
        self.state = SessionState::Ready;
        info!("Black box ready");
        Ok(())
    }

    /// Blocks for the simulator's next request
    pub fn receive_request(&mut self) -> Result<Request, ProtocolError> {
        if self.state != SessionState::Ready {
            return Err(ProtocolError::NotReady { state: self.state });
        }
        match self.channel.await_message()? {
            ProtocolMessage::Values(values) => {
                if values.len() != self.data_names.len() {
                    return Err(ProtocolError::FieldCountMismatch {
                        expected: self.data_names.len(),
                        got: values.len(),
                    });
                }
                let frame = DataFrame::new(self.requests, self.data_names.clone(), values);
                self.requests += 1;
                self.state = SessionState::AwaitingDecision;
                Ok(Request::Data(frame))
            }
            ProtocolMessage::Stop => {
                info!("Simulator requested stop");
                self.state = SessionState::Stopping;
                Ok(Request::Stop)
            }
            ProtocolMessage::DataOrder(_) | ProtocolMessage::ActionOrder(_) => {
                Err(ProtocolError::AlreadyNegotiated)
            }
            other => Err(ProtocolError::UnexpectedMessage {
                state: self.state,
                got: other.to_string(),
            }),
        }
    }

    /// Answers the pending request with one raw value per ACTIONORDER entry
    pub fn send_decisions(&mut self, values: Vec<String>) -> Result<(), ProtocolError> {
        if self.state != SessionState::AwaitingDecision {
            return Err(ProtocolError::NotReady { state: self.state });
        }
        if values.len() != self.action_axes.len() {
            return Err(ProtocolError::FieldCountMismatch {
                expected: self.action_axes.len(),
                got: values.len(),
            });
        }
        self.channel.send(&ProtocolMessage::Values(values))?;
        self.state = SessionState::Ready;
        Ok(())
    }

    /// Answers the pending request from a decision tuple, in ACTIONORDER
    /// order. Unset axes are sent as `NaN`.
    pub fn send_decision_tuple(&mut self, decisions: &DecisionTuple) -> Result<(), ProtocolError> {
        let values = self
            .action_axes
            .iter()
            .map(|axis| {
                if decisions.contains(*axis) {
                    decisions.amount(*axis).to_string()
                } else {
                    f32::NAN.to_string()
                }
            })
            .collect();
        self.send_decisions(values)
    }

    /// Answers `"STOP"` with `"OK"` and closes the connection
    pub fn acknowledge_stop(&mut self) -> Result<(), ProtocolError> {
        if self.state != SessionState::Stopping {
            return Err(ProtocolError::NotReady { state: self.state });
        }
        let result = self.channel.send(&ProtocolMessage::Ok);
        self.close();
        result
    }

    /// Serves requests with `policy` until the simulator stops the session.
    /// Returns the number of ticks served.
    pub fn run<P: DecisionPolicy + ?Sized>(&mut self, policy: &mut P) -> Result<u64, ProtocolError> {
        loop {
            match self.receive_request()? {
                Request::Data(frame) => {
                    let decisions = policy.decide(&frame);
                    debug!("Tick {}: {} decision(s)", frame.tick(), decisions.active_count());
                    self.send_decision_tuple(&decisions)?;
                }
                Request::Stop => {
                    self.acknowledge_stop()?;
                    return Ok(self.requests);
                }
            }
        }
    }

    /// Closes the connection without the stop exchange. Idempotent.
    pub fn close(&mut self) {
        self.channel.close();
        self.state = SessionState::Disconnected;
    }
}
