use blackbox_shared::{
    accept_handshake, decode_decisions, encode_snapshot, receive_orders, resolve_action_order,
    send_orders, DecisionAxis, DecisionTuple, DrivingSnapshot, MessageChannel, OrderSource,
    ProtocolError, ProtocolMessage, SessionState, Transport, VariableOrder,
};
use log::{debug, info, warn};

use super::session_config::{SessionConfig, SessionMode};

/// Decisions answering one tick request
#[derive(Clone, Debug, PartialEq)]
pub struct DecisionReply {
    /// The tick whose state this reply answers
    pub tick: u64,
    pub decisions: DecisionTuple,
}

/// What one tick of the request/reply loop did
#[derive(Clone, Debug, PartialEq)]
pub struct TickExchange {
    /// Whether this tick's state went out to the black box
    pub sent: bool,
    /// The reply collected this tick, if any
    pub reply: Option<DecisionReply>,
}

/// Simulator side of one black-box connection.
///
/// Runs the handshake and order negotiation once, then one request/reply per
/// tick. At most one request is outstanding; replies are attributed to it.
pub struct BlackBoxSession<T: Transport> {
    channel: MessageChannel<T>,
    config: SessionConfig,
    state: SessionState,
    order: Option<VariableOrder>,
    action_axes: Vec<DecisionAxis>,
    pending_tick: Option<u64>,
}

impl<T: Transport> BlackBoxSession<T> {
    /// Wraps a connected transport. Call `initialize` before anything else.
    pub fn new(transport: T, config: SessionConfig) -> Self {
        Self {
            channel: MessageChannel::new(transport),
            config,
            state: SessionState::Disconnected,
            order: None,
            action_axes: Vec::new(),
            pending_tick: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn mode(&self) -> SessionMode {
        self.config.mode
    }

    /// The negotiated orders, once negotiation succeeded
    pub fn variable_order(&self) -> Option<&VariableOrder> {
        self.order.as_ref()
    }

    pub fn action_axes(&self) -> &[DecisionAxis] {
        &self.action_axes
    }

    pub fn transport(&self) -> &T {
        self.channel.transport()
    }

    pub fn is_connected(&self) -> bool {
        self.channel.is_connected()
    }

    /// Handshake, then order negotiation. On failure the connection is closed.
    pub fn initialize(&mut self) -> Result<(), ProtocolError> {
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
        accept_handshake(&mut self.channel, self.config.handshake_attempts)?;

        self.state = SessionState::Negotiating;
        let order = match &self.config.orders {
            OrderSource::Local(order) => {
                // fail before anything goes on the wire
                resolve_action_order(order.action_order())?;
                send_orders(&mut self.channel, order)?;
                order.clone()
            }
            OrderSource::Remote => receive_orders(&mut self.channel)?,
        };
        self.action_axes = resolve_action_order(order.action_order())?;
        self.order = Some(order);
        self.state = SessionState::Ready;
        info!("Black box session ready ({:?})", self.config.mode);
        Ok(())
    }

    /// Sends the tick's state in DATAORDER order.
    ///
    /// Returns `false` when skipped: in asynchronous mode while the previous
    /// request is still unanswered. In synchronous mode that is an error.
    pub fn send_state<S: DrivingSnapshot + ?Sized>(
        &mut self,
        snapshot: &S,
        tick: u64,
    ) -> Result<bool, ProtocolError> {
        match (self.state, self.config.mode) {
            (SessionState::Ready, _) => {}
            (SessionState::AwaitingDecision, SessionMode::Asynchronous) => {
                debug!("Tick {tick}: previous request unanswered, not sending state");
                return Ok(false);
            }
            (SessionState::AwaitingDecision, SessionMode::Synchronous) => {
                return Err(ProtocolError::RequestInFlight)
            }
            (state, _) => return Err(ProtocolError::NotReady { state }),
        }
        let order = self
            .order
            .as_ref()
            .ok_or(ProtocolError::NotReady { state: self.state })?;

        let request = encode_snapshot(snapshot, order.data_order())?;
        self.channel.send(&request)?;
        self.pending_tick = Some(tick);
        self.state = SessionState::AwaitingDecision;
        Ok(true)
    }

    /// Collects the reply to the outstanding request.
    ///
    /// Synchronous mode blocks for it. Asynchronous mode returns `Ok(None)`
    /// while it has not arrived yet, including when nothing was requested.
    pub fn get_decisions(&mut self) -> Result<Option<DecisionReply>, ProtocolError> {
        match (self.state, self.config.mode) {
            (SessionState::AwaitingDecision, _) => {}
            (SessionState::Ready, SessionMode::Asynchronous) => return Ok(None),
            (state, _) => return Err(ProtocolError::NotReady { state }),
        }

        let message = match self.config.mode {
            SessionMode::Synchronous => Some(self.channel.await_message()?),
            SessionMode::Asynchronous => self.channel.poll_message()?,
        };
        let Some(message) = message else {
            return Ok(None);
        };

        let values = match message {
            ProtocolMessage::Values(values) => values,
            ProtocolMessage::DataOrder(_) | ProtocolMessage::ActionOrder(_) => {
                return Err(ProtocolError::AlreadyNegotiated)
            }
            other => {
                return Err(ProtocolError::UnexpectedMessage {
                    state: self.state,
                    got: other.to_string(),
                })
            }
        };
        let decisions = decode_decisions(&self.action_axes, &values)?;
        let tick = self.pending_tick.take().unwrap_or_default();
        self.state = SessionState::Ready;
        debug!("Tick {tick}: {} decision(s)", decisions.active_count());
        Ok(Some(DecisionReply { tick, decisions }))
    }

    /// One tick of the request/reply loop.
    ///
    /// Synchronous: send this tick's state and block for its reply.
    /// Asynchronous: pick up the reply to an earlier request if it has
    /// arrived, and send this tick's state when no request is outstanding.
    pub fn decide<S: DrivingSnapshot + ?Sized>(
        &mut self,
        snapshot: &S,
        tick: u64,
    ) -> Result<Option<DecisionReply>, ProtocolError> {
        self.exchange(snapshot, tick).map(|exchange| exchange.reply)
    }

    /// Like `decide`, but also reports whether the state was sent
    pub fn exchange<S: DrivingSnapshot + ?Sized>(
        &mut self,
        snapshot: &S,
        tick: u64,
    ) -> Result<TickExchange, ProtocolError> {
        match self.config.mode {
            SessionMode::Synchronous => {
                let sent = self.send_state(snapshot, tick)?;
                let reply = self.get_decisions()?;
                Ok(TickExchange { sent, reply })
            }
            SessionMode::Asynchronous => {
                let reply = self.get_decisions()?;
                let sent = self.send_state(snapshot, tick)?;
                Ok(TickExchange { sent, reply })
            }
        }
    }

    /// Sends `"STOP"`, waits for `"OK"` and closes the connection. Late
    /// decision replies are discarded. Idempotent once closed.
    pub fn stop(&mut self) -> Result<(), ProtocolError> {
        if self.state == SessionState::Disconnected {
            self.close();
            return Ok(());
        }
        self.state = SessionState::Stopping;
        let result = self.stop_handshake();
        self.close();
        result
    }

    fn stop_handshake(&mut self) -> Result<(), ProtocolError> {
        self.channel.send(&ProtocolMessage::Stop)?;
        loop {
            match self.channel.await_message()? {
                ProtocolMessage::Ok => {
                    info!("Black box acknowledged stop");
                    return Ok(());
                }
                ProtocolMessage::Values(values) => {
                    warn!("Discarding late decision reply {values:?}");
                }
                other => {
                    return Err(ProtocolError::UnexpectedMessage {
                        state: self.state,
                        got: other.to_string(),
                    })
                }
            }
        }
    }

    /// Closes the connection without the stop exchange. Idempotent.
    pub fn close(&mut self) {
        self.channel.close();
        self.state = SessionState::Disconnected;
        self.pending_tick = None;
    }
}
