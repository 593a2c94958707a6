//! Session-level tests: handshake, negotiation, tick requests and stop, with
//! a hand-driven black box on the other end of an in-memory transport.

use blackbox_server::{
    BlackBoxSession, InterventionExecutor, InterventionFactory, InterventionType, SessionConfig,
    SessionMode,
};
use blackbox_shared::{
    AllowedActions, CarState, ControlCommand, DecisionAxis, Indication, OrderSource,
    ProtocolError, ProtocolMessage, SessionState, VariableOrder,
};
use blackbox_test::{strings, LocalSocketPair, LocalTransport, RawPeer, RecordingSink};

fn init_logging() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init()
        .ok();
}

fn steer_brake_order() -> VariableOrder {
    VariableOrder::new(["Speed", "Gear"], ["Steer", "Brake"])
}

fn new_session(orders: OrderSource, mode: SessionMode) -> (BlackBoxSession<LocalTransport>, RawPeer) {
    init_logging();
    let LocalSocketPair { server, client } = LocalSocketPair::new();
    let config = SessionConfig {
        mode,
        orders,
        ..SessionConfig::default()
    };
    (BlackBoxSession::new(server, config), RawPeer::new(client))
}

/// Session with the simulator's orders accepted, handshake traffic drained
fn ready_session(mode: SessionMode) -> (BlackBoxSession<LocalTransport>, RawPeer) {
    let (mut session, mut peer) = new_session(OrderSource::Local(steer_brake_order()), mode);
    peer.send(ProtocolMessage::Handshake);
    session.initialize().expect("session initializes");

    assert_eq!(peer.receive(), Ok(ProtocolMessage::Ok));
    assert_eq!(
        peer.receive(),
        Ok(ProtocolMessage::DataOrder(strings(&["Speed", "Gear"])))
    );
    assert_eq!(
        peer.receive(),
        Ok(ProtocolMessage::ActionOrder(strings(&["Steer", "Brake"])))
    );
    assert_eq!(session.state(), SessionState::Ready);
    (session, peer)
}

fn car() -> CarState {
    CarState {
        speed: 12.5,
        gear: 3,
        ..CarState::default()
    }
}

// ========================================================================
// Handshake and negotiation
// ========================================================================

#[test]
fn test_black_box_orders_are_accepted() {
    let (mut session, mut peer) = new_session(OrderSource::Remote, SessionMode::Synchronous);
    peer.open_with_orders(&["Speed", "Gear"], &["Steer", "Brake"]);

    session.initialize().expect("session initializes");

    assert_eq!(session.variable_order(), Some(&steer_brake_order()));
    assert_eq!(
        session.action_axes(),
        [DecisionAxis::Steer, DecisionAxis::Brake]
    );
    assert_eq!(peer.receive(), Ok(ProtocolMessage::Ok));
}

#[test]
fn test_wrong_handshake_token_fails() {
    let (mut session, mut peer) = new_session(OrderSource::Remote, SessionMode::Synchronous);
    peer.send_values(&["HELLO"]);

    let result = session.initialize();

    assert!(result.is_err());
    match result {
        Err(ProtocolError::HandshakeFailed { expected, got }) => {
            assert_eq!(expected, "AI ACTIVE");
            assert!(got.contains("HELLO"));
        }
        _ => panic!("Expected HandshakeFailed error"),
    }
    assert_eq!(session.state(), SessionState::Disconnected);
    assert!(!session.is_connected());
}

#[test]
fn test_peer_gone_before_handshake_is_connection_closed() {
    let (mut session, mut peer) = new_session(OrderSource::Remote, SessionMode::Synchronous);
    peer.close();

    let result = session.initialize();

    assert!(matches!(&result, Err(error) if error.is_connection_closed()));
}

#[test]
fn test_values_before_data_order_is_rejected() {
    let (mut session, mut peer) = new_session(OrderSource::Remote, SessionMode::Synchronous);
    peer.send(ProtocolMessage::Handshake);
    peer.send_values(&["12.5", "3"]);

    let result = session.initialize();

    assert!(matches!(result, Err(ProtocolError::MissingDataOrder { .. })));
    assert!(session.variable_order().is_none());
}

#[test]
fn test_second_data_order_is_rejected() {
    let (mut session, mut peer) = new_session(OrderSource::Remote, SessionMode::Synchronous);
    peer.send(ProtocolMessage::Handshake);
    peer.send(ProtocolMessage::DataOrder(strings(&["Speed"])));
    peer.send(ProtocolMessage::DataOrder(strings(&["Gear"])));

    assert_eq!(session.initialize(), Err(ProtocolError::AlreadyNegotiated));
}

#[test]
fn test_data_order_without_action_order_is_rejected() {
    let (mut session, mut peer) = new_session(OrderSource::Remote, SessionMode::Synchronous);
    peer.send(ProtocolMessage::Handshake);
    peer.send(ProtocolMessage::DataOrder(strings(&["Speed"])));
    peer.send_values(&["1.0"]);

    assert!(matches!(
        session.initialize(),
        Err(ProtocolError::MissingActionOrder { .. })
    ));
}

#[test]
fn test_unknown_action_is_rejected() {
    let (mut session, mut peer) = new_session(OrderSource::Remote, SessionMode::Synchronous);
    peer.open_with_orders(&["Speed"], &["Steer", "Turbo"]);

    let result = session.initialize();

    assert!(result.is_err());
    match result {
        Err(ProtocolError::UnknownAction { name }) => assert_eq!(name, "Turbo"),
        _ => panic!("Expected UnknownAction error"),
    }
}

#[test]
fn test_local_order_with_unknown_action_sends_nothing() {
    let order = VariableOrder::new(["Speed"], ["Hover"]);
    let (mut session, mut peer) = new_session(OrderSource::Local(order), SessionMode::Synchronous);
    peer.send(ProtocolMessage::Handshake);

    assert!(matches!(
        session.initialize(),
        Err(ProtocolError::UnknownAction { .. })
    ));
    // Only the handshake answer went out before the failure
    assert_eq!(peer.receive(), Ok(ProtocolMessage::Ok));
    assert!(peer.receive().is_err());
}

#[test]
fn test_initialize_twice_is_rejected() {
    let (mut session, _peer) = ready_session(SessionMode::Synchronous);

    assert_eq!(session.initialize(), Err(ProtocolError::AlreadyNegotiated));
}

// ========================================================================
// Tick requests, synchronous mode
// ========================================================================

#[test]
fn test_state_is_sent_in_data_order() {
    let (mut session, mut peer) = ready_session(SessionMode::Synchronous);
    peer.send_values(&["0.25", "0"]);

    let reply = session.decide(&car(), 4).expect("tick 4").expect("reply");

    assert_eq!(reply.tick, 4);
    assert_eq!(peer.receive(), Ok(ProtocolMessage::Values(strings(&["12.5", "3"]))));
    assert_eq!(session.state(), SessionState::Ready);
}

#[test]
fn test_unparsable_decision_is_skipped_not_fatal() {
    let (mut session, mut peer) = ready_session(SessionMode::Synchronous);
    peer.send_values(&["notafloat", "2.0"]);

    let reply = session.decide(&car(), 7).expect("tick 7").expect("reply");

    assert_eq!(reply.tick, 7);
    assert!(reply.decisions.contains_steer());
    assert!(reply.decisions.get_steer_amount().is_nan());
    assert!(reply.decisions.contains_brake());
    assert_eq!(reply.decisions.get_brake_amount(), 2.0);

    let mut executor = InterventionFactory::create_intervention_executor(InterventionType::SharedControl);
    let mut sink = RecordingSink::new();
    executor.run_decision(&reply.decisions.active_decisions(), AllowedActions::all(), &mut sink);

    assert_eq!(sink.indications, vec![Indication::Brake { amount: 2.0 }]);
    assert_eq!(sink.commands, vec![ControlCommand::Brake(1.0)]);

    // The session keeps going
    peer.send_values(&["0.1", "0"]);
    assert!(session.decide(&car(), 8).expect("tick 8").is_some());
}

#[test]
fn test_wrong_value_count_is_a_framing_error() {
    let (mut session, mut peer) = ready_session(SessionMode::Synchronous);
    peer.send_values(&["0.1", "0.2", "0.3"]);

    let result = session.decide(&car(), 0);

    assert_eq!(
        result,
        Err(ProtocolError::FieldCountMismatch {
            expected: 2,
            got: 3
        })
    );
}

#[test]
fn test_second_request_while_waiting_is_rejected() {
    let (mut session, _peer) = ready_session(SessionMode::Synchronous);

    assert_eq!(session.send_state(&car(), 0), Ok(true));
    assert_eq!(session.send_state(&car(), 1), Err(ProtocolError::RequestInFlight));
}

#[test]
fn test_order_message_after_negotiation_is_rejected() {
    let (mut session, mut peer) = ready_session(SessionMode::Synchronous);
    peer.send(ProtocolMessage::ActionOrder(strings(&["Accel"])));

    assert_eq!(session.decide(&car(), 0), Err(ProtocolError::AlreadyNegotiated));
}

#[test]
fn test_snapshot_missing_a_field_is_rejected() {
    let (mut session, mut peer) = new_session(OrderSource::Remote, SessionMode::Synchronous);
    peer.open_with_orders(&["Speed", "Altitude"], &["Steer"]);
    session.initialize().expect("session initializes");

    let result = session.send_state(&car(), 0);

    assert!(result.is_err());
    match result {
        Err(ProtocolError::MissingField { name }) => assert_eq!(name, "Altitude"),
        _ => panic!("Expected MissingField error"),
    }
}

#[test]
fn test_black_box_gone_mid_session() {
    let (mut session, mut peer) = ready_session(SessionMode::Synchronous);
    peer.close();

    let result = session.decide(&car(), 0);

    assert!(matches!(&result, Err(error) if error.is_connection_closed()));
}

// ========================================================================
// Tick requests, asynchronous mode
// ========================================================================

#[test]
fn test_async_reports_no_decision_until_reply_arrives() {
    let (mut session, mut peer) = ready_session(SessionMode::Asynchronous);

    // Tick 0: nothing outstanding yet, so just a request goes out
    assert_eq!(session.decide(&car(), 0), Ok(None));
    assert_eq!(peer.receive(), Ok(ProtocolMessage::Values(strings(&["12.5", "3"]))));

    // Tick 1: no reply yet, and no second request either
    assert_eq!(session.decide(&car(), 1), Ok(None));
    assert_eq!(session.state(), SessionState::AwaitingDecision);
    assert_eq!(peer.try_receive(), Ok(None));

    // Tick 2: the reply to tick 0 is picked up and tick 2 is requested
    peer.send_values(&["-0.5", "0"]);
    let reply = session.decide(&car(), 2).expect("tick 2").expect("reply");
    assert_eq!(reply.tick, 0);
    assert_eq!(reply.decisions.get_steer_amount(), -0.5);
    assert!(peer.receive().is_ok());
    assert_eq!(session.state(), SessionState::AwaitingDecision);
}

#[test]
fn test_async_send_while_waiting_is_skipped() {
    let (mut session, _peer) = ready_session(SessionMode::Asynchronous);

    assert_eq!(session.send_state(&car(), 0), Ok(true));
    assert_eq!(session.send_state(&car(), 1), Ok(false));
    assert_eq!(session.get_decisions(), Ok(None));
}

#[test]
fn test_async_exchange_reports_whether_state_went_out() {
    let (mut session, mut peer) = ready_session(SessionMode::Asynchronous);

    let first = session.exchange(&car(), 0).expect("tick 0");
    assert!(first.sent);
    assert!(first.reply.is_none());

    let second = session.exchange(&car(), 1).expect("tick 1");
    assert!(!second.sent);
    assert!(second.reply.is_none());

    peer.receive().expect("tick 0 request");
    peer.send_values(&["0.2", "0"]);
    let third = session.exchange(&car(), 2).expect("tick 2");
    assert!(third.sent);
    assert_eq!(third.reply.map(|reply| reply.tick), Some(0));
}

// ========================================================================
// Stop
// ========================================================================

#[test]
fn test_stop_discards_late_reply() {
    let (mut session, mut peer) = ready_session(SessionMode::Asynchronous);
    assert_eq!(session.send_state(&car(), 0), Ok(true));
    peer.send_values(&["0.3", "0"]);
    peer.send(ProtocolMessage::Ok);

    session.stop().expect("clean stop");

    assert_eq!(session.state(), SessionState::Disconnected);
    assert!(!session.is_connected());
    assert!(matches!(peer.receive(), Ok(ProtocolMessage::Values(_))));
    assert_eq!(peer.receive(), Ok(ProtocolMessage::Stop));

    // Stopping again is a no-op
    assert_eq!(session.stop(), Ok(()));
}

#[test]
fn test_stop_without_ok_reports_closed_connection() {
    let (mut session, mut peer) = ready_session(SessionMode::Synchronous);
    peer.close();

    let result = session.stop();

    assert!(result.is_err());
    assert_eq!(session.state(), SessionState::Disconnected);
}

#[test]
fn test_requests_after_stop_are_rejected() {
    let (mut session, mut peer) = ready_session(SessionMode::Synchronous);
    peer.send(ProtocolMessage::Ok);
    session.stop().expect("clean stop");

    assert_eq!(
        session.send_state(&car(), 0),
        Err(ProtocolError::NotReady {
            state: SessionState::Disconnected
        })
    );
}
