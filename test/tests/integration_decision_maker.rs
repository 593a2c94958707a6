//! DecisionMaker tests: lifecycle, policy switching, recording gates and
//! teardown on failure. The black box is driven by hand over an in-memory
//! transport.

use blackbox_server::{
    BlackBoxError, DataCollectionSettings, DecisionMaker, DecisionMakerConfig, InterventionType,
    Recorder, RecorderError, SessionConfig, SessionMode,
};
use blackbox_shared::{
    AllowedActions, CarState, ControlCommand, DecisionAxis, Indication, OrderSource,
    ProtocolError, ProtocolMessage, VariableOrder,
};
use blackbox_test::{
    FailingRecorder, LocalSocketPair, LocalTransport, MemoryRecorder, RawPeer, RecordingSink,
};

fn config(intervention_type: InterventionType, mode: SessionMode) -> DecisionMakerConfig {
    DecisionMakerConfig {
        session: SessionConfig {
            mode,
            orders: OrderSource::Local(VariableOrder::new(["Speed", "Gear"], ["Steer", "Brake"])),
            ..SessionConfig::default()
        },
        intervention_type,
        ..DecisionMakerConfig::default()
    }
}

/// Initialized maker plus the black-box peer, negotiation traffic drained
fn started(
    config: DecisionMakerConfig,
    recorder: Option<Box<dyn Recorder>>,
) -> (DecisionMaker<LocalTransport>, RawPeer) {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init()
        .ok();

    let LocalSocketPair { server, client } = LocalSocketPair::new();
    let mut peer = RawPeer::new(client);
    peer.send(ProtocolMessage::Handshake);

    let mut maker = DecisionMaker::new(config);
    if let Some(recorder) = recorder {
        maker = maker.with_recorder(recorder);
    }
    maker.initialize_with(server).expect("maker initializes");

    for _ in 0..3 {
        peer.receive().expect("negotiation traffic");
    }
    (maker, peer)
}

fn car() -> CarState {
    CarState {
        speed: 20.0,
        gear: 4,
        ..CarState::default()
    }
}

// ========================================================================
// Lifecycle
// ========================================================================

#[test]
fn test_decide_before_initialize_fails() {
    let mut maker: DecisionMaker<LocalTransport> = DecisionMaker::new(DecisionMakerConfig::default());
    let mut sink = RecordingSink::new();

    assert_eq!(
        maker.decide(&car(), 0, &mut sink),
        Err(BlackBoxError::NotInitialized)
    );
}

#[test]
fn test_initialize_twice_fails() {
    let (mut maker, _peer) = started(config(InterventionType::SharedControl, SessionMode::Synchronous), None);
    let LocalSocketPair { server, .. } = LocalSocketPair::new();

    assert_eq!(
        maker.initialize_with(server),
        Err(BlackBoxError::AlreadyInitialized)
    );
}

#[test]
fn test_protocol_error_tears_session_down() {
    let (mut maker, mut peer) = started(config(InterventionType::SharedControl, SessionMode::Synchronous), None);
    let mut sink = RecordingSink::new();
    peer.send_values(&["0.1", "0.2", "0.3"]);

    let result = maker.decide(&car(), 0, &mut sink);

    assert_eq!(
        result,
        Err(BlackBoxError::Protocol(ProtocolError::FieldCountMismatch {
            expected: 2,
            got: 3
        }))
    );
    assert!(!maker.is_initialized());
    assert_eq!(
        maker.decide(&car(), 1, &mut sink),
        Err(BlackBoxError::NotInitialized)
    );
    assert!(sink.indications.is_empty());
}

#[test]
fn test_shutdown_stops_black_box_and_is_idempotent() {
    let recorder = MemoryRecorder::new();
    let (mut maker, mut peer) = started(
        config(InterventionType::SharedControl, SessionMode::Synchronous),
        Some(Box::new(recorder.clone())),
    );
    peer.send(ProtocolMessage::Ok);

    assert_eq!(maker.shutdown_black_box(), Ok(()));
    assert_eq!(peer.receive(), Ok(ProtocolMessage::Stop));
    assert!(!maker.is_initialized());

    assert_eq!(maker.shutdown_black_box(), Ok(()));
    assert!(recorder.record().shutdowns >= 1);
}

// ========================================================================
// Decisions and policy
// ========================================================================

#[test]
fn test_async_first_tick_has_no_decision() {
    let (mut maker, mut peer) = started(config(InterventionType::SharedControl, SessionMode::Asynchronous), None);
    let mut sink = RecordingSink::new();

    assert_eq!(maker.decide(&car(), 0, &mut sink), Ok(false));
    assert!(maker.last_reply().is_none());

    peer.receive().expect("tick 0 request");
    peer.send_values(&["0.5", "0"]);

    assert_eq!(maker.decide(&car(), 1, &mut sink), Ok(true));
    assert_eq!(maker.last_reply().map(|reply| reply.tick), Some(0));
    assert_eq!(
        sink.commands,
        vec![ControlCommand::Brake(0.0), ControlCommand::Steer(0.5)]
    );
}

#[test]
fn test_change_settings_takes_effect_next_tick() {
    let (mut maker, mut peer) = started(config(InterventionType::NoSignals, SessionMode::Synchronous), None);
    let mut sink = RecordingSink::new();

    peer.send_values(&["0.5", "NaN"]);
    assert_eq!(maker.decide(&car(), 0, &mut sink), Ok(true));
    assert!(sink.indications.is_empty());
    assert!(sink.commands.is_empty());

    maker.change_settings(InterventionType::OnlySignals);
    assert_eq!(maker.config().intervention_type, InterventionType::OnlySignals);

    peer.send_values(&["0.5", "NaN"]);
    assert_eq!(maker.decide(&car(), 1, &mut sink), Ok(true));
    assert_eq!(sink.indications, vec![Indication::Steer { amount: 0.5 }]);
    assert!(sink.commands.is_empty());
}

#[test]
fn test_disallowed_axes_are_indicated_not_applied() {
    let (mut maker, mut peer) = started(config(InterventionType::SharedControl, SessionMode::Synchronous), None);
    let mut sink = RecordingSink::new();
    maker.set_allowed_actions(AllowedActions::from_axes([DecisionAxis::Brake]));

    peer.send_values(&["0.5", "0.25"]);
    assert_eq!(maker.decide(&car(), 0, &mut sink), Ok(true));

    assert_eq!(sink.decision_indications(), 2);
    assert_eq!(sink.commands, vec![ControlCommand::Brake(0.25)]);
}

#[test]
fn test_autonomous_cues_follow_allowed_axes() {
    let (mut maker, mut peer) = started(config(InterventionType::AutonomousAI, SessionMode::Synchronous), None);
    let mut sink = RecordingSink::new();
    maker.set_allowed_actions(AllowedActions::from_axes([DecisionAxis::Steer]));

    peer.send_values(&["0.1", "0.9"]);
    assert_eq!(maker.decide(&car(), 0, &mut sink), Ok(true));

    assert_eq!(sink.indications.last(), Some(&Indication::SteerStraight));
    assert!(!sink.indications.contains(&Indication::KeepAccelerating));
}

// ========================================================================
// Recording
// ========================================================================

#[test]
fn test_nothing_recorded_by_default() {
    let recorder = MemoryRecorder::new();
    let (mut maker, mut peer) = started(
        config(InterventionType::SharedControl, SessionMode::Synchronous),
        Some(Box::new(recorder.clone())),
    );
    let mut sink = RecordingSink::new();

    peer.send_values(&["0.5", "0"]);
    assert_eq!(maker.decide(&car(), 0, &mut sink), Ok(true));

    let record = recorder.record();
    assert!(record.meta.is_empty());
    assert!(record.states.is_empty());
    assert!(record.decisions.is_empty());
}

#[test]
fn test_enabled_collection_records_each_tick() {
    let recorder = MemoryRecorder::new();
    let mut settings = config(InterventionType::SharedControl, SessionMode::Synchronous);
    settings.data_collection = DataCollectionSettings::all();
    let (mut maker, mut peer) = started(settings, Some(Box::new(recorder.clone())));
    let mut sink = RecordingSink::new();

    for tick in 0..2 {
        peer.send_values(&["0.5", "0"]);
        assert_eq!(maker.decide(&car(), tick, &mut sink), Ok(true));
    }
    maker.save_data().expect("flush");

    let record = recorder.record();
    assert!(record
        .meta
        .iter()
        .any(|(key, value)| key == "intervention_type" && value == "SharedControl"));
    assert_eq!(record.states.len(), 2);
    assert_eq!(
        record.states[0].1,
        vec![
            ("Speed".to_string(), "20".to_string()),
            ("Gear".to_string(), "4".to_string()),
        ]
    );
    let ticks: Vec<u64> = record.decisions.iter().map(|(tick, _)| *tick).collect();
    assert_eq!(ticks, vec![0, 1]);
    assert_eq!(record.decisions[1].1.get_steer_amount(), 0.5);
    assert_eq!(record.flushes, 1);
}

#[test]
fn test_collection_settings_change_mid_session() {
    let recorder = MemoryRecorder::new();
    let (mut maker, mut peer) = started(
        config(InterventionType::NoSignals, SessionMode::Synchronous),
        Some(Box::new(recorder.clone())),
    );
    let mut sink = RecordingSink::new();

    peer.send_values(&["0.5", "0"]);
    maker.decide(&car(), 0, &mut sink).expect("tick 0");

    maker.set_data_collection_settings(DataCollectionSettings {
        intervention_data: true,
        ..DataCollectionSettings::default()
    });
    peer.send_values(&["0.5", "0"]);
    maker.decide(&car(), 1, &mut sink).expect("tick 1");

    let record = recorder.record();
    assert_eq!(record.decisions.len(), 1);
    assert_eq!(record.decisions[0].0, 1);
    assert!(record.states.is_empty());
}

#[test]
fn test_async_records_state_only_when_sent() {
    let recorder = MemoryRecorder::new();
    let mut settings = config(InterventionType::SharedControl, SessionMode::Asynchronous);
    settings.data_collection = DataCollectionSettings {
        car_data: true,
        ..DataCollectionSettings::default()
    };
    let (mut maker, mut peer) = started(settings, Some(Box::new(recorder.clone())));
    let mut sink = RecordingSink::new();

    // tick 0 goes out, tick 1 finds it unanswered
    assert_eq!(maker.decide(&car(), 0, &mut sink), Ok(false));
    assert_eq!(maker.decide(&car(), 1, &mut sink), Ok(false));
    peer.receive().expect("tick 0 request");
    assert_eq!(peer.try_receive(), Ok(None));

    peer.send_values(&["0.5", "0"]);
    assert_eq!(maker.decide(&car(), 2, &mut sink), Ok(true));
    peer.receive().expect("tick 2 request");

    let ticks: Vec<u64> = recorder.record().states.iter().map(|(tick, _)| *tick).collect();
    assert_eq!(ticks, vec![0, 2]);
}

#[test]
fn test_recorder_failure_still_applies_decisions() {
    let mut settings = config(InterventionType::SharedControl, SessionMode::Synchronous);
    settings.data_collection = DataCollectionSettings {
        intervention_data: true,
        ..DataCollectionSettings::default()
    };
    let (mut maker, mut peer) = started(settings, Some(Box::new(FailingRecorder)));
    let mut sink = RecordingSink::new();

    peer.send_values(&["0.5", "0.25"]);
    let result = maker.decide(&car(), 0, &mut sink);

    assert!(result.is_err());
    match result {
        Err(BlackBoxError::Recorder(RecorderError::Closed)) => {}
        _ => panic!("Expected Recorder(Closed) error"),
    }
    assert_eq!(
        sink.commands,
        vec![ControlCommand::Brake(0.25), ControlCommand::Steer(0.5)]
    );
    assert_eq!(maker.last_reply().map(|reply| reply.tick), Some(0));
    assert!(maker.is_initialized());

    // the session carries on with the next tick
    peer.send_values(&["0.1", "0"]);
    assert!(maker.decide(&car(), 1, &mut sink).is_err());
    assert_eq!(maker.last_reply().map(|reply| reply.tick), Some(1));
}
