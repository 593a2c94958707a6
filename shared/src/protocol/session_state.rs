use std::fmt;

/// Lifecycle of one protocol session.
///
/// `Disconnected -> Handshaking -> Negotiating -> Ready <-> AwaitingDecision
/// -> Stopping -> Disconnected`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SessionState {
    #[default]
    Disconnected,
    Handshaking,
    Negotiating,
    Ready,
    AwaitingDecision,
    Stopping,
}

impl SessionState {
    /// Past negotiation and not yet stopping
    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::Ready | SessionState::AwaitingDecision)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Disconnected => "disconnected",
            SessionState::Handshaking => "handshaking",
            SessionState::Negotiating => "negotiating",
            SessionState::Ready => "ready",
            SessionState::AwaitingDecision => "awaiting a decision",
            SessionState::Stopping => "stopping",
        };
        f.write_str(name)
    }
}
