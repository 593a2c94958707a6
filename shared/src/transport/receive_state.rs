/// Where a socket is in its receive cycle.
///
/// `Empty -> Receiving` when an async receive starts, `Receiving -> Received`
/// or `Receiving -> Error` when the worker finishes, and back to `Empty` once
/// the data is consumed. `Error` is sticky until the socket is disconnected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ReceiveState {
    #[default]
    Empty,
    Receiving,
    Received,
    Error,
}
