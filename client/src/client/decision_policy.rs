use blackbox_shared::DecisionTuple;

use super::data_frame::DataFrame;

/// Decides what to do with one tick's state.
///
/// Axes left unset in the returned tuple are sent as `NaN`, which the
/// simulator treats as "no usable decision" for that axis.
pub trait DecisionPolicy {
    fn decide(&mut self, frame: &DataFrame) -> DecisionTuple;
}

impl<F> DecisionPolicy for F
where
    F: FnMut(&DataFrame) -> DecisionTuple,
{
    fn decide(&mut self, frame: &DataFrame) -> DecisionTuple {
        self(frame)
    }
}
