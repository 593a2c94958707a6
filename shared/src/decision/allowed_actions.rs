use super::axis::DecisionAxis;

/// Set of axes the black box may override. Indications are never gated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct AllowedActions(u8);

impl AllowedActions {
    pub const NONE: AllowedActions = AllowedActions(0);

    pub fn all() -> Self {
        Self::from_axes(DecisionAxis::ALL)
    }

    pub fn from_axes<I: IntoIterator<Item = DecisionAxis>>(axes: I) -> Self {
        let mut allowed = Self::NONE;
        for axis in axes {
            allowed.insert(axis);
        }
        allowed
    }

    /// Unknown bits are ignored
    pub fn from_bits(bits: u8) -> Self {
        Self(bits & Self::all().0)
    }

    pub fn bits(&self) -> u8 {
        self.0
    }

    pub fn allows(&self, axis: DecisionAxis) -> bool {
        self.0 & bit(axis) != 0
    }

    pub fn insert(&mut self, axis: DecisionAxis) {
        self.0 |= bit(axis);
    }

    pub fn remove(&mut self, axis: DecisionAxis) {
        self.0 &= !bit(axis);
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

fn bit(axis: DecisionAxis) -> u8 {
    1 << axis.index()
}
