use super::{axis::DecisionAxis, decision::Decision};

/// All decisions of one tick.
///
/// Each axis carries a value and a separate "contains" flag: 0 is a legal
/// decision, so an unset axis is not the same as a zero one. The order in
/// which axes were set is kept so `active_decisions` can list them
/// most-recent first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DecisionTuple {
    amounts: [f32; 5],
    // 0 = not set, otherwise the set sequence number
    set_order: [u32; 5],
    sets: u32,
}

impl DecisionTuple {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value and the contains flag of `axis`
    pub fn set(&mut self, axis: DecisionAxis, amount: f32) {
        self.sets += 1;
        self.amounts[axis.index()] = amount;
        self.set_order[axis.index()] = self.sets;
    }

    pub fn contains(&self, axis: DecisionAxis) -> bool {
        self.set_order[axis.index()] != 0
    }

    /// The stored value, set or not. Check `contains` first.
    pub fn amount(&self, axis: DecisionAxis) -> f32 {
        self.amounts[axis.index()]
    }

    pub fn get(&self, axis: DecisionAxis) -> Option<Decision> {
        self.contains(axis)
            .then(|| Decision::new(axis, self.amount(axis)))
    }

    pub fn set_accel_decision(&mut self, amount: f32) {
        self.set(DecisionAxis::Accel, amount);
    }

    pub fn set_brake_decision(&mut self, amount: f32) {
        self.set(DecisionAxis::Brake, amount);
    }

    pub fn set_steer_decision(&mut self, amount: f32) {
        self.set(DecisionAxis::Steer, amount);
    }

    pub fn set_gear_decision(&mut self, amount: f32) {
        self.set(DecisionAxis::Gear, amount);
    }

    pub fn set_lights_decision(&mut self, amount: f32) {
        self.set(DecisionAxis::Lights, amount);
    }

    pub fn contains_accel(&self) -> bool {
        self.contains(DecisionAxis::Accel)
    }

    pub fn contains_brake(&self) -> bool {
        self.contains(DecisionAxis::Brake)
    }

    pub fn contains_steer(&self) -> bool {
        self.contains(DecisionAxis::Steer)
    }

    pub fn contains_gear(&self) -> bool {
        self.contains(DecisionAxis::Gear)
    }

    pub fn contains_lights(&self) -> bool {
        self.contains(DecisionAxis::Lights)
    }

    pub fn get_accel_amount(&self) -> f32 {
        self.amount(DecisionAxis::Accel)
    }

    pub fn get_brake_amount(&self) -> f32 {
        self.amount(DecisionAxis::Brake)
    }

    pub fn get_steer_amount(&self) -> f32 {
        self.amount(DecisionAxis::Steer)
    }

    pub fn get_gear_amount(&self) -> f32 {
        self.amount(DecisionAxis::Gear)
    }

    pub fn get_lights_amount(&self) -> f32 {
        self.amount(DecisionAxis::Lights)
    }

    /// The set axes, most recently set first
    pub fn active_decisions(&self) -> Vec<Decision> {
        let mut active: Vec<(u32, Decision)> = DecisionAxis::ALL
            .into_iter()
            .filter(|axis| self.contains(*axis))
            .map(|axis| {
                (
                    self.set_order[axis.index()],
                    Decision::new(axis, self.amount(axis)),
                )
            })
            .collect();
        active.sort_by(|a, b| b.0.cmp(&a.0));
        active.into_iter().map(|(_, decision)| decision).collect()
    }

    pub fn active_count(&self) -> usize {
        self.set_order.iter().filter(|order| **order != 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }
}
