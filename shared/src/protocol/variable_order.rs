use std::collections::HashSet;

use super::{error::ProtocolError, markers};

/// The two field-name sequences fixed for a session: what the simulator
/// sends each tick and what the black box returns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableOrder {
    data_order: Vec<String>,
    action_order: Vec<String>,
}

impl VariableOrder {
    pub fn new<D, A>(data_order: D, action_order: A) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        Self {
            data_order: data_order.into_iter().map(Into::into).collect(),
            action_order: action_order.into_iter().map(Into::into).collect(),
        }
    }

    pub fn data_order(&self) -> &[String] {
        &self.data_order
    }

    pub fn action_order(&self) -> &[String] {
        &self.action_order
    }

    /// Both orders non-empty, no name listed twice within one order
    pub fn validate(&self) -> Result<(), ProtocolError> {
        validate_names(markers::DATA_ORDER, &self.data_order)?;
        validate_names(markers::ACTION_ORDER, &self.action_order)
    }
}

fn validate_names(order: &'static str, names: &[String]) -> Result<(), ProtocolError> {
    if names.is_empty() {
        return Err(ProtocolError::EmptyOrder { order });
    }
    let mut seen = HashSet::with_capacity(names.len());
    for name in names {
        if !seen.insert(name.as_str()) {
            return Err(ProtocolError::DuplicateName {
                order,
                name: name.clone(),
            });
        }
    }
    Ok(())
}

/// Which endpoint proposes the variable orders
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OrderSource {
    /// This endpoint sends DATAORDER and ACTIONORDER
    Local(VariableOrder),
    /// This endpoint receives and validates them
    Remote,
}
