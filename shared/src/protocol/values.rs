use std::collections::HashSet;

use crate::{
    decision::{axis::DecisionAxis, decision_tuple::DecisionTuple},
    snapshot::DrivingSnapshot,
};

use super::{error::ProtocolError, markers, message::ProtocolMessage};

/// Builds the tick request: one printable value per DATAORDER field, in order
pub fn encode_snapshot<S: DrivingSnapshot + ?Sized>(
    snapshot: &S,
    data_order: &[String],
) -> Result<ProtocolMessage, ProtocolError> {
    let values = data_order
        .iter()
        .map(|name| {
            snapshot
                .value(name)
                .ok_or_else(|| ProtocolError::MissingField { name: name.clone() })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ProtocolMessage::Values(values))
}

/// Parses one decision value. Anything unparsable becomes NaN; the policy
/// layer treats NaN as "axis not usable this tick".
pub fn parse_decision_value(axis: DecisionAxis, raw: &str) -> f32 {
    let raw = raw.trim();
    if let Ok(value) = raw.parse::<f32>() {
        return value;
    }
    if axis == DecisionAxis::Lights {
        match raw.to_ascii_lowercase().as_str() {
            "true" | "on" => return 1.0,
            "false" | "off" => return 0.0,
            _ => {}
        }
    }
    f32::NAN
}

/// Maps ACTIONORDER names onto decision axes
pub fn resolve_action_order(names: &[String]) -> Result<Vec<DecisionAxis>, ProtocolError> {
    if names.is_empty() {
        return Err(ProtocolError::EmptyOrder {
            order: markers::ACTION_ORDER,
        });
    }
    let mut seen = HashSet::with_capacity(names.len());
    names
        .iter()
        .map(|name| {
            let axis = name
                .parse::<DecisionAxis>()
                .map_err(|_| ProtocolError::UnknownAction { name: name.clone() })?;
            if !seen.insert(axis) {
                return Err(ProtocolError::DuplicateName {
                    order: markers::ACTION_ORDER,
                    name: name.clone(),
                });
            }
            Ok(axis)
        })
        .collect()
}

/// Builds the tick's `DecisionTuple` from a reply. The reply must carry
/// exactly one value per negotiated action.
pub fn decode_decisions(
    axes: &[DecisionAxis],
    values: &[String],
) -> Result<DecisionTuple, ProtocolError> {
    if values.len() != axes.len() {
        return Err(ProtocolError::FieldCountMismatch {
            expected: axes.len(),
            got: values.len(),
        });
    }
    let mut decisions = DecisionTuple::new();
    for (axis, raw) in axes.iter().zip(values) {
        decisions.set(*axis, parse_decision_value(*axis, raw));
    }
    Ok(decisions)
}
