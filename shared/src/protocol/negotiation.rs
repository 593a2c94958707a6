use log::info;

use crate::transport::Transport;

use super::{
    error::ProtocolError, message::ProtocolMessage, message_channel::MessageChannel,
    variable_order::VariableOrder,
};

/// Proposes the variable orders: DATAORDER first, then ACTIONORDER
pub fn send_orders<T: Transport>(
    channel: &mut MessageChannel<T>,
    order: &VariableOrder,
) -> Result<(), ProtocolError> {
    order.validate()?;
    channel.send(&ProtocolMessage::DataOrder(order.data_order().to_vec()))?;
    channel.send(&ProtocolMessage::ActionOrder(order.action_order().to_vec()))?;
    info!(
        "Proposed orders: data {:?}, actions {:?}",
        order.data_order(),
        order.action_order()
    );
    Ok(())
}

/// Receives the variable orders proposed by the peer.
///
/// Anything other than DATAORDER followed by ACTIONORDER is a protocol
/// violation; nothing is defaulted.
pub fn receive_orders<T: Transport>(
    channel: &mut MessageChannel<T>,
) -> Result<VariableOrder, ProtocolError> {
    let data_order = match channel.await_message()? {
        ProtocolMessage::DataOrder(names) => names,
        other => {
            return Err(ProtocolError::MissingDataOrder {
                got: other.to_string(),
            })
        }
    };
    let action_order = match channel.await_message()? {
        ProtocolMessage::ActionOrder(names) => names,
        ProtocolMessage::DataOrder(_) => return Err(ProtocolError::AlreadyNegotiated),
        other => {
            return Err(ProtocolError::MissingActionOrder {
                got: other.to_string(),
            })
        }
    };

    let order = VariableOrder::new(data_order, action_order);
    order.validate()?;
    info!(
        "Accepted orders: data {:?}, actions {:?}",
        order.data_order(),
        order.action_order()
    );
    Ok(order)
}
