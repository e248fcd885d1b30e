use rust_decimal::Decimal;

use crate::model::{Actor, Reservation};

use super::error::EngineError;
use super::pricing::round_money;

/// Fee and refund for cancelling a reservation with the given total:
/// `fee = round(total × rate, 2)`, `refund = max(total − fee, 0)`.
pub fn settlement(total: Decimal, rate: Decimal) -> (Decimal, Decimal) {
    let fee = round_money(total * rate);
    let refund = (total - fee).max(Decimal::ZERO);
    (fee, refund)
}

/// Only the reservation's own customer (email match, case-insensitive) or an
/// administrative actor may cancel.
pub(super) fn authorize(reservation: &Reservation, actor: &Actor) -> Result<(), EngineError> {
    match actor {
        Actor::Admin => Ok(()),
        Actor::Customer { email } if email.eq_ignore_ascii_case(&reservation.customer_email) => {
            Ok(())
        }
        Actor::Customer { .. } => Err(EngineError::Unauthorized),
    }
}
