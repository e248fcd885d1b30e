use chrono::{NaiveDateTime, NaiveTime};
use ulid::Ulid;

use crate::model::{OccasionType, ReservationId, TableId};

/// One field-level reason a reservation request was rejected. Rules are
/// evaluated independently so a single rejection can carry several faults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationFault {
    TimeMissing,
    InstantNotInFuture,
    OutsideServiceWindow { opens: NaiveTime, closes: NaiveTime },
    PartySizeOutOfRange { given: u32, min: u32, max: u32 },
    CustomerNameMissing,
    CustomerEmailMissing,
    CustomerPhoneMissing,
    OccasionNotPriced(OccasionType),
}

impl ValidationFault {
    /// Request field the fault belongs to, for field-level re-prompting.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationFault::TimeMissing => "time",
            ValidationFault::InstantNotInFuture => "date",
            ValidationFault::OutsideServiceWindow { .. } => "time",
            ValidationFault::PartySizeOutOfRange { .. } => "party_size",
            ValidationFault::CustomerNameMissing => "customer_name",
            ValidationFault::CustomerEmailMissing => "customer_email",
            ValidationFault::CustomerPhoneMissing => "customer_phone",
            ValidationFault::OccasionNotPriced(_) => "occasion",
        }
    }
}

impl std::fmt::Display for ValidationFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationFault::TimeMissing => write!(f, "please choose a time"),
            ValidationFault::InstantNotInFuture => {
                write!(f, "the reservation must be in the future")
            }
            ValidationFault::OutsideServiceWindow { opens, closes } => {
                write!(
                    f,
                    "the time must be between {} and {}",
                    opens.format("%H:%M"),
                    closes.format("%H:%M")
                )
            }
            ValidationFault::PartySizeOutOfRange { given, min, max } => {
                write!(f, "party size {given} is outside the allowed range {min}-{max}")
            }
            ValidationFault::CustomerNameMissing => write!(f, "customer name is required"),
            ValidationFault::CustomerEmailMissing => write!(f, "customer email is required"),
            ValidationFault::CustomerPhoneMissing => write!(f, "customer phone is required"),
            ValidationFault::OccasionNotPriced(occasion) => {
                write!(f, "occasion \"{}\" has no configured price", occasion.label())
            }
        }
    }
}

#[derive(Debug)]
pub enum EngineError {
    /// Malformed request. Recoverable: re-prompt with the field-level
    /// reasons.
    Validation(Vec<ValidationFault>),
    /// Table or reservation missing (or table inactive).
    NotFound(Ulid),
    /// The table is already booked at that exact instant.
    Conflict {
        table_id: TableId,
        reserved_at: NaiveDateTime,
    },
    /// One-way transition violated: the reservation was already cancelled.
    AlreadyCancelled(ReservationId),
    /// Actor is not permitted to cancel this reservation.
    Unauthorized,
    /// Record store failure, retryable by the caller.
    Storage(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::Validation(faults) => {
                write!(f, "invalid reservation request:")?;
                for fault in faults {
                    write!(f, " [{}] {};", fault.field(), fault)?;
                }
                Ok(())
            }
            EngineError::NotFound(id) => write!(f, "not found: {id}"),
            EngineError::Conflict { table_id, reserved_at } => {
                write!(
                    f,
                    "table {table_id} is already booked at {}",
                    reserved_at.format("%d/%m/%Y %H:%M")
                )
            }
            EngineError::AlreadyCancelled(id) => {
                write!(f, "reservation {id} has already been cancelled")
            }
            EngineError::Unauthorized => write!(f, "not permitted to cancel this reservation"),
            EngineError::Storage(e) => write!(f, "record store failure: {e}"),
        }
    }
}

impl std::error::Error for EngineError {}
