use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::config::ServiceWindow;

use super::error::ValidationFault;

/// Validate a candidate slot against the business rules and combine the
/// separately supplied date and time into one instant.
///
/// Pure function of its inputs and the supplied `now`. Rules are evaluated
/// independently and every violation is reported:
/// - a time-of-day is required;
/// - the combined instant must be strictly later than `now`;
/// - the time must lie within the closed service window.
pub fn validate_slot(
    date: NaiveDate,
    time: Option<NaiveTime>,
    now: NaiveDateTime,
    window: &ServiceWindow,
) -> Result<NaiveDateTime, Vec<ValidationFault>> {
    let mut faults = Vec::new();

    let Some(time) = time else {
        return Err(vec![ValidationFault::TimeMissing]);
    };

    let combined = date.and_time(time);
    if combined <= now {
        faults.push(ValidationFault::InstantNotInFuture);
    }
    if !window.contains(time) {
        faults.push(ValidationFault::OutsideServiceWindow {
            opens: window.opens,
            closes: window.closes,
        });
    }

    if faults.is_empty() { Ok(combined) } else { Err(faults) }
}
