use std::sync::Arc;

use chrono::Utc;
use ulid::Ulid;

use crate::config::UnknownOccasionPolicy;
use crate::model::{
    Actor, Cancellation, CustomerIdentity, Reservation, ReservationId, ReservationRequest,
};
use crate::notify;
use crate::notify::OutboundMessage;
use crate::observability::{
    BOOKINGS_CONFIRMED_TOTAL, BOOKINGS_REJECTED_TOTAL, CANCELLATIONS_TOTAL, rejection_label,
};

use super::error::ValidationFault;
use super::{Engine, EngineError, cancellation, now_local, pricing, slot};

impl Engine {
    /// Draft → Confirmed | Rejected. On success the reservation is persisted
    /// with its price frozen, and confirmation notifications are dispatched
    /// best-effort.
    pub async fn create_reservation(
        &self,
        request: ReservationRequest,
        identity: Option<&CustomerIdentity>,
    ) -> Result<Reservation, EngineError> {
        match self.admit(request, identity).await {
            Ok(reservation) => {
                metrics::counter!(BOOKINGS_CONFIRMED_TOTAL).increment(1);
                Ok(reservation)
            }
            Err(err) => {
                metrics::counter!(BOOKINGS_REJECTED_TOTAL, "reason" => rejection_label(&err))
                    .increment(1);
                tracing::debug!(error = %err, "reservation rejected");
                Err(err)
            }
        }
    }

    async fn admit(
        &self,
        mut request: ReservationRequest,
        identity: Option<&CustomerIdentity>,
    ) -> Result<Reservation, EngineError> {
        prefill_identity(&mut request, identity);
        trim_contact(&mut request);

        // Every rule is evaluated so the rejection carries the full list of
        // faults, not just the first.
        let mut faults = self.request_faults(&request);
        let reserved_at = match slot::validate_slot(
            request.date,
            request.time,
            now_local(),
            &self.config.service_window,
        ) {
            Ok(at) => Some(at),
            Err(mut slot_faults) => {
                faults.append(&mut slot_faults);
                None
            }
        };
        let Some(reserved_at) = reserved_at.filter(|_| faults.is_empty()) else {
            return Err(EngineError::Validation(faults));
        };

        let table = self.find_bookable_table(request.table_id).await?;
        let quote = pricing::quote(
            &table,
            request.occasion,
            request.party_size,
            &self.catalog,
            self.config.base_price_floor,
        );

        if self.is_slot_taken(request.table_id, reserved_at).await? {
            return Err(EngineError::Conflict { table_id: request.table_id, reserved_at });
        }

        let reservation = Reservation {
            id: Ulid::new(),
            customer_name: request.customer_name,
            customer_email: request.customer_email,
            customer_phone: request.customer_phone,
            reserved_at,
            party_size: request.party_size,
            table_id: request.table_id,
            notes: request.notes,
            occasion: request.occasion,
            total_price: quote.total,
            cancellation: None,
        };

        // The probe above is optimistic. The store's uniqueness constraint
        // on (table, instant) is the authoritative check: a concurrent
        // insert that slipped past the probe surfaces here as a conflict.
        self.store
            .insert_reservation(reservation.clone(), self.config.conflict_scope)
            .await?;

        tracing::info!(
            reservation = %reservation.id,
            table = %table.id,
            at = %reserved_at,
            total = %quote.total,
            "reservation confirmed"
        );

        let mut messages = vec![notify::booking_confirmation(
            &self.config.venue_name,
            &reservation,
            &table,
            &quote,
        )];
        if let Some(notify_to) = &self.config.notification_email {
            messages.push(notify::booking_internal_copy(
                &self.config.venue_name,
                notify_to,
                &reservation,
                &table,
                &quote,
            ));
        }
        self.dispatch(messages);

        Ok(reservation)
    }

    /// Confirmed → Cancelled. Stamps the reservation with the settlement and
    /// freezes the (possibly first-computed) total.
    pub async fn cancel_reservation(
        &self,
        id: ReservationId,
        actor: &Actor,
    ) -> Result<Reservation, EngineError> {
        let mut reservation = self
            .store
            .get_reservation(id)
            .await?
            .ok_or(EngineError::NotFound(id))?;

        cancellation::authorize(&reservation, actor)?;
        if reservation.is_cancelled() {
            return Err(EngineError::AlreadyCancelled(id));
        }

        let table = self.store.find_table(reservation.table_id).await?;
        let total = pricing::effective_total(
            &reservation,
            table.as_ref(),
            &self.catalog,
            self.config.base_price_floor,
        );
        let (fee, refund) = cancellation::settlement(total, self.config.cancellation_fee_rate);

        reservation.total_price = total;
        reservation.cancellation = Some(Cancellation {
            cancelled_at: Utc::now(),
            fee,
            refund,
        });
        self.store.update_reservation(reservation.clone()).await?;

        metrics::counter!(CANCELLATIONS_TOTAL).increment(1);
        tracing::info!(reservation = %id, %fee, %refund, "reservation cancelled");

        self.dispatch(vec![notify::cancellation_confirmation(
            &self.config.venue_name,
            &reservation,
            table.as_ref().map(|t| t.name.as_str()),
            total,
            fee,
            refund,
        )]);

        Ok(reservation)
    }

    fn request_faults(&self, request: &ReservationRequest) -> Vec<ValidationFault> {
        let mut faults = Vec::new();
        if request.customer_name.is_empty() {
            faults.push(ValidationFault::CustomerNameMissing);
        }
        if request.customer_email.is_empty() {
            faults.push(ValidationFault::CustomerEmailMissing);
        }
        if request.customer_phone.is_empty() {
            faults.push(ValidationFault::CustomerPhoneMissing);
        }
        if request.party_size < self.config.min_party_size
            || request.party_size > self.config.max_party_size
        {
            faults.push(ValidationFault::PartySizeOutOfRange {
                given: request.party_size,
                min: self.config.min_party_size,
                max: self.config.max_party_size,
            });
        }
        if self.config.unknown_occasion_policy == UnknownOccasionPolicy::Reject
            && !self.catalog.is_priced(request.occasion)
        {
            faults.push(ValidationFault::OccasionNotPriced(request.occasion));
        }
        faults
    }

    /// Hand messages to the notifier on a detached task: at-most-once,
    /// decoupled from the committed write, failures logged by the notifier.
    fn dispatch(&self, messages: Vec<OutboundMessage>) {
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            for message in messages {
                notifier.send(message).await;
            }
        });
    }
}

/// Consolidated pre-fill for signed-in customers: the account email always
/// wins, name and phone only fill blanks.
fn prefill_identity(request: &mut ReservationRequest, identity: Option<&CustomerIdentity>) {
    let Some(identity) = identity else { return };
    if let Some(email) = &identity.email {
        request.customer_email = email.clone();
    }
    if request.customer_name.trim().is_empty()
        && let Some(name) = &identity.name
    {
        request.customer_name = name.clone();
    }
    if request.customer_phone.trim().is_empty()
        && let Some(phone) = &identity.phone
    {
        request.customer_phone = phone.clone();
    }
}

fn trim_contact(request: &mut ReservationRequest) {
    request.customer_name = request.customer_name.trim().to_string();
    request.customer_email = request.customer_email.trim().to_string();
    request.customer_phone = request.customer_phone.trim().to_string();
}
