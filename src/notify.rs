use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::mpsc;

use crate::engine::Quote;
use crate::model::{DiningTable, Reservation};
use crate::observability::NOTIFICATIONS_DROPPED_TOTAL;

/// A rendered outbound notification, ready for whatever delivery channel the
/// hosting layer wires up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// Fire-and-forget notification sink. Implementations swallow and log their
/// own failures; nothing propagates back into the booking transaction.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: OutboundMessage);
}

/// Hands messages to an unbounded channel so delivery runs fully decoupled
/// from the engine. If the receiving side is gone the message is dropped and
/// counted, never surfaced.
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<OutboundMessage>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<OutboundMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl Notifier for ChannelNotifier {
    async fn send(&self, message: OutboundMessage) {
        if message.to.trim().is_empty() {
            tracing::warn!(subject = %message.subject, "missing recipient, skipping notification");
            metrics::counter!(NOTIFICATIONS_DROPPED_TOTAL).increment(1);
            return;
        }
        if self.tx.send(message).is_err() {
            tracing::warn!("notification channel closed, dropping message");
            metrics::counter!(NOTIFICATIONS_DROPPED_TOTAL).increment(1);
        }
    }
}

/// Logs outbound messages instead of delivering them. Useful as a default
/// until the hosting layer supplies a real sink.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, message: OutboundMessage) {
        if message.to.trim().is_empty() {
            tracing::warn!(subject = %message.subject, "missing recipient, skipping notification");
            metrics::counter!(NOTIFICATIONS_DROPPED_TOTAL).increment(1);
            return;
        }
        tracing::info!(to = %message.to, subject = %message.subject, "notification");
    }
}

// ── Message builders ─────────────────────────────────────

fn notes_section(notes: Option<&str>) -> String {
    match notes.map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => "<em>No additional notes.</em>".to_string(),
    }
}

pub fn booking_confirmation(
    venue: &str,
    reservation: &Reservation,
    table: &DiningTable,
    quote: &Quote,
) -> OutboundMessage {
    let html_body = format!(
        "<h2>Your reservation is confirmed</h2>\
         <p>Hello {name},</p>\
         <p>Thank you for booking a table at {venue}! Here are the details of your reservation:</p>\
         <ul>\
         <li><strong>Date and time:</strong> {when}</li>\
         <li><strong>Table:</strong> {table} ({category})</li>\
         <li><strong>Party size:</strong> {party}</li>\
         <li><strong>Price per person (table):</strong> {table_pp:.2}</li>\
         <li><strong>Price per person (occasion):</strong> {occasion_pp:.2}</li>\
         <li><strong>Total due:</strong> {total:.2}</li>\
         <li><strong>Additional notes:</strong> {notes}</li>\
         </ul>\
         <p>We look forward to welcoming you! If you have any questions, feel free to contact us.</p>\
         <p>Kind regards,<br/>The {venue} team.</p>",
        name = reservation.customer_name,
        venue = venue,
        when = reservation.reserved_at.format("%d/%m/%Y %H:%M"),
        table = table.name,
        category = table.category.label(),
        party = reservation.party_size,
        table_pp = quote.table_price_per_person,
        occasion_pp = quote.occasion_price_per_person,
        total = quote.total,
        notes = notes_section(reservation.notes.as_deref()),
    );
    OutboundMessage {
        to: reservation.customer_email.clone(),
        subject: format!("[{venue}] Your reservation is confirmed"),
        html_body,
    }
}

/// Internal copy sent to the configured venue address for each new booking.
pub fn booking_internal_copy(
    venue: &str,
    notify_to: &str,
    reservation: &Reservation,
    table: &DiningTable,
    quote: &Quote,
) -> OutboundMessage {
    let html_body = format!(
        "<h2>New reservation received</h2>\
         <p>A new reservation was created through {venue}.</p>\
         <ul>\
         <li><strong>Customer:</strong> {name} ({email})</li>\
         <li><strong>Phone:</strong> {phone}</li>\
         <li><strong>Date and time:</strong> {when}</li>\
         <li><strong>Table:</strong> {table} ({category})</li>\
         <li><strong>Party size:</strong> {party}</li>\
         <li><strong>Price per person (table):</strong> {table_pp:.2}</li>\
         <li><strong>Price per person (occasion):</strong> {occasion_pp:.2}</li>\
         <li><strong>Total due:</strong> {total:.2}</li>\
         <li><strong>Notes:</strong> {notes}</li>\
         </ul>\
         <p>This message is sent automatically for internal confirmation.</p>",
        venue = venue,
        name = reservation.customer_name,
        email = reservation.customer_email,
        phone = reservation.customer_phone,
        when = reservation.reserved_at.format("%d/%m/%Y %H:%M"),
        table = table.name,
        category = table.category.label(),
        party = reservation.party_size,
        table_pp = quote.table_price_per_person,
        occasion_pp = quote.occasion_price_per_person,
        total = quote.total,
        notes = notes_section(reservation.notes.as_deref()),
    );
    OutboundMessage {
        to: notify_to.to_string(),
        subject: format!("[{venue}] New reservation received"),
        html_body,
    }
}

pub fn cancellation_confirmation(
    venue: &str,
    reservation: &Reservation,
    table_name: Option<&str>,
    total: Decimal,
    fee: Decimal,
    refund: Decimal,
) -> OutboundMessage {
    let html_body = format!(
        "<h2>Hello {name},</h2>\
         <p>Your reservation at <strong>{venue}</strong> has been cancelled.</p>\
         <ul>\
         <li><strong>Original date and time:</strong> {when}</li>\
         <li><strong>Table:</strong> {table}</li>\
         <li><strong>Original total:</strong> {total:.2}</li>\
         <li><strong>Cancellation fee:</strong> {fee:.2}</li>\
         <li><strong>Refunded amount:</strong> {refund:.2}</li>\
         </ul>\
         <p>The refund will be returned through your original payment method.</p>\
         <p>Thank you for your understanding.</p>",
        name = reservation.customer_name,
        venue = venue,
        when = reservation.reserved_at.format("%d/%m/%Y %H:%M"),
        table = table_name.unwrap_or("Table"),
        total = total,
        fee = fee,
        refund = refund,
    );
    OutboundMessage {
        to: reservation.customer_email.clone(),
        subject: format!("[{venue}] Your reservation has been cancelled"),
        html_body,
    }
}
