//! Booking and event messages: confirmations sent after checkout and the
//! reminder variants the scheduler enqueues ahead of a start date.

use serde_json::Value;

use crate::fields::{local_part, number_or, text, text_or};

/// Sent once a booking is paid for and confirmed.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingConfirmation {
    pub customer_name: String,
    pub booking_number: String,
    pub gym_name: String,
    pub package_name: String,
    pub package_type: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub price_paid: f64,
    pub customer_phone: Option<String>,
    pub special_requests: Option<String>,
    pub booking_url: Option<String>,
}

/// Sent shortly before a booked package starts.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingReminder {
    pub customer_name: String,
    pub booking_number: String,
    pub gym_name: String,
    pub package_name: String,
    pub start_date: String,
    pub gym_address: Option<String>,
    pub booking_url: Option<String>,
}

/// Sent shortly before a one-off event (class, open day) starts.
#[derive(Debug, Clone, PartialEq)]
pub struct EventReminder {
    pub customer_name: String,
    pub event_name: String,
    pub gym_name: String,
    pub event_date: String,
    pub start_time: Option<String>,
    pub location: Option<String>,
}

pub fn confirmation(recipient: &str, meta: &Value) -> BookingConfirmation {
    BookingConfirmation {
        customer_name: text(meta, "customerName").unwrap_or_else(|| local_part(recipient)),
        booking_number: text_or(meta, "bookingNumber", ""),
        gym_name: text_or(meta, "gymName", ""),
        package_name: text_or(meta, "packageName", ""),
        package_type: text_or(meta, "packageType", ""),
        start_date: text_or(meta, "startDate", ""),
        end_date: text(meta, "endDate"),
        price_paid: number_or(meta, "pricePaid", 0.0),
        customer_phone: text(meta, "customerPhone"),
        special_requests: text(meta, "specialRequests"),
        booking_url: text(meta, "bookingUrl"),
    }
}

pub fn reminder(recipient: &str, meta: &Value) -> BookingReminder {
    BookingReminder {
        customer_name: text(meta, "customerName").unwrap_or_else(|| local_part(recipient)),
        booking_number: text_or(meta, "bookingNumber", ""),
        gym_name: text_or(meta, "gymName", ""),
        package_name: text_or(meta, "packageName", ""),
        start_date: text_or(meta, "startDate", ""),
        gym_address: text(meta, "gymAddress"),
        booking_url: text(meta, "bookingUrl"),
    }
}

pub fn event_reminder(recipient: &str, meta: &Value) -> EventReminder {
    EventReminder {
        customer_name: text(meta, "customerName").unwrap_or_else(|| local_part(recipient)),
        event_name: text_or(meta, "eventName", ""),
        gym_name: text_or(meta, "gymName", ""),
        event_date: text_or(meta, "eventDate", ""),
        start_time: text(meta, "startTime"),
        location: text(meta, "location"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_confirmation_full_metadata() {
        let meta = json!({
            "customerName": "Jane Doe",
            "bookingNumber": "BK-1042",
            "gymName": "Iron Temple",
            "packageName": "Monthly Unlimited",
            "packageType": "subscription",
            "startDate": "2026-09-01",
            "endDate": "2026-09-30",
            "pricePaid": "89.99",
            "customerPhone": "+31 6 1234 5678",
            "bookingUrl": "https://app.example.com/bookings/BK-1042"
        });
        let msg = confirmation("jane.doe@example.com", &meta);
        assert_eq!(msg.customer_name, "Jane Doe");
        assert_eq!(msg.price_paid, 89.99);
        assert_eq!(msg.end_date.as_deref(), Some("2026-09-30"));
        assert_eq!(msg.special_requests, None);
    }

    #[test]
    fn test_confirmation_empty_metadata_all_defaults() {
        let msg = confirmation("pete@example.com", &json!({}));
        assert_eq!(msg.customer_name, "pete");
        assert_eq!(msg.booking_number, "");
        assert_eq!(msg.price_paid, 0.0);
        assert_eq!(msg.end_date, None);
        assert_eq!(msg.booking_url, None);
    }

    #[test]
    fn test_reminder_numeric_booking_number_rendered() {
        let msg = reminder("pete@example.com", &json!({"bookingNumber": 1042}));
        assert_eq!(msg.booking_number, "1042");
    }

    #[test]
    fn test_event_reminder_optional_fields() {
        let meta = json!({
            "eventName": "Open Mat Saturday",
            "gymName": "Iron Temple",
            "eventDate": "2026-08-15",
            "startTime": "10:00"
        });
        let msg = event_reminder("pete@example.com", &meta);
        assert_eq!(msg.event_name, "Open Mat Saturday");
        assert_eq!(msg.start_time.as_deref(), Some("10:00"));
        assert_eq!(msg.location, None);
    }
}
