//! Subject and HTML body rendering for the typed send functions.
//!
//! These are deliberately plain: transactional mail reads fine as simple
//! markup, and anything fancier belongs in the producing application, which
//! already pre-renders the generic fallback bodies.

use courier_messages::{
    AdminAlert, BookingConfirmation, BookingReminder, EventReminder, PartnerApproval,
    PartnerRejection, PaymentFailed, PaymentReceipt, Verification,
};

pub fn booking_confirmation(msg: &BookingConfirmation) -> (String, String) {
    let subject = format!("Booking confirmed: {}", msg.gym_name);

    let mut html = format!(
        "<h1>Your booking is confirmed</h1>\
         <p>Hi {},</p>\
         <p>Booking <strong>{}</strong> at <strong>{}</strong> is confirmed.</p>\
         <ul><li>Package: {} ({})</li><li>Starts: {}</li>",
        msg.customer_name, msg.booking_number, msg.gym_name, msg.package_name, msg.package_type,
        msg.start_date
    );
    if let Some(end) = &msg.end_date {
        html.push_str(&format!("<li>Ends: {end}</li>"));
    }
    html.push_str(&format!("<li>Paid: {:.2}</li></ul>", msg.price_paid));
    if let Some(requests) = &msg.special_requests {
        html.push_str(&format!("<p>Special requests: {requests}</p>"));
    }
    if let Some(url) = &msg.booking_url {
        html.push_str(&format!("<p><a href=\"{url}\">View your booking</a></p>"));
    }

    (subject, html)
}

pub fn booking_reminder(msg: &BookingReminder) -> (String, String) {
    let subject = format!("Reminder: your booking at {} starts soon", msg.gym_name);

    let mut html = format!(
        "<h1>See you soon</h1>\
         <p>Hi {},</p>\
         <p>Booking <strong>{}</strong> ({}) at <strong>{}</strong> starts on {}.</p>",
        msg.customer_name, msg.booking_number, msg.package_name, msg.gym_name, msg.start_date
    );
    if let Some(address) = &msg.gym_address {
        html.push_str(&format!("<p>Address: {address}</p>"));
    }
    if let Some(url) = &msg.booking_url {
        html.push_str(&format!("<p><a href=\"{url}\">View your booking</a></p>"));
    }

    (subject, html)
}

pub fn event_reminder(msg: &EventReminder) -> (String, String) {
    let subject = format!("Reminder: {} on {}", msg.event_name, msg.event_date);

    let mut html = format!(
        "<h1>{}</h1>\
         <p>Hi {},</p>\
         <p><strong>{}</strong> at {} takes place on {}",
        msg.event_name, msg.customer_name, msg.event_name, msg.gym_name, msg.event_date
    );
    if let Some(time) = &msg.start_time {
        html.push_str(&format!(" at {time}"));
    }
    html.push_str(".</p>");
    if let Some(location) = &msg.location {
        html.push_str(&format!("<p>Location: {location}</p>"));
    }

    (subject, html)
}

pub fn payment_receipt(msg: &PaymentReceipt) -> (String, String) {
    let subject = format!("Payment receipt {}", msg.transaction_number);

    let mut html = format!(
        "<h1>Payment received</h1>\
         <p>Hi {},</p>\
         <p>Transaction <strong>{}</strong> of {:.2} via {} on {}.</p>",
        msg.customer_name, msg.transaction_number, msg.amount, msg.method, msg.date
    );
    if !msg.items.is_empty() {
        html.push_str("<table><tr><th>Description</th><th>Qty</th><th>Amount</th></tr>");
        for item in &msg.items {
            let qty = item
                .quantity
                .map(|q| q.to_string())
                .unwrap_or_else(|| "-".to_string());
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{:.2}</td></tr>",
                item.description, qty, item.amount
            ));
        }
        html.push_str("</table>");
    }

    (subject, html)
}

pub fn payment_failed(msg: &PaymentFailed) -> (String, String) {
    let subject = "Your payment could not be processed".to_string();

    let mut html = format!(
        "<h1>Payment failed</h1>\
         <p>Hi {},</p>\
         <p>Your payment of {:.2} failed: {}.</p>",
        msg.customer_name, msg.amount, msg.reason
    );
    if let Some(method) = &msg.method {
        html.push_str(&format!("<p>Payment method: {method}</p>"));
    }
    if let Some(url) = &msg.retry_url {
        html.push_str(&format!("<p><a href=\"{url}\">Try again</a></p>"));
    }

    (subject, html)
}

pub fn partner_approval(msg: &PartnerApproval) -> (String, String) {
    let subject = format!("{} is now live", msg.gym_name);

    let mut html = format!(
        "<h1>Welcome aboard</h1>\
         <p>Hi {},</p>\
         <p>Your application for <strong>{}</strong> has been approved.</p>",
        msg.partner_name, msg.gym_name
    );
    if let Some(url) = &msg.dashboard_url {
        html.push_str(&format!("<p><a href=\"{url}\">Open your dashboard</a></p>"));
    }

    (subject, html)
}

pub fn partner_rejection(msg: &PartnerRejection) -> (String, String) {
    let subject = format!("Update on your application for {}", msg.gym_name);

    let mut html = format!(
        "<h1>Application update</h1>\
         <p>Hi {},</p>\
         <p>We cannot approve your application for <strong>{}</strong> at this time.</p>",
        msg.partner_name, msg.gym_name
    );
    if let Some(reason) = &msg.reason {
        html.push_str(&format!("<p>Reason: {reason}</p>"));
    }

    (subject, html)
}

pub fn admin_alert(msg: &AdminAlert) -> (String, String) {
    let subject = format!("[Courier] {}", msg.title);

    let mut html = format!("<h1>{}</h1><p>{}</p>", msg.title, msg.detail);
    if let Some(url) = &msg.reference_url {
        html.push_str(&format!("<p><a href=\"{url}\">Details</a></p>"));
    }

    (subject, html)
}

pub fn verification(msg: &Verification) -> (String, String) {
    let subject = "Your verification code".to_string();

    let html = format!(
        "<h1>Verify your email</h1>\
         <p>Hi {},</p>\
         <p>Your verification code is <strong>{}</strong>. It expires in {} minutes.</p>",
        msg.customer_name, msg.code, msg.expires_minutes
    );

    (subject, html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_messages::LineItem;

    #[test]
    fn test_booking_confirmation_includes_optionals_when_present() {
        let msg = BookingConfirmation {
            customer_name: "Jane".to_string(),
            booking_number: "BK-1042".to_string(),
            gym_name: "Iron Temple".to_string(),
            package_name: "Monthly Unlimited".to_string(),
            package_type: "subscription".to_string(),
            start_date: "2026-09-01".to_string(),
            end_date: Some("2026-09-30".to_string()),
            price_paid: 89.99,
            customer_phone: None,
            special_requests: Some("Ground floor locker".to_string()),
            booking_url: None,
        };
        let (subject, html) = booking_confirmation(&msg);
        assert!(subject.contains("Iron Temple"));
        assert!(html.contains("BK-1042"));
        assert!(html.contains("Ends: 2026-09-30"));
        assert!(html.contains("Ground floor locker"));
        assert!(!html.contains("href"));
    }

    #[test]
    fn test_payment_receipt_renders_line_items() {
        let msg = PaymentReceipt {
            customer_name: "Jane".to_string(),
            transaction_number: "TX-881".to_string(),
            amount: 34.50,
            method: "card".to_string(),
            date: "2026-08-01".to_string(),
            items: vec![LineItem {
                description: "Day pass".to_string(),
                quantity: Some(3),
                amount: 11.50,
            }],
        };
        let (subject, html) = payment_receipt(&msg);
        assert!(subject.contains("TX-881"));
        assert!(html.contains("Day pass"));
        assert!(html.contains("<td>3</td>"));
    }

    #[test]
    fn test_verification_includes_code_and_expiry() {
        let msg = Verification {
            customer_name: "jane".to_string(),
            code: "482913".to_string(),
            expires_minutes: 10,
        };
        let (_, html) = verification(&msg);
        assert!(html.contains("482913"));
        assert!(html.contains("10 minutes"));
    }
}
