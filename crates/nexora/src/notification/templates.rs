//! Email bodies for each broker event.

use super::broker::{BrokerEvent, PaymentCompleted, PaymentFailed, UserCreated};
use super::mailer::Email;
use chrono::{Datelike, Utc};

pub fn render(event: &BrokerEvent) -> Email {
    match event {
        BrokerEvent::UserCreated(e) => welcome(e),
        BrokerEvent::PaymentCompleted(e) => payment_completed(e),
        BrokerEvent::PaymentFailed(e) => payment_failed(e),
    }
}

pub fn welcome(event: &UserCreated) -> Email {
    let html = format!(
        r#"<div style="font-family: 'Segoe UI', Arial, sans-serif; background-color: #f9f9f9; padding: 40px 0;">
  <div style="max-width: 600px; margin: auto; background-color: #ffffff; border-radius: 10px;">
    <div style="background-color: #111827; padding: 20px 30px;">
      <h1 style="color: #ffffff; margin: 0; font-size: 24px;">Welcome to Nexora</h1>
    </div>
    <div style="padding: 30px;">
      <p>Dear <strong>{first} {last}</strong>,</p>
      <p>Thank you for joining <strong>Nexora</strong>, your new home for discovering, buying and selling unique products.</p>
      <a href="https://nexora.market" style="display: inline-block; background-color: #111827; color: #ffffff; padding: 12px 24px; border-radius: 6px;">Visit Nexora</a>
      <p>Best regards,<br/><strong>The Nexora Team</strong></p>
    </div>
    <div style="background-color: #f3f4f6; padding: 15px 30px; text-align: center; font-size: 12px; color: #9ca3af;">
      &copy; {year} Nexora Marketplace. All rights reserved.
    </div>
  </div>
</div>"#,
        first = escape(&event.full_name.first_name),
        last = escape(&event.full_name.last_name),
        year = Utc::now().year(),
    );
    Email {
        to: event.email.clone(),
        subject: "Welcome to Our Service.".into(),
        text: "Thanks for registering with us!".into(),
        html,
    }
}

pub fn payment_completed(event: &PaymentCompleted) -> Email {
    let html = format!(
        "<h1>Payment successful</h1>\n\
         <p>Dear {username},</p>\n\
         <p>We have received your payment of {currency} {amount:.2} for order ID: {order}.</p>\n\
         <p>Thank you for your purchase!</p>\n\
         <p>Best regards,<br/>The Team</p>",
        username = escape(&event.username),
        currency = event.currency,
        amount = event.amount,
        order = event.order_id,
    );
    Email {
        to: event.email.clone(),
        subject: "Payment Successful".into(),
        text: "We have received your payment".into(),
        html,
    }
}

pub fn payment_failed(event: &PaymentFailed) -> Email {
    let html = format!(
        "<h1>Payment Failed</h1>\n\
         <p>Dear {username},</p>\n\
         <p>Unfortunately, your payment for the order ID: {order} has failed.</p>\n\
         <p>Please try again or contact support if the issue persists.</p>\n\
         <p>Best regards,<br/>The Team</p>",
        username = escape(&event.username),
        order = escape(&event.order_id),
    );
    Email {
        to: event.email.clone(),
        subject: "Payment Failed".into(),
        text: "Your payment could not be processed".into(),
        html,
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
