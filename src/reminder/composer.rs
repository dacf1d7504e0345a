use chrono::NaiveDate;

use crate::client::Email;
use crate::domain::EmailAddress;
use crate::model::Plan;

use super::window;

/// Build the reminder message for one plan.
///
/// Pure: same inputs, same message, no I/O. The day count is computed
/// from the caller's `today` so the subject line and the dispatch
/// decision always agree.
pub fn compose(today: NaiveDate, plan: &Plan, recipient: EmailAddress) -> Email {
    let days_until = window::days_until(today, plan.renewal_date);
    let day_word = if days_until == 1 { "day" } else { "days" };

    let subject = format!(
        "Reminder: {} mobile plan renews in {} {}",
        plan.provider, days_until, day_word
    );

    let renewal_date = plan.renewal_date.format("%A, %B %-d, %Y").to_string();
    let cost = format!("${:.2}", plan.cost);

    let html_body = html_body(plan, days_until, day_word, &renewal_date, &cost);
    let text_body = text_body(plan, days_until, day_word, &renewal_date, &cost);

    Email {
        recipient,
        subject,
        html_body,
        text_body,
    }
}

fn html_body(
    plan: &Plan,
    days_until: i64,
    day_word: &str,
    renewal_date: &str,
    cost: &str,
) -> String {
    let promotion_block = if plan.is_promotion {
        format!(
            r#"<div style="background-color:#fef3c7;border-left:4px solid #f59e0b;padding:15px;margin:15px 0;">
  <p style="margin:0;"><strong>Promotional pricing:</strong> {details}</p>
  <p style="margin:10px 0 0 0;"><em>Remember to check whether this rate continues or pricing changes after renewal.</em></p>
</div>"#,
            details = plan.promotion_details
        )
    } else {
        String::new()
    };

    let promotion_item = if plan.is_promotion {
        "\n    <li><strong>Verify post-promotion pricing</strong></li>"
    } else {
        ""
    };

    format!(
        r#"<div style="font-family:Arial,sans-serif;max-width:600px;margin:0 auto;padding:20px;">
  <h2 style="color:#2563eb;">Mobile Plan Renewal Reminder</h2>
  <p style="font-size:18px;font-weight:bold;">Your mobile plan renews in {days_until} {day_word}.</p>
  <h3>Plan details</h3>
  <table style="width:100%;border-collapse:collapse;">
    <tr><td style="padding:8px 0;font-weight:bold;">Provider:</td><td>{provider}</td></tr>
    <tr><td style="padding:8px 0;font-weight:bold;">Phone number:</td><td>{phone_number}</td></tr>
    <tr><td style="padding:8px 0;font-weight:bold;">Plan name:</td><td>{plan_name}</td></tr>
    <tr><td style="padding:8px 0;font-weight:bold;">Renewal date:</td><td>{renewal_date}</td></tr>
    <tr><td style="padding:8px 0;font-weight:bold;">Monthly cost:</td><td>{cost}</td></tr>
  </table>
  {promotion_block}
  <h4>Action items</h4>
  <ul>
    <li>Review your current usage and plan suitability</li>
    <li>Compare with competitor offers</li>
    <li>Check for any new promotions from {provider}</li>
    <li>Ensure your payment method is up to date</li>{promotion_item}
  </ul>
  <p style="color:#6b7280;font-size:12px;">This is an automated reminder from your Mobile Renewal Tracker.<br>
  To stop receiving these reminders, remove this plan from your tracker.</p>
</div>"#,
        days_until = days_until,
        day_word = day_word,
        provider = plan.provider,
        phone_number = plan.phone_number,
        plan_name = plan.plan_name,
        renewal_date = renewal_date,
        cost = cost,
        promotion_block = promotion_block,
        promotion_item = promotion_item,
    )
}

fn text_body(
    plan: &Plan,
    days_until: i64,
    day_word: &str,
    renewal_date: &str,
    cost: &str,
) -> String {
    let promotion_block = if plan.is_promotion {
        format!(
            "\nPromotional pricing: {}\nRemember to check whether this rate continues or pricing changes after renewal.\n",
            plan.promotion_details
        )
    } else {
        String::new()
    };

    let promotion_item = if plan.is_promotion {
        "\n- Verify post-promotion pricing"
    } else {
        ""
    };

    format!(
        "Mobile Plan Renewal Reminder\n\n\
         Your mobile plan renews in {days_until} {day_word}.\n\n\
         Provider: {provider}\n\
         Phone number: {phone_number}\n\
         Plan name: {plan_name}\n\
         Renewal date: {renewal_date}\n\
         Monthly cost: {cost}\n\
         {promotion_block}\n\
         Action items:\n\
         - Review your current usage and plan suitability\n\
         - Compare with competitor offers\n\
         - Check for any new promotions from {provider}\n\
         - Ensure your payment method is up to date{promotion_item}\n\n\
         This is an automated reminder from your Mobile Renewal Tracker.\n\
         To stop receiving these reminders, remove this plan from your tracker.\n",
        days_until = days_until,
        day_word = day_word,
        provider = plan.provider,
        phone_number = plan.phone_number,
        plan_name = plan.plan_name,
        renewal_date = renewal_date,
        cost = cost,
        promotion_block = promotion_block,
        promotion_item = promotion_item,
    )
}
