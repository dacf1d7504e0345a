use chrono::NaiveDate;

use crate::model::Plan;

use super::window;

/// Decide whether a reminder should go out for `plan` today.
///
/// Two gates, both must hold:
/// 1. the renewal is today or at most `reminder_days` days away —
///    renewals already past are never eligible;
/// 2. no reminder has been recorded for today yet.
///
/// The second gate stops same-day duplicates only. A plan inside a
/// multi-day window gets one email per calendar day until renewal;
/// eligibility re-opens at the next day purely through the date
/// comparison, with no stored state transition.
pub fn should_send(today: NaiveDate, plan: &Plan) -> bool {
    let days_until = window::days_until(today, plan.renewal_date);

    let in_window = days_until >= 0 && days_until <= i64::from(plan.reminder_days);
    let not_sent_today = plan
        .last_reminder_sent
        .map_or(true, |sent_on| sent_on < today);

    in_window && not_sent_today
}
