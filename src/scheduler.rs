use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDateTime, NaiveTime};

use crate::reminder::ReminderDispatcher;

/// Daily reminder trigger.
///
/// Sleeps until the next occurrence of `at` on the host clock, runs one
/// dispatcher pass dated with that day's local date, and repeats. A
/// failed pass is logged; the loop itself never exits.
pub async fn run_daily(dispatcher: Arc<ReminderDispatcher>, at: NaiveTime) {
    loop {
        let delay = delay_until_next(Local::now().naive_local(), at);
        tracing::info!("Next scheduled reminder check in {:?}", delay);
        tokio::time::sleep(delay).await;

        let today = Local::now().date_naive();
        match dispatcher.run_once(today).await {
            Ok(sent) => {
                tracing::info!("Scheduled reminder check delivered {} reminder(s)", sent)
            }
            Err(error) => {
                tracing::error!(error.cause_chain = ?error, "Scheduled reminder check failed")
            }
        }
    }
}

/// Time left until the next occurrence of `at`, today or tomorrow.
fn delay_until_next(now: NaiveDateTime, at: NaiveTime) -> Duration {
    let mut next = now.date().and_time(at);
    if next <= now {
        next += chrono::Duration::days(1);
    }

    (next - now).to_std().unwrap_or(Duration::ZERO)
}
