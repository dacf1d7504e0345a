use std::sync::Arc;

use anyhow::Context;

use chrono::NaiveDate;

use sqlx::PgPool;

use crate::client::EmailClient;
use crate::domain::EmailAddress;
use crate::repo::{PgPlanRepo, PlanRepo};

use super::{composer, evaluator};

/// Runs one reminder pass over all stored plans.
///
/// Holds no global state: the pool and mail client are injected at
/// construction, their lifecycle owned by the process entry point, and
/// the evaluation date is supplied per run.
#[derive(Debug)]
pub struct ReminderDispatcher {
    pool: PgPool,
    email_client: Arc<EmailClient>,
}

impl ReminderDispatcher {
    pub fn new(pool: PgPool, email_client: Arc<EmailClient>) -> Self {
        Self { pool, email_client }
    }

    /// Evaluate every candidate plan and deliver the eligible
    /// reminders, returning how many went out.
    ///
    /// A failure to list candidates aborts the whole run before any
    /// send happens. After that, failures are isolated per plan: an
    /// unparseable stored address, a rejected delivery or a failed
    /// marker write is logged and leaves that one plan eligible for
    /// the next run while the rest of the batch proceeds.
    #[tracing::instrument(name = "Reminder pass", skip(self))]
    pub async fn run_once(&self, today: NaiveDate) -> anyhow::Result<u32> {
        let candidates = PgPlanRepo::fetch_candidates(&self.pool, today)
            .await
            .context("Failed to list candidate plans")?;

        let mut sent = 0;
        for plan in candidates {
            if !evaluator::should_send(today, &plan) {
                continue;
            }

            let recipient: EmailAddress = match plan.user_email.parse() {
                Ok(recipient) => recipient,
                Err(error) => {
                    tracing::warn!(
                        %error,
                        "Skipping a plan with an unparseable address (id: {}, email: {})",
                        plan.id,
                        plan.user_email
                    );
                    continue;
                }
            };

            let email = composer::compose(today, &plan, recipient);
            match self.email_client.send(&email).await {
                Ok(()) => {
                    sent += 1;
                    if let Err(error) = PgPlanRepo::mark_sent(&self.pool, plan.id, today).await {
                        tracing::error!(
                            error.cause_chain = ?error,
                            "Delivered a reminder but failed to record it (id: {})",
                            plan.id
                        );
                    }
                }
                Err(error) => {
                    tracing::warn!(
                        error.cause_chain = ?error,
                        "Failed to deliver a reminder (id: {}, email: {})",
                        plan.id,
                        plan.user_email
                    );
                }
            }
        }

        tracing::info!("Delivered {} reminder(s)", sent);
        Ok(sent)
    }
}
