use chrono::{DateTime, NaiveDate, Utc};

use rust_decimal::Decimal;

use serde::Serialize;

use uuid::Uuid;

use crate::domain::EmailAddress;

/// Validated plan fields, used for inserts and full-record updates
#[derive(Debug)]
pub struct NewPlan {
    pub user_email: EmailAddress,
    pub provider: String,
    pub phone_number: String,
    pub plan_name: String,
    pub renewal_date: NaiveDate,
    pub cost: Decimal,
    pub reminder_days: i32,
    pub is_promotion: bool,
    pub promotion_details: String,
}

/// Stored plan record
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Plan {
    /// ID of the plan
    pub id: Uuid,
    /// Destination address for reminders
    pub user_email: String,
    pub provider: String,
    pub phone_number: String,
    pub plan_name: String,
    /// Calendar date the plan renews on, no time component
    pub renewal_date: NaiveDate,
    /// Monthly cost
    pub cost: Decimal,
    /// Lead time in whole days; reminders go out inside
    /// `[renewal_date - reminder_days, renewal_date]`
    pub reminder_days: i32,
    pub is_promotion: bool,
    /// Meaningful only while `is_promotion` is set
    pub promotion_details: String,
    /// NOTE: Auto-set by the database on insert
    pub created_at: DateTime<Utc>,
    /// Last calendar day a reminder went out; `None` means never.
    /// Written only by the dispatcher, never by a record update.
    pub last_reminder_sent: Option<NaiveDate>,
}
