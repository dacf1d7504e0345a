use chrono::NaiveDate;

use sqlx::{Executor, PgExecutor};

use uuid::Uuid;

use crate::model::{NewPlan, Plan};

/// Persistence boundary for plan records, one impl per database.
/// NOTE: Executor-generic so methods run against a pool, a connection
/// or an open transaction alike
#[async_trait::async_trait]
pub trait PlanRepo {
    type DB: sqlx::Database;

    /// Insert a new plan into the database
    async fn insert<'con>(
        executor: impl Executor<'con, Database = Self::DB>,
        new_plan: &NewPlan,
    ) -> sqlx::Result<Plan>;

    /// Replace a plan's fields by database ID.
    /// Leaves `last_reminder_sent` untouched; returns `None` when the
    /// ID is absent.
    async fn update<'con>(
        executor: impl Executor<'con, Database = Self::DB>,
        id: Uuid,
        fields: &NewPlan,
    ) -> sqlx::Result<Option<Plan>>;

    /// Hard-delete a plan by database ID, returning the deleted record
    async fn delete<'con>(
        executor: impl Executor<'con, Database = Self::DB>,
        id: Uuid,
    ) -> sqlx::Result<Option<Plan>>;

    /// Fetch all plans for one user, soonest renewal first
    async fn fetch_by_user<'con>(
        executor: impl Executor<'con, Database = Self::DB>,
        email: &str,
    ) -> sqlx::Result<Vec<Plan>>;

    /// Fetch plans not yet reminded today.
    /// Coarse pre-filter only; the per-plan window gate is re-applied
    /// in memory by the evaluator.
    async fn fetch_candidates<'con>(
        executor: impl Executor<'con, Database = Self::DB>,
        today: NaiveDate,
    ) -> sqlx::Result<Vec<Plan>>;

    /// Record that a reminder went out for a plan on `sent_on`
    async fn mark_sent<'con>(
        executor: impl Executor<'con, Database = Self::DB>,
        id: Uuid,
        sent_on: NaiveDate,
    ) -> sqlx::Result<()>;
}

/// Postgres Plan Repository
#[derive(Debug)]
pub struct PgPlanRepo;

#[async_trait::async_trait]
impl PlanRepo for PgPlanRepo {
    type DB = sqlx::Postgres;

    #[tracing::instrument(name = "Insert plan", skip(executor))]
    async fn insert<'con>(
        executor: impl PgExecutor<'con>,
        new_plan: &NewPlan,
    ) -> sqlx::Result<Plan> {
        sqlx::query_as::<_, Plan>(
            "insert into plans \
             (user_email, provider, phone_number, plan_name, renewal_date, cost, \
              reminder_days, is_promotion, promotion_details) \
             values ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             returning *",
        )
        .bind(new_plan.user_email.as_ref())
        .bind(&new_plan.provider)
        .bind(&new_plan.phone_number)
        .bind(&new_plan.plan_name)
        .bind(new_plan.renewal_date)
        .bind(new_plan.cost)
        .bind(new_plan.reminder_days)
        .bind(new_plan.is_promotion)
        .bind(&new_plan.promotion_details)
        .fetch_one(executor)
        .await
    }

    #[tracing::instrument(name = "Update plan", skip(executor))]
    async fn update<'con>(
        executor: impl PgExecutor<'con>,
        id: Uuid,
        fields: &NewPlan,
    ) -> sqlx::Result<Option<Plan>> {
        sqlx::query_as::<_, Plan>(
            "update plans set \
             user_email=$2, provider=$3, phone_number=$4, plan_name=$5, \
             renewal_date=$6, cost=$7, reminder_days=$8, is_promotion=$9, \
             promotion_details=$10 \
             where id=$1 \
             returning *",
        )
        .bind(id)
        .bind(fields.user_email.as_ref())
        .bind(&fields.provider)
        .bind(&fields.phone_number)
        .bind(&fields.plan_name)
        .bind(fields.renewal_date)
        .bind(fields.cost)
        .bind(fields.reminder_days)
        .bind(fields.is_promotion)
        .bind(&fields.promotion_details)
        .fetch_optional(executor)
        .await
    }

    #[tracing::instrument(name = "Delete plan", skip(executor))]
    async fn delete<'con>(
        executor: impl PgExecutor<'con>,
        id: Uuid,
    ) -> sqlx::Result<Option<Plan>> {
        sqlx::query_as::<_, Plan>("delete from plans where id=$1 returning *")
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    #[tracing::instrument(name = "Fetch plans by user", skip(executor))]
    async fn fetch_by_user<'con>(
        executor: impl PgExecutor<'con>,
        email: &str,
    ) -> sqlx::Result<Vec<Plan>> {
        sqlx::query_as::<_, Plan>(
            "select * from plans where user_email=$1 order by renewal_date asc",
        )
        .bind(email)
        .fetch_all(executor)
        .await
    }

    #[tracing::instrument(name = "Fetch candidate plans", skip(executor))]
    async fn fetch_candidates<'con>(
        executor: impl PgExecutor<'con>,
        today: NaiveDate,
    ) -> sqlx::Result<Vec<Plan>> {
        sqlx::query_as::<_, Plan>(
            "select * from plans \
             where last_reminder_sent is null or last_reminder_sent < $1",
        )
        .bind(today)
        .fetch_all(executor)
        .await
    }

    #[tracing::instrument(name = "Mark plan reminded", skip(executor))]
    async fn mark_sent<'con>(
        executor: impl PgExecutor<'con>,
        id: Uuid,
        sent_on: NaiveDate,
    ) -> sqlx::Result<()> {
        sqlx::query("update plans set last_reminder_sent=$2 where id=$1")
            .bind(id)
            .bind(sent_on)
            .execute(executor)
            .await?;
        Ok(())
    }
}
