use actix_web::dev::HttpServiceFactory;
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};

use chrono::NaiveDate;

use rust_decimal::Decimal;

use serde::Deserialize;
use serde_json::json;

use sqlx::PgPool;

use uuid::Uuid;

use crate::error::{RestError, RestResult};
use crate::model::NewPlan;
use crate::repo::{PgPlanRepo, PlanRepo};

#[derive(Debug, Deserialize)]
struct ListQuery {
    email: Option<String>,
}

/// Request body for plan creation and full-record updates.
/// Field names follow the original JSON API (camelCase in, records
/// serialize back out as stored).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanForm {
    user_email: String,
    provider: String,
    phone_number: String,
    plan_name: String,
    renewal_date: NaiveDate,
    cost: Decimal,
    #[serde(default = "default_reminder_days")]
    reminder_days: i32,
    #[serde(default)]
    is_promotion: bool,
    #[serde(default)]
    promotion_details: String,
}

fn default_reminder_days() -> i32 {
    7
}

impl TryInto<NewPlan> for PlanForm {
    type Error = String;

    fn try_into(self) -> Result<NewPlan, Self::Error> {
        let user_email = self.user_email.parse()?;
        let provider = required_text("provider", self.provider)?;
        let phone_number = required_text("phoneNumber", self.phone_number)?;
        let plan_name = required_text("planName", self.plan_name)?;

        if self.cost < Decimal::ZERO {
            return Err("cost cannot be negative".into());
        }
        if self.reminder_days < 0 {
            return Err("reminderDays cannot be negative".into());
        }

        Ok(NewPlan {
            user_email,
            provider,
            phone_number,
            plan_name,
            renewal_date: self.renewal_date,
            cost: self.cost,
            reminder_days: self.reminder_days,
            is_promotion: self.is_promotion,
            promotion_details: self.promotion_details,
        })
    }
}

fn required_text(field: &str, value: String) -> Result<String, String> {
    if value.trim().is_empty() {
        Err(format!("{} is required", field))
    } else {
        Ok(value)
    }
}

#[tracing::instrument(name = "List plans for a user", skip(pool))]
#[get("")]
async fn list(query: web::Query<ListQuery>, pool: web::Data<PgPool>) -> RestResult<impl Responder> {
    let email = query
        .into_inner()
        .email
        .filter(|email| !email.trim().is_empty())
        .ok_or_else(|| RestError::ParseError("Email is required".into()))?;

    let plans = PgPlanRepo::fetch_by_user(pool.get_ref(), &email).await?;

    Ok(HttpResponse::Ok().json(plans))
}

#[tracing::instrument(name = "Add a new plan", skip(pool))]
#[post("")]
async fn create(body: web::Json<PlanForm>, pool: web::Data<PgPool>) -> RestResult<impl Responder> {
    let new_plan: NewPlan = body.into_inner().try_into().map_err(RestError::ParseError)?;

    let plan = PgPlanRepo::insert(pool.get_ref(), &new_plan).await?;

    Ok(HttpResponse::Created().json(plan))
}

#[tracing::instrument(name = "Update a plan", skip(pool))]
#[put("/{id}")]
async fn update(
    path: web::Path<Uuid>,
    body: web::Json<PlanForm>,
    pool: web::Data<PgPool>,
) -> RestResult<impl Responder> {
    let id = path.into_inner();
    let fields: NewPlan = body.into_inner().try_into().map_err(RestError::ParseError)?;

    let plan = PgPlanRepo::update(pool.get_ref(), id, &fields)
        .await?
        .ok_or_else(|| RestError::NotFound("Plan not found".into()))?;

    Ok(HttpResponse::Ok().json(plan))
}

#[tracing::instrument(name = "Delete a plan", skip(pool))]
#[delete("/{id}")]
async fn remove(path: web::Path<Uuid>, pool: web::Data<PgPool>) -> RestResult<impl Responder> {
    let id = path.into_inner();

    PgPlanRepo::delete(pool.get_ref(), id)
        .await?
        .ok_or_else(|| RestError::NotFound("Plan not found".into()))?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Plan deleted successfully" })))
}

/// Plan API endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/api/plans")
        .service(list)
        .service(create)
        .service(update)
        .service(remove)
}
