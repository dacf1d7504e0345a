use actix_web::dev::HttpServiceFactory;
use actix_web::{post, web, HttpResponse, Responder};

use chrono::Local;

use serde_json::json;

use crate::error::RestResult;
use crate::reminder::ReminderDispatcher;

/// Manual trigger for one synchronous reminder pass, for testing and
/// operations. The host clock is read here, once, so the whole pass
/// shares a single notion of "today".
#[tracing::instrument(name = "Check reminders on demand", skip(dispatcher))]
#[post("")]
async fn check(dispatcher: web::Data<ReminderDispatcher>) -> RestResult<impl Responder> {
    let today = Local::now().date_naive();

    let sent = dispatcher.run_once(today).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Reminder check completed",
        "sent": sent,
    })))
}

/// Reminder trigger endpoint
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/api/check-reminders").service(check)
}
