use std::net::TcpListener;
use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{get, HttpResponse, Responder};
use actix_web::{web, App, HttpServer};

use serde_json::json;

use sqlx::PgPool;

use tracing_actix_web::TracingLogger;

use crate::controller::{plans, reminders};
use crate::reminder::ReminderDispatcher;

/// Simple health-check endpoint
#[tracing::instrument(name = "Health check")]
#[get("/")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "message": "Mobile Renewal Tracker API",
    }))
}

/// Run the application on a specified TCP listener
pub fn run(
    listener: TcpListener,
    pool: PgPool,
    dispatcher: Arc<ReminderDispatcher>,
) -> anyhow::Result<Server> {
    // Wrap application data
    let pool = web::Data::new(pool);
    let dispatcher = web::Data::from(dispatcher);

    // Start the server
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(pool.clone())
            .app_data(dispatcher.clone())
            .service(health_check)
            .service(plans::scope())
            .service(reminders::scope())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
