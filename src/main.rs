use std::net::TcpListener;
use std::sync::Arc;

use anyhow::Context;

use sqlx::PgPool;

use renewal_tracker::client::EmailClient;
use renewal_tracker::reminder::ReminderDispatcher;
use renewal_tracker::settings::Settings;
use renewal_tracker::{app, scheduler, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = telemetry::build_subscriber("info".into(), std::io::stdout);
    telemetry::init_subscriber(subscriber)?;

    let settings = Settings::load().expect("Failed to load settings");

    let pool = PgPool::connect_with(settings.database.with_db()).await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    let email_client = EmailClient::new(
        settings.email.sender(),
        settings.email.api_timeout(),
        settings.email.api_base_url(),
        settings.email.api_auth_token(),
    )?;

    let dispatcher = Arc::new(ReminderDispatcher::new(pool.clone(), Arc::new(email_client)));

    tokio::spawn(scheduler::run_daily(
        dispatcher.clone(),
        settings.reminders.daily_at(),
    ));

    let listener = TcpListener::bind(settings.app.addr())?;

    app::run(listener, pool, dispatcher)?
        .await
        .context("Failed to run app")
}
