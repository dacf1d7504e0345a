use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;

use reqwest::{Client, Method, Response};

use serde_json::json;

use sqlx::PgPool;

use url::Url;

use uuid::Uuid;

use wiremock::MockServer;

use renewal_tracker::app;
use renewal_tracker::client::EmailClient;
use renewal_tracker::reminder::ReminderDispatcher;

pub struct TestApp {
    addr: String,

    pub client: Client,
    pub email_server: MockServer,
}

impl TestApp {
    pub async fn spawn(pool: &PgPool) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to listen on random port");
        let port = listener.local_addr().unwrap().port();

        let addr = format!("http://127.0.0.1:{}", port);

        let email_server = MockServer::start().await;

        let email_client = {
            let sender = "reminders@test.com"
                .parse()
                .expect("Failed to parse sender email address");
            let api_base_url =
                Url::parse(&email_server.uri()).expect("Failed to parse mock server uri");
            let api_auth_token = "TestAuthorization"
                .parse()
                .expect("Failed to parse auth token");
            let api_timeout = Duration::from_secs(2);

            EmailClient::new(sender, api_timeout, api_base_url, api_auth_token)
                .expect("Failed to create email client")
        };

        let dispatcher = Arc::new(ReminderDispatcher::new(pool.clone(), Arc::new(email_client)));

        let server =
            app::run(listener, pool.clone(), dispatcher).expect("Failed to spawn app instance");
        let _ = tokio::spawn(server);

        let client = Client::new();

        Self {
            addr,
            client,
            email_server,
        }
    }

    pub fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", &self.addr, url);
        self.client.request(method, url)
    }

    pub async fn health_check(&self) -> reqwest::Result<Response> {
        self.request(Method::GET, "").send().await
    }

    pub async fn plan_list(&self, email: Option<&str>) -> reqwest::Result<Response> {
        let url = match email {
            Some(email) => format!("api/plans?email={}", email),
            None => "api/plans".into(),
        };
        self.request(Method::GET, &url).send().await
    }

    pub async fn plan_create(&self, body: &serde_json::Value) -> reqwest::Result<Response> {
        self.request(Method::POST, "api/plans")
            .json(body)
            .send()
            .await
    }

    pub async fn plan_update(
        &self,
        id: Uuid,
        body: &serde_json::Value,
    ) -> reqwest::Result<Response> {
        self.request(Method::PUT, &format!("api/plans/{}", id))
            .json(body)
            .send()
            .await
    }

    pub async fn plan_delete(&self, id: Uuid) -> reqwest::Result<Response> {
        self.request(Method::DELETE, &format!("api/plans/{}", id))
            .send()
            .await
    }

    pub async fn check_reminders(&self) -> reqwest::Result<Response> {
        self.request(Method::POST, "api/check-reminders")
            .send()
            .await
    }
}

/// A complete, valid creation body for one plan
pub fn plan_body(email: &str, renewal_date: NaiveDate) -> serde_json::Value {
    json!({
        "userEmail": email,
        "provider": "Verizon",
        "phoneNumber": "555-0100",
        "planName": "Unlimited Plus",
        "renewalDate": renewal_date,
        "cost": 45.50,
    })
}
