use chrono::{Duration, Local, NaiveDate};

use reqwest::StatusCode;

use serde_json::json;

use sqlx::PgPool;

use uuid::Uuid;

use renewal_tracker::model::Plan;

use crate::helpers::{plan_body, TestApp};

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[sqlx::test]
async fn create_returns_created_plan(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let renewal_date = today() + Duration::days(14);
    let res = app
        .plan_create(&plan_body("user@test.com", renewal_date))
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::CREATED, res.status());

    let created: serde_json::Value = res.json().await.expect("Failed to parse body");
    assert_eq!("user@test.com", created["user_email"]);
    assert_eq!(7, created["reminder_days"]);

    let stored = sqlx::query_as::<_, Plan>("select * from plans")
        .fetch_one(&pool)
        .await
        .expect("Failed to fetch inserted row");

    assert_eq!("user@test.com", stored.user_email);
    assert_eq!(renewal_date, stored.renewal_date);
    assert!(stored.last_reminder_sent.is_none());

    Ok(())
}

#[sqlx::test]
async fn create_returns_bad_request_for_invalid_payloads(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let valid = plan_body("user@test.com", today());

    let mut missing_email = valid.clone();
    missing_email.as_object_mut().unwrap().remove("userEmail");

    let mut missing_provider = valid.clone();
    missing_provider.as_object_mut().unwrap().remove("provider");

    let mut malformed_email = valid.clone();
    malformed_email["userEmail"] = json!("not an email");

    let mut negative_cost = valid.clone();
    negative_cost["cost"] = json!(-5.00);

    let test_cases = vec![
        ("missing email", missing_email),
        ("missing provider", missing_provider),
        ("malformed email", malformed_email),
        ("negative cost", negative_cost),
    ];

    for (desc, body) in test_cases {
        let res = app
            .plan_create(&body)
            .await
            .expect("Failed to execute request");

        assert!(
            res.status().is_client_error(),
            "API did not fail when payload was {}",
            desc
        );
    }

    let count = sqlx::query_scalar::<_, i64>("select count(*) from plans")
        .fetch_one(&pool)
        .await?;
    assert_eq!(0, count);

    Ok(())
}

#[sqlx::test]
async fn list_requires_an_email(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let res = app.plan_list(None).await.expect("Failed to execute request");

    assert_eq!(StatusCode::BAD_REQUEST, res.status());

    let body: serde_json::Value = res.json().await.expect("Failed to parse body");
    assert!(body["error"].as_str().unwrap().contains("Email is required"));

    Ok(())
}

#[sqlx::test]
async fn list_returns_user_plans_soonest_renewal_first(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let later = today() + Duration::days(20);
    let sooner = today() + Duration::days(5);

    app.plan_create(&plan_body("user@test.com", later))
        .await
        .expect("Failed to execute request");
    app.plan_create(&plan_body("user@test.com", sooner))
        .await
        .expect("Failed to execute request");
    app.plan_create(&plan_body("other@test.com", today()))
        .await
        .expect("Failed to execute request");

    let res = app
        .plan_list(Some("user@test.com"))
        .await
        .expect("Failed to execute request");

    assert!(res.status().is_success());

    let plans: Vec<serde_json::Value> = res.json().await.expect("Failed to parse body");
    assert_eq!(2, plans.len());
    assert_eq!(json!(sooner), plans[0]["renewal_date"]);
    assert_eq!(json!(later), plans[1]["renewal_date"]);

    Ok(())
}

#[sqlx::test]
async fn update_replaces_plan_fields(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let res = app
        .plan_create(&plan_body("user@test.com", today() + Duration::days(10)))
        .await
        .expect("Failed to execute request");
    let created: serde_json::Value = res.json().await.expect("Failed to parse body");
    let id: Uuid = serde_json::from_value(created["id"].clone()).unwrap();

    let mut updated_body = plan_body("user@test.com", today() + Duration::days(40));
    updated_body["planName"] = json!("Family Share");
    updated_body["cost"] = json!(60.00);

    let res = app
        .plan_update(id, &updated_body)
        .await
        .expect("Failed to execute request");

    assert!(res.status().is_success());

    let stored = sqlx::query_as::<_, Plan>("select * from plans where id=$1")
        .bind(id)
        .fetch_one(&pool)
        .await
        .expect("Failed to fetch updated row");

    assert_eq!("Family Share", stored.plan_name);
    assert_eq!(today() + Duration::days(40), stored.renewal_date);

    Ok(())
}

#[sqlx::test]
async fn update_unknown_plan_returns_not_found(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let res = app
        .plan_update(Uuid::new_v4(), &plan_body("user@test.com", today()))
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::NOT_FOUND, res.status());

    Ok(())
}

#[sqlx::test]
async fn delete_removes_the_plan(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let res = app
        .plan_create(&plan_body("user@test.com", today()))
        .await
        .expect("Failed to execute request");
    let created: serde_json::Value = res.json().await.expect("Failed to parse body");
    let id: Uuid = serde_json::from_value(created["id"].clone()).unwrap();

    let res = app.plan_delete(id).await.expect("Failed to execute request");

    assert!(res.status().is_success());

    let body: serde_json::Value = res.json().await.expect("Failed to parse body");
    assert_eq!("Plan deleted successfully", body["message"]);

    let count = sqlx::query_scalar::<_, i64>("select count(*) from plans")
        .fetch_one(&pool)
        .await?;
    assert_eq!(0, count);

    Ok(())
}

#[sqlx::test]
async fn delete_unknown_plan_returns_not_found(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let res = app
        .plan_delete(Uuid::new_v4())
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::NOT_FOUND, res.status());

    Ok(())
}
