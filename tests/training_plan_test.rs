use reqwest::{Client, Method};
use serde_json::{json, Value};
use uuid::Uuid;

mod common;
use common::admin_helpers::{create_admin_user_and_login, create_device};
use common::utils::{create_test_user_and_login, make_authenticated_request, spawn_app, TestApp, UserRegLoginResponse};

async fn create_plan(app: &TestApp, user: &UserRegLoginResponse, name: &str) -> Uuid {
    let response = make_authenticated_request(
        &Client::new(),
        Method::POST,
        &app.api("/training-plans"),
        &user.token,
        Some(json!({ "user_id": user.user_id, "name": name })),
    )
    .await;
    assert_eq!(201, response.status().as_u16(), "Plan creation should succeed");

    let body: Value = response.json().await.expect("Failed to parse plan response");
    assert_eq!(body["data"]["status"], "inactive");
    Uuid::parse_str(body["data"]["id"].as_str().unwrap()).unwrap()
}

#[tokio::test]
async fn plan_lifecycle_create_update_start_delete() {
    let test_app = spawn_app().await;
    let admin = create_admin_user_and_login(&test_app).await;
    let bench = create_device(&test_app, &admin, "Bench").await;
    let rower = create_device(&test_app, &admin, "Rower").await;
    let user = create_test_user_and_login(&test_app).await;
    let client = Client::new();

    let plan_id = create_plan(&test_app, &user, "Monday").await;
    let plan_url = test_app.api(&format!("/training-plans/{}", plan_id));

    let updated = make_authenticated_request(
        &client,
        Method::PUT,
        &plan_url,
        &user.token,
        Some(json!({ "exercises": [
            { "device_id": rower.id, "exercise_order": 2 },
            { "device_id": bench.id, "exercise_order": 1 }
        ]})),
    )
    .await;
    assert_eq!(200, updated.status().as_u16());
    let body: Value = updated.json().await.unwrap();
    let exercises = body["data"]["exercises"].as_array().unwrap();
    assert_eq!(exercises.len(), 2);
    assert_eq!(exercises[0]["device_name"], "Bench");
    assert_eq!(exercises[1]["device_name"], "Rower");

    let started = make_authenticated_request(
        &client,
        Method::POST,
        &format!("{}/start", plan_url),
        &user.token,
        None,
    )
    .await;
    assert_eq!(200, started.status().as_u16());
    let body: Value = started.json().await.unwrap();
    assert_eq!(body["data"]["exercise_order"], json!([bench.id, rower.id]));

    let listed = make_authenticated_request(
        &client,
        Method::GET,
        &test_app.api(&format!("/users/{}/training-plans", user.user_id)),
        &user.token,
        None,
    )
    .await;
    let body: Value = listed.json().await.unwrap();
    let plans = body["data"].as_array().unwrap();
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0]["status"], "active");
    assert_eq!(plans[0]["name"], "Monday");

    let deleted = make_authenticated_request(&client, Method::DELETE, &plan_url, &user.token, None).await;
    assert_eq!(200, deleted.status().as_u16());

    let remaining = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM training_plan_exercises WHERE plan_id = $1")
        .bind(plan_id)
        .fetch_one(&test_app.db_pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[tokio::test]
async fn replacing_exercises_drops_the_old_list() {
    let test_app = spawn_app().await;
    let admin = create_admin_user_and_login(&test_app).await;
    let bench = create_device(&test_app, &admin, "Bench").await;
    let rower = create_device(&test_app, &admin, "Rower").await;
    let user = create_test_user_and_login(&test_app).await;
    let client = Client::new();

    let plan_id = create_plan(&test_app, &user, "Full body").await;
    let plan_url = test_app.api(&format!("/training-plans/{}", plan_id));

    make_authenticated_request(&client, Method::PUT, &plan_url, &user.token,
        Some(json!({ "exercises": [{ "device_id": bench.id, "exercise_order": 1 }] }))).await;
    let response = make_authenticated_request(&client, Method::PUT, &plan_url, &user.token,
        Some(json!({ "exercises": [{ "device_id": rower.id, "exercise_order": 1 }] }))).await;

    let body: Value = response.json().await.unwrap();
    let exercises = body["data"]["exercises"].as_array().unwrap();
    assert_eq!(exercises.len(), 1);
    assert_eq!(exercises[0]["device_id"], rower.id.to_string());
}

#[tokio::test]
async fn unknown_plan_returns_404() {
    let test_app = spawn_app().await;
    let user = create_test_user_and_login(&test_app).await;

    let response = make_authenticated_request(
        &Client::new(),
        Method::POST,
        &test_app.api(&format!("/training-plans/{}/start", Uuid::new_v4())),
        &user.token,
        None,
    )
    .await;

    assert_eq!(404, response.status().as_u16());
}

#[tokio::test]
async fn other_users_cannot_manage_a_plan() {
    let test_app = spawn_app().await;
    let owner = create_test_user_and_login(&test_app).await;
    let intruder = create_test_user_and_login(&test_app).await;
    let client = Client::new();

    let plan_id = create_plan(&test_app, &owner, "Private").await;

    let deleted = make_authenticated_request(
        &client,
        Method::DELETE,
        &test_app.api(&format!("/training-plans/{}", plan_id)),
        &intruder.token,
        None,
    )
    .await;
    assert_eq!(403, deleted.status().as_u16());

    let created_for_owner = make_authenticated_request(
        &client,
        Method::POST,
        &test_app.api("/training-plans"),
        &intruder.token,
        Some(json!({ "user_id": owner.user_id, "name": "Sneaky" })),
    )
    .await;
    assert_eq!(403, created_for_owner.status().as_u16());
}
