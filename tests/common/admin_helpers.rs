use reqwest::{Client, Method};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::utils::{
    TestApp,
    UserRegLoginResponse,
    create_test_user_and_login,
    make_authenticated_request,
    promote_user,
};

pub struct TestDevice {
    pub id: Uuid,
    pub name: String,
    pub secret_code: String,
}

pub async fn create_admin_user_and_login(app: &TestApp) -> UserRegLoginResponse {
    let user = create_test_user_and_login(app).await;
    promote_user(app, &user, "admin").await
}

pub async fn create_device(app: &TestApp, admin: &UserRegLoginResponse, name: &str) -> TestDevice {
    let response = make_authenticated_request(
        &Client::new(),
        Method::POST,
        &app.api("/admin/devices"),
        &admin.token,
        Some(json!({ "name": name, "exercise_mode": "strength" })),
    )
    .await;
    assert_eq!(201, response.status().as_u16(), "Device creation should succeed");

    let body: Value = response.json().await.expect("Failed to parse device response");
    TestDevice {
        id: Uuid::parse_str(body["data"]["id"].as_str().unwrap()).unwrap(),
        name: body["data"]["name"].as_str().unwrap().to_string(),
        secret_code: body["data"]["secret_code"].as_str().unwrap().to_string(),
    }
}
