use reqwest::{Client, Method};
use serde_json::{json, Value};
use uuid::Uuid;

mod common;
use common::utils::{create_test_user_and_login, make_authenticated_request, promote_user, spawn_app};

#[tokio::test]
async fn accepted_coaching_request_assigns_the_coach() {
    let test_app = spawn_app().await;
    let coach = create_test_user_and_login(&test_app).await;
    let coach = promote_user(&test_app, &coach, "coach").await;
    let member = create_test_user_and_login(&test_app).await;
    let client = Client::new();

    let created = make_authenticated_request(
        &client,
        Method::POST,
        &test_app.api("/coaching/request/by-membership"),
        &coach.token,
        Some(json!({ "coach_id": coach.user_id, "membership_number": member.membership_number })),
    )
    .await;
    assert_eq!(201, created.status().as_u16());
    let body: Value = created.json().await.unwrap();
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["client_id"], member.user_id.to_string());
    let request_id = body["data"]["id"].as_str().unwrap().to_string();

    let pending = make_authenticated_request(
        &client,
        Method::GET,
        &format!("{}?client_id={}", test_app.api("/coaching/request"), member.user_id),
        &member.token,
        None,
    )
    .await;
    let body: Value = pending.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // Only the client answers
    let by_coach = make_authenticated_request(
        &client,
        Method::PUT,
        &test_app.api(&format!("/coaching/request/{}", request_id)),
        &coach.token,
        Some(json!({ "status": "accepted" })),
    )
    .await;
    assert_eq!(403, by_coach.status().as_u16());

    let accepted = make_authenticated_request(
        &client,
        Method::PUT,
        &test_app.api(&format!("/coaching/request/{}", request_id)),
        &member.token,
        Some(json!({ "status": "accepted" })),
    )
    .await;
    assert_eq!(200, accepted.status().as_u16());
    let body: Value = accepted.json().await.unwrap();
    assert_eq!(body["data"]["status"], "accepted");

    let clients = make_authenticated_request(
        &client,
        Method::GET,
        &format!("{}?coach_id={}", test_app.api("/coaching/clients"), coach.user_id),
        &coach.token,
        None,
    )
    .await;
    let body: Value = clients.json().await.unwrap();
    let clients = body["data"].as_array().unwrap();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0]["id"], member.user_id.to_string());
}

#[tokio::test]
async fn rejected_request_leaves_client_uncoached() {
    let test_app = spawn_app().await;
    let coach = create_test_user_and_login(&test_app).await;
    let member = create_test_user_and_login(&test_app).await;
    let client = Client::new();

    let created = make_authenticated_request(
        &client,
        Method::POST,
        &test_app.api("/coaching/request/by-membership"),
        &coach.token,
        Some(json!({ "coach_id": coach.user_id, "membership_number": member.membership_number })),
    )
    .await;
    let body: Value = created.json().await.unwrap();
    let request_id = body["data"]["id"].as_str().unwrap().to_string();

    let rejected = make_authenticated_request(
        &client,
        Method::PUT,
        &test_app.api(&format!("/coaching/request/{}", request_id)),
        &member.token,
        Some(json!({ "status": "rejected" })),
    )
    .await;
    assert_eq!(200, rejected.status().as_u16());

    let coach_id = sqlx::query_scalar::<_, Option<Uuid>>("SELECT coach_id FROM users WHERE id = $1")
        .bind(member.user_id)
        .fetch_one(&test_app.db_pool)
        .await
        .unwrap();
    assert!(coach_id.is_none());
}

#[tokio::test]
async fn coaching_request_edge_cases() {
    let test_app = spawn_app().await;
    let coach = create_test_user_and_login(&test_app).await;
    let other = create_test_user_and_login(&test_app).await;
    let client = Client::new();
    let url = test_app.api("/coaching/request/by-membership");

    let unknown = make_authenticated_request(&client, Method::POST, &url, &coach.token,
        Some(json!({ "coach_id": coach.user_id, "membership_number": "M-DOES-NOT-EXIST" }))).await;
    assert_eq!(404, unknown.status().as_u16());

    let myself = make_authenticated_request(&client, Method::POST, &url, &coach.token,
        Some(json!({ "coach_id": coach.user_id, "membership_number": coach.membership_number }))).await;
    assert_eq!(400, myself.status().as_u16());

    let impersonating = make_authenticated_request(&client, Method::POST, &url, &coach.token,
        Some(json!({ "coach_id": other.user_id, "membership_number": coach.membership_number }))).await;
    assert_eq!(403, impersonating.status().as_u16());

    let answer_pending = make_authenticated_request(
        &client,
        Method::PUT,
        &test_app.api(&format!("/coaching/request/{}", Uuid::new_v4())),
        &coach.token,
        Some(json!({ "status": "pending" })),
    ).await;
    assert_eq!(400, answer_pending.status().as_u16());

    let missing = make_authenticated_request(
        &client,
        Method::PUT,
        &test_app.api(&format!("/coaching/request/{}", Uuid::new_v4())),
        &coach.token,
        Some(json!({ "status": "accepted" })),
    ).await;
    assert_eq!(404, missing.status().as_u16());
}
