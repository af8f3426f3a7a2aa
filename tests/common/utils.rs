use secrecy::ExposeSecret;
use serde_json::{json, Value};
use sqlx::{PgPool, PgConnection, Connection, Executor};
use std::net::TcpListener;
use uuid::Uuid;
use once_cell::sync::Lazy;
use reqwest::{Client, Method, Response};

use gymapp_backend::run;
use gymapp_backend::config::settings::{get_config, DatabaseSettings, get_jwt_settings};
use gymapp_backend::telemetry::{get_subscriber, init_subscriber};

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::stdout
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::sink
        );
        init_subscriber(subscriber);
    }
});

pub struct TestApp{
    pub address: String,
    pub db_pool: PgPool
}

impl TestApp {
    pub fn api(&self, path: &str) -> String {
        format!("{}/api{}", self.address, path)
    }
}

/// Registered user plus the token from its latest login.
#[derive(Debug, Clone)]
pub struct UserRegLoginResponse {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub membership_number: String,
    pub token: String,
}

pub async fn spawn_app() -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);
    let mut configuration = get_config().expect("Failed to read configuration.");
    configuration.database.db_name = Uuid::new_v4().to_string();
    // A DATABASE_URL override would point every test at the same database
    configuration.database.db_url = None;
    let connection_pool = configure_db(&configuration.database)
        .await;
    let jwt_settings = get_jwt_settings(&configuration);
    let server = run(
        listener,
        connection_pool.clone(),
        jwt_settings,
    )
        .expect("Failed to bind address");
    // Launch the server as a background task
    // tokio::spawn returns a handle to the spawned future,
    // but we have no use for it here, hence the non-binding let
    let _ = tokio::spawn(server);
    TestApp {
        address,
        db_pool: connection_pool
    }
}

pub async fn configure_db(config: &DatabaseSettings) -> PgPool {
    // Create database
    let mut connection = PgConnection::connect(
            &config.connection_string_without_db()
        )
        .await
        .expect("Failed to connect to Postgres");
    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, config.db_name).as_str())
        .await
        .expect("Failed to create database.");

    // Migrate database
    let connection_pool = PgPool::connect(config.connection_string().expose_secret())
        .await
        .expect("Failed to connect to Postgres.");
    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database");

    connection_pool
}

pub async fn make_authenticated_request(
    client: &Client,
    method: Method,
    url: &str,
    token: &str,
    body: Option<Value>,
) -> Response {
    let mut request = client
        .request(method, url)
        .header("Authorization", format!("Bearer {}", token));
    if let Some(body) = body {
        request = request.json(&body);
    }
    request.send().await.expect("Failed to execute request.")
}

pub async fn login(app: &TestApp, email: &str, password: &str) -> String {
    let response = Client::new()
        .post(app.api("/login"))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to execute login request.");
    assert_eq!(200, response.status().as_u16(), "Login should succeed");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["data"]["token"].as_str().expect("No token in response").to_string()
}

pub async fn create_test_user_and_login(app: &TestApp) -> UserRegLoginResponse {
    let suffix = &Uuid::new_v4().simple().to_string()[..12];
    let name = format!("member{}", suffix);
    let email = format!("{}@example.com", name);
    let password = "password123".to_string();
    let membership_number = format!("M-{}", suffix);

    let response = Client::new()
        .post(app.api("/register"))
        .json(&json!({
            "name": name,
            "email": email,
            "password": password,
            "membership_number": membership_number
        }))
        .send()
        .await
        .expect("Failed to register user.");
    assert_eq!(201, response.status().as_u16(), "Registration should succeed");

    let body: Value = response.json().await.expect("Failed to parse registration response");
    let user_id = body["data"]["user"]["id"]
        .as_str()
        .and_then(|id| Uuid::parse_str(id).ok())
        .expect("No user id in response");
    let token = body["data"]["token"].as_str().expect("No token in response").to_string();

    UserRegLoginResponse { user_id, name, email, password, membership_number, token }
}

/// Change a user's role directly in the database and log in again so the
/// token carries the new role.
pub async fn promote_user(app: &TestApp, user: &UserRegLoginResponse, role: &str) -> UserRegLoginResponse {
    sqlx::query("UPDATE users SET role = $1 WHERE id = $2")
        .bind(role)
        .bind(user.user_id)
        .execute(&app.db_pool)
        .await
        .expect("Failed to change user role");

    let token = login(app, &user.email, &user.password).await;
    UserRegLoginResponse { token, ..user.clone() }
}
