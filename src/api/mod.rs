pub mod auth;
pub mod health;
pub mod metrics;
pub mod swagger;
pub mod todos;
pub mod users;

use actix_web::{error::JsonPayloadError, web, HttpRequest};
use serde::{Deserialize, Serialize};
use crate::utils::AppError;

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self { message: message.to_string() }
    }
}

/// Body of every failed request
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::warn!("⚠️  Invalid request body: {}", err);
    AppError::Validation("invalid request body".to_string()).into()
}

/// Registers every route; shared by `main` and the HTTP tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .content_type_required(false)
            .error_handler(json_error_handler),
    )
    // Auth
    .route("/register", web::post().to(auth::register))
    .route("/login", web::post().to(auth::login))
    // Health
    .route("/healthz", web::get().to(health::health_check))
    .route("/metrics", web::get().to(metrics::get_metrics))
    // Test utilities
    .route("/users", web::get().to(users::list_users))
    .route("/users", web::delete().to(users::clear_users))
    // Todos
    .route("/todos", web::get().to(todos::list_todos))
    .route("/todos", web::post().to(todos::create_todo))
    .route("/todos", web::delete().to(todos::clear_todos))
    .route("/todos/{id}", web::put().to(todos::update_todo))
    .route("/todos/{id}", web::delete().to(todos::delete_todo));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;
    use crate::models::TodoResponse;
    use crate::services::password::BcryptHasher;
    use crate::state::AppState;
    use actix_web::{dev::ServiceResponse, http::StatusCode, test, App};
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn app_state() -> web::Data<AppState> {
        web::Data::new(AppState::new(
            Arc::new(MemoryStore::new()),
            Arc::new(BcryptHasher::new(4)),
        ))
    }

    async fn json_body(resp: ServiceResponse) -> Value {
        test::read_body_json(resp).await
    }

    macro_rules! init_app {
        () => {
            test::init_service(App::new().app_data(app_state()).configure(configure)).await
        };
    }

    #[actix_web::test]
    async fn test_healthz() {
        let app = init_app!();
        let resp = test::call_service(&app, test::TestRequest::get().uri("/healthz").to_request()).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["status"], "ok");
        assert!(body["timestamp"].is_string());
    }

    #[actix_web::test]
    async fn test_register_twice_conflicts() {
        let app = init_app!();
        let creds = json!({ "email": "u@x.com", "password": "pw1" });

        let req = test::TestRequest::post().uri("/register").set_json(&creds).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert!(json_body(resp).await["message"].is_string());

        let req = test::TestRequest::post().uri("/register").set_json(&creds).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        assert!(json_body(resp).await["error"].is_string());

        let req = test::TestRequest::get().uri("/users").to_request();
        let body = json_body(test::call_service(&app, req).await).await;
        assert_eq!(body["users"], json!([{ "email": "u@x.com" }]));
    }

    #[actix_web::test]
    async fn test_malformed_json_is_bad_request() {
        let app = init_app!();

        let req = test::TestRequest::post()
            .uri("/register")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(resp).await["error"], "invalid request body");

        let req = test::TestRequest::post()
            .uri("/todos")
            .set_json(json!({ "email": "a@b.com", "title": 42 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_login_failures() {
        let app = init_app!();

        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "email": "nobody@x.com", "password": "pw" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "email": " ", "password": "pw" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_create_and_list_by_mixed_case_email() {
        let app = init_app!();

        let req = test::TestRequest::post()
            .uri("/todos")
            .set_json(json!({ "email": "a@b.com", "title": "buy milk" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: TodoResponse = serde_json::from_value(json_body(resp).await["todo"].clone()).unwrap();
        assert!(!created.completed);
        assert!(!created.id.is_empty());

        let req = test::TestRequest::get().uri("/todos?email=A%40B.COM%20").to_request();
        let body = json_body(test::call_service(&app, req).await).await;
        let todos: Vec<TodoResponse> = serde_json::from_value(body["todos"].clone()).unwrap();
        assert_eq!(todos, vec![created]);

        let req = test::TestRequest::get().uri("/todos?email=%20%20").to_request();
        let body = json_body(test::call_service(&app, req).await).await;
        assert_eq!(body["todos"], json!([]));
    }

    #[actix_web::test]
    async fn test_create_with_blank_title_is_rejected() {
        let app = init_app!();

        let req = test::TestRequest::post()
            .uri("/todos")
            .set_json(json!({ "email": "a@b.com", "title": "   " }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get().uri("/todos").to_request();
        let body = json_body(test::call_service(&app, req).await).await;
        assert_eq!(body["todos"], json!([]));
    }

    #[actix_web::test]
    async fn test_update_and_delete_errors() {
        let app = init_app!();

        let req = test::TestRequest::put()
            .uri("/todos/not-an-id")
            .set_json(json!({ "completed": true }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(resp).await["error"], "invalid id");

        // The id is rejected before the body is looked at
        let req = test::TestRequest::put()
            .uri("/todos/not-an-id")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(resp).await["error"], "invalid id");

        let req = test::TestRequest::put()
            .uri("/todos/65a1f0c2e4b0a1b2c3d4e5f6")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(resp).await["error"], "invalid request body");

        let req = test::TestRequest::delete().uri("/todos/not-an-id").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        // Well-formed but unknown id
        let req = test::TestRequest::delete().uri("/todos/65a1f0c2e4b0a1b2c3d4e5f6").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::put()
            .uri("/todos/65a1f0c2e4b0a1b2c3d4e5f6")
            .set_json(json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(resp).await["error"], "nothing to update");

        let req = test::TestRequest::put()
            .uri("/todos/65a1f0c2e4b0a1b2c3d4e5f6")
            .set_json(json!({ "completed": true }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn test_clear_todos_by_verbatim_email() {
        let app = init_app!();

        for email in ["a@b.com", "c@d.com"] {
            let req = test::TestRequest::post()
                .uri("/todos")
                .set_json(json!({ "email": email, "title": "chore" }))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
        }

        let req = test::TestRequest::delete().uri("/todos?email=A%40B.COM").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        let req = test::TestRequest::get().uri("/todos").to_request();
        let body = json_body(test::call_service(&app, req).await).await;
        assert_eq!(body["todos"].as_array().unwrap().len(), 2);

        let req = test::TestRequest::delete().uri("/todos?email=a%40b.com").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        let req = test::TestRequest::get().uri("/todos").to_request();
        let body = json_body(test::call_service(&app, req).await).await;
        assert_eq!(body["todos"].as_array().unwrap().len(), 1);

        let req = test::TestRequest::delete().uri("/todos").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        let req = test::TestRequest::delete().uri("/users").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_end_to_end_scenario() {
        let app = init_app!();

        let req = test::TestRequest::post()
            .uri("/register")
            .set_json(json!({ "email": "u@x.com", "password": "pw1" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "email": "U@X.COM ", "password": " pw1" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri("/todos")
            .set_json(json!({ "email": "u@x.com", "title": " wash car " }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let todo = json_body(resp).await["todo"].clone();
        assert_eq!(todo["title"], "wash car");
        let id = todo["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::put()
            .uri(&format!("/todos/{}", id))
            .set_json(json!({ "completed": true }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let updated = json_body(resp).await["todo"].clone();
        assert_eq!(updated["completed"], true);
        assert_eq!(updated["title"], "wash car");

        let req = test::TestRequest::delete().uri(&format!("/todos/{}", id)).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/todos?email=u%40x.com").to_request();
        let body = json_body(test::call_service(&app, req).await).await;
        assert_eq!(body["todos"], json!([]));
    }
}
