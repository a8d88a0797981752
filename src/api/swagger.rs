use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Todo Service API",
        version = "1.0.0",
        description = "Multi-user to-do tracking.\n\n**Authentication:** none. `/login` only checks an email/password pair; every other request is trusted on the email it carries.\n\n`/users` and the bulk `DELETE` endpoints are test utilities."
    ),
    paths(
        // Auth
        crate::api::auth::register,
        crate::api::auth::login,

        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,

        // Todos
        crate::api::todos::list_todos,
        crate::api::todos::create_todo,
        crate::api::todos::update_todo,
        crate::api::todos::delete_todo,

        // Test utilities
        crate::api::users::list_users,
        crate::api::users::clear_users,
        crate::api::todos::clear_todos,
    ),
    components(
        schemas(
            crate::api::MessageResponse,
            crate::api::ErrorResponse,
            crate::api::health::HealthResponse,
            crate::api::users::UserListResponse,
            crate::api::todos::TodoListResponse,
            crate::api::todos::TodoEnvelope,
            crate::models::CredentialsRequest,
            crate::models::CreateTodoRequest,
            crate::models::UpdateTodoRequest,
            crate::models::TodoResponse,
            crate::models::UserResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Registration and credential check."),
        (name = "Todos", description = "Create, list, update and delete to-do items."),
        (name = "Health", description = "Liveness and request counters."),
        (name = "Testing", description = "Diagnostics and bulk-clear utilities for test fixtures."),
    )
)]
pub struct ApiDoc;
