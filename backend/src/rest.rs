use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use shared::{
    ChangePasswordRequest, EndpointIndex, InviteRequest, LoginRequest, SubmitFinancials,
    SubmitPriorities, SubmitSuggestions,
};
use tracing::info;

use crate::auth::{AdminUser, AuthUser};
use crate::db::DbConnection;
use crate::domain::auth_service::AuthService;
use crate::domain::condominium_service::CondominiumService;
use crate::domain::email_service::EmailService;
use crate::domain::financial_service::FinancialService;
use crate::domain::invitation_service::InvitationService;
use crate::domain::priority_service::PriorityService;
use crate::domain::suggestion_service::SuggestionService;
use crate::error::ApiError;

/// Versioned base path all endpoints are served under.
pub const BASE_PATH: &str = "/api/v1";

const ENDPOINTS: &[&str] = &[
    "/api/v1/login/",
    "/api/v1/invite/",
    "/api/v1/names-condominiums/",
    "/api/v1/condominium-list/",
    "/api/v1/condominium/<id>/",
    "/api/v1/condominium/priority-or-upgrade/",
    "/api/v1/condominium/priority-or-upgrade/<id>/",
    "/api/v1/condominium/sugestions/",
    "/api/v1/financial-status/",
    "/api/v1/financial-status/<id>/",
    "/api/v1/update/<id>/",
];

/// Application state shared across handlers: one service per concern.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub invitations: InvitationService,
    pub condominiums: CondominiumService,
    pub financials: FinancialService,
    pub priorities: PriorityService,
    pub suggestions: SuggestionService,
}

impl AppState {
    pub fn new(db: DbConnection, email: EmailService) -> Self {
        Self {
            auth: AuthService::new(db.clone()),
            invitations: InvitationService::new(db.clone(), email),
            condominiums: CondominiumService::new(db.clone()),
            financials: FinancialService::new(db.clone()),
            priorities: PriorityService::new(db.clone()),
            suggestions: SuggestionService::new(db),
        }
    }
}

/// Assemble the application router.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/", get(api_index))
        .route("/login/", post(login))
        .route("/invite/", post(invite))
        .route("/names-condominiums/", get(names_condominiums))
        .route("/condominium-list/", get(condominium_list))
        .route("/condominium/:id/", get(financial_status_detail))
        .route(
            "/condominium/priority-or-upgrade/",
            get(priority_list).post(priority_submit),
        )
        .route("/condominium/priority-or-upgrade/:id/", get(priority_detail))
        .route(
            "/condominium/sugestions/",
            get(suggestion_list).post(suggestion_submit),
        )
        .route(
            "/financial-status/",
            get(financial_status_list).post(financial_status_submit),
        )
        .route("/financial-status/:id/", get(financial_status_detail))
        .route("/update/:id/", put(update_password).patch(update_password));

    Router::new()
        .route("/", get(api_index))
        .nest(BASE_PATH, api)
        .with_state(state)
}

/// GET / - listing of the documented endpoints.
async fn api_index() -> impl IntoResponse {
    Json(EndpointIndex {
        endpoints: ENDPOINTS.iter().map(|endpoint| (*endpoint).to_string()).collect(),
    })
}

/// POST /login/ - credential exchange for the user's persistent token.
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /login/ - username: {}", request.username);

    let response = state.auth.login(&request).await?;

    Ok((StatusCode::OK, Json(response)))
}

/// POST /invite/ - admin-only invitation workflow.
async fn invite(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(request): Json<InviteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /invite/ - {} inviting {}", admin.username, request.username);

    let response = state.invitations.invite(&request).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /names-condominiums/ - lightweight name listing.
async fn names_condominiums(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let names = state.condominiums.list_names().await?;

    Ok(Json(names))
}

/// GET /condominium-list/ - condominiums with their departments.
async fn condominium_list(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let listing = state.condominiums.list_with_departments().await?;

    Ok(Json(listing))
}

/// GET /financial-status/ - every condominium with its financial entries.
async fn financial_status_list(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let listing = state.financials.list().await?;

    Ok(Json(listing))
}

/// POST /financial-status/ - record entries under a condominium by name.
async fn financial_status_submit(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<SubmitFinancials>,
) -> Result<impl IntoResponse, ApiError> {
    info!(
        "POST /financial-status/ - {} submitting for {}",
        user.username, request.name_condominium
    );

    let receipt = state.financials.submit(&request).await?;

    Ok((StatusCode::CREATED, Json(receipt)))
}

/// GET /financial-status/<id>/ (and /condominium/<id>/) - one
/// condominium's financial entries.
async fn financial_status_detail(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let aggregate = state.financials.for_condominium(id).await?;

    Ok(Json(aggregate))
}

/// GET /condominium/priority-or-upgrade/ - priority items per condominium.
async fn priority_list(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let listing = state.priorities.list().await?;

    Ok(Json(listing))
}

/// POST /condominium/priority-or-upgrade/ - record items under a
/// condominium by name.
async fn priority_submit(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<SubmitPriorities>,
) -> Result<impl IntoResponse, ApiError> {
    info!(
        "POST /condominium/priority-or-upgrade/ - {} submitting for {}",
        user.username, request.name_condominium
    );

    let receipt = state.priorities.submit(&request).await?;

    Ok((StatusCode::CREATED, Json(receipt)))
}

/// GET /condominium/priority-or-upgrade/<id>/ - one item with its parent's
/// identity.
async fn priority_detail(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let detail = state.priorities.get(id).await?;

    Ok(Json(detail))
}

/// GET /condominium/sugestions/ - suggestion reports per condominium.
async fn suggestion_list(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let listing = state.suggestions.list().await?;

    Ok(Json(listing))
}

/// POST /condominium/sugestions/ - record reports under a condominium by
/// name.
async fn suggestion_submit(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<SubmitSuggestions>,
) -> Result<impl IntoResponse, ApiError> {
    info!(
        "POST /condominium/sugestions/ - {} submitting for {}",
        user.username, request.name_condominium
    );

    let receipt = state.suggestions.submit(&request).await?;

    Ok((StatusCode::CREATED, Json(receipt)))
}

/// PUT/PATCH /update/<id>/ - old/new password exchange.
async fn update_password(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<i64>,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("PUT /update/{}/ - requested by {}", id, caller.username);

    let ack = state.auth.change_password(&caller, id, &request).await?;

    Ok((StatusCode::OK, Json(ack)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::storage::CondominiumRepository;

    async fn setup_test() -> (AppState, DbConnection) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let state = AppState::new(db.clone(), EmailService::disabled());

        state
            .auth
            .ensure_admin("admin", "adminpass123", "admin@example.com")
            .await
            .expect("Failed to seed admin");
        CondominiumRepository::new(db.clone())
            .create("Maple Court")
            .await
            .expect("Failed to seed condominium");

        (state, db)
    }

    async fn admin_token(state: &AppState) -> String {
        state
            .auth
            .login(&LoginRequest {
                username: "admin".to_string(),
                password: "adminpass123".to_string(),
            })
            .await
            .expect("Admin login failed")
            .token
    }

    #[tokio::test]
    async fn test_login_handler_returns_token_and_user() {
        let (state, _db) = setup_test().await;

        let request = LoginRequest {
            username: "admin".to_string(),
            password: "adminpass123".to_string(),
        };

        let response = login(State(state), Json(request)).await.into_response();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_login_handler_rejects_wrong_password() {
        let (state, _db) = setup_test().await;

        let request = LoginRequest {
            username: "admin".to_string(),
            password: "not-the-password".to_string(),
        };

        let response = login(State(state), Json(request)).await.into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_requests_without_a_token_are_unauthorized() {
        let (state, _db) = setup_test().await;
        let app = router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/names-condominiums/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_authenticated_listing_succeeds() {
        let (state, _db) = setup_test().await;
        let token = admin_token(&state).await;
        let app = router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/names-condominiums/")
                    .header(AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_invite_requires_a_staff_account() {
        let (state, _db) = setup_test().await;
        let admin = admin_token(&state).await;

        // Provision a non-staff resident through the workflow itself.
        let invite_body = serde_json::to_vec(&InviteRequest {
            email: "jdoe@example.com".to_string(),
            username: "jdoe".to_string(),
            password: "welcome-jdoe-1".to_string(),
            department_owner: "Jane Doe".to_string(),
            name_condominium: "Maple Court".to_string(),
            department_number: 12,
            department_block: 3,
            number_habitants: 2,
            p_number: "+15551234567".to_string(),
            p_number_emergency: "+15557654321".to_string(),
        })
        .unwrap();

        let app = router(state.clone());
        let created = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/invite/")
                    .header(AUTHORIZATION, format!("Bearer {admin}"))
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from(invite_body.clone()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);

        let resident_token = state
            .auth
            .login(&LoginRequest {
                username: "jdoe".to_string(),
                password: "welcome-jdoe-1".to_string(),
            })
            .await
            .unwrap()
            .token;

        let forbidden = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/invite/")
                    .header(AUTHORIZATION, format!("Bearer {resident_token}"))
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from(invite_body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_missing_priority_item_is_not_found() {
        let (state, _db) = setup_test().await;
        let token = admin_token(&state).await;
        let app = router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/condominium/priority-or-upgrade/4242/")
                    .header(AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_index_is_open() {
        let (state, _db) = setup_test().await;
        let app = router(state);

        let root = app
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(root.status(), StatusCode::OK);

        let versioned = app
            .oneshot(Request::builder().uri("/api/v1/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(versioned.status(), StatusCode::OK);
    }
}
