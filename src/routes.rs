// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{admin, applications, auth, leads, masterclass, quiz},
    state::AppState,
    utils::session::require_auth,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (public funnels, admin auth, protected admin).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (pool, config, mailer).
pub fn create_router(state: AppState) -> Router {
    let mut origins: Vec<HeaderValue> = vec![
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];
    if let Ok(origin) = state.config.public_base_url.trim_end_matches('/').parse() {
        origins.push(origin);
    }

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .allow_credentials(true);

    let public_routes = Router::new()
        .route("/leads", post(leads::submit_lead))
        .route("/applications", post(applications::submit_application))
        .route("/quiz/questions", get(quiz::list_questions))
        .route("/quiz/submit", post(quiz::submit_quiz))
        .route("/masterclass/access", get(masterclass::check_access));

    let admin_auth_routes = Router::new()
        .route("/request-magic-link", post(auth::request_magic_link))
        .route("/verify-magic-link", post(auth::verify_magic_link));

    // Everything below requires a valid admin session cookie; the check
    // runs on every invocation, never cached.
    let admin_protected_routes = Router::new()
        .route("/logout", post(auth::logout))
        .route("/leads", get(admin::list_leads))
        .route("/applications", get(admin::list_applications))
        .route(
            "/purchases",
            get(admin::list_purchases).post(admin::create_purchase),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .nest("/api", public_routes)
        .nest("/api/admin", admin_auth_routes.merge(admin_protected_routes))
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
