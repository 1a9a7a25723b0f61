use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::handlers::{protected, public};
use crate::middleware::{require_identity, resolve_identity};
use crate::state::AppState;

/// Full application router.
///
/// Layer order, outermost first: tracing, CORS, identity filter, route policy.
/// The policy also wraps the fallback, so unknown paths outside the public set
/// answer 401 to anonymous callers.
pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .merge(auth_public_routes())
        // Protected
        .merge(protected_routes())
        .fallback(public::not_found)
        .layer(middleware::from_fn(require_identity))
        .layer(middleware::from_fn_with_state(state.clone(), resolve_identity))
        .layer(cors_layer(&state.config.security));

    if state.config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    use public::auth;

    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/register", post(auth::register))
}

fn protected_routes() -> Router<AppState> {
    use protected::{schedule, user};

    Router::new()
        .route("/api/schedule/list", get(schedule::list))
        .route("/api/schedule/add", post(schedule::add))
        .route("/api/schedule/update/:id", put(schedule::update))
        .route("/api/schedule/delete/:id", delete(schedule::delete))
        .route("/api/user/me", get(user::me_get).put(user::me_put))
}

/// One allowed origin, credentials allowed, `Authorization` exposed to scripts.
fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
        .expose_headers([header::AUTHORIZATION]);

    match HeaderValue::from_str(&security.cors_origin) {
        // Other origins get no allow-origin header
        Ok(origin) => layer.allow_origin(AllowOrigin::list([origin])),
        Err(_) => {
            tracing::warn!(
                "Invalid CORS origin '{}'; cross-origin requests will be refused",
                security.cors_origin
            );
            layer
        }
    }
}
