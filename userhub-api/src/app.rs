/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use userhub_api::{app::AppState, config::Config};
/// use userhub_shared::db::pool::create_pool;
/// use userhub_shared::repository::postgres::PgUserRepository;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(config.pool_config()).await?;
/// let state = AppState::new(Arc::new(PgUserRepository::new(pool)), config);
/// let app = userhub_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, error::ApiError, middleware::security::SecurityHeadersLayer};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{debug, Level};
use userhub_shared::{
    auth::middleware::{Authorizer, JwtAuthorizer},
    repository::UserRepository,
};

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// User store
    pub users: Arc<dyn UserRepository>,

    /// Request guard for the protected routes
    pub authorizer: Arc<dyn Authorizer>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates state guarded by JWTs signed with the configured secret
    pub fn new(users: Arc<dyn UserRepository>, config: Config) -> Self {
        let authorizer = Arc::new(JwtAuthorizer::new(config.jwt.secret.clone()));
        Self {
            users,
            authorizer,
            config: Arc::new(config),
        }
    }

    /// Replaces the request guard
    pub fn with_authorizer(mut self, authorizer: Arc<dyn Authorizer>) -> Self {
        self.authorizer = authorizer;
        self
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }

    /// Lifetime of newly issued access tokens
    pub fn token_lifetime(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.config.jwt.expires_minutes)
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// ```text
/// /
/// ├── GET  /health                 # public
/// ├── /auth/                       # public
/// │   ├── POST /register
/// │   └── POST /login
/// └── /users                       # bearer token required
///     ├── GET    ""  or  "/"       # list active users
///     ├── GET    /:user_id
///     ├── PUT    /:user_id
///     └── DELETE /:user_id         # deactivate
/// ```
///
/// Layers, outermost first: security headers, CORS, request tracing.
/// The guard runs as a route layer on the `/users` routes only, so it executes before
/// any users handler and never for unmatched paths.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    let user_routes = Router::new()
        .route("/users", get(routes::users::list_users))
        .route("/users/", get(routes::users::list_users))
        .route(
            "/users/:user_id",
            get(routes::users::get_user)
                .put(routes::users::update_user)
                .delete(routes::users::deactivate_user),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_guard,
        ));

    let cors = cors_layer(&state.config.api.cors_origins);
    let production = state.config.api.production;

    Router::new()
        .merge(health_routes)
        .nest("/auth", auth_routes)
        .merge(user_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(production))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}

/// Authentication guard
///
/// Runs the configured [`Authorizer`] and, on success, injects the
/// resulting `AuthContext` into request extensions.
async fn auth_guard(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth = state.authorizer.authorize(req.headers()).await.map_err(|e| {
        debug!(error = %e, path = %req.uri().path(), "Request rejected by auth guard");
        e
    })?;

    req.extensions_mut().insert(auth);

    Ok(next.run(req).await)
}
