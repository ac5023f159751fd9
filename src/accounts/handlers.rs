use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::{json, Value};
use tracing::instrument;

use crate::error::ApiError;
use crate::state::AppState;

use super::dto::{
    AuthCheckResponse, LoginRequest, LoginResponse, PublicUser, RegisterRequest, RegisterResponse,
};
use super::extractors::SessionUser;
use super::services;
use super::session::{SessionKeys, SESSION_COOKIE};

pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/data", get(data))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/auth", get(auth_check))
        .route("/logout", get(logout))
        .route("/protected", get(protected))
}

#[instrument(skip(state))]
async fn data(State(state): State<AppState>) -> Result<Json<Vec<PublicUser>>, ApiError> {
    let accounts = services::list_accounts(&state.db).await?;
    Ok(Json(accounts))
}

#[instrument(skip(state, payload))]
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    services::register(&state.db, payload).await?;
    Ok(Json(RegisterResponse {
        success: "register successful".into(),
    }))
}

/// On success the token rides back as an HTTP-only cookie; the body only
/// tells the client how long it lasts.
#[instrument(skip(state, jar, payload))]
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), ApiError> {
    let keys = SessionKeys::from_ref(&state);
    let token = services::login(&state.db, &keys, payload).await?;
    let ttl = keys.ttl;

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(ttl.as_secs() as i64))
        .build();

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            success: "login successful".into(),
            expires_in_sec: ttl.as_secs(),
        }),
    ))
}

/// Valid cookie required; reports whether its subject still resolves to a
/// stored user.
#[instrument(skip(state))]
async fn auth_check(
    State(state): State<AppState>,
    SessionUser(subject): SessionUser,
) -> Result<Json<AuthCheckResponse>, ApiError> {
    let user = services::profile(&state.db, &subject).await?;
    Ok(Json(AuthCheckResponse {
        authenticated: user.is_some(),
        user,
    }))
}

/// Stateless logout: no server-side session exists, so clearing the cookie
/// is the whole operation.
async fn logout(jar: CookieJar) -> (CookieJar, Json<Value>) {
    let removal = Cookie::build(SESSION_COOKIE).path("/");
    (
        jar.remove(removal),
        Json(json!({ "msg": "logout successful" })),
    )
}

async fn protected(SessionUser(_subject): SessionUser) -> Json<Value> {
    Json(json!({ "foo": "bar" }))
}
