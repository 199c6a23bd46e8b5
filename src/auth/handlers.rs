use crate::{
    error::AppError,
    model::session::{LoginReqDto, SessionResponse},
    state::AppState,
};
use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use tracing::{info, instrument};

/// Log in
///
/// Any non-empty email and password pair is accepted; the password is not checked
/// against anything.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Session started", body = SessionResponse),
        (status = 400, description = "Email or password missing", body = Object, example = json!({
            "message": "Please enter valid credentials."
        }))
    ),
    tag = "Session"
)]
#[instrument(name = "auth_login", skip(state, user), fields(email = %user.email))]
pub async fn login(
    user: web::Json<LoginReqDto>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let mut session = state.session_mut();

    if !session.login(&user.email, &user.password) {
        info!("Validation failed: empty email or password");
        return Err(AppError::BadRequest("Please enter valid credentials."));
    }

    Ok(HttpResponse::Ok().json(session.snapshot()))
}

/// Log out
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 204, description = "Session cleared (idempotent)")
    ),
    tag = "Session"
)]
pub async fn logout(state: web::Data<AppState>) -> impl Responder {
    state.session_mut().logout();
    HttpResponse::NoContent().finish()
}

/// Current session
#[utoipa::path(
    get,
    path = "/auth/session",
    responses(
        (status = 200, description = "Whether someone is logged in, and who", body = SessionResponse)
    ),
    tag = "Session"
)]
pub async fn current_session(state: web::Data<AppState>) -> impl Responder {
    let snapshot = state.session().snapshot();
    HttpResponse::Ok().json(snapshot)
}
