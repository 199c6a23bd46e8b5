use crate::{error::AppError, state::AppState};
use actix_web::middleware::Next;
use actix_web::{
    Error, ResponseError,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    web::Data,
};
use tracing::debug;

/// Rejects every request under the gated scope until someone has logged in.
pub async fn session_middleware(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let state = req
        .app_data::<Data<AppState>>()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("App state missing"))?;

    let authenticated = state.session().is_authenticated();
    if !authenticated {
        debug!(path = %req.path(), "Rejected request without a session");
        let resp = AppError::Unauthorized("Not logged in").error_response();
        return Ok(req.into_response(resp));
    }

    next.call(req).await
}
