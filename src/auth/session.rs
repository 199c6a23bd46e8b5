use crate::{error::AppError, model::session::SessionUser, state::AppState};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web::Data};
use futures::future::{Ready, ready};

/// The signed-in user, extracted from the process session.
pub struct Authenticated {
    pub email: String,
}

impl From<SessionUser> for Authenticated {
    fn from(user: SessionUser) -> Self {
        Self { email: user.email }
    }
}

impl FromRequest for Authenticated {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let state = match req.app_data::<Data<AppState>>() {
            Some(s) => s,
            None => {
                return ready(Err(actix_web::error::ErrorInternalServerError(
                    "App state missing",
                )));
            }
        };

        let session = state.session();
        if !session.is_authenticated() {
            return ready(Err(AppError::Unauthorized("Not logged in").into()));
        }

        match session.current_user() {
            Some(user) => ready(Ok(user.clone().into())),
            None => ready(Err(AppError::Unauthorized("Not logged in").into())),
        }
    }
}
