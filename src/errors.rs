use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};

use derive_more::Display;

use serde::Serialize;

#[derive(Serialize)]
struct JsonError {
    message: String,
}

#[derive(Debug, Display)]
pub enum ServiceError {
    #[display(fmt = "{}", message)]
    BadRequest { message: String },
    #[display(fmt = "{}", message)]
    Unauthorized { message: String },
    #[display(fmt = "Not Found")]
    NotFound,
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ServiceError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ServiceError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(JsonError {
            message: self.to_string(),
        })
    }
}
