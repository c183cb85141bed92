use crate::validation::ValidationError;
use actix_web::body::BoxBody;
use actix_web::{HttpResponse, ResponseError};
use sea_orm::DbErr;
use superheroes_common::db::DatabaseErrors;
use superheroes_common::error::{ErrorInformation, ValidationErrors};
use superheroes_common::model::FieldsError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Projection(#[from] FieldsError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Database(anyhow::Error),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DbErr> for Error {
    fn from(value: DbErr) -> Self {
        // a write referring to missing rows, or breaking a constraint, is the client's fault
        if value.is_foreign_key_violation() || value.is_check_violation() {
            Self::Validation(ValidationError::Constraint(value.to_string()))
        } else {
            Self::Database(value.into())
        }
    }
}

impl ResponseError for Error {
    fn error_response(&self) -> HttpResponse<BoxBody> {
        match self {
            Self::NotFound(_) => {
                HttpResponse::NotFound().json(ErrorInformation::new(self.to_string(), ""))
            }
            Self::Validation(err) => {
                log::info!("Rejecting write: {err}");
                HttpResponse::BadRequest().json(ValidationErrors::default())
            }
            Self::Projection(err) => {
                HttpResponse::BadRequest().json(ErrorInformation::new("Bad request", err))
            }
            Self::Json(_) | Self::Database(_) | Self::Internal(_) => {
                log::error!("Failed to process request: {self}");
                HttpResponse::InternalServerError()
                    .json(ErrorInformation::new("Internal Server Error", ""))
            }
        }
    }
}
