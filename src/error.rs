use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::perks::PerksError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Perks error: {0}")]
    Perks(#[from] PerksError),
}

impl AppError {
    /// The perk source sits behind this server, so any failure to list
    /// perks is reported as a bad gateway.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Perks(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("{}", self);
        (self.status(), self.to_string()).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
