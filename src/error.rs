use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl AppError {
    pub fn trip_not_found(id: impl Into<String>) -> Self {
        AppError::NotFound {
            entity: "trip",
            id: id.into(),
        }
    }

    pub fn item_not_found(id: impl Into<String>) -> Self {
        AppError::NotFound {
            entity: "itinerary item",
            id: id.into(),
        }
    }
}

/// Rejected form input. Carries enough context to show the user what to fix.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{field} is not a valid date: {value:?}")]
    InvalidDate { field: &'static str, value: String },
    #[error("end date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
    #[error("budget must be a non-negative number, got {0:?}")]
    InvalidBudget(String),
    #[error("day must be a whole number, got {0:?}")]
    InvalidDay(String),
    #[error("time must be HH:MM, got {0:?}")]
    InvalidTime(String),
    #[error("day {day} is outside the trip (days 1 to {span})")]
    DayOutOfRange { day: u32, span: i64 },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Config(_) | AppError::Io(_) => {
                tracing::error!("internal error: {self}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };

        (status, self.to_string()).into_response()
    }
}
