use actix_web::{body::BoxBody, http::StatusCode, HttpRequest, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use snafu::{Location, Snafu};
use stratus_core::{ProviderError, StorageError, ValidationError, WeatherQueryId};
use tracing::error;
use utoipa::ToSchema;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display("{source}"))]
    Validation {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        source: ValidationError,
    },
    #[snafu(display("invalid JSON body: {message}"))]
    InvalidJsonBody {
        #[snafu(implicit)]
        location: Location,
        message: String,
    },
    #[snafu(display("Query not found."))]
    QueryNotFound {
        #[snafu(implicit)]
        location: Location,
        id: WeatherQueryId,
    },
    #[snafu(display("{source}"))]
    Provider {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        source: ProviderError,
    },
    #[snafu(display("the record store failed"))]
    Store {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        source: StorageError,
    },
}

/// Every failure leaves the service as `{"error": "<message>"}` plus a status
/// code telling the caller whether the fault is theirs or ours.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation { .. } | Error::InvalidJsonBody { .. } => StatusCode::BAD_REQUEST,
            Error::QueryNotFound { .. } => StatusCode::NOT_FOUND,
            Error::Provider { source, .. } => match source {
                // A location the provider does not know is the caller's
                // mistake, credential and availability problems are ours.
                ProviderError::LocationNotFound { .. } => StatusCode::BAD_REQUEST,
                ProviderError::Unauthorized { .. } | ProviderError::Unavailable { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Error::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        if self.status_code().is_server_error() {
            error!("request failed: {self:?}");
        }

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: format!("{self}"),
        })
    }
}

pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    error::InvalidJsonBodySnafu {
        message: err.to_string(),
    }
    .build()
    .into()
}
