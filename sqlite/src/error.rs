use snafu::{Location, Snafu};
use stratus_core::StorageError;
use tracing::error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display("failed to open the sqlite database"))]
    Connection {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: sqlx::Error,
    },
    #[snafu(display("failed to run sqlite migrations"))]
    Migration {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: sqlx::migrate::MigrateError,
    },
    #[snafu(display("a query related error occured"))]
    Query {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: sqlx::Error,
    },
    #[snafu(display("failed to parse the stored date '{value}'"))]
    DateConversion {
        #[snafu(implicit)]
        location: Location,
        value: String,
        #[snafu(source)]
        error: chrono::ParseError,
    },
    #[snafu(display("failed to parse the stored timestamp '{value}'"))]
    TimestampConversion {
        #[snafu(implicit)]
        location: Location,
        value: String,
        #[snafu(source)]
        error: chrono::ParseError,
    },
    #[snafu(display("failed to convert a snapshot to/from its stored form"))]
    JsonConversion {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: serde_json::Error,
    },
}

impl From<Error> for StorageError {
    fn from(value: Error) -> Self {
        use stratus_core::storage_error::{
            ConnectionSnafu, DataConversionSnafu, MigrationSnafu, QuerySnafu,
        };

        // The engine-specific cause stops here, log it before it is gone.
        error!("sqlite adapter error: {value:?}");

        match value {
            Error::Connection { .. } => ConnectionSnafu.build(),
            Error::Migration { .. } => MigrationSnafu.build(),
            Error::Query { .. } => QuerySnafu.build(),
            Error::DateConversion { .. }
            | Error::TimestampConversion { .. }
            | Error::JsonConversion { .. } => DataConversionSnafu.build(),
        }
    }
}
