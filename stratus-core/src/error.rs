use chrono::NaiveDate;
use snafu::{Location, Snafu};

/// Errors produced while judging request input. These are the only errors a
/// caller can fix by changing their request.
#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum ValidationError {
    #[snafu(display("missing required field '{field}'"))]
    MissingField {
        #[snafu(implicit)]
        location: Location,
        field: &'static str,
    },
    #[snafu(display("'{value}' is not a valid date, expected the format YYYY-MM-DD"))]
    InvalidDateFormat {
        #[snafu(implicit)]
        location: Location,
        value: String,
        #[snafu(source)]
        error: chrono::ParseError,
    },
    #[snafu(display("start_date {start} cannot be after end_date {end}"))]
    InvalidRange {
        #[snafu(implicit)]
        location: Location,
        start: NaiveDate,
        end: NaiveDate,
    },
}

/// Failure modes of the external weather provider, normalized from whatever
/// transport or status problem actually occurred.
#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum ProviderError {
    #[snafu(display("the weather provider rejected our credentials"))]
    Unauthorized {
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("the weather provider does not know the location '{value}'"))]
    LocationNotFound {
        #[snafu(implicit)]
        location: Location,
        value: String,
    },
    #[snafu(display("the weather provider is currently unavailable"))]
    Unavailable {
        #[snafu(implicit)]
        location: Location,
    },
}

/// Persistence failures surfaced through the storage port. The adapter logs
/// the engine-specific cause before normalizing to one of these.
#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum StorageError {
    #[snafu(display("failed to acquire a database connection"))]
    Connection {
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("failed to run database migrations"))]
    Migration {
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("a query related error occured"))]
    Query {
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("failed to convert stored data to its domain representation"))]
    DataConversion {
        #[snafu(implicit)]
        location: Location,
    },
}
