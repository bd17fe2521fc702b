//! Translation of pool and Diesel failures into record store errors.

use tracing::debug;

use crate::domain::ports::RecordStoreError;

use super::pool::PoolError;

/// Map pool checkout and build failures to connection errors.
pub(crate) fn map_pool_error(error: PoolError) -> RecordStoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RecordStoreError::connection(message)
        }
    }
}

/// Map Diesel failures to record store errors.
///
/// Closed connections surface as connection errors so the HTTP layer can
/// report the store as unavailable; everything else is a query error.
pub(crate) fn map_diesel_error(error: diesel::result::Error) -> RecordStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    let error_message = error.to_string();
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            error = %error_message,
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => RecordStoreError::query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            RecordStoreError::connection(info.message().to_owned())
        }
        DieselError::DatabaseError(_, info) => RecordStoreError::query(info.message().to_owned()),
        _ => RecordStoreError::query(error_message),
    }
}

/// Convert a batch of loaded rows into domain values.
pub(crate) fn rows_into<R, T>(rows: Vec<R>) -> Result<Vec<T>, RecordStoreError>
where
    T: TryFrom<R, Error = RecordStoreError>,
{
    rows.into_iter().map(T::try_from).collect()
}
