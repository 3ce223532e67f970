//! Shared error mapping for sqlx persistence layer

use application::error::ApplicationError;

/// Map a sqlx error to an application-layer error
pub fn map_sqlx_error(e: sqlx::Error) -> ApplicationError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            ApplicationError::ExternalService(format!("Database unavailable: {e}"))
        },
        sqlx::Error::Database(db_err) => {
            ApplicationError::Internal(format!("Database error: {db_err}"))
        },
        other => ApplicationError::Internal(format!("Database error: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_timeout_maps_to_external_service() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolTimedOut),
            ApplicationError::ExternalService(_)
        ));
    }

    #[test]
    fn other_errors_map_to_internal() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::Protocol("bad frame".into())),
            ApplicationError::Internal(_)
        ));
    }
}
