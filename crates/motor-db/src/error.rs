//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CoreError (ProductService) ← client input vs internal                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError ← status code + envelope                                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::error::ErrorKind;
use thiserror::Error;

/// Database operation errors.
///
/// These errors wrap sqlx errors and sort them into the classes the
/// service layer needs to tell bad input from a broken database.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    ///
    /// ## When This Occurs
    /// - `fetch_one` returns no rows
    /// - An id-addressed update or delete touched nothing
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation.
    #[error("Duplicate entry: {0}")]
    UniqueViolation(String),

    /// Foreign key constraint violation.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// NOT NULL or CHECK constraint violation.
    ///
    /// ## When This Occurs
    /// - Blank `code` or `location` slipping past validation
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// The database rejected a bound value (type mismatch, too big, out of
    /// range).
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A stored value could not be turned into a domain value.
    #[error("Decode failed: {0}")]
    Decode(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// True when the failure was caused by the data the caller supplied
    /// rather than by the database being unavailable or broken.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DbError::UniqueViolation(_)
                | DbError::ForeignKeyViolation(_)
                | DbError::ConstraintViolation(_)
                | DbError::QueryFailed(_)
        )
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound         → DbError::NotFound
/// sqlx::Error::Database            → by ErrorKind (unique / fk / constraint),
///                                    then by SQLite result code
///                                    (mismatch / toobig / range → QueryFailed,
///                                     everything else → Internal)
/// sqlx::Error::ColumnDecode etc.   → DbError::Decode
/// sqlx::Error::PoolTimedOut        → DbError::PoolExhausted
/// Other                            → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message().to_string();
                match db_err.kind() {
                    ErrorKind::UniqueViolation => DbError::UniqueViolation(msg),
                    ErrorKind::ForeignKeyViolation => DbError::ForeignKeyViolation(msg),
                    ErrorKind::NotNullViolation | ErrorKind::CheckViolation => {
                        DbError::ConstraintViolation(msg)
                    }
                    _ => from_result_code(db_err.code().as_deref(), msg),
                }
            }

            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                DbError::Decode(err.to_string())
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

// SQLite primary result codes caused by the values a statement was given.
const SQLITE_TOOBIG: i32 = 18;
const SQLITE_MISMATCH: i32 = 20;
const SQLITE_RANGE: i32 = 25;

/// Sorts a database error that is not a constraint violation by its SQLite
/// result code.
///
/// sqlx reports the extended code; its low byte is the primary code. Busy,
/// locked, read-only, I/O, corruption, full-disk, schema and SQL errors are
/// failures of the database, not of the input.
fn from_result_code(code: Option<&str>, msg: String) -> DbError {
    let primary = code
        .and_then(|code| code.parse::<i32>().ok())
        .map(|extended| extended & 0xff);

    match primary {
        Some(SQLITE_TOOBIG | SQLITE_MISMATCH | SQLITE_RANGE) => DbError::QueryFailed(msg),
        _ => DbError::Internal(msg),
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
