//! SQLite-based storage implementation

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use idcard_core::Role;
use rusqlite::{params, Connection};

use super::{IdCardRequest, NewIdCardRequest, RequestStore, StoreResult};
use crate::error::ServiceError;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// SQLite-based request store
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create a SQLite database at the given path
    pub fn open(path: &str) -> Result<Self, ServiceError> {
        let conn = Connection::open(path).map_err(|e| ServiceError::Store(e.to_string()))?;

        // Run migrations
        Self::migrate(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run database migrations
    fn migrate(conn: &Connection) -> Result<(), ServiceError> {
        let current_version = Self::get_schema_version(conn)?;

        if current_version < SCHEMA_VERSION {
            tracing::info!(
                current = current_version,
                target = SCHEMA_VERSION,
                "Running database migrations"
            );

            if current_version < 1 {
                Self::migrate_v1(conn)?;
            }

            conn.execute(
                "INSERT OR REPLACE INTO schema_version (version) VALUES (?1)",
                params![SCHEMA_VERSION],
            )
            .map_err(|e| ServiceError::Store(e.to_string()))?;

            tracing::info!("Database migrations complete");
        }

        Ok(())
    }

    /// Get current schema version (0 if no schema exists)
    fn get_schema_version(conn: &Connection) -> Result<i32, ServiceError> {
        let table_exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
                [],
                |row| row.get(0),
            )
            .map_err(|e| ServiceError::Store(e.to_string()))?;

        if !table_exists {
            return Ok(0);
        }

        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
            row.get::<_, Option<i32>>(0).map(|v| v.unwrap_or(0))
        })
        .map_err(|e| ServiceError::Store(e.to_string()))
    }

    /// Migration to version 1: initial schema
    fn migrate_v1(conn: &Connection) -> Result<(), ServiceError> {
        conn.execute_batch(
            r#"
            -- Schema version tracking
            CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY
            );

            -- ID-card requests
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                firstname TEXT NOT NULL,
                lastname TEXT NOT NULL,
                middlename TEXT,
                department TEXT NOT NULL,
                identifier TEXT NOT NULL,
                role TEXT NOT NULL,
                passport_photo_link TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_users_identifier ON users(identifier);
            "#,
        )
        .map_err(|e| ServiceError::Store(e.to_string()))?;

        Ok(())
    }

    fn row_to_request(row: &rusqlite::Row<'_>) -> rusqlite::Result<IdCardRequest> {
        let role_str: String = row.get(6)?;
        let role = Role::from_str(&role_str).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                6,
                rusqlite::types::Type::Text,
                format!("unknown role: {}", role_str).into(),
            )
        })?;
        let created_at: String = row.get(8)?;

        Ok(IdCardRequest {
            id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            middle_name: row.get(3)?,
            department: row.get(4)?,
            identifier: row.get(5)?,
            role,
            passport_photo_link: row.get(7)?,
            created_at: DateTime::parse_from_rfc3339(&created_at)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
        })
    }
}

const SELECT_COLUMNS: &str = "id, firstname, lastname, middlename, department, identifier, \
                              role, passport_photo_link, created_at";

impl RequestStore for SqliteStore {
    fn insert(&self, request: NewIdCardRequest) -> StoreResult<IdCardRequest> {
        let conn = self.conn.lock().unwrap();
        let created_at = Utc::now();

        conn.execute(
            "INSERT INTO users (firstname, lastname, middlename, department, identifier, role, passport_photo_link, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                request.first_name,
                request.last_name,
                request.middle_name,
                request.department,
                request.identifier,
                request.role.as_str(),
                request.passport_photo_link,
                created_at.to_rfc3339(),
            ],
        )
        .map_err(|e| ServiceError::Store(e.to_string()))?;

        Ok(IdCardRequest {
            id: conn.last_insert_rowid(),
            first_name: request.first_name,
            last_name: request.last_name,
            middle_name: request.middle_name,
            department: request.department,
            identifier: request.identifier,
            role: request.role,
            passport_photo_link: request.passport_photo_link,
            created_at,
        })
    }

    fn list_all(&self) -> StoreResult<Vec<IdCardRequest>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn
            .prepare(&format!("SELECT {} FROM users ORDER BY id", SELECT_COLUMNS))
            .map_err(|e| ServiceError::Fetch(e.to_string()))?;

        let rows = stmt
            .query_map([], Self::row_to_request)
            .map_err(|e| ServiceError::Fetch(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ServiceError::Fetch(e.to_string()))?;

        Ok(rows)
    }

    fn identifier_exists(&self, identifier: &str) -> StoreResult<bool> {
        let conn = self.conn.lock().unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM users WHERE identifier = ?1",
                params![identifier],
                |row| row.get(0),
            )
            .map_err(|e| ServiceError::Store(e.to_string()))?;

        Ok(count > 0)
    }
}
