//! MySQL implementation of the ContextRepository trait.
//!
//! Records live in `verification_contexts`. A tombstoned record keeps its row
//! with `deleted_at` set until the reaper purges it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use tracing::debug;
use uuid::Uuid;

use vg_core::domain::entities::{
    ContextKind, PurgeTarget, RecordState, SubjectStatus, VerificationContext,
};
use vg_core::errors::DomainError;
use vg_core::repositories::ContextRepository;

const COLUMNS: &str =
    "id, subject_id, token, expiry, context, pending_status, deleted_at, created_at, updated_at";

/// Rows per DELETE statement inside a batch
const DELETE_CHUNK: usize = 500;

/// MySQL implementation of ContextRepository
pub struct MySqlContextRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlContextRepository {
    /// Create a new MySQL context repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn db_err(action: &str, e: sqlx::Error) -> DomainError {
        DomainError::persistence(format!("Failed to {}: {}", action, e))
    }

    /// Convert database row to VerificationContext entity
    fn row_to_context(row: &sqlx::mysql::MySqlRow) -> Result<VerificationContext, DomainError> {
        let get = |column: &str, e: sqlx::Error| {
            DomainError::persistence(format!("Failed to get {}: {}", column, e))
        };

        let id: String = row.try_get("id").map_err(|e| get("id", e))?;
        let context: String = row.try_get("context").map_err(|e| get("context", e))?;
        let pending_status: Option<String> = row
            .try_get("pending_status")
            .map_err(|e| get("pending_status", e))?;
        let deleted_at: Option<DateTime<Utc>> =
            row.try_get("deleted_at").map_err(|e| get("deleted_at", e))?;

        Ok(VerificationContext {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::persistence(format!("Invalid context UUID: {}", e)))?,
            subject_id: row.try_get("subject_id").map_err(|e| get("subject_id", e))?,
            token: row.try_get("token").map_err(|e| get("token", e))?,
            expiry: row.try_get("expiry").map_err(|e| get("expiry", e))?,
            context: context
                .parse::<ContextKind>()
                .map_err(DomainError::persistence)?,
            pending_status: pending_status
                .map(|s| s.parse::<SubjectStatus>())
                .transpose()
                .map_err(DomainError::persistence)?,
            state: match deleted_at {
                Some(at) => RecordState::Tombstoned { at },
                None => RecordState::Live,
            },
            created_at: row.try_get("created_at").map_err(|e| get("created_at", e))?,
            updated_at: row.try_get("updated_at").map_err(|e| get("updated_at", e))?,
        })
    }

    /// `(?, ?), (?, ?), ...` for `count` row-value pairs
    fn pair_placeholders(count: usize) -> String {
        vec!["(?, ?)"; count].join(", ")
    }

    fn deleted_at(context: &VerificationContext) -> Option<DateTime<Utc>> {
        match context.state {
            RecordState::Tombstoned { at } => Some(at),
            RecordState::Live => None,
        }
    }
}

#[async_trait]
impl ContextRepository for MySqlContextRepository {
    async fn find_live_by_key(
        &self,
        subject_id: &str,
        context: ContextKind,
    ) -> Result<Option<VerificationContext>, DomainError> {
        let query = format!(
            "SELECT {} FROM verification_contexts \
             WHERE subject_id = ? AND context = ? AND deleted_at IS NULL \
             LIMIT 1",
            COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(subject_id)
            .bind(context.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::db_err("find verification context", e))?;

        row.as_ref().map(Self::row_to_context).transpose()
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<VerificationContext>, DomainError> {
        let query = format!(
            "SELECT {} FROM verification_contexts \
             WHERE token = ? AND deleted_at IS NULL \
             LIMIT 1",
            COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::db_err("find verification token", e))?;

        row.as_ref().map(Self::row_to_context).transpose()
    }

    async fn create(&self, context: VerificationContext) -> Result<VerificationContext, DomainError> {
        let query = r#"
            INSERT INTO verification_contexts (
                id, subject_id, token, expiry, context, pending_status, deleted_at, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(context.id.to_string())
            .bind(&context.subject_id)
            .bind(&context.token)
            .bind(&context.expiry)
            .bind(context.context.as_str())
            .bind(context.pending_status.map(|s| s.as_str()))
            .bind(Self::deleted_at(&context))
            .bind(context.created_at)
            .bind(context.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                let duplicate = e
                    .as_database_error()
                    .map(|db| db.is_unique_violation())
                    .unwrap_or(false);
                if duplicate {
                    DomainError::Validation {
                        message: "Token already exists".to_string(),
                    }
                } else {
                    Self::db_err("create verification context", e)
                }
            })?;

        Ok(context)
    }

    async fn save(&self, context: VerificationContext) -> Result<VerificationContext, DomainError> {
        let query = r#"
            UPDATE verification_contexts
            SET token = ?, expiry = ?, pending_status = ?, deleted_at = ?, updated_at = ?
            WHERE id = ?
        "#;

        sqlx::query(query)
            .bind(&context.token)
            .bind(&context.expiry)
            .bind(context.pending_status.map(|s| s.as_str()))
            .bind(Self::deleted_at(&context))
            .bind(context.updated_at)
            .bind(context.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| Self::db_err("save verification context", e))?;

        Ok(context)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM verification_contexts WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| Self::db_err("delete verification context", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn tombstone(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE verification_contexts
            SET deleted_at = ?, updated_at = ?
            WHERE id = ? AND deleted_at IS NULL
        "#;

        let result = sqlx::query(query)
            .bind(at)
            .bind(at)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| Self::db_err("tombstone verification context", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_all(&self, include_tombstoned: bool) -> Result<Vec<VerificationContext>, DomainError> {
        let filter = if include_tombstoned {
            ""
        } else {
            " WHERE deleted_at IS NULL"
        };
        let query = format!("SELECT {} FROM verification_contexts{}", COLUMNS, filter);

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Self::db_err("list verification contexts", e))?;

        rows.iter().map(Self::row_to_context).collect()
    }

    async fn batch_delete(&self, targets: &[PurgeTarget]) -> Result<u64, DomainError> {
        if targets.is_empty() {
            return Ok(0);
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| Self::db_err("begin batch delete", e))?;

        let mut removed = 0;
        for chunk in targets.chunks(DELETE_CHUNK) {
            // Matching on the token too leaves rows reissued since the snapshot alone
            let query = format!(
                "DELETE FROM verification_contexts WHERE (id, token) IN ({})",
                Self::pair_placeholders(chunk.len())
            );

            let mut statement = sqlx::query(&query);
            for target in chunk {
                statement = statement.bind(target.id.to_string()).bind(&target.token);
            }

            // Dropping `tx` on error rolls the whole batch back
            removed += statement
                .execute(&mut *tx)
                .await
                .map_err(|e| Self::db_err("batch delete verification contexts", e))?
                .rows_affected();
        }

        tx.commit()
            .await
            .map_err(|e| Self::db_err("commit batch delete", e))?;

        debug!(requested = targets.len(), removed, "Batch delete committed");
        Ok(removed)
    }
}
