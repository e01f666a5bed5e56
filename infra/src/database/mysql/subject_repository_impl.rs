//! MySQL implementation of the SubjectRepository trait.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use vg_core::domain::entities::{Subject, SubjectStatus};
use vg_core::errors::DomainError;
use vg_core::repositories::SubjectRepository;

/// MySQL implementation of SubjectRepository
pub struct MySqlSubjectRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlSubjectRepository {
    /// Create a new MySQL subject repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_subject(row: &sqlx::mysql::MySqlRow) -> Result<Subject, DomainError> {
        let get = |column: &str, e: sqlx::Error| {
            DomainError::persistence(format!("Failed to get {}: {}", column, e))
        };

        let id: String = row.try_get("id").map_err(|e| get("id", e))?;
        let status: String = row.try_get("status").map_err(|e| get("status", e))?;

        Ok(Subject {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::persistence(format!("Invalid subject UUID: {}", e)))?,
            subject_key: row.try_get("subject_key").map_err(|e| get("subject_key", e))?,
            username: row.try_get("username").map_err(|e| get("username", e))?,
            first_name: row.try_get("first_name").map_err(|e| get("first_name", e))?,
            last_name: row.try_get("last_name").map_err(|e| get("last_name", e))?,
            email: row.try_get("email").map_err(|e| get("email", e))?,
            status: status
                .parse::<SubjectStatus>()
                .map_err(DomainError::persistence)?,
            updated_at: row.try_get("updated_at").map_err(|e| get("updated_at", e))?,
        })
    }
}

#[async_trait]
impl SubjectRepository for MySqlSubjectRepository {
    async fn find_by_subject_key(&self, key: &str) -> Result<Option<Subject>, DomainError> {
        let query = r#"
            SELECT id, subject_key, username, first_name, last_name, email, status, updated_at
            FROM subjects
            WHERE subject_key = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::persistence(format!("Failed to find subject: {}", e)))?;

        row.as_ref().map(Self::row_to_subject).transpose()
    }

    async fn save(&self, subject: Subject) -> Result<Subject, DomainError> {
        // Upsert keyed on subject_key; an unchanged row is left as is
        let query = r#"
            INSERT INTO subjects (
                id, subject_key, username, first_name, last_name, email, status, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                username = VALUES(username),
                first_name = VALUES(first_name),
                last_name = VALUES(last_name),
                email = VALUES(email),
                status = VALUES(status),
                updated_at = VALUES(updated_at)
        "#;

        sqlx::query(query)
            .bind(subject.id.to_string())
            .bind(&subject.subject_key)
            .bind(&subject.username)
            .bind(&subject.first_name)
            .bind(&subject.last_name)
            .bind(&subject.email)
            .bind(subject.status.as_str())
            .bind(subject.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::persistence(format!("Failed to save subject: {}", e)))?;

        Ok(subject)
    }
}
