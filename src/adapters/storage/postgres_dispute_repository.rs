//! PostgreSQL implementation of DisputeRepository.
//!
//! Schema lives in `migrations/0001_create_disputes.sql`.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;
use std::path::Path;

use crate::domain::dispute::{Bank, DisputeRecord, DisputeStatus, DisputeType, Priority};
use crate::domain::foundation::{DisputeId, DomainError, ErrorCode, StateMachine, Timestamp};
use crate::ports::{DisputeFilter, DisputeRepository};

const SELECT_COLUMNS: &str = r#"
    SELECT id, dispute_type, bank, amount, incident_date, description,
           card_last_four, status, priority, created_at
    FROM disputes
"#;

/// PostgreSQL implementation of DisputeRepository.
#[derive(Clone)]
pub struct PostgresDisputeRepository {
    pool: PgPool,
}

impl PostgresDisputeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies pending migrations from `dir`.
    pub async fn run_migrations(&self, dir: &Path) -> Result<(), DomainError> {
        let migrator = sqlx::migrate::Migrator::new(dir)
            .await
            .map_err(|e| db_error("load migrations", e))?;
        migrator
            .run(&self.pool)
            .await
            .map_err(|e| db_error("run migrations", e))?;
        Ok(())
    }
}

fn db_error(action: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to {}: {}", action, e),
    )
}

#[async_trait]
impl DisputeRepository for PostgresDisputeRepository {
    async fn create(&self, record: &DisputeRecord) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO disputes (
                id, dispute_type, bank, amount, incident_date, description,
                card_last_four, status, priority, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(record.id.as_str())
        .bind(record.dispute_type.label())
        .bind(record.bank.name())
        .bind(record.amount)
        .bind(&record.date)
        .bind(&record.description)
        .bind(&record.card_last_four)
        .bind(record.status.as_str())
        .bind(record.priority.as_str())
        .bind(record.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("insert dispute", e))?;

        Ok(())
    }

    async fn get(&self, id: &DisputeId) -> Result<Option<DisputeRecord>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch dispute", e))?;

        row.map(row_to_record).transpose()
    }

    async fn list(&self, filter: &DisputeFilter) -> Result<Vec<DisputeRecord>, DomainError> {
        let rows = sqlx::query(&format!(
            "{} WHERE ($1::TEXT IS NULL OR status = $1) \
               AND ($2::TEXT IS NULL OR LOWER(bank) = LOWER($2)) \
             ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.bank.as_deref().map(str::trim))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list disputes", e))?;

        rows.into_iter().map(row_to_record).collect()
    }

    async fn update_status(
        &self,
        id: &DisputeId,
        status: DisputeStatus,
    ) -> Result<DisputeRecord, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("begin transaction", e))?;

        let row = sqlx::query(&format!("{} WHERE id = $1 FOR UPDATE", SELECT_COLUMNS))
            .bind(id.as_str())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| db_error("fetch dispute", e))?;

        let mut record = match row {
            Some(row) => row_to_record(row)?,
            None => {
                return Err(DomainError::new(
                    ErrorCode::DisputeNotFound,
                    format!("Dispute not found: {}", id),
                ))
            }
        };

        record.status = record.status.transition_to(status).map_err(|e| {
            DomainError::new(ErrorCode::InvalidStateTransition, e.to_string())
                .with_detail("dispute_id", id.as_str())
        })?;

        sqlx::query("UPDATE disputes SET status = $2 WHERE id = $1")
            .bind(id.as_str())
            .bind(record.status.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("update dispute status", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("commit transaction", e))?;

        Ok(record)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Row mapping
// ════════════════════════════════════════════════════════════════════════════════

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| db_error(&format!("get {}", name), e))
}

fn invalid_column(name: &str, value: &str) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Invalid {} in row: {}", name, value),
    )
}

fn row_to_record(row: PgRow) -> Result<DisputeRecord, DomainError> {
    let id: String = column(&row, "id")?;
    let type_label: String = column(&row, "dispute_type")?;
    let bank_name: String = column(&row, "bank")?;
    let status: String = column(&row, "status")?;
    let priority: String = column(&row, "priority")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(&row, "created_at")?;

    Ok(DisputeRecord {
        id: DisputeId::parse(&id).map_err(|_| invalid_column("id", &id))?,
        dispute_type: DisputeType::from_label(&type_label)
            .ok_or_else(|| invalid_column("dispute_type", &type_label))?,
        bank: Bank::from_name(&bank_name).ok_or_else(|| invalid_column("bank", &bank_name))?,
        amount: column(&row, "amount")?,
        date: column(&row, "incident_date")?,
        description: column(&row, "description")?,
        card_last_four: column(&row, "card_last_four")?,
        status: DisputeStatus::parse(&status).ok_or_else(|| invalid_column("status", &status))?,
        priority: Priority::parse(&priority)
            .ok_or_else(|| invalid_column("priority", &priority))?,
        created_at: Timestamp::from_datetime(created_at),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_labels_parse_back() {
        for t in DisputeType::ALL {
            assert_eq!(DisputeType::from_label(t.label()), Some(t));
        }
        for b in Bank::ALL {
            assert_eq!(Bank::from_name(b.name()), Some(b));
        }
        for s in DisputeStatus::ALL {
            assert_eq!(DisputeStatus::parse(s.as_str()), Some(s));
        }
        for p in Priority::ALL {
            assert_eq!(Priority::parse(p.as_str()), Some(p));
        }
    }

    #[test]
    fn invalid_column_is_database_error() {
        let err = invalid_column("status", "lost");
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(err.message.contains("lost"));
    }
}
