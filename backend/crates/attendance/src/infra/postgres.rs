//! PostgreSQL Repository Implementations

use chrono::{DateTime, NaiveDate, Utc};
use kernel::error::conversions::{is_foreign_key_violation, is_unique_violation};
use kernel::id::{AttendanceRecordId, PrincipalId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::attendance_record::AttendanceRecord;
use crate::domain::repository::AttendanceRepository;
use crate::domain::value_object::{
    attendance_date::AttendanceDate, attendance_status::AttendanceStatus,
};
use crate::error::{AttendanceError, AttendanceResult};

/// PostgreSQL-backed attendance store
#[derive(Clone)]
pub struct PgAttendanceRepository {
    pool: PgPool,
}

impl PgAttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl AttendanceRepository for PgAttendanceRepository {
    async fn create(&self, record: &AttendanceRecord) -> AttendanceResult<()> {
        sqlx::query(
            r#"
            INSERT INTO attendance_records (
                attendance_id,
                owner_id,
                date,
                status,
                created_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(record.attendance_id.as_uuid())
        .bind(record.owner_id.as_uuid())
        .bind(record.date.as_naive())
        .bind(record.status.code())
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AttendanceError::AlreadyMarked { date: record.date }
            } else if is_foreign_key_violation(&e) {
                AttendanceError::OwnerNotFound
            } else {
                AttendanceError::Database(e)
            }
        })?;

        Ok(())
    }

    async fn list_by_owner(&self, owner_id: &PrincipalId) -> AttendanceResult<Vec<AttendanceRecord>> {
        let rows = sqlx::query_as::<_, AttendanceRow>(
            r#"
            SELECT
                attendance_id,
                owner_id,
                date,
                status,
                created_at
            FROM attendance_records
            WHERE owner_id = $1
            ORDER BY date DESC
            "#,
        )
        .bind(owner_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(AttendanceRow::into_record).collect()
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct AttendanceRow {
    attendance_id: Uuid,
    owner_id: Uuid,
    date: NaiveDate,
    status: String,
    created_at: DateTime<Utc>,
}

impl AttendanceRow {
    fn into_record(self) -> AttendanceResult<AttendanceRecord> {
        let status = AttendanceStatus::from_code(&self.status).ok_or_else(|| {
            AttendanceError::Internal(format!(
                "Corrupt attendance row {}: status {:?}",
                self.attendance_id, self.status
            ))
        })?;

        Ok(AttendanceRecord {
            attendance_id: AttendanceRecordId::from_uuid(self.attendance_id),
            owner_id: PrincipalId::from_uuid(self.owner_id),
            date: AttendanceDate::from_naive(self.date),
            status,
            created_at: self.created_at,
        })
    }
}
