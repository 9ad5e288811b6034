//! Mark Attendance Use Case

use std::sync::Arc;

use kernel::error::app_error::AppError;
use kernel::id::PrincipalId;

use crate::domain::entity::attendance_record::AttendanceRecord;
use crate::domain::repository::AttendanceRepository;
use crate::domain::value_object::{
    attendance_date::AttendanceDate, attendance_status::AttendanceStatus,
};
use crate::error::{AttendanceError, AttendanceResult};

#[derive(Debug, Default)]
pub struct MarkAttendanceInput {
    pub date: Option<String>,
    pub status: Option<String>,
}

pub struct MarkAttendanceUseCase<R>
where
    R: AttendanceRepository,
{
    repo: Arc<R>,
}

impl<R> MarkAttendanceUseCase<R>
where
    R: AttendanceRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        owner_id: PrincipalId,
        input: MarkAttendanceInput,
    ) -> AttendanceResult<AttendanceRecord> {
        let date = input.date.filter(|d| !d.trim().is_empty());
        let status = input.status.filter(|s| !s.trim().is_empty());

        let (date, status) = match (date, status) {
            (Some(date), Some(status)) => (date, status),
            (date, status) => {
                let missing: Vec<&'static str> = [("date", date.is_none()), ("status", status.is_none())]
                    .into_iter()
                    .filter_map(|(field, absent)| absent.then_some(field))
                    .collect();
                return Err(AttendanceError::Validation(AppError::missing_fields(&missing)));
            }
        };

        let record = AttendanceRecord::new(
            owner_id,
            AttendanceDate::parse(&date)?,
            AttendanceStatus::parse(&status)?,
        );

        self.repo.create(&record).await?;

        tracing::info!(
            owner_id = %record.owner_id,
            date = %record.date,
            status = %record.status,
            "Attendance marked"
        );

        Ok(record)
    }
}
