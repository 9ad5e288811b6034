//! List Attendance Use Case

use std::sync::Arc;

use kernel::id::PrincipalId;

use crate::domain::entity::attendance_record::AttendanceRecord;
use crate::domain::repository::AttendanceRepository;
use crate::error::AttendanceResult;

pub struct ListAttendanceUseCase<R>
where
    R: AttendanceRepository,
{
    repo: Arc<R>,
}

impl<R> ListAttendanceUseCase<R>
where
    R: AttendanceRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// The caller's own records, newest date first
    pub async fn execute(&self, owner_id: PrincipalId) -> AttendanceResult<Vec<AttendanceRecord>> {
        self.repo.list_by_owner(&owner_id).await
    }
}
