//! Repository Traits

use kernel::id::PrincipalId;

use crate::domain::entity::attendance_record::AttendanceRecord;
use crate::error::AttendanceResult;

/// Attendance store
///
/// At most one record per `(owner_id, date)`; `create` fails with
/// `AttendanceError::AlreadyMarked` otherwise.
#[trait_variant::make(AttendanceRepository: Send)]
pub trait LocalAttendanceRepository {
    async fn create(&self, record: &AttendanceRecord) -> AttendanceResult<()>;

    /// Records of one owner, newest date first
    async fn list_by_owner(&self, owner_id: &PrincipalId) -> AttendanceResult<Vec<AttendanceRecord>>;
}
