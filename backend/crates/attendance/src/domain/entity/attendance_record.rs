use chrono::{DateTime, Utc};
use kernel::id::{AttendanceRecordId, PrincipalId};

use crate::domain::value_object::{attendance_date::AttendanceDate, attendance_status::AttendanceStatus};

/// One attendance mark; immutable once stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub attendance_id: AttendanceRecordId,
    /// Taken from the session token, never from the request body
    pub owner_id: PrincipalId,
    pub date: AttendanceDate,
    pub status: AttendanceStatus,
    pub created_at: DateTime<Utc>,
}

impl AttendanceRecord {
    pub fn new(owner_id: PrincipalId, date: AttendanceDate, status: AttendanceStatus) -> Self {
        Self {
            attendance_id: AttendanceRecordId::new(),
            owner_id,
            date,
            status,
            created_at: Utc::now(),
        }
    }
}
