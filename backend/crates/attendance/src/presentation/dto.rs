//! API DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::MarkAttendanceInput;
use crate::domain::entity::attendance_record::AttendanceRecord;
use crate::domain::value_object::{
    attendance_date::AttendanceDate, attendance_status::AttendanceStatus,
};

/// Mark attendance request; the owner comes from the token
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarkAttendanceRequest {
    /// `YYYY-MM-DD`
    pub date: Option<String>,
    /// `present` | `absent`
    pub status: Option<String>,
}

impl From<MarkAttendanceRequest> for MarkAttendanceInput {
    fn from(req: MarkAttendanceRequest) -> Self {
        MarkAttendanceInput {
            date: req.date,
            status: req.status,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceResponse {
    pub attendance_id: Uuid,
    pub principal_id: Uuid,
    pub date: AttendanceDate,
    pub status: AttendanceStatus,
    pub created_at: DateTime<Utc>,
}

impl From<&AttendanceRecord> for AttendanceResponse {
    fn from(r: &AttendanceRecord) -> Self {
        AttendanceResponse {
            attendance_id: r.attendance_id.into_uuid(),
            principal_id: r.owner_id.into_uuid(),
            date: r.date,
            status: r.status,
            created_at: r.created_at,
        }
    }
}
