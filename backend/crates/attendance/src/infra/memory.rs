//! In-memory attendance store

use std::sync::Arc;

use kernel::id::PrincipalId;
use tokio::sync::RwLock;

use crate::domain::entity::attendance_record::AttendanceRecord;
use crate::domain::repository::AttendanceRepository;
use crate::error::{AttendanceError, AttendanceResult};

#[derive(Debug, Clone, Default)]
pub struct MemoryAttendanceRepository {
    records: Arc<RwLock<Vec<AttendanceRecord>>>,
}

impl MemoryAttendanceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }
}

impl AttendanceRepository for MemoryAttendanceRepository {
    async fn create(&self, record: &AttendanceRecord) -> AttendanceResult<()> {
        let mut records = self.records.write().await;
        if records
            .iter()
            .any(|r| r.owner_id == record.owner_id && r.date == record.date)
        {
            return Err(AttendanceError::AlreadyMarked { date: record.date });
        }
        records.push(record.clone());
        Ok(())
    }

    async fn list_by_owner(&self, owner_id: &PrincipalId) -> AttendanceResult<Vec<AttendanceRecord>> {
        let mut mine: Vec<AttendanceRecord> = self
            .records
            .read()
            .await
            .iter()
            .filter(|r| &r.owner_id == owner_id)
            .cloned()
            .collect();
        mine.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(mine)
    }
}
