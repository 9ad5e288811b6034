//! Domain Layer
//!
//! Attendance record entity, value objects and the repository trait.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::attendance_record::AttendanceRecord;
pub use repository::AttendanceRepository;
pub use value_object::{attendance_date::AttendanceDate, attendance_status::AttendanceStatus};
