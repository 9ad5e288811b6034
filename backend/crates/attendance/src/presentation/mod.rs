//! Presentation Layer

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::AttendanceAppState;
pub use router::attendance_router;
