//! Attendance Backend Module
//!
//! Per-principal attendance marks. Any authenticated principal may mark a
//! date once and list its own records; ownership always comes from the
//! session token.
//!
//! Layout follows the auth crate: `domain/`, `application/`, `infra/`,
//! `presentation/`.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


pub use error::{AttendanceError, AttendanceResult};
pub use infra::{MemoryAttendanceRepository, PgAttendanceRepository};
pub use presentation::router::attendance_router;
