//! Application Layer

pub mod list;
pub mod mark;

pub use list::ListAttendanceUseCase;
pub use mark::{MarkAttendanceInput, MarkAttendanceUseCase};
