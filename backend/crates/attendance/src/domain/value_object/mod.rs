//! Value Object Module

pub mod attendance_date;
pub mod attendance_status;
