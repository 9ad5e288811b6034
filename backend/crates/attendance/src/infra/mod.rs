//! Infrastructure Layer

pub mod memory;
pub mod postgres;

pub use memory::MemoryAttendanceRepository;
pub use postgres::PgAttendanceRepository;
