pub mod attendance_record;
