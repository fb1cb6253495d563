pub mod accel_read;
pub mod sample_tick;
pub mod standby_control;
