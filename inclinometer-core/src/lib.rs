//! Hardware-independent core of the inclinometer firmware.
//!
//! Everything in this crate runs on the host as well as on the target:
//! - [`accel`]: the three-axis accelerometer driver and its bus abstraction
//! - [`gate`]: the single-slot notification handoff between the periodic
//!   notifier and the sampling loop
//! - [`report`]: serial report line formatting
//! - [`power`]: power request encoding for the dormant transition
//!
//! The firmware crate wires these pieces to the RP2350 peripherals.

#![no_std]

#[cfg(test)]
extern crate std;

pub mod accel;
pub mod gate;
pub mod power;
pub mod report;
