//! Dormant power transition
//!
//! Applies a pre-encoded power request to the RP2350 power manager and
//! stops the crystal oscillator. The register words are produced by
//! `inclinometer_core::power`; this module only sequences the writes.
//!
//! Contract: the caller names the wake source in the request; when this
//! function returns, the wake condition has fired and execution has
//! resumed. There is no way to cancel the transition from software - a
//! misconfigured wake source leaves the device unrecoverable without an
//! external reset.

use cortex_m::asm;
use embassy_rp::pac;
use inclinometer_core::power::{
    encode_state_request, encode_wake, encode_wake_disarm, encode_wake_status_clear,
    PowerRequest, XOSC_AWAKE_MAGIC, XOSC_DORMANT_MAGIC,
};

/// Suspends until the wake condition in `request` fires.
///
/// Sequence: disarm the power-up block and clear its latched status, arm
/// the requested wake source, request the power domains off, stop the
/// oscillator, then wait for interrupt. Execution resumes at the next
/// instruction once the wake event arrives; on return the wake source is
/// disarmed again and the oscillator control is back in its running state.
pub fn enter_dormant(request: &PowerRequest) {
    let pwrup = pac::POWMAN.pwrup(0).as_ptr() as *mut u32;
    let state = pac::POWMAN.state().as_ptr() as *mut u32;
    let dormant = pac::XOSC.dormant().as_ptr() as *mut u32;

    unsafe {
        // A stale latched detection would end the dormant state
        // immediately, so disarm and clear before arming.
        pwrup.write_volatile(encode_wake_disarm());
        pwrup.write_volatile(encode_wake_status_clear());
        pwrup.write_volatile(encode_wake(request.wake));

        state.write_volatile(encode_state_request(request.domains));
        dormant.write_volatile(XOSC_DORMANT_MAGIC);
        asm::wfi();

        // Running again: restore the oscillator control word and return
        // the wake pin to an ordinary input until the next request.
        dormant.write_volatile(XOSC_AWAKE_MAGIC);
        pwrup.write_volatile(encode_wake_disarm());
    }
}
