//! Serial report formatting.

use core::fmt::Write;

use heapless::String;

use crate::accel::GForce;

/// Report line capacity; the worst case line is 35 bytes.
pub const REPORT_LINE_MAX: usize = 48;

/// Formats one sample as a serial report line.
///
/// Each axis is rendered sign-aware with three decimal digits,
/// right-aligned in six characters, one line per sample:
/// `X: -0.125g, Y:  0.003g, Z:  0.998g`.
pub fn format_report(g: &GForce) -> String<REPORT_LINE_MAX> {
    let mut line = String::new();
    // Cannot overflow: 3 axes of at most 10 bytes, 2 separators, newline.
    let _ = write!(line, "X: {:6.3}g, Y: {:6.3}g, Z: {:6.3}g\n", g.x, g.y, g.z);
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accel::{to_g_force, RawAxes};

    #[test]
    fn formats_sign_aware_fixed_width() {
        let g = GForce { x: -0.125, y: 0.003, z: 0.998 };
        assert_eq!(&format_report(&g)[..], "X: -0.125g, Y:  0.003g, Z:  0.998g\n");
    }

    #[test]
    fn formats_converted_raw_sample() {
        // Raw (400, -400, 16000) at 0.00025 g/LSB.
        let g = to_g_force(RawAxes { x: 400, y: -400, z: 16000 });
        assert_eq!(&format_report(&g)[..], "X:  0.100g, Y: -0.100g, Z:  4.000g\n");
    }

    #[test]
    fn zero_renders_positive_width() {
        let g = GForce { x: 0.0, y: 0.0, z: 0.0 };
        assert_eq!(&format_report(&g)[..], "X:  0.000g, Y:  0.000g, Z:  0.000g\n");
    }
}
