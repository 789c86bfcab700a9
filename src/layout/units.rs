//! Length unit conversion.
//!
//! Slide geometry is expressed in inches; the presentation format stores
//! lengths as English Metric Units (EMU), an integer unit with
//! 914 400 EMU per inch and 12 700 EMU per point.

/// EMU per inch.
pub const EMUS_PER_INCH: i64 = 914_400;

/// EMU per typographic point (1/72 inch).
pub const EMUS_PER_PT: i64 = 12_700;

/// Points per inch.
pub const POINTS_PER_INCH: f64 = 72.0;

/// Convert inches to EMU, truncating toward zero.
#[inline]
pub fn inches_to_emu(inches: f64) -> i64 {
    (inches * EMUS_PER_INCH as f64) as i64
}

/// Convert EMU to inches.
#[inline]
pub fn emu_to_inches(emu: i64) -> f64 {
    emu as f64 / EMUS_PER_INCH as f64
}

/// Convert points to EMU, truncating toward zero.
#[inline]
pub fn pt_to_emu(pt: f64) -> i64 {
    (pt * EMUS_PER_PT as f64) as i64
}

/// Convert EMU to points.
#[inline]
pub fn emu_to_pt(emu: i64) -> f64 {
    emu as f64 / EMUS_PER_PT as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_inches() {
        assert_eq!(inches_to_emu(1.0), 914_400);
        assert_eq!(inches_to_emu(10.0), 9_144_000);
        assert_eq!(emu_to_inches(914_400), 1.0);
    }

    #[test]
    fn test_truncates_fractional_emu() {
        // 1e-7 inch is 0.09144 EMU
        assert_eq!(inches_to_emu(1e-7), 0);
        assert_eq!(inches_to_emu(-1e-7), 0);
    }

    #[test]
    fn test_round_trip_within_truncation() {
        for emu in [0, 1, 635, 12_700, 457_200, 914_399, 6_858_000] {
            let back = inches_to_emu(emu_to_inches(emu));
            assert!((back - emu).abs() <= 1, "emu {emu} came back as {back}");
        }
        assert_eq!(inches_to_emu(emu_to_inches(914_400)), 914_400);
    }

    #[test]
    fn test_monotonic() {
        let mut last = i64::MIN;
        for i in 0..200 {
            let emu = inches_to_emu(f64::from(i) * 0.05);
            assert!(emu >= last);
            last = emu;
        }
    }

    #[test]
    fn test_points() {
        assert_eq!(pt_to_emu(1.0), 12_700);
        assert_eq!(pt_to_emu(72.0), EMUS_PER_INCH);
        assert_eq!(emu_to_pt(25_400), 2.0);
    }
}
