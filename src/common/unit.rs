//! Unit conversion utilities.
//!
//! Layouts are computed in inches; the package writer speaks EMUs.

pub const EMUS_PER_INCH: i64 = 914_400;
pub const EMUS_PER_PT: i64 = 12_700;

/// DrawingML angles are expressed in 60,000ths of a degree.
pub const ANGLE_UNITS_PER_DEGREE: f64 = 60_000.0;

#[inline]
pub fn inch_to_emu(inches: f64) -> i64 {
    (inches * EMUS_PER_INCH as f64).round() as i64
}

#[inline]
pub fn pt_to_emu_f64(pt: f64) -> i64 {
    (pt * EMUS_PER_PT as f64).round() as i64
}

/// Font sizes are stored in hundredths of a point.
#[inline]
pub fn pt_to_centipoints(pt: f64) -> u32 {
    (pt * 100.0).round().max(100.0) as u32
}

#[inline]
pub fn degrees_to_angle(deg: f64) -> i64 {
    (deg.rem_euclid(360.0) * ANGLE_UNITS_PER_DEGREE).round() as i64
}
