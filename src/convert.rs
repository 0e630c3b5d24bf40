//! Conversions between the AmpGen generator convention and the analysis
//! convention used throughout this crate.
//!
//! AmpGen stores a four-vector as `[px, py, pz, E]` in GeV; the analysis
//! convention is a [`Vec4`] in MeV. Angle helpers canonicalize values that
//! are only defined modulo 2π into the two ranges used when reporting
//! decay-plane angles.

use std::f64::consts::PI;

use crate::utils::vectors::Vec4;

/// Multiplicative conversion from GeV to MeV.
pub const GEV_TO_MEV: f64 = 1000.0;
/// Multiplicative conversion from millimeters to meters.
pub const MM_TO_M: f64 = 1.0 / 1000.0;
/// Multiplicative conversion from seconds to nanoseconds.
pub const SEC_TO_NS: f64 = 1.0e9;
/// Multiplicative conversion from nanoseconds to picoseconds.
pub const NS_TO_PS: f64 = 1000.0;
/// Speed of light in m/s (to the precision used in the decay-time studies).
pub const C_M_PER_SEC: f64 = 3.0e8;
/// World-average D0 lifetime in picoseconds.
pub const D0_LIFETIME_PS: f64 = 0.410;
/// World-average D0 mass in MeV.
pub const D0_MASS_MEV: f64 = 1864.84;

/// Convert an AmpGen four-vector `[px, py, pz, E]` in GeV to a [`Vec4`] in MeV.
pub fn from_ampgen(p: [f64; 4]) -> Vec4 {
    Vec4::new(
        p[0] * GEV_TO_MEV,
        p[1] * GEV_TO_MEV,
        p[2] * GEV_TO_MEV,
        p[3] * GEV_TO_MEV,
    )
}

/// Convert a [`Vec4`] in MeV back to an AmpGen four-vector `[px, py, pz, E]` in GeV.
pub fn to_ampgen(p: &Vec4) -> [f64; 4] {
    [
        p.px() / GEV_TO_MEV,
        p.py() / GEV_TO_MEV,
        p.pz() / GEV_TO_MEV,
        p.e() / GEV_TO_MEV,
    ]
}

/// A particle of the given mass at rest.
pub fn at_rest(mass: f64) -> Vec4 {
    Vec4::new(0.0, 0.0, 0.0, mass)
}

/// Map an angle into `[0, 2π)`, preserving its value modulo 2π.
pub fn angle_to_0_2pi(theta: f64) -> f64 {
    theta.rem_euclid(2.0 * PI)
}

/// Map an angle into `(-π, π]`, preserving its value modulo 2π.
pub fn angle_to_pm_pi(theta: f64) -> f64 {
    let a = angle_to_0_2pi(theta);
    if a > PI {
        a - 2.0 * PI
    } else {
        a
    }
}

/// Convert a cτ in millimeters to a lifetime in nanoseconds.
pub fn ctau_mm_to_tau_ns(ctau_mm: f64) -> f64 {
    ctau_mm * MM_TO_M / C_M_PER_SEC * SEC_TO_NS
}

/// Convert a lifetime in nanoseconds to picoseconds.
pub fn tau_ns_to_tau_ps(tau_ns: f64) -> f64 {
    tau_ns * NS_TO_PS
}
