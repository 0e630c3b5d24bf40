//! The five-variable phase-space parameterization of a D0 → K π π π decay.
//!
//! The decay is split into two pairs, A = (K, OS π1) and B = (SS π, OS π2).
//! A configuration is then described by the two pair masses, the helicity
//! cosine of each pair, and the angle between the two decay planes, all
//! evaluated in the parent rest frame.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::convert::angle_to_0_2pi;
use crate::utils::vectors::Vec4;
use crate::{K3PiError, K3PiResult};

/// The five phase-space variables of a four-body decay.
///
/// Masses carry the unit of the input four-momenta; `phi` is reported in
/// `[0, 2π)` and can be remapped with
/// [`angle_to_pm_pi`](crate::convert::angle_to_pm_pi).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhspPoint {
    /// Invariant mass of pair A (K, OS π1).
    pub m12: f64,
    /// Invariant mass of pair B (SS π, OS π2).
    pub m34: f64,
    /// Helicity cosine of the kaon within pair A.
    pub cos12: f64,
    /// Helicity cosine of the same-sign pion within pair B.
    pub cos34: f64,
    /// Angle between the two decay planes, in `[0, 2π)`.
    pub phi: f64,
}

impl Display for PhspPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ {}, {}, {}, {}, {} }}",
            self.m12, self.m34, self.cos12, self.cos34, self.phi
        )
    }
}

/// Compute the phase-space point of a D0 → K π π π configuration.
///
/// Daughters are given in the same frame as `parent` and are boosted to the
/// parent rest frame internally. The pairing follows the analysis
/// convention: pair A is (K, OS π1) and pair B is (SS π, OS π2).
///
/// # Errors
///
/// Returns [`K3PiError::InvalidDecay`] if either pair has vanishing momentum
/// in the parent rest frame, which leaves the helicity axes undefined.
pub fn phsp_point(
    parent: &Vec4,
    k: &Vec4,
    os_pi1: &Vec4,
    ss_pi: &Vec4,
    os_pi2: &Vec4,
) -> K3PiResult<PhspPoint> {
    let to_parent = -parent.beta();
    let p1 = k.boost(&to_parent);
    let p2 = os_pi1.boost(&to_parent);
    let p3 = ss_pi.boost(&to_parent);
    let p4 = os_pi2.boost(&to_parent);

    let pair_a = p1 + p2;
    let pair_b = p3 + p4;
    if pair_a.vec3().mag2() == 0.0 || pair_b.vec3().mag2() == 0.0 {
        return Err(K3PiError::InvalidDecay(
            "pair momentum vanishes in the parent rest frame".to_string(),
        ));
    }

    // helicity cosines: first pair member in the pair rest frame vs. the
    // pair flight direction in the parent frame
    let p1_in_a = p1.boost(&-pair_a.beta());
    let cos12 = p1_in_a.vec3().unit().dot(&pair_a.vec3().unit());
    let p3_in_b = p3.boost(&-pair_b.beta());
    let cos34 = p3_in_b.vec3().unit().dot(&pair_b.vec3().unit());

    // decay-plane angle: normals of the two planes, signed by the pair-A
    // flight direction
    let n_a = p1.vec3().cross(&p2.vec3());
    let n_b = p3.vec3().cross(&p4.vec3());
    if n_a.mag2() == 0.0 || n_b.mag2() == 0.0 {
        return Err(K3PiError::InvalidDecay(
            "decay plane is degenerate (collinear pair momenta)".to_string(),
        ));
    }
    let n_a = n_a.unit();
    let n_b = n_b.unit();
    let z = pair_a.vec3().unit();
    let phi = angle_to_0_2pi(n_a.cross(&n_b).dot(&z).atan2(n_a.dot(&n_b)));

    Ok(PhspPoint {
        m12: pair_a.mag(),
        m34: pair_b.mag(),
        cos12,
        cos34,
        phi,
    })
}

/// The six two-body invariant masses of the daughters, by direct summation.
///
/// Order: (12), (13), (14), (23), (24), (34) with the daughters indexed in
/// the order given.
pub fn pair_masses(daughters: &[Vec4; 4]) -> [f64; 6] {
    let [p1, p2, p3, p4] = daughters;
    [
        (p1 + p2).mag(),
        (p1 + p3).mag(),
        (p1 + p4).mag(),
        (p2 + p3).mag(),
        (p2 + p4).mag(),
        (p3 + p4).mag(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{angle_to_pm_pi, at_rest, from_ampgen, D0_MASS_MEV};
    use crate::tests::reference_event;
    use approx::assert_relative_eq;

    // The same event as produced by an independent generator pass, with the
    // event rotated into its canonical orientation.
    const K_ROTATED: [f64; 4] = [0.389060, -0.140074, -0.140162, 0.659053];
    const OS_PI1_ROTATED: [f64; 4] = [0.264945, 0.140074, 0.140162, 0.359085];
    const OS_PI2_ROTATED: [f64; 4] = [-0.319720, -0.229770, 0.000000, 0.417726];
    const SS_PI_ROTATED: [f64; 4] = [-0.334285, 0.229770, 0.000000, 0.428976];

    #[test]
    fn test_daughter_masses() {
        let [k, os_pi1, ss_pi, os_pi2] = reference_event();
        assert_relative_eq!(k.mag(), 493.677, epsilon = 1e-3);
        for pi in [os_pi1, ss_pi, os_pi2] {
            assert_relative_eq!(pi.mag(), 139.57018, epsilon = 1e-3);
        }
        // the daughters close up to the parent at rest
        let total: Vec4 = reference_event().into_iter().sum();
        assert_relative_eq!(total.mag(), D0_MASS_MEV, epsilon = 1e-6);
        assert_relative_eq!(total.vec3().mag(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_phsp_point_reference_event() {
        let [k, os_pi1, ss_pi, os_pi2] = reference_event();
        let d0 = at_rest(D0_MASS_MEV);
        let point = phsp_point(&d0, &k, &os_pi1, &ss_pi, &os_pi2).unwrap();
        assert_relative_eq!(point.m12, 780.308937036, epsilon = 1e-6);
        assert_relative_eq!(point.m34, 537.757256674, epsilon = 1e-6);
        assert_relative_eq!(point.cos12, -0.220215012898, epsilon = 1e-9);
        assert_relative_eq!(point.cos34, 0.020125766002, epsilon = 1e-9);
        assert_relative_eq!(point.phi, 5.497473935688, epsilon = 1e-9);
        assert_relative_eq!(
            angle_to_pm_pi(point.phi),
            -0.7857113714913853,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_phsp_masses_match_direct_sums() {
        let [k, os_pi1, ss_pi, os_pi2] = reference_event();
        let d0 = at_rest(D0_MASS_MEV);
        let point = phsp_point(&d0, &k, &os_pi1, &ss_pi, &os_pi2).unwrap();
        let masses = pair_masses(&[k, os_pi1, ss_pi, os_pi2]);
        // pair A = indices (1, 2), pair B = indices (3, 4)
        assert_relative_eq!(point.m12, masses[0], epsilon = 1e-9);
        assert_relative_eq!(point.m34, masses[5], epsilon = 1e-9);
    }

    #[test]
    fn test_rotated_event_gives_same_invariants() {
        let d0 = at_rest(D0_MASS_MEV);
        let [k, os_pi1, ss_pi, os_pi2] = reference_event();
        let point = phsp_point(&d0, &k, &os_pi1, &ss_pi, &os_pi2).unwrap();
        let (rk, r1, rs, r2) = (
            from_ampgen(K_ROTATED),
            from_ampgen(OS_PI1_ROTATED),
            from_ampgen(SS_PI_ROTATED),
            from_ampgen(OS_PI2_ROTATED),
        );
        let rotated = phsp_point(&d0, &rk, &r1, &rs, &r2).unwrap();
        // the rotated literals carry ~1e-6 GeV precision
        assert_relative_eq!(point.m12, rotated.m12, epsilon = 1e-2);
        assert_relative_eq!(point.m34, rotated.m34, epsilon = 1e-2);
        assert_relative_eq!(point.cos12, rotated.cos12, epsilon = 1e-5);
        assert_relative_eq!(point.cos34, rotated.cos34, epsilon = 1e-5);
        assert_relative_eq!(point.phi, rotated.phi, epsilon = 1e-5);
    }

    #[test]
    fn test_pair_masses_symmetric_and_rotation_invariant() {
        let [k, os_pi1, ss_pi, os_pi2] = reference_event();
        assert_relative_eq!((k + os_pi1).mag(), (os_pi1 + k).mag());

        let rot_z = |p: &Vec4, a: f64| {
            Vec4::new(
                a.cos() * p.px() - a.sin() * p.py(),
                a.sin() * p.px() + a.cos() * p.py(),
                p.pz(),
                p.e(),
            )
        };
        let rotated = [
            rot_z(&k, 0.7),
            rot_z(&os_pi1, 0.7),
            rot_z(&ss_pi, 0.7),
            rot_z(&os_pi2, 0.7),
        ];
        let before = pair_masses(&[k, os_pi1, ss_pi, os_pi2]);
        let after = pair_masses(&rotated);
        for (b, a) in before.iter().zip(after.iter()) {
            assert_relative_eq!(*b, *a, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_degenerate_pair_is_rejected() {
        // back-to-back two-body topology: both members of pair A at rest
        let d0 = at_rest(D0_MASS_MEV);
        let k = at_rest(493.677);
        let os_pi1 = at_rest(139.57018);
        let ss_pi = Vec4::new(0.0, 0.0, 100.0, 300.0);
        let os_pi2 = Vec4::new(0.0, 0.0, -100.0, 300.0);
        assert!(phsp_point(&d0, &k, &os_pi1, &ss_pi, &os_pi2).is_err());
    }

    #[test]
    fn test_moving_parent_matches_rest_frame_computation() {
        let [k, os_pi1, ss_pi, os_pi2] = reference_event();
        let d0 = at_rest(D0_MASS_MEV);
        let at_rest_point = phsp_point(&d0, &k, &os_pi1, &ss_pi, &os_pi2).unwrap();

        // boost the whole event into a lab frame and recompute
        let lab_beta = crate::Vec3::new(0.1, -0.2, 0.3);
        let boosted = |p: &Vec4| p.boost(&lab_beta);
        let moving = phsp_point(
            &boosted(&d0),
            &boosted(&k),
            &boosted(&os_pi1),
            &boosted(&ss_pi),
            &boosted(&os_pi2),
        )
        .unwrap();
        assert_relative_eq!(moving.m12, at_rest_point.m12, epsilon = 1e-6);
        assert_relative_eq!(moving.m34, at_rest_point.m34, epsilon = 1e-6);
        assert_relative_eq!(moving.cos12, at_rest_point.cos12, epsilon = 1e-9);
        assert_relative_eq!(moving.cos34, at_rest_point.cos34, epsilon = 1e-9);
        assert_relative_eq!(moving.phi, at_rest_point.phi, epsilon = 1e-9);
    }
}
