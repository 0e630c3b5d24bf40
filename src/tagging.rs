//! Identification of the K3π daughters from their PDG ids, and the
//! right-sign/wrong-sign tagging convention built on top of it.
//!
//! Daughter id arrays are indexed the way the candidate tuples store them
//! (positions 0 through 3); every lookup validates that the four ids
//! actually describe a K π π π final state.

use crate::utils::enums::{Flavor, Quadrant, Tag};
use crate::utils::vectors::Vec4;
use crate::{K3PiError, K3PiResult};

/// PDG id of the charged kaon.
pub const KAON_ID: i32 = 321;
/// PDG id of the charged pion.
pub const PION_ID: i32 = 211;

/// Index of the kaon among the four daughters.
///
/// # Errors
///
/// [`K3PiError::InvalidDecay`] unless exactly one daughter is a charged kaon.
pub fn find_kaon(ids: &[i32; 4]) -> K3PiResult<usize> {
    let mut kaons = ids.iter().enumerate().filter(|(_, id)| id.abs() == KAON_ID);
    match (kaons.next(), kaons.next()) {
        (Some((index, _)), None) => Ok(index),
        _ => Err(K3PiError::InvalidDecay(
            "did not find exactly one kaon in daughters".to_string(),
        )),
    }
}

/// Whether the kaon at the given daughter index is negatively charged.
pub fn is_kaon_neg(kaon_index: usize, ids: &[i32; 4]) -> K3PiResult<bool> {
    let id = ids.get(kaon_index).ok_or_else(|| {
        K3PiError::InvalidDecay(format!("no daughter with index {kaon_index}"))
    })?;
    if id.abs() != KAON_ID {
        return Err(K3PiError::InvalidDecay(format!(
            "daughter {kaon_index} is not a kaon (id {id})"
        )));
    }
    Ok(*id < 0)
}

/// Index of the pion with charge opposite to the same-sign pair (i.e. the
/// pion carrying the same charge as the kaon).
pub fn find_os_pion(kaon_is_neg: bool, ids: &[i32; 4]) -> K3PiResult<usize> {
    let os_pion_id = if kaon_is_neg { -PION_ID } else { PION_ID };
    let mut pions = ids.iter().enumerate().filter(|(_, id)| **id == os_pion_id);
    match (pions.next(), pions.next()) {
        (Some((index, _)), None) => Ok(index),
        _ => Err(K3PiError::InvalidDecay(
            "did not find exactly one opposite-sign pion in daughters".to_string(),
        )),
    }
}

/// Indices of the two pions with charge opposite to the kaon.
pub fn find_ss_pions(kaon_is_neg: bool, ids: &[i32; 4]) -> K3PiResult<[usize; 2]> {
    let ss_pion_id = if kaon_is_neg { PION_ID } else { -PION_ID };
    let mut pions = ids.iter().enumerate().filter(|(_, id)| **id == ss_pion_id);
    match (pions.next(), pions.next(), pions.next()) {
        (Some((first, _)), Some((second, _)), None) => Ok([first, second]),
        _ => Err(K3PiError::InvalidDecay(
            "did not find exactly two same-sign pions in daughters".to_string(),
        )),
    }
}

/// The charge-correlation tag of a candidate with the given flavor and kaon
/// charge: a D0 with a negative kaon (or a D0bar with a positive one) is
/// right-sign.
pub fn tag_for(flavor: Flavor, kaon_is_neg: bool) -> Tag {
    let right_sign = match flavor {
        Flavor::D0 => kaon_is_neg,
        Flavor::D0Bar => !kaon_is_neg,
    };
    if right_sign {
        Tag::RS
    } else {
        Tag::WS
    }
}

/// Whether the first positive pion forms the lighter Kπ pair.
pub fn pi1_goes_with_k(k: &Vec4, pi1: &Vec4, pi2: &Vec4) -> bool {
    (k + pi1).mag() < (k + pi2).mag()
}

/// Quadrant of the (sin 2θ_A, sin 2θ_C) plane, or `None` on a boundary.
pub fn quadrant(sin2_theta_a: f64, sin2_theta_c: f64) -> Option<Quadrant> {
    if sin2_theta_a < 0.0 && sin2_theta_c < 0.0 {
        Some(Quadrant::Q1)
    } else if sin2_theta_a < 0.0 && sin2_theta_c > 0.0 {
        Some(Quadrant::Q2)
    } else if sin2_theta_a > 0.0 && sin2_theta_c < 0.0 {
        Some(Quadrant::Q3)
    } else if sin2_theta_a > 0.0 && sin2_theta_c > 0.0 {
        Some(Quadrant::Q4)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // D0 → K− π+ π+ π− stored as (π+, K−, π−, π+)
    const RS_D0_IDS: [i32; 4] = [PION_ID, -KAON_ID, -PION_ID, PION_ID];

    #[test]
    fn test_find_kaon() {
        assert_eq!(find_kaon(&RS_D0_IDS).unwrap(), 1);
        assert!(find_kaon(&[PION_ID, PION_ID, -PION_ID, -PION_ID]).is_err());
        assert!(find_kaon(&[KAON_ID, -KAON_ID, PION_ID, -PION_ID]).is_err());
    }

    #[test]
    fn test_is_kaon_neg() {
        assert!(is_kaon_neg(1, &RS_D0_IDS).unwrap());
        assert!(!is_kaon_neg(0, &[KAON_ID, PION_ID, -PION_ID, PION_ID]).unwrap());
        assert!(is_kaon_neg(0, &RS_D0_IDS).is_err());
        assert!(is_kaon_neg(7, &RS_D0_IDS).is_err());
    }

    #[test]
    fn test_find_os_pion() {
        // K− candidate: the opposite-sign pion is the π−
        assert_eq!(find_os_pion(true, &RS_D0_IDS).unwrap(), 2);
        // K+ candidate mirrors the charges
        let ws_ids = [-PION_ID, KAON_ID, PION_ID, -PION_ID];
        assert_eq!(find_os_pion(false, &ws_ids).unwrap(), 2);
        assert!(find_os_pion(false, &RS_D0_IDS).is_err());
    }

    #[test]
    fn test_find_ss_pions() {
        assert_eq!(find_ss_pions(true, &RS_D0_IDS).unwrap(), [0, 3]);
        assert!(find_ss_pions(false, &RS_D0_IDS).is_err());
    }

    #[test]
    fn test_tag_for() {
        assert_eq!(tag_for(Flavor::D0, true), Tag::RS);
        assert_eq!(tag_for(Flavor::D0, false), Tag::WS);
        assert_eq!(tag_for(Flavor::D0Bar, true), Tag::WS);
        assert_eq!(tag_for(Flavor::D0Bar, false), Tag::RS);
    }

    #[test]
    fn test_pi1_goes_with_k() {
        let k = Vec4::new(0.0, 0.0, 100.0, 510.0);
        let near = Vec4::new(0.0, 0.0, 80.0, 160.0);
        let far = Vec4::new(0.0, 0.0, -300.0, 340.0);
        assert!(pi1_goes_with_k(&k, &near, &far));
        assert!(!pi1_goes_with_k(&k, &far, &near));
    }

    #[test]
    fn test_quadrant() {
        assert_eq!(quadrant(-0.5, -0.5), Some(Quadrant::Q1));
        assert_eq!(quadrant(-0.5, 0.5), Some(Quadrant::Q2));
        assert_eq!(quadrant(0.5, -0.5), Some(Quadrant::Q3));
        assert_eq!(quadrant(0.5, 0.5), Some(Quadrant::Q4));
        assert_eq!(quadrant(0.0, 0.5), None);
        assert_eq!(quadrant(0.5, 0.0), None);
    }
}
