//! Symmetry and error checkers.
//!
//! # Symmetry
//!
//! For each adjacent pair `(i, i + 1)` with `i` in `0..=14`, every axis of
//! `|face[i] - face[i + 1]|` must be `<= EPSILON`. Each axis is bounded on
//! its own; there is no combined vector norm. The pair `(15, 0)` is not
//! compared. Conformance vectors are published against exactly this check,
//! so neither detail may be "fixed" here.
//!
//! # Error
//!
//! The error total must be `<= EPSILON`.

use iso16_types::{PhaseState, Q16};

use crate::fixed::{self, EPSILON};

/// Per-axis adjacent-pair symmetry check over a warped phase state.
pub fn check_symmetry(phase_state: &PhaseState) -> bool {
    first_asymmetric_pair(phase_state).is_none()
}

/// Index `i` of the first pair `(i, i + 1)` that breaks symmetry, if any.
pub fn first_asymmetric_pair(phase_state: &PhaseState) -> Option<usize> {
    let faces = phase_state.faces();
    faces
        .iter()
        .zip(faces.iter().skip(1))
        .position(|(a, b)| {
            let diff = fixed::abs_diff_triple(*a, *b);
            !diff.axes().iter().all(|axis| fixed::leq(*axis, EPSILON))
        })
}

/// Scalar error bound check.
pub const fn check_error(error_total: Q16) -> bool {
    fixed::leq(error_total, EPSILON)
}

#[cfg(test)]
mod tests {
    use iso16_types::Triple;

    use super::*;

    fn perturbed(index: usize, f: impl FnOnce(&mut Triple)) -> PhaseState {
        let mut state = PhaseState::default();
        if let Some(face) = state.get_mut(index) {
            f(face);
        }
        state
    }

    #[test]
    fn identical_faces_are_symmetric() {
        assert!(check_symmetry(&PhaseState::uniform(Triple::from_raw(7, -7, 123))));
    }

    #[test]
    fn epsilon_difference_is_allowed() {
        let state = perturbed(5, |t| t.x = Q16(1));
        assert!(check_symmetry(&state));
    }

    #[test]
    fn epsilon_plus_one_breaks_symmetry() {
        let state = perturbed(5, |t| t.x = Q16(2));
        assert!(!check_symmetry(&state));
        assert_eq!(first_asymmetric_pair(&state), Some(4));
    }

    #[test]
    fn each_axis_is_bounded_independently() {
        // All three axes off by exactly epsilon: passes per-axis even though
        // any vector norm of (1, 1, 1) would exceed epsilon.
        let state = perturbed(8, |t| *t = Triple::from_raw(1, 1, 1));
        assert!(check_symmetry(&state));

        let state = perturbed(8, |t| t.z = Q16(-2));
        assert!(!check_symmetry(&state));
    }

    #[test]
    fn last_to_first_pair_is_not_compared() {
        // A staircase of +1 per face: every adjacent pair differs by 1, but
        // face 15 and face 0 differ by 15.
        let mut state = PhaseState::default();
        for (i, raw) in (0..16).enumerate() {
            if let Some(face) = state.get_mut(i) {
                face.y = Q16(raw);
            }
        }
        assert!(check_symmetry(&state));
    }

    #[test]
    fn perturbing_last_face_is_detected() {
        let state = perturbed(15, |t| t.x = Q16(5));
        assert_eq!(first_asymmetric_pair(&state), Some(14));
    }

    #[test]
    fn min_and_max_neighbours_wrap_to_one_apart() {
        // MIN - MAX wraps to 1, so pair 0 passes; MAX next to 0 does not.
        let mut state = PhaseState::default();
        if let Some(face) = state.get_mut(0) {
            face.x = Q16::MIN;
        }
        if let Some(face) = state.get_mut(1) {
            face.x = Q16::MAX;
        }
        assert_eq!(first_asymmetric_pair(&state), Some(1));
    }

    #[test]
    fn error_bound() {
        assert!(check_error(Q16(0)));
        assert!(check_error(Q16(1)));
        assert!(!check_error(Q16(2)));
        assert!(check_error(Q16(-100)));
    }
}
