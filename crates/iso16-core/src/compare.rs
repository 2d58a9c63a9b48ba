//! Expected-vs-actual comparison.
//!
//! The caller classifies a vector as a conformance failure when any field
//! differs; this module only reports which fields, in a fixed order.

use iso16_types::{DeliveryResult, ExpectedOutcome};
use serde::{Deserialize, Serialize};

/// A result field that can disagree with its expected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchField {
    /// `warp_total`
    WarpTotal,
    /// `error_total`
    ErrorTotal,
    /// `phase_state_warped`
    PhaseStateWarped,
    /// `symmetry_ok`
    SymmetryOk,
    /// `error_ok`
    ErrorOk,
    /// `true_delivery`
    TrueDelivery,
    /// `tetra_seal`
    TetraSeal,
}

impl MismatchField {
    /// The field name as it appears in result and expected records.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WarpTotal => "warp_total",
            Self::ErrorTotal => "error_total",
            Self::PhaseStateWarped => "phase_state_warped",
            Self::SymmetryOk => "symmetry_ok",
            Self::ErrorOk => "error_ok",
            Self::TrueDelivery => "true_delivery",
            Self::TetraSeal => "tetra_seal",
        }
    }
}

impl core::fmt::Display for MismatchField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// List the computed fields of `actual` that differ from `expected`.
///
/// The seal is not compared here; it is derived from serialization and is
/// checked by the caller, which appends [`MismatchField::TetraSeal`] itself.
pub fn compare(actual: &DeliveryResult, expected: &ExpectedOutcome) -> Vec<MismatchField> {
    let checks = [
        (MismatchField::WarpTotal, actual.warp_total == expected.warp_total),
        (MismatchField::ErrorTotal, actual.error_total == expected.error_total),
        (
            MismatchField::PhaseStateWarped,
            actual.phase_state_warped == expected.phase_state_warped,
        ),
        (MismatchField::SymmetryOk, actual.symmetry_ok == expected.symmetry_ok),
        (MismatchField::ErrorOk, actual.error_ok == expected.error_ok),
        (MismatchField::TrueDelivery, actual.true_delivery == expected.true_delivery),
    ];

    checks
        .into_iter()
        .filter_map(|(field, matches)| (!matches).then_some(field))
        .collect()
}

#[cfg(test)]
mod tests {
    use iso16_types::{PhaseState, Q16, Triple};

    use super::*;

    fn baseline() -> (DeliveryResult, ExpectedOutcome) {
        let actual = DeliveryResult {
            warp_total: Triple::ZERO,
            error_total: Q16::ZERO,
            phase_state_warped: PhaseState::default(),
            symmetry_ok: true,
            error_ok: true,
            true_delivery: true,
        };
        let expected = ExpectedOutcome {
            vector_id: "V0001".to_owned(),
            warp_total: Triple::ZERO,
            error_total: Q16::ZERO,
            phase_state_warped: PhaseState::default(),
            symmetry_ok: true,
            error_ok: true,
            true_delivery: true,
            tetra_seal: String::new(),
        };
        (actual, expected)
    }

    #[test]
    fn identical_outcomes_have_no_mismatch() {
        let (actual, expected) = baseline();
        assert!(compare(&actual, &expected).is_empty());
    }

    #[test]
    fn mismatches_are_listed_in_field_order() {
        let (actual, mut expected) = baseline();
        expected.true_delivery = false;
        expected.error_total = Q16(2);
        expected.warp_total = Triple::from_raw(1, 0, 0);
        assert_eq!(
            compare(&actual, &expected),
            [
                MismatchField::WarpTotal,
                MismatchField::ErrorTotal,
                MismatchField::TrueDelivery
            ]
        );
    }

    #[test]
    fn field_names_match_record_keys() {
        assert_eq!(MismatchField::PhaseStateWarped.to_string(), "phase_state_warped");
        assert_eq!(
            serde_json::to_string(&MismatchField::TetraSeal).ok().as_deref(),
            Some("\"tetra_seal\"")
        );
    }
}
