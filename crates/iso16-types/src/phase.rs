//! The 16-face phase state.
//!
//! Face order is fixed by input position and is never re-sorted: the
//! symmetry check compares neighbours by index and the serializer emits
//! faces in this order.

use serde::{Deserialize, Serialize};

use crate::fixed::Triple;

/// Number of faces in a phase state.
pub const PHASE_FACES: usize = 16;

/// An ordered sequence of exactly 16 Q16.16 triples.
///
/// The length invariant is carried by the array type. Deserializing a JSON
/// array with any other number of faces fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhaseState([Triple; PHASE_FACES]);

impl PhaseState {
    /// Wrap 16 faces.
    pub const fn new(faces: [Triple; PHASE_FACES]) -> Self {
        Self(faces)
    }

    /// A phase state where every face holds the same triple.
    pub const fn uniform(face: Triple) -> Self {
        Self([face; PHASE_FACES])
    }

    /// Borrow the faces in input order.
    pub const fn faces(&self) -> &[Triple; PHASE_FACES] {
        &self.0
    }

    /// Borrow one face, or `None` if `index >= 16`.
    pub fn get(&self, index: usize) -> Option<&Triple> {
        self.0.get(index)
    }

    /// Mutably borrow one face, or `None` if `index >= 16`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Triple> {
        self.0.get_mut(index)
    }

    /// Iterate faces in input order.
    pub fn iter(&self) -> core::slice::Iter<'_, Triple> {
        self.0.iter()
    }

    /// Build a new phase state by applying `f` to every face, keeping order.
    #[must_use]
    pub fn map(&self, f: impl FnMut(Triple) -> Triple) -> Self {
        Self(self.0.map(f))
    }
}

impl From<[Triple; PHASE_FACES]> for PhaseState {
    fn from(faces: [Triple; PHASE_FACES]) -> Self {
        Self(faces)
    }
}

impl<'a> IntoIterator for &'a PhaseState {
    type Item = &'a Triple;
    type IntoIter = core::slice::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
