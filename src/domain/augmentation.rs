//! Symmetry augmentation.
//!
//! Turns a scored set of M records into 2M records by following every
//! record with its order-swapped, label-flipped mirror. The transform is pure
//! and refuses input shaped like its own output, so applying it twice fails
//! instead of quietly producing 4M records. A scored set that simply holds
//! both orderings of a pair is ordinary input.

use std::collections::{HashMap, HashSet};
use thiserror::Error;

use crate::domain::combination::ScoredCombination;

/// Reasons a scored set cannot be augmented.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AugmentError {
    #[error("Scored set is already augmented: record {index} ({pair}) has its mirror at record {mirror_index}")]
    AlreadyAugmented {
        index: usize,
        mirror_index: usize,
        pair: String,
    },

    #[error("Scored set contains duplicate record {index} ({pair}), first seen at record {first_index}")]
    DuplicateRecord {
        index: usize,
        first_index: usize,
        pair: String,
    },
}

/// Produces the symmetric training set.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymmetryAugmenter;

impl SymmetryAugmenter {
    pub fn new() -> Self {
        Self
    }

    /// Returns a new set where each record is immediately followed by its mirror.
    ///
    /// # Errors
    ///
    /// - [`AugmentError::DuplicateRecord`] if two records share (a, b, persona)
    /// - [`AugmentError::AlreadyAugmented`] if every odd record is the mirror
    ///   of the record before it
    pub fn augment(
        &self,
        scored: &[ScoredCombination],
    ) -> Result<Vec<ScoredCombination>, AugmentError> {
        self.check(scored)?;

        let mut out = Vec::with_capacity(scored.len() * 2);
        for record in scored {
            out.push(record.clone());
            out.push(record.mirrored());
        }
        Ok(out)
    }

    /// Checks the augmentation preconditions without building output.
    pub fn check(&self, scored: &[ScoredCombination]) -> Result<(), AugmentError> {
        let mut positions = HashMap::with_capacity(scored.len());
        for (index, record) in scored.iter().enumerate() {
            if let Some(first_index) = positions.insert(record.key(), index) {
                return Err(AugmentError::DuplicateRecord {
                    index,
                    first_index,
                    pair: record.combination.describe(),
                });
            }
        }

        if Self::is_interleaved(scored) {
            return Err(AugmentError::AlreadyAugmented {
                index: 0,
                mirror_index: 1,
                pair: scored[0].combination.describe(),
            });
        }
        Ok(())
    }

    /// Matches the exact layout `augment` emits: record, mirror, record, ...
    fn is_interleaved(scored: &[ScoredCombination]) -> bool {
        !scored.is_empty()
            && scored.len() % 2 == 0
            && scored
                .chunks_exact(2)
                .all(|pair| pair[1] == pair[0].mirrored())
    }

    /// Returns true if every record's mirror, with the complementary label,
    /// is present in the set.
    pub fn is_symmetric(&self, scored: &[ScoredCombination]) -> bool {
        let present: HashSet<_> = scored.iter().map(|r| (r.key(), r.score)).collect();
        scored
            .iter()
            .all(|r| present.contains(&(r.key().mirrored(), r.score.flipped())))
    }
}
