//! Combination generator.
//!
//! Enumerates the C(N,2) unordered action pairs once and, for every persona,
//! samples up to `pairs_per_profile` of them without replacement. Output is
//! persona-major.

use rand::rngs::StdRng;
use rand::{seq::index, SeedableRng};
use std::collections::HashSet;
use tracing::debug;

use crate::domain::action::Action;
use crate::domain::combination::Combination;
use crate::domain::profile::UserProfile;

/// Default number of pairs sampled per persona.
pub const DEFAULT_PAIRS_PER_PROFILE: usize = 150;

/// Produces the unscored work set.
#[derive(Debug, Clone)]
pub struct CombinationGenerator {
    pairs_per_profile: usize,
    seed: Option<u64>,
}

impl Default for CombinationGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_PAIRS_PER_PROFILE)
    }
}

impl CombinationGenerator {
    pub fn new(pairs_per_profile: usize) -> Self {
        Self {
            pairs_per_profile,
            seed: None,
        }
    }

    /// Fixes the sampling seed. Without one, sampling is entropy-seeded.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn pairs_per_profile(&self) -> usize {
        self.pairs_per_profile
    }

    /// Number of unordered pairs over `n` distinct actions.
    pub fn pair_count(n: usize) -> usize {
        n * n.saturating_sub(1) / 2
    }

    /// Generates combinations for every persona.
    ///
    /// Actions sharing an identity with an earlier action are skipped, so the
    /// pair space is built over distinct actions only. Repeated personas are
    /// skipped the same way, keeping every (a, b, persona) key unique.
    pub fn generate(&self, actions: &[Action], profiles: &[UserProfile]) -> Vec<Combination> {
        let distinct = distinct_actions(actions);
        if distinct.len() != actions.len() {
            debug!(
                skipped = actions.len() - distinct.len(),
                "Ignoring actions with duplicate identity"
            );
        }
        let personas = distinct_profiles(profiles);
        if personas.len() != profiles.len() {
            debug!(
                skipped = profiles.len() - personas.len(),
                "Ignoring repeated personas"
            );
        }

        let pairs = all_pairs(distinct.len());
        let sample_size = self.pairs_per_profile.min(pairs.len());
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut combinations = Vec::with_capacity(sample_size * personas.len());
        for profile in personas.iter().copied() {
            let chosen: Vec<usize> = if sample_size == pairs.len() {
                (0..pairs.len()).collect()
            } else {
                index::sample(&mut rng, pairs.len(), sample_size).into_vec()
            };

            for pair_index in chosen {
                let (i, j) = pairs[pair_index];
                // Distinct identities are guaranteed by `distinct_actions`.
                if let Ok(combination) = Combination::new(
                    distinct[i].clone(),
                    distinct[j].clone(),
                    profile.clone(),
                ) {
                    combinations.push(combination);
                }
            }
        }

        debug!(
            actions = distinct.len(),
            profiles = personas.len(),
            per_profile = sample_size,
            total = combinations.len(),
            "Generated action combinations"
        );
        combinations
    }
}

fn distinct_actions(actions: &[Action]) -> Vec<&Action> {
    let mut seen = HashSet::new();
    actions
        .iter()
        .filter(|action| seen.insert(action.key()))
        .collect()
}

fn distinct_profiles(profiles: &[UserProfile]) -> Vec<&UserProfile> {
    let mut seen = HashSet::new();
    profiles.iter().filter(|profile| seen.insert(*profile)).collect()
}

fn all_pairs(n: usize) -> Vec<(usize, usize)> {
    let mut pairs = Vec::with_capacity(CombinationGenerator::pair_count(n));
    for i in 0..n {
        for j in (i + 1)..n {
            pairs.push((i, j));
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::action::ActionKey;
    use crate::domain::profile::{
        ClimateZone, Diet, EnergySource, HousingType, IncomeLevel, TransportMode,
    };
    use proptest::prelude::*;

    fn actions(n: usize) -> Vec<Action> {
        (0..n)
            .map(|i| Action::new("Deploy", format!("Solution {}", i)).unwrap())
            .collect()
    }

    fn profile(city: &str) -> UserProfile {
        UserProfile::new(
            city,
            ClimateZone::Temperate,
            TransportMode::Car,
            Diet::HeavyMeat,
            HousingType::House,
            EnergySource::Grid,
            IncomeLevel::Medium,
        )
        .unwrap()
    }

    fn unordered(c: &Combination) -> (ActionKey, ActionKey) {
        let (a, b) = (c.action_a().key(), c.action_b().key());
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    #[test]
    fn three_actions_use_every_pair() {
        let generator = CombinationGenerator::default();
        let out = generator.generate(&actions(3), &[profile("Lima"), profile("Pune")]);

        assert_eq!(out.len(), 6);
        assert!(out[..3].iter().all(|c| c.user_profile().city == "Lima"));
        assert!(out[3..].iter().all(|c| c.user_profile().city == "Pune"));
    }

    #[test]
    fn fewer_than_two_actions_yield_nothing() {
        let generator = CombinationGenerator::default();
        assert!(generator.generate(&actions(1), &[profile("Lima")]).is_empty());
        assert!(generator.generate(&[], &[profile("Lima")]).is_empty());
    }

    #[test]
    fn duplicate_actions_are_ignored() {
        let mut list = actions(2);
        list.push(list[0].clone().with_sector("Electricity"));

        let out = CombinationGenerator::default().generate(&list, &[profile("Lima")]);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn repeated_personas_are_paired_once() {
        let out = CombinationGenerator::default().generate(
            &actions(3),
            &[profile("Lima"), profile("Pune"), profile("Lima")],
        );

        assert_eq!(out.len(), 6);
        let keys: HashSet<_> = out.iter().map(Combination::key).collect();
        assert_eq!(keys.len(), 6);
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let generator = CombinationGenerator::new(10).with_seed(Some(7));
        let first = generator.generate(&actions(20), &[profile("Lima")]);
        let second = generator.generate(&actions(20), &[profile("Lima")]);
        assert_eq!(first, second);
    }

    #[test]
    fn pair_count_matches_binomial() {
        assert_eq!(CombinationGenerator::pair_count(0), 0);
        assert_eq!(CombinationGenerator::pair_count(1), 0);
        assert_eq!(CombinationGenerator::pair_count(3), 3);
        assert_eq!(CombinationGenerator::pair_count(100), 4950);
    }

    proptest! {
        #[test]
        fn samples_are_distinct_and_bounded(
            n in 0usize..25,
            per_profile in 1usize..60,
            profiles in 1usize..4,
            seed in any::<u64>(),
        ) {
            let personas: Vec<UserProfile> =
                (0..profiles).map(|i| profile(&format!("City {}", i))).collect();
            let out = CombinationGenerator::new(per_profile)
                .with_seed(Some(seed))
                .generate(&actions(n), &personas);

            let expected = per_profile.min(CombinationGenerator::pair_count(n));
            prop_assert_eq!(out.len(), expected * profiles);

            for (p, chunk) in personas.iter().zip(out.chunks(expected.max(1))) {
                let mut seen = HashSet::new();
                for combination in chunk {
                    prop_assert!(!combination.action_a().same_identity(combination.action_b()));
                    prop_assert_eq!(combination.user_profile(), p);
                    prop_assert!(seen.insert(unordered(combination)));
                }
            }
        }
    }
}
