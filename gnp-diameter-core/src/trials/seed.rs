//! Per-trial random stream derivation.

use rand::{SeedableRng, rngs::SmallRng};

/// SplitMix64 increment (the 64-bit golden ratio), also used to space trial
/// indices apart before mixing.
const TRIAL_SEED_SPACING: u64 = 0x9E37_79B9_7F4A_7C15;
const SPLITMIX_MULT_A: u64 = 0xBF58_476D_1CE4_E5B9;
const SPLITMIX_MULT_B: u64 = 0x94D0_49BB_1331_11EB;

/// Derives the seed of trial `trial_index` from the batch's base seed.
///
/// Depends on nothing but its arguments, so the set of trial seeds is fixed
/// by `(base_seed, trials)` regardless of which worker runs which trial.
#[inline]
#[must_use]
pub fn mix_trial_seed(base_seed: u64, trial_index: u64) -> u64 {
    splitmix64(base_seed ^ trial_index.wrapping_add(1).wrapping_mul(TRIAL_SEED_SPACING))
}

/// Private random stream for one trial.
#[must_use]
pub(crate) fn trial_rng(base_seed: u64, trial_index: u64) -> SmallRng {
    SmallRng::seed_from_u64(mix_trial_seed(base_seed, trial_index))
}

#[inline]
fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(TRIAL_SEED_SPACING);
    state = (state ^ (state >> 30)).wrapping_mul(SPLITMIX_MULT_A);
    state = (state ^ (state >> 27)).wrapping_mul(SPLITMIX_MULT_B);
    state ^ (state >> 31)
}
