//! Shuffle permutation for the live queue
//!
//! Uniform Fisher-Yates over a seedable generator.

use cadence_core::Song;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Build the generator used for shuffle permutations
///
/// A fixed seed makes every permutation reproducible.
pub fn shuffle_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Permute `songs` in place
///
/// Each song has equal probability of landing at any position.
pub fn shuffle_songs<R: Rng + ?Sized>(songs: &mut [Song], rng: &mut R) {
    songs.shuffle(rng);
}
