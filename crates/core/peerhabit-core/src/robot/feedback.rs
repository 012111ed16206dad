//! Noisy feedback score to rating transform

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// Highest rating a feedback score can map to
pub const MAX_RATING: u8 = 4;

/// Standard deviation of the perception noise added to a score
pub const FEEDBACK_NOISE_SIGMA: f64 = 10.0;

/// Score width of one rating step
pub const RATING_STEP: f64 = 20.0;

/// Convert a raw feedback score into a rating in `0..=MAX_RATING`.
///
/// The score (0 when absent) is perturbed by normal noise with
/// [`FEEDBACK_NOISE_SIGMA`], divided by [`RATING_STEP`], truncated toward zero
/// and clamped. Identical scores can therefore yield different ratings.
pub fn evaluate_feedback_rating<R: Rng + ?Sized>(score: Option<f64>, rng: &mut R) -> u8 {
    let score = score.unwrap_or(0.0);
    let noise: f64 = StandardNormal.sample(rng);
    let sample = score + FEEDBACK_NOISE_SIGMA * noise;

    // `as` truncates toward zero, saturates at the i64 bounds and maps NaN to 0
    let step = (sample / RATING_STEP) as i64;
    step.clamp(0, MAX_RATING as i64) as u8
}
