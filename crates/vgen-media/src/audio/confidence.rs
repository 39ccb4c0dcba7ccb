//! Heuristic confidence scoring for detected speech segments.
//!
//! Confidence is a weighted blend of three features over the raw
//! sample slice of a segment: RMS energy (weight 0.5), zero-crossing
//! rate (0.3) and spectral centroid (0.2), each scaled into [0, 1].
//! Scoring failures are non-fatal: a degenerate slice gets the default
//! score instead of failing the detection result.

use rustfft::{num_complex::Complex, FftPlanner};

/// Score substituted when a segment slice cannot be scored.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Longest slice analyzed for the centroid; longer segments are
/// truncated, the score is a coarse heuristic either way.
const CENTROID_MAX_SAMPLES: usize = 16384;

/// RMS energy of a sample slice (linear).
pub fn rms(samples: &[f32]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let mean_square: f64 = samples
        .iter()
        .map(|&s| {
            let s = s as f64;
            s * s
        })
        .sum::<f64>()
        / samples.len() as f64;
    mean_square.sqrt()
}

/// Fraction of adjacent sample pairs that change sign.
pub fn zero_crossing_rate(samples: &[f32]) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }
    let crossings = samples
        .windows(2)
        .filter(|pair| (pair[0] >= 0.0) != (pair[1] >= 0.0))
        .count();
    crossings as f64 / (samples.len() - 1) as f64
}

/// Spectral centroid in Hz, the magnitude-weighted mean frequency.
///
/// Analyzes at most [`CENTROID_MAX_SAMPLES`] samples zero-padded to a
/// power of two. A zero-mass spectrum yields 0 Hz.
pub fn spectral_centroid(samples: &[f32], sample_rate: u32) -> f64 {
    if samples.is_empty() || sample_rate == 0 {
        return 0.0;
    }

    let take = samples.len().min(CENTROID_MAX_SAMPLES);
    let n = take.next_power_of_two();

    let mut buffer: Vec<Complex<f64>> = samples[..take]
        .iter()
        .map(|&s| Complex::new(s as f64, 0.0))
        .collect();
    buffer.resize(n, Complex::new(0.0, 0.0));

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);
    fft.process(&mut buffer);

    let bin_hz = sample_rate as f64 / n as f64;
    let mut weighted = 0.0;
    let mut total = 0.0;
    for (k, value) in buffer.iter().take(n / 2).enumerate() {
        let magnitude = value.norm();
        weighted += k as f64 * bin_hz * magnitude;
        total += magnitude;
    }

    if total > 0.0 {
        weighted / total
    } else {
        0.0
    }
}

/// Score one segment from its raw sample slice.
///
/// `start`/`end` are in seconds against the full signal. Out-of-range
/// or empty slices return [`DEFAULT_CONFIDENCE`].
pub fn score_segment(samples: &[f32], sample_rate: u32, start: f64, end: f64) -> f64 {
    let lo = (start * sample_rate as f64) as usize;
    let hi = ((end * sample_rate as f64) as usize).min(samples.len());
    if lo >= hi {
        return DEFAULT_CONFIDENCE;
    }
    let slice = &samples[lo..hi];

    let rms_score = (rms(slice) * 10.0).min(1.0);
    let zcr_score = (zero_crossing_rate(slice) * 5.0).min(1.0);
    let centroid_score = (spectral_centroid(slice, sample_rate) / 4000.0).min(1.0);

    let score = 0.5 * rms_score + 0.3 * zcr_score + 0.2 * centroid_score;
    if !score.is_finite() {
        return DEFAULT_CONFIDENCE;
    }

    (score * 1000.0).round() / 1000.0
}
