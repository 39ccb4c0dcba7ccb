//! Short-time energy profile and adaptive thresholding.
//!
//! Energy is RMS per overlapping frame, converted to decibels relative
//! to the loudest frame. The speech threshold is not fixed: it is
//! placed between the 5th and 95th percentile of the observed dB
//! distribution according to the caller's 0-100 `volume_threshold`.

use super::DB_FLOOR;

/// Frame-wise decibel energy profile.
///
/// `times` and `db` are aligned 1:1; `times[i] = i * hop / sample_rate`.
#[derive(Debug, Clone)]
pub struct EnergyProfile {
    pub times: Vec<f64>,
    pub db: Vec<f64>,
    /// Frame length in samples
    pub frame_len: usize,
    /// Hop length in samples (half the frame length, 50% overlap)
    pub hop: usize,
    pub sample_rate: u32,
}

impl EnergyProfile {
    /// Number of frames in the profile.
    pub fn len(&self) -> usize {
        self.db.len()
    }

    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }
}

/// Compute the RMS energy profile over overlapping frames.
///
/// Frame length is `frame_duration_ms` worth of samples, hop is half
/// of it. The final frame may be shorter than a full window. Decibels
/// are relative to the maximum frame RMS and floored at [`DB_FLOOR`],
/// so an all-zero signal yields a flat floor profile rather than
/// `-inf` values.
pub fn compute_energy_profile(
    samples: &[f32],
    sample_rate: u32,
    frame_duration_ms: u64,
) -> EnergyProfile {
    let frame_len =
        ((frame_duration_ms as f64 / 1000.0) * sample_rate as f64).round() as usize;
    let frame_len = frame_len.max(2);
    let hop = (frame_len / 2).max(1);

    let rms = frame_rms(samples, frame_len, hop);
    let times = (0..rms.len())
        .map(|i| (i * hop) as f64 / sample_rate as f64)
        .collect();
    let db = to_relative_db(&rms);

    EnergyProfile {
        times,
        db,
        frame_len,
        hop,
        sample_rate,
    }
}

/// RMS per frame of `frame_len` samples every `hop` samples. The final
/// frame may be shorter.
pub fn frame_rms(samples: &[f32], frame_len: usize, hop: usize) -> Vec<f64> {
    let hop = hop.max(1);
    let mut rms = Vec::new();

    let mut start = 0usize;
    while start < samples.len() {
        let end = (start + frame_len).min(samples.len());
        let frame = &samples[start..end];
        let mean_square: f64 = frame
            .iter()
            .map(|&s| {
                let s = s as f64;
                s * s
            })
            .sum::<f64>()
            / frame.len() as f64;
        rms.push(mean_square.sqrt());
        start += hop;
    }

    rms
}

/// Convert frame RMS values to decibels relative to the loudest frame,
/// floored at [`DB_FLOOR`].
pub fn to_relative_db(rms: &[f64]) -> Vec<f64> {
    let max_rms = rms.iter().cloned().fold(0.0f64, f64::max);

    rms.iter()
        .map(|&value| {
            if max_rms <= 0.0 || value <= 0.0 {
                DB_FLOOR
            } else {
                (20.0 * (value / max_rms).log10()).max(DB_FLOOR)
            }
        })
        .collect()
}

/// Linear-interpolated percentile of `values`, `p` in [0, 100].
///
/// Returns [`DB_FLOOR`] for an empty slice so callers never divide
/// into an empty distribution.
pub fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return DB_FLOOR;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let rank = (p / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = rank - lo as f64;
        sorted[lo] + (sorted[hi] - sorted[lo]) * frac
    }
}

/// Derive the speech threshold from the dB distribution.
///
/// `min_db` is the 5th percentile of values strictly above the silence
/// floor (hard-silence frames would otherwise drag the range down);
/// `max_db` is the 95th percentile of all values. The threshold sits
/// `volume_threshold` percent of the way between them. A signal where
/// every frame is at the floor has no usable range: both bounds
/// collapse to the floor and every frame classifies as silence.
pub fn adaptive_threshold_db(db: &[f64], volume_threshold: f64) -> f64 {
    let above_floor: Vec<f64> = db.iter().copied().filter(|&v| v > DB_FLOOR).collect();

    let (min_db, max_db) = if above_floor.is_empty() {
        (DB_FLOOR, DB_FLOOR)
    } else {
        (percentile(&above_floor, 5.0), percentile(db, 95.0))
    };

    min_db + (max_db - min_db) * volume_threshold / 100.0
}

/// Initial per-frame speech flags: energy strictly above the threshold.
pub fn classify_speech(db: &[f64], threshold_db: f64) -> Vec<bool> {
    db.iter().map(|&v| v > threshold_db).collect()
}
