//! Segment extraction, padding and merging.
//!
//! A single linear scan converts per-frame speech flags into time
//! intervals; padding widens them without leaving the signal bounds;
//! merging collapses segments separated by less than the silence
//! padding. The merged list is sorted, non-overlapping and idempotent
//! under re-merging.

/// A mutable speech interval in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSegment {
    pub start: f64,
    pub end: f64,
}

impl TimeSegment {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Extract speech intervals from a flag sequence.
///
/// `times[i]` is the start time of frame `i`. A false-to-true
/// transition opens a segment; a true-to-false transition closes it
/// and keeps it when it spans at least `min_speech_duration`. A
/// segment still open at the end of the sequence closes at the final
/// frame time under the same rule.
pub fn extract_segments(
    flags: &[bool],
    times: &[f64],
    min_speech_duration: f64,
) -> Vec<TimeSegment> {
    debug_assert_eq!(flags.len(), times.len());

    let mut segments = Vec::new();
    let mut current_start: Option<f64> = None;

    for (i, &is_speech) in flags.iter().enumerate() {
        match (current_start, is_speech) {
            (None, true) => current_start = Some(times[i]),
            (Some(start), false) => {
                if times[i] - start >= min_speech_duration {
                    segments.push(TimeSegment {
                        start,
                        end: times[i],
                    });
                }
                current_start = None;
            }
            _ => {}
        }
    }

    // Trailing open segment
    if let (Some(start), Some(&last_time)) = (current_start, times.last()) {
        if last_time - start >= min_speech_duration {
            segments.push(TimeSegment {
                start,
                end: last_time,
            });
        }
    }

    segments
}

/// Widen each segment by `padding_secs`, clamped to `[0, total_duration]`.
pub fn pad_segments(segments: &mut [TimeSegment], padding_secs: f64, total_duration: f64) {
    for segment in segments.iter_mut() {
        segment.start = (segment.start - padding_secs).max(0.0);
        segment.end = (segment.end + padding_secs).min(total_duration);
    }
}

/// Merge segments whose gap is at most `max_gap_secs`.
///
/// Input order does not matter; segments are re-sorted by start before
/// the left-to-right walk. `last.end` only ever widens, so a merged
/// list re-merged with the same gap is returned unchanged.
pub fn merge_segments(segments: Vec<TimeSegment>, max_gap_secs: f64) -> Vec<TimeSegment> {
    let mut sorted = segments;
    sorted.sort_by(|a, b| {
        a.start
            .partial_cmp(&b.start)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut merged: Vec<TimeSegment> = Vec::with_capacity(sorted.len());
    for segment in sorted {
        match merged.last_mut() {
            Some(last) if segment.start - last.end <= max_gap_secs => {
                last.end = last.end.max(segment.end);
            }
            _ => merged.push(segment),
        }
    }

    merged
}
