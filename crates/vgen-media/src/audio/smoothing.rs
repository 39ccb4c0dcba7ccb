//! Temporal smoothing of per-frame speech flags.
//!
//! Two passes: a boolean median filter that drops isolated spikes, and
//! a gap-fill pass that bridges micro-pauses inside continuous speech.

/// Smooth a flag sequence for the given minimum-speech span.
///
/// `min_frames` is how many frames the minimum speech duration covers
/// (`min_speech_duration * sample_rate / hop`). The median kernel is
/// `min(min_frames / 2, 5)` forced odd and at least 1; a kernel of 1
/// is a no-op and the filter pass is skipped. Gaps up to
/// `min_frames / 4` frames are then filled.
pub fn smooth_flags(flags: &[bool], min_frames: usize) -> Vec<bool> {
    let kernel = make_odd((min_frames / 2).min(5)).max(1);

    let filtered = if kernel <= 1 {
        flags.to_vec()
    } else {
        median_filter(flags, kernel)
    };

    fill_gaps(&filtered, min_frames / 4)
}

fn make_odd(n: usize) -> usize {
    if n % 2 == 0 {
        n.saturating_sub(1)
    } else {
        n
    }
}

/// Boolean median filter with an odd kernel.
///
/// Each output flag is the majority vote over the centered window
/// (value thresholded at 0.5); windows are truncated at the edges.
pub fn median_filter(flags: &[bool], kernel: usize) -> Vec<bool> {
    debug_assert!(kernel % 2 == 1);
    let half = kernel / 2;

    (0..flags.len())
        .map(|i| {
            let lo = i.saturating_sub(half);
            let hi = (i + half + 1).min(flags.len());
            let window = &flags[lo..hi];
            let set = window.iter().filter(|&&f| f).count();
            set as f64 / window.len() as f64 > 0.5
        })
        .collect()
}

/// Fill short silence gaps inside speech.
///
/// For each speech-to-silence transition, if the next silence-to-speech
/// transition arrives within `max_gap` frames, the whole gap becomes
/// speech. Only the first following speech start is considered, so
/// fills never overlap.
pub fn fill_gaps(flags: &[bool], max_gap: usize) -> Vec<bool> {
    let mut result = flags.to_vec();
    if max_gap == 0 || flags.len() < 3 {
        return result;
    }

    let mut i = 1;
    while i < flags.len() {
        // speech -> silence transition at index i
        if flags[i - 1] && !flags[i] {
            let gap_end = (i + max_gap + 1).min(flags.len());
            if let Some(next_speech) = (i..gap_end).find(|&j| flags[j]) {
                for flag in result.iter_mut().take(next_speech).skip(i) {
                    *flag = true;
                }
                i = next_speech;
                continue;
            }
        }
        i += 1;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(pattern: &str) -> Vec<bool> {
        pattern.chars().map(|c| c == '1').collect()
    }

    fn pattern(flags: &[bool]) -> String {
        flags.iter().map(|&f| if f { '1' } else { '0' }).collect()
    }

    #[test]
    fn test_median_removes_isolated_spike() {
        let input = flags("000010000");
        let output = median_filter(&input, 3);
        assert_eq!(pattern(&output), "000000000");
    }

    #[test]
    fn test_median_removes_isolated_dropout() {
        let input = flags("111101111");
        let output = median_filter(&input, 3);
        assert_eq!(pattern(&output), "111111111");
    }

    #[test]
    fn test_median_preserves_blocks() {
        let input = flags("000111000");
        let output = median_filter(&input, 3);
        assert_eq!(pattern(&output), "000111000");
    }

    #[test]
    fn test_fill_short_gap() {
        let input = flags("1110011100");
        let output = fill_gaps(&input, 3);
        assert_eq!(pattern(&output), "1111111100");
    }

    #[test]
    fn test_gap_longer_than_limit_kept() {
        let input = flags("1110000111");
        let output = fill_gaps(&input, 2);
        assert_eq!(pattern(&output), "1110000111");
    }

    #[test]
    fn test_fills_do_not_overlap() {
        // Two separate micro-gaps; each fill starts from its own
        // speech end and stops at the first speech start after it.
        let input = flags("110110110");
        let output = fill_gaps(&input, 2);
        assert_eq!(pattern(&output), "111111110");
    }

    #[test]
    fn test_zero_gap_is_noop() {
        let input = flags("1101011");
        assert_eq!(fill_gaps(&input, 0), input);
    }

    #[test]
    fn test_smooth_flags_small_min_frames_skips_median() {
        // min_frames = 2 -> kernel 1 -> median skipped, gap fill 0
        let input = flags("10101");
        let output = smooth_flags(&input, 2);
        assert_eq!(output, input);
    }

    #[test]
    fn test_smooth_flags_combined() {
        // min_frames = 12 -> kernel 5, gap fill 3
        let mut input = vec![true; 20];
        input[7] = false; // dropout removed by median
        input.extend(flags("000111111111111"));
        let output = smooth_flags(&input, 12);
        assert!(output[7], "median filter should remove the dropout");
        assert!(
            output[20] && output[21] && output[22],
            "3-frame gap should be filled"
        );
    }
}
