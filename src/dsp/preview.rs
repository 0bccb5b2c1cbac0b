//! Waveform previews.
//!
//! Previews are point-sampled, not averaged or filtered: each output value is
//! an actual input sample, which keeps transient peaks visible. They are for
//! drawing only and are not suitable for playback.

use std::borrow::Cow;

/// Default preview length.
pub const DEFAULT_PREVIEW_SAMPLES: usize = 512;

/// Returns the signal a preview is built from.
///
/// Mono input is used as-is; stereo input is averaged per frame.
pub fn preview_source<'a>(left: &'a [f32], right: Option<&[f32]>) -> Cow<'a, [f32]> {
    match right {
        None => Cow::Borrowed(left),
        Some(right) => Cow::Owned(
            left.iter()
                .zip(right)
                .map(|(l, r)| (l + r) * 0.5)
                .collect(),
        ),
    }
}

/// Picks at most `max_samples` evenly spaced samples from `samples`.
///
/// Inputs no longer than `max_samples` are copied unchanged. Otherwise output
/// `i` is the input at `round(i * (len - 1) / (max_samples - 1))`, so the
/// first and last input samples are always included. Rounding is ties-to-even.
pub fn build_preview(samples: &[f32], max_samples: usize) -> Vec<f32> {
    if max_samples == 0 || samples.is_empty() {
        return Vec::new();
    }
    if samples.len() <= max_samples {
        return samples.to_vec();
    }
    if max_samples == 1 {
        return vec![samples[0]];
    }

    let last = samples.len() - 1;
    let step = last as f64 / (max_samples - 1) as f64;
    (0..max_samples)
        .map(|i| {
            let idx = (i as f64 * step).round_ties_even() as usize;
            samples[idx.min(last)]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_max_or_empty_input_gives_empty_preview() {
        assert!(build_preview(&[0.1, 0.2], 0).is_empty());
        assert!(build_preview(&[], 16).is_empty());
    }

    #[test]
    fn short_input_is_copied() {
        let samples = [0.1, -0.2, 0.3];
        assert_eq!(build_preview(&samples, 3), samples.to_vec());
        assert_eq!(build_preview(&samples, 512), samples.to_vec());
    }

    #[test]
    fn long_input_yields_exactly_max_samples() {
        let samples: Vec<f32> = (0..1000).map(|i| i as f32 / 1000.0).collect();
        for max in [2, 3, 10, 512, 999] {
            let preview = build_preview(&samples, max);
            assert_eq!(preview.len(), max);
            assert_eq!(preview[0], samples[0]);
            assert_eq!(preview[max - 1], samples[999]);
        }
    }

    #[test]
    fn single_point_preview_takes_first_sample() {
        assert_eq!(build_preview(&[0.4, 0.9, -0.1], 1), vec![0.4]);
    }

    #[test]
    fn indices_round_ties_to_even() {
        // len 6, max 3: step 2.5 -> indices 0, round(2.5)=2, 5.
        let samples = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(build_preview(&samples, 3), vec![0.0, 2.0, 5.0]);
    }

    #[test]
    fn point_sampling_keeps_peaks() {
        let mut samples = vec![0.0f32; 9];
        samples[4] = 0.95;
        // step 2.0 -> indices 0, 2, 4, 6, 8
        let preview = build_preview(&samples, 5);
        assert_eq!(preview, vec![0.0, 0.0, 0.95, 0.0, 0.0]);
    }

    #[test]
    fn stereo_preview_uses_channel_average() {
        let left: Vec<f32> = (0..100).map(|i| i as f32 / 100.0).collect();
        let right: Vec<f32> = (0..100).map(|i| -(i as f32) / 200.0).collect();

        let source = preview_source(&left, Some(&right));
        assert_eq!(source.len(), 100);
        let preview = build_preview(&source, 10);

        assert_eq!(preview.len(), 10);
        assert_eq!(preview[0], (left[0] + right[0]) * 0.5);
        assert_eq!(preview[9], (left[99] + right[99]) * 0.5);
        // step = 11.0 -> index 11 for the second point
        assert_eq!(preview[1], (left[11] + right[11]) * 0.5);
    }

    #[test]
    fn mono_preview_source_borrows() {
        let left = [0.5, 0.25];
        assert!(matches!(preview_source(&left, None), Cow::Borrowed(_)));
    }
}
