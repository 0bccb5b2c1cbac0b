//! Peak normalization.

/// Default peak level after normalization.
pub const DEFAULT_TARGET_PEAK: f32 = 0.95;

/// Peaks below this are treated as silence and left unscaled.
pub const SILENCE_THRESHOLD: f32 = 1e-12;

/// Returns the largest absolute sample value across all channels.
pub fn peak(left: &[f32], right: Option<&[f32]>) -> f32 {
    left.iter()
        .chain(right.unwrap_or_default())
        .fold(0.0f32, |acc, s| acc.max(s.abs()))
}

/// Scales both channels by the same factor so the global peak equals `target`.
///
/// Silent input (peak below [`SILENCE_THRESHOLD`]) is returned unscaled.
pub fn normalize_peak(
    left: &[f32],
    right: Option<&[f32]>,
    target: f32,
) -> (Vec<f32>, Option<Vec<f32>>) {
    let peak = peak(left, right);
    if peak < SILENCE_THRESHOLD {
        return (left.to_vec(), right.map(<[f32]>::to_vec));
    }

    let scale = f64::from(target) / f64::from(peak);
    let apply = |samples: &[f32]| -> Vec<f32> {
        samples
            .iter()
            .map(|s| ((f64::from(*s) * scale) as f32).clamp(-1.0, 1.0))
            .collect()
    };
    (apply(left), right.map(apply))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn scales_mono_to_target() {
        let decoded = [0.5, -0.5, 0.0, 32767.0 / 32768.0];
        let (left, right) = normalize_peak(&decoded, None, DEFAULT_TARGET_PEAK);

        assert!(right.is_none());
        assert_eq!(left.len(), 4);
        assert!((left[0] - 0.475).abs() < 1e-4);
        assert!((left[1] + 0.475).abs() < 1e-4);
        assert_eq!(left[2], 0.0);
        assert!(approx(left[3], 0.95));
        assert!(approx(peak(&left, None), 0.95));
    }

    #[test]
    fn stereo_shares_one_scale_factor() {
        let l = [0.1, -0.2];
        let r = [0.4, 0.05];
        let (left, right) = normalize_peak(&l, Some(&r), 0.8);
        let right = right.unwrap();

        // Peak is on the right channel; left keeps its ratio to it.
        assert!(approx(right[0], 0.8));
        assert!(approx(left[0], 0.2));
        assert!(approx(left[1], -0.4));
        assert!(approx(right[1], 0.1));
    }

    #[test]
    fn silence_is_returned_unscaled() {
        let quiet = [1e-13, -5e-13, 0.0];
        let (left, right) = normalize_peak(&quiet, Some(&quiet), DEFAULT_TARGET_PEAK);
        assert_eq!(left, quiet.to_vec());
        assert_eq!(right, Some(quiet.to_vec()));
    }

    #[test]
    fn empty_input_stays_empty() {
        let (left, right) = normalize_peak(&[], None, DEFAULT_TARGET_PEAK);
        assert!(left.is_empty());
        assert!(right.is_none());
    }

    #[test]
    fn quiet_signal_is_boosted() {
        let (left, _) = normalize_peak(&[0.01, -0.005], None, DEFAULT_TARGET_PEAK);
        assert!(approx(left[0], 0.95));
        assert!(approx(left[1], -0.475));
    }
}
