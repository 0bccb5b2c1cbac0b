//! Native WAV reader.
//!
//! Reads mono or stereo WAV files using the hound crate. Only two sample
//! encodings are accepted: 16-bit integer PCM and 32-bit IEEE float. The
//! format tag is checked, so 32-bit integer PCM is rejected rather than
//! misread as float.

use std::path::Path;

use hound::{SampleFormat, WavReader};

use crate::error::{BakeError, ErrorCode, Result};

use super::decoder::DecodedAudio;

/// Full-scale divisor for 16-bit PCM.
pub const PCM16_SCALE: f32 = 32768.0;

/// Reads a WAV file into de-interleaved channels in [-1, 1].
pub fn read_wav(path: &Path) -> Result<DecodedAudio> {
    let mut reader = WavReader::open(path).map_err(|e| map_hound_error(path, e))?;
    let spec = reader.spec();

    if spec.channels != 1 && spec.channels != 2 {
        return Err(BakeError::unsupported_format(
            path,
            format!("expected mono/stereo wav, got {} channels", spec.channels),
        ));
    }
    check_sample_rate(path, spec.sample_rate)?;

    let samples: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Int, 16) => reader
            .samples::<i16>()
            .map(|s| s.map(pcm16_to_f32))
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| map_hound_error(path, e))?,
        (SampleFormat::Float, 32) => reader
            .samples::<f32>()
            .map(|s| s.map(float_to_f32))
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| map_hound_error(path, e))?,
        (format, bits) => {
            let kind = match format {
                SampleFormat::Int => "integer",
                SampleFormat::Float => "float",
            };
            return Err(BakeError::unsupported_format(
                path,
                format!(
                    "unsupported sample format: {}-bit {} (expected 16-bit integer or 32-bit float)",
                    bits, kind
                ),
            ));
        }
    };

    if samples.is_empty() {
        return Err(BakeError::unsupported_format(path, "file contains no audio frames"));
    }

    if spec.channels == 1 {
        return Ok(DecodedAudio {
            sample_rate: spec.sample_rate,
            channels: 1,
            left: samples,
            right: None,
        });
    }

    let (left, right) = deinterleave(&samples);
    Ok(DecodedAudio {
        sample_rate: spec.sample_rate,
        channels: 2,
        left,
        right: Some(right),
    })
}

/// Splits interleaved stereo frames `L0, R0, L1, R1, ...` into two channels.
///
/// A trailing half frame ends up in the left channel only, so callers can
/// detect truncated data by comparing lengths.
pub fn deinterleave(samples: &[f32]) -> (Vec<f32>, Vec<f32>) {
    let left = samples.iter().step_by(2).copied().collect();
    let right = samples.iter().skip(1).step_by(2).copied().collect();
    (left, right)
}

/// Rejects rates the generated `int sampleRate` field cannot hold.
pub fn check_sample_rate(path: &Path, sample_rate: u32) -> Result<()> {
    if sample_rate == 0 {
        return Err(BakeError::unsupported_format(path, "sample rate is 0 Hz"));
    }
    if i32::try_from(sample_rate).is_err() {
        return Err(BakeError::unsupported_format(
            path,
            format!("sample rate {} Hz is out of range", sample_rate),
        ));
    }
    Ok(())
}

fn pcm16_to_f32(value: i16) -> f32 {
    (value as f32 / PCM16_SCALE).clamp(-1.0, 1.0)
}

fn float_to_f32(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}

fn map_hound_error(path: &Path, err: hound::Error) -> BakeError {
    match err {
        hound::Error::IoError(io) => BakeError::io("read", path, io),
        // hound refuses data chunks that end in a partial frame.
        hound::Error::FormatError("invalid data chunk length") => BakeError::new(
            ErrorCode::ChannelLengthMismatch,
            format!(
                "{}: data chunk ends in a partial frame, channels have unequal lengths",
                path.display()
            ),
        ),
        hound::Error::Unsupported => BakeError::unsupported_format(
            path,
            "unsupported compression (only uncompressed PCM and IEEE float WAV are supported)",
        ),
        other => BakeError::unsupported_format(path, format!("invalid wav: {}", other)),
    }
}
