//! Audio file I/O for Callweave
//!
//! Fragments are read as WAV files and converted to mono 32-bit float at
//! the canonical sample rate on load. Sample rate conversion uses linear
//! interpolation. The final recording is written as 16-bit PCM stereo.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::engine::buffer::{StereoRecording, CANONICAL_SAMPLE_RATE};
use crate::error::{CallweaveError, Result};

/// Load a WAV file as mono f32 samples at the canonical sample rate
///
/// Multi-channel sources are downmixed by averaging each frame; sources at
/// a different rate are resampled.
///
/// # Errors
/// * `Decode` - the file does not exist, is not a valid WAV file, or uses
///   an unsupported bit depth
pub fn load_fragment_audio(path: &Path) -> Result<Vec<f32>> {
    let reader = WavReader::open(path).map_err(|e| decode_error(path, "failed to open WAV file", e))?;

    let spec = reader.spec();
    let source_rate = spec.sample_rate;
    let channels = spec.channels as usize;

    let interleaved = read_samples_as_f32(reader, path)?;

    let mono = if channels == 1 {
        interleaved
    } else {
        downmix_to_mono(&interleaved, channels)
    };

    if source_rate == CANONICAL_SAMPLE_RATE {
        Ok(mono)
    } else {
        Ok(resample_linear(
            &mono,
            CANONICAL_SAMPLE_RATE as f64 / source_rate as f64,
        ))
    }
}

/// Write the final stereo recording as a 16-bit PCM WAV file
///
/// # Errors
/// * `Write` - the file cannot be created or a sample cannot be written
pub fn export_recording(recording: &StereoRecording, path: &Path) -> Result<()> {
    let spec = WavSpec {
        channels: 2,
        sample_rate: recording.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec).map_err(|e| CallweaveError::Write {
        path: path.display().to_string(),
        source: e,
    })?;

    for &sample in recording.samples() {
        let scaled = (sample * 32767.0).clamp(-32768.0, 32767.0) as i16;
        writer.write_sample(scaled).map_err(|e| CallweaveError::Write {
            path: path.display().to_string(),
            source: e,
        })?;
    }

    writer.finalize().map_err(|e| CallweaveError::Write {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// Write mono f32 samples as a 16-bit PCM WAV file
///
/// Used by the mock speech synthesizer and by tests to place fragment files
/// on disk.
pub fn write_mono_wav(samples: &[f32], sample_rate: u32, path: &Path) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec).map_err(|e| CallweaveError::Write {
        path: path.display().to_string(),
        source: e,
    })?;

    for &sample in samples {
        let scaled = (sample * 32767.0).clamp(-32768.0, 32767.0) as i16;
        writer.write_sample(scaled).map_err(|e| CallweaveError::Write {
            path: path.display().to_string(),
            source: e,
        })?;
    }

    writer.finalize().map_err(|e| CallweaveError::Write {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// Generate a mono sine tone at the canonical sample rate
///
/// Useful for testing the assembly pipeline and as the mock synthesizer's
/// output signal.
pub fn generate_tone(frequency: f32, duration_secs: f32, amplitude: f32) -> Vec<f32> {
    let num_samples = (duration_secs * CANONICAL_SAMPLE_RATE as f32) as usize;
    let angular_freq = 2.0 * std::f32::consts::PI * frequency / CANONICAL_SAMPLE_RATE as f32;

    (0..num_samples)
        .map(|i| amplitude * (angular_freq * i as f32).sin())
        .collect()
}

// ============================================================================
// Internal helper functions
// ============================================================================

fn decode_error(path: &Path, reason: &str, source: hound::Error) -> CallweaveError {
    CallweaveError::Decode {
        path: path.display().to_string(),
        reason: reason.to_string(),
        source: Some(Box::new(source)),
    }
}

/// Read samples from a WAV reader and convert to f32 in -1.0..1.0
fn read_samples_as_f32<R: std::io::Read>(mut reader: WavReader<R>, path: &Path) -> Result<Vec<f32>> {
    let spec = reader.spec();
    match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map_err(|e| decode_error(path, "failed to read float samples", e)))
            .collect(),
        SampleFormat::Int => {
            let bits = spec.bits_per_sample;
            if !(8..=32).contains(&bits) {
                return Err(CallweaveError::Decode {
                    path: path.display().to_string(),
                    reason: format!("unsupported bit depth: {}", bits),
                    source: None,
                });
            }
            let max_val = (1u64 << (bits - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| {
                    s.map(|v| v as f32 / max_val)
                        .map_err(|e| decode_error(path, "failed to read integer samples", e))
                })
                .collect()
        }
    }
}

/// Downmix interleaved multi-channel samples to mono by averaging each frame
fn downmix_to_mono(interleaved: &[f32], channels: usize) -> Vec<f32> {
    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

/// Linear interpolation resampling
///
/// Adequate for speech fragments; the output length is the input length
/// scaled by `ratio`, rounded up.
fn resample_linear(samples: &[f32], ratio: f64) -> Vec<f32> {
    if samples.is_empty() {
        return Vec::new();
    }

    let source_len = samples.len();
    let target_len = ((source_len as f64) * ratio).ceil() as usize;
    let mut output = Vec::with_capacity(target_len);

    for i in 0..target_len {
        let src_pos = i as f64 / ratio;
        let src_idx = src_pos.floor() as usize;
        let frac = (src_pos - src_idx as f64) as f32;

        let sample = if src_idx + 1 < source_len {
            samples[src_idx] * (1.0 - frac) + samples[src_idx + 1] * frac
        } else if src_idx < source_len {
            samples[src_idx]
        } else {
            0.0
        };

        output.push(sample);
    }

    output
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use tempfile::tempdir;

    #[test]
    fn test_generate_tone_length() {
        let tone = generate_tone(440.0, 0.5, 0.8);
        assert_eq!(tone.len(), (CANONICAL_SAMPLE_RATE as f32 * 0.5) as usize);
        let peak = tone.iter().fold(0.0_f32, |acc, s| acc.max(s.abs()));
        assert!(peak <= 0.8 + 1e-6);
        assert!(peak > 0.7);
    }

    #[test]
    fn test_mono_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tone.wav");

        let original = generate_tone(440.0, 0.25, 0.5);
        write_mono_wav(&original, CANONICAL_SAMPLE_RATE, &path).unwrap();

        let loaded = load_fragment_audio(&path).unwrap();
        assert_eq!(loaded.len(), original.len());

        // 16-bit quantization error is at most one step
        for (orig, load) in original.iter().zip(loaded.iter()) {
            assert_abs_diff_eq!(orig, load, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_load_resamples_to_canonical_rate() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hi_rate.wav");

        // Half a second at 44.1kHz should come back as half a second at 22.05kHz
        let source: Vec<f32> = vec![0.25; 22_050];
        write_mono_wav(&source, 44_100, &path).unwrap();

        let loaded = load_fragment_audio(&path).unwrap();
        let expected = (22_050_f64 * 0.5).ceil() as usize;
        assert_eq!(loaded.len(), expected);
        // Interior of a constant signal survives linear interpolation
        assert_abs_diff_eq!(loaded[expected / 2], 0.25, epsilon = 1e-3);
    }

    #[test]
    fn test_load_downmixes_stereo_to_mono() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stereo.wav");

        let spec = WavSpec {
            channels: 2,
            sample_rate: CANONICAL_SAMPLE_RATE,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for _ in 0..100 {
            writer.write_sample((0.5_f32 * 32767.0) as i16).unwrap();
            writer.write_sample(0_i16).unwrap();
        }
        writer.finalize().unwrap();

        let loaded = load_fragment_audio(&path).unwrap();
        assert_eq!(loaded.len(), 100);
        assert_abs_diff_eq!(loaded[50], 0.25, epsilon = 1e-3);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = load_fragment_audio(Path::new("/nonexistent/fragment_0.wav"));
        assert!(matches!(result, Err(CallweaveError::Decode { .. })));
    }

    #[test]
    fn test_load_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("garbage.wav");
        std::fs::write(&path, b"not a wav file at all").unwrap();

        let result = load_fragment_audio(&path);
        assert!(matches!(result, Err(CallweaveError::Decode { .. })));
    }

    #[test]
    fn test_export_recording_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("call.wav");

        let recording = StereoRecording::from_interleaved(
            vec![0.1, -0.1, 0.2, -0.2, 0.3, -0.3],
            CANONICAL_SAMPLE_RATE,
        )
        .unwrap();
        export_recording(&recording, &path).unwrap();

        let reader = WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 2);
        assert_eq!(spec.sample_rate, CANONICAL_SAMPLE_RATE);
        assert_eq!(spec.bits_per_sample, 16);

        let samples: Vec<f32> = reader
            .into_samples::<i16>()
            .map(|s| s.unwrap() as f32 / 32767.0)
            .collect();
        assert_eq!(samples.len(), 6);
        for (orig, read) in recording.samples().iter().zip(samples.iter()) {
            assert_abs_diff_eq!(orig, read, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_resample_identity_ratio() {
        let samples = vec![0.0, 0.5, 1.0, 0.5];
        let resampled = resample_linear(&samples, 1.0);
        assert_eq!(resampled, samples);
    }

    #[test]
    fn test_resample_upsample_interpolates() {
        let samples = vec![0.0, 1.0, 0.0];
        let resampled = resample_linear(&samples, 2.0);
        assert!(resampled.len() >= 5);
        // Midpoint between 0.0 and 1.0
        assert_abs_diff_eq!(resampled[1], 0.5, epsilon = 0.01);
    }
}
