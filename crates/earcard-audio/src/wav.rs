//! WAV encoding and decoding.
//!
//! Rendered notes are written as deterministic mono 16-bit PCM with no
//! metadata. Sample assets are read with `hound` and mixed down to mono.

use std::io::{self, Cursor, Write};

use crate::error::{AudioError, AudioResult};

/// Bits per sample of written files.
const BITS_PER_SAMPLE: u16 = 16;

/// Writes a complete mono 16-bit WAV file to a writer.
///
/// # Arguments
/// * `writer` - Output writer
/// * `sample_rate` - Sample rate in Hz
/// * `pcm_data` - Raw little-endian 16-bit PCM samples
pub fn write_wav<W: Write>(writer: &mut W, sample_rate: u32, pcm_data: &[u8]) -> io::Result<()> {
    let channels: u16 = 1;
    let block_align = channels * BITS_PER_SAMPLE / 8;
    let byte_rate = sample_rate * block_align as u32;
    let data_size = pcm_data.len() as u32;
    let file_size = 36 + data_size; // Total file size minus 8 bytes for RIFF header

    // RIFF header
    writer.write_all(b"RIFF")?;
    writer.write_all(&file_size.to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    // fmt chunk
    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?; // Chunk size (16 for PCM)
    writer.write_all(&1u16.to_le_bytes())?; // Audio format (1 = PCM)
    writer.write_all(&channels.to_le_bytes())?;
    writer.write_all(&sample_rate.to_le_bytes())?;
    writer.write_all(&byte_rate.to_le_bytes())?;
    writer.write_all(&block_align.to_le_bytes())?;
    writer.write_all(&BITS_PER_SAMPLE.to_le_bytes())?;

    // data chunk
    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;
    writer.write_all(pcm_data)?;

    Ok(())
}

/// Converts f64 samples to 16-bit PCM bytes, clipping to [-1.0, 1.0].
pub fn samples_to_pcm16(samples: &[f64]) -> Vec<u8> {
    let mut pcm = Vec::with_capacity(samples.len() * 2);

    for &sample in samples {
        let clipped = sample.clamp(-1.0, 1.0);
        let pcm_value = (clipped * 32767.0).round() as i16;
        pcm.extend_from_slice(&pcm_value.to_le_bytes());
    }

    pcm
}

/// Encodes mono samples as a complete WAV file.
pub fn encode_mono(samples: &[f64], sample_rate: u32) -> Vec<u8> {
    let pcm = samples_to_pcm16(samples);
    let mut buffer = Vec::with_capacity(44 + pcm.len());
    // Writing into a Vec cannot fail.
    let _ = write_wav(&mut buffer, sample_rate, &pcm);
    buffer
}

/// Decodes a WAV file held in memory into mono f64 samples and its sample rate.
///
/// Integer formats of 8 to 32 bits and 32-bit float are supported. Multiple
/// channels are averaged.
pub fn decode_mono(bytes: &[u8]) -> AudioResult<(Vec<f64>, u32)> {
    let mut reader = hound::WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;

    let interleaved: Vec<f64> = match spec.sample_format {
        hound::SampleFormat::Int => {
            if !(8..=32).contains(&spec.bits_per_sample) {
                return Err(AudioError::sample_load(format!(
                    "unsupported bit depth: {} bits",
                    spec.bits_per_sample
                )));
            }
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f64 / scale))
                .collect::<Result<_, _>>()?
        }
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<Result<_, _>>()?,
    };

    let mono = interleaved
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f64>() / frame.len() as f64)
        .collect();

    Ok((mono, spec.sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        let wav = encode_mono(&[0.0, 0.5, -0.5, 1.0], 22050);
        assert_eq!(wav.len(), 44 + 8);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(u32::from_le_bytes(wav[4..8].try_into().unwrap()), 36 + 8);
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(u16::from_le_bytes(wav[22..24].try_into().unwrap()), 1);
        assert_eq!(u32::from_le_bytes(wav[24..28].try_into().unwrap()), 22050);
        assert_eq!(u32::from_le_bytes(wav[28..32].try_into().unwrap()), 44100);
        assert_eq!(&wav[36..40], b"data");
    }

    #[test]
    fn test_pcm_clipping() {
        let pcm = samples_to_pcm16(&[2.0, -2.0]);
        assert_eq!(i16::from_le_bytes([pcm[0], pcm[1]]), 32767);
        assert_eq!(i16::from_le_bytes([pcm[2], pcm[3]]), -32767);
    }

    #[test]
    fn test_encode_then_decode() {
        let samples = [0.0, 0.25, -0.25, 0.5];
        let wav = encode_mono(&samples, 8000);
        let (decoded, rate) = decode_mono(&wav).unwrap();
        assert_eq!(rate, 8000);
        assert_eq!(decoded.len(), samples.len());
        for (a, b) in decoded.iter().zip(samples.iter()) {
            assert!((a - b).abs() < 1e-3);
        }
    }

    #[test]
    fn test_decode_stereo_float_averages_channels() {
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for (l, r) in [(1.0f32, 0.0f32), (0.5, -0.5)] {
                writer.write_sample(l).unwrap();
                writer.write_sample(r).unwrap();
            }
            writer.finalize().unwrap();
        }
        let (mono, rate) = decode_mono(cursor.get_ref()).unwrap();
        assert_eq!(rate, 44100);
        assert_eq!(mono, vec![0.5, 0.0]);
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(decode_mono(b"definitely not a wav file").is_err());
    }
}
