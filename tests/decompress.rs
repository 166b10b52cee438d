use std::io::{Cursor, Read, Seek, SeekFrom, Write};

use anyhow::Result;
use assert_matches::assert_matches;
use tempfile::tempfile;

use zdstream::{decompress, TransformError};

/// Deterministic test payload: compressible runs interleaved with
/// xorshift noise so the compressed stream has real structure.
fn payload(len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(len);
    let mut state: u32 = 0x2545_f491;
    while out.len() < len {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        if state & 1 == 0 {
            let run = (state >> 8) as usize % 64 + 16;
            out.resize((out.len() + run).min(len), (state >> 16) as u8);
        } else {
            out.push(state as u8);
        }
    }
    out
}

fn compress(data: &[u8]) -> Result<Vec<u8>> {
    Ok(zstd::stream::encode_all(data, 0)?)
}

#[test]
fn round_trip() -> Result<()> {
    let data = payload(64 * 1024);
    let compressed = compress(&data)?;

    let mut src = Cursor::new(compressed);
    let mut dst = Vec::new();
    decompress(&mut src, &mut dst)?;
    assert_eq!(dst, data);
    Ok(())
}

/// A reader that hands out at most `max` bytes per call, forcing the
/// engine through many partial chunks.
struct TrickleReader<R> {
    inner: R,
    max: usize,
}

impl<R: Read> Read for TrickleReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let cap = buf.len().min(self.max);
        self.inner.read(&mut buf[..cap])
    }
}

#[test]
fn chunk_boundaries_do_not_change_output() -> Result<()> {
    // Several multiples of the staging buffer sizes, so every code path
    // that spans a buffer boundary gets exercised.
    let data = payload(2 * 1024 * 1024);
    let compressed = compress(&data)?;

    let mut whole = Vec::new();
    decompress(&mut Cursor::new(&compressed), &mut whole)?;

    for max in [1, 7, 4096] {
        let mut trickled = Vec::new();
        let mut src = TrickleReader {
            inner: Cursor::new(&compressed),
            max,
        };
        decompress(&mut src, &mut trickled)?;
        assert_eq!(trickled, whole, "read size {max} altered the output");
    }
    assert_eq!(whole, data);
    Ok(())
}

#[test]
fn empty_frame_yields_empty_output() -> Result<()> {
    let compressed = compress(&[])?;
    assert!(!compressed.is_empty());

    let mut dst = Vec::new();
    decompress(&mut Cursor::new(compressed), &mut dst)?;
    assert!(dst.is_empty());
    Ok(())
}

#[test]
fn zero_byte_source_yields_empty_output() -> Result<()> {
    let mut dst = Vec::new();
    decompress(&mut Cursor::new(Vec::new()), &mut dst)?;
    assert!(dst.is_empty());
    Ok(())
}

#[test]
fn truncated_stream_fails() -> Result<()> {
    let data = payload(256 * 1024);
    let compressed = compress(&data)?;
    let cut = &compressed[..compressed.len() / 2];

    let mut dst = Vec::new();
    let err = decompress(&mut Cursor::new(cut), &mut dst).unwrap_err();
    assert_matches!(
        err,
        TransformError::TruncatedInput | TransformError::Codec(_)
    );
    // Whatever decoded before the cut stays written, and is a prefix of
    // the real payload. No rollback.
    assert!(data.starts_with(&dst));
    Ok(())
}

#[test]
fn garbage_input_is_a_codec_error() -> Result<()> {
    let garbage = payload(4096);

    let mut dst = Vec::new();
    let err = decompress(&mut Cursor::new(garbage), &mut dst).unwrap_err();
    assert_matches!(err, TransformError::Codec(_));
    Ok(())
}

#[test]
fn concatenated_frames_decode_back_to_back() -> Result<()> {
    let first = payload(32 * 1024);
    let second = payload(48 * 1024);
    let mut compressed = compress(&first)?;
    compressed.extend(compress(&second)?);

    let mut dst = Vec::new();
    decompress(&mut Cursor::new(compressed), &mut dst)?;

    let mut expected = first;
    expected.extend(second);
    assert_eq!(dst, expected);
    Ok(())
}

#[cfg(unix)]
#[test]
fn descriptor_round_trip() -> Result<()> {
    use std::os::fd::AsFd;

    let data = payload(128 * 1024);

    let mut src = tempfile()?;
    src.write_all(&compress(&data)?)?;
    src.seek(SeekFrom::Start(0))?;
    let mut dst = tempfile()?;

    zdstream::fd::decompress_fd(src.as_fd(), dst.as_fd())?;

    // Both descriptors are still open and owned by us.
    dst.seek(SeekFrom::Start(0))?;
    let mut out = Vec::new();
    dst.read_to_end(&mut out)?;
    assert_eq!(out, data);
    Ok(())
}
