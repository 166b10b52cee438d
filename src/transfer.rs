//! The transform engine: a read/step/flush loop over two fixed staging
//! buffers.

use std::io::{Read, Write};

use log::debug;

use crate::{
    decompressor::Decompressor, zstd::ZstdDecoder, TransformError, TransformResult,
};

/// One single-use decompression session.
///
/// Owns the codec state and both staging buffers; everything is released
/// when the session goes out of scope, on success and on every failure
/// path alike. Buffer capacities are fixed at construction from the
/// decoder's recommended sizes and never change.
pub struct Session<D> {
    decoder: D,
    in_buf: Vec<u8>,
    out_buf: Vec<u8>,
}

impl<D: Decompressor> Session<D> {
    /// Set up a session around `decoder`, allocating the staging buffers.
    pub fn new(decoder: D) -> TransformResult<Self> {
        let in_buf = alloc_staging(decoder.recommended_in_size())?;
        let out_buf = alloc_staging(decoder.recommended_out_size())?;
        Ok(Session {
            decoder,
            in_buf,
            out_buf,
        })
    }

    /// Run the transform: drain `src` to end of stream, writing everything
    /// the codec produces to `dst`. Consumes the session, which serves
    /// exactly one transform; codec state and buffers are released when
    /// this returns, on every exit path.
    ///
    /// Any failure aborts immediately; output already written to `dst`
    /// stays there. See the crate docs for the no-rollback contract.
    pub fn run<R: Read, W: Write>(mut self, src: &mut R, dst: &mut W) -> TransformResult<()> {
        let mut total_in: u64 = 0;
        let mut total_out: u64 = 0;
        // Hint from the most recent step. Zero means the codec is at a
        // frame boundary, so end of stream is a clean finish.
        let mut need = 0;

        loop {
            let size = src.read(&mut self.in_buf).map_err(TransformError::Read)?;
            if size == 0 {
                break;
            }
            total_in += size as u64;

            // Drain this chunk completely before reading again. One read
            // may take several steps to consume, and each step may fill
            // the output buffer, which must be flushed before the codec
            // can produce more.
            let mut pos = 0;
            while pos < size {
                let step = self
                    .decoder
                    .decompress(&self.in_buf[pos..size], &mut self.out_buf)?;
                if step.wrote > 0 {
                    let written = dst
                        .write(&self.out_buf[..step.wrote])
                        .map_err(TransformError::Write)?;
                    if written != step.wrote {
                        return Err(TransformError::ShortWrite {
                            expected: step.wrote,
                            written,
                        });
                    }
                    total_out += step.wrote as u64;
                }
                pos += step.consumed;
                need = step.need;
            }
        }

        if need != 0 {
            return Err(TransformError::TruncatedInput);
        }
        debug!("decompressed stream: {total_in} bytes in, {total_out} bytes out");
        Ok(())
    }
}

// try_reserve_exact so an oversized or failed allocation reports instead
// of aborting the process.
fn alloc_staging(size: usize) -> TransformResult<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(size)?;
    buf.resize(size, 0);
    Ok(buf)
}

/// Decompress a zstd stream from `src` onto `dst` in one blocking pass.
///
/// Memory use is bounded by the codec's two recommended staging sizes no
/// matter how long the stream is.
pub fn decompress<R: Read, W: Write>(src: &mut R, dst: &mut W) -> TransformResult<()> {
    let decoder = ZstdDecoder::new()?;
    Session::new(decoder)?.run(src, dst)
}
