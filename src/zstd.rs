use crate::{
    decompressor::{DecompressResult, Decompressor},
    TransformError, TransformResult,
};
use zstd::zstd_safe::{get_error_name, DStream, InBuffer, OutBuffer, SafeResult};

/// Streaming zstd decoder behind the [`Decompressor`] seam.
pub struct ZstdDecoder {
    s: DStream<'static>,
}

impl ZstdDecoder {
    /// Create and initialize a decompression stream.
    pub fn new() -> TransformResult<Self> {
        let mut s = DStream::try_create().ok_or(TransformError::ContextCreation)?;
        s.init()
            .map_err(|code| TransformError::Init(get_error_name(code)))?;
        Ok(ZstdDecoder { s })
    }
}

fn handle_error(res: SafeResult) -> TransformResult<usize> {
    match res {
        Ok(n) => Ok(n),
        Err(code) => Err(TransformError::Codec(get_error_name(code))),
    }
}

impl Decompressor for ZstdDecoder {
    fn decompress(&mut self, src: &[u8], dst: &mut [u8]) -> TransformResult<DecompressResult> {
        let mut in_buffer = InBuffer::around(src);
        let mut out_buffer = OutBuffer::around(dst);
        let need = handle_error(self.s.decompress_stream(&mut out_buffer, &mut in_buffer))?;
        Ok(DecompressResult {
            consumed: in_buffer.pos,
            wrote: out_buffer.pos(),
            need,
        })
    }

    fn recommended_in_size(&self) -> usize {
        DStream::in_size()
    }

    fn recommended_out_size(&self) -> usize {
        DStream::out_size()
    }
}
