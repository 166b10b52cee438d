use crate::TransformResult;

/// Outcome of a single decompression step.
#[derive(Debug)]
pub struct DecompressResult {
    /// Compressed bytes consumed from `src`.
    pub consumed: usize,
    /// Decompressed bytes produced into `dst`.
    pub wrote: usize,
    /// Codec hint: 0 when the current frame has been fully decoded and
    /// flushed, nonzero while more input is expected.
    pub need: usize,
}

/// A streaming decompression codec.
///
/// One implementor serves exactly one stream; implementors are not reused
/// across transforms.
pub trait Decompressor {
    /// Decode as much of `src` as fits in `dst`, starting from the codec's
    /// current mid-stream position.
    fn decompress(&mut self, src: &[u8], dst: &mut [u8]) -> TransformResult<DecompressResult>;

    /// Minimum efficient input staging size for this codec.
    fn recommended_in_size(&self) -> usize;

    /// Minimum efficient output staging size for this codec. Must be large
    /// enough that a single step can always flush a complete decoded block.
    fn recommended_out_size(&self) -> usize;
}
