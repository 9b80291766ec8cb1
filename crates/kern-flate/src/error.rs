use thiserror::Error;

pub type FlateResult<T> = Result<T, FlateError>;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FlateError {
    /// The stream is malformed: bad block type, invalid Huffman code,
    /// back-reference before the start of output, or a corrupt header.
    #[error("corrupt deflate stream")]
    Data,

    /// The output buffer is too small for the decompressed data.
    ///
    /// The growing decompression paths retry with a larger buffer on this
    /// error until the 16 MiB expansion ceiling is reached.
    #[error("output buffer too small")]
    Buf,
}
