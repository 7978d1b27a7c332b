use std::io;

/// Body transfer coding error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyError {
    /// Chunk size token is empty or too long.
    InvalidChunkSize,
    /// Chunk size exceeds [`MAX_CHUNK_SIZE`][super::MAX_CHUNK_SIZE].
    ChunkTooLarge,
    /// Read after the chunked body has been fully consumed.
    Terminated,
    /// Write after the chunked body has been completed.
    AlreadyComplete,
}

impl BodyError {
    /// Returns the [`BodyError`] carried by an [`io::Error`], if any.
    pub fn from_io(err: &io::Error) -> Option<BodyError> {
        err.get_ref()?.downcast_ref().copied()
    }

    const fn message(&self) -> &'static str {
        match self {
            Self::InvalidChunkSize => "invalid chunk size",
            Self::ChunkTooLarge => "chunk size too large",
            Self::Terminated => "chunked body already terminated",
            Self::AlreadyComplete => "chunked body already completed",
        }
    }

    const fn io_kind(&self) -> io::ErrorKind {
        match self {
            Self::InvalidChunkSize | Self::ChunkTooLarge => io::ErrorKind::InvalidData,
            Self::Terminated => io::ErrorKind::UnexpectedEof,
            Self::AlreadyComplete => io::ErrorKind::BrokenPipe,
        }
    }
}

impl std::error::Error for BodyError { }

impl std::fmt::Display for BodyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl From<BodyError> for io::Error {
    #[inline]
    fn from(v: BodyError) -> Self {
        io::Error::new(v.io_kind(), v)
    }
}
