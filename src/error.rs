use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while rendering, encoding or reading icons.
#[derive(Error, Debug)]
pub enum IconError {
    #[error("icon size must be a positive integer, got {0}")]
    InvalidSize(u32),

    #[error("image dimensions must be non-zero, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("pixel buffer holds {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("compression failed: {0}")]
    Compression(#[from] std::io::Error),

    #[error("missing PNG signature")]
    Signature,

    #[error("PNG stream ends inside a chunk at offset {offset}")]
    Truncated { offset: usize },

    #[error("CRC mismatch in {tag} chunk: stored {stored:#010x}, computed {computed:#010x}")]
    Checksum {
        tag: String,
        stored: u32,
        computed: u32,
    },

    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid density table: {message}")]
    Density { message: String },
}

pub type Result<T> = std::result::Result<T, IconError>;
