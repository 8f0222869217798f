//! Unreal decompression

use std::io::{Read, Write};

use flate2::bufread::{GzDecoder, ZlibDecoder};

use crate::Error;

pub mod oodle;

/// Compression method
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub enum CompressionMethod {
    /// None
    #[default]
    None,
    /// Zlib compression
    Zlib,
    /// Gzip compression
    Gzip,
    /// Lz4 compression
    Lz4,
    /// Zstd compression
    Zstd,
    /// Oodle compression (Kraken)
    Oodle,
    /// Unknown compression format
    Unknown(Box<str>),
}

impl CompressionMethod {
    /// Create a new `CompressionMethod` from the method name
    pub fn new(name: &str) -> Self {
        match name {
            "None" => Self::None,
            "Zlib" => Self::Zlib,
            "Gzip" => Self::Gzip,
            "LZ4" => Self::Lz4,
            "Zstd" => Self::Zstd,
            "Oodle" => Self::Oodle,
            _ => Self::Unknown(name.to_string().into_boxed_str()),
        }
    }
}

impl std::fmt::Display for CompressionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompressionMethod::None => f.write_str("None"),
            CompressionMethod::Zlib => f.write_str("Zlib"),
            CompressionMethod::Gzip => f.write_str("Gzip"),
            CompressionMethod::Lz4 => f.write_str("LZ4"),
            CompressionMethod::Zstd => f.write_str("Zstd"),
            CompressionMethod::Oodle => f.write_str("Oodle"),
            CompressionMethod::Unknown(e) => write!(f, "{e}"),
        }
    }
}

/// Decompress data with the given compression method
pub fn decompress(
    method: CompressionMethod,
    compressed: &[u8],
    decompressed: &mut [u8],
) -> Result<(), Error> {
    match method {
        CompressionMethod::None => {
            decompressed.copy_from_slice(&compressed[..decompressed.len()]);
            Ok(())
        }
        CompressionMethod::Zlib => Ok(ZlibDecoder::new(compressed).read_exact(decompressed)?),
        CompressionMethod::Gzip => Ok(GzDecoder::new(compressed).read_exact(decompressed)?),
        CompressionMethod::Lz4 => {
            lz4_flex::block::decompress_into(compressed, decompressed)?;
            Ok(())
        }
        CompressionMethod::Zstd => {
            let written = zstd::bulk::decompress_to_buffer(compressed, decompressed)
                .map_err(Error::Io)?;
            if written != decompressed.len() {
                return Err(Error::InvalidFile(
                    "Zstd decompression produced an unexpected size".to_string().into_boxed_str(),
                ));
            }
            Ok(())
        }
        CompressionMethod::Oodle => oodle::decompress(compressed, decompressed),
        CompressionMethod::Unknown(name) => Err(Error::UnknownCompressionMethod(name)),
    }
}

/// Compress `data` with the given compression method, appending the result to `out`.
///
/// For [`CompressionMethod::Oodle`] this defers to the process-wide Oodle
/// service (see [`oodle`]) and returns `Ok(false)` without writing anything
/// when the service reports itself unavailable, letting the caller fall back
/// to an uncompressed block instead of failing the whole write.
pub fn compress(method: &CompressionMethod, data: &[u8], out: &mut Vec<u8>) -> Result<bool, Error> {
    match method {
        CompressionMethod::None => Ok(false),
        CompressionMethod::Zlib => {
            let mut encoder =
                flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
            encoder.write_all(data)?;
            out.extend_from_slice(&encoder.finish()?);
            Ok(true)
        }
        CompressionMethod::Gzip => {
            let mut encoder =
                flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
            encoder.write_all(data)?;
            out.extend_from_slice(&encoder.finish()?);
            Ok(true)
        }
        CompressionMethod::Lz4 => {
            out.extend_from_slice(&lz4_flex::block::compress(data));
            Ok(true)
        }
        CompressionMethod::Zstd => {
            out.extend_from_slice(&zstd::bulk::compress(data, 0).map_err(Error::Io)?);
            Ok(true)
        }
        CompressionMethod::Oodle => match oodle::compress(data) {
            Some(compressed) => {
                out.extend_from_slice(&compressed);
                Ok(true)
            }
            None => Ok(false),
        },
        CompressionMethod::Unknown(name) => Err(Error::UnknownCompressionMethod(name.clone())),
    }
}
