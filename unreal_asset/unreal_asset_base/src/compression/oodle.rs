//! Oodle compression service
//!
//! The Oodle library itself is an external dependency the core only calls
//! through a thin, process-wide service: lazily loaded once, reentrant, and
//! guarded by an `available` flag callers check before trusting a compressed
//! result. Without the `oodle` feature (e.g. in tests, or on platforms where
//! the vendor library can't be linked) the service reports itself unavailable
//! and every `compress` call returns `None`, which the writer reads as "not
//! smaller" and falls back to storing the block uncompressed.

use std::sync::OnceLock;

#[cfg(feature = "oodle")]
#[link(name = "oo2core_9_win64")]
#[allow(non_snake_case)]
extern "C" {
    fn OodleLZ_Compress(
        codec: u32,
        buffer: *const u8,
        buffer_size: u64,
        output_buffer: *mut u8,
        compression_level: u32,
        a: u32,
        b: u32,
        c: u32,
        d: u32,
        e: u32,
    ) -> i32;

    fn OodleLZ_Decompress(
        buffer: *const u8,
        buffer_size: u64,
        output_buffer: *mut u8,
        output_buffer_size: u64,
        a: u32,
        b: u32,
        c: u32,
        d: u32,
        e: u32,
        f: u32,
        g: u32,
        h: u32,
        i: u32,
        thread_module: u32,
    ) -> i32;
}

/// Oodle compressor id, `OodleLZ_Compressor::Kraken`
#[cfg(feature = "oodle")]
const OODLE_LZ_KRAKEN: u32 = 8;
/// Oodle compression level, `OodleLZ_CompressionLevel::Normal`
#[cfg(feature = "oodle")]
const OODLE_LEVEL_NORMAL: u32 = 2;

/// Whether the Oodle FFI library is present and callable on this process.
///
/// The probe runs exactly once; later calls reuse the cached result, matching
/// the idempotent, reentrant lazy-initialization the Oodle FFI requires.
pub fn available() -> bool {
    static AVAILABLE: OnceLock<bool> = OnceLock::new();
    *AVAILABLE.get_or_init(probe)
}

#[cfg(feature = "oodle")]
fn probe() -> bool {
    // The library is statically linked; if linking succeeded the symbols are
    // callable. There is no separate handshake beyond that.
    true
}

#[cfg(not(feature = "oodle"))]
fn probe() -> bool {
    false
}

/// Compress `data` with Oodle Kraken at the normal level.
///
/// Returns `None` when Oodle is unavailable, or when compression did not
/// actually shrink the input (the caller falls back to an uncompressed
/// block in that case, per method index 0).
pub fn compress(data: &[u8]) -> Option<Vec<u8>> {
    if !available() {
        return None;
    }

    #[cfg(feature = "oodle")]
    {
        let mut output = vec![0u8; data.len() + data.len() / 16 + 64];
        let written = unsafe {
            OodleLZ_Compress(
                OODLE_LZ_KRAKEN,
                data.as_ptr(),
                data.len() as u64,
                output.as_mut_ptr(),
                OODLE_LEVEL_NORMAL,
                0,
                0,
                0,
                0,
                0,
            )
        };

        if written <= 0 {
            return None;
        }

        output.truncate(written as usize);
        if output.len() < data.len() {
            Some(output)
        } else {
            None
        }
    }

    #[cfg(not(feature = "oodle"))]
    {
        let _ = data;
        None
    }
}

/// Decompress an Oodle-compressed block into `decompressed`, whose length is
/// the recorded uncompressed size.
pub fn decompress(compressed: &[u8], decompressed: &mut [u8]) -> Result<(), crate::error::Error> {
    if !available() {
        return Err(crate::error::Error::OodleNotInitialized);
    }

    #[cfg(feature = "oodle")]
    {
        let written = unsafe {
            OodleLZ_Decompress(
                compressed.as_ptr(),
                compressed.len() as u64,
                decompressed.as_mut_ptr(),
                decompressed.len() as u64,
                0,
                0,
                0,
                0,
                0,
                0,
                0,
                0,
                0,
                3,
            )
        };

        if written as usize != decompressed.len() {
            return Err(crate::error::Error::Oodle);
        }

        Ok(())
    }

    #[cfg(not(feature = "oodle"))]
    {
        let _ = (compressed, decompressed);
        Err(crate::error::Error::OodleNotInitialized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_without_feature_falls_back() {
        // Without the `oodle` feature this always reports unavailable and
        // compress always yields None, which is the fallback-to-method-0 path.
        #[cfg(not(feature = "oodle"))]
        {
            assert!(!available());
            assert!(compress(b"some test data, repeated, repeated, repeated").is_none());
        }
    }
}
