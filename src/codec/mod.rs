//! Codec Layer: Incremental COBS Encode/Decode
//!
//! Prinsip desain:
//! - Caller-Held State: engine tidak punya hidden/global state; satu
//!   [`Encoder`]/[`Decoder`] per message stream
//! - No Allocation: engine hanya baca/tulis buffer milik caller
//! - Streaming Invariance: bulk dan byte-at-a-time melewati satu routine
//!   akumulasi yang sama, jadi output-nya byte-identical by construction
//! - Satu Konvensi: konstanta wire format hidup di satu module (`block`)
//!   dan dipakai kedua engine

mod block;
mod decoder;
mod encoder;

pub use block::{max_encoded_len, DELIMITER, MAX_LITERAL_RUN, MAX_ZERO_RUN};
pub use decoder::{DecodeError, DecodeProgress, Decoder};
pub use encoder::{EncodeError, Encoder};

/// Encode satu message utuh menjadi satu stuffed frame, termasuk delimiter.
///
/// Convenience wrapper di atas streaming engine untuk pemakaian one-shot.
/// Returns panjang frame di `dst`. Ukur `dst` dengan
/// [`max_encoded_len`]`(src.len())`.
///
/// # Errors
/// [`EncodeError::OutputCapacity`] jika `dst` terlalu kecil.
pub fn encode_frame(src: &[u8], dst: &mut [u8]) -> Result<usize, EncodeError> {
    let mut encoder = Encoder::new();
    let mut written = encoder.encode(src, dst)?;
    written += encoder.finalize(&mut dst[written..])?;
    if written == dst.len() {
        return Err(EncodeError::OutputCapacity {
            needed: written + 1,
            available: dst.len(),
        });
    }
    dst[written] = DELIMITER;
    Ok(written + 1)
}

/// Decode satu stuffed frame utuh (sampai delimiter pertama) menjadi raw
/// message. Returns panjang message di `dst`; bytes setelah delimiter
/// pertama di `src` diabaikan.
///
/// # Errors
/// - [`DecodeError::MalformedFrame`] untuk delimiter di tengah block
/// - [`DecodeError::TruncatedFrame`] jika `src` habis tanpa delimiter
/// - [`DecodeError::OutputCapacity`] jika `dst` tidak muat
pub fn decode_frame(src: &[u8], dst: &mut [u8]) -> Result<usize, DecodeError> {
    let mut decoder = Decoder::new();
    let progress = decoder.decode(src, dst)?;
    if progress.end_of_message {
        return Ok(progress.produced);
    }
    if progress.consumed < src.len() {
        // Input masih ada tapi decoder berhenti: output penuh.
        return Err(DecodeError::OutputCapacity);
    }
    Err(DecodeError::TruncatedFrame)
}
