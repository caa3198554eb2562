//! Zeroframe - Incremental COBS Framing Engine
//!
//! Consistent Overhead Byte Stuffing: transform reversible yang membuang
//! semua zero byte dari message, sehingga satu reserved `0x00` bisa jadi
//! frame delimiter yang unambiguous di byte-stream transport tanpa framing
//! bawaan (serial line, socket, dsb).
//!
//! Arsitektur:
//! - Zero-Allocation: engine tidak pernah alokasi; semua buffer milik caller
//! - Caller-Held State: state explicit, berukuran tetap, satu per stream
//! - Streaming: benar untuk increment sekecil satu byte, di sisi input
//!   maupun output, tanpa kehilangan atau menduplikasi satu byte pun
//! - Synchronous: call-and-return murni, tidak ada blocking atau background
//!
//! Data flow: application → [`Encoder`] (incremental) → transport →
//! [`Decoder`] (incremental) → application. Delimiter ditambahkan oleh
//! aplikasi pengirim setelah [`Encoder::finalize`], dikenali (dan dibuang)
//! oleh decoder.
//!
//! # One-shot
//!
//! ```
//! use zeroframe::{decode_frame, encode_frame, max_encoded_len};
//!
//! let payload = b"ABC\x00DE";
//! let mut frame = [0u8; max_encoded_len(6)];
//! let n = encode_frame(payload, &mut frame).unwrap();
//! assert_eq!(&frame[..n], &[0x63, b'A', b'B', b'C', 0x02, b'D', b'E', 0x00]);
//!
//! let mut decoded = [0u8; 6];
//! let m = decode_frame(&frame[..n], &mut decoded).unwrap();
//! assert_eq!(&decoded[..m], payload);
//! ```
//!
//! # Streaming
//!
//! ```
//! use zeroframe::{Decoder, Encoder, DELIMITER};
//!
//! // Encode: input boleh datang sepotong-sepotong.
//! let mut encoder = Encoder::new();
//! let mut frame = [0u8; 16];
//! let mut n = encoder.encode(b"AB", &mut frame).unwrap();
//! n += encoder.encode(b"C\x00DE", &mut frame[n..]).unwrap();
//! n += encoder.finalize(&mut frame[n..]).unwrap();
//! frame[n] = DELIMITER; // delimiter milik caller, bukan engine
//! n += 1;
//!
//! // Decode: output capacity boleh sekecil satu byte per call.
//! let mut decoder = Decoder::new();
//! let mut message = Vec::new();
//! let mut input = &frame[..n];
//! loop {
//!     let mut slot = [0u8; 1];
//!     let p = decoder.decode(input, &mut slot).unwrap();
//!     message.extend_from_slice(&slot[..p.produced]);
//!     input = &input[p.consumed..];
//!     if p.end_of_message {
//!         break;
//!     }
//! }
//! assert_eq!(message, b"ABC\x00DE");
//! ```

pub mod codec;

pub use codec::{
    decode_frame, encode_frame, max_encoded_len, DecodeError, DecodeProgress, Decoder,
    EncodeError, Encoder, DELIMITER, MAX_LITERAL_RUN, MAX_ZERO_RUN,
};
