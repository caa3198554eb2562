//! Wire Format: Block & Code Byte Convention
//!
//! Setiap block dalam stuffed frame diawali satu code byte yang meng-encode
//! kind dan length block tersebut:
//!
//! | code byte     | arti                                                    |
//! |---------------|---------------------------------------------------------|
//! | `0x00`        | frame delimiter - tidak pernah muncul di dalam frame    |
//! | `0x01`-`0x60` | literal run sepanjang `code` bytes, tanpa implied zero  |
//! | `0x61`-`0xC0` | literal run sepanjang `code - 0x60` bytes + satu zero   |
//! | `0xC1`-`0xFF` | run berisi `code - 0xC0` zero bytes (1-63)              |
//!
//! Code `0x60` adalah max-length sentinel: literal run berlanjut di block
//! berikutnya tanpa embedded zero. Plain literal code di bawah `0x60` hanya
//! muncul dari `finalize` (message berakhir di tengah literal run).
//!
//! Encoder dan decoder HARUS memakai konstanta dari module ini, dan
//! di-version bersama. Mismatch antara kedua sisi merusak setiap message
//! secara diam-diam tanpa memicu error condition apapun.

/// Frame delimiter - satu-satunya zero byte di wire.
///
/// Ditambahkan oleh caller setelah `finalize`, dikenali (dan dibuang) oleh
/// decoder. Bukan bagian dari stuffed payload.
pub const DELIMITER: u8 = 0x00;

/// Panjang maksimum literal run dalam satu block (code `0x60`).
pub const MAX_LITERAL_RUN: usize = 0x60;

/// Panjang maksimum zero run dalam satu block (code `0xFF`).
pub const MAX_ZERO_RUN: usize = 0x3F;

/// Base code untuk literal run dengan implied zero (`0x61..=0xC0`).
pub(crate) const LITERAL_ZERO_BASE: u8 = 0x60;

/// Base code untuk zero run (`0xC1..=0xFF`).
pub(crate) const ZERO_RUN_BASE: u8 = 0xC0;

/// Upper bound ukuran stuffed frame untuk payload sepanjang `raw_len`,
/// TERMASUK trailing delimiter.
///
/// Worst case adalah input tanpa zero sama sekali: satu code byte per
/// [`MAX_LITERAL_RUN`] payload bytes, plus satu closing code byte dari
/// `finalize`, plus delimiter. Zero bytes hanya memperkecil output.
#[inline(always)]
pub const fn max_encoded_len(raw_len: usize) -> usize {
    raw_len + raw_len / MAX_LITERAL_RUN + 2
}

/// Hasil klasifikasi satu code byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Block {
    /// Literal run: `len` bytes verbatim, diikuti satu zero jika `implied_zero`.
    Literal { len: usize, implied_zero: bool },
    /// Zero run: `len` zero bytes, murni dari counted state.
    Zeros { len: usize },
}

/// Klasifikasi code byte (non-delimiter) menjadi block.
#[inline(always)]
pub(crate) fn classify(code: u8) -> Block {
    debug_assert_ne!(code, DELIMITER);
    if code <= LITERAL_ZERO_BASE {
        Block::Literal {
            len: code as usize,
            implied_zero: false,
        }
    } else if code <= ZERO_RUN_BASE {
        Block::Literal {
            len: (code - LITERAL_ZERO_BASE) as usize,
            implied_zero: true,
        }
    } else {
        Block::Zeros {
            len: (code - ZERO_RUN_BASE) as usize,
        }
    }
}

/// Code byte untuk literal run sepanjang `len`.
#[inline(always)]
pub(crate) fn literal_code(len: usize, implied_zero: bool) -> u8 {
    debug_assert!(len >= 1 && len <= MAX_LITERAL_RUN);
    if implied_zero {
        LITERAL_ZERO_BASE + len as u8
    } else {
        len as u8
    }
}

/// Code byte untuk zero run sepanjang `len`.
#[inline(always)]
pub(crate) fn zero_run_code(len: usize) -> u8 {
    debug_assert!(len >= 1 && len <= MAX_ZERO_RUN);
    ZERO_RUN_BASE + len as u8
}
