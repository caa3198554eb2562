//! Zero-Allocation Incremental Encoder
//!
//! Encode langsung ke caller-owned buffer, tanpa alokasi. Run yang masih
//! terbuka ditahan di dalam state (`pending`), bukan di output buffer,
//! sehingga SEMUA bytes yang sudah ditulis ke output bersifat committed
//! dan langsung aman untuk ditransmisikan. Commit boundary hanya pernah
//! maju; maksimal satu block yang belum committed pada satu waktu.

use thiserror::Error;

use super::block::{
    literal_code, max_encoded_len, zero_run_code, MAX_LITERAL_RUN, MAX_ZERO_RUN,
};

/// Error dari operasi encode.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// Output buffer terlalu kecil untuk worst-case expansion call ini.
    ///
    /// Recoverable: state tidak tersentuh, tidak ada byte yang ditulis
    /// maupun dikonsumsi. Caller mengulang dengan buffer lebih besar.
    #[error("output buffer too small: need {needed} bytes, have {available}")]
    OutputCapacity { needed: usize, available: usize },
}

/// Run yang sedang terbuka (belum punya code byte).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Run {
    /// Tidak ada block terbuka.
    Idle,
    /// Literal run sepanjang `n` bytes, tersimpan di `pending[..n]`.
    Literal(usize),
    /// Zero run sepanjang `n` bytes (hanya counter, tanpa payload).
    Zeros(usize),
}

/// Incremental COBS encoder untuk satu message stream.
///
/// State sepenuhnya milik caller dan berukuran tetap (tidak ada heap).
/// Satu instance per stream; exclusive borrow `&mut self` mencegah dua
/// stream berbagi state yang sama. Membatalkan message yang in-flight
/// cukup dengan men-drop atau me-[`reset`](Encoder::reset) instance-nya.
#[derive(Debug, Clone)]
pub struct Encoder {
    run: Run,
    pending: [u8; MAX_LITERAL_RUN],
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    /// Membuat encoder baru, siap untuk message pertama.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            run: Run::Idle,
            pending: [0u8; MAX_LITERAL_RUN],
        }
    }

    /// Reset encoder untuk message baru, membuang block yang terbuka.
    #[inline(always)]
    pub fn reset(&mut self) {
        self.run = Run::Idle;
    }

    /// Apakah masih ada block terbuka yang menunggu `finalize`.
    #[inline(always)]
    pub fn has_open_block(&self) -> bool {
        self.run != Run::Idle
    }

    /// Worst-case output yang dibutuhkan satu call [`encode`](Encoder::encode)
    /// dengan `input_len` bytes, memperhitungkan run yang masih terbuka.
    #[inline(always)]
    pub fn required_capacity(&self, input_len: usize) -> usize {
        let open = match self.run {
            Run::Idle => 0,
            Run::Literal(n) => n,
            Run::Zeros(_) => 1,
        };
        max_encoded_len(open + input_len)
    }

    /// Encode satu increment dari raw message.
    ///
    /// Menulis stuffed bytes ke `output` dan mengembalikan jumlah byte yang
    /// ditulis; tidak pernah menulis `0x00`. Output bisa saja kosong
    /// walaupun input tidak: bytes dari block yang masih terbuka ditahan di
    /// state sampai block-nya tertutup.
    ///
    /// Memberi input yang sama satu byte per call menghasilkan output yang
    /// byte-identical dengan satu call tunggal: kedua jalur melewati satu
    /// routine akumulasi yang sama.
    ///
    /// # Errors
    /// [`EncodeError::OutputCapacity`] jika `output` lebih kecil dari
    /// [`required_capacity`](Encoder::required_capacity); state dan output
    /// tidak tersentuh.
    pub fn encode(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, EncodeError> {
        if input.is_empty() {
            return Ok(0);
        }

        let needed = self.required_capacity(input.len());
        if output.len() < needed {
            return Err(EncodeError::OutputCapacity {
                needed,
                available: output.len(),
            });
        }

        let mut written = 0;
        for &byte in input {
            written += self.push_byte(byte, output, written);
        }
        Ok(written)
    }

    /// Menutup block yang terbuka dengan menulis code byte-nya walaupun
    /// pendek, sehingga seluruh output menjadi committed.
    ///
    /// Setelah `finalize`, caller WAJIB menambahkan tepat satu byte
    /// [`DELIMITER`](super::DELIMITER) sendiri untuk menandai batas frame;
    /// byte itu di luar kontrak encoder. State siap untuk message baru.
    ///
    /// # Errors
    /// [`EncodeError::OutputCapacity`] jika `output` tidak muat untuk
    /// closing block; state tidak tersentuh.
    pub fn finalize(&mut self, output: &mut [u8]) -> Result<usize, EncodeError> {
        let needed = match self.run {
            Run::Idle => 0,
            Run::Literal(n) => n + 1,
            Run::Zeros(_) => 1,
        };
        if output.len() < needed {
            return Err(EncodeError::OutputCapacity {
                needed,
                available: output.len(),
            });
        }

        match self.run {
            Run::Idle => Ok(0),
            Run::Literal(_) => Ok(self.flush_literal(false, output, 0)),
            Run::Zeros(n) => {
                output[0] = zero_run_code(n);
                self.run = Run::Idle;
                Ok(1)
            }
        }
    }

    /// Akumulasi satu byte - routine tunggal yang dilewati semua jalur
    /// (bulk maupun byte-at-a-time). Returns jumlah byte yang ditulis.
    #[inline(always)]
    fn push_byte(&mut self, byte: u8, output: &mut [u8], at: usize) -> usize {
        if byte != 0 {
            let mut written = 0;

            // Non-zero byte menutup zero run yang terbuka.
            if let Run::Zeros(n) = self.run {
                output[at] = zero_run_code(n);
                written = 1;
                self.run = Run::Idle;
            }

            let len = match self.run {
                Run::Literal(n) => n,
                _ => 0,
            };
            self.pending[len] = byte;
            self.run = Run::Literal(len + 1);

            // Max-length sentinel: run berlanjut tanpa embedded zero.
            if len + 1 == MAX_LITERAL_RUN {
                written += self.flush_literal(false, output, at + written);
            }
            written
        } else {
            match self.run {
                // Zero ini diserap oleh closing code dari literal run.
                Run::Literal(_) => self.flush_literal(true, output, at),
                Run::Zeros(n) if n + 1 == MAX_ZERO_RUN => {
                    output[at] = zero_run_code(MAX_ZERO_RUN);
                    self.run = Run::Idle;
                    1
                }
                Run::Zeros(n) => {
                    self.run = Run::Zeros(n + 1);
                    0
                }
                Run::Idle => {
                    self.run = Run::Zeros(1);
                    0
                }
            }
        }
    }

    /// Tulis code byte + payload untuk literal run yang terbuka.
    #[inline(always)]
    fn flush_literal(&mut self, implied_zero: bool, output: &mut [u8], at: usize) -> usize {
        let len = match self.run {
            Run::Literal(n) => n,
            _ => return 0,
        };
        output[at] = literal_code(len, implied_zero);
        output[at + 1..at + 1 + len].copy_from_slice(&self.pending[..len]);
        self.run = Run::Idle;
        len + 1
    }
}

#[cfg(test)]
mod tests {
    use super::super::block::DELIMITER;
    use super::*;

    /// Encode + finalize + delimiter dalam satu shot, untuk assert byte-exact.
    fn encode_whole(payload: &[u8]) -> Vec<u8> {
        let mut encoder = Encoder::new();
        let mut out = vec![0u8; max_encoded_len(payload.len())];
        let mut n = encoder.encode(payload, &mut out).unwrap();
        n += encoder.finalize(&mut out[n..]).unwrap();
        out[n] = DELIMITER;
        out.truncate(n + 1);
        out
    }

    #[test]
    fn test_no_zero_payload() {
        // Satu literal block menutupi kelima bytes; code baru keluar saat finalize.
        let mut encoder = Encoder::new();
        let mut out = [0u8; 16];
        assert_eq!(encoder.encode(b"ABCDE", &mut out).unwrap(), 0);
        assert!(encoder.has_open_block());
        assert_eq!(encoder.finalize(&mut out).unwrap(), 6);
        assert_eq!(&out[..6], &[0x05, b'A', b'B', b'C', b'D', b'E']);
        assert!(!encoder.has_open_block());
    }

    #[test]
    fn test_trailing_zero() {
        assert_eq!(
            encode_whole(b"ABCDE\0"),
            vec![0x65, b'A', b'B', b'C', b'D', b'E', DELIMITER]
        );
    }

    #[test]
    fn test_interior_zero() {
        assert_eq!(
            encode_whole(b"ABC\0DE"),
            vec![0x63, b'A', b'B', b'C', 0x02, b'D', b'E', DELIMITER]
        );
    }

    #[test]
    fn test_leading_zero() {
        // Zero run block sepanjang 1 lebih dulu, baru literal run.
        assert_eq!(
            encode_whole(b"\0ABCDE"),
            vec![0xC1, 0x05, b'A', b'B', b'C', b'D', b'E', DELIMITER]
        );
    }

    #[test]
    fn test_zero_run() {
        // Zero pertama diserap closing code literal; empat sisanya jadi
        // satu zero-run block, bukan empat block terpisah.
        assert_eq!(
            encode_whole(b"ABC\0\0\0\0\0DE"),
            vec![0x63, b'A', b'B', b'C', 0xC4, 0x02, b'D', b'E', DELIMITER]
        );
    }

    #[test]
    fn test_empty_input_is_noop() {
        let mut encoder = Encoder::new();
        let mut out = [0u8; 0];
        assert_eq!(encoder.encode(b"", &mut out).unwrap(), 0);
        assert!(!encoder.has_open_block());
    }

    #[test]
    fn test_max_literal_run_boundary() {
        // 96 literal bytes memicu sentinel flush di tengah encode.
        let payload = [0xAA; 200];
        let encoded = encode_whole(&payload);
        // 2x sentinel block (97 bytes) + closing block (8+1) + delimiter.
        assert_eq!(encoded.len(), 97 + 97 + 9 + 1);
        assert_eq!(encoded[0], 0x60);
        assert_eq!(encoded[97], 0x60);
        assert_eq!(encoded[194], 0x08);
    }

    #[test]
    fn test_max_zero_run_boundary() {
        // 63 zeros memicu flush 0xFF, sisanya jadi block kedua.
        let payload = [0u8; 70];
        let encoded = encode_whole(&payload);
        assert_eq!(encoded, vec![0xFF, 0xC7, DELIMITER]);
    }

    #[test]
    fn test_output_never_contains_zero() {
        let mut payload = Vec::new();
        for i in 0..512u32 {
            payload.push((i % 7) as u8); // campuran zero dan non-zero
        }
        let encoded = encode_whole(&payload);
        assert!(!encoded[..encoded.len() - 1].contains(&0));
        assert_eq!(*encoded.last().unwrap(), DELIMITER);
    }

    #[test]
    fn test_capacity_error_preserves_state() {
        let mut encoder = Encoder::new();
        let mut small = [0u8; 2];
        let err = encoder.encode(b"ABCDE", &mut small).unwrap_err();
        assert!(matches!(err, EncodeError::OutputCapacity { .. }));

        // State tidak korup: retry dengan buffer cukup menghasilkan output
        // identik dengan encoder yang fresh.
        let mut out = [0u8; 16];
        let n = encoder.encode(b"ABCDE", &mut out).unwrap();
        let n = n + encoder.finalize(&mut out[n..]).unwrap();
        assert_eq!(&out[..n], &[0x05, b'A', b'B', b'C', b'D', b'E']);
    }

    #[test]
    fn test_finalize_capacity_error() {
        let mut encoder = Encoder::new();
        let mut out = [0u8; 16];
        encoder.encode(b"ABCDE", &mut out).unwrap();

        let mut small = [0u8; 3];
        let err = encoder.finalize(&mut small).unwrap_err();
        assert_eq!(
            err,
            EncodeError::OutputCapacity {
                needed: 6,
                available: 3
            }
        );
        // Block masih terbuka; finalize bisa diulang.
        assert_eq!(encoder.finalize(&mut out).unwrap(), 6);
    }

    #[test]
    fn test_reset_discards_open_block() {
        let mut encoder = Encoder::new();
        let mut out = [0u8; 16];
        encoder.encode(b"ABC", &mut out).unwrap();
        encoder.reset();
        assert_eq!(encoder.finalize(&mut out).unwrap(), 0);
    }

    #[test]
    fn test_encoder_reuse_across_messages() {
        let mut encoder = Encoder::new();
        let mut out = [0u8; 16];

        let n = encoder.encode(b"AB", &mut out).unwrap();
        let n = n + encoder.finalize(&mut out[n..]).unwrap();
        assert_eq!(&out[..n], &[0x02, b'A', b'B']);

        // Instance yang sama langsung valid untuk message berikutnya.
        let n = encoder.encode(b"C\0", &mut out).unwrap();
        let n = n + encoder.finalize(&mut out[n..]).unwrap();
        assert_eq!(&out[..n], &[0x61, b'C']);
    }
}
