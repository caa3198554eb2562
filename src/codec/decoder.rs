//! Zero-Allocation Incremental Decoder
//!
//! State machine tiga fase yang bisa pause dan resume di tengah block,
//! di kedua sisi: input bisa datang satu byte per call, dan output capacity
//! bisa sekecil satu byte per call. Saat capacity habis, decoder menulis
//! sebanyak yang muat, mengurangi `remaining` persis sebanyak itu, lalu
//! suspend - call berikutnya melanjutkan tanpa kehilangan atau menduplikasi
//! satu byte pun. Ini bagian tersulit: satu code byte bisa meng-imply jauh
//! lebih banyak output bytes daripada capacity satu call.

use thiserror::Error;

use super::block::{classify, Block, DELIMITER};

/// Error dari operasi decode.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Delimiter muncul saat block masih terbuka: code byte meng-imply
    /// lebih banyak bytes daripada yang tersedia sebelum delimiter.
    ///
    /// Decoder sudah mengkonsumsi sampai (dan termasuk) delimiter tersebut
    /// dan me-reset dirinya, jadi caller tinggal membuang partial output
    /// message ini dan melanjutkan setelah `consumed` bytes.
    #[error("malformed frame: delimiter inside a block after {consumed} bytes")]
    MalformedFrame { consumed: usize },

    /// Stream berakhir (transport ditutup) saat block masih terbuka.
    #[error("truncated frame: stream ended mid-block")]
    TruncatedFrame,

    /// Output buffer tidak muat untuk satu frame utuh.
    ///
    /// Hanya dari [`decode_frame`](super::decode_frame); streaming
    /// [`decode`](Decoder::decode) tidak pernah gagal karena capacity,
    /// ia suspend.
    #[error("output buffer too small for decoded frame")]
    OutputCapacity,
}

/// Fase decoding untuk satu in-flight message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeState {
    /// Menunggu code byte berikutnya (initial/resume state).
    ExpectingCode,
    /// Menyalin `remaining` literal bytes dari input ke output. Implied
    /// zero dari short literal code ditangani lewat `ZeroRun { 1 }` supaya
    /// tunduk pada suspensi capacity yang sama.
    LiteralRun { remaining: usize, implied_zero: bool },
    /// Menulis `remaining` zero bytes murni dari counted state, tanpa
    /// mengkonsumsi input.
    ZeroRun { remaining: usize },
}

/// Hasil satu call [`decode`](Decoder::decode).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeProgress {
    /// Jumlah input bytes yang dikonsumsi.
    pub consumed: usize,
    /// Jumlah output bytes yang diproduksi.
    pub produced: usize,
    /// True tepat saat external delimiter dikonsumsi. Delimiter tidak
    /// pernah ditulis ke output.
    pub end_of_message: bool,
}

/// Incremental COBS decoder untuk satu message stream.
///
/// State sepenuhnya milik caller dan berukuran tetap. Satu instance per
/// stream; exclusive borrow `&mut self` mencegah sharing antar stream.
#[derive(Debug, Clone)]
pub struct Decoder {
    state: DecodeState,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    /// Membuat decoder baru, siap menerima message pertama.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            state: DecodeState::ExpectingCode,
        }
    }

    /// Reset decoder, membuang message yang in-flight.
    #[inline(always)]
    pub fn reset(&mut self) {
        self.state = DecodeState::ExpectingCode;
    }

    /// Apakah decoder sedang di antara dua message (tidak ada block terbuka).
    #[inline(always)]
    pub fn is_idle(&self) -> bool {
        self.state == DecodeState::ExpectingCode
    }

    /// Decode satu increment dari stuffed stream.
    ///
    /// Mengkonsumsi input dan memproduksi output sebanyak yang kedua
    /// kapasitas izinkan, lalu melaporkan progress. `end_of_message` true
    /// tepat saat delimiter dikonsumsi; pemrosesan berhenti di situ
    /// walaupun input masih tersisa, dan state langsung siap untuk message
    /// berikutnya.
    ///
    /// # Errors
    /// [`DecodeError::MalformedFrame`] jika delimiter muncul saat block
    /// masih terbuka. Decoder sudah resync sendiri (lihat dokumentasi
    /// variant-nya); output message ini harus dibuang.
    pub fn decode(
        &mut self,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<DecodeProgress, DecodeError> {
        let mut consumed = 0;
        let mut produced = 0;

        loop {
            match self.state {
                DecodeState::ExpectingCode => {
                    if consumed == input.len() {
                        return Ok(DecodeProgress {
                            consumed,
                            produced,
                            end_of_message: false,
                        });
                    }
                    let code = input[consumed];
                    consumed += 1;
                    if code == DELIMITER {
                        // Message selesai; delimiter dikonsumsi, tidak
                        // ditulis ke output.
                        return Ok(DecodeProgress {
                            consumed,
                            produced,
                            end_of_message: true,
                        });
                    }
                    self.state = match classify(code) {
                        Block::Literal { len, implied_zero } => DecodeState::LiteralRun {
                            remaining: len,
                            implied_zero,
                        },
                        Block::Zeros { len } => DecodeState::ZeroRun { remaining: len },
                    };
                }

                DecodeState::LiteralRun {
                    remaining,
                    implied_zero,
                } => {
                    if remaining == 0 {
                        self.state = if implied_zero {
                            DecodeState::ZeroRun { remaining: 1 }
                        } else {
                            DecodeState::ExpectingCode
                        };
                        continue;
                    }

                    let avail_in = input.len() - consumed;
                    let avail_out = output.len() - produced;
                    if avail_in == 0 || avail_out == 0 {
                        return Ok(DecodeProgress {
                            consumed,
                            produced,
                            end_of_message: false,
                        });
                    }

                    let n = remaining.min(avail_in).min(avail_out);
                    let chunk = &input[consumed..consumed + n];

                    // Zero di tengah literal run = framing error. Konsumsi
                    // delimiter-nya sekalian supaya state langsung resync.
                    if let Some(pos) = chunk.iter().position(|&b| b == DELIMITER) {
                        consumed += pos + 1;
                        self.state = DecodeState::ExpectingCode;
                        return Err(DecodeError::MalformedFrame { consumed });
                    }

                    output[produced..produced + n].copy_from_slice(chunk);
                    consumed += n;
                    produced += n;
                    self.state = DecodeState::LiteralRun {
                        remaining: remaining - n,
                        implied_zero,
                    };
                }

                DecodeState::ZeroRun { remaining } => {
                    let n = remaining.min(output.len() - produced);
                    output[produced..produced + n].fill(0);
                    produced += n;

                    if n < remaining {
                        // Output capacity habis; suspend dengan sisa count.
                        self.state = DecodeState::ZeroRun {
                            remaining: remaining - n,
                        };
                        return Ok(DecodeProgress {
                            consumed,
                            produced,
                            end_of_message: false,
                        });
                    }
                    self.state = DecodeState::ExpectingCode;
                }
            }
        }
    }

    /// Dipanggil caller saat input stream berakhir (transport ditutup).
    ///
    /// # Errors
    /// [`DecodeError::TruncatedFrame`] jika masih ada block terbuka; state
    /// di-reset supaya instance bisa dipakai lagi.
    pub fn finish(&mut self) -> Result<(), DecodeError> {
        if self.state == DecodeState::ExpectingCode {
            Ok(())
        } else {
            self.state = DecodeState::ExpectingCode;
            Err(DecodeError::TruncatedFrame)
        }
    }
}
