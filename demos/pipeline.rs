//! Zeroframe Pipeline Demo
//!
//! Mendemonstrasikan empat mode pemakaian engine:
//! - One-shot encode + decode
//! - Pipeline encode: satu input byte per call, transmit setiap ada output
//! - Pipeline decode: satu input byte per call
//! - Pipeline decode: satu output byte per call
//!
//! Usage:
//!   cargo run --release --example pipeline

use zeroframe::{decode_frame, encode_frame, max_encoded_len, Decoder, Encoder, DELIMITER};

fn hexprint(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn one_shot_example(data: &[u8]) {
    let mut frame = vec![0u8; max_encoded_len(data.len())];
    let n = encode_frame(data, &mut frame).unwrap();

    let mut decoded = vec![0u8; data.len()];
    let m = decode_frame(&frame[..n], &mut decoded).unwrap();

    println!("Initial data     : {}", hexprint(data));
    println!("Framed message   : {}", hexprint(&frame[..n]));
    println!("Decoded data     : {}", hexprint(&decoded[..m]));
    println!();
}

fn pipeline_encode(data: &[u8]) {
    println!("Initial data     : {}", hexprint(data));

    // Satu byte input per call. Semua output langsung committed, jadi bisa
    // langsung "ditransmisikan" setiap call tanpa memindah-mindah buffer.
    let mut encoder = Encoder::new();
    let mut out = vec![0u8; max_encoded_len(data.len())];
    for &byte in data {
        let n = encoder.encode(&[byte], &mut out).unwrap();
        if n > 0 {
            println!("Transmit {n:3}     : {}", hexprint(&out[..n]));
        }
    }
    let n = encoder.finalize(&mut out).unwrap();
    out[n] = DELIMITER;
    println!("Transmit {:3}     : {}", n + 1, hexprint(&out[..n + 1]));
    println!();
}

fn pipeline_decode_one_input_byte(data: &[u8]) {
    let mut frame = vec![0u8; max_encoded_len(data.len())];
    let n = encode_frame(data, &mut frame).unwrap();

    println!("Initial data     : {}", hexprint(data));
    println!("Framed message   : {}", hexprint(&frame[..n]));

    // Simulasi bytes datang dari serial port satu per satu. Satu byte input
    // bisa menghasilkan nol, satu, atau banyak output bytes sekaligus
    // (satu zero-run code byte meng-imply sampai 63 zeros).
    let mut decoder = Decoder::new();
    let mut out = vec![0u8; data.len()];
    let mut produced = 0;
    for &byte in &frame[..n] {
        let p = decoder.decode(&[byte], &mut out[produced..]).unwrap();
        produced += p.produced;
        println!("Read {:02X}; Output  : {}", byte, hexprint(&out[..produced]));
        if p.end_of_message {
            break;
        }
    }
    println!();
}

fn pipeline_decode_one_output_byte(data: &[u8]) {
    let mut frame = vec![0u8; max_encoded_len(data.len())];
    let n = encode_frame(data, &mut frame).unwrap();

    println!("Initial data     : {}", hexprint(data));
    println!("Framed message   : {}", hexprint(&frame[..n]));

    // Simulasi consumer yang hanya mau satu byte output per call.
    let mut decoder = Decoder::new();
    let mut input = &frame[..n];
    loop {
        let mut slot = [0u8; 1];
        let p = decoder.decode(input, &mut slot).unwrap();
        let read = &input[..p.consumed];
        input = &input[p.consumed..];
        if p.produced > 0 {
            println!("Read {:8} Output: {:02X}", hexprint(read), slot[0]);
        }
        if p.end_of_message {
            break;
        }
    }
    println!();
}

fn main() {
    let examples: [&[u8]; 5] = [
        b"ABCDE",           // tanpa zero
        b"ABCDE\0",         // trailing zero
        b"ABC\0DE",         // interior zero
        b"\0ABCDE",         // leading zero
        b"ABC\0\0\0\0\0DE", // run of zeroes
    ];

    println!("🚀 Zeroframe - Incremental COBS Framing Demo");
    println!("=============================================\n");

    println!("📦 One-shot encoding and decoding\n");
    for data in examples {
        one_shot_example(data);
    }

    println!("📦 Pipeline encoding, one byte at a time\n");
    for data in examples {
        pipeline_encode(data);
    }

    println!("📦 Pipeline decoding, one source byte at a time\n");
    for data in examples {
        pipeline_decode_one_input_byte(data);
    }

    println!("📦 Pipeline decoding, one output byte at a time\n");
    for data in examples {
        pipeline_decode_one_output_byte(data);
    }

    println!("✅ All demos complete!");
}
