//! Fuzz target for upload payload decoding.
//!
//! Checks that:
//! 1. No input panics
//! 2. Accepted payloads always carry bytes
//! 3. Encoding then decoding returns the original bytes
//!
//! Run with: `cargo +nightly fuzz run fuzz_data_uri`

#![no_main]

use arbitrary::Arbitrary;
use arsnap::payload::{decode_png_data_uri, encode_png_data_uri};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct PayloadInput {
    /// Raw `image` field value
    image: Option<String>,
    /// Prefix with the PNG declaration so the decoder gets past it
    with_prefix: bool,
    /// Bytes to push through the encoder
    bytes: Vec<u8>,
}

fuzz_target!(|input: PayloadInput| {
    let image = input.image.map(|s| {
        if input.with_prefix {
            format!("data:image/png;base64,{s}")
        } else {
            s
        }
    });

    if let Ok(bytes) = decode_png_data_uri(image.as_deref()) {
        assert!(!bytes.is_empty(), "accepted empty payload: {image:?}");
    }

    let uri = encode_png_data_uri(&input.bytes);
    match decode_png_data_uri(Some(&uri)) {
        Ok(decoded) => assert_eq!(decoded, input.bytes),
        Err(_) => assert!(input.bytes.is_empty(), "rejected own encoding: {uri}"),
    }
});
