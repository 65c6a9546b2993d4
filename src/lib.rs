//! Core library for the comp40 image codec: colorspace conversion, 2x2
//! block DCT, quantization, bitpacking, and wire framing. `main.rs` is a
//! thin CLI shell around this crate.

pub mod array2d;
pub mod bitops;
pub mod codec;
pub mod codeword;
pub mod colorspace;
pub mod dct;
pub mod error;
pub mod image;
pub mod quantize;
