// Assembly/disassembly of the 32-bit codeword from/to the six quantized
// block fields, at the fixed (lsb, width) positions below.

use crate::bitops::{get_signed, get_unsigned, put_signed, put_unsigned};
use crate::error::CodecError;
use crate::quantize::QuantizedBlock;

const A_LSB: u32 = 23;
const B_LSB: u32 = 18;
const C_LSB: u32 = 13;
const D_LSB: u32 = 8;
const PB_LSB: u32 = 4;
const PR_LSB: u32 = 0;

const A_WIDTH: u32 = 9;
const B_WIDTH: u32 = 5;
const C_WIDTH: u32 = 5;
const D_WIDTH: u32 = 5;
const PB_WIDTH: u32 = 4;
const PR_WIDTH: u32 = 4;

/// Pack a block's quantized fields into a 32-bit codeword, in the order
/// a, b, c, d, pb, pr, into a freshly zeroed 64-bit accumulator, truncated
/// to 32 bits at the end.
pub fn pack(block: &QuantizedBlock) -> Result<u32, CodecError> {
  let mut word: u64 = 0;
  word = put_unsigned(word, A_WIDTH, A_LSB, block.a)?;
  word = put_signed(word, B_WIDTH, B_LSB, block.b)?;
  word = put_signed(word, C_WIDTH, C_LSB, block.c)?;
  word = put_signed(word, D_WIDTH, D_LSB, block.d)?;
  word = put_unsigned(word, PB_WIDTH, PB_LSB, block.pb)?;
  word = put_unsigned(word, PR_WIDTH, PR_LSB, block.pr)?;

  debug_assert_eq!(word >> 32, 0);
  Ok(word as u32)
}

/// Inverse of `pack`.
pub fn unpack(word: u32) -> QuantizedBlock {
  let word = word as u64;
  QuantizedBlock {
    a: get_unsigned(word, A_WIDTH, A_LSB),
    b: get_signed(word, B_WIDTH, B_LSB),
    c: get_signed(word, C_WIDTH, C_LSB),
    d: get_signed(word, D_WIDTH, D_LSB),
    pb: get_unsigned(word, PB_WIDTH, PB_LSB),
    pr: get_unsigned(word, PR_WIDTH, PR_LSB),
  }
}
