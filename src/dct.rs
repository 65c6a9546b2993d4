// 2x2 block Discrete Cosine Transform and its inverse, plus block-level
// chroma averaging/broadcast. A block is four luma samples at
// (top-left, top-right, bottom-left, bottom-right) == (y1, y2, y3, y4).

/// Forward DCT: four luma samples -> (a, b, c, d).
///
/// `a` is the block average brightness, `b` the top/bottom gradient, `c`
/// the left/right gradient, and `d` the diagonal term. The sign convention
/// for `d` follows the reference exactly: `d = (y4 - y3 - y2 + y1) / 4`,
/// i.e. (top-left + bottom-right) - (top-right + bottom-left). Any other
/// sign convention mirrors the reconstructed block.
pub fn forward_dct(y1: f32, y2: f32, y3: f32, y4: f32) -> (f32, f32, f32, f32) {
  let a = (y4 + y3 + y2 + y1) / 4.0;
  let b = (y4 + y3 - y2 - y1) / 4.0;
  let c = (y4 - y3 + y2 - y1) / 4.0;
  let d = (y4 - y3 - y2 + y1) / 4.0;
  (a, b, c, d)
}

/// Inverse DCT: (a, b, c, d) -> four luma samples, exact inverse of
/// `forward_dct` in real arithmetic.
pub fn inverse_dct(a: f32, b: f32, c: f32, d: f32) -> (f32, f32, f32, f32) {
  let y1 = a - b - c + d;
  let y2 = a - b + c - d;
  let y3 = a + b - c - d;
  let y4 = a + b + c + d;
  (y1, y2, y3, y4)
}

/// Average four per-pixel chroma values down to one block value.
pub fn average_chroma(p1: f32, p2: f32, p3: f32, p4: f32) -> f32 {
  (p1 + p2 + p3 + p4) / 4.0
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn roundtrip_is_identity() {
    let (y1, y2, y3, y4) = (0.1f32, 0.4, 0.6, 0.9);
    let (a, b, c, d) = forward_dct(y1, y2, y3, y4);
    let (r1, r2, r3, r4) = inverse_dct(a, b, c, d);
    assert!((r1 - y1).abs() < 1e-6);
    assert!((r2 - y2).abs() < 1e-6);
    assert!((r3 - y3).abs() < 1e-6);
    assert!((r4 - y4).abs() < 1e-6);
  }

  #[test]
  fn flat_block_has_zero_gradients() {
    let (a, b, c, d) = forward_dct(0.5, 0.5, 0.5, 0.5);
    assert_eq!((a, b, c, d), (0.5, 0.0, 0.0, 0.0));
  }

  #[test]
  fn diagonal_sign_convention() {
    // top-left and bottom-right bright, others dark -> positive d
    let (_, _, _, d) = forward_dct(1.0, 0.0, 0.0, 1.0);
    assert!(d > 0.0);
  }
}
