// RGB <-> component video (Y/Pb/Pr) colorspace conversion. These are the
// standard JPEG coefficients; matching them exactly is required so that
// independently-built compressor/decompressor pairs agree bit-for-bit.

/// Forward transform: scaled RGB (each channel already divided by the
/// image's denominator, so in `[0, 1]`) to component video.
pub fn rgb_to_cv(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
  let y = 0.299 * r + 0.587 * g + 0.114 * b;
  let pb = -0.168736 * r - 0.331264 * g + 0.5 * b;
  let pr = 0.5 * r - 0.418688 * g - 0.081312 * b;
  (y, pb, pr)
}

/// Inverse transform: component video back to RGB in `[0, 1]`, clamped.
/// Clamping is mandatory: inverse-DCT plus quantization can push values
/// slightly out of gamut even when the forward path never would.
pub fn cv_to_rgb(y: f32, pb: f32, pr: f32) -> (f32, f32, f32) {
  let r = y + 1.402 * pr;
  let g = y - 0.344136 * pb - 0.714136 * pr;
  let b = y + 1.772 * pb;
  (r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0))
}

/// Scale a clamped-to-`[0,1]` RGB channel up to an integer sample in
/// `[0, denominator]`, truncating toward zero (matching float-to-int
/// conversion of a non-negative value).
pub fn scale_channel(v: f32, denominator: u16) -> u16 {
  (v * denominator as f32) as u16
}
