// C6: framing (textual header + big-endian codeword grid) and the
// top-level compress/decompress pipeline wiring the other modules
// together, grounded on `original_source/compress40.c` and
// `original_source/readOrWrite.c`.

use std::io::prelude::*;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::array2d::Array2D;
use crate::codeword;
use crate::colorspace;
use crate::dct;
use crate::error::CodecError;
use crate::image::{trim, Image, Pixel};
use crate::quantize::{self, QuantizedBlock};

const HEADER_MAGIC: &str = "COMP40 Compressed image format 2";
/// Output denominator used by the decompressor, fixed per spec.md §4.2.
const DECOMPRESSED_DENOMINATOR: u16 = 255;

/// Compress `image` (any dimensions) to the wire format, writing to `w`.
pub fn compress<W: Write>(image: &Image, mut w: W) -> Result<(), CodecError> {
  let trimmed = trim(image);
  let width = trimmed.width();
  let height = trimmed.height();
  log::debug!("trimmed image to {}x{}", width, height);

  let codeword_width = width / 2;
  let codeword_height = height / 2;
  let mut codewords = Array2D::<u32>::zeroed(codeword_height, codeword_width);

  for block_row in 0..codeword_height {
    for block_col in 0..codeword_width {
      let row = block_row * 2;
      let col = block_col * 2;

      let p1 = trimmed.pixels[row][col];
      let p2 = trimmed.pixels[row][col + 1];
      let p3 = trimmed.pixels[row + 1][col];
      let p4 = trimmed.pixels[row + 1][col + 1];

      let (y1, pb1, pr1) = pixel_to_cv(p1, trimmed.denominator);
      let (y2, pb2, pr2) = pixel_to_cv(p2, trimmed.denominator);
      let (y3, pb3, pr3) = pixel_to_cv(p3, trimmed.denominator);
      let (y4, pb4, pr4) = pixel_to_cv(p4, trimmed.denominator);

      let (a, b, c, d) = dct::forward_dct(y1, y2, y3, y4);
      let pb_avg = dct::average_chroma(pb1, pb2, pb3, pb4);
      let pr_avg = dct::average_chroma(pr1, pr2, pr3, pr4);

      let (qa, qb, qc, qd) = quantize::quantize_luma(a, b, c, d);
      let block = QuantizedBlock {
        a: qa,
        b: qb,
        c: qc,
        d: qd,
        pb: quantize::index_of_chroma(pb_avg),
        pr: quantize::index_of_chroma(pr_avg),
      };

      codewords[block_row][block_col] = codeword::pack(&block)?;
    }
  }

  write!(w, "{}\n{} {}\n", HEADER_MAGIC, width, height)?;
  for row in 0..codeword_height {
    for col in 0..codeword_width {
      w.write_u32::<BigEndian>(codewords[row][col])?;
    }
  }

  log::info!(
    "compressed {}x{} image ({} bytes) to {} codewords",
    width,
    height,
    width * height * 3,
    codeword_width * codeword_height
  );
  Ok(())
}

/// Decompress a wire-format stream read from `r` back to an `Image` with
/// `denominator == 255`.
pub fn decompress<R: Read>(mut r: R) -> Result<Image, CodecError> {
  let (width, height) = read_header(&mut r)?;
  if width % 2 != 0 || height % 2 != 0 {
    return Err(CodecError::MalformedHeader(format!("dimensions {}x{} are not even", width, height)));
  }

  let codeword_width = width / 2;
  let codeword_height = height / 2;

  let mut codewords = Array2D::<u32>::zeroed(codeword_height, codeword_width);
  for row in 0..codeword_height {
    for col in 0..codeword_width {
      codewords[row][col] = r
        .read_u32::<BigEndian>()
        .map_err(|_| CodecError::UnexpectedEof("compressed codeword"))?;
    }
  }

  // Decode each codeword to its four reconstructed pixels once, then build
  // the final grid with a plain (row, col) -> Pixel closure — the per-block
  // decode has no further fallible step, so it fits Array2D::new_with
  // instead of another zeroed-then-assign loop.
  let blocks = Array2D::new_with(codeword_height, codeword_width, |block_row, block_col| {
    let block = codeword::unpack(codewords[block_row][block_col]);
    let (a, b, c, d) = quantize::dequantize_luma(block.a, block.b, block.c, block.d);
    let (y1, y2, y3, y4) = dct::inverse_dct(a, b, c, d);
    let pb = quantize::chroma_of_index(block.pb);
    let pr = quantize::chroma_of_index(block.pr);
    [cv_to_pixel(y1, pb, pr), cv_to_pixel(y2, pb, pr), cv_to_pixel(y3, pb, pr), cv_to_pixel(y4, pb, pr)]
  });

  let pixels = Array2D::new_with(height, width, |row, col| {
    let within_block = (row % 2) * 2 + col % 2;
    blocks[row / 2][col / 2][within_block]
  });

  Ok(Image { pixels, denominator: DECOMPRESSED_DENOMINATOR })
}

fn pixel_to_cv(pixel: Pixel, denominator: u16) -> (f32, f32, f32) {
  let d = denominator as f32;
  let r = pixel.red as f32 / d;
  let g = pixel.green as f32 / d;
  let b = pixel.blue as f32 / d;
  colorspace::rgb_to_cv(r, g, b)
}

fn cv_to_pixel(y: f32, pb: f32, pr: f32) -> Pixel {
  let (r, g, b) = colorspace::cv_to_rgb(y, pb, pr);
  Pixel {
    red: colorspace::scale_channel(r, DECOMPRESSED_DENOMINATOR),
    green: colorspace::scale_channel(g, DECOMPRESSED_DENOMINATOR),
    blue: colorspace::scale_channel(b, DECOMPRESSED_DENOMINATOR),
  }
}

fn read_header<R: Read>(r: &mut R) -> Result<(usize, usize), CodecError> {
  let mut magic = vec![0u8; HEADER_MAGIC.len()];
  r.read_exact(&mut magic).map_err(|_| CodecError::MalformedHeader("truncated header".into()))?;
  if magic != HEADER_MAGIC.as_bytes() {
    return Err(CodecError::MalformedHeader("bad magic line".into()));
  }

  expect_byte(r, b'\n')?;
  let (width, sep) = read_decimal(r)?;
  if sep != b' ' {
    return Err(CodecError::MalformedHeader(format!("expected ' ' after width, found {:?}", sep as char)));
  }
  let (height, sep) = read_decimal(r)?;
  if sep != b'\n' {
    return Err(CodecError::MalformedHeader(format!("expected newline after height, found {:?}", sep as char)));
  }

  Ok((width, height))
}

fn expect_byte<R: Read>(r: &mut R, expected: u8) -> Result<(), CodecError> {
  let byte = r.read_u8().map_err(|_| CodecError::UnexpectedEof("compressed header"))?;
  if byte != expected {
    return Err(CodecError::MalformedHeader(format!(
      "expected byte {:?}, found {:?}",
      expected as char, byte as char
    )));
  }
  Ok(())
}

/// Reads decimal digits until a non-digit terminator, returning the parsed
/// value and the (consumed) terminator byte for the caller to check.
fn read_decimal<R: Read>(r: &mut R) -> Result<(usize, u8), CodecError> {
  let mut v: usize = 0;
  let mut saw_digit = false;
  loop {
    let byte = r.read_u8().map_err(|_| CodecError::UnexpectedEof("compressed header dimensions"))?;
    match byte {
      b'0'..=b'9' => {
        v = 10 * v + (byte - b'0') as usize;
        saw_digit = true;
      }
      _ if saw_digit => return Ok((v, byte)),
      _ => return Err(CodecError::MalformedHeader("expected decimal digit".into())),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::image::Pixel;
  use std::io::Cursor;

  fn solid_image(width: usize, height: usize, denominator: u16, pixel: Pixel) -> Image {
    let mut image = Image::new(width, height, denominator);
    for row in 0..height {
      for col in 0..width {
        image.pixels[row][col] = pixel;
      }
    }
    image
  }

  #[test]
  fn header_exactness() {
    let image = solid_image(2, 2, 255, Pixel { red: 0, green: 0, blue: 0 });
    let mut buf = Vec::new();
    compress(&image, &mut buf).unwrap();
    let first_line_end = buf.iter().position(|&b| b == b'\n').unwrap();
    assert_eq!(&buf[..=first_line_end], b"COMP40 Compressed image format 2\n");
  }

  #[test]
  fn byte_count_law() {
    let image = solid_image(4, 2, 255, Pixel { red: 128, green: 64, blue: 32 });
    let mut buf = Vec::new();
    compress(&image, &mut buf).unwrap();
    let header_len = "COMP40 Compressed image format 2\n4 2\n".len();
    assert_eq!(buf.len(), header_len + 4 * (4 / 2) * (2 / 2));
  }

  #[test]
  fn scenario_a_trim() {
    let image = solid_image(3, 3, 255, Pixel { red: 10, green: 20, blue: 30 });
    let mut buf = Vec::new();
    compress(&image, &mut buf).unwrap();
    let decompressed = decompress(Cursor::new(buf)).unwrap();
    assert_eq!(decompressed.width(), 2);
    assert_eq!(decompressed.height(), 2);
  }

  #[test]
  fn scenario_b_black_block_roundtrip() {
    let image = solid_image(2, 2, 255, Pixel { red: 0, green: 0, blue: 0 });
    let mut buf = Vec::new();
    compress(&image, &mut buf).unwrap();
    let decompressed = decompress(Cursor::new(buf)).unwrap();
    for row in 0..2 {
      for col in 0..2 {
        let p = decompressed.pixels[row][col];
        assert!(p.red <= 1 && p.green <= 1 && p.blue <= 1);
      }
    }
  }

  #[test]
  fn scenario_c_white_block_roundtrip() {
    let image = solid_image(2, 2, 255, Pixel { red: 255, green: 255, blue: 255 });
    let mut buf = Vec::new();
    compress(&image, &mut buf).unwrap();
    let decompressed = decompress(Cursor::new(buf)).unwrap();
    for row in 0..2 {
      for col in 0..2 {
        let p = decompressed.pixels[row][col];
        assert!(p.red >= 254 && p.green >= 254 && p.blue >= 254);
      }
    }
  }

  #[test]
  fn roundtrip_dimensions_preserved_when_already_even() {
    let image = solid_image(6, 4, 255, Pixel { red: 100, green: 150, blue: 200 });
    let mut buf = Vec::new();
    compress(&image, &mut buf).unwrap();
    let decompressed = decompress(Cursor::new(buf)).unwrap();
    assert_eq!(decompressed.width(), 6);
    assert_eq!(decompressed.height(), 4);
  }

  #[test]
  fn rejects_truncated_header() {
    let data = b"COMP40 Compressed image format".to_vec();
    assert!(decompress(Cursor::new(data)).is_err());
  }

  #[test]
  fn rejects_unexpected_eof_in_payload() {
    let data = b"COMP40 Compressed image format 2\n2 2\n\x00\x00".to_vec();
    assert!(decompress(Cursor::new(data)).is_err());
  }
}
