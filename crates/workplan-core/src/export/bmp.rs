//! Decoder for uncompressed Windows bitmaps.
//!
//! Only what rasterizers emit is supported: 24-bit BGR and 32-bit BGRA
//! (`BI_RGB` or `BI_BITFIELDS` with the standard masks), bottom-up or
//! top-down.

use super::Raster;
use crate::error::{Result, WorkplanError};

const FILE_HEADER_LEN: usize = 14;
const BI_RGB: u32 = 0;
const BI_BITFIELDS: u32 = 3;

fn u16_at(bytes: &[u8], offset: usize) -> Result<u16> {
    bytes
        .get(offset..offset + 2)
        .map(|b| u16::from_le_bytes([b[0], b[1]]))
        .ok_or_else(|| WorkplanError::capture("bitmap header is truncated"))
}

fn u32_at(bytes: &[u8], offset: usize) -> Result<u32> {
    bytes
        .get(offset..offset + 4)
        .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .ok_or_else(|| WorkplanError::capture("bitmap header is truncated"))
}

/// Decodes a BMP file into an RGB raster.
pub fn decode(bytes: &[u8]) -> Result<Raster> {
    if bytes.get(..2) != Some(b"BM".as_slice()) {
        return Err(WorkplanError::capture("not a BMP file"));
    }

    let data_offset = u32_at(bytes, 10)? as usize;
    let dib = FILE_HEADER_LEN;
    let width = u32_at(bytes, dib + 4)? as i32;
    let height = u32_at(bytes, dib + 8)? as i32;
    let bits = u16_at(bytes, dib + 14)?;
    let compression = u32_at(bytes, dib + 16)?;

    if width <= 0 || height == 0 {
        return Err(WorkplanError::capture(format!(
            "unsupported bitmap dimensions {width}x{height}"
        )));
    }
    let bytes_per_pixel = match (bits, compression) {
        (24, BI_RGB) => 3,
        (32, BI_RGB | BI_BITFIELDS) => 4,
        _ => {
            return Err(WorkplanError::capture(format!(
                "unsupported bitmap format: {bits} bpp, compression {compression}"
            )));
        }
    };

    let width = width as usize;
    let top_down = height < 0;
    let rows = height.unsigned_abs() as usize;
    let stride = (width * bytes_per_pixel).div_ceil(4) * 4;

    let data = bytes
        .get(data_offset..)
        .filter(|data| data.len() >= stride * (rows - 1) + width * bytes_per_pixel)
        .ok_or_else(|| WorkplanError::capture("bitmap pixel data is truncated"))?;

    let mut pixels = Vec::with_capacity(width * rows * 3);
    for row in 0..rows {
        let source_row = if top_down { row } else { rows - 1 - row };
        let start = source_row * stride;
        let line = &data[start..start + width * bytes_per_pixel];
        for px in line.chunks_exact(bytes_per_pixel) {
            pixels.extend_from_slice(&[px[2], px[1], px[0]]);
        }
    }

    Raster::new(width as u32, rows as u32, pixels)
}

#[cfg(test)]
pub(crate) fn encode_24(raster: &Raster) -> Vec<u8> {
    let width = raster.width as usize;
    let stride = (width * 3).div_ceil(4) * 4;
    let data_len = stride * raster.height as usize;
    let mut out = Vec::with_capacity(54 + data_len);
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&((54 + data_len) as u32).to_le_bytes());
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(&54u32.to_le_bytes());
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&(raster.width as i32).to_le_bytes());
    out.extend_from_slice(&(raster.height as i32).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&24u16.to_le_bytes());
    out.extend_from_slice(&BI_RGB.to_le_bytes());
    out.extend_from_slice(&(data_len as u32).to_le_bytes());
    out.extend_from_slice(&[0; 16]);
    for row in (0..raster.height as usize).rev() {
        let line = &raster.pixels[row * width * 3..(row + 1) * width * 3];
        for px in line.chunks_exact(3) {
            out.extend_from_slice(&[px[2], px[1], px[0]]);
        }
        out.extend(std::iter::repeat_n(0u8, stride - width * 3));
    }
    out
}
