//! PNG encoding for 8-bit RGBA buffers.
//!
//! The writer emits the smallest valid file: signature, `IHDR`, a single
//! `IDAT` holding the zlib-compressed scanlines (filter type 0 on every
//! row), and `IEND`. [`read_chunks`] walks such a file back into chunks and
//! verifies each checksum.

use crate::error::{IconError, Result};
use flate2::{write::ZlibEncoder, Compression};
use image::RgbaImage;
use std::borrow::Cow;
use std::io::Write;

pub const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

pub const IHDR: [u8; 4] = *b"IHDR";
pub const IDAT: [u8; 4] = *b"IDAT";
pub const IEND: [u8; 4] = *b"IEND";

const BYTES_PER_PIXEL: usize = 4;
const FILTER_NONE: u8 = 0;

/// Contents of the `IHDR` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: u8,
    pub compression: u8,
    pub filter: u8,
    pub interlace: u8,
}

impl Header {
    /// Non-interlaced truecolor-with-alpha, 8 bits per channel.
    pub fn rgba8(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bit_depth: 8,
            color_type: 6,
            compression: 0,
            filter: 0,
            interlace: 0,
        }
    }

    pub fn to_bytes(&self) -> [u8; 13] {
        let mut out = [0u8; 13];
        out[0..4].copy_from_slice(&self.width.to_be_bytes());
        out[4..8].copy_from_slice(&self.height.to_be_bytes());
        out[8] = self.bit_depth;
        out[9] = self.color_type;
        out[10] = self.compression;
        out[11] = self.filter;
        out[12] = self.interlace;
        out
    }

    pub fn parse(data: &[u8]) -> Option<Self> {
        if data.len() != 13 {
            return None;
        }
        Some(Self {
            width: be_u32(data, 0)?,
            height: be_u32(data, 4)?,
            bit_depth: data[8],
            color_type: data[9],
            compression: data[10],
            filter: data[11],
            interlace: data[12],
        })
    }
}

/// CRC-32 of a chunk, computed over its type tag followed by its payload.
pub fn chunk_crc(tag: &[u8; 4], data: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(tag);
    hasher.update(data);
    hasher.finalize()
}

/// Builds a PNG byte stream one chunk at a time.
///
/// The signature is written on construction; chunks are appended in the
/// order they are added.
#[derive(Debug)]
pub struct PngWriter {
    out: Vec<u8>,
}

impl PngWriter {
    pub fn new() -> Self {
        let mut out = Vec::new();
        out.extend_from_slice(&SIGNATURE);
        Self { out }
    }

    /// Append a length-prefixed, CRC-suffixed chunk.
    pub fn chunk(&mut self, tag: &[u8; 4], data: &[u8]) -> &mut Self {
        self.out.reserve(data.len() + 12);
        self.out.extend_from_slice(&(data.len() as u32).to_be_bytes());
        self.out.extend_from_slice(tag);
        self.out.extend_from_slice(data);
        self.out.extend_from_slice(&chunk_crc(tag, data).to_be_bytes());
        self
    }

    pub fn finish(self) -> Vec<u8> {
        self.out
    }
}

impl Default for PngWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Prefix every row with the "none" filter byte.
fn scanlines(width: u32, height: u32, pixels: &[u8]) -> Vec<u8> {
    let stride = width as usize * BYTES_PER_PIXEL;
    let mut raw = Vec::with_capacity((stride + 1) * height as usize);
    for row in pixels.chunks_exact(stride) {
        raw.push(FILTER_NONE);
        raw.extend_from_slice(row);
    }
    raw
}

fn compress(raw: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::with_capacity(raw.len() / 2), Compression::best());
    encoder.write_all(raw)?;
    Ok(encoder.finish()?)
}

/// Encode a row-major RGBA buffer as a PNG file.
pub fn encode(width: u32, height: u32, pixels: &[u8]) -> Result<Vec<u8>> {
    if width == 0 || height == 0 {
        return Err(IconError::InvalidDimensions { width, height });
    }
    let expected = (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(BYTES_PER_PIXEL);
    if pixels.len() != expected {
        return Err(IconError::BufferSize {
            width,
            height,
            expected,
            actual: pixels.len(),
        });
    }

    let idat = compress(&scanlines(width, height, pixels))?;
    log::debug!(
        "encoded {width}x{height} RGBA: {} raw bytes -> {} compressed",
        pixels.len(),
        idat.len()
    );

    let mut writer = PngWriter::new();
    writer
        .chunk(&IHDR, &Header::rgba8(width, height).to_bytes())
        .chunk(&IDAT, &idat)
        .chunk(&IEND, &[]);
    Ok(writer.finish())
}

pub fn encode_image(img: &RgbaImage) -> Result<Vec<u8>> {
    encode(img.width(), img.height(), img.as_raw())
}

/// One chunk read back from a PNG stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub tag: [u8; 4],
    pub data: Vec<u8>,
    pub crc: u32,
}

impl Chunk {
    pub fn tag_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.tag)
    }
}

fn be_u32(bytes: &[u8], offset: usize) -> Option<u32> {
    let slice = bytes.get(offset..offset.checked_add(4)?)?;
    Some(u32::from_be_bytes(<[u8; 4]>::try_from(slice).ok()?))
}

/// Split a PNG stream into its chunks, checking the signature and every CRC.
pub fn read_chunks(bytes: &[u8]) -> Result<Vec<Chunk>> {
    if !bytes.starts_with(&SIGNATURE) {
        return Err(IconError::Signature);
    }

    let mut chunks = Vec::new();
    let mut offset = SIGNATURE.len();
    while offset < bytes.len() {
        let truncated = || IconError::Truncated { offset };

        let len = be_u32(bytes, offset).ok_or_else(truncated)? as usize;
        let tag: [u8; 4] = bytes
            .get(offset + 4..offset + 8)
            .and_then(|t| t.try_into().ok())
            .ok_or_else(truncated)?;
        let data_start = offset + 8;
        let data_end = data_start.checked_add(len).ok_or_else(truncated)?;
        let data = bytes.get(data_start..data_end).ok_or_else(truncated)?;
        let stored = be_u32(bytes, data_end).ok_or_else(truncated)?;

        let computed = chunk_crc(&tag, data);
        if stored != computed {
            return Err(IconError::Checksum {
                tag: String::from_utf8_lossy(&tag).into_owned(),
                stored,
                computed,
            });
        }

        chunks.push(Chunk {
            tag,
            data: data.to_vec(),
            crc: stored,
        });
        offset = data_end + 4;
    }

    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkerboard(width: u32, height: u32) -> Vec<u8> {
        let mut pixels = Vec::new();
        for y in 0..height {
            for x in 0..width {
                let v = if (x + y) % 2 == 0 { 255 } else { 0 };
                pixels.extend_from_slice(&[v, 128, 255 - v, (x * 40) as u8]);
            }
        }
        pixels
    }

    #[test]
    fn iend_chunk_has_well_known_crc() {
        assert_eq!(chunk_crc(&IEND, &[]), 0xAE42_6082);
    }

    #[test]
    fn writer_frames_chunks() {
        let mut writer = PngWriter::new();
        writer.chunk(b"tEXt", b"hi");
        let bytes = writer.finish();

        assert_eq!(&bytes[..8], &SIGNATURE);
        assert_eq!(&bytes[8..12], &2u32.to_be_bytes());
        assert_eq!(&bytes[12..16], b"tEXt");
        assert_eq!(&bytes[16..18], b"hi");
        assert_eq!(&bytes[18..22], &chunk_crc(b"tEXt", b"hi").to_be_bytes());
        assert_eq!(bytes.len(), 22);
    }

    #[test]
    fn scanlines_prefix_each_row() {
        let raw = scanlines(2, 2, &checkerboard(2, 2));
        assert_eq!(raw.len(), 2 * (1 + 8));
        assert_eq!(raw[0], FILTER_NONE);
        assert_eq!(raw[9], FILTER_NONE);
    }

    #[test]
    fn header_round_trips() {
        let header = Header::rgba8(300, 17);
        assert_eq!(Header::parse(&header.to_bytes()), Some(header));
        assert_eq!(Header::parse(&[0; 12]), None);
    }

    #[test]
    fn decodes_with_image_crate() {
        let pixels = checkerboard(5, 3);
        let bytes = encode(5, 3, &pixels).unwrap();

        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (5, 3));
        assert_eq!(decoded.into_raw(), pixels);
    }

    #[test]
    fn rejects_mismatched_buffer() {
        let err = encode(4, 4, &[0; 60]).unwrap_err();
        assert!(matches!(
            err,
            IconError::BufferSize {
                expected: 64,
                actual: 60,
                ..
            }
        ));
    }

    #[test]
    fn rejects_empty_dimensions() {
        assert!(matches!(
            encode(0, 4, &[]),
            Err(IconError::InvalidDimensions { width: 0, height: 4 })
        ));
    }

    #[test]
    fn read_chunks_detects_corruption() {
        let mut bytes = encode(2, 2, &checkerboard(2, 2)).unwrap();
        assert_eq!(read_chunks(&bytes).unwrap().len(), 3);

        // First byte of the IHDR width.
        bytes[16] ^= 0xFF;
        assert!(matches!(
            read_chunks(&bytes),
            Err(IconError::Checksum { ref tag, .. }) if tag == "IHDR"
        ));
    }

    #[test]
    fn read_chunks_detects_truncation_and_bad_signature() {
        let bytes = encode(2, 2, &checkerboard(2, 2)).unwrap();
        assert!(matches!(
            read_chunks(&bytes[..bytes.len() - 2]),
            Err(IconError::Truncated { .. })
        ));
        assert!(matches!(read_chunks(&bytes[1..]), Err(IconError::Signature)));
    }
}
