//! Uncompressed 24-bit BMP encoding and decoding.
//!
//! Files carry the 14-byte file header and the 40-byte `BITMAPINFOHEADER`,
//! then rows of blue-green-red pixels, bottom row first, each padded to a
//! multiple of four bytes.

use super::image::{Bgr, Image};
use crate::error::{Result, VoronoiError};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

const MAGIC: u16 = 0x4D42; // "BM"
const FILE_HEADER_LEN: u32 = 14;
const INFO_HEADER_LEN: u32 = 40;
const HEADER_LEN: u32 = FILE_HEADER_LEN + INFO_HEADER_LEN;
const PIXELS_PER_METER: i32 = 6000;

/// Bytes per stored row, including padding.
fn row_stride(width: u32) -> usize {
    (width as usize * 3 + 3) & !3
}

/// Encodes `image` as a 24-bit BMP.
pub fn write_bmp<W: Write>(mut w: W, image: &Image) -> Result<()> {
    let stride = row_stride(image.width());
    let data_len = stride * image.height() as usize;
    let data_len = u32::try_from(data_len).map_err(|_| VoronoiError::Bmp("image too large".into()))?;

    // BITMAPFILEHEADER
    w.write_u16::<LittleEndian>(MAGIC)?;
    w.write_u32::<LittleEndian>(HEADER_LEN + data_len)?;
    w.write_u16::<LittleEndian>(0)?;
    w.write_u16::<LittleEndian>(0)?;
    w.write_u32::<LittleEndian>(HEADER_LEN)?;

    // BITMAPINFOHEADER
    w.write_u32::<LittleEndian>(INFO_HEADER_LEN)?;
    w.write_i32::<LittleEndian>(image.width() as i32)?;
    w.write_i32::<LittleEndian>(image.height() as i32)?;
    w.write_u16::<LittleEndian>(1)?;
    w.write_u16::<LittleEndian>(24)?;
    w.write_u32::<LittleEndian>(0)?;
    w.write_u32::<LittleEndian>(data_len)?;
    w.write_i32::<LittleEndian>(PIXELS_PER_METER)?;
    w.write_i32::<LittleEndian>(PIXELS_PER_METER)?;
    w.write_u32::<LittleEndian>(0)?;
    w.write_u32::<LittleEndian>(0)?;

    let padding = [0u8; 3];
    let pad = stride - image.width() as usize * 3;
    for y in 0..image.height() {
        for pixel in image.row(y) {
            w.write_all(pixel)?;
        }
        w.write_all(&padding[..pad])?;
    }
    w.flush()?;
    Ok(())
}

/// Dimensions and row order read from a BMP header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BmpHeader {
    pub width: u32,
    pub height: u32,
    top_down: bool,
}

/// Decodes an uncompressed 24-bit BMP.
///
/// Both bottom-up (positive height) and top-down (negative height) files
/// are accepted; the result always has row 0 at the bottom.
///
/// # Errors
///
/// [`VoronoiError::Bmp`] for a bad signature, an unsupported pixel format,
/// or truncated pixel data.
pub fn read_bmp<R: Read>(mut r: R) -> Result<Image> {
    let header = read_header(&mut r)?;
    read_pixels(&mut r, header)
}

/// Reads both headers and skips to the pixel data. Nothing is allocated
/// from the declared dimensions.
pub(crate) fn read_header<R: Read>(r: &mut R) -> Result<BmpHeader> {
    let magic = r.read_u16::<LittleEndian>().map_err(truncated)?;
    if magic != MAGIC {
        return Err(VoronoiError::Bmp(format!("bad signature {magic:#06x}")));
    }
    let _file_size = r.read_u32::<LittleEndian>().map_err(truncated)?;
    let _reserved = r.read_u32::<LittleEndian>().map_err(truncated)?;
    let data_offset = r.read_u32::<LittleEndian>().map_err(truncated)?;

    let info_len = r.read_u32::<LittleEndian>().map_err(truncated)?;
    if info_len < INFO_HEADER_LEN {
        return Err(VoronoiError::Bmp(format!("unsupported info header of {info_len} bytes")));
    }
    let width = r.read_i32::<LittleEndian>().map_err(truncated)?;
    let height = r.read_i32::<LittleEndian>().map_err(truncated)?;
    let _planes = r.read_u16::<LittleEndian>().map_err(truncated)?;
    let bits = r.read_u16::<LittleEndian>().map_err(truncated)?;
    let compression = r.read_u32::<LittleEndian>().map_err(truncated)?;
    if bits != 24 || compression != 0 {
        return Err(VoronoiError::Bmp(format!(
            "only uncompressed 24-bit images are supported, found {bits}-bit compression {compression}"
        )));
    }
    if width <= 0 || height == 0 {
        return Err(VoronoiError::Bmp(format!("invalid dimensions {width} x {height}")));
    }

    // Skip the rest of the info header and anything before the pixels.
    let consumed = FILE_HEADER_LEN + 20;
    let skip = data_offset
        .checked_sub(consumed)
        .ok_or_else(|| VoronoiError::Bmp(format!("pixel data offset {data_offset} inside header")))?;
    io::copy(&mut r.by_ref().take(u64::from(skip)), &mut io::sink())?;

    Ok(BmpHeader {
        width: width.unsigned_abs(),
        height: height.unsigned_abs(),
        top_down: height < 0,
    })
}

/// Reads the pixel rows that follow `header`.
///
/// Buffers grow with the bytes actually read, so a header that overstates
/// the image size fails as truncated data.
pub(crate) fn read_pixels<R: Read>(r: &mut R, header: BmpHeader) -> Result<Image> {
    let BmpHeader { width, height, top_down } = header;
    let stride = row_stride(width);
    let used = width as usize * 3;

    let mut rows: Vec<Vec<Bgr>> = Vec::new();
    let mut raw = Vec::new();
    for _ in 0..height {
        raw.clear();
        r.by_ref().take(stride as u64).read_to_end(&mut raw)?;
        if raw.len() < stride {
            return Err(VoronoiError::Bmp("unexpected end of file".into()));
        }
        rows.push(raw[..used].chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect());
    }
    if top_down {
        rows.reverse();
    }

    let pixels = rows.into_iter().flatten().collect();
    Image::from_pixels(width, height, pixels)
        .ok_or_else(|| VoronoiError::Bmp("pixel count does not match dimensions".into()))
}

/// Writes a BMP file at `path`, replacing it if it exists.
pub fn save_bmp<P: AsRef<Path>>(path: P, image: &Image) -> Result<()> {
    write_bmp(BufWriter::new(File::create(path)?), image)
}

pub fn load_bmp<P: AsRef<Path>>(path: P) -> Result<Image> {
    read_bmp(BufReader::new(File::open(path)?))
}

fn truncated(err: io::Error) -> VoronoiError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        VoronoiError::Bmp("unexpected end of file".into())
    } else {
        err.into()
    }
}
