//! PNG encoding for RGBA image data (color type 6).

use std::io::Write;

use crate::error::{ReportError, Result};

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Create a PNG image from RGBA pixel data.
///
/// # Arguments
/// - `pixels`: RGBA pixel data (4 bytes per pixel, row-major)
/// - `width`: Image width in pixels
/// - `height`: Image height in pixels
pub fn create_png(pixels: &[u8], width: usize, height: usize) -> Result<Vec<u8>> {
    if width == 0 || height == 0 {
        return Err(ReportError::Encode(format!(
            "image dimensions {}x{} are empty",
            width, height
        )));
    }
    let expected = width * height * 4;
    if pixels.len() != expected {
        return Err(ReportError::Encode(format!(
            "expected {} bytes of RGBA data, got {}",
            expected,
            pixels.len()
        )));
    }

    let mut png = Vec::new();
    png.extend_from_slice(&PNG_SIGNATURE);

    let mut ihdr_data = Vec::with_capacity(13);
    ihdr_data.extend_from_slice(&(width as u32).to_be_bytes());
    ihdr_data.extend_from_slice(&(height as u32).to_be_bytes());
    ihdr_data.push(8); // bit depth
    ihdr_data.push(6); // color type (RGBA)
    ihdr_data.push(0); // compression method
    ihdr_data.push(0); // filter method
    ihdr_data.push(0); // interlace method
    write_chunk(&mut png, b"IHDR", &ihdr_data);

    let idat_data = deflate_idat_rgba(pixels, width, height)
        .map_err(|e| ReportError::Encode(format!("IDAT compression failed: {}", e)))?;
    write_chunk(&mut png, b"IDAT", &idat_data);

    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Deflate RGBA scanlines, each prefixed with filter type 0.
fn deflate_idat_rgba(pixels: &[u8], width: usize, height: usize) -> std::io::Result<Vec<u8>> {
    let stride = width * 4;
    let mut uncompressed = Vec::with_capacity(height * (1 + stride));
    for row in pixels.chunks_exact(stride) {
        uncompressed.push(0);
        uncompressed.extend_from_slice(row);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(&uncompressed)?;
    encoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn chunk_at(png: &[u8], offset: usize) -> (&[u8], &[u8], u32) {
        let len = u32::from_be_bytes(png[offset..offset + 4].try_into().unwrap()) as usize;
        let kind = &png[offset + 4..offset + 8];
        let data = &png[offset + 8..offset + 8 + len];
        let crc = u32::from_be_bytes(png[offset + 8 + len..offset + 12 + len].try_into().unwrap());
        (kind, data, crc)
    }

    #[test]
    fn test_signature_and_header() {
        let pixels = vec![255u8; 3 * 2 * 4];
        let png = create_png(&pixels, 3, 2).unwrap();

        assert_eq!(&png[..8], &PNG_SIGNATURE);
        let (kind, data, crc) = chunk_at(&png, 8);
        assert_eq!(kind, b"IHDR");
        assert_eq!(&data[..4], &3u32.to_be_bytes());
        assert_eq!(&data[4..8], &2u32.to_be_bytes());
        assert_eq!(data[9], 6);
        assert_eq!(crc, crc32fast::hash(&[b"IHDR".as_slice(), data].concat()));
        assert_eq!(&png[png.len() - 8..png.len() - 4], b"IEND");
    }

    #[test]
    fn test_idat_decompresses_to_scanlines() {
        let pixels: Vec<u8> = (0..2 * 2 * 4).map(|i| i as u8).collect();
        let png = create_png(&pixels, 2, 2).unwrap();

        let (_, ihdr, _) = chunk_at(&png, 8);
        let (kind, idat, _) = chunk_at(&png, 8 + 12 + ihdr.len());
        assert_eq!(kind, b"IDAT");

        let mut raw = Vec::new();
        flate2::read::ZlibDecoder::new(idat)
            .read_to_end(&mut raw)
            .unwrap();
        assert_eq!(raw.len(), 2 * (1 + 8));
        assert_eq!(raw[0], 0);
        assert_eq!(&raw[1..9], &pixels[..8]);
        assert_eq!(raw[9], 0);
        assert_eq!(&raw[10..18], &pixels[8..]);
    }

    #[test]
    fn test_rejects_short_buffer() {
        assert!(matches!(
            create_png(&[0u8; 10], 2, 2),
            Err(ReportError::Encode(_))
        ));
        assert!(create_png(&[], 0, 0).is_err());
    }
}
