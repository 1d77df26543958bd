//! Passport photo validation
//!
//! Checks a candidate image against the type, size and dimension
//! constraints before any network call is made. Dimensions are read
//! straight from the container headers, so no pixel data is decoded.

use crate::{Error, Result};

/// Content types accepted for passport photos
pub const ALLOWED_IMAGE_TYPES: &[&str] =
    &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Maximum accepted file size (5 MiB)
pub const MAX_IMAGE_SIZE_BYTES: usize = 5 * 1024 * 1024;

/// Minimum width for a passport photo
pub const MIN_WIDTH: u32 = 600;

/// Minimum height for a passport photo
pub const MIN_HEIGHT: u32 = 600;

/// Pixel dimensions read from an image header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
}

/// Whether a declared content type is on the passport photo allow-list
pub fn is_allowed_content_type(content_type: &str) -> bool {
    ALLOWED_IMAGE_TYPES.contains(&content_type)
}

/// Validate a candidate passport photo
///
/// Accepts iff the declared content type is on the allow-list, the file
/// is at most 5 MiB, and both dimensions are at least 600 pixels.
/// Checks run in that order; the first failure wins.
pub fn validate_image(content_type: &str, bytes: &[u8]) -> Result<ImageInfo> {
    if !is_allowed_content_type(content_type) {
        return Err(Error::UnsupportedType {
            content_type: content_type.to_string(),
        });
    }

    if bytes.len() > MAX_IMAGE_SIZE_BYTES {
        return Err(Error::TooLarge {
            size: bytes.len(),
            limit: MAX_IMAGE_SIZE_BYTES,
        });
    }

    let info = read_dimensions(bytes)?;

    if info.width < MIN_WIDTH || info.height < MIN_HEIGHT {
        return Err(Error::TooSmall {
            width: info.width,
            height: info.height,
            min_width: MIN_WIDTH,
            min_height: MIN_HEIGHT,
        });
    }

    Ok(info)
}

/// Read pixel dimensions from an image header
///
/// The container format is detected from the magic bytes, not from the
/// declared content type, matching what a browser-side decode would see.
pub fn read_dimensions(bytes: &[u8]) -> Result<ImageInfo> {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        return png_dimensions(bytes);
    }
    if bytes.starts_with(&[0xFF, 0xD8]) {
        return jpeg_dimensions(bytes);
    }
    if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        return gif_dimensions(bytes);
    }
    if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
        return webp_dimensions(bytes);
    }
    Err(Error::UnreadableImage("unrecognized image format".into()))
}

fn be_u32(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

fn be_u16(bytes: &[u8]) -> u16 {
    u16::from_be_bytes([bytes[0], bytes[1]])
}

fn le_u16(bytes: &[u8]) -> u16 {
    u16::from_le_bytes([bytes[0], bytes[1]])
}

fn le_u24(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], 0])
}

/// PNG: width and height live in the IHDR chunk right after the signature
fn png_dimensions(bytes: &[u8]) -> Result<ImageInfo> {
    if bytes.len() < 24 {
        return Err(Error::UnreadableImage("truncated PNG header".into()));
    }
    if &bytes[12..16] != b"IHDR" {
        return Err(Error::UnreadableImage("PNG missing IHDR chunk".into()));
    }
    Ok(ImageInfo {
        width: be_u32(&bytes[16..20]),
        height: be_u32(&bytes[20..24]),
    })
}

/// JPEG: walk the marker segments until a start-of-frame carries the size
fn jpeg_dimensions(bytes: &[u8]) -> Result<ImageInfo> {
    let mut pos = 2;
    loop {
        if pos + 4 > bytes.len() {
            return Err(Error::UnreadableImage("truncated JPEG stream".into()));
        }
        if bytes[pos] != 0xFF {
            return Err(Error::UnreadableImage("invalid JPEG marker".into()));
        }
        // Markers may be preceded by fill bytes
        let mut marker_pos = pos + 1;
        while marker_pos < bytes.len() && bytes[marker_pos] == 0xFF {
            marker_pos += 1;
        }
        if marker_pos >= bytes.len() {
            return Err(Error::UnreadableImage("truncated JPEG stream".into()));
        }
        let marker = bytes[marker_pos];
        pos = marker_pos + 1;

        match marker {
            // Start-of-frame markers carry the dimensions
            0xC0..=0xCF if marker != 0xC4 && marker != 0xC8 && marker != 0xCC => {
                if pos + 7 > bytes.len() {
                    return Err(Error::UnreadableImage("truncated JPEG frame header".into()));
                }
                let height = be_u16(&bytes[pos + 3..pos + 5]) as u32;
                let width = be_u16(&bytes[pos + 5..pos + 7]) as u32;
                return Ok(ImageInfo { width, height });
            }
            // Scan data or end of image before any frame header
            0xD9 | 0xDA => {
                return Err(Error::UnreadableImage("JPEG has no frame header".into()));
            }
            _ => {
                if pos + 2 > bytes.len() {
                    return Err(Error::UnreadableImage("truncated JPEG segment".into()));
                }
                let seg_len = be_u16(&bytes[pos..pos + 2]) as usize;
                if seg_len < 2 {
                    return Err(Error::UnreadableImage("invalid JPEG segment length".into()));
                }
                pos += seg_len;
            }
        }
    }
}

/// GIF: logical screen descriptor immediately follows the signature
fn gif_dimensions(bytes: &[u8]) -> Result<ImageInfo> {
    if bytes.len() < 10 {
        return Err(Error::UnreadableImage("truncated GIF header".into()));
    }
    Ok(ImageInfo {
        width: le_u16(&bytes[6..8]) as u32,
        height: le_u16(&bytes[8..10]) as u32,
    })
}

/// WebP: the first chunk after the RIFF header decides the layout
fn webp_dimensions(bytes: &[u8]) -> Result<ImageInfo> {
    if bytes.len() < 16 {
        return Err(Error::UnreadableImage("truncated WebP header".into()));
    }
    match &bytes[12..16] {
        // Extended format: 24-bit canvas size, stored minus one
        b"VP8X" => {
            if bytes.len() < 30 {
                return Err(Error::UnreadableImage("truncated VP8X chunk".into()));
            }
            Ok(ImageInfo {
                width: le_u24(&bytes[24..27]) + 1,
                height: le_u24(&bytes[27..30]) + 1,
            })
        }
        // Lossless: 14-bit fields packed after the signature byte
        b"VP8L" => {
            if bytes.len() < 25 {
                return Err(Error::UnreadableImage("truncated VP8L chunk".into()));
            }
            if bytes[20] != 0x2F {
                return Err(Error::UnreadableImage("invalid VP8L signature".into()));
            }
            let b = u32::from_le_bytes([bytes[21], bytes[22], bytes[23], bytes[24]]);
            Ok(ImageInfo {
                width: (b & 0x3FFF) + 1,
                height: ((b >> 14) & 0x3FFF) + 1,
            })
        }
        // Lossy: dimensions follow the keyframe sync code
        b"VP8 " => {
            if bytes.len() < 30 {
                return Err(Error::UnreadableImage("truncated VP8 chunk".into()));
            }
            if bytes[23..26] != [0x9D, 0x01, 0x2A] {
                return Err(Error::UnreadableImage("invalid VP8 sync code".into()));
            }
            Ok(ImageInfo {
                width: (le_u16(&bytes[26..28]) & 0x3FFF) as u32,
                height: (le_u16(&bytes[28..30]) & 0x3FFF) as u32,
            })
        }
        _ => Err(Error::UnreadableImage("unknown WebP chunk".into())),
    }
}
