//! Pixel dimensions read straight from raster image headers.

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use derive_new::new;
use std::fmt;

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Gif,
    Bmp,
    Jpeg,
    Webp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.width, self.height)
    }
}

pub fn sniff(data: &[u8]) -> Option<ImageFormat> {
    if data.starts_with(PNG_SIGNATURE) {
        Some(ImageFormat::Png)
    } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        Some(ImageFormat::Gif)
    } else if data.starts_with(b"BM") {
        Some(ImageFormat::Bmp)
    } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some(ImageFormat::Jpeg)
    } else if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
        Some(ImageFormat::Webp)
    } else {
        None
    }
}

/// `None` when the data is not a recognised image or the header is cut short.
pub fn dimensions(data: &[u8]) -> Option<Dimensions> {
    match sniff(data)? {
        ImageFormat::Png => png(data),
        ImageFormat::Gif => gif(data),
        ImageFormat::Bmp => bmp(data),
        ImageFormat::Jpeg => jpeg(data),
        ImageFormat::Webp => webp(data),
    }
}

fn png(data: &[u8]) -> Option<Dimensions> {
    if data.len() < 24 || &data[12..16] != b"IHDR" {
        return None;
    }
    Some(Dimensions::new(
        BigEndian::read_u32(&data[16..20]),
        BigEndian::read_u32(&data[20..24]),
    ))
}

fn gif(data: &[u8]) -> Option<Dimensions> {
    if data.len() < 10 {
        return None;
    }
    Some(Dimensions::new(
        LittleEndian::read_u16(&data[6..8]) as u32,
        LittleEndian::read_u16(&data[8..10]) as u32,
    ))
}

fn bmp(data: &[u8]) -> Option<Dimensions> {
    if data.len() < 26 {
        return None;
    }

    // OS/2 core header stores 16-bit sizes, everything later 32-bit signed
    if LittleEndian::read_u32(&data[14..18]) == 12 {
        return Some(Dimensions::new(
            LittleEndian::read_u16(&data[18..20]) as u32,
            LittleEndian::read_u16(&data[20..22]) as u32,
        ));
    }

    Some(Dimensions::new(
        LittleEndian::read_i32(&data[18..22]).unsigned_abs(),
        LittleEndian::read_i32(&data[22..26]).unsigned_abs(),
    ))
}

fn jpeg(data: &[u8]) -> Option<Dimensions> {
    let mut i = 2;
    while i + 1 < data.len() {
        if data[i] != 0xFF {
            return None;
        }

        let marker = data[i + 1];
        match marker {
            // fill byte
            0xFF => i += 1,
            // markers without a payload
            0x01 | 0xD0..=0xD9 => i += 2,
            // start of frame, excluding DHT (C4), JPG (C8) and DAC (CC)
            0xC0..=0xCF if !matches!(marker, 0xC4 | 0xC8 | 0xCC) => {
                if i + 9 > data.len() {
                    return None;
                }
                return Some(Dimensions::new(
                    BigEndian::read_u16(&data[i + 7..i + 9]) as u32,
                    BigEndian::read_u16(&data[i + 5..i + 7]) as u32,
                ));
            }
            _ => {
                if i + 4 > data.len() {
                    return None;
                }
                i += 2 + BigEndian::read_u16(&data[i + 2..i + 4]) as usize;
            }
        }
    }

    None
}

fn webp(data: &[u8]) -> Option<Dimensions> {
    if data.len() < 16 {
        return None;
    }

    match &data[12..16] {
        b"VP8 " if data.len() >= 30 => Some(Dimensions::new(
            (LittleEndian::read_u16(&data[26..28]) & 0x3FFF) as u32,
            (LittleEndian::read_u16(&data[28..30]) & 0x3FFF) as u32,
        )),
        b"VP8L" if data.len() >= 25 => {
            let bits = LittleEndian::read_u32(&data[21..25]);
            Some(Dimensions::new(
                (bits & 0x3FFF) + 1,
                ((bits >> 14) & 0x3FFF) + 1,
            ))
        }
        b"VP8X" if data.len() >= 30 => Some(Dimensions::new(
            LittleEndian::read_u24(&data[24..27]) + 1,
            LittleEndian::read_u24(&data[27..30]) + 1,
        )),
        _ => None,
    }
}
