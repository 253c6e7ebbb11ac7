//! DDS container parsing and decoding.

use std::fs;
use std::path::Path;

use veles_common::BinaryReader;

use crate::bc3;
use crate::header::{DdsHeader, DdsHeaderDxt10, FourCC};
use crate::{Error, Result, DDS_MAGIC};

/// Minimum size of a DDS file: the magic plus the basic header.
const MIN_FILE_SIZE: usize = 128;

/// Number of bytes per decoded pixel (RGBA8).
pub const COMPONENTS: usize = 4;

/// A validated DDS container: parsed headers plus the compressed payload.
///
/// Parsing is separate from decoding so callers can inspect dimensions and
/// format even when the payload uses a compression this crate does not
/// decode.
#[derive(Debug, Clone)]
pub struct DdsFile<'a> {
    /// The basic header.
    pub header: DdsHeader,
    /// The DX10 extended header, when present.
    pub dx10: Option<DdsHeaderDxt10>,
    payload: &'a [u8],
}

impl<'a> DdsFile<'a> {
    /// Parse and validate the DDS container in `data`.
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        if data.len() < MIN_FILE_SIZE {
            return Err(Error::TooSmall { len: data.len() });
        }

        let magic: [u8; 4] = data[..4].try_into().unwrap();
        if &magic != DDS_MAGIC {
            return Err(Error::InvalidMagic(magic));
        }

        let mut reader = BinaryReader::new(&data[4..]);
        let header: DdsHeader = reader.read_struct()?;

        if header.size != DdsHeader::SIZE {
            return Err(Error::InvalidHeaderSize(header.size));
        }

        if header.flags & DdsHeader::REQUIRED_FLAGS != DdsHeader::REQUIRED_FLAGS {
            return Err(Error::MissingHeaderFlags {
                flags: header.flags,
            });
        }

        if header.caps & DdsHeader::DDSCAPS_TEXTURE == 0 {
            return Err(Error::NotATexture);
        }

        let dx10: Option<DdsHeaderDxt10> = if header.is_dx10() {
            Some(reader.read_struct()?)
        } else {
            None
        };

        Ok(Self {
            header,
            dx10,
            payload: reader.remaining_bytes(),
        })
    }

    /// Image width in texels, floored to 1.
    pub fn width(&self) -> u32 {
        self.header.width.max(1)
    }

    /// Image height in texels, floored to 1.
    pub fn height(&self) -> u32 {
        self.header.height.max(1)
    }

    /// Image depth in slices, floored to 1.
    pub fn depth(&self) -> u32 {
        self.header.depth.max(1)
    }

    /// The compressed payload following the headers.
    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    /// Decode the payload into an RGBA8 image.
    ///
    /// Only DXT5-compressed payloads are supported; anything else is
    /// rejected with an unsupported-format error. The buffer is allocated
    /// for all depth slices but only the first is decoded.
    pub fn decode(&self) -> Result<DdsImage> {
        let (width, height, depth) = (self.width(), self.height(), self.depth());
        let mut pixels =
            vec![0u8; width as usize * height as usize * depth as usize * COMPONENTS];

        let pixel_format = self.header.pixel_format;
        if !pixel_format.is_four_cc() {
            return Err(Error::UnsupportedPixelFormat {
                flags: pixel_format.flags,
            });
        }

        match pixel_format.four_cc {
            FourCC::DXT5 => bc3::decode_into(self.payload, width, height, &mut pixels)?,
            other => return Err(Error::UnsupportedFourCc(other)),
        }

        Ok(DdsImage {
            width,
            height,
            depth,
            pixels,
        })
    }
}

/// A decoded RGBA8 image.
///
/// Rows are stored top-to-bottom; row `y` of the first slice occupies bytes
/// `[y * width * 4, (y + 1) * width * 4)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DdsImage {
    width: u32,
    height: u32,
    depth: u32,
    pixels: Vec<u8>,
}

impl DdsImage {
    /// Decode a DDS container from an in-memory buffer.
    pub fn decode(data: &[u8], flip: bool) -> Result<Self> {
        let file = DdsFile::parse(data)?;
        let mut image = file.decode()?;

        if flip {
            image.flip_vertical();
        }

        Ok(image)
    }

    /// Read and decode a DDS file from disk.
    pub fn decode_file<P: AsRef<Path>>(path: P, flip: bool) -> Result<Self> {
        let data = fs::read(path)?;
        Self::decode(&data, flip)
    }

    /// Image width in texels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in texels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Image depth in slices.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// The pixel data, `width * height * depth * 4` bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the image, returning the pixel data.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Reverse the vertical order of rows in the first slice, in place.
    ///
    /// Applying the flip twice restores the original pixel data.
    pub fn flip_vertical(&mut self) {
        let row_size = self.width as usize * COMPONENTS;
        let height = self.height as usize;

        for i in 0..height / 2 {
            let (head, tail) = self.pixels.split_at_mut((height - 1 - i) * row_size);
            head[i * row_size..(i + 1) * row_size].swap_with_slice(&mut tail[..row_size]);
        }
    }
}
