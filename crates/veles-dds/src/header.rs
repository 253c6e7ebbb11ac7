//! DDS header structures.

use std::fmt;

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// DDS file header.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsHeader {
    /// Header size (should be 124).
    pub size: u32,
    /// Header flags.
    pub flags: u32,
    /// Image height.
    pub height: u32,
    /// Image width.
    pub width: u32,
    /// Pitch or linear size.
    pub pitch_or_linear_size: u32,
    /// Depth (for volume textures).
    pub depth: u32,
    /// Number of mipmap levels.
    pub mipmap_count: u32,
    /// Reserved.
    pub reserved1: [u32; 11],
    /// Pixel format.
    pub pixel_format: DdsPixelFormat,
    /// Surface capabilities.
    pub caps: u32,
    /// Surface capabilities 2.
    pub caps2: u32,
    /// Surface capabilities 3.
    pub caps3: u32,
    /// Surface capabilities 4.
    pub caps4: u32,
    /// Reserved.
    pub reserved2: u32,
}

impl DdsHeader {
    /// Expected header size.
    pub const SIZE: u32 = 124;

    /// `flags`: caps field is valid.
    pub const DDSD_CAPS: u32 = 0x1;
    /// `flags`: height field is valid.
    pub const DDSD_HEIGHT: u32 = 0x2;
    /// `flags`: width field is valid.
    pub const DDSD_WIDTH: u32 = 0x4;
    /// `flags`: pitch field is valid.
    pub const DDSD_PITCH: u32 = 0x8;
    /// `flags`: pixel format field is valid.
    pub const DDSD_PIXELFORMAT: u32 = 0x1000;
    /// `flags`: mipmap count field is valid.
    pub const DDSD_MIPMAPCOUNT: u32 = 0x20000;
    /// `flags`: linear size field is valid.
    pub const DDSD_LINEARSIZE: u32 = 0x80000;
    /// `flags`: depth field is valid.
    pub const DDSD_DEPTH: u32 = 0x800000;

    /// `caps`: surface has more than one part (mipmaps, cubemap faces).
    pub const DDSCAPS_COMPLEX: u32 = 0x8;
    /// `caps`: surface has mipmaps.
    pub const DDSCAPS_MIPMAP: u32 = 0x400000;
    /// `caps`: surface is a texture.
    pub const DDSCAPS_TEXTURE: u32 = 0x1000;

    /// Flags every well-formed header must carry.
    pub const REQUIRED_FLAGS: u32 =
        Self::DDSD_CAPS | Self::DDSD_HEIGHT | Self::DDSD_WIDTH | Self::DDSD_PIXELFORMAT;

    /// Check if this header is followed by a DX10 extended header.
    pub fn is_dx10(&self) -> bool {
        self.pixel_format.is_four_cc() && self.pixel_format.four_cc == FourCC::DX10
    }
}

/// DDS pixel format.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsPixelFormat {
    /// Structure size (should be 32).
    pub size: u32,
    /// Pixel format flags.
    pub flags: u32,
    /// Four-character code for compression.
    pub four_cc: FourCC,
    /// Number of bits per pixel (for uncompressed).
    pub rgb_bit_count: u32,
    /// Red bit mask.
    pub r_bit_mask: u32,
    /// Green bit mask.
    pub g_bit_mask: u32,
    /// Blue bit mask.
    pub b_bit_mask: u32,
    /// Alpha bit mask.
    pub a_bit_mask: u32,
}

impl DdsPixelFormat {
    /// `flags`: texels carry alpha data.
    pub const DDPF_ALPHAPIXELS: u32 = 0x1;
    /// `flags`: alpha-only surface.
    pub const DDPF_ALPHA: u32 = 0x2;
    /// `flags`: `four_cc` identifies a compressed format.
    pub const DDPF_FOURCC: u32 = 0x4;
    /// `flags`: uncompressed RGB data.
    pub const DDPF_RGB: u32 = 0x40;
    /// `flags`: uncompressed YUV data.
    pub const DDPF_YUV: u32 = 0x200;
    /// `flags`: uncompressed single-channel data.
    pub const DDPF_LUMINANCE: u32 = 0x20000;

    /// Check if the payload format is identified by `four_cc`.
    pub fn is_four_cc(&self) -> bool {
        self.flags & Self::DDPF_FOURCC != 0
    }
}

/// Four-character code for compression type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(transparent)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    /// DXT1 compression.
    pub const DXT1: Self = Self(*b"DXT1");
    /// DXT3 compression.
    pub const DXT3: Self = Self(*b"DXT3");
    /// DXT5 compression.
    pub const DXT5: Self = Self(*b"DXT5");
    /// DX10 extended header.
    pub const DX10: Self = Self(*b"DX10");
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            if byte.is_ascii_graphic() || byte == b' ' {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "\\x{byte:02x}")?;
            }
        }
        Ok(())
    }
}

/// DX10 extended header.
///
/// Read positionally when present so the payload offset is correct; the
/// fields themselves are not interpreted by the decoder.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsHeaderDxt10 {
    /// DXGI format.
    pub dxgi_format: u32,
    /// Resource dimension.
    pub resource_dimension: u32,
    /// Misc flags.
    pub misc_flag: u32,
    /// Array size.
    pub array_size: u32,
    /// Misc flags 2.
    pub misc_flags2: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout_sizes() {
        assert_eq!(std::mem::size_of::<DdsHeader>(), 124);
        assert_eq!(std::mem::size_of::<DdsPixelFormat>(), 32);
        assert_eq!(std::mem::size_of::<DdsHeaderDxt10>(), 20);
    }

    #[test]
    fn test_four_cc_display() {
        assert_eq!(FourCC::DXT5.to_string(), "DXT5");
        assert_eq!(FourCC([0x00, 0x41, 0xFF, 0x20]).to_string(), "\\x00A\\xff ");
    }
}
