//! DXT5 (BC3) block decompression.
//!
//! A BC3 payload is a grid of 16-byte blocks, each covering a 4x4 texel
//! region, stored left-to-right, top-to-bottom. Bytes 0-7 hold two alpha
//! endpoints plus 48 bits of 3-bit interpolation codes; bytes 8-15 hold two
//! RGB565 colour endpoints plus 32 bits of 2-bit selection codes.

use crate::{Error, Result};

/// Compressed block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Number of 4x4 blocks needed to cover `extent` texels.
pub const fn block_count(extent: u32) -> usize {
    (extent as usize + 3) / 4
}

/// Decompress a DXT5 payload into an RGBA8 buffer.
///
/// `pixels` must hold at least `width * height * 4` bytes; texels outside
/// the image extents (partial blocks on the right and bottom edges) are
/// clipped per axis and never written.
pub(crate) fn decode_into(
    payload: &[u8],
    width: u32,
    height: u32,
    pixels: &mut [u8],
) -> Result<()> {
    let blocks_x = block_count(width);
    let blocks_y = block_count(height);

    let expected = blocks_x * blocks_y * BLOCK_SIZE;
    if payload.len() < expected {
        return Err(Error::TruncatedPayload {
            expected,
            actual: payload.len(),
        });
    }

    for by in 0..blocks_y {
        let block_row = &payload[by * blocks_x * BLOCK_SIZE..];
        for bx in 0..blocks_x {
            let block = &block_row[bx * BLOCK_SIZE..(bx + 1) * BLOCK_SIZE];
            decompress_block(
                block.try_into().unwrap(),
                bx as u32 * 4,
                by as u32 * 4,
                width,
                height,
                pixels,
            );
        }
    }

    Ok(())
}

/// Decompress one 16-byte block into the texel region at `(x, y)`.
fn decompress_block(
    block: &[u8; BLOCK_SIZE],
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    pixels: &mut [u8],
) {
    let alpha_0 = block[0];
    let alpha_1 = block[1];

    // 48 bits of packed alpha codes, as a low 16-bit and a high 32-bit word.
    let alpha_lo = u16::from_le_bytes([block[2], block[3]]);
    let alpha_hi = u32::from_le_bytes([block[4], block[5], block[6], block[7]]);

    let [r0, g0, b0] = expand_565(u16::from_le_bytes([block[8], block[9]]));
    let [r1, g1, b1] = expand_565(u16::from_le_bytes([block[10], block[11]]));

    let colour_codes = u32::from_le_bytes([block[12], block[13], block[14], block[15]]);

    for j in 0..4u32 {
        for i in 0..4u32 {
            let texel = 4 * j + i;

            let code = alpha_code(alpha_lo, alpha_hi, texel);
            let alpha = interpolate_alpha(alpha_0, alpha_1, code);

            let [r, g, b] = match (colour_codes >> (2 * texel)) & 0x3 {
                0 => [r0, g0, b0],
                1 => [r1, g1, b1],
                2 => [blend(r0, r1), blend(g0, g1), blend(b0, b1)],
                _ => [blend(r1, r0), blend(g1, g0), blend(b1, b0)],
            };

            let (px, py) = (x + i, y + j);
            if px < width && py < height {
                let index = (py as usize * width as usize + px as usize) * 4;
                pixels[index..index + 4].copy_from_slice(&[r, g, b, alpha]);
            }
        }
    }
}

/// Extract the 3-bit alpha code for a texel from the two packed words.
///
/// Texel 5 straddles the word boundary: its code is the top bit of the low
/// word combined with the bottom two bits of the high word.
fn alpha_code(lo: u16, hi: u32, texel: u32) -> u32 {
    let bit = 3 * texel;
    match bit {
        0..=12 => ((lo >> bit) & 0x7) as u32,
        15 => ((lo >> 15) as u32) | ((hi << 1) & 0x6),
        _ => (hi >> (bit - 16)) & 0x7,
    }
}

/// Reconstruct an alpha value from a 3-bit code and the block endpoints.
///
/// `alpha_0 > alpha_1` selects the 7-step gradient; otherwise the 5-step
/// gradient where codes 6 and 7 are fixed at fully transparent and fully
/// opaque. Division truncates to match the format's reference decoder.
fn interpolate_alpha(alpha_0: u8, alpha_1: u8, code: u32) -> u8 {
    let a0 = alpha_0 as u32;
    let a1 = alpha_1 as u32;

    match code {
        0 => alpha_0,
        1 => alpha_1,
        _ if alpha_0 > alpha_1 => (((8 - code) * a0 + (code - 1) * a1) / 7) as u8,
        6 => 0,
        7 => 255,
        _ => (((6 - code) * a0 + (code - 1) * a1) / 5) as u8,
    }
}

/// Expand an RGB565 colour endpoint to 8-bit channels.
///
/// Uses the `(t / d + t) / d` bias form so the result matches the format's
/// reference decoder bit-for-bit.
fn expand_565(colour: u16) -> [u8; 3] {
    let t = (colour >> 11) as u32 * 255 + 16;
    let r = ((t / 32 + t) / 32) as u8;
    let t = ((colour >> 5) & 0x3F) as u32 * 255 + 32;
    let g = ((t / 64 + t) / 64) as u8;
    let t = (colour & 0x1F) as u32 * 255 + 16;
    let b = ((t / 32 + t) / 32) as u8;
    [r, g, b]
}

/// Two-thirds/one-third blend of two endpoint channels, truncating.
fn blend(near: u8, far: u8) -> u8 {
    ((2 * near as u32 + far as u32) / 3) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED_565: [u8; 2] = [0x00, 0xF8];
    const BLUE_565: [u8; 2] = [0x1F, 0x00];

    /// Build a block with the given alpha endpoints, one repeated 3-bit
    /// alpha code, the red/blue endpoints and a colour code word.
    fn block(alpha_0: u8, alpha_1: u8, alpha_code: u8, colour_codes: u32) -> [u8; BLOCK_SIZE] {
        let mut packed = 0u64;
        for texel in 0..16 {
            packed |= (alpha_code as u64 & 0x7) << (3 * texel);
        }
        let idx = packed.to_le_bytes();

        let mut block = [0u8; BLOCK_SIZE];
        block[0] = alpha_0;
        block[1] = alpha_1;
        block[2..8].copy_from_slice(&idx[..6]);
        block[8..10].copy_from_slice(&RED_565);
        block[10..12].copy_from_slice(&BLUE_565);
        block[12..16].copy_from_slice(&colour_codes.to_le_bytes());
        block
    }

    #[test]
    fn test_expand_565_extremes() {
        assert_eq!(expand_565(0x0000), [0, 0, 0]);
        assert_eq!(expand_565(0xFFFF), [255, 255, 255]);
        assert_eq!(expand_565(0xF800), [255, 0, 0]);
        assert_eq!(expand_565(0x07E0), [0, 255, 0]);
        assert_eq!(expand_565(0x001F), [0, 0, 255]);
    }

    #[test]
    fn test_expand_565_bias() {
        // 5-bit value 16: t = 16*255+16 = 4096, (4096/32 + 4096)/32 = 132.
        assert_eq!(expand_565(16 << 11), [132, 0, 0]);
        // 6-bit value 32: t = 32*255+32 = 8192, (8192/64 + 8192)/64 = 130.
        assert_eq!(expand_565(32 << 5), [0, 130, 0]);
    }

    #[test]
    fn test_seven_step_alpha() {
        // alpha_0 > alpha_1 selects the 7-step gradient.
        assert_eq!(interpolate_alpha(255, 0, 0), 255);
        assert_eq!(interpolate_alpha(255, 0, 1), 0);
        assert_eq!(interpolate_alpha(255, 0, 2), 218);
        assert_eq!(interpolate_alpha(255, 0, 7), 36);
        assert_eq!(interpolate_alpha(224, 64, 3), 178);
    }

    #[test]
    fn test_five_step_alpha_sentinels() {
        // alpha_0 <= alpha_1 selects the 5-step gradient with fixed codes
        // 6 and 7.
        assert_eq!(interpolate_alpha(0, 255, 6), 0);
        assert_eq!(interpolate_alpha(0, 255, 7), 255);
        assert_eq!(interpolate_alpha(0, 255, 2), 51);
        assert_eq!(interpolate_alpha(100, 200, 3), 140);
    }

    #[test]
    fn test_single_block_decode() {
        // All texels: colour code 0 (red endpoint), alpha code 2 through the
        // 7-step table: ((8-2)*255 + (2-1)*0) / 7 = 218.
        let payload = block(255, 0, 2, 0);
        let mut pixels = vec![0u8; 4 * 4 * 4];
        decode_into(&payload, 4, 4, &mut pixels).unwrap();

        for texel in pixels.chunks_exact(4) {
            assert_eq!(texel, [255, 0, 0, 218]);
        }
    }

    #[test]
    fn test_colour_code_selection() {
        // Texels 0..4 use colour codes 0, 1, 2, 3 in turn.
        let payload = block(255, 0, 0, 0b11_10_01_00);
        let mut pixels = vec![0u8; 4 * 4 * 4];
        decode_into(&payload, 4, 4, &mut pixels).unwrap();

        assert_eq!(&pixels[0..4], [255, 0, 0, 255]);
        assert_eq!(&pixels[4..8], [0, 0, 255, 255]);
        assert_eq!(&pixels[8..12], [170, 0, 85, 255]);
        assert_eq!(&pixels[12..16], [85, 0, 170, 255]);
    }

    #[test]
    fn test_boundary_straddling_alpha_code() {
        // Texel 5's code spans the low and high index words; give it a
        // distinct code and leave the rest at zero.
        let mut payload = block(255, 0, 0, 0);
        let mut packed = 0u64;
        packed |= 0x7 << (3 * 5);
        payload[2..8].copy_from_slice(&packed.to_le_bytes()[..6]);

        let mut pixels = vec![0u8; 4 * 4 * 4];
        decode_into(&payload, 4, 4, &mut pixels).unwrap();

        // Code 7 in the 7-step table: ((8-7)*255 + 6*0) / 7 = 36.
        assert_eq!(pixels[5 * 4 + 3], 36);
        assert_eq!(pixels[4 * 4 + 3], 255);
        assert_eq!(pixels[6 * 4 + 3], 255);
    }

    #[test]
    fn test_partial_block_clipping() {
        // A 5x3 image needs a 2x1 block grid; texels past either extent are
        // clipped against their own axis, so the right column of the second
        // block and the bottom row of both blocks are dropped.
        let payload: Vec<u8> = [block(255, 0, 0, 0), block(255, 0, 0, 0x5555_5555)].concat();
        let mut pixels = vec![0u8; 5 * 3 * 4];
        decode_into(&payload, 5, 3, &mut pixels).unwrap();

        // (3, 2) comes from the first block, (4, 2) from the second.
        assert_eq!(&pixels[(2 * 5 + 3) * 4..(2 * 5 + 4) * 4], [255, 0, 0, 255]);
        assert_eq!(&pixels[(2 * 5 + 4) * 4..(2 * 5 + 5) * 4], [0, 0, 255, 255]);
    }

    #[test]
    fn test_truncated_payload() {
        let payload = [0u8; BLOCK_SIZE];
        let mut pixels = vec![0u8; 8 * 4 * 4];

        let err = decode_into(&payload, 8, 4, &mut pixels).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedPayload {
                expected: 32,
                actual: 16
            }
        ));
    }

    #[test]
    fn test_block_count() {
        assert_eq!(block_count(1), 1);
        assert_eq!(block_count(4), 1);
        assert_eq!(block_count(5), 2);
        assert_eq!(block_count(1024), 256);
    }
}
