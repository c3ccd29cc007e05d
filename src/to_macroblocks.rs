/*
 * Copyright (c) Radzivon Bartoshyk, 3/2025. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without modification,
 * are permitted provided that the following conditions are met:
 *
 * 1.  Redistributions of source code must retain the above copyright notice, this
 * list of conditions and the following disclaimer.
 *
 * 2.  Redistributions in binary form must reproduce the above copyright notice,
 * this list of conditions and the following disclaimer in the documentation
 * and/or other materials provided with the distribution.
 *
 * 3.  Neither the name of the copyright holder nor the names of its
 * contributors may be used to endorse or promote products derived from
 * this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use crate::mb_error::{check_macroblock_alignment, check_overflow_v2, MismatchedSize};
use crate::mb_support::{CHROMA_BLOCK_SIZE, MACROBLOCK_SEPARATOR, MACROBLOCK_SIZE};
use crate::rgb_to_ycbcr::{native_to_ycbcr, planar_to_ycbcr, YCbCrPlanes};
use crate::{MbError, NativeImage, PlanarImage, PlaneOrder};
use num_traits::AsPrimitive;
use std::fmt::Debug;

/// Exact byte length of the macroblock stream for the given macroblock
/// aligned dimensions: full-resolution luma, two half-resolution chroma
/// planes, and one 2-byte separator between every pair of consecutive
/// blocks.
pub fn macroblock_stream_length(height: u32, width: u32) -> Result<usize, MbError> {
    if height == 0 || width == 0 {
        return Err(MbError::ZeroBaseSize);
    }
    check_macroblock_alignment(height, width)?;
    check_overflow_v2(height as usize, width as usize)?;
    let h = height as usize;
    let w = width as usize;
    let n_blocks = (h / MACROBLOCK_SIZE) * (w / MACROBLOCK_SIZE);
    Ok(h * w + 2 * (h / 2) * (w / 2) + 2 * (n_blocks - 1))
}

#[inline(always)]
fn copy_block<const ORDER: u8>(
    plane: &[u8],
    mb_row: usize,
    mb_col: usize,
    block: usize,
    plane_height: usize,
    plane_width: usize,
    output: &mut [u8],
    offset: &mut usize,
) {
    let order: PlaneOrder = ORDER.into();
    for row in 0..block {
        let plane_row = mb_row * block + row;
        match order {
            PlaneOrder::RowMajor => {
                let start = plane_row * plane_width + mb_col * block;
                output[*offset..*offset + block].copy_from_slice(&plane[start..start + block]);
            }
            PlaneOrder::ColumnMajor => {
                // Translate block-local row-major positions into the
                // column-major plane.
                for col in 0..block {
                    let plane_col = mb_col * block + col;
                    output[*offset + col] = plane[plane_col * plane_height + plane_row];
                }
            }
        }
        *offset += block;
    }
}

fn pack_blocks<const ORDER: u8>(planes: &YCbCrPlanes, output: &mut [u8]) {
    let height = planes.height as usize;
    let width = planes.width as usize;
    let blocks_high = height / MACROBLOCK_SIZE;
    let blocks_wide = width / MACROBLOCK_SIZE;
    let n_blocks = blocks_high * blocks_wide;
    let chroma_height = height / 2;
    let chroma_width = width / 2;

    let mut offset = 0usize;
    let mut block_index = 0usize;
    for mb_row in 0..blocks_high {
        for mb_col in 0..blocks_wide {
            copy_block::<ORDER>(
                &planes.y,
                mb_row,
                mb_col,
                MACROBLOCK_SIZE,
                height,
                width,
                output,
                &mut offset,
            );
            copy_block::<ORDER>(
                &planes.cb,
                mb_row,
                mb_col,
                CHROMA_BLOCK_SIZE,
                chroma_height,
                chroma_width,
                output,
                &mut offset,
            );
            copy_block::<ORDER>(
                &planes.cr,
                mb_row,
                mb_col,
                CHROMA_BLOCK_SIZE,
                chroma_height,
                chroma_width,
                output,
                &mut offset,
            );
            block_index += 1;
            if block_index < n_blocks {
                output[offset..offset + 2].copy_from_slice(&MACROBLOCK_SEPARATOR);
                offset += 2;
            }
        }
    }
}

/// Repacks YCbCr planes into the macroblock byte stream.
///
/// Blocks are visited in row-major block order. Each block contributes the
/// 16x16 luma sub-block, the 8x8 Cb sub-block and the 8x8 Cr sub-block;
/// every block except the last is followed by [`MACROBLOCK_SEPARATOR`].
/// The output buffer length must match [`macroblock_stream_length`]
/// exactly; nothing is written otherwise.
pub fn ycbcr_to_macroblocks(planes: &YCbCrPlanes, output: &mut [u8]) -> Result<(), MbError> {
    planes.check_constraints()?;
    let expected = macroblock_stream_length(planes.height, planes.width)?;
    if output.len() != expected {
        return Err(MbError::DestinationSizeMismatch(MismatchedSize {
            expected,
            received: output.len(),
        }));
    }
    match planes.order {
        PlaneOrder::RowMajor => {
            pack_blocks::<{ PlaneOrder::RowMajor as u8 }>(planes, output);
        }
        PlaneOrder::ColumnMajor => {
            pack_blocks::<{ PlaneOrder::ColumnMajor as u8 }>(planes, output);
        }
    }
    Ok(())
}

/// Converts a macroblock aligned planar RGB image straight to the
/// macroblock byte stream.
///
/// # Arguments
///
/// * `image` - Source image, dimensions must be multiples of 16.
/// * `output` - Caller allocated buffer of exactly
///   [`macroblock_stream_length`] bytes, written in place.
pub fn planar_to_macroblocks<T>(image: &PlanarImage<T>, output: &mut [u8]) -> Result<(), MbError>
where
    T: AsPrimitive<f64> + Copy + Debug,
{
    image.check_constraints()?;
    let expected = macroblock_stream_length(image.height, image.width)?;
    if output.len() != expected {
        return Err(MbError::DestinationSizeMismatch(MismatchedSize {
            expected,
            received: output.len(),
        }));
    }
    let planes = planar_to_ycbcr(image)?;
    ycbcr_to_macroblocks(&planes, output)
}

/// Converts a macroblock aligned native pixel raster straight to the
/// macroblock byte stream.
///
/// Same contract as [`planar_to_macroblocks`].
pub fn native_to_macroblocks(image: &NativeImage, output: &mut [u8]) -> Result<(), MbError> {
    image.check_constraints()?;
    let expected = macroblock_stream_length(image.height, image.width)?;
    if output.len() != expected {
        return Err(MbError::DestinationSizeMismatch(MismatchedSize {
            expected,
            received: output.len(),
        }));
    }
    let planes = native_to_ycbcr(image)?;
    ycbcr_to_macroblocks(&planes, output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_planar(height: usize, width: usize, rgb: [f64; 3]) -> Vec<f64> {
        let plane_size = height * width;
        let mut data = vec![0f64; plane_size * 3];
        for (plane, v) in rgb.iter().enumerate() {
            data[plane * plane_size..(plane + 1) * plane_size].fill(*v);
        }
        data
    }

    #[test]
    fn test_stream_length_formula() {
        for (height, width) in [(16u32, 16u32), (16, 32), (32, 32), (48, 64), (160, 240)] {
            let h = height as usize;
            let w = width as usize;
            let blocks = (h / 16) * (w / 16);
            let expected = h * w + 2 * (h / 2) * (w / 2) + 2 * (blocks - 1);
            assert_eq!(macroblock_stream_length(height, width).unwrap(), expected);
        }
        assert!(matches!(
            macroblock_stream_length(15, 16),
            Err(MbError::UnalignedDimensions { .. })
        ));
        assert!(matches!(
            macroblock_stream_length(0, 16),
            Err(MbError::ZeroBaseSize)
        ));
    }

    #[test]
    fn test_output_size_mismatch_fails_before_any_write() {
        let data = solid_planar(16, 16, [0., 0., 0.]);
        let image = PlanarImage {
            data: &data,
            height: 16,
            width: 16,
            planes: 3,
        };
        let mut output = vec![0xAAu8; 385];
        let result = planar_to_macroblocks(&image, &mut output);
        match result {
            Err(MbError::DestinationSizeMismatch(size)) => {
                assert_eq!(size.expected, 384);
                assert_eq!(size.received, 385);
            }
            other => panic!("expected size mismatch, got {:?}", other),
        }
        assert!(output.iter().all(|&v| v == 0xAA));
    }

    #[test]
    fn test_single_block_black_stream() {
        let data = solid_planar(16, 16, [0., 0., 0.]);
        let image = PlanarImage {
            data: &data,
            height: 16,
            width: 16,
            planes: 3,
        };
        let mut output = vec![0u8; macroblock_stream_length(16, 16).unwrap()];
        planar_to_macroblocks(&image, &mut output).unwrap();
        assert_eq!(output.len(), 384);
        assert!(output[..256].iter().all(|&v| v == 16));
        assert!(output[256..320].iter().all(|&v| v == 128));
        assert!(output[320..].iter().all(|&v| v == 128));
    }

    #[test]
    fn test_separator_placement_four_blocks() {
        // Mid gray so that no payload byte collides with the 0x0D marker.
        let gray = u32::from_le_bytes([128, 128, 128, 255]);
        let data = vec![gray; 32 * 32];
        let image = NativeImage {
            data: &data,
            height: 32,
            width: 32,
        };
        let len = macroblock_stream_length(32, 32).unwrap();
        assert_eq!(len, 32 * 32 + 2 * 16 * 16 + 2 * 3);
        let mut output = vec![0u8; len];
        native_to_macroblocks(&image, &mut output).unwrap();

        // Payload per block is 384 bytes, separators land between blocks.
        for sep_at in [384usize, 770, 1156] {
            assert_eq!(output[sep_at], 0x0D);
            assert_eq!(output[sep_at + 1], 0x00);
        }
        assert_eq!(output.iter().filter(|&&v| v == 0x0D).count(), 3);
        // The last block is not followed by a separator.
        assert_eq!(output[len - 1], 128);
        assert_eq!(output[len - 2], 128);
    }

    #[test]
    fn test_column_major_luma_translation() {
        // Column-major ramp; the packed block must come out row-major.
        let planes = YCbCrPlanes {
            y: (0..256).map(|v| v as u8).collect(),
            cb: vec![0u8; 64],
            cr: vec![0u8; 64],
            height: 16,
            width: 16,
            order: PlaneOrder::ColumnMajor,
        };
        let mut output = vec![0u8; 384];
        ycbcr_to_macroblocks(&planes, &mut output).unwrap();
        for row in 0..16usize {
            for col in 0..16usize {
                assert_eq!(output[row * 16 + col], (col * 16 + row) as u8);
            }
        }
    }

    #[test]
    fn test_multi_block_row_major_translation() {
        // Luma value encodes the row; block packing must keep each block's
        // rows from the right part of the plane.
        let mut y = vec![0u8; 32 * 32];
        for row in 0..32usize {
            y[row * 32..(row + 1) * 32].fill(row as u8);
        }
        let planes = YCbCrPlanes {
            y,
            cb: vec![200u8; 16 * 16],
            cr: vec![201u8; 16 * 16],
            height: 32,
            width: 32,
            order: PlaneOrder::RowMajor,
        };
        let mut output = vec![0u8; macroblock_stream_length(32, 32).unwrap()];
        ycbcr_to_macroblocks(&planes, &mut output).unwrap();

        // Block 0 (top-left): rows 0..16.
        for row in 0..16usize {
            assert!(output[row * 16..(row + 1) * 16].iter().all(|&v| v == row as u8));
        }
        // Block 2 is the bottom-left block: luma rows 16..32. It starts
        // after two full blocks and two separators.
        let block2 = 2 * 384 + 2 * 2;
        for row in 0..16usize {
            assert!(output[block2 + row * 16..block2 + (row + 1) * 16]
                .iter()
                .all(|&v| v == (row + 16) as u8));
        }
        // Chroma payloads follow each luma block.
        assert!(output[256..320].iter().all(|&v| v == 200));
        assert!(output[320..384].iter().all(|&v| v == 201));
    }

    #[test]
    fn test_planar_and_native_streams_agree_on_pure_black_white() {
        // A checkerboard of pure black and white converts identically on
        // both numeric paths, so the two layouts must produce the same
        // stream.
        let height = 32usize;
        let width = 48usize;
        let mut planar = vec![0f64; height * width * 3];
        let mut native = vec![0u32; height * width];
        for row in 0..height {
            for col in 0..width {
                let white = (row + col) % 2 == 0;
                if white {
                    for plane in 0..3 {
                        planar[plane * height * width + col * height + row] = 1.;
                    }
                    native[row * width + col] = u32::from_le_bytes([255, 255, 255, 255]);
                } else {
                    native[row * width + col] = u32::from_le_bytes([0, 0, 0, 255]);
                }
            }
        }
        let planar_image = PlanarImage {
            data: &planar,
            height: height as u32,
            width: width as u32,
            planes: 3,
        };
        let native_image = NativeImage {
            data: &native,
            height: height as u32,
            width: width as u32,
        };
        let len = macroblock_stream_length(height as u32, width as u32).unwrap();
        let mut from_planar = vec![0u8; len];
        let mut from_native = vec![0u8; len];
        planar_to_macroblocks(&planar_image, &mut from_planar).unwrap();
        native_to_macroblocks(&native_image, &mut from_native).unwrap();
        assert_eq!(from_planar, from_native);
    }
}
