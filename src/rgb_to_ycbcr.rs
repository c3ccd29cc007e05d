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
use crate::mb_error::{check_macroblock_alignment, MismatchedSize};
use crate::mb_support::{FORWARD_TRANSFORM, FORWARD_TRANSFORM_8BIT};
use crate::{MbError, NativeImage, PlanarImage, PlaneOrder};
use num_traits::AsPrimitive;
use std::fmt::Debug;

#[derive(Debug, Clone)]
/// Byte planes produced by a forward color conversion.
///
/// Y has the source resolution, Cb and Cr are half resolution in both
/// dimensions (4:2:0). The storage order follows the source convention and
/// is recorded in `order`.
pub struct YCbCrPlanes {
    pub y: Vec<u8>,
    pub cb: Vec<u8>,
    pub cr: Vec<u8>,
    pub height: u32,
    pub width: u32,
    pub order: PlaneOrder,
}

impl YCbCrPlanes {
    pub fn check_constraints(&self) -> Result<(), MbError> {
        check_macroblock_alignment(self.height, self.width)?;
        let luma_size = self.height as usize * self.width as usize;
        if self.y.len() != luma_size {
            return Err(MbError::SourceSizeMismatch(MismatchedSize {
                expected: luma_size,
                received: self.y.len(),
            }));
        }
        let chroma_size = (self.height as usize / 2) * (self.width as usize / 2);
        if self.cb.len() != chroma_size {
            return Err(MbError::SourceSizeMismatch(MismatchedSize {
                expected: chroma_size,
                received: self.cb.len(),
            }));
        }
        if self.cr.len() != chroma_size {
            return Err(MbError::SourceSizeMismatch(MismatchedSize {
                expected: chroma_size,
                received: self.cr.len(),
            }));
        }
        Ok(())
    }
}

/// Converts a macroblock aligned planar RGB image to YCbCr 4:2:0 planes.
///
/// The transform is the fixed studio-range matrix applied to channel values
/// in [0, 1] with the result truncated toward zero. Chroma takes the
/// top-left sample of every 2x2 luma group; no averaging is performed so
/// the output stays bit-compatible with decoders expecting point-sampled
/// chroma.
///
/// # Arguments
///
/// * `image` - Source image, dimensions must be multiples of 16.
pub fn planar_to_ycbcr<T>(image: &PlanarImage<T>) -> Result<YCbCrPlanes, MbError>
where
    T: AsPrimitive<f64> + Copy + Debug,
{
    image.check_constraints()?;
    check_macroblock_alignment(image.height, image.width)?;

    let height = image.height as usize;
    let width = image.width as usize;
    let t = FORWARD_TRANSFORM;

    let r_plane = image.plane(0);
    let g_plane = image.plane(1);
    let b_plane = image.plane(2);

    let mut y = Vec::with_capacity(height * width);
    for i in 0..height * width {
        let r = r_plane[i].as_();
        let g = g_plane[i].as_();
        let b = b_plane[i].as_();
        y.push((t.yr * r + t.yg * g + t.yb * b + t.bias_y) as u8);
    }

    let chroma_size = (height / 2) * (width / 2);
    let mut cb = Vec::with_capacity(chroma_size);
    let mut cr = Vec::with_capacity(chroma_size);

    // Column-outer walk keeps the chroma planes column-major like the luma.
    for col in (0..width).step_by(2) {
        for row in (0..height).step_by(2) {
            let i = col * height + row;
            let r = r_plane[i].as_();
            let g = g_plane[i].as_();
            let b = b_plane[i].as_();
            cb.push((t.cb_r * r + t.cb_g * g + t.cb_b * b + t.bias_uv) as u8);
            cr.push((t.cr_r * r + t.cr_g * g + t.cr_b * b + t.bias_uv) as u8);
        }
    }

    Ok(YCbCrPlanes {
        y,
        cb,
        cr,
        height: image.height,
        width: image.width,
        order: PlaneOrder::ColumnMajor,
    })
}

/// Converts a macroblock aligned native pixel raster to YCbCr 4:2:0 planes.
///
/// Same transform as [`planar_to_ycbcr`] with the matrix pre-scaled for
/// packed 8-bit channels. The produced planes are row-major since the
/// raster already is.
pub fn native_to_ycbcr(image: &NativeImage) -> Result<YCbCrPlanes, MbError> {
    image.check_constraints()?;
    check_macroblock_alignment(image.height, image.width)?;

    let height = image.height as usize;
    let width = image.width as usize;
    let t = FORWARD_TRANSFORM_8BIT;

    let mut y = Vec::with_capacity(height * width);
    for px in image.data.iter() {
        let [r, g, b, _] = px.to_le_bytes();
        let (r, g, b) = (r as f64, g as f64, b as f64);
        y.push((t.yr * r + t.yg * g + t.yb * b + t.bias_y) as u8);
    }

    let chroma_size = (height / 2) * (width / 2);
    let mut cb = Vec::with_capacity(chroma_size);
    let mut cr = Vec::with_capacity(chroma_size);

    for row in (0..height).step_by(2) {
        for col in (0..width).step_by(2) {
            let [r, g, b, _] = image.data[row * width + col].to_le_bytes();
            let (r, g, b) = (r as f64, g as f64, b as f64);
            cb.push((t.cb_r * r + t.cb_g * g + t.cb_b * b + t.bias_uv) as u8);
            cr.push((t.cr_r * r + t.cr_g * g + t.cr_b * b + t.bias_uv) as u8);
        }
    }

    Ok(YCbCrPlanes {
        y,
        cb,
        cr,
        height: image.height,
        width: image.width,
        order: PlaneOrder::RowMajor,
    })
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

    fn native_pixel(r: u8, g: u8, b: u8) -> u32 {
        u32::from_le_bytes([r, g, b, 255])
    }

    #[test]
    fn test_planar_black_point() {
        let data = solid_planar(16, 16, [0., 0., 0.]);
        let image = PlanarImage {
            data: &data,
            height: 16,
            width: 16,
            planes: 3,
        };
        let planes = planar_to_ycbcr(&image).unwrap();
        assert_eq!(planes.y.len(), 256);
        assert_eq!(planes.cb.len(), 64);
        assert_eq!(planes.cr.len(), 64);
        assert_eq!(planes.order, PlaneOrder::ColumnMajor);
        assert!(planes.y.iter().all(|&v| v == 16));
        assert!(planes.cb.iter().all(|&v| v == 128));
        assert!(planes.cr.iter().all(|&v| v == 128));
    }

    #[test]
    fn test_planar_white_point_truncates() {
        let data = solid_planar(16, 16, [1., 1., 1.]);
        let image = PlanarImage {
            data: &data,
            height: 16,
            width: 16,
            planes: 3,
        };
        let planes = planar_to_ycbcr(&image).unwrap();
        // 65.738 + 129.057 + 25.064 + 16 = 235.859, truncated not rounded
        assert!(planes.y.iter().all(|&v| v == 235));
        assert!(planes.cb.iter().all(|&v| v == 128));
        assert!(planes.cr.iter().all(|&v| v == 128));
    }

    #[test]
    fn test_native_black_and_white_points() {
        let black = vec![native_pixel(0, 0, 0); 16 * 16];
        let image = NativeImage {
            data: &black,
            height: 16,
            width: 16,
        };
        let planes = native_to_ycbcr(&image).unwrap();
        assert_eq!(planes.order, PlaneOrder::RowMajor);
        assert!(planes.y.iter().all(|&v| v == 16));
        assert!(planes.cb.iter().all(|&v| v == 128));
        assert!(planes.cr.iter().all(|&v| v == 128));

        let white = vec![native_pixel(255, 255, 255); 16 * 16];
        let image = NativeImage {
            data: &white,
            height: 16,
            width: 16,
        };
        let planes = native_to_ycbcr(&image).unwrap();
        assert!(planes.y.iter().all(|&v| v == 235));
        assert!(planes.cb.iter().all(|&v| v == 128));
        assert!(planes.cr.iter().all(|&v| v == 128));
    }

    #[test]
    fn test_native_primaries() {
        let red = vec![native_pixel(255, 0, 0); 16 * 16];
        let image = NativeImage {
            data: &red,
            height: 16,
            width: 16,
        };
        let planes = native_to_ycbcr(&image).unwrap();
        // Y = 65.738 + 16, Cb = -37.945 + 128, Cr = 112.439 + 128
        assert_eq!(planes.y[0], 81);
        assert_eq!(planes.cb[0], 90);
        assert_eq!(planes.cr[0], 240);

        let blue = vec![native_pixel(0, 0, 255); 16 * 16];
        let image = NativeImage {
            data: &blue,
            height: 16,
            width: 16,
        };
        let planes = native_to_ycbcr(&image).unwrap();
        assert_eq!(planes.y[0], 41);
        assert_eq!(planes.cb[0], 240);
        assert_eq!(planes.cr[0], 109);
    }

    #[test]
    fn test_chroma_is_point_sampled_not_averaged() {
        // Top-left of each 2x2 group is blue, the rest is red. Averaging
        // would pull chroma toward the middle; point sampling keeps pure
        // blue chroma everywhere.
        let mut data = vec![native_pixel(255, 0, 0); 16 * 16];
        for row in (0..16).step_by(2) {
            for col in (0..16).step_by(2) {
                data[row * 16 + col] = native_pixel(0, 0, 255);
            }
        }
        let image = NativeImage {
            data: &data,
            height: 16,
            width: 16,
        };
        let planes = native_to_ycbcr(&image).unwrap();
        assert!(planes.cb.iter().all(|&v| v == 240));
        assert!(planes.cr.iter().all(|&v| v == 109));
    }

    #[test]
    fn test_planar_chroma_plane_is_column_major() {
        // Single blue pixel at (row 0, col 2); its chroma sample lands at
        // chroma (0, 1), which is index 8 in a column-major 8x8 plane.
        let mut data = solid_planar(16, 16, [0., 0., 0.]);
        let plane_size = 16 * 16;
        data[2 * plane_size + 2 * 16] = 1.; // blue plane, col 2, row 0
        let image = PlanarImage {
            data: &data,
            height: 16,
            width: 16,
            planes: 3,
        };
        let planes = planar_to_ycbcr(&image).unwrap();
        assert_eq!(planes.cb[8], 240);
        assert_eq!(planes.cr[8], 109);
        assert_eq!(planes.cb[0], 128);
    }

    #[test]
    fn test_unaligned_dimensions_are_rejected() {
        let data = vec![0f64; 15 * 16 * 3];
        let image = PlanarImage {
            data: &data,
            height: 15,
            width: 16,
            planes: 3,
        };
        assert!(matches!(
            planar_to_ycbcr(&image),
            Err(MbError::UnalignedDimensions {
                height: 15,
                width: 16
            })
        ));

        let data = vec![0u32; 16 * 24];
        let image = NativeImage {
            data: &data,
            height: 16,
            width: 24,
        };
        assert!(matches!(
            native_to_ycbcr(&image),
            Err(MbError::UnalignedDimensions { .. })
        ));
    }
}
