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

/// Side of the square luma block an encoder consumes at once.
pub const MACROBLOCK_SIZE: usize = 16;

/// Side of the subsampled chroma block inside one macroblock.
pub(crate) const CHROMA_BLOCK_SIZE: usize = MACROBLOCK_SIZE / 2;

/// Marker written between two consecutive macroblocks in the output stream.
pub const MACROBLOCK_SEPARATOR: [u8; 2] = [0x0D, 0x00];

/// Rounds a dimension up to the nearest multiple of [`MACROBLOCK_SIZE`].
///
/// A zero dimension rounds up to one full macroblock.
#[inline]
pub const fn round_up(v: u32) -> u32 {
    if v == 0 {
        return MACROBLOCK_SIZE as u32;
    }
    let rem = v % MACROBLOCK_SIZE as u32;
    if rem == 0 {
        v
    } else {
        v + MACROBLOCK_SIZE as u32 - rem
    }
}

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
/// Storage order of a byte plane.
///
/// Planar sources keep the column-major order of the host array layout,
/// native rasters are row-major already.
pub enum PlaneOrder {
    RowMajor = 0,
    ColumnMajor = 1,
}

impl From<u8> for PlaneOrder {
    #[inline(always)]
    fn from(value: u8) -> Self {
        match value {
            0 => PlaneOrder::RowMajor,
            1 => PlaneOrder::ColumnMajor,
            _ => {
                unimplemented!("Unknown plane order")
            }
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub(crate) struct CbCrForwardTransform {
    pub yr: f64,
    pub yg: f64,
    pub yb: f64,
    pub cb_r: f64,
    pub cb_g: f64,
    pub cb_b: f64,
    pub cr_r: f64,
    pub cr_g: f64,
    pub cr_b: f64,
    pub bias_y: f64,
    pub bias_uv: f64,
}

impl CbCrForwardTransform {
    /// Divides every matrix coefficient for sources whose channels are not
    /// pre-normalized to [0, 1]. Biases are added after the matrix and are
    /// left untouched.
    pub(crate) const fn rescale(&self, divisor: f64) -> CbCrForwardTransform {
        CbCrForwardTransform {
            yr: self.yr / divisor,
            yg: self.yg / divisor,
            yb: self.yb / divisor,
            cb_r: self.cb_r / divisor,
            cb_g: self.cb_g / divisor,
            cb_b: self.cb_b / divisor,
            cr_r: self.cr_r / divisor,
            cr_g: self.cr_g / divisor,
            cr_b: self.cr_b / divisor,
            bias_y: self.bias_y,
            bias_uv: self.bias_uv,
        }
    }
}

/// Studio-range BT.601 forward matrix for RGB channels in [0, 1].
pub(crate) const FORWARD_TRANSFORM: CbCrForwardTransform = CbCrForwardTransform {
    yr: 65.738,
    yg: 129.057,
    yb: 25.064,
    cb_r: -37.945,
    cb_g: -74.494,
    cb_b: 112.439,
    cr_r: 112.439,
    cr_g: -94.154,
    cr_b: -18.285,
    bias_y: 16.,
    bias_uv: 128.,
};

/// The same matrix pre-scaled for packed 8-bit channels.
pub(crate) const FORWARD_TRANSFORM_8BIT: CbCrForwardTransform = FORWARD_TRANSFORM.rescale(255.);
