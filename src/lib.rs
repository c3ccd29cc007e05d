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
//! Prepares raster pixel data for a raw video encoder input stage.
//!
//! The pipeline pads a pixel buffer so its dimensions are multiples of the
//! macroblock size, converts RGB to studio-range YCbCr with 4:2:0 chroma
//! subsampling, and repacks the planes into a block-major byte stream with
//! a 2-byte marker between consecutive macroblocks.
//!
//! Two source conventions are supported and never mixed: planar
//! floating-point buffers (plane-major, column-major within a plane,
//! channels in [0, 1]) and native pixel rasters (row-major packed RGBA,
//! 8 bits per channel). All operations are synchronous stateless
//! transforms over caller-owned buffers.
#![forbid(unsafe_code)]

mod images;
mod mb_error;
mod mb_support;
mod pad_to_size;
mod rgb_to_ycbcr;
mod to_macroblocks;

pub use images::{BufferStoreMut, NativeImage, NativeImageMut, PlanarImage, PlanarImageMut};
pub use mb_error::{MbError, MismatchedDimensions, MismatchedSize};
pub use mb_support::{round_up, PlaneOrder, MACROBLOCK_SEPARATOR, MACROBLOCK_SIZE};
pub use pad_to_size::{
    pad_native, pad_planar, NativeDestination, PaddedNative, PaddedPlanar, PlanarDestination,
};
pub use rgb_to_ycbcr::{native_to_ycbcr, planar_to_ycbcr, YCbCrPlanes};
pub use to_macroblocks::{
    macroblock_stream_length, native_to_macroblocks, planar_to_macroblocks, ycbcr_to_macroblocks,
};
