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
use crate::mb_error::MismatchedDimensions;
use crate::mb_support::round_up;
use crate::{MbError, NativeImage, NativeImageMut, PlanarImage, PlanarImageMut};
use std::fmt::Debug;

#[derive(Debug)]
/// Where a pad operation should write its canvas.
pub enum PlanarDestination<'a, T: Copy + Debug> {
    /// Allocate a new canvas with the target dimensions.
    Fresh,
    /// Reuse a caller provided canvas. Must already have the target
    /// dimensions, see [`PlanarDestination::reuse`].
    Reuse(PlanarImageMut<'a, T>),
}

impl<'a, T: Copy + Debug> PlanarDestination<'a, T> {
    /// Wraps a caller provided canvas after checking it against the padded
    /// dimensions of `source`.
    pub fn reuse(
        buffer: PlanarImageMut<'a, T>,
        source: &PlanarImage<T>,
    ) -> Result<Self, MbError> {
        check_planar_target(&buffer, source)?;
        Ok(PlanarDestination::Reuse(buffer))
    }
}

#[derive(Debug)]
/// Where a native pad operation should write its canvas.
pub enum NativeDestination<'a> {
    Fresh,
    /// Reuse a caller provided raster. Must already have the target
    /// dimensions, see [`NativeDestination::reuse`].
    Reuse(NativeImageMut<'a>),
}

impl<'a> NativeDestination<'a> {
    /// Wraps a caller provided raster after checking it against the padded
    /// dimensions of `source`.
    pub fn reuse(buffer: NativeImageMut<'a>, source: &NativeImage) -> Result<Self, MbError> {
        check_native_target(&buffer, source)?;
        Ok(NativeDestination::Reuse(buffer))
    }
}

#[derive(Debug)]
/// Result of a planar pad operation.
pub enum PaddedPlanar<'a, T: Copy + Debug> {
    /// The source was already macroblock aligned and is handed back as-is.
    /// No allocation or fill happened, the data is shared with the source.
    Source(PlanarImage<'a, T>),
    /// A freshly allocated or reused canvas holding the padded image.
    Padded(PlanarImageMut<'a, T>),
}

impl<'a, T: Default + Clone + Copy + Debug> PaddedPlanar<'a, T> {
    pub fn to_fixed(&'a self) -> PlanarImage<'a, T> {
        match self {
            PaddedPlanar::Source(image) => image.clone(),
            PaddedPlanar::Padded(canvas) => canvas.to_fixed(),
        }
    }
}

#[derive(Debug)]
/// Result of a native pad operation.
pub enum PaddedNative<'a> {
    /// The source was already macroblock aligned and is handed back as-is.
    Source(NativeImage<'a>),
    /// A freshly allocated or reused raster holding the padded image.
    Padded(NativeImageMut<'a>),
}

impl<'a> PaddedNative<'a> {
    pub fn to_fixed(&'a self) -> NativeImage<'a> {
        match self {
            PaddedNative::Source(image) => image.clone(),
            PaddedNative::Padded(canvas) => canvas.to_fixed(),
        }
    }
}

fn check_planar_target<T: Copy + Debug>(
    buffer: &PlanarImageMut<T>,
    source: &PlanarImage<T>,
) -> Result<(), MbError> {
    let target_height = round_up(source.height);
    let target_width = round_up(source.width);
    if buffer.height != target_height
        || buffer.width != target_width
        || buffer.planes != source.planes
    {
        return Err(MbError::DestinationDimensionsMismatch(
            MismatchedDimensions {
                expected: (target_height, target_width),
                received: (buffer.height, buffer.width),
            },
        ));
    }
    buffer.check_constraints()
}

fn check_native_target(buffer: &NativeImageMut, source: &NativeImage) -> Result<(), MbError> {
    let target_height = round_up(source.height);
    let target_width = round_up(source.width);
    if buffer.height != target_height || buffer.width != target_width {
        return Err(MbError::DestinationDimensionsMismatch(
            MismatchedDimensions {
                expected: (target_height, target_width),
                received: (buffer.height, buffer.width),
            },
        ));
    }
    buffer.check_constraints()
}

/// Pads a planar image so that its height and width are multiples of the
/// macroblock size.
///
/// The source is placed inside the padded canvas at the offset selected by
/// the justification pair and every border sample takes the per-plane fill
/// value. Planes beyond the third are filled with `T::default()`.
///
/// # Arguments
///
/// * `image` - The source planar image.
/// * `h_just` - Horizontal placement in [0, 1]: 0 = left, 1 = right. Clamped.
/// * `v_just` - Vertical placement in [0, 1]: 0 = top, 1 = bottom. Clamped.
/// * `fill` - Border value for the first three planes.
/// * `destination` - Fresh allocation or a reused caller canvas.
///
/// If the source is already aligned it is handed back unchanged as
/// [`PaddedPlanar::Source`]: no allocation is made and no fill is applied,
/// so callers must not assume the result is a fresh buffer.
pub fn pad_planar<'a, T>(
    image: &PlanarImage<'a, T>,
    h_just: f64,
    v_just: f64,
    fill: [T; 3],
    destination: PlanarDestination<'a, T>,
) -> Result<PaddedPlanar<'a, T>, MbError>
where
    T: Default + Clone + Copy + Debug,
{
    image.check_constraints()?;

    let h_just = h_just.clamp(0., 1.);
    let v_just = v_just.clamp(0., 1.);

    let target_height = round_up(image.height);
    let target_width = round_up(image.width);

    if image.height == target_height && image.width == target_width {
        return Ok(PaddedPlanar::Source(image.clone()));
    }

    let mut canvas = match destination {
        PlanarDestination::Fresh => PlanarImageMut::alloc(target_height, target_width, image.planes),
        PlanarDestination::Reuse(buffer) => {
            check_planar_target(&buffer, image)?;
            buffer
        }
    };

    let h_src = image.height as usize;
    let w_src = image.width as usize;
    let h_dst = target_height as usize;
    let w_dst = target_width as usize;
    let plane_size = h_dst * w_dst;

    let canvas_data = canvas.data.as_mut();

    // Stale content of a reused canvas is always overwritten.
    for plane in 0..image.planes as usize {
        let value = if plane < 3 { fill[plane] } else { T::default() };
        canvas_data[plane * plane_size..(plane + 1) * plane_size].fill(value);
    }

    let row_offset = (v_just * (h_dst - h_src) as f64).floor() as usize;
    let col_offset = (h_just * (w_dst - w_src) as f64).floor() as usize;

    // Column-major planes: the contiguous run is a full source column.
    for plane in 0..image.planes as usize {
        let src_plane = image.plane(plane);
        let dst_plane = &mut canvas_data[plane * plane_size..(plane + 1) * plane_size];
        for col in 0..w_src {
            let src_run = &src_plane[col * h_src..(col + 1) * h_src];
            let dst_start = (col_offset + col) * h_dst + row_offset;
            dst_plane[dst_start..dst_start + h_src].copy_from_slice(src_run);
        }
    }

    Ok(PaddedPlanar::Padded(canvas))
}

/// Pads a native pixel raster so that its height and width are multiples of
/// the macroblock size.
///
/// Same contract as [`pad_planar`] with a single packed fill pixel applied
/// to every border position.
pub fn pad_native<'a>(
    image: &NativeImage<'a>,
    h_just: f64,
    v_just: f64,
    fill: u32,
    destination: NativeDestination<'a>,
) -> Result<PaddedNative<'a>, MbError> {
    image.check_constraints()?;

    let h_just = h_just.clamp(0., 1.);
    let v_just = v_just.clamp(0., 1.);

    let target_height = round_up(image.height);
    let target_width = round_up(image.width);

    if image.height == target_height && image.width == target_width {
        return Ok(PaddedNative::Source(image.clone()));
    }

    let mut canvas = match destination {
        NativeDestination::Fresh => NativeImageMut::alloc(target_height, target_width),
        NativeDestination::Reuse(buffer) => {
            check_native_target(&buffer, image)?;
            buffer
        }
    };

    let h_src = image.height as usize;
    let w_src = image.width as usize;
    let h_dst = target_height as usize;
    let w_dst = target_width as usize;

    let canvas_data = canvas.data.as_mut();
    canvas_data.fill(fill);

    let row_offset = (v_just * (h_dst - h_src) as f64).floor() as usize;
    let col_offset = (h_just * (w_dst - w_src) as f64).floor() as usize;

    // Row-major raster: the contiguous run is a full source row.
    for row in 0..h_src {
        let src_run = &image.data[row * w_src..(row + 1) * w_src];
        let dst_start = (row_offset + row) * w_dst + col_offset;
        canvas_data[dst_start..dst_start + w_src].copy_from_slice(src_run);
    }

    Ok(PaddedNative::Padded(canvas))
}
