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
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
pub struct MismatchedSize {
    pub expected: usize,
    pub received: usize,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MismatchedDimensions {
    /// (height, width)
    pub expected: (u32, u32),
    /// (height, width)
    pub received: (u32, u32),
}

#[derive(Debug)]
pub enum MbError {
    ZeroBaseSize,
    PointerOverflow,
    NotEnoughPlanes(usize),
    SourceSizeMismatch(MismatchedSize),
    UnalignedDimensions { height: u32, width: u32 },
    DestinationDimensionsMismatch(MismatchedDimensions),
    DestinationSizeMismatch(MismatchedSize),
}

impl Display for MbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MbError::ZeroBaseSize => f.write_str("Zero sized images is not supported"),
            MbError::PointerOverflow => f.write_str("Image size overflow pointer capabilities"),
            MbError::NotEnoughPlanes(planes) => f.write_fmt(format_args!(
                "Planar image must have at least 3 planes, but it has {}",
                planes
            )),
            MbError::SourceSizeMismatch(size) => f.write_fmt(format_args!(
                "Source buffer have invalid size, it must be {}, but it was {}",
                size.expected, size.received
            )),
            MbError::UnalignedDimensions { height, width } => f.write_fmt(format_args!(
                "Image dimensions must be multiples of 16, but they were {}x{}",
                height, width
            )),
            MbError::DestinationDimensionsMismatch(dims) => f.write_fmt(format_args!(
                "Destination must have dimensions {}x{}, but it has {}x{}",
                dims.expected.0, dims.expected.1, dims.received.0, dims.received.1
            )),
            MbError::DestinationSizeMismatch(size) => f.write_fmt(format_args!(
                "Destination size mismatch: expected={}, received={}",
                size.expected, size.received
            )),
        }
    }
}

impl Error for MbError {}

#[inline]
pub(crate) fn check_overflow_v2(v0: usize, v1: usize) -> Result<(), MbError> {
    let (_, overflow) = v0.overflowing_mul(v1);
    if overflow {
        return Err(MbError::PointerOverflow);
    }
    Ok(())
}

#[inline]
pub(crate) fn check_overflow_v3(v0: usize, v1: usize, v2: usize) -> Result<(), MbError> {
    let (product0, overflow) = v0.overflowing_mul(v1);
    if overflow {
        return Err(MbError::PointerOverflow);
    }
    let (_, overflow) = product0.overflowing_mul(v2);
    if overflow {
        return Err(MbError::PointerOverflow);
    }
    Ok(())
}

#[inline]
pub(crate) fn check_planar_source<V>(
    data: &[V],
    height: u32,
    width: u32,
    planes: u32,
) -> Result<(), MbError> {
    if height == 0 || width == 0 {
        return Err(MbError::ZeroBaseSize);
    }
    if planes < 3 {
        return Err(MbError::NotEnoughPlanes(planes as usize));
    }
    check_overflow_v3(height as usize, width as usize, planes as usize)?;
    let expected = height as usize * width as usize * planes as usize;
    if data.len() != expected {
        return Err(MbError::SourceSizeMismatch(MismatchedSize {
            expected,
            received: data.len(),
        }));
    }
    Ok(())
}

#[inline]
pub(crate) fn check_native_source<V>(data: &[V], height: u32, width: u32) -> Result<(), MbError> {
    if height == 0 || width == 0 {
        return Err(MbError::ZeroBaseSize);
    }
    check_overflow_v2(height as usize, width as usize)?;
    let expected = height as usize * width as usize;
    if data.len() != expected {
        return Err(MbError::SourceSizeMismatch(MismatchedSize {
            expected,
            received: data.len(),
        }));
    }
    Ok(())
}

#[inline]
pub(crate) fn check_macroblock_alignment(height: u32, width: u32) -> Result<(), MbError> {
    if height % 16 != 0 || width % 16 != 0 {
        return Err(MbError::UnalignedDimensions { height, width });
    }
    Ok(())
}
