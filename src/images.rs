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
use crate::mb_error::{check_native_source, check_planar_source};
use crate::MbError;
use std::fmt::Debug;

#[derive(Debug)]
pub enum BufferStoreMut<'a, T: Copy + Debug> {
    Borrowed(&'a mut [T]),
    Owned(Vec<T>),
}

impl<T: Copy + Debug> BufferStoreMut<'_, T> {
    pub fn borrow(&self) -> &[T] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }

    pub fn as_mut(&mut self) -> &mut [T] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }
}

#[derive(Debug, Clone)]
/// Non-mutable planar image with one buffer slot per color plane.
///
/// Samples are stored plane-major and column-major within each plane,
/// matching the host array convention the data arrives in. Channel values
/// are nominally in [0, 1].
pub struct PlanarImage<'a, T>
where
    T: Copy + Debug,
{
    pub data: &'a [T],
    pub height: u32,
    pub width: u32,
    /// Color planes count, must be at least 3 (R, G, B first).
    pub planes: u32,
}

impl<'a, T> PlanarImage<'a, T>
where
    T: Copy + Debug,
{
    pub fn check_constraints(&self) -> Result<(), MbError> {
        check_planar_source(self.data, self.height, self.width, self.planes)
    }

    /// Returns one color plane as a contiguous column-major slice.
    #[inline]
    pub fn plane(&self, plane: usize) -> &'a [T] {
        let plane_size = self.height as usize * self.width as usize;
        &self.data[plane * plane_size..(plane + 1) * plane_size]
    }
}

#[derive(Debug)]
/// Mutable planar image, either owning its storage or borrowing a caller
/// provided buffer.
pub struct PlanarImageMut<'a, T>
where
    T: Copy + Debug,
{
    pub data: BufferStoreMut<'a, T>,
    pub height: u32,
    pub width: u32,
    pub planes: u32,
}

impl<T> PlanarImageMut<'_, T>
where
    T: Copy + Debug,
{
    pub fn check_constraints(&self) -> Result<(), MbError> {
        check_planar_source(self.data.borrow(), self.height, self.width, self.planes)
    }
}

impl<'a, T> PlanarImageMut<'a, T>
where
    T: Default + Clone + Copy + Debug,
{
    /// Allocates a zeroed planar image of the given geometry.
    pub fn alloc(height: u32, width: u32, planes: u32) -> Self {
        let target = vec![T::default(); height as usize * width as usize * planes as usize];
        PlanarImageMut {
            data: BufferStoreMut::Owned(target),
            height,
            width,
            planes,
        }
    }

    pub fn to_fixed(&'a self) -> PlanarImage<'a, T> {
        PlanarImage {
            data: self.data.borrow(),
            height: self.height,
            width: self.width,
            planes: self.planes,
        }
    }
}

#[derive(Debug, Clone)]
/// Non-mutable native pixel raster.
///
/// One packed pixel per element, row-major, little-endian byte order
/// R, G, B, A.
pub struct NativeImage<'a> {
    pub data: &'a [u32],
    pub height: u32,
    pub width: u32,
}

impl NativeImage<'_> {
    pub fn check_constraints(&self) -> Result<(), MbError> {
        check_native_source(self.data, self.height, self.width)
    }
}

#[derive(Debug)]
/// Mutable native pixel raster.
pub struct NativeImageMut<'a> {
    pub data: BufferStoreMut<'a, u32>,
    pub height: u32,
    pub width: u32,
}

impl<'a> NativeImageMut<'a> {
    pub fn check_constraints(&self) -> Result<(), MbError> {
        check_native_source(self.data.borrow(), self.height, self.width)
    }

    /// Allocates a zeroed native raster of the given geometry.
    pub fn alloc(height: u32, width: u32) -> Self {
        let target = vec![0u32; height as usize * width as usize];
        NativeImageMut {
            data: BufferStoreMut::Owned(target),
            height,
            width,
        }
    }

    pub fn to_fixed(&'a self) -> NativeImage<'a> {
        NativeImage {
            data: self.data.borrow(),
            height: self.height,
            width: self.width,
        }
    }
}
