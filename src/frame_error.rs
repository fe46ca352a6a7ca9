/*
 * Copyright (c) Radzivon Bartoshyk, 10/2026. All rights reserved.
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

use crate::pixel_format::PixelFormat;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
pub struct MismatchedSize {
    pub expected: usize,
    pub received: usize,
}

/// Frame dimensions as width and height.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Default)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Display for FrameSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}x{}", self.width, self.height))
    }
}

/// Reasons a crop between two frames is rejected before any byte is copied.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GeometryError {
    /// Destination is wider or taller than source, copy never upscales.
    DestinationLarger {
        destination: FrameSize,
        source: FrameSize,
    },
    FormatMismatch {
        destination: PixelFormat,
        source: PixelFormat,
    },
    /// Plane required by the pixel format has no storage in one of the frames.
    MissingPlane(usize),
    /// Row byte width can't be derived for this plane of the format.
    InvalidLineSize { plane: usize, width: u32 },
}

impl Display for GeometryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryError::DestinationLarger {
                destination,
                source,
            } => f.write_fmt(format_args!(
                "Destination {} exceeds source {}, frame copy can only crop",
                destination, source
            )),
            GeometryError::FormatMismatch {
                destination,
                source,
            } => f.write_fmt(format_args!(
                "Destination format {} does not match source format {}",
                destination, source
            )),
            GeometryError::MissingPlane(plane) => f.write_fmt(format_args!(
                "Plane {} is required but has no data in one of the frames",
                plane
            )),
            GeometryError::InvalidLineSize { plane, width } => f.write_fmt(format_args!(
                "Can't compute line size of plane {} for width {}",
                plane, width
            )),
        }
    }
}

/// Row geometry that does not fit the plane storage it is applied to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum StrideViolation {
    /// `|stride|` is smaller than the bytes copied per row.
    StrideTooSmall { stride: isize, row_bytes: usize },
    /// Plane buffer ends before the last requested row does.
    PlaneTooShort(MismatchedSize),
    /// First row lies before the start of a bottom-up plane buffer.
    OriginUnderflow { origin: usize, rows: usize },
}

impl Display for StrideViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StrideViolation::StrideTooSmall { stride, row_bytes } => f.write_fmt(format_args!(
                "Stride {} is smaller than row width {} bytes",
                stride, row_bytes
            )),
            StrideViolation::PlaneTooShort(size) => f.write_fmt(format_args!(
                "Plane must have size at least {} but it is {}",
                size.expected, size.received
            )),
            StrideViolation::OriginUnderflow { origin, rows } => f.write_fmt(format_args!(
                "Plane origin {} can't hold {} rows with negative stride",
                origin, rows
            )),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum FrameError {
    InvalidGeometry(GeometryError),
    ContractViolation(StrideViolation),
    OutOfMemory(usize),
    PointerOverflow,
    ZeroBaseSize,
    ExecutionFailure(i32),
    InvalidJob { job: usize, nb_jobs: usize },
    NotConfigured,
    UnsupportedFormat(PixelFormat),
    InvalidOption(String),
}

impl Display for FrameError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FrameError::InvalidGeometry(err) => {
                f.write_fmt(format_args!("Invalid frame geometry: {}", err))
            }
            FrameError::ContractViolation(err) => {
                f.write_fmt(format_args!("Plane copy contract violated: {}", err))
            }
            FrameError::OutOfMemory(bytes) => {
                f.write_fmt(format_args!("Failed to allocate {} bytes", bytes))
            }
            FrameError::PointerOverflow => f.write_str("Image size overflow pointer capabilities"),
            FrameError::ZeroBaseSize => f.write_str("Zero sized images is not supported"),
            FrameError::ExecutionFailure(code) => {
                f.write_fmt(format_args!("Slice execution failed with code {}", code))
            }
            FrameError::InvalidJob { job, nb_jobs } => f.write_fmt(format_args!(
                "Job {} is out of range for {} jobs",
                job, nb_jobs
            )),
            FrameError::NotConfigured => f.write_str("Output link is not configured yet"),
            FrameError::UnsupportedFormat(format) => {
                f.write_fmt(format_args!("Pixel format {} is not supported", format))
            }
            FrameError::InvalidOption(option) => {
                f.write_fmt(format_args!("Invalid filter option: {}", option))
            }
        }
    }
}

impl Error for FrameError {}

impl From<GeometryError> for FrameError {
    fn from(value: GeometryError) -> Self {
        FrameError::InvalidGeometry(value)
    }
}

impl From<StrideViolation> for FrameError {
    fn from(value: StrideViolation) -> Self {
        FrameError::ContractViolation(value)
    }
}

#[inline]
pub(crate) fn check_overflow_v2(v0: usize, v1: usize) -> Result<usize, FrameError> {
    v0.checked_mul(v1).ok_or(FrameError::PointerOverflow)
}

/// Verifies that `rows` rows of `row_bytes` starting at `origin` with `stride` fit in `len`.
///
/// Returns the lowest and highest (exclusive) byte touched.
pub(crate) fn check_plane_extent(
    len: usize,
    origin: usize,
    stride: isize,
    row_bytes: usize,
    rows: usize,
) -> Result<(usize, usize), FrameError> {
    if row_bytes > stride.unsigned_abs() {
        return Err(StrideViolation::StrideTooSmall { stride, row_bytes }.into());
    }
    if rows == 0 || row_bytes == 0 {
        return Ok((origin.min(len), origin.min(len)));
    }
    let span = check_overflow_v2(rows - 1, stride.unsigned_abs())?;
    let (low, last_row) = if stride >= 0 {
        let last_row = origin.checked_add(span).ok_or(FrameError::PointerOverflow)?;
        (origin, last_row)
    } else {
        let low = origin
            .checked_sub(span)
            .ok_or(StrideViolation::OriginUnderflow { origin, rows })?;
        (low, origin)
    };
    let high = last_row
        .checked_add(row_bytes)
        .ok_or(FrameError::PointerOverflow)?;
    if high > len {
        return Err(StrideViolation::PlaneTooShort(MismatchedSize {
            expected: high,
            received: len,
        })
        .into());
    }
    Ok((low, high))
}
