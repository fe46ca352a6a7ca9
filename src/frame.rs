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

use crate::frame_error::{check_overflow_v2, check_plane_extent, FrameError};
use crate::pixel_format::{PixelFormat, MAX_PLANES};
use std::ops::Range;

/// Row alignment used when allocating frame planes.
pub const FRAME_ALIGN: usize = 32;

#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Default)]
pub enum ColorRange {
    #[default]
    Unspecified,
    Limited,
    Full,
}

#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Default)]
pub enum ColorSpace {
    #[default]
    Unspecified,
    Rgb,
    Bt601,
    Bt709,
    Bt2020Ncl,
    Smpte240,
}

#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Default)]
pub enum ColorPrimaries {
    #[default]
    Unspecified,
    Bt709,
    Bt470Bg,
    Smpte170,
    Bt2020,
}

#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Default)]
pub enum ColorTransfer {
    #[default]
    Unspecified,
    Bt709,
    Smpte170,
    Srgb,
    Pq,
    Hlg,
}

#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Default)]
pub enum ChromaLocation {
    #[default]
    Unspecified,
    Left,
    Center,
    TopLeft,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Rational {
    pub num: i32,
    pub den: i32,
}

impl Default for Rational {
    fn default() -> Self {
        Rational { num: 0, den: 1 }
    }
}

/// Frame level metadata. Copied between frames, never interpreted by the copy core.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FrameProperties {
    pub pts: Option<i64>,
    pub pkt_dts: Option<i64>,
    pub duration: i64,
    pub key_frame: bool,
    pub sample_aspect_ratio: Rational,
    pub color_range: ColorRange,
    pub color_space: ColorSpace,
    pub color_primaries: ColorPrimaries,
    pub color_trc: ColorTransfer,
    pub chroma_location: ChromaLocation,
}

/// Owned storage of a single plane.
///
/// Row `r` starts at `origin + r * stride`; a negative stride stores rows bottom-up.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FramePlane {
    data: Vec<u8>,
    origin: usize,
    stride: isize,
}

impl FramePlane {
    pub fn new(data: Vec<u8>, origin: usize, stride: isize) -> Self {
        FramePlane {
            data,
            origin,
            stride,
        }
    }

    /// Zero filled plane of `rows` rows, `stride` bytes apart, stored top-down.
    pub fn zeroed(stride: usize, rows: usize) -> Result<Self, FrameError> {
        let size = check_overflow_v2(stride, rows)?;
        let stride = isize::try_from(stride).map_err(|_| FrameError::PointerOverflow)?;
        Ok(FramePlane::new(try_alloc(size)?, 0, stride))
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn origin(&self) -> usize {
        self.origin
    }

    #[inline]
    pub fn stride(&self) -> isize {
        self.stride
    }

    #[inline]
    pub fn view(&self) -> PlaneRef<'_> {
        PlaneRef {
            data: &self.data,
            origin: self.origin,
            stride: self.stride,
        }
    }

    #[inline]
    pub fn view_mut(&mut self) -> PlaneMut<'_> {
        PlaneMut {
            data: &mut self.data,
            origin: self.origin,
            stride: self.stride,
        }
    }
}

fn try_alloc(size: usize) -> Result<Vec<u8>, FrameError> {
    let mut data = Vec::new();
    data.try_reserve_exact(size)
        .map_err(|_| FrameError::OutOfMemory(size))?;
    data.resize(size, 0);
    Ok(data)
}

#[inline]
fn row_start(origin: usize, stride: isize, row: usize) -> Option<usize> {
    let offset = row.checked_mul(stride.unsigned_abs())?;
    if stride >= 0 {
        origin.checked_add(offset)
    } else {
        origin.checked_sub(offset)
    }
}

/// Borrowed read-only view of plane storage.
#[derive(Debug, Copy, Clone)]
pub struct PlaneRef<'a> {
    pub data: &'a [u8],
    pub origin: usize,
    pub stride: isize,
}

impl<'a> PlaneRef<'a> {
    pub fn new(data: &'a [u8], origin: usize, stride: isize) -> Self {
        PlaneRef {
            data,
            origin,
            stride,
        }
    }

    /// First `len` bytes of `row`, if they are inside the buffer.
    pub fn row(&self, row: usize, len: usize) -> Option<&'a [u8]> {
        let start = row_start(self.origin, self.stride, row)?;
        self.data.get(start..start.checked_add(len)?)
    }

    /// View whose row 0 is this view's row `rows`.
    pub fn skip_rows(self, rows: usize) -> Option<PlaneRef<'a>> {
        Some(PlaneRef {
            data: self.data,
            origin: row_start(self.origin, self.stride, rows)?,
            stride: self.stride,
        })
    }
}

/// Borrowed mutable view of plane storage.
#[derive(Debug)]
pub struct PlaneMut<'a> {
    pub data: &'a mut [u8],
    pub origin: usize,
    pub stride: isize,
}

impl<'a> PlaneMut<'a> {
    pub fn new(data: &'a mut [u8], origin: usize, stride: isize) -> Self {
        PlaneMut {
            data,
            origin,
            stride,
        }
    }

    pub fn row_mut(&mut self, row: usize, len: usize) -> Option<&mut [u8]> {
        let start = row_start(self.origin, self.stride, row)?;
        self.data.get_mut(start..start.checked_add(len)?)
    }

    /// View whose row 0 is this view's row `rows`.
    pub fn skip_rows(self, rows: usize) -> Option<PlaneMut<'a>> {
        Some(PlaneMut {
            origin: row_start(self.origin, self.stride, rows)?,
            data: self.data,
            stride: self.stride,
        })
    }

    pub fn reborrow(&mut self) -> PlaneMut<'_> {
        PlaneMut {
            data: self.data,
            origin: self.origin,
            stride: self.stride,
        }
    }

    pub fn as_ref(&self) -> PlaneRef<'_> {
        PlaneRef {
            data: self.data,
            origin: self.origin,
            stride: self.stride,
        }
    }

    /// Splits the plane into disjoint views, one per row range.
    ///
    /// `ranges` must be ascending and contiguous starting at row 0, as produced
    /// by [crate::slice_rows]. View `i` addresses the rows of `ranges[i]` as its
    /// own rows `0..ranges[i].len()`. Bytes past `row_bytes` of a row may land in
    /// the neighbouring view, so each view is only valid for `row_bytes` wide rows.
    pub fn split_rows(
        self,
        ranges: &[Range<usize>],
        row_bytes: usize,
    ) -> Result<Vec<PlaneMut<'a>>, FrameError> {
        let rows = ranges.last().map(|r| r.end).unwrap_or(0);
        debug_assert!(ranges.first().map(|r| r.start == 0).unwrap_or(true));
        debug_assert!(ranges.windows(2).all(|w| w[0].end == w[1].start));

        let len = self.data.len();
        check_plane_extent(len, self.origin, self.stride, row_bytes, rows)?;

        let last = ranges.len().saturating_sub(1);
        let step = self.stride.unsigned_abs();
        let mut regions = vec![(0usize, 0usize); ranges.len()];
        if self.stride >= 0 {
            for (i, range) in ranges.iter().enumerate() {
                let lo = if i == 0 {
                    0
                } else {
                    self.origin
                        .saturating_add(range.start.saturating_mul(step))
                        .min(len)
                };
                regions[i].0 = lo;
                if i > 0 {
                    regions[i - 1].1 = lo;
                }
                if i == last {
                    regions[i].1 = len;
                }
            }
        } else {
            for (i, range) in ranges.iter().enumerate() {
                let hi = if range.start == 0 {
                    len
                } else {
                    self.origin
                        .saturating_sub((range.start - 1).saturating_mul(step))
                        .min(len)
                };
                regions[i].1 = hi;
                if i > 0 {
                    regions[i - 1].0 = hi;
                }
                if i == last {
                    regions[i].0 = 0;
                }
            }
        }

        let mut order: Vec<usize> = (0..ranges.len()).collect();
        order.sort_by_key(|&i| (regions[i].0, regions[i].1));

        let mut views: Vec<Option<PlaneMut<'a>>> = (0..ranges.len()).map(|_| None).collect();
        let mut rest: &'a mut [u8] = self.data;
        let mut consumed = 0usize;
        for i in order {
            let (lo, hi) = regions[i];
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(hi - consumed);
            rest = tail;
            let region = &mut head[lo - consumed..];
            consumed = hi;
            let origin = if ranges[i].is_empty() {
                0
            } else {
                row_start(self.origin, self.stride, ranges[i].start)
                    .map(|start| start - lo)
                    .ok_or(FrameError::PointerOverflow)?
            };
            views[i] = Some(PlaneMut {
                data: region,
                origin,
                stride: self.stride,
            });
        }
        Ok(views.into_iter().flatten().collect())
    }
}

/// Video frame: pixel format, dimensions, per-plane storage and metadata.
///
/// A plane set to `None` has no storage, the equivalent of a null data pointer.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub format: PixelFormat,
    pub width: u32,
    pub height: u32,
    pub planes: [Option<FramePlane>; MAX_PLANES],
    pub props: FrameProperties,
}

impl VideoFrame {
    /// Frame without any plane storage.
    pub fn empty(format: PixelFormat, width: u32, height: u32) -> Self {
        VideoFrame {
            format,
            width,
            height,
            planes: [None, None, None, None],
            props: FrameProperties::default(),
        }
    }

    /// Allocates zero filled planes with strides aligned to [FRAME_ALIGN].
    pub fn alloc(format: PixelFormat, width: u32, height: u32) -> Result<Self, FrameError> {
        VideoFrame::alloc_with_align(format, width, height, FRAME_ALIGN)
    }

    /// Allocates zero filled planes, `align` must be a power of two or 1 for tight rows.
    pub fn alloc_with_align(
        format: PixelFormat,
        width: u32,
        height: u32,
        align: usize,
    ) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::ZeroBaseSize);
        }
        debug_assert!(align.is_power_of_two());
        let mut frame = VideoFrame::empty(format, width, height);
        for plane in 0..format.plane_count() {
            let row_bytes = format.plane_line_size(width, plane)?;
            let stride = row_bytes
                .checked_add(align - 1)
                .ok_or(FrameError::PointerOverflow)?
                & !(align - 1);
            let rows = format.plane_rows(height, plane);
            frame.planes[plane] = Some(FramePlane::zeroed(stride, rows)?);
        }
        Ok(frame)
    }

    #[inline]
    pub fn plane(&self, plane: usize) -> Option<PlaneRef<'_>> {
        self.planes.get(plane)?.as_ref().map(FramePlane::view)
    }

    #[inline]
    pub fn plane_mut(&mut self, plane: usize) -> Option<PlaneMut<'_>> {
        self.planes.get_mut(plane)?.as_mut().map(FramePlane::view_mut)
    }

    /// Mutable views of all planes at once.
    pub fn planes_mut(&mut self) -> [Option<PlaneMut<'_>>; MAX_PLANES] {
        self.planes
            .each_mut()
            .map(|plane| plane.as_mut().map(FramePlane::view_mut))
    }

    /// Stride of `plane`, zero when the plane has no storage.
    pub fn stride(&self, plane: usize) -> isize {
        self.plane(plane).map(|p| p.stride).unwrap_or(0)
    }

    pub fn set_plane(&mut self, plane: usize, storage: FramePlane) {
        self.planes[plane] = Some(storage);
    }

    pub fn take_plane(&mut self, plane: usize) -> Option<FramePlane> {
        self.planes.get_mut(plane)?.take()
    }

    /// Writes `value` over the visible bytes of every row of `plane`.
    pub fn fill_plane(&mut self, plane: usize, value: u8) -> Result<(), FrameError> {
        let row_bytes = self.format.plane_line_size(self.width, plane)?;
        let rows = self.format.plane_rows(self.height, plane);
        let Some(mut view) = self.plane_mut(plane) else {
            return Ok(());
        };
        check_plane_extent(view.data.len(), view.origin, view.stride, row_bytes, rows)?;
        for row in 0..rows {
            if let Some(dst) = view.row_mut(row, row_bytes) {
                dst.fill(value);
            }
        }
        Ok(())
    }

    /// Visible bytes of `row` in `plane`.
    pub fn row(&self, plane: usize, row: usize) -> Option<&[u8]> {
        let row_bytes = self.format.plane_line_size(self.width, plane).ok()?;
        if row >= self.format.plane_rows(self.height, plane) {
            return None;
        }
        self.plane(plane)?.row(row, row_bytes)
    }

    /// Copies metadata from `src`; pixel data, format and dimensions are left alone.
    pub fn copy_props_from(&mut self, src: &VideoFrame) {
        self.props = src.props.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slice_rows;

    #[test]
    fn test_alloc_aligns_strides() {
        let frame = VideoFrame::alloc(PixelFormat::Yuv420p, 70, 33).unwrap();
        assert_eq!(frame.stride(0), 96);
        assert_eq!(frame.stride(1), 64);
        assert_eq!(frame.stride(2), 64);
        assert!(frame.plane(3).is_none());
        assert_eq!(frame.planes[0].as_ref().unwrap().data().len(), 96 * 33);
        assert_eq!(frame.planes[1].as_ref().unwrap().data().len(), 64 * 17);
    }

    #[test]
    fn test_alloc_rejects_zero_size() {
        assert_eq!(
            VideoFrame::alloc(PixelFormat::Yuv420p, 0, 16).unwrap_err(),
            FrameError::ZeroBaseSize
        );
    }

    #[test]
    fn test_fill_plane_leaves_padding() {
        let mut frame = VideoFrame::alloc(PixelFormat::Gray8, 10, 2).unwrap();
        frame.fill_plane(0, 7).unwrap();
        let data = frame.planes[0].as_ref().unwrap().data();
        assert_eq!(&data[..10], &[7u8; 10]);
        assert!(data[10..32].iter().all(|&v| v == 0));
        assert_eq!(&data[32..42], &[7u8; 10]);
    }

    #[test]
    fn test_negative_stride_rows() {
        let data: Vec<u8> = (0..12).collect();
        let plane = PlaneRef::new(&data, 8, -4);
        assert_eq!(plane.row(0, 4), Some(&data[8..12]));
        assert_eq!(plane.row(2, 4), Some(&data[0..4]));
        assert_eq!(plane.row(3, 4), None);
        assert_eq!(plane.skip_rows(1).unwrap().row(0, 2), Some(&data[4..6]));
    }

    #[test]
    fn test_copy_props_keeps_geometry() {
        let mut src = VideoFrame::empty(PixelFormat::Yuv420p, 64, 64);
        src.props.pts = Some(42);
        src.props.key_frame = true;
        src.props.color_range = ColorRange::Full;
        let mut dst = VideoFrame::empty(PixelFormat::Yuv420p, 32, 32);
        dst.copy_props_from(&src);
        assert_eq!(dst.props, src.props);
        assert_eq!((dst.width, dst.height), (32, 32));
    }

    fn split_and_mark(
        stride: isize,
        origin: usize,
        len: usize,
        rows: usize,
        jobs: usize,
    ) -> Vec<u8> {
        let mut data = vec![0u8; len];
        let ranges: Vec<_> = (0..jobs).map(|j| slice_rows(rows, j, jobs)).collect();
        let views = PlaneMut::new(&mut data, origin, stride)
            .split_rows(&ranges, 3)
            .unwrap();
        assert_eq!(views.len(), jobs);
        for (job, (mut view, range)) in views.into_iter().zip(ranges.iter()).enumerate() {
            for row in 0..range.len() {
                view.row_mut(row, 3).unwrap().fill(job as u8 + 1);
            }
        }
        data
    }

    #[test]
    fn test_split_rows_positive_stride() {
        let data = split_and_mark(4, 0, 4 * 5, 5, 2);
        let whole = PlaneRef::new(&data, 0, 4);
        let expected = [1u8, 1, 2, 2, 2];
        for (row, value) in expected.iter().enumerate() {
            assert_eq!(whole.row(row, 3).unwrap(), &[*value; 3]);
        }
    }

    #[test]
    fn test_split_rows_negative_stride() {
        let data = split_and_mark(-4, 16, 4 * 5, 5, 3);
        let whole = PlaneRef::new(&data, 16, -4);
        let expected = [1u8, 2, 2, 3, 3];
        for (row, value) in expected.iter().enumerate() {
            assert_eq!(whole.row(row, 3).unwrap(), &[*value; 3]);
        }
    }

    #[test]
    fn test_split_rows_more_jobs_than_rows() {
        let data = split_and_mark(3, 0, 9, 3, 8);
        assert!(data.iter().all(|&v| v != 0));
    }
}
