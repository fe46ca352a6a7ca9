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

use crate::frame_error::{check_overflow_v2, FrameError, GeometryError};
use std::fmt::{Display, Formatter};

/// Maximum number of storage planes any supported format uses.
pub const MAX_PLANES: usize = 4;

/// Pixel formats a frame can carry.
///
/// Layouts follow the usual ffmpeg naming, e.g. [PixelFormat::Yuv420p] is
/// three planes with both chroma axes halved.
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum PixelFormat {
    Yuv420p,
    /// Full range variant of [PixelFormat::Yuv420p], identical layout.
    Yuvj420p,
    Yuv422p,
    Yuv444p,
    Yuv410p,
    Yuv411p,
    Yuv440p,
    Yuva420p,
    /// 10 bit samples stored little endian in 16 bit words.
    Yuv420p10le,
    /// Luma plane followed by one interleaved CbCr plane.
    Nv12,
    /// Luma plane followed by one interleaved CrCb plane.
    Nv21,
    Gray8,
    /// Planar RGB stored in G, B, R plane order.
    Gbrp,
    Rgb24,
    Rgba,
}

/// Where a single pixel component lives inside the frame storage.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ComponentDescriptor {
    /// Index of the plane holding this component.
    pub plane: u8,
    /// Bytes between two horizontally consecutive samples.
    pub step: u8,
    /// Bytes before the first sample in a row.
    pub offset: u8,
    /// Significant bits per sample.
    pub depth: u8,
}

impl ComponentDescriptor {
    const fn new(plane: u8, step: u8, offset: u8, depth: u8) -> Self {
        Self {
            plane,
            step,
            offset,
            depth,
        }
    }
}

const EMPTY_COMPONENT: ComponentDescriptor = ComponentDescriptor::new(0, 0, 0, 0);

/// Static layout metadata of a [PixelFormat].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PixelFormatDescriptor {
    pub name: &'static str,
    pub nb_components: u8,
    /// Chroma width is `-((-width) >> log2_chroma_w)`.
    pub log2_chroma_w: u8,
    /// Chroma height is `-((-height) >> log2_chroma_h)`.
    pub log2_chroma_h: u8,
    pub comp: [ComponentDescriptor; MAX_PLANES],
}

impl PixelFormatDescriptor {
    const fn planar(
        name: &'static str,
        nb_components: u8,
        log2_chroma_w: u8,
        log2_chroma_h: u8,
        bytes: u8,
        depth: u8,
    ) -> Self {
        let mut comp = [EMPTY_COMPONENT; MAX_PLANES];
        let mut i = 0;
        while i < nb_components as usize {
            comp[i] = ComponentDescriptor::new(i as u8, bytes, 0, depth);
            i += 1;
        }
        Self {
            name,
            nb_components,
            log2_chroma_w,
            log2_chroma_h,
            comp,
        }
    }

    /// Components actually used by the format.
    pub fn components(&self) -> &[ComponentDescriptor] {
        &self.comp[..self.nb_components as usize]
    }

    /// Number of distinct storage planes, i.e. the highest referenced plane plus one.
    ///
    /// Interleaved formats such as NV12 have fewer planes than components.
    pub fn plane_count(&self) -> usize {
        self.components()
            .iter()
            .map(|c| c.plane as usize + 1)
            .max()
            .unwrap_or(0)
    }

    /// Bytes needed to store one row of `plane` for an image `width` pixels wide.
    ///
    /// Widest component of the plane decides the step; planes whose widest
    /// component is a chroma one use the horizontally subsampled width.
    pub fn plane_line_size(&self, width: u32, plane: usize) -> Result<usize, FrameError> {
        if plane >= self.plane_count() {
            return Err(GeometryError::InvalidLineSize { plane, width }.into());
        }
        let mut max_step = 0usize;
        let mut max_step_comp = 0usize;
        for (index, component) in self.components().iter().enumerate() {
            if component.plane as usize == plane && component.step as usize > max_step {
                max_step = component.step as usize;
                max_step_comp = index;
            }
        }
        if max_step == 0 {
            return Err(GeometryError::InvalidLineSize { plane, width }.into());
        }
        let shift = if max_step_comp == 1 || max_step_comp == 2 {
            self.log2_chroma_w
        } else {
            0
        };
        let shifted_width = ceil_rshift(width as usize, shift);
        check_overflow_v2(shifted_width, max_step)
    }

    /// Rows stored in `plane` for an image `height` pixels tall.
    ///
    /// Planes 1 and 2 follow the planar YUV convention and are vertically subsampled.
    pub fn plane_rows(&self, height: u32, plane: usize) -> usize {
        if plane == 1 || plane == 2 {
            ceil_rshift(height as usize, self.log2_chroma_h)
        } else {
            height as usize
        }
    }
}

#[inline]
pub(crate) const fn ceil_rshift(value: usize, shift: u8) -> usize {
    (value + (1usize << shift) - 1) >> shift
}

static YUV420P: PixelFormatDescriptor = PixelFormatDescriptor::planar("yuv420p", 3, 1, 1, 1, 8);
static YUVJ420P: PixelFormatDescriptor =
    PixelFormatDescriptor::planar("yuvj420p", 3, 1, 1, 1, 8);
static YUV422P: PixelFormatDescriptor = PixelFormatDescriptor::planar("yuv422p", 3, 1, 0, 1, 8);
static YUV444P: PixelFormatDescriptor = PixelFormatDescriptor::planar("yuv444p", 3, 0, 0, 1, 8);
static YUV410P: PixelFormatDescriptor = PixelFormatDescriptor::planar("yuv410p", 3, 2, 2, 1, 8);
static YUV411P: PixelFormatDescriptor = PixelFormatDescriptor::planar("yuv411p", 3, 2, 0, 1, 8);
static YUV440P: PixelFormatDescriptor = PixelFormatDescriptor::planar("yuv440p", 3, 0, 1, 1, 8);
static YUVA420P: PixelFormatDescriptor =
    PixelFormatDescriptor::planar("yuva420p", 4, 1, 1, 1, 8);
static YUV420P10LE: PixelFormatDescriptor =
    PixelFormatDescriptor::planar("yuv420p10le", 3, 1, 1, 2, 10);
static GRAY8: PixelFormatDescriptor = PixelFormatDescriptor::planar("gray", 1, 0, 0, 1, 8);

static NV12: PixelFormatDescriptor = PixelFormatDescriptor {
    name: "nv12",
    nb_components: 3,
    log2_chroma_w: 1,
    log2_chroma_h: 1,
    comp: [
        ComponentDescriptor::new(0, 1, 0, 8),
        ComponentDescriptor::new(1, 2, 0, 8),
        ComponentDescriptor::new(1, 2, 1, 8),
        EMPTY_COMPONENT,
    ],
};

static NV21: PixelFormatDescriptor = PixelFormatDescriptor {
    name: "nv21",
    nb_components: 3,
    log2_chroma_w: 1,
    log2_chroma_h: 1,
    comp: [
        ComponentDescriptor::new(0, 1, 0, 8),
        ComponentDescriptor::new(1, 2, 1, 8),
        ComponentDescriptor::new(1, 2, 0, 8),
        EMPTY_COMPONENT,
    ],
};

static GBRP: PixelFormatDescriptor = PixelFormatDescriptor {
    name: "gbrp",
    nb_components: 3,
    log2_chroma_w: 0,
    log2_chroma_h: 0,
    comp: [
        ComponentDescriptor::new(2, 1, 0, 8),
        ComponentDescriptor::new(0, 1, 0, 8),
        ComponentDescriptor::new(1, 1, 0, 8),
        EMPTY_COMPONENT,
    ],
};

static RGB24: PixelFormatDescriptor = PixelFormatDescriptor {
    name: "rgb24",
    nb_components: 3,
    log2_chroma_w: 0,
    log2_chroma_h: 0,
    comp: [
        ComponentDescriptor::new(0, 3, 0, 8),
        ComponentDescriptor::new(0, 3, 1, 8),
        ComponentDescriptor::new(0, 3, 2, 8),
        EMPTY_COMPONENT,
    ],
};

static RGBA: PixelFormatDescriptor = PixelFormatDescriptor {
    name: "rgba",
    nb_components: 4,
    log2_chroma_w: 0,
    log2_chroma_h: 0,
    comp: [
        ComponentDescriptor::new(0, 4, 0, 8),
        ComponentDescriptor::new(0, 4, 1, 8),
        ComponentDescriptor::new(0, 4, 2, 8),
        ComponentDescriptor::new(0, 4, 3, 8),
    ],
};

impl PixelFormat {
    pub const ALL: [PixelFormat; 15] = [
        PixelFormat::Yuv420p,
        PixelFormat::Yuvj420p,
        PixelFormat::Yuv422p,
        PixelFormat::Yuv444p,
        PixelFormat::Yuv410p,
        PixelFormat::Yuv411p,
        PixelFormat::Yuv440p,
        PixelFormat::Yuva420p,
        PixelFormat::Yuv420p10le,
        PixelFormat::Nv12,
        PixelFormat::Nv21,
        PixelFormat::Gray8,
        PixelFormat::Gbrp,
        PixelFormat::Rgb24,
        PixelFormat::Rgba,
    ];

    pub fn descriptor(self) -> &'static PixelFormatDescriptor {
        match self {
            PixelFormat::Yuv420p => &YUV420P,
            PixelFormat::Yuvj420p => &YUVJ420P,
            PixelFormat::Yuv422p => &YUV422P,
            PixelFormat::Yuv444p => &YUV444P,
            PixelFormat::Yuv410p => &YUV410P,
            PixelFormat::Yuv411p => &YUV411P,
            PixelFormat::Yuv440p => &YUV440P,
            PixelFormat::Yuva420p => &YUVA420P,
            PixelFormat::Yuv420p10le => &YUV420P10LE,
            PixelFormat::Nv12 => &NV12,
            PixelFormat::Nv21 => &NV21,
            PixelFormat::Gray8 => &GRAY8,
            PixelFormat::Gbrp => &GBRP,
            PixelFormat::Rgb24 => &RGB24,
            PixelFormat::Rgba => &RGBA,
        }
    }

    #[inline]
    pub fn plane_count(self) -> usize {
        self.descriptor().plane_count()
    }

    #[inline]
    pub fn plane_line_size(self, width: u32, plane: usize) -> Result<usize, FrameError> {
        self.descriptor().plane_line_size(width, plane)
    }

    #[inline]
    pub fn plane_rows(self, height: u32, plane: usize) -> usize {
        self.descriptor().plane_rows(height, plane)
    }

    pub fn from_name(name: &str) -> Option<PixelFormat> {
        PixelFormat::ALL
            .iter()
            .copied()
            .find(|format| format.descriptor().name == name)
    }
}

impl Display for PixelFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.descriptor().name)
    }
}
