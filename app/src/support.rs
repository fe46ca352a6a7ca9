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

use halfcrop::{PixelFormat, VideoFrame};
use image::{GrayImage, ImageReader};
use std::fs::File;
use std::io::{Error, ErrorKind, Read, Write};
use std::path::Path;

fn plane_geometry(frame: &VideoFrame, plane: usize) -> std::io::Result<(usize, usize)> {
    let row_bytes = frame
        .format
        .plane_line_size(frame.width, plane)
        .map_err(|e| Error::new(ErrorKind::InvalidInput, e))?;
    Ok((row_bytes, frame.format.plane_rows(frame.height, plane)))
}

/// Reads a tightly packed raw frame, planes stored one after another.
pub(crate) fn read_raw_frame<P: AsRef<Path>>(
    path: P,
    format: PixelFormat,
    width: u32,
    height: u32,
) -> std::io::Result<VideoFrame> {
    let mut file = File::open(path)?;
    let mut frame = VideoFrame::alloc(format, width, height)
        .map_err(|e| Error::new(ErrorKind::InvalidInput, e))?;
    for plane in 0..format.plane_count() {
        let (row_bytes, rows) = plane_geometry(&frame, plane)?;
        let mut view = frame
            .plane_mut(plane)
            .ok_or_else(|| Error::new(ErrorKind::InvalidData, "missing plane"))?;
        for row in 0..rows {
            let dst = view
                .row_mut(row, row_bytes)
                .ok_or_else(|| Error::new(ErrorKind::InvalidData, "short plane"))?;
            file.read_exact(dst)?;
        }
    }
    Ok(frame)
}

/// Writes the visible rows of every plane, tightly packed.
pub(crate) fn write_raw_frame<P: AsRef<Path>>(path: P, frame: &VideoFrame) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    for plane in 0..frame.format.plane_count() {
        let (_, rows) = plane_geometry(frame, plane)?;
        for row in 0..rows {
            let data = frame
                .row(plane, row)
                .ok_or_else(|| Error::new(ErrorKind::InvalidData, "short plane"))?;
            file.write_all(data)?;
        }
    }
    Ok(())
}

/// Builds a yuv420p frame from an image file, chroma set to neutral gray.
pub(crate) fn frame_from_image<P: AsRef<Path>>(path: P) -> std::io::Result<VideoFrame> {
    let img = ImageReader::open(path)?
        .decode()
        .map_err(|e| Error::new(ErrorKind::InvalidData, e))?
        .to_luma8();
    let (width, height) = img.dimensions();
    let mut frame = VideoFrame::alloc(PixelFormat::Yuv420p, width, height)
        .map_err(|e| Error::new(ErrorKind::InvalidInput, e))?;
    let mut luma = frame
        .plane_mut(0)
        .ok_or_else(|| Error::new(ErrorKind::InvalidData, "missing plane"))?;
    for (y, src) in img.as_raw().chunks_exact(width as usize).enumerate() {
        if let Some(dst) = luma.row_mut(y, width as usize) {
            dst.copy_from_slice(src);
        }
    }
    frame
        .fill_plane(1, 128)
        .and_then(|_| frame.fill_plane(2, 128))
        .map_err(|e| Error::new(ErrorKind::InvalidInput, e))?;
    Ok(frame)
}

/// Synthetic yuv420p frame: diagonal luma ramp, flat chroma.
pub(crate) fn gradient_frame(width: u32, height: u32, seed: u8) -> std::io::Result<VideoFrame> {
    let mut frame = VideoFrame::alloc(PixelFormat::Yuv420p, width, height)
        .map_err(|e| Error::new(ErrorKind::InvalidInput, e))?;
    let mut luma = frame
        .plane_mut(0)
        .ok_or_else(|| Error::new(ErrorKind::InvalidData, "missing plane"))?;
    for y in 0..height as usize {
        if let Some(row) = luma.row_mut(y, width as usize) {
            for (x, v) in row.iter_mut().enumerate() {
                *v = (x + y).wrapping_add(seed as usize) as u8;
            }
        }
    }
    frame
        .fill_plane(1, 90)
        .and_then(|_| frame.fill_plane(2, 240))
        .map_err(|e| Error::new(ErrorKind::InvalidInput, e))?;
    Ok(frame)
}

/// Saves the luma plane as a grayscale PNG.
pub(crate) fn save_luma_png<P: AsRef<Path>>(path: P, frame: &VideoFrame) -> std::io::Result<()> {
    let mut pixels = Vec::with_capacity(frame.width as usize * frame.height as usize);
    for row in 0..frame.height as usize {
        let data = frame
            .row(0, row)
            .ok_or_else(|| Error::new(ErrorKind::InvalidData, "short plane"))?;
        pixels.extend_from_slice(&data[..frame.width as usize]);
    }
    let img = GrayImage::from_raw(frame.width, frame.height, pixels)
        .ok_or_else(|| Error::new(ErrorKind::InvalidData, "luma size mismatch"))?;
    img.save(path).map_err(|e| Error::new(ErrorKind::Other, e))
}
