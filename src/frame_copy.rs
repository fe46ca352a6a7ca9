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

use crate::frame::{PlaneMut, VideoFrame};
use crate::frame_error::{check_plane_extent, FrameError, FrameSize, GeometryError};
use crate::plane_copy::copy_plane;
use std::ops::Range;
use std::sync::{Mutex, PoisonError};

/// Bytes and rows copied for one plane.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct PlaneGeometry {
    pub plane: usize,
    pub row_bytes: usize,
    pub rows: usize,
}

/// Rows of a `rows` tall plane handled by slice `job` out of `nb_jobs`.
///
/// Slices are contiguous, ascending and cover `0..rows` exactly once.
#[inline]
pub fn slice_rows(rows: usize, job: usize, nb_jobs: usize) -> Range<usize> {
    let nb_jobs = nb_jobs.max(1);
    let job = job.min(nb_jobs);
    let start = rows * job / nb_jobs;
    let end = rows * (job + 1).min(nb_jobs) / nb_jobs;
    start..end
}

/// Validates a `src` to `dst` crop and derives per-plane copy geometry from `dst`.
///
/// Checks run in this order: dimensions, formats, plane presence, line sizes,
/// then stride and buffer extents of both frames. No frame is touched.
pub fn frame_geometry(
    dst: &VideoFrame,
    src: &VideoFrame,
) -> Result<Vec<PlaneGeometry>, FrameError> {
    if dst.width > src.width || dst.height > src.height {
        return Err(GeometryError::DestinationLarger {
            destination: FrameSize::new(dst.width, dst.height),
            source: FrameSize::new(src.width, src.height),
        }
        .into());
    }
    if dst.format != src.format {
        return Err(GeometryError::FormatMismatch {
            destination: dst.format,
            source: src.format,
        }
        .into());
    }

    let planes = dst.format.plane_count();
    for plane in 0..planes {
        if dst.plane(plane).is_none() || src.plane(plane).is_none() {
            return Err(GeometryError::MissingPlane(plane).into());
        }
    }

    let mut geometry = Vec::with_capacity(planes);
    for plane in 0..planes {
        let row_bytes = match dst.format.plane_line_size(dst.width, plane) {
            Ok(row_bytes) => row_bytes,
            Err(err) => {
                tracing::error!(
                    format = %dst.format,
                    width = dst.width,
                    plane,
                    "line size computation failed: {}",
                    err
                );
                return Err(err);
            }
        };
        let rows = dst.format.plane_rows(dst.height, plane);
        for frame in [dst, src] {
            if let Some(view) = frame.plane(plane) {
                check_plane_extent(view.data.len(), view.origin, view.stride, row_bytes, rows)?;
            }
        }
        geometry.push(PlaneGeometry {
            plane,
            row_bytes,
            rows,
        });
    }
    Ok(geometry)
}

/// Copies the top-left `dst.width x dst.height` region of `src` into `dst`.
///
/// Chroma planes are cropped to the matching subsampled region. `dst` must be
/// allocated with the same pixel format and dimensions not exceeding `src`.
///
/// # Errors
///
/// [FrameError::InvalidGeometry] when `dst` is larger than `src`, formats differ,
/// or a plane the format needs has no storage. [FrameError::ContractViolation]
/// when a stride or buffer can't hold the copied rows. `dst` is untouched on error.
pub fn copy_frame(dst: &mut VideoFrame, src: &VideoFrame) -> Result<(), FrameError> {
    copy_frame_slice(dst, src, 0, 1)
}

/// Copies only the rows of slice `job` out of `nb_jobs`, for every plane.
///
/// Running every slice once produces the same bytes as [copy_frame].
pub fn copy_frame_slice(
    dst: &mut VideoFrame,
    src: &VideoFrame,
    job: usize,
    nb_jobs: usize,
) -> Result<(), FrameError> {
    if job >= nb_jobs.max(1) {
        return Err(FrameError::InvalidJob { job, nb_jobs });
    }
    let geometry = frame_geometry(dst, src)?;
    for geom in geometry {
        let rows = slice_rows(geom.rows, job, nb_jobs);
        let dst_plane = dst
            .plane_mut(geom.plane)
            .and_then(|p| p.skip_rows(rows.start));
        let src_plane = src.plane(geom.plane).and_then(|p| p.skip_rows(rows.start));
        copy_plane(dst_plane, src_plane, geom.row_bytes, rows.len())?;
    }
    Ok(())
}

struct SliceTarget<'a> {
    geometry: PlaneGeometry,
    rows: Range<usize>,
    plane: PlaneMut<'a>,
}

/// Crop copy prepared for parallel execution.
///
/// The destination is split up front into disjoint row regions, one per job,
/// so [CropJob::run] can be called concurrently from any thread.
pub struct CropJob<'a> {
    src: &'a VideoFrame,
    nb_jobs: usize,
    slots: Vec<Mutex<Option<Vec<SliceTarget<'a>>>>>,
}

impl<'a> CropJob<'a> {
    pub fn new(
        dst: &'a mut VideoFrame,
        src: &'a VideoFrame,
        nb_jobs: usize,
    ) -> Result<CropJob<'a>, FrameError> {
        let nb_jobs = nb_jobs.max(1);
        let geometry = frame_geometry(dst, src)?;

        let mut per_job: Vec<Vec<SliceTarget<'a>>> = (0..nb_jobs)
            .map(|_| Vec::with_capacity(geometry.len()))
            .collect();
        let mut planes = dst.planes_mut();
        for geom in geometry {
            let Some(plane) = planes[geom.plane].take() else {
                return Err(GeometryError::MissingPlane(geom.plane).into());
            };
            let ranges: Vec<Range<usize>> = (0..nb_jobs)
                .map(|job| slice_rows(geom.rows, job, nb_jobs))
                .collect();
            let views = plane.split_rows(&ranges, geom.row_bytes)?;
            for ((targets, rows), plane) in per_job.iter_mut().zip(ranges).zip(views) {
                targets.push(SliceTarget {
                    geometry: geom,
                    rows,
                    plane,
                });
            }
        }

        Ok(CropJob {
            src,
            nb_jobs,
            slots: per_job.into_iter().map(|t| Mutex::new(Some(t))).collect(),
        })
    }

    #[inline]
    pub fn nb_jobs(&self) -> usize {
        self.nb_jobs
    }

    /// Copies the rows owned by slice `job`. A slice that already ran is a no-op.
    pub fn run(&self, job: usize, nb_jobs: usize) -> Result<(), FrameError> {
        if nb_jobs != self.nb_jobs {
            return Err(FrameError::InvalidJob { job, nb_jobs });
        }
        let slot = self
            .slots
            .get(job)
            .ok_or(FrameError::InvalidJob { job, nb_jobs })?;
        let targets = slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let Some(targets) = targets else {
            return Ok(());
        };
        for target in targets {
            let src_plane = self
                .src
                .plane(target.geometry.plane)
                .and_then(|p| p.skip_rows(target.rows.start));
            copy_plane(
                Some(target.plane),
                src_plane,
                target.geometry.row_bytes,
                target.rows.len(),
            )?;
        }
        tracing::trace!(job, nb_jobs, "slice copied");
        Ok(())
    }
}
