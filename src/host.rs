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

use crate::executor::{SequentialExecutor, SliceExecutor, SliceJob};
use crate::frame::{VideoFrame, FRAME_ALIGN};
use crate::frame_error::FrameError;
use crate::pixel_format::PixelFormat;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// Services a filter graph offers to the node it drives.
pub trait FilterHost {
    /// Allocates an output frame of the given geometry.
    fn request_output_buffer(
        &self,
        format: PixelFormat,
        width: u32,
        height: u32,
    ) -> Result<VideoFrame, FrameError>;

    /// Runs `job` for every slice index in `0..nb_jobs` and joins.
    fn execute(&self, job: &SliceJob<'_>, nb_jobs: usize) -> Result<(), FrameError>;

    /// Hands a finished frame to the next filter.
    fn forward_frame(&self, frame: VideoFrame) -> Result<(), FrameError>;

    /// Takes back a frame the filter no longer needs.
    fn release_frame(&self, frame: VideoFrame);
}

/// In-process single node graph: allocates from the heap, runs slices on `E`
/// and queues forwarded frames for the caller to pick up.
#[derive(Debug)]
pub struct LocalGraph<E: SliceExecutor = SequentialExecutor> {
    executor: E,
    align: usize,
    output: Mutex<VecDeque<VideoFrame>>,
    released: AtomicUsize,
}

impl Default for LocalGraph<SequentialExecutor> {
    fn default() -> Self {
        LocalGraph::new(SequentialExecutor)
    }
}

impl<E: SliceExecutor> LocalGraph<E> {
    pub fn new(executor: E) -> Self {
        LocalGraph {
            executor,
            align: FRAME_ALIGN,
            output: Mutex::new(VecDeque::new()),
            released: AtomicUsize::new(0),
        }
    }

    /// Row alignment of output buffers, must be a power of two.
    pub fn with_align(mut self, align: usize) -> Self {
        self.align = align;
        self
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Oldest forwarded frame not yet taken.
    pub fn pop_output(&self) -> Option<VideoFrame> {
        self.output
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }

    pub fn queued_frames(&self) -> usize {
        self.output
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Number of frames handed back through [FilterHost::release_frame].
    pub fn released_frames(&self) -> usize {
        self.released.load(Ordering::Acquire)
    }
}

impl<E: SliceExecutor> FilterHost for LocalGraph<E> {
    fn request_output_buffer(
        &self,
        format: PixelFormat,
        width: u32,
        height: u32,
    ) -> Result<VideoFrame, FrameError> {
        VideoFrame::alloc_with_align(format, width, height, self.align)
    }

    fn execute(&self, job: &SliceJob<'_>, nb_jobs: usize) -> Result<(), FrameError> {
        self.executor.execute(job, nb_jobs)
    }

    fn forward_frame(&self, frame: VideoFrame) -> Result<(), FrameError> {
        self.output
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(frame);
        Ok(())
    }

    fn release_frame(&self, frame: VideoFrame) {
        self.released.fetch_add(1, Ordering::AcqRel);
        drop(frame);
    }
}
