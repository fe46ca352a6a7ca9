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

use halfcrop::{
    copy_frame, CropFilter, CropOptions, FilterHost, FrameError, LinkProperties, LocalGraph,
    PixelFormat, SequentialExecutor, SliceExecutor, SliceJob, VideoFrame,
};
use rand::Rng;
use std::cell::Cell;

fn yuv420_frame(width: u32, height: u32, luma: u8, chroma: u8) -> VideoFrame {
    let mut frame = VideoFrame::alloc(PixelFormat::Yuv420p, width, height).unwrap();
    frame.fill_plane(0, luma).unwrap();
    frame.fill_plane(1, chroma).unwrap();
    frame.fill_plane(2, chroma).unwrap();
    frame
}

fn random_yuv420_frame(width: u32, height: u32) -> VideoFrame {
    let mut rng = rand::rng();
    let mut frame = VideoFrame::alloc(PixelFormat::Yuv420p, width, height).unwrap();
    for plane in 0..3 {
        let rows = PixelFormat::Yuv420p.plane_rows(height, plane);
        let row_bytes = PixelFormat::Yuv420p.plane_line_size(width, plane).unwrap();
        let mut view = frame.plane_mut(plane).unwrap();
        for row in 0..rows {
            rng.fill(view.row_mut(row, row_bytes).unwrap());
        }
    }
    frame.props.pts = Some(rng.random_range(0..1_000_000));
    frame
}

fn configured_filter(width: u32, height: u32) -> CropFilter {
    let mut filter = CropFilter::new(CropOptions::default());
    filter.init().unwrap();
    filter
        .config_output(&LinkProperties::new(PixelFormat::Yuv420p, width, height))
        .unwrap();
    filter
}

/// Runs slices in reverse order, so slice ordering bugs show up.
struct ReverseExecutor;

impl SliceExecutor for ReverseExecutor {
    fn execute(&self, job: &SliceJob<'_>, nb_jobs: usize) -> Result<(), FrameError> {
        for index in (0..nb_jobs).rev() {
            job(index, nb_jobs)?;
        }
        Ok(())
    }
}

#[derive(Default)]
struct FailingHost {
    fail_allocation: bool,
    fail_execution: bool,
    released: Cell<usize>,
    forwarded: Cell<usize>,
}

impl FilterHost for FailingHost {
    fn request_output_buffer(
        &self,
        format: PixelFormat,
        width: u32,
        height: u32,
    ) -> Result<VideoFrame, FrameError> {
        if self.fail_allocation {
            return Err(FrameError::OutOfMemory(width as usize * height as usize));
        }
        VideoFrame::alloc(format, width, height)
    }

    fn execute(&self, job: &SliceJob<'_>, nb_jobs: usize) -> Result<(), FrameError> {
        if self.fail_execution {
            return Err(FrameError::ExecutionFailure(-11));
        }
        SequentialExecutor.execute(job, nb_jobs)
    }

    fn forward_frame(&self, _frame: VideoFrame) -> Result<(), FrameError> {
        self.forwarded.set(self.forwarded.get() + 1);
        Ok(())
    }

    fn release_frame(&self, _frame: VideoFrame) {
        self.released.set(self.released.get() + 1);
    }
}

#[test]
fn test_half_size_output_keeps_plane_values() {
    let filter = configured_filter(64, 64);
    let graph = LocalGraph::default();

    filter
        .filter_frame(&graph, yuv420_frame(64, 64, 10, 20), 4)
        .unwrap();

    assert_eq!(graph.released_frames(), 1);
    let out = graph.pop_output().unwrap();
    assert_eq!((out.width, out.height), (32, 32));
    for row in 0..32 {
        assert_eq!(out.row(0, row).unwrap(), &[10u8; 32]);
    }
    for plane in 1..3 {
        for row in 0..16 {
            assert_eq!(out.row(plane, row).unwrap(), &[20u8; 16]);
        }
        assert!(out.row(plane, 16).is_none());
    }
}

#[test]
fn test_output_is_top_left_crop_with_metadata() {
    let filter = configured_filter(75, 51);
    let graph = LocalGraph::default();
    let input = random_yuv420_frame(75, 51);
    let reference = input.clone();

    filter.filter_frame(&graph, input, 3).unwrap();

    let out = graph.pop_output().unwrap();
    assert_eq!((out.width, out.height), (37, 25));
    assert_eq!(out.props, reference.props);
    for plane in 0..3 {
        let rows = PixelFormat::Yuv420p.plane_rows(25, plane);
        let row_bytes = PixelFormat::Yuv420p.plane_line_size(37, plane).unwrap();
        for row in 0..rows {
            assert_eq!(
                out.row(plane, row).unwrap(),
                reference.plane(plane).unwrap().row(row, row_bytes).unwrap()
            );
        }
    }
}

#[test]
fn test_upscale_is_rejected_and_destination_untouched() {
    let src = yuv420_frame(64, 64, 10, 20);
    let mut dst = VideoFrame::alloc(PixelFormat::Yuv420p, 128, 128).unwrap();
    let result = copy_frame(&mut dst, &src);
    assert!(matches!(result, Err(FrameError::InvalidGeometry(_))));
    for plane in dst.planes.iter().flatten() {
        assert!(plane.data().iter().all(|&v| v == 0));
    }
}

#[test]
fn test_slice_count_does_not_change_output() {
    let input = random_yuv420_frame(97, 67);
    let mut outputs = Vec::new();
    for threads in [1usize, 2, 8] {
        let filter = configured_filter(97, 67);
        let graph = LocalGraph::new(ReverseExecutor);
        filter.filter_frame(&graph, input.clone(), threads).unwrap();
        outputs.push(graph.pop_output().unwrap());
    }
    for out in &outputs[1..] {
        assert_eq!(out.planes, outputs[0].planes);
    }
}

#[cfg(feature = "rayon")]
#[test]
fn test_rayon_matches_sequential() {
    use halfcrop::RayonExecutor;

    let input = random_yuv420_frame(128, 96);
    let filter = configured_filter(128, 96);

    let sequential = LocalGraph::default();
    filter.filter_frame(&sequential, input.clone(), 1).unwrap();

    let parallel = LocalGraph::new(RayonExecutor::with_threads(8).unwrap());
    filter.filter_frame(&parallel, input, 8).unwrap();

    assert_eq!(
        sequential.pop_output().unwrap().planes,
        parallel.pop_output().unwrap().planes
    );
}

#[test]
fn test_thread_count_larger_than_height() {
    let filter = configured_filter(16, 6);
    let graph = LocalGraph::default();
    filter
        .filter_frame(&graph, yuv420_frame(16, 6, 1, 2), 64)
        .unwrap();
    let out = graph.pop_output().unwrap();
    assert_eq!(out.row(0, 2).unwrap(), &[1u8; 8]);
    assert_eq!(out.row(1, 1).unwrap(), &[2u8; 4]);
}

#[test]
fn test_allocation_failure_releases_input() {
    let filter = configured_filter(32, 32);
    let host = FailingHost {
        fail_allocation: true,
        ..Default::default()
    };
    let result = filter.filter_frame(&host, yuv420_frame(32, 32, 0, 0), 2);
    assert_eq!(result, Err(FrameError::OutOfMemory(256)));
    assert_eq!(host.released.get(), 1);
    assert_eq!(host.forwarded.get(), 0);
}

#[test]
fn test_execution_failure_releases_input() {
    let filter = configured_filter(32, 32);
    let host = FailingHost {
        fail_execution: true,
        ..Default::default()
    };
    let result = filter.filter_frame(&host, yuv420_frame(32, 32, 0, 0), 2);
    assert_eq!(result, Err(FrameError::ExecutionFailure(-11)));
    // input and the unused output buffer
    assert_eq!(host.released.get(), 2);
    assert_eq!(host.forwarded.get(), 0);
}

#[test]
fn test_wrong_input_size_is_reported() {
    let filter = configured_filter(64, 64);
    let host = FailingHost::default();
    let result = filter.filter_frame(&host, yuv420_frame(16, 16, 0, 0), 2);
    assert!(matches!(result, Err(FrameError::InvalidGeometry(_))));
    assert_eq!(host.released.get(), 2);
    assert_eq!(host.forwarded.get(), 0);
}

#[test]
fn test_stream_of_frames() {
    let filter = configured_filter(40, 30);
    let graph = LocalGraph::default();
    for pts in 0..5 {
        let mut frame = yuv420_frame(40, 30, pts as u8, 128);
        frame.props.pts = Some(pts);
        filter.filter_frame(&graph, frame, 2).unwrap();
    }
    assert_eq!(graph.released_frames(), 5);
    for pts in 0..5 {
        let out = graph.pop_output().unwrap();
        assert_eq!(out.props.pts, Some(pts));
        assert_eq!(out.row(0, 14).unwrap(), &[pts as u8; 20]);
    }
}
