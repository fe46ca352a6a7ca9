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

use criterion::{criterion_group, criterion_main, Criterion};
use halfcrop::{
    copy_frame, CropFilter, CropOptions, LinkProperties, LocalGraph, PixelFormat, RayonExecutor,
    VideoFrame,
};
use rand::Rng;

fn random_frame(format: PixelFormat, width: u32, height: u32) -> VideoFrame {
    let mut rng = rand::rng();
    let mut frame = VideoFrame::alloc(format, width, height).unwrap();
    for plane in 0..format.plane_count() {
        let rows = format.plane_rows(height, plane);
        let row_bytes = format.plane_line_size(width, plane).unwrap();
        let mut view = frame.plane_mut(plane).unwrap();
        for row in 0..rows {
            rng.fill(view.row_mut(row, row_bytes).unwrap());
        }
    }
    frame
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let src = random_frame(PixelFormat::Yuv420p, 1920, 1080);

    c.bench_function("halfcrop: copy_frame yuv420p 1920x1080 -> 960x540", |b| {
        let mut dst = VideoFrame::alloc(PixelFormat::Yuv420p, 960, 540).unwrap();
        b.iter(|| {
            copy_frame(&mut dst, &src).unwrap();
        })
    });

    let nv12 = random_frame(PixelFormat::Nv12, 3840, 2160);
    c.bench_function("halfcrop: copy_frame nv12 3840x2160 -> 1920x1080", |b| {
        let mut dst = VideoFrame::alloc(PixelFormat::Nv12, 1920, 1080).unwrap();
        b.iter(|| {
            copy_frame(&mut dst, &nv12).unwrap();
        })
    });

    let mut filter = CropFilter::new(CropOptions::default());
    filter
        .config_output(&LinkProperties::new(PixelFormat::Yuv420p, 1920, 1080))
        .unwrap();

    for threads in [1usize, 4, 8] {
        let graph = LocalGraph::new(RayonExecutor::with_threads(threads).unwrap());
        c.bench_function(
            &format!("halfcrop: filter_frame yuv420p 1920x1080, {} threads", threads),
            |b| {
                b.iter(|| {
                    filter.filter_frame(&graph, src.clone(), threads).unwrap();
                    graph.pop_output().unwrap();
                })
            },
        );
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
