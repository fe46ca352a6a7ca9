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

mod support;

use clap::Parser;
use halfcrop::{CropFilter, CropOptions, LinkProperties, LocalGraph, PixelFormat, RayonExecutor};
use std::path::PathBuf;
use std::time::Instant;
use support::{frame_from_image, gradient_frame, read_raw_frame, save_luma_png, write_raw_frame};
use tracing_subscriber::EnvFilter;

/// Runs frames through the half size crop filter.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Image to use as luma source; a synthetic gradient is used when omitted.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Raw yuv420p input, requires --width and --height.
    #[arg(long, conflicts_with = "image")]
    raw: Option<PathBuf>,

    #[arg(long, default_value_t = 1920)]
    width: u32,

    #[arg(long, default_value_t = 1080)]
    height: u32,

    /// Worker threads offered to the filter.
    #[arg(long, default_value_t = 4)]
    threads: usize,

    /// Frames to push through the filter.
    #[arg(long, default_value_t = 30)]
    frames: usize,

    /// Filter arguments, e.g. `backUp=1`.
    #[arg(long, default_value = "")]
    options: String,

    /// Where to store the luma of the last output frame as PNG.
    #[arg(long, default_value = "crop_luma.png")]
    png: PathBuf,

    /// Where to store the last output frame as raw yuv420p.
    #[arg(long)]
    yuv: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let source = match (&args.image, &args.raw) {
        (Some(path), _) => frame_from_image(path)?,
        (None, Some(path)) => read_raw_frame(path, PixelFormat::Yuv420p, args.width, args.height)?,
        (None, None) => gradient_frame(args.width, args.height, rand::random())?,
    };

    let mut filter = CropFilter::new(CropOptions::parse(&args.options)?);
    filter.init()?;
    let output = filter.config_output(&LinkProperties::new(
        source.format,
        source.width,
        source.height,
    ))?;
    println!(
        "{} {}x{} -> {}x{}, {} threads",
        source.format, source.width, source.height, output.width, output.height, args.threads
    );

    let graph = LocalGraph::new(RayonExecutor::with_threads(args.threads.max(1))?);

    let start = Instant::now();
    let mut last = None;
    for index in 0..args.frames {
        let mut frame = source.clone();
        frame.props.pts = Some(index as i64);
        filter.filter_frame(&graph, frame, graph.executor().thread_count())?;
        while let Some(out) = graph.pop_output() {
            last = Some(out);
        }
    }
    let elapsed = start.elapsed();
    tracing::info!(frames = args.frames, ?elapsed, "filtering finished");
    println!(
        "{} frames in {:?} ({:?} per frame), {} input frames released",
        args.frames,
        elapsed,
        elapsed / args.frames.max(1) as u32,
        graph.released_frames()
    );

    if let Some(out) = last {
        save_luma_png(&args.png, &out)?;
        println!("luma saved to {}", args.png.display());
        if let Some(path) = &args.yuv {
            write_raw_frame(path, &out)?;
            println!("frame saved to {}", path.display());
        }
    }

    filter.uninit();
    Ok(())
}
