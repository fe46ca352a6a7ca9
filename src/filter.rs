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

use crate::frame::VideoFrame;
use crate::frame_copy::CropJob;
use crate::frame_error::FrameError;
use crate::host::FilterHost;
use crate::options::CropOptions;
use crate::pixel_format::PixelFormat;

static SUPPORTED_FORMATS: [PixelFormat; 1] = [PixelFormat::Yuv420p];

/// Negotiated properties of a link between two filters.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct LinkProperties {
    pub format: PixelFormat,
    pub width: u32,
    pub height: u32,
}

impl LinkProperties {
    pub const fn new(format: PixelFormat, width: u32, height: u32) -> Self {
        LinkProperties {
            format,
            width,
            height,
        }
    }
}

/// Holds the input frame and returns it to the host on every exit path.
struct InputGuard<'h, H: FilterHost + ?Sized> {
    host: &'h H,
    frame: VideoFrame,
}

impl<H: FilterHost + ?Sized> Drop for InputGuard<'_, H> {
    fn drop(&mut self) {
        let placeholder = VideoFrame::empty(self.frame.format, 0, 0);
        self.host
            .release_frame(std::mem::replace(&mut self.frame, placeholder));
    }
}

/// Filter node emitting the top-left quarter of every input frame.
///
/// Output is half the input width and height (rounded down) and carries the
/// input's metadata.
#[derive(Debug, Default)]
pub struct CropFilter {
    options: CropOptions,
    output: Option<LinkProperties>,
}

impl CropFilter {
    pub const NAME: &'static str = "halfcrop";
    pub const DESCRIPTION: &'static str = "Copies the top-left quarter of each frame";

    pub fn new(options: CropOptions) -> Self {
        CropFilter {
            options,
            output: None,
        }
    }

    pub fn options(&self) -> &CropOptions {
        &self.options
    }

    pub fn init(&mut self) -> Result<(), FrameError> {
        tracing::debug!(filter = Self::NAME, back_up = %self.options.back_up, "init");
        Ok(())
    }

    pub fn uninit(&mut self) {
        tracing::debug!(filter = Self::NAME, "uninit");
        self.output = None;
    }

    /// Pixel formats accepted on the input and produced on the output.
    pub fn query_formats(&self) -> &'static [PixelFormat] {
        &SUPPORTED_FORMATS
    }

    /// Derives output link properties from the input link.
    pub fn config_output(&mut self, input: &LinkProperties) -> Result<LinkProperties, FrameError> {
        if !self.query_formats().contains(&input.format) {
            return Err(FrameError::UnsupportedFormat(input.format));
        }
        let output = LinkProperties::new(input.format, input.width / 2, input.height / 2);
        tracing::debug!(
            input_width = input.width,
            input_height = input.height,
            output_width = output.width,
            output_height = output.height,
            format = %output.format,
            "configured output"
        );
        self.output = Some(output);
        Ok(output)
    }

    pub fn output_link(&self) -> Option<&LinkProperties> {
        self.output.as_ref()
    }

    /// Crops `input` into a new frame and forwards it.
    ///
    /// `thread_count` bounds the number of slices together with the output height.
    /// `input` is released to the host on every path, before the output is forwarded.
    pub fn filter_frame<H: FilterHost + ?Sized>(
        &self,
        host: &H,
        input: VideoFrame,
        thread_count: usize,
    ) -> Result<(), FrameError> {
        let input = InputGuard { host, frame: input };
        let link = self.output.ok_or(FrameError::NotConfigured)?;
        tracing::trace!(
            pts = ?input.frame.props.pts,
            width = input.frame.width,
            height = input.frame.height,
            "filter frame"
        );

        let mut out = host
            .request_output_buffer(link.format, link.width, link.height)
            .inspect_err(|err| tracing::warn!("output buffer allocation failed: {}", err))?;
        out.copy_props_from(&input.frame);
        out.width = link.width;
        out.height = link.height;

        let nb_jobs = (link.height as usize).min(thread_count).max(1);
        let copied = CropJob::new(&mut out, &input.frame, nb_jobs)
            .and_then(|job| host.execute(&|index, total| job.run(index, total), nb_jobs));
        if let Err(err) = copied {
            tracing::warn!(nb_jobs, "dropping frame, copy failed: {}", err);
            host.release_frame(out);
            return Err(err);
        }

        drop(input);
        host.forward_frame(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::LocalGraph;

    #[test]
    fn test_config_output_halves() {
        let mut filter = CropFilter::default();
        let output = filter
            .config_output(&LinkProperties::new(PixelFormat::Yuv420p, 1921, 1081))
            .unwrap();
        assert_eq!(output, LinkProperties::new(PixelFormat::Yuv420p, 960, 540));
        assert_eq!(filter.output_link(), Some(&output));
    }

    #[test]
    fn test_config_output_rejects_other_formats() {
        let mut filter = CropFilter::default();
        assert_eq!(
            filter.config_output(&LinkProperties::new(PixelFormat::Nv12, 64, 64)),
            Err(FrameError::UnsupportedFormat(PixelFormat::Nv12))
        );
        assert!(filter.output_link().is_none());
    }

    #[test]
    fn test_filter_frame_requires_configuration() {
        let filter = CropFilter::default();
        let graph = LocalGraph::default();
        let frame = VideoFrame::alloc(PixelFormat::Yuv420p, 16, 16).unwrap();
        assert_eq!(
            filter.filter_frame(&graph, frame, 4),
            Err(FrameError::NotConfigured)
        );
        assert_eq!(graph.released_frames(), 1);
        assert_eq!(graph.queued_frames(), 0);
    }

    #[test]
    fn test_uninit_clears_link() {
        let mut filter = CropFilter::default();
        filter.init().unwrap();
        filter
            .config_output(&LinkProperties::new(PixelFormat::Yuv420p, 8, 8))
            .unwrap();
        filter.uninit();
        assert!(filter.output_link().is_none());
    }
}
