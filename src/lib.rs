//! Crop filter for planar video frames.
//!
//! The core copies the top-left region of a frame into a smaller frame of the
//! same pixel format, plane by plane, honoring chroma subsampling and
//! independent (possibly negative) strides. Copies can be split into row
//! slices that run concurrently on a [SliceExecutor].
//!
//! [CropFilter] wraps the core as a filter graph node producing frames of
//! half the input size.
#![forbid(unsafe_code)]

mod executor;
mod filter;
mod frame;
mod frame_copy;
mod frame_error;
mod host;
mod options;
mod pixel_format;
mod plane_copy;

#[cfg(feature = "rayon")]
pub use executor::RayonExecutor;
pub use executor::{SequentialExecutor, SliceExecutor, SliceJob};
pub use filter::{CropFilter, LinkProperties};
pub use frame::{
    ChromaLocation, ColorPrimaries, ColorRange, ColorSpace, ColorTransfer, FramePlane,
    FrameProperties, PlaneMut, PlaneRef, Rational, VideoFrame, FRAME_ALIGN,
};
pub use frame_copy::{
    copy_frame, copy_frame_slice, frame_geometry, slice_rows, CropJob, PlaneGeometry,
};
pub use frame_error::{FrameError, FrameSize, GeometryError, MismatchedSize, StrideViolation};
pub use host::{FilterHost, LocalGraph};
pub use options::CropOptions;
pub use pixel_format::{ComponentDescriptor, PixelFormat, PixelFormatDescriptor, MAX_PLANES};
pub use plane_copy::copy_plane;
