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

use crate::frame::{PlaneMut, PlaneRef};
use crate::frame_error::{check_plane_extent, FrameError};

/// Copies a rectangle of `rows` rows, `row_bytes` bytes each, from `src` into `dst`.
///
/// Each side advances by its own stride, strides may be negative for bottom-up
/// storage. A missing plane on either side makes the call a no-op, so optional
/// planes can be passed through unconditionally.
///
/// # Arguments
///
/// * `dst`: Destination plane, `None` when it has no storage
/// * `src`: Source plane, `None` when it has no storage
/// * `row_bytes`: Bytes copied from every row
/// * `rows`: Number of rows to copy
///
/// returns: Result<(), [FrameError]>
///
/// # Errors
///
/// [FrameError::ContractViolation] when `|stride|` of either plane is below
/// `row_bytes` or a plane buffer can't hold `rows` rows. Nothing is written then.
pub fn copy_plane(
    dst: Option<PlaneMut<'_>>,
    src: Option<PlaneRef<'_>>,
    row_bytes: usize,
    rows: usize,
) -> Result<(), FrameError> {
    let (Some(mut dst), Some(src)) = (dst, src) else {
        return Ok(());
    };
    check_plane_extent(src.data.len(), src.origin, src.stride, row_bytes, rows)?;
    check_plane_extent(dst.data.len(), dst.origin, dst.stride, row_bytes, rows)?;
    if row_bytes == 0 {
        return Ok(());
    }

    for row in 0..rows {
        let (Some(dst_row), Some(src_row)) = (dst.row_mut(row, row_bytes), src.row(row, row_bytes))
        else {
            return Err(FrameError::PointerOverflow);
        };
        dst_row.copy_from_slice(src_row);
    }
    Ok(())
}
