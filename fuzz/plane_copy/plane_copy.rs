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

#![no_main]

use halfcrop::{copy_plane, PlaneMut, PlaneRef};
use libfuzzer_sys::fuzz_target;

// Arbitrary origins and strides, including bottom-up ones. Must never panic.
fuzz_target!(|data: (u8, u8, i8, i8, u8, u8, u8)| {
    let (src_len, dst_len) = (data.0 as usize, data.1 as usize);
    let (src_stride, dst_stride) = (data.2 as isize, data.3 as isize);
    let origin = data.4 as usize;
    let row_bytes = data.5 as usize % 32;
    let rows = data.6 as usize % 32;

    let src: Vec<u8> = (0..src_len).map(|v| v as u8).collect();
    let mut dst = vec![0u8; dst_len];
    let result = copy_plane(
        Some(PlaneMut::new(&mut dst, origin % (dst_len + 1), dst_stride)),
        Some(PlaneRef::new(&src, origin % (src_len + 1), src_stride)),
        row_bytes,
        rows,
    );
    if result.is_err() {
        assert!(dst.iter().all(|&v| v == 0));
    }
});
