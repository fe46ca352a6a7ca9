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

use halfcrop::{copy_frame, CropJob, PixelFormat, VideoFrame};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (u8, u8, u8, u8, u8, u8)| {
    let format = PixelFormat::ALL[data.0 as usize % PixelFormat::ALL.len()];
    let (src_w, src_h) = (data.1 as u32, data.2 as u32);
    let (dst_w, dst_h) = (data.3 as u32, data.4 as u32);
    if src_w == 0 || src_h == 0 || dst_w == 0 || dst_h == 0 {
        return;
    }
    let nb_jobs = data.5 as usize % 17;

    let mut src = VideoFrame::alloc(format, src_w, src_h).unwrap();
    for plane in 0..format.plane_count() {
        src.fill_plane(plane, plane as u8 + 1).unwrap();
    }
    let mut full = VideoFrame::alloc(format, dst_w, dst_h).unwrap();
    let result = copy_frame(&mut full, &src);
    if dst_w > src_w || dst_h > src_h {
        assert!(result.is_err());
        return;
    }
    result.unwrap();

    let mut sliced = VideoFrame::alloc(format, dst_w, dst_h).unwrap();
    {
        let job = CropJob::new(&mut sliced, &src, nb_jobs).unwrap();
        let n = job.nb_jobs();
        for index in (0..n).rev() {
            job.run(index, n).unwrap();
        }
    }
    assert_eq!(full.planes, sliced.planes);
});
