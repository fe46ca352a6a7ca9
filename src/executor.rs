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

use crate::frame_error::FrameError;
#[cfg(feature = "rayon")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};

/// Slice job callback: receives the slice index and the total slice count.
pub type SliceJob<'a> = dyn Fn(usize, usize) -> Result<(), FrameError> + Sync + 'a;

/// Runs a slice job once for every index in `0..nb_jobs` and joins.
///
/// Returns only after every started slice finished. The first failing slice
/// decides the returned error.
pub trait SliceExecutor {
    fn execute(&self, job: &SliceJob<'_>, nb_jobs: usize) -> Result<(), FrameError>;
}

/// Runs slices one after another on the calling thread.
#[derive(Debug, Default, Copy, Clone)]
pub struct SequentialExecutor;

impl SliceExecutor for SequentialExecutor {
    fn execute(&self, job: &SliceJob<'_>, nb_jobs: usize) -> Result<(), FrameError> {
        for index in 0..nb_jobs {
            job(index, nb_jobs)?;
        }
        Ok(())
    }
}

/// Runs slices on a rayon thread pool, the global one unless built with [RayonExecutor::with_threads].
#[cfg(feature = "rayon")]
#[derive(Debug, Default)]
pub struct RayonExecutor {
    pool: Option<rayon::ThreadPool>,
}

#[cfg(feature = "rayon")]
impl RayonExecutor {
    pub fn new() -> Self {
        RayonExecutor { pool: None }
    }

    pub fn with_threads(threads: usize) -> Result<Self, rayon::ThreadPoolBuildError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("halfcrop-slice-{}", index))
            .build()?;
        Ok(RayonExecutor { pool: Some(pool) })
    }

    /// Worker threads available to a single execution.
    pub fn thread_count(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }
}

#[cfg(feature = "rayon")]
impl SliceExecutor for RayonExecutor {
    fn execute(&self, job: &SliceJob<'_>, nb_jobs: usize) -> Result<(), FrameError> {
        let run = || {
            (0..nb_jobs)
                .into_par_iter()
                .try_for_each(|index| job(index, nb_jobs))
        };
        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }
}
