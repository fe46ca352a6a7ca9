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
use std::str::FromStr;

/// User facing options of the crop filter.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CropOptions {
    /// Reserved string option, stored but not interpreted.
    pub back_up: String,
}

impl Default for CropOptions {
    fn default() -> Self {
        CropOptions {
            back_up: "0".to_string(),
        }
    }
}

impl CropOptions {
    /// Option names in positional order.
    pub const NAMES: [&'static str; 1] = ["backUp"];

    pub fn with_back_up(mut self, value: impl Into<String>) -> Self {
        self.back_up = value.into();
        self
    }

    /// Parses a filter argument string such as `backUp=1`.
    ///
    /// Entries are separated by `:`; an entry without `=` sets the option at
    /// its position. Empty input yields the defaults.
    pub fn parse(args: &str) -> Result<CropOptions, FrameError> {
        let mut options = CropOptions::default();
        for (position, entry) in args.split(':').enumerate() {
            if entry.is_empty() {
                continue;
            }
            let (key, value) = match entry.split_once('=') {
                Some((key, value)) => (key, value),
                None => match CropOptions::NAMES.get(position) {
                    Some(key) => (*key, entry),
                    None => return Err(FrameError::InvalidOption(entry.to_string())),
                },
            };
            match key {
                "backUp" => options.back_up = value.to_string(),
                _ => return Err(FrameError::InvalidOption(key.to_string())),
            }
        }
        Ok(options)
    }
}

impl FromStr for CropOptions {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CropOptions::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(CropOptions::parse("").unwrap().back_up, "0");
        assert_eq!(CropOptions::default().back_up, "0");
    }

    #[test]
    fn test_named_and_positional() {
        assert_eq!(CropOptions::parse("backUp=abc").unwrap().back_up, "abc");
        assert_eq!(CropOptions::parse("xyz").unwrap().back_up, "xyz");
        let options: CropOptions = "backUp=".parse().unwrap();
        assert_eq!(options.back_up, "");
    }

    #[test]
    fn test_rejects_unknown() {
        assert_eq!(
            CropOptions::parse("w=100"),
            Err(FrameError::InvalidOption("w".to_string()))
        );
        assert_eq!(
            CropOptions::parse("a:b"),
            Err(FrameError::InvalidOption("b".to_string()))
        );
    }
}
