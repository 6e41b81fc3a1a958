// Copyright 2026 Anapaya Systems
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Extension header layout calculations

use crate::{
    core::{
        layout::{Layout, units_to_len},
        view::DecodeError,
    },
    option::view::validate_region,
    types::ProtocolType,
};

/// Size of the common header of an extension, next header and length.
pub const COMMON_HEADER_LEN: usize = 2;

/// Maximum size of an extension header in bytes.
pub const MAX_EXTN_LEN: usize = units_to_len(u8::MAX);

/// Byte offset of the next header field.
pub const NEXT_HDR_OFFSET: usize = 0;

/// Byte offset of the length field.
pub const EXT_LEN_OFFSET: usize = 1;

/// Layout of an extension header
///
/// ```text
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |    NextHdr    |     ExtLen    |            Options            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+                               +
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtnLayout {
    /// Value of the next header field
    pub next_header: ProtocolType,
    /// Value of the length field
    pub ext_len: u8,
    /// Total length of the extension in bytes, including the common header
    pub actual_len: usize,
}
impl ExtnLayout {
    /// Reads the common header and checks that the buffer holds the advertised length.
    ///
    /// Does not look at the options.
    pub fn from_header(buf: &[u8]) -> Result<Self, DecodeError> {
        if buf.len() < COMMON_HEADER_LEN {
            return Err(DecodeError::TruncatedBuffer {
                at: "ExtnHeader",
                required: COMMON_HEADER_LEN,
                actual: buf.len(),
            });
        }

        let next_header = ProtocolType::from(buf[NEXT_HDR_OFFSET]);
        let ext_len = buf[EXT_LEN_OFFSET];
        let actual_len = units_to_len(ext_len);

        if buf.len() < actual_len {
            return Err(DecodeError::TruncatedBuffer {
                at: "ExtnOptions",
                required: actual_len,
                actual: buf.len(),
            });
        }

        Ok(ExtnLayout {
            next_header,
            ext_len,
            actual_len,
        })
    }

    /// Reads the common header and validates every option of the extension.
    pub fn from_slice(buf: &[u8]) -> Result<Self, DecodeError> {
        let layout = Self::from_header(buf)?;
        layout.validate_options(buf)?;
        Ok(layout)
    }

    /// Validates that the option region of the extension consists of well formed options.
    ///
    /// `buf` must be the buffer the layout was read from.
    pub fn validate_options(&self, buf: &[u8]) -> Result<usize, DecodeError> {
        validate_region(&buf[self.options_range()])
    }

    /// Returns the byte range of the option region.
    pub fn options_range(&self) -> std::ops::Range<usize> {
        COMMON_HEADER_LEN..self.actual_len
    }
}
impl Layout for ExtnLayout {
    fn size_bytes(&self) -> usize {
        self.actual_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_read_header() {
        let layout = ExtnLayout::from_slice(&[17, 1, 0, 0, 0, 0, 0, 0, 0xee]).unwrap();
        assert_eq!(layout.next_header, ProtocolType::Udp);
        assert_eq!(layout.ext_len, 1);
        assert_eq!(layout.size_bytes(), 8);
        assert_eq!(layout.options_range(), 2..8);
    }

    #[test]
    fn should_reject_missing_header() {
        assert_eq!(
            ExtnLayout::from_header(&[17]),
            Err(DecodeError::TruncatedBuffer {
                at: "ExtnHeader",
                required: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn should_reject_buffer_shorter_than_advertised() {
        let err = ExtnLayout::from_header(&[17, 1, 0, 0, 0, 0]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TruncatedBuffer {
                at: "ExtnOptions",
                required: 8,
                actual: 6
            }
        );
        assert_eq!(err.deficit(), Some(2));
    }

    #[test]
    fn should_reject_option_crossing_extension_end() {
        // PadN claims 4 data bytes, only 2 are left in the extension
        assert!(matches!(
            ExtnLayout::from_slice(&[17, 0, 1, 4, 0, 0, 0, 0]),
            Err(DecodeError::TruncatedBuffer { at: "OptionData", .. })
        ));
    }

    #[test]
    fn should_have_max_len_of_256_lines() {
        assert_eq!(MAX_EXTN_LEN, 1024);
    }
}
