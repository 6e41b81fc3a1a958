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

//! Utilities for encoding model representations into byte buffers
//!
//! All model structures intended for encoding should implement the `WireEncode` trait.
//!
//! This trait has three main responsibilities:
//!
//! 1. Calculating the required size for the wire encoding
//! 2. Validating that the structure is in a valid state for encoding
//! 3. Writing the wire format into a provided byte buffer
//!
//! Sizing and writing follow a two-phase protocol. The size is always computed by running the same
//! placement algorithm as the write without touching a buffer, so a caller can allocate exactly
//! `required_size_with(opts)` bytes and is guaranteed that the write fills them completely.
//!
//! ### Validation
//!
//! Validation does not mean comprehensive semantic validation of all fields. It only ensures that
//! encoding would not lead to an invalid wire format, e.g. an option whose data does not fit into
//! its one byte length field, or an extension whose length is not a multiple of 4 bytes.

use crate::types::ProtocolType;

/// Options controlling how models are serialized.
///
/// The default fixes all lengths, which is what should be used when building new headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SerializeOptions {
    /// Recompute all length fields from the actual data and apply option alignment.
    ///
    /// If disabled, the length fields stored in the models are written verbatim and no alignment
    /// padding is inserted. This is meant for re-emitting headers whose lengths are already known
    /// to be correct, e.g. when forwarding a decoded header.
    pub fix_lengths: bool,
}
impl Default for SerializeOptions {
    fn default() -> Self {
        Self { fix_lengths: true }
    }
}
impl SerializeOptions {
    /// Options which write all length fields verbatim.
    pub const VERBATIM: Self = Self { fix_lengths: false };
}

/// Allows encoding to wire format.
pub trait WireEncode {
    /// Returns the size required for the wire encoding with the given options.
    ///
    /// ## Safety
    /// This size must be correct, it is used to validate buffer sizes in `encode_with`.
    /// If this size is smaller than the actual encoded size, undefined behavior will occur.
    fn required_size_with(&self, opts: SerializeOptions) -> usize;

    /// Validates that all fields in the structure are valid for encoding with the given options.
    ///
    /// Note: This only checks the minimal set of fields required for encoding, do not expect
    /// comprehensive validation.
    fn wire_valid_with(&self, opts: SerializeOptions) -> Result<(), EncodeError>;

    /// Writes the wire encoding into the provided buffer.
    ///
    /// Returns the number of bytes written.
    ///
    /// ## Safety
    /// 1. The buffer must be at least `self.required_size_with(opts)` bytes long
    /// 2. The structure must be valid for encoding, i.e., `self.wire_valid_with(opts)` must return
    ///    `Ok(())`
    unsafe fn encode_unchecked_with(&self, buf: &mut [u8], opts: SerializeOptions) -> usize;

    /// Writes the wire encoding into the provided buffer.
    ///
    /// Returns the number of bytes written on success. Fails if the structure is invalid or if the
    /// buffer is smaller than `self.required_size_with(opts)`.
    fn encode_with(&self, buf: &mut [u8], opts: SerializeOptions) -> Result<usize, EncodeError> {
        self.wire_valid_with(opts)?;

        let required_size = self.required_size_with(opts);
        if buf.len() < required_size {
            return Err(EncodeError::BufferTooSmall(required_size));
        }

        // SAFETY: structure is validated and buffer length is checked above
        unsafe { Ok(self.encode_unchecked_with(buf, opts)) }
    }

    /// Encodes into a freshly allocated buffer of exactly the required size.
    fn encode_to_vec_with(&self, opts: SerializeOptions) -> Result<Vec<u8>, EncodeError> {
        self.wire_valid_with(opts)?;

        let mut buf = vec![0u8; self.required_size_with(opts)];
        // SAFETY: structure is validated and buffer is allocated with the required size
        let written = unsafe { self.encode_unchecked_with(&mut buf, opts) };
        debug_assert_eq!(written, buf.len(), "dry run and write disagree on size");

        Ok(buf)
    }

    /// Returns the size required for the wire encoding with default options.
    fn required_size(&self) -> usize {
        self.required_size_with(SerializeOptions::default())
    }

    /// Validates the structure for encoding with default options.
    fn wire_valid(&self) -> Result<(), EncodeError> {
        self.wire_valid_with(SerializeOptions::default())
    }

    /// Writes the wire encoding into the provided buffer using default options.
    fn encode(&self, buf: &mut [u8]) -> Result<usize, EncodeError> {
        self.encode_with(buf, SerializeOptions::default())
    }

    /// Encodes into a freshly allocated buffer using default options.
    fn encode_to_vec(&self) -> Result<Vec<u8>, EncodeError> {
        self.encode_to_vec_with(SerializeOptions::default())
    }
}

/// Errors that can occur during encoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// The structure which was attempted to be encoded is invalid.
    #[error(transparent)]
    InvalidStructure(#[from] InvalidStructureError),
    /// The provided buffer is too small.
    #[error("buffer too small: required {0}")]
    BufferTooSmall(usize),
    /// The extension does not add up to a multiple of 4 bytes.
    #[error("extension length must be a multiple of 4, got {length}")]
    MisalignedExtension {
        /// Total length of the extension in bytes, including the 2-byte common header
        length: usize,
    },
    /// An end-to-end extension must not be followed by a hop-by-hop extension.
    #[error("end-to-end extension must not come before the hop-by-hop extension ({next_header:?})")]
    InvalidExtensionOrder {
        /// The offending next header value
        next_header: ProtocolType,
    },
}

/// Given Structure has invalid fields to encode correctly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot encode structure: {0}")]
pub struct InvalidStructureError(&'static str);
impl From<&'static str> for InvalidStructureError {
    fn from(s: &'static str) -> Self {
        InvalidStructureError(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(usize);
    impl WireEncode for Fixed {
        fn required_size_with(&self, _opts: SerializeOptions) -> usize {
            self.0
        }

        fn wire_valid_with(&self, _opts: SerializeOptions) -> Result<(), EncodeError> {
            if self.0 == 0 {
                return Err(InvalidStructureError::from("empty").into());
            }
            Ok(())
        }

        unsafe fn encode_unchecked_with(&self, buf: &mut [u8], _opts: SerializeOptions) -> usize {
            buf[..self.0].fill(0xff);
            self.0
        }
    }

    #[test]
    fn should_fix_lengths_by_default() {
        assert!(SerializeOptions::default().fix_lengths);
        assert!(!SerializeOptions::VERBATIM.fix_lengths);
    }

    #[test]
    fn should_report_required_size_on_short_buffer() {
        let mut buf = [0u8; 3];
        assert_eq!(Fixed(4).encode(&mut buf), Err(EncodeError::BufferTooSmall(4)));
    }

    #[test]
    fn should_validate_before_encoding() {
        let mut buf = [0u8; 3];
        assert!(matches!(
            Fixed(0).encode(&mut buf),
            Err(EncodeError::InvalidStructure(_))
        ));
    }

    #[test]
    fn should_encode_to_exactly_sized_vec() {
        assert_eq!(Fixed(3).encode_to_vec().unwrap(), vec![0xff; 3]);
    }
}
