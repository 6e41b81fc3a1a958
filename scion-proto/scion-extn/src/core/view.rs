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

//! Utilities for interacting with byte buffers via zero-copy views
//!
//! Views are zero-copy representations of data structures over byte buffers.
//!
//! All views must be #[repr(transparent)] wrappers around `[u8]`. Essentially, this means that
//! every view is just a wide pointer. This allows interpreting byte slices as views via transmute:
//!
//! * &[u8] == &View
//! * &mut [u8] == &mut View
//!
//! Thanks to this, mutability and ownership is fully handled by Rust's built-in types, and a view
//! can never outlive the buffer it was decoded from.
//!
//! ### Safety
//!
//! Core invariant needing to be upheld is that the buffer which the view points to, has been
//! fully validated by [View::has_required_size]. For extension headers this means the header
//! length as well as every option inside it.

use crate::types::ProtocolType;

/// Trait for views over byte buffers
///
/// A view must implement methods to check the required size of the buffer
pub trait View {
    /// Asserts that the buffer has the required size and structure for the view.
    /// Returns the number of bytes used by the view in the buffer.
    ///
    /// # Important
    ///
    /// This function ensures that all view functions are safe to call after it returns Ok.
    /// If this function is incorrectly implemented, it will lead to undefined behavior.
    fn has_required_size(buf: &[u8]) -> Result<usize, DecodeError>;

    /// Converts a slice into the view
    ///
    /// Returns the view and the remaining bytes after it.
    #[inline]
    fn from_slice(buf: &[u8]) -> Result<(&Self, &[u8]), DecodeError> {
        let size = Self::has_required_size(buf)?;

        debug_assert!(buf.len() >= size);

        // SAFETY: size is checked to be at least the required size
        let (view_buf, rest) = unsafe { buf.split_at_unchecked(size) };
        let view = unsafe { Self::from_slice_unchecked(view_buf) };

        Ok((view, rest))
    }

    /// Converts a mutable slice into the view
    ///
    /// Returns the view and the remaining bytes after it.
    #[inline]
    fn from_mut_slice(buf: &mut [u8]) -> Result<(&mut Self, &mut [u8]), DecodeError> {
        let size = Self::has_required_size(buf)?;

        debug_assert!(buf.len() >= size);

        // SAFETY: size is checked to be at least the required size
        let (view_buf, rest) = unsafe { buf.split_at_mut_unchecked(size) };
        let view = unsafe { Self::from_mut_slice_unchecked(view_buf) };

        Ok((view, rest))
    }

    /// Returns the underlying byte representation of the view
    fn as_bytes(&self) -> &[u8];

    /// Converts the slice into the view without checking sizes
    ///
    /// # Safety
    /// The caller must ensure that the buffer passes [View::has_required_size] and is exactly as
    /// long as the size it returned.
    unsafe fn from_slice_unchecked(buf: &[u8]) -> &Self;

    /// Converts the mutable slice into the view without checking sizes
    ///
    /// # Safety
    /// The caller must ensure that the buffer passes [View::has_required_size] and is exactly as
    /// long as the size it returned.
    unsafe fn from_mut_slice_unchecked(buf: &mut [u8]) -> &mut Self;
}

/// Errors that can occur while decoding a view
#[derive(Clone, Copy, Debug, thiserror::Error, PartialEq, Eq, Hash)]
pub enum DecodeError {
    /// Fewer bytes are available than a length field declares
    #[error("buffer too short at {at}: required {required}, got {actual}")]
    TruncatedBuffer {
        /// Location where the error occurred
        at: &'static str,
        /// Required size in bytes
        required: usize,
        /// Actual size in bytes
        actual: usize,
    },
    /// An extension header is followed by an extension which must not come after it, e.g. an
    /// end-to-end extension claiming a hop-by-hop extension as its next header
    #[error("invalid extension order: next header {next_header:?} not allowed here")]
    InvalidExtensionOrder {
        /// The offending next header value
        next_header: ProtocolType,
    },
}
impl DecodeError {
    /// Returns the number of missing bytes for truncation errors.
    pub fn deficit(&self) -> Option<usize> {
        match self {
            DecodeError::TruncatedBuffer {
                required, actual, ..
            } => Some(required.saturating_sub(*actual)),
            DecodeError::InvalidExtensionOrder { .. } => None,
        }
    }
}

/// Implements the transmute based conversions of the [View] trait for a `#[repr(transparent)]`
/// wrapper around `[u8]`.
macro_rules! impl_view_conversions {
    () => {
        #[inline]
        unsafe fn from_slice_unchecked(buf: &[u8]) -> &Self {
            // SAFETY: Self is #[repr(transparent)] over [u8]
            unsafe { std::mem::transmute(buf) }
        }

        #[inline]
        unsafe fn from_mut_slice_unchecked(buf: &mut [u8]) -> &mut Self {
            // SAFETY: Self is #[repr(transparent)] over [u8]
            unsafe { std::mem::transmute(buf) }
        }

        #[inline]
        fn as_bytes(&self) -> &[u8] {
            &self.0
        }
    };
}
pub(crate) use impl_view_conversions;
