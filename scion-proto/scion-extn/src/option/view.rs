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

//! Option views
//!
//! See [`View`](crate::core::view) for more information about views in general.

use std::fmt::Debug;

use crate::{
    core::view::{DecodeError, View, impl_view_conversions},
    option::{OPTION_HEADER_LEN, TlvOption},
    types::OptionType,
};

/// A view over a single TLV option.
///
/// The underlying slice covers exactly the bytes of the option.
#[repr(transparent)]
pub struct OptionView([u8]);
impl View for OptionView {
    fn has_required_size(buf: &[u8]) -> Result<usize, DecodeError> {
        let Some(&raw_type) = buf.first() else {
            return Err(DecodeError::TruncatedBuffer {
                at: "OptionType",
                required: 1,
                actual: 0,
            });
        };

        if OptionType::from(raw_type) == OptionType::Pad1 {
            return Ok(1);
        }

        let Some(&data_len) = buf.get(1) else {
            return Err(DecodeError::TruncatedBuffer {
                at: "OptionDataLen",
                required: OPTION_HEADER_LEN,
                actual: buf.len(),
            });
        };

        let actual_len = data_len as usize + OPTION_HEADER_LEN;
        if buf.len() < actual_len {
            return Err(DecodeError::TruncatedBuffer {
                at: "OptionData",
                required: actual_len,
                actual: buf.len(),
            });
        }

        Ok(actual_len)
    }

    impl_view_conversions!();
}
impl OptionView {
    /// Returns the option type
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.0[0].into()
    }

    /// Returns the value of the length field, 0 for Pad1 options
    #[inline]
    pub fn data_len(&self) -> u8 {
        self.0.get(1).copied().unwrap_or(0)
    }

    /// Returns the number of bytes the option occupies on the wire
    #[inline]
    pub fn actual_len(&self) -> usize {
        self.0.len()
    }

    /// Returns the option data
    #[inline]
    pub fn data(&self) -> &[u8] {
        self.0.get(OPTION_HEADER_LEN..).unwrap_or_default()
    }

    /// Returns the option data for in-place modification.
    ///
    /// The length of the data is fixed by the underlying buffer.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        self.0.get_mut(OPTION_HEADER_LEN..).unwrap_or_default()
    }
}
impl TlvOption for OptionView {
    fn option_type(&self) -> OptionType {
        OptionView::option_type(self)
    }

    fn data(&self) -> &[u8] {
        OptionView::data(self)
    }
}
impl Debug for OptionView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionView")
            .field("option_type", &self.option_type())
            .field("data_len", &self.data_len())
            .field("data", &self.data())
            .finish()
    }
}

/// Iterator over the options in an option region.
///
/// Stops at the end of the region or at the first malformed option. Regions obtained from an
/// extension view are validated on construction of the view, so the latter never happens there.
#[derive(Clone)]
pub struct OptionsIter<'a> {
    rest: &'a [u8],
}
impl<'a> OptionsIter<'a> {
    /// Creates an iterator over the options in the given region.
    pub fn new(region: &'a [u8]) -> Self {
        Self { rest: region }
    }
}
impl<'a> Iterator for OptionsIter<'a> {
    type Item = &'a OptionView;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let (view, rest) = OptionView::from_slice(self.rest).ok()?;
        self.rest = rest;
        Some(view)
    }
}

/// Mutable iterator over the options in an option region.
pub struct OptionsIterMut<'a> {
    rest: &'a mut [u8],
}
impl<'a> OptionsIterMut<'a> {
    /// Creates a mutable iterator over the options in the given region.
    pub fn new(region: &'a mut [u8]) -> Self {
        Self { rest: region }
    }
}
impl<'a> Iterator for OptionsIterMut<'a> {
    type Item = &'a mut OptionView;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = std::mem::take(&mut self.rest);
        if rest.is_empty() {
            return None;
        }
        let (view, rest) = OptionView::from_mut_slice(rest).ok()?;
        self.rest = rest;
        Some(view)
    }
}

/// Validates that the region consists of well formed options only.
///
/// Returns the number of options in the region.
pub(crate) fn validate_region(region: &[u8]) -> Result<usize, DecodeError> {
    let mut offset = 0;
    let mut count = 0;
    while offset < region.len() {
        offset += OptionView::has_required_size(&region[offset..])?;
        count += 1;
    }
    Ok(count)
}
