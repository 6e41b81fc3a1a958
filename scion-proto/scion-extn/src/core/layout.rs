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

//! Utilities for describing the layout of extension headers
//!
//! Layouts are the source of truth for the structure of the headers. They define the size and
//! position of fields, where the views and models use the layout definitions to read/write data
//! from/to byte buffers.
//!
//! Layouts are on the hot path for view construction, so they should be cheap to compute.

/// Length of a SCION line in bytes.
///
/// Header lengths in SCION are expressed in multiples of this unit.
pub const LINE_LEN: usize = 4;

/// Trait representing the layout of a protocol header or field
pub trait Layout {
    /// Returns the expected size of the layout in bytes
    fn size_bytes(&self) -> usize;
}

/// Converts a length field in lines-minus-one into a length in bytes.
#[inline]
pub const fn units_to_len(units: u8) -> usize {
    (units as usize + 1) * LINE_LEN
}

/// Converts a length in bytes into a length field in lines-minus-one.
///
/// Returns None if the length is zero, not a multiple of [LINE_LEN], or too large to be
/// represented.
#[inline]
pub const fn len_to_units(len: usize) -> Option<u8> {
    if len == 0 || !len.is_multiple_of(LINE_LEN) {
        return None;
    }
    let units = len / LINE_LEN - 1;
    if units > u8::MAX as usize {
        return None;
    }
    Some(units as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_units_to_len() {
        assert_eq!(units_to_len(0), 4);
        assert_eq!(units_to_len(5), 24);
        assert_eq!(units_to_len(255), 1024);
    }

    #[test]
    fn should_convert_len_to_units() {
        assert_eq!(len_to_units(4), Some(0));
        assert_eq!(len_to_units(24), Some(5));
        assert_eq!(len_to_units(1024), Some(255));
    }

    #[test]
    fn should_reject_unrepresentable_len() {
        assert_eq!(len_to_units(0), None);
        assert_eq!(len_to_units(6), None);
        assert_eq!(len_to_units(1028), None);
    }
}
