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

//! Padding between and after options
//!
//! A gap of a single byte is filled with a Pad1 option, any larger gap with a single PadN option
//! whose zero filled data makes up the rest of the gap.

use crate::{
    option::{MAX_OPTION_DATA_LEN, OPTION_HEADER_LEN},
    types::OptionType,
};

/// Size of a Pad1 option.
pub const PAD1_LEN: usize = 1;

/// Minimum size of a PadN option, type and length without data.
pub const PADN_MIN_LEN: usize = OPTION_HEADER_LEN;

/// Largest gap which can be filled with a single padding option.
pub const MAX_GAP: usize = OPTION_HEADER_LEN + MAX_OPTION_DATA_LEN;

/// Fills the first `gap` bytes of `buf` with padding.
///
/// Returns the number of bytes written, which is always `gap`.
///
/// Panics if `buf` is shorter than `gap`.
pub fn insert_padding(buf: &mut [u8], gap: usize) -> usize {
    debug_assert!(gap <= MAX_GAP, "padding gap {gap} exceeds a single option");

    match gap {
        0 => {}
        PAD1_LEN => buf[0] = OptionType::Pad1.into(),
        _ => {
            let buf = &mut buf[..gap];
            buf[0] = OptionType::PadN.into();
            buf[1] = (gap - PADN_MIN_LEN) as u8;
            buf[PADN_MIN_LEN..].fill(0);
        }
    }

    gap
}

/// Returns the number of bytes needed after `offset` to reach the next line boundary.
pub const fn trailing_padding(offset: usize) -> usize {
    use crate::core::layout::LINE_LEN;

    (LINE_LEN - offset % LINE_LEN) % LINE_LEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_not_write_empty_gap() {
        let mut buf = [0xffu8; 2];
        assert_eq!(insert_padding(&mut buf, 0), 0);
        assert_eq!(buf, [0xff, 0xff]);
    }

    #[test]
    fn should_fill_single_byte_with_pad1() {
        let mut buf = [0xffu8; 2];
        assert_eq!(insert_padding(&mut buf, 1), 1);
        assert_eq!(buf, [0, 0xff]);
    }

    #[test]
    fn should_fill_two_bytes_with_empty_padn() {
        let mut buf = [0xffu8; 3];
        insert_padding(&mut buf, 2);
        assert_eq!(buf, [1, 0, 0xff]);
    }

    #[test]
    fn should_fill_three_bytes_with_single_padn() {
        let mut buf = [0xffu8; 4];
        insert_padding(&mut buf, 3);
        assert_eq!(buf, [1, 1, 0, 0xff]);
    }

    #[test]
    fn should_pad_to_next_line() {
        assert_eq!(trailing_padding(4), 0);
        assert_eq!(trailing_padding(5), 3);
        assert_eq!(trailing_padding(6), 2);
        assert_eq!(trailing_padding(7), 1);
    }
}
