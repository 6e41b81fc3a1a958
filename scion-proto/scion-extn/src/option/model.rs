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

//! Owned option model

use crate::{
    option::{OPTION_HEADER_LEN, TlvOption, view::OptionView},
    types::{Alignment, OptionType},
};

/// A TLV option of an extension header.
///
/// The same representation is used for hop-by-hop and end-to-end options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtnOption {
    /// Type of the option
    pub option_type: OptionType,
    /// Value of the length field.
    ///
    /// Recomputed from `data` when encoding with fixed lengths, written verbatim otherwise.
    pub data_len: u8,
    /// Option data
    pub data: Vec<u8>,
    /// Alignment requirement of the first byte of the option, relative to the start of the
    /// extension header. Not part of the wire format.
    pub alignment: Alignment,
}
impl ExtnOption {
    /// Creates a new option without alignment requirement.
    ///
    /// Data longer than 255 bytes can not be encoded, the length field saturates.
    pub fn new(option_type: OptionType, data: Vec<u8>) -> Self {
        ExtnOption {
            option_type,
            data_len: saturating_len(&data),
            data,
            alignment: Alignment::NONE,
        }
    }

    /// Creates a single byte padding option.
    pub fn pad1() -> Self {
        Self::new(OptionType::Pad1, Vec::new())
    }

    /// Creates a multi byte padding option with `data_len` zero bytes of data.
    pub fn pad_n(data_len: u8) -> Self {
        Self::new(OptionType::PadN, vec![0; data_len as usize])
    }

    /// Sets the alignment requirement.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Constructs an option from an option view, copying its data.
    ///
    /// Alignment is not part of the wire format, options of known types get their well known
    /// alignment back so that they are placed correctly when encoded again.
    pub fn from_view(view: &OptionView) -> Self {
        let alignment = match view.option_type() {
            OptionType::Authenticator => Alignment::AUTHENTICATOR,
            _ => Alignment::NONE,
        };
        ExtnOption {
            option_type: view.option_type(),
            data_len: view.data_len(),
            data: view.data().to_vec(),
            alignment,
        }
    }

    /// Returns true if this is a single byte padding option.
    pub fn is_pad1(&self) -> bool {
        self.option_type == OptionType::Pad1
    }

    /// Returns the number of bytes the option occupies on the wire.
    pub fn encoded_length(&self, fix_lengths: bool) -> usize {
        if self.is_pad1() {
            return 1;
        }
        if fix_lengths {
            self.data.len() + OPTION_HEADER_LEN
        } else {
            self.data_len as usize + OPTION_HEADER_LEN
        }
    }

    /// Returns the number of bytes the option occupies on the wire according to its length field.
    pub fn actual_length(&self) -> usize {
        self.encoded_length(false)
    }

    /// Recomputes the length field from the data.
    pub fn fix_length(&mut self) {
        self.data_len = if self.is_pad1() {
            0
        } else {
            saturating_len(&self.data)
        };
    }

    /// Writes the option to the start of `buf`.
    ///
    /// Returns the number of bytes written, which is always `self.encoded_length(fix_lengths)`.
    /// When writing verbatim lengths, data shorter than the length field is zero padded.
    ///
    /// Panics if `buf` is shorter than `self.encoded_length(fix_lengths)`.
    pub(crate) fn write(&self, buf: &mut [u8], fix_lengths: bool) -> usize {
        let len = self.encoded_length(fix_lengths);
        let buf = &mut buf[..len];

        if self.is_pad1() {
            buf[0] = 0;
            return len;
        }

        let data_len = if fix_lengths {
            saturating_len(&self.data)
        } else {
            self.data_len
        };
        buf[0] = self.option_type.into();
        buf[1] = data_len;

        let data_buf = &mut buf[OPTION_HEADER_LEN..];
        let copied = data_buf.len().min(self.data.len());
        data_buf[..copied].copy_from_slice(&self.data[..copied]);
        data_buf[copied..].fill(0);

        len
    }
}
impl TlvOption for ExtnOption {
    fn option_type(&self) -> OptionType {
        self.option_type
    }

    fn data(&self) -> &[u8] {
        &self.data
    }
}

fn saturating_len(data: &[u8]) -> u8 {
    data.len().min(u8::MAX as usize) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_compute_encoded_length() {
        assert_eq!(ExtnOption::pad1().encoded_length(true), 1);
        assert_eq!(ExtnOption::pad1().encoded_length(false), 1);

        let mut opt = ExtnOption::new(OptionType::Other(9), vec![1, 2, 3]);
        assert_eq!(opt.encoded_length(true), 5);

        opt.data_len = 7;
        assert_eq!(opt.encoded_length(true), 5);
        assert_eq!(opt.encoded_length(false), 9);
        assert_eq!(opt.actual_length(), 9);
    }

    #[test]
    fn should_write_pad1_as_single_zero() {
        let mut buf = [0xffu8; 2];
        assert_eq!(ExtnOption::pad1().write(&mut buf, true), 1);
        assert_eq!(buf, [0, 0xff]);
    }

    #[test]
    fn should_write_fixed_length() {
        let mut opt = ExtnOption::new(OptionType::Other(9), vec![0xaa, 0xbb]);
        opt.data_len = 200;

        let mut buf = [0xffu8; 5];
        assert_eq!(opt.write(&mut buf, true), 4);
        assert_eq!(buf, [9, 2, 0xaa, 0xbb, 0xff]);
    }

    #[test]
    fn should_write_verbatim_length_zero_padded() {
        let mut opt = ExtnOption::new(OptionType::Other(9), vec![0xaa]);
        opt.data_len = 3;

        let mut buf = [0xffu8; 6];
        assert_eq!(opt.write(&mut buf, false), 5);
        assert_eq!(buf, [9, 3, 0xaa, 0, 0, 0xff]);
    }

    #[test]
    fn should_fix_length_from_data() {
        let mut opt = ExtnOption::new(OptionType::PadN, vec![0; 4]);
        opt.data_len = 0;
        opt.fix_length();
        assert_eq!(opt.data_len, 4);
    }
}
