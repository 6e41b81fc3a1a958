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

//! Serialization of option lists
//!
//! Options are placed in order. Before an option with an alignment requirement, padding is
//! inserted so that its first byte lands on a matching offset. After the last option, padding is
//! inserted up to the next line boundary.
//!
//! Offsets count the 2-byte common header of the extension, even though the option region itself
//! is addressed from zero. This way alignment is expressed relative to the start of the
//! extension, as defined by the wire format.
//!
//! Alignment and trailing padding are only applied when fixing lengths. Verbatim serialization
//! writes the options back to back, as they are expected to be laid out already.

use crate::{
    core::encode::{EncodeError, InvalidStructureError, SerializeOptions},
    extension::layout::COMMON_HEADER_LEN,
    option::{
        MAX_OPTION_DATA_LEN,
        model::ExtnOption,
        padding::{insert_padding, trailing_padding},
    },
};

/// Returns the length of the option region the options serialize to.
///
/// The returned length excludes the common header.
pub fn required_length(options: &[ExtnOption], opts: SerializeOptions) -> usize {
    serialize(&mut DryRun, options, opts)
}

/// Checks that every option can be written without producing an undecodable region.
///
/// Fails if a Pad1 option carries data, if data does not fit the one byte length field when
/// fixing lengths, or if data exceeds its declared length when writing verbatim.
pub fn validate_options(
    options: &[ExtnOption],
    opts: SerializeOptions,
) -> Result<(), EncodeError> {
    for opt in options {
        if opt.is_pad1() && !opt.data.is_empty() {
            return Err(InvalidStructureError::from("Pad1 option must not carry data").into());
        }
        if opts.fix_lengths && opt.data.len() > MAX_OPTION_DATA_LEN {
            return Err(InvalidStructureError::from("option data exceeds 255 bytes").into());
        }
        if !opts.fix_lengths && !opt.is_pad1() && opt.data.len() > opt.data_len as usize {
            return Err(
                InvalidStructureError::from("option data exceeds its declared length").into(),
            );
        }
    }
    Ok(())
}

/// Serializes the options into the start of `buf`.
///
/// Returns the length of the option region, which is always `required_length(options, opts)`.
/// The options are validated with [validate_options] first.
pub fn write_into(
    buf: &mut [u8],
    options: &[ExtnOption],
    opts: SerializeOptions,
) -> Result<usize, EncodeError> {
    validate_options(options, opts)?;

    let required = required_length(options, opts);
    if buf.len() < required {
        return Err(EncodeError::BufferTooSmall(required));
    }

    Ok(write_unchecked(buf, options, opts))
}

/// Serializes the options into the start of `buf` without validating them.
///
/// Panics if `buf` is shorter than `required_length(options, opts)`.
pub(crate) fn write_unchecked(
    buf: &mut [u8],
    options: &[ExtnOption],
    opts: SerializeOptions,
) -> usize {
    serialize(&mut BufferWriter(buf), options, opts)
}

/// Returns the offset of every option, measured from the start of the extension header.
pub fn option_offsets(options: &[ExtnOption], opts: SerializeOptions) -> Vec<usize> {
    let mut offsets = OffsetRecorder(Vec::with_capacity(options.len()));
    serialize(&mut offsets, options, opts);
    offsets.0
}

/// Receives the placement decisions of the serializer.
///
/// Offsets are relative to the start of the option region.
trait OptionSink {
    fn padding(&mut self, offset: usize, gap: usize);
    fn option(&mut self, offset: usize, option: &ExtnOption, fix_lengths: bool);
}

struct DryRun;
impl OptionSink for DryRun {
    #[inline]
    fn padding(&mut self, _offset: usize, _gap: usize) {}

    #[inline]
    fn option(&mut self, _offset: usize, _option: &ExtnOption, _fix_lengths: bool) {}
}

struct BufferWriter<'a>(&'a mut [u8]);
impl OptionSink for BufferWriter<'_> {
    #[inline]
    fn padding(&mut self, offset: usize, gap: usize) {
        insert_padding(&mut self.0[offset..], gap);
    }

    #[inline]
    fn option(&mut self, offset: usize, option: &ExtnOption, fix_lengths: bool) {
        option.write(&mut self.0[offset..], fix_lengths);
    }
}

struct OffsetRecorder(Vec<usize>);
impl OptionSink for OffsetRecorder {
    fn padding(&mut self, _offset: usize, _gap: usize) {}

    fn option(&mut self, offset: usize, _option: &ExtnOption, _fix_lengths: bool) {
        self.0.push(offset + COMMON_HEADER_LEN);
    }
}

fn serialize<S: OptionSink>(sink: &mut S, options: &[ExtnOption], opts: SerializeOptions) -> usize {
    let fix_lengths = opts.fix_lengths;
    let mut cursor = COMMON_HEADER_LEN;

    for option in options {
        if fix_lengths {
            let gap = option.alignment.padding_at(cursor);
            if gap != 0 {
                sink.padding(cursor - COMMON_HEADER_LEN, gap);
                cursor += gap;
            }
        }

        sink.option(cursor - COMMON_HEADER_LEN, option, fix_lengths);
        cursor += option.encoded_length(fix_lengths);
    }

    if fix_lengths {
        let gap = trailing_padding(cursor);
        if gap != 0 {
            sink.padding(cursor - COMMON_HEADER_LEN, gap);
            cursor += gap;
        }
    }

    cursor - COMMON_HEADER_LEN
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Alignment, OptionType};

    #[test]
    fn should_serialize_empty_list_as_padn() {
        assert_eq!(required_length(&[], SerializeOptions::default()), 2);

        let mut buf = [0xffu8; 2];
        write_into(&mut buf, &[], SerializeOptions::default()).unwrap();
        assert_eq!(buf, [1, 0]);
    }

    #[test]
    fn should_serialize_empty_list_verbatim_as_nothing() {
        assert_eq!(required_length(&[], SerializeOptions::VERBATIM), 0);
    }

    #[test]
    fn should_align_authenticator() {
        let options = [ExtnOption::new(OptionType::Authenticator, vec![0; 17])
            .with_alignment(Alignment::AUTHENTICATOR)];
        let opts = SerializeOptions::default();

        // 3 bytes padding, 19 bytes option, no trailing padding
        assert_eq!(required_length(&options, opts), 22);
        assert_eq!(option_offsets(&options, opts), vec![5]);

        let mut buf = vec![0xffu8; 22];
        assert_eq!(write_into(&mut buf, &options, opts), Ok(22));
        assert_eq!(&buf[..5], &[1, 1, 0, 2, 17]);
        assert!(buf[5..].iter().all(|b| *b == 0));
    }

    #[test]
    fn should_pad_trailing_to_line() {
        let options = [ExtnOption::new(OptionType::Other(7), vec![0xaa])];
        let opts = SerializeOptions::default();

        // 2 + 3 = 5, padded to 8
        assert_eq!(required_length(&options, opts), 6);

        let mut buf = vec![0xffu8; 6];
        write_into(&mut buf, &options, opts).unwrap();
        assert_eq!(buf, vec![7, 1, 0xaa, 1, 1, 0]);
    }

    #[test]
    fn should_skip_alignment_when_verbatim() {
        let options = [ExtnOption::new(OptionType::Authenticator, vec![0; 2])
            .with_alignment(Alignment::AUTHENTICATOR)];

        assert_eq!(required_length(&options, SerializeOptions::VERBATIM), 4);
        assert_eq!(
            option_offsets(&options, SerializeOptions::VERBATIM),
            vec![2]
        );
    }

    #[test]
    fn should_report_short_buffer() {
        let options = [ExtnOption::pad_n(4)];
        let mut buf = [0u8; 4];
        assert_eq!(
            write_into(&mut buf, &options, SerializeOptions::default()),
            Err(EncodeError::BufferTooSmall(6))
        );
    }

    #[test]
    fn should_reject_data_exceeding_length_field() {
        let options = [ExtnOption::new(OptionType::Other(9), vec![0xaa; 300])];
        let mut buf = vec![0u8; 512];
        assert!(matches!(
            write_into(&mut buf, &options, SerializeOptions::default()),
            Err(EncodeError::InvalidStructure(_))
        ));
        // Nothing was written
        assert!(buf.iter().all(|b| *b == 0));
    }

    #[test]
    fn should_reject_verbatim_data_exceeding_declared_length() {
        let mut opt = ExtnOption::new(OptionType::Other(9), vec![1, 2, 3]);
        opt.data_len = 1;

        let mut buf = [0u8; 8];
        assert!(matches!(
            write_into(&mut buf, &[opt], SerializeOptions::VERBATIM),
            Err(EncodeError::InvalidStructure(_))
        ));
    }

    #[test]
    fn should_reject_pad1_with_data() {
        let mut opt = ExtnOption::pad1();
        opt.data = vec![1];

        assert!(matches!(
            validate_options(&[opt], SerializeOptions::default()),
            Err(EncodeError::InvalidStructure(_))
        ));
    }

    #[test]
    fn should_accept_maximum_option_data() {
        let options = [ExtnOption::new(OptionType::Other(9), vec![0xaa; 255])];
        assert_eq!(validate_options(&options, SerializeOptions::default()), Ok(()));
    }
}
