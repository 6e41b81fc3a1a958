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

//! Extension header models

use crate::{
    core::{
        encode::{EncodeError, InvalidStructureError, SerializeOptions, WireEncode},
        layout::{LINE_LEN, len_to_units},
        view::{DecodeError, View},
    },
    extension::{
        layout::{COMMON_HEADER_LEN, EXT_LEN_OFFSET, MAX_EXTN_LEN, NEXT_HDR_OFFSET},
        view::{EndToEndExtnView, HopByHopExtnView},
    },
    option::{list, model::ExtnOption},
    types::{OptionType, ProtocolType},
};

/// Represents a SCION hop-by-hop options extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HopByHopExtn {
    /// Type of the header following this extension
    pub next_header: ProtocolType,
    /// Value of the length field.
    ///
    /// Recomputed when encoding with fixed lengths, written verbatim otherwise.
    pub ext_len: u8,
    /// Options in wire order
    pub options: Vec<ExtnOption>,
}

/// Represents a SCION end-to-end options extension
///
/// The next header must not be a hop-by-hop extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndToEndExtn {
    /// Type of the header following this extension
    pub next_header: ProtocolType,
    /// Value of the length field.
    ///
    /// Recomputed when encoding with fixed lengths, written verbatim otherwise.
    pub ext_len: u8,
    /// Options in wire order
    pub options: Vec<ExtnOption>,
}

/// Generates the constructors and accessors shared by both extension models.
macro_rules! impl_extn_model {
    ($name:ident, $view:ident) => {
        impl $name {
            /// Creates a new extension with the given options, all lengths fixed.
            pub fn new(next_header: ProtocolType, options: Vec<ExtnOption>) -> Self {
                let mut extn = $name {
                    next_header,
                    ext_len: 0,
                    options,
                };
                extn.fix_lengths();
                extn
            }

            /// Constructs the extension from a view, copying all options including padding.
            pub fn from_view(view: &$view) -> Self {
                $name {
                    next_header: view.next_header(),
                    ext_len: view.ext_len(),
                    options: view.options().map(ExtnOption::from_view).collect(),
                }
            }

            /// Attempts to construct the extension from a byte slice
            ///
            /// Returns the extension and the remaining payload after it.
            pub fn from_slice(buf: &[u8]) -> Result<(Self, &[u8]), DecodeError> {
                let (view, rest) = $view::from_slice(buf)?;
                Ok((Self::from_view(view), rest))
            }

            /// Recomputes all length fields the way encoding with fixed lengths does.
            ///
            /// Padding inserted by the encoder is not added to the options.
            pub fn fix_lengths(&mut self) {
                self.options.iter_mut().for_each(ExtnOption::fix_length);
                let len = self.required_size_with(SerializeOptions::default());
                self.ext_len = (len / LINE_LEN).saturating_sub(1).min(u8::MAX as usize) as u8;
            }

            /// Returns the first option of the given type.
            pub fn find_option(&self, option_type: OptionType) -> Option<&ExtnOption> {
                self.options
                    .iter()
                    .find(|opt| opt.option_type == option_type)
            }

            /// Returns the first option of the given type, mutably.
            pub fn find_option_mut(&mut self, option_type: OptionType) -> Option<&mut ExtnOption> {
                self.options
                    .iter_mut()
                    .find(|opt| opt.option_type == option_type)
            }

            /// Returns the options without Pad1 and PadN options.
            pub fn non_padding_options(&self) -> impl Iterator<Item = &ExtnOption> {
                self.options.iter().filter(|opt| {
                    !matches!(opt.option_type, OptionType::Pad1 | OptionType::PadN)
                })
            }
        }
    };
}
impl_extn_model!(HopByHopExtn, HopByHopExtnView);
impl_extn_model!(EndToEndExtn, EndToEndExtnView);

impl WireEncode for HopByHopExtn {
    fn required_size_with(&self, opts: SerializeOptions) -> usize {
        extn_required_size(&self.options, opts)
    }

    fn wire_valid_with(&self, opts: SerializeOptions) -> Result<(), EncodeError> {
        extn_wire_valid(&self.options, opts)
    }

    unsafe fn encode_unchecked_with(&self, buf: &mut [u8], opts: SerializeOptions) -> usize {
        encode_extn(buf, self.next_header, self.ext_len, &self.options, opts)
    }
}

impl WireEncode for EndToEndExtn {
    fn required_size_with(&self, opts: SerializeOptions) -> usize {
        extn_required_size(&self.options, opts)
    }

    fn wire_valid_with(&self, opts: SerializeOptions) -> Result<(), EncodeError> {
        if self.next_header == ProtocolType::HopByHop {
            return Err(EncodeError::InvalidExtensionOrder {
                next_header: self.next_header,
            });
        }
        extn_wire_valid(&self.options, opts)
    }

    unsafe fn encode_unchecked_with(&self, buf: &mut [u8], opts: SerializeOptions) -> usize {
        encode_extn(buf, self.next_header, self.ext_len, &self.options, opts)
    }
}

fn extn_required_size(options: &[ExtnOption], opts: SerializeOptions) -> usize {
    COMMON_HEADER_LEN + list::required_length(options, opts)
}

fn extn_wire_valid(options: &[ExtnOption], opts: SerializeOptions) -> Result<(), EncodeError> {
    list::validate_options(options, opts)?;

    let length = extn_required_size(options, opts);
    if !length.is_multiple_of(LINE_LEN) {
        return Err(EncodeError::MisalignedExtension { length });
    }
    if length > MAX_EXTN_LEN {
        return Err(InvalidStructureError::from("extension exceeds 1024 bytes").into());
    }

    Ok(())
}

/// Writes the common header and the options.
///
/// The structure must be valid for encoding and the buffer large enough.
fn encode_extn(
    buf: &mut [u8],
    next_header: ProtocolType,
    ext_len: u8,
    options: &[ExtnOption],
    opts: SerializeOptions,
) -> usize {
    let region_len = list::write_unchecked(&mut buf[COMMON_HEADER_LEN..], options, opts);
    let length = COMMON_HEADER_LEN + region_len;

    buf[NEXT_HDR_OFFSET] = next_header.into();
    buf[EXT_LEN_OFFSET] = if opts.fix_lengths {
        debug_assert!(len_to_units(length).is_some(), "length validated before");
        len_to_units(length).unwrap_or(ext_len)
    } else {
        ext_len
    };

    length
}
