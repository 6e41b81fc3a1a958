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

//! Extension header views
//!
//! See [`View`](crate::core::view) for more information about views in general.
//!
//! [ExtnView] gives access to the fields shared by both extension types. The typed views
//! [HopByHopExtnView] and [EndToEndExtnView] dereference to it and add the decode time invariants
//! of their extension type.

use std::{
    fmt::Debug,
    ops::{Deref, DerefMut},
};

use crate::{
    core::{
        layout::Layout,
        view::{DecodeError, View, impl_view_conversions},
    },
    extension::layout::{COMMON_HEADER_LEN, EXT_LEN_OFFSET, ExtnLayout, NEXT_HDR_OFFSET},
    option::view::{OptionView, OptionsIter, OptionsIterMut},
    types::{LayerType, OptionType, ProtocolType},
};

/// A view over an extension header of either type.
#[repr(transparent)]
pub struct ExtnView([u8]);
impl View for ExtnView {
    #[inline]
    fn has_required_size(buf: &[u8]) -> Result<usize, DecodeError> {
        Ok(ExtnLayout::from_slice(buf)?.size_bytes())
    }

    impl_view_conversions!();
}
impl ExtnView {
    /// Returns the next header
    #[inline]
    pub fn next_header(&self) -> ProtocolType {
        self.0[NEXT_HDR_OFFSET].into()
    }

    /// Returns the raw length field, the length in 4-byte units minus one
    #[inline]
    pub fn ext_len(&self) -> u8 {
        self.0[EXT_LEN_OFFSET]
    }

    /// Returns the total length of the extension in bytes
    #[inline]
    pub fn actual_len(&self) -> usize {
        self.0.len()
    }

    /// Returns the layer following this extension
    #[inline]
    pub fn next_layer_type(&self) -> LayerType {
        self.next_header().layer_type()
    }

    /// Returns an iterator over all options, including padding
    #[inline]
    pub fn options(&self) -> OptionsIter<'_> {
        OptionsIter::new(&self.0[COMMON_HEADER_LEN..])
    }

    /// Returns a mutable iterator over all options, including padding
    #[inline]
    pub fn options_mut(&mut self) -> OptionsIterMut<'_> {
        OptionsIterMut::new(&mut self.0[COMMON_HEADER_LEN..])
    }

    /// Returns the first option of the given type.
    ///
    /// Later options of the same type are ignored.
    pub fn find_option(&self, option_type: OptionType) -> Option<&OptionView> {
        self.options().find(|opt| opt.option_type() == option_type)
    }

    /// Returns the first option of the given type for in-place modification of its data.
    pub fn find_option_mut(&mut self, option_type: OptionType) -> Option<&mut OptionView> {
        self.options_mut()
            .find(|opt| opt.option_type() == option_type)
    }
}
impl Debug for ExtnView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtnView")
            .field("next_header", &self.next_header())
            .field("ext_len", &self.ext_len())
            .field("options", &self.options().collect::<Vec<_>>())
            .finish()
    }
}

/// Implements dereferencing a typed extension view to [ExtnView].
macro_rules! impl_extn_deref {
    ($name:ident) => {
        impl Deref for $name {
            type Target = ExtnView;

            #[inline]
            fn deref(&self) -> &ExtnView {
                // SAFETY: both views are #[repr(transparent)] over the same validated bytes
                unsafe { ExtnView::from_slice_unchecked(&self.0) }
            }
        }
        impl DerefMut for $name {
            #[inline]
            fn deref_mut(&mut self) -> &mut ExtnView {
                // SAFETY: both views are #[repr(transparent)] over the same validated bytes
                unsafe { ExtnView::from_mut_slice_unchecked(&mut self.0) }
            }
        }
        impl Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("next_header", &self.next_header())
                    .field("ext_len", &self.ext_len())
                    .field("options", &self.options().collect::<Vec<_>>())
                    .finish()
            }
        }
    };
}

/// A view over a hop-by-hop options extension.
#[repr(transparent)]
pub struct HopByHopExtnView([u8]);
impl View for HopByHopExtnView {
    #[inline]
    fn has_required_size(buf: &[u8]) -> Result<usize, DecodeError> {
        ExtnView::has_required_size(buf)
    }

    impl_view_conversions!();
}
impl_extn_deref!(HopByHopExtnView);

/// A view over an end-to-end options extension.
///
/// Decoding fails if the next header is a hop-by-hop extension.
#[repr(transparent)]
pub struct EndToEndExtnView([u8]);
impl View for EndToEndExtnView {
    #[inline]
    fn has_required_size(buf: &[u8]) -> Result<usize, DecodeError> {
        let layout = ExtnLayout::from_header(buf)?;
        if layout.next_header == ProtocolType::HopByHop {
            return Err(DecodeError::InvalidExtensionOrder {
                next_header: layout.next_header,
            });
        }
        layout.validate_options(buf)?;
        Ok(layout.size_bytes())
    }

    impl_view_conversions!();
}
impl_extn_deref!(EndToEndExtnView);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_decode_two_pad1() {
        let buf = [6, 0, 0, 0];
        let (view, payload) = HopByHopExtnView::from_slice(&buf).unwrap();

        assert_eq!(view.next_header(), ProtocolType::Tcp);
        assert_eq!(view.actual_len(), 4);
        assert!(payload.is_empty());

        let options: Vec<_> = view.options().collect();
        assert_eq!(options.len(), 2);
        assert!(options.iter().all(|opt| opt.option_type() == OptionType::Pad1));
    }

    #[test]
    fn should_split_payload() {
        let buf = [17, 0, 1, 0, 0xde, 0xad];
        let (view, payload) = ExtnView::from_slice(&buf).unwrap();
        assert_eq!(view.next_layer_type(), LayerType::Udp);
        assert_eq!(payload, &[0xde, 0xad]);
    }

    #[test]
    fn should_reject_hop_by_hop_after_end_to_end() {
        let buf = [200, 0, 0, 0];
        assert_eq!(
            EndToEndExtnView::from_slice(&buf).unwrap_err(),
            DecodeError::InvalidExtensionOrder {
                next_header: ProtocolType::HopByHop
            }
        );
        // The same bytes are fine as a hop-by-hop extension
        assert!(HopByHopExtnView::from_slice(&buf).is_ok());
    }

    #[test]
    fn should_report_truncation_before_order() {
        let buf = [200, 1, 0, 0];
        assert!(matches!(
            EndToEndExtnView::from_slice(&buf),
            Err(DecodeError::TruncatedBuffer { .. })
        ));
    }

    #[test]
    fn should_find_first_option_only() {
        let buf = [17, 1, 7, 1, 0xaa, 7, 1, 0xbb, 0, 0];
        let (view, _) = EndToEndExtnView::from_slice(&buf).unwrap();
        assert_eq!(view.find_option(OptionType::Other(7)).unwrap().data(), &[0xaa]);
        assert!(view.find_option(OptionType::Authenticator).is_none());
    }

    #[test]
    fn should_overwrite_option_data_in_place() {
        let mut buf = [17, 1, 7, 1, 0xaa, 7, 1, 0xbb, 0, 0];
        {
            let (view, _) = EndToEndExtnView::from_mut_slice(&mut buf).unwrap();
            view.find_option_mut(OptionType::Other(7))
                .unwrap()
                .data_mut()
                .fill(0);
        }
        assert_eq!(buf, [17, 1, 7, 1, 0, 7, 1, 0xbb, 0, 0]);
    }
}
