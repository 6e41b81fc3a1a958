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

//! Decoding of the extension header chain following a SCION header.
//!
//! A SCION packet carries at most one hop-by-hop extension followed by at most one end-to-end
//! extension. The chain ends at the first next header which is not an extension.

use crate::{
    core::view::{DecodeError, View},
    extension::view::{EndToEndExtnView, HopByHopExtnView},
    types::{LayerType, ProtocolType},
};

/// The extension headers of a packet
#[derive(Debug)]
pub struct ExtensionChain<'a> {
    /// Hop-by-hop extension, if present
    pub hop_by_hop: Option<&'a HopByHopExtnView>,
    /// End-to-end extension, if present
    pub end_to_end: Option<&'a EndToEndExtnView>,
    /// Protocol of the payload following the extensions
    pub upper_layer: ProtocolType,
    /// Payload following the extensions
    pub payload: &'a [u8],
}
impl<'a> ExtensionChain<'a> {
    /// Decodes all extensions starting with `next_header`, the next header field of the SCION
    /// header, from `buf`, the bytes following the SCION header.
    ///
    /// If `next_header` is not an extension, the chain is empty and `buf` is the payload.
    pub fn parse(next_header: ProtocolType, buf: &'a [u8]) -> Result<Self, DecodeError> {
        let mut chain = ExtensionChain {
            hop_by_hop: None,
            end_to_end: None,
            upper_layer: next_header,
            payload: buf,
        };

        loop {
            match chain.upper_layer.layer_type() {
                LayerType::HopByHopExtn => {
                    if chain.hop_by_hop.is_some() || chain.end_to_end.is_some() {
                        return Err(chain.reject_order());
                    }
                    let (view, rest) = HopByHopExtnView::from_slice(chain.payload)
                        .inspect_err(|err| tracing::debug!(%err, "invalid hop-by-hop extension"))?;
                    tracing::trace!(?view, "decoded hop-by-hop extension");

                    chain.hop_by_hop = Some(view);
                    chain.upper_layer = view.next_header();
                    chain.payload = rest;
                }
                LayerType::EndToEndExtn => {
                    if chain.end_to_end.is_some() {
                        return Err(chain.reject_order());
                    }
                    let (view, rest) = EndToEndExtnView::from_slice(chain.payload)
                        .inspect_err(|err| tracing::debug!(%err, "invalid end-to-end extension"))?;
                    tracing::trace!(?view, "decoded end-to-end extension");

                    chain.end_to_end = Some(view);
                    chain.upper_layer = view.next_header();
                    chain.payload = rest;
                }
                _ => return Ok(chain),
            }
        }
    }

    /// Returns the layer decoding the payload
    pub fn next_layer_type(&self) -> LayerType {
        self.upper_layer.layer_type()
    }

    /// Returns the total length of all extensions in bytes
    pub fn len(&self) -> usize {
        self.hop_by_hop.map_or(0, |e| e.actual_len()) + self.end_to_end.map_or(0, |e| e.actual_len())
    }

    /// Returns true if the packet carries no extensions
    pub fn is_empty(&self) -> bool {
        self.hop_by_hop.is_none() && self.end_to_end.is_none()
    }

    fn reject_order(&self) -> DecodeError {
        tracing::debug!(next_header = ?self.upper_layer, "duplicate or misordered extension");
        DecodeError::InvalidExtensionOrder {
            next_header: self.upper_layer,
        }
    }
}
