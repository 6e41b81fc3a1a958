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

//! Scion-Extn: A library for parsing and constructing SCION extension headers.
//!
//! SCION packets may carry two kinds of extension headers between the SCION header and the
//! upper layer protocol:
//!
//! * The hop-by-hop options extension, processed by every router on the path.
//! * The end-to-end options extension, processed only by the endpoints.
//!
//! Both share the same wire format, a 2-byte common header (next header and length) followed by a
//! list of TLV options which may carry alignment requirements.
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |    NextHdr    |     ExtLen    |            Options            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+                               +
//! |                                                               |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Like the rest of the SCION SDK, this crate offers two representations:
//!
//! Views are zero-copy representations over a received buffer, they allow reading options and
//! overwriting option data in place (e.g. zeroing an authenticator MAC).
//!
//! Models are owned data structures intended for building extension headers and encoding them.

pub mod authenticator;
pub mod core;
pub mod extension;
pub mod option;
pub mod types;

pub use authenticator::{AuthenticatorError, PacketAuthenticator, PacketAuthenticatorMut};
pub use extension::{
    chain::ExtensionChain,
    model::{EndToEndExtn, HopByHopExtn},
    view::{EndToEndExtnView, ExtnView, HopByHopExtnView},
};
pub use option::{model::ExtnOption, view::OptionView};
