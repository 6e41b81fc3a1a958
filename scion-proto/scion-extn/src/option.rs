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

//! TLV options carried inside extension headers.
//!
//! ```text
//! Pad1:      +-+-+-+-+-+-+-+-+
//!            |       0       |
//!            +-+-+-+-+-+-+-+-+
//!
//! Other:     +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+- - - - - - - - -
//!            |    OptType    |  OptDataLen   |  OptData
//!            +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+- - - - - - - - -
//! ```

use crate::types::OptionType;

pub mod list;
pub mod model;
pub mod padding;
pub mod view;

/// Size of the type and length fields preceding the data of all options except Pad1.
pub const OPTION_HEADER_LEN: usize = 2;

/// Maximum length of the data of a single option.
pub const MAX_OPTION_DATA_LEN: usize = u8::MAX as usize;

/// Read access shared by owned options and option views.
pub trait TlvOption {
    /// Returns the option type.
    fn option_type(&self) -> OptionType;

    /// Returns the option data. Empty for Pad1 options.
    fn data(&self) -> &[u8];
}
