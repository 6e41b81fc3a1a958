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

//! Packet authenticator option
//!
//! The authenticator option carries a MAC (or signature) over the packet in the end-to-end
//! extension. Its data consists of a one byte algorithm identifier followed by the
//! authenticator itself.
//!
//! ```text
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |   OptType=2   |  OptDataLen   |   Algorithm   |               |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+               +
//! |                     Authenticator (variable)                  |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! The option must start at an offset `4n + 1` from the start of the extension, which puts the
//! authenticator at a 4-byte boundary. The length of the authenticator is determined by the
//! algorithm and is not checked here.

use crate::{
    extension::{model::EndToEndExtn, view::EndToEndExtnView},
    option::{TlvOption, model::ExtnOption, view::OptionView},
    types::{Alignment, AuthenticatorAlgorithm, OptionType},
};

/// Minimum length of the option data, algorithm and at least one authenticator byte.
pub const MIN_DATA_LEN: usize = 2;

/// A parsed packet authenticator, borrowing the authenticator from the option data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketAuthenticator<'a> {
    algorithm: AuthenticatorAlgorithm,
    authenticator: &'a [u8],
}
impl<'a> PacketAuthenticator<'a> {
    /// Parses the data of an authenticator option.
    ///
    /// The option must be of type [OptionType::Authenticator].
    pub fn parse<O: TlvOption + ?Sized>(option: &'a O) -> Result<Self, AuthenticatorError> {
        let (algorithm, authenticator) = split_data(option.option_type(), option.data())?;
        Ok(PacketAuthenticator {
            algorithm,
            authenticator,
        })
    }

    /// Returns the algorithm
    pub fn algorithm(&self) -> AuthenticatorAlgorithm {
        self.algorithm
    }

    /// Returns the authenticator bytes
    pub fn authenticator(&self) -> &'a [u8] {
        self.authenticator
    }
}

/// A parsed packet authenticator which allows overwriting the authenticator in place.
#[derive(Debug, PartialEq, Eq)]
pub struct PacketAuthenticatorMut<'a> {
    algorithm: AuthenticatorAlgorithm,
    authenticator: &'a mut [u8],
}
impl<'a> PacketAuthenticatorMut<'a> {
    /// Parses the data of an authenticator option view.
    ///
    /// The option must be of type [OptionType::Authenticator].
    pub fn parse(option: &'a mut OptionView) -> Result<Self, AuthenticatorError> {
        let option_type = option.option_type();
        let (algorithm, authenticator) = split_data_mut(option_type, option.data_mut())?;
        Ok(PacketAuthenticatorMut {
            algorithm,
            authenticator,
        })
    }

    /// Returns the algorithm
    pub fn algorithm(&self) -> AuthenticatorAlgorithm {
        self.algorithm
    }

    /// Returns the authenticator bytes
    pub fn authenticator(&self) -> &[u8] {
        self.authenticator
    }

    /// Returns the authenticator bytes for in-place modification
    pub fn authenticator_mut(&mut self) -> &mut [u8] {
        self.authenticator
    }

    /// Zeroes the authenticator, e.g. to compare packets whose MAC can not be predicted.
    pub fn zero(&mut self) {
        self.authenticator.fill(0);
    }
}

impl ExtnOption {
    /// Creates a packet authenticator option.
    ///
    /// The alignment is set to `4n + 1`.
    pub fn authenticator(algorithm: AuthenticatorAlgorithm, authenticator: &[u8]) -> Self {
        let mut data = Vec::with_capacity(1 + authenticator.len());
        data.push(algorithm.into());
        data.extend_from_slice(authenticator);

        ExtnOption::new(OptionType::Authenticator, data).with_alignment(Alignment::AUTHENTICATOR)
    }
}

impl EndToEndExtnView {
    /// Returns the first authenticator option.
    ///
    /// Later authenticator options are ignored.
    pub fn find_authenticator(&self) -> Result<PacketAuthenticator<'_>, AuthenticatorError> {
        let option = self
            .find_option(OptionType::Authenticator)
            .ok_or(AuthenticatorError::NotFound)?;
        PacketAuthenticator::parse(option)
    }

    /// Returns the first authenticator option for in-place modification.
    pub fn find_authenticator_mut(
        &mut self,
    ) -> Result<PacketAuthenticatorMut<'_>, AuthenticatorError> {
        let option = self
            .find_option_mut(OptionType::Authenticator)
            .ok_or(AuthenticatorError::NotFound)?;
        PacketAuthenticatorMut::parse(option)
    }
}

impl EndToEndExtn {
    /// Returns the first authenticator option.
    ///
    /// Later authenticator options are ignored.
    pub fn find_authenticator(&self) -> Result<PacketAuthenticator<'_>, AuthenticatorError> {
        let option = self
            .find_option(OptionType::Authenticator)
            .ok_or(AuthenticatorError::NotFound)?;
        PacketAuthenticator::parse(option)
    }
}

fn check_data(option_type: OptionType, data: &[u8]) -> Result<(), AuthenticatorError> {
    if option_type != OptionType::Authenticator {
        return Err(AuthenticatorError::WrongOptionType(option_type));
    }
    if data.len() < MIN_DATA_LEN {
        return Err(AuthenticatorError::TruncatedBuffer {
            required: MIN_DATA_LEN,
            actual: data.len(),
        });
    }
    Ok(())
}

fn split_data(
    option_type: OptionType,
    data: &[u8],
) -> Result<(AuthenticatorAlgorithm, &[u8]), AuthenticatorError> {
    check_data(option_type, data)?;
    let (algorithm, authenticator) = data.split_at(1);
    Ok((algorithm[0].into(), authenticator))
}

fn split_data_mut(
    option_type: OptionType,
    data: &mut [u8],
) -> Result<(AuthenticatorAlgorithm, &mut [u8]), AuthenticatorError> {
    check_data(option_type, data)?;
    let (algorithm, authenticator) = data.split_at_mut(1);
    Ok((algorithm[0].into(), authenticator))
}

/// Errors that can occur when looking up or parsing an authenticator option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum AuthenticatorError {
    /// The extension has no authenticator option
    #[error("no authenticator option")]
    NotFound,
    /// The option is not an authenticator option
    #[error("option of type {0:?} is not an authenticator option")]
    WrongOptionType(OptionType),
    /// The option data is too short to hold an authenticator
    #[error("authenticator option too short: required {required}, got {actual}")]
    TruncatedBuffer {
        /// Required data length in bytes
        required: usize,
        /// Actual data length in bytes
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{encode::WireEncode, view::View},
        types::ProtocolType,
    };

    #[test]
    fn should_make_aligned_option() {
        let opt = ExtnOption::authenticator(AuthenticatorAlgorithm::HmacSha256, &[1, 2, 3]);
        assert_eq!(opt.option_type, OptionType::Authenticator);
        assert_eq!(opt.data, vec![16, 1, 2, 3]);
        assert_eq!(opt.data_len, 4);
        assert_eq!(opt.alignment, Alignment::AUTHENTICATOR);
    }

    #[test]
    fn should_parse_option() {
        let opt = ExtnOption::authenticator(AuthenticatorAlgorithm::Gmac, &[0xaa; 16]);
        let auth = PacketAuthenticator::parse(&opt).unwrap();
        assert_eq!(auth.algorithm(), AuthenticatorAlgorithm::Gmac);
        assert_eq!(auth.authenticator(), &[0xaa; 16]);
    }

    #[test]
    fn should_reject_wrong_type() {
        let opt = ExtnOption::pad_n(4);
        assert_eq!(
            PacketAuthenticator::parse(&opt),
            Err(AuthenticatorError::WrongOptionType(OptionType::PadN))
        );
    }

    #[test]
    fn should_reject_missing_authenticator() {
        let opt = ExtnOption::authenticator(AuthenticatorAlgorithm::Cmac, &[]);
        assert_eq!(
            PacketAuthenticator::parse(&opt),
            Err(AuthenticatorError::TruncatedBuffer {
                required: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn should_distinguish_not_found_from_malformed() {
        let extn = EndToEndExtn::new(ProtocolType::Udp, vec![ExtnOption::pad_n(2)]);
        assert_eq!(extn.find_authenticator(), Err(AuthenticatorError::NotFound));

        let extn = EndToEndExtn::new(
            ProtocolType::Udp,
            vec![ExtnOption::new(OptionType::Authenticator, vec![0])],
        );
        assert!(matches!(
            extn.find_authenticator(),
            Err(AuthenticatorError::TruncatedBuffer { .. })
        ));
    }

    #[test]
    fn should_zero_authenticator_in_place() {
        let extn = EndToEndExtn::new(
            ProtocolType::Udp,
            vec![ExtnOption::authenticator(
                AuthenticatorAlgorithm::Cmac,
                &[0xaa; 16],
            )],
        );
        let mut buf = extn.encode_to_vec().unwrap();

        {
            let (view, _) = EndToEndExtnView::from_mut_slice(&mut buf).unwrap();
            let mut auth = view.find_authenticator_mut().unwrap();
            assert_eq!(auth.algorithm(), AuthenticatorAlgorithm::Cmac);
            auth.zero();
        }

        let (view, _) = EndToEndExtnView::from_slice(&buf).unwrap();
        let auth = view.find_authenticator().unwrap();
        assert_eq!(auth.authenticator(), &[0; 16]);
        assert_eq!(buf.len(), 24);
    }
}
