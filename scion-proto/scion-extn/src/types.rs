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

//! SCION extension header types.

/// Generates an enum over a one byte wire value with a catch-all `Other` variant, along with
/// lossless conversions from and to `u8`.
macro_rules! gen_u8_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $value:literal,
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )*
            /// Other, unrecognized values.
            Other(u8),
        }
        impl From<u8> for $name {
            fn from(value: u8) -> Self {
                match value {
                    $($value => $name::$variant,)*
                    other => $name::Other(other),
                }
            }
        }
        impl From<$name> for u8 {
            fn from(val: $name) -> Self {
                match val {
                    $($name::$variant => $value,)*
                    $name::Other(other) => other,
                }
            }
        }
    };
}

gen_u8_enum! {
    /// Protocol identifiers used in the next header field of the SCION header and of extension
    /// headers.
    pub enum ProtocolType {
        /// No next header.
        None = 0,
        /// TCP.
        Tcp = 6,
        /// UDP.
        Udp = 17,
        /// SCION hop-by-hop options extension.
        HopByHop = 200,
        /// SCION end-to-end options extension.
        EndToEnd = 201,
        /// SCION Control Message Protocol.
        Scmp = 202,
        /// Bidirectional Forwarding Detection.
        Bfd = 203,
    }
}
impl ProtocolType {
    /// Returns true if the protocol is one of the SCION extension headers.
    pub fn is_extension(&self) -> bool {
        matches!(self, ProtocolType::HopByHop | ProtocolType::EndToEnd)
    }

    /// Returns the layer which decodes a payload of this protocol.
    pub fn layer_type(&self) -> LayerType {
        match self {
            ProtocolType::HopByHop => LayerType::HopByHopExtn,
            ProtocolType::EndToEnd => LayerType::EndToEndExtn,
            ProtocolType::Scmp => LayerType::Scmp,
            ProtocolType::Udp => LayerType::Udp,
            ProtocolType::Bfd => LayerType::Bfd,
            _ => LayerType::Payload,
        }
    }
}

/// Dispatch key selecting the decoder for the layer following a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerType {
    /// SCION hop-by-hop options extension.
    HopByHopExtn,
    /// SCION end-to-end options extension.
    EndToEndExtn,
    /// SCMP message.
    Scmp,
    /// SCION/UDP datagram.
    Udp,
    /// BFD control packet.
    Bfd,
    /// Opaque payload without a dedicated decoder.
    Payload,
}
impl From<ProtocolType> for LayerType {
    fn from(value: ProtocolType) -> Self {
        value.layer_type()
    }
}

gen_u8_enum! {
    /// Type of a TLV option inside an extension header.
    pub enum OptionType {
        /// Single byte padding. Has neither a length nor a data field.
        Pad1 = 0,
        /// Multi byte padding, the data is all zero.
        PadN = 1,
        /// Packet authenticator option, see [crate::authenticator].
        Authenticator = 2,
    }
}

gen_u8_enum! {
    /// Algorithm identifier of a packet authenticator.
    pub enum AuthenticatorAlgorithm {
        /// AES-CMAC.
        Cmac = 0,
        /// AES-GMAC.
        Gmac = 1,
        /// HMAC with SHA-256.
        HmacSha256 = 16,
        /// Ed25519 signature.
        Ed25519 = 32,
    }
}

/// Alignment requirement of an option, `modulus * n + remainder`.
///
/// The offset is measured from the first byte of the extension header, i.e. including the 2-byte
/// common header. A modulus of 0 means no requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Alignment {
    modulus: u8,
    remainder: u8,
}
impl Alignment {
    /// No alignment requirement.
    pub const NONE: Self = Self {
        modulus: 0,
        remainder: 0,
    };

    /// Alignment of the packet authenticator option, `4n + 1`.
    pub const AUTHENTICATOR: Self = Self {
        modulus: 4,
        remainder: 1,
    };

    /// Creates a new alignment requirement.
    ///
    /// The remainder must be smaller than the modulus. A zero modulus is only valid together with
    /// a zero remainder.
    pub const fn new(modulus: u8, remainder: u8) -> Result<Self, AlignmentError> {
        if modulus == 0 && remainder == 0 {
            return Ok(Self::NONE);
        }
        if remainder >= modulus {
            return Err(AlignmentError { modulus, remainder });
        }
        Ok(Self { modulus, remainder })
    }

    /// Returns the modulus, 0 if there is no requirement.
    pub const fn modulus(&self) -> u8 {
        self.modulus
    }

    /// Returns the remainder.
    pub const fn remainder(&self) -> u8 {
        self.remainder
    }

    /// Returns true if there is no alignment requirement.
    pub const fn is_none(&self) -> bool {
        self.modulus == 0
    }

    /// Returns true if the given offset satisfies the requirement.
    pub const fn is_satisfied_at(&self, offset: usize) -> bool {
        self.is_none() || offset % self.modulus as usize == self.remainder as usize
    }

    /// Returns the number of bytes needed to move from `offset` to the next offset satisfying the
    /// requirement, zero if `offset` already satisfies it.
    pub const fn padding_at(&self, offset: usize) -> usize {
        if self.is_none() {
            return 0;
        }
        let modulus = self.modulus as usize;
        let mut target = modulus * (offset / modulus) + self.remainder as usize;
        if target < offset {
            target += modulus;
        }
        target - offset
    }
}

/// Invalid alignment requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("invalid alignment {modulus}n+{remainder}: remainder must be smaller than modulus")]
pub struct AlignmentError {
    /// Requested modulus
    pub modulus: u8,
    /// Requested remainder
    pub remainder: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_roundtrip_protocol_types() {
        for raw in 0..=u8::MAX {
            assert_eq!(u8::from(ProtocolType::from(raw)), raw);
        }
        assert_eq!(ProtocolType::from(200), ProtocolType::HopByHop);
        assert_eq!(ProtocolType::from(99), ProtocolType::Other(99));
    }

    #[test]
    fn should_map_protocols_to_layers() {
        assert_eq!(ProtocolType::HopByHop.layer_type(), LayerType::HopByHopExtn);
        assert_eq!(ProtocolType::EndToEnd.layer_type(), LayerType::EndToEndExtn);
        assert_eq!(ProtocolType::Udp.layer_type(), LayerType::Udp);
        assert_eq!(ProtocolType::Tcp.layer_type(), LayerType::Payload);
        assert_eq!(ProtocolType::Other(42).layer_type(), LayerType::Payload);
    }

    #[test]
    fn should_use_sparse_algorithm_ids() {
        assert_eq!(u8::from(AuthenticatorAlgorithm::HmacSha256), 16);
        assert_eq!(AuthenticatorAlgorithm::from(32), AuthenticatorAlgorithm::Ed25519);
        assert_eq!(AuthenticatorAlgorithm::from(2), AuthenticatorAlgorithm::Other(2));
    }

    #[test]
    fn should_reject_remainder_not_below_modulus() {
        assert_eq!(
            Alignment::new(4, 4),
            Err(AlignmentError {
                modulus: 4,
                remainder: 4
            })
        );
        assert!(Alignment::new(0, 1).is_err());
        assert_eq!(Alignment::new(0, 0), Ok(Alignment::NONE));
        assert_eq!(Alignment::new(4, 1), Ok(Alignment::AUTHENTICATOR));
    }

    #[test]
    fn should_compute_padding_forward_from_offset() {
        let align = Alignment::AUTHENTICATOR;
        // 4*0+1 = 1 is behind 2, so the next candidate is 5
        assert_eq!(align.padding_at(2), 3);
        assert_eq!(align.padding_at(1), 0);
        assert_eq!(align.padding_at(4), 1);
        assert_eq!(align.padding_at(6), 3);
        assert_eq!(Alignment::NONE.padding_at(7), 0);

        for offset in 0..64 {
            assert!(align.is_satisfied_at(offset + align.padding_at(offset)));
        }
    }
}
