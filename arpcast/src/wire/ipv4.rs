use core::{fmt, str::FromStr};

use super::parse::{self, Delimiter, ParseAddressError, Policy};

/// A four-octet IPv4 address.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Default)]
pub struct Address(pub [u8; 4]);

impl Address {
    /// An unspecified address.
    pub const UNSPECIFIED: Address = Address([0x00; 4]);

    /// The limited broadcast address.
    pub const BROADCAST:   Address = Address([0xff; 4]);

    /// Construct an IPv4 address from parts.
    pub const fn new(a0: u8, a1: u8, a2: u8, a3: u8) -> Address {
        Address([a0, a1, a2, a3])
    }

    /// Construct an IPv4 address from a sequence of octets, in big-endian.
    ///
    /// # Panics
    /// The function panics if `data` is not four octets long.
    pub fn from_bytes(data: &[u8]) -> Address {
        let mut bytes = [0; 4];
        bytes.copy_from_slice(data);
        Address(bytes)
    }

    /// Parse the dotted decimal notation under a chosen policy.
    ///
    /// The `FromStr` implementation is the same as using `Policy::Strict`.
    pub fn parse(src: &str, policy: Policy) -> Result<Address, ParseAddressError> {
        let mut bytes = [0; 4];
        parse::parse_octets(src, Delimiter::Dot, policy, &mut bytes)?;
        Ok(Address(bytes))
    }

    /// Return an IPv4 address as a sequence of octets, in big-endian.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Query whether the address is an unicast address.
    pub fn is_unicast(&self) -> bool {
        !(self.is_broadcast() ||
          self.is_multicast() ||
          self.is_unspecified())
    }

    /// Query whether the address is the broadcast address.
    pub fn is_broadcast(&self) -> bool {
        self.0[0..4] == [255; 4]
    }

    /// Query whether the address is a multicast address.
    pub fn is_multicast(&self) -> bool {
        self.0[0] & 0xf0 == 224
    }

    /// Query whether the address falls into the "unspecified" range.
    pub fn is_unspecified(&self) -> bool {
        self.0[0] == 0
    }
}

impl From<[u8; 4]> for Address {
    fn from(bytes: [u8; 4]) -> Self {
        Address(bytes)
    }
}

#[cfg(feature = "std")]
impl From<::std::net::Ipv4Addr> for Address {
    fn from(x: ::std::net::Ipv4Addr) -> Address {
        Address(x.octets())
    }
}

#[cfg(feature = "std")]
impl From<Address> for ::std::net::Ipv4Addr {
    fn from(Address(x): Address) -> ::std::net::Ipv4Addr {
        x.into()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let bytes = self.0;
        write!(f, "{}.{}.{}.{}", bytes[0], bytes[1], bytes[2], bytes[3])
    }
}

impl FromStr for Address {
    type Err = ParseAddressError;

    fn from_str(src: &str) -> Result<Self, ParseAddressError> {
        Address::parse(src, Policy::Strict)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_broadcast() {
        assert!(Address::BROADCAST.is_broadcast());
        assert!(!Address::BROADCAST.is_unicast());
        assert!(!Address::BROADCAST.is_unspecified());
        assert!(Address::UNSPECIFIED.is_unspecified());
        assert!(!Address::UNSPECIFIED.is_broadcast());
    }

    #[test]
    fn test_dotted_decimal() {
        let addr: Address = "10.0.0.5".parse().unwrap();
        assert_eq!(addr, Address::new(10, 0, 0, 5));
        assert_eq!(addr.to_string(), "10.0.0.5");
        assert!(addr.is_unicast());
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_std_conversion() {
        let std_addr = ::std::net::Ipv4Addr::new(192, 168, 0, 1);
        let addr = Address::from(std_addr);
        assert_eq!(addr, Address::new(192, 168, 0, 1));
        assert_eq!(::std::net::Ipv4Addr::from(addr), std_addr);
    }
}
