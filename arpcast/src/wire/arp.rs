use byteorder::{ByteOrder, NetworkEndian};
use core::fmt;

use super::{Error, Result};

use super::EthernetProtocol as Protocol;
use super::EthernetAddress as Address;
use super::Ipv4Address as IpAddress;

enum_with_unknown! {
    /// ARP hardware type.
    pub enum Hardware(u16) {
        /// Ethernet (10Mb).
        Ethernet = 1
    }
}

enum_with_unknown! {
    /// ARP operation type.
    pub enum Operation(u16) {
        /// Ask for the hardware address of the target protocol address.
        Request = 1,
        /// Announce the hardware address of the source protocol address.
        Reply = 2
    }
}

byte_wrapper!{
    /// A byte sequence representing an Ethernet/IPv4 ARP packet.
    #[derive(Debug, PartialEq, Eq)]
    pub struct arp([u8]);
}

/// The hardware address length of Ethernet.
pub const HARDWARE_LEN: u8 = 6;

/// The protocol address length of IPv4.
pub const PROTOCOL_LEN: u8 = 4;

mod field {
    use crate::wire::field::*;

    pub(crate) const HTYPE: Field = 0..2;
    pub(crate) const PTYPE: Field = 2..4;
    pub(crate) const HLEN: usize = 4;
    pub(crate) const PLEN: usize = 5;
    pub(crate) const OPER: Field = 6..8;
    pub(crate) const SHA:  Field = 8..14;
    pub(crate) const SPA:  Field = 14..18;
    pub(crate) const THA:  Field = 18..24;
    pub(crate) const TPA:  Field = 24..28;
}

impl arp {
    /// Imbue a raw octet buffer with ARP packet structure.
    pub fn new_unchecked(buffer: &[u8]) -> &arp {
        Self::__from_macro_new_unchecked(buffer)
    }

    /// Imbue a mutable octet buffer with ARP packet structure.
    pub fn new_unchecked_mut(buffer: &mut [u8]) -> &mut arp {
        Self::__from_macro_new_unchecked_mut(buffer)
    }

    /// Shorthand for a combination of [new_unchecked] and [check_len].
    ///
    /// [new_unchecked]: #method.new_unchecked
    /// [check_len]: #method.check_len
    pub fn new_checked(data: &[u8]) -> Result<&arp> {
        let packet = Self::new_unchecked(data);
        packet.check_len()?;
        Ok(packet)
    }

    /// Unwrap the packet as a raw byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Unwrap the packet as a mutable raw byte slice.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }

    /// Ensure that no accessor method will panic if called.
    /// Returns `Err(Error::Truncated)` if the buffer is too short.
    ///
    /// The addresses are always accessed at the offsets of Ethernet and IPv4, regardless of the
    /// length fields in the packet itself.
    pub fn check_len(&self) -> Result<()> {
        if self.0.len() < field::TPA.end {
            Err(Error::Truncated)
        } else {
            Ok(())
        }
    }

    /// Return the length of an Ethernet/IPv4 ARP packet.
    pub fn buffer_len() -> usize {
        field::TPA.end
    }

    /// Return the hardware type field.
    #[inline]
    pub fn hardware_type(&self) -> Hardware {
        let raw = NetworkEndian::read_u16(&self.0[field::HTYPE]);
        Hardware::from(raw)
    }

    /// Return the protocol type field.
    #[inline]
    pub fn protocol_type(&self) -> Protocol {
        let raw = NetworkEndian::read_u16(&self.0[field::PTYPE]);
        Protocol::from(raw)
    }

    /// Return the hardware length field.
    #[inline]
    pub fn hardware_len(&self) -> u8 {
        self.0[field::HLEN]
    }

    /// Return the protocol length field.
    #[inline]
    pub fn protocol_len(&self) -> u8 {
        self.0[field::PLEN]
    }

    /// Return the operation field.
    #[inline]
    pub fn operation(&self) -> Operation {
        let raw = NetworkEndian::read_u16(&self.0[field::OPER]);
        Operation::from(raw)
    }

    /// Return the source hardware address field.
    pub fn source_hardware_addr(&self) -> Address {
        Address::from_bytes(&self.0[field::SHA])
    }

    /// Return the source protocol address field.
    pub fn source_protocol_addr(&self) -> IpAddress {
        IpAddress::from_bytes(&self.0[field::SPA])
    }

    /// Return the target hardware address field.
    pub fn target_hardware_addr(&self) -> Address {
        Address::from_bytes(&self.0[field::THA])
    }

    /// Return the target protocol address field.
    pub fn target_protocol_addr(&self) -> IpAddress {
        IpAddress::from_bytes(&self.0[field::TPA])
    }

    /// Set the hardware type field.
    #[inline]
    pub fn set_hardware_type(&mut self, value: Hardware) {
        NetworkEndian::write_u16(&mut self.0[field::HTYPE], value.into())
    }

    /// Set the protocol type field.
    #[inline]
    pub fn set_protocol_type(&mut self, value: Protocol) {
        NetworkEndian::write_u16(&mut self.0[field::PTYPE], value.into())
    }

    /// Set the hardware length field.
    #[inline]
    pub fn set_hardware_len(&mut self, value: u8) {
        self.0[field::HLEN] = value
    }

    /// Set the protocol length field.
    #[inline]
    pub fn set_protocol_len(&mut self, value: u8) {
        self.0[field::PLEN] = value
    }

    /// Set the operation field.
    #[inline]
    pub fn set_operation(&mut self, value: Operation) {
        NetworkEndian::write_u16(&mut self.0[field::OPER], value.into())
    }

    /// Set the source hardware address field.
    pub fn set_source_hardware_addr(&mut self, value: Address) {
        self.0[field::SHA].copy_from_slice(value.as_bytes())
    }

    /// Set the source protocol address field.
    pub fn set_source_protocol_addr(&mut self, value: IpAddress) {
        self.0[field::SPA].copy_from_slice(value.as_bytes())
    }

    /// Set the target hardware address field.
    pub fn set_target_hardware_addr(&mut self, value: Address) {
        self.0[field::THA].copy_from_slice(value.as_bytes())
    }

    /// Set the target protocol address field.
    pub fn set_target_protocol_addr(&mut self, value: IpAddress) {
        self.0[field::TPA].copy_from_slice(value.as_bytes())
    }
}

impl AsRef<[u8]> for arp {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsMut<[u8]> for arp {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

/// A high-level representation of an Address Resolution Protocol packet.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Repr {
    /// An Ethernet and IPv4 Address Resolution Protocol packet.
    #[allow(missing_docs)]
    EthernetIpv4 {
        operation: Operation,
        source_hardware_addr: Address,
        source_protocol_addr: IpAddress,
        target_hardware_addr: Address,
        target_protocol_addr: IpAddress,
    },
}

impl Repr {
    /// Parse an Address Resolution Protocol packet and return a high-level representation.
    ///
    /// Returns `Err(Error::Unrecognized)` for anything but Ethernet and IPv4, and
    /// `Err(Error::Malformed)` if those announce address lengths other than 6 and 4.
    pub fn parse(packet: &arp) -> Result<Repr> {
        packet.check_len()?;
        match (packet.hardware_type(), packet.protocol_type()) {
            (Hardware::Ethernet, Protocol::Ipv4) => (),
            _ => return Err(Error::Unrecognized),
        }

        if packet.hardware_len() != HARDWARE_LEN || packet.protocol_len() != PROTOCOL_LEN {
            return Err(Error::Malformed);
        }

        Ok(Repr::EthernetIpv4 {
            operation: packet.operation(),
            source_hardware_addr: packet.source_hardware_addr(),
            source_protocol_addr: packet.source_protocol_addr(),
            target_hardware_addr: packet.target_hardware_addr(),
            target_protocol_addr: packet.target_protocol_addr(),
        })
    }

    /// Return the length of a packet that will be emitted from this high-level representation.
    pub fn buffer_len(&self) -> usize {
        match self {
            Repr::EthernetIpv4 { .. } => field::TPA.end,
        }
    }

    /// Emit a high-level representation into an Address Resolution Protocol packet.
    pub fn emit(&self, packet: &mut arp) {
        match *self {
            Repr::EthernetIpv4 {
                operation,
                source_hardware_addr,
                source_protocol_addr,
                target_hardware_addr,
                target_protocol_addr,
            } => {
                packet.set_hardware_type(Hardware::Ethernet);
                packet.set_protocol_type(Protocol::Ipv4);
                packet.set_hardware_len(HARDWARE_LEN);
                packet.set_protocol_len(PROTOCOL_LEN);
                packet.set_operation(operation);
                packet.set_source_hardware_addr(source_hardware_addr);
                packet.set_source_protocol_addr(source_protocol_addr);
                packet.set_target_hardware_addr(target_hardware_addr);
                packet.set_target_protocol_addr(target_protocol_addr);
            },
        }
    }
}

impl fmt::Display for arp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match Repr::parse(self) {
            Ok(repr) => write!(f, "{}", repr),
            _ => {
                write!(f, "ARP (unrecognized)")?;
                write!(
                    f,
                    " htype={:?} ptype={:?} hlen={:?} plen={:?} op={:?}",
                    self.hardware_type(),
                    self.protocol_type(),
                    self.hardware_len(),
                    self.protocol_len(),
                    self.operation()
                )
            }
        }
    }
}

impl fmt::Display for Repr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Repr::EthernetIpv4 {
                operation,
                source_hardware_addr,
                source_protocol_addr,
                target_hardware_addr,
                target_protocol_addr,
            } => write!(
                f,
                "ARP type=Ethernet+IPv4 src={}/{} tgt={}/{} op={:?}",
                source_hardware_addr,
                source_protocol_addr,
                target_hardware_addr,
                target_protocol_addr,
                operation,
            ),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[rustfmt::skip]
    static PACKET_BYTES: [u8; 28] = [
        0x00, 0x01,
        0x08, 0x00,
        0x06,
        0x04,
        0x00, 0x01,
        0x11, 0x12, 0x13, 0x14, 0x15, 0x16,
        0x21, 0x22, 0x23, 0x24,
        0x31, 0x32, 0x33, 0x34, 0x35, 0x36,
        0x41, 0x42, 0x43, 0x44,
    ];

    #[test]
    fn test_deconstruct() {
        let packet = arp::new_unchecked(&PACKET_BYTES[..]);
        assert_eq!(packet.hardware_type(), Hardware::Ethernet);
        assert_eq!(packet.protocol_type(), Protocol::Ipv4);
        assert_eq!(packet.hardware_len(), 6);
        assert_eq!(packet.protocol_len(), 4);
        assert_eq!(packet.operation(), Operation::Request);
        assert_eq!(
            packet.source_hardware_addr(),
            Address([0x11, 0x12, 0x13, 0x14, 0x15, 0x16])
        );
        assert_eq!(packet.source_protocol_addr(), IpAddress([0x21, 0x22, 0x23, 0x24]));
        assert_eq!(
            packet.target_hardware_addr(),
            Address([0x31, 0x32, 0x33, 0x34, 0x35, 0x36])
        );
        assert_eq!(packet.target_protocol_addr(), IpAddress([0x41, 0x42, 0x43, 0x44]));
    }

    #[test]
    fn test_construct() {
        let mut bytes = vec![0xa5; 28];
        let packet = arp::new_unchecked_mut(&mut bytes);
        packet.set_hardware_type(Hardware::Ethernet);
        packet.set_protocol_type(Protocol::Ipv4);
        packet.set_hardware_len(6);
        packet.set_protocol_len(4);
        packet.set_operation(Operation::Request);
        packet.set_source_hardware_addr(Address([0x11, 0x12, 0x13, 0x14, 0x15, 0x16]));
        packet.set_source_protocol_addr(IpAddress([0x21, 0x22, 0x23, 0x24]));
        packet.set_target_hardware_addr(Address([0x31, 0x32, 0x33, 0x34, 0x35, 0x36]));
        packet.set_target_protocol_addr(IpAddress([0x41, 0x42, 0x43, 0x44]));
        assert_eq!(packet.as_bytes(), &PACKET_BYTES[..]);
    }

    fn packet_repr() -> Repr {
        Repr::EthernetIpv4 {
            operation: Operation::Request,
            source_hardware_addr: Address([0x11, 0x12, 0x13, 0x14, 0x15, 0x16]),
            source_protocol_addr: IpAddress([0x21, 0x22, 0x23, 0x24]),
            target_hardware_addr: Address([0x31, 0x32, 0x33, 0x34, 0x35, 0x36]),
            target_protocol_addr: IpAddress([0x41, 0x42, 0x43, 0x44]),
        }
    }

    #[test]
    fn test_parse() {
        let packet = arp::new_unchecked(&PACKET_BYTES[..]);
        let repr = Repr::parse(packet).unwrap();
        assert_eq!(repr, packet_repr());
    }

    #[test]
    fn test_parse_reply() {
        let mut bytes = PACKET_BYTES;
        arp::new_unchecked_mut(&mut bytes).set_operation(Operation::Reply);
        match Repr::parse(arp::new_unchecked(&bytes)) {
            Ok(Repr::EthernetIpv4 { operation, .. }) => assert_eq!(operation, Operation::Reply),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects() {
        assert_eq!(arp::new_checked(&PACKET_BYTES[..27]), Err(Error::Truncated));

        let mut bytes = PACKET_BYTES;
        arp::new_unchecked_mut(&mut bytes).set_protocol_type(Protocol::Ipv6);
        assert_eq!(Repr::parse(arp::new_unchecked(&bytes)), Err(Error::Unrecognized));

        let mut bytes = PACKET_BYTES;
        arp::new_unchecked_mut(&mut bytes).set_hardware_len(8);
        assert_eq!(Repr::parse(arp::new_unchecked(&bytes)), Err(Error::Malformed));
    }

    #[test]
    fn test_emit() {
        let mut bytes = vec![0xa5; 28];
        let packet = arp::new_unchecked_mut(&mut bytes);
        packet_repr().emit(packet);
        assert_eq!(packet.as_bytes(), &PACKET_BYTES[..]);
        assert_eq!(packet_repr().buffer_len(), 28);
    }
}
