use core::fmt;

use super::{arp_packet, ethernet_frame, ArpRepr, EthernetProtocol, EthernetRepr};

/// An owned Ethernet II frame carrying an Ethernet/IPv4 ARP packet.
///
/// The frame is a single fixed buffer that is interpreted in three ways: as raw bytes for
/// transmission, as an Ethernet header in its first 14 octets and as an ARP packet in the
/// remaining 28 octets. Both headers are reached through their byte wrappers, which in turn know
/// the offsets of every field.
///
/// ```text
///  0      6      12   14     16     18 19 20   22     28   32     38   42
///  | dst  | src  |type| htype| ptype|hl|pl|oper| sha  | spa| tha  | tpa|
/// ```
///
/// There is no way to construct a frame that is not fully populated. The constructor emits both
/// representations, later mutation happens in place through the views.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Frame {
    buffer: [u8; field::LEN],
}

mod field {
    use crate::wire::field::*;

    pub(crate) const ARP: Field = 14..LEN;
    pub(crate) const LEN: usize = 42;
}

impl Frame {
    /// The total length of the frame on the wire, without padding and checksum.
    pub const LEN: usize = field::LEN;

    /// Create a frame from its header representations.
    ///
    /// The EtherType of `ethernet` is ignored and always set to ARP.
    pub fn new(ethernet: EthernetRepr, arp: ArpRepr) -> Self {
        let mut frame = Frame { buffer: [0; field::LEN] };
        EthernetRepr {
            ethertype: EthernetProtocol::Arp,
            ..ethernet
        }.emit(frame.ethernet_mut());
        arp.emit(frame.arp_mut());
        frame
    }

    /// The Ethernet view, covering the whole frame.
    ///
    /// The ARP packet is its payload.
    pub fn ethernet(&self) -> &ethernet_frame {
        ethernet_frame::new_unchecked(&self.buffer[..])
    }

    /// The mutable Ethernet view, covering the whole frame.
    pub fn ethernet_mut(&mut self) -> &mut ethernet_frame {
        ethernet_frame::new_unchecked_mut(&mut self.buffer[..])
    }

    /// The ARP view of the payload.
    pub fn arp(&self) -> &arp_packet {
        arp_packet::new_unchecked(&self.buffer[field::ARP])
    }

    /// The mutable ARP view of the payload.
    pub fn arp_mut(&mut self) -> &mut arp_packet {
        arp_packet::new_unchecked_mut(&mut self.buffer[field::ARP])
    }

    /// The raw bytes of the complete frame.
    pub fn as_bytes(&self) -> &[u8; field::LEN] {
        &self.buffer
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.buffer
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Frame")
            .field("ethernet", &EthernetRepr::parse(self.ethernet()))
            .field("arp", &ArpRepr::parse(self.arp()))
            .finish()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.ethernet(), self.arp())
    }
}
