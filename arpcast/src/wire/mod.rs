/*! Low-level frame access and construction.

# Representations

The `wire` module deals with the frame *representation* on two levels.

 * First, it provides functions to extract fields from sequences of octets, and to insert fields
   into sequences of octets. This happens in the lowercase structures [`ethernet_frame`] and
   [`arp_packet`], each backed by an explicit table of field offsets.
 * Second, it provides a compact, high-level representation of header data that can be created from
   parsing and emitted into a sequence of octets. This happens through [`EthernetRepr`] and
   [`ArpRepr`].

On top of these sits the owned [`Frame`], the one fixed 42 octet buffer holding an Ethernet II
header directly followed by an Ethernet/IPv4 ARP packet. It is never resized and is patched in
place field by field.

Addresses enter the system as text more often than not, so the [`parse`] module converts the
delimited notations of MAC and IPv4 addresses into octets under an explicit [`ParsePolicy`].

[`ethernet_frame`]: struct.ethernet_frame.html
[`arp_packet`]: struct.arp_packet.html
[`EthernetRepr`]: struct.EthernetRepr.html
[`ArpRepr`]: enum.ArpRepr.html
[`Frame`]: struct.Frame.html
[`parse`]: parse/index.html
[`ParsePolicy`]: parse/enum.Policy.html

The lowercase wrappers guarantee that, if `check_len()` returned `Ok(())`, no field accessor or
setter will panic.

# Examples

```rust
use arpcast::wire::*;
let repr = ArpRepr::EthernetIpv4 {
    operation: ArpOperation::Reply,
    source_hardware_addr: EthernetAddress([0x02, 0, 0, 0, 0, 1]),
    source_protocol_addr: Ipv4Address::new(10, 0, 0, 1),
    target_hardware_addr: EthernetAddress::BROADCAST,
    target_protocol_addr: Ipv4Address::new(10, 0, 0, 2),
};
let mut buffer = [0; 28];
repr.emit(arp_packet::new_unchecked_mut(&mut buffer));
let packet = arp_packet::new_checked(&buffer)
    .expect("truncated packet");
assert_eq!(ArpRepr::parse(packet), Ok(repr));
```
*/
// Copyright (C) 2016 whitequark@whitequark.org
// Copyright (C) 2019 Andreas Molzer <andreas.molzer@tum.de>
//
// in large parts from `smoltcp` originally distributed under 0-clause BSD
//
// Applies to files in this folder unless otherwise noted. These are:
// * `arp.rs`
// * `error.rs`
// * `ethernet.rs`
// * `ipv4.rs`
// * `mod.rs` (this file)

mod field {
    pub(crate) type Field = ::core::ops::Range<usize>;
    pub(crate) type Rest  = ::core::ops::RangeFrom<usize>;
}

mod arp;
mod error;
mod ethernet;
mod frame;
mod ipv4;
pub mod parse;

pub use self::ethernet::{
    ethernet as ethernet_frame,
    EtherType as EthernetProtocol,
    Address as EthernetAddress,
    Repr as EthernetRepr};

pub use self::error::{
    Error,
    Result};

pub use self::arp::{
    arp as arp_packet,
    Hardware as ArpHardware,
    Operation as ArpOperation,
    Repr as ArpRepr,
    HARDWARE_LEN as ARP_HARDWARE_LEN,
    PROTOCOL_LEN as ARP_PROTOCOL_LEN};

pub use self::ipv4::Address as Ipv4Address;

pub use self::frame::Frame;

pub use self::parse::{
    Delimiter,
    ParseAddressError,
    Policy as ParsePolicy};
