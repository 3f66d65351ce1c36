//! A minimal builder and sender of ARP frames for embedded devices.
//!
//! ## Table of contents
//!
//! 1. [Design](#design)
//! 2. [The wire module](wire/index.html)
//!    1. [Textual addresses](wire/parse/index.html)
//! 3. [The arp layer](layer/arp/index.html)
//! 4. [Network interfaces](nic/index.html)
//!
//! ## Design
//!
//! There is exactly one frame per endpoint, an Ethernet II header followed by an Ethernet/IPv4
//! ARP packet, 42 octets in total. It is populated with a broadcast request upon construction and
//! each address or the operation can be changed separately afterwards. Sending copies the frame
//! into the transmit buffer of a driver. Nothing is ever received.
//!
//! Nothing within `arpcast` dynamically allocates memory. The frame lives inside the endpoint
//! while the driver brings its own buffer. This makes it usable on a microcontroller with an
//! Ethernet chip, where the [`nic::Driver`] is a thin wrapper around the vendor driver, as well
//! as on a Linux host with the raw socket in `nic::sys` (feature `sys`).
//!
//! Textual addresses are interpreted strictly by default. A lenient policy reproducing the
//! `strtoul` based parsing of older firmware is available, see [`wire::ParsePolicy`].
//!
//! [`nic::Driver`]: nic/trait.Driver.html
//! [`wire::ParsePolicy`]: wire/enum.ParsePolicy.html
#![warn(missing_docs)]
#![warn(unreachable_pub)]

// tests should be able to use `std`
#![cfg_attr(all(
    not(feature = "std"),
    not(test)),
no_std)]

#[macro_use] mod macros;
pub mod layer;
pub mod nic;
pub mod wire;
