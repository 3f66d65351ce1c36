//! Sends ARP frames on a Linux interface.
//!
//! # Usage
//!
//! The example opens a raw packet socket on an existing interface, which usually requires root or
//! `CAP_NET_RAW`, and sends a configurable number of ARP requests, or replies, from the given
//! hardware address.
//!
//! 1. Setup a veth pair to observe the frames on, here named `veth0` and `veth1`:
//!
//!   > $ ip link add veth0 type veth peer name veth1
//!   > $ ip link set up dev veth0 && ip link set up dev veth1
//! 2. Watch the peer:
//!
//!   > $ tcpdump -eni veth1 arp
//! 3. Announce `10.0.0.1` as a gratuitous reply:
//!
//!   > $ cargo run --features sys --example arp_raw -- veth0 02:00:00:00:00:01 10.0.0.1 10.0.0.1 --reply
use std::io::{stdout, Write};
use structopt::StructOpt;

use arpcast::layer::arp::{self, Endpoint};
use arpcast::nic::{Lease, sys::RawSocket};
use arpcast::wire::{ArpOperation, Ipv4Address, ParsePolicy};

fn main() {
    let Config {
        name,
        mac,
        src,
        dst,
        reply,
        count,
        lenient,
    } = Config::from_args();

    let lease = Lease {
        address: src,
        ..Lease::default()
    };

    let policy = if lenient {
        ParsePolicy::Lenient
    } else {
        ParsePolicy::Strict
    };

    let config = arp::Config::default()
        .source_placeholder(src)
        .policy(policy);

    let interface = RawSocket::new(&name, vec![0; config.buffer_len], lease);
    let mut arp = Endpoint::new(interface, &mac, config)
        .expect("Invalid device address");

    arp.set_dst_ip_addr(dst);
    if reply {
        arp.set_operation(ArpOperation::Reply);
    }

    let connected = arp.connect().map(|lease| *lease);
    if let Err(err) = connected {
        panic!("Couldn't initialize interface: {} {:?}", err, arp.driver_mut().last_err());
    }

    let out = stdout();
    let mut out = out.lock();

    writeln!(out, "Sending {}", arp.frame()).unwrap();

    for _ in 0..count {
        arp.send().expect("Transmit buffer too short");
        if let Some(err) = arp.driver_mut().last_err() {
            panic!("Error during transmit {}", err);
        }

        out.write_all(b".").unwrap();
        out.flush().unwrap();
    }

    out.write_all(b"\n").unwrap();
}

#[derive(StructOpt)]
struct Config {
    /// The interface to send on.
    name: String,
    /// The hardware address to send from.
    mac: String,
    /// The sender protocol address.
    src: Ipv4Address,
    /// The target protocol address.
    dst: Ipv4Address,
    /// Send a reply instead of a request.
    #[structopt(short = "r", long = "reply")]
    reply: bool,
    /// Number of frames to send.
    #[structopt(short = "c", long = "count", default_value = "1")]
    count: usize,
    /// Accept the device address like older firmware did.
    #[structopt(long = "lenient")]
    lenient: bool,
}
