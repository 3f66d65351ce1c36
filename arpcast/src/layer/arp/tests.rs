use core::cell::RefCell;

use crate::layer::FnHandler;
use crate::nic::{self, external::External, Lease};
use crate::wire::{ArpHardware, ArpOperation, EthernetAddress, EthernetProtocol, Frame,
    Ipv4Address, ParsePolicy};

use super::{Config, Endpoint, Error, TransmitMode};

const DEVICE: &str = "aa:bb:cc:dd:ee:ff";
const DEVICE_MAC: EthernetAddress = EthernetAddress([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]);
const PEER_MAC: EthernetAddress = EthernetAddress([0x02, 0x00, 0x00, 0x00, 0x00, 0x05]);

#[rustfmt::skip]
static REQUEST_BYTES: [u8; 42] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff,
    0x08, 0x06,
    0x00, 0x01,
    0x08, 0x00,
    0x06,
    0x04,
    0x00, 0x01,
    0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff,
    0xc0, 0xa8, 0x00, 0x01,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff,
];

fn lease() -> Lease {
    Lease {
        address: Ipv4Address::new(10, 0, 0, 2),
        gateway: Ipv4Address::new(10, 0, 0, 1),
        netmask: Ipv4Address::new(255, 255, 255, 0),
        dns: Ipv4Address::new(10, 0, 0, 1),
    }
}

fn endpoint() -> Endpoint<External<Vec<u8>>> {
    let nic = External::new(vec![0; Config::BUFFER_LEN]).with_lease(lease());
    Endpoint::new(nic, DEVICE, Config::default()).unwrap()
}

#[test]
fn defaults() {
    let arp = endpoint();
    let bytes = arp.frame().as_bytes();
    assert_eq!(&bytes[..], &REQUEST_BYTES[..]);
    assert_eq!(&bytes[0..6], &[0xff; 6]);
    assert_eq!(&bytes[6..12], DEVICE_MAC.as_bytes());
    assert_eq!(&bytes[12..14], &[0x08, 0x06]);
    assert_eq!(arp.device_mac(), DEVICE_MAC);
}

#[test]
fn fixed_fields() {
    let mut arp = endpoint();
    arp.set_operation(ArpOperation::Reply);
    arp.set_dst_mac_addr(PEER_MAC);
    arp.set_src_ip_addr(Ipv4Address::new(10, 0, 0, 2));

    let frame = arp.frame();
    assert_eq!(frame.ethernet().ethertype(), EthernetProtocol::Arp);
    let packet = frame.arp();
    assert_eq!(packet.hardware_type(), ArpHardware::Ethernet);
    assert_eq!(packet.protocol_type(), EthernetProtocol::Ipv4);
    assert_eq!(packet.hardware_len(), 6);
    assert_eq!(packet.protocol_len(), 4);
    assert_eq!(packet.operation(), ArpOperation::Reply);
}

#[test]
fn invalid_device_address() {
    let nic = External::new(vec![0u8; 64]);
    match Endpoint::new(nic, "aa:bb:cc:dd:ee", Config::default()) {
        Err(Error::Address(err)) => assert!(err.is_separator()),
        Err(other) => panic!("Unexpected error {:?}", other),
        Ok(_) => panic!("Short address accepted"),
    }
}

#[test]
fn combined_mac_setters() {
    let mut arp = endpoint();
    arp.set_dst_mac("02:00:00:00:00:05").unwrap();
    assert_eq!(arp.frame().ethernet().dst_addr(), PEER_MAC);
    assert_eq!(arp.frame().arp().target_hardware_addr(), PEER_MAC);

    arp.set_src_mac("02:00:00:00:00:05").unwrap();
    assert_eq!(arp.frame().ethernet().src_addr(), PEER_MAC);
    assert_eq!(arp.frame().arp().source_hardware_addr(), PEER_MAC);
}

#[test]
fn single_layer_setters() {
    let mut arp = endpoint();
    arp.set_l2_dst_mac("02:00:00:00:00:05").unwrap();
    assert_eq!(arp.frame().ethernet().dst_addr(), PEER_MAC);
    assert_eq!(arp.frame().arp().target_hardware_addr(), EthernetAddress::BROADCAST);

    let mut arp = endpoint();
    arp.set_arp_dst_mac("02:00:00:00:00:05").unwrap();
    assert_eq!(arp.frame().ethernet().dst_addr(), EthernetAddress::BROADCAST);
    assert_eq!(arp.frame().arp().target_hardware_addr(), PEER_MAC);

    let mut arp = endpoint();
    arp.set_l2_src_mac("02:00:00:00:00:05").unwrap();
    assert_eq!(arp.frame().ethernet().src_addr(), PEER_MAC);
    assert_eq!(arp.frame().arp().source_hardware_addr(), DEVICE_MAC);

    let mut arp = endpoint();
    arp.set_arp_src_mac("02:00:00:00:00:05").unwrap();
    assert_eq!(arp.frame().ethernet().src_addr(), DEVICE_MAC);
    assert_eq!(arp.frame().arp().source_hardware_addr(), PEER_MAC);
}

#[test]
fn dst_ip_only() {
    let mut arp = endpoint();
    arp.set_dst_ip("10.0.0.5").unwrap();

    let bytes = arp.frame().as_bytes();
    assert_eq!(&bytes[38..42], &[10, 0, 0, 5]);
    assert_eq!(&bytes[..38], &REQUEST_BYTES[..38]);
}

#[test]
fn text_and_binary_agree() {
    let mut text = endpoint();
    text.set_dst_mac("02:00:00:00:00:05").unwrap();
    text.set_src_mac("02:00:00:00:00:06").unwrap();
    text.set_dst_ip("10.0.0.5").unwrap();
    text.set_src_ip("10.0.0.2").unwrap();

    let mut binary = endpoint();
    binary.set_dst_mac_addr(PEER_MAC);
    binary.set_src_mac_addr(EthernetAddress([0x02, 0, 0, 0, 0, 0x06]));
    binary.set_dst_ip_addr(Ipv4Address::new(10, 0, 0, 5));
    binary.set_src_ip_addr(Ipv4Address::new(10, 0, 0, 2));

    assert_eq!(text.frame(), binary.frame());
}

#[test]
fn failed_parse_keeps_frame() {
    let mut arp = endpoint();
    let before: Frame = arp.frame().clone();

    assert!(arp.set_dst_mac("02:00:00:00:00").is_err());
    assert!(arp.set_src_mac("02:00:00:00:00:zz").is_err());
    assert!(arp.set_dst_ip("10.0.0.5.").is_err());
    assert!(arp.set_src_ip("10.0.0.256").is_err());
    assert!(arp.set_src_ip("10.0.0.5 ").is_err());

    assert_eq!(arp.frame(), &before);
}

#[test]
fn lenient_policy() {
    let nic = External::new(vec![0u8; 64]);
    let config = Config::default().policy(ParsePolicy::Lenient);
    let mut arp = Endpoint::new(nic, DEVICE, config).unwrap();

    arp.set_dst_ip("10.0.x.5").unwrap();
    assert_eq!(arp.frame().arp().target_protocol_addr(), Ipv4Address::new(10, 0, 0, 5));
    assert!(arp.set_dst_ip("10.0.0").is_err());
    assert_eq!(arp.frame().arp().target_protocol_addr(), Ipv4Address::new(10, 0, 0, 5));
}

#[test]
fn source_placeholder() {
    let nic = External::new(vec![0u8; 64]);
    let config = Config::default().source_placeholder(Ipv4Address::new(10, 0, 0, 2));
    let arp = Endpoint::new(nic, DEVICE, config).unwrap();
    assert_eq!(arp.frame().arp().source_protocol_addr(), Ipv4Address::new(10, 0, 0, 2));
}

#[test]
fn connect() {
    let mut arp = endpoint();
    assert!(!arp.is_connected());
    assert_eq!(arp.lease(), None);

    assert_eq!(arp.connect(), Ok(&lease()));
    assert!(arp.is_connected());
    assert_eq!(arp.lease(), Some(&lease()));
    assert_eq!(arp.driver().hardware_addr(), Some(DEVICE_MAC));
    assert_eq!(arp.driver().buffer_len(), Some(Config::BUFFER_LEN));
}

#[test]
fn connect_failures() {
    let mut arp = endpoint();
    arp.driver_mut().set_begin(Err(nic::Error::Illegal));
    assert_eq!(arp.connect(), Err(Error::Begin(nic::Error::Illegal)));
    assert!(!arp.is_connected());

    arp.driver_mut().set_begin(Ok(()));
    arp.driver_mut().set_lease(Err(nic::Error::Unreachable));
    assert_eq!(arp.connect(), Err(Error::Lease(nic::Error::Unreachable)));
    assert!(!arp.is_connected());

    arp.driver_mut().set_lease(Ok(lease()));
    assert!(arp.connect().is_ok());
    assert!(arp.is_connected());

    // A new attempt starts from scratch.
    arp.driver_mut().set_lease(Err(nic::Error::Unreachable));
    assert!(arp.connect().is_err());
    assert!(!arp.is_connected());
    assert_eq!(arp.lease(), None);
}

#[test]
fn buffer_too_large_for_device() {
    let nic = External::new(vec![0u8; 64]);
    let mut arp = Endpoint::new(nic, DEVICE, Config::default()).unwrap();
    assert_eq!(arp.connect(), Err(Error::Begin(nic::Error::BadSize)));
    assert!(!arp.is_connected());
}

#[test]
fn send_once() {
    let mut arp = endpoint();
    arp.connect().unwrap();
    arp.set_dst_ip("10.0.0.5").unwrap();
    arp.send().unwrap();

    let nic = arp.driver();
    assert_eq!(nic.transmitted(), 1);
    assert_eq!(nic.last_transmit(), Some(&arp.frame().as_bytes()[..]));
    assert_eq!(&nic.get_ref()[..Frame::LEN], &arp.frame().as_bytes()[..]);
}

#[test]
fn send_per_byte() {
    let nic = External::new(vec![0u8; 64]);
    let config = Config::default()
        .buffer_len(64)
        .transmit(TransmitMode::PerByte);
    let mut arp = Endpoint::new(nic, DEVICE, config).unwrap();
    arp.connect().unwrap();
    arp.send().unwrap();

    let nic = arp.driver();
    assert_eq!(nic.transmitted(), Frame::LEN);
    assert_eq!(nic.last_transmit(), Some(&REQUEST_BYTES[..]));
}

#[test]
fn send_repeats_frame() {
    let mut arp = endpoint();
    arp.connect().unwrap();
    arp.send().unwrap();
    arp.send().unwrap();
    assert_eq!(arp.driver().transmitted(), 2);
    assert_eq!(arp.driver().last_transmit(), Some(&REQUEST_BYTES[..]));
}

#[test]
fn send_short_buffer() {
    let nic = External::new(vec![0u8; 64]);
    let config = Config::default().buffer_len(Frame::LEN - 1);
    let mut arp = Endpoint::new(nic, DEVICE, config).unwrap();
    arp.connect().unwrap();

    assert_eq!(arp.send(), Err(Error::BadSize));
    assert_eq!(arp.driver().transmitted(), 0);
}

#[test]
fn signal_during_send() {
    let states = RefCell::new(Vec::<bool>::new());
    let mut arp = endpoint()
        .with_signal(FnHandler(|active: bool| states.borrow_mut().push(active)));

    arp.connect().unwrap();
    assert!(states.borrow().is_empty());
    arp.send().unwrap();
    assert_eq!(&states.borrow()[..], &[true, false]);
    arp.send().unwrap();
    assert_eq!(&states.borrow()[..], &[true, false, true, false]);
}

#[test]
fn signal_released_on_error() {
    let mut states = Vec::<bool>::new();
    {
        let nic = External::new(vec![0u8; 64]);
        let config = Config::default().buffer_len(16);
        let mut arp = Endpoint::new(nic, DEVICE, config).unwrap()
            .with_signal(FnHandler(|active: bool| states.push(active)));
        arp.connect().unwrap();
        assert_eq!(arp.send(), Err(Error::BadSize));
    }
    assert_eq!(states, vec![true, false]);
}

#[test]
fn into_inner() {
    let mut arp = endpoint();
    arp.connect().unwrap();
    arp.send().unwrap();
    let nic = arp.into_inner();
    assert_eq!(&nic.into_inner()[..Frame::LEN], &REQUEST_BYTES[..]);
}
