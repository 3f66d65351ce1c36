use core::fmt;

use crate::layer::FnHandler;
use crate::nic::{self, Driver, Lease};
use crate::wire::{ArpOperation, ArpRepr, Delimiter, EthernetAddress, EthernetProtocol,
    EthernetRepr, Frame, Ipv4Address, ParseAddressError};
use crate::wire::parse::parse_octets;

use super::Config;
use super::TransmitMode;

/// The result type of the arp endpoint.
pub type Result<T> = core::result::Result<T, Error>;

/// The error type of the arp endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The device address was not a valid Ethernet address.
    Address(ParseAddressError),

    /// The driver failed to bring up the hardware.
    Begin(nic::Error),

    /// The driver failed to obtain an address lease.
    Lease(nic::Error),

    /// The transmit buffer of the driver can not hold a frame.
    BadSize,
}

/// An indicator asserted for the duration of each transmission.
///
/// Typically a status LED. The unit type is an indicator that does nothing.
pub trait Signal {
    /// Switch the indicator on or off.
    fn set(&mut self, active: bool);
}

/// Sends a single, configurable ARP frame through a driver.
///
/// The endpoint owns exactly one frame. It is populated with defaults on construction, a
/// broadcast request from the device address, and afterwards changed only through the setters.
/// Every `send` puts the current state of the frame on the link. Since the frame outlives the
/// transmission, repeated sends of the same announcement need no further setup.
///
/// The link has two states. It is disconnected until a `connect` succeeds, and each `connect`
/// starts again from the disconnected state. Sending does not depend on the link state, it is up
/// to the driver to refuse transmission on a device that was not brought up.
pub struct Endpoint<D, S = ()> {
    /// The frame, always fully populated.
    frame: Frame,

    /// Target buffer for textual addresses.
    ///
    /// Parsing may fail halfway so the frame is only updated from here on success.
    scratch: [u8; 6],

    /// The hardware address of the device, as given on construction.
    device_mac: EthernetAddress,

    config: Config,
    driver: D,
    signal: S,

    /// The lease of the last successful `connect`.
    lease: Option<Lease>,
}

impl<D: Driver> Endpoint<D> {
    /// Create an endpoint sending from the device with the given hardware address.
    ///
    /// The address is expected in the colon separated hexadecimal notation and is interpreted
    /// according to the parse policy of the configuration. The frame starts out as a request from
    /// the device address and the configured placeholder protocol address, to the broadcast
    /// hardware and protocol address.
    pub fn new(driver: D, device_mac: &str, config: Config) -> Result<Self> {
        let mut scratch = [0; 6];
        parse_octets(device_mac, Delimiter::Colon, config.policy, &mut scratch)?;
        let device_mac = EthernetAddress(scratch);

        Ok(Self::with_address(driver, device_mac, config))
    }

    /// Create an endpoint from a binary device address.
    pub fn with_address(driver: D, device_mac: EthernetAddress, config: Config) -> Self {
        let frame = Frame::new(
            EthernetRepr {
                src_addr: device_mac,
                dst_addr: EthernetAddress::BROADCAST,
                ethertype: EthernetProtocol::Arp,
            },
            ArpRepr::EthernetIpv4 {
                operation: ArpOperation::Request,
                source_hardware_addr: device_mac,
                source_protocol_addr: config.source_placeholder,
                target_hardware_addr: EthernetAddress::BROADCAST,
                target_protocol_addr: Ipv4Address::BROADCAST,
            });

        Endpoint {
            frame,
            scratch: [0; 6],
            device_mac,
            config,
            driver,
            signal: (),
            lease: None,
        }
    }
}

impl<D: Driver, S: Signal> Endpoint<D, S> {
    /// Attach an indicator for transmissions, replacing the current one.
    pub fn with_signal<T: Signal>(self, signal: T) -> Endpoint<D, T> {
        Endpoint {
            frame: self.frame,
            scratch: self.scratch,
            device_mac: self.device_mac,
            config: self.config,
            driver: self.driver,
            signal,
            lease: self.lease,
        }
    }

    /// Set the destination hardware address in both the Ethernet and the ARP header.
    pub fn set_dst_mac(&mut self, addr: &str) -> core::result::Result<(), ParseAddressError> {
        let addr = self.parse_mac(addr)?;
        self.set_dst_mac_addr(addr);
        Ok(())
    }

    /// Set the destination hardware address in both headers, from a binary address.
    pub fn set_dst_mac_addr(&mut self, addr: EthernetAddress) {
        self.set_l2_dst_mac_addr(addr);
        self.set_arp_dst_mac_addr(addr);
    }

    /// Set the source hardware address in both the Ethernet and the ARP header.
    pub fn set_src_mac(&mut self, addr: &str) -> core::result::Result<(), ParseAddressError> {
        let addr = self.parse_mac(addr)?;
        self.set_src_mac_addr(addr);
        Ok(())
    }

    /// Set the source hardware address in both headers, from a binary address.
    pub fn set_src_mac_addr(&mut self, addr: EthernetAddress) {
        self.set_l2_src_mac_addr(addr);
        self.set_arp_src_mac_addr(addr);
    }

    /// Set only the destination address of the Ethernet header.
    pub fn set_l2_dst_mac(&mut self, addr: &str) -> core::result::Result<(), ParseAddressError> {
        let addr = self.parse_mac(addr)?;
        self.set_l2_dst_mac_addr(addr);
        Ok(())
    }

    /// Set only the destination address of the Ethernet header, from a binary address.
    pub fn set_l2_dst_mac_addr(&mut self, addr: EthernetAddress) {
        self.frame.ethernet_mut().set_dst_addr(addr);
    }

    /// Set only the source address of the Ethernet header.
    pub fn set_l2_src_mac(&mut self, addr: &str) -> core::result::Result<(), ParseAddressError> {
        let addr = self.parse_mac(addr)?;
        self.set_l2_src_mac_addr(addr);
        Ok(())
    }

    /// Set only the source address of the Ethernet header, from a binary address.
    pub fn set_l2_src_mac_addr(&mut self, addr: EthernetAddress) {
        self.frame.ethernet_mut().set_src_addr(addr);
    }

    /// Set only the target hardware address of the ARP header.
    pub fn set_arp_dst_mac(&mut self, addr: &str) -> core::result::Result<(), ParseAddressError> {
        let addr = self.parse_mac(addr)?;
        self.set_arp_dst_mac_addr(addr);
        Ok(())
    }

    /// Set only the target hardware address of the ARP header, from a binary address.
    pub fn set_arp_dst_mac_addr(&mut self, addr: EthernetAddress) {
        self.frame.arp_mut().set_target_hardware_addr(addr);
    }

    /// Set only the sender hardware address of the ARP header.
    pub fn set_arp_src_mac(&mut self, addr: &str) -> core::result::Result<(), ParseAddressError> {
        let addr = self.parse_mac(addr)?;
        self.set_arp_src_mac_addr(addr);
        Ok(())
    }

    /// Set only the sender hardware address of the ARP header, from a binary address.
    pub fn set_arp_src_mac_addr(&mut self, addr: EthernetAddress) {
        self.frame.arp_mut().set_source_hardware_addr(addr);
    }

    /// Set the target protocol address.
    pub fn set_dst_ip(&mut self, addr: &str) -> core::result::Result<(), ParseAddressError> {
        let addr = self.parse_ip(addr)?;
        self.set_dst_ip_addr(addr);
        Ok(())
    }

    /// Set the target protocol address, from a binary address.
    pub fn set_dst_ip_addr(&mut self, addr: Ipv4Address) {
        self.frame.arp_mut().set_target_protocol_addr(addr);
    }

    /// Set the sender protocol address.
    pub fn set_src_ip(&mut self, addr: &str) -> core::result::Result<(), ParseAddressError> {
        let addr = self.parse_ip(addr)?;
        self.set_src_ip_addr(addr);
        Ok(())
    }

    /// Set the sender protocol address, from a binary address.
    pub fn set_src_ip_addr(&mut self, addr: Ipv4Address) {
        self.frame.arp_mut().set_source_protocol_addr(addr);
    }

    /// Set the operation of the packet, request or reply.
    pub fn set_operation(&mut self, operation: ArpOperation) {
        self.frame.arp_mut().set_operation(operation);
    }

    /// Bring up the device and obtain an address lease.
    ///
    /// The endpoint is disconnected until both steps have succeeded. A failed call leaves it
    /// disconnected, there is no retry. Call again to start over.
    pub fn connect(&mut self) -> Result<&Lease> {
        self.lease = None;

        net_debug!("arp: opening ethernet port as {}", self.device_mac);
        self.driver.begin(self.config.buffer_len, self.device_mac)
            .map_err(Error::Begin)?;

        net_debug!("arp: waiting for lease");
        let lease = self.driver.lease()
            .map_err(Error::Lease)?;

        net_debug!("arp: ip {}", lease.address);
        net_debug!("arp: gateway {}", lease.gateway);
        net_debug!("arp: netmask {}", lease.netmask);
        net_debug!("arp: dns {}", lease.dns);

        Ok(&*self.lease.get_or_insert(lease))
    }

    /// Whether the last `connect` succeeded.
    pub fn is_connected(&self) -> bool {
        self.lease.is_some()
    }

    /// The lease of the last successful `connect`.
    pub fn lease(&self) -> Option<&Lease> {
        self.lease.as_ref()
    }

    /// Transmit the frame in its current state.
    ///
    /// The signal is active while the frame is copied into the transmit buffer of the driver and
    /// handed to the link. Fails only if the transmit buffer is too short for the frame, in which
    /// case nothing is transmitted.
    pub fn send(&mut self) -> Result<()> {
        self.signal.set(true);
        let result = self.transmit();
        self.signal.set(false);
        result
    }

    /// The frame to be sent.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// The hardware address of the device.
    pub fn device_mac(&self) -> EthernetAddress {
        self.device_mac
    }

    /// The configuration of this endpoint.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get a reference to the driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Get a mutable reference to the driver.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Consume the endpoint, returning the driver.
    pub fn into_inner(self) -> D {
        self.driver
    }

    fn transmit(&mut self) -> Result<()> {
        let bytes = self.frame.as_bytes();

        if self.driver.tx_buffer().len() < bytes.len() {
            net_debug!("arp: transmit buffer too short for {} bytes", bytes.len());
            return Err(Error::BadSize);
        }

        net_trace!("arp: sending {}", self.frame);

        match self.config.transmit {
            TransmitMode::Once => {
                self.driver.tx_buffer()[..bytes.len()].copy_from_slice(bytes);
                self.driver.transmit(bytes.len());
            },
            TransmitMode::PerByte => for (idx, &byte) in bytes.iter().enumerate() {
                self.driver.tx_buffer()[idx] = byte;
                self.driver.transmit(bytes.len());
            },
        }

        Ok(())
    }

    fn parse_mac(&mut self, src: &str) -> core::result::Result<EthernetAddress, ParseAddressError> {
        parse_octets(src, Delimiter::Colon, self.config.policy, &mut self.scratch)?;
        Ok(EthernetAddress(self.scratch))
    }

    fn parse_ip(&mut self, src: &str) -> core::result::Result<Ipv4Address, ParseAddressError> {
        parse_octets(src, Delimiter::Dot, self.config.policy, &mut self.scratch)?;
        Ok(Ipv4Address::from_bytes(&self.scratch[..4]))
    }
}

impl Signal for () {
    fn set(&mut self, _: bool) { }
}

impl<F: FnMut(bool)> Signal for FnHandler<F> {
    fn set(&mut self, active: bool) {
        (self.0)(active)
    }
}

impl From<ParseAddressError> for Error {
    fn from(err: ParseAddressError) -> Self {
        Error::Address(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Address(err) => write!(f, "invalid device address: {}", err),
            Error::Begin(err) => write!(f, "could not bring up device: {}", err),
            Error::Lease(err) => write!(f, "could not obtain lease: {}", err),
            Error::BadSize => write!(f, "transmit buffer too short for frame"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error { }
