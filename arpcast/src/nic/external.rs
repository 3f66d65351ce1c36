//! A stub nic whose buffer comes from an external source.
use crate::wire::EthernetAddress;

use super::{Driver, Error, Lease, Result};

/// An in-memory driver.
///
/// Transmitting leaves the frame in the buffer and only counts the transmission, while the
/// outcome of bringing up the device and of the lease negotiation are chosen upfront. This makes
/// it suitable both for tests and for hosts where the actual transmission happens elsewhere, e.g.
/// by handing the buffer to a DMA engine after each `send`.
#[derive(Debug)]
pub struct External<T> {
    /// Backing buffer, shared for receiving and transmitting.
    buffer: T,

    /// Length of the buffer in use, as requested by `begin`.
    buffer_len: Option<usize>,

    /// The hardware address from the last successful `begin`.
    hardware_addr: Option<EthernetAddress>,

    /// Outcome of the next `begin`, if the buffer is large enough.
    begin: Result<()>,

    /// Outcome of the next `lease`.
    lease: Result<Lease>,

    /// Number of transmit requests.
    transmitted: usize,

    /// The length requested by the last transmission.
    last_len: Option<usize>,
}

impl<T: AsRef<[u8]> + AsMut<[u8]>> External<T> {
    /// A new external nic which succeeds to begin and to lease an unspecified address.
    pub fn new(buffer: T) -> Self {
        External {
            buffer,
            buffer_len: None,
            hardware_addr: None,
            begin: Ok(()),
            lease: Ok(Lease::default()),
            transmitted: 0,
            last_len: None,
        }
    }

    /// Hand out the given lease on negotiation.
    pub fn with_lease(self, lease: Lease) -> Self {
        External { lease: Ok(lease), ..self }
    }

    /// Set the outcome of the next hardware initialization.
    pub fn set_begin(&mut self, result: Result<()>) {
        self.begin = result;
    }

    /// Set the outcome of the next lease negotiation.
    pub fn set_lease(&mut self, result: Result<Lease>) {
        self.lease = result;
    }

    /// The hardware address the device was initialized with.
    pub fn hardware_addr(&self) -> Option<EthernetAddress> {
        self.hardware_addr
    }

    /// The buffer length the device was initialized with.
    pub fn buffer_len(&self) -> Option<usize> {
        self.buffer_len
    }

    /// Number of transmit requests so far.
    pub fn transmitted(&self) -> usize {
        self.transmitted
    }

    /// The octets handed to the link by the last transmission.
    pub fn last_transmit(&self) -> Option<&[u8]> {
        let len = self.last_len?;
        Some(&self.buffer.as_ref()[..len])
    }

    /// Reset the transmission counter.
    pub fn reset_transmitted(&mut self) {
        self.transmitted = 0;
        self.last_len = None;
    }

    /// Get the complete underlying buffer.
    pub fn get_ref(&self) -> &T {
        &self.buffer
    }

    /// Consumes the nic, returning the underlying buffer.
    pub fn into_inner(self) -> T {
        self.buffer
    }
}

impl<T: AsRef<[u8]> + AsMut<[u8]>> Driver for External<T> {
    fn begin(&mut self, buffer_len: usize, mac: EthernetAddress) -> Result<()> {
        self.hardware_addr = None;

        if buffer_len > self.buffer.as_ref().len() {
            return Err(Error::BadSize);
        }

        self.begin?;
        self.buffer_len = Some(buffer_len);
        self.hardware_addr = Some(mac);
        Ok(())
    }

    fn lease(&mut self) -> Result<Lease> {
        if self.hardware_addr.is_none() {
            return Err(Error::Illegal);
        }

        self.lease
    }

    fn tx_buffer(&mut self) -> &mut [u8] {
        let buffer = self.buffer.as_mut();
        let len = self.buffer_len.unwrap_or(buffer.len());
        &mut buffer[..len]
    }

    fn transmit(&mut self, len: usize) {
        let len = len.min(self.tx_buffer().len());
        self.transmitted += 1;
        self.last_len = Some(len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::Ipv4Address;

    const MAC: EthernetAddress = EthernetAddress([0x02, 0, 0, 0, 0, 1]);

    #[test]
    fn begin_checks_size() {
        let mut nic = External::new([0u8; 64]);
        assert_eq!(nic.begin(65, MAC), Err(Error::BadSize));
        assert_eq!(nic.hardware_addr(), None);
        assert_eq!(nic.begin(64, MAC), Ok(()));
        assert_eq!(nic.hardware_addr(), Some(MAC));
        assert_eq!(nic.tx_buffer().len(), 64);
    }

    #[test]
    fn lease_requires_begin() {
        let lease = Lease {
            address: Ipv4Address::new(10, 0, 0, 2),
            gateway: Ipv4Address::new(10, 0, 0, 1),
            netmask: Ipv4Address::new(255, 255, 255, 0),
            dns: Ipv4Address::new(10, 0, 0, 1),
        };
        let mut nic = External::new(vec![0u8; 64]).with_lease(lease);
        assert_eq!(nic.lease(), Err(Error::Illegal));
        nic.begin(32, MAC).unwrap();
        assert_eq!(nic.lease(), Ok(lease));
        assert_eq!(nic.tx_buffer().len(), 32);
    }

    #[test]
    fn scripted_failure() {
        let mut nic = External::new([0u8; 64]);
        nic.set_begin(Err(Error::Illegal));
        assert_eq!(nic.begin(64, MAC), Err(Error::Illegal));
        assert_eq!(nic.hardware_addr(), None);
    }

    #[test]
    fn transmit_records() {
        let mut nic = External::new([0u8; 8]);
        nic.tx_buffer()[..3].copy_from_slice(&[1, 2, 3]);
        assert_eq!(nic.last_transmit(), None);
        nic.transmit(3);
        assert_eq!(nic.transmitted(), 1);
        assert_eq!(nic.last_transmit(), Some(&[1u8, 2, 3][..]));
        nic.reset_transmitted();
        assert_eq!(nic.transmitted(), 0);
    }
}
