//! Encapsulates the network interface driver.
//!
//! The sender only needs a very narrow view of the device: bring up the hardware with a hardware
//! address, negotiate an address lease, and put a number of octets from a transmit buffer on the
//! link. Everything else, such as the buffer management of the chip, the PHY or the lease
//! protocol, is the business of the driver.
//!
//! Also permits software emulation of a device, of course. See [`External`] for one that keeps
//! everything in memory.
//!
//! [`External`]: external/struct.External.html
use core::fmt;

use crate::wire::{EthernetAddress, Ipv4Address};

pub mod external;

#[cfg(all(feature = "sys", target_os = "linux"))]
#[path="sys/mod.rs"]
mod sys_internal;

#[cfg(all(feature = "sys", target_os = "linux"))]
pub use self::sys_internal::exports as sys;

/// The result type of driver operations.
pub type Result<T> = core::result::Result<T, Error>;

/// The error type of driver operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Error {
    /// The operation was not permitted.
    ///
    /// Returned when the device refuses or does not implement an operation, or when the
    /// underlying hardware or OS reported a failure.
    Illegal,

    /// The buffer size does not fit the device or the frame.
    BadSize,

    /// No lease could be negotiated on the link.
    Unreachable,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Illegal     => write!(f, "operation not permitted by the device"),
            Error::BadSize     => write!(f, "buffer size not supported"),
            Error::Unreachable => write!(f, "no address lease obtained"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error { }

/// The addresses assigned to the device by a lease negotiation.
///
/// The driver owns the negotiation, this is a copy of its outcome.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Lease {
    /// The address of this device.
    pub address: Ipv4Address,
    /// The default gateway.
    pub gateway: Ipv4Address,
    /// The subnet mask of the local link.
    pub netmask: Ipv4Address,
    /// The name server.
    pub dns: Ipv4Address,
}

/// A link layer device driver.
///
/// The operations are blocking for as long as the hardware requires. Timeouts, if any, are
/// implemented by the driver.
pub trait Driver {
    /// Initialize the hardware.
    ///
    /// The device should use a buffer of `buffer_len` octets, shared for receiving and
    /// transmitting, and assume the hardware address `mac`. May be called again to restart the
    /// device from scratch.
    fn begin(&mut self, buffer_len: usize, mac: EthernetAddress) -> Result<()>;

    /// Negotiate an address lease on the link.
    ///
    /// Only meaningful after a successful `begin`.
    fn lease(&mut self) -> Result<Lease>;

    /// The buffer from which frames are transmitted.
    fn tx_buffer(&mut self) -> &mut [u8];

    /// Transmit the first `len` octets of the transmit buffer.
    ///
    /// There is no failure channel. A driver which can observe transmission errors should keep
    /// them for later inspection instead.
    fn transmit(&mut self, len: usize);
}

impl<D: Driver + ?Sized> Driver for &'_ mut D {
    fn begin(&mut self, buffer_len: usize, mac: EthernetAddress) -> Result<()> {
        (**self).begin(buffer_len, mac)
    }

    fn lease(&mut self) -> Result<Lease> {
        (**self).lease()
    }

    fn tx_buffer(&mut self) -> &mut [u8] {
        (**self).tx_buffer()
    }

    fn transmit(&mut self, len: usize) {
        (**self).transmit(len)
    }
}

impl fmt::Display for Lease {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "inet {} netmask {} gateway {} dns {}",
               self.address, self.netmask, self.gateway, self.dns)
    }
}
