// Copyright (C) 2016 whitequark@whitequark.org
// Copyright (C) 2019 Andreas Molzer <andreas.molzer@tum.de>
//
// in large parts from `smoltcp` originally distributed under 0-clause BSD
use core::mem;
#[cfg(feature = "std")]
use std::os::unix::io::{RawFd, AsRawFd};

use libc;
use super::{ifreq, linux, Errno, FdResult, LibcResult, IoLenResult};

use crate::nic::{self, Driver, Lease};
use crate::wire::{arp_packet, EthernetAddress};

mod socket_traits {
    #[cfg(target_os = "linux")]
    pub(crate) use super::linux::IfIndex;
    #[cfg(target_os = "linux")]
    pub(crate) use super::linux::NetdeviceMtu;
}

use socket_traits::{IfIndex, NetdeviceMtu};

/// A static descriptor for interacting with a raw socket.
///
/// Contains the file descriptor and a pre-filled `ifreq` structure with the interface name that is
/// required for `ioctl` calls. This offers the raw methods for writing but does not encapsulate an
/// actual `nic::Driver`. Wrap it in a [`RawSocket`] with a buffer for this.
///
/// [`RawSocket`]: struct.RawSocket.html
#[derive(Debug)]
pub struct RawSocketDesc {
    lower: libc::c_int,
    ifreq: ifreq,
}

/// A raw packet socket with buffer, usable as a driver.
///
/// Uses the errno principle for storing the last underlying error on a failed operation. The
/// socket is only opened by `begin`, and reopened on every further `begin`.
///
/// There is no lease negotiation on a raw socket. The host already configured the interface, so
/// the lease is provided upfront and handed out once the socket is bound.
#[derive(Debug)]
pub struct RawSocket<C> {
    name: ifreq,
    inner: Option<RawSocketDesc>,
    buffer: C,
    buffer_len: usize,
    lease: Lease,
    hardware_addr: Option<EthernetAddress>,
    last_err: Option<Errno>,
}

#[cfg(feature = "std")]
impl AsRawFd for RawSocketDesc {
    fn as_raw_fd(&self) -> RawFd {
        self.lower
    }
}

impl RawSocketDesc {
    /// Try to open a socket for the named interface.
    ///
    /// Note that this does *not* yet bind the interface to the socket, it only creates the
    /// necessary structures involved in doing so. Call [`bind_interface`] afterwards.
    ///
    /// [`bind_interface`]: #method.bind_interface
    pub fn new(name: &str) -> Result<RawSocketDesc, Errno> {
        Self::with_ifreq(ifreq::new(name))
    }

    fn with_ifreq(ifreq: ifreq) -> Result<RawSocketDesc, Errno> {
        let lower = unsafe {
            libc::socket(
                libc::AF_PACKET,
                libc::SOCK_RAW,
                linux::ETH_P_ARP.to_be() as i32)
        };

        FdResult(lower).errno()?;

        Ok(RawSocketDesc {
            lower,
            ifreq,
        })
    }

    /// Query the interface MTU, as reported by the OS.
    pub fn interface_mtu(&mut self) -> Result<usize, Errno> {
        self.ifreq.get_mtu(self.lower)
            .map(|mtu| mtu as usize)
    }

    /// Update the file descriptor to the named interface.
    ///
    /// See `bind` with `AF_PACKET` for errors and a discussion of platform requirements.
    pub fn bind_interface(&mut self) -> Result<(), Errno> {
        let sockaddr = libc::sockaddr_ll {
            sll_family:   libc::AF_PACKET as u16,
            sll_protocol: linux::ETH_P_ARP.to_be() as u16,
            sll_ifindex:  self.ifreq.get_if_index(self.lower)?,
            sll_hatype:   1,
            sll_pkttype:  0,
            sll_halen:    6,
            sll_addr:     [0; 8],
        };

        let res = unsafe {
            libc::bind(
                self.lower,
                &sockaddr as *const libc::sockaddr_ll as *const libc::sockaddr,
                mem::size_of::<libc::sockaddr_ll>() as u32)
        };

        FdResult(res).errno()
    }

    /// Send a single frame from a buffer.
    pub fn send(&mut self, buffer: &[u8]) -> Result<usize, Errno> {
        let len = unsafe {
            libc::send(
                self.lower,
                buffer.as_ptr() as *const libc::c_void,
                buffer.len(),
                0)
        };
        IoLenResult(len).errno()?;
        Ok(len as usize)
    }
}

impl<C: AsRef<[u8]> + AsMut<[u8]>> RawSocket<C> {
    /// Prepare a raw socket for the named interface with one buffer for frames.
    ///
    /// Nothing is opened until the driver is started with `begin`.
    pub fn new(name: &str, buffer: C, lease: Lease) -> Self {
        let buffer_len = buffer.as_ref().len();
        RawSocket {
            name: ifreq::new(name),
            inner: None,
            buffer,
            buffer_len,
            lease,
            hardware_addr: None,
            last_err: None,
        }
    }

    /// The hardware address passed to the last successful `begin`.
    pub fn hardware_addr(&self) -> Option<EthernetAddress> {
        self.hardware_addr
    }

    /// Take the last error that occurred in an operation.
    pub fn last_err(&mut self) -> Option<Errno> {
        self.last_err.take()
    }

    /// Get a reference to the open descriptor, if any.
    pub fn descriptor(&self) -> Option<&RawSocketDesc> {
        self.inner.as_ref()
    }

    fn open(&mut self) -> Result<RawSocketDesc, Errno> {
        let mut desc = RawSocketDesc::with_ifreq(self.name)?;
        desc.bind_interface()?;
        Ok(desc)
    }
}

impl<C: AsRef<[u8]> + AsMut<[u8]>> Driver for RawSocket<C> {
    fn begin(&mut self, buffer_len: usize, mac: EthernetAddress) -> nic::Result<()> {
        // Closes any previous descriptor.
        self.inner = None;
        self.hardware_addr = None;

        if buffer_len > self.buffer.as_ref().len() {
            return Err(nic::Error::BadSize);
        }

        let mut desc = match self.open() {
            Ok(desc) => desc,
            Err(err) => {
                self.last_err = Some(err);
                return Err(nic::Error::Illegal);
            },
        };

        let mtu = match desc.interface_mtu() {
            Ok(mtu) => mtu,
            Err(err) => {
                self.last_err = Some(err);
                return Err(nic::Error::Illegal);
            },
        };

        // The link must at least carry an ARP packet.
        if mtu < arp_packet::buffer_len() {
            return Err(nic::Error::BadSize);
        }

        self.inner = Some(desc);
        self.buffer_len = buffer_len;
        self.hardware_addr = Some(mac);
        Ok(())
    }

    fn lease(&mut self) -> nic::Result<Lease> {
        match self.inner {
            Some(_) => Ok(self.lease),
            None => Err(nic::Error::Illegal),
        }
    }

    fn tx_buffer(&mut self) -> &mut [u8] {
        &mut self.buffer.as_mut()[..self.buffer_len]
    }

    fn transmit(&mut self, len: usize) {
        let len = len.min(self.buffer_len);
        let desc = match self.inner.as_mut() {
            Some(desc) => desc,
            None => return,
        };

        match desc.send(&self.buffer.as_ref()[..len]) {
            Ok(_) => (),
            Err(err) => self.last_err = Some(err),
        }
    }
}

impl Drop for RawSocketDesc {
    fn drop(&mut self) {
        unsafe { libc::close(self.lower); }
    }
}
