//! Building and sending ARP messages.
//!
//! Restricted to a single Ethernet/IPv4 frame that is configured field by field and broadcast on
//! request. There is no receive path, answering requests or resolving addresses is not the
//! business of this endpoint.
//!
//! ```
//! use arpcast::layer::arp::{Config, Endpoint};
//! use arpcast::nic::external::External;
//! use arpcast::wire::ArpOperation;
//!
//! let nic = External::new(vec![0u8; 400]);
//! let mut arp = Endpoint::new(nic, "aa:bb:cc:dd:ee:ff", Config::default()).unwrap();
//! arp.set_dst_ip("10.0.0.5").unwrap();
//! arp.set_operation(ArpOperation::Request);
//!
//! arp.connect().unwrap();
//! arp.send().unwrap();
//! assert_eq!(arp.driver().transmitted(), 1);
//! ```
mod config;
mod endpoint;
#[cfg(test)]
mod tests;

pub use config::{Config, TransmitMode};

pub use endpoint::{Endpoint, Error, Result, Signal};
