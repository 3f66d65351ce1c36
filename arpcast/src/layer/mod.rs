//! The process logic of protocol layers.
//!
//! ## Layering
//!
//! Each protocol layer is split into two parts; the packet logic contained in `wire` and the
//! processing part in this module. An endpoint represents the local state of a protocol. This
//! state is open to modifications as part of a user program while no transmission takes place,
//! similar to reconfiguration on the OS level with utilities such as `arping` or `ifconfig`.
//!
//! ## Sending
//!
//! An endpoint owns the driver of the device it sends on. All operations are synchronous and only
//! block for as long as the driver does.
pub mod arp;

/// A standard wrapper for a function implementing callback traits.
///
/// Keeps the type alias overhead low by providing a single wrapper type that implements the
/// callback traits for all layers, where applicable.
pub struct FnHandler<F>(pub F);
