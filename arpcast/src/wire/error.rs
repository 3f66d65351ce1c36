use core::fmt;

/// The error type for frame parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A buffer could not be interpreted because it was shorter than the layout requires.
    Truncated,

    /// A packet could not be recognized.
    ///
    /// E.g. an ARP packet for a hardware or protocol type other than Ethernet and IPv4, or an
    /// Ethernet frame with a different EtherType.
    Unrecognized,

    /// A packet was recognized but was self-contradictory.
    ///
    /// Example: an Ethernet/IPv4 ARP packet announcing address lengths other than 6 and 4.
    Malformed,
}

/// The result type for frame parsing.
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Truncated    => write!(f, "truncated packet"),
            Error::Unrecognized => write!(f, "unrecognized packet"),
            Error::Malformed    => write!(f, "malformed packet"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error { }
