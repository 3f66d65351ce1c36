use crate::wire::{Ipv4Address, ParsePolicy};

/// Configuration of an arp endpoint.
///
/// Construct it with `Default` and adjust single values with the builder methods.
///
/// ```
/// use arpcast::layer::arp::{Config, TransmitMode};
/// use arpcast::wire::ParsePolicy;
///
/// let config = Config::default()
///     .buffer_len(1500)
///     .policy(ParsePolicy::Lenient)
///     .transmit(TransmitMode::PerByte);
/// assert_eq!(config.buffer_len, 1500);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Config {
    /// The size of the buffer requested from the driver, shared for receiving and transmitting.
    pub buffer_len: usize,

    /// The sender protocol address before one is chosen explicitly.
    pub source_placeholder: Ipv4Address,

    /// How textual addresses are interpreted by the setters.
    pub policy: ParsePolicy,

    /// How the frame is handed to the driver.
    pub transmit: TransmitMode,
}

/// Number of `transmit` invocations for a single frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransmitMode {
    /// Copy the whole frame, then transmit it once.
    Once,

    /// Transmit the frame after each copied octet.
    ///
    /// Puts 42 frames on the link for every `send`, all but the last partially updated. Only for
    /// receivers that were tuned to the behaviour of older firmware.
    PerByte,
}

impl Config {
    /// The default size of the driver buffer.
    pub const BUFFER_LEN: usize = 400;

    /// The default sender protocol address.
    pub const SOURCE_PLACEHOLDER: Ipv4Address = Ipv4Address::new(192, 168, 0, 1);

    /// Choose the size of the driver buffer.
    pub fn buffer_len(self, buffer_len: usize) -> Self {
        Config { buffer_len, ..self }
    }

    /// Choose the initial sender protocol address.
    pub fn source_placeholder(self, source_placeholder: Ipv4Address) -> Self {
        Config { source_placeholder, ..self }
    }

    /// Choose the parsing policy of textual addresses.
    pub fn policy(self, policy: ParsePolicy) -> Self {
        Config { policy, ..self }
    }

    /// Choose how frames are handed to the driver.
    pub fn transmit(self, transmit: TransmitMode) -> Self {
        Config { transmit, ..self }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            buffer_len: Self::BUFFER_LEN,
            source_placeholder: Self::SOURCE_PLACEHOLDER,
            policy: ParsePolicy::default(),
            transmit: TransmitMode::default(),
        }
    }
}

impl Default for TransmitMode {
    fn default() -> Self {
        TransmitMode::Once
    }
}
