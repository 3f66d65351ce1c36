//! Conversion of delimited address notations into octets.
//!
//! Both MAC and IPv4 addresses are written as a fixed number of numeric components separated by a
//! single delimiter character. The delimiter alone decides the numeric base and the number of
//! components: a colon means six hexadecimal components, a dot four decimal ones.
//!
//! How malformed components are treated is a matter of [`Policy`]. The strict policy rejects
//! anything that is not the canonical notation. The lenient policy reads every component like C's
//! `strtoul`: it takes the longest numeric prefix and silently yields zero where there is none.
//! Some firmware depends on that permissiveness, e.g. to accept `192.168.000.001 ` with trailing
//! blanks, so it remains available.
//!
//! [`Policy`]: enum.Policy.html
use core::fmt;

/// The delimiter of an address notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    /// Colon separated hexadecimal, `aa:bb:cc:dd:ee:ff`.
    Colon,
    /// Dot separated decimal, `192.168.0.1`.
    Dot,
}

/// The treatment of malformed address components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// Only accept components consisting purely of digits whose value fits an octet.
    Strict,
    /// Read components like `strtoul`, treating malformed ones as zero.
    ///
    /// The component count is still checked, so a missing component or a dangling delimiter
    /// after the last one are errors. Anything after the last component that is not a delimiter
    /// is ignored.
    Lenient,
}

/// An error from parsing a textual address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseAddressError {
    kind: ErrorKind,
    delimiter: Delimiter,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ErrorKind {
    ComponentError,
    SeparatorError,
}

impl Delimiter {
    /// The delimiting character.
    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Colon => b':',
            Delimiter::Dot => b'.',
        }
    }

    /// The numeric base of each component.
    pub fn radix(self) -> u32 {
        match self {
            Delimiter::Colon => 16,
            Delimiter::Dot => 10,
        }
    }

    /// The number of components, equal to the number of octets of the address.
    pub fn fields(self) -> usize {
        match self {
            Delimiter::Colon => 6,
            Delimiter::Dot => 4,
        }
    }

    fn max_digits(self) -> usize {
        match self {
            Delimiter::Colon => 2,
            Delimiter::Dot => 3,
        }
    }
}

impl Default for Policy {
    fn default() -> Self {
        Policy::Strict
    }
}

impl ParseAddressError {
    pub(crate) fn component(delimiter: Delimiter) -> Self {
        ParseAddressError { kind: ErrorKind::ComponentError, delimiter }
    }

    pub(crate) fn separator(delimiter: Delimiter) -> Self {
        ParseAddressError { kind: ErrorKind::SeparatorError, delimiter }
    }

    /// Whether a single component was not a valid number.
    pub fn is_component(&self) -> bool {
        self.kind == ErrorKind::ComponentError
    }

    /// Whether the address did not have the expected number of components.
    pub fn is_separator(&self) -> bool {
        self.kind == ErrorKind::SeparatorError
    }
}

impl fmt::Display for ParseAddressError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let what = match self.delimiter {
            Delimiter::Colon => "ethernet",
            Delimiter::Dot => "ipv4",
        };
        match self.kind {
            ErrorKind::ComponentError => write!(f, "invalid {} component", what),
            ErrorKind::SeparatorError => write!(f,
                "unexpected number of {} address components (should be {})",
                what, self.delimiter.fields()),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseAddressError { }

/// Parse a delimited address into the first `delimiter.fields()` octets of `octets`.
///
/// On error, a prefix of `octets` may already have been overwritten.
///
/// # Panics
/// The function panics if `octets` is shorter than `delimiter.fields()`.
///
/// # Example
///
/// ```
/// use arpcast::wire::parse::{parse_octets, Delimiter, Policy};
/// let mut ip = [0; 4];
/// parse_octets("10.0.0.5", Delimiter::Dot, Policy::Strict, &mut ip).unwrap();
/// assert_eq!(ip, [10, 0, 0, 5]);
///
/// assert!(parse_octets("10.0.0.5.", Delimiter::Dot, Policy::Lenient, &mut ip).is_err());
/// assert!(parse_octets("10.0.0.x", Delimiter::Dot, Policy::Lenient, &mut ip).is_ok());
/// assert_eq!(ip, [10, 0, 0, 0]);
/// ```
pub fn parse_octets(
    src: &str,
    delimiter: Delimiter,
    policy: Policy,
    octets: &mut [u8],
) -> Result<(), ParseAddressError> {
    let octets = &mut octets[..delimiter.fields()];
    match policy {
        Policy::Strict => parse_strict(src, delimiter, octets),
        Policy::Lenient => parse_lenient(src.as_bytes(), delimiter, octets),
    }
}

fn parse_strict(src: &str, delimiter: Delimiter, octets: &mut [u8])
    -> Result<(), ParseAddressError>
{
    let mut components = src.split(char::from(delimiter.as_byte()));
    for octet in octets.iter_mut() {
        let part = components
            .next()
            .ok_or(ParseAddressError::separator(delimiter))?;
        *octet = strict_component(part, delimiter)?;
    }

    if components.next().is_some() {
        Err(ParseAddressError::separator(delimiter))
    } else {
        Ok(())
    }
}

fn strict_component(part: &str, delimiter: Delimiter) -> Result<u8, ParseAddressError> {
    let radix = delimiter.radix();
    let well_formed = !part.is_empty()
        && part.len() <= delimiter.max_digits()
        && part.chars().all(|c| c.is_digit(radix));
    if !well_formed {
        return Err(ParseAddressError::component(delimiter));
    }

    u8::from_str_radix(part, radix)
        .map_err(|_| ParseAddressError::component(delimiter))
}

fn parse_lenient(src: &[u8], delimiter: Delimiter, octets: &mut [u8])
    -> Result<(), ParseAddressError>
{
    // A C string ends at the first nul.
    let end = src.iter().position(|&b| b == 0).unwrap_or(src.len());
    let mut rest = &src[..end];
    let last = octets.len() - 1;

    for (idx, octet) in octets.iter_mut().enumerate() {
        *octet = strtoul_octet(rest, delimiter.radix());

        // The next component starts after the next delimiter, wherever the number ended.
        match rest.iter().position(|&b| b == delimiter.as_byte()) {
            None if idx == last => return Ok(()),
            None => return Err(ParseAddressError::separator(delimiter)),
            Some(at) => rest = &rest[at + 1..],
        }
    }

    // A delimiter followed the last component.
    Err(ParseAddressError::separator(delimiter))
}

/// Read a number like a 32-bit `strtoul` and truncate it to an octet.
fn strtoul_octet(src: &[u8], radix: u32) -> u8 {
    let mut rest = src;
    while let Some((&first, tail)) = rest.split_first() {
        if !is_c_space(first) {
            break;
        }
        rest = tail;
    }

    let negative = match rest.first() {
        Some(b'-') => { rest = &rest[1..]; true },
        Some(b'+') => { rest = &rest[1..]; false },
        _ => false,
    };

    if radix == 16 {
        if let [b'0', b'x', digit, ..] | [b'0', b'X', digit, ..] = rest {
            if char::from(*digit).is_digit(16) {
                rest = &rest[2..];
            }
        }
    }

    let mut value: u32 = 0;
    let mut overflow = false;
    for &byte in rest {
        let digit = match char::from(byte).to_digit(radix) {
            Some(digit) => digit,
            None => break,
        };
        match value.checked_mul(radix).and_then(|v| v.checked_add(digit)) {
            Some(next) => value = next,
            None => overflow = true,
        }
    }

    if overflow {
        // Saturates at the maximum, regardless of the sign.
        return u32::MAX as u8;
    }

    let value = if negative { value.wrapping_neg() } else { value };
    value as u8
}

fn is_c_space(byte: u8) -> bool {
    match byte {
        b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r' => true,
        _ => false,
    }
}
