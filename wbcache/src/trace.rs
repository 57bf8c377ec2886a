use lazy_static::lazy_static;
use regex::Regex;
use crate::error::TraceError;

const READ_MARKER: &str = "R";
const WRITE_MARKER: &str = "W";

lazy_static! {
    static ref ADDRESS_PATTERN: Regex =
        Regex::new(r"^(?:0[xX](?P<hex>[0-9a-fA-F]+)|(?P<dec>-?[0-9]+))$").unwrap();
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AccessKind {
    Read,
    Write,
}

impl AccessKind {
    pub fn is_write(&self) -> bool {
        matches!(self, AccessKind::Write)
    }
}

/// One event of a trace: a byte address and whether it is read or written
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Access {
    pub address: u32,
    pub kind: AccessKind,
}

impl Access {
    pub fn read(address: u32) -> Self {
        Self {
            address,
            kind: AccessKind::Read,
        }
    }

    pub fn write(address: u32) -> Self {
        Self {
            address,
            kind: AccessKind::Write,
        }
    }
}

/// Parses one trace line of the form `R <address>` or `W <address>`
///
/// Blank lines aren't accesses and give `None`, anything else which isn't exactly a marker and an
/// address is an error
///
/// # Examples
///
/// ```
/// use wbcache::trace::{parse_line, Access};
/// assert_eq!(parse_line("W 0x10001000"), Ok(Some(Access::write(0x1000_1000))));
/// assert_eq!(parse_line("  "), Ok(None));
/// assert!(parse_line("X 0x10").is_err());
/// ```
pub fn parse_line(line: &str) -> Result<Option<Access>, TraceError> {
    let mut tokens = line.split_whitespace();
    let Some(marker) = tokens.next() else {
        return Ok(None);
    };
    let kind = match marker {
        READ_MARKER => AccessKind::Read,
        WRITE_MARKER => AccessKind::Write,
        other => return Err(TraceError::UnknownMarker(other.to_string())),
    };
    let address = parse_address(tokens.next().ok_or(TraceError::MissingAddress)?)?;
    if let Some(trailing) = tokens.next() {
        return Err(TraceError::TrailingInput(trailing.to_string()));
    }
    Ok(Some(Access { address, kind }))
}

/// Parses a 32-bit address written as `0x` prefixed hexadecimal or as decimal
///
/// Negative decimals within `i32` range are taken as their two's complement bit pattern, so
/// `-1` is the same address as `0xFFFFFFFF`
///
/// # Examples
///
/// ```
/// use wbcache::trace::parse_address;
/// assert_eq!(parse_address("0x10001000"), Ok(0x1000_1000));
/// assert_eq!(parse_address("4096"), Ok(0x1000));
/// assert_eq!(parse_address("-1"), Ok(0xFFFF_FFFF));
/// ```
pub fn parse_address(token: &str) -> Result<u32, TraceError> {
    let invalid = || TraceError::InvalidAddress(token.to_string());
    let captures = ADDRESS_PATTERN.captures(token).ok_or_else(invalid)?;
    if let Some(hex) = captures.name("hex") {
        return u32::from_str_radix(hex.as_str(), 16).map_err(|_| invalid());
    }
    let decimal = captures.name("dec").ok_or_else(invalid)?;
    let value = decimal.as_str().parse::<i64>().map_err(|_| invalid())?;
    if let Ok(address) = u32::try_from(value) {
        Ok(address)
    } else {
        i32::try_from(value).map(|signed| signed as u32).map_err(|_| invalid())
    }
}
