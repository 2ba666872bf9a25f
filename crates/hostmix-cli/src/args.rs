//! Parsing of `VALUE:TYPE` input arguments

use thiserror::Error;

/// Malformed input argument
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgError {
    /// No `:TYPE` suffix
    #[error("input '{0}' must have the form VALUE:TYPE")]
    MissingType(String),

    /// Unknown type suffix
    #[error("unsupported input type '{0}' (expected i32, bytes or bytes-packed)")]
    UnknownType(String),

    /// Value does not fit the type
    #[error("invalid i32 value '{0}'")]
    InvalidInteger(String),

    /// Byte input without the 0x prefix or with bad hex
    #[error("invalid bytes value '{0}': {1}")]
    InvalidBytes(String, String),
}

/// Parse one `VALUE:TYPE` argument into the values it feeds the host.
///
/// `i32` accepts decimal (optionally negative) or `0x` hex bit patterns.
/// `bytes` takes a `0x` hex string and yields one value per byte.
/// `bytes-packed` packs the same bytes little-endian, four per value, with
/// the last value zero-padded.
pub fn parse_input(arg: &str) -> Result<Vec<i32>, ArgError> {
    let (value, ty) = arg
        .rsplit_once(':')
        .ok_or_else(|| ArgError::MissingType(arg.to_string()))?;

    match ty {
        "i32" => parse_i32(value).map(|v| vec![v]),
        "bytes" => Ok(parse_hex(value)?.into_iter().map(i32::from).collect()),
        "bytes-packed" => Ok(parse_hex(value)?
            .chunks(4)
            .map(|chunk| {
                let mut word = [0u8; 4];
                word[..chunk.len()].copy_from_slice(chunk);
                i32::from_le_bytes(word)
            })
            .collect()),
        other => Err(ArgError::UnknownType(other.to_string())),
    }
}

/// Parse and flatten a list of arguments in order
pub fn parse_inputs<S: AsRef<str>>(args: &[S]) -> Result<Vec<i32>, ArgError> {
    let mut values = Vec::new();
    for arg in args {
        values.extend(parse_input(arg.as_ref())?);
    }
    Ok(values)
}

fn parse_hex(value: &str) -> Result<Vec<u8>, ArgError> {
    let digits = value.strip_prefix("0x").ok_or_else(|| {
        ArgError::InvalidBytes(value.to_string(), "missing 0x prefix".to_string())
    })?;
    hex::decode(digits).map_err(|e| ArgError::InvalidBytes(value.to_string(), e.to_string()))
}

fn parse_i32(value: &str) -> Result<i32, ArgError> {
    let invalid = || ArgError::InvalidInteger(value.to_string());
    match value.strip_prefix("0x") {
        Some(digits) => u32::from_str_radix(digits, 16)
            .map(|bits| bits as i32)
            .map_err(|_| invalid()),
        None => value.parse::<i32>().map_err(|_| invalid()),
    }
}
