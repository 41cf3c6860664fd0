//! Handle-fraction price codec.
//!
//! US Treasury prices quote as `I-XXY`: an integer handle, a two-digit
//! 32nds numerator (00–31), and a final character for eighths-of-a-32nd
//! (`0`–`7`, with `+` standing for exactly 4, a quarter of a 32nd). So
//! `99-162` = 99 + 16/32 + 2/256 and `100-00+` = 100 + 4/256.
//!
//! The codec resolves to 1/256 of a point: `parse(format(p)) == p` holds
//! exactly for prices already on that grid, and `format` truncates anything
//! finer.

use thiserror::Error;

const BASE32: f64 = 32.0;
const BASE256: f64 = 256.0;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceFormatError {
    #[error("no '-' separator in {0:?}")]
    MissingDash(String),

    #[error("fractional part of {0:?} is not exactly 3 characters")]
    FractionLength(String),

    #[error("non-numeric field in {0:?}")]
    NonNumeric(String),
}

/// Decode a handle-fraction string to a decimal price.
pub fn parse(text: &str) -> Result<f64, PriceFormatError> {
    let (handle_str, frac_str) = text
        .split_once('-')
        .ok_or_else(|| PriceFormatError::MissingDash(text.to_string()))?;

    if frac_str.len() != 3 {
        return Err(PriceFormatError::FractionLength(text.to_string()));
    }
    // the length check counts bytes; a multi-byte character straddling the
    // 32nds/eighths split must fail, not panic the slice below
    if !frac_str.is_char_boundary(2) {
        return Err(PriceFormatError::NonNumeric(text.to_string()));
    }

    let handle: f64 = handle_str
        .parse()
        .map_err(|_| PriceFormatError::NonNumeric(text.to_string()))?;

    let thirty_seconds: f64 = frac_str[..2]
        .parse()
        .map_err(|_| PriceFormatError::NonNumeric(text.to_string()))?;

    let eighths_char = &frac_str[2..];
    let eighths: f64 = if eighths_char == "+" {
        4.0
    } else {
        eighths_char
            .parse()
            .map_err(|_| PriceFormatError::NonNumeric(text.to_string()))?
    };

    Ok(handle + thirty_seconds / BASE32 + eighths / BASE256)
}

/// Encode a decimal price as a handle-fraction string, truncating below
/// 1/256 resolution.
pub fn format(price: f64) -> String {
    let handle = price.floor() as i64;
    let frac = price - handle as f64;

    let thirty_seconds = (frac * BASE32).floor() as i64;
    let eighths = (frac * BASE256).floor() as i64 % 8;

    if eighths == 4 {
        format!("{handle}-{thirty_seconds:02}+")
    } else {
        format!("{handle}-{thirty_seconds:02}{eighths}")
    }
}
