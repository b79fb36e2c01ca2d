// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mmdiagram-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mmdiagram and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Address and size parsing.
//!
//! Accepted spellings:
//! - hexadecimal with a `0x`/`0X` prefix (`0x8000_0000`)
//! - plain decimal (`4096`)
//!
//! `_` separators are allowed anywhere after the prefix.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAddressError {
    Empty,
    Invalid { value: String },
}

impl fmt::Display for ParseAddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("address must not be empty"),
            Self::Invalid { value } => {
                write!(f, "'{value}' is not a valid non-negative integer or hex address")
            }
        }
    }
}

impl std::error::Error for ParseAddressError {}

pub fn parse_address(text: &str) -> Result<u64, ParseAddressError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseAddressError::Empty);
    }

    let invalid = || ParseAddressError::Invalid { value: trimmed.to_owned() };

    let (digits, radix) = match trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (trimmed, 10),
    };

    let digits = digits.replace('_', "");
    // `from_str_radix` accepts a leading `+`, which is not an address spelling.
    if digits.is_empty() || !digits.chars().all(|ch| ch.is_digit(radix)) {
        return Err(invalid());
    }

    u64::from_str_radix(&digits, radix).map_err(|_| invalid())
}

/// Formats an address the way the report and preview print them (`0x` + 8 hex digits minimum).
pub fn format_address(value: u64) -> String {
    format!("{value:#010x}")
}

/// Formats a signed byte distance, keeping the sign in front of the `0x` prefix.
pub fn format_signed(value: i64) -> String {
    if value < 0 {
        format!("-{:#x}", value.unsigned_abs())
    } else {
        format!("{value:#x}")
    }
}
