use std::fmt::{self, Display, Formatter, Write};

/// A derived passcode.
///
/// Compares equal to the plain number, and displays left-padded with
/// zeroes to exactly `digits` characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code {
    value: u32,
    digits: u32,
}

impl Code {
    /// Reduce a 31-bit truncated HMAC value to `digits` decimal digits.
    pub(crate) fn new(bin_code: u32, digits: u32) -> Self {
        // 10^digits past u64 is far above 2^31, so nothing is left to reduce.
        let value = match 10_u64.checked_pow(digits) {
            Some(modulus) => (u64::from(bin_code) % modulus) as u32,
            None => bin_code,
        };
        Self { value, digits }
    }
}

impl PartialEq<u32> for Code {
    fn eq(&self, other: &u32) -> bool {
        self.value == *other
    }
}

impl Display for Code {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        // Explicit padding; format widths are capped at u16::MAX.
        let value = self.value.to_string();
        let padding = (self.digits as usize).saturating_sub(value.len());
        for _ in 0..padding {
            f.write_char('0')?;
        }
        f.write_str(&value)
    }
}
