//! Time-based one-time passcodes (RFC 6238), using the dynamic truncation
//! of RFC 4226.
//!
//! The heart of the crate is [`generate`], which derives the code for a
//! given instant:
//!
//! ```
//! use totpgen::{generate, Algorithm};
//!
//! let code = generate(b"12345678901234567890", Algorithm::Sha1, 6, 30, 59).unwrap();
//! assert_eq!(code, "287082");
//! ```
use hmac::digest::InvalidLength;

mod algorithm;
mod code;
pub mod totp;

pub use algorithm::Algorithm;
pub use code::Code;
pub use totp::Totp;

#[derive(Debug, thiserror::Error)]
pub enum OtpError {
    #[error("time step has to be greater than zero, got {0}")]
    InvalidTimeStep(i64),
    #[error("digits has to be greater than zero, got {0}")]
    InvalidDigits(i32),
    #[error("hashing algorithm `{0}` is not supported (SHA1, SHA256, SHA512)")]
    UnsupportedAlgorithm(String),
    #[error("error when computing HMAC")]
    Hmac(#[from] InvalidLength),
}

pub type OtpResult<T> = std::result::Result<T, OtpError>;

/// Source of the 8-byte moving factor that is authenticated by the HMAC.
pub trait ToBytes {
    fn to_bytes(&mut self) -> OtpResult<[u8; 8]>;
}

/// A passcode generator, parameterised over how the moving factor is
/// produced. See [`Totp`].
pub struct Otp<T: ToBytes> {
    key: Vec<u8>,
    algorithm: Algorithm,
    generator: T,
    digits: u32,
}

impl<T: ToBytes> Otp<T> {
    /// Compute the next passcode.
    pub fn get(&mut self) -> OtpResult<Code> {
        let counter = self.generator.to_bytes()?;

        // Step 1: Generate an HMAC value
        let hs = self.algorithm.hmac(&self.key, &counter)?;

        // Step 2: Generate a 4-byte string (Dynamic Truncation)
        let sbits = dt(&hs);

        // Step 3: Compute the passcode value
        let snum = u32::from_be_bytes(sbits);

        Ok(Code::new(snum, self.digits))
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }
}

/// Derive the TOTP for the instant `now` (seconds since the Unix epoch).
///
/// Fails with [`OtpError::InvalidTimeStep`] when `time_step <= 0` and
/// [`OtpError::InvalidDigits`] when `digits <= 0`. The secret is used as-is;
/// rejecting an empty one is up to the caller.
pub fn generate(
    secret: &[u8],
    algorithm: Algorithm,
    digits: i32,
    time_step: i64,
    now: u64,
) -> OtpResult<String> {
    let mut totp = Totp::at(secret, algorithm, time_step, digits, now)?;
    Ok(totp.get()?.to_string())
}

pub(crate) fn validate_digits(digits: i32) -> OtpResult<u32> {
    u32::try_from(digits)
        .ok()
        .filter(|d| *d > 0)
        .ok_or(OtpError::InvalidDigits(digits))
}

pub(crate) fn validate_step(step: i64) -> OtpResult<u64> {
    u64::try_from(step)
        .ok()
        .filter(|s| *s > 0)
        .ok_or(OtpError::InvalidTimeStep(step))
}

fn dt(hs: &[u8]) -> [u8; 4] {
    let offset = dt_offset(hs);
    let mut substr = dt_substr(hs, offset);
    substr[0] &= 0b0111_1111;
    substr
}

// Every supported digest is at least 20 bytes, so offset + 4 stays in bounds.
fn dt_substr(hs: &[u8], offset: u8) -> [u8; 4] {
    let offset = offset as usize;
    [hs[offset], hs[offset + 1], hs[offset + 2], hs[offset + 3]]
}

fn dt_offset(hs: &[u8]) -> u8 {
    hs.last().map_or(0, |b| b & 0b1111)
}
