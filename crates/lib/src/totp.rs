use crate::{validate_digits, validate_step, Algorithm, Otp, OtpResult, ToBytes};

use log::debug;
use unix_time::Instant;

/// Time-based one-time passcode.
///
/// Provides one-time passcodes that are valid within a window
/// of `step` seconds, counted from the Unix epoch.
pub type Totp = Otp<Time>;

impl Totp {
    /// Get a TOTP generator that reads the system clock.
    ///
    /// Repeated calls to [`Self::get`] will return the same
    /// passcode when in the same window.
    pub fn new(
        key: impl Into<Vec<u8>>,
        algorithm: Algorithm,
        step: i64,
        digits: i32,
    ) -> OtpResult<Self> {
        Totp::new_with_now(key, algorithm, step, digits, Box::new(|| Instant::now()))
    }

    /// Get a TOTP generator with a custom function to provide the
    /// "now" value.
    ///
    /// See [`Self::new`].
    pub fn new_with_now(
        key: impl Into<Vec<u8>>,
        algorithm: Algorithm,
        step: i64,
        digits: i32,
        now: Box<dyn Fn() -> Instant + Send + Sync>,
    ) -> OtpResult<Self> {
        let step = validate_step(step)?;
        let digits = validate_digits(digits)?;
        Ok(Otp {
            key: key.into(),
            algorithm,
            generator: Time { step, now },
            digits,
        })
    }

    /// Get a TOTP generator frozen at `secs` seconds after the Unix epoch.
    pub fn at(
        key: impl Into<Vec<u8>>,
        algorithm: Algorithm,
        step: i64,
        digits: i32,
        secs: u64,
    ) -> OtpResult<Self> {
        Totp::new_with_now(
            key,
            algorithm,
            step,
            digits,
            Box::new(move || Instant::at(secs, 0)),
        )
    }

    pub fn step(&self) -> u64 {
        self.generator.step
    }
}

/// The backing type which implements the [`ToBytes`] interface,
/// using the current time to generate the value bytes.
pub struct Time {
    step: u64,
    now: Box<dyn Fn() -> Instant + Send + Sync>,
}

impl Time {
    fn counter(&self) -> u64 {
        let now = (self.now)();
        let elapsed = now - Instant::at(0, 0);
        elapsed.as_secs() / self.step
    }
}

impl ToBytes for Time {
    fn to_bytes(&mut self) -> OtpResult<[u8; 8]> {
        let steps = self.counter();
        debug!("time step {}s, counter {}", self.step, steps);
        Ok(steps.to_be_bytes())
    }
}
