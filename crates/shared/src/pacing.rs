//! Maps the speed slider onto the delay between animation steps.

use std::time::Duration;

use crate::error::ControlError;

pub const SLIDER_MIN: u8 = 1;
pub const SLIDER_MAX: u8 = 10;

/// `interval = 201 - raw * 20` milliseconds; higher slider values animate faster.
pub fn interval_for_slider(raw: u8) -> Result<Duration, ControlError> {
    if !(SLIDER_MIN..=SLIDER_MAX).contains(&raw) {
        return Err(ControlError::InvalidSpeed {
            raw,
            min: SLIDER_MIN,
            max: SLIDER_MAX,
        });
    }
    let millis = 201 - u64::from(raw) * 20;
    Ok(Duration::from_millis(millis))
}
