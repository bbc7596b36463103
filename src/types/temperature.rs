// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Temperature values and wire-format conversion.
//!
//! The controller transmits temperatures as tenths-of-a-degree integers:
//! 19.5 °C travels as `195`. Conversion is exact and deterministic in both
//! directions (`wire = round(celsius * 10)`, `celsius = round(wire / 10, 1dp)`).

use std::fmt;

/// A temperature in degrees Celsius.
///
/// # Examples
///
/// ```
/// use wiserhub::types::Temperature;
///
/// let temp = Temperature::celsius(19.5);
/// assert_eq!(temp.to_wire(), 195);
/// assert_eq!(Temperature::from_wire(195), temp);
/// assert!(Temperature::OFF.is_off());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Temperature(f64);

impl Temperature {
    /// The lowest set point the controller accepts, 5 °C.
    pub const MINIMUM: Self = Self(5.0);

    /// The highest set point the controller accepts, 30 °C.
    pub const MAXIMUM: Self = Self(30.0);

    /// The sentinel set point that switches a room off, -20 °C.
    ///
    /// Never clamped: it is below [`Self::MINIMUM`] by contract.
    pub const OFF: Self = Self(-20.0);

    /// Creates a temperature from degrees Celsius.
    #[must_use]
    pub fn celsius(value: f64) -> Self {
        Self(value)
    }

    /// Creates a temperature from the controller's tenths-of-a-degree units.
    #[must_use]
    pub fn from_wire(wire: i64) -> Self {
        #[allow(clippy::cast_precision_loss)] // set points are far below 2^52
        let celsius = (wire as f64) / 10.0;
        Self((celsius * 10.0).round() / 10.0)
    }

    /// Returns the value in degrees Celsius.
    #[must_use]
    pub fn as_celsius(self) -> f64 {
        self.0
    }

    /// Returns the value in the controller's tenths-of-a-degree units.
    #[must_use]
    pub fn to_wire(self) -> i64 {
        #[allow(clippy::cast_possible_truncation)] // rounded and range-limited
        {
            (self.0 * 10.0).round() as i64
        }
    }

    /// Returns true if this is exactly the off sentinel.
    #[must_use]
    pub fn is_off(self) -> bool {
        // The sentinel is compared exactly by contract, not by tolerance.
        #[allow(clippy::float_cmp)]
        {
            self.0 == Self::OFF.0
        }
    }

    /// Clamps the value into the range the controller accepts.
    ///
    /// Values below 5 °C are raised to 5 °C; values above `ceiling`
    /// (itself cut to the absolute maximum of 30 °C) are lowered to it.
    /// The off sentinel passes through untouched. Clamping is silent:
    /// an out-of-range request is adjusted, never rejected.
    #[must_use]
    pub fn clamped(self, ceiling: f64) -> Self {
        if self.is_off() {
            return self;
        }
        let ceiling = ceiling.min(Self::MAXIMUM.0);
        Self(self.0.max(Self::MINIMUM.0).min(ceiling))
    }
}

impl From<f64> for Temperature {
    fn from(value: f64) -> Self {
        Self::celsius(value)
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_off() {
            write!(f, "off")
        } else {
            write!(f, "{:.1}°C", self.0)
        }
    }
}
