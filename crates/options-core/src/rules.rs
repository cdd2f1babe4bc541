//! Input rules shared by the renderers and the surcharge calculation.
//!
//! The browser runtime applies the same rules while the customer types; the
//! functions here are the server-side reference used when building cart line
//! properties.

use serde::{Deserialize, Serialize};

/// Inclusive range accepted by number options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberBounds {
    pub min: i64,
    pub max: i64,
}

impl Default for NumberBounds {
    fn default() -> Self {
        Self { min: 0, max: 99 }
    }
}

/// Outcome of reading a number option's raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberInput {
    /// Nothing entered.
    Empty,
    /// Not a number; the field is cleared.
    Invalid,
    /// In range (fractions are truncated).
    Accepted(i64),
    /// Out of range and pulled to the nearest bound.
    Clamped(i64),
}

impl NumberInput {
    /// The value the field ends up holding.
    pub fn value(&self) -> Option<i64> {
        match self {
            NumberInput::Accepted(v) | NumberInput::Clamped(v) => Some(*v),
            NumberInput::Empty | NumberInput::Invalid => None,
        }
    }

    /// Whether the customer should see the correction notice.
    pub fn was_corrected(&self) -> bool {
        matches!(self, NumberInput::Clamped(_))
    }
}

impl NumberBounds {
    /// Read raw input, clamping out-of-range values to the nearest bound.
    ///
    /// ```
    /// use options_core::rules::{NumberBounds, NumberInput};
    /// let bounds = NumberBounds::default();
    /// assert_eq!(bounds.read("150"), NumberInput::Clamped(99));
    /// assert_eq!(bounds.read("-5"), NumberInput::Clamped(0));
    /// ```
    pub fn read(&self, raw: &str) -> NumberInput {
        let raw = raw.trim();
        if raw.is_empty() {
            return NumberInput::Empty;
        }
        let Ok(parsed) = raw.parse::<f64>() else {
            return NumberInput::Invalid;
        };
        if parsed.is_nan() {
            return NumberInput::Invalid;
        }
        if parsed < self.min as f64 {
            NumberInput::Clamped(self.min)
        } else if parsed > self.max as f64 {
            NumberInput::Clamped(self.max)
        } else {
            NumberInput::Accepted(parsed.trunc() as i64)
        }
    }

    /// Clamp an already numeric value.
    pub fn clamp(&self, value: i64) -> i64 {
        value.clamp(self.min, self.max)
    }
}

/// Strip digits from free text; numbers are not accepted in text answers.
pub fn sanitize_text(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_ascii_digit()).collect()
}

/// Whether free text counts as answered (and so triggers its price).
pub fn is_answered(text: &str) -> bool {
    !text.trim().is_empty()
}

/// HTML `pattern` enforcing the text rule in the browser.
pub const TEXT_PATTERN: &str = "[^0-9]*";
