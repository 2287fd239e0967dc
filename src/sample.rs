//! Sample capture - the 7 soil/climate inputs in model order
//!
//! The prediction endpoint expects a plain array:
//! `[nitrogen, phosphorus, potassium, temperature, humidity, ph, rainfall]`

use serde::Serialize;

/// Neutral soil pH used when the field is blank or unusable
pub const DEFAULT_PH: f64 = 7.0;

/// One numeric form input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Nitrogen,
    Phosphorus,
    Potassium,
    Temperature,
    Humidity,
    Ph,
    Rainfall,
}

impl Field {
    /// All fields in the order the model consumes them
    pub const ALL: [Field; 7] = [
        Field::Nitrogen,
        Field::Phosphorus,
        Field::Potassium,
        Field::Temperature,
        Field::Humidity,
        Field::Ph,
        Field::Rainfall,
    ];

    /// Element id (and form field name) of the input
    pub fn id(self) -> &'static str {
        match self {
            Field::Nitrogen => "nitrogen",
            Field::Phosphorus => "phosphorus",
            Field::Potassium => "potassium",
            Field::Temperature => "temperature",
            Field::Humidity => "humidity",
            Field::Ph => "ph",
            Field::Rainfall => "rainfall",
        }
    }

    pub fn from_id(id: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.id() == id)
    }

    /// Value substituted when the input is missing, unparseable or zero
    pub fn default_value(self) -> f64 {
        match self {
            Field::Ph => DEFAULT_PH,
            _ => 0.0,
        }
    }

    /// Parse raw input text the way a browser number field is read:
    /// leading decimal literal wins, anything unusable falls back to the default.
    pub fn parse(self, raw: Option<&str>) -> f64 {
        raw.and_then(parse_leading_float)
            .filter(|v| *v != 0.0)
            .unwrap_or_else(|| self.default_value())
    }
}

/// Ordered feature vector sent to the prediction endpoint
///
/// Serializes as a bare JSON array of 7 numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample([f64; 7]);

impl Sample {
    pub fn new(values: [f64; 7]) -> Self {
        Self(values)
    }

    /// Build a sample from a field lookup (missing fields take their defaults)
    pub fn read<F>(mut lookup: F) -> Self
    where
        F: FnMut(Field) -> Option<String>,
    {
        let mut values = [0.0; 7];
        for (slot, field) in values.iter_mut().zip(Field::ALL) {
            let raw = lookup(field);
            *slot = field.parse(raw.as_deref());
        }
        Self(values)
    }

    pub fn get(&self, field: Field) -> f64 {
        // Variants are declared in model order
        self.0[field as usize]
    }

    pub fn values(&self) -> &[f64; 7] {
        &self.0
    }
}

impl Default for Sample {
    /// All inputs blank
    fn default() -> Self {
        Self::read(|_| None)
    }
}

/// Longest leading decimal literal of `raw` (after leading whitespace)
///
/// `"12.5kg"` -> 12.5, `"  -3e2x"` -> -300, `"abc"` -> None
fn parse_leading_float(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when digits follow it
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}
