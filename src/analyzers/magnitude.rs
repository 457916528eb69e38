use serde::{Deserialize, Serialize};

/// A power-of-ten scale symbol attached to a damage amount.
///
/// | Code            | Exponent |
/// |-----------------|----------|
/// | `H` / `h`       | 2        |
/// | `K` / `k`       | 3        |
/// | `M` / `m`       | 6        |
/// | `B` / `b`       | 9        |
/// | `0`..=`9`       | the digit |
/// | `+` `-` `?` ``  | 0        |
/// | anything else   | 0        |
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MagnitudeCode {
    Hundred,
    Thousand,
    Million,
    Billion,
    Digit(u8),
    Plus,
    Minus,
    Unknown,
    #[default]
    Empty,
    Unrecognized(String),
}

impl MagnitudeCode {
    pub fn exponent(&self) -> u8 {
        match self {
            MagnitudeCode::Hundred => 2,
            MagnitudeCode::Thousand => 3,
            MagnitudeCode::Million => 6,
            MagnitudeCode::Billion => 9,
            MagnitudeCode::Digit(d) => *d,
            _ => 0,
        }
    }
}

impl From<&str> for MagnitudeCode {
    fn from(s: &str) -> Self {
        let mut chars = s.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return if s.is_empty() {
                MagnitudeCode::Empty
            } else {
                MagnitudeCode::Unrecognized(s.to_string())
            };
        };

        match c.to_ascii_uppercase() {
            'H' => MagnitudeCode::Hundred,
            'K' => MagnitudeCode::Thousand,
            'M' => MagnitudeCode::Million,
            'B' => MagnitudeCode::Billion,
            '+' => MagnitudeCode::Plus,
            '-' => MagnitudeCode::Minus,
            '?' => MagnitudeCode::Unknown,
            d if d.is_ascii_digit() => MagnitudeCode::Digit(d as u8 - b'0'),
            _ => MagnitudeCode::Unrecognized(s.to_string()),
        }
    }
}

impl From<String> for MagnitudeCode {
    fn from(s: String) -> Self {
        MagnitudeCode::from(s.as_str())
    }
}

impl From<MagnitudeCode> for String {
    fn from(code: MagnitudeCode) -> Self {
        match code {
            MagnitudeCode::Hundred => "H".into(),
            MagnitudeCode::Thousand => "K".into(),
            MagnitudeCode::Million => "M".into(),
            MagnitudeCode::Billion => "B".into(),
            MagnitudeCode::Digit(d) => d.to_string(),
            MagnitudeCode::Plus => "+".into(),
            MagnitudeCode::Minus => "-".into(),
            MagnitudeCode::Unknown => "?".into(),
            MagnitudeCode::Empty => String::new(),
            MagnitudeCode::Unrecognized(s) => s,
        }
    }
}

/// Scales `base` by `10^exponent` of the given code.
///
/// Unrecognized codes scale by 1; there is no failure case.
pub fn normalize(base: f64, code: &MagnitudeCode) -> f64 {
    base * 10f64.powi(code.exponent() as i32)
}
