use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// An `mm:ss` instant or length, with an optional `.mmm` fraction
///
/// Both fields are two digits in the range 00-59.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp {
    minutes: u8,
    seconds: u8,
    millis: u16,
}

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp { minutes: 0, seconds: 0, millis: 0 };

    /// Build a timestamp from whole minutes and seconds
    pub fn new(minutes: u8, seconds: u8) -> Result<Self, ModelError> {
        if minutes > 59 || seconds > 59 {
            return Err(ModelError::InvalidTimestamp {
                value: format!("{:02}:{:02}", minutes, seconds),
            });
        }
        Ok(Self { minutes, seconds, millis: 0 })
    }

    pub fn minutes(&self) -> u8 {
        self.minutes
    }

    pub fn seconds(&self) -> u8 {
        self.seconds
    }

    /// `minutes * 60 + seconds`, plus the millisecond fraction
    pub fn as_seconds(&self) -> f64 {
        f64::from(self.minutes) * 60.0 + f64::from(self.seconds) + f64::from(self.millis) / 1000.0
    }
}

fn parse_field(field: &str) -> Option<u8> {
    if field.len() != 2 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u8 = field.parse().ok()?;
    (value <= 59).then_some(value)
}

impl FromStr for Timestamp {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ModelError::InvalidTimestamp { value: value.to_string() };

        let (minutes, rest) = value.split_once(':').ok_or_else(invalid)?;
        let (seconds, fraction) = match rest.split_once('.') {
            Some((seconds, fraction)) => (seconds, Some(fraction)),
            None => (rest, None),
        };

        let minutes = parse_field(minutes).ok_or_else(invalid)?;
        let seconds = parse_field(seconds).ok_or_else(invalid)?;
        let millis = match fraction {
            None => 0,
            Some(digits)
                if (1..=3).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit()) =>
            {
                // ".5" is half a second, not five milliseconds
                format!("{:0<3}", digits).parse().map_err(|_| invalid())?
            }
            Some(_) => return Err(invalid()),
        };

        Ok(Self { minutes, seconds, millis })
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes, self.seconds)?;
        if self.millis > 0 {
            write!(f, ".{:03}", self.millis)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Timestamp {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Timestamp> for String {
    fn from(value: Timestamp) -> Self {
        value.to_string()
    }
}

/// Direction of a signed offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    pub fn symbol(&self) -> char {
        match self {
            Sign::Plus => '+',
            Sign::Minus => '-',
        }
    }
}

/// A `+mm:ss` / `-mm:ss` offset used by relative placements
///
/// The sign token is kept apart from the magnitude so generated code can
/// spell it as a binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SignedOffset {
    sign: Sign,
    magnitude: Timestamp,
}

impl SignedOffset {
    pub fn new(sign: Sign, magnitude: Timestamp) -> Self {
        Self { sign, magnitude }
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    pub fn magnitude(&self) -> Timestamp {
        self.magnitude
    }

    /// `sign * (minutes * 60 + seconds)`
    pub fn as_seconds(&self) -> f64 {
        match self.sign {
            Sign::Plus => self.magnitude.as_seconds(),
            Sign::Minus => -self.magnitude.as_seconds(),
        }
    }
}

impl FromStr for SignedOffset {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ModelError::InvalidOffset { value: value.to_string() };
        let sign = match value.chars().next() {
            Some('+') => Sign::Plus,
            Some('-') => Sign::Minus,
            _ => return Err(invalid()),
        };
        let magnitude = value[1..].parse().map_err(|_| invalid())?;
        Ok(Self { sign, magnitude })
    }
}

impl fmt::Display for SignedOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.sign.symbol(), self.magnitude)
    }
}

impl TryFrom<String> for SignedOffset {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SignedOffset> for String {
    fn from(value: SignedOffset) -> Self {
        value.to_string()
    }
}
