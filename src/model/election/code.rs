use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use rand::distributions::{Distribution, Uniform};
use serde::{
    de::{self, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};
use thiserror::Error;

/// Number of digits in a participation code.
pub const LENGTH: usize = 5;

/// A short numeric token used to locate an election without exposing its
/// identifier. Always exactly 5 decimal digits; (de)serialises as a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticipationCode(u32);

impl ParticipationCode {
    pub const MIN: u32 = 10_000;
    pub const MAX: u32 = 99_999;

    /// Generate a uniformly random code.
    pub fn random() -> Self {
        let dist = Uniform::from(Self::MIN..=Self::MAX);
        Self(dist.sample(&mut rand::thread_rng()))
    }
}

impl Display for ParticipationCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:05}", self.0)
    }
}

impl FromStr for ParticipationCode {
    type Err = ParseError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        if string.len() != LENGTH {
            return Err(ParseError::InvalidLength(string.len()));
        }
        if let Some(c) = string.chars().find(|c| !c.is_ascii_digit()) {
            return Err(ParseError::InvalidChar(c));
        }
        // Guaranteed to fit in a u32 after the length check.
        let value = string.parse::<u32>().map_err(|_| ParseError::InvalidLength(string.len()))?;
        if value < Self::MIN {
            return Err(ParseError::OutOfRange(value));
        }
        Ok(Self(value))
    }
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("code must contain exactly {LENGTH} characters, got {0}")]
    InvalidLength(usize),
    #[error("code must contain only digits, found '{0}'")]
    InvalidChar(char),
    #[error("code {0} is below the valid range")]
    OutOfRange(u32),
}

impl Serialize for ParticipationCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

struct CodeVisitor;

impl<'de> Visitor<'de> for CodeVisitor {
    type Value = ParticipationCode;

    fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "a string of {LENGTH} digits")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        v.parse::<ParticipationCode>().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for ParticipationCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(CodeVisitor)
    }
}
