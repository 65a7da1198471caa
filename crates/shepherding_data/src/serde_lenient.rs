//! Lenient numeric fields for messages written by external controllers,
//! which may encode ids and coordinates either as numbers or as strings.

use serde::de::Error;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberInput {
    String(String),
    Unsigned(u64),
    Float(f64),
}

pub fn id<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberInput::deserialize(deserializer)? {
        NumberInput::String(raw) => raw.trim().parse::<usize>().map_err(D::Error::custom),
        NumberInput::Unsigned(value) => usize::try_from(value).map_err(D::Error::custom),
        NumberInput::Float(value) if value >= 0.0 && value.fract() == 0.0 => Ok(value as usize),
        NumberInput::Float(value) => Err(D::Error::custom(format!("invalid id {value}"))),
    }
}

pub fn float<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberInput::deserialize(deserializer)? {
        NumberInput::String(raw) => raw.trim().parse::<f64>().map_err(D::Error::custom),
        NumberInput::Unsigned(value) => Ok(value as f64),
        NumberInput::Float(value) => Ok(value),
    }
}
