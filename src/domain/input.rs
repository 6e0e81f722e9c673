//! Validated submission record and its categorical types
//!
//! Raw form submissions arrive as an untyped name -> string map. Nothing
//! past this module ever sees that map: validation either yields a complete
//! `InputRecord` or fails with the first offending field.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Biological sex as recorded in the training data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

/// Smoker flag as recorded in the training data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmokerStatus {
    Yes,
    No,
}

/// US census region of residence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Northeast,
    Northwest,
    Southeast,
    Southwest,
}

// Wire values are the exact lower-case tokens the form dropdowns submit.
// Matching is case-sensitive, no trimming.

impl FromStr for Sex {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            _ => Err(()),
        }
    }
}

impl FromStr for SmokerStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yes" => Ok(Self::Yes),
            "no" => Ok(Self::No),
            _ => Err(()),
        }
    }
}

impl FromStr for Region {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "northeast" => Ok(Self::Northeast),
            "northwest" => Ok(Self::Northwest),
            "southeast" => Ok(Self::Southeast),
            "southwest" => Ok(Self::Southwest),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
        }
    }
}

impl std::fmt::Display for SmokerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yes => write!(f, "yes"),
            Self::No => write!(f, "no"),
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Northeast => write!(f, "northeast"),
            Self::Northwest => write!(f, "northwest"),
            Self::Southeast => write!(f, "southeast"),
            Self::Southwest => write!(f, "southwest"),
        }
    }
}

/// One validated submission
///
/// Only constructed through [`InputRecord::from_form`]; fields are within
/// their declared domains by the time a value of this type exists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    pub age: u8,
    pub sex: Sex,
    pub bmi: f64,
    pub children: u8,
    pub smoker: SmokerStatus,
    pub region: Region,
}

pub const AGE_MAX: u8 = 120;
pub const BMI_MIN: f64 = 10.0;
pub const BMI_MAX: f64 = 60.0;
pub const CHILDREN_MAX: u8 = 10;

impl InputRecord {
    /// Validate a raw form map into a record.
    ///
    /// Checks presence, numeric convertibility, range and enum membership,
    /// field by field in form order. The first violation is returned.
    pub fn from_form(form: &HashMap<String, String>) -> Result<Self, DomainError> {
        let age = parse_bounded_int(form, "age", AGE_MAX)?;
        let sex = parse_enum::<Sex>(form, "sex")?;
        let bmi = parse_bmi(form)?;
        let children = parse_bounded_int(form, "children", CHILDREN_MAX)?;
        let smoker = parse_enum::<SmokerStatus>(form, "smoker")?;
        let region = parse_enum::<Region>(form, "region")?;

        Ok(Self {
            age,
            sex,
            bmi,
            children,
            smoker,
            region,
        })
    }
}

fn raw_field<'a>(
    form: &'a HashMap<String, String>,
    field: &str,
) -> Result<&'a str, DomainError> {
    match form.get(field) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(DomainError::validation(field, "missing")),
    }
}

fn parse_bounded_int(
    form: &HashMap<String, String>,
    field: &str,
    max: u8,
) -> Result<u8, DomainError> {
    let raw = raw_field(form, field)?;

    // i64 first so that negative input reads as out of range, not garbage
    let value: i64 = raw
        .parse()
        .map_err(|_| DomainError::validation(field, "not an integer"))?;

    if value < 0 || value > i64::from(max) {
        return Err(DomainError::validation(
            field,
            format!("out of range [0, {}]", max),
        ));
    }

    Ok(value as u8)
}

fn parse_bmi(form: &HashMap<String, String>) -> Result<f64, DomainError> {
    let raw = raw_field(form, "bmi")?;

    let value: f64 = raw
        .parse()
        .map_err(|_| DomainError::validation("bmi", "not a number"))?;

    if !value.is_finite() || value < BMI_MIN || value > BMI_MAX {
        return Err(DomainError::validation(
            "bmi",
            format!("out of range [{}, {}]", BMI_MIN, BMI_MAX),
        ));
    }

    Ok(value)
}

fn parse_enum<T: FromStr>(
    form: &HashMap<String, String>,
    field: &str,
) -> Result<T, DomainError> {
    let raw = raw_field(form, field)?;

    raw.parse()
        .map_err(|_| DomainError::validation(field, format!("unknown value '{}'", raw)))
}
