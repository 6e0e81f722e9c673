//! Feature schema: the frozen contract between submissions and the artifact
//!
//! The trained artifact consumes rows in one exact column order with one
//! exact categorical encoding. That layout is data, not logic: it lives
//! here as an explicit, versioned column list so it can be unit-tested on
//! its own and compared against the artifact's declared columns at load
//! time. Getting this wrong does not crash, it silently predicts the wrong
//! number, which is why drift is checked before the server starts.

use serde::{Deserialize, Serialize};

use super::input::{InputRecord, Region, Sex, SmokerStatus};

/// How a single column derives its value from an [`InputRecord`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    /// Numeric field carried over verbatim
    Numeric(NumericField),
    /// One-hot indicator: 1.0 when the categorical field holds the value
    /// named by the column, 0.0 otherwise
    Indicator(IndicatorField),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericField {
    Age,
    Bmi,
    Children,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorField {
    SexMale,
    SmokerYes,
    Region(Region),
}

/// One named, ordered column of the feature row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureColumn {
    pub name: String,
    pub encoding: Encoding,
}

/// Ordered feature layout for one schema version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSchema {
    version: u32,
    columns: Vec<FeatureColumn>,
}

/// A record projected into the artifact's column order
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedFeatureRow {
    values: Vec<f64>,
}

impl EncodedFeatureRow {
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FeatureSchema {
    /// Schema version 1: the layout the reference artifact was trained
    /// with. Categoricals are one-hot encoded with the first level dropped
    /// (female, non-smoker, northeast are the baselines).
    pub fn v1() -> Self {
        let column = |name: &str, encoding| FeatureColumn {
            name: name.to_string(),
            encoding,
        };

        Self {
            version: 1,
            columns: vec![
                column("age", Encoding::Numeric(NumericField::Age)),
                column("bmi", Encoding::Numeric(NumericField::Bmi)),
                column("children", Encoding::Numeric(NumericField::Children)),
                column("sex_male", Encoding::Indicator(IndicatorField::SexMale)),
                column("smoker_yes", Encoding::Indicator(IndicatorField::SmokerYes)),
                column(
                    "region_northwest",
                    Encoding::Indicator(IndicatorField::Region(Region::Northwest)),
                ),
                column(
                    "region_southeast",
                    Encoding::Indicator(IndicatorField::Region(Region::Southeast)),
                ),
                column(
                    "region_southwest",
                    Encoding::Indicator(IndicatorField::Region(Region::Southwest)),
                ),
            ],
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn columns(&self) -> &[FeatureColumn] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Project a validated record into the artifact's row layout.
    ///
    /// Pure and deterministic: same record, same row, always.
    pub fn encode(&self, record: &InputRecord) -> EncodedFeatureRow {
        let values = self
            .columns
            .iter()
            .map(|column| column.encoding.apply(record))
            .collect();

        EncodedFeatureRow { values }
    }
}

impl Encoding {
    fn apply(&self, record: &InputRecord) -> f64 {
        match self {
            Self::Numeric(NumericField::Age) => f64::from(record.age),
            Self::Numeric(NumericField::Bmi) => record.bmi,
            Self::Numeric(NumericField::Children) => f64::from(record.children),
            Self::Indicator(IndicatorField::SexMale) => indicator(record.sex == Sex::Male),
            Self::Indicator(IndicatorField::SmokerYes) => {
                indicator(record.smoker == SmokerStatus::Yes)
            }
            Self::Indicator(IndicatorField::Region(region)) => {
                indicator(record.region == *region)
            }
        }
    }
}

fn indicator(set: bool) -> f64 {
    if set {
        1.0
    } else {
        0.0
    }
}
