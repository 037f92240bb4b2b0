use serde::Deserialize;

/// One row of the source dataset: a car and its measured attributes.
///
/// Optional fields may be absent or `null` in the JSON, which is distinct
/// from zero. A record is still usable as long as the two fields selected
/// for an observation pair are present.
#[derive(Debug, Clone, Deserialize)]
pub struct Record {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Miles_per_Gallon")]
    pub miles_per_gallon: Option<f32>,
    #[serde(rename = "Cylinders")]
    pub cylinders: Option<f32>,
    #[serde(rename = "Displacement")]
    pub displacement: Option<f32>,
    #[serde(rename = "Horsepower")]
    pub horsepower: Option<f32>,
    #[serde(rename = "Weight_in_lbs")]
    pub weight_in_lbs: Option<f32>,
    #[serde(rename = "Acceleration")]
    pub acceleration: Option<f32>,
    #[serde(rename = "Year")]
    pub year: Option<String>,
    #[serde(rename = "Origin")]
    pub origin: Option<String>,
}

/// Selector over the numeric fields a record can contribute to an
/// observation axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    MilesPerGallon,
    Cylinders,
    Displacement,
    Horsepower,
    WeightInLbs,
    Acceleration,
}

impl Field {
    /// Reads this field from a record, `None` when absent.
    pub fn of(self, record: &Record) -> Option<f32> {
        match self {
            Field::MilesPerGallon => record.miles_per_gallon,
            Field::Cylinders => record.cylinders,
            Field::Displacement => record.displacement,
            Field::Horsepower => record.horsepower,
            Field::WeightInLbs => record.weight_in_lbs,
            Field::Acceleration => record.acceleration,
        }
    }

    /// Axis title for chart output.
    pub fn title(self) -> &'static str {
        match self {
            Field::MilesPerGallon => "MPG",
            Field::Cylinders => "Cylinders",
            Field::Displacement => "Displacement",
            Field::Horsepower => "Horsepower",
            Field::WeightInLbs => "Weight (lbs)",
            Field::Acceleration => "Acceleration",
        }
    }
}
