use log::debug;

use crate::records::{Field, Record};

/// A cleaned numeric sample. Both components were present on the source
/// record; a record missing either never becomes an observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub x: f32,
    pub y: f32,
}

/// Pairs the two selected fields of every record that carries both,
/// preserving input order.
///
/// Incomplete records are dropped whole, never imputed, and dropping them
/// is not an error. There is no deduplication.
pub fn clean(records: &[Record], x_field: Field, y_field: Field) -> Vec<Observation> {
    let observations: Vec<Observation> = records
        .iter()
        .filter_map(|record| match (x_field.of(record), y_field.of(record)) {
            (Some(x), Some(y)) => Some(Observation { x, y }),
            _ => None,
        })
        .collect();

    debug!(
        "cleaned {} of {} record(s), dropped {}",
        observations.len(),
        records.len(),
        records.len() - observations.len()
    );

    observations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<Record> {
        serde_json::from_str(
            r#"[
                {"Name": "a", "Horsepower": 100, "Miles_per_Gallon": null},
                {"Name": "b", "Horsepower": 130, "Miles_per_Gallon": 18},
                {"Name": "c", "Miles_per_Gallon": 25},
                {"Name": "d", "Horsepower": 65, "Miles_per_Gallon": 32}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn record_missing_one_field_is_dropped_whole() {
        let records: Vec<Record> = serde_json::from_str(
            r#"[{"Name": "a", "Horsepower": 100, "Miles_per_Gallon": null}]"#,
        )
        .unwrap();

        let cleaned = clean(&records, Field::Horsepower, Field::MilesPerGallon);
        assert!(cleaned.is_empty());
    }

    #[test]
    fn complete_records_survive_in_input_order() {
        let cleaned = clean(&records(), Field::Horsepower, Field::MilesPerGallon);

        assert_eq!(
            cleaned,
            vec![
                Observation { x: 130.0, y: 18.0 },
                Observation { x: 65.0, y: 32.0 },
            ]
        );
    }

    #[test]
    fn output_never_outgrows_the_input() {
        let records = records();
        let cleaned = clean(&records, Field::Horsepower, Field::MilesPerGallon);
        assert!(cleaned.len() <= records.len());
    }

    #[test]
    fn swapping_the_selectors_swaps_the_axes() {
        let cleaned = clean(&records(), Field::MilesPerGallon, Field::Horsepower);
        assert_eq!(cleaned[0], Observation { x: 18.0, y: 130.0 });
    }
}
