//! Feature row: the seven agronomic readings fed to the classifier

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of model input features.
pub const NUM_FEATURES: usize = 7;

/// Feature names in model column order. These are also the form field names.
pub const FEATURE_NAMES: [&str; NUM_FEATURES] =
    ["N", "P", "K", "temperature", "humidity", "ph", "rainfall"];

/// Failure to turn submitted form values into a feature row.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("could not convert {field} value '{value}' to a number")]
    InvalidNumber { field: &'static str, value: String },
}

/// One row of soil and climate readings.
///
/// No range checks happen here: out-of-range values are passed straight to
/// the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    /// Nitrogen content of the soil
    #[serde(rename = "N")]
    pub nitrogen: f64,
    /// Phosphorus content of the soil
    #[serde(rename = "P")]
    pub phosphorus: f64,
    /// Potassium content of the soil
    #[serde(rename = "K")]
    pub potassium: f64,
    /// Air temperature (°C)
    pub temperature: f64,
    /// Relative humidity (%)
    pub humidity: f64,
    /// Soil pH
    pub ph: f64,
    /// Rainfall (mm)
    pub rainfall: f64,
}

impl FeatureRow {
    /// Values in model column order (see [`FEATURE_NAMES`]).
    pub fn to_array(&self) -> [f64; NUM_FEATURES] {
        [
            self.nitrogen,
            self.phosphorus,
            self.potassium,
            self.temperature,
            self.humidity,
            self.ph,
            self.rainfall,
        ]
    }

    pub fn from_array(values: [f64; NUM_FEATURES]) -> Self {
        let [nitrogen, phosphorus, potassium, temperature, humidity, ph, rainfall] = values;
        Self {
            nitrogen,
            phosphorus,
            potassium,
            temperature,
            humidity,
            ph,
            rainfall,
        }
    }

    /// Build a row from raw form fields.
    ///
    /// A missing field counts as 0. A present field must parse as a number
    /// (surrounding whitespace is ignored).
    pub fn from_form(fields: &HashMap<String, String>) -> Result<Self, FormError> {
        let mut values = [0.0_f64; NUM_FEATURES];
        for (slot, &name) in values.iter_mut().zip(FEATURE_NAMES.iter()) {
            if let Some(raw) = fields.get(name) {
                *slot = raw
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| FormError::InvalidNumber {
                        field: name,
                        value: raw.clone(),
                    })?;
            }
        }
        Ok(Self::from_array(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_from_form_full() {
        let row = FeatureRow::from_form(&form(&[
            ("N", "90"),
            ("P", "42"),
            ("K", "43"),
            ("temperature", "20.87"),
            ("humidity", "82.0"),
            ("ph", " 6.5 "),
            ("rainfall", "202.9"),
        ]))
        .unwrap();

        assert_eq!(row.nitrogen, 90.0);
        assert_eq!(row.ph, 6.5);
        assert_eq!(row.to_array()[6], 202.9);
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let row = FeatureRow::from_form(&form(&[("N", "12")])).unwrap();
        assert_eq!(row.nitrogen, 12.0);
        assert_eq!(row.rainfall, 0.0);
    }

    #[test]
    fn test_non_numeric_is_rejected() {
        let err = FeatureRow::from_form(&form(&[("humidity", "wet")])).unwrap_err();
        assert_eq!(
            err,
            FormError::InvalidNumber {
                field: "humidity",
                value: "wet".to_string()
            }
        );
        assert!(err.to_string().contains("humidity"));
    }

    #[test]
    fn test_out_of_range_passes_through() {
        let row = FeatureRow::from_form(&form(&[("ph", "42"), ("K", "-5")])).unwrap();
        assert_eq!(row.ph, 42.0);
        assert_eq!(row.potassium, -5.0);
    }

    #[test]
    fn test_serde_uses_form_names() {
        let row = FeatureRow::from_array([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        let v = serde_json::to_value(row).unwrap();
        assert_eq!(v["N"], 1.0);
        assert_eq!(v["K"], 3.0);
        assert_eq!(v["rainfall"], 7.0);
    }
}
