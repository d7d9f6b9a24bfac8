//! Guidance ranges for each input field, shown next to the form inputs

use serde::Serialize;

/// Typical bounds and a suggested band for one input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InputRange {
    pub min: f64,
    pub max: f64,
    pub optimal: &'static str,
}

impl InputRange {
    const fn new(min: f64, max: f64, optimal: &'static str) -> Self {
        Self { min, max, optimal }
    }

    /// Whether `value` lies within `[min, max]`.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Guidance for all seven inputs. Field names match the form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InputRanges {
    #[serde(rename = "N")]
    pub nitrogen: InputRange,
    #[serde(rename = "P")]
    pub phosphorus: InputRange,
    #[serde(rename = "K")]
    pub potassium: InputRange,
    pub temperature: InputRange,
    pub humidity: InputRange,
    pub ph: InputRange,
    pub rainfall: InputRange,
}

impl InputRanges {
    /// Range for a form field name, if it is one of the seven inputs.
    pub fn get(&self, field: &str) -> Option<&InputRange> {
        match field {
            "N" => Some(&self.nitrogen),
            "P" => Some(&self.phosphorus),
            "K" => Some(&self.potassium),
            "temperature" => Some(&self.temperature),
            "humidity" => Some(&self.humidity),
            "ph" => Some(&self.ph),
            "rainfall" => Some(&self.rainfall),
            _ => None,
        }
    }
}

static INPUT_RANGES: InputRanges = InputRanges {
    nitrogen: InputRange::new(0.0, 140.0, "20-100"),
    phosphorus: InputRange::new(0.0, 145.0, "10-50"),
    potassium: InputRange::new(0.0, 205.0, "20-100"),
    temperature: InputRange::new(8.0, 44.0, "20-30"),
    humidity: InputRange::new(14.0, 100.0, "50-90"),
    ph: InputRange::new(3.5, 10.0, "6.0-7.5"),
    rainfall: InputRange::new(20.0, 300.0, "100-250"),
};

pub fn input_ranges() -> &'static InputRanges {
    &INPUT_RANGES
}
