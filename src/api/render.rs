//! HTML page assembly
//!
//! The page skeleton is the embedded `static/index.html`. The form fields and
//! the results block are generated here and spliced into its `{{form_fields}}`
//! and `{{results}}` placeholders. Every user-derived string goes through
//! [`escape_html`].

use std::collections::HashMap;

use super::PredictError;
use crate::catalog::{self, CropInfo};
use crate::types::{Prediction, RankedCrop, FEATURE_NAMES, NUM_FEATURES};

const FIELDS_SLOT: &str = "{{form_fields}}";
const RESULTS_SLOT: &str = "{{results}}";

/// Used if the template asset is missing from the build.
const FALLBACK_TEMPLATE: &str = "<!DOCTYPE html><html><head><meta charset=\"utf-8\">\
<title>Crop Advisor</title></head><body><form method=\"post\" action=\"/\">\
{{form_fields}}<button type=\"submit\">Recommend Crops</button></form>{{results}}</body></html>";

/// (label, unit, slider step, tooltip) per input, in `FEATURE_NAMES` order.
const FIELD_LABELS: [(&str, &str, &str, &str); NUM_FEATURES] = [
    ("Nitrogen (N)", "kg/ha", "1", "Ratio of nitrogen content in the soil"),
    ("Phosphorus (P)", "kg/ha", "1", "Ratio of phosphorus content in the soil"),
    ("Potassium (K)", "kg/ha", "1", "Ratio of potassium content in the soil"),
    ("Temperature", "°C", "0.1", "Average air temperature"),
    ("Humidity", "%", "0.1", "Average relative humidity"),
    ("pH", "", "0.1", "Soil acidity (7 is neutral)"),
    ("Rainfall", "mm", "1", "Rainfall over the growing season"),
];

/// Values shown in the form inputs, in `FEATURE_NAMES` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormEcho([String; NUM_FEATURES]);

impl FormEcho {
    /// Midpoint of each field's guidance range.
    pub fn defaults() -> Self {
        let ranges = catalog::input_ranges();
        Self(FEATURE_NAMES.map(|name| {
            ranges
                .get(name)
                .map(|r| format!("{}", (r.min + r.max) / 2.0))
                .unwrap_or_default()
        }))
    }

    /// The submitted values as typed. A missing field shows as 0, the value
    /// the model receives for it.
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        Self(FEATURE_NAMES.map(|name| {
            fields
                .get(name)
                .map_or_else(|| "0".to_string(), |v| v.trim().to_string())
        }))
    }

    pub fn values(&self) -> &[String; NUM_FEATURES] {
        &self.0
    }
}

/// Escape text for an HTML body or a double-quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the full page. `outcome` is `None` for a plain GET.
pub fn page(echo: &FormEcho, outcome: Option<&Result<Prediction, PredictError>>) -> String {
    let template = super::page_template();
    let template = template.as_deref().unwrap_or(FALLBACK_TEMPLATE);

    let results = match outcome {
        None => String::new(),
        Some(Ok(prediction)) => results_section(prediction),
        Some(Err(e)) => error_section(&e.to_string()),
    };

    template
        .replacen(FIELDS_SLOT, &form_fields(echo), 1)
        .replacen(RESULTS_SLOT, &results, 1)
}

// ============================================================================
// Form
// ============================================================================

fn form_fields(echo: &FormEcho) -> String {
    let ranges = catalog::input_ranges();
    let mut html = String::new();

    for ((name, value), (label, unit, step, tooltip)) in
        FEATURE_NAMES.iter().zip(echo.values()).zip(FIELD_LABELS)
    {
        let Some(range) = ranges.get(name) else {
            continue;
        };
        // Slider needs a number in range; fall back to the range minimum
        let slider_value = value
            .parse::<f64>()
            .ok()
            .filter(|v| range.contains(*v))
            .unwrap_or(range.min);
        let value = escape_html(value);
        let unit = if unit.is_empty() {
            String::new()
        } else {
            format!(" ({unit})")
        };

        html.push_str(&format!(
            r#"                <div class="field">
                    <label for="{name}">{label}{unit} <span class="info-icon" data-tooltip="{tooltip}">ⓘ</span></label>
                    <div class="field-inputs">
                        <input type="range" class="slider" id="{name}_slider" min="{min}" max="{max}" step="{step}" value="{slider_value}">
                        <input type="text" inputmode="decimal" class="number-input" id="{name}" name="{name}" value="{value}">
                    </div>
                    <div class="range-hint" id="{name}_hint">Optimal {optimal}</div>
                </div>
"#,
            min = range.min,
            max = range.max,
            optimal = range.optimal,
        ));
    }
    html
}

// ============================================================================
// Results
// ============================================================================

fn error_section(message: &str) -> String {
    format!(
        r#"        <section id="resultsSection" class="results">
            <div class="error-box"><strong>Error:</strong> {}</div>
        </section>
"#,
        escape_html(message)
    )
}

fn results_section(prediction: &Prediction) -> String {
    let mut html = String::from("        <section id=\"resultsSection\" class=\"results\">\n");
    html.push_str(&main_card(&prediction.crop, catalog::lookup(&prediction.lookup_key())));

    if let Some(ranked) = prediction.ranked.as_deref().filter(|r| !r.is_empty()) {
        html.push_str("            <h3>Top matches</h3>\n            <div class=\"top-crops\">\n");
        for entry in ranked {
            html.push_str(&ranked_card(entry));
        }
        html.push_str("            </div>\n");
    }

    html.push_str("        </section>\n");
    html
}

fn main_card(label: &str, info: Option<&CropInfo>) -> String {
    let Some(info) = info else {
        return format!(
            "            <div class=\"result-card\"><h2>Recommended: {}</h2></div>\n",
            escape_html(label)
        );
    };

    let tips: String = info
        .tips
        .iter()
        .map(|tip| format!("<li>{}</li>", escape_html(tip)))
        .collect();

    format!(
        r#"            <div class="result-card">
                <div class="crop-emoji">{emoji}</div>
                <h2>Recommended: {name}</h2>
                <p>{description}</p>
                <div class="crop-meta"><span>Season: {season}</span><span>Duration: {duration}</span></div>
                <ul class="crop-tips">{tips}</ul>
            </div>
"#,
        emoji = info.emoji,
        name = escape_html(info.name),
        description = escape_html(info.description),
        season = escape_html(info.season),
        duration = escape_html(info.duration),
    )
}

fn ranked_card(entry: &RankedCrop) -> String {
    let info = catalog::lookup(&entry.name);
    let emoji = info.map_or("🌱", |i| i.emoji);
    let name = info.map_or(entry.name.as_str(), |i| i.name);
    format!(
        r#"                <div class="crop-card">
                    <h4>{emoji} {name}</h4>
                    <div class="confidence-bar"><div class="confidence-fill" style="width: {width}%"></div></div>
                    <span class="confidence">{confidence:.2}%</span>
                </div>
"#,
        name = escape_html(name),
        width = entry.confidence.clamp(0.0, 100.0),
        confidence = entry.confidence,
    )
}
