//! Filament sample record model.
//!
//! A [`Record`] is one validated catalog row. Records are only produced through
//! [`Record::new`], which runs the full validation chain, so every record that
//! reaches naming or scheduling is known to be well formed. Fields are private
//! and exposed through read accessors; nothing mutates a record after parsing.
//!
//! # Temperatures
//!
//! Hotend and bed temperatures are either a single integer (`"60"`) or a strict
//! range (`"200-220"`, minimum below maximum). The original text is kept for
//! naming; [`validate_temperature`] returns the parsed form.

use serde::Serialize;
use thiserror::Error;

#[cfg(test)]
mod tests;

/// Parsed form of a temperature cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Temperature {
    Single(i64),
    Range { min: i64, max: i64 },
}

/// Why a temperature cell was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemperatureError {
    #[error("invalid temperature range format '{0}'")]
    MalformedRange(String),

    #[error("invalid minimum temperature '{0}'")]
    InvalidMinimum(String),

    #[error("invalid maximum temperature '{0}'")]
    InvalidMaximum(String),

    #[error("minimum must be less than maximum (got {min}-{max})")]
    InvertedRange { min: i64, max: i64 },

    #[error("invalid temperature value '{0}'")]
    InvalidValue(String),
}

/// Why a row could not become a [`Record`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field}: {error}")]
    Temperature {
        field: &'static str,
        #[source]
        error: TemperatureError,
    },
}

/// Validate a temperature cell.
///
/// A cell containing `-` must be exactly `min-max` with both sides integers and
/// `min < max`. Anything else must parse as a plain integer. Surrounding
/// whitespace is ignored on each part.
pub fn validate_temperature(text: &str) -> Result<Temperature, TemperatureError> {
    let text = text.trim();

    if text.contains('-') {
        let parts: Vec<&str> = text.split('-').collect();
        if parts.len() != 2 {
            return Err(TemperatureError::MalformedRange(text.to_string()));
        }

        let min = parts[0]
            .trim()
            .parse::<i64>()
            .map_err(|_| TemperatureError::InvalidMinimum(parts[0].trim().to_string()))?;
        let max = parts[1]
            .trim()
            .parse::<i64>()
            .map_err(|_| TemperatureError::InvalidMaximum(parts[1].trim().to_string()))?;

        if min >= max {
            return Err(TemperatureError::InvertedRange { min, max });
        }

        return Ok(Temperature::Range { min, max });
    }

    text.parse::<i64>()
        .map(Temperature::Single)
        .map_err(|_| TemperatureError::InvalidValue(text.to_string()))
}

/// Raw, unvalidated field values for one row.
///
/// Optional sizes should be `None` when the source column is absent or blank;
/// blank strings are normalized to `None` by [`Record::new`] as well.
#[derive(Debug, Clone, Default)]
pub struct RecordFields {
    pub brand: String,
    pub material_type: String,
    pub color: String,
    pub temp_hotend: String,
    pub temp_bed: String,
    pub brand_size: Option<String>,
    pub type_size: Option<String>,
    pub color_size: Option<String>,
}

/// One validated filament sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    brand: String,
    #[serde(rename = "type")]
    material_type: String,
    color: String,
    temp_hotend: String,
    temp_bed: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    brand_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    type_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color_size: Option<String>,
}

impl Record {
    /// Build a record from raw fields, trimming every value and running the
    /// validation chain: required fields first (in column order), then the
    /// hotend and bed temperatures.
    pub fn new(fields: RecordFields) -> Result<Self, ValidationError> {
        let record = Self {
            brand: fields.brand.trim().to_string(),
            material_type: fields.material_type.trim().to_string(),
            color: fields.color.trim().to_string(),
            temp_hotend: fields.temp_hotend.trim().to_string(),
            temp_bed: fields.temp_bed.trim().to_string(),
            brand_size: non_blank(fields.brand_size),
            type_size: non_blank(fields.type_size),
            color_size: non_blank(fields.color_size),
        };

        record.validate()?;
        Ok(record)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("brand", &self.brand),
            ("type", &self.material_type),
            ("color", &self.color),
            ("hotend temperature", &self.temp_hotend),
            ("bed temperature", &self.temp_bed),
        ];
        for (name, value) in required {
            if value.is_empty() {
                return Err(ValidationError::MissingField(name));
            }
        }

        validate_temperature(&self.temp_hotend).map_err(|error| ValidationError::Temperature {
            field: "hotend temperature",
            error,
        })?;
        validate_temperature(&self.temp_bed).map_err(|error| ValidationError::Temperature {
            field: "bed temperature",
            error,
        })?;

        Ok(())
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn material_type(&self) -> &str {
        &self.material_type
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn temp_hotend(&self) -> &str {
        &self.temp_hotend
    }

    pub fn temp_bed(&self) -> &str {
        &self.temp_bed
    }

    pub fn brand_size(&self) -> Option<&str> {
        self.brand_size.as_deref()
    }

    pub fn type_size(&self) -> Option<&str> {
        self.type_size.as_deref()
    }

    pub fn color_size(&self) -> Option<&str> {
        self.color_size.as_deref()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
