//! Output file naming and OpenSCAD `-D` definitions for a record.
//!
//! Both are pure functions of the record. Field order is fixed: brand, type,
//! color, hotend temperature, bed temperature, then any present size overrides.
//! Values are passed through verbatim; nothing is escaped.

use crate::record::Record;

/// Default output artifact extension (no leading dot).
pub const DEFAULT_EXTENSION: &str = "stl";

/// Maps records to output filenames and tool arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingPolicy {
    extension: String,
}

impl Default for NamingPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSION)
    }
}

impl NamingPolicy {
    /// Create a policy for the given extension. A leading dot is tolerated.
    pub fn new(extension: impl Into<String>) -> Self {
        let extension = extension.into();
        Self {
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    /// `{brand}_{type}_{color}_{hotend}_{bed}.{ext}`
    pub fn filename(&self, record: &Record) -> String {
        let stem = [
            record.brand(),
            record.material_type(),
            record.color(),
            record.temp_hotend(),
            record.temp_bed(),
        ]
        .join("_");

        format!("{}.{}", stem, self.extension)
    }

    /// OpenSCAD definitions for a record, as `-D` / `NAME=value` pairs.
    ///
    /// Text fields are quoted so OpenSCAD reads them as strings; size
    /// overrides are left bare so they are read as numbers.
    pub fn tool_arguments(&self, record: &Record) -> Vec<String> {
        let mut args = Vec::with_capacity(16);

        for (name, value) in [
            ("BRAND", record.brand()),
            ("TYPE", record.material_type()),
            ("COLOR", record.color()),
            ("TEMP_HOTEND", record.temp_hotend()),
            ("TEMP_BED", record.temp_bed()),
        ] {
            args.push("-D".to_string());
            args.push(format!("{}=\"{}\"", name, value));
        }

        for (name, value) in [
            ("BRAND_SIZE", record.brand_size()),
            ("TYPE_SIZE", record.type_size()),
            ("COLOR_SIZE", record.color_size()),
        ] {
            if let Some(value) = value {
                args.push("-D".to_string());
                args.push(format!("{}={}", name, value));
            }
        }

        args
    }
}
