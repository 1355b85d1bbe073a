//! Tests for record validation.

use super::*;

fn fields(brand: &str, material_type: &str, color: &str, hotend: &str, bed: &str) -> RecordFields {
    RecordFields {
        brand: brand.to_string(),
        material_type: material_type.to_string(),
        color: color.to_string(),
        temp_hotend: hotend.to_string(),
        temp_bed: bed.to_string(),
        ..Default::default()
    }
}

#[test]
fn test_single_temperature() {
    assert_eq!(validate_temperature("210"), Ok(Temperature::Single(210)));
    assert_eq!(validate_temperature("  60 "), Ok(Temperature::Single(60)));
}

#[test]
fn test_range_temperature() {
    assert_eq!(
        validate_temperature("200-220"),
        Ok(Temperature::Range { min: 200, max: 220 })
    );
    assert_eq!(
        validate_temperature("200 - 220"),
        Ok(Temperature::Range { min: 200, max: 220 })
    );
}

#[test]
fn test_every_ascending_range_validates() {
    for min in 0..40 {
        for max in (min + 1)..45 {
            let text = format!("{}-{}", min, max);
            assert_eq!(
                validate_temperature(&text),
                Ok(Temperature::Range { min, max }),
                "{} should validate",
                text
            );
        }
    }
}

#[test]
fn test_equal_or_inverted_range_fails() {
    for min in 0..40 {
        for max in 0..=min {
            let text = format!("{}-{}", min, max);
            assert_eq!(
                validate_temperature(&text),
                Err(TemperatureError::InvertedRange { min, max }),
                "{} should fail",
                text
            );
        }
    }
}

#[test]
fn test_inverted_range_message() {
    let err = validate_temperature("220-200").unwrap_err();
    assert!(err.to_string().contains("minimum must be less than maximum"));
}

#[test]
fn test_non_numeric_temperature_fails() {
    for text in ["hot", "abc", "60C", "60.5", ""] {
        assert!(
            matches!(validate_temperature(text), Err(TemperatureError::InvalidValue(_))),
            "{:?} should be rejected",
            text
        );
    }
}

#[test]
fn test_non_numeric_range_parts_fail() {
    assert_eq!(
        validate_temperature("abc-220"),
        Err(TemperatureError::InvalidMinimum("abc".to_string()))
    );
    assert_eq!(
        validate_temperature("200-xyz"),
        Err(TemperatureError::InvalidMaximum("xyz".to_string()))
    );
    assert_eq!(
        validate_temperature("-220"),
        Err(TemperatureError::InvalidMinimum(String::new()))
    );
}

#[test]
fn test_range_with_too_many_parts_fails() {
    assert_eq!(
        validate_temperature("200-210-220"),
        Err(TemperatureError::MalformedRange("200-210-220".to_string()))
    );
}

#[test]
fn test_record_trims_fields() {
    let record = Record::new(fields(" Test Brand ", "PLA ", " Red", "200-220", " 60")).unwrap();

    assert_eq!(record.brand(), "Test Brand");
    assert_eq!(record.material_type(), "PLA");
    assert_eq!(record.color(), "Red");
    assert_eq!(record.temp_hotend(), "200-220");
    assert_eq!(record.temp_bed(), "60");
    assert_eq!(record.brand_size(), None);
}

#[test]
fn test_record_blank_sizes_are_absent() {
    let mut raw = fields("Brand", "PETG", "Blue", "230", "80");
    raw.brand_size = Some("  ".to_string());
    raw.type_size = Some("8".to_string());
    raw.color_size = Some(String::new());

    let record = Record::new(raw).unwrap();
    assert_eq!(record.brand_size(), None);
    assert_eq!(record.type_size(), Some("8"));
    assert_eq!(record.color_size(), None);
}

#[test]
fn test_record_missing_fields_in_column_order() {
    let cases = [
        (fields("", "PLA", "Red", "200", "60"), "brand"),
        (fields("B", " ", "Red", "200", "60"), "type"),
        (fields("B", "PLA", "", "200", "60"), "color"),
        (fields("B", "PLA", "Red", "", "60"), "hotend temperature"),
        (fields("B", "PLA", "Red", "200", ""), "bed temperature"),
        (fields("", "", "", "", ""), "brand"),
    ];

    for (raw, expected) in cases {
        assert_eq!(
            Record::new(raw).unwrap_err(),
            ValidationError::MissingField(expected)
        );
    }
}

#[test]
fn test_record_reports_which_temperature_failed() {
    let err = Record::new(fields("B", "PLA", "Red", "220-200", "60")).unwrap_err();
    assert_eq!(
        err,
        ValidationError::Temperature {
            field: "hotend temperature",
            error: TemperatureError::InvertedRange { min: 220, max: 200 },
        }
    );

    let err = Record::new(fields("B", "PLA", "Red", "200", "warm")).unwrap_err();
    assert_eq!(err.to_string(), "bed temperature: invalid temperature value 'warm'");
}

#[test]
fn test_record_serializes_type_field_name() {
    let record = Record::new(fields("Brand", "PLA", "Red", "200", "60")).unwrap();
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["type"], "PLA");
    assert!(json.get("brand_size").is_none());
}
