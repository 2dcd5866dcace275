use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

/// Parses user-entered numeric text (plain or scientific notation) into `f64`.
pub fn parse_numeric_field(input: &str, field_name: &str) -> ChartResult<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ChartError::InvalidData(format!(
            "{field_name} must not be empty"
        )));
    }
    let decimal = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|e| ChartError::InvalidData(format!("{field_name} `{trimmed}` is not a number: {e}")))?;
    decimal_to_f64(decimal, field_name)
}

pub fn ensure_finite(value: f64, field_name: &str) -> ChartResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ChartError::InvalidData(format!(
            "{field_name} must be finite"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::parse_numeric_field;

    #[test]
    fn parses_plain_and_scientific_values() {
        assert_eq!(parse_numeric_field(" 12.5 ", "value").expect("plain"), 12.5);
        assert_eq!(parse_numeric_field("-3", "value").expect("negative"), -3.0);
        assert_eq!(parse_numeric_field("1e3", "value").expect("scientific"), 1000.0);
    }

    #[test]
    fn rejects_empty_and_garbage_values() {
        let err = parse_numeric_field("   ", "value").expect_err("empty must fail");
        assert!(format!("{err}").contains("must not be empty"));
        let err = parse_numeric_field("twelve", "x").expect_err("garbage must fail");
        assert!(format!("{err}").contains("x `twelve`"));
    }
}
