use super::input::{CalculatorInput, Industry, InputError, InputField};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read calculator export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid calculator CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid value '{value}' for {field}")]
    InvalidValue { field: String, value: String },
    #[error(transparent)]
    Input(#[from] InputError),
}

#[derive(Debug, Deserialize)]
struct InputRow {
    field: String,
    value: String,
}

/// Builds a [`CalculatorInput`] from a two-column `field,value` CSV export.
///
/// Values pass through the same boundary as interactive edits, so caps and
/// clamping apply. Empty values are skipped.
pub struct InputImporter;

impl InputImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<CalculatorInput, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<CalculatorInput, ImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut input = CalculatorInput::default();
        let mut values = Vec::new();
        for row in csv_reader.deserialize::<InputRow>() {
            let InputRow { field, value } = row?;
            if value.is_empty() {
                continue;
            }

            if field.eq_ignore_ascii_case("industry") {
                input.industry = value.parse::<Industry>()?;
                continue;
            }

            let field_key: InputField = field.parse()?;
            let raw = parse_number(&value).ok_or_else(|| ImportError::InvalidValue {
                field: field.clone(),
                value: value.clone(),
            })?;
            values.push((field_key, raw));
        }

        input.set_many(values)?;
        Ok(input)
    }
}

/// Accepts plain numbers as well as German thousands separators
/// (`1.200.000`) and decimal commas (`1200,50`).
fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '€' && *c != '%')
        .collect();

    if let Ok(value) = cleaned.parse::<f64>() {
        return Some(value);
    }

    let normalized = cleaned.replace('.', "").replace(',', ".");
    normalized.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn imports_fields_in_any_order() {
        let csv = "field,value\nunusedLicenses,80\nboughtLicenses,1000\nindustry,finance\ntotalLicenseCost,\"1.200.000 €\"\nuserCount,1000\n";

        let input = InputImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(input.unused_licenses, 80);
        assert_eq!(input.bought_licenses, 1000);
        assert_eq!(input.industry, Industry::Finance);
        assert_eq!(input.total_license_cost, 1_200_000.0);
        assert_eq!(input.user_count, 1000);
    }

    #[test]
    fn rejects_unknown_fields() {
        let csv = "field,value\nseats,10\n";

        match InputImporter::from_reader(Cursor::new(csv)) {
            Err(ImportError::Input(InputError::UnknownField(field))) => {
                assert_eq!(field, "seats")
            }
            other => panic!("expected unknown field error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_non_numeric_values() {
        let csv = "field,value\nuserCount,many\n";

        match InputImporter::from_reader(Cursor::new(csv)) {
            Err(ImportError::InvalidValue { field, value }) => {
                assert_eq!(field, "userCount");
                assert_eq!(value, "many");
            }
            other => panic!("expected invalid value error, got {other:?}"),
        }
    }

    #[test]
    fn parses_decimal_commas() {
        assert_eq!(parse_number("1200,50"), Some(1200.5));
        assert_eq!(parse_number("95.5"), Some(95.5));
        assert_eq!(parse_number("n/a"), None);
    }
}
