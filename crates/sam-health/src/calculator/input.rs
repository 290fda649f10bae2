use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Industry segment used to pick the cost-per-user benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    Finance,
    #[default]
    Industry,
    Other,
}

impl Industry {
    pub const fn ordered() -> [Self; 3] {
        [Self::Finance, Self::Industry, Self::Other]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Finance => "finance",
            Self::Industry => "industry",
            Self::Other => "other",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Finance => "Finanzwesen & Versicherung",
            Self::Industry => "Industrie & Fertigung",
            Self::Other => "Sonstige Dienstleistung",
        }
    }
}

impl FromStr for Industry {
    type Err = InputError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "finance" => Ok(Self::Finance),
            "industry" => Ok(Self::Industry),
            "other" => Ok(Self::Other),
            other => Err(InputError::UnknownIndustry(other.to_string())),
        }
    }
}

/// Raw metrics entered by the user. Every numeric field starts at zero.
///
/// Deserialization goes through the same boundary as [`CalculatorInput::set`],
/// so negative or fractional counts are clamped rather than refused.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "InputForm")]
pub struct CalculatorInput {
    pub licensed_software: u32,
    pub installed_software: u32,
    pub passed_audits: u32,
    pub total_audits: u32,
    pub unused_licenses: u32,
    pub bought_licenses: u32,
    pub total_license_cost: f64,
    pub user_count: u32,
    pub industry: Industry,
    pub true_up_cost: f64,
    pub original_order: f64,
    pub days_standard: u32,
    pub days_new: u32,
}

impl CalculatorInput {
    /// Applies a raw numeric value to a field.
    ///
    /// Non-finite values are rejected and leave the record untouched. Negative
    /// values clamp to zero, count fields round to whole numbers, and the
    /// dependent caps (`unused <= bought`, `passed <= total`) are re-applied.
    pub fn set(&mut self, field: InputField, raw: f64) -> Result<(), InputError> {
        if !raw.is_finite() {
            return Err(InputError::NotFinite { field });
        }
        self.assign(field, raw);
        Ok(())
    }

    /// Applies several values at once. Capped fields go after the fields that
    /// bound them, so the outcome does not depend on the order of `values`.
    pub fn set_many<I>(&mut self, values: I) -> Result<(), InputError>
    where
        I: IntoIterator<Item = (InputField, f64)>,
    {
        for (field, raw) in bounds_first(values) {
            self.set(field, raw)?;
        }
        Ok(())
    }

    /// Returns the current value of a numeric field.
    pub fn get(&self, field: InputField) -> f64 {
        match field {
            InputField::LicensedSoftware => f64::from(self.licensed_software),
            InputField::InstalledSoftware => f64::from(self.installed_software),
            InputField::PassedAudits => f64::from(self.passed_audits),
            InputField::TotalAudits => f64::from(self.total_audits),
            InputField::UnusedLicenses => f64::from(self.unused_licenses),
            InputField::BoughtLicenses => f64::from(self.bought_licenses),
            InputField::TotalLicenseCost => self.total_license_cost,
            InputField::UserCount => f64::from(self.user_count),
            InputField::TrueUpCost => self.true_up_cost,
            InputField::OriginalOrder => self.original_order,
            InputField::DaysStandard => f64::from(self.days_standard),
            InputField::DaysNew => f64::from(self.days_new),
        }
    }

    /// Copy of the record with every boundary rule applied. Records built
    /// directly (e.g. deserialized from JSON) go through this before scoring.
    pub fn sanitized(&self) -> Self {
        let mut clean = self.clone();
        clean.total_license_cost = clamp_amount(clean.total_license_cost);
        clean.true_up_cost = clamp_amount(clean.true_up_cost);
        clean.original_order = clamp_amount(clean.original_order);
        clean.enforce_caps();
        clean
    }

    /// Stores a finite value: negatives clamp to zero, counts round, caps
    /// are re-applied.
    fn assign(&mut self, field: InputField, raw: f64) {
        let value = raw.max(0.0);
        if let Some(amount) = self.amount_mut(field) {
            *amount = value;
        } else if let Some(count) = self.count_mut(field) {
            *count = to_count(value);
        }
        self.enforce_caps();
    }

    fn enforce_caps(&mut self) {
        self.unused_licenses = self.unused_licenses.min(self.bought_licenses);
        self.passed_audits = self.passed_audits.min(self.total_audits);
    }

    fn amount_mut(&mut self, field: InputField) -> Option<&mut f64> {
        match field {
            InputField::TotalLicenseCost => Some(&mut self.total_license_cost),
            InputField::TrueUpCost => Some(&mut self.true_up_cost),
            InputField::OriginalOrder => Some(&mut self.original_order),
            _ => None,
        }
    }

    fn count_mut(&mut self, field: InputField) -> Option<&mut u32> {
        match field {
            InputField::LicensedSoftware => Some(&mut self.licensed_software),
            InputField::InstalledSoftware => Some(&mut self.installed_software),
            InputField::PassedAudits => Some(&mut self.passed_audits),
            InputField::TotalAudits => Some(&mut self.total_audits),
            InputField::UnusedLicenses => Some(&mut self.unused_licenses),
            InputField::BoughtLicenses => Some(&mut self.bought_licenses),
            InputField::UserCount => Some(&mut self.user_count),
            InputField::DaysStandard => Some(&mut self.days_standard),
            InputField::DaysNew => Some(&mut self.days_new),
            InputField::TotalLicenseCost
            | InputField::TrueUpCost
            | InputField::OriginalOrder => None,
        }
    }
}

fn bounds_first<I>(values: I) -> Vec<(InputField, f64)>
where
    I: IntoIterator<Item = (InputField, f64)>,
{
    let mut values: Vec<(InputField, f64)> = values.into_iter().collect();
    values.sort_by_key(|(field, _)| field.capped_by().is_some());
    values
}

/// Wire shape of [`CalculatorInput`]: every number is accepted as `f64`
/// and then passed through the input boundary.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct InputForm {
    licensed_software: f64,
    installed_software: f64,
    passed_audits: f64,
    total_audits: f64,
    unused_licenses: f64,
    bought_licenses: f64,
    total_license_cost: f64,
    user_count: f64,
    industry: Industry,
    true_up_cost: f64,
    original_order: f64,
    days_standard: f64,
    days_new: f64,
}

impl From<InputForm> for CalculatorInput {
    fn from(form: InputForm) -> Self {
        let values = [
            (InputField::LicensedSoftware, form.licensed_software),
            (InputField::InstalledSoftware, form.installed_software),
            (InputField::PassedAudits, form.passed_audits),
            (InputField::TotalAudits, form.total_audits),
            (InputField::UnusedLicenses, form.unused_licenses),
            (InputField::BoughtLicenses, form.bought_licenses),
            (InputField::TotalLicenseCost, form.total_license_cost),
            (InputField::UserCount, form.user_count),
            (InputField::TrueUpCost, form.true_up_cost),
            (InputField::OriginalOrder, form.original_order),
            (InputField::DaysStandard, form.days_standard),
            (InputField::DaysNew, form.days_new),
        ];

        let mut input = Self {
            industry: form.industry,
            ..Self::default()
        };
        for (field, raw) in bounds_first(values) {
            if raw.is_finite() {
                input.assign(field, raw);
            }
        }
        input
    }
}

fn to_count(value: f64) -> u32 {
    value.round().min(f64::from(u32::MAX)) as u32
}

fn clamp_amount(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// Numeric fields of [`CalculatorInput`], grouped by calculator domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputField {
    LicensedSoftware,
    InstalledSoftware,
    PassedAudits,
    TotalAudits,
    UnusedLicenses,
    BoughtLicenses,
    TotalLicenseCost,
    UserCount,
    TrueUpCost,
    OriginalOrder,
    DaysStandard,
    DaysNew,
}

impl InputField {
    pub const fn ordered() -> [Self; 12] {
        [
            Self::LicensedSoftware,
            Self::InstalledSoftware,
            Self::PassedAudits,
            Self::TotalAudits,
            Self::BoughtLicenses,
            Self::UnusedLicenses,
            Self::TotalLicenseCost,
            Self::UserCount,
            Self::OriginalOrder,
            Self::TrueUpCost,
            Self::DaysStandard,
            Self::DaysNew,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::LicensedSoftware => "licensedSoftware",
            Self::InstalledSoftware => "installedSoftware",
            Self::PassedAudits => "passedAudits",
            Self::TotalAudits => "totalAudits",
            Self::UnusedLicenses => "unusedLicenses",
            Self::BoughtLicenses => "boughtLicenses",
            Self::TotalLicenseCost => "totalLicenseCost",
            Self::UserCount => "userCount",
            Self::TrueUpCost => "trueUpCost",
            Self::OriginalOrder => "originalOrder",
            Self::DaysStandard => "daysStandard",
            Self::DaysNew => "daysNew",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::LicensedSoftware => "Lizenzierte Software",
            Self::InstalledSoftware => "Installierte Software",
            Self::PassedAudits => "Bestandene Audits",
            Self::TotalAudits => "Audits Gesamt",
            Self::UnusedLicenses => "Davon ungenutzt",
            Self::BoughtLicenses => "Gekaufte Lizenzen",
            Self::TotalLicenseCost => "Gesamte Lizenzkosten p.a. (€)",
            Self::UserCount => "Anzahl User / Devices",
            Self::TrueUpCost => "True-Up Nachzahlung",
            Self::OriginalOrder => "Ausgangsbestellung",
            Self::DaysStandard => "Bereitstellung Standardsoftware",
            Self::DaysNew => "Neue Software (Beschaffung)",
        }
    }

    pub const fn is_currency(self) -> bool {
        matches!(
            self,
            Self::TotalLicenseCost | Self::TrueUpCost | Self::OriginalOrder
        )
    }

    /// Field whose value caps this one.
    pub const fn capped_by(self) -> Option<Self> {
        match self {
            Self::UnusedLicenses => Some(Self::BoughtLicenses),
            Self::PassedAudits => Some(Self::TotalAudits),
            _ => None,
        }
    }

    /// Suggested control range for the field. Advisory only: values outside
    /// the range are still accepted by [`CalculatorInput::set`].
    pub fn suggested_range(self, input: &CalculatorInput) -> Option<(f64, f64)> {
        match self {
            Self::LicensedSoftware => Some((
                0.0,
                f64::from(input.installed_software.saturating_add(200)).max(1000.0),
            )),
            Self::InstalledSoftware => Some((0.0, 2500.0)),
            Self::PassedAudits | Self::TotalAudits => Some((0.0, 20.0)),
            Self::BoughtLicenses => Some((0.0, 3000.0)),
            Self::UnusedLicenses => Some((0.0, f64::from(input.bought_licenses))),
            Self::UserCount => Some((0.0, 10_000.0)),
            Self::DaysStandard => Some((0.0, 30.0)),
            Self::DaysNew => Some((0.0, 90.0)),
            Self::TotalLicenseCost | Self::TrueUpCost | Self::OriginalOrder => None,
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for InputField {
    type Err = InputError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ordered()
            .into_iter()
            .find(|field| field.key().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| InputError::UnknownField(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("{field} must be a finite number")]
    NotFinite { field: InputField },
    #[error("unknown calculator field '{0}'")]
    UnknownField(String),
    #[error("unknown industry '{0}' (expected finance, industry or other)")]
    UnknownIndustry(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_zero_start_state() {
        let input = CalculatorInput::default();
        for field in InputField::ordered() {
            assert_eq!(input.get(field), 0.0, "{field} should start at zero");
        }
        assert_eq!(input.industry, Industry::Industry);
    }

    #[test]
    fn set_rejects_nan_and_keeps_previous_value() {
        let mut input = CalculatorInput::default();
        input.set(InputField::UserCount, 250.0).expect("valid count");

        let err = input
            .set(InputField::UserCount, f64::NAN)
            .expect_err("nan rejected");

        assert_eq!(
            err,
            InputError::NotFinite {
                field: InputField::UserCount
            }
        );
        assert_eq!(input.user_count, 250);
    }

    #[test]
    fn set_clamps_negative_values_and_rounds_counts() {
        let mut input = CalculatorInput::default();
        input.set(InputField::TrueUpCost, -500.0).expect("clamped");
        input.set(InputField::DaysNew, 12.6).expect("rounded");

        assert_eq!(input.true_up_cost, 0.0);
        assert_eq!(input.days_new, 13);
    }

    #[test]
    fn unused_licenses_are_capped_at_bought_licenses() {
        let mut input = CalculatorInput::default();
        input.set(InputField::BoughtLicenses, 100.0).expect("valid");
        input.set(InputField::UnusedLicenses, 180.0).expect("capped");
        assert_eq!(input.unused_licenses, 100);

        input.set(InputField::BoughtLicenses, 40.0).expect("valid");
        assert_eq!(input.unused_licenses, 40);
    }

    #[test]
    fn sanitized_caps_records_built_in_code() {
        let input = CalculatorInput {
            passed_audits: 5,
            total_audits: 3,
            true_up_cost: -10.0,
            ..CalculatorInput::default()
        };

        let clean = input.sanitized();

        assert_eq!(clean.passed_audits, 3);
        assert_eq!(clean.true_up_cost, 0.0);
    }

    #[test]
    fn deserialization_clamps_instead_of_refusing() {
        let input: CalculatorInput = serde_json::from_str(
            r#"{"daysNew": -5, "daysStandard": 12.6, "passedAudits": 5, "totalAudits": 3, "trueUpCost": -10, "industry": "finance"}"#,
        )
        .expect("lenient json");

        assert_eq!(input.days_new, 0);
        assert_eq!(input.days_standard, 13);
        assert_eq!(input.passed_audits, 3);
        assert_eq!(input.true_up_cost, 0.0);
        assert_eq!(input.industry, Industry::Finance);
    }

    #[test]
    fn set_many_applies_bounds_before_capped_fields() {
        let mut input = CalculatorInput::default();
        input
            .set_many([
                (InputField::PassedAudits, 4.0),
                (InputField::UnusedLicenses, 120.0),
                (InputField::TotalAudits, 5.0),
                (InputField::BoughtLicenses, 1000.0),
            ])
            .expect("valid values");

        assert_eq!(input.passed_audits, 4);
        assert_eq!(input.unused_licenses, 120);
        assert_eq!(InputField::PassedAudits.capped_by(), Some(InputField::TotalAudits));
    }

    #[test]
    fn fields_parse_from_form_keys() {
        assert_eq!(
            "licensedSoftware".parse::<InputField>(),
            Ok(InputField::LicensedSoftware)
        );
        assert!(matches!(
            "seats".parse::<InputField>(),
            Err(InputError::UnknownField(_))
        ));
        assert_eq!("Finance".parse::<Industry>(), Ok(Industry::Finance));
    }

    #[test]
    fn licensed_software_range_tracks_installations() {
        let mut input = CalculatorInput::default();
        input.installed_software = 2000;
        assert_eq!(
            InputField::LicensedSoftware.suggested_range(&input),
            Some((0.0, 2200.0))
        );
        assert_eq!(InputField::TrueUpCost.suggested_range(&input), None);
    }
}
