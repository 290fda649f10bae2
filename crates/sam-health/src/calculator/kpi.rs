use super::format::NO_DATA;
use serde::{Deserialize, Serialize};

/// Traffic-light classification of a KPI. `Gray` means not enough data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiStatus {
    Green,
    Yellow,
    Red,
    Gray,
}

impl KpiStatus {
    pub const fn has_data(self) -> bool {
        !matches!(self, Self::Gray)
    }

    /// Short badge shown on collapsed calculator modules.
    pub const fn badge(self) -> Option<&'static str> {
        match self {
            Self::Green => Some("OK"),
            Self::Yellow => Some("Prüfen"),
            Self::Red => Some("Kritisch"),
            Self::Gray => None,
        }
    }
}

/// The six scored dimensions, in dashboard and report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiKind {
    ComplianceRate,
    AuditSuccess,
    ShelfwareQuote,
    CostPerUser,
    TrueUpRatio,
    Agility,
}

impl KpiKind {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::ComplianceRate,
            Self::AuditSuccess,
            Self::ShelfwareQuote,
            Self::CostPerUser,
            Self::TrueUpRatio,
            Self::Agility,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ComplianceRate => "Compliance Rate",
            Self::AuditSuccess => "Audit Erfolgsrate",
            Self::ShelfwareQuote => "Shelfware Quote",
            Self::CostPerUser => "Lizenzkosten / User",
            Self::TrueUpRatio => "True-Up Ratio",
            Self::Agility => "Time-to-Provision",
        }
    }

    pub const fn help_text(self) -> &'static str {
        match self {
            Self::ComplianceRate => "Verhältnis von Lizenzen zu Installationen.",
            Self::AuditSuccess => "Anteil der Audits ohne Nachzahlung.",
            Self::ShelfwareQuote => "Prozentsatz ungenutzter Lizenzen.",
            Self::CostPerUser => "Lizenzkosten pro User im Branchenvergleich.",
            Self::TrueUpRatio => "Verhältnis von Nachzahlung zu Ursprungsvolumen.",
            Self::Agility => "Geschwindigkeit der Softwarebereitstellung.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiResult {
    pub kind: KpiKind,
    pub label: String,
    pub value: f64,
    pub formatted_value: String,
    pub status: KpiStatus,
    pub message: String,
    /// Contribution to the composite score, always within `0..=100`.
    pub score: f64,
}

impl KpiResult {
    pub(crate) const NO_DATA_MESSAGE: &'static str = "Daten eingeben...";

    pub(crate) fn no_data(kind: KpiKind) -> Self {
        Self {
            kind,
            label: kind.label().to_string(),
            value: 0.0,
            formatted_value: NO_DATA.to_string(),
            status: KpiStatus::Gray,
            message: Self::NO_DATA_MESSAGE.to_string(),
            score: 0.0,
        }
    }

    pub(crate) fn measured(
        kind: KpiKind,
        value: f64,
        formatted_value: String,
        status: KpiStatus,
        message: impl Into<String>,
        score: f64,
    ) -> Self {
        Self {
            kind,
            label: kind.label().to_string(),
            value,
            formatted_value,
            status,
            message: message.into(),
            score: score.clamp(0.0, 100.0),
        }
    }

    pub fn has_data(&self) -> bool {
        self.status.has_data()
    }
}
