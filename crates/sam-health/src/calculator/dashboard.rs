use super::input::Industry;
use super::kpi::{KpiKind, KpiStatus};
use super::HealthCheckResult;
use serde::Serialize;

/// Qualitative band of the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthBand {
    Excellent,
    Optimizable,
    Critical,
}

impl HealthBand {
    pub fn from_score(score: u8) -> Self {
        if score > 80 {
            Self::Excellent
        } else if score > 50 {
            Self::Optimizable
        } else {
            Self::Critical
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Exzellent",
            Self::Optimizable => "Optimierbar",
            Self::Critical => "Kritisch",
        }
    }

    /// Sentence used in the report banner.
    pub const fn assessment(self) -> &'static str {
        match self {
            Self::Excellent => "Exzellenter Zustand",
            Self::Optimizable => "Optimierungspotenzial vorhanden",
            Self::Critical => "Kritischer Handlungsbedarf",
        }
    }

    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Excellent => (34, 197, 94),
            Self::Optimizable => (234, 179, 8),
            Self::Critical => (239, 68, 68),
        }
    }
}

/// Input domains of the calculator, one per wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainModule {
    Compliance,
    Shelfware,
    Costs,
    Agility,
}

impl DomainModule {
    pub const fn ordered() -> [Self; 4] {
        [Self::Compliance, Self::Shelfware, Self::Costs, Self::Agility]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Compliance => "Compliance & Sicherheit",
            Self::Shelfware => "Effizienz (Shelfware)",
            Self::Costs => "Kosten & Planung",
            Self::Agility => "Agilität & Prozesse",
        }
    }

    /// Aggregated status shown on the module header. The cost module turns
    /// red when either cost KPI is red.
    pub fn status(self, result: &HealthCheckResult) -> KpiStatus {
        match self {
            Self::Compliance => result.compliance.status,
            Self::Shelfware => result.shelfware.status,
            Self::Costs => {
                if result.cost_per_user.status == KpiStatus::Red
                    || result.true_up.status == KpiStatus::Red
                {
                    KpiStatus::Red
                } else if result.cost_per_user.status == KpiStatus::Gray {
                    KpiStatus::Gray
                } else {
                    KpiStatus::Green
                }
            }
            Self::Agility => result.agility.status,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ModuleView {
    pub module: DomainModule,
    pub label: &'static str,
    pub status: KpiStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct KpiView {
    pub kind: KpiKind,
    pub label: &'static str,
    pub help_text: String,
    pub formatted_value: String,
    pub status: KpiStatus,
    pub message: String,
    /// Width of the progress bar, in percent.
    pub gauge: f64,
}

/// Everything the results panel needs, derived from one result.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub total_score: u8,
    pub has_data: bool,
    pub headline: &'static str,
    pub band_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<HealthBand>,
    pub modules: Vec<ModuleView>,
    pub kpis: Vec<KpiView>,
    pub critical_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
}

pub(crate) fn build_dashboard(result: &HealthCheckResult) -> DashboardView {
    let band = result.has_data.then(|| result.band());

    let modules = DomainModule::ordered()
        .into_iter()
        .map(|module| {
            let status = module.status(result);
            ModuleView {
                module,
                label: module.label(),
                status,
                badge: status.badge(),
            }
        })
        .collect();

    let kpis = result
        .kpis()
        .into_iter()
        .map(|kpi| KpiView {
            kind: kpi.kind,
            label: kpi.kind.label(),
            help_text: help_text(kpi.kind, result.industry),
            formatted_value: kpi.formatted_value.clone(),
            status: kpi.status,
            message: kpi.message.clone(),
            gauge: kpi.score,
        })
        .collect();

    let critical_count = result.critical_count();
    let analysis = result.has_data.then(|| {
        format!(
            "Sie haben {critical_count} kritische KPIs identifiziert. Laden Sie die vollständige Auswertung herunter."
        )
    });

    DashboardView {
        total_score: result.total_score,
        has_data: result.has_data,
        headline: if result.has_data {
            "Basierend auf Ihren Eingaben"
        } else {
            "Bitte Daten links eingeben"
        },
        band_label: band.map_or("Warten auf Eingabe...", HealthBand::label),
        band,
        modules,
        kpis,
        critical_count,
        analysis,
    }
}

fn help_text(kind: KpiKind, industry: Industry) -> String {
    match kind {
        KpiKind::CostPerUser => format!("Benchmark für {}.", industry.label()),
        other => other.help_text().to_string(),
    }
}
