use crate::infra::{build_service, load_input, parse_assignment, parse_industry};
use chrono::{Local, NaiveDate};
use clap::Args;
use sam_health::calculator::{
    CalculatorInput, CalculatorSession, DashboardView, Industry, InputField, KpiStatus,
    ScoringEngine, SessionEvent,
};
use sam_health::config::SamSettings;
use sam_health::content::load_sam_config_or_default;
use sam_health::error::AppError;
use sam_health::leads::{NotificationStatus, ReportDelivery};
use sam_health::report::{FsReportSink, ReportGenerator, ReportSink};
use std::path::PathBuf;

/// Calculator input assembled from an optional CSV export and overrides.
#[derive(Args, Debug, Default)]
pub(crate) struct InputArgs {
    /// Two-column `field,value` CSV export of the calculator
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Industry used for the cost benchmark (finance, industry, other)
    #[arg(long, value_parser = parse_industry)]
    pub(crate) industry: Option<Industry>,
    /// Field override such as `installedSoftware=1200`; repeatable
    #[arg(long = "set", value_parser = parse_assignment)]
    pub(crate) overrides: Vec<(InputField, f64)>,
}

impl InputArgs {
    fn load(&self) -> Result<CalculatorInput, AppError> {
        Ok(load_input(
            self.csv.as_deref(),
            self.industry,
            &self.overrides,
        )?)
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct ScoreArgs {
    #[command(flatten)]
    pub(crate) input: InputArgs,
    /// Print the result and dashboard as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    #[command(flatten)]
    pub(crate) input: InputArgs,
    /// Directory receiving the PDF
    #[arg(long, default_value = ".")]
    pub(crate) out: PathBuf,
    /// Issue date printed in the header (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) date: Option<NaiveDate>,
    /// Run the lead flow for this address instead of only writing the file
    #[arg(long)]
    pub(crate) email: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Also write the resulting report into this directory
    #[arg(long)]
    pub(crate) out: Option<PathBuf>,
    /// Issue date printed in the header (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) date: Option<NaiveDate>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let input = args.input.load()?;
    let result = ScoringEngine::default().score(&input);
    let dashboard = result.dashboard();

    if args.json {
        let payload = serde_json::json!({ "result": result, "dashboard": dashboard });
        let rendered = serde_json::to_string_pretty(&payload).map_err(std::io::Error::other)?;
        println!("{rendered}");
    } else {
        render_dashboard(&dashboard);
    }
    Ok(())
}

pub(crate) fn run_report(args: ReportArgs, settings: &SamSettings) -> Result<(), AppError> {
    let ReportArgs {
        input,
        out,
        date,
        email,
    } = args;

    let input = input.load()?;
    let issued_on = date.unwrap_or_else(|| Local::now().date_naive());
    let config = load_sam_config_or_default(settings.content.provider().as_ref());

    match email {
        Some(email) => {
            let settings = SamSettings {
                report_dir: Some(out),
                ..settings.clone()
            };
            let service = build_service(&settings, config);
            let outcome = service.capture_lead(&email, &input, issued_on)?;
            match &outcome.report {
                ReportDelivery::Delivered { location, .. } => println!("Report: {location}"),
                ReportDelivery::Failed { reason } => println!("Report not written: {reason}"),
            }
            if let NotificationStatus::Failed { reason } = &outcome.notification {
                println!("Lead not submitted: {reason}");
            }
            println!("{}", outcome.message);
        }
        None => {
            let result = ScoringEngine::default().score(&input);
            let document =
                ReportGenerator::new(settings.branding()).generate(&result, &config, issued_on)?;
            let location = FsReportSink::new(out).deliver(&document)?;
            println!(
                "Report written to {location} ({} pages, health score {} / 100)",
                document.page_count, result.total_score
            );
        }
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs, settings: &SamSettings) -> Result<(), AppError> {
    println!("SAM health check demo");

    let mut session = CalculatorSession::default();
    session.subscribe(|event| match event {
        SessionEvent::Recomputed {
            field: Some(field),
            result,
        } => println!("  {} -> health score {}", field.label(), result.total_score),
        SessionEvent::Recomputed { field: None, result } => {
            println!("  industry changed -> health score {}", result.total_score)
        }
        SessionEvent::ConfigReplaced { config } => println!(
            "  content loaded (contact: {}, next steps: {})",
            yes_no(config.contact.is_some()),
            yes_no(config.next_steps.is_some())
        ),
    });

    let content = settings.content.clone();
    println!("\nLoading content from {}", content.describe());
    session.apply_config(load_sam_config_or_default(content.provider().as_ref()));

    println!("\nEntering sample data");
    for (field, value) in demo_entries() {
        if let Err(err) = session.update(field, value) {
            println!("  {} rejected: {err}", field.label());
        }
    }
    session.set_industry(Industry::Finance);

    println!();
    render_dashboard(&session.result().dashboard());

    if let Some(out) = args.out {
        let issued_on = args.date.unwrap_or_else(|| Local::now().date_naive());
        let document = ReportGenerator::new(settings.branding()).generate(
            session.result(),
            session.config(),
            issued_on,
        )?;
        let location = FsReportSink::new(out).deliver(&document)?;
        println!("\nReport written to {location}");
    }
    Ok(())
}

fn demo_entries() -> Vec<(InputField, f64)> {
    vec![
        (InputField::InstalledSoftware, 1200.0),
        (InputField::LicensedSoftware, 1140.0),
        (InputField::TotalAudits, 3.0),
        (InputField::PassedAudits, 2.0),
        (InputField::BoughtLicenses, 800.0),
        (InputField::UnusedLicenses, 64.0),
        (InputField::UserCount, 950.0),
        (InputField::TotalLicenseCost, 1_050_000.0),
        (InputField::OriginalOrder, 400_000.0),
        (InputField::TrueUpCost, 24_000.0),
        (InputField::DaysStandard, 3.0),
        (InputField::DaysNew, 25.0),
    ]
}

fn render_dashboard(view: &DashboardView) {
    println!("{}", view.headline);
    println!("Health Score: {} / 100 ({})", view.total_score, view.band_label);

    println!("Modules:");
    for module in &view.modules {
        println!(
            "  - {}: {}",
            module.label,
            module.badge.unwrap_or(status_label(module.status))
        );
    }

    println!("KPIs:");
    for kpi in &view.kpis {
        println!(
            "  - {:<22} {:>12}  [{}] {}",
            kpi.label,
            kpi.formatted_value,
            status_label(kpi.status),
            kpi.message
        );
    }

    if let Some(analysis) = &view.analysis {
        println!("{analysis}");
    }
}

fn status_label(status: KpiStatus) -> &'static str {
    match status {
        KpiStatus::Green => "grün",
        KpiStatus::Yellow => "gelb",
        KpiStatus::Red => "rot",
        KpiStatus::Gray => "keine Daten",
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
