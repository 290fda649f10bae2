use chrono::NaiveDate;
use sam_health::calculator::{evaluate, CalculatorInput, Industry};
use sam_health::content::{ContactInfo, NextStep, NextSteps, SamConfig};
use sam_health::report::{ReportBranding, ReportGenerator};

fn critical_input() -> CalculatorInput {
    CalculatorInput {
        licensed_software: 700,
        installed_software: 1000,
        passed_audits: 0,
        total_audits: 2,
        unused_licenses: 400,
        bought_licenses: 1000,
        total_license_cost: 2_000_000.0,
        user_count: 1000,
        industry: Industry::Other,
        true_up_cost: 50_000.0,
        original_order: 100_000.0,
        days_standard: 30,
        days_new: 90,
    }
}

fn full_config() -> SamConfig {
    SamConfig {
        contact: Some(ContactInfo {
            title: "Ihr Ansprechpartner".to_string(),
            name: "Jana Berger".to_string(),
            role: "Senior SAM Consultant".to_string(),
            email: "jana.berger@example.com".to_string(),
            phone: "+49 89 123456".to_string(),
            image: None,
        }),
        next_steps: Some(NextSteps {
            title: "So geht es weiter".to_string(),
            steps: vec![
                NextStep {
                    title: "Erstgespräch".to_string(),
                    description: "Wir besprechen Ihre Ergebnisse in 30 Minuten.".to_string(),
                },
                NextStep {
                    title: "Lizenz-Review".to_string(),
                    description: String::new(),
                },
            ],
        }),
    }
}

#[test]
fn critical_report_carries_every_section() {
    let result = evaluate(&critical_input());
    let issued_on = NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid date");

    let document = ReportGenerator::default()
        .generate(&result, &full_config(), issued_on)
        .expect("report renders");
    let text = String::from_utf8_lossy(&document.bytes);

    assert_eq!(document.file_name, "Novartum_SAM_Report.pdf");
    assert!(text.contains("(novartum)"));
    assert!(text.contains("(SAM Health Check)"));
    assert!(text.contains(&format!("(Health Score: {} / 100)", result.total_score)));
    assert!(text.contains("(Kritischer Handlungsbedarf)"));
    // red banner
    assert!(text.contains("0.937 0.267 0.267 rg"));
    assert!(text.contains("(Kritisches Compliance-Gap.)"));
    assert!(text.contains("(Hohe Kapitalbindung \\(Waste\\).)"));
    assert!(text.contains("(2.000\\240\\200)"));
    assert!(text.contains("(30 / 90 Tage)"));
    assert!(text.contains("(Senior SAM Consultant)"));
    assert!(text.contains("(So geht es weiter)"));
    assert!(text.contains("(1. Erstgespr\\344ch)"));
    assert!(text.contains("(2. Lizenz-Review)"));
}

#[test]
fn custom_brand_changes_file_name_and_footer() {
    let generator = ReportGenerator::new(ReportBranding {
        name: "Acme Consulting".to_string(),
        website: "www.acme.example".to_string(),
        email: "hello@acme.example".to_string(),
    });
    let issued_on = NaiveDate::from_ymd_opt(2026, 1, 2).expect("valid date");

    let document = generator
        .generate(&evaluate(&critical_input()), &SamConfig::default(), issued_on)
        .expect("report renders");
    let text = String::from_utf8_lossy(&document.bytes);

    assert_eq!(document.file_name, "Acme_Consulting_SAM_Report.pdf");
    assert!(text.contains("(acme consulting)"));
    assert!(text.contains("(www.acme.example | hello@acme.example)"));
    assert!(text.contains("(Erstellt am: 02.01.2026)"));
}

#[test]
fn rendering_is_deterministic() {
    let result = evaluate(&critical_input());
    let issued_on = NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid date");
    let generator = ReportGenerator::default();

    let first = generator
        .generate(&result, &full_config(), issued_on)
        .expect("report renders");
    let second = generator
        .generate(&result, &full_config(), issued_on)
        .expect("report renders");

    assert_eq!(first, second);
}
