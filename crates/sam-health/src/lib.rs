//! SAM health check: scores software-asset-management KPIs, renders the
//! branded PDF report and captures sales leads.

pub mod calculator;
pub mod config;
pub mod content;
pub mod error;
mod http_client;
pub mod leads;
pub mod report;
pub mod service;
pub mod telemetry;
