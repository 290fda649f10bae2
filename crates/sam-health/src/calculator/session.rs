//! Observable calculator session.
//!
//! The session owns the input record and the most recently loaded content
//! configuration. Every mutation recomputes the full result synchronously and
//! notifies subscribers before returning.

use super::input::{CalculatorInput, Industry, InputError, InputField};
use super::{HealthCheckResult, ScoringEngine};
use crate::content::SamConfig;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Notification delivered to subscribers after each state change.
#[derive(Debug)]
pub enum SessionEvent<'a> {
    Recomputed {
        field: Option<InputField>,
        result: &'a HealthCheckResult,
    },
    ConfigReplaced {
        config: &'a SamConfig,
    },
}

type Listener = Box<dyn FnMut(&SessionEvent<'_>) + Send>;

pub struct CalculatorSession {
    engine: ScoringEngine,
    input: CalculatorInput,
    config: SamConfig,
    result: HealthCheckResult,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl CalculatorSession {
    pub fn new(engine: ScoringEngine) -> Self {
        Self::with_input(engine, CalculatorInput::default())
    }

    pub fn with_input(engine: ScoringEngine, input: CalculatorInput) -> Self {
        let input = input.sanitized();
        let result = engine.score(&input);
        Self {
            engine,
            input,
            config: SamConfig::default(),
            result,
            listeners: Vec::new(),
            next_subscription: 1,
        }
    }

    pub fn input(&self) -> &CalculatorInput {
        &self.input
    }

    pub fn result(&self) -> &HealthCheckResult {
        &self.result
    }

    pub fn config(&self) -> &SamConfig {
        &self.config
    }

    /// Applies a raw value to one field. Rejected values leave the session
    /// unchanged and do not notify subscribers.
    pub fn update(&mut self, field: InputField, raw: f64) -> Result<&HealthCheckResult, InputError> {
        self.input.set(field, raw)?;
        self.recompute(Some(field));
        Ok(&self.result)
    }

    pub fn set_industry(&mut self, industry: Industry) -> &HealthCheckResult {
        self.input.industry = industry;
        self.recompute(None);
        &self.result
    }

    pub fn replace_input(&mut self, input: CalculatorInput) -> &HealthCheckResult {
        self.input = input.sanitized();
        self.recompute(None);
        &self.result
    }

    /// Stores a freshly loaded configuration. The last call wins; scores are
    /// unaffected since the configuration only decorates the report.
    pub fn apply_config(&mut self, config: SamConfig) {
        self.config = config;
        let event = SessionEvent::ConfigReplaced {
            config: &self.config,
        };
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&SessionEvent<'_>) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn recompute(&mut self, field: Option<InputField>) {
        self.result = self.engine.score(&self.input);
        debug!(
            field = field.map(InputField::key),
            total_score = self.result.total_score,
            "calculator recomputed"
        );

        let event = SessionEvent::Recomputed {
            field,
            result: &self.result,
        };
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}

impl Default for CalculatorSession {
    fn default() -> Self {
        Self::new(ScoringEngine::default())
    }
}

impl std::fmt::Debug for CalculatorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalculatorSession")
            .field("input", &self.input)
            .field("total_score", &self.result.total_score)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::KpiStatus;
    use crate::content::ContactInfo;
    use std::sync::{Arc, Mutex};

    #[test]
    fn update_recomputes_and_notifies() {
        let mut session = CalculatorSession::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        session.subscribe(move |event| {
            if let SessionEvent::Recomputed { field, result } = event {
                sink.lock()
                    .expect("listener mutex")
                    .push((*field, result.total_score));
            }
        });

        session
            .update(InputField::InstalledSoftware, 1000.0)
            .expect("valid");
        let result = session
            .update(InputField::LicensedSoftware, 990.0)
            .expect("valid");

        assert_eq!(result.compliance.status, KpiStatus::Green);
        let seen = seen.lock().expect("listener mutex");
        assert_eq!(
            *seen,
            vec![
                (Some(InputField::InstalledSoftware), 0),
                (Some(InputField::LicensedSoftware), 99),
            ]
        );
    }

    #[test]
    fn rejected_input_does_not_notify() {
        let mut session = CalculatorSession::default();
        let calls = Arc::new(Mutex::new(0usize));
        let counter = calls.clone();
        session.subscribe(move |_| *counter.lock().expect("counter mutex") += 1);

        assert!(session.update(InputField::DaysNew, f64::INFINITY).is_err());
        assert_eq!(*calls.lock().expect("counter mutex"), 0);
        assert_eq!(session.input().days_new, 0);
    }

    #[test]
    fn result_is_independent_of_update_order() {
        let mut forward = CalculatorSession::default();
        forward.update(InputField::BoughtLicenses, 500.0).expect("valid");
        forward.update(InputField::UnusedLicenses, 40.0).expect("valid");
        forward.set_industry(Industry::Finance);

        let mut backward = CalculatorSession::default();
        backward.set_industry(Industry::Finance);
        backward.update(InputField::UnusedLicenses, 40.0).expect("valid");
        backward.update(InputField::BoughtLicenses, 500.0).expect("valid");
        // the cap clamped unused to zero before bought was known
        backward.update(InputField::UnusedLicenses, 40.0).expect("valid");

        assert_eq!(forward.result(), backward.result());
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut session = CalculatorSession::default();
        let calls = Arc::new(Mutex::new(0usize));
        let counter = calls.clone();
        let id = session.subscribe(move |_| *counter.lock().expect("counter mutex") += 1);

        session.update(InputField::UserCount, 10.0).expect("valid");
        assert!(session.unsubscribe(id));
        assert!(!session.unsubscribe(id));
        session.update(InputField::UserCount, 20.0).expect("valid");

        assert_eq!(*calls.lock().expect("counter mutex"), 1);
    }

    #[test]
    fn later_config_replaces_earlier_one() {
        let mut session = CalculatorSession::default();
        let before = session.result().clone();

        session.apply_config(SamConfig {
            contact: Some(ContactInfo {
                name: "First".to_string(),
                ..ContactInfo::default()
            }),
            next_steps: None,
        });
        session.apply_config(SamConfig {
            contact: Some(ContactInfo {
                name: "Second".to_string(),
                ..ContactInfo::default()
            }),
            next_steps: None,
        });

        let contact = session.config().contact.as_ref().expect("contact kept");
        assert_eq!(contact.name, "Second");
        assert_eq!(session.result(), &before);
    }
}
