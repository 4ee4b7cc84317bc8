// src/state/mod.rs
use std::collections::BTreeSet;
use std::io;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::api::{ApiClient, ValidationReport};
use crate::projection::validation::LayerView;
use crate::state::dispatch::{Completion, Dispatcher};
use crate::state::form::InputForm;
use crate::state::session::SessionStore;

pub mod dispatch;
pub mod form;
pub mod notice;
pub mod session;

// Modal tracking
#[derive(Debug, Clone, PartialEq)]
pub enum DialogState {
    None,
    LayerErrors { title: String, errors: Vec<String> },
}

// Screen/tab tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Validator,
    Costs,
    Bounds,
    Results,
}

impl Screen {
    pub const ALL: [Screen; 4] = [Screen::Validator, Screen::Costs, Screen::Bounds, Screen::Results];

    pub fn label(&self) -> &'static str {
        match self {
            Screen::Validator => "Validador",
            Screen::Costs => "Costos",
            Screen::Bounds => "Cotas",
            Screen::Results => "Resultados",
        }
    }
}

/// Validator response kept by the Validador screen, valid only for the
/// stored result it was taken next to.
#[derive(Debug, Clone)]
pub struct QuickValidation {
    pub generation: u64,
    pub report: ValidationReport,
}

#[derive(Debug, Default)]
pub struct ValidatorPage {
    pub form: InputForm,
    pub quick: Option<QuickValidation>,
    pub pending_validation: Option<Uuid>,
}

#[derive(Debug, Default)]
pub struct CostsPage {
    pub expanded: BTreeSet<String>,
}

#[derive(Debug, Default)]
pub struct BoundsPage {
    pub expanded: [bool; 3],
}

#[derive(Debug, Default)]
pub struct ResultsPage {
    pub show_divergences: bool,
    pub show_corrected_source: bool,
}

// Core application state
#[derive(Debug)]
pub struct AppState {
    pub session: SessionStore,
    pub dispatcher: Dispatcher,

    pub current_screen: Screen,
    pub current_dialog: DialogState,
    pub error_message: Option<String>,
    /// Id of the analysis the loading flag belongs to.
    pub pending_analysis: Option<Uuid>,

    // Page-local state, dropped when leaving the page
    pub validator: ValidatorPage,
    pub costs: CostsPage,
    pub bounds: BoundsPage,
    pub results: ResultsPage,
}

impl AppState {
    pub fn new(client: ApiClient) -> io::Result<Self> {
        Ok(Self {
            session: SessionStore::new(),
            dispatcher: Dispatcher::new(client)?,
            current_screen: Screen::Validator,
            current_dialog: DialogState::None,
            error_message: None,
            pending_analysis: None,
            validator: ValidatorPage::default(),
            costs: CostsPage::default(),
            bounds: BoundsPage::default(),
            results: ResultsPage::default(),
        })
    }

    pub fn navigate(&mut self, screen: Screen) {
        if screen == self.current_screen {
            return;
        }
        match self.current_screen {
            Screen::Validator => self.validator = ValidatorPage::default(),
            Screen::Costs => self.costs = CostsPage::default(),
            Screen::Bounds => self.bounds = BoundsPage::default(),
            Screen::Results => self.results = ResultsPage::default(),
        }
        self.current_dialog = DialogState::None;
        debug!(from = ?self.current_screen, to = ?screen, "navigate");
        self.current_screen = screen;
    }

    /// ANALIZAR is live only when nothing is in flight and there is input.
    pub fn can_analyze(&self) -> bool {
        !self.session.is_loading() && self.validator.form.can_submit()
    }

    pub fn can_validate(&self) -> bool {
        self.validator.pending_validation.is_none() && self.validator.form.can_submit()
    }

    /// Sends the form to the analyzer. Refused while another analysis is in
    /// flight.
    pub fn start_analysis(&mut self) -> bool {
        if self.session.is_loading() {
            debug!("analysis already in flight");
            return false;
        }
        if !self.validator.form.can_submit() {
            return false;
        }

        let form = &self.validator.form;
        self.session.set_loading(true);
        let request_id = self
            .dispatcher
            .analyze(form.analysis_request(), form.with_report);
        self.pending_analysis = Some(request_id);
        true
    }

    pub fn start_validation(&mut self) -> bool {
        if !self.can_validate() {
            return false;
        }
        let request_id = self
            .dispatcher
            .validate(self.validator.form.validation_request());
        self.validator.pending_validation = Some(request_id);
        true
    }

    /// Applies every finished request. Call once per frame.
    pub fn pump(&mut self) {
        while let Some(completion) = self.dispatcher.poll() {
            debug!(request_id = %completion.request_id(), "completion received");
            self.apply(completion);
        }
    }

    fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::Analysis { request_id, outcome } => {
                if self.pending_analysis != Some(request_id) {
                    debug!(%request_id, "analysis response from a discarded session");
                    return;
                }
                self.pending_analysis = None;
                self.session.set_loading(false);
                match outcome {
                    Ok(result) => {
                        info!(%request_id, phase = ?result.current_phase, "result stored");
                        self.session.set_result(Some(result));
                    }
                    Err(e) => {
                        warn!(
                            %request_id,
                            network = e.is_network(),
                            status = ?e.status(),
                            error = %e,
                            "analysis error shown to user"
                        );
                        self.error_message = Some(format!("Error al analizar: {}", e));
                    }
                }
            }
            Completion::Validation { request_id, outcome } => {
                if self.validator.pending_validation != Some(request_id) {
                    debug!(%request_id, "validation response no longer needed");
                    return;
                }
                self.validator.pending_validation = None;
                match outcome {
                    Ok(report) => {
                        self.validator.quick = Some(QuickValidation {
                            generation: self.session.generation(),
                            report,
                        });
                    }
                    Err(e) => {
                        warn!(%request_id, error = %e, "validation error shown to user");
                        self.error_message = Some(format!("Error al validar: {}", e));
                    }
                }
            }
        }
    }

    /// The last quick validation, unless an analysis result replaced it.
    pub fn quick_validation(&self) -> Option<&ValidationReport> {
        self.validator
            .quick
            .as_ref()
            .filter(|quick| quick.generation == self.session.generation())
            .map(|quick| &quick.report)
    }

    pub fn open_layer_errors(&mut self, layer: &LayerView) {
        if let Some((title, errors)) = layer.errors_dialog() {
            self.current_dialog = DialogState::LayerErrors { title, errors };
        }
    }

    /// "Nuevo análisis": back to an empty session.
    pub fn reset(&mut self) {
        info!("session reset");
        self.session.clear();
        self.pending_analysis = None;
        self.validator = ValidatorPage::default();
        self.costs = CostsPage::default();
        self.bounds = BoundsPage::default();
        self.results = ResultsPage::default();
        self.current_dialog = DialogState::None;
        self.error_message = None;
        self.current_screen = Screen::Validator;
    }
}
