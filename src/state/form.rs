// src/state/form.rs
use std::path::Path;

use tracing::{debug, warn};

use crate::api::{AnalysisRequest, InputType, ValidationRequest};
use crate::file::read_text_file;
use crate::state::notice::Notice;

/// Input form of the Validador screen.
#[derive(Debug, Clone)]
pub struct InputForm {
    pub source: String,
    pub input_type: InputType,
    pub auto_correct: bool,
    pub with_report: bool,
    pub suggestions: bool,
    pub upload_notice: Option<Notice>,
}

impl Default for InputForm {
    fn default() -> Self {
        Self {
            source: String::new(),
            input_type: InputType::Auto,
            auto_correct: true,
            with_report: false,
            suggestions: true,
            upload_notice: None,
        }
    }
}

impl InputForm {
    pub fn can_submit(&self) -> bool {
        !self.source.trim().is_empty()
    }

    pub fn analysis_request(&self) -> AnalysisRequest {
        AnalysisRequest::new(self.source.clone())
            .with_input_type(self.input_type)
            .with_auto_correct(self.auto_correct)
    }

    pub fn validation_request(&self) -> ValidationRequest {
        ValidationRequest::new(self.source.clone()).with_suggestions(self.suggestions)
    }

    /// Replaces the source with the file contents. On failure the source is
    /// left as it was and the error goes to the inline notice.
    pub fn load_file(&mut self, path: &Path) {
        match read_text_file(path) {
            Ok(text) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                debug!(file = %name, "source replaced from file");
                self.source = text;
                self.upload_notice = Some(Notice::info(format!("Archivo cargado: {}", name)));
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "upload rejected");
                self.upload_notice = Some(Notice::error(e.to_string()));
            }
        }
    }

    pub fn expire_notices(&mut self) {
        if self.upload_notice.as_ref().is_some_and(Notice::is_expired) {
            self.upload_notice = None;
        }
    }
}
