//! Event handling and progress display

use console::{Style, Term};
use retrial_events::{AppEvent, GeneralEvent, VerificationEvent};

/// Event handler for progress display and user feedback
///
/// Progress goes to stderr so stdout only ever carries the final result.
pub struct EventHandler {
    term: Term,
    colors_enabled: bool,
    debug_enabled: bool,
    quiet: bool,
}

impl EventHandler {
    /// Create new event handler; a quiet handler only logs
    pub fn new(colors_enabled: bool, debug_enabled: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            colors_enabled,
            debug_enabled,
            quiet,
        }
    }

    /// Handle incoming event
    pub fn handle_event(&mut self, event: AppEvent) {
        crate::logging::log_event_with_tracing(&event);

        if self.quiet {
            return;
        }

        if let Some(line) = self.format_event(&event) {
            let _ = self.term.write_line(&line);
        }
    }

    /// Console line for an event, if it is shown at the current verbosity
    fn format_event(&self, event: &AppEvent) -> Option<String> {
        match event {
            AppEvent::Verification(verification) => self.format_verification(verification),
            AppEvent::General(general) => self.format_general(general),
        }
    }

    fn format_verification(&self, event: &VerificationEvent) -> Option<String> {
        match event {
            VerificationEvent::Started { operation, .. } => Some(match operation.as_str() {
                "record" => self.status("Recording dependency checksums"),
                _ => self.status("Verifying dependencies"),
            }),
            VerificationEvent::DependenciesFetched { live, saved, .. } => Some(self.detail(
                &format!("{live} live, {saved} recorded"),
            )),
            VerificationEvent::DependencyHashed { key, hash, .. } if self.debug_enabled => {
                Some(self.detail(&format!("{key} {}", hash.short())))
            }
            // Outcomes are rendered once by the output renderer.
            VerificationEvent::DependencyHashed { .. }
            | VerificationEvent::Succeeded { .. }
            | VerificationEvent::Failed { .. }
            | VerificationEvent::Recorded { .. } => None,
        }
    }

    fn format_general(&self, event: &GeneralEvent) -> Option<String> {
        match event {
            GeneralEvent::Warning { message, context } => {
                let text = match context {
                    Some(context) => format!("{message} ({context})"),
                    None => message.clone(),
                };
                Some(self.warning(&text))
            }
            GeneralEvent::DebugLog { message, .. } if self.debug_enabled => {
                Some(self.detail(message))
            }
            GeneralEvent::OperationStarted { operation } if self.debug_enabled => {
                Some(self.detail(&format!("{operation} started")))
            }
            GeneralEvent::OperationCompleted { operation, success } if self.debug_enabled => {
                Some(self.detail(&format!("{operation} completed (success: {success})")))
            }
            GeneralEvent::OperationFailed { operation, failure } if self.debug_enabled => {
                Some(self.detail(&format!("{operation} failed: {}", failure.message)))
            }
            _ => None,
        }
    }

    fn status(&self, message: &str) -> String {
        self.paint(&Style::new().cyan().bold(), message)
    }

    fn detail(&self, message: &str) -> String {
        format!("  {}", self.paint(&Style::new().dim(), message))
    }

    fn warning(&self, message: &str) -> String {
        self.paint(&Style::new().yellow(), &format!("warning: {message}"))
    }

    fn paint(&self, style: &Style, text: &str) -> String {
        if self.colors_enabled {
            style.apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }
}
