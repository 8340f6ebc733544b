//! Contact form submission.
//!
//! Sending happens on a worker thread so the UI keeps animating; the result
//! comes back over a channel and is picked up by [`ContactForm::poll`].

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use folio_core::{
    ContactField, ContactFields, FieldError, NETWORK_ERROR_MESSAGE, STATUS_ERROR_MESSAGE,
    SUCCESS_MESSAGE, SubmitStatus,
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::analytics::{self, ContactAction};

/// Why a submission failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The request never got a response.
    #[error("network error: {0}")]
    Network(String),
    /// The endpoint answered with a non-success status.
    #[error("endpoint returned status {0}")]
    Status(u16),
}

impl SubmitError {
    /// Message shown to the visitor.
    pub fn user_message(&self) -> &'static str {
        match self {
            SubmitError::Network(_) => NETWORK_ERROR_MESSAGE,
            SubmitError::Status(_) => STATUS_ERROR_MESSAGE,
        }
    }
}

/// Delivers a url-encoded form to an endpoint.
pub trait FormTransport: Send + Sync {
    fn submit(&self, endpoint: &str, fields: &[(&str, &str)]) -> Result<(), SubmitError>;
}

/// HTTP transport backed by a `ureq` agent.
#[derive(Debug)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl FormTransport for UreqTransport {
    fn submit(&self, endpoint: &str, fields: &[(&str, &str)]) -> Result<(), SubmitError> {
        match self
            .agent
            .post(endpoint)
            .header("Accept", "application/json")
            .send_form(fields.iter().copied())
        {
            Ok(_) => Ok(()),
            Err(ureq::Error::StatusCode(code)) => Err(SubmitError::Status(code)),
            Err(e) => Err(SubmitError::Network(e.to_string())),
        }
    }
}

/// Form state: field values, focus, and where the last submission stands.
pub struct ContactForm {
    fields: ContactFields,
    focus: ContactField,
    status: SubmitStatus,
    endpoint: Option<String>,
    transport: Arc<dyn FormTransport>,
    inflight: Option<Receiver<Result<(), SubmitError>>>,
}

impl std::fmt::Debug for ContactForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactForm")
            .field("fields", &self.fields)
            .field("focus", &self.focus)
            .field("status", &self.status)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl ContactForm {
    pub fn new(endpoint: Option<String>, transport: Arc<dyn FormTransport>) -> Self {
        Self {
            fields: ContactFields::default(),
            focus: ContactField::default(),
            status: SubmitStatus::Idle,
            endpoint,
            transport,
            inflight: None,
        }
    }

    pub fn fields(&self) -> &ContactFields {
        &self.fields
    }

    pub fn focus(&self) -> ContactField {
        self.focus
    }

    pub fn status(&self) -> &SubmitStatus {
        &self.status
    }

    pub fn has_endpoint(&self) -> bool {
        self.endpoint.is_some()
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn insert_char(&mut self, c: char) {
        if self.status.is_sending() {
            return;
        }
        self.fields.get_mut(self.focus).push(c);
    }

    pub fn backspace(&mut self) {
        if self.status.is_sending() {
            return;
        }
        self.fields.get_mut(self.focus).pop();
    }

    /// Start sending the form.
    ///
    /// Ignored while a submission is in flight. Validation failures are
    /// reported through the status without contacting the endpoint.
    pub fn submit(&mut self) {
        if self.status.is_sending() {
            return;
        }
        if let Err(err) = self.fields.validate() {
            self.status = SubmitStatus::Error(validation_message(&err));
            return;
        }
        let Some(endpoint) = self.endpoint.clone() else {
            self.status = SubmitStatus::Error(
                "No contact endpoint configured; set [contact].endpoint in config.toml."
                    .to_string(),
            );
            return;
        };

        analytics::contact_form(ContactAction::Submit);
        self.status = SubmitStatus::Sending;

        let pairs = self.fields.form_pairs();
        let transport = Arc::clone(&self.transport);
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let borrowed: Vec<(&str, &str)> =
                pairs.iter().map(|(k, v)| (*k, v.as_str())).collect();
            let result = transport.submit(&endpoint, &borrowed);
            // The form may have been dropped in the meantime.
            let _ = tx.send(result);
        });
        self.inflight = Some(rx);
    }

    /// Pick up a finished submission. Returns `true` when the status changed.
    pub fn poll(&mut self) -> bool {
        let Some(rx) = self.inflight.as_ref() else {
            return false;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => {
                Err(SubmitError::Network("worker exited".to_string()))
            }
        };
        self.inflight = None;
        self.finish(result);
        true
    }

    /// Block until the in-flight submission finishes.
    #[cfg(test)]
    fn wait(&mut self) {
        if let Some(rx) = self.inflight.take() {
            let result = rx
                .recv()
                .unwrap_or_else(|_| Err(SubmitError::Network("worker exited".to_string())));
            self.finish(result);
        }
    }

    fn finish(&mut self, result: Result<(), SubmitError>) {
        match result {
            Ok(()) => {
                debug!("contact form delivered");
                analytics::contact_form(ContactAction::Success);
                self.fields.clear();
                self.focus = ContactField::default();
                self.status = SubmitStatus::Success(SUCCESS_MESSAGE.to_string());
            }
            Err(err) => {
                warn!(error = %err, "contact form failed");
                analytics::contact_form(ContactAction::Error);
                self.status = SubmitStatus::Error(err.user_message().to_string());
            }
        }
    }
}

fn validation_message(err: &FieldError) -> String {
    match err {
        FieldError::Missing(label) => format!("{label} is required."),
        FieldError::InvalidEmail => "Please enter a valid email address.".to_string(),
    }
}
