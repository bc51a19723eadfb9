//! Generic form controller.
//!
//! The original UI repeated the same controlled-form logic for clients,
//! processes, and technicians: a draft record, per-field errors cleared on
//! edit, a synchronous `validate` pass, and a submit path that aborts
//! silently on validation errors and disables itself while a persistence
//! call is outstanding. Here that pattern is one controller parameterized
//! by a field schema; each entity contributes a schema declaration and a
//! `FormDraft` impl (see `model`).

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// How a field is rendered and validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Date,
    Select,
    TextArea,
    /// Integer amount in currency minor units; formatted input is accepted
    /// and non-digits are stripped on assignment.
    Currency,
}

/// One entry of a per-entity field schema.
///
/// `required` carries the inline message shown when the field is empty at
/// submit time (`None` for optional fields).
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: Option<&'static str>,
}

/// Field name → inline message. Validation failures are data, not `Err`.
pub type ValidationErrors = BTreeMap<&'static str, String>;

/// Errors from assigning a single form field.
#[derive(Debug, Error, PartialEq)]
pub enum FieldError {
    #[error("campo desconhecido: {0}")]
    UnknownField(String),

    #[error("valor inválido para {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

/// A draft record editable field-by-field through its schema.
pub trait FormDraft: Clone + Default {
    fn schema() -> &'static [FieldSpec];

    /// Current textual value of a field, `None` for unknown field names.
    fn get(&self, field: &str) -> Option<String>;

    /// Assign one field from its textual form value.
    fn set(&mut self, field: &str, value: &str) -> Result<(), FieldError>;
}

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

/// Run the schema checks against a draft. Pure: mutates nothing.
///
/// Required fields must be non-empty after trimming; email fields are
/// format-checked only when non-empty (email stays optional).
pub fn validate<D: FormDraft>(draft: &D) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for spec in D::schema() {
        let value = draft.get(spec.name).unwrap_or_default();
        if let Some(message) = spec.required {
            if value.trim().is_empty() {
                errors.insert(spec.name, message.to_string());
                continue;
            }
        }
        if spec.kind == FieldKind::Email && !value.is_empty() && !EMAIL_RE.is_match(&value) {
            errors.insert(spec.name, "Email inválido".to_string());
        }
    }
    errors
}

/// Result of a submit attempt.
#[derive(Debug, PartialEq)]
pub enum SubmitOutcome<R> {
    /// Validation passed and the persistence callback completed.
    Saved(R),
    /// Validation failed; errors were recorded on the controller and the
    /// persistence callback was never invoked.
    Rejected,
    /// A previous submit is still outstanding. Mirrors the disabled state
    /// the submit button shows while a save is in flight; `submit` taking
    /// `&mut self` means straight-line callers can never race themselves
    /// into this, so it only signals a re-entrant call.
    Busy,
}

/// Per-entity controlled-form state: a draft, its inline errors, and the
/// in-flight guard. Persistence is injected into `submit`; the controller
/// never talks to the store directly.
#[derive(Debug, Clone)]
pub struct FormController<D: FormDraft> {
    draft: D,
    errors: ValidationErrors,
    submitting: bool,
}

impl<D: FormDraft> Default for FormController<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: FormDraft> FormController<D> {
    /// Start from the all-empty template (create flow).
    pub fn new() -> Self {
        Self::with_draft(D::default())
    }

    /// Start from an existing record's field values (edit flow).
    pub fn with_draft(draft: D) -> Self {
        Self {
            draft,
            errors: ValidationErrors::new(),
            submitting: false,
        }
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Update one field and clear any existing error on it.
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), FieldError> {
        self.draft.set(field, value)?;
        self.errors.remove(field);
        Ok(())
    }

    /// Run validation without touching controller state.
    pub fn validate(&self) -> ValidationErrors {
        validate(&self.draft)
    }

    /// Re-validate and, if clean, run the persistence callback with a copy
    /// of the draft. On validation errors the submit aborts silently: the
    /// errors surface through `errors()` and `persist` is never called.
    /// Errors from `persist` itself propagate to the caller unchanged.
    pub async fn submit<F, Fut, R, E>(&mut self, persist: F) -> Result<SubmitOutcome<R>, E>
    where
        F: FnOnce(D) -> Fut,
        Fut: Future<Output = Result<R, E>>,
    {
        if self.submitting {
            return Ok(SubmitOutcome::Busy);
        }
        let errors = self.validate();
        if !errors.is_empty() {
            self.errors = errors;
            return Ok(SubmitOutcome::Rejected);
        }
        self.submitting = true;
        let result = persist(self.draft.clone()).await;
        self.submitting = false;
        match result {
            Ok(record) => Ok(SubmitOutcome::Saved(record)),
            Err(e) => Err(e),
        }
    }
}

/// Strip non-digit characters from formatted currency input; empty input
/// clears the amount.
pub(crate) fn parse_currency(value: &str) -> Option<u64> {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClientDraft, ProcessDraft};

    #[test]
    fn validate_flags_missing_required_fields() {
        let draft = ClientDraft::default();
        let errors = validate(&draft);
        assert_eq!(errors.get("name").map(String::as_str), Some("Nome é obrigatório"));
        assert_eq!(
            errors.get("document").map(String::as_str),
            Some("CPF/CNPJ é obrigatório")
        );
        // Email is optional: no error when empty.
        assert!(!errors.contains_key("email"));
    }

    #[test]
    fn validate_accepts_optional_empty_email_but_rejects_bad_format() {
        let mut draft = ClientDraft::default();
        draft.name = "Foo".into();
        draft.document = "111".into();
        assert!(validate(&draft).is_empty());

        draft.email = "not-an-email".into();
        let errors = validate(&draft);
        assert_eq!(errors.get("email").map(String::as_str), Some("Email inválido"));
    }

    #[test]
    fn validate_treats_whitespace_as_empty() {
        let mut draft = ClientDraft::default();
        draft.name = "   ".into();
        draft.document = "111".into();
        let errors = validate(&draft);
        assert!(errors.contains_key("name"));
    }

    #[test]
    fn required_process_fields_are_independent() {
        let mut draft = ProcessDraft::default();
        let errors = validate(&draft);
        for field in [
            "processNumber",
            "protocolDate",
            "processType",
            "object",
            "municipality",
        ] {
            assert!(errors.contains_key(field), "missing error for {field}");
        }

        // Fixing one field leaves the others still blocking.
        draft.process_number = "PROC-2024-010".into();
        let errors = validate(&draft);
        assert!(!errors.contains_key("processNumber"));
        assert!(errors.contains_key("protocolDate"));
        assert!(errors.contains_key("municipality"));
    }

    #[test]
    fn set_field_clears_existing_error() {
        let mut form = FormController::<ClientDraft>::new();
        // Force errors in by attempting a submit on an empty draft.
        let outcome = futures_block(form.submit(|_d| async {
            Ok::<_, std::convert::Infallible>(())
        }));
        assert_eq!(outcome.unwrap(), SubmitOutcome::Rejected);
        assert!(form.error("name").is_some());

        form.set_field("name", "Empresa ABC Ltda").unwrap();
        assert!(form.error("name").is_none());
        // Untouched field keeps its error.
        assert!(form.error("document").is_some());
    }

    #[test]
    fn submit_invokes_callback_only_when_valid() {
        let mut form = FormController::<ClientDraft>::new();
        form.set_field("name", "Foo").unwrap();
        form.set_field("document", "111").unwrap();

        let outcome = futures_block(form.submit(|draft| async move {
            assert_eq!(draft.name, "Foo");
            Ok::<_, std::convert::Infallible>(draft.name)
        }))
        .unwrap();
        assert_eq!(outcome, SubmitOutcome::Saved("Foo".to_string()));
        assert!(!form.is_submitting());
    }

    #[test]
    fn submit_propagates_persistence_errors() {
        let mut form = FormController::<ClientDraft>::new();
        form.set_field("name", "Foo").unwrap();
        form.set_field("document", "111").unwrap();

        let result = futures_block(form.submit(|_d| async { Err::<(), _>("boom") }));
        assert_eq!(result.unwrap_err(), "boom");
        assert!(!form.is_submitting());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let mut form = FormController::<ClientDraft>::new();
        let err = form.set_field("nope", "x").unwrap_err();
        assert_eq!(err, FieldError::UnknownField("nope".to_string()));
    }

    #[test]
    fn parse_currency_strips_formatting() {
        assert_eq!(parse_currency("R$ 150.000"), Some(150_000));
        assert_eq!(parse_currency("25000"), Some(25_000));
        assert_eq!(parse_currency(""), None);
        assert_eq!(parse_currency("R$ "), None);
    }

    /// Drive a future to completion on a throwaway runtime; the form tests
    /// have no timers so a current-thread runtime is enough.
    fn futures_block<F: Future>(fut: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(fut)
    }
}
