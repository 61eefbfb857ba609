use std::cell::RefCell;

use futures::executor::block_on;

use super::*;
use crate::contact::SimulatedSubmitter;
use crate::contact::feedback;
use crate::page::{MemoryPage, NodeId};
use crate::testing::{Portfolio, SUBMIT_LABEL_HTML, portfolio};

// =============================================================
// Helpers
// =============================================================

fn form_of(fx: &Portfolio) -> FormElements {
    FormElements {
        form: fx.form,
        name: fx.name,
        email: fx.email,
        phone: fx.phone,
        message: fx.message,
        submit: fx.submit,
    }
}

/// Submitter that snapshots the form while "in flight".
struct Recorder<'a> {
    page: &'a MemoryPage,
    form: FormElements,
    result: Result<Receipt, SubmitError>,
    seen_disabled: RefCell<Option<bool>>,
    seen_label: RefCell<Option<String>>,
    nested: RefCell<Option<FormOutcome>>,
    calls: RefCell<Vec<crate::contact::ContactSubmission>>,
}

impl<'a> Recorder<'a> {
    fn new(page: &'a MemoryPage, form: FormElements, result: Result<Receipt, SubmitError>) -> Self {
        Self {
            page,
            form,
            result,
            seen_disabled: RefCell::new(None),
            seen_label: RefCell::new(None),
            nested: RefCell::new(None),
            calls: RefCell::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl Submitter for Recorder<'_> {
    async fn submit(&self, submission: &crate::contact::ContactSubmission) -> Result<Receipt, SubmitError> {
        self.calls.borrow_mut().push(submission.clone());
        *self.seen_disabled.borrow_mut() = Some(self.page.is_disabled(self.form.submit));
        *self.seen_label.borrow_mut() = Some(self.page.inner_html(self.form.submit));
        let nested = super::submit(self.page, &self.form, &SimulatedSubmitter::default()).await;
        *self.nested.borrow_mut() = Some(nested);
        self.result.clone()
    }
}

fn ok_receipt() -> Result<Receipt, SubmitError> {
    Ok(Receipt { message: consts::SUCCESS_MESSAGE.to_owned() })
}

fn status_text(fx: &Portfolio) -> String {
    let region: NodeId = feedback::region(&fx.page, fx.form);
    fx.page.text(region)
}

// =============================================================
// Success path
// =============================================================

#[test]
fn valid_submission_locks_then_restores_form() {
    let fx = portfolio();
    let form = form_of(&fx);
    fx.fill("Ada", "ada@example.com", "", "Hello!");
    let recorder = Recorder::new(&fx.page, form, ok_receipt());

    let outcome = block_on(submit(&fx.page, &form, &recorder));

    assert_eq!(outcome, FormOutcome::Sent(Receipt { message: consts::SUCCESS_MESSAGE.to_owned() }));
    assert_eq!(*recorder.seen_disabled.borrow(), Some(true));
    assert_eq!(recorder.seen_label.borrow().as_deref(), Some(consts::LOADING_LABEL_HTML));

    assert!(!fx.page.is_disabled(fx.submit));
    assert_eq!(fx.page.inner_html(fx.submit), SUBMIT_LABEL_HTML);
    for field in [fx.name, fx.email, fx.phone, fx.message] {
        assert_eq!(fx.page.value(field), "");
    }
    assert_eq!(status_text(&fx), consts::SUCCESS_MESSAGE);
    let region = feedback::region(&fx.page, fx.form);
    assert!(fx.page.has_class(region, "form-status--success"));
    assert_eq!(fx.page.attribute(region, "data-error-code"), None);
}

#[test]
fn submitter_receives_trimmed_values() {
    let fx = portfolio();
    let form = form_of(&fx);
    fx.fill("  Ada ", " ada@example.com ", " 555 123 4567 ", " Hi ");
    let recorder = Recorder::new(&fx.page, form, ok_receipt());

    block_on(submit(&fx.page, &form, &recorder));

    let calls = recorder.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].name, "Ada");
    assert_eq!(calls[0].phone.as_deref(), Some("555 123 4567"));
}

#[test]
fn second_submit_while_in_flight_is_busy() {
    let fx = portfolio();
    let form = form_of(&fx);
    fx.fill("Ada", "ada@example.com", "", "Hello!");
    let recorder = Recorder::new(&fx.page, form, ok_receipt());

    block_on(submit(&fx.page, &form, &recorder));

    assert_eq!(*recorder.nested.borrow(), Some(FormOutcome::Busy));
    assert_eq!(recorder.calls.borrow().len(), 1);
}

#[test]
fn simulated_submitter_succeeds() {
    let fx = portfolio();
    let form = form_of(&fx);
    fx.fill("Ada", "ada@example.com", "+1 (555) 123-4567", "Hello!");

    let outcome = block_on(submit(&fx.page, &form, &SimulatedSubmitter::default()));

    assert!(matches!(outcome, FormOutcome::Sent(_)));
    assert_eq!(fx.page.value(fx.message), "");
}

// =============================================================
// Validation failures
// =============================================================

#[test]
fn invalid_email_never_disables_submit() {
    let fx = portfolio();
    let form = form_of(&fx);
    fx.fill("Ada", "ada-at-example.com", "", "Hello!");
    let recorder = Recorder::new(&fx.page, form, ok_receipt());

    let outcome = block_on(submit(&fx.page, &form, &recorder));

    assert_eq!(outcome, FormOutcome::Rejected(ValidationError::InvalidEmail));
    assert!(recorder.calls.borrow().is_empty());
    assert!(recorder.seen_disabled.borrow().is_none());
    assert!(!fx.page.is_disabled(fx.submit));
    assert_eq!(fx.page.inner_html(fx.submit), SUBMIT_LABEL_HTML);
    assert_eq!(fx.page.value(fx.email), "ada-at-example.com");
}

#[test]
fn rejection_renders_inline_error_and_marks_fields() {
    let fx = portfolio();
    let form = form_of(&fx);
    fx.fill("", "ada@example.com", "", "");

    block_on(submit(&fx.page, &form, &SimulatedSubmitter::default()));

    let region = feedback::region(&fx.page, fx.form);
    assert_eq!(fx.page.text(region), "Please fill in all required fields.");
    assert!(fx.page.has_class(region, "form-status--error"));
    assert_eq!(fx.page.attribute(region, "data-error-code").as_deref(), Some("E_MISSING_FIELD"));
    assert_eq!(fx.page.attribute(region, "role").as_deref(), Some("status"));
    assert!(fx.page.has_class(fx.name, "field-invalid"));
    assert!(fx.page.has_class(fx.message, "field-invalid"));
    assert_eq!(fx.page.attribute(fx.message, "aria-invalid").as_deref(), Some("true"));
    assert!(!fx.page.has_class(fx.email, "field-invalid"));
}

#[test]
fn short_phone_is_rejected() {
    let fx = portfolio();
    let form = form_of(&fx);
    fx.fill("Ada", "ada@example.com", "555-1234", "Hello!");

    let outcome = block_on(submit(&fx.page, &form, &SimulatedSubmitter::default()));

    assert_eq!(outcome, FormOutcome::Rejected(ValidationError::InvalidPhone));
    assert!(fx.page.has_class(fx.phone, "field-invalid"));
}

#[test]
fn next_attempt_clears_previous_markers() {
    let fx = portfolio();
    let form = form_of(&fx);
    fx.fill("", "ada@example.com", "", "Hello!");
    block_on(submit(&fx.page, &form, &SimulatedSubmitter::default()));
    assert!(fx.page.has_class(fx.name, "field-invalid"));

    fx.page.set_value(fx.name, "Ada");
    let outcome = block_on(submit(&fx.page, &form, &SimulatedSubmitter::default()));

    assert!(matches!(outcome, FormOutcome::Sent(_)));
    assert!(!fx.page.has_class(fx.name, "field-invalid"));
    assert_eq!(fx.page.attribute(fx.name, "aria-invalid"), None);
    let region = feedback::region(&fx.page, fx.form);
    assert!(!fx.page.has_class(region, "form-status--error"));
}

#[test]
fn status_region_is_reused() {
    let fx = portfolio();
    let form = form_of(&fx);
    block_on(submit(&fx.page, &form, &SimulatedSubmitter::default()));
    block_on(submit(&fx.page, &form, &SimulatedSubmitter::default()));
    let regions = fx.page.query_all(&crate::page::Selector::parse(".form-status").unwrap());
    assert_eq!(regions.len(), 1);
}

#[test]
fn page_provided_status_region_is_used() {
    let fx = portfolio();
    let form = form_of(&fx);
    let own = fx.page.append_element(fx.page.body(), "p", &[("id", "contactForm-status")]);
    block_on(submit(&fx.page, &form, &SimulatedSubmitter::default()));
    assert_eq!(fx.page.text(own), "Please fill in all required fields.");
}

// =============================================================
// Delivery failure
// =============================================================

#[test]
fn delivery_failure_keeps_values_and_unlocks() {
    let fx = portfolio();
    let form = form_of(&fx);
    fx.fill("Ada", "ada@example.com", "", "Hello!");
    let recorder = Recorder::new(&fx.page, form, Err(SubmitError::Unavailable("offline".into())));

    let outcome = block_on(submit(&fx.page, &form, &recorder));

    assert_eq!(outcome, FormOutcome::Failed(SubmitError::Unavailable("offline".into())));
    assert!(!fx.page.is_disabled(fx.submit));
    assert_eq!(fx.page.inner_html(fx.submit), SUBMIT_LABEL_HTML);
    assert_eq!(fx.page.value(fx.message), "Hello!");
    let region = feedback::region(&fx.page, fx.form);
    assert_eq!(fx.page.attribute(region, "data-error-code").as_deref(), Some("E_SUBMIT_UNAVAILABLE"));
    assert!(!fx.page.text(region).contains("offline"));
}

#[test]
fn repeated_submissions_do_not_grow_page() {
    let fx = portfolio();
    let form = form_of(&fx);
    fx.fill("Ada", "ada@example.com", "", "Hello!");
    block_on(submit(&fx.page, &form, &SimulatedSubmitter::default()));
    let settled = fx.page.slot_count();

    for _ in 0..20 {
        fx.fill("Ada", "ada@example.com", "", "Hello!");
        block_on(submit(&fx.page, &form, &SimulatedSubmitter::default()));
        fx.fill("", "ada@example.com", "", "");
        block_on(submit(&fx.page, &form, &SimulatedSubmitter::default()));
    }

    assert_eq!(fx.page.slot_count(), settled);
}
