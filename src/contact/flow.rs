//! Submit handling: validate, lock the form, deliver, unlock.

#[cfg(test)]
#[path = "flow_test.rs"]
mod flow_test;

use crate::ErrorCode;
use crate::consts;
use crate::contract::FormElements;
use crate::page::Page;

use super::feedback::{self, FeedbackKind};
use super::{Field, Receipt, SubmitError, Submitter, ValidationError, read_fields, validate};

/// How one submit attempt ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormOutcome {
    /// A previous submission is still in flight; nothing was done.
    Busy,
    /// Blocked before sending. The submit control was never disabled.
    Rejected(ValidationError),
    /// Delivered; fields were cleared.
    Sent(Receipt),
    /// Delivery failed; fields were kept.
    Failed(SubmitError),
}

const ALL_FIELDS: [Field; 4] = [Field::Name, Field::Email, Field::Phone, Field::Message];

/// Handle one submit of the contact form.
///
/// No page borrow is held across the submitter's await, so other events can
/// be handled while the delivery is pending.
pub async fn submit(page: &dyn Page, form: &FormElements, submitter: &dyn Submitter) -> FormOutcome {
    if page.is_disabled(form.submit) {
        log::debug!("contact: submit ignored, delivery already in flight");
        return FormOutcome::Busy;
    }

    let controls: Vec<_> = ALL_FIELDS.iter().map(|f| f.node(form)).collect();
    feedback::clear(page, form.form);
    feedback::clear_invalid(page, &controls);

    let submission = match validate(&read_fields(page, form)) {
        Ok(submission) => submission,
        Err(err) => {
            log::debug!("contact: rejected ({}): {err}", err.error_code());
            let failing: Vec<_> = err.fields().iter().map(|f| f.node(form)).collect();
            feedback::mark_invalid(page, &failing);
            feedback::show(page, form.form, FeedbackKind::Error, &err.to_string(), Some(err.error_code()));
            return FormOutcome::Rejected(err);
        }
    };

    let original_label = page.inner_html(form.submit);
    page.set_inner_html(form.submit, consts::LOADING_LABEL_HTML);
    page.set_disabled(form.submit, true);

    let outcome = match submitter.submit(&submission).await {
        Ok(receipt) => {
            feedback::show(page, form.form, FeedbackKind::Success, &receipt.message, None);
            page.reset_form(form.form);
            FormOutcome::Sent(receipt)
        }
        Err(err) => {
            log::warn!("contact: delivery failed ({}): {err}", err.error_code());
            feedback::show(page, form.form, FeedbackKind::Error, err.user_message(), Some(err.error_code()));
            FormOutcome::Failed(err)
        }
    };

    page.set_inner_html(form.submit, &original_label);
    page.set_disabled(form.submit, false);
    outcome
}
