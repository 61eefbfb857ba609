//! Inline, non-blocking form status.
//!
//! One polite live region per form. The page may place its own element with
//! id `<form id>-status`; otherwise one is appended to the form on first use.

use crate::consts;
use crate::page::{NodeId, Page};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedbackKind {
    Error,
    Success,
}

impl FeedbackKind {
    fn class(self) -> &'static str {
        match self {
            Self::Error => consts::STATUS_ERROR_CLASS,
            Self::Success => consts::STATUS_SUCCESS_CLASS,
        }
    }
}

fn region_id(page: &dyn Page, form: NodeId) -> String {
    let form_id = page.attribute(form, "id").unwrap_or_else(|| consts::CONTACT_FORM_ID.to_owned());
    format!("{form_id}-status")
}

/// The form's status region, created on first use.
pub fn region(page: &dyn Page, form: NodeId) -> NodeId {
    let id = region_id(page, form);
    if let Some(existing) = page.by_id(&id) {
        return existing;
    }
    let node = page.create_element("div");
    page.set_attribute(node, "id", &id);
    page.add_class(node, consts::STATUS_CLASS);
    page.set_attribute(node, "role", "status");
    page.set_attribute(node, "aria-live", "polite");
    page.append_child(form, node);
    node
}

/// Replace the status with `message`.
pub fn show(page: &dyn Page, form: NodeId, kind: FeedbackKind, message: &str, code: Option<&str>) -> NodeId {
    let node = region(page, form);
    page.remove_class(node, consts::STATUS_ERROR_CLASS);
    page.remove_class(node, consts::STATUS_SUCCESS_CLASS);
    page.add_class(node, kind.class());
    match code {
        Some(code) => page.set_attribute(node, "data-error-code", code),
        None => page.remove_attribute(node, "data-error-code"),
    }
    page.set_text(node, message);
    node
}

/// Empty the status region if it exists.
pub fn clear(page: &dyn Page, form: NodeId) {
    let Some(node) = page.by_id(&region_id(page, form)) else {
        return;
    };
    page.remove_class(node, consts::STATUS_ERROR_CLASS);
    page.remove_class(node, consts::STATUS_SUCCESS_CLASS);
    page.remove_attribute(node, "data-error-code");
    page.set_text(node, "");
}

/// Flag controls as invalid for styling and assistive tech.
pub fn mark_invalid(page: &dyn Page, fields: &[NodeId]) {
    for &field in fields {
        page.add_class(field, consts::FIELD_INVALID_CLASS);
        page.set_attribute(field, "aria-invalid", "true");
    }
}

pub fn clear_invalid(page: &dyn Page, fields: &[NodeId]) {
    for &field in fields {
        page.remove_class(field, consts::FIELD_INVALID_CLASS);
        page.remove_attribute(field, "aria-invalid");
    }
}
