//! The page contract: which elements the enhancement layer needs.
//!
//! Validated once at boot. Strict mode fails fast with every missing element
//! listed; lenient mode logs the same diagnostics and disables only the
//! features whose elements are absent.

#[cfg(test)]
#[path = "contract_test.rs"]
mod contract_test;

use std::fmt;

use serde::Deserialize;

use crate::ErrorCode;
use crate::consts;
use crate::page::{NodeId, Page, Selector, SelectorError};

// =============================================================================
// ERROR
// =============================================================================

/// One element the page should provide but does not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingElement {
    pub role: String,
    pub selector: String,
}

impl fmt::Display for MissingElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`", self.role, self.selector)
    }
}

/// Errors produced while validating the page contract.
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    /// Required elements are absent.
    #[error("page contract violated, missing: {}", join_missing(.missing))]
    Missing { missing: Vec<MissingElement> },

    /// A built-in selector failed to parse.
    #[error("invalid selector: {0}")]
    Selector(#[from] SelectorError),
}

impl ErrorCode for ContractError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Missing { .. } => "E_CONTRACT_MISSING",
            Self::Selector(inner) => inner.error_code(),
        }
    }
}

fn join_missing(missing: &[MissingElement]) -> String {
    missing.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// How contract violations are handled at boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractMode {
    /// Any missing element aborts boot.
    Strict,
    /// Missing elements are logged and their features skipped.
    Lenient,
}

impl Default for ContractMode {
    fn default() -> Self {
        if cfg!(debug_assertions) { Self::Strict } else { Self::Lenient }
    }
}

// =============================================================================
// SELECTORS
// =============================================================================

/// Every selector the crate evaluates, parsed once.
#[derive(Debug, Clone)]
pub struct Selectors {
    pub menu_toggle: Selector,
    pub nav_links: Selector,
    pub nav_link_items: Selector,
    pub fragment_anchors: Selector,
    pub submit: Selector,
    pub project_cards: Selector,
    pub card_title: Selector,
    pub card_description: Selector,
    pub card_tech: Selector,
    pub card_action: Selector,
}

impl Selectors {
    /// Parse the built-in selectors.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError`] if a constant selector is outside the
    /// supported subset.
    pub fn compile() -> Result<Self, SelectorError> {
        Ok(Self {
            menu_toggle: Selector::parse(consts::MENU_TOGGLE_SELECTOR)?,
            nav_links: Selector::parse(consts::NAV_LINKS_SELECTOR)?,
            nav_link_items: Selector::parse(consts::NAV_LINK_ITEMS_SELECTOR)?,
            fragment_anchors: Selector::parse(consts::FRAGMENT_ANCHOR_SELECTOR)?,
            submit: Selector::parse(consts::SUBMIT_SELECTOR)?,
            project_cards: Selector::parse(consts::PROJECT_CARD_SELECTOR)?,
            card_title: Selector::parse(consts::CARD_TITLE_SELECTOR)?,
            card_description: Selector::parse(consts::CARD_DESCRIPTION_SELECTOR)?,
            card_tech: Selector::parse(consts::CARD_TECH_SELECTOR)?,
            card_action: Selector::parse(consts::CARD_ACTION_SELECTOR)?,
        })
    }
}

// =============================================================================
// ELEMENTS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavElements {
    pub toggle: NodeId,
    pub links: NodeId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormElements {
    pub form: NodeId,
    pub name: NodeId,
    pub email: NodeId,
    pub phone: NodeId,
    pub message: NodeId,
    pub submit: NodeId,
}

/// Elements resolved from a page that satisfied (or was lenient about) the
/// contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageElements {
    pub nav: Option<NavElements>,
    pub nav_items: Vec<NodeId>,
    pub anchors: Vec<NodeId>,
    pub form: Option<FormElements>,
    pub cards: Vec<NodeId>,
}

impl PageElements {
    /// Number of interactive features that will be bound.
    #[must_use]
    pub fn feature_count(&self) -> usize {
        usize::from(self.nav.is_some())
            + usize::from(!self.anchors.is_empty())
            + usize::from(self.form.is_some())
            + usize::from(!self.cards.is_empty())
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Resolve and check every contract element.
///
/// # Errors
///
/// In [`ContractMode::Strict`], returns [`ContractError::Missing`] listing
/// every absent element. Lenient mode never fails.
pub fn validate(page: &dyn Page, selectors: &Selectors, mode: ContractMode) -> Result<PageElements, ContractError> {
    let mut missing = Vec::new();
    let mut elements = PageElements::default();

    let toggle = page.query(&selectors.menu_toggle);
    let links = page.query(&selectors.nav_links);
    if toggle.is_none() {
        missing.push(miss("menu toggle", consts::MENU_TOGGLE_SELECTOR));
    }
    if links.is_none() {
        missing.push(miss("navigation links", consts::NAV_LINKS_SELECTOR));
    }
    if let (Some(toggle), Some(links)) = (toggle, links) {
        elements.nav = Some(NavElements { toggle, links });
    }
    elements.nav_items = page.query_all(&selectors.nav_link_items);
    elements.anchors = page.query_all(&selectors.fragment_anchors);

    if let Some(form) = page.by_id(consts::CONTACT_FORM_ID) {
        elements.form = resolve_form(page, selectors, form, &mut missing);
    }

    for card in page.query_all(&selectors.project_cards) {
        let mut complete = true;
        if page.query_within(card, &selectors.card_title).is_none() {
            missing.push(miss("project card title", ".project-card h3"));
            complete = false;
        }
        if page.query_within(card, &selectors.card_description).is_none() {
            missing.push(miss("project card description", ".project-card p"));
            complete = false;
        }
        if complete {
            elements.cards.push(card);
        }
    }

    if missing.is_empty() {
        return Ok(elements);
    }
    match mode {
        ContractMode::Strict => Err(ContractError::Missing { missing }),
        ContractMode::Lenient => {
            for m in &missing {
                log::warn!("contract: missing {m}; feature disabled");
            }
            Ok(elements)
        }
    }
}

fn resolve_form(
    page: &dyn Page,
    selectors: &Selectors,
    form: NodeId,
    missing: &mut Vec<MissingElement>,
) -> Option<FormElements> {
    let mut field = |id: &str| {
        let found = page.by_id(id);
        if found.is_none() {
            missing.push(miss("contact form field", &format!("#{id}")));
        }
        found
    };
    let name = field(consts::NAME_FIELD_ID);
    let email = field(consts::EMAIL_FIELD_ID);
    let phone = field(consts::PHONE_FIELD_ID);
    let message = field(consts::MESSAGE_FIELD_ID);

    let submit = page.query_within(form, &selectors.submit);
    if submit.is_none() {
        missing.push(miss("contact form submit control", consts::SUBMIT_SELECTOR));
    }

    Some(FormElements { form, name: name?, email: email?, phone: phone?, message: message?, submit: submit? })
}

fn miss(role: &str, selector: &str) -> MissingElement {
    MissingElement { role: role.to_owned(), selector: selector.to_owned() }
}
