//! # folio
//!
//! WASM enhancement layer for a static portfolio site. The markup is served
//! as plain HTML; this crate binds behavior onto it once the document is
//! ready: a decorative background, the mobile navigation toggle, smooth
//! in-page scrolling, contact-form validation with a simulated submission,
//! and a project-details modal.
//!
//! Every component is written against the [`page::Page`] handle rather than
//! the global document, so the whole flow runs headless against
//! [`page::MemoryPage`] in tests. The browser adapter (`page::DomPage`) and
//! the event wiring (`bind`) only exist with the `hydrate` feature.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`page`] | Page handle trait, selector subset, in-memory and DOM pages |
//! | [`contract`] | Elements the layer requires, validated once at boot |
//! | [`background`] | Decorative background container |
//! | [`nav`] | Menu toggle and active-link highlight |
//! | [`scroll`] | Same-page anchor routing with smooth scrolling |
//! | [`contact`] | Contact form validation, submission, inline feedback |
//! | [`modal`] | Single-instance project details modal |
//! | [`site`] | Boot orchestration and event entry points |
//! | `bind` | Browser entry point and event listeners (`hydrate` only) |
//! | [`config`] | Site configuration with defaults |
//! | [`consts`] | Class names, element ids, timings |
//! | [`timer`] | Delay primitive |

pub mod background;
#[cfg(feature = "hydrate")]
pub mod bind;
pub mod config;
pub mod consts;
pub mod contact;
pub mod contract;
pub mod modal;
pub mod nav;
pub mod page;
pub mod scroll;
pub mod site;
#[cfg(test)]
mod testing;
pub mod timer;

/// Stable machine-readable codes for error values.
///
/// Rendered into `data-error-code` attributes and log lines so feedback can
/// be styled or matched without parsing messages.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;
}
