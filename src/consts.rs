//! Shared names and timings for the enhancement layer.
//!
//! These mirror the class names and identifiers the stylesheet and markup
//! already use; changing one here means changing the site's HTML/CSS too.

// ── Background ──────────────────────────────────────────────────

pub const BG_CONTAINER_CLASS: &str = "animated-bg";
pub const BG_PARTICLE_CLASS: &str = "bg-particle";
pub const BG_GRID_CLASS: &str = "grid-lines";

/// Floating particles inserted by default.
pub const DEFAULT_PARTICLE_COUNT: usize = 5;

/// Upper bound accepted from configuration.
pub const MAX_PARTICLE_COUNT: usize = 64;

// ── Navigation ──────────────────────────────────────────────────

pub const MENU_TOGGLE_SELECTOR: &str = ".menu-toggle";
pub const NAV_LINKS_SELECTOR: &str = ".nav-links";
pub const NAV_LINK_ITEMS_SELECTOR: &str = ".nav-links a";

/// Class marking both the expanded nav panel and the current-page link.
pub const ACTIVE_CLASS: &str = "active";

pub const DEFAULT_HOME_PAGE: &str = "index.html";

// ── Scrolling ───────────────────────────────────────────────────

pub const FRAGMENT_ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

// ── Contact form ────────────────────────────────────────────────

pub const CONTACT_FORM_ID: &str = "contactForm";
pub const NAME_FIELD_ID: &str = "name";
pub const EMAIL_FIELD_ID: &str = "email";
pub const PHONE_FIELD_ID: &str = "phone";
pub const MESSAGE_FIELD_ID: &str = "message";
pub const SUBMIT_SELECTOR: &str = "button[type=\"submit\"]";

/// Simulated round trip for a contact submission, in milliseconds.
pub const DEFAULT_SUBMIT_DELAY_MS: u64 = 1500;

pub const LOADING_LABEL_HTML: &str = "<i class=\"fas fa-spinner fa-spin\"></i> Sending...";

pub const FIELD_INVALID_CLASS: &str = "field-invalid";
pub const STATUS_CLASS: &str = "form-status";
pub const STATUS_ERROR_CLASS: &str = "form-status--error";
pub const STATUS_SUCCESS_CLASS: &str = "form-status--success";

pub const SUCCESS_MESSAGE: &str = "Thank you for your message! I will get back to you soon.";

// ── Project modal ───────────────────────────────────────────────

pub const PROJECT_CARD_SELECTOR: &str = ".project-card";
pub const CARD_TITLE_SELECTOR: &str = "h3";
pub const CARD_DESCRIPTION_SELECTOR: &str = "p";
pub const CARD_TECH_SELECTOR: &str = ".project-tech span";

/// Clicks landing inside one of these never open the modal.
pub const CARD_ACTION_SELECTOR: &str = ".btn";

pub const MODAL_OVERLAY_CLASS: &str = "modal-overlay";
pub const MODAL_PANEL_CLASS: &str = "modal";
pub const MODAL_HEADER_CLASS: &str = "modal-header";
pub const MODAL_CLOSE_CLASS: &str = "modal-close";
pub const MODAL_CONTENT_CLASS: &str = "modal-content";
pub const MODAL_TECH_CLASS: &str = "modal-tech";

/// Marker attribute on the injected `<style>` block.
pub const MODAL_STYLE_ATTR: &str = "data-folio-modal";

pub const MODAL_CSS: &str = r"
.modal-overlay {
    position: fixed;
    top: 0;
    left: 0;
    width: 100%;
    height: 100%;
    background: rgba(0, 0, 0, 0.7);
    display: flex;
    justify-content: center;
    align-items: center;
    z-index: 1000;
    animation: fadeIn 0.3s ease;
}

.modal {
    background: white;
    border-radius: var(--border-radius);
    padding: 2rem;
    max-width: 500px;
    width: 90%;
    animation: slideIn 0.3s ease;
}

.modal-header {
    display: flex;
    justify-content: space-between;
    align-items: center;
    margin-bottom: 1rem;
}

.modal-close {
    background: none;
    border: none;
    font-size: 2rem;
    cursor: pointer;
    color: var(--gray-color);
}

.modal-tech {
    margin-top: 1rem;
    padding: 0.5rem;
    background: var(--light-color);
    border-radius: var(--border-radius);
}

@keyframes fadeIn {
    from { opacity: 0; }
    to { opacity: 1; }
}

@keyframes slideIn {
    from {
        opacity: 0;
        transform: translateY(-20px);
    }
    to {
        opacity: 1;
        transform: translateY(0);
    }
}
";

// ── Configuration ───────────────────────────────────────────────

/// Id of the optional `<script type="application/json">` config block.
pub const CONFIG_SCRIPT_ID: &str = "folio-config";
