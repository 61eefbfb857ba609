use super::*;

fn sel(s: &str) -> Selector {
    Selector::parse(s).unwrap()
}

// =============================================================
// Tree structure
// =============================================================

#[test]
fn new_page_has_head_and_body() {
    let page = MemoryPage::new();
    assert_eq!(page.tag_name(page.head()), "head");
    assert_eq!(page.tag_name(page.body()), "body");
    assert!(page.is_attached(page.body()));
    assert_eq!(page.location_path(), "/");
}

#[test]
fn prepend_inserts_before_existing_children() {
    let page = MemoryPage::new();
    let body = page.body();
    let a = page.append_element(body, "div", &[("id", "a")]);
    let b = page.create_element("div");
    page.prepend_child(body, b);
    assert_eq!(page.children(body), vec![b, a]);
}

#[test]
fn remove_detaches_subtree() {
    let page = MemoryPage::new();
    let outer = page.append_element(page.body(), "div", &[]);
    let inner = page.append_element(outer, "span", &[("id", "inner")]);
    page.remove(outer);
    assert!(!page.is_attached(outer));
    assert!(!page.is_attached(inner));
    assert!(page.by_id("inner").is_none());
}

#[test]
fn removed_handles_go_stale() {
    let page = MemoryPage::new();
    let outer = page.append_element(page.body(), "div", &[("class", "gone")]);
    let inner = page.append_element(outer, "p", &[]);
    page.set_text(inner, "bye");
    page.remove(outer);

    assert_eq!(page.text(inner), "");
    assert_eq!(page.attribute(outer, "class"), None);
    assert_eq!(page.parent(inner), None);
    page.append_child(page.body(), outer);
    assert!(!page.is_attached(outer));
    assert!(page.children(page.body()).is_empty());
}

#[test]
fn released_slots_are_reused_under_new_handles() {
    let page = MemoryPage::new();
    let old = page.append_element(page.body(), "div", &[]);
    let before = page.slot_count();
    page.remove(old);

    let fresh = page.append_element(page.body(), "div", &[("id", "fresh")]);

    assert_eq!(page.slot_count(), before);
    assert_ne!(old, fresh);
    page.set_attribute(old, "id", "stale-write");
    assert_eq!(page.attribute(fresh, "id").as_deref(), Some("fresh"));
    assert_eq!(page.by_id("fresh"), Some(fresh));
}

#[test]
fn replacing_content_does_not_grow_arena() {
    let page = MemoryPage::new();
    let status = page.append_element(page.body(), "div", &[]);
    let button = page.append_element(page.body(), "button", &[]);
    page.set_text(status, "first");
    page.set_inner_html(button, "<i></i> Send");
    let before = page.slot_count();

    for i in 0..50 {
        page.set_text(status, &format!("message {i}"));
        page.set_inner_html(button, "<i></i> Sending...");
        page.set_inner_html(button, "<i></i> Send");
    }

    assert_eq!(page.slot_count(), before);
    assert_eq!(page.text(status), "message 49");
}

#[test]
fn document_skeleton_cannot_be_removed() {
    let page = MemoryPage::new();
    page.remove(page.body());
    page.remove(page.head());
    assert!(page.is_attached(page.body()));
    assert!(page.is_attached(page.head()));
}

#[test]
fn append_refuses_cycles() {
    let page = MemoryPage::new();
    let outer = page.append_element(page.body(), "div", &[]);
    let inner = page.append_element(outer, "div", &[]);
    page.append_child(inner, outer);
    assert_eq!(page.parent(inner), Some(outer));
    assert_eq!(page.parent(outer), Some(page.body()));
}

#[test]
fn contains_is_inclusive() {
    let page = MemoryPage::new();
    let outer = page.append_element(page.body(), "div", &[]);
    let inner = page.append_element(outer, "div", &[]);
    assert!(page.contains(outer, outer));
    assert!(page.contains(outer, inner));
    assert!(!page.contains(inner, outer));
}

// =============================================================
// Queries
// =============================================================

#[test]
fn query_all_returns_document_order() {
    let page = MemoryPage::new();
    let list = page.append_element(page.body(), "ul", &[("class", "nav-links")]);
    let li1 = page.append_element(list, "li", &[]);
    let a1 = page.append_element(li1, "a", &[("href", "index.html")]);
    let li2 = page.append_element(list, "li", &[]);
    let a2 = page.append_element(li2, "a", &[("href", "projects.html")]);
    page.append_element(page.body(), "a", &[("href", "elsewhere.html")]);

    assert_eq!(page.query_all(&sel(".nav-links a")), vec![a1, a2]);
    assert_eq!(page.query(&sel(".nav-links a")), Some(a1));
}

#[test]
fn query_within_excludes_root() {
    let page = MemoryPage::new();
    let card = page.append_element(page.body(), "div", &[("class", "card")]);
    let inner = page.append_element(card, "div", &[("class", "card")]);
    assert_eq!(page.query_within(card, &sel(".card")), Some(inner));
}

#[test]
fn closest_includes_self_and_walks_up() {
    let page = MemoryPage::new();
    let btn = page.append_element(page.body(), "a", &[("class", "btn")]);
    let icon = page.append_element(btn, "i", &[]);
    assert_eq!(page.closest(icon, &sel(".btn")), Some(btn));
    assert_eq!(page.closest(btn, &sel(".btn")), Some(btn));
    assert_eq!(page.closest(page.body(), &sel(".btn")), None);
}

// =============================================================
// Classes and attributes
// =============================================================

#[test]
fn toggle_class_flips_and_reports() {
    let page = MemoryPage::new();
    let el = page.append_element(page.body(), "ul", &[("class", "nav-links")]);
    assert!(page.toggle_class(el, "active"));
    assert_eq!(page.attribute(el, "class").as_deref(), Some("nav-links active"));
    assert!(!page.toggle_class(el, "active"));
    assert_eq!(page.attribute(el, "class").as_deref(), Some("nav-links"));
}

#[test]
fn add_class_is_idempotent_and_remove_drops_empty_attr() {
    let page = MemoryPage::new();
    let el = page.create_element("a");
    page.add_class(el, "active");
    page.add_class(el, "active");
    assert_eq!(page.attribute(el, "class").as_deref(), Some("active"));
    page.remove_class(el, "active");
    assert_eq!(page.attribute(el, "class"), None);
}

// =============================================================
// Content
// =============================================================

#[test]
fn text_concatenates_descendants() {
    let page = MemoryPage::new();
    let p = page.append_element(page.body(), "p", &[]);
    page.append_text(p, "Hello ");
    let strong = page.append_element(p, "strong", &[]);
    page.set_text(strong, "world");
    assert_eq!(page.text(p), "Hello world");
}

#[test]
fn inner_html_escapes_text_and_keeps_raw_markup() {
    let page = MemoryPage::new();
    let div = page.append_element(page.body(), "div", &[("class", "x")]);
    page.set_text(div, "<b>&</b>");
    assert_eq!(page.inner_html(div), "&lt;b&gt;&amp;&lt;/b&gt;");

    let button = page.append_element(page.body(), "button", &[]);
    page.set_inner_html(button, "<i class=\"fas\"></i> Go");
    assert_eq!(page.inner_html(button), "<i class=\"fas\"></i> Go");
    assert_eq!(page.text(button), "");
}

#[test]
fn inner_html_serializes_elements() {
    let page = MemoryPage::new();
    let button = page.append_element(page.body(), "button", &[("type", "submit")]);
    let icon = page.append_element(button, "i", &[("class", "fas fa-paper-plane")]);
    page.set_text(icon, "");
    page.append_text(button, " Send");
    assert_eq!(page.inner_html(button), "<i class=\"fas fa-paper-plane\"></i> Send");
}

// =============================================================
// Form controls
// =============================================================

#[test]
fn reset_form_restores_default_values() {
    let page = MemoryPage::new();
    let form = page.append_element(page.body(), "form", &[]);
    let name = page.append_element(form, "input", &[("id", "name")]);
    let topic = page.append_element(form, "input", &[("id", "topic"), ("value", "General")]);
    let message = page.append_element(form, "textarea", &[]);
    let outside = page.append_element(page.body(), "input", &[]);

    page.set_value(name, "Ada");
    page.set_value(topic, "Hiring");
    page.set_value(message, "Hello");
    page.set_value(outside, "keep");
    page.reset_form(form);

    assert_eq!(page.value(name), "");
    assert_eq!(page.value(topic), "General");
    assert_eq!(page.value(message), "");
    assert_eq!(page.value(outside), "keep");
}

#[test]
fn disabled_round_trips_through_attribute() {
    let page = MemoryPage::new();
    let button = page.append_element(page.body(), "button", &[]);
    assert!(!page.is_disabled(button));
    page.set_disabled(button, true);
    assert!(page.is_disabled(button));
    page.set_disabled(button, false);
    assert!(!page.is_disabled(button));
}

// =============================================================
// Viewport / location
// =============================================================

#[test]
fn scroll_requests_are_recorded_in_order() {
    let page = MemoryPage::new();
    let a = page.append_element(page.body(), "section", &[]);
    let b = page.append_element(page.body(), "section", &[]);
    page.scroll_into_view(b);
    page.scroll_into_view(a);
    assert_eq!(page.scroll_requests(), vec![b, a]);
}

#[test]
fn location_path_is_settable() {
    let page = MemoryPage::new();
    page.set_location_path("/work/projects.html");
    assert_eq!(page.location_path(), "/work/projects.html");
}
