//! Page handle: the capability every component reads and mutates through.
//!
//! DESIGN
//! ======
//! Components never reach for a global `document`. They take `&impl Page`
//! (or `&dyn Page`) and address elements through opaque [`NodeId`]s, so the
//! same code drives the real DOM (`DomPage`, `hydrate` only) and the
//! headless [`MemoryPage`] used by tests.
//!
//! All methods take `&self`; implementations use interior mutability so a
//! page can be shared through `Rc` by event closures without holding a
//! borrow across an `.await`.
//!
//! Handles are generational slots. Removing a node releases the slots of its
//! whole subtree for reuse; a handle kept past that point is stale and every
//! operation on it is a no-op (or returns nothing).

#[cfg(feature = "hydrate")]
mod dom;
mod memory;
mod selector;

#[cfg(feature = "hydrate")]
pub use dom::DomPage;
pub use memory::MemoryPage;
pub use selector::{AttrOp, Compound, Matchable, Selector, SelectorError};

/// Opaque handle to an element owned by a [`Page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub(crate) slot: usize,
    pub(crate) generation: u32,
}

/// Query and mutation operations over a document.
///
/// Mutations are infallible from the caller's point of view; adapters that
/// can fail (the DOM) log the failure and carry on, matching how the browser
/// itself treats a failed class-list or attribute write.
pub trait Page {
    // --- Lookup ---

    fn body(&self) -> NodeId;
    fn head(&self) -> NodeId;
    fn by_id(&self, id: &str) -> Option<NodeId>;
    fn query(&self, selector: &Selector) -> Option<NodeId>;
    fn query_all(&self, selector: &Selector) -> Vec<NodeId>;
    /// First descendant of `root` (excluding `root`) matching `selector`.
    fn query_within(&self, root: NodeId, selector: &Selector) -> Option<NodeId>;
    fn query_all_within(&self, root: NodeId, selector: &Selector) -> Vec<NodeId>;
    /// Nearest inclusive ancestor of `node` matching `selector`.
    fn closest(&self, node: NodeId, selector: &Selector) -> Option<NodeId>;
    fn parent(&self, node: NodeId) -> Option<NodeId>;
    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool;

    // --- Tree mutation ---

    fn create_element(&self, tag: &str) -> NodeId;
    fn append_child(&self, parent: NodeId, child: NodeId);
    /// Insert `child` before the current first child of `parent`.
    fn prepend_child(&self, parent: NodeId, child: NodeId);
    /// Detach `node` from the document and release it and its descendants.
    /// Their handles become stale.
    fn remove(&self, node: NodeId);

    // --- Classes ---

    fn add_class(&self, node: NodeId, class: &str);
    fn remove_class(&self, node: NodeId, class: &str);
    /// Flip `class` and return whether it is now present.
    fn toggle_class(&self, node: NodeId, class: &str) -> bool;
    fn has_class(&self, node: NodeId, class: &str) -> bool;

    // --- Attributes and content ---

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;
    fn set_attribute(&self, node: NodeId, name: &str, value: &str);
    fn remove_attribute(&self, node: NodeId, name: &str);
    /// Concatenated text of all descendant text nodes.
    fn text(&self, node: NodeId) -> String;
    /// Replace all children of `node` with a single text node. The replaced
    /// children are released.
    fn set_text(&self, node: NodeId, text: &str);
    /// Append a text node after the existing children of `node`.
    fn append_text(&self, node: NodeId, text: &str);
    fn inner_html(&self, node: NodeId) -> String;
    fn set_inner_html(&self, node: NodeId, html: &str);

    // --- Form controls ---

    fn value(&self, node: NodeId) -> String;
    fn set_value(&self, node: NodeId, value: &str);
    fn is_disabled(&self, node: NodeId) -> bool;
    fn set_disabled(&self, node: NodeId, disabled: bool);
    /// Restore every control inside `form` to its default value.
    fn reset_form(&self, form: NodeId);

    // --- Viewport / location ---

    /// Smooth, start-aligned scroll bringing `node` into view.
    fn scroll_into_view(&self, node: NodeId);
    /// Path component of the current URL (e.g. `/work/projects.html`).
    fn location_path(&self) -> String;
}
