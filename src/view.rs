//! The page as seen by the controller.
//!
//! Controllers never look elements up globally; they go through a [`View`]
//! handle. [`crate::dom::DomView`] drives a real document in the browser and
//! [`MemoryView`] keeps an in-memory page for headless use and tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::config::PageConfig;
use crate::error::{PageError, PageResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Shown,
}

impl Visibility {
    /// Value written to `style.display`
    pub fn css_display(self) -> &'static str {
        match self {
            Visibility::Hidden => "none",
            Visibility::Shown => "block",
        }
    }

    /// Interpret a `display` value. Only `none` counts as hidden.
    pub fn from_css_display(display: &str) -> Self {
        if display.trim() == "none" {
            Visibility::Hidden
        } else {
            Visibility::Shown
        }
    }

    /// Visibility from the inline `display` value, falling back to the
    /// computed style when no inline value is set.
    pub fn resolve(inline: &str, computed: Option<&str>) -> Self {
        if inline.trim().is_empty() {
            Self::from_css_display(computed.unwrap_or_default())
        } else {
            Self::from_css_display(inline)
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Visibility::Hidden => Visibility::Shown,
            Visibility::Shown => Visibility::Hidden,
        }
    }
}

/// Whether mounting has to wait for `DOMContentLoaded`, given
/// `document.readyState`.
pub fn should_defer_mount(ready_state: &str) -> bool {
    ready_state == "loading"
}

/// Handle to the page's mutable element tree.
///
/// Methods take `&self`: handles are cheap clones sharing one page, and every
/// mutation happens on the single UI thread.
pub trait View: Clone {
    fn visibility(&self, id: &str) -> PageResult<Visibility>;
    fn set_visibility(&self, id: &str, visibility: Visibility) -> PageResult<()>;
    fn set_text(&self, id: &str, text: &str) -> PageResult<()>;
    fn input_value(&self, id: &str) -> PageResult<String>;
    fn set_input_value(&self, id: &str, value: &str) -> PageResult<()>;
    /// Append a child holding `markup` as inner HTML with the given classes.
    fn append_markup(&self, container_id: &str, markup: &str, classes: &[&str]) -> PageResult<()>;
    fn scroll_to_bottom(&self, id: &str) -> PageResult<()>;
}

/// A child appended through [`View::append_markup`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEntry {
    pub markup: String,
    pub classes: Vec<String>,
}

impl RenderedEntry {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Block,
    Input,
}

#[derive(Debug, Clone)]
struct MemoryElement {
    kind: ElementKind,
    visibility: Visibility,
    text: String,
    value: String,
    children: Vec<RenderedEntry>,
    scroll_top: usize,
}

impl MemoryElement {
    fn new(kind: ElementKind, visibility: Visibility) -> Self {
        Self {
            kind,
            visibility,
            text: String::new(),
            value: String::new(),
            children: Vec::new(),
            scroll_top: 0,
        }
    }
}

/// In-memory page. Clones share the same elements.
#[derive(Debug, Clone, Default)]
pub struct MemoryView {
    elements: Rc<RefCell<HashMap<String, MemoryElement>>>,
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the page a config expects, styled the way the landing page
    /// ships: panels and sections hidden, triggers reading "Read More".
    pub fn for_config(config: &PageConfig) -> Self {
        let view = Self::new();
        for pair in &config.disclosures {
            view.insert(&pair.trigger_id, ElementKind::Block, Visibility::Shown);
            view.elements
                .borrow_mut()
                .entry(pair.trigger_id.clone())
                .and_modify(|el| el.text = config.labels.collapsed.clone());
            view.insert(&pair.panel_id, ElementKind::Block, Visibility::Hidden);
        }
        for id in config.sections.home.iter().chain(std::iter::once(&config.sections.detail)) {
            view.insert(id, ElementKind::Block, Visibility::Hidden);
        }
        view.insert(&config.chat.send_button_id, ElementKind::Block, Visibility::Shown);
        view.insert(&config.chat.input_id, ElementKind::Input, Visibility::Shown);
        view.insert(&config.chat.messages_id, ElementKind::Block, Visibility::Shown);
        view
    }

    pub fn insert(&self, id: &str, kind: ElementKind, visibility: Visibility) {
        self.elements
            .borrow_mut()
            .insert(id.to_string(), MemoryElement::new(kind, visibility));
    }

    pub fn remove(&self, id: &str) {
        self.elements.borrow_mut().remove(id);
    }

    pub fn text(&self, id: &str) -> PageResult<String> {
        self.with_element(id, |el| el.text.clone())
    }

    pub fn children(&self, id: &str) -> PageResult<Vec<RenderedEntry>> {
        self.with_element(id, |el| el.children.clone())
    }

    /// Scroll offset in children; equals the child count when at the bottom.
    pub fn scroll_top(&self, id: &str) -> PageResult<usize> {
        self.with_element(id, |el| el.scroll_top)
    }

    fn with_element<R>(&self, id: &str, f: impl FnOnce(&mut MemoryElement) -> R) -> PageResult<R> {
        let mut elements = self.elements.borrow_mut();
        let element = elements
            .get_mut(id)
            .ok_or_else(|| PageError::ElementNotFound(id.to_string()))?;
        Ok(f(element))
    }

    fn with_input<R>(&self, id: &str, f: impl FnOnce(&mut MemoryElement) -> R) -> PageResult<R> {
        self.with_element(id, |el| {
            if el.kind != ElementKind::Input {
                return Err(PageError::UnexpectedElement {
                    id: id.to_string(),
                    expected: "input element",
                });
            }
            Ok(f(el))
        })?
    }
}

impl View for MemoryView {
    fn visibility(&self, id: &str) -> PageResult<Visibility> {
        self.with_element(id, |el| el.visibility)
    }

    fn set_visibility(&self, id: &str, visibility: Visibility) -> PageResult<()> {
        self.with_element(id, |el| el.visibility = visibility)
    }

    fn set_text(&self, id: &str, text: &str) -> PageResult<()> {
        self.with_element(id, |el| el.text = text.to_string())
    }

    fn input_value(&self, id: &str) -> PageResult<String> {
        self.with_input(id, |el| el.value.clone())
    }

    fn set_input_value(&self, id: &str, value: &str) -> PageResult<()> {
        self.with_input(id, |el| el.value = value.to_string())
    }

    fn append_markup(&self, container_id: &str, markup: &str, classes: &[&str]) -> PageResult<()> {
        self.with_element(container_id, |el| {
            el.children.push(RenderedEntry {
                markup: markup.to_string(),
                classes: classes.iter().map(|c| c.to_string()).collect(),
            })
        })
    }

    fn scroll_to_bottom(&self, id: &str) -> PageResult<()> {
        self.with_element(id, |el| el.scroll_top = el.children.len())
    }
}
