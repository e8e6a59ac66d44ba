//! Browser bindings: a [`View`] over the live document and the entry points
//! the page calls into.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, HtmlInputElement, KeyboardEvent};

use crate::chat::PendingReply;
use crate::client::ChatClient;
use crate::config::PageConfig;
use crate::controller::PageController;
use crate::error::{PageError, PageResult};
use crate::view::{should_defer_mount, View, Visibility};

/// Id of an optional `<script type="application/json">` block holding a
/// (partial) [`PageConfig`]
pub const CONFIG_ELEMENT_ID: &str = "medibot-config";

type DomController = PageController<DomView, ChatClient>;

thread_local! {
    static CONTROLLER: RefCell<Option<Rc<DomController>>> = const { RefCell::new(None) };
}

#[derive(Clone)]
pub struct DomView {
    document: Document,
}

impl DomView {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn from_window() -> PageResult<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(PageError::NoWindow)?;
        Ok(Self::new(document))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn element(&self, id: &str) -> PageResult<Element> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| PageError::ElementNotFound(id.to_string()))
    }

    fn html_element(&self, id: &str) -> PageResult<HtmlElement> {
        self.element(id)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| PageError::UnexpectedElement { id: id.to_string(), expected: "HTML element" })
    }

    fn input(&self, id: &str) -> PageResult<HtmlInputElement> {
        self.element(id)?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| PageError::UnexpectedElement { id: id.to_string(), expected: "input element" })
    }
}

impl View for DomView {
    fn visibility(&self, id: &str) -> PageResult<Visibility> {
        let element = self.html_element(id)?;
        let inline = element.style().get_property_value("display")?;

        // Panels hidden by the stylesheet carry no inline display value.
        let computed = if inline.trim().is_empty() {
            let window = web_sys::window().ok_or(PageError::NoWindow)?;
            match window.get_computed_style(&element)? {
                Some(style) => Some(style.get_property_value("display")?),
                None => None,
            }
        } else {
            None
        };

        Ok(Visibility::resolve(&inline, computed.as_deref()))
    }

    fn set_visibility(&self, id: &str, visibility: Visibility) -> PageResult<()> {
        self.html_element(id)?
            .style()
            .set_property("display", visibility.css_display())?;
        Ok(())
    }

    fn set_text(&self, id: &str, text: &str) -> PageResult<()> {
        self.element(id)?.set_text_content(Some(text));
        Ok(())
    }

    fn input_value(&self, id: &str) -> PageResult<String> {
        Ok(self.input(id)?.value())
    }

    fn set_input_value(&self, id: &str, value: &str) -> PageResult<()> {
        self.input(id)?.set_value(value);
        Ok(())
    }

    fn append_markup(&self, container_id: &str, markup: &str, classes: &[&str]) -> PageResult<()> {
        let container = self.element(container_id)?;
        let child = self.document.create_element("div")?;
        child.set_inner_html(markup);
        for class in classes {
            child.class_list().add_1(class)?;
        }
        container.append_child(&child)?;
        Ok(())
    }

    fn scroll_to_bottom(&self, id: &str) -> PageResult<()> {
        let element = self.element(id)?;
        element.set_scroll_top(element.scroll_height());
        Ok(())
    }
}

/// Initialize panic reporting and logging, then mount once the page is parsed.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    let view = DomView::from_window()?;
    if should_defer_mount(&view.document().ready_state()) {
        let on_ready = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            if let Err(err) = mount() {
                log::error!("Failed to mount page controller: {}", err);
            }
        });
        view.document()
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
        on_ready.forget();
        Ok(())
    } else {
        mount().map_err(JsValue::from)
    }
}

/// Show the single detail section. Bound to the page's "learn more" button.
#[wasm_bindgen(js_name = "goToSection4")]
pub fn go_to_section4() -> Result<(), JsValue> {
    with_controller(|c| c.enter_detail()).map_err(JsValue::from)
}

/// Return to the home sections.
#[wasm_bindgen(js_name = "backToHome")]
pub fn back_to_home() -> Result<(), JsValue> {
    with_controller(|c| c.exit_detail()).map_err(JsValue::from)
}

/// Bind every configured element and show the home view.
pub fn mount() -> PageResult<()> {
    let view = DomView::from_window()?;
    let config = load_config(&view)?;

    let origin = web_sys::window()
        .ok_or(PageError::NoWindow)?
        .location()
        .origin()?;
    let client = ChatClient::new(origin, config.chat.endpoint.clone());

    let controller = Rc::new(PageController::new(view, Rc::new(client), config)?);
    controller.init()?;
    bind_handlers(&controller)?;

    CONTROLLER.with(|slot| *slot.borrow_mut() = Some(Rc::clone(&controller)));
    log::info!("Page controller mounted");
    Ok(())
}

fn load_config(view: &DomView) -> PageResult<PageConfig> {
    match view.document().get_element_by_id(CONFIG_ELEMENT_ID) {
        Some(element) => {
            let json = element.text_content().unwrap_or_default();
            PageConfig::from_json(&json)
        }
        None => Ok(PageConfig::default()),
    }
}

fn with_controller<R>(f: impl FnOnce(&DomController) -> PageResult<R>) -> PageResult<R> {
    let controller = CONTROLLER
        .with(|slot| slot.borrow().clone())
        .ok_or_else(|| PageError::Js("page controller is not mounted".into()))?;
    f(&controller)
}

fn bind_handlers(controller: &Rc<DomController>) -> PageResult<()> {
    let config = controller.config().clone();

    for pair in &config.disclosures {
        let c = Rc::clone(controller);
        let trigger_id = pair.trigger_id.clone();
        listen(controller.view(), &pair.trigger_id, "click", move |_| {
            if let Err(err) = c.toggle_disclosure(&trigger_id) {
                log::error!("{}", err);
            }
        })?;
    }

    let c = Rc::clone(controller);
    listen(controller.view(), &config.chat.send_button_id, "click", move |_| {
        dispatch(c.send_message());
    })?;

    let c = Rc::clone(controller);
    listen(controller.view(), &config.chat.input_id, "keypress", move |event| {
        if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
            dispatch(c.handle_key(&event.key()));
        }
    })?;

    Ok(())
}

fn listen(
    view: &DomView,
    id: &str,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> PageResult<()> {
    let target = view.element(id)?;
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    // Handlers live as long as the page.
    closure.forget();
    Ok(())
}

/// Hand a pending reply to the event loop; it settles after this returns.
fn dispatch(sent: PageResult<Option<PendingReply<DomView, ChatClient>>>) {
    match sent {
        Ok(Some(pending)) => wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = pending.settle().await {
                log::error!("Failed to render reply: {}", err);
            }
        }),
        Ok(None) => {}
        Err(err) => log::error!("{}", err),
    }
}
