//! The page controller: every interactive part of the page behind one handle

use std::rc::Rc;

use crate::chat::{ChatWidget, PendingReply};
use crate::client::ChatTransport;
use crate::config::PageConfig;
use crate::disclosure::Disclosures;
use crate::error::PageResult;
use crate::navigator::{NavState, SectionNavigator};
use crate::view::{View, Visibility};

/// All interactive behavior of the page, bound to one [`View`].
pub struct PageController<V, T> {
    view: V,
    config: PageConfig,
    disclosures: Disclosures,
    navigator: SectionNavigator,
    chat: ChatWidget<V, T>,
}

impl<V: View, T: ChatTransport> PageController<V, T> {
    pub fn new(view: V, transport: Rc<T>, config: PageConfig) -> PageResult<Self> {
        config.validate()?;
        Ok(Self {
            disclosures: Disclosures::new(config.disclosures.clone(), config.labels.clone()),
            navigator: SectionNavigator::new(config.sections.clone()),
            chat: ChatWidget::new(view.clone(), transport, &config.chat),
            view,
            config,
        })
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Page-load initialization
    pub fn init(&self) -> PageResult<()> {
        self.navigator.show_home(&self.view)
    }

    pub fn toggle_disclosure(&self, trigger_id: &str) -> PageResult<Visibility> {
        self.disclosures.toggle(&self.view, trigger_id)
    }

    pub fn enter_detail(&self) -> PageResult<()> {
        self.navigator.enter_detail(&self.view)
    }

    pub fn exit_detail(&self) -> PageResult<()> {
        self.navigator.exit_detail(&self.view)
    }

    pub fn nav_state(&self) -> PageResult<NavState> {
        self.navigator.state(&self.view)
    }

    pub fn send_message(&self) -> PageResult<Option<PendingReply<V, T>>> {
        self.chat.send_message()
    }

    /// Keypress in the chat input: Enter sends, anything else is ignored.
    pub fn handle_key(&self, key: &str) -> PageResult<Option<PendingReply<V, T>>> {
        if key == "Enter" {
            self.send_message()
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ChatRequest, ChatResponse};
    use crate::config::FALLBACK_REPLY;
    use crate::error::{ChatError, PageError};
    use crate::view::MemoryView;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use tokio::sync::oneshot;

    /// Each message waits on its own channel so tests decide completion order.
    #[derive(Default)]
    struct GatedTransport {
        gates: RefCell<HashMap<String, oneshot::Receiver<Result<String, ChatError>>>>,
    }

    impl GatedTransport {
        fn gate(&self, message: &str) -> oneshot::Sender<Result<String, ChatError>> {
            let (tx, rx) = oneshot::channel();
            self.gates.borrow_mut().insert(message.to_string(), rx);
            tx
        }
    }

    impl ChatTransport for GatedTransport {
        async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ChatError> {
            let gate = self.gates.borrow_mut().remove(&request.message);
            let Some(gate) = gate else {
                return Err(ChatError::Decode("no gate".into()));
            };
            match gate.await {
                Ok(result) => result.map(|reply| ChatResponse { reply }),
                Err(_) => Err(ChatError::Decode("gate dropped".into())),
            }
        }
    }

    fn setup() -> (PageController<MemoryView, GatedTransport>, Rc<GatedTransport>) {
        let config = PageConfig::default();
        let view = MemoryView::for_config(&config);
        let transport = Rc::new(GatedTransport::default());
        let controller = PageController::new(view, Rc::clone(&transport), config).unwrap();
        controller.init().unwrap();
        (controller, transport)
    }

    fn markup(controller: &PageController<MemoryView, GatedTransport>) -> Vec<String> {
        controller
            .view()
            .children("chat-messages")
            .unwrap()
            .into_iter()
            .map(|entry| entry.markup)
            .collect()
    }

    #[test]
    fn test_init_shows_home() {
        let (controller, _) = setup();
        assert_eq!(controller.nav_state().unwrap(), NavState::Home);
        assert_eq!(controller.view().visibility("section2").unwrap(), Visibility::Shown);

        controller.enter_detail().unwrap();
        assert_eq!(controller.nav_state().unwrap(), NavState::Detail);
        controller.exit_detail().unwrap();
        assert_eq!(controller.nav_state().unwrap(), NavState::Home);
    }

    #[test]
    fn test_toggle_through_controller() {
        let (controller, _) = setup();
        assert_eq!(controller.toggle_disclosure("readMoreBtn2").unwrap(), Visibility::Shown);
        assert_eq!(controller.view().text("readMoreBtn2").unwrap(), "Read Less");
    }

    #[test]
    fn test_only_enter_key_sends() {
        let (controller, _) = setup();
        controller.view().set_input_value("user-input", "hi").unwrap();

        assert!(controller.handle_key("a").unwrap().is_none());
        assert!(controller.handle_key("Shift").unwrap().is_none());
        assert_eq!(controller.view().input_value("user-input").unwrap(), "hi");

        assert!(controller.handle_key("Enter").unwrap().is_some());
        assert_eq!(controller.view().input_value("user-input").unwrap(), "");
        assert_eq!(markup(&controller), vec!["hi"]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = PageConfig::default();
        config.sections.detail = "section1".into();
        let view = MemoryView::for_config(&config);
        let result = PageController::new(view, Rc::new(GatedTransport::default()), config);
        assert!(matches!(result, Err(PageError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_replies_append_in_completion_order() {
        let (controller, transport) = setup();
        let first_gate = transport.gate("first");
        let second_gate = transport.gate("second");

        controller.view().set_input_value("user-input", "first").unwrap();
        let first = controller.send_message().unwrap().unwrap();
        controller.view().set_input_value("user-input", "second").unwrap();
        let second = controller.send_message().unwrap().unwrap();

        let (a, b, _) = tokio::join!(first.settle(), second.settle(), async {
            second_gate.send(Ok("answer two".into())).ok();
            tokio::task::yield_now().await;
            first_gate.send(Ok("answer one".into())).ok();
        });
        a.unwrap();
        b.unwrap();

        assert_eq!(
            markup(&controller),
            vec!["first", "second", "answer two", "answer one"]
        );
    }

    #[tokio::test]
    async fn test_transport_failure_appends_fallback_once() {
        let (controller, transport) = setup();
        let gate = transport.gate("hello");
        controller.view().set_input_value("user-input", "hello").unwrap();
        let pending = controller.send_message().unwrap().unwrap();

        drop(gate);
        let entry = pending.settle().await.unwrap();

        assert_eq!(entry.text, FALLBACK_REPLY);
        assert_eq!(markup(&controller), vec!["hello", FALLBACK_REPLY]);
    }
}
