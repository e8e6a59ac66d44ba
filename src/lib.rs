//! MediBot page controller
//!
//! Drives the interactive parts of the MediBot landing page when compiled to
//! WebAssembly:
//! - "Read more" panels that expand and collapse
//! - Switching between the home sections and the detail section
//! - The chat widget, which posts to `/chat` and renders the reply
//!
//! The controller talks to the page through the [`view::View`] trait, so the
//! same logic runs headless against [`view::MemoryView`].
//!
//! ## Example
//! ```rust
//! use std::rc::Rc;
//! use medibot_web::prelude::*;
//!
//! let config = PageConfig::default();
//! let view = MemoryView::for_config(&config);
//! let client = Rc::new(ChatClient::new("http://localhost:5000", "/chat"));
//! let page = PageController::new(view.clone(), client, config).unwrap();
//!
//! page.init().unwrap();
//! page.toggle_disclosure("readMoreBtn1").unwrap();
//! assert_eq!(view.text("readMoreBtn1").unwrap(), "Read Less");
//!
//! page.enter_detail().unwrap();
//! assert_eq!(page.nav_state().unwrap(), NavState::Detail);
//! ```

pub mod chat;
pub mod client;
pub mod config;
pub mod controller;
pub mod disclosure;
pub mod error;
pub mod navigator;
pub mod transcript;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod dom;

// Re-export common types
pub mod prelude {
    pub use crate::chat::{ChatWidget, PendingReply};
    pub use crate::client::{ChatClient, ChatRequest, ChatResponse, ChatTransport};
    pub use crate::config::{
        ChatConfig, DisclosureLabels, DisclosurePair, PageConfig, SectionConfig, FALLBACK_REPLY,
    };
    pub use crate::controller::PageController;
    pub use crate::disclosure::Disclosures;
    pub use crate::error::{ChatError, PageError, PageResult};
    pub use crate::navigator::{NavState, SectionNavigator};
    pub use crate::transcript::{format_markup, Sender, Transcript, TranscriptEntry};
    pub use crate::view::{ElementKind, MemoryView, RenderedEntry, View, Visibility};
}
