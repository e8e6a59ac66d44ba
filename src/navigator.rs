//! Home / detail section switching

use crate::config::SectionConfig;
use crate::error::PageResult;
use crate::view::{View, Visibility};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    Home,
    Detail,
}

#[derive(Debug, Clone)]
pub struct SectionNavigator {
    sections: SectionConfig,
}

impl SectionNavigator {
    pub fn new(sections: SectionConfig) -> Self {
        Self { sections }
    }

    /// Page-load initialization: make the home sections visible.
    pub fn show_home<V: View>(&self, view: &V) -> PageResult<()> {
        for id in &self.sections.home {
            view.set_visibility(id, Visibility::Shown)?;
        }
        Ok(())
    }

    pub fn enter_detail<V: View>(&self, view: &V) -> PageResult<()> {
        self.apply(view, NavState::Detail)
    }

    pub fn exit_detail<V: View>(&self, view: &V) -> PageResult<()> {
        self.apply(view, NavState::Home)
    }

    /// Current state, read back from the detail section.
    pub fn state<V: View>(&self, view: &V) -> PageResult<NavState> {
        Ok(match view.visibility(&self.sections.detail)? {
            Visibility::Shown => NavState::Detail,
            Visibility::Hidden => NavState::Home,
        })
    }

    fn apply<V: View>(&self, view: &V, state: NavState) -> PageResult<()> {
        let (home, detail) = match state {
            NavState::Home => (Visibility::Shown, Visibility::Hidden),
            NavState::Detail => (Visibility::Hidden, Visibility::Shown),
        };
        for id in &self.sections.home {
            view.set_visibility(id, home)?;
        }
        view.set_visibility(&self.sections.detail, detail)?;

        log::debug!("navigated to {:?}", state);
        Ok(())
    }
}
