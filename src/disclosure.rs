//! "Read more" panels

use crate::config::{DisclosureLabels, DisclosurePair};
use crate::error::{PageError, PageResult};
use crate::view::{View, Visibility};

#[derive(Debug, Clone)]
pub struct Disclosures {
    pairs: Vec<DisclosurePair>,
    labels: DisclosureLabels,
}

impl Disclosures {
    pub fn new(pairs: Vec<DisclosurePair>, labels: DisclosureLabels) -> Self {
        Self { pairs, labels }
    }

    /// Handle a click on `trigger_id`. Returns the panel's new visibility.
    pub fn toggle<V: View>(&self, view: &V, trigger_id: &str) -> PageResult<Visibility> {
        let pair = self
            .pairs
            .iter()
            .find(|p| p.trigger_id == trigger_id)
            .ok_or_else(|| PageError::UnknownTrigger(trigger_id.to_string()))?;
        self.toggle_pair(view, pair)
    }

    pub fn toggle_pair<V: View>(&self, view: &V, pair: &DisclosurePair) -> PageResult<Visibility> {
        // Visibility lives only in the panel.
        let next = view.visibility(&pair.panel_id)?.flipped();
        view.set_visibility(&pair.panel_id, next)?;
        view.set_text(&pair.trigger_id, self.label_for(next))?;

        log::debug!("{} -> {:?}", pair.panel_id, next);
        Ok(next)
    }

    fn label_for(&self, visibility: Visibility) -> &str {
        match visibility {
            Visibility::Shown => &self.labels.expanded,
            Visibility::Hidden => &self.labels.collapsed,
        }
    }
}
