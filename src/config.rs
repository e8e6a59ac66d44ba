//! Page configuration: which element ids the controller binds to.
//!
//! The defaults match the MediBot landing page. A page can override any field
//! with a (partial) JSON object in a `<script type="application/json"
//! id="medibot-config">` block, read when the controller mounts.

use serde::{Deserialize, Serialize};

use crate::error::{PageError, PageResult};

pub const READ_MORE_LABEL: &str = "Read More";
pub const READ_LESS_LABEL: &str = "Read Less";
pub const FALLBACK_REPLY: &str = "Error connecting to the server. Please check backend.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub disclosures: Vec<DisclosurePair>,
    pub sections: SectionConfig,
    pub chat: ChatConfig,
    pub labels: DisclosureLabels,
}

/// A trigger control plus the panel it shows and hides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisclosurePair {
    pub trigger_id: String,
    pub panel_id: String,
}

impl DisclosurePair {
    pub fn new(trigger_id: impl Into<String>, panel_id: impl Into<String>) -> Self {
        Self {
            trigger_id: trigger_id.into(),
            panel_id: panel_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionConfig {
    /// Sections visible on the home view
    pub home: Vec<String>,
    /// The single section shown by the detail view
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub send_button_id: String,
    pub input_id: String,
    pub messages_id: String,
    /// Path of the chat endpoint, resolved against the page origin
    pub endpoint: String,
    pub fallback_reply: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisclosureLabels {
    pub collapsed: String,
    pub expanded: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            disclosures: (1..=3)
                .map(|i| DisclosurePair::new(format!("readMoreBtn{i}"), format!("moreContent{i}")))
                .collect(),
            sections: SectionConfig::default(),
            chat: ChatConfig::default(),
            labels: DisclosureLabels::default(),
        }
    }
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self {
            home: vec!["section1".into(), "section2".into(), "section3".into()],
            detail: "section4".into(),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            send_button_id: "send-btn".into(),
            input_id: "user-input".into(),
            messages_id: "chat-messages".into(),
            endpoint: "/chat".into(),
            fallback_reply: FALLBACK_REPLY.into(),
        }
    }
}

impl Default for DisclosureLabels {
    fn default() -> Self {
        Self {
            collapsed: READ_MORE_LABEL.into(),
            expanded: READ_LESS_LABEL.into(),
        }
    }
}

impl PageConfig {
    /// Parse a config from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> PageResult<Self> {
        let config: PageConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would make the section groups overlap
    /// or bind two handlers to one trigger.
    pub fn validate(&self) -> PageResult<()> {
        if self.sections.home.iter().any(|id| *id == self.sections.detail) {
            return Err(PageError::InvalidConfig(format!(
                "section '{}' is in both the home and detail groups",
                self.sections.detail
            )));
        }

        for (i, pair) in self.disclosures.iter().enumerate() {
            if self.disclosures[..i].iter().any(|p| p.trigger_id == pair.trigger_id) {
                return Err(PageError::InvalidConfig(format!(
                    "trigger '{}' is configured twice",
                    pair.trigger_id
                )));
            }
        }

        if !self.chat.endpoint.starts_with('/') {
            return Err(PageError::InvalidConfig(format!(
                "chat endpoint '{}' must be an absolute path",
                self.chat.endpoint
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ids() {
        let config = PageConfig::default();
        assert_eq!(config.disclosures.len(), 3);
        assert_eq!(config.disclosures[2], DisclosurePair::new("readMoreBtn3", "moreContent3"));
        assert_eq!(config.sections.home, vec!["section1", "section2", "section3"]);
        assert_eq!(config.sections.detail, "section4");
        assert_eq!(config.chat.endpoint, "/chat");
        assert_eq!(config.chat.fallback_reply, FALLBACK_REPLY);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = PageConfig::from_json(r#"{"chat": {"endpoint": "/api/chat"}}"#).unwrap();
        assert_eq!(config.chat.endpoint, "/api/chat");
        assert_eq!(config.chat.input_id, "user-input");
        assert_eq!(config.labels.expanded, READ_LESS_LABEL);
        assert_eq!(config.disclosures.len(), 3);
    }

    #[test]
    fn test_overlapping_sections_rejected() {
        let json = r#"{"sections": {"home": ["a", "b"], "detail": "b"}}"#;
        assert!(matches!(
            PageConfig::from_json(json),
            Err(PageError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_duplicate_trigger_rejected() {
        let mut config = PageConfig::default();
        config.disclosures.push(DisclosurePair::new("readMoreBtn1", "other"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            PageConfig::from_json("{not json"),
            Err(PageError::InvalidConfig(_))
        ));
    }
}
