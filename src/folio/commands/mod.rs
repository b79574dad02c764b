use crate::config::FolioConfig;
use crate::gallery::SectionLayout;
use crate::model::ImageRecord;
use crate::tags::TagIndex;
use serde::Serialize;

pub mod browse;
pub mod config;
pub mod helpers;
pub mod layout;
pub mod list;
pub mod search;
pub mod tags;
pub mod urls;
pub mod view;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Where the lightbox ended up after a `view` command.
#[derive(Debug, Clone, Serialize)]
pub struct LightboxView {
    /// Zero-based cursor into the visible sequence.
    pub position: usize,
    pub total: usize,
    pub has_navigation: bool,
    pub record: ImageRecord,
}

/// Structured output of every command. Presentation is left to the caller.
#[derive(Debug, Default, Serialize)]
pub struct CmdResult {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ImageRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<SectionLayout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<TagIndex>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lightbox: Option<LightboxView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<FolioConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_images(mut self, images: Vec<ImageRecord>) -> Self {
        self.images = images;
        self
    }

    pub fn with_values(mut self, values: Vec<String>) -> Self {
        self.values = values;
        self
    }

    pub fn with_sections(mut self, sections: Vec<SectionLayout>) -> Self {
        self.sections = sections;
        self
    }

    pub fn with_tags(mut self, tags: TagIndex) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn with_lightbox(mut self, view: LightboxView) -> Self {
        self.lightbox = Some(view);
        self
    }

    pub fn with_config(mut self, config: FolioConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Location and search input shared by the filtering commands.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Location bar value; `None` or `"all"` means every location.
    pub location: Option<String>,
    pub search: String,
}

impl Selection {
    pub fn new(location: Option<String>, search: impl Into<String>) -> Self {
        Self {
            location,
            search: search.into(),
        }
    }
}
