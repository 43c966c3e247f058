use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Platforms a result can come from. This is the filter key behind the
/// platform tabs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Platform {
    LinkedIn,
    Facebook,
    Instagram,
    Twitter,
    YouTube,
    TikTok,
    Web,
}

impl Platform {
    pub const ALL: [Platform; 7] = [
        Platform::LinkedIn,
        Platform::Facebook,
        Platform::Instagram,
        Platform::Twitter,
        Platform::YouTube,
        Platform::TikTok,
        Platform::Web,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Platform::LinkedIn => "LinkedIn",
            Platform::Facebook => "Facebook",
            Platform::Instagram => "Instagram",
            Platform::Twitter => "Twitter",
            Platform::YouTube => "YouTube",
            Platform::TikTok => "TikTok",
            Platform::Web => "Web",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let wanted = value.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(wanted))
    }

    /// Only these platforms open a profile view when clicked.
    pub fn has_profile_view(self) -> bool {
        matches!(self, Platform::LinkedIn | Platform::Facebook)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tabs that do not correspond to a platform. They currently show the
/// unfiltered result set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum VirtualTab {
    Videos,
    ShortVideos,
    Images,
    News,
    Shopping,
}

impl VirtualTab {
    pub const ALL: [VirtualTab; 5] = [
        VirtualTab::Videos,
        VirtualTab::ShortVideos,
        VirtualTab::Images,
        VirtualTab::News,
        VirtualTab::Shopping,
    ];

    pub fn label(self) -> &'static str {
        match self {
            VirtualTab::Videos => "Videos",
            VirtualTab::ShortVideos => "Short videos",
            VirtualTab::Images => "Images",
            VirtualTab::News => "News",
            VirtualTab::Shopping => "Shopping",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    All,
    Platform(Platform),
    Virtual(VirtualTab),
    /// Anything else. Passes through without filtering.
    Unrecognized(String),
}

impl Category {
    /// Tab bar order.
    pub const TABS: [Category; 7] = [
        Category::All,
        Category::Platform(Platform::LinkedIn),
        Category::Platform(Platform::Facebook),
        Category::Virtual(VirtualTab::Videos),
        Category::Virtual(VirtualTab::Images),
        Category::Virtual(VirtualTab::News),
        Category::Virtual(VirtualTab::Shopping),
    ];

    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Category::All;
        }
        if let Some(platform) = Platform::parse(trimmed) {
            return Category::Platform(platform);
        }
        if let Some(tab) = VirtualTab::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(trimmed))
        {
            return Category::Virtual(tab);
        }
        Category::Unrecognized(trimmed.to_string())
    }

    pub fn label(&self) -> &str {
        match self {
            Category::All => "All",
            Category::Platform(p) => p.label(),
            Category::Virtual(t) => t.label(),
            Category::Unrecognized(raw) => raw.as_str(),
        }
    }

    pub fn platform(&self) -> Option<Platform> {
        match self {
            Category::Platform(p) => Some(*p),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SearchResult {
    pub id: String,
    pub platform: Platform,
    pub display_name: String,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct FeaturedImage {
    pub id: String,
    pub title: String,
    pub source: String,
    pub image_url: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    #[default]
    Exact,
    Contains,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AvatarOverride {
    pub pattern: String,
    #[serde(default)]
    pub mode: MatchMode,
    pub url: String,
}

impl AvatarOverride {
    pub fn matches(&self, result_id: &str) -> bool {
        let id = result_id.to_lowercase();
        let pattern = self.pattern.to_lowercase();
        match self.mode {
            MatchMode::Exact => id == pattern,
            MatchMode::Contains => id.contains(&pattern),
        }
    }
}

/// The immutable fixture a session renders. Loaded once, then shared.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Dataset {
    #[serde(default)]
    pub scenario: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub results: Vec<SearchResult>,
    #[serde(default)]
    pub featured_images: Vec<FeaturedImage>,
    #[serde(default)]
    pub related_searches: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub avatar_overrides: Vec<AvatarOverride>,
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset: {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML dataset: {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to parse JSON dataset: {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate result id '{id}'")]
    DuplicateId { id: String },

    #[error("result at position {index} has an empty id")]
    EmptyId { index: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DatasetFormat {
    Yaml,
    Json,
}

impl DatasetFormat {
    pub fn from_path(path: &Path) -> Self {
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if is_json {
            Self::Json
        } else {
            Self::Yaml
        }
    }
}

impl Dataset {
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let contents = std::fs::read_to_string(path).map_err(|source| DatasetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = match DatasetFormat::from_path(path) {
            DatasetFormat::Json => {
                serde_json::from_str::<Dataset>(&contents).map_err(|source| DatasetError::Json {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            DatasetFormat::Yaml => {
                serde_yaml::from_str::<Dataset>(&contents).map_err(|source| DatasetError::Yaml {
                    path: path.to_path_buf(),
                    source,
                })?
            }
        };
        dataset.validate()?;
        tracing::debug!(
            path = %path.display(),
            results = dataset.results.len(),
            scenario = dataset.scenario.as_str(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, DatasetError> {
        let dataset =
            serde_yaml::from_str::<Dataset>(contents).map_err(|source| DatasetError::Yaml {
                path: PathBuf::from("<inline>"),
                source,
            })?;
        dataset.validate()?;
        Ok(dataset)
    }

    pub fn validate(&self) -> Result<(), DatasetError> {
        let mut seen: HashSet<&str> = HashSet::new();
        for (index, r) in self.results.iter().enumerate() {
            if r.id.trim().is_empty() {
                return Err(DatasetError::EmptyId { index });
            }
            if !seen.insert(r.id.as_str()) {
                return Err(DatasetError::DuplicateId { id: r.id.clone() });
            }
        }
        Ok(())
    }

    pub fn find(&self, id: &str) -> Option<&SearchResult> {
        self.results.iter().find(|r| r.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
