use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::paths::ICONS_PATH;

/// Providers the aggregator ingests from.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SourceCode {
    Ria,
    Iz,
    Lenta,
    Newsdata,
}

impl SourceCode {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Ria => "РИА Новости",
            Self::Iz => "Известия",
            Self::Lenta => "Лента.ру",
            Self::Newsdata => "Newsdata",
        }
    }

    pub fn icon(&self) -> String {
        format!("{ICONS_PATH}/icon-{self}.png")
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    pub name: String,
    pub icon: String,
}

/// Read-only lookup from a source code to its display name and icon.
///
/// Built once and shared; entities only carry the code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceCatalog {
    entries: HashMap<String, SourceInfo>,
}

impl SourceCatalog {
    pub fn new<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, SourceInfo)>,
        K: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn info(&self, code: &str) -> Option<&SourceInfo> {
        self.entries.get(code)
    }

    /// Display name for `code`, or an empty string when the code is unknown.
    pub fn name(&self, code: &str) -> &str {
        self.info(code).map(|i| i.name.as_str()).unwrap_or_default()
    }

    pub fn icon(&self, code: &str) -> Option<&str> {
        self.info(code).map(|i| i.icon.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SourceCatalog {
    fn default() -> Self {
        Self::new(SourceCode::iter().map(|code| {
            (
                code.to_string(),
                SourceInfo {
                    name: code.display_name().to_string(),
                    icon: code.icon(),
                },
            )
        }))
    }
}
