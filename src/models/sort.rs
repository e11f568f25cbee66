use serde_repr::{Deserialize_repr, Serialize_repr};
use strum::{Display, EnumString};

/// Sort codes understood by the `/news` endpoint.
///
/// Relevance orders only apply to full-text searches; the server falls back
/// to [`SortOrder::PublishedAtDesc`] otherwise.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize_repr,
    Deserialize_repr,
    EnumString,
    Display,
)]
#[repr(u8)]
#[strum(serialize_all = "snake_case")]
pub enum SortOrder {
    #[default]
    PublishedAtDesc = 0,
    PublishedAtAsc = 1,
    RelevanceDesc = 2,
    RelevanceAsc = 3,
}

impl SortOrder {
    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn is_relevance(&self) -> bool {
        matches!(self, Self::RelevanceDesc | Self::RelevanceAsc)
    }
}

impl TryFrom<u8> for SortOrder {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::PublishedAtDesc),
            1 => Ok(Self::PublishedAtAsc),
            2 => Ok(Self::RelevanceDesc),
            3 => Ok(Self::RelevanceAsc),
            other => Err(other),
        }
    }
}
