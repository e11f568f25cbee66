use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::DateTimeError,
    models::{NewsDto, NewsHeadDto, NewsListDto},
    util::parse_published_at,
};

/// Summary row of an article, as shown in list views.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsHead {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Source code, resolved through [`crate::models::SourceCatalog`].
    pub source: String,
    pub published_at: DateTime<Utc>,
}

/// Full article. Carries every [`NewsHead`] field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct News {
    pub id: String,
    pub title: String,
    pub description: String,
    pub source: String,
    pub published_at: DateTime<Utc>,
    pub link: String,
    pub authors: Vec<String>,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
    pub content: String,
}

impl News {
    pub fn head(&self) -> NewsHead {
        NewsHead {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            source: self.source.clone(),
            published_at: self.published_at,
        }
    }
}

/// One page of `GET /news`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsPage {
    pub results: Vec<NewsHead>,
    pub count: usize,
    pub total_count: u64,
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

pub fn map_news_head(dto: NewsHeadDto) -> Result<NewsHead, DateTimeError> {
    let published_at = match dto.published_at.as_deref() {
        Some(raw) => parse_published_at(raw)?,
        None => return Err(DateTimeError::parse_error("", "missing published_at")),
    };

    Ok(NewsHead {
        id: dto.id,
        title: dto.title,
        description: dto.description,
        source: dto.source,
        published_at,
    })
}

pub fn map_news(dto: NewsDto) -> Result<News, DateTimeError> {
    let NewsHead {
        id,
        title,
        description,
        source,
        published_at,
    } = map_news_head(dto.head)?;

    Ok(News {
        id,
        title,
        description,
        source,
        published_at,
        link: dto.link,
        authors: dto.authors,
        tags: dto.tags,
        categories: dto.categories,
        content: dto.content,
    })
}

/// Maps a list response, filling `count` with the number of rows when the server omits it.
pub fn map_news_page(dto: NewsListDto) -> Result<NewsPage, DateTimeError> {
    let results = dto
        .results
        .into_iter()
        .map(map_news_head)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(NewsPage {
        count: dto.count.unwrap_or(results.len()),
        total_count: dto.total_count.unwrap_or_default(),
        skip: dto.skip,
        limit: dto.limit,
        results,
    })
}

impl TryFrom<NewsHeadDto> for NewsHead {
    type Error = DateTimeError;

    fn try_from(dto: NewsHeadDto) -> Result<Self, Self::Error> {
        map_news_head(dto)
    }
}

impl TryFrom<NewsDto> for News {
    type Error = DateTimeError;

    fn try_from(dto: NewsDto) -> Result<Self, Self::Error> {
        map_news(dto)
    }
}

impl From<&NewsHead> for NewsHeadDto {
    fn from(head: &NewsHead) -> Self {
        Self {
            id: head.id.clone(),
            title: head.title.clone(),
            description: head.description.clone(),
            source: head.source.clone(),
            published_at: Some(head.published_at.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        }
    }
}

impl From<&News> for NewsDto {
    fn from(news: &News) -> Self {
        Self {
            head: NewsHeadDto::from(&news.head()),
            link: news.link.clone(),
            authors: news.authors.clone(),
            tags: news.tags.clone(),
            categories: news.categories.clone(),
            content: news.content.clone(),
        }
    }
}
