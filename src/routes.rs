use std::fmt;

use chrono::{Local, TimeZone};
use reqwest::Url;

use crate::{
    models::SortOrder,
    paths::NEWS_PATH,
    query::{decode_filter_in, decode_sort, NewsFilter, PageOptions, QueryParams},
    util::{parse_int_prefix, to_date_string},
};

/// Pages of the reader: the article list and a single article.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    /// `/` or `/{page}`, optionally `?page=N`, with the search state in the query.
    List {
        page: Option<u32>,
        filter: NewsFilter,
        sort: Option<SortOrder>,
    },
    /// `/news/{id}`.
    Detail { id: String },
}

impl Route {
    /// Unfiltered list route.
    pub fn list(page: Option<u32>) -> Self {
        Self::List {
            page,
            filter: NewsFilter::default(),
            sort: None,
        }
    }

    /// [`Route::parse_in`] reading days in the process' local timezone.
    pub fn parse(target: &str) -> Option<Self> {
        Self::parse_in(target, &Local)
    }

    /// Matches a path with optional query string.
    ///
    /// A `page` query parameter takes precedence over the path segment. Pages
    /// are read by their leading digits, so `/3abc` is page 3; a page with no
    /// digits or a negative one is `None`. List routes also pick up `text`,
    /// `tags`, `sources`, `sort`, `date_from` and `date_to` from the query.
    /// Paths with more segments than either pattern do not match.
    pub fn parse_in<Tz: TimeZone>(target: &str, tz: &Tz) -> Option<Self> {
        let url = Url::parse("http://localhost/").ok()?.join(target).ok()?;

        let segments: Vec<String> = url
            .path_segments()?
            .filter(|s| !s.is_empty())
            .map(|s| {
                urlencoding::decode(s)
                    .map(|d| d.into_owned())
                    .unwrap_or_else(|_| s.to_string())
            })
            .collect();

        let params: QueryParams = url.query_pairs().collect();
        let query_page = params.get("page").map(parse_page);
        let list = |page: Option<u32>| Self::List {
            page,
            filter: decode_filter_in(&params, tz),
            sort: decode_sort(&params),
        };

        match segments.as_slice() {
            [] => Some(list(query_page.flatten())),
            [segment] => Some(list(query_page.unwrap_or_else(|| parse_page(segment)))),
            [news, id] if news == NEWS_PATH => Some(Self::Detail { id: id.clone() }),
            _ => None,
        }
    }

    /// Canonical path of the route, days written in the local timezone.
    pub fn path(&self) -> String {
        self.path_in(&Local)
    }

    pub fn path_in<Tz: TimeZone>(&self, tz: &Tz) -> String {
        match self {
            Self::List { page, filter, sort } => {
                let mut path = match page {
                    Some(page) => format!("/{page}"),
                    None => "/".to_string(),
                };
                let query = location_query(filter, *sort, tz);
                if !query.is_empty() {
                    path.push('?');
                    path.push_str(&query.to_query_string());
                }
                path
            }
            Self::Detail { id } => format!("/{NEWS_PATH}/{}", urlencoding::encode(id)),
        }
    }

    pub fn filter(&self) -> Option<&NewsFilter> {
        match self {
            Self::List { filter, .. } => Some(filter),
            Self::Detail { .. } => None,
        }
    }

    /// Request options for a list route, first page when no page is set.
    pub fn page_options(&self, per_page: u32) -> Option<PageOptions> {
        match self {
            Self::List { page, sort, .. } => {
                let mut opts = PageOptions::for_page(page.unwrap_or(1), per_page);
                opts.sort = *sort;
                Some(opts)
            }
            Self::Detail { .. } => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

fn parse_page(value: &str) -> Option<u32> {
    parse_int_prefix(value).and_then(|page| u32::try_from(page).ok())
}

/// Search state as the reader keeps it in its location: plain repeated keys.
fn location_query<Tz: TimeZone>(filter: &NewsFilter, sort: Option<SortOrder>, tz: &Tz) -> QueryParams {
    let mut params = QueryParams::default();

    if let Some(text) = filter.text.as_deref().filter(|t| !t.is_empty()) {
        params.push("text", text);
    }
    for tag in &filter.tags {
        params.push("tags", tag.as_str());
    }
    for source in &filter.sources {
        params.push("sources", source.as_str());
    }
    if let Some(sort) = sort {
        params.push("sort", sort.code().to_string());
    }
    if let Some(date_from) = &filter.date_from {
        params.push("date_from", to_date_string(date_from, tz));
    }
    if let Some(date_to) = &filter.date_to {
        params.push("date_to", to_date_string(date_to, tz));
    }

    params
}
