use std::fmt;

use bon::Builder;
use chrono::{DateTime, Local, TimeZone, Utc};
use derive_more::derive::Deref;

use crate::{
    error::DataError,
    models::SortOrder,
    paths::DEFAULT_LIMIT,
    util::{from_date_string, parse_int_prefix, to_date_string},
};

/// What to search for. Every criterion is optional and they combine with AND.
#[derive(Clone, Debug, Default, PartialEq, Eq, Builder)]
pub struct NewsFilter {
    #[builder(into)]
    pub text: Option<String>,
    #[builder(default)]
    pub tags: Vec<String>,
    #[builder(default)]
    pub sources: Vec<String>,
    /// Inclusive, by calendar day.
    pub date_from: Option<DateTime<Utc>>,
    /// Inclusive, by calendar day.
    pub date_to: Option<DateTime<Utc>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Builder)]
pub struct PageOptions {
    #[builder(default = DEFAULT_LIMIT)]
    pub limit: u32,
    pub skip: Option<u32>,
    pub sort: Option<SortOrder>,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            skip: None,
            sort: None,
        }
    }
}

impl PageOptions {
    /// Options for a 1-based `page` of `per_page` rows. Pages 0 and 1 start at the top.
    pub fn for_page(page: u32, per_page: u32) -> Self {
        Self {
            limit: per_page,
            skip: Some(page.saturating_sub(1).saturating_mul(per_page)),
            sort: None,
        }
    }

    #[must_use]
    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = Some(sort);
        self
    }
}

/// Ordered query pairs. Keys may repeat (`tags[]`, `sources[]`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Deref)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Non-empty values of `key`, also found under its bracketed `key[]` form, in order.
    pub fn get_list(&self, key: &str) -> Vec<String> {
        let bracketed = format!("{key}[]");
        self.0
            .iter()
            .filter(|(k, v)| (k == key || *k == bracketed) && !v.is_empty())
            .map(|(_, v)| v.clone())
            .collect()
    }

    /// First value of `key` read as a leading integer.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(parse_int_prefix)
    }

    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.0
    }

    /// Percent-encoded `k=v&k=v` form, without the leading `?`.
    pub fn to_query_string(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

/// Builds the `/news` query with dates truncated to calendar days in `tz`.
///
/// The only failure is a zero `limit`.
pub fn encode_query_in<Tz: TimeZone>(
    filter: &NewsFilter,
    opts: &PageOptions,
    tz: &Tz,
) -> Result<QueryParams, DataError> {
    if opts.limit == 0 {
        return Err(DataError::invalid_value("limit", "0"));
    }

    let mut params = QueryParams::default();
    params.push("limit", opts.limit.to_string());

    if let Some(skip) = opts.skip.filter(|&s| s != 0) {
        params.push("skip", skip.to_string());
    }

    if let Some(sort) = opts.sort.filter(|s| s.code() != 0) {
        params.push("sort", sort.code().to_string());
    }

    if let Some(text) = filter.text.as_deref().filter(|t| !t.is_empty()) {
        params.push("text", text);
    }

    for tag in &filter.tags {
        params.push("tags[]", tag.as_str());
    }

    for source in &filter.sources {
        params.push("sources[]", source.as_str());
    }

    if let Some(date_from) = &filter.date_from {
        params.push("date_from", to_date_string(date_from, tz));
    }

    if let Some(date_to) = &filter.date_to {
        params.push("date_to", to_date_string(date_to, tz));
    }

    Ok(params)
}

/// [`encode_query_in`] using the process' local timezone.
pub fn encode_query(filter: &NewsFilter, opts: &PageOptions) -> Result<QueryParams, DataError> {
    encode_query_in(filter, opts, &Local)
}

/// Reads a filter back from query pairs, either the `/news` request form
/// (`tags[]=a`) or a reader location (`tags=a&tags=b`).
///
/// Empty list values, empty text and unreadable days are dropped.
pub fn decode_filter_in<Tz: TimeZone>(params: &QueryParams, tz: &Tz) -> NewsFilter {
    let day = |key: &str| params.get(key).and_then(|d| from_date_string(d, tz).ok());

    NewsFilter {
        text: params
            .get("text")
            .filter(|t| !t.is_empty())
            .map(str::to_string),
        tags: params.get_list("tags"),
        sources: params.get_list("sources"),
        date_from: day("date_from"),
        date_to: day("date_to"),
    }
}

/// Sort code carried by `sort`; unknown or unreadable codes are `None`.
pub fn decode_sort(params: &QueryParams) -> Option<SortOrder> {
    params
        .get_int("sort")
        .and_then(|code| u8::try_from(code).ok())
        .and_then(|code| SortOrder::try_from(code).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn limit_only(limit: u32) -> PageOptions {
        PageOptions::builder().limit(limit).build()
    }

    #[test]
    fn test_limit_only() {
        let params = encode_query_in(&NewsFilter::default(), &limit_only(15), &Utc).unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("limit"), Some("15"));
        assert_eq!(params.to_query_string(), "limit=15");
    }

    #[test]
    fn test_zero_limit_rejected() {
        let err = encode_query_in(&NewsFilter::default(), &limit_only(0), &Utc).unwrap_err();
        assert!(matches!(err, DataError::InvalidValue { field: "limit", .. }));
    }

    #[test]
    fn test_zero_skip_and_default_sort_omitted() {
        let opts = PageOptions::builder()
            .limit(10)
            .skip(0)
            .sort(SortOrder::PublishedAtDesc)
            .build();
        let params = encode_query_in(&NewsFilter::default(), &opts, &Utc).unwrap();
        assert_eq!(params.to_query_string(), "limit=10");
    }

    #[test]
    fn test_skip_and_sort_present() {
        let opts = PageOptions::builder()
            .limit(10)
            .skip(30)
            .sort(SortOrder::RelevanceDesc)
            .build();
        let params = encode_query_in(&NewsFilter::default(), &opts, &Utc).unwrap();
        assert_eq!(params.to_query_string(), "limit=10&skip=30&sort=2");
    }

    #[test]
    fn test_empty_text_omitted() {
        let filter = NewsFilter::builder().text("").build();
        let params = encode_query_in(&filter, &limit_only(5), &Utc).unwrap();
        assert_eq!(params.get("text"), None);
    }

    #[test]
    fn test_text_not_trimmed() {
        let filter = NewsFilter::builder().text(" выборы ").build();
        let params = encode_query_in(&filter, &limit_only(5), &Utc).unwrap();
        assert_eq!(params.get("text"), Some(" выборы "));
    }

    #[test]
    fn test_tags_repeat_in_order() {
        let tags = vec!["b".to_string(), "a".to_string(), "b".to_string()];
        let filter = NewsFilter::builder().tags(tags).build();
        let params = encode_query_in(&filter, &limit_only(5), &Utc).unwrap();
        let encoded: Vec<_> = params.get_all("tags[]").collect();
        assert_eq!(encoded, vec!["b", "a", "b"]);
        assert_eq!(
            params.to_query_string(),
            "limit=5&tags%5B%5D=b&tags%5B%5D=a&tags%5B%5D=b"
        );
    }

    #[test]
    fn test_sources_repeat() {
        let filter = NewsFilter::builder()
            .sources(vec!["ria".to_string(), "lenta".to_string()])
            .build();
        let params = encode_query_in(&filter, &limit_only(5), &Utc).unwrap();
        assert_eq!(params.get_all("sources[]").count(), 2);
    }

    #[test]
    fn test_dates_use_local_day() {
        let utc_plus_5 = FixedOffset::east_opt(5 * 3600).unwrap();
        let filter = NewsFilter::builder()
            .date_from(Utc.with_ymd_and_hms(2024, 4, 1, 10, 0, 0).unwrap())
            .date_to(Utc.with_ymd_and_hms(2024, 4, 9, 23, 30, 0).unwrap())
            .build();
        let params = encode_query_in(&filter, &limit_only(5), &utc_plus_5).unwrap();
        assert_eq!(params.get("date_from"), Some("2024-04-01"));
        assert_eq!(params.get("date_to"), Some("2024-04-10"));
    }

    #[test]
    fn test_parameter_order() {
        let filter = NewsFilter::builder()
            .text("нефть")
            .tags(vec!["opec".to_string()])
            .sources(vec!["iz".to_string()])
            .date_from(Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap())
            .build();
        let opts = PageOptions::builder().limit(20).skip(20).build();
        let keys: Vec<_> = encode_query_in(&filter, &opts, &Utc)
            .unwrap()
            .into_pairs()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(
            keys,
            vec!["limit", "skip", "text", "tags[]", "sources[]", "date_from"]
        );
    }

    #[test]
    fn test_for_page() {
        assert_eq!(PageOptions::for_page(1, 20).skip, Some(0));
        assert_eq!(PageOptions::for_page(0, 20).skip, Some(0));
        assert_eq!(PageOptions::for_page(3, 20).skip, Some(40));
        assert_eq!(PageOptions::for_page(3, 20).limit, 20);
    }

    #[test]
    fn test_decode_request_form() {
        let filter = NewsFilter::builder()
            .text("нефть")
            .tags(vec!["opec".to_string(), "brent".to_string()])
            .sources(vec!["iz".to_string()])
            .date_from(Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap())
            .date_to(Utc.with_ymd_and_hms(2024, 4, 9, 0, 0, 0).unwrap())
            .build();
        let opts = limit_only(5).with_sort(SortOrder::RelevanceDesc);
        let params = encode_query_in(&filter, &opts, &Utc).unwrap();

        assert_eq!(decode_filter_in(&params, &Utc), filter);
        assert_eq!(decode_sort(&params), Some(SortOrder::RelevanceDesc));
    }

    #[test]
    fn test_decode_drops_empty_and_unreadable_values() {
        let params: QueryParams = [
            ("text", ""),
            ("tags", "a"),
            ("tags", ""),
            ("tags[]", "b"),
            ("sort", "7"),
            ("date_from", "yesterday"),
        ]
        .into_iter()
        .collect();

        let filter = decode_filter_in(&params, &Utc);
        assert_eq!(filter.text, None);
        assert_eq!(filter.tags, vec!["a", "b"]);
        assert_eq!(filter.date_from, None);
        assert_eq!(decode_sort(&params), None);
    }

    #[test]
    fn test_decode_sort_reads_leading_digits() {
        let params: QueryParams = [("sort", "1x"), ("sort", "3")].into_iter().collect();
        assert_eq!(decode_sort(&params), Some(SortOrder::PublishedAtAsc));

        let params: QueryParams = [("sort", "-1")].into_iter().collect();
        assert_eq!(decode_sort(&params), None);
    }
}
