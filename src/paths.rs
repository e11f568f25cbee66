pub const NEWS_PATH: &str = "news";

pub const BASE_URL_ENV: &str = "NEWS_API_BASE_URL";

pub const ICONS_PATH: &str = "/icons";

/// Page size the aggregator falls back to when none is requested.
pub const DEFAULT_LIMIT: u32 = 20;
