mod dto;
mod news;
mod sort;
mod source;

pub use dto::{NewsDto, NewsHeadDto, NewsListDto};
pub use news::{map_news, map_news_head, map_news_page, News, NewsHead, NewsPage};
pub use sort::SortOrder;
pub use source::{SourceCatalog, SourceCode, SourceInfo};
