use futures_concurrency::prelude::*;
use tracing::{debug, instrument};

use crate::{
    client::NewsClient,
    error::ClientError,
    http::{HttpClient, HttpRequest},
    models::{map_news, map_news_page, News, NewsDto, NewsListDto, NewsPage},
    paths::NEWS_PATH,
    query::{encode_query, NewsFilter, PageOptions},
};

impl NewsClient {
    /// One page of article summaries matching `filter`.
    ///
    /// Any status other than 200 fails with [`ClientError::RequestFailed`].
    #[instrument(skip(self))]
    pub async fn list_heads(
        &self,
        filter: &NewsFilter,
        opts: &PageOptions,
    ) -> Result<NewsPage, ClientError> {
        let params = encode_query(filter, opts)?;

        let dto = self
            .request::<NewsListDto>(HttpRequest::get([NEWS_PATH]).queries(params))
            .await?;

        let page = map_news_page(dto)?;
        debug!(
            count = page.count,
            total_count = page.total_count,
            "Mapped news page"
        );

        Ok(page)
    }

    /// A full article. A missing article is a `RequestFailed(404)` like any other status.
    #[instrument(skip(self, id), fields(id = %id.as_ref()))]
    pub async fn get_by_id(&self, id: impl AsRef<str>) -> Result<News, ClientError> {
        let dto = self
            .request::<NewsDto>(HttpRequest::get([NEWS_PATH, id.as_ref()]))
            .await?;

        Ok(map_news(dto)?)
    }

    /// Fetches several articles concurrently, returned in the order of `ids`.
    ///
    /// Each id is its own round trip, repeated ids included. The first failure fails the call.
    pub async fn get_many<I, S>(&self, ids: I) -> Result<Vec<News>, ClientError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let futures: Vec<_> = ids
            .into_iter()
            .map(|id| async move { self.get_by_id(id).await })
            .collect();

        if futures.is_empty() {
            return Ok(Vec::new());
        }

        futures.try_join().await
    }
}
