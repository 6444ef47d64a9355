use super::UpstreamClient;
use crate::catalog::Locale;
use crate::error::UpstreamError;
use crate::feed::{self, MAX_NEWS_ITEMS};
use crate::models::NewsItem;

impl UpstreamClient {
    /// Latest headlines mentioning `city`, localized to the city's language
    pub async fn news(&self, city: &str, locale: &Locale) -> Result<Vec<NewsItem>, UpstreamError> {
        let region = locale.region();
        let url = format!(
            "{}?q={}&hl={}&gl={}&ceid={}:{}",
            self.config().endpoints.news_url,
            urlencoding::encode(city),
            urlencoding::encode(&locale.locale),
            urlencoding::encode(region),
            urlencoding::encode(region),
            urlencoding::encode(&locale.lang)
        );

        let body = self.get_text(&url).await?;
        Ok(feed::extract_items(&body, MAX_NEWS_ITEMS))
    }
}
