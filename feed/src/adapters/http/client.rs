//! Feed REST API client implementation
//!
//! Speaks the backend's wire format (`post`, `likes`, `reports`,
//! `createdAtEpochMs`) and maps it into domain types.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use urlencoding::encode;

use crate::domain::entities::{ContentItem, ItemId, RawRecommendation, UserId};
use crate::domain::ports::{ActionExecutor, FriendsFeedSource, FriendsPage, RecommendationSource};
use crate::error::{ClientError, FeedError};

/// HTTP client for the feed backend
#[derive(Clone)]
pub struct FeedApiClient {
    http: Client,
    base_url: String,
}

impl FeedApiClient {
    /// Create a client for `base_url` (e.g. `http://localhost:8080/api`)
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ClientError::Configuration("invalid API token".to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn post_url(&self, item_id: &ItemId, action: &str) -> String {
        self.api_url(&format!("/posts/{}/{}", encode(item_id.as_str()), action))
    }

    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| ClientError::Deserialization(e.to_string()))
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// Like `handle_response`, but an empty or unrecognized success body is `None`
    async fn handle_optional_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<Option<T>, ClientError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        if body.trim().is_empty() {
            return Ok(None);
        }

        match serde_json::from_str(&body) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::debug!(error = %e, "Response body is not the expected type, ignoring");
                Ok(None)
            }
        }
    }

    async fn get_friends_page(
        &self,
        user_id: &UserId,
        day_window: u32,
        page_index: u32,
        page_size: u32,
    ) -> Result<FriendsPage, ClientError> {
        let response = self
            .http
            .get(self.api_url("/feed/friends"))
            .query(&[
                ("userId", user_id.as_str().to_string()),
                ("days", day_window.to_string()),
                ("page", page_index.to_string()),
                ("size", page_size.to_string()),
            ])
            .send()
            .await?;

        let page: PageDto<PostDto> = self.handle_response(response).await?;
        Ok(page.into())
    }

    async fn get_recommended(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<RawRecommendation>, ClientError> {
        let response = self
            .http
            .get(self.api_url("/feed/recommended"))
            .query(&[
                ("userId", user_id.as_str().to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await?;

        let recs: Vec<RecommendationDto> = self.handle_response(response).await?;
        Ok(recs.into_iter().map(RawRecommendation::from).collect())
    }

    async fn post_like(&self, item_id: &ItemId) -> Result<ContentItem, ClientError> {
        let response = self
            .http
            .post(self.post_url(item_id, "like"))
            .json(&serde_json::json!({}))
            .send()
            .await?;

        let post: PostDto = self.handle_response(response).await?;
        Ok(post.into())
    }

    async fn post_report(
        &self,
        item_id: &ItemId,
        reason: &str,
    ) -> Result<Option<ContentItem>, ClientError> {
        let response = self
            .http
            .post(self.post_url(item_id, "report"))
            .json(&ReportRequest { reason })
            .send()
            .await?;

        let post: Option<PostDto> = self.handle_optional_response(response).await?;
        Ok(post.map(ContentItem::from))
    }
}

#[async_trait]
impl FriendsFeedSource for FeedApiClient {
    async fn fetch(
        &self,
        user_id: &UserId,
        day_window: u32,
        page_index: u32,
        page_size: u32,
    ) -> Result<FriendsPage, FeedError> {
        Ok(self
            .get_friends_page(user_id, day_window, page_index, page_size)
            .await?)
    }
}

#[async_trait]
impl RecommendationSource for FeedApiClient {
    async fn fetch(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<RawRecommendation>, FeedError> {
        Ok(self.get_recommended(user_id, limit).await?)
    }
}

#[async_trait]
impl ActionExecutor for FeedApiClient {
    async fn like(&self, item_id: &ItemId) -> Result<ContentItem, FeedError> {
        Ok(self.post_like(item_id).await?)
    }

    async fn report(
        &self,
        item_id: &ItemId,
        reason: &str,
    ) -> Result<Option<ContentItem>, FeedError> {
        Ok(self.post_report(item_id, reason).await?)
    }
}

// --- Wire Types ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostDto {
    id: String,
    author_id: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    hashtags: Option<Vec<String>>,
    #[serde(default)]
    likes: u64,
    #[serde(default)]
    reports: u64,
    #[serde(default, alias = "createdAt")]
    created_at_epoch_ms: i64,
}

impl From<PostDto> for ContentItem {
    fn from(dto: PostDto) -> Self {
        ContentItem {
            id: ItemId(dto.id),
            author_id: UserId(dto.author_id),
            text: dto.text,
            hashtags: dto.hashtags.unwrap_or_default(),
            like_count: dto.likes,
            report_count: dto.reports,
            created_at_epoch_millis: dto.created_at_epoch_ms,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageDto<T> {
    content: Vec<T>,
    #[serde(default)]
    page: u32,
    #[serde(default)]
    size: u32,
    total_elements: u64,
}

impl From<PageDto<PostDto>> for FriendsPage {
    fn from(dto: PageDto<PostDto>) -> Self {
        FriendsPage {
            content: dto.content.into_iter().map(ContentItem::from).collect(),
            page: dto.page,
            size: dto.size,
            total_elements: dto.total_elements,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RecommendationDto {
    #[serde(default)]
    post: Option<PostDto>,
    #[serde(default)]
    score: f64,
    #[serde(default)]
    reasons: Option<Vec<String>>,
}

impl From<RecommendationDto> for RawRecommendation {
    fn from(dto: RecommendationDto) -> Self {
        RawRecommendation {
            item: dto.post.map(ContentItem::from),
            score: dto.score,
            reasons: dto.reasons.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ReportRequest<'a> {
    reason: &'a str,
}
