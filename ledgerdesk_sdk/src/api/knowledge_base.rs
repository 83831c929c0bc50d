//! The public knowledge base articles.

use http::Method;
use serde::{Deserialize, Serialize};

use crate::{Client, Result};

/// A knowledge base article.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// The unique id of the article.
    pub id: i64,
    /// The title of the article.
    pub title: String,
    /// The body of the article.
    pub content: String,
    /// The category the article is filed under.
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Deserialize)]
struct ArticlesResponse {
    articles: Vec<Article>,
}

#[derive(Deserialize)]
struct ArticleResponse {
    article: Article,
}

/// A handle to the knowledge base endpoints.
#[derive(Clone, Debug)]
pub struct KnowledgeBaseHandle {
    client: Client,
}

impl KnowledgeBaseHandle {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List all knowledge base articles.
    pub async fn articles(&self) -> Result<Vec<Article>> {
        let response: ArticlesResponse = self
            .client
            .send(Method::GET, "/content/knowledge-base", None)
            .await?;

        Ok(response.articles)
    }

    /// Fetch a single article.
    pub async fn article(&self, id: i64) -> Result<Article> {
        let response: ArticleResponse = self
            .client
            .send(Method::GET, &format!("/content/knowledge-base/{}", id), None)
            .await?;

        Ok(response.article)
    }
}
