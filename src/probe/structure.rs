use async_trait::async_trait;
use reqwest::{Client, Url};
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::SitescopeError;

/// Fixed set of SEO-structure facts derived from one page fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureReport {
    pub title: String,
    pub meta_description: Option<String>,
    pub has_h1: bool,
    pub images_have_alt: bool,
    pub has_robots_txt: bool,
    pub has_sitemap: bool,
    pub recommendations: Vec<String>,
}

#[async_trait]
pub trait StructureProbe: Send + Sync {
    async fn probe(&self, url: &str) -> Result<StructureReport, SitescopeError>;
}

pub struct HttpStructureProbe {
    client: Client,
}

impl HttpStructureProbe {
    pub fn new() -> Self {
        Self { client: Client::new() }
    }
}

impl Default for HttpStructureProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StructureProbe for HttpStructureProbe {
    async fn probe(&self, url: &str) -> Result<StructureReport, SitescopeError> {
        let base = Url::parse(url)
            .map_err(|e| SitescopeError::Fetch(format!("invalid URL '{}': {}", url, e)))?;

        let resp = self
            .client
            .get(base.clone())
            .send()
            .await
            .map_err(|e| SitescopeError::Fetch(format!("page fetch failed: {}", e)))?;
        if !resp.status().is_success() {
            return Err(SitescopeError::Fetch(format!(
                "page fetch returned {}",
                resp.status()
            )));
        }
        let body = resp
            .text()
            .await
            .map_err(|e| SitescopeError::Fetch(format!("page body read failed: {}", e)))?;

        // Parsing happens in a sync helper: scraper's Html is not Send and
        // must not be held across an await point.
        let facts = derive_page(&body);

        let has_robots_txt = self.path_exists(&base, "/robots.txt").await;
        let has_sitemap = self.path_exists(&base, "/sitemap.xml").await;
        debug!(url = %base, has_robots_txt, has_sitemap, "Structure probe complete");

        let recommendations = build_recommendations(&facts);
        Ok(StructureReport {
            title: facts.title,
            meta_description: facts.meta_description,
            has_h1: facts.has_h1,
            images_have_alt: facts.images_have_alt,
            has_robots_txt,
            has_sitemap,
            recommendations,
        })
    }
}

impl HttpStructureProbe {
    /// Tolerant existence probe: any failure, network or HTTP, reads as
    /// "not present" and never surfaces as an error.
    async fn path_exists(&self, base: &Url, path: &str) -> bool {
        let Ok(target) = base.join(path) else {
            return false;
        };
        match self.client.get(target).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PageFacts {
    pub title: String,
    pub meta_description: Option<String>,
    pub has_h1: bool,
    pub images_have_alt: bool,
}

/// Best-effort markup analysis. scraper recovers from malformed HTML, so
/// broken pages still yield facts rather than a probe failure.
pub(crate) fn derive_page(html: &str) -> PageFacts {
    let doc = Html::parse_document(html);

    let title_sel = Selector::parse("title").unwrap();
    let h1_sel = Selector::parse("h1").unwrap();
    let img_sel = Selector::parse("img").unwrap();
    let meta_sel = Selector::parse("meta[name='description']").unwrap();

    let title = doc
        .select(&title_sel)
        .next()
        .map(|t| t.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let meta_description = doc
        .select(&meta_sel)
        .next()
        .and_then(|m| m.value().attr("content"))
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    let has_h1 = doc.select(&h1_sel).next().is_some();

    // Vacuously true for zero images.
    let images_have_alt = doc
        .select(&img_sel)
        .all(|img| img.value().attr("alt").map(|a| !a.trim().is_empty()).unwrap_or(false));

    PageFacts { title, meta_description, has_h1, images_have_alt }
}

/// Rule order is fixed: meta description, title, H1, alt tags. Each rule is
/// independent; several can apply to one page.
pub(crate) fn build_recommendations(facts: &PageFacts) -> Vec<String> {
    let mut recommendations = Vec::new();
    if facts.meta_description.is_none() {
        recommendations
            .push("Add a meta description to improve how your site appears in search results.".to_string());
    }
    if facts.title.is_empty() {
        recommendations.push("Add a title tag so search engines can identify your page.".to_string());
    }
    if !facts.has_h1 {
        recommendations
            .push("Add an H1 heading so search engines understand your page topic.".to_string());
    }
    if !facts.images_have_alt {
        recommendations.push("Add descriptive alt text to all images.".to_string());
    }
    recommendations
}
