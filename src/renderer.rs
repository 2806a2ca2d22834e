use chrono::{DateTime, NaiveDate};
use serde::Serialize;

use crate::data_models::{Claim, ClaimReview};
use crate::sanitizer::{escape_text, sanitize_url};

pub const MISSING_CLAIM_TEXT: &str = "No claim text";
pub const UNKNOWN: &str = "Unknown";

/// Styling class for a verdict label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictTone {
    Negative,
    Positive,
    Neutral,
}

impl VerdictTone {
    /// Negative if the label contains "false", positive if it contains
    /// "true", neutral otherwise. Case-insensitive.
    pub fn classify(verdict: Option<&str>) -> Self {
        let Some(verdict) = verdict else {
            return VerdictTone::Neutral;
        };
        let lower = verdict.to_lowercase();
        if lower.contains("false") {
            VerdictTone::Negative
        } else if lower.contains("true") {
            VerdictTone::Positive
        } else {
            VerdictTone::Neutral
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            VerdictTone::Negative => "verdict verdict-negative",
            VerdictTone::Positive => "verdict verdict-positive",
            VerdictTone::Neutral => "verdict verdict-neutral",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSection {
    pub publisher: String,
    pub publisher_site: Option<String>,
    pub verdict: String,
    pub tone: VerdictTone,
    pub title: Option<String>,
    pub reviewed_on: Option<String>,
    /// Already passed through [`sanitize_url`].
    pub url: Option<String>,
    pub language: Option<String>,
}

impl ReviewSection {
    pub fn from_review(review: &ClaimReview) -> Self {
        let verdict = review.textual_rating.as_deref();
        ReviewSection {
            publisher: review.publisher_name().unwrap_or(UNKNOWN).to_string(),
            publisher_site: review.publisher.as_ref().and_then(|p| p.site.clone()),
            verdict: verdict.unwrap_or(UNKNOWN).to_string(),
            tone: VerdictTone::classify(verdict),
            title: review.title.clone(),
            reviewed_on: review.review_date.as_deref().map(format_review_date),
            url: review.url.as_deref().map(|u| sanitize_url(u).to_string()),
            language: review.language_code.clone(),
        }
    }

    pub fn to_html(&self) -> String {
        let mut html = match &self.language {
            Some(lang) => format!("<div class=\"review\" lang=\"{}\">", escape_text(lang)),
            None => String::from("<div class=\"review\">"),
        };
        html.push_str(&format!(
            "<p><strong>Publisher:</strong> {}",
            escape_text(&self.publisher)
        ));
        if let Some(site) = &self.publisher_site {
            html.push_str(&format!(
                " <span class=\"publisher-site\">({})</span>",
                escape_text(site)
            ));
        }
        html.push_str("</p>");
        html.push_str(&format!(
            "<p><strong>Verdict:</strong> <span class=\"{}\">{}</span></p>",
            self.tone.css_class(),
            escape_text(&self.verdict)
        ));
        if let Some(title) = &self.title {
            html.push_str(&format!(
                "<p class=\"review-title\">{}</p>",
                escape_text(title)
            ));
        }
        if let Some(date) = &self.reviewed_on {
            html.push_str(&format!(
                "<p class=\"review-date\">Reviewed on: {}</p>",
                escape_text(date)
            ));
        }
        if let Some(url) = &self.url {
            html.push_str(&format!(
                "<a class=\"review-link\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">Read full review</a>",
                escape_text(url)
            ));
        }
        html.push_str("</div>");
        html
    }
}

/// Display form of one claim.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultBlock {
    pub claim_text: String,
    pub claimant: Option<String>,
    pub claimed_on: Option<String>,
    pub reviews: Vec<ReviewSection>,
}

impl ResultBlock {
    pub fn from_claim(claim: &Claim) -> Self {
        ResultBlock {
            claim_text: claim
                .text
                .clone()
                .unwrap_or_else(|| MISSING_CLAIM_TEXT.to_string()),
            claimant: claim.claimant.clone(),
            claimed_on: claim.claim_date.as_deref().map(format_review_date),
            reviews: claim
                .claim_review
                .iter()
                .map(ReviewSection::from_review)
                .collect(),
        }
    }

    pub fn to_html(&self) -> String {
        let mut html = String::from("<div class=\"result\">");
        html.push_str(&format!(
            "<p class=\"claim-text\">{}</p>",
            escape_text(&self.claim_text)
        ));
        if let Some(claimant) = &self.claimant {
            html.push_str(&format!(
                "<p class=\"claimant\">Claimed by: {}</p>",
                escape_text(claimant)
            ));
        }
        if let Some(date) = &self.claimed_on {
            html.push_str(&format!(
                "<p class=\"claim-date\">Claimed on: {}</p>",
                escape_text(date)
            ));
        }
        for review in &self.reviews {
            html.push_str(&review.to_html());
        }
        html.push_str("</div>");
        html
    }
}

/// Formats an ISO-8601 review or claim date for display. Unparseable input is shown
/// as-is (escaping happens at render time).
pub fn format_review_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%B %-d, %Y").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%B %-d, %Y").to_string();
    }
    raw.to_string()
}

/// Accumulated result blocks for the current query.
#[derive(Debug, Clone, Default)]
pub struct RenderedResults {
    blocks: Vec<ResultBlock>,
}

impl RenderedResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(items: &[Claim]) -> Vec<ResultBlock> {
        items.iter().map(ResultBlock::from_claim).collect()
    }

    /// New query: drop what was there.
    pub fn replace(&mut self, items: &[Claim]) {
        self.blocks = Self::render(items);
    }

    /// Load more: keep what was there.
    pub fn append(&mut self, items: &[Claim]) {
        self.blocks.extend(Self::render(items));
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    pub fn blocks(&self) -> &[ResultBlock] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn to_html(&self) -> String {
        self.blocks.iter().map(ResultBlock::to_html).collect()
    }
}
