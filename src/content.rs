//! Break content fetching
//!
//! Assembles the content shown at the start of a break: a local break
//! suggestion, a motivational quote and a fun fact. The quote and fact
//! come from remote APIs, each with a secondary API fallback and a
//! built-in final fallback, so assembling content never fails even when
//! the network does.

use crate::config::ContentConfig;
use crate::error::{FocustrackError, Result};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Deserialize;
use std::time::Duration;

const BREAK_SUGGESTIONS: &[&str] = &[
    "Take a 5-minute walk to refresh your mind",
    "Drink a glass of water to stay hydrated",
    "Do some deep breathing exercises",
    "Look away from screens and focus on something distant",
    "Do some light stretching exercises",
    "Listen to your favorite song",
    "Water your plants or step outside for fresh air",
    "Make yourself a warm drink",
    "Send a quick message to a friend or family member",
    "Do a quick brain teaser or puzzle",
];

const FALLBACK_QUOTES: &[&str] = &[
    "\"Success is not final, failure is not fatal: it is the courage to continue that counts.\" - Winston Churchill",
    "\"It always seems impossible until it's done.\" - Nelson Mandela",
    "\"The secret of getting ahead is getting started.\" - Mark Twain",
    "\"Don't watch the clock; do what it does. Keep going.\" - Sam Levenson",
    "\"Concentrate all your thoughts upon the work in hand.\" - Alexander Graham Bell",
];

const FALLBACK_FUN_FACT: &str =
    "Did you know? Taking breaks improves focus and productivity!";

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    quote: String,
    author: String,
}

#[derive(Debug, Deserialize)]
struct AdviceResponse {
    slip: AdviceSlip,
}

#[derive(Debug, Deserialize)]
struct AdviceSlip {
    #[allow(dead_code)]
    id: u32,
    advice: String,
}

#[derive(Debug, Deserialize)]
struct CatFactResponse {
    fact: String,
}

/// Content shown at the start of a break
#[derive(Debug, Clone)]
pub struct BreakContent {
    pub suggestion: String,
    pub quote: String,
    pub fun_fact: String,
}

/// Fetches break content from the configured APIs
pub struct BreakContentService {
    client: reqwest::Client,
    config: ContentConfig,
}

impl BreakContentService {
    /// Create a service from content configuration
    pub fn new(config: ContentConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { client, config }
    }

    /// Pick a random local break suggestion
    pub fn random_suggestion(&self) -> String {
        random_suggestion()
    }

    /// Assemble break content, fetching the remote pieces concurrently
    ///
    /// Never fails: every remote failure falls back, ultimately to
    /// built-in content.
    pub async fn fetch_break_content(&self) -> BreakContent {
        let (quote, fun_fact) = tokio::join!(self.fetch_quote(), self.fetch_fun_fact());

        let quote = quote.unwrap_or_else(|e| {
            tracing::debug!("quote APIs unavailable, using local quote: {}", e);
            random_local_quote()
        });

        let fun_fact = fun_fact.unwrap_or_else(|e| {
            tracing::debug!("fact APIs unavailable, using local fact: {}", e);
            FALLBACK_FUN_FACT.to_string()
        });

        BreakContent {
            suggestion: self.random_suggestion(),
            quote,
            fun_fact,
        }
    }

    /// Quote endpoint, with the advice endpoint as fallback
    async fn fetch_quote(&self) -> Result<String> {
        match self.fetch_motivational_quote().await {
            Ok(quote) => Ok(quote),
            Err(e) => {
                tracing::debug!("quote API failed, trying advice API: {}", e);
                self.fetch_advice().await
            }
        }
    }

    async fn fetch_motivational_quote(&self) -> Result<String> {
        let response: QuoteResponse = self
            .client
            .get(&self.config.quote_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(format!("\"{}\" - {}", response.quote, response.author))
    }

    async fn fetch_advice(&self) -> Result<String> {
        let response: AdviceResponse = self
            .client
            .get(&self.config.advice_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.slip.advice)
    }

    /// Fact endpoint, with the number-fact endpoint as fallback
    async fn fetch_fun_fact(&self) -> Result<String> {
        match self.fetch_cat_fact().await {
            Ok(fact) => Ok(fact),
            Err(e) => {
                tracing::debug!("fact API failed, trying number API: {}", e);
                self.fetch_number_fact().await
            }
        }
    }

    async fn fetch_cat_fact(&self) -> Result<String> {
        let response: CatFactResponse = self
            .client
            .get(&self.config.fact_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(format!("Fun fact: {}", response.fact))
    }

    async fn fetch_number_fact(&self) -> Result<String> {
        let number = rand::rng().random_range(1..=365);
        let url = format!(
            "{}/{}",
            self.config.number_fact_url.trim_end_matches('/'),
            number
        );

        let fact = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        if fact.trim().is_empty() {
            return Err(FocustrackError::Fetch("empty number fact response".into()).into());
        }

        Ok(format!("Did you know? {}", fact.trim()))
    }
}

/// Pick a random local break suggestion
pub fn random_suggestion() -> String {
    BREAK_SUGGESTIONS
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or("Take a short break and relax!")
        .to_string()
}

/// Pick a random built-in motivational quote
pub fn random_local_quote() -> String {
    FALLBACK_QUOTES
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or("\"Believe in yourself!\"")
        .to_string()
}
