use std::{num::NonZeroU32, sync::Arc, time::Duration};

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::MovieLookup,
};

pub struct OmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl OmdbClient {
    pub fn new(
        client: reqwest::Client,
        api_key: String,
        base_url: String,
        timeout: Duration,
        rps: u32,
    ) -> Self {
        if api_key.trim().is_empty() {
            tracing::warn!("no OMDB_API_KEY configured; the provider will reject lookups");
        }

        let limiter =
            Arc::new(RateLimiter::direct(Quota::per_second(NonZeroU32::new(rps.max(1)).unwrap())));
        Self { client, api_key, base_url, timeout, limiter }
    }

    /// Resolves a title (and optional release year) to normalized movie
    /// metadata. One bounded attempt, no retries.
    pub async fn lookup(&self, title: &str, year: Option<i32>) -> AppResult<MovieLookup> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::InvalidInput("title must not be empty".to_string()));
        }

        self.limiter.until_ready().await;

        let url = format!("{}/", self.base_url.trim_end_matches('/'));
        let mut req = self
            .client
            .get(url)
            .timeout(self.timeout)
            .query(&[("apikey", self.api_key.as_str()), ("t", title)]);
        if let Some(year) = year {
            req = req.query(&[("y", year)]);
        }

        let payload: OmdbPayload = req.send().await?.error_for_status()?.json().await?;
        tracing::debug!(title = %title, year = ?year, matched = payload.error.is_none(), "omdb lookup");

        normalize(payload)
    }
}

#[derive(Debug, Deserialize)]
struct OmdbPayload {
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Director")]
    director: Option<String>,
    #[serde(rename = "Genre")]
    genre: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

fn normalize(payload: OmdbPayload) -> AppResult<MovieLookup> {
    // OMDb signals "no match" and rejected queries inside a 200 body.
    if let Some(message) = payload.error {
        return Err(AppError::LookupNotFound(message));
    }

    let year_raw = payload.year.unwrap_or_default();
    let Some(year) = parse_year(&year_raw) else {
        return Err(AppError::LookupNotFound(format!(
            "provider returned an unusable year: {year_raw:?}"
        )));
    };

    match (payload.title, payload.director, payload.genre, payload.poster) {
        (Some(title), Some(director), Some(genre), Some(poster)) => {
            Ok(MovieLookup { title, year, director, genre, poster })
        },
        _ => Err(AppError::LookupNotFound("provider response was missing movie fields".to_string())),
    }
}

// OMDb reports years as strings and uses ranges like "2010–2013" for series;
// the leading digits are the release year.
fn parse_year(raw: &str) -> Option<i32> {
    let digits: String = raw.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}
