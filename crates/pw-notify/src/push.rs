// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reference push-notification channel: a priority-tagged HTTP API
//! (title, message, priority, optional sound/device), with exponential
//! backoff retry on transient failures and `Retry-After` honored on 429.

use crate::backoff::{delay_for_rate_limit, RetryPolicy};
use crate::channel::{Channel, Dispatch};
use crate::error::ChannelError;
use async_trait::async_trait;
use serde::Serialize;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct HttpPushConfig {
    pub url: String,
    pub user_key: String,
    pub api_token: String,
    pub device: Option<String>,
    pub request_timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for HttpPushConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            user_key: String::new(),
            api_token: String::new(),
            device: None,
            request_timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
        }
    }
}

#[derive(Serialize)]
struct PushBody<'a> {
    user: &'a str,
    token: &'a str,
    title: &'a str,
    message: &'a str,
    priority: i8,
    #[serde(skip_serializing_if = "Option::is_none")]
    sound: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    device: Option<&'a str>,
}

pub struct HttpPushChannel {
    config: HttpPushConfig,
    client: reqwest::Client,
}

impl HttpPushChannel {
    pub fn new(config: HttpPushConfig) -> Result<Self, ChannelError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ChannelError::Permanent(format!("building http client: {e}")))?;
        Ok(Self { config, client })
    }

    async fn post(&self, title: &str, message: &str, priority: i8, sound: Option<&str>) -> Result<(), ChannelError> {
        let body = PushBody {
            user: &self.config.user_key,
            token: &self.config.api_token,
            title,
            message,
            priority,
            sound,
            device: self.config.device.as_deref(),
        };

        let start = Instant::now();
        let mut attempt = 0u32;
        loop {
            let outcome = self.client.post(&self.config.url).json(&body).send().await;
            match classify(outcome).await {
                Ok(()) => return Ok(()),
                Err(Disposition::Permanent(msg)) => return Err(ChannelError::Permanent(msg)),
                Err(Disposition::Transient(msg)) => {
                    if !self.config.retry.should_retry(start.elapsed()) {
                        return Err(ChannelError::Transient(msg));
                    }
                    tokio::time::sleep(self.config.retry.delay_for_attempt(attempt)).await;
                }
                Err(Disposition::RateLimited(retry_after)) => {
                    if !self.config.retry.should_retry(start.elapsed()) {
                        return Err(ChannelError::RateLimited { retry_after, message: "rate limited".into() });
                    }
                    tokio::time::sleep(delay_for_rate_limit(&self.config.retry, attempt, retry_after)).await;
                }
            }
            attempt += 1;
        }
    }
}

enum Disposition {
    Transient(String),
    Permanent(String),
    RateLimited(Option<Duration>),
}

async fn classify(result: Result<reqwest::Response, reqwest::Error>) -> Result<(), Disposition> {
    let response = match result {
        Ok(r) => r,
        Err(e) if e.is_timeout() || e.is_connect() => return Err(Disposition::Transient(e.to_string())),
        Err(e) => return Err(Disposition::Permanent(e.to_string())),
    };
    classify_status(response.status().as_u16(), retry_after_header(&response))
}

fn retry_after_header(response: &reqwest::Response) -> Option<Duration> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_secs)
}

/// Pure status-code classification, exercised directly in tests without a
/// network round trip.
fn classify_status(status: u16, retry_after: Option<Duration>) -> Result<(), Disposition> {
    match status {
        200..=299 => Ok(()),
        429 => Err(Disposition::RateLimited(retry_after)),
        400..=499 => Err(Disposition::Permanent(format!("http {status}"))),
        500..=599 => Err(Disposition::Transient(format!("http {status}"))),
        other => Err(Disposition::Permanent(format!("unexpected http {other}"))),
    }
}

#[async_trait]
impl Channel for HttpPushChannel {
    fn name(&self) -> &str {
        "http-push"
    }

    async fn send(&self, dispatch: &Dispatch) -> Result<(), ChannelError> {
        self.post(&dispatch.title, &dispatch.message, dispatch.priority.0, dispatch.sound.as_deref()).await
    }

    async fn test(&self, message: &str) -> Result<(), ChannelError> {
        self.post("pulsewatch test", message, 0, None).await
    }
}

#[cfg(test)]
#[path = "push_tests.rs"]
mod tests;
