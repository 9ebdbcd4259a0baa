use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::api::ApiError;

const X_REQUEST_ID: &str = "x-request-id";

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Extracts the caller-supplied `x-request-id` or generates a `UUIDv4`,
/// stores it as a [`RequestId`] extension, and echoes it on the response.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&id) {
        res.headers_mut().insert(X_REQUEST_ID, value);
    }

    res
}

#[derive(Debug)]
struct Window {
    started_at: Instant,
    count: usize,
}

/// Fixed-window limiter protecting the lookup surface; every profile lookup
/// can fan out to metered third-party APIs, so unbounded traffic costs money.
#[derive(Debug, Clone)]
pub struct RateLimitState {
    max_requests: usize,
    window: Duration,
    current: Arc<tokio::sync::Mutex<Window>>,
}

impl RateLimitState {
    #[must_use]
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            current: Arc::new(tokio::sync::Mutex::new(Window {
                started_at: Instant::now(),
                count: 0,
            })),
        }
    }

    /// Registers one request, or returns how long the caller must wait when
    /// the current window is already full.
    async fn try_acquire(&self) -> Result<(), Duration> {
        let mut window = self.current.lock().await;
        let elapsed = window.started_at.elapsed();

        if elapsed >= self.window {
            window.started_at = Instant::now();
            window.count = 0;
        }

        if window.count >= self.max_requests {
            return Err(self.window.saturating_sub(elapsed));
        }

        window.count += 1;
        Ok(())
    }
}

/// Rejects requests over the per-window budget with a 429 in the standard
/// error envelope, plus a `Retry-After` hint.
pub async fn enforce_rate_limit(
    State(rate_limit): State<RateLimitState>,
    req: Request,
    next: Next,
) -> Response {
    match rate_limit.try_acquire().await {
        Ok(()) => next.run(req).await,
        Err(retry_after) => {
            let request_id = req
                .extensions()
                .get::<RequestId>()
                .map_or_else(|| "unknown".to_string(), |id| id.0.clone());

            let mut res =
                ApiError::new(request_id, "rate_limited", "rate limit exceeded").into_response();
            let secs = retry_after.as_secs().max(1);
            if let Ok(value) = HeaderValue::from_str(&secs.to_string()) {
                res.headers_mut().insert("retry-after", value);
            }
            res
        }
    }
}
