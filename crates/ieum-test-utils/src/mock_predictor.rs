//! Scripted remote predictor for testing without a network.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use ieum_core::error::Result;
use ieum_core::remote::{PredictionRequest, PredictionResponse, Predictor};

/// Predictor that replays scripted responses.
///
/// Queued responses are consumed first; once the queue is empty the
/// sticky response (if any) answers every call, and with neither
/// configured the mock fails like a dead remote.
#[derive(Debug, Default)]
pub struct MockPredictor {
    queue: Mutex<VecDeque<Result<PredictionResponse>>>,
    sticky: Mutex<Option<PredictionResponse>>,
    delay: Option<Duration>,
    calls: AtomicU64,
    last_request: Mutex<Option<PredictionRequest>>,
}

impl MockPredictor {
    /// Mock with no scripted responses; every call fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock that answers every call with the given continuation.
    pub fn always(content: impl Into<String>) -> Self {
        let mock = Self::new();
        mock.set_sticky(PredictionResponse::ok(content));
        mock
    }

    /// Simulate remote latency on every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queue one response for the next call.
    pub fn enqueue(&self, response: Result<PredictionResponse>) {
        if let Ok(mut queue) = self.queue.lock() {
            queue.push_back(response);
        }
    }

    /// Set the response used once the queue is drained.
    pub fn set_sticky(&self, response: PredictionResponse) {
        if let Ok(mut sticky) = self.sticky.lock() {
            *sticky = Some(response);
        }
    }

    /// Number of predict calls made so far.
    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    /// The most recent request, if any call happened.
    pub fn last_request(&self) -> Option<PredictionRequest> {
        self.last_request.lock().ok().and_then(|r| r.clone())
    }
}

#[async_trait]
impl Predictor for MockPredictor {
    async fn predict(&self, request: PredictionRequest) -> Result<PredictionResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request);
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Ok(mut queue) = self.queue.lock() {
            if let Some(response) = queue.pop_front() {
                return response;
            }
        }
        if let Ok(sticky) = self.sticky.lock() {
            if let Some(response) = sticky.as_ref() {
                return Ok(response.clone());
            }
        }
        Ok(PredictionResponse::failure("no scripted response"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PredictionRequest {
        PredictionRequest {
            text: "본문 내용".into(),
            cursor_position: 5,
            text_before_cursor: "본문 내용".into(),
            current_paragraph: "본문 내용".into(),
        }
    }

    #[tokio::test]
    async fn queue_drains_in_order() {
        let mock = MockPredictor::new();
        mock.enqueue(Ok(PredictionResponse::ok("first")));
        mock.enqueue(Ok(PredictionResponse::ok("second")));

        let a = mock.predict(request()).await.unwrap();
        let b = mock.predict(request()).await.unwrap();
        assert_eq!(a.content.as_deref(), Some("first"));
        assert_eq!(b.content.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn sticky_answers_after_queue() {
        let mock = MockPredictor::always("계속");
        let resp = mock.predict(request()).await.unwrap();
        assert_eq!(resp.content.as_deref(), Some("계속"));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn unscripted_call_fails() {
        let mock = MockPredictor::new();
        let resp = mock.predict(request()).await.unwrap();
        assert!(!resp.success);
    }

    #[tokio::test]
    async fn records_last_request() {
        let mock = MockPredictor::always("x");
        mock.predict(request()).await.unwrap();
        assert_eq!(mock.last_request().unwrap().cursor_position, 5);
    }
}
