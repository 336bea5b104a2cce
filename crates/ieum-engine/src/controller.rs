//! Prediction controller: the event loop driving the pipeline.
//!
//! keystroke -> context extraction -> trigger gate -> cache or remote
//! call -> post-processing -> layout -> overlay. Cancellation flows
//! backward: any context change bumps a generation counter and results
//! tagged with an older generation are discarded on arrival.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use ieum_core::cache::PredictionCache;
use ieum_core::config::PredictionConfig;
use ieum_core::context::{self, EditorSnapshot};
use ieum_core::error::Error;
use ieum_core::measure::TextMeasurer;
use ieum_core::metrics::PredictionMetrics;
use ieum_core::postprocess;
use ieum_core::remote::{PredictionRequest, PredictionResponse, Predictor};
use ieum_core::trigger;

use crate::debounce::Debouncer;
use crate::events::{EditorEvent, KeyAction, OverlayUpdate, classify_key};
use crate::geometry::{CursorPosition, EditorMetrics};
use crate::layout::{self, PredictionLine};
use crate::measure::CharWidthCache;
use crate::overlay::OverlayRenderer;

/// Optional callback invoked on remote failures. The overlay itself
/// never surfaces errors.
pub type ErrorCallback = Box<dyn Fn(&Error) + Send + Sync>;

/// Channel depth for events and updates.
const CHANNEL_CAPACITY: usize = 64;

type RemoteResult = (u64, Duration, ieum_core::Result<PredictionResponse>);

/// Host-side handle to a running controller.
pub struct PredictionHandle {
    /// Inbound editor events.
    pub events: mpsc::Sender<EditorEvent>,
    /// Outbound overlay updates.
    pub updates: mpsc::Receiver<OverlayUpdate>,
    /// Shared pipeline metrics.
    pub metrics: Arc<Mutex<PredictionMetrics>>,
}

/// Event-loop state for the prediction subsystem.
pub struct PredictionController {
    config: PredictionConfig,
    predictor: Arc<dyn Predictor>,
    cache: PredictionCache,
    char_width: CharWidthCache,
    renderer: OverlayRenderer,
    metrics: Arc<Mutex<PredictionMetrics>>,

    events_rx: mpsc::Receiver<EditorEvent>,
    updates_tx: mpsc::Sender<OverlayUpdate>,
    results_tx: mpsc::Sender<RemoteResult>,
    results_rx: mpsc::Receiver<RemoteResult>,

    snapshot: Option<EditorSnapshot>,
    editor_metrics: Option<EditorMetrics>,
    /// Context the in-flight request was issued for.
    pending_context: Option<ieum_core::context::PredictionContext>,
    /// Current prediction generation; stale results are discarded.
    generation: u64,

    input_debounce: Debouncer,
    viewport_debounce: Debouncer,
    error_callback: Option<ErrorCallback>,
}

impl PredictionController {
    /// Build a controller and its host handle.
    pub fn new(
        config: PredictionConfig,
        predictor: Arc<dyn Predictor>,
        measurer: Arc<dyn TextMeasurer>,
    ) -> (Self, PredictionHandle) {
        let (events_tx, events_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (updates_tx, updates_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (results_tx, results_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let metrics = Arc::new(Mutex::new(PredictionMetrics::new()));

        let cache = PredictionCache::new()
            .with_capacity(config.cache_capacity)
            .with_ttl(config.cache_ttl);
        let char_width = CharWidthCache::new(measurer, config.fallback_char_width);
        let input_debounce = Debouncer::new(config.input_debounce);
        let viewport_debounce = Debouncer::new(config.viewport_debounce);

        let controller = Self {
            config,
            predictor,
            cache,
            char_width,
            renderer: OverlayRenderer::new(),
            metrics: Arc::clone(&metrics),
            events_rx,
            updates_tx,
            results_tx,
            results_rx,
            snapshot: None,
            editor_metrics: None,
            pending_context: None,
            generation: 0,
            input_debounce,
            viewport_debounce,
            error_callback: None,
        };

        let handle = PredictionHandle {
            events: events_tx,
            updates: updates_rx,
            metrics,
        };

        (controller, handle)
    }

    /// Install a callback for remote failures.
    pub fn with_error_callback(mut self, callback: ErrorCallback) -> Self {
        self.error_callback = Some(callback);
        self
    }

    /// Build, spawn, and return the handle plus the task.
    pub fn spawn(
        config: PredictionConfig,
        predictor: Arc<dyn Predictor>,
        measurer: Arc<dyn TextMeasurer>,
    ) -> (PredictionHandle, JoinHandle<()>) {
        let (controller, handle) = Self::new(config, predictor, measurer);
        let task = tokio::spawn(controller.run());
        (handle, task)
    }

    /// Run the event loop until shutdown or the event channel closes.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                biased;

                maybe_event = self.events_rx.recv() => {
                    match maybe_event {
                        Some(event) => {
                            if !self.handle_event(event).await {
                                break;
                            }
                        }
                        None => break,
                    }
                }

                Some((generation, latency, result)) = self.results_rx.recv() => {
                    self.handle_result(generation, latency, result).await;
                }

                _ = self.input_debounce.elapsed(), if self.input_debounce.is_armed() => {
                    self.input_debounce.cancel();
                    self.run_pipeline().await;
                }

                _ = self.viewport_debounce.elapsed(), if self.viewport_debounce.is_armed() => {
                    self.viewport_debounce.cancel();
                    self.refresh_layout().await;
                }
            }
        }
        tracing::debug!("prediction controller stopped");
    }

    /// Returns false when the loop should stop.
    async fn handle_event(&mut self, event: EditorEvent) -> bool {
        if !self.config.enabled {
            return !matches!(event, EditorEvent::Shutdown);
        }

        match event {
            EditorEvent::ContentChanged(snapshot) => {
                self.generation += 1;
                self.snapshot = Some(snapshot);
                self.hide().await;
                self.input_debounce.arm();
            }
            EditorEvent::SelectionChanged(snapshot) => {
                self.generation += 1;
                self.snapshot = Some(snapshot);
                self.hide().await;
                self.input_debounce.arm();
            }
            EditorEvent::ViewportChanged(metrics) => {
                self.editor_metrics = Some(metrics);
                self.viewport_debounce.arm();
            }
            EditorEvent::Key(key) => match classify_key(key) {
                KeyAction::Apply => self.apply().await,
                KeyAction::Dismiss | KeyAction::ClearAfterInput => {
                    self.generation += 1;
                    self.input_debounce.cancel();
                    self.hide().await;
                }
                KeyAction::Preserve => {}
            },
            EditorEvent::Shutdown => return false,
        }
        true
    }

    /// Debounced keystroke landed: decide whether to predict.
    async fn run_pipeline(&mut self) {
        let Some(snapshot) = self.snapshot.as_ref() else {
            return;
        };
        let Some(ctx) = context::extract(snapshot) else {
            self.hide().await;
            return;
        };

        let fired = trigger::should_trigger(&ctx);
        self.with_metrics(|m| m.record_trigger(fired));
        if !fired {
            self.hide().await;
            return;
        }

        if let Some(raw) = self.cache.get(&ctx.text, ctx.cursor_position) {
            self.with_metrics(|m| m.record_cache(true));
            tracing::trace!(cursor = ctx.cursor_position, "prediction cache hit");
            self.present(&raw, &ctx).await;
            return;
        }
        self.with_metrics(|m| {
            m.record_cache(false);
            m.record_request();
        });

        let generation = self.generation;
        let request = PredictionRequest::from_context(&ctx);
        self.pending_context = Some(ctx);

        let predictor = Arc::clone(&self.predictor);
        let results = self.results_tx.clone();
        tokio::spawn(async move {
            let started = Instant::now();
            let result = predictor.predict(request).await;
            let _ = results.send((generation, started.elapsed(), result)).await;
        });
    }

    /// A remote result arrived; apply it unless superseded.
    async fn handle_result(
        &mut self,
        generation: u64,
        latency: Duration,
        result: ieum_core::Result<PredictionResponse>,
    ) {
        if generation != self.generation {
            self.with_metrics(|m| m.record_stale());
            tracing::trace!(generation, current = self.generation, "stale result discarded");
            return;
        }
        let ctx = match self.pending_context.take() {
            Some(ctx) => ctx,
            None => return,
        };

        match result {
            Ok(response) => match response.clone().into_content() {
                Some(content) => {
                    self.with_metrics(|m| m.record_latency(latency));
                    self.cache.set(&ctx.text, ctx.cursor_position, content.clone());
                    self.present(&content, &ctx).await;
                }
                None => {
                    let error = Error::remote(
                        response.error.unwrap_or_else(|| "empty prediction".into()),
                    );
                    self.report_failure(&error).await;
                }
            },
            Err(error) => self.report_failure(&error).await,
        }
    }

    /// Post-process, lay out, and show a raw prediction.
    async fn present(&mut self, raw: &str, ctx: &ieum_core::context::PredictionContext) {
        let processed = postprocess::process(raw, ctx);
        if processed.is_empty() {
            tracing::trace!("prediction empty after post-processing");
            self.hide().await;
            return;
        }

        let Some(lines) = self.layout_lines(&processed) else {
            self.hide().await;
            return;
        };

        self.renderer.show(processed.clone(), lines.clone());
        self.with_metrics(|m| m.record_shown());
        self.send_update(OverlayUpdate::Show {
            suggestion: processed,
            lines,
        })
        .await;
    }

    /// Recompute caret geometry and lay out the suggestion.
    ///
    /// Returns `None` when caret or editor metrics are missing; the
    /// overlay cannot be positioned without them.
    fn layout_lines(&mut self, text: &str) -> Option<Vec<PredictionLine>> {
        let caret = self.snapshot.as_ref()?.caret?;
        let metrics = self.editor_metrics.clone()?;
        let width = self.char_width.char_width(&metrics.font);
        let cursor = CursorPosition::compute(&caret, &metrics, width);
        Some(layout::layout(text, &cursor))
    }

    /// Viewport settled: font metrics may have changed, re-derive the
    /// overlay position for the current suggestion.
    async fn refresh_layout(&mut self) {
        self.char_width.invalidate();
        if !self.renderer.is_visible() {
            return;
        }
        let Some(suggestion) = self.renderer.suggestion().map(String::from) else {
            return;
        };
        match self.layout_lines(&suggestion) {
            Some(lines) if !lines.is_empty() => {
                self.renderer.show(suggestion.clone(), lines.clone());
                self.send_update(OverlayUpdate::Show { suggestion, lines }).await;
            }
            _ => self.hide().await,
        }
    }

    /// Tab pressed: hand the suggestion to the host for insertion.
    async fn apply(&mut self) {
        let Some(suggestion) = self.renderer.suggestion().map(String::from) else {
            return;
        };
        self.generation += 1;
        self.renderer.hide();
        self.with_metrics(|m| m.record_applied());
        self.send_update(OverlayUpdate::Applied(suggestion)).await;
    }

    /// Hide the overlay, notifying the host only on an actual change.
    async fn hide(&mut self) {
        if !self.renderer.is_visible() {
            return;
        }
        self.renderer.hide();
        self.send_update(OverlayUpdate::Hide).await;
    }

    /// Remote failure: count it, tell the optional callback, show
    /// nothing. Typing is never interrupted.
    async fn report_failure(&mut self, error: &Error) {
        self.with_metrics(|m| m.record_failure());
        tracing::debug!(%error, "remote prediction failed");
        if let Some(callback) = &self.error_callback {
            callback(error);
        }
        self.hide().await;
    }

    async fn send_update(&self, update: OverlayUpdate) {
        if self.updates_tx.send(update).await.is_err() {
            tracing::trace!("update receiver dropped");
        }
    }

    fn with_metrics(&self, f: impl FnOnce(&mut PredictionMetrics)) {
        if let Ok(mut metrics) = self.metrics.lock() {
            f(&mut metrics);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
