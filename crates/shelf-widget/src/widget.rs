//! The overlay state machine.

use crate::render::render_results;
use crate::{Debouncer, SearchSurface, WidgetConfig};
use shelf_commerce::search::SearchResult;
use shelf_data::{FetchClient, FetchError, RequestBuilder, Response};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Where the widget currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    Closed,
    /// Open with nothing rendered.
    Empty,
    /// Open, waiting on a lookup.
    Loading,
    /// Open with result cards.
    Results,
    /// Open with the no-results placeholder.
    EmptyResults,
}

impl WidgetState {
    pub fn is_open(&self) -> bool {
        !matches!(self, WidgetState::Closed)
    }
}

/// Where a pointer interaction landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// Inside the search container.
    Container,
    /// Anywhere else in the overlay or page.
    Outside,
}

/// What the host must do with the DOM event it forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventResponse {
    pub prevent_default: bool,
    pub stop_propagation: bool,
}

/// A lookup for the host to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    /// Sequence number, echoed back through `on_response`.
    pub generation: u64,
    /// Term as typed.
    pub term: String,
    pub request: RequestBuilder,
}

/// Quick-search overlay bound to one page surface.
pub struct SearchWidget<S: SearchSurface> {
    config: WidgetConfig,
    client: FetchClient,
    surface: S,
    debouncer: Debouncer<String>,
    state: WidgetState,
    last_query: String,
    pending_results: Option<Vec<SearchResult>>,
    generation: u64,
}

impl<S: SearchSurface> SearchWidget<S> {
    pub fn new(config: WidgetConfig, surface: S) -> Self {
        let client = FetchClient::new()
            .with_default_header(config.nonce_header.clone(), config.nonce.clone());
        let debouncer = Debouncer::new(config.debounce());
        Self {
            config,
            client,
            surface,
            debouncer,
            state: WidgetState::Closed,
            last_query: String::new(),
            pending_results: None,
            generation: 0,
        }
    }

    pub fn state(&self) -> WidgetState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Last term sent to the endpoint.
    pub fn last_query(&self) -> &str {
        &self.last_query
    }

    /// Results currently rendered, if any.
    pub fn pending_results(&self) -> Option<&[SearchResult]> {
        self.pending_results.as_deref()
    }

    /// When the host should next call `poll`.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.debouncer.deadline()
    }

    /// Toggle control activated.
    pub fn on_toggle(&mut self) -> EventResponse {
        self.open();
        EventResponse {
            prevent_default: true,
            stop_propagation: false,
        }
    }

    /// Close control activated.
    pub fn on_close_clicked(&mut self) -> EventResponse {
        self.close();
        EventResponse::default()
    }

    /// Key released anywhere on the page.
    pub fn on_key_up(&mut self, key: &str) -> EventResponse {
        if key == "Escape" && self.is_open() {
            self.close();
        }
        EventResponse::default()
    }

    /// Pointer interaction while the overlay is shown.
    pub fn on_pointer(&mut self, target: PointerTarget) -> EventResponse {
        match target {
            PointerTarget::Container => EventResponse {
                prevent_default: false,
                stop_propagation: true,
            },
            PointerTarget::Outside => {
                if self.is_open() {
                    self.close();
                }
                EventResponse::default()
            }
        }
    }

    /// Input changed. `value` is the input text after the change.
    pub fn on_input(&mut self, value: &str, now: Duration) {
        self.debouncer.schedule(now, value.to_string());
    }

    /// Advance the clock. Returns a lookup when the input has settled on a
    /// long enough term.
    ///
    /// The term is read from the surface at settle time, so edits made
    /// during the quiet window are honored.
    pub fn poll(&mut self, now: Duration) -> Option<LookupRequest> {
        let scheduled = self.debouncer.poll(now)?;
        let term = self.surface.input_value();
        if term != scheduled {
            debug!(scheduled_len = scheduled.len(), "input changed during debounce window");
        }

        if term.trim().chars().count() < self.config.min_term_chars {
            self.clear_results();
            if self.is_open() {
                self.state = self.open_state();
            }
            return None;
        }

        self.generation += 1;
        let generation = self.generation;
        let request = self
            .client
            .get(self.config.rest_url.clone())
            .query("term", &term)
            .accept("application/json");

        debug!(generation, term_len = term.chars().count(), "dispatching lookup");
        self.last_query = term.clone();
        if self.is_open() {
            self.state = WidgetState::Loading;
        }

        Some(LookupRequest {
            generation,
            term,
            request,
        })
    }

    /// Outcome of a lookup sent by the host.
    ///
    /// Responses are rendered in arrival order. A response for an older
    /// generation still replaces newer results.
    pub fn on_response(&mut self, generation: u64, outcome: Result<Response, FetchError>) {
        let results = match outcome
            .and_then(Response::error_for_status)
            .and_then(|resp| resp.json::<Vec<SearchResult>>())
        {
            Ok(results) => results,
            Err(e) => {
                warn!(generation, error = %e, "search lookup failed");
                // A newer lookup may still be in flight.
                if generation == self.generation && self.state == WidgetState::Loading {
                    self.state = self.open_state();
                }
                return;
            }
        };

        if generation < self.generation {
            debug!(generation, latest = self.generation, "rendering stale lookup response");
        }

        let html = render_results(&results, &self.config.placeholder_image, &self.config.labels);
        self.surface.set_results_html(&html);
        self.surface.set_results_active(true);
        self.pending_results = Some(results);
        if self.is_open() {
            self.state = self.open_state();
        }
    }

    fn open(&mut self) {
        self.surface.set_overlay_active(true);
        self.surface.set_input_value("");
        self.surface.focus_input();
        // Lookups finishing while closed still render into the hidden panel.
        self.clear_results();
        self.state = self.open_state();
        info!("search overlay opened");
    }

    fn close(&mut self) {
        self.surface.set_overlay_active(false);
        self.surface.set_input_value("");
        self.clear_results();
        self.state = WidgetState::Closed;
        info!("search overlay closed");
    }

    fn clear_results(&mut self) {
        self.surface.set_results_active(false);
        self.surface.set_results_html("");
        self.pending_results = None;
    }

    fn open_state(&self) -> WidgetState {
        match &self.pending_results {
            None => WidgetState::Empty,
            Some(results) if results.is_empty() => WidgetState::EmptyResults,
            Some(_) => WidgetState::Results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MarkupSurface;
    use shelf_commerce::ProductId;

    const SEARCH_URL: &str = "https://shop.test/api/quick-shelf/v1/search";

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn widget() -> SearchWidget<MarkupSurface> {
        let config = WidgetConfig::new(SEARCH_URL, "n0nce").with_placeholder_image("/none.png");
        SearchWidget::new(config, MarkupSurface::new())
    }

    /// Simulates typing: the DOM value changes, then the input event fires.
    fn type_text(w: &mut SearchWidget<MarkupSurface>, value: &str, at: Duration) {
        w.surface_mut().set_input_value(value);
        w.on_input(value, at);
    }

    fn result(id: i64, thumbnail: Option<&str>) -> SearchResult {
        SearchResult {
            id: ProductId::new(id).unwrap(),
            title: format!("Mug {}", id),
            permalink: format!("https://shop.test/product/mug-{}", id),
            thumbnail: thumbnail.map(String::from),
            price: "$9.00".to_string(),
            stock_status: "In stock".to_string(),
            is_in_stock: true,
        }
    }

    fn ok(results: &[SearchResult]) -> Result<Response, FetchError> {
        Ok(Response::from_json(200, &results).unwrap())
    }

    #[test]
    fn test_toggle_opens_and_prevents_navigation() {
        let mut w = widget();
        w.surface_mut().set_input_value("old");

        let resp = w.on_toggle();
        assert!(resp.prevent_default);
        assert_eq!(w.state(), WidgetState::Empty);
        assert!(w.surface().overlay_active);
        assert!(w.surface().input_focused);
        assert_eq!(w.surface().input, "");
    }

    #[test]
    fn test_debounce_fires_once_with_last_value() {
        let mut w = widget();
        w.on_toggle();
        type_text(&mut w, "a", ms(0));
        type_text(&mut w, "ab", ms(100));
        type_text(&mut w, "abc", ms(150));

        for t in [200, 300, 400, 449] {
            assert!(w.poll(ms(t)).is_none(), "fired early at {}ms", t);
        }
        assert_eq!(w.next_deadline(), Some(ms(450)));

        let lookup = w.poll(ms(450)).unwrap();
        assert_eq!(lookup.term, "abc");
        assert_eq!(lookup.generation, 1);
        assert_eq!(lookup.request.url(), format!("{}?term=abc", SEARCH_URL));
        assert_eq!(lookup.request.get_header("X-Shelf-Nonce"), Some("n0nce"));
        assert_eq!(w.state(), WidgetState::Loading);
        assert_eq!(w.last_query(), "abc");

        assert!(w.poll(ms(2000)).is_none());
    }

    #[test]
    fn test_short_terms_never_sent() {
        let mut w = widget();
        w.on_toggle();
        for (i, value) in ["", "a", " a ", "   ", "\tb"].iter().enumerate() {
            let start = ms(i as u64 * 1000);
            type_text(&mut w, value, start);
            assert!(w.poll(start + ms(300)).is_none(), "sent {:?}", value);
        }
        assert!(!w.surface().results_active);
    }

    #[test]
    fn test_length_checked_at_settle_time() {
        let mut w = widget();
        w.on_toggle();
        type_text(&mut w, "ab", ms(0));
        type_text(&mut w, "a", ms(100));
        assert!(w.poll(ms(400)).is_none());
    }

    #[test]
    fn test_untrimmed_value_is_sent() {
        let mut w = widget();
        w.on_toggle();
        type_text(&mut w, " mug ", ms(0));
        let lookup = w.poll(ms(300)).unwrap();
        assert_eq!(lookup.term, " mug ");
        assert!(lookup.request.url().ends_with("?term=+mug+"));
    }

    #[test]
    fn test_short_term_clears_rendered_results() {
        let mut w = widget();
        w.on_toggle();
        type_text(&mut w, "mug", ms(0));
        let lookup = w.poll(ms(300)).unwrap();
        w.on_response(lookup.generation, ok(&[result(1, None)]));
        assert!(w.surface().results_active);

        type_text(&mut w, "m", ms(1000));
        assert!(w.poll(ms(1300)).is_none());
        assert!(!w.surface().results_active);
        assert_eq!(w.surface().results_html, "");
        assert_eq!(w.state(), WidgetState::Empty);
    }

    #[test]
    fn test_empty_response_shows_placeholder() {
        let mut w = widget();
        w.on_toggle();
        type_text(&mut w, "zzz", ms(0));
        let lookup = w.poll(ms(300)).unwrap();
        w.on_response(lookup.generation, ok(&[]));

        assert_eq!(w.state(), WidgetState::EmptyResults);
        assert!(w.surface().results_active);
        assert!(w.surface().results_html.contains("No products found"));
        assert!(!w.surface().results_html.contains("search-result-item"));
    }

    #[test]
    fn test_results_render_cards() {
        let mut w = widget();
        w.on_toggle();
        type_text(&mut w, "mug", ms(0));
        let lookup = w.poll(ms(300)).unwrap();
        w.on_response(
            lookup.generation,
            ok(&[result(1, Some("https://shop.test/1.jpg")), result(2, None)]),
        );

        let html = &w.surface().results_html;
        assert_eq!(w.state(), WidgetState::Results);
        assert_eq!(html.matches("search-result-item").count(), 2);
        assert!(html.contains(r#"href="https://shop.test/product/mug-2""#));
        assert!(html.contains(r#"src="/none.png""#));
        assert_eq!(w.pending_results().map(|r| r.len()), Some(2));
    }

    #[test]
    fn test_escape_closes_and_reopen_is_clean() {
        let mut w = widget();
        w.on_toggle();
        type_text(&mut w, "ab", ms(0));
        let lookup = w.poll(ms(300)).unwrap();
        w.on_response(lookup.generation, ok(&[result(1, None)]));

        w.on_key_up("Escape");
        assert_eq!(w.state(), WidgetState::Closed);
        assert!(!w.surface().overlay_active);
        assert_eq!(w.surface().input, "");
        assert!(!w.surface().results_active);
        assert_eq!(w.surface().results_html, "");

        w.on_toggle();
        assert_eq!(w.state(), WidgetState::Empty);
        assert_eq!(w.surface().input, "");
        assert_eq!(w.surface().results_html, "");
        assert!(w.pending_results().is_none());
    }

    #[test]
    fn test_other_keys_ignored() {
        let mut w = widget();
        w.on_toggle();
        w.on_key_up("Enter");
        assert!(w.is_open());
    }

    #[test]
    fn test_pointer_inside_container_never_closes() {
        let mut w = widget();
        w.on_toggle();
        let resp = w.on_pointer(PointerTarget::Container);
        assert!(resp.stop_propagation);
        assert!(w.is_open());

        w.on_pointer(PointerTarget::Outside);
        assert!(!w.is_open());
        assert!(!w.surface().overlay_active);
    }

    #[test]
    fn test_close_button() {
        let mut w = widget();
        w.on_toggle();
        type_text(&mut w, "mug", ms(0));
        w.on_close_clicked();
        assert_eq!(w.state(), WidgetState::Closed);
        assert_eq!(w.surface().input, "");
    }

    #[test]
    fn test_network_failure_keeps_rendered_results() {
        let mut w = widget();
        w.on_toggle();
        type_text(&mut w, "mug", ms(0));
        let first = w.poll(ms(300)).unwrap();
        w.on_response(first.generation, ok(&[result(1, None)]));
        let rendered = w.surface().results_html.clone();

        type_text(&mut w, "mugs", ms(1000));
        let second = w.poll(ms(1300)).unwrap();
        w.on_response(second.generation, Err(FetchError::Timeout));
        assert_eq!(w.surface().results_html, rendered);
        assert_eq!(w.state(), WidgetState::Results);

        type_text(&mut w, "mugs!", ms(2000));
        let third = w.poll(ms(2300)).unwrap();
        let server_error = Response::from_json(
            500,
            &serde_json::json!({"code": "search_failed", "message": "down", "status": 500}),
        );
        w.on_response(third.generation, server_error);
        assert_eq!(w.surface().results_html, rendered);
    }

    #[test]
    fn test_late_response_overwrites_newer_results() {
        let mut w = widget();
        w.on_toggle();
        type_text(&mut w, "mu", ms(0));
        let slow = w.poll(ms(300)).unwrap();
        type_text(&mut w, "mug", ms(400));
        let fast = w.poll(ms(700)).unwrap();
        assert_eq!((slow.generation, fast.generation), (1, 2));

        w.on_response(fast.generation, ok(&[result(2, None)]));
        w.on_response(slow.generation, ok(&[result(1, None)]));

        let shown = w.pending_results().unwrap();
        assert_eq!(shown[0].id.get(), 1);
    }

    #[test]
    fn test_reopen_hides_response_delivered_while_closed() {
        let mut w = widget();
        w.on_toggle();
        type_text(&mut w, "ab", ms(0));
        let lookup = w.poll(ms(300)).unwrap();
        w.on_key_up("Escape");

        w.on_response(lookup.generation, ok(&[result(1, None)]));
        assert_eq!(w.state(), WidgetState::Closed);

        w.on_toggle();
        assert_eq!(w.state(), WidgetState::Empty);
        assert_eq!(w.surface().input, "");
        assert_eq!(w.surface().results_html, "");
        assert!(!w.surface().results_active);
        assert!(w.pending_results().is_none());
    }

    #[test]
    fn test_failed_older_lookup_keeps_loading() {
        let mut w = widget();
        w.on_toggle();
        type_text(&mut w, "mu", ms(0));
        let older = w.poll(ms(300)).unwrap();
        type_text(&mut w, "mug", ms(400));
        let newer = w.poll(ms(700)).unwrap();

        w.on_response(older.generation, Err(FetchError::Timeout));
        assert_eq!(w.state(), WidgetState::Loading);

        w.on_response(newer.generation, Err(FetchError::Timeout));
        assert_eq!(w.state(), WidgetState::Empty);
    }
}
