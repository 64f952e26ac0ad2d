//! DOM surface the widget drives.

use crate::render;
use shelf_commerce::Labels;

/// Class names the widget binds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selectors {
    pub toggle: String,
    pub overlay: String,
    pub container: String,
    pub input: String,
    pub close: String,
    pub results: String,
    /// Class added to the overlay and results panel while shown.
    pub active: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            toggle: "quick-shelf-toggle".to_string(),
            overlay: "quick-shelf-overlay".to_string(),
            container: "quick-shelf-container".to_string(),
            input: "quick-shelf-input".to_string(),
            close: "quick-shelf-close".to_string(),
            results: "quick-shelf-results".to_string(),
            active: "active".to_string(),
        }
    }
}

/// Writes the widget performs on the page.
pub trait SearchSurface {
    /// Show or hide the overlay.
    fn set_overlay_active(&mut self, active: bool);

    /// Current text of the search input.
    fn input_value(&self) -> String;

    fn set_input_value(&mut self, value: &str);

    fn focus_input(&mut self);

    /// Replace the results panel contents.
    fn set_results_html(&mut self, html: &str);

    /// Show or hide the results panel.
    fn set_results_active(&mut self, active: bool);
}

/// In-memory surface.
///
/// Records the state a DOM would hold; `preview` renders it as overlay
/// markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupSurface {
    pub overlay_active: bool,
    pub input: String,
    pub input_focused: bool,
    pub results_html: String,
    pub results_active: bool,
}

impl MarkupSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay markup reflecting the current state.
    pub fn preview(&self, selectors: &Selectors, labels: &Labels) -> String {
        render::overlay_markup(selectors, labels, self)
    }
}

impl SearchSurface for MarkupSurface {
    fn set_overlay_active(&mut self, active: bool) {
        self.overlay_active = active;
        if !active {
            self.input_focused = false;
        }
    }

    fn input_value(&self) -> String {
        self.input.clone()
    }

    fn set_input_value(&mut self, value: &str) {
        self.input = value.to_string();
    }

    fn focus_input(&mut self) {
        self.input_focused = true;
    }

    fn set_results_html(&mut self, html: &str) {
        self.results_html = html.to_string();
    }

    fn set_results_active(&mut self, active: bool) {
        self.results_active = active;
    }
}

impl<S: SearchSurface + ?Sized> SearchSurface for &mut S {
    fn set_overlay_active(&mut self, active: bool) {
        (**self).set_overlay_active(active)
    }

    fn input_value(&self) -> String {
        (**self).input_value()
    }

    fn set_input_value(&mut self, value: &str) {
        (**self).set_input_value(value)
    }

    fn focus_input(&mut self) {
        (**self).focus_input()
    }

    fn set_results_html(&mut self, html: &str) {
        (**self).set_results_html(html)
    }

    fn set_results_active(&mut self, active: bool) {
        (**self).set_results_active(active)
    }
}
