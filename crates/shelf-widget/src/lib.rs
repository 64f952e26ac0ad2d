//! Quick-search overlay widget.
//!
//! A headless state machine for the storefront search overlay. The host
//! page owns the DOM, the clock and the network; it forwards events to a
//! [`SearchWidget`], sends the [`LookupRequest`]s the widget hands out and
//! reports responses back. DOM writes go through a [`SearchSurface`].
//!
//! # Example
//!
//! ```rust,ignore
//! use shelf_widget::prelude::*;
//!
//! let config = WidgetConfig::from_page_json(page_json)?;
//! let mut widget = SearchWidget::new(config, MarkupSurface::default());
//!
//! widget.on_toggle();
//! widget.on_input("blue mug", now);
//! if let Some(lookup) = widget.poll(now + Duration::from_millis(300)) {
//!     let outcome = host_send(&lookup.request);
//!     widget.on_response(lookup.generation, outcome);
//! }
//! ```

mod config;
mod debounce;
mod error;
mod render;
mod surface;
mod widget;

pub use config::{PageConfig, WidgetConfig, PAGE_GLOBAL};
pub use debounce::Debouncer;
pub use error::WidgetError;
pub use render::{
    escape_html, inject_menu_toggle, render_overlay, render_page_config, render_results,
    PRIMARY_MENU,
};
pub use surface::{MarkupSurface, SearchSurface, Selectors};
pub use widget::{EventResponse, LookupRequest, PointerTarget, SearchWidget, WidgetState};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        EventResponse, LookupRequest, MarkupSurface, PageConfig, PointerTarget, SearchSurface,
        SearchWidget, Selectors, WidgetConfig, WidgetError, WidgetState,
    };
    pub use std::time::Duration;
}
