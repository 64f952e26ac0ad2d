//! Markup for result cards, the overlay, the menu toggle and page config.

use crate::{MarkupSurface, PageConfig, Selectors, WidgetError, PAGE_GLOBAL};
use shelf_commerce::search::SearchResult;
use shelf_commerce::Labels;

/// Menu location that receives the search toggle.
pub const PRIMARY_MENU: &str = "primary";

const SEARCH_ICON_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><circle cx="11" cy="11" r="8"></circle><line x1="21" y1="21" x2="16.65" y2="16.65"></line></svg>"#;

/// Escape text for HTML content and attribute values.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Results panel contents.
///
/// Results render in the order given. Price markup is inserted verbatim;
/// every other field is escaped.
pub fn render_results(results: &[SearchResult], placeholder_image: &str, labels: &Labels) -> String {
    if results.is_empty() {
        return format!(
            r#"<p class="search-no-results">{}</p>"#,
            escape_html(&labels.no_results)
        );
    }

    results
        .iter()
        .map(|r| render_card(r, placeholder_image))
        .collect()
}

fn render_card(result: &SearchResult, placeholder_image: &str) -> String {
    let thumbnail = result
        .thumbnail
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or(placeholder_image);
    let stock_class = if result.is_in_stock {
        "in-stock"
    } else {
        "out-of-stock"
    };

    format!(
        r#"<a href="{permalink}" class="search-result-item"><img src="{thumbnail}" class="search-result-thumbnail" alt="{title}"><div class="search-result-content"><div class="search-result-title">{title}</div><div class="search-result-price-row"><div class="search-result-price">{price}</div><div class="search-result-stock {stock_class}">{stock}</div></div></div></a>"#,
        permalink = escape_html(&result.permalink),
        thumbnail = escape_html(thumbnail),
        title = escape_html(&result.title),
        price = result.price,
        stock_class = stock_class,
        stock = escape_html(&result.stock_status),
    )
}

/// Hidden overlay markup appended to the page footer.
pub fn render_overlay(selectors: &Selectors, labels: &Labels) -> String {
    overlay_markup(selectors, labels, &MarkupSurface::default())
}

pub(crate) fn overlay_markup(selectors: &Selectors, labels: &Labels, state: &MarkupSurface) -> String {
    let classes = |base: &str, active: bool| {
        if active {
            format!("{} {}", base, selectors.active)
        } else {
            base.to_string()
        }
    };

    format!(
        r#"<div class="{overlay}"><div class="{container}"><div class="quick-shelf-header"><input type="text" class="{input}" placeholder="{placeholder}" value="{value}"><button type="button" class="{close}">{close_label}</button></div><div class="{results}">{results_html}</div></div></div>"#,
        overlay = escape_html(&classes(&selectors.overlay, state.overlay_active)),
        container = escape_html(&selectors.container),
        input = escape_html(&selectors.input),
        placeholder = escape_html(&labels.search_placeholder),
        value = escape_html(&state.input),
        close = escape_html(&selectors.close),
        close_label = escape_html(&labels.close),
        results = escape_html(&classes(&selectors.results, state.results_active)),
        results_html = state.results_html,
    )
}

/// Append the search toggle to a rendered menu.
///
/// Only the primary location gets the toggle; other menus come back
/// unchanged.
pub fn inject_menu_toggle(items_html: &str, location: &str) -> String {
    if location != PRIMARY_MENU {
        return items_html.to_string();
    }

    format!(
        r##"{}<li class="menu-item search-icon"><a href="#" class="{}">{}</a></li>"##,
        items_html,
        escape_html(&Selectors::default().toggle),
        SEARCH_ICON_SVG
    )
}

/// Script tag exposing the page configuration as a global.
pub fn render_page_config(config: &PageConfig) -> Result<String, WidgetError> {
    // `</` would end the script element early.
    let json = serde_json::to_string(config)?.replace("</", "<\\/");
    Ok(format!(
        "<script>window.{} = {};</script>",
        PAGE_GLOBAL, json
    ))
}
