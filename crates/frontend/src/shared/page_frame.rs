//! Root wrapper for every routed page.
//!
//! The root element carries `id = "{entity}--{category}"` and
//! `data-page-category`, so a page found in the DOM inspector can be traced
//! back to `domain/{entity}/ui/{category}`.

use leptos::prelude::*;

/// Table of records with filters and pagination
pub const PAGE_CAT_LIST: &str = "list";

/// Create/edit form for a single record
pub const PAGE_CAT_DETAIL: &str = "detail";

/// True when `page_id` has the `{entity}--{category}` shape with a known category
pub fn is_valid_page_id(page_id: &str) -> bool {
    match page_id.split_once("--") {
        Some((entity, category)) => {
            !entity.is_empty() && matches!(category, PAGE_CAT_LIST | PAGE_CAT_DETAIL)
        }
        None => false,
    }
}

#[component]
pub fn PageFrame(
    page_id: &'static str,
    /// `PAGE_CAT_LIST` or `PAGE_CAT_DETAIL`
    category: &'static str,
    children: Children,
) -> impl IntoView {
    debug_assert!(is_valid_page_id(page_id), "bad page id {page_id}");
    let class = match category {
        PAGE_CAT_DETAIL => "page page--detail",
        _ => "page",
    };

    view! {
        <div id=page_id class=class data-page-category=category>
            {children()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_format() {
        assert!(is_valid_page_id("a005_sales_order--list"));
        assert!(is_valid_page_id("a005_sales_order--detail"));
        assert!(!is_valid_page_id("a005_sales_order-list"));
        assert!(!is_valid_page_id("--list"));
        assert!(!is_valid_page_id("a005_sales_order--chart"));
    }
}
