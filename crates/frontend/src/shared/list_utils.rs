/// List helpers: sort header state and client-side pagination

/// Sort indicator for a column header
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        " ⇅"
    }
}

pub fn get_sort_class(current_field: &str, field: &str) -> &'static str {
    if current_field == field {
        "table__sort-indicator table__sort-indicator--active"
    } else {
        "table__sort-indicator"
    }
}

/// Header click: same column flips direction, another column starts ascending
pub fn toggle_sort(current_field: &str, ascending: bool, clicked: &str) -> (String, bool) {
    if current_field == clicked {
        (clicked.to_string(), !ascending)
    } else {
        (clicked.to_string(), true)
    }
}

pub fn total_pages(total_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total_count.div_ceil(page_size).max(1)
}

/// Keeps `page` inside the available pages after the row count changed
pub fn clamp_page(page: usize, total_count: usize, page_size: usize) -> usize {
    page.min(total_pages(total_count, page_size) - 1)
}

/// Rows of one page (0-indexed)
pub fn page_slice<T: Clone>(rows: &[T], page: usize, page_size: usize) -> Vec<T> {
    if page_size == 0 {
        return rows.to_vec();
    }
    rows.iter()
        .skip(page.saturating_mul(page_size))
        .take(page_size)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_sort() {
        assert_eq!(toggle_sort("SONo", true, "SONo"), ("SONo".to_string(), false));
        assert_eq!(toggle_sort("SONo", false, "SODate"), ("SODate".to_string(), true));
    }

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator("a", "a", true), " ▲");
        assert_eq!(get_sort_indicator("a", "a", false), " ▼");
        assert_eq!(get_sort_indicator("a", "b", true), " ⇅");
    }

    #[test]
    fn test_pages() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(clamp_page(5, 11, 10), 1);
        assert_eq!(clamp_page(0, 0, 10), 0);
    }

    #[test]
    fn test_page_slice() {
        let rows: Vec<u32> = (1..=23).collect();
        assert_eq!(page_slice(&rows, 0, 10).len(), 10);
        assert_eq!(page_slice(&rows, 2, 10), vec![21, 22, 23]);
        assert!(page_slice(&rows, 3, 10).is_empty());
    }
}
