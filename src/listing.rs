//! Search and pagination for the candidates table.

use serde::Serialize;

use crate::api::Candidate;

pub const DEFAULT_ROWS_PER_PAGE: usize = 10;

/// Case-insensitive substring match over name, email, phone and address.
/// A blank query matches everything.
pub fn search_candidates<'a>(candidates: &'a [Candidate], query: &str) -> Vec<&'a Candidate> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return candidates.iter().collect();
    }
    candidates
        .iter()
        .filter(|c| {
            [
                &c.first_name,
                &c.last_name,
                &c.email,
                &c.phone_number,
                &c.address,
            ]
            .iter()
            .any(|v| v.to_lowercase().contains(&query))
        })
        .collect()
}

/// One page of a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based, clamped into `1..=total_pages`.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Slice out `page` (1-based). There is always at least one page.
pub fn paginate<T: Clone>(items: &[T], page: usize, rows_per_page: usize) -> Page<T> {
    let rows_per_page = rows_per_page.max(1);
    let total_pages = items.len().div_ceil(rows_per_page).max(1);
    let page = page.clamp(1, total_pages);
    let start = (page - 1) * rows_per_page;
    let end = (start + rows_per_page).min(items.len());

    Page {
        items: items.get(start..end).map(<[T]>::to_vec).unwrap_or_default(),
        page,
        total_pages,
        total_items: items.len(),
    }
}
