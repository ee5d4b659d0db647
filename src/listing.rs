//! In-memory list controller shared by the blog, project and skill views.
//!
//! Holds the fetched collection, the active filter and the number of items
//! currently displayed, and computes the filtered, paginated view on demand.

use std::future::Future;

use crate::error::FolioError;
use crate::models::category::Category;

pub const PAGE_SIZE: usize = 6;
pub const ALL: &str = "all";

/// Filtering hook for anything a [`ListController`] can hold. The "all"
/// filter is handled by the controller and never reaches `matches`.
pub trait Listable {
    fn matches(&self, filter: &str, categories: &[Category]) -> bool;
}

pub fn is_all(filter: &str) -> bool {
    filter.trim().is_empty() || filter.trim().eq_ignore_ascii_case(ALL)
}

/// `items.filter(matches).take(displayed)`, preserving order.
pub fn compute_view<'a, T: Listable>(
    items: &'a [T],
    categories: &'a [Category],
    filter: &'a str,
    displayed: usize,
) -> Vec<&'a T> {
    filtered(items, categories, filter).take(displayed).collect()
}

fn filtered<'a, T: Listable>(
    items: &'a [T],
    categories: &'a [Category],
    filter: &'a str,
) -> impl Iterator<Item = &'a T> + 'a {
    let all = is_all(filter);
    items
        .iter()
        .filter(move |item| all || item.matches(filter, categories))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    filter: String,
    displayed: usize,
    page_size: usize,
}

impl ViewState {
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        ViewState {
            filter: ALL.to_string(),
            displayed: page_size,
            page_size,
        }
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn displayed(&self) -> usize {
        self.displayed
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
    /// Fetched fine, nothing in it.
    Empty,
    Failed(FolioError),
}

/// Issued by [`ListController::begin_load`]; a result is only applied if
/// its ticket is still the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// One computed page of the list.
#[derive(Debug)]
pub struct View<'a, T> {
    pub items: Vec<&'a T>,
    /// Number of items matching the filter, before pagination.
    pub matching: usize,
    /// Whether the load-more control is shown.
    pub has_more: bool,
}

pub struct ListController<T> {
    items: Vec<T>,
    categories: Vec<Category>,
    state: ViewState,
    load_state: LoadState,
    generation: u64,
    closed: bool,
}

impl<T: Listable> ListController<T> {
    pub fn new(page_size: usize) -> Self {
        ListController {
            items: Vec::new(),
            categories: Vec::new(),
            state: ViewState::new(page_size),
            load_state: LoadState::Idle,
            generation: 0,
            closed: false,
        }
    }

    /// Controller over an already-fetched collection.
    pub fn with_items(page_size: usize, items: Vec<T>, categories: Vec<Category>) -> Self {
        let mut ctl = Self::new(page_size);
        let ticket = ctl.begin_load();
        ctl.finish_load(ticket, Ok((items, categories)));
        ctl
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn filter(&self) -> &str {
        self.state.filter()
    }

    pub fn displayed(&self) -> usize {
        self.state.displayed
    }

    pub fn page_size(&self) -> usize {
        self.state.page_size
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.load_state = LoadState::Loading;
        LoadTicket(self.generation)
    }

    /// Apply a fetch result. Returns false (and changes nothing) when the
    /// ticket is stale or the controller was closed.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<(Vec<T>, Vec<Category>), FolioError>,
    ) -> bool {
        if self.closed || ticket.0 != self.generation {
            log::debug!(
                "[list] dropping stale load result (ticket {}, current {}, closed {})",
                ticket.0,
                self.generation,
                self.closed
            );
            return false;
        }
        match result {
            Ok((items, categories)) => {
                self.load_state = if items.is_empty() {
                    LoadState::Empty
                } else {
                    LoadState::Ready
                };
                self.items = items;
                self.categories = categories;
            }
            Err(e) => {
                log::warn!("[list] load failed: {}", e);
                self.load_state = LoadState::Failed(e);
            }
        }
        true
    }

    /// Fetch the collection and its categories.
    pub async fn load<F>(&mut self, fetch: F) -> &LoadState
    where
        F: Future<Output = Result<(Vec<T>, Vec<Category>), FolioError>>,
    {
        let ticket = self.begin_load();
        let result = fetch.await;
        self.finish_load(ticket, result);
        &self.load_state
    }

    /// Fetch a collection that has no category cross-reference.
    pub async fn load_items<F>(&mut self, fetch: F) -> &LoadState
    where
        F: Future<Output = Result<Vec<T>, FolioError>>,
    {
        let ticket = self.begin_load();
        let result = fetch.await.map(|items| (items, Vec::new()));
        self.finish_load(ticket, result);
        &self.load_state
    }

    /// Detach from the consuming view. Results still in flight are dropped.
    pub fn close(&mut self) {
        self.closed = true;
        self.generation += 1;
    }

    pub fn set_filter(&mut self, value: &str) {
        let value = value.trim();
        self.state.filter = if value.is_empty() {
            ALL.to_string()
        } else {
            value.to_string()
        };
        self.state.displayed = self.state.page_size;
    }

    /// Grow the page by one increment. Returns false, leaving the state
    /// untouched, once everything matching is already displayed.
    pub fn load_more(&mut self) -> bool {
        if self.state.displayed >= self.matching_len() {
            return false;
        }
        self.state.displayed += self.state.page_size;
        true
    }

    pub fn matching_len(&self) -> usize {
        filtered(&self.items, &self.categories, &self.state.filter).count()
    }

    pub fn compute_view(&self) -> View<'_, T> {
        let matching = self.matching_len();
        View {
            items: compute_view(
                &self.items,
                &self.categories,
                &self.state.filter,
                self.state.displayed,
            ),
            matching,
            has_more: matching > self.state.displayed,
        }
    }

    /// Display name of an item's category, for views that need it.
    pub fn category_name(&self, id: Option<i64>) -> &str {
        Category::name_for(&self.categories, id)
    }
}
