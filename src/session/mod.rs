use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::images::{self, ImageKind};
use crate::paginator::{self, PageLink};
use crate::related::RelatedSearches;
use crate::results::{AvatarOverride, Category, Dataset, FeaturedImage, Platform, SearchResult};
use crate::tracking::{TrackEvent, Tracker};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid page size {value}, expected positive integer")]
    InvalidPageSize { value: usize },
}

/// The only mutable state behind a results page. `current_page` is 1-based
/// and always within `[1, max(1, total_pages)]` for the active category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageState {
    pub active_category: Category,
    pub current_page: usize,
    pub page_size: usize,
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        Self {
            active_category: Category::All,
            current_page: 1,
            page_size,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct TabView {
    pub label: String,
    pub active: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct ResultCard {
    #[serde(flatten)]
    pub result: SearchResult,
    pub thumbnail_url: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct ProfileView {
    #[serde(flatten)]
    pub result: SearchResult,
    pub avatar_url: String,
    pub header_url: String,
}

/// Everything a renderer needs, recomputed from scratch on every call to
/// [`Session::view`].
#[derive(Clone, Debug, Serialize)]
pub struct PageView {
    pub scenario: String,
    pub query: String,
    pub tabs: Vec<TabView>,
    pub active_category: String,
    pub empty_dataset: bool,
    pub total_results: usize,
    pub current_page: usize,
    pub total_pages: usize,
    pub results: Vec<ResultCard>,
    pub page_links: Vec<PageLink>,
    pub has_previous: bool,
    pub has_next: bool,
    pub featured_images: Vec<FeaturedImage>,
    pub related_searches: Vec<String>,
    pub profile: Option<ProfileView>,
}

pub struct Session {
    dataset: Arc<Dataset>,
    related: RelatedSearches,
    tracker: Box<dyn Tracker>,
    query: String,
    state: PageState,
    selected: Option<String>,
}

impl Session {
    pub fn new(
        dataset: Arc<Dataset>,
        page_size: usize,
        tracker: Box<dyn Tracker>,
    ) -> Result<Self, SessionError> {
        if page_size == 0 {
            return Err(SessionError::InvalidPageSize { value: page_size });
        }
        let related = RelatedSearches::new(&dataset.subject, &dataset.related_searches);
        Ok(Self {
            query: dataset.subject.clone(),
            related,
            tracker,
            state: PageState::new(page_size),
            selected: None,
            dataset,
        })
    }

    fn emit(&self, event: TrackEvent) {
        tracing::debug!(event = event.name(), "emitting tracking event");
        self.tracker.track(&event);
    }

    fn scenario(&self) -> String {
        self.dataset.scenario.clone()
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn selected(&self) -> Option<&SearchResult> {
        self.selected
            .as_deref()
            .and_then(|id| self.dataset.find(id))
    }

    pub fn filtered(&self) -> Vec<&SearchResult> {
        paginator::filter_by_category(&self.dataset.results, &self.state.active_category)
    }

    pub fn total_pages(&self) -> usize {
        paginator::total_pages(self.filtered().len(), self.state.page_size)
    }

    /// One-time page view notification.
    pub fn start(&self) {
        self.emit(TrackEvent::PageView {
            scenario: self.scenario(),
            page: self.state.current_page,
            tab: self.state.active_category.label().to_string(),
        });
    }

    /// Always resets to page 1. Only a different category is tracked.
    pub fn select_category(&mut self, category: Category) {
        tracing::debug!(
            from = %self.state.active_category,
            to = %category,
            "category selected, resetting page"
        );
        self.state.current_page = 1;
        if category == self.state.active_category {
            return;
        }
        self.state.active_category = category;
        self.emit(TrackEvent::TabChange {
            scenario: self.scenario(),
            tab: self.state.active_category.label().to_string(),
        });
    }

    /// Moves to `page`, clamped into the current filtered range. Returns the
    /// page actually landed on.
    pub fn go_to_page(&mut self, page: usize) -> usize {
        let last = self.total_pages().max(1);
        let target = page.clamp(1, last);
        if target != page {
            tracing::debug!(requested = page, clamped = target, "page out of range");
        }
        if target != self.state.current_page {
            self.state.current_page = target;
            if target > 1 {
                self.emit(TrackEvent::Pagination {
                    scenario: self.scenario(),
                    page: target,
                });
            }
        }
        target
    }

    pub fn has_next(&self) -> bool {
        self.state.current_page < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.state.current_page > 1
    }

    pub fn next_page(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.go_to_page(self.state.current_page + 1);
        true
    }

    pub fn previous_page(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.go_to_page(self.state.current_page - 1);
        true
    }

    pub fn search(&mut self, query: &str) {
        self.query = query.trim().to_string();
        self.emit(TrackEvent::Search {
            scenario: self.scenario(),
            query: self.query.clone(),
        });
    }

    pub fn related_searches(&self) -> &[String] {
        self.related.lookup(&self.query)
    }

    /// Every known result click is tracked; only platforms with a profile
    /// view become selected. Returns whether a profile opened.
    pub fn open_result(&mut self, id: &str) -> bool {
        let Some(result) = self.dataset.find(id) else {
            tracing::debug!(id, "ignoring click on unknown result");
            return false;
        };
        let event = TrackEvent::ResultClick {
            scenario: self.scenario(),
            result_id: result.id.clone(),
            platform: result.platform.label().to_string(),
            display_name: result.display_name.clone(),
        };
        let opens = result.platform.has_profile_view();
        let selected_id = result.id.clone();
        self.emit(event);
        if opens {
            self.selected = Some(selected_id);
        }
        opens
    }

    pub fn close_profile(&mut self) {
        self.selected = None;
    }

    pub fn view(&self) -> PageView {
        let overrides = &self.dataset.avatar_overrides;
        let tabs = Category::TABS
            .iter()
            .map(|c| TabView {
                label: c.label().to_string(),
                active: *c == self.state.active_category,
            })
            .collect();

        let profile = self.selected().map(|r| ProfileView {
            avatar_url: resolve_image(r, ImageKind::Avatar, overrides),
            header_url: images::fake_image_url(&r.id, ImageKind::Header, overrides),
            result: r.clone(),
        });

        let mut view = PageView {
            scenario: self.dataset.scenario.clone(),
            query: self.query.clone(),
            tabs,
            active_category: self.state.active_category.label().to_string(),
            empty_dataset: self.dataset.is_empty(),
            total_results: 0,
            current_page: self.state.current_page,
            total_pages: 0,
            results: Vec::new(),
            page_links: Vec::new(),
            has_previous: false,
            has_next: false,
            featured_images: Vec::new(),
            related_searches: Vec::new(),
            profile,
        };
        if view.empty_dataset {
            return view;
        }

        let filtered = self.filtered();
        let page = paginator::paginate(&filtered, self.state.current_page, self.state.page_size);

        view.total_results = filtered.len();
        view.total_pages = page.total_pages;
        view.results = page
            .visible
            .iter()
            .map(|r| ResultCard {
                thumbnail_url: resolve_image(r, ImageKind::Thumbnail, overrides),
                result: (*r).clone(),
            })
            .collect();
        if page.total_pages > 1 {
            view.page_links =
                paginator::compute_page_number_sequence(self.state.current_page, page.total_pages);
        }
        view.has_previous = self.state.current_page > 1;
        view.has_next = self.state.current_page < page.total_pages;
        if self.state.current_page == 1 && !view.results.is_empty() {
            view.featured_images = self.dataset.featured_images.clone();
        }
        if self.state.active_category == Category::All && !filtered.is_empty() {
            view.related_searches = self.related_searches().to_vec();
        }
        view
    }
}

fn resolve_image(
    result: &SearchResult,
    kind: ImageKind,
    overrides: &[AvatarOverride],
) -> String {
    match result.image.as_deref() {
        Some(url) if !url.trim().is_empty() => url.to_string(),
        _ if result.platform == Platform::YouTube => images::video_thumbnail_url(&result.id),
        _ => images::fake_image_url(&result.id, kind, overrides),
    }
}
