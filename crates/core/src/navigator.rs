//! The section navigator.
//!
//! One `Navigator` drives one document. It owns the view state, the
//! fetcher and the host ports, and turns every input into a state
//! transition followed by a fresh projection onto the page.
//!
//! All methods take `&self`: the navigator is shared by the event handlers
//! of a single-threaded page. Interior state sits in `RefCell`s and no
//! borrow is held across an await point.

use crate::announcer::Announcer;
use crate::citation;
use crate::controls::{self, Command, Step, key_step};
use crate::fetcher::SectionFetcher;
use crate::location;
use crate::state::{NavigationTicket, Rejection, ViewState};
use lexi_traits::{DocumentView, FetchError, HistoryPort, LiveRegion, SectionSource};
use lexi_types::{
    BodyContent, HistoryState, Labels, NavigatorConfig, ScrollTarget, SectionIndex,
    SectionVisibility, SharedHtml, ViewMode,
};
use log::{debug, error, info, warn};
use std::cell::{Ref, RefCell, RefMut};

/// Options for [`Navigator::request_navigate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigateOptions {
    /// Push a history entry for the new position.
    pub update_history: bool,
}

impl Default for NavigateOptions {
    fn default() -> Self {
        Self {
            update_history: true,
        }
    }
}

impl NavigateOptions {
    /// Navigate without touching the session history (`popstate`, startup).
    pub fn without_history() -> Self {
        Self {
            update_history: false,
        }
    }
}

/// What a request ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Nothing changed.
    Ignored(Rejection),
    /// A section already in the page was shown.
    Revealed,
    /// Served from the cache without a request.
    Cached,
    /// Loaded from the section source and displayed.
    Fetched,
    /// Loaded and cached, but a newer navigation owns the page.
    Stale,
    /// Full-text scroll to a section; mode and URL untouched.
    Scrolled,
    /// A projection-only change (mode, TOC, startup).
    Applied,
    /// The section could not be loaded; the error placeholder is shown.
    Failed(FetchError),
}

impl NavigationOutcome {
    /// Whether the requested section is now on screen.
    pub fn is_displayed(&self) -> bool {
        matches!(
            self,
            NavigationOutcome::Revealed
                | NavigationOutcome::Cached
                | NavigationOutcome::Fetched
                | NavigationOutcome::Scrolled
        )
    }
}

pub struct Navigator<S, V, H, L> {
    config: NavigatorConfig,
    state: RefCell<ViewState>,
    fetcher: SectionFetcher<S>,
    view: RefCell<V>,
    history: RefCell<H>,
    announcer: RefCell<Announcer<L>>,
}

impl<S, V, H, L> Navigator<S, V, H, L>
where
    S: SectionSource + 'static,
    V: DocumentView,
    H: HistoryPort,
    L: LiveRegion,
{
    /// Builds a navigator for the page `view` shows.
    ///
    /// Reads the page once: whether content was rendered server-side, the
    /// TOC size when the config has no total, and the starting position
    /// from the URL. Nothing is written until [`start`].
    ///
    /// [`start`]: Navigator::start
    pub fn new(config: NavigatorConfig, source: S, view: V, history: H, live_region: L) -> Self {
        let server_rendered = view.has_rendered_content();
        let total = config
            .total_sections
            .unwrap_or_else(|| view.toc_entry_count());
        let initial = location::initial_index(&history.current_url(), total);
        let mode = config.initial_mode.unwrap_or(if server_rendered {
            ViewMode::FullText
        } else {
            ViewMode::SingleSection
        });

        debug!(
            "Navigator for {} sections at {} ({} mode, server rendered: {})",
            total, initial, mode, server_rendered
        );

        let announcer = Announcer::new(config.announcer_id(), live_region);
        Self {
            state: RefCell::new(ViewState::new(total, initial, mode, server_rendered)),
            fetcher: SectionFetcher::new(source),
            view: RefCell::new(view),
            history: RefCell::new(history),
            announcer: RefCell::new(announcer),
            config,
        }
    }

    /// Brings the page in line with the initial state.
    ///
    /// Records the starting position on the landing history entry, then
    /// either loads the starting section (empty page with a working
    /// source) or projects visibility over the sections already present.
    pub async fn start(&self) -> NavigationOutcome {
        let (current, total, server_rendered, mode) = {
            let state = self.state.borrow();
            (
                state.current(),
                state.total(),
                state.is_server_rendered(),
                state.mode(),
            )
        };

        {
            let mut history = self.history.borrow_mut();
            let url = history.current_url();
            history.replace(HistoryState::new(current), &url);
        }

        if total == 0 {
            info!("Document has no sections; navigation disabled");
            self.render_controls();
            return NavigationOutcome::Applied;
        }

        if !server_rendered && self.fetcher.source().is_available() {
            return self
                .request_navigate(current.as_i64(), NavigateOptions::without_history())
                .await;
        }

        {
            let mut view = self.view.borrow_mut();
            view.apply_visibility(SectionVisibility::for_mode(mode, current));
            if mode == ViewMode::FullText && current != SectionIndex::FIRST {
                view.scroll_to(ScrollTarget::Section(current));
            }
        }
        self.render_controls();
        NavigationOutcome::Applied
    }

    /// Moves to section `target`.
    ///
    /// Dropped while another navigation is in progress or when `target` is
    /// out of range. Otherwise the position changes immediately, the
    /// content is resolved, and the controls are re-rendered whatever the
    /// result.
    pub async fn request_navigate(&self, target: i64, options: NavigateOptions) -> NavigationOutcome {
        let begun = self.state.borrow_mut().begin(target);
        let ticket = match begun {
            Ok(ticket) => ticket,
            Err(rejection) => {
                debug!("Navigation to {} ignored: {:?}", target, rejection);
                return NavigationOutcome::Ignored(rejection);
            }
        };

        if options.update_history {
            self.push_history(ticket.index());
        }

        let outcome = self.resolve(&ticket).await;

        self.state.borrow_mut().finish();
        self.render_controls();
        outcome
    }

    async fn resolve(&self, ticket: &NavigationTicket) -> NavigationOutcome {
        let index = ticket.index();

        if self.state.borrow().is_server_rendered() {
            self.reveal_in_place(index);
            return NavigationOutcome::Revealed;
        }

        if let Some(html) = self.fetcher.cached(index) {
            debug!("Section {} served from cache", index);
            self.show_html(index, &html);
            return NavigationOutcome::Cached;
        }

        if !self.fetcher.source().is_available() {
            return self.reveal_without_source(index);
        }

        self.view
            .borrow_mut()
            .set_body(BodyContent::Loading(&self.config.labels.loading));

        let result = self.fetcher.fetch(index).await;

        if !self.state.borrow().is_current(ticket) {
            debug!("Discarding stale response for section {}", index);
            return NavigationOutcome::Stale;
        }

        match result {
            Ok(payload) => {
                let shown = match payload.index {
                    Some(declared) if declared != index.as_i64() => {
                        let adopted = self.state.borrow_mut().adopt(ticket, declared);
                        if adopted == index {
                            warn!(
                                "Server declared out-of-range index {} for section {}; ignored",
                                declared, index
                            );
                        } else {
                            warn!(
                                "Server declared index {} for section {}; adopting it",
                                declared, index
                            );
                            self.replace_history(adopted);
                        }
                        adopted
                    }
                    _ => index,
                };
                self.show_html(shown, &payload.html);
                NavigationOutcome::Fetched
            }
            Err(err) => {
                error!("Failed to load section {}: {}", index, err);
                self.show_error();
                NavigationOutcome::Failed(err)
            }
        }
    }

    /// Server-rendered pages: every section is already in the page.
    fn reveal_in_place(&self, index: SectionIndex) {
        let (visibility, mode) = {
            let state = self.state.borrow();
            (state.visibility(), state.mode())
        };
        {
            let mut view = self.view.borrow_mut();
            view.apply_visibility(visibility);
            view.scroll_to(match mode {
                ViewMode::SingleSection => ScrollTarget::Top,
                ViewMode::FullText => ScrollTarget::Section(index),
            });
        }
        self.announcer
            .borrow_mut()
            .section_loaded(index, &self.config.labels);
    }

    /// No endpoint: fall back to a pre-rendered element for `index`.
    fn reveal_without_source(&self, index: SectionIndex) -> NavigationOutcome {
        let found = self.view.borrow().has_section(index);
        if found {
            self.view
                .borrow_mut()
                .apply_visibility(SectionVisibility::Only(index));
            self.announcer
                .borrow_mut()
                .section_loaded(index, &self.config.labels);
            return NavigationOutcome::Revealed;
        }

        let err = FetchError::Unavailable(format!(
            "no section endpoint and no pre-rendered section {}",
            index
        ));
        error!("Cannot show section {}: {}", index, err);
        self.show_error();
        NavigationOutcome::Failed(err)
    }

    fn show_html(&self, index: SectionIndex, html: &SharedHtml) {
        let visibility = self.state.borrow().visibility();
        {
            let mut view = self.view.borrow_mut();
            view.set_body(BodyContent::Html(html));
            view.apply_visibility(visibility);
            view.focus_heading();
        }
        self.announcer
            .borrow_mut()
            .section_loaded(index, &self.config.labels);
    }

    fn show_error(&self) {
        self.view
            .borrow_mut()
            .set_body(BodyContent::Error(&self.config.labels.error));
        self.announcer.borrow_mut().error(&self.config.labels);
    }

    fn push_history(&self, index: SectionIndex) {
        let mut history = self.history.borrow_mut();
        let url = location::with_section_param(&history.current_url(), index);
        history.push(HistoryState::new(index), &url);
    }

    /// Points the current history entry at `index` instead of the requested one.
    fn replace_history(&self, index: SectionIndex) {
        let mut history = self.history.borrow_mut();
        let url = location::with_section_param(&history.current_url(), index);
        history.replace(HistoryState::new(index), &url);
    }

    fn render_controls(&self) {
        let controls = controls::project(&self.state.borrow(), &self.config.labels);
        self.view.borrow_mut().render_controls(&controls);
    }

    /// Switches between full-text and single-section presentation.
    ///
    /// Returns `false` when `mode` was already active. The position never
    /// changes.
    pub fn set_mode(&self, mode: ViewMode) -> bool {
        if !self.state.borrow_mut().set_mode(mode) {
            debug!("View mode {} already active", mode);
            return false;
        }

        let (visibility, current, server_rendered) = {
            let state = self.state.borrow();
            (state.visibility(), state.current(), state.is_server_rendered())
        };
        {
            let mut view = self.view.borrow_mut();
            view.apply_visibility(visibility);
            if mode == ViewMode::FullText && server_rendered {
                view.scroll_to(ScrollTarget::Section(current));
            }
        }
        self.render_controls();
        true
    }

    /// Handles activation of the TOC link carrying `index`.
    ///
    /// In full-text mode over server-rendered content this scrolls instead
    /// of navigating, with `-1` meaning the top of the document.
    pub async fn activate_toc(&self, index: i64) -> NavigationOutcome {
        let (scrolls, total) = {
            let state = self.state.borrow();
            (
                state.mode() == ViewMode::FullText && state.is_server_rendered(),
                state.total(),
            )
        };
        if !scrolls {
            return self.request_navigate(index, NavigateOptions::default()).await;
        }

        let target = if index < 0 {
            ScrollTarget::Top
        } else {
            match SectionIndex::checked(index, total) {
                Some(section) => ScrollTarget::Section(section),
                None => {
                    debug!("TOC link to {} ignored: out of range", index);
                    return NavigationOutcome::Ignored(Rejection::OutOfRange(index));
                }
            }
        };

        let current = match target {
            ScrollTarget::Top => SectionIndex::FIRST,
            ScrollTarget::Section(section) => section,
        };
        self.state.borrow_mut().jump_to(current);
        self.view.borrow_mut().scroll_to(target);
        self.render_controls();
        NavigationOutcome::Scrolled
    }

    pub async fn step(&self, step: Step) -> NavigationOutcome {
        let target = self.state.borrow().offset(step.delta());
        self.request_navigate(target, NavigateOptions::default())
            .await
    }

    /// Handles a `popstate` event.
    pub async fn restore(&self, state: Option<HistoryState>) -> NavigationOutcome {
        let Some(state) = state else {
            debug!("History entry without section state ignored");
            return NavigationOutcome::Ignored(Rejection::NoHistoryState);
        };
        let target = i64::try_from(state.section_index).unwrap_or(i64::MAX);
        self.request_navigate(target, NavigateOptions::without_history())
            .await
    }

    /// Target of an arrow key, if it should navigate.
    ///
    /// Keys only count while focus is inside the navigator, and only when
    /// a section exists in that direction; the host prevents the default
    /// action exactly when this returns `Some`.
    pub fn key_target(&self, key: &str, focus_within: bool) -> Option<i64> {
        if !focus_within {
            return None;
        }
        let step = key_step(key)?;
        let state = self.state.borrow();
        let target = state.offset(step.delta());
        SectionIndex::checked(target, state.total()).map(SectionIndex::as_i64)
    }

    /// Routes one input to the matching operation.
    pub async fn dispatch(&self, command: Command) -> NavigationOutcome {
        match command {
            Command::Toc(index) => self.activate_toc(index).await,
            Command::Step(step) => self.step(step).await,
            Command::Jump(index) => {
                self.request_navigate(index, NavigateOptions::default())
                    .await
            }
            Command::SetMode(mode) => {
                if self.set_mode(mode) {
                    NavigationOutcome::Applied
                } else {
                    NavigationOutcome::Ignored(Rejection::Unchanged)
                }
            }
            Command::ToggleToc => {
                self.toggle_toc();
                NavigationOutcome::Applied
            }
            Command::Restore(state) => self.restore(state).await,
        }
    }

    /// Warms the cache with the section after the current one.
    ///
    /// Independent of the navigation lock; never changes the position.
    /// Returns `true` when a section was fetched.
    pub async fn prefetch_next(&self) -> bool {
        if !self.fetcher.source().is_available() {
            return false;
        }
        let next = {
            let state = self.state.borrow();
            state.current().next_within(state.total())
        };
        match next {
            Some(next) => self.fetcher.prefetch(next).await,
            None => false,
        }
    }

    /// Expands or collapses the TOC; returns the new expansion.
    pub fn toggle_toc(&self) -> bool {
        let expanded = self.state.borrow_mut().toggle_toc();
        self.view.borrow_mut().set_toc_expanded(expanded);
        expanded
    }

    /// Re-applies visibility and controls without changing state, for use
    /// after the host replaced part of the page.
    pub fn refresh(&self) {
        let visibility = self.state.borrow().visibility();
        self.view.borrow_mut().apply_visibility(visibility);
        self.render_controls();
    }

    /// Citation of the current section, dated `accessed`.
    pub fn citation(&self, heading: Option<&str>, document_title: &str, accessed: &str) -> String {
        let title = citation::section_title(heading, self.current_index(), &self.config.labels);
        let url = self.history.borrow().current_url();
        citation::citation(&title, document_title, &url, accessed)
    }

    /// Standalone print document for the current section.
    pub fn print_document(
        &self,
        heading: Option<&str>,
        document_title: &str,
        section_html: &str,
    ) -> String {
        let title = citation::section_title(heading, self.current_index(), &self.config.labels);
        citation::print_document(document_title, &title, section_html)
    }

    /// Announces an arbitrary message (print and copy feedback).
    pub fn announce(&self, message: &str) {
        self.announcer.borrow_mut().say(message);
    }

    pub fn current_index(&self) -> SectionIndex {
        self.state.borrow().current()
    }

    pub fn mode(&self) -> ViewMode {
        self.state.borrow().mode()
    }

    pub fn is_navigating(&self) -> bool {
        self.state.borrow().is_navigating()
    }

    pub fn total_sections(&self) -> usize {
        self.state.borrow().total()
    }

    pub fn is_server_rendered(&self) -> bool {
        self.state.borrow().is_server_rendered()
    }

    pub fn toc_expanded(&self) -> bool {
        self.state.borrow().toc_expanded()
    }

    pub fn labels(&self) -> &Labels {
        &self.config.labels
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    pub fn cached(&self, index: SectionIndex) -> Option<SharedHtml> {
        self.fetcher.cached(index)
    }

    pub fn source(&self) -> &S {
        self.fetcher.source()
    }

    pub fn view(&self) -> Ref<'_, V> {
        self.view.borrow()
    }

    pub fn history(&self) -> Ref<'_, H> {
        self.history.borrow()
    }

    pub fn history_mut(&self) -> RefMut<'_, H> {
        self.history.borrow_mut()
    }

    pub fn live_region(&self) -> Ref<'_, L> {
        Ref::map(self.announcer.borrow(), Announcer::region)
    }
}
