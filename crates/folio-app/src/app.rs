#![forbid(unsafe_code)]

//! Application model: screen routing, visit gating, and overlay ownership.
//!
//! One [`AppModel`] owns everything: the gated loading sequence, the four
//! screens, the single optional overlay, and the profile store handle shared
//! with background tasks. Timers are declared from [`Model::subscriptions`]
//! so the 150 ms progress tick exists exactly while the sequence runs and the
//! animation tick exists exactly while something moves.

use std::sync::Arc;
use std::time::Duration;

use folio_core::catalog::CatalogStore;
use folio_core::geo::{self, FALLBACK_LOCATION};
use folio_core::progress::TICK_INTERVAL;
use folio_core::store::{self, ProfileStore, keys};
use folio_core::visit::{self, LoadPhase, LoadSequence};
use folio_core::ProjectRecord;
use folio_runtime::event::{Event, KeyCode};
use folio_runtime::subscription::{Every, SubId, Subscription};
use folio_runtime::{Cmd, Frame, Model, Rect};

use crate::chrome;
use crate::modal::{ModalAction, ProjectModal};
use crate::net::IpapiClient;
use crate::screens::about::AboutScreen;
use crate::screens::contact::ContactScreen;
use crate::screens::home::HomeScreen;
use crate::screens::loading::LoadingScreen;
use crate::screens::portfolio::PortfolioScreen;
use crate::screens::ScreenId;
use crate::theme::Theme;

const SUB_LOAD: SubId = 1;
const SUB_CLOCK: SubId = 2;
const SUB_ANIM: SubId = 3;

const ANIM_INTERVAL: Duration = Duration::from_millis(33);
const CLOCK_INTERVAL: Duration = Duration::from_secs(1);

/// Application messages.
#[derive(Debug)]
pub enum Msg {
    Input(Event),
    /// 150 ms progress tick, alive only while the loading sequence runs.
    LoadTick,
    /// ~30 fps animation tick, alive only while something is in motion.
    AnimTick,
    /// 1 s header clock tick.
    ClockTick,
    /// Resolved location display string from the background lookup.
    LocationResolved(String),
    OpenModal(ProjectRecord),
    CloseModal,
    ResetContactForm,
    Navigate(ScreenId),
}

impl From<Event> for Msg {
    fn from(event: Event) -> Self {
        Msg::Input(event)
    }
}

/// Startup knobs from the CLI.
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub start_screen: ScreenId,
    pub offline: bool,
    pub seed: u64,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            start_screen: ScreenId::Home,
            offline: false,
            seed: 0x5EED,
        }
    }
}

/// The whole application state.
pub struct AppModel {
    store: Arc<dyn ProfileStore>,
    theme: Theme,
    size: (u16, u16),

    load: LoadSequence,
    loading: LoadingScreen,

    screen: ScreenId,
    catalog: CatalogStore,
    home: HomeScreen,
    about: AboutScreen,
    portfolio: PortfolioScreen,
    contact: ContactScreen,
    modal: Option<ProjectModal>,

    location: Option<String>,
    clock: String,
    offline: bool,
}

impl AppModel {
    /// Build the model against a profile store.
    #[must_use]
    pub fn new(store: Arc<dyn ProfileStore>, opts: AppOptions) -> Self {
        let catalog = CatalogStore::load(&*store);
        let load = LoadSequence::gated(&*store, opts.seed);
        let portfolio = PortfolioScreen::new(catalog.visible_count());
        tracing::info!(
            backend = store.name(),
            first_visit = load.is_active(),
            "app model ready"
        );
        Self {
            store,
            theme: Theme::mono(),
            size: (80, 24),
            load,
            loading: LoadingScreen::new(),
            screen: opts.start_screen,
            catalog,
            home: HomeScreen::new(),
            about: AboutScreen::new(),
            portfolio,
            contact: ContactScreen::new(),
            modal: None,
            location: None,
            clock: chrome::clock_string(),
            offline: opts.offline,
        }
    }

    // ── accessors (tests, status line) ──────────────────────────────────────

    #[must_use]
    pub fn load_phase(&self) -> LoadPhase {
        self.load.phase()
    }

    #[must_use]
    pub fn screen(&self) -> ScreenId {
        self.screen
    }

    #[must_use]
    pub fn modal(&self) -> Option<&ProjectModal> {
        self.modal.as_ref()
    }

    #[must_use]
    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    #[must_use]
    pub fn contact(&self) -> &ContactScreen {
        &self.contact
    }

    #[must_use]
    pub fn portfolio(&self) -> &PortfolioScreen {
        &self.portfolio
    }

    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    // ── internals ───────────────────────────────────────────────────────────

    fn full_area(&self) -> Rect {
        Rect::new(0, 0, self.size.0, self.size.1)
    }

    fn content_area(&self) -> Rect {
        chrome::content_area(self.size.0, self.size.1)
    }

    fn animations_active(&self) -> bool {
        if self.load.is_active() {
            return true;
        }
        if let Some(modal) = &self.modal
            && (modal.is_animating() || modal.is_closing())
        {
            return true;
        }
        self.screen == ScreenId::Portfolio && self.portfolio.is_animating()
    }

    fn on_input(&mut self, event: Event) -> Cmd<Msg> {
        if let Event::Resize(w, h) = event {
            self.size = (w, h);
            return Cmd::none();
        }
        if event.is_ctrl_c() {
            return Cmd::quit();
        }

        // The loading sequence has no cancellation path; input waits it out.
        if self.load.is_active() {
            return Cmd::none();
        }

        if self.modal.is_some() {
            return self.on_modal_input(&event);
        }

        // Header tabs are clickable from every screen.
        if let Event::Mouse(mouse) = &event
            && matches!(
                mouse.kind,
                folio_runtime::event::MouseEventKind::Down(folio_runtime::event::MouseButton::Left)
            )
            && let Some(id) = chrome::tab_at(self.size.0, mouse.column, mouse.row)
        {
            return Cmd::msg(Msg::Navigate(id));
        }

        // Global keys; the contact form keeps plain characters for itself.
        if self.screen != ScreenId::Contact {
            if event.is_char('q') {
                return Cmd::quit();
            }
            for id in ScreenId::ALL {
                if event.is_char(id.hotkey()) {
                    return Cmd::msg(Msg::Navigate(id));
                }
            }
            if event.is_key(KeyCode::Tab) {
                return Cmd::msg(Msg::Navigate(self.screen.next()));
            }
            if event.is_key(KeyCode::BackTab) {
                return Cmd::msg(Msg::Navigate(self.screen.prev()));
            }
        } else if event.is_key(KeyCode::Esc) {
            return Cmd::msg(Msg::Navigate(ScreenId::Home));
        }

        let content = self.content_area();
        match self.screen {
            ScreenId::Home | ScreenId::About => Cmd::none(),
            ScreenId::Portfolio => self.portfolio.handle(&event, content, &mut self.catalog),
            ScreenId::Contact => self.contact.handle(&event, content),
        }
    }

    fn on_modal_input(&mut self, event: &Event) -> Cmd<Msg> {
        let area = self.full_area();
        let Some(modal) = self.modal.as_mut() else {
            return Cmd::none();
        };
        match modal.handle(event, area) {
            ModalAction::None => Cmd::none(),
            ModalAction::Close => Cmd::msg(Msg::CloseModal),
            ModalAction::OpenUrl(url) => Cmd::open_url(url),
        }
    }

    fn on_anim_tick(&mut self) {
        if self.load.is_active() {
            self.loading.tick(ANIM_INTERVAL);
        }
        self.portfolio.tick(ANIM_INTERVAL);
        if let Some(modal) = self.modal.as_mut()
            && modal.tick(ANIM_INTERVAL)
        {
            // Reverse transition has settled; detach the bound record.
            self.modal = None;
        }
    }

    fn footer_hints(&self) -> &'static str {
        if self.modal.is_some() {
            return "esc close · o demo · g source";
        }
        match self.screen {
            ScreenId::Portfolio => "j/k move · enter open · m more · o/g links · 1-4 screens · q quit",
            ScreenId::Contact => "tab fields · enter next · click send · esc home",
            _ => "1-4 screens · tab cycle · q quit",
        }
    }
}

impl Model for AppModel {
    type Message = Msg;

    fn init(&mut self) -> Cmd<Msg> {
        if let Some(cached) = store::get_or_absent(&*self.store, keys::LOCATION) {
            self.location = Some(cached);
            return Cmd::none();
        }
        if self.offline {
            self.location = Some(FALLBACK_LOCATION.to_string());
            return Cmd::none();
        }
        let store = Arc::clone(&self.store);
        Cmd::task(move || {
            let provider = IpapiClient::new();
            Msg::LocationResolved(geo::resolve_location(&*store, &provider))
        })
    }

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::Input(event) => self.on_input(event),
            Msg::LoadTick => {
                if self.load.tick(TICK_INTERVAL) {
                    visit::record_visit(&*self.store);
                    tracing::info!("loading sequence completed");
                }
                self.loading.chase(self.load.progress());
                Cmd::none()
            }
            Msg::AnimTick => {
                self.on_anim_tick();
                Cmd::none()
            }
            Msg::ClockTick => {
                self.clock = chrome::clock_string();
                Cmd::none()
            }
            Msg::LocationResolved(display) => {
                self.location = Some(display);
                Cmd::none()
            }
            Msg::OpenModal(record) => {
                match self.modal.as_mut() {
                    // Only one overlay instance: opening over an open modal
                    // just rebinds the record.
                    Some(modal) if !modal.is_closing() => modal.replace(record),
                    _ => self.modal = Some(ProjectModal::open(record)),
                }
                Cmd::none()
            }
            Msg::CloseModal => {
                if let Some(modal) = self.modal.as_mut() {
                    modal.begin_close();
                }
                Cmd::none()
            }
            Msg::ResetContactForm => {
                self.contact.reset();
                Cmd::none()
            }
            Msg::Navigate(id) => {
                self.screen = id;
                Cmd::none()
            }
        }
    }

    fn view(&self, frame: &mut Frame) {
        if self.load.is_active() {
            self.loading.view(frame, &self.theme, self.load.progress());
            return;
        }

        let status = match &self.location {
            Some(location) => format!("{location}, {}", self.clock),
            None => self.clock.clone(),
        };
        chrome::render_header(frame, self.screen, &status, &self.theme);

        let content = chrome::content_area(frame.width(), frame.height());
        match self.screen {
            ScreenId::Home => self.home.view(frame, content, &self.catalog, &self.theme),
            ScreenId::About => self.about.view(frame, content, &self.theme),
            ScreenId::Portfolio => self.portfolio.view(frame, content, &self.catalog, &self.theme),
            ScreenId::Contact => self.contact.view(frame, content, &self.theme),
        }
        chrome::render_footer(frame, self.footer_hints(), &self.theme);

        if let Some(modal) = &self.modal {
            let area = frame.area();
            modal.view(frame, area, &self.theme);
        }
    }

    fn subscriptions(&self) -> Vec<Box<dyn Subscription<Msg>>> {
        let mut subs: Vec<Box<dyn Subscription<Msg>>> = vec![Box::new(Every::new(
            SUB_CLOCK,
            CLOCK_INTERVAL,
            || Msg::ClockTick,
        ))];
        if self.load.is_active() {
            subs.push(Box::new(Every::new(SUB_LOAD, TICK_INTERVAL, || Msg::LoadTick)));
        }
        if self.animations_active() {
            subs.push(Box::new(Every::new(SUB_ANIM, ANIM_INTERVAL, || Msg::AnimTick)));
        }
        subs
    }
}
