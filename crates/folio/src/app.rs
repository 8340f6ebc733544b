//! Application state and the event loop.

use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use folio_background::{
    AnimationHost, AuroraMesh, AuroraWidget, container_for, normalized_position,
};
use folio_core::{AuroraConfig, CategoryFilter, ContactField, Portfolio, Project};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
};
use tracing::debug;

use crate::analytics;
use crate::contact::ContactForm;
use crate::ui::{self, BASE, home::GraphPanel};

/// Longest the loop sleeps when no frame is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Poll interval while a submission is in flight.
const SENDING_POLL: Duration = Duration::from_millis(50);

const PAGE_HINTS: &[(&str, &str)] = &[("Tab", "section"), ("1-4", "jump"), ("q", "quit")];
const GALLERY_HINTS: &[(&str, &str)] = &[
    ("Tab", "section"),
    ("↑/↓", "select"),
    ("f", "filter"),
    ("q", "quit"),
];
const MODAL_HINTS: &[(&str, &str)] = &[("Esc", "close"), ("←/→", "browse")];
const TYPING_HINTS: &[(&str, &str)] = &[("Esc", "stop typing"), ("Ctrl-S", "send")];

/// Page sections, in navigation order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Section {
    #[default]
    Home,
    About,
    Projects,
    Contact,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Home,
        Section::About,
        Section::Projects,
        Section::Contact,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::About => "About",
            Section::Projects => "Projects",
            Section::Contact => "Contact",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn from_digit(c: char) -> Option<Self> {
        let i = c.to_digit(10)? as usize;
        Self::ALL.get(i.checked_sub(1)?).copied()
    }
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    running: bool,
    section: Section,
    portfolio: Portfolio,
    filter: CategoryFilter,
    /// Index into the filtered project list.
    selected: usize,
    /// Open detail modal, as an index into the filtered list.
    modal: Option<usize>,
    form: ContactForm,
    /// Keys go to the contact form.
    typing: bool,
    aurora: AuroraConfig,
    /// Raw reduced-motion preference, resolved when the background mounts.
    reduced_motion_env: Option<String>,
    /// Mounted on the first draw, once the terminal size is known.
    host: Option<AnimationHost>,
    aurora_area: Rect,
    graph: GraphPanel,
    started: Instant,
}

impl App {
    pub fn new(
        portfolio: Portfolio,
        form: ContactForm,
        aurora: AuroraConfig,
        reduced_motion_env: Option<&str>,
    ) -> Self {
        Self {
            running: false,
            section: Section::default(),
            portfolio,
            filter: CategoryFilter::All,
            selected: 0,
            modal: None,
            form,
            typing: false,
            aurora,
            reduced_motion_env: reduced_motion_env.map(str::to_owned),
            host: None,
            aurora_area: Rect::default(),
            graph: GraphPanel::default(),
            started: Instant::now(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        analytics::section_view(self.section);
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
            self.on_tick();
        }
        self.shutdown();
        Ok(())
    }

    fn now_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    /// Run due frame callbacks and collect finished submissions.
    fn on_tick(&mut self) {
        let now = self.now_ms();
        if let Some(host) = self.host.as_mut() {
            host.poll(now);
        }
        self.form.poll();
    }

    /// How long to wait for input before the next tick.
    fn wait_timeout(&self) -> Duration {
        let idle = if self.form.status().is_sending() {
            SENDING_POLL
        } else {
            IDLE_POLL
        };
        self.host
            .as_ref()
            .and_then(|host| host.next_wakeup(self.now_ms()))
            .map_or(idle, |wait| wait.min(idle))
    }

    /// Mount the background on the first draw and follow size changes.
    fn sync_background(&mut self, area: Rect) {
        if self.host.is_some() && area == self.aurora_area {
            return;
        }
        let container = container_for(area);
        self.aurora_area = area;
        match self.host.as_mut() {
            Some(host) => host.on_resize(container),
            None => {
                self.host = Some(AnimationHost::mount(
                    &self.aurora,
                    self.reduced_motion_env.as_deref(),
                    container,
                    self.now_ms(),
                ));
            }
        }
    }

    /// Whether the mounted background resolved to a single static frame.
    fn reduced_motion(&self) -> bool {
        self.host
            .as_ref()
            .and_then(AnimationHost::mesh)
            .is_some_and(AuroraMesh::is_reduced_motion)
    }

    /// Cancel the background before the terminal is handed back.
    fn shutdown(&mut self) {
        if let Some(host) = self.host.as_mut() {
            host.unmount();
        }
        debug!("app shut down");
    }

    fn visible_projects(&self) -> Vec<&Project> {
        self.portfolio.filtered(self.filter)
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.sync_background(area);
        let surface = self.host.as_ref().and_then(AnimationHost::surface);
        frame.render_widget(AuroraWidget::new(surface, BASE), area);

        let [nav_area, body, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        ui::chrome::render_nav(frame, nav_area, &self.portfolio.profile.name, self.section);

        match self.section {
            Section::Home => {
                let t = if self.reduced_motion() {
                    0.0
                } else {
                    self.started.elapsed().as_secs_f32()
                };
                ui::home::render(frame, body, &self.portfolio.profile, &mut self.graph, t);
            }
            Section::About => ui::about::render(frame, body, &self.portfolio),
            Section::Projects => {
                let projects = self.portfolio.filtered(self.filter);
                ui::projects::render(frame, body, &projects, self.filter, self.selected);
                if let Some(project) = self.modal.and_then(|i| projects.get(i)) {
                    ui::projects::render_modal(frame, body, project);
                }
            }
            Section::Contact => ui::contact::render(frame, body, &self.form, self.typing),
        }

        ui::chrome::render_footer(
            frame,
            footer_area,
            &self.portfolio.profile.name,
            self.key_hints(),
        );
    }

    fn key_hints(&self) -> &'static [(&'static str, &'static str)] {
        if self.typing {
            TYPING_HINTS
        } else if self.modal.is_some() {
            MODAL_HINTS
        } else if self.section == Section::Projects {
            GALLERY_HINTS
        } else {
            PAGE_HINTS
        }
    }

    /// Reads the crossterm events and updates the state of [`App`].
    ///
    /// Waits until the next frame is due, then drains whatever else is
    /// already queued so a burst of mouse moves costs one redraw.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if !event::poll(self.wait_timeout())? {
            return Ok(());
        }
        loop {
            self.on_event(event::read()?);
            if !self.running || !event::poll(Duration::ZERO)? {
                break;
            }
        }
        Ok(())
    }

    fn on_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
            Event::Mouse(mouse) => self.on_mouse_event(mouse),
            Event::FocusLost => {
                if let Some(host) = self.host.as_mut() {
                    host.on_pointer_leave();
                }
            }
            // The next draw picks up the new frame area.
            Event::Resize(_, _) => {}
            _ => {}
        }
    }

    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                let Some(host) = self.host.as_mut() else {
                    return;
                };
                match normalized_position(self.aurora_area, mouse.column, mouse.row) {
                    Some((x, y)) => host.on_pointer_move(x, y),
                    None => host.on_pointer_leave(),
                }
            }
            MouseEventKind::ScrollDown => self.select_next(),
            MouseEventKind::ScrollUp => self.select_prev(),
            _ => {}
        }
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        // The form owns every key while typing, Ctrl-C included.
        if self.typing {
            self.on_form_key(key);
            return;
        }
        if key.modifiers == KeyModifiers::CONTROL
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        {
            self.quit();
            return;
        }
        if self.modal.is_some() {
            self.on_modal_key(key);
            return;
        }

        if let KeyCode::Char(c) = key.code
            && let Some(section) = Section::from_digit(c)
        {
            self.go_to(section);
            return;
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.quit(),
            KeyCode::Tab => self.go_to(self.section.next()),
            KeyCode::BackTab => self.go_to(self.section.prev()),
            _ => self.on_section_key(key),
        }
    }

    fn on_section_key(&mut self, key: KeyEvent) {
        match (self.section, key.code) {
            (Section::Home, KeyCode::Enter) => self.go_to(Section::Projects),
            (Section::Projects, KeyCode::Char('f')) => self.cycle_filter(),
            (Section::Projects, KeyCode::Down | KeyCode::Char('j')) => self.select_next(),
            (Section::Projects, KeyCode::Up | KeyCode::Char('k')) => self.select_prev(),
            (Section::Projects, KeyCode::Enter) => self.open_modal(self.selected),
            (Section::Contact, KeyCode::Enter | KeyCode::Char('i')) => self.typing = true,
            _ => {}
        }
    }

    fn on_modal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => self.modal = None,
            KeyCode::Right | KeyCode::Char('l') => {
                self.select_next();
                self.open_modal(self.selected);
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.select_prev();
                self.open_modal(self.selected);
            }
            _ => {}
        }
    }

    fn on_form_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.typing = false,
            KeyCode::Char('s') | KeyCode::Char('S') if ctrl => self.form.submit(),
            KeyCode::Tab | KeyCode::Down => self.form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.form.focus_prev(),
            KeyCode::Enter if self.form.focus() == ContactField::Message => {
                self.form.submit()
            }
            KeyCode::Enter => self.form.focus_next(),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Char(c) if !ctrl => self.form.insert_char(c),
            _ => {}
        }
    }

    fn go_to(&mut self, section: Section) {
        if section == self.section {
            return;
        }
        self.section = section;
        self.modal = None;
        analytics::section_view(section);
    }

    fn cycle_filter(&mut self) {
        self.filter = self.filter.next();
        self.selected = 0;
    }

    fn select_next(&mut self) {
        let len = self.visible_projects().len();
        if self.section == Section::Projects && len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    fn select_prev(&mut self) {
        let len = self.visible_projects().len();
        if self.section == Section::Projects && len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    fn open_modal(&mut self, index: usize) {
        let Some(id) = self.visible_projects().get(index).map(|p| p.id.clone()) else {
            return;
        };
        self.modal = Some(index);
        analytics::project_view(&id);
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
