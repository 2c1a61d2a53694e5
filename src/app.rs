use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::{Action, Direction};
use crate::config::{Config, parse_key};
use crate::model::store::SnapshotStore;
use crate::model::users::{SystemUsers, UserCache};
use crate::system::sampler::{ProcSampler, TickCapacity};
use crate::ui::theme::Theme;

#[derive(Debug, Clone)]
pub struct ResolvedKeybinds {
    pub quit: KeyCode,
    pub help: KeyCode,
    pub refresh: KeyCode,
    pub up: KeyCode,
    pub down: KeyCode,
}

impl ResolvedKeybinds {
    pub fn from_config(kb: &crate::config::KeybindsConfig) -> Self {
        Self {
            quit: parse_key(&kb.quit).unwrap_or(KeyCode::Char('q')),
            help: parse_key(&kb.help).unwrap_or(KeyCode::Char('?')),
            refresh: parse_key(&kb.refresh).unwrap_or(KeyCode::Char('r')),
            up: parse_key(&kb.up).unwrap_or(KeyCode::Up),
            down: parse_key(&kb.down).unwrap_or(KeyCode::Down),
        }
    }

    /// Returns (key_label, description) pairs for the help overlay.
    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        vec![
            (key_label(self.quit), "Quit"),
            (key_label(self.refresh), "Refresh now"),
            (key_label(self.up), "Select previous row"),
            (key_label(self.down), "Select next row"),
            ("t".to_string(), "Cycle theme"),
            (key_label(self.help), "Toggle help"),
            ("Ctrl+C".to_string(), "Quit (always)"),
        ]
    }
}

fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Up => "\u{2191}".to_string(),
        KeyCode::Down => "\u{2193}".to_string(),
        _ => "?".to_string(),
    }
}

pub struct App {
    pub running: bool,
    pub store: SnapshotStore,
    sampler: ProcSampler,
    /// Aggregate CPU data points (percent × 100), fed by the store's
    /// observer callback and drained by the header sparkline.
    pub cpu_history: Rc<RefCell<VecDeque<u64>>>,
    pub selected_row: usize,
    pub show_help: bool,
    pub status_message: Option<(String, Instant)>,
    pub theme: Theme,
    pub keybinds: ResolvedKeybinds,
}

impl App {
    pub fn new(config: Config) -> Self {
        let users = UserCache::new(Box::new(SystemUsers::new()));
        let mut store = SnapshotStore::new(
            users,
            TickCapacity::detect(),
            config.general.clamp_aggregate,
        );

        let capacity = config.general.sparkline_length.max(1);
        let cpu_history = Rc::new(RefCell::new(VecDeque::with_capacity(capacity)));
        let sink = Rc::clone(&cpu_history);
        store.set_on_cpu_data_point(move |percent| {
            let mut history = sink.borrow_mut();
            if history.len() == capacity {
                history.pop_front();
            }
            history.push_back((percent * 100.0).round().max(0.0) as u64);
        });

        let mut app = App {
            running: true,
            store,
            sampler: ProcSampler::new(),
            cpu_history,
            selected_row: 0,
            show_help: false,
            status_message: None,
            theme: Theme::from_config(&config.colors.theme),
            keybinds: ResolvedKeybinds::from_config(&config.keybinds),
        };
        // Baseline sample; CPU reads 0 until the second refresh.
        app.refresh_data();
        app
    }

    pub fn refresh_data(&mut self) {
        if let Err(err) = self.store.refresh(&mut self.sampler) {
            // Table keeps its last-known-good contents; retried next tick.
            self.status_message = Some((err.to_string(), Instant::now()));
        }

        if self.store.row_count() > 0 {
            self.selected_row = self.selected_row.min(self.store.row_count() - 1);
        } else {
            self.selected_row = 0;
        }

        // Clear expired status messages (older than 3 seconds)
        if let Some((_, created)) = &self.status_message
            && created.elapsed().as_secs() >= 3
        {
            self.status_message = None;
        }
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }
        if self.show_help && (key.code == KeyCode::Esc || key.code == self.keybinds.help) {
            return Action::ToggleHelp;
        }
        match key.code {
            code if code == self.keybinds.quit => Action::Quit,
            code if code == self.keybinds.help => Action::ToggleHelp,
            code if code == self.keybinds.refresh => Action::Refresh,
            code if code == self.keybinds.up => Action::Navigate(Direction::Up),
            code if code == self.keybinds.down => Action::Navigate(Direction::Down),
            KeyCode::Char('t') => Action::CycleTheme,
            _ => Action::None,
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::Refresh => self.refresh_data(),
            Action::CycleTheme => self.theme = self.theme.next(),
            Action::Navigate(Direction::Up) => {
                self.selected_row = self.selected_row.saturating_sub(1);
            }
            Action::Navigate(Direction::Down) => {
                if self.selected_row + 1 < self.store.row_count() {
                    self.selected_row += 1;
                }
            }
            Action::None => {}
        }
    }
}
