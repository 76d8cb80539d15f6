//! Dropdown State
//!
//! Headless state machine behind the `Dropdown` view. It owns the open flag,
//! the search term, the keyboard highlight and the uncontrolled value, and
//! never needs a window, so every interaction rule is testable on its own.
//!
//! The highlight always indexes the *filtered* list and only ever rests on an
//! enabled entry. Every way of closing goes through `close`, which clears the
//! search term and the highlight and releases the outside-click listener.

use crate::helpers::{DropdownAction, ListenerGuard, ListenerKind, ListenerRegistry};

use super::option::DropdownOption;

/// Keys the dropdown reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropdownKey {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
    Tab,
}

impl From<DropdownAction> for DropdownKey {
    fn from(action: DropdownAction) -> Self {
        match action {
            DropdownAction::SelectNext => Self::ArrowDown,
            DropdownAction::SelectPrev => Self::ArrowUp,
            DropdownAction::Confirm => Self::Enter,
            DropdownAction::Dismiss => Self::Escape,
            DropdownAction::Blur => Self::Tab,
        }
    }
}

/// Result of feeding a key to the state machine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyOutcome {
    /// The key was used and should not propagate further
    pub handled: bool,
    /// Value chosen by this key, to be reported to the host
    pub selected: Option<String>,
}

impl KeyOutcome {
    fn ignored() -> Self {
        Self::default()
    }

    fn handled() -> Self {
        Self {
            handled: true,
            selected: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Down,
    Up,
}

/// Interaction and selection state of one dropdown instance
#[derive(Debug)]
pub struct DropdownState {
    options: Vec<DropdownOption>,
    /// Value supplied by the host; wins for display when present
    controlled_value: Option<String>,
    /// Shadow copy used while uncontrolled
    internal_value: Option<String>,
    disabled: bool,
    searchable: bool,
    is_open: bool,
    search_term: String,
    highlighted: Option<usize>,
    /// One-shot request to focus the search field once the menu renders
    focus_request: bool,
    listeners: ListenerRegistry,
    outside_click: Option<ListenerGuard>,
}

impl DropdownState {
    /// Create a closed, uncontrolled dropdown
    pub fn new(options: Vec<DropdownOption>) -> Self {
        Self {
            options,
            controlled_value: None,
            internal_value: None,
            disabled: false,
            searchable: false,
            is_open: false,
            search_term: String::new(),
            highlighted: None,
            focus_request: false,
            listeners: ListenerRegistry::new(),
            outside_click: None,
        }
    }

    /// Seed the uncontrolled value
    pub fn with_initial_value(mut self, value: impl Into<String>) -> Self {
        self.internal_value = Some(value.into());
        self
    }

    /// Use a shared registry for the outside-click listener
    pub fn with_listeners(mut self, listeners: ListenerRegistry) -> Self {
        self.listeners = listeners;
        self
    }

    // ==================== Getters ====================

    pub fn options(&self) -> &[DropdownOption] {
        &self.options
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    pub fn is_controlled(&self) -> bool {
        self.controlled_value.is_some()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Highlighted index into `filtered_options`
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    /// The displayed value: controlled if supplied, otherwise internal
    pub fn value(&self) -> Option<&str> {
        self.controlled_value
            .as_deref()
            .or(self.internal_value.as_deref())
    }

    /// The option matching the displayed value
    pub fn selected_option(&self) -> Option<&DropdownOption> {
        let value = self.value()?;
        self.options.iter().find(|option| option.value == value)
    }

    /// Options whose label contains the search term, in list order
    pub fn filtered_options(&self) -> Vec<&DropdownOption> {
        self.options
            .iter()
            .filter(|option| option.matches(&self.search_term))
            .collect()
    }

    pub fn first_enabled(&self) -> Option<usize> {
        self.filtered_options()
            .iter()
            .position(|option| !option.disabled)
    }

    pub fn last_enabled(&self) -> Option<usize> {
        self.filtered_options()
            .iter()
            .rposition(|option| !option.disabled)
    }

    /// Whether the outside-click listener is registered
    pub fn is_listening(&self) -> bool {
        self.outside_click.is_some()
    }

    /// Consume the pending search-field focus request
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_request)
    }

    // ==================== Setters ====================

    /// Replace the option list
    pub fn set_options(&mut self, options: Vec<DropdownOption>) {
        self.options = options;
        if self.is_open {
            self.highlighted = self.first_enabled();
        }
    }

    /// Disabling an open dropdown closes it
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled && self.is_open {
            self.close();
        }
    }

    pub fn set_searchable(&mut self, searchable: bool) {
        self.searchable = searchable;
        if !searchable {
            self.search_term.clear();
        }
    }

    /// Sync the host-supplied value
    ///
    /// `Some` puts the dropdown under host control and refreshes the shadow
    /// copy; `None` hands ownership back, keeping the last controlled value.
    pub fn set_value(&mut self, value: Option<String>) {
        if let Some(value) = &value {
            self.internal_value = Some(value.clone());
        }
        self.controlled_value = value;
    }

    // ==================== Transitions ====================

    /// Open when closed, close when open; ignored while disabled
    pub fn toggle(&mut self) {
        if self.disabled {
            return;
        }
        if self.is_open {
            self.close();
        } else {
            self.open(Direction::Down);
        }
    }

    fn open(&mut self, from: Direction) {
        self.is_open = true;
        self.search_term.clear();
        self.highlighted = match from {
            Direction::Down => self.first_enabled(),
            Direction::Up => self.last_enabled(),
        };
        if self.outside_click.is_none() {
            self.outside_click = Some(self.listeners.acquire(ListenerKind::OutsideMouseDown));
        }
        if self.searchable {
            self.focus_request = true;
        }
        tracing::debug!(highlighted = ?self.highlighted, "dropdown opened");
    }

    /// Close and reset search term and highlight
    pub fn close(&mut self) {
        if self.is_open {
            tracing::debug!("dropdown closed");
        }
        self.is_open = false;
        self.search_term.clear();
        self.highlighted = None;
        self.focus_request = false;
        self.outside_click = None;
    }

    /// Choose the entry at `index` in the filtered list
    ///
    /// Returns the value to report, or `None` when the entry is missing or
    /// disabled, in which case nothing changes.
    pub fn select(&mut self, index: usize) -> Option<String> {
        if self.disabled {
            return None;
        }
        let value = self
            .filtered_options()
            .get(index)
            .filter(|option| !option.disabled)
            .map(|option| option.value.clone())?;

        if !self.is_controlled() {
            self.internal_value = Some(value.clone());
        }
        tracing::debug!(%value, "dropdown option selected");
        self.close();
        Some(value)
    }

    /// Pointer hover over the entry at `index`; only enabled entries take the highlight
    pub fn hover(&mut self, index: usize) {
        if !self.is_open {
            return;
        }
        let enabled = self
            .filtered_options()
            .get(index)
            .is_some_and(|option| !option.disabled);
        if enabled {
            self.highlighted = Some(index);
        }
    }

    /// Update the live search term and re-seat the highlight
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        if !self.is_open || !self.searchable {
            return;
        }
        let term = term.into();
        if term == self.search_term {
            return;
        }
        self.search_term = term;
        self.highlighted = self.first_enabled();
    }

    /// Pointer down outside the dropdown's root
    pub fn handle_outside_mouse_down(&mut self) {
        if self.is_open {
            self.close();
        }
    }

    /// Keyboard contract for the toggle and the search field
    pub fn handle_key(&mut self, key: DropdownKey) -> KeyOutcome {
        if self.disabled {
            return KeyOutcome::ignored();
        }
        tracing::trace!(?key, open = self.is_open, "dropdown key");

        match key {
            DropdownKey::ArrowDown => {
                if self.is_open {
                    self.move_highlight(Direction::Down);
                } else {
                    self.open(Direction::Down);
                }
                KeyOutcome::handled()
            }
            DropdownKey::ArrowUp => {
                if self.is_open {
                    self.move_highlight(Direction::Up);
                } else {
                    self.open(Direction::Up);
                }
                KeyOutcome::handled()
            }
            DropdownKey::Enter => {
                if !self.is_open {
                    self.open(Direction::Down);
                    return KeyOutcome::handled();
                }
                let selected = self.highlighted.and_then(|index| self.select(index));
                KeyOutcome {
                    handled: true,
                    selected,
                }
            }
            DropdownKey::Escape => {
                if !self.is_open {
                    return KeyOutcome::ignored();
                }
                self.close();
                KeyOutcome::handled()
            }
            DropdownKey::Tab => {
                // Focus still moves on; never swallow Tab.
                self.close();
                KeyOutcome::ignored()
            }
        }
    }

    fn move_highlight(&mut self, direction: Direction) {
        let len = self.filtered_options().len();
        self.highlighted = match self.highlighted.filter(|&index| index < len) {
            None => match direction {
                Direction::Down => self.first_enabled(),
                Direction::Up => self.last_enabled(),
            },
            Some(current) => Some(self.step(current, direction)),
        };
    }

    /// Next enabled index from `from`, wrapping; stays put if nothing else is enabled
    fn step(&self, from: usize, direction: Direction) -> usize {
        let filtered = self.filtered_options();
        let len = filtered.len();
        let mut index = from;
        for _ in 0..len {
            index = match direction {
                Direction::Down => (index + 1) % len,
                Direction::Up => (index + len - 1) % len,
            };
            if !filtered[index].disabled {
                return index;
            }
        }
        from
    }
}

impl Default for DropdownState {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
