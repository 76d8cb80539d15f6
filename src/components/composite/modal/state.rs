//! Modal State
//!
//! Headless lifecycle of a modal dialog: what had focus before it opened, the
//! focus trap while open, the key listener and the page scroll lock. The
//! open flag itself belongs to the host; this state only follows it and turns
//! Escape and overlay clicks into close requests.
//!
//! Generic over the focus target so the view can use `FocusHandle`s while
//! tests use plain values.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{
    LOCK_SCROLL, MODAL_ID_SUFFIX_LEN, MODAL_WIDTH_LARGE, MODAL_WIDTH_MEDIUM, MODAL_WIDTH_SMALL,
};
use crate::helpers::{ListenerGuard, ListenerKind, ListenerRegistry, ModalAction};

use super::focus_trap::FocusTrap;
use super::scroll_lock::{ScrollLock, ScrollLockGuard};

/// Width class of the modal container
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalSize {
    Small,
    #[default]
    Medium,
    Large,
    /// Fills the window, minus a margin
    Full,
}

impl ModalSize {
    /// Maximum container width in pixels; `None` for full width
    pub fn max_width(&self) -> Option<f32> {
        match self {
            Self::Small => Some(MODAL_WIDTH_SMALL),
            Self::Medium => Some(MODAL_WIDTH_MEDIUM),
            Self::Large => Some(MODAL_WIDTH_LARGE),
            Self::Full => None,
        }
    }
}

/// Layout variant of the modal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalVariant {
    #[default]
    Default,
    /// Tall colored header
    Profile,
    Post,
    /// Centered text, borderless header and footer
    Confirmation,
    /// Transparent container, no title, floating close button
    Media,
}

impl ModalVariant {
    pub fn shows_title(&self) -> bool {
        !matches!(self, Self::Media)
    }
}

/// DOM-style identifiers tying the dialog to its title and content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalIds {
    pub modal: String,
    pub title: String,
    pub content: String,
}

impl ModalIds {
    /// Use the host's id, or generate a unique `modal-xxxxxxxxx`
    pub fn generate(custom: Option<&str>) -> Self {
        let modal = match custom {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                let suffix = Uuid::new_v4().simple().to_string();
                format!("modal-{}", &suffix[..MODAL_ID_SUFFIX_LEN])
            }
        };
        Self {
            title: format!("{modal}-title"),
            content: format!("{modal}-content"),
            modal,
        }
    }
}

/// Behavior switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalOptions {
    pub close_on_esc: bool,
    pub close_on_overlay_click: bool,
    pub show_close_button: bool,
    pub lock_scroll: bool,
}

impl Default for ModalOptions {
    fn default() -> Self {
        Self {
            close_on_esc: true,
            close_on_overlay_click: true,
            show_close_button: true,
            lock_scroll: LOCK_SCROLL,
        }
    }
}

/// Keys the modal reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKey {
    Escape,
    Tab { shift: bool },
}

impl From<ModalAction> for ModalKey {
    fn from(action: ModalAction) -> Self {
        match action {
            ModalAction::Dismiss => Self::Escape,
            ModalAction::FocusNext => Self::Tab { shift: false },
            ModalAction::FocusPrev => Self::Tab { shift: true },
        }
    }
}

/// What the view should do after a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalKeyOutcome<F> {
    Ignored,
    /// Ask the host to close the modal
    RequestClose,
    /// Move focus to this target and stop the key
    Focus(F),
    /// Stop the key and leave focus where it is
    Hold,
}

pub struct ModalState<F> {
    options: ModalOptions,
    ids: ModalIds,
    is_open: bool,
    previous_focus: Option<F>,
    trap: FocusTrap<F>,
    initial_focus_pending: bool,
    listeners: ListenerRegistry,
    key_listener: Option<ListenerGuard>,
    scroll_lock: ScrollLock,
    scroll_guard: Option<ScrollLockGuard>,
}

impl<F: Clone + PartialEq> ModalState<F> {
    pub fn new(options: ModalOptions, id: Option<&str>) -> Self {
        Self {
            options,
            ids: ModalIds::generate(id),
            is_open: false,
            previous_focus: None,
            trap: FocusTrap::new(Vec::new()),
            initial_focus_pending: false,
            listeners: ListenerRegistry::new(),
            key_listener: None,
            scroll_lock: ScrollLock::new(),
            scroll_guard: None,
        }
    }

    pub fn with_listeners(mut self, listeners: ListenerRegistry) -> Self {
        self.listeners = listeners;
        self
    }

    /// Share the page-wide scroll lock
    pub fn with_scroll_lock(mut self, scroll_lock: ScrollLock) -> Self {
        self.scroll_lock = scroll_lock;
        self
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn ids(&self) -> &ModalIds {
        &self.ids
    }

    pub fn options(&self) -> &ModalOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: ModalOptions) {
        self.options = options;
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    pub fn scroll_lock(&self) -> &ScrollLock {
        &self.scroll_lock
    }

    /// Whether the key listener is registered
    pub fn is_listening(&self) -> bool {
        self.key_listener.is_some()
    }

    /// Whether this modal currently holds a scroll lock guard
    pub fn holds_scroll_lock(&self) -> bool {
        self.scroll_guard.is_some()
    }

    /// Focusable descendants in Tab order, close control first
    pub fn set_focus_targets(&mut self, targets: Vec<F>) {
        self.trap.set_targets(targets);
    }

    /// Follow the host opening the modal
    ///
    /// Remembers `previous_focus` for restoration. Returns `false` when the
    /// modal was already open.
    pub fn open(&mut self, previous_focus: Option<F>) -> bool {
        if self.is_open {
            return false;
        }
        self.is_open = true;
        self.previous_focus = previous_focus;
        self.initial_focus_pending = true;
        self.key_listener = Some(self.listeners.acquire(ListenerKind::KeyDown));
        if self.options.lock_scroll {
            self.scroll_guard = Some(self.scroll_lock.acquire());
        }
        tracing::debug!(id = %self.ids.modal, "modal opened");
        true
    }

    /// Follow the host closing the modal
    ///
    /// Returns the target that held focus before opening, once.
    pub fn close(&mut self) -> Option<F> {
        if !self.is_open {
            return None;
        }
        self.is_open = false;
        self.initial_focus_pending = false;
        self.key_listener = None;
        self.scroll_guard = None;
        tracing::debug!(id = %self.ids.modal, "modal closed");
        self.previous_focus.take()
    }

    /// Where focus goes right after opening: the first trap target
    pub fn take_initial_focus(&mut self) -> Option<F> {
        if !std::mem::take(&mut self.initial_focus_pending) {
            return None;
        }
        self.trap.first().cloned()
    }

    pub fn handle_key(&mut self, key: ModalKey, current: Option<&F>) -> ModalKeyOutcome<F> {
        if !self.is_open {
            return ModalKeyOutcome::Ignored;
        }
        match key {
            ModalKey::Escape if self.options.close_on_esc => ModalKeyOutcome::RequestClose,
            ModalKey::Escape => ModalKeyOutcome::Ignored,
            // With nothing to cycle through, Tab must still not leave the dialog.
            ModalKey::Tab { shift } => match self.trap.next(current, shift) {
                Some(target) => ModalKeyOutcome::Focus(target.clone()),
                None => ModalKeyOutcome::Hold,
            },
        }
    }

    /// Click on the overlay layer; only the overlay itself counts
    pub fn overlay_click(&self, target_is_overlay: bool) -> bool {
        self.is_open && target_is_overlay && self.options.close_on_overlay_click
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modal() -> ModalState<&'static str> {
        let mut state = ModalState::new(ModalOptions::default(), Some("settings"));
        state.set_focus_targets(vec!["close", "name", "save"]);
        state
    }

    #[test]
    fn ids_derive_from_custom_id() {
        let ids = ModalIds::generate(Some("settings"));
        assert_eq!(ids.modal, "settings");
        assert_eq!(ids.title, "settings-title");
        assert_eq!(ids.content, "settings-content");
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = ModalIds::generate(None);
        let b = ModalIds::generate(None);
        assert!(a.modal.starts_with("modal-"));
        assert_eq!(a.modal.len(), "modal-".len() + MODAL_ID_SUFFIX_LEN);
        assert_ne!(a.modal, b.modal);
        assert_eq!(a.title, format!("{}-title", a.modal));
    }

    #[test]
    fn open_focuses_close_control_and_close_restores() {
        let mut state = modal();
        assert!(state.open(Some("trigger")));
        assert!(!state.open(Some("other")), "already open");
        assert_eq!(state.take_initial_focus(), Some("close"));
        assert_eq!(state.take_initial_focus(), None);

        assert_eq!(state.close(), Some("trigger"));
        assert_eq!(state.close(), None);
    }

    #[test]
    fn escape_respects_option() {
        let mut state = modal();
        state.open(None);
        assert_eq!(state.handle_key(ModalKey::Escape, None), ModalKeyOutcome::RequestClose);

        state.set_options(ModalOptions {
            close_on_esc: false,
            ..ModalOptions::default()
        });
        assert_eq!(state.handle_key(ModalKey::Escape, None), ModalKeyOutcome::Ignored);
    }

    #[test]
    fn closed_modal_ignores_keys() {
        let mut state = modal();
        assert_eq!(state.handle_key(ModalKey::Escape, None), ModalKeyOutcome::Ignored);
    }

    #[test]
    fn tab_cycles_within_modal() {
        let mut state = modal();
        state.open(None);
        assert_eq!(
            state.handle_key(ModalKey::Tab { shift: false }, Some(&"save")),
            ModalKeyOutcome::Focus("close")
        );
        assert_eq!(
            state.handle_key(ModalKey::Tab { shift: true }, Some(&"close")),
            ModalKeyOutcome::Focus("save")
        );
        assert_eq!(
            state.handle_key(ModalKey::Tab { shift: false }, Some(&"close")),
            ModalKeyOutcome::Focus("name")
        );
    }

    #[test]
    fn tab_without_targets_holds_focus() {
        let options = ModalOptions {
            show_close_button: false,
            ..ModalOptions::default()
        };
        let mut state: ModalState<&str> = ModalState::new(options, None);
        state.open(Some("trigger"));
        assert_eq!(state.take_initial_focus(), None);
        assert_eq!(
            state.handle_key(ModalKey::Tab { shift: false }, Some(&"trigger")),
            ModalKeyOutcome::Hold
        );
        assert_eq!(state.handle_key(ModalKey::Escape, None), ModalKeyOutcome::RequestClose);
    }

    #[test]
    fn actions_map_to_keys() {
        assert_eq!(ModalKey::from(ModalAction::Dismiss), ModalKey::Escape);
        assert_eq!(ModalKey::from(ModalAction::FocusPrev), ModalKey::Tab { shift: true });
    }

    #[test]
    fn overlay_click_requires_exact_target() {
        let mut state = modal();
        state.open(None);
        assert!(state.overlay_click(true));
        assert!(!state.overlay_click(false));

        state.set_options(ModalOptions {
            close_on_overlay_click: false,
            ..ModalOptions::default()
        });
        assert!(!state.overlay_click(true));
    }

    #[test]
    fn scroll_lock_follows_lifecycle() {
        let lock = ScrollLock::new();
        let mut first = modal().with_scroll_lock(lock.clone());
        let mut second = modal().with_scroll_lock(lock.clone());

        first.open(None);
        second.open(None);
        assert_eq!(lock.depth(), 2);
        first.close();
        assert!(!first.holds_scroll_lock());
        assert!(!first.is_listening());
        assert!(lock.is_locked());
        drop(second);
        assert!(!lock.is_locked(), "unmount releases the lock");
    }

    #[test]
    fn scroll_lock_can_be_disabled() {
        let lock = ScrollLock::new();
        let options = ModalOptions {
            lock_scroll: false,
            ..ModalOptions::default()
        };
        let mut state: ModalState<u8> = ModalState::new(options, None).with_scroll_lock(lock.clone());
        state.open(None);
        assert!(state.is_listening());
        assert!(!state.holds_scroll_lock());
        assert!(!lock.is_locked());
    }

    #[test]
    fn key_listener_is_balanced() {
        let registry = ListenerRegistry::new();
        {
            let mut state = modal().with_listeners(registry.clone());
            for _ in 0..3 {
                state.open(None);
                state.close();
            }
            state.open(None);
            assert_eq!(registry.active(), 1);
        }
        assert_eq!(registry.added(), 4);
        assert_eq!(registry.removed(), 4);
    }
}
