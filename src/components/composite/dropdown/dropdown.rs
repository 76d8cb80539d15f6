//! Dropdown View
//!
//! GPUI entity over `DropdownState`. Translates clicks, keys, hover, outside
//! mouse downs and search input changes into state transitions, and renders
//! the control, the menu and the form metadata around it.

use std::cell::RefCell;
use std::rc::Rc;

use gpui::{
    canvas, deferred, div, prelude::*, px, relative, App, Bounds, ClickEvent, Context, ElementId,
    Entity, EventEmitter, FocusHandle, Focusable, InteractiveElement, IntoElement, MouseDownEvent,
    ParentElement, Pixels, Render, SharedString, StatefulInteractiveElement, Styled, Subscription,
    Window,
};
use gpui_component::input::{Input, InputEvent, InputState, MoveDown, MoveUp};

use crate::config::WidgetsConfig;
use crate::constants::DROPDOWN_MENU_GAP;
use crate::helpers::{DropdownAction, DROPDOWN_CONTEXT};
use crate::i18n::t;
use crate::theme::colors::WidgetColors;
use crate::theme::typography::Typography;

use super::option::{DropdownOption, DropdownSize};
use super::state::{DropdownKey, DropdownState};

type ChangeHandler = Box<dyn Fn(&str, &mut Window, &mut App) + 'static>;

/// Events emitted by the dropdown
///
/// Subscribers run after the dropdown's own update, so they may update the
/// dropdown (e.g. feed a controlled value back); `on_change` handlers may not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownEvent {
    Change(String),
}

/// A select-style dropdown
pub struct Dropdown {
    id: ElementId,
    state: DropdownState,
    placeholder: SharedString,
    label: Option<SharedString>,
    required: bool,
    error: Option<SharedString>,
    helper_text: Option<SharedString>,
    size: DropdownSize,
    max_height: f32,
    width: Option<Pixels>,
    drop_up: bool,
    no_options_message: SharedString,
    focus_handle: FocusHandle,
    search_input: Entity<InputState>,
    /// Last painted menu bounds; mouse downs inside them are not "outside"
    menu_bounds: Rc<RefCell<Option<Bounds<Pixels>>>>,
    on_change: Option<ChangeHandler>,
    _subscriptions: Vec<Subscription>,
}

impl Dropdown {
    /// Create a new dropdown using the global widget defaults
    pub fn new(
        id: impl Into<ElementId>,
        options: Vec<DropdownOption>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let config = cx.try_global::<WidgetsConfig>().cloned().unwrap_or_default();
        let defaults = config.dropdown;
        let locale = config.locale;

        let search_placeholder = t(locale, "dropdown-search");
        let search_input =
            cx.new(|cx| InputState::new(window, cx).placeholder(search_placeholder));

        let mut subscriptions = Vec::new();
        subscriptions.push(cx.subscribe(&search_input, |this, input, event, cx| {
            if matches!(event, InputEvent::Change) {
                let term = input.read(cx).value().to_string();
                this.state.set_search_term(term);
                cx.notify();
            }
        }));

        let mut state = DropdownState::new(options);
        state.set_searchable(defaults.searchable);

        Self {
            id: id.into(),
            state,
            placeholder: defaults
                .placeholder
                .map(SharedString::from)
                .unwrap_or_else(|| t(locale, "dropdown-placeholder")),
            label: None,
            required: false,
            error: None,
            helper_text: None,
            size: defaults.size,
            max_height: defaults.max_height,
            width: None,
            drop_up: false,
            no_options_message: defaults
                .no_options_message
                .map(SharedString::from)
                .unwrap_or_else(|| t(locale, "dropdown-no-options")),
            focus_handle: cx.focus_handle(),
            search_input,
            menu_bounds: Rc::new(RefCell::new(None)),
            on_change: None,
            _subscriptions: subscriptions,
        }
    }

    // ==================== Configuration ====================

    pub fn set_options(&mut self, options: Vec<DropdownOption>, cx: &mut Context<Self>) {
        self.state.set_options(options);
        cx.notify();
    }

    /// Put the dropdown under host control (`Some`) or release it (`None`)
    pub fn set_value(&mut self, value: Option<String>, cx: &mut Context<Self>) {
        self.state.set_value(value);
        cx.notify();
    }

    /// Seed the uncontrolled value
    pub fn set_initial_value(&mut self, value: impl Into<String>) {
        self.state = std::mem::take(&mut self.state).with_initial_value(value);
    }

    pub fn set_disabled(&mut self, disabled: bool, cx: &mut Context<Self>) {
        self.state.set_disabled(disabled);
        cx.notify();
    }

    pub fn set_searchable(&mut self, searchable: bool) {
        self.state.set_searchable(searchable);
    }

    pub fn set_placeholder(&mut self, placeholder: impl Into<SharedString>) {
        self.placeholder = placeholder.into();
    }

    pub fn set_label(&mut self, label: impl Into<SharedString>, required: bool) {
        self.label = Some(label.into());
        self.required = required;
    }

    /// Error text replaces the helper text while set
    pub fn set_error(&mut self, error: Option<SharedString>, cx: &mut Context<Self>) {
        self.error = error;
        cx.notify();
    }

    pub fn set_helper_text(&mut self, helper_text: impl Into<SharedString>) {
        self.helper_text = Some(helper_text.into());
    }

    pub fn set_size(&mut self, size: DropdownSize) {
        self.size = size;
    }

    pub fn set_max_height(&mut self, max_height: f32) {
        self.max_height = max_height;
    }

    pub fn set_width(&mut self, width: impl Into<Pixels>) {
        self.width = Some(width.into());
    }

    /// Render the menu above the control
    pub fn set_drop_up(&mut self, drop_up: bool) {
        self.drop_up = drop_up;
    }

    pub fn set_no_options_message(&mut self, message: impl Into<SharedString>) {
        self.no_options_message = message.into();
    }

    /// Set the change handler
    pub fn on_change(&mut self, handler: impl Fn(&str, &mut Window, &mut App) + 'static) {
        self.on_change = Some(Box::new(handler));
    }

    /// The displayed value
    pub fn value(&self) -> Option<&str> {
        self.state.value()
    }

    pub fn state(&self) -> &DropdownState {
        &self.state
    }

    // ==================== Event handling ====================

    fn report(&self, value: String, window: &mut Window, cx: &mut Context<Self>) {
        match &self.on_change {
            Some(handler) => handler(&value, window, cx),
            None => tracing::debug!(%value, "dropdown selection has no change handler"),
        }
        cx.emit(DropdownEvent::Change(value));
    }

    /// Apply side effects owed after a transition
    fn sync(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        if self.state.take_focus_request() {
            // The search field only exists once the open menu renders.
            cx.defer_in(window, |this, window, cx| {
                if this.state.is_open() {
                    let handle = this.search_input.read(cx).focus_handle(cx);
                    window.focus(&handle);
                }
            });
        }

        if !self.state.is_open() {
            let search_focused = self.search_input.read(cx).focus_handle(cx).is_focused(window);
            if !self.search_input.read(cx).value().is_empty() {
                self.search_input
                    .update(cx, |input, cx| input.set_value("", window, cx));
            }
            if search_focused {
                window.focus(&self.focus_handle);
            }
        }

        cx.notify();
    }

    fn on_toggle_click(&mut self, _: &ClickEvent, window: &mut Window, cx: &mut Context<Self>) {
        if self.state.is_disabled() {
            return;
        }
        window.focus(&self.focus_handle);
        self.state.toggle();
        self.sync(window, cx);
    }

    /// Feed a key to the state; returns whether it was consumed
    fn apply_key(&mut self, key: DropdownKey, window: &mut Window, cx: &mut Context<Self>) -> bool {
        let outcome = self.state.handle_key(key);
        if let Some(value) = outcome.selected {
            self.report(value, window, cx);
        }
        self.sync(window, cx);
        outcome.handled
    }

    fn on_action(&mut self, action: &DropdownAction, window: &mut Window, cx: &mut Context<Self>) {
        if !self.apply_key((*action).into(), window, cx) {
            cx.propagate();
        }
    }

    /// Arrow keys in the search field move the highlight, not the caret
    fn on_search_arrow(&mut self, key: DropdownKey, window: &mut Window, cx: &mut Context<Self>) {
        if self.state.is_open() && self.apply_key(key, window, cx) {
            cx.stop_propagation();
        }
    }

    fn on_mouse_down_out(
        &mut self,
        event: &MouseDownEvent,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        if !self.state.is_listening() {
            return;
        }
        let inside_menu = self
            .menu_bounds
            .borrow()
            .as_ref()
            .is_some_and(|bounds| bounds.contains(&event.position));
        if inside_menu {
            return;
        }
        self.state.handle_outside_mouse_down();
        self.sync(window, cx);
    }

    fn select_at(&mut self, index: usize, window: &mut Window, cx: &mut Context<Self>) {
        if let Some(value) = self.state.select(index) {
            self.report(value, window, cx);
            self.sync(window, cx);
        }
    }

    // ==================== Rendering ====================

    fn render_toggle(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let (padding_x, padding_y, font_size) = self.size.metrics();
        let disabled = self.state.is_disabled();
        let selected = self.state.selected_option().map(|option| option.label.clone());

        let (text, text_color) = match selected {
            Some(label) => (label, WidgetColors::text_primary()),
            None => (self.placeholder.clone(), WidgetColors::text_muted()),
        };
        let border_color = if self.error.is_some() {
            WidgetColors::border_error()
        } else if self.state.is_open() {
            WidgetColors::border_focus()
        } else {
            WidgetColors::border()
        };
        let bg = if disabled {
            WidgetColors::surface_disabled()
        } else {
            WidgetColors::surface()
        };
        let chevron = if self.state.is_open() { "▲" } else { "▼" };

        div()
            .id("dropdown-toggle")
            .debug_selector(|| "dropdown-toggle".into())
            .w_full()
            .px(px(padding_x))
            .py(px(padding_y))
            .bg(bg)
            .border_1()
            .border_color(border_color)
            .rounded_md()
            .text_size(px(font_size))
            .text_color(text_color)
            .flex()
            .items_center()
            .justify_between()
            .when(disabled, |el| el.opacity(0.5))
            .when(!disabled, |el| {
                el.cursor_pointer()
                    .on_click(cx.listener(Self::on_toggle_click))
            })
            .child(text)
            .child(
                div()
                    .ml_2()
                    .text_color(WidgetColors::text_muted())
                    .text_size(px(10.0))
                    .child(chevron),
            )
    }

    fn render_option(
        &self,
        index: usize,
        option: &DropdownOption,
        cx: &mut Context<Self>,
    ) -> impl IntoElement {
        let highlighted = self.state.highlighted() == Some(index);
        let selected = self.state.value() == Some(option.value.as_str());
        let disabled = option.disabled;

        let bg = if highlighted {
            Some(WidgetColors::option_highlight())
        } else if disabled {
            Some(WidgetColors::option_disabled_bg())
        } else if selected {
            Some(WidgetColors::option_selected())
        } else {
            None
        };
        let text_color = if disabled {
            WidgetColors::text_secondary()
        } else {
            WidgetColors::text_primary()
        };

        div()
            .id(("dropdown-option", index))
            .px_4()
            .py_2()
            .flex()
            .items_center()
            .text_color(text_color)
            .when_some(bg, |el, bg| el.bg(bg))
            .when(selected, |el| el.font_weight(gpui::FontWeight::SEMIBOLD))
            .when(!disabled, |el| {
                el.cursor_pointer()
                    .hover(|s| s.bg(WidgetColors::option_hover()))
            })
            .on_hover(cx.listener(move |this, hovered: &bool, _window, cx| {
                if *hovered {
                    this.state.hover(index);
                    cx.notify();
                }
            }))
            .on_click(cx.listener(move |this, _: &ClickEvent, window, cx| {
                this.select_at(index, window, cx);
            }))
            .when_some(option.icon.clone(), |el, icon| {
                el.child(div().mr_2().child(icon))
            })
            .child(
                div()
                    .flex()
                    .flex_col()
                    .child(option.label.clone())
                    .when_some(option.description.clone(), |el, description| {
                        el.child(
                            div()
                                .text_size(px(Typography::TEXT_SM))
                                .text_color(WidgetColors::text_secondary())
                                .child(description),
                        )
                    }),
            )
    }

    fn render_menu(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let filtered: Vec<DropdownOption> = self
            .state
            .filtered_options()
            .into_iter()
            .cloned()
            .collect();
        let menu_bounds = Rc::clone(&self.menu_bounds);

        let rows = if filtered.is_empty() {
            vec![
                div()
                    .debug_selector(|| "dropdown-no-options".into())
                    .px_4()
                    .py_2()
                    .text_color(WidgetColors::text_secondary())
                    .child(self.no_options_message.clone())
                    .into_any_element(),
            ]
        } else {
            filtered
                .iter()
                .enumerate()
                .map(|(index, option)| self.render_option(index, option, cx).into_any_element())
                .collect()
        };

        div()
            .id("dropdown-menu")
            .debug_selector(|| "dropdown-menu".into())
            .occlude()
            .absolute()
            .left_0()
            .w_full()
            .map(|el| {
                if self.drop_up {
                    el.bottom(relative(1.)).mb(px(DROPDOWN_MENU_GAP))
                } else {
                    el.top(relative(1.)).mt(px(DROPDOWN_MENU_GAP))
                }
            })
            .bg(WidgetColors::surface())
            .border_1()
            .border_color(WidgetColors::border_menu())
            .rounded_md()
            .shadow_lg()
            .max_h(px(self.max_height))
            .overflow_y_scroll()
            .text_size(px(Typography::TEXT_SM))
            .child(
                canvas(
                    move |bounds, _window, _cx| *menu_bounds.borrow_mut() = Some(bounds),
                    |_, _, _, _| {},
                )
                .absolute()
                .size_full(),
            )
            .when(self.state.is_searchable(), |el| {
                el.child(
                    div()
                        .debug_selector(|| "dropdown-search".into())
                        .p_2()
                        .child(Input::new(&self.search_input)),
                )
            })
            .child(div().py_1().flex().flex_col().children(rows))
    }

    fn render_meta(&self) -> Option<impl IntoElement> {
        let (text, color) = match (&self.error, &self.helper_text) {
            (Some(error), _) => (error.clone(), WidgetColors::text_error()),
            (None, Some(helper)) => (helper.clone(), WidgetColors::text_secondary()),
            (None, None) => return None,
        };
        Some(
            div()
                .mt_1()
                .text_size(px(Typography::TEXT_SM))
                .text_color(color)
                .child(text),
        )
    }
}

impl EventEmitter<DropdownEvent> for Dropdown {}

impl Focusable for Dropdown {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl Render for Dropdown {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let is_open = self.state.is_open();
        if !is_open {
            self.menu_bounds.borrow_mut().take();
        }

        div()
            .id(self.id.clone())
            .relative()
            .flex()
            .flex_col()
            .when_some(self.width, |el, width| el.w(width))
            .when(self.state.is_listening(), |el| {
                el.on_mouse_down_out(cx.listener(Self::on_mouse_down_out))
            })
            .when_some(self.label.clone(), |el, label| {
                el.child(
                    div()
                        .mb_1()
                        .flex()
                        .gap_1()
                        .text_size(px(Typography::TEXT_SM))
                        .text_color(WidgetColors::text_primary())
                        .child(label)
                        .when(self.required, |el| {
                            el.child(div().text_color(WidgetColors::text_error()).child("*"))
                        }),
                )
            })
            .child(
                div()
                    .relative()
                    .key_context(DROPDOWN_CONTEXT)
                    .track_focus(&self.focus_handle)
                    .on_action(cx.listener(Self::on_action))
                    .capture_action(cx.listener(|this, _: &MoveUp, window, cx| {
                        this.on_search_arrow(DropdownKey::ArrowUp, window, cx)
                    }))
                    .capture_action(cx.listener(|this, _: &MoveDown, window, cx| {
                        this.on_search_arrow(DropdownKey::ArrowDown, window, cx)
                    }))
                    .child(self.render_toggle(cx))
                    .when(is_open, |el| {
                        el.child(deferred(self.render_menu(cx)).with_priority(1))
                    }),
            )
            .children(self.render_meta())
    }
}

#[cfg(test)]
mod tests {
    use gpui::{point, Modifiers, TestAppContext};

    use super::*;
    use crate::components::composite::test_support::open_window;

    fn numbered() -> Vec<DropdownOption> {
        vec![
            DropdownOption::new("1", "Option 1"),
            DropdownOption::new("2", "Option 2").disabled(true),
            DropdownOption::new("3", "Option 3"),
        ]
    }

    fn searchable(window: &mut Window, cx: &mut Context<Dropdown>) -> Dropdown {
        let mut dropdown = Dropdown::new("numbers", numbered(), window, cx);
        dropdown.set_searchable(true);
        dropdown
    }

    fn is_open(dropdown: &Entity<Dropdown>, cx: &TestAppContext) -> bool {
        cx.read(|cx| dropdown.read(cx).state().is_open())
    }

    #[gpui::test]
    fn test_open_focuses_search_field(cx: &mut TestAppContext) {
        let (dropdown, cx) = open_window(cx, searchable);

        let toggle = cx.debug_bounds("dropdown-toggle").expect("toggle is rendered");
        cx.simulate_click(toggle.center(), Modifiers::none());
        cx.run_until_parked();

        assert!(is_open(&dropdown, cx));
        let search_focused = cx.update(|window, cx| {
            let search = dropdown.read(cx).search_input.read(cx).focus_handle(cx);
            search.is_focused(window)
        });
        assert!(search_focused);
    }

    #[gpui::test]
    fn test_search_field_mouse_down_is_not_outside(cx: &mut TestAppContext) {
        let (dropdown, cx) = open_window(cx, searchable);

        let toggle = cx.debug_bounds("dropdown-toggle").expect("toggle is rendered");
        cx.simulate_click(toggle.center(), Modifiers::none());
        cx.run_until_parked();

        let search = cx.debug_bounds("dropdown-search").expect("search field is rendered");
        cx.simulate_click(search.center(), Modifiers::none());
        assert!(is_open(&dropdown, cx));

        let menu = cx.debug_bounds("dropdown-menu").expect("menu is rendered");
        let below = point(menu.center().x, menu.bottom() + px(40.0));
        cx.simulate_click(below, Modifiers::none());
        assert!(!is_open(&dropdown, cx));
        assert_eq!(cx.read(|cx| dropdown.read(cx).state().listeners().active()), 0);
        assert!(cx.debug_bounds("dropdown-menu").is_none());
    }

    #[gpui::test]
    fn test_no_match_shows_message_and_enter_selects_nothing(cx: &mut TestAppContext) {
        let (dropdown, cx) = open_window(cx, searchable);

        let toggle = cx.debug_bounds("dropdown-toggle").expect("toggle is rendered");
        cx.simulate_click(toggle.center(), Modifiers::none());
        cx.run_until_parked();
        assert!(cx.debug_bounds("dropdown-no-options").is_none());

        cx.simulate_input("zzz");
        assert_eq!(cx.read(|cx| dropdown.read(cx).state().search_term().to_string()), "zzz");
        assert!(cx.debug_bounds("dropdown-no-options").is_some());

        cx.simulate_keystrokes("enter");
        assert!(is_open(&dropdown, cx));
        assert_eq!(cx.read(|cx| dropdown.read(cx).value().map(str::to_string)), None);
    }

    #[gpui::test]
    fn test_arrows_in_search_field_move_highlight(cx: &mut TestAppContext) {
        let (dropdown, cx) = open_window(cx, searchable);

        let toggle = cx.debug_bounds("dropdown-toggle").expect("toggle is rendered");
        cx.simulate_click(toggle.center(), Modifiers::none());
        cx.run_until_parked();
        assert_eq!(cx.read(|cx| dropdown.read(cx).state().highlighted()), Some(0));

        cx.simulate_keystrokes("down");
        assert_eq!(cx.read(|cx| dropdown.read(cx).state().highlighted()), Some(2));

        cx.simulate_keystrokes("enter");
        assert!(!is_open(&dropdown, cx));
        assert_eq!(
            cx.read(|cx| dropdown.read(cx).value().map(str::to_string)),
            Some("3".to_string())
        );
        let toggle_focused = cx.update(|window, cx| dropdown.read(cx).focus_handle.is_focused(window));
        assert!(toggle_focused);
    }

    #[gpui::test]
    fn test_keyboard_opens_closed_dropdown(cx: &mut TestAppContext) {
        let (dropdown, cx) = open_window(cx, |window, cx| {
            Dropdown::new("numbers", numbered(), window, cx)
        });
        cx.update(|window, cx| window.focus(&dropdown.read(cx).focus_handle));

        cx.simulate_keystrokes("up");
        assert!(is_open(&dropdown, cx));
        assert_eq!(cx.read(|cx| dropdown.read(cx).state().highlighted()), Some(2));

        cx.simulate_keystrokes("escape");
        assert!(!is_open(&dropdown, cx));
    }
}
