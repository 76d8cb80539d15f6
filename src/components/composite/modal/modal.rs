//! Modal View
//!
//! A dialog over a dimmed overlay. The host owns the open flag: it calls
//! `set_open` and listens for `ModalEvent::CloseRequested`, emitted on Escape,
//! overlay clicks, the close control and footer close callbacks.
//!
//! Modal keys are bubble-phase actions in the `Modal` key context, so a
//! focused widget inside the dialog (an open dropdown) resolves Escape and
//! Tab first. While the page scroll lock is held the overlay occludes the
//! page, so wheel input never reaches it.

use gpui::{
    div, prelude::*, px, AnyElement, App, ClickEvent, Context, ElementId, EventEmitter,
    FocusHandle, Focusable, InteractiveElement, IntoElement, MouseButton, MouseDownEvent,
    ParentElement, Render, SharedString, StatefulInteractiveElement, Styled, Subscription,
    WeakEntity, Window,
};

use crate::config::WidgetsConfig;
use crate::constants::MODAL_VERTICAL_MARGIN;
use crate::helpers::{ModalAction, MODAL_CONTEXT};
use crate::theme::colors::WidgetColors;
use crate::theme::typography::Typography;

use super::scroll_lock::ScrollLock;
use super::state::{ModalKeyOutcome, ModalOptions, ModalSize, ModalState, ModalVariant};

type ContentBuilder = Box<dyn Fn(&mut Window, &mut App) -> AnyElement + 'static>;
type FooterBuilder = Box<dyn Fn(ModalCloser, &mut Window, &mut App) -> AnyElement + 'static>;

/// Events emitted by the modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalEvent {
    /// The user asked to close; the host decides
    CloseRequested,
}

/// Close callback handed to footer builders
#[derive(Clone)]
pub struct ModalCloser {
    modal: WeakEntity<Modal>,
}

impl ModalCloser {
    pub fn close(&self, cx: &mut App) {
        let _ = self
            .modal
            .update(cx, |_, cx| cx.emit(ModalEvent::CloseRequested));
    }
}

/// Modal component
pub struct Modal {
    state: ModalState<FocusHandle>,
    title: Option<SharedString>,
    size: ModalSize,
    variant: ModalVariant,
    /// Held by the overlay; keeps modal keys live when no target has focus
    overlay_handle: FocusHandle,
    close_handle: FocusHandle,
    /// Host focusables inside the content, in Tab order
    focus_targets: Vec<FocusHandle>,
    content: Option<ContentBuilder>,
    footer: Option<FooterBuilder>,
    _release: Subscription,
}

impl EventEmitter<ModalEvent> for Modal {}

impl Modal {
    /// Create a closed modal; `id` falls back to a generated unique id
    ///
    /// Dropping the modal while open still hands focus back to where it was.
    pub fn new(id: Option<&str>, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let config = cx.try_global::<WidgetsConfig>().cloned().unwrap_or_default();
        let defaults = config.modal;
        let options = ModalOptions {
            close_on_esc: defaults.close_on_esc,
            close_on_overlay_click: defaults.close_on_overlay_click,
            show_close_button: defaults.show_close_button,
            lock_scroll: defaults.lock_scroll,
        };
        let scroll_lock = cx.default_global::<ScrollLock>().clone();
        let release = cx.on_release_in(window, |this, window, _cx| {
            if let Some(previous) = this.state.close() {
                window.focus(&previous);
            }
        });

        Self {
            state: ModalState::new(options, id).with_scroll_lock(scroll_lock),
            title: None,
            size: defaults.size,
            variant: ModalVariant::Default,
            overlay_handle: cx.focus_handle(),
            close_handle: cx.focus_handle(),
            focus_targets: Vec::new(),
            content: None,
            footer: None,
            _release: release,
        }
    }

    pub fn set_title(&mut self, title: impl Into<SharedString>) {
        self.title = Some(title.into());
    }

    pub fn set_size(&mut self, size: ModalSize) {
        self.size = size;
    }

    pub fn set_variant(&mut self, variant: ModalVariant) {
        self.variant = variant;
    }

    pub fn set_options(&mut self, options: ModalOptions) {
        self.state.set_options(options);
        self.refresh_focus_targets();
    }

    /// Focusable elements rendered by the content, in Tab order
    pub fn set_focus_targets(&mut self, targets: Vec<FocusHandle>) {
        self.focus_targets = targets;
        self.refresh_focus_targets();
    }

    /// Set the content builder, called on every render
    pub fn set_content(&mut self, builder: impl Fn(&mut Window, &mut App) -> AnyElement + 'static) {
        self.content = Some(Box::new(builder));
    }

    /// Set the footer builder; it receives a closer for its own buttons
    pub fn set_footer(
        &mut self,
        builder: impl Fn(ModalCloser, &mut Window, &mut App) -> AnyElement + 'static,
    ) {
        self.footer = Some(Box::new(builder));
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn state(&self) -> &ModalState<FocusHandle> {
        &self.state
    }

    /// Follow the host's open flag
    pub fn set_open(&mut self, open: bool, window: &mut Window, cx: &mut Context<Self>) {
        if open {
            let previous = window.focused(cx);
            if self.state.open(previous) {
                self.refresh_focus_targets();
                window.focus(&self.overlay_handle);
                cx.defer_in(window, |this, window, _cx| {
                    if let Some(handle) = this.state.take_initial_focus() {
                        window.focus(&handle);
                    }
                });
            }
        } else if let Some(previous) = self.state.close() {
            window.focus(&previous);
        }
        cx.notify();
    }

    fn refresh_focus_targets(&mut self) {
        let mut targets = Vec::with_capacity(self.focus_targets.len() + 1);
        if self.state.options().show_close_button {
            targets.push(self.close_handle.clone());
        }
        targets.extend(self.focus_targets.iter().cloned());
        self.state.set_focus_targets(targets);
    }

    fn request_close(&mut self, cx: &mut Context<Self>) {
        tracing::debug!(id = %self.state.ids().modal, "modal close requested");
        cx.emit(ModalEvent::CloseRequested);
    }

    fn on_action(&mut self, action: &ModalAction, window: &mut Window, cx: &mut Context<Self>) {
        let current = window.focused(cx);
        match self.state.handle_key((*action).into(), current.as_ref()) {
            ModalKeyOutcome::Ignored => cx.propagate(),
            ModalKeyOutcome::RequestClose => self.request_close(cx),
            ModalKeyOutcome::Focus(handle) => window.focus(&handle),
            ModalKeyOutcome::Hold => {}
        }
    }

    fn on_overlay_mouse_down(
        &mut self,
        _: &MouseDownEvent,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        if self.state.overlay_click(true) {
            self.request_close(cx);
        }
    }

    fn render_close_button(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let (text_color, bg) = match self.variant {
            ModalVariant::Media => (WidgetColors::text_light(), Some(WidgetColors::media_close_bg())),
            ModalVariant::Profile => (WidgetColors::text_light(), None),
            _ => (WidgetColors::text_muted(), None),
        };

        div()
            .id("modal-close")
            .track_focus(&self.close_handle)
            .size(px(28.0))
            .rounded_full()
            .flex()
            .items_center()
            .justify_center()
            .text_color(text_color)
            .text_size(px(Typography::TEXT_BASE))
            .when_some(bg, |el, bg| el.bg(bg))
            .cursor_pointer()
            .focus(|s| s.border_1().border_color(WidgetColors::border_focus()))
            .on_click(cx.listener(|this, _: &ClickEvent, _window, cx| this.request_close(cx)))
            .child("×")
    }

    fn render_header(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let ids = self.state.ids();
        let show_close = self.state.options().show_close_button;

        let header = div()
            .flex()
            .items_start()
            .justify_between()
            .p_4()
            .map(|el| match self.variant {
                ModalVariant::Profile => el
                    .bg(WidgetColors::profile_header())
                    .text_color(WidgetColors::text_light())
                    .rounded_t_lg()
                    .h(px(160.0)),
                ModalVariant::Confirmation => el.pt_6().pb_0(),
                ModalVariant::Media => el.absolute().top_4().right_4(),
                ModalVariant::Default | ModalVariant::Post => {
                    el.border_b_1().border_color(WidgetColors::border_menu())
                }
            });

        header
            .when(self.variant.shows_title(), |el| {
                el.child(
                    div()
                        .id(ElementId::Name(ids.title.clone().into()))
                        .text_size(px(Typography::TEXT_XL))
                        .font_weight(gpui::FontWeight::SEMIBOLD)
                        .child(self.title.clone().unwrap_or_default()),
                )
            })
            .when(show_close, |el| el.child(self.render_close_button(cx)))
    }
}

impl Focusable for Modal {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.overlay_handle.clone()
    }
}

impl Render for Modal {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        if !self.state.is_open() {
            return div().into_any_element();
        }

        let ids = self.state.ids().clone();
        let viewport_height = window.viewport_size().height;
        let content_max_height = match self.variant {
            ModalVariant::Media => viewport_height * 0.9,
            _ => viewport_height - px(MODAL_VERTICAL_MARGIN),
        };

        let content = self.content.as_ref().map(|builder| builder(window, cx));
        let footer = self.footer.as_ref().map(|builder| {
            let closer = ModalCloser {
                modal: cx.entity().downgrade(),
            };
            builder(closer, window, cx)
        });

        let container = div()
            .id(ElementId::Name(format!("{}-container", ids.modal).into()))
            .debug_selector(|| "modal-container".into())
            .relative()
            .w_full()
            .flex()
            .flex_col()
            .map(|el| match self.size.max_width() {
                Some(width) => el.max_w(px(width)),
                None => el.m_4(),
            })
            .map(|el| match self.variant {
                ModalVariant::Media => el.rounded_lg().shadow_xl(),
                ModalVariant::Confirmation => el
                    .bg(WidgetColors::surface())
                    .rounded_lg()
                    .shadow_xl()
                    .items_center(),
                _ => el.bg(WidgetColors::surface()).rounded_lg().shadow_xl(),
            })
            // Clicks inside the dialog never count as overlay clicks.
            .on_mouse_down(MouseButton::Left, |_, _, cx| cx.stop_propagation())
            .child(self.render_header(cx))
            .child(
                div()
                    .id(ElementId::Name(ids.content.clone().into()))
                    .max_h(content_max_height)
                    .overflow_y_scroll()
                    .map(|el| match self.variant {
                        ModalVariant::Media => el,
                        ModalVariant::Confirmation => el.px_4().py_3(),
                        _ => el.p_4(),
                    })
                    .children(content),
            )
            .when_some(footer, |el, footer| {
                el.child(
                    div()
                        .flex()
                        .items_center()
                        .justify_end()
                        .gap_2()
                        .p_4()
                        .when(
                            !matches!(self.variant, ModalVariant::Confirmation | ModalVariant::Media),
                            |el| el.border_t_1().border_color(WidgetColors::border_menu()),
                        )
                        .child(footer),
                )
            });

        div()
            .id(ElementId::Name(ids.modal.into()))
            .debug_selector(|| "modal-overlay".into())
            .key_context(MODAL_CONTEXT)
            .track_focus(&self.overlay_handle)
            .absolute()
            .inset_0()
            .bg(WidgetColors::overlay())
            .flex()
            .items_center()
            .justify_center()
            .map(|el| {
                if self.state.holds_scroll_lock() {
                    el.occlude()
                } else {
                    el.block_mouse_except_scroll()
                }
            })
            .when(self.state.is_listening(), |el| {
                el.on_action(cx.listener(Self::on_action))
            })
            .on_mouse_down(MouseButton::Left, cx.listener(Self::on_overlay_mouse_down))
            .child(container)
            .into_any_element()
    }
}

#[cfg(test)]
mod tests {
    use gpui::{
        point, Entity, Modifiers, ScrollDelta, ScrollHandle, ScrollWheelEvent, TestAppContext,
        TouchPhase, VisualTestContext,
    };

    use super::*;
    use crate::components::composite::dropdown::{Dropdown, DropdownOption};
    use crate::components::composite::test_support::open_window;

    /// A scrollable page with a trigger and a modal hosting a searchable dropdown
    struct Host {
        modal: Option<Entity<Modal>>,
        dropdown: Entity<Dropdown>,
        trigger: FocusHandle,
        page: ScrollHandle,
        close_requests: usize,
        _subscriptions: Vec<Subscription>,
    }

    impl Host {
        fn new(window: &mut Window, cx: &mut Context<Self>) -> Self {
            let dropdown = cx.new(|cx| {
                let options = (1..=20)
                    .map(|n| DropdownOption::new(n.to_string(), format!("City {n}")))
                    .collect();
                let mut dropdown = Dropdown::new("city", options, window, cx);
                dropdown.set_searchable(true);
                dropdown
            });
            let modal = cx.new(|cx| {
                let mut modal = Modal::new(Some("picker"), window, cx);
                let content = dropdown.clone();
                modal.set_content(move |_window, _cx| content.clone().into_any_element());
                modal.set_focus_targets(vec![dropdown.read(cx).focus_handle(cx)]);
                modal
            });
            let subscription = cx.subscribe(&modal, |this, _, event: &ModalEvent, _cx| match event {
                ModalEvent::CloseRequested => this.close_requests += 1,
            });

            Self {
                modal: Some(modal),
                dropdown,
                trigger: cx.focus_handle(),
                page: ScrollHandle::new(),
                close_requests: 0,
                _subscriptions: vec![subscription],
            }
        }
    }

    impl Render for Host {
        fn render(&mut self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
            div()
                .relative()
                .size_full()
                .child(
                    div()
                        .id("page")
                        .size_full()
                        .overflow_y_scroll()
                        .track_scroll(&self.page)
                        .child(div().id("trigger").track_focus(&self.trigger).h(px(40.0)).child("Open"))
                        .child(div().h(px(4000.0))),
                )
                .children(self.modal.clone())
        }
    }

    fn modal(host: &Entity<Host>, cx: &VisualTestContext) -> Entity<Modal> {
        cx.read(|cx| host.read(cx).modal.clone()).expect("modal is mounted")
    }

    fn set_open(host: &Entity<Host>, open: bool, cx: &mut VisualTestContext) {
        let modal = modal(host, cx);
        cx.update(|window, cx| {
            if open {
                window.focus(&host.read(cx).trigger);
            }
            modal.update(cx, |modal, cx| modal.set_open(open, window, cx));
        });
        cx.run_until_parked();
    }

    fn close_requests(host: &Entity<Host>, cx: &VisualTestContext) -> usize {
        cx.read(|cx| host.read(cx).close_requests)
    }

    fn dropdown_open(host: &Entity<Host>, cx: &VisualTestContext) -> bool {
        cx.read(|cx| host.read(cx).dropdown.read(cx).state().is_open())
    }

    fn open_dropdown(host: &Entity<Host>, cx: &mut VisualTestContext) {
        let toggle = cx.debug_bounds("dropdown-toggle").expect("toggle is rendered");
        cx.simulate_click(toggle.center(), Modifiers::none());
        cx.run_until_parked();
        assert!(dropdown_open(host, cx));
    }

    fn scroll_page(cx: &mut VisualTestContext) {
        cx.simulate_event(ScrollWheelEvent {
            position: point(px(10.0), px(10.0)),
            delta: ScrollDelta::Pixels(point(px(0.0), px(-200.0))),
            modifiers: Modifiers::none(),
            touch_phase: TouchPhase::Moved,
        });
    }

    #[gpui::test]
    fn test_open_focuses_first_target(cx: &mut TestAppContext) {
        let (host, cx) = open_window(cx, Host::new);
        set_open(&host, true, cx);

        let modal = modal(&host, cx);
        let close_focused = cx.update(|window, cx| modal.read(cx).close_handle.is_focused(window));
        assert!(close_focused);
        assert!(cx.debug_bounds("modal-overlay").is_some());
    }

    #[gpui::test]
    fn test_escape_closes_inner_dropdown_first(cx: &mut TestAppContext) {
        let (host, cx) = open_window(cx, Host::new);
        set_open(&host, true, cx);
        open_dropdown(&host, cx);

        cx.simulate_keystrokes("escape");
        assert!(!dropdown_open(&host, cx));
        assert_eq!(close_requests(&host, cx), 0);

        cx.simulate_keystrokes("escape");
        assert_eq!(close_requests(&host, cx), 1);
    }

    #[gpui::test]
    fn test_tab_closes_inner_dropdown_and_stays_trapped(cx: &mut TestAppContext) {
        let (host, cx) = open_window(cx, Host::new);
        set_open(&host, true, cx);
        open_dropdown(&host, cx);

        cx.simulate_keystrokes("tab");
        assert!(!dropdown_open(&host, cx));

        let modal = modal(&host, cx);
        let close_focused = cx.update(|window, cx| modal.read(cx).close_handle.is_focused(window));
        assert!(close_focused);
        assert_eq!(close_requests(&host, cx), 0);
    }

    #[gpui::test]
    fn test_menu_beyond_container_is_not_an_overlay_click(cx: &mut TestAppContext) {
        let (host, cx) = open_window(cx, Host::new);
        set_open(&host, true, cx);
        open_dropdown(&host, cx);

        let container = cx.debug_bounds("modal-container").expect("container is rendered");
        let menu = cx.debug_bounds("dropdown-menu").expect("menu is rendered");
        let position = point(menu.center().x, menu.bottom() - px(12.0));
        assert!(!container.contains(&position));

        cx.simulate_mouse_down(position, MouseButton::Left, Modifiers::none());
        assert_eq!(close_requests(&host, cx), 0);
        assert!(dropdown_open(&host, cx));

        cx.simulate_mouse_up(position, MouseButton::Left, Modifiers::none());
        assert!(!dropdown_open(&host, cx));
        assert!(cx.read(|cx| host.read(cx).dropdown.read(cx).value().is_some()));
        assert_eq!(close_requests(&host, cx), 0);
    }

    #[gpui::test]
    fn test_overlay_click_requests_close(cx: &mut TestAppContext) {
        let (host, cx) = open_window(cx, Host::new);
        set_open(&host, true, cx);

        let container = cx.debug_bounds("modal-container").expect("container is rendered");
        cx.simulate_click(container.origin + point(px(4.0), px(4.0)), Modifiers::none());
        assert_eq!(close_requests(&host, cx), 0);

        cx.simulate_click(point(px(4.0), px(4.0)), Modifiers::none());
        assert_eq!(close_requests(&host, cx), 1);
    }

    #[gpui::test]
    fn test_page_does_not_scroll_under_open_modal(cx: &mut TestAppContext) {
        let (host, cx) = open_window(cx, Host::new);
        let page = cx.read(|cx| host.read(cx).page.clone());

        set_open(&host, true, cx);
        assert_eq!(cx.read(|cx| cx.global::<ScrollLock>().depth()), 1);
        scroll_page(cx);
        assert_eq!(page.offset().y, px(0.0));

        set_open(&host, false, cx);
        assert_eq!(cx.read(|cx| cx.global::<ScrollLock>().depth()), 0);
        scroll_page(cx);
        assert!(page.offset().y < px(0.0));
    }

    #[gpui::test]
    fn test_close_restores_trigger_focus(cx: &mut TestAppContext) {
        let (host, cx) = open_window(cx, Host::new);
        set_open(&host, true, cx);
        set_open(&host, false, cx);

        let trigger_focused = cx.update(|window, cx| host.read(cx).trigger.is_focused(window));
        assert!(trigger_focused);
        assert!(cx.debug_bounds("modal-overlay").is_none());
    }

    #[gpui::test]
    fn test_dropping_open_modal_restores_focus(cx: &mut TestAppContext) {
        let (host, cx) = open_window(cx, Host::new);
        set_open(&host, true, cx);

        cx.update(|_window, cx| {
            host.update(cx, |host, cx| {
                host.modal = None;
                cx.notify();
            })
        });
        cx.run_until_parked();

        let trigger_focused = cx.update(|window, cx| host.read(cx).trigger.is_focused(window));
        assert!(trigger_focused);
        assert_eq!(cx.read(|cx| cx.global::<ScrollLock>().depth()), 0);
    }

    #[gpui::test]
    fn test_overlay_takes_keys_without_targets(cx: &mut TestAppContext) {
        let (host, cx) = open_window(cx, Host::new);
        let modal = modal(&host, cx);
        cx.update(|_window, cx| {
            modal.update(cx, |modal, _cx| {
                modal.set_options(ModalOptions {
                    show_close_button: false,
                    ..ModalOptions::default()
                });
                modal.set_focus_targets(Vec::new());
            })
        });
        set_open(&host, true, cx);

        let overlay_focused =
            cx.update(|window, cx| modal.read(cx).overlay_handle.is_focused(window));
        assert!(overlay_focused);

        cx.simulate_keystrokes("tab");
        let overlay_focused =
            cx.update(|window, cx| modal.read(cx).overlay_handle.is_focused(window));
        assert!(overlay_focused);

        cx.simulate_keystrokes("escape");
        assert_eq!(close_requests(&host, cx), 1);
    }
}
