//! Gallery - Widget Showcase
//!
//! One window with a controlled dropdown, an uncontrolled dropdown that
//! opens upward, and a modal hosting a searchable dropdown.

use gpui::{
    div, prelude::*, px, App, ClickEvent, Context, Entity, FocusHandle, Focusable, IntoElement,
    ParentElement, Render, SharedString, Styled, Subscription, Window,
};

use crate::components::composite::dropdown::{Dropdown, DropdownEvent, DropdownOption};
use crate::components::composite::modal::{Modal, ModalEvent, ModalSize};
use crate::config::WidgetsConfig;
use crate::i18n::{t, Locale};
use crate::theme::colors::WidgetColors;
use crate::theme::typography::Typography;

fn fruits() -> Vec<DropdownOption> {
    vec![
        DropdownOption::new("apple", "Apple").icon("🍎"),
        DropdownOption::new("banana", "Banana").description("Rich in potassium"),
        DropdownOption::new("cherry", "Cherry").disabled(true),
        DropdownOption::new("grape", "Grape"),
        DropdownOption::new("kiwi", "Kiwi"),
    ]
}

fn cities() -> Vec<DropdownOption> {
    [
        ("ams", "Amsterdam"),
        ("ber", "Berlin"),
        ("lis", "Lisbon"),
        ("osl", "Oslo"),
        ("par", "Paris"),
        ("sha", "Shanghai"),
        ("tok", "Tokyo"),
    ]
    .into_iter()
    .map(|(value, label)| DropdownOption::new(value, label))
    .collect()
}

/// Gallery root view
pub struct Gallery {
    locale: Locale,
    fruit: Entity<Dropdown>,
    fruit_value: Option<String>,
    size: Entity<Dropdown>,
    city_value: Option<String>,
    modal: Entity<Modal>,
    trigger_focus: FocusHandle,
    _subscriptions: Vec<Subscription>,
}

impl Gallery {
    pub fn new(window: &mut Window, cx: &mut Context<Self>) -> Self {
        let locale = cx
            .try_global::<WidgetsConfig>()
            .map(|config| config.locale)
            .unwrap_or_default();

        let fruit = cx.new(|cx| {
            let mut dropdown = Dropdown::new("fruit", fruits(), window, cx);
            dropdown.set_label(t(locale, "gallery-fruit"), true);
            dropdown.set_helper_text(t(locale, "gallery-fruit-help"));
            dropdown
        });

        let size = cx.new(|cx| {
            let options = ["xs", "s", "m", "l", "xl"]
                .into_iter()
                .map(|value| DropdownOption::new(value, value.to_uppercase()))
                .collect();
            let mut dropdown = Dropdown::new("shirt-size", options, window, cx);
            dropdown.set_initial_value("m");
            dropdown.set_drop_up(true);
            dropdown.set_width(px(160.0));
            dropdown.on_change(|value, _window, _cx| {
                tracing::info!(%value, "shirt size changed");
            });
            dropdown
        });

        let city = cx.new(|cx| {
            let mut dropdown = Dropdown::new("city", cities(), window, cx);
            dropdown.set_searchable(true);
            dropdown.set_label(t(locale, "gallery-city"), false);
            dropdown
        });

        let modal = cx.new(|cx| {
            let mut modal = Modal::new(Some("city-modal"), window, cx);
            modal.set_title(t(locale, "gallery-modal-title"));
            modal.set_size(ModalSize::Small);

            let content = city.clone();
            modal.set_content(move |_window, _cx| content.clone().into_any_element());
            modal.set_footer(move |closer, _window, _cx| {
                let cancel = closer.clone();
                div()
                    .flex()
                    .gap_2()
                    .child(gallery_button("modal-cancel", t(locale, "gallery-cancel")).on_click(
                        move |_: &ClickEvent, _window, cx| cancel.close(cx),
                    ))
                    .child(gallery_button("modal-confirm", t(locale, "gallery-confirm")).on_click(
                        move |_: &ClickEvent, _window, cx| closer.close(cx),
                    ))
                    .into_any_element()
            });

            let city_focus = city.read(cx).focus_handle(cx);
            modal.set_focus_targets(vec![city_focus]);
            modal
        });

        let subscriptions = vec![
            // The fruit dropdown is controlled: its value only changes here.
            cx.subscribe(&fruit, |this, fruit, event: &DropdownEvent, cx| {
                let DropdownEvent::Change(value) = event;
                this.fruit_value = Some(value.clone());
                fruit.update(cx, |dropdown, cx| dropdown.set_value(Some(value.clone()), cx));
                cx.notify();
            }),
            cx.subscribe(&city, |this, _, event: &DropdownEvent, cx| {
                let DropdownEvent::Change(value) = event;
                this.city_value = Some(value.clone());
                cx.notify();
            }),
            cx.subscribe_in(&modal, window, |_, modal, event: &ModalEvent, window, cx| {
                match event {
                    ModalEvent::CloseRequested => {
                        modal.update(cx, |modal, cx| modal.set_open(false, window, cx));
                    }
                }
            }),
        ];

        Self {
            locale,
            fruit,
            fruit_value: None,
            size,
            city_value: None,
            modal,
            trigger_focus: cx.focus_handle(),
            _subscriptions: subscriptions,
        }
    }

    fn open_modal(&mut self, _: &ClickEvent, window: &mut Window, cx: &mut Context<Self>) {
        window.focus(&self.trigger_focus);
        self.modal
            .update(cx, |modal, cx| modal.set_open(true, window, cx));
    }

    fn render_selection(&self, value: Option<&String>) -> impl IntoElement {
        let text: SharedString = match value {
            Some(value) => format!("{}: {value}", t(self.locale, "gallery-selected")).into(),
            None => t(self.locale, "gallery-none"),
        };
        div()
            .text_size(px(Typography::TEXT_SM))
            .text_color(WidgetColors::text_secondary())
            .child(text)
    }
}

fn gallery_button(id: &'static str, label: SharedString) -> gpui::Stateful<gpui::Div> {
    div()
        .id(id)
        .px_4()
        .py_2()
        .rounded_md()
        .border_1()
        .border_color(WidgetColors::border())
        .bg(WidgetColors::surface())
        .text_color(WidgetColors::text_primary())
        .cursor_pointer()
        .hover(|s| s.bg(WidgetColors::option_hover()))
        .child(label)
}

impl Render for Gallery {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        div()
            .relative()
            .size_full()
            .bg(WidgetColors::surface())
            .text_size(px(Typography::TEXT_BASE))
            .child(
                div()
                    .flex()
                    .flex_col()
                    .gap_6()
                    .p_8()
                    .max_w(px(420.0))
                    .child(
                        div()
                            .text_size(px(Typography::TEXT_XL))
                            .text_color(WidgetColors::text_primary())
                            .child(t(self.locale, "gallery-title")),
                    )
                    .child(
                        div()
                            .flex()
                            .flex_col()
                            .gap_2()
                            .child(self.fruit.clone())
                            .child(self.render_selection(self.fruit_value.as_ref())),
                    )
                    .child(
                        div()
                            .flex()
                            .flex_col()
                            .gap_2()
                            .child(
                                gallery_button("open-modal", t(self.locale, "gallery-open-modal"))
                                    .track_focus(&self.trigger_focus)
                                    .on_click(cx.listener(Self::open_modal)),
                            )
                            .child(self.render_selection(self.city_value.as_ref())),
                    )
                    .child(div().mt_8().child(self.size.clone())),
            )
            .child(self.modal.clone())
    }
}

impl Focusable for Gallery {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.trigger_focus.clone()
    }
}
