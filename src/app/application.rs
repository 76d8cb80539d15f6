//! Application - App Initialization and Window Management

use gpui::{
    actions, px, AnyView, App, AppContext, Application, Bounds, KeyBinding,
    TitlebarOptions, WindowBounds, WindowOptions,
};
use gpui_component::Root;

use crate::app::gallery::Gallery;
use crate::config::WidgetsConfig;
use crate::constants::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};
use crate::i18n::t;

actions!(dfc_widgets, [Quit]);

/// Run the gallery application with the given widget defaults
pub fn run_app(config: WidgetsConfig) {
    Application::new()
        .with_assets(gpui_component_assets::Assets)
        .run(move |cx: &mut App| {
            gpui_component::init(cx);
            crate::init(cx);

            cx.on_action(|_: &Quit, cx: &mut App| cx.quit());
            cx.bind_keys([KeyBinding::new("cmd-q", Quit, None)]);

            // Quit the app when all windows are closed (macOS behavior)
            cx.on_window_closed(|cx| {
                if cx.windows().is_empty() {
                    cx.quit();
                }
            })
            .detach();

            let title = t(config.locale, "gallery-title");
            cx.set_global(config);

            let bounds = Bounds::centered(
                None,
                gpui::size(px(DEFAULT_WINDOW_WIDTH), px(DEFAULT_WINDOW_HEIGHT)),
                cx,
            );
            let window_options = WindowOptions {
                window_bounds: Some(WindowBounds::Windowed(bounds)),
                titlebar: Some(TitlebarOptions {
                    title: Some(title),
                    appears_transparent: false,
                    traffic_light_position: None,
                }),
                ..Default::default()
            };

            let opened = cx.open_window(window_options, |window, cx| {
                let gallery = cx.new(|cx| Gallery::new(window, cx));
                cx.new(|cx| Root::new(AnyView::from(gallery), window, cx))
            });
            if let Err(e) = opened {
                tracing::error!(error = %e, "failed to open gallery window");
                cx.quit();
                return;
            }

            cx.activate(true);
        });
}
