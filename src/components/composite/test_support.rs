//! Window harness shared by the view tests

use gpui::{AnyView, AppContext, Context, Entity, Render, TestAppContext, VisualTestContext, Window};
use gpui_component::Root;

/// Open a window whose root view is `build`, wrapped in a component `Root`
pub(crate) fn open_window<V: Render>(
    cx: &mut TestAppContext,
    build: impl FnOnce(&mut Window, &mut Context<V>) -> V + 'static,
) -> (Entity<V>, &mut VisualTestContext) {
    cx.update(|cx| {
        gpui_component::init(cx);
        crate::init(cx);
    });

    let (root, cx) = cx.add_window_view(|window, cx| {
        let view = cx.new(|cx| build(window, cx));
        Root::new(AnyView::from(view), window, cx)
    });

    let Ok(view) = cx.read(|cx| root.read(cx).view().clone().downcast::<V>()) else {
        panic!("root view has an unexpected type");
    };
    cx.run_until_parked();
    (view, cx)
}
