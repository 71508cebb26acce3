use flip_countdown::config::{TICK_MS, TITLE_REFERENCE_PX};
use flip_countdown::{fit_title_px, now_ms};
use gloo_timers::callback::Interval;
use log::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;
use yew::prelude::*;

/// Run `on_tick` every `period_ms` while `active` is true.
///
/// The interval handle lives in the effect's destructor, so it is cancelled
/// whenever `active` or the period changes and when the component unmounts.
#[hook]
pub fn use_interval(period_ms: u32, active: bool, on_tick: Callback<()>) {
    // Latest callback, so the running interval never calls a stale one.
    let on_tick_ref = use_mut_ref(|| on_tick.clone());
    *on_tick_ref.borrow_mut() = on_tick;

    use_effect_with((period_ms, active), move |&(period_ms, active)| {
        let interval = active.then(|| {
            let on_tick_ref = on_tick_ref.clone();
            Interval::new(period_ms, move || on_tick_ref.borrow().emit(()))
        });
        move || drop(interval)
    });
}

/// Wall-clock time in epoch milliseconds, refreshed once per tick.
#[hook]
pub fn use_clock() -> i64 {
    let now = use_state(now_ms);
    let on_tick = {
        let now = now.clone();
        Callback::from(move |_| now.set(now_ms()))
    };
    use_interval(TICK_MS, true, on_tick);
    *now
}

/// Keep the title inside `container_ref` sized to fit on one line.
///
/// Refits when `text` changes and on every window resize.
#[hook]
pub fn use_fit_title(container_ref: NodeRef, title_ref: NodeRef, text: AttrValue) {
    use_effect_with(text, move |_| {
        let fit = move || fit_title(&container_ref, &title_ref);
        fit();

        let window = gloo_utils::window();
        let listener = Closure::<dyn Fn()>::new(fit);
        if let Err(err) =
            window.add_event_listener_with_callback("resize", listener.as_ref().unchecked_ref())
        {
            warn!("could not watch window resize: {:?}", err);
        }

        move || {
            let _ = window
                .remove_event_listener_with_callback("resize", listener.as_ref().unchecked_ref());
            drop(listener);
        }
    });
}

fn fit_title(container_ref: &NodeRef, title_ref: &NodeRef) {
    let (Some(container), Some(title)) = (container_ref.cast::<Element>(), title_ref.cast::<Element>())
    else {
        return;
    };

    // Measure at the reference size, then scale down to the container.
    if let Err(err) = set_font_size(&title, TITLE_REFERENCE_PX) {
        warn!("could not size title: {:?}", err);
        return;
    }
    let natural = title.scroll_width() as f64;
    let available = container.client_width() as f64;
    if let Some(px) = fit_title_px(available, natural) {
        if let Err(err) = set_font_size(&title, px) {
            warn!("could not size title: {:?}", err);
        }
    }
}

fn set_font_size(element: &Element, px: f64) -> Result<(), JsValue> {
    element.set_attribute("style", &format!("font-size: {:.2}px", px))
}
