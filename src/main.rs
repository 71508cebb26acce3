//! Main module for the flip countdown application using Yew.
//! Wires UI components, state hooks, and timer side effects.

use chrono::Local;
use flip_countdown::{
    config::{QUICK_ADD_MINUTES, TICK_MS},
    form::{validate_event_name, FormError, FormStep, TimeUnit},
    now_ms,
    session::{Countdown, CountdownAction},
    theme::{load_theme, save_theme, BrowserThemeStore, Theme},
};
use log::warn;
use web_sys::HtmlInputElement;
use yew::prelude::*;

mod components;
mod hooks;

use components::{BackgroundSelector, CountdownCard, CurrentTime, Header};
use hooks::{use_clock, use_interval};

// ──────────────────────────────────────────────────────────────────────────────
// Helper functions

/// Show a blocking notice for a rejected form input.
fn notify(err: &FormError) {
    warn!("rejected input: {}", err);
    if let Err(js_err) = gloo_utils::window().alert_with_message(&err.to_string()) {
        warn!("could not show notice: {:?}", js_err);
    }
}

/// Label for a quick-add button.
fn quick_add_label(minutes: i64) -> String {
    if minutes % 60 == 0 {
        format!("+{}h", minutes / 60)
    } else {
        format!("+{}m", minutes)
    }
}

// ──────────────────────────────────────────────────────────────────────────────

/// Primary application component owning the countdown and wiring the UI.
#[function_component(Main)]
fn main_component() -> Html {
    let countdown = use_reducer(Countdown::default);
    let theme = use_state(|| load_theme(&BrowserThemeStore));
    let now = use_clock();

    // Countdown tick, armed only while a session is running.
    {
        let dispatcher = countdown.dispatcher();
        use_interval(
            TICK_MS,
            countdown.is_ticking(),
            Callback::from(move |_| {
                dispatcher.dispatch(CountdownAction::Tick { now_ms: now_ms() })
            }),
        );
    }

    // --- Form handlers ---
    let name_oninput = {
        let dispatcher = countdown.dispatcher();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            dispatcher.dispatch(CountdownAction::SetEventName(input.value()));
        })
    };
    let name_next = {
        let countdown = countdown.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            match validate_event_name(&countdown.form.event_name) {
                Ok(_) => countdown.dispatch(CountdownAction::Advance),
                Err(err) => notify(&err),
            }
        })
    };
    let target_oninput = {
        let dispatcher = countdown.dispatcher();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            dispatcher.dispatch(CountdownAction::SetTargetInput(input.value()));
        })
    };
    let back = {
        let dispatcher = countdown.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(CountdownAction::Back))
    };
    let clear_target = {
        let dispatcher = countdown.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(CountdownAction::ClearTarget))
    };
    let submit = {
        let countdown = countdown.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let now = now_ms();
            match countdown.form.resolve(now, &Local) {
                Ok(_) => countdown.dispatch(CountdownAction::Submit { now_ms: now }),
                Err(err) => notify(&err),
            }
        })
    };

    // --- Session handlers ---
    let toggle_pause = {
        let dispatcher = countdown.dispatcher();
        Callback::from(move |_: MouseEvent| {
            dispatcher.dispatch(CountdownAction::TogglePause { now_ms: now_ms() })
        })
    };
    let reset = {
        let dispatcher = countdown.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(CountdownAction::Reset))
    };

    let on_theme_change = {
        let theme = theme.clone();
        Callback::from(move |next: Theme| {
            theme.set(next);
            if let Err(err) = save_theme(&BrowserThemeStore, next) {
                warn!("theme not saved: {}", err);
            }
        })
    };

    let has_target = !countdown.form.target_input.is_empty();
    let is_over = countdown.is_over();
    let time_left = countdown.snapshot.time_left;

    html! {
        <div class={classes!("app", theme.css_class())}>
            <main class="content">
                if let Some(session) = &countdown.session {
                    <Header
                        event_name={AttrValue::from(session.event_name().to_string())}
                        progress={countdown.snapshot.progress}
                        {is_over}
                    />
                    <CurrentTime now_ms={now} />
                    <div class="panel status">
                        if is_over {
                            <p class="status-over">{ "The event has started!" }</p>
                        } else {
                            <p class="status-running">{ "Time remaining" }</p>
                        }
                    </div>
                } else {
                    <div class="intro">
                        if countdown.form.step == FormStep::Name {
                            <div class="panel title-panel">
                                <h1 class="title app-title">{ "Event Countdown" }</h1>
                            </div>
                        } else {
                            <Header
                                event_name={AttrValue::from(countdown.form.event_name.clone())}
                                progress={0.0}
                                show_progress={false}
                            />
                        }
                        <CurrentTime now_ms={now} />
                    </div>
                }

                if countdown.session.is_none() {
                    <form class="panel setup-form" onsubmit={submit}>
                        if countdown.form.step == FormStep::Name {
                            <h2>{ "Event name" }</h2>
                            <input
                                id="event-name"
                                type="text"
                                placeholder="e.g. New Year"
                                value={countdown.form.event_name.clone()}
                                oninput={name_oninput}
                                required={true}
                            />
                            <button type="button" class="btn-primary" onclick={name_next}>
                                { "Next" }
                            </button>
                        } else {
                            <h2>{ "Date and time" }</h2>
                            <label for="target-date">{ "Event date and time" }</label>
                            <input
                                id="target-date"
                                type="datetime-local"
                                step="1"
                                value={countdown.form.target_input.clone()}
                                oninput={target_oninput}
                                required={true}
                            />

                            <div class="form-group">
                                <label>{ "Add time" }</label>
                                <div class="quick-add">
                                    { for QUICK_ADD_MINUTES.into_iter().map(|minutes| {
                                        let dispatcher = countdown.dispatcher();
                                        let onclick = Callback::from(move |_: MouseEvent| {
                                            dispatcher.dispatch(CountdownAction::AddMinutes {
                                                minutes,
                                                now_ms: now_ms(),
                                            })
                                        });
                                        html! {
                                            <button type="button" class="btn-secondary" {onclick}>
                                                { quick_add_label(minutes) }
                                            </button>
                                        }
                                    }) }
                                </div>
                            </div>

                            <div class="form-group">
                                <label>{ "Fine adjust" }</label>
                                <div class="fine-adjust">
                                    { for TimeUnit::ALL.into_iter().map(|unit| {
                                        let step = |amount: i64| {
                                            let dispatcher = countdown.dispatcher();
                                            Callback::from(move |_: MouseEvent| {
                                                dispatcher.dispatch(CountdownAction::Adjust { unit, amount })
                                            })
                                        };
                                        html! {
                                            <div class="adjust-unit">
                                                <span class="adjust-label">{ unit.label() }</span>
                                                <div class="adjust-buttons">
                                                    <button type="button"
                                                        disabled={!has_target}
                                                        aria-label={format!("{} down", unit.label())}
                                                        onclick={step(-1)}>{ "-" }</button>
                                                    <button type="button"
                                                        disabled={!has_target}
                                                        aria-label={format!("{} up", unit.label())}
                                                        onclick={step(1)}>{ "+" }</button>
                                                </div>
                                            </div>
                                        }
                                    }) }
                                </div>
                            </div>

                            <div class="form-actions">
                                <button type="button" class="btn-secondary" onclick={back}>
                                    { "Back" }
                                </button>
                                <button type="submit" class="btn-primary">{ "Start" }</button>
                                <button type="button"
                                    class="btn-secondary"
                                    aria-label="Clear date and time"
                                    onclick={clear_target}>
                                    { "Clear" }
                                </button>
                            </div>
                        }
                    </form>
                } else {
                    <div class={classes!("cards", if time_left.days > 0 { "cards-4" } else { "cards-3" })}>
                        if time_left.days > 0 {
                            <CountdownCard value={time_left.days} label="Days" />
                        }
                        <CountdownCard value={time_left.hours} label="Hours" />
                        <CountdownCard value={time_left.minutes} label="Minutes" />
                        <CountdownCard value={time_left.seconds} label="Seconds" />
                    </div>
                    <div class="session-actions">
                        <button class="btn-pause" disabled={is_over} onclick={toggle_pause}>
                            { if countdown.is_paused() { "Resume" } else { "Pause" } }
                        </button>
                        <button class="btn-secondary" onclick={reset}>
                            { if is_over { "New countdown" } else { "Reset" } }
                        </button>
                    </div>
                }
            </main>
            <footer class="footer">
                if countdown.session.is_none() {
                    <BackgroundSelector selected={*theme} on_change={on_theme_change} />
                }
                <p class="credit">{ "Countdown built with Rust and Yew" }</p>
            </footer>
        </div>
    }
}

#[function_component]
pub fn App() -> Html {
    html! { <Main /> }
}

/// Entry point: installs the panic hook and mounts the app.
fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quick_add_labels() {
        assert_eq!(quick_add_label(60), "+1h");
        assert_eq!(quick_add_label(30), "+30m");
        assert_eq!(quick_add_label(5), "+5m");
    }
}
