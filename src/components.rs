//! Yew view components for the countdown UI.
//!
//! Everything here renders from props; the only local state is the flip
//! animation each digit slot owns.

use crate::hooks::use_fit_title;
use chrono::Local;
use flip_countdown::config::{FLIP_MIDPOINT_MS, FLIP_MS};
use flip_countdown::digit::{DigitAction, DigitAnimator};
use flip_countdown::theme::Theme;
use flip_countdown::{field_digits, format_clock};
use gloo_timers::callback::Timeout;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FlipDigitProps {
    pub digit: char,
}

/// One flip-card digit.
///
/// A change of `digit` starts a flip; the slot arms a midpoint and a
/// completion timer for that flip's epoch. A newer flip drops the older
/// timers before arming its own.
#[function_component(FlipDigit)]
pub fn flip_digit(props: &FlipDigitProps) -> Html {
    let animator = use_reducer(|| DigitAnimator::new(props.digit));

    {
        let dispatcher = animator.dispatcher();
        use_effect_with(props.digit, move |&digit| {
            dispatcher.dispatch(DigitAction::Retarget(digit));
            || ()
        });
    }

    {
        let dispatcher = animator.dispatcher();
        let armed = (animator.epoch(), animator.is_flipping());
        use_effect_with(armed, move |&(epoch, flipping)| {
            let timers = flipping.then(|| {
                let midpoint = {
                    let dispatcher = dispatcher.clone();
                    Timeout::new(FLIP_MIDPOINT_MS, move || {
                        dispatcher.dispatch(DigitAction::Midpoint { epoch })
                    })
                };
                let settle = Timeout::new(FLIP_MS, move || {
                    dispatcher.dispatch(DigitAction::Settle { epoch })
                });
                (midpoint, settle)
            });
            move || drop(timers)
        });
    }

    let faces = animator.faces();
    let epoch = animator.epoch();

    html! {
        <div class="flip-digit">
            <div class="digit-top"><span>{ faces.top.to_string() }</span></div>
            <div class="digit-bottom"><span>{ faces.bottom.to_string() }</span></div>
            <>
                // Keyed by epoch so a restarted flip remounts and replays its animation.
                { for faces.flipper.map(|(old, new)| html! {
                    <div key={epoch.to_string()} class="flipper flipping">
                        <div class="flipper-top"><span>{ old.to_string() }</span></div>
                        <div class="flipper-bottom"><span>{ new.to_string() }</span></div>
                    </div>
                }) }
            </>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct CountdownCardProps {
    pub value: u64,
    pub label: AttrValue,
}

/// A labelled card showing one field as flip digits.
#[function_component(CountdownCard)]
pub fn countdown_card(props: &CountdownCardProps) -> Html {
    let digits = field_digits(props.value);
    let width = digits.len();

    html! {
        <div class="countdown-card">
            <div class="digits">
                // Keys count from the units place so slots keep their state
                // when the field gains or loses a digit.
                { for digits.into_iter().enumerate().map(|(i, digit)| html! {
                    <FlipDigit key={(width - 1 - i).to_string()} {digit} />
                }) }
            </div>
            <span class="card-label">{ props.label.clone() }</span>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub event_name: AttrValue,
    pub progress: f64,
    #[prop_or_default]
    pub is_over: bool,
    #[prop_or(true)]
    pub show_progress: bool,
}

/// Event title scaled to fit, with the elapsed-progress bar underneath.
#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let container_ref = use_node_ref();
    let title_ref = use_node_ref();
    use_fit_title(
        container_ref.clone(),
        title_ref.clone(),
        props.event_name.clone(),
    );

    html! {
        <header class="header">
            <div ref={container_ref} class="panel title-panel">
                <h1 ref={title_ref} class="title">{ props.event_name.clone() }</h1>
            </div>
            if props.show_progress && !props.is_over {
                <ProgressBar percent={props.progress} />
            }
        </header>
    }
}

#[derive(Properties, PartialEq)]
pub struct ProgressBarProps {
    pub percent: f64,
}

#[function_component(ProgressBar)]
pub fn progress_bar(props: &ProgressBarProps) -> Html {
    let percent = props.percent.clamp(0.0, 100.0);
    html! {
        <div class="progress"
            role="progressbar"
            aria-valuemin="0"
            aria-valuemax="100"
            aria-valuenow={format!("{:.0}", percent)}>
            <div class="progress-fill" style={format!("width: {:.2}%", percent)}></div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct CurrentTimeProps {
    pub now_ms: i64,
}

/// Live local clock line.
#[function_component(CurrentTime)]
pub fn current_time(props: &CurrentTimeProps) -> Html {
    html! {
        <p class="current-time">
            <span class="current-time-label">{ "Current time: " }</span>
            { format_clock(props.now_ms, &Local) }
        </p>
    }
}

#[derive(Properties, PartialEq)]
pub struct BackgroundSelectorProps {
    pub selected: Theme,
    pub on_change: Callback<Theme>,
}

/// Swatch row for picking the background theme.
#[function_component(BackgroundSelector)]
pub fn background_selector(props: &BackgroundSelectorProps) -> Html {
    html! {
        <div class="background-selector">
            <p class="selector-label">{ "Background theme" }</p>
            <div class="swatches">
                { for Theme::ALL.into_iter().map(|theme| {
                    let onclick = props.on_change.reform(move |_: MouseEvent| theme);
                    let class = classes!(
                        "swatch",
                        theme.css_class(),
                        (theme == props.selected).then_some("selected")
                    );
                    html! {
                        <button
                            type="button"
                            key={theme.key()}
                            {class}
                            {onclick}
                            title={theme.display_name()}
                            aria-label={format!("Use the {} theme", theme.display_name())}
                            aria-pressed={(theme == props.selected).to_string()}
                        />
                    }
                }) }
            </div>
        </div>
    }
}
