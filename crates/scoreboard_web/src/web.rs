use improv_scoreboard::config::ScoreboardConfig;
use improv_scoreboard::view::{classes, PanelView, RoundCard};
use improv_scoreboard::widget::Scoreboard as ScoreboardWidget;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

mod console;

use crate::bridge;

pub fn start() {
    console::init_tracing();
    mount_to_body(|| view! { <ScoreboardOverlay /> });
}

/// Called by the host page for every data-channel message it receives.
#[wasm_bindgen(js_name = deliverDataMessage)]
pub fn deliver_data_message(topic: String, payload: Option<js_sys::Uint8Array>) -> u32 {
    bridge::deliver(&topic, payload.map(|p| p.to_vec())) as u32
}

#[component]
pub fn ScoreboardOverlay(#[prop(optional)] config: Option<ScoreboardConfig>) -> impl IntoView {
    let config = config.unwrap_or_default();
    let (panel, set_panel) = signal::<Option<PanelView>>(None);

    let widget = ScoreboardWidget::mount(&bridge::page_bus(), config, move |p| set_panel.set(p));
    let widget = StoredValue::new_local(Some(widget));

    on_cleanup(move || {
        widget.update_value(|w| {
            if let Some(w) = w.take() {
                w.unmount();
            }
        });
    });

    move || panel.get().map(|panel| view! { <Panel panel=panel /> })
}

#[component]
fn Panel(panel: PanelView) -> impl IntoView {
    let PanelView {
        title,
        player,
        round_line,
        cards,
    } = panel;

    view! {
        <div class=classes::PANEL>
            <h2 class=classes::TITLE>{title}</h2>
            {player.map(|name| view! {
                <p class=classes::PLAYER>
                    "Player: "
                    <span class=classes::PLAYER_NAME>{name}</span>
                </p>
            })}
            <p class=classes::ROUND_LINE>{round_line}</p>
            <div class=classes::CARD_LIST>
                {cards.into_iter().map(|card| view! { <Card card=card /> }).collect_view()}
            </div>
        </div>
    }
}

#[component]
fn Card(card: RoundCard) -> impl IntoView {
    let badge_class = card.badge.class();

    view! {
        <div class=classes::CARD>
            <div class=classes::CARD_HEADER>
                <span class=classes::CARD_LABEL>{card.label}</span>
                <span class=badge_class>{card.badge.text}</span>
            </div>
            <p class=classes::SCENARIO>{card.scenario}</p>
            <p class=classes::CRITIQUE>{card.critique}</p>
        </div>
    }
}
