use std::cell::RefCell;
use std::rc::Rc;

use improv_scoreboard::prelude::*;

const TOASTER: &str = r#"{"currentRound":1,"maxRounds":3,"phase":"playing","rounds":[{"round":1,"scenario":"A talking toaster","critique":"Too quiet","rating":"Okay"}]}"#;

fn publish(bus: &LocalBus, payload: &[u8]) {
    bus.publish(&DataMessage::new(SCOREBOARD_TOPIC, payload.to_vec()));
}

fn mounted(bus: &LocalBus) -> (Scoreboard, Rc<RefCell<Vec<Option<PanelView>>>>) {
    let renders: Rc<RefCell<Vec<Option<PanelView>>>> = Rc::default();
    let sink = Rc::clone(&renders);
    let board = Scoreboard::mount(bus, ScoreboardConfig::default(), move |p| {
        sink.borrow_mut().push(p)
    });
    (board, renders)
}

#[test]
fn end_to_end_toaster_round() {
    let bus = LocalBus::new();
    let (board, _renders) = mounted(&bus);
    assert_eq!(board.panel(), None);

    publish(&bus, TOASTER.as_bytes());

    let panel = board.panel().expect("panel visible after first round");
    assert_eq!(panel.title, "Improv Battle");
    assert_eq!(panel.player, None);
    assert_eq!(panel.round_line, "Round: 1 / 3");
    assert_eq!(panel.cards.len(), 1);

    let card = &panel.cards[0];
    assert_eq!(card.label, "Round 1");
    assert_eq!(card.badge.text, "Okay");
    assert_eq!(card.badge.tone, BadgeTone::Neutral);
    assert_eq!(card.scenario, "A talking toaster");
    assert_eq!(card.critique, "\"Too quiet\"");

    let html = render_html(&panel);
    assert!(html.contains("Round: 1 / 3"));
    assert!(html.contains(BadgeTone::Neutral.css_class()));
    assert!(html.contains("&quot;Too quiet&quot;"));
}

#[test]
fn same_message_twice_renders_identically() {
    let bus = LocalBus::new();
    let (_board, renders) = mounted(&bus);

    publish(&bus, TOASTER.as_bytes());
    publish(&bus, TOASTER.as_bytes());

    let renders = renders.borrow();
    assert_eq!(renders.len(), 2);
    assert_eq!(renders[0], renders[1]);
}

#[test]
fn malformed_message_keeps_last_good_panel() {
    let bus = LocalBus::new();
    let (board, _renders) = mounted(&bus);

    publish(&bus, TOASTER.as_bytes());
    let good = board.panel();

    publish(&bus, b"{\"rounds\": [");
    publish(&bus, &[0xc3, 0x28]);
    bus.publish(&DataMessage::without_payload(SCOREBOARD_TOPIC));

    assert_eq!(board.panel(), good);
    board.with_model(|m| {
        assert_eq!(m.applied_count(), 1);
        assert_eq!(m.rejected_count(), 2);
    });
}

#[test]
fn malformed_before_any_good_state_stays_hidden() {
    let bus = LocalBus::new();
    let (board, renders) = mounted(&bus);
    publish(&bus, b"not json");
    assert_eq!(board.panel(), None);
    assert!(renders.borrow().is_empty());
}

#[test]
fn card_count_and_order_match_rounds() {
    let bus = LocalBus::new();
    let (board, _renders) = mounted(&bus);

    publish(
        &bus,
        br#"{"playerName":"Alex","currentRound":3,"maxRounds":3,"rounds":[
            {"round":1,"scenario":"s1","critique":"c1","rating":"Great job!"},
            {"round":2,"scenario":"s2","critique":"c2","rating":"It was OKAY"},
            {"round":3,"scenario":"s3","critique":"c3","rating":"Needs work"}
        ]}"#,
    );

    let panel = board.panel().unwrap();
    assert_eq!(panel.player_line().as_deref(), Some("Player: Alex"));
    let got: Vec<(&str, BadgeTone)> = panel
        .cards
        .iter()
        .map(|c| (c.scenario.as_str(), c.badge.tone))
        .collect();
    assert_eq!(
        got,
        [
            ("s1", BadgeTone::Positive),
            ("s2", BadgeTone::Neutral),
            ("s3", BadgeTone::Info),
        ]
    );
}

#[test]
fn emptied_rounds_hide_the_panel_again() {
    let bus = LocalBus::new();
    let (board, renders) = mounted(&bus);

    publish(&bus, TOASTER.as_bytes());
    publish(&bus, br#"{"currentRound":0,"maxRounds":3,"phase":"intro","rounds":[]}"#);

    assert_eq!(board.panel(), None);
    assert_eq!(renders.borrow().last(), Some(&None));
}

#[test]
fn round_missing_rating_gets_default_badge() {
    let bus = LocalBus::new();
    let (board, _renders) = mounted(&bus);
    publish(&bus, br#"{"rounds":[{"round":2,"scenario":null}]}"#);

    let panel = board.panel().unwrap();
    assert_eq!(panel.cards[0].badge.tone, BadgeTone::Info);
    assert_eq!(panel.cards[0].badge.text, "");
    assert_eq!(panel.cards[0].critique, "\"\"");
}

#[test]
fn unmount_stops_updates() {
    let bus = LocalBus::new();
    let (board, renders) = mounted(&bus);
    board.unmount();

    assert_eq!(bus.subscriber_count(), 0);
    publish(&bus, TOASTER.as_bytes());
    assert!(renders.borrow().is_empty());
}
