//! Render model for the overlay panel, plus static HTML and terminal renderers.
//!
//! `PanelView` is what every front end draws: the Leptos component, the HTML
//! renderer and the terminal viewer all consume it.

use crate::badge::BadgeTone;
use crate::snapshot::ScoreboardSnapshot;

pub const DEFAULT_TITLE: &str = "Improv Battle";

/// Utility classes shared by the HTML renderer and the browser component.
pub mod classes {
    pub const PANEL: &str =
        "fixed top-4 right-4 w-80 rounded-lg border border-border bg-background/95 p-4 shadow-lg backdrop-blur";
    pub const TITLE: &str = "mb-3 text-lg font-bold";
    pub const PLAYER: &str = "mb-2 text-sm text-muted-foreground";
    pub const PLAYER_NAME: &str = "font-medium text-foreground";
    pub const ROUND_LINE: &str = "mb-4 text-sm text-muted-foreground";
    pub const CARD_LIST: &str = "space-y-3";
    pub const CARD: &str = "rounded-md border border-border/50 bg-muted/30 p-3";
    pub const CARD_HEADER: &str = "mb-1 flex items-center justify-between";
    pub const CARD_LABEL: &str = "text-xs font-semibold";
    pub const BADGE: &str = "rounded-full px-2 py-0.5 text-xs font-medium";
    pub const SCENARIO: &str = "mb-1 text-xs text-muted-foreground line-clamp-2";
    pub const CRITIQUE: &str = "text-xs italic text-foreground/80 line-clamp-2";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub text: String,
    pub tone: BadgeTone,
}

impl Badge {
    /// Full class list: shape plus tone colours.
    pub fn class(&self) -> String {
        format!("{} {}", classes::BADGE, self.tone.css_class())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundCard {
    /// "Round <n>".
    pub label: String,
    pub badge: Badge,
    pub scenario: String,
    /// Critique wrapped in double quotes.
    pub critique: String,
}

impl RoundCard {
    fn from_round(round: &crate::snapshot::RoundResult) -> Self {
        Self {
            label: format!("Round {}", round.round),
            badge: Badge {
                text: round.rating.clone(),
                tone: BadgeTone::classify(&round.rating),
            },
            scenario: round.scenario.clone(),
            critique: format!("\"{}\"", round.critique),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub title: String,
    pub player: Option<String>,
    /// "Round: <current> / <max>".
    pub round_line: String,
    pub cards: Vec<RoundCard>,
}

impl PanelView {
    /// Build the panel for `snapshot`; `None` while there are no rounds to show.
    pub fn from_snapshot(snapshot: &ScoreboardSnapshot, title: &str) -> Option<Self> {
        if !snapshot.has_rounds() {
            return None;
        }

        Some(Self {
            title: title.to_string(),
            player: snapshot.display_player_name().map(str::to_string),
            round_line: format!(
                "Round: {} / {}",
                snapshot.current_round, snapshot.max_rounds
            ),
            cards: snapshot.rounds.iter().map(RoundCard::from_round).collect(),
        })
    }

    pub fn player_line(&self) -> Option<String> {
        self.player.as_ref().map(|name| format!("Player: {name}"))
    }
}

pub fn render_html(panel: &PanelView) -> String {
    let mut out = String::with_capacity(512 + panel.cards.len() * 384);

    out.push_str(&format!("<div class=\"{}\">", classes::PANEL));
    out.push_str(&format!(
        "<h2 class=\"{}\">{}</h2>",
        classes::TITLE,
        escape_html(&panel.title)
    ));

    if let Some(name) = &panel.player {
        out.push_str(&format!(
            "<p class=\"{}\">Player: <span class=\"{}\">{}</span></p>",
            classes::PLAYER,
            classes::PLAYER_NAME,
            escape_html(name)
        ));
    }

    out.push_str(&format!(
        "<p class=\"{}\">{}</p>",
        classes::ROUND_LINE,
        escape_html(&panel.round_line)
    ));

    out.push_str(&format!("<div class=\"{}\">", classes::CARD_LIST));
    for card in &panel.cards {
        out.push_str(&format!("<div class=\"{}\">", classes::CARD));
        out.push_str(&format!(
            "<div class=\"{}\"><span class=\"{}\">{}</span><span class=\"{}\">{}</span></div>",
            classes::CARD_HEADER,
            classes::CARD_LABEL,
            escape_html(&card.label),
            card.badge.class(),
            escape_html(&card.badge.text)
        ));
        out.push_str(&format!(
            "<p class=\"{}\">{}</p>",
            classes::SCENARIO,
            escape_html(&card.scenario)
        ));
        out.push_str(&format!(
            "<p class=\"{}\">{}</p>",
            classes::CRITIQUE,
            escape_html(&card.critique)
        ));
        out.push_str("</div>");
    }
    out.push_str("</div></div>");

    out
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const MIN_TEXT_WIDTH: usize = 16;

/// Boxed terminal rendering. Scenario and critique are clamped to `clamp_lines`.
///
/// Widths are counted in `char`s, not terminal columns. Double-width glyphs
/// (CJK, most emoji) and combining marks therefore push the right border out
/// of line; the box is exact for text where one char is one column.
pub fn render_text(panel: &PanelView, width: usize, clamp_lines: usize) -> String {
    let width = width.max(MIN_TEXT_WIDTH);
    let rule = "─".repeat(width + 2);
    let mut out = String::new();

    out.push_str(&format!("┌{rule}┐\n"));
    for line in wrap(&panel.title, width) {
        boxed_line(&mut out, &line, width);
    }
    if let Some(player) = panel.player_line() {
        for line in wrap(&player, width) {
            boxed_line(&mut out, &line, width);
        }
    }
    for line in wrap(&panel.round_line, width) {
        boxed_line(&mut out, &line, width);
    }

    for card in &panel.cards {
        out.push_str(&format!("├{rule}┤\n"));
        for line in card_header(card, width) {
            boxed_line(&mut out, &line, width);
        }
        for line in clamp_lines_to(&card.scenario, width, clamp_lines) {
            boxed_line(&mut out, &line, width);
        }
        for line in clamp_lines_to(&card.critique, width, clamp_lines) {
            boxed_line(&mut out, &line, width);
        }
    }
    out.push_str(&format!("└{rule}┘\n"));

    out
}

fn boxed_line(out: &mut String, line: &str, width: usize) {
    let pad = width.saturating_sub(line.chars().count());
    out.push_str("│ ");
    out.push_str(line);
    out.push_str(&" ".repeat(pad));
    out.push_str(" │\n");
}

fn card_header(card: &RoundCard, width: usize) -> Vec<String> {
    let badge = format!("[{}] {}", card.badge.text, card.badge.tone.label());
    let used = card.label.chars().count() + badge.chars().count();
    if used < width {
        let gap = width - used;
        vec![format!("{}{}{}", card.label, " ".repeat(gap), badge)]
    } else {
        wrap(&format!("{} {}", card.label, badge), width)
    }
}

/// Greedy word wrap on character counts; words wider than a line are split.
///
/// A `char` counts as one column whatever its display width, so a line of
/// wide glyphs renders up to twice as wide as `width`.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0usize;

    for word in text.split_whitespace() {
        let mut rest = word;
        loop {
            let word_len = rest.chars().count();
            let needed = if line_len == 0 {
                word_len
            } else {
                line_len + 1 + word_len
            };
            if needed <= width {
                if line_len > 0 {
                    line.push(' ');
                    line_len += 1;
                }
                line.push_str(rest);
                line_len += word_len;
                break;
            }
            if line_len > 0 {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
                continue;
            }
            let split = rest
                .char_indices()
                .nth(width)
                .map(|(i, _)| i)
                .unwrap_or(rest.len());
            lines.push(rest[..split].to_string());
            rest = &rest[split..];
            if rest.is_empty() {
                break;
            }
        }
    }
    if line_len > 0 {
        lines.push(line);
    }
    lines
}

/// Wrap `text` and keep at most `max_lines`; a cut is marked with `…`.
/// Widths are in `char`s, as for [`wrap`].
pub fn clamp_lines_to(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    if max_lines == 0 {
        return Vec::new();
    }
    let width = width.max(1);
    let mut lines = wrap(text, width);
    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let keep = width.saturating_sub(1);
            if let Some((cut, _)) = last.char_indices().nth(keep) {
                last.truncate(cut);
            }
            let trimmed = last.trim_end().len();
            last.truncate(trimmed);
            last.push('…');
        }
    }
    lines
}
