//! Rating badge classification.
//!
//! The agent rates rounds with free text ("Great", "Okay", "Weird", ...).
//! The badge colour comes from a case-insensitive substring match where the
//! first hit wins: "great", then "okay", else the informational default.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadgeTone {
    Positive,
    Neutral,
    #[default]
    Info,
}

impl BadgeTone {
    pub fn classify(rating: &str) -> Self {
        let lowered = rating.to_lowercase();
        if lowered.contains("great") {
            BadgeTone::Positive
        } else if lowered.contains("okay") {
            BadgeTone::Neutral
        } else {
            BadgeTone::Info
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BadgeTone::Positive => "positive",
            BadgeTone::Neutral => "neutral",
            BadgeTone::Info => "info",
        }
    }

    /// Utility classes for the host page's theme (green / yellow / blue).
    pub fn css_class(self) -> &'static str {
        match self {
            BadgeTone::Positive => "bg-green-500/20 text-green-700 dark:text-green-300",
            BadgeTone::Neutral => "bg-yellow-500/20 text-yellow-700 dark:text-yellow-300",
            BadgeTone::Info => "bg-blue-500/20 text-blue-700 dark:text-blue-300",
        }
    }

    pub fn all() -> &'static [BadgeTone] {
        &[BadgeTone::Positive, BadgeTone::Neutral, BadgeTone::Info]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_case_insensitively() {
        assert_eq!(BadgeTone::classify("Great job!"), BadgeTone::Positive);
        assert_eq!(BadgeTone::classify("It was OKAY"), BadgeTone::Neutral);
        assert_eq!(BadgeTone::classify("Needs work"), BadgeTone::Info);
        assert_eq!(BadgeTone::classify(""), BadgeTone::Info);
    }

    #[test]
    fn great_wins_over_okay() {
        assert_eq!(BadgeTone::classify("okay, actually great"), BadgeTone::Positive);
        assert_eq!(BadgeTone::classify("Not great"), BadgeTone::Positive);
    }

    #[test]
    fn substring_not_word_match() {
        assert_eq!(BadgeTone::classify("GREATEST"), BadgeTone::Positive);
        assert_eq!(BadgeTone::classify("okayish"), BadgeTone::Neutral);
        assert_eq!(BadgeTone::classify("ok"), BadgeTone::Info);
    }

    #[test]
    fn tone_inventory_is_stable() {
        let all = BadgeTone::all();
        assert_eq!(all.len(), 3);
        let mut classes: Vec<&str> = all.iter().map(|t| t.css_class()).collect();
        classes.sort_unstable();
        classes.dedup();
        assert_eq!(classes.len(), 3);
        for t in all {
            assert!(!t.label().is_empty());
        }
    }
}
