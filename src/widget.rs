//! The scoreboard widget.
//!
//! [`ScoreboardModel`] is the pure message → state step: it owns the held
//! snapshot and decides, per message, whether to replace it. [`Scoreboard`]
//! mounts a model on a [`DataChannel`] and keeps the subscription alive until
//! it is dropped.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::channel::{DataChannel, DataMessage, Subscription};
use crate::config::ScoreboardConfig;
use crate::snapshot::{decode_payload, PayloadError, ScoreboardSnapshot};
use crate::view::PanelView;

#[derive(Debug)]
pub enum MessageOutcome {
    /// No payload, or a topic this widget does not listen to.
    Ignored,
    Replaced,
    /// The held snapshot was kept.
    Rejected(PayloadError),
}

#[derive(Debug, Clone)]
pub struct ScoreboardModel {
    topic: String,
    title: String,
    snapshot: ScoreboardSnapshot,
    applied: u64,
    rejected: u64,
}

impl ScoreboardModel {
    pub fn new(config: &ScoreboardConfig) -> Self {
        Self {
            topic: config.topic.clone(),
            title: config.title.clone(),
            snapshot: ScoreboardSnapshot::default(),
            applied: 0,
            rejected: 0,
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn snapshot(&self) -> &ScoreboardSnapshot {
        &self.snapshot
    }

    pub fn applied_count(&self) -> u64 {
        self.applied
    }

    pub fn rejected_count(&self) -> u64 {
        self.rejected
    }

    pub fn panel(&self) -> Option<PanelView> {
        PanelView::from_snapshot(&self.snapshot, &self.title)
    }

    pub fn apply(&mut self, message: &DataMessage) -> MessageOutcome {
        if message.topic != self.topic {
            return MessageOutcome::Ignored;
        }
        let Some(payload) = message.payload.as_deref() else {
            return MessageOutcome::Ignored;
        };

        match decode_payload(payload) {
            Ok(snapshot) => {
                debug!(
                    rounds = snapshot.rounds.len(),
                    phase = %snapshot.phase,
                    "scoreboard snapshot replaced"
                );
                self.snapshot = snapshot;
                self.applied += 1;
                MessageOutcome::Replaced
            }
            Err(e) => {
                warn!(topic = %self.topic, "Failed to parse scoreboard data: {}", e);
                self.rejected += 1;
                MessageOutcome::Rejected(e)
            }
        }
    }
}

type ChangeListener = Box<dyn FnMut(Option<PanelView>)>;

struct Mounted {
    model: ScoreboardModel,
    on_change: ChangeListener,
}

/// A model mounted on a channel. Dropping it releases the subscription.
pub struct Scoreboard {
    state: Rc<RefCell<Mounted>>,
    _subscription: Subscription,
}

impl Scoreboard {
    /// Subscribe to `config.topic`. `on_change` runs after every replacement
    /// with the panel to draw (`None` hides it).
    pub fn mount<C>(
        channel: &C,
        config: ScoreboardConfig,
        on_change: impl FnMut(Option<PanelView>) + 'static,
    ) -> Self
    where
        C: DataChannel + ?Sized,
    {
        let state = Rc::new(RefCell::new(Mounted {
            model: ScoreboardModel::new(&config),
            on_change: Box::new(on_change),
        }));

        let handler_state = Rc::clone(&state);
        let subscription = channel.subscribe(
            &config.topic,
            Box::new(move |message| {
                let mut mounted = handler_state.borrow_mut();
                if let MessageOutcome::Replaced = mounted.model.apply(message) {
                    let panel = mounted.model.panel();
                    (mounted.on_change)(panel);
                }
            }),
        );
        info!(topic = %config.topic, "scoreboard mounted");

        Self {
            state,
            _subscription: subscription,
        }
    }

    pub fn with_model<R>(&self, f: impl FnOnce(&ScoreboardModel) -> R) -> R {
        f(&self.state.borrow().model)
    }

    pub fn panel(&self) -> Option<PanelView> {
        self.with_model(ScoreboardModel::panel)
    }

    pub fn snapshot(&self) -> ScoreboardSnapshot {
        self.with_model(|m| m.snapshot().clone())
    }

    /// Explicit teardown; equivalent to dropping the widget.
    pub fn unmount(self) {
        info!(topic = %self.with_model(|m| m.topic().to_string()), "scoreboard unmounted");
    }
}
