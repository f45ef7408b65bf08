use indicatif::{ProgressBar, ProgressStyle};

/// Where a transfer currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressState {
    NotStarted,
    InProgress { current: u64, total: u64 },
    Done,
}

/// Events delivered to a tracker's observer, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent {
    Started { total: u64 },
    Advanced { current: u64, total: u64 },
    Finished { total: u64 },
    /// The transfer failed part way; nothing more will be reported
    Abandoned,
}

type Observer = Box<dyn FnMut(ProgressEvent)>;

/// Progress of a single upload or download.
///
/// Owned by whoever starts the transfer and handed down by `&mut`. Byte
/// counts only ever move forward and the observer sees `Finished` once.
pub struct ProgressTracker {
    state: ProgressState,
    observer: Observer,
}

impl ProgressTracker {
    pub fn new(observer: impl FnMut(ProgressEvent) + 'static) -> Self {
        Self {
            state: ProgressState::NotStarted,
            observer: Box::new(observer),
        }
    }

    /// Tracker that reports nothing
    #[must_use]
    pub fn hidden() -> Self {
        Self::new(|_| {})
    }

    /// Tracker drawing a bar on stderr, labelled e.g. "Uploading image".
    #[must_use]
    pub fn terminal(label: &str) -> Self {
        let label = label.to_string();
        let mut bar: Option<ProgressBar> = None;
        Self::new(move |event| match event {
            ProgressEvent::Started { total } => {
                let pb = ProgressBar::new(total);
                let style = ProgressStyle::with_template("{msg} [{bar:40}] {percent}%")
                    .unwrap_or_else(|_| ProgressStyle::default_bar());
                pb.set_style(style.progress_chars("=> "));
                pb.set_message(label.clone());
                bar = Some(pb);
            }
            ProgressEvent::Advanced { current, .. } => {
                if let Some(pb) = &bar {
                    pb.set_position(current);
                }
            }
            ProgressEvent::Finished { total } => {
                if let Some(pb) = bar.take() {
                    pb.set_position(total);
                    pb.finish();
                }
            }
            ProgressEvent::Abandoned => {
                if let Some(pb) = bar.take() {
                    pb.finish_and_clear();
                }
            }
        })
    }

    #[must_use]
    pub fn state(&self) -> ProgressState {
        self.state
    }

    /// Record that `current` of `total` bytes have been transferred.
    pub fn update(&mut self, current: u64, total: u64) {
        match self.state {
            ProgressState::Done => return,
            ProgressState::NotStarted => {
                (self.observer)(ProgressEvent::Started { total });
                self.state = ProgressState::InProgress { current: 0, total };
                if current > 0 {
                    self.advance(current, total);
                }
            }
            ProgressState::InProgress { current: last, .. } => {
                if current > last {
                    self.advance(current, total);
                }
            }
        }

        if current >= total {
            self.finish();
        }
    }

    /// Mark the transfer complete. Calling this more than once is harmless.
    pub fn finish(&mut self) {
        let total = match self.state {
            ProgressState::Done => return,
            ProgressState::NotStarted => 0,
            ProgressState::InProgress { total, .. } => total,
        };
        (self.observer)(ProgressEvent::Finished { total });
        self.state = ProgressState::Done;
    }

    /// Stop reporting after a failure. A bar that was drawn is cleared so the
    /// error message is not left under a half-filled bar.
    pub fn abandon(&mut self) {
        if self.state == ProgressState::Done {
            return;
        }
        (self.observer)(ProgressEvent::Abandoned);
        self.state = ProgressState::Done;
    }

    fn advance(&mut self, current: u64, total: u64) {
        (self.observer)(ProgressEvent::Advanced { current, total });
        self.state = ProgressState::InProgress { current, total };
    }
}

impl std::fmt::Debug for ProgressTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressTracker")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// How progress is shown for transfers started by the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressDisplay {
    #[default]
    Terminal,
    Hidden,
}

impl ProgressDisplay {
    #[must_use]
    pub fn tracker(self, label: &str) -> ProgressTracker {
        match self {
            Self::Terminal => ProgressTracker::terminal(label),
            Self::Hidden => ProgressTracker::hidden(),
        }
    }
}
