/// How the playthrough ended.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Outcome {
    Won,
    Lost,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SessionStats {
    pub bottles_collected: u32,
    pub bottles_thrown: u32,
    pub coins_collected: u32,
    pub chickens_killed: u32,
}

/// Per-playthrough flags and counters. Owned by the world and rebuilt on
/// restart, so nothing leaks between sessions.
pub struct Session {
    pub arrived_endboss: bool,
    pub stats: SessionStats,
    pub outcome: Option<Outcome>,
    stop_at_ms: Option<u64>,
    pub stopped: bool,
}

impl Session {
    pub fn new() -> Self {
        Session {
            arrived_endboss: false,
            stats: SessionStats::default(),
            outcome: None,
            stop_at_ms: None,
            stopped: false,
        }
    }

    /// Records the outcome once and schedules the freeze. Later calls are
    /// ignored, so a win landing in the same tick as a death cannot flip.
    pub fn finish(&mut self, outcome: Outcome, now_ms: u64, stop_delay_ms: u64) {
        if self.outcome.is_some() {
            return;
        }
        self.outcome = Some(outcome);
        self.stop_at_ms = Some(now_ms + stop_delay_ms);
        tracing::info!(?outcome, stats = ?self.stats, "session finished");
    }

    pub fn tick(&mut self, now_ms: u64) {
        if let Some(at) = self.stop_at_ms {
            if now_ms >= at && !self.stopped {
                self.stopped = true;
                self.arrived_endboss = false;
            }
        }
    }
}
