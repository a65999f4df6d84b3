//! Frame pacing for the terminal.
//!
//! While a piece is falling every frame is drawn. On the overlay screens the
//! picture only changes when the snapshot does, so redraws are limited to
//! changes plus a slow refresh.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::core::GameSnapshot;

#[derive(Debug, Clone)]
pub struct RenderThrottle {
    min_static_interval_ms: u64,
    last_render_ms: u64,
    last_fingerprint: u64,
    has_rendered: bool,
}

impl RenderThrottle {
    pub fn new(min_static_interval_ms: u64) -> Self {
        Self {
            min_static_interval_ms,
            last_render_ms: 0,
            last_fingerprint: 0,
            has_rendered: false,
        }
    }

    /// Decide whether to render a new frame.
    ///
    /// - When `is_static=false`: always render (no throttling).
    /// - When `is_static=true`: render immediately on fingerprint change, otherwise at most
    ///   once per `min_static_interval_ms`.
    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64, is_static: bool) -> bool {
        if !self.has_rendered {
            self.has_rendered = true;
            self.last_render_ms = now_ms;
            self.last_fingerprint = fingerprint;
            return true;
        }

        if !is_static || fingerprint != self.last_fingerprint {
            self.last_render_ms = now_ms;
            self.last_fingerprint = fingerprint;
            return true;
        }

        if now_ms.saturating_sub(self.last_render_ms) >= self.min_static_interval_ms {
            self.last_render_ms = now_ms;
            return true;
        }

        false
    }

    /// Force the next call to render.
    pub fn reset(&mut self) {
        self.has_rendered = false;
    }
}

/// Hash of everything a frame shows.
pub fn snapshot_fingerprint(snap: &GameSnapshot) -> u64 {
    let mut h = DefaultHasher::new();
    snap.board.hash(&mut h);
    snap.active.hash(&mut h);
    snap.next.hash(&mut h);
    snap.phase.hash(&mut h);
    snap.score.hash(&mut h);
    snap.lines.hash(&mut h);
    snap.level.hash(&mut h);
    h.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Phase;

    #[test]
    fn fingerprint_tracks_visible_changes() {
        let a = GameSnapshot::default();
        let mut b = a;
        assert_eq!(snapshot_fingerprint(&a), snapshot_fingerprint(&b));

        b.phase = Phase::Paused;
        assert_ne!(snapshot_fingerprint(&a), snapshot_fingerprint(&b));

        let mut c = a;
        c.board[19][0] = 3;
        assert_ne!(snapshot_fingerprint(&a), snapshot_fingerprint(&c));
    }

    #[test]
    fn reset_forces_a_frame() {
        let mut t = RenderThrottle::new(250);
        assert!(t.should_render(0, 1, true));
        assert!(!t.should_render(5, 1, true));
        t.reset();
        assert!(t.should_render(6, 1, true));
    }
}
