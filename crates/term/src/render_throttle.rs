//! Frame pacing for screens that rarely change.
//!
//! A running round redraws every frame. Idle, over and wallet screens only
//! change on input, so they redraw when their snapshot fingerprint moves or
//! once per interval to pick up terminal damage.

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
    /// - When `is_static=false`: always render.
    /// - When `is_static=true`: render immediately on fingerprint change, otherwise at most
    ///   once per `min_static_interval_ms`.
    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64, is_static: bool) -> bool {
        let changed = fingerprint != self.last_fingerprint;
        let due = now_ms.saturating_sub(self.last_render_ms) >= self.min_static_interval_ms;

        if self.has_rendered && is_static && !changed && !due {
            return false;
        }

        self.has_rendered = true;
        self.last_render_ms = now_ms;
        self.last_fingerprint = fingerprint;
        true
    }

    /// Force the next call to render (e.g. after a resize).
    pub fn reset(&mut self) {
        self.has_rendered = false;
    }
}
