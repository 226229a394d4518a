//! Ephemeral feedback state: toasts, cart-icon shake, confetti burst.
//!
//! These carry no state beyond display timers and are never required for
//! cart or favorites correctness. Rendering is the host's concern; this
//! module only tracks what should currently be shown.

use std::time::{Duration, Instant};

use rand::Rng;

/// How long a toast stays up.
pub const TOAST_TTL: Duration = Duration::from_secs(3);

/// How long the cart icon shakes after an add.
pub const SHAKE_DURATION: Duration = Duration::from_millis(500);

/// Particles in one confetti burst.
pub const CONFETTI_PARTICLES: usize = 40;

/// Frames a confetti burst animates before terminating itself.
pub const CONFETTI_FRAMES: u32 = 40;

/// Visual flavor of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
}

/// One self-dismissing toast banner.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    expires_at: Instant,
}

impl Toast {
    /// Whether the toast is still within its display window at `now`.
    #[must_use]
    pub fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// One confetti particle.
#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub fall: f32,
    pub hue: f32,
    pub tilt: f32,
}

/// A cooperative, self-terminating confetti burst.
#[derive(Debug, Clone)]
pub struct Confetti {
    particles: Vec<Particle>,
    frame: u32,
    height: f32,
}

impl Confetti {
    /// Scatter a burst across a surface of the given size.
    #[must_use]
    pub fn launch(width: f32, height: f32) -> Self {
        let mut rng = rand::rng();
        let particles = (0..CONFETTI_PARTICLES)
            .map(|_| Particle {
                x: rng.random_range(0.0..width.max(1.0)),
                y: rng.random_range(-height.max(1.0)..0.0),
                radius: 6.0 + rng.random_range(0.0..8.0),
                fall: 2.0 + rng.random_range(0.0..4.0),
                hue: rng.random_range(0.0..360.0),
                tilt: rng.random_range(-5.0..5.0),
            })
            .collect();

        Self {
            particles,
            frame: 0,
            height,
        }
    }

    /// Advance one frame. Returns `true` while the burst is still running.
    pub fn tick(&mut self) -> bool {
        if self.is_done() {
            return false;
        }

        #[allow(clippy::cast_precision_loss)] // frame count stays tiny
        let drift_phase = self.frame as f32 / 10.0;
        for particle in &mut self.particles {
            particle.y += particle.fall;
            particle.x += (drift_phase + particle.tilt).sin() * 2.0;
            if particle.y > self.height {
                particle.y = -10.0;
            }
        }

        self.frame += 1;
        !self.is_done()
    }

    /// Whether the fixed frame count has run out.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.frame >= CONFETTI_FRAMES
    }

    /// Current particle positions.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}

/// Aggregated feedback state for the page.
#[derive(Debug, Default)]
pub struct Notifications {
    toasts: Vec<Toast>,
    shake_until: Option<Instant>,
    confetti: Option<Confetti>,
}

impl Notifications {
    /// Create the component with nothing showing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a toast for the standard display window.
    pub fn push(&mut self, message: impl Into<String>, kind: ToastKind) {
        self.push_at(message, kind, Instant::now());
    }

    fn push_at(&mut self, message: impl Into<String>, kind: ToastKind, now: Instant) {
        self.toasts.push(Toast {
            message: message.into(),
            kind,
            expires_at: now + TOAST_TTL,
        });
    }

    /// Start the cart-icon shake.
    pub fn shake(&mut self) {
        self.shake_until = Some(Instant::now() + SHAKE_DURATION);
    }

    /// Launch a confetti burst, replacing any burst still running.
    pub fn launch_confetti(&mut self, width: f32, height: f32) {
        self.confetti = Some(Confetti::launch(width, height));
    }

    /// Advance timers and the confetti animation one step.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    fn tick_at(&mut self, now: Instant) {
        self.toasts.retain(|toast| toast.is_live(now));

        if let Some(until) = self.shake_until
            && now >= until
        {
            self.shake_until = None;
        }

        if let Some(confetti) = &mut self.confetti
            && !confetti.tick()
        {
            self.confetti = None;
        }
    }

    /// Toasts currently displayed, oldest first.
    #[must_use]
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// Whether the cart icon is currently shaking.
    #[must_use]
    pub fn is_shaking(&self) -> bool {
        self.shake_until.is_some_and(|until| Instant::now() < until)
    }

    /// The running confetti burst, if any.
    #[must_use]
    pub const fn confetti(&self) -> Option<&Confetti> {
        self.confetti.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_expires_after_ttl() {
        let mut notifications = Notifications::new();
        let start = Instant::now();
        notifications.push_at("Added to cart", ToastKind::Success, start);

        notifications.tick_at(start + Duration::from_secs(1));
        assert_eq!(notifications.toasts().len(), 1);

        notifications.tick_at(start + TOAST_TTL + Duration::from_millis(1));
        assert!(notifications.toasts().is_empty());
    }

    #[test]
    fn test_toasts_keep_order() {
        let mut notifications = Notifications::new();
        let start = Instant::now();
        notifications.push_at("first", ToastKind::Success, start);
        notifications.push_at("second", ToastKind::Error, start);

        let messages: Vec<&str> = notifications
            .toasts()
            .iter()
            .map(|t| t.message.as_str())
            .collect();
        assert_eq!(messages, vec!["first", "second"]);
    }

    #[test]
    fn test_confetti_runs_fixed_frames() {
        let mut confetti = Confetti::launch(800.0, 600.0);
        assert_eq!(confetti.particles().len(), CONFETTI_PARTICLES);

        let mut frames = 0;
        while confetti.tick() {
            frames += 1;
        }
        // tick() returns false on the terminating frame.
        assert_eq!(frames, CONFETTI_FRAMES - 1);
        assert!(confetti.is_done());
        assert!(!confetti.tick(), "done bursts stay done");
    }

    #[test]
    fn test_confetti_particles_wrap_at_bottom() {
        let mut confetti = Confetti::launch(100.0, 10.0);
        for _ in 0..CONFETTI_FRAMES {
            confetti.tick();
        }
        for particle in confetti.particles() {
            assert!(particle.y <= 10.0 + 6.0, "particles wrap instead of falling away");
        }
    }

    #[test]
    fn test_notifications_clear_finished_confetti() {
        let mut notifications = Notifications::new();
        notifications.launch_confetti(800.0, 600.0);
        assert!(notifications.confetti().is_some());

        for _ in 0..=CONFETTI_FRAMES {
            notifications.tick();
        }
        assert!(notifications.confetti().is_none());
    }
}
