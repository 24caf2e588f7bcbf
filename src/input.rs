//! Tilt input plumbing
//!
//! The host's motion sensor pushes samples at its own cadence (nominally
//! every [`crate::consts::TILT_INTERVAL_MS`] ms); the simulation reads the
//! register once per frame. Only the latest value is kept - tilt is a
//! continuous signal, so last-write-wins is the correct race outcome and
//! the slot needs no queue or lock.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

/// Single-slot latest-value register for tilt samples.
///
/// Clones share the slot; hand one clone to the sensor callback and keep
/// the other on the session.
#[derive(Clone)]
pub struct TiltRegister {
    bits: Arc<AtomicU32>,
}

impl TiltRegister {
    pub fn new() -> Self {
        Self {
            bits: Arc::new(AtomicU32::new(0.0f32.to_bits())),
        }
    }

    /// Publish a sample; called from the sensor side
    pub fn store(&self, sample: f32) {
        self.bits.store(sample.to_bits(), Ordering::Relaxed);
    }

    /// Read the latest sample; called once per frame by the session
    pub fn load(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Relaxed))
    }
}

impl Default for TiltRegister {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TiltRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TiltRegister")
            .field("latest", &self.load())
            .finish()
    }
}

/// RAII guard pairing a sensor subscription with its deregistration.
///
/// Dropping the guard runs the host's cancel closure, so leaving the game
/// screen can't leave a sensor callback writing into a dead session.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
