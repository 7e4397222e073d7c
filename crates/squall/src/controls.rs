//! Stop and resize requests, shared between the signal layer and the loop.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

/// Cancellation token for the animation loop.
///
/// OS signals and terminal events set the flags; the loop reads them once
/// per frame.
#[derive(Debug, Clone, Default)]
pub struct Controls {
    stop: Arc<AtomicBool>,
    resized: Arc<AtomicBool>,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route SIGINT, SIGTERM and SIGHUP to the stop flag.
    #[cfg(unix)]
    pub fn install_signal_handlers(&self) -> io::Result<()> {
        use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};

        for signal in [SIGINT, SIGTERM, SIGHUP] {
            signal_hook::flag::register(signal, Arc::clone(&self.stop))?;
        }
        Ok(())
    }

    #[cfg(not(unix))]
    pub fn install_signal_handlers(&self) -> io::Result<()> {
        Ok(())
    }

    /// Translate a terminal event into a request.
    pub fn observe(&self, event: &Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
            Event::Resize(width, height) => {
                debug!(width, height, "terminal resized");
                self.request_reset();
            }
            _ => {}
        }
    }

    fn on_key_event(&self, key: &KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => {
                self.request_stop()
            }
            _ => {}
        }
    }

    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    pub fn request_reset(&self) {
        self.resized.store(true, Ordering::SeqCst);
    }

    pub fn should_stop(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    /// Whether a resize arrived since the last call; clears the request.
    pub fn take_resized(&self) -> bool {
        self.resized.swap(false, Ordering::SeqCst)
    }
}
