use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use pingado_core::sweeper::CancelToken;
use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Listens for `q` or Ctrl-C on the terminal while a sweep runs and cancels it.
///
/// Raw mode lasts until the handle is dropped.
pub struct InputHandle {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl InputHandle {
    pub fn start(cancel: CancelToken) -> Self {
        let stop = Arc::new(AtomicBool::new(false));

        if !console::user_attended() {
            return Self { stop, thread: None };
        }
        if let Err(e) = enable_raw_mode() {
            debug!("Key listener disabled, no raw mode: {e}");
            return Self { stop, thread: None };
        }

        let stop_ref = Arc::clone(&stop);
        let thread = thread::spawn(move || {
            while !stop_ref.load(Ordering::Relaxed) && !cancel.is_cancelled() {
                match event::poll(POLL_INTERVAL) {
                    Ok(true) => {}
                    Ok(false) => continue,
                    Err(_) => break,
                }
                if let Ok(Event::Key(key_event)) = event::read() {
                    if is_interrupt(&key_event) {
                        cancel.cancel();
                    }
                }
            }
        });

        Self {
            stop,
            thread: Some(thread),
        }
    }
}

fn is_interrupt(key_event: &KeyEvent) -> bool {
    let is_q = key_event.code == KeyCode::Char('q');
    let is_ctrl_c =
        key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL);
    (is_q || is_ctrl_c) && key_event.kind == KeyEventKind::Press
}

impl Drop for InputHandle {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
            let _ = disable_raw_mode();
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn q_and_ctrl_c_interrupt() {
        assert!(is_interrupt(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_interrupt(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn other_keys_do_not_interrupt() {
        assert!(!is_interrupt(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_interrupt(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
    }
}
