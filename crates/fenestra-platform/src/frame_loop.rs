use std::cell::Cell;
use std::rc::Rc;

/// Cancellation token for the frame loop. Clones share the same flag, so a
/// callback holding one can stop the loop it runs in; the stop is observed at
/// the next frame.
#[derive(Clone, Debug)]
pub struct LoopHandle {
    running: Rc<Cell<bool>>,
}

impl LoopHandle {
    pub(crate) fn new() -> Self {
        Self {
            running: Rc::new(Cell::new(true)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    pub fn stop(&self) {
        self.running.set(false);
    }
}
