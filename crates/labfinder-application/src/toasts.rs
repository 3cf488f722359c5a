//! Queue of toasts waiting to be shown.

use std::collections::VecDeque;

use labfinder_core::notification::Toast;

#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    pending: VecDeque<Toast>,
}

impl ToastQueue {
    pub fn push(&mut self, toast: Toast) {
        tracing::debug!(title = %toast.title, error = toast.is_error(), "Toast");
        self.pending.push_back(toast);
    }

    /// Removes and returns every pending toast, oldest first.
    pub fn drain(&mut self) -> Vec<Toast> {
        self.pending.drain(..).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.pending.iter()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
