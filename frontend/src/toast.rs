//! Single-slot notification state. Rendering lives in `dom::toast`.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    pub fn class_name(&self) -> &'static str {
        match self {
            Severity::Success => "notification--success",
            Severity::Error => "notification--error",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Severity::Success => "✓",
            Severity::Error => "✕",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ToastId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Shown,
    /// Playing the reverse slide before removal.
    Leaving,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub id: ToastId,
    pub message: String,
    pub severity: Severity,
    pub created_at: f64,
    pub dismiss_at: f64,
    pub phase: Phase,
}

#[derive(Debug)]
pub struct Toasts {
    current: Option<Notification>,
    next_id: u64,
    dismiss_after_ms: f64,
}

impl Toasts {
    pub fn new(dismiss_after_ms: f64) -> Self {
        Self {
            current: None,
            next_id: 0,
            dismiss_after_ms,
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// Replaces whatever is showing. The evicted notification, if any, is
    /// returned so its node can be torn down right away.
    pub fn show(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        now: f64,
    ) -> (ToastId, Option<Notification>) {
        let id = ToastId(self.next_id);
        self.next_id += 1;
        let evicted = self.current.replace(Notification {
            id,
            message: message.into(),
            severity,
            created_at: now,
            dismiss_at: now + self.dismiss_after_ms,
            phase: Phase::Shown,
        });
        (id, evicted)
    }

    /// The auto-dismiss timer fired. False when `id` was already replaced
    /// or closed, in which case the timer has nothing to do.
    pub fn begin_exit(&mut self, id: ToastId) -> bool {
        match self.current.as_mut() {
            Some(n) if n.id == id && n.phase == Phase::Shown => {
                n.phase = Phase::Leaving;
                true
            }
            _ => false,
        }
    }

    /// Removes `id` if it is still the current notification. Used both for
    /// the close button and for the end of the exit animation.
    pub fn remove(&mut self, id: ToastId) -> bool {
        if self.current.as_ref().map(|n| n.id) == Some(id) {
            self.current = None;
            true
        } else {
            false
        }
    }
}

/// Whatever is mounted on the page for the current notification, keyed by
/// its id. Releasing the slot drops the payload, listeners included.
#[derive(Debug)]
pub struct Mounted<T> {
    slot: Option<(ToastId, T)>,
}

impl<T> Default for Mounted<T> {
    fn default() -> Self {
        Self { slot: None }
    }
}

impl<T> Mounted<T> {
    /// Mounts `item` for `id`, handing back whatever was there before.
    pub fn attach(&mut self, id: ToastId, item: T) -> Option<T> {
        self.slot.replace((id, item)).map(|(_, old)| old)
    }

    pub fn get(&self, id: ToastId) -> Option<&T> {
        self.slot
            .as_ref()
            .filter(|(current, _)| *current == id)
            .map(|(_, item)| item)
    }

    /// Takes the payload out only if it still belongs to `id`.
    pub fn release(&mut self, id: ToastId) -> Option<T> {
        if self.get(id).is_some() {
            self.clear()
        } else {
            None
        }
    }

    pub fn clear(&mut self) -> Option<T> {
        self.slot.take().map(|(_, item)| item)
    }
}
