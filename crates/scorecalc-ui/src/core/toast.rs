//! Toast queue backing the notification host.

use yewdux::store::Store;

/// Toast variants used across the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    /// Informational toast.
    Info,
    /// Error toast (red).
    Error,
}

impl ToastKind {
    /// CSS modifier class for the variant.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Error => "error",
        }
    }
}

/// Toast payload rendered by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    /// Monotonic toast identifier.
    pub id: u64,
    /// Display message for the toast.
    pub message: String,
    /// Severity classification.
    pub kind: ToastKind,
}

/// Visible toasts in display order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Store)]
pub struct ToastStore {
    /// Toasts currently shown.
    pub toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastStore {
    /// Queue a toast and return its id.
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            message: message.into(),
            kind,
        });
        id
    }

    /// Remove a toast; unknown ids are ignored.
    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_assigns_increasing_ids() {
        let mut store = ToastStore::default();
        let first = store.push(ToastKind::Error, "Неизвестная ошибка");
        let second = store.push(ToastKind::Info, "saved");
        assert!(second > first);
        assert_eq!(store.toasts.len(), 2);
        assert_eq!(store.toasts[0].kind.class(), "error");
    }

    #[test]
    fn dismiss_removes_only_target() {
        let mut store = ToastStore::default();
        let first = store.push(ToastKind::Error, "a");
        let second = store.push(ToastKind::Error, "b");
        store.dismiss(first);
        store.dismiss(99);
        assert_eq!(store.toasts.len(), 1);
        assert_eq!(store.toasts[0].id, second);
    }

    #[test]
    fn later_toasts_leave_earlier_entries_untouched() {
        let mut store = ToastStore::default();
        let first = store.push(ToastKind::Error, "a");
        let before = store.toasts[0].clone();
        let second = store.push(ToastKind::Error, "b");
        store.dismiss(second);
        let third = store.push(ToastKind::Info, "c");
        assert_eq!(store.toasts[0], before);
        assert_eq!(store.toasts[0].id, first);
        assert!(third > second);
    }
}
