//! Transient notification queue.

pub const MAX_VISIBLE_TOASTS: usize = 4;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum ToastKind {
  Info,
  Success,
  Error
}

impl ToastKind {
  pub fn css_class(self) -> &'static str {
    match self {
      | Self::Info => "toast info",
      | Self::Success => "toast success",
      | Self::Error => "toast error"
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
  pub id:      u64,
  pub kind:    ToastKind,
  pub message: String
}

#[derive(
  Debug, Clone, PartialEq, Eq, Default,
)]
pub struct ToastQueue {
  next_id: u64,
  toasts:  Vec<Toast>
}

impl ToastQueue {
  pub fn toasts(&self) -> &[Toast] {
    &self.toasts
  }

  /// Queues a toast and drops the oldest
  /// ones beyond the visible limit.
  pub fn push(
    &mut self,
    kind: ToastKind,
    message: impl Into<String>
  ) -> u64 {
    self.next_id =
      self.next_id.wrapping_add(1);
    self.toasts.push(Toast {
      id: self.next_id,
      kind,
      message: message.into()
    });

    let overflow = self
      .toasts
      .len()
      .saturating_sub(MAX_VISIBLE_TOASTS);
    if overflow > 0 {
      self.toasts.drain(..overflow);
    }
    self.next_id
  }

  pub fn dismiss(
    &mut self,
    id: u64
  ) -> bool {
    let before = self.toasts.len();
    self
      .toasts
      .retain(|toast| toast.id != id);
    self.toasts.len() != before
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn push_assigns_ids_and_dismiss_removes() {
    let mut queue = ToastQueue::default();
    let first = queue.push(
      ToastKind::Error,
      "could not load tasks"
    );
    let second =
      queue.push(ToastKind::Success, "saved");
    assert_ne!(first, second);
    assert_eq!(queue.toasts().len(), 2);

    assert!(queue.dismiss(first));
    assert!(!queue.dismiss(first));
    assert_eq!(
      queue.toasts()[0].message,
      "saved"
    );
  }

  #[test]
  fn oldest_toasts_fall_off() {
    let mut queue = ToastQueue::default();
    for n in 0..6 {
      queue.push(
        ToastKind::Info,
        format!("toast {n}")
      );
    }
    let messages: Vec<&str> = queue
      .toasts()
      .iter()
      .map(|toast| toast.message.as_str())
      .collect();
    assert_eq!(
      messages,
      ["toast 2", "toast 3", "toast 4", "toast 5"]
    );
  }
}
