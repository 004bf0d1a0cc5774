//! In-memory task collection owned by
//! the dashboard.
//!
//! The board mirrors the backend
//! collection of one user. Every fetch
//! is tagged with a [`FetchTicket`] and
//! only the response to the most
//! recently issued ticket is applied, so
//! overlapping fetches cannot overwrite
//! each other out of order. Deletes are
//! applied optimistically and recorded
//! as pending mutations until the
//! backend confirms or rejects them.

use std::collections::BTreeMap;

use crate::TaskDto;

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
)]
pub struct FetchTicket(u64);

impl FetchTicket {
  pub fn seq(self) -> u64 {
    self.0
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq, Default,
)]
pub enum LoadPhase {
  #[default]
  Idle,
  Loading,
  Loaded,
  Failed(String)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
  Applied { count: usize },
  Stale,
  Failed(String)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
  pub task:  TaskDto,
  pub index: usize
}

#[derive(
  Debug, Clone, PartialEq, Eq, Default,
)]
pub struct TaskBoard {
  tasks:           Vec<TaskDto>,
  phase:           LoadPhase,
  issued:          u64,
  pending_deletes:
    BTreeMap<String, PendingDelete>,
  // id -> last ticket issued before the
  // backend confirmed the delete
  tombstones:      BTreeMap<String, u64>,
  selected:        Option<TaskDto>,
  add_open:        bool
}

impl TaskBoard {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn tasks(&self) -> &[TaskDto] {
    &self.tasks
  }

  pub fn phase(&self) -> &LoadPhase {
    &self.phase
  }

  pub fn is_loading(&self) -> bool {
    self.phase == LoadPhase::Loading
  }

  pub fn has_pending_deletes(
    &self
  ) -> bool {
    !self.pending_deletes.is_empty()
  }

  pub fn begin_fetch(
    &mut self
  ) -> FetchTicket {
    self.issued =
      self.issued.saturating_add(1);
    self.phase = LoadPhase::Loading;
    FetchTicket(self.issued)
  }

  /// Applies a fetch response. Responses
  /// to anything but the latest ticket
  /// are dropped; failures keep the
  /// current list.
  pub fn apply_fetch(
    &mut self,
    ticket: FetchTicket,
    result: Result<Vec<TaskDto>, String>
  ) -> FetchOutcome {
    if ticket.0 != self.issued {
      return FetchOutcome::Stale;
    }

    let list = match result {
      | Ok(list) => list,
      | Err(message) => {
        self.phase = LoadPhase::Failed(
          message.clone()
        );
        return FetchOutcome::Failed(
          message
        );
      }
    };

    // A fetch issued after the delete
    // was confirmed already reflects it.
    self
      .tombstones
      .retain(|_, fence| *fence >= ticket.0);

    let pending = &self.pending_deletes;
    let tombstones = &self.tombstones;
    self.tasks = list
      .into_iter()
      .filter(|task| {
        !pending.contains_key(&task.id)
          && !tombstones
            .contains_key(&task.id)
      })
      .collect();

    if let Some(selected) =
      self.selected.take()
    {
      self.selected = self
        .tasks
        .iter()
        .find(|task| {
          task.id == selected.id
        })
        .cloned();
    }

    self.phase = LoadPhase::Loaded;
    FetchOutcome::Applied {
      count: self.tasks.len()
    }
  }

  /// Removes the task from the list
  /// before the backend has answered.
  pub fn begin_delete(
    &mut self,
    id: &str
  ) -> Option<PendingDelete> {
    let index = self
      .tasks
      .iter()
      .position(|task| task.id == id)?;
    let task = self.tasks.remove(index);

    if self
      .selected
      .as_ref()
      .is_some_and(|selected| {
        selected.id == id
      })
    {
      self.selected = None;
    }

    let pending =
      PendingDelete { task, index };
    self.pending_deletes.insert(
      id.to_string(),
      pending.clone()
    );
    Some(pending)
  }

  pub fn confirm_delete(
    &mut self,
    id: &str
  ) -> bool {
    if self
      .pending_deletes
      .remove(id)
      .is_none()
    {
      return false;
    }
    self
      .tombstones
      .insert(id.to_string(), self.issued);
    true
  }

  /// Puts a task whose delete failed
  /// back at its original position.
  pub fn rollback_delete(
    &mut self,
    id: &str
  ) -> bool {
    let Some(pending) =
      self.pending_deletes.remove(id)
    else {
      return false;
    };

    if !self
      .tasks
      .iter()
      .any(|task| task.id == id)
    {
      let index = pending
        .index
        .min(self.tasks.len());
      self
        .tasks
        .insert(index, pending.task);
    }
    true
  }

  pub fn is_add_open(&self) -> bool {
    self.add_open
  }

  pub fn open_add(&mut self) {
    self.add_open = true;
  }

  /// Closing the creation surface always
  /// re-fetches, whether or not a task
  /// was created.
  pub fn close_add(
    &mut self
  ) -> FetchTicket {
    self.add_open = false;
    self.begin_fetch()
  }

  pub fn selected(
    &self
  ) -> Option<&TaskDto> {
    self.selected.as_ref()
  }

  pub fn select(
    &mut self,
    task: TaskDto
  ) {
    self.selected = Some(task);
  }

  pub fn clear_selection(&mut self) {
    self.selected = None;
  }

  /// Drops everything tied to the
  /// previous session. The ticket counter
  /// moves past every issued ticket so
  /// responses still in flight are stale.
  pub fn reset(&mut self) {
    *self = Self {
      issued: self
        .issued
        .saturating_add(1),
      ..Self::default()
    };
  }
}

/// Case-insensitive title search used by
/// the dashboard header.
pub fn filter_by_title(
  tasks: &[TaskDto],
  query: &str
) -> Vec<TaskDto> {
  let needle =
    query.trim().to_lowercase();
  if needle.is_empty() {
    return tasks.to_vec();
  }

  tasks
    .iter()
    .filter(|task| {
      task
        .title
        .to_lowercase()
        .contains(&needle)
    })
    .cloned()
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn task(
    id: &str,
    title: &str,
    completed: bool
  ) -> TaskDto {
    TaskDto {
      id: id.to_string(),
      title: title.to_string(),
      completed,
      created: None
    }
  }

  fn backend() -> Vec<TaskDto> {
    vec![
      task("t1", "Buy milk", false),
      task("t2", "Pay rent", true),
    ]
  }

  fn ids(board: &TaskBoard) -> Vec<&str> {
    board
      .tasks()
      .iter()
      .map(|task| task.id.as_str())
      .collect()
  }

  fn loaded(
    tasks: Vec<TaskDto>
  ) -> TaskBoard {
    let mut board = TaskBoard::new();
    let ticket = board.begin_fetch();
    board.apply_fetch(ticket, Ok(tasks));
    board
  }

  #[test]
  fn mount_fetch_mirrors_backend_order() {
    let mut board = TaskBoard::new();
    assert_eq!(
      board.phase(),
      &LoadPhase::Idle
    );

    let ticket = board.begin_fetch();
    assert!(board.is_loading());

    let outcome = board
      .apply_fetch(ticket, Ok(backend()));
    assert_eq!(
      outcome,
      FetchOutcome::Applied { count: 2 }
    );
    assert_eq!(board.tasks(), backend());
    assert_eq!(
      board.phase(),
      &LoadPhase::Loaded
    );
  }

  #[test]
  fn stale_response_is_dropped() {
    let mut board = TaskBoard::new();
    let first = board.begin_fetch();
    let second = board.begin_fetch();

    let newest =
      vec![task("t3", "New", false)];
    assert_eq!(
      board.apply_fetch(
        second,
        Ok(newest.clone())
      ),
      FetchOutcome::Applied { count: 1 }
    );
    assert_eq!(
      board
        .apply_fetch(first, Ok(backend())),
      FetchOutcome::Stale
    );
    assert_eq!(board.tasks(), newest);
  }

  #[test]
  fn failed_fetch_keeps_current_list() {
    let mut board = loaded(backend());
    let ticket = board.begin_fetch();

    let outcome = board.apply_fetch(
      ticket,
      Err("backend offline".to_string())
    );
    assert_eq!(
      outcome,
      FetchOutcome::Failed(
        "backend offline".to_string()
      )
    );
    assert_eq!(board.tasks(), backend());
    assert_eq!(
      board.phase(),
      &LoadPhase::Failed(
        "backend offline".to_string()
      )
    );
  }

  #[test]
  fn delete_removes_only_target_and_keeps_order(
  ) {
    let mut board = loaded(vec![
      task("a", "A", false),
      task("b", "B", false),
      task("c", "C", true),
    ]);

    let pending = board
      .begin_delete("b")
      .expect("task b is present");
    assert_eq!(pending.index, 1);
    assert_eq!(ids(&board), ["a", "c"]);
    assert!(
      board.begin_delete("b").is_none()
    );
  }

  #[test]
  fn pending_delete_survives_slow_fetch() {
    let mut board = loaded(backend());
    let slow = board.begin_fetch();
    board.begin_delete("t1");

    board.apply_fetch(slow, Ok(backend()));
    assert_eq!(ids(&board), ["t2"]);
  }

  #[test]
  fn confirmed_delete_survives_fetch_issued_earlier(
  ) {
    let mut board = loaded(backend());
    let slow = board.begin_fetch();

    board.begin_delete("t1");
    assert!(board.confirm_delete("t1"));
    assert!(!board.has_pending_deletes());

    board.apply_fetch(slow, Ok(backend()));
    assert_eq!(ids(&board), ["t2"]);
  }

  #[test]
  fn tombstone_is_pruned_by_later_fetch() {
    let mut board = loaded(backend());
    board.begin_delete("t1");
    board.confirm_delete("t1");

    // The backend still returns t1, so a
    // fetch issued after confirmation is
    // taken at its word.
    let fresh = board.begin_fetch();
    board.apply_fetch(fresh, Ok(backend()));
    assert_eq!(ids(&board), ["t1", "t2"]);
  }

  #[test]
  fn failed_delete_rolls_back_to_original_index(
  ) {
    let mut board = loaded(vec![
      task("a", "A", false),
      task("b", "B", false),
      task("c", "C", false),
    ]);

    board.begin_delete("b");
    assert!(board.rollback_delete("b"));
    assert_eq!(
      ids(&board),
      ["a", "b", "c"]
    );
    assert!(!board.rollback_delete("b"));
    assert!(!board.confirm_delete("b"));
  }

  #[test]
  fn deleting_selected_task_clears_selection(
  ) {
    let mut board = loaded(backend());
    board.select(task(
      "t1", "Buy milk", false
    ));
    assert!(board.selected().is_some());

    board.begin_delete("t1");
    assert!(board.selected().is_none());
  }

  #[test]
  fn selection_follows_refreshed_task() {
    let mut board = loaded(backend());
    board.select(task(
      "t2", "Pay rent", true
    ));

    let ticket = board.begin_fetch();
    board.apply_fetch(
      ticket,
      Ok(vec![task(
        "t2",
        "Pay rent (March)",
        true
      )])
    );
    assert_eq!(
      board
        .selected()
        .map(|task| task.title.as_str()),
      Some("Pay rent (March)")
    );

    let ticket = board.begin_fetch();
    board.apply_fetch(ticket, Ok(vec![]));
    assert!(board.selected().is_none());
  }

  #[test]
  fn closing_add_issues_exactly_one_fetch() {
    let mut board = loaded(backend());
    board.open_add();
    assert!(board.is_add_open());

    let before =
      board.begin_fetch().seq();
    let ticket = board.close_add();
    assert!(!board.is_add_open());
    assert_eq!(ticket.seq(), before + 1);
    assert!(board.is_loading());
  }

  #[test]
  fn reset_turns_in_flight_fetch_stale() {
    let mut board = loaded(backend());
    let in_flight = board.begin_fetch();
    board.open_add();

    board.reset();
    assert!(board.tasks().is_empty());
    assert!(!board.is_add_open());
    assert_eq!(
      board.phase(),
      &LoadPhase::Idle
    );
    assert_eq!(
      board
        .apply_fetch(in_flight, Ok(backend())),
      FetchOutcome::Stale
    );
  }

  #[test]
  fn title_filter_is_case_insensitive() {
    let tasks = backend();
    let hits =
      filter_by_title(&tasks, "  RENT ");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "t2");
    assert_eq!(
      filter_by_title(&tasks, "").len(),
      2
    );
  }
}
