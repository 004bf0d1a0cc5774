use std::collections::BTreeSet;

use chrono::{
  DateTime,
  FixedOffset,
  NaiveDate
};

use crate::TaskDto;

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
)]
pub struct QuickStats {
  pub total:             usize,
  pub completed:         usize,
  pub created_on_day:    usize,
  pub completed_percent: u8
}

impl QuickStats {
  pub fn from_tasks(
    tasks: &[TaskDto],
    day: NaiveDate,
    offset: FixedOffset
  ) -> Self {
    let total = tasks.len();
    let completed = tasks
      .iter()
      .filter(|task| task.completed)
      .count();
    let created_on_day = tasks
      .iter()
      .filter(|task| {
        created_date(task, offset)
          == Some(day)
      })
      .count();

    Self {
      total,
      completed,
      created_on_day,
      completed_percent: percent(
        completed, total
      )
    }
  }
}

fn percent(
  part: usize,
  total: usize
) -> u8 {
  if total == 0 {
    return 0;
  }
  let rounded =
    (part * 100 + total / 2) / total;
  rounded.min(100) as u8
}

/// Calendar day a task was created on,
/// seen from `offset`.
pub fn created_date(
  task: &TaskDto,
  offset: FixedOffset
) -> Option<NaiveDate> {
  let raw = task.created.as_deref()?;
  DateTime::parse_from_rfc3339(raw)
    .ok()
    .map(|stamp| {
      stamp
        .with_timezone(&offset)
        .date_naive()
    })
}

pub fn days_with_tasks(
  tasks: &[TaskDto],
  offset: FixedOffset
) -> BTreeSet<NaiveDate> {
  tasks
    .iter()
    .filter_map(|task| {
      created_date(task, offset)
    })
    .collect()
}
