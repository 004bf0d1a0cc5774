use chrono::{
  DateTime,
  Utc
};
use serde::{
  Deserialize,
  Serialize
};
use uuid::Uuid;

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct Task {
  pub id:        String,
  /// uid of the owning account
  pub owner:     String,
  pub title:     String,
  #[serde(default)]
  pub completed: bool,
  pub entry:     DateTime<Utc>,
  pub modified:  DateTime<Utc>
}

impl Task {
  pub fn new(
    owner: &str,
    title: String,
    completed: bool,
    now: DateTime<Utc>
  ) -> Self {
    Self {
      id: Uuid::new_v4().to_string(),
      owner: owner.to_string(),
      title,
      completed,
      entry: now,
      modified: now
    }
  }

  pub fn is_owned_by(
    &self,
    uid: &str
  ) -> bool {
    self.owner == uid
  }
}
