pub mod board;
pub mod calendar;
pub mod gate;
pub mod notify;
pub mod stats;
pub mod validate;

use serde::{
  Deserialize,
  Serialize
};

pub const DEFAULT_TITLE_MAX_LEN: usize =
  200;
pub const DEFAULT_MIN_PASSWORD_LEN:
  usize = 8;

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct UserDto {
  pub uid:          String,
  pub email:        String,
  #[serde(default)]
  pub display_name: Option<String>,
  #[serde(default)]
  pub created:      Option<String>
}

impl UserDto {
  /// Name shown in the sidebar; falls
  /// back to the email address.
  pub fn label(&self) -> &str {
    self
      .display_name
      .as_deref()
      .map(str::trim)
      .filter(|name| !name.is_empty())
      .unwrap_or(&self.email)
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct TaskDto {
  pub id:        String,
  #[serde(default)]
  pub title:     String,
  #[serde(default)]
  pub completed: bool,
  #[serde(default)]
  pub created:   Option<String>
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct TasksListArgs {
  pub user_id: String
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct TaskCreate {
  pub user_id:   String,
  pub title:     String,
  #[serde(default)]
  pub completed: bool
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct TaskDeleteArgs {
  pub user_id: String,
  pub id:      String
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct SignUpArgs {
  pub email:        String,
  pub password:     String,
  #[serde(default)]
  pub display_name: Option<String>
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct SignInArgs {
  pub email:    String,
  pub password: String
}

/// Limits the host enforces, read from
/// its rc file.
#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct LimitsDto {
  pub min_password_len: usize,
  pub title_max_len:    usize
}

impl Default for LimitsDto {
  fn default() -> Self {
    Self {
      min_password_len:
        DEFAULT_MIN_PASSWORD_LEN,
      title_max_len: DEFAULT_TITLE_MAX_LEN
    }
  }
}
