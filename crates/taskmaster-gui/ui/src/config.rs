use chrono::Weekday;
use serde::Deserialize;
use taskmaster_gui_shared::calendar::parse_week_start;
use taskmaster_gui_shared::{
  DEFAULT_MIN_PASSWORD_LEN,
  DEFAULT_TITLE_MAX_LEN,
  LimitsDto
};

const UI_CONFIG_TOML: &str =
  include_str!("../assets/ui.toml");

#[derive(
  Clone, Debug, PartialEq, Deserialize,
)]
pub struct UiConfig {
  #[serde(default = "default_app_name")]
  pub app_name:         String,
  #[serde(default = "default_toast_ms")]
  pub toast_ms:         u32,
  #[serde(default = "default_week_start")]
  pub week_start:       String,
  /// Host-owned; see [`UiConfig::apply_limits`].
  #[serde(
    skip_deserializing,
    default = "default_title_max_len"
  )]
  pub title_max_len:    usize,
  #[serde(
    skip_deserializing,
    default = "default_min_password_len"
  )]
  pub min_password_len: usize
}

impl Default for UiConfig {
  fn default() -> Self {
    Self {
      app_name:         default_app_name(),
      toast_ms:         default_toast_ms(),
      week_start:       default_week_start(
      ),
      title_max_len:
        default_title_max_len(),
      min_password_len:
        default_min_password_len()
    }
  }
}

impl UiConfig {
  pub fn week_start_day(&self) -> Weekday {
    parse_week_start(&self.week_start)
  }

  /// Adopts the limits reported by the
  /// host. Zero values are ignored.
  pub fn apply_limits(
    &mut self,
    limits: LimitsDto
  ) {
    if limits.title_max_len > 0 {
      self.title_max_len =
        limits.title_max_len;
    }
    if limits.min_password_len > 0 {
      self.min_password_len =
        limits.min_password_len;
    }
  }
}

fn default_app_name() -> String {
  "Taskmaster".to_string()
}

fn default_toast_ms() -> u32 {
  4_000
}

fn default_week_start() -> String {
  "monday".to_string()
}

fn default_title_max_len() -> usize {
  DEFAULT_TITLE_MAX_LEN
}

fn default_min_password_len() -> usize {
  DEFAULT_MIN_PASSWORD_LEN
}

pub fn load_ui_config() -> UiConfig {
  parse_ui_config(UI_CONFIG_TOML)
}

fn parse_ui_config(raw: &str) -> UiConfig {
  match toml::from_str::<UiConfig>(raw) {
    | Ok(mut config) => {
      sanitize_ui_config(&mut config);
      tracing::info!(
        app_name = %config.app_name,
        toast_ms = config.toast_ms,
        week_start = %config.week_start,
        "loaded ui config"
      );
      config
    }
    | Err(error) => {
      tracing::error!(%error, "failed parsing ui config; using defaults");
      UiConfig::default()
    }
  }
}

fn sanitize_ui_config(
  config: &mut UiConfig
) {
  if config.app_name.trim().is_empty() {
    config.app_name = default_app_name();
  }
  if config.toast_ms < 500 {
    config.toast_ms = default_toast_ms();
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bundled_config_parses() {
    let config = load_ui_config();
    assert_eq!(config.app_name, "Taskmaster");
    assert_eq!(
      config.week_start_day(),
      Weekday::Mon
    );
  }

  #[test]
  fn missing_and_bad_values_use_defaults() {
    let config = parse_ui_config(
      "app_name = \"\"\ntoast_ms = 10\n"
    );
    assert_eq!(config.app_name, "Taskmaster");
    assert_eq!(config.toast_ms, 4_000);
    assert_eq!(
      config.title_max_len,
      DEFAULT_TITLE_MAX_LEN
    );

    assert_eq!(
      parse_ui_config("toast_ms = \"x\""),
      UiConfig::default()
    );
  }

  #[test]
  fn limits_come_from_the_host() {
    let mut config = parse_ui_config(
      "title_max_len = 5\n"
    );
    assert_eq!(
      config.title_max_len,
      DEFAULT_TITLE_MAX_LEN
    );

    config.apply_limits(LimitsDto {
      min_password_len: 12,
      title_max_len:    40
    });
    assert_eq!(config.min_password_len, 12);
    assert_eq!(config.title_max_len, 40);

    config.apply_limits(LimitsDto {
      min_password_len: 0,
      title_max_len:    0
    });
    assert_eq!(config.min_password_len, 12);
    assert_eq!(config.title_max_len, 40);
  }
}
