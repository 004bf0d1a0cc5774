use taskmaster_gui_shared::LimitsDto;
use tauri::State;
use tracing::{
  info,
  instrument
};

use crate::state::AppState;

/// Limits from the host rc file, so form
/// hints match what the host enforces.
#[tauri::command]
#[instrument(skip(state), fields(request_id = ?request_id))]
pub async fn config_limits(
  state: State<'_, AppState>,
  request_id: Option<String>
) -> Result<LimitsDto, String> {
  let limits = state.limits();
  info!(
    request_id = ?request_id,
    min_password_len = limits.min_password_len,
    title_max_len = limits.title_max_len,
    "config_limits resolved"
  );
  Ok(limits)
}
