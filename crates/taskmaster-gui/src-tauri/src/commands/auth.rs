use taskmaster_gui_shared::{
  SignInArgs,
  SignUpArgs,
  UserDto
};
use tauri::State;
use tracing::{
  error,
  info,
  instrument,
  warn
};

use super::common::err_to_string;
use crate::state::AppState;

/// Session listener: the UI asks once on
/// start-up and after reloads.
#[tauri::command]
#[instrument(skip(state), fields(request_id = ?request_id))]
pub async fn auth_current_user(
  state: State<'_, AppState>,
  request_id: Option<String>
) -> Result<Option<UserDto>, String> {
  let result = state.current_user();
  match result.as_ref() {
    | Ok(user) => {
      info!(request_id = ?request_id, signed_in = user.is_some(), "auth_current_user resolved");
    }
    | Err(err) => {
      error!(request_id = ?request_id, error = %err, "auth_current_user command failed");
    }
  }
  result.map_err(err_to_string)
}

#[tauri::command]
#[instrument(skip(state, args), fields(request_id = ?request_id, email = %args.email))]
pub async fn auth_sign_up(
  state: State<'_, AppState>,
  args: SignUpArgs,
  request_id: Option<String>
) -> Result<UserDto, String> {
  info!(
    request_id = ?request_id,
    has_display_name =
      args.display_name.is_some(),
    "auth_sign_up command invoked"
  );
  let result = state.sign_up(args);
  if let Err(err) = result.as_ref() {
    warn!(request_id = ?request_id, error = %err, "auth_sign_up command failed");
  }
  result.map_err(err_to_string)
}

#[tauri::command]
#[instrument(skip(state, args), fields(request_id = ?request_id, email = %args.email))]
pub async fn auth_sign_in(
  state: State<'_, AppState>,
  args: SignInArgs,
  request_id: Option<String>
) -> Result<UserDto, String> {
  info!(request_id = ?request_id, "auth_sign_in command invoked");
  let result = state.sign_in(args);
  if let Err(err) = result.as_ref() {
    warn!(request_id = ?request_id, error = %err, "auth_sign_in command failed");
  }
  result.map_err(err_to_string)
}

#[tauri::command]
#[instrument(skip(state), fields(request_id = ?request_id))]
pub async fn auth_sign_out(
  state: State<'_, AppState>,
  request_id: Option<String>
) -> Result<(), String> {
  info!(request_id = ?request_id, "auth_sign_out command invoked");
  let result = state.sign_out();
  if let Err(err) = result.as_ref() {
    error!(request_id = ?request_id, error = %err, "auth_sign_out command failed");
  }
  result.map_err(err_to_string)
}
