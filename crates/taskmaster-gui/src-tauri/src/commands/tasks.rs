use taskmaster_gui_shared::{
  TaskCreate,
  TaskDeleteArgs,
  TaskDto,
  TasksListArgs
};
use tauri::State;
use tracing::{
  error,
  info,
  instrument
};

use super::common::err_to_string;
use crate::state::AppState;

#[tauri::command]
#[instrument(skip(state), fields(request_id = ?request_id, user_id = %args.user_id))]
pub async fn tasks_list(
  state: State<'_, AppState>,
  args: TasksListArgs,
  request_id: Option<String>
) -> Result<Vec<TaskDto>, String> {
  info!(request_id = ?request_id, user_id = %args.user_id, "tasks_list command invoked");
  let result = state.list(args);
  if let Err(err) = result.as_ref() {
    error!(request_id = ?request_id, error = %err, "tasks_list command failed");
  }
  result.map_err(err_to_string)
}

#[tauri::command]
#[instrument(skip(state), fields(request_id = ?request_id, user_id = %args.user_id, title_len = args.title.len()))]
pub async fn task_add(
  state: State<'_, AppState>,
  args: TaskCreate,
  request_id: Option<String>
) -> Result<TaskDto, String> {
  info!(
    request_id = ?request_id,
    title_len = args.title.len(),
    completed = args.completed,
    "task_add command invoked"
  );
  let result = state.add(args);
  if let Err(err) = result.as_ref() {
    error!(request_id = ?request_id, error = %err, "task_add command failed");
  }
  result.map_err(err_to_string)
}

#[tauri::command]
#[instrument(skip(state), fields(request_id = ?request_id, user_id = %args.user_id, id = %args.id))]
pub async fn task_delete(
  state: State<'_, AppState>,
  args: TaskDeleteArgs,
  request_id: Option<String>
) -> Result<(), String> {
  info!(request_id = ?request_id, id = %args.id, "task_delete command invoked");
  let result = state.delete(args);
  if let Err(err) = result.as_ref() {
    error!(request_id = ?request_id, error = %err, "task_delete command failed");
  }
  result.map_err(err_to_string)
}
