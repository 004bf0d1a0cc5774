use serde::de::DeserializeOwned;
use serde::Serialize;
use taskmaster_gui_shared::{
  LimitsDto,
  SignInArgs,
  SignUpArgs,
  TaskCreate,
  TaskDeleteArgs,
  TaskDto,
  TasksListArgs,
  UserDto
};
use tauri_wasm::{args, invoke};
use uuid::Uuid;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CommandPayload<'a, A> {
  #[serde(
    skip_serializing_if = "Option::is_none"
  )]
  args:       Option<&'a A>,
  request_id: String
}

#[derive(Serialize)]
struct UiLogArg<'a> {
  event:  &'a str,
  detail: &'a str
}

pub async fn invoke_tauri<R, A>(
  cmd: &str,
  args_payload: Option<&A>
) -> Result<R, String>
where
  R: DeserializeOwned,
  A: Serialize
{
  let request_id =
    Uuid::new_v4().to_string();
  tracing::debug!(cmd, request_id = %request_id, "invoking host command");

  let command_payload = CommandPayload {
    args: args_payload,
    request_id
  };
  let payload = args(&command_payload)
  .map_err(|e| {
    format!("failed to encode args: {e}")
  })?;
  let value = invoke(cmd)
    .with_args(payload)
    .await
    .map_err(|e| {
      host_error_message(&format!(
        "{e:?}"
      ))
    })?;

  serde_wasm_bindgen::from_value(value)
    .map_err(|e| {
      format!("decode error: {e}")
    })
}

/// Host commands reject with a plain
/// string; unwrap its debug rendering.
fn host_error_message(
  debug: &str
) -> String {
  debug
    .strip_prefix("JsValue(\"")
    .and_then(|rest| {
      rest.strip_suffix("\")")
    })
    .unwrap_or(debug)
    .to_string()
}

pub async fn current_user()
-> Result<Option<UserDto>, String> {
  invoke_tauri::<_, ()>(
    "auth_current_user",
    None
  )
  .await
}

pub async fn fetch_limits()
-> Result<LimitsDto, String> {
  invoke_tauri::<_, ()>(
    "config_limits",
    None
  )
  .await
}

pub async fn sign_up(
  args: &SignUpArgs
) -> Result<UserDto, String> {
  invoke_tauri("auth_sign_up", Some(args))
    .await
}

pub async fn sign_in(
  args: &SignInArgs
) -> Result<UserDto, String> {
  invoke_tauri("auth_sign_in", Some(args))
    .await
}

pub async fn sign_out()
-> Result<(), String> {
  invoke_tauri::<_, ()>(
    "auth_sign_out",
    None
  )
  .await
}

pub async fn fetch_tasks(
  user_id: &str
) -> Result<Vec<TaskDto>, String> {
  let args = TasksListArgs {
    user_id: user_id.to_string()
  };
  invoke_tauri("tasks_list", Some(&args))
    .await
}

pub async fn create_task(
  create: &TaskCreate
) -> Result<TaskDto, String> {
  invoke_tauri("task_add", Some(create))
    .await
}

pub async fn delete_task(
  user_id: &str,
  id: &str
) -> Result<(), String> {
  let args = TaskDeleteArgs {
    user_id: user_id.to_string(),
    id:      id.to_string()
  };
  invoke_tauri("task_delete", Some(&args))
    .await
}

pub async fn log_ui_event(
  event: &str,
  detail: &str
) {
  let arg = UiLogArg { event, detail };
  if let Err(err) = invoke_tauri::<(), _>(
    "ui_log",
    Some(&arg)
  )
  .await
  {
    tracing::warn!(error = %err, event, "ui_log forwarding failed");
  }
}
