use serde::Deserialize;
use tracing::{
  info,
  instrument
};

pub(crate) fn err_to_string(
  err: anyhow::Error
) -> String {
  err.to_string()
}

#[derive(Debug, Deserialize)]
pub struct UiLogArg {
  pub event:  String,
  pub detail: String
}

#[tauri::command]
#[instrument(fields(request_id = ?request_id, event = %args.event))]
pub async fn ui_log(
  args: UiLogArg,
  request_id: Option<String>
) -> Result<(), String> {
  info!(request_id = ?request_id, event = %args.event, detail = %args.detail, "ui interaction");
  Ok(())
}
