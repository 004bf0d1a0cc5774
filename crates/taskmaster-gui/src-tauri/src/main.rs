mod commands;
mod state;

use std::path::Path;

use anyhow::Context;
use tracing::{
  error,
  info,
  warn
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{
  EnvFilter,
  fmt
};

use crate::state::Settings;

fn env_filter() -> EnvFilter {
  EnvFilter::try_from_default_env()
    .or_else(|_| {
      EnvFilter::try_new(
        "info,taskmaster_gui_tauri=debug,\
         taskmaster_core=debug"
      )
    })
    .unwrap_or_else(|_| {
      EnvFilter::new("info")
    })
}

/// Console-only subscriber active while
/// the rc file and data dir are resolved,
/// before the log file location is known.
fn bootstrap_subscriber()
-> impl tracing::Subscriber + Send + Sync {
  tracing_subscriber::registry()
    .with(env_filter())
    .with(
      fmt::layer()
        .with_target(true)
        .with_line_number(true)
    )
}

fn load_settings_with<S>(
  subscriber: S,
  load: impl FnOnce() -> anyhow::Result<Settings>
) -> anyhow::Result<Settings>
where
  S: tracing::Subscriber + Send + Sync + 'static
{
  tracing::subscriber::with_default(
    subscriber, load
  )
}

/// Console output plus a daily log file
/// under `<data dir>/logs`. The guard must
/// live until shutdown.
fn init_tracing(
  data_dir: &Path
) -> WorkerGuard {
  let file_appender =
    tracing_appender::rolling::daily(
      data_dir.join("logs"),
      "taskmaster.log"
    );
  let (file_writer, guard) =
    tracing_appender::non_blocking(
      file_appender
    );

  let _ =
    tracing_subscriber::registry()
      .with(env_filter())
      .with(
        fmt::layer()
          .with_target(true)
          .with_line_number(true)
      )
      .with(
        fmt::layer()
          .with_ansi(false)
          .with_writer(file_writer)
      )
      .try_init();

  guard
}

fn main() {
  let settings = match load_settings_with(
    bootstrap_subscriber(),
    Settings::load
  ) {
    | Ok(settings) => settings,
    | Err(err) => {
      eprintln!(
        "taskmaster: failed to load \
         settings: {err:#}"
      );
      std::process::exit(1);
    }
  };

  let _log_guard =
    init_tracing(&settings.data_dir);
  info!(
    data_dir = %settings.data_dir.display(),
    rc_files = settings.cfg.loaded_files.len(),
    "starting Taskmaster GUI backend"
  );

  let state =
    match state::AppState::open(&settings)
      .context(
        "failed to initialize app \
         state"
      ) {
      | Ok(state) => state,
      | Err(err) => {
        error!(error = %format!("{err:#}"), "initialization failed");
        std::process::exit(1);
      }
    };

  let result = tauri::Builder::default()
    .setup(|app| {
      install_signal_handlers(
        app.handle().clone()
      );
      Ok(())
    })
    .manage(state)
    .invoke_handler(
      tauri::generate_handler![
        commands::auth::auth_current_user,
        commands::auth::auth_sign_up,
        commands::auth::auth_sign_in,
        commands::auth::auth_sign_out,
        commands::tasks::tasks_list,
        commands::tasks::task_add,
        commands::tasks::task_delete,
        commands::common::ui_log,
        commands::config::config_limits,
      ]
    )
    .run(tauri::generate_context!());

  if let Err(err) = result {
    error!(error = %err, "Taskmaster GUI backend stopped with an error");
    std::process::exit(1);
  }
}

fn install_signal_handlers(
  app_handle: tauri::AppHandle
) {
  tauri::async_runtime::spawn(
    async move {
      wait_for_shutdown_signal().await;
      warn!(
        "received shutdown signal; \
         exiting application"
      );
      app_handle.exit(0);
    }
  );
}

#[cfg(unix)]
async fn wait_for_shutdown_signal() {
  use tokio::signal::unix::{
    SignalKind,
    signal
  };

  let mut sigint = match signal(
    SignalKind::interrupt()
  ) {
    | Ok(stream) => stream,
    | Err(error) => {
      error!(
        %error,
        "failed to register SIGINT \
         handler; falling back to \
         ctrl_c"
      );
      let _ =
        tokio::signal::ctrl_c().await;
      return;
    }
  };

  let mut sigterm = match signal(
    SignalKind::terminate()
  ) {
    | Ok(stream) => stream,
    | Err(error) => {
      error!(
        %error,
        "failed to register SIGTERM \
         handler; falling back to \
         ctrl_c"
      );
      let _ =
        tokio::signal::ctrl_c().await;
      return;
    }
  };

  tokio::select! {
    _ = sigint.recv() => {}
    _ = sigterm.recv() => {}
  }
}

#[cfg(not(unix))]
async fn wait_for_shutdown_signal() {
  if let Err(error) =
    tokio::signal::ctrl_c().await
  {
    error!(
      %error,
      "failed waiting for ctrl_c \
       signal"
    );
  }
}
