use std::cell::RefCell;
use std::rc::Rc;

use chrono::{
  Local,
  NaiveDate
};
use taskmaster_gui_shared::TaskDto;
use taskmaster_gui_shared::board::{
  FetchOutcome,
  FetchTicket,
  LoadPhase,
  TaskBoard,
  filter_by_title
};
use taskmaster_gui_shared::calendar::{
  first_of_month,
  shift_month
};
use taskmaster_gui_shared::gate::{
  DashboardGate,
  dashboard_gate
};
use taskmaster_gui_shared::stats::{
  QuickStats,
  days_with_tasks
};
use yew::{
  Callback,
  Html,
  UseForceUpdateHandle,
  function_component,
  html,
  use_effect_with,
  use_force_update,
  use_mut_ref,
  use_state
};
use yew_router::prelude::Redirect;

use crate::api;
use crate::app::{
  Route,
  ui_debug,
  use_ui_config
};
use crate::components::{
  Calendar,
  QuickStatsPanel,
  Sidebar,
  TaskForm,
  TaskList,
  TaskModal,
  bind_input
};
use crate::session::{
  SessionAction,
  use_session
};
use crate::toast::{
  Notifier,
  use_notifier
};

/// The board lives outside yew state so
/// async completions always see the
/// latest version; `redraw` re-renders.
#[derive(Clone)]
struct BoardHandle {
  board:    Rc<RefCell<TaskBoard>>,
  redraw:   UseForceUpdateHandle,
  notifier: Notifier
}

impl BoardHandle {
  fn update(
    &self,
    f: impl FnOnce(&mut TaskBoard)
  ) {
    f(&mut *self.board.borrow_mut());
    self.redraw.force_update();
  }

  fn fetch(
    &self,
    user_id: String,
    ticket: FetchTicket
  ) {
    tracing::debug!(
      ticket = ticket.seq(),
      user_id = %user_id,
      "requesting tasks"
    );
    self.redraw.force_update();

    let handle = self.clone();
    wasm_bindgen_futures::spawn_local(
      async move {
        let result =
          api::fetch_tasks(&user_id).await;
        let outcome = handle
          .board
          .borrow_mut()
          .apply_fetch(ticket, result);
        match outcome {
          | FetchOutcome::Applied {
            count
          } => {
            tracing::info!(
              ticket = ticket.seq(),
              count,
              "applied task list"
            );
          }
          | FetchOutcome::Stale => {
            tracing::debug!(
              ticket = ticket.seq(),
              "dropped stale task list"
            );
          }
          | FetchOutcome::Failed(message) => {
            handle.notifier.error(format!(
              "Could not load tasks: \
               {message}"
            ));
          }
        }
        handle.redraw.force_update();
      }
    );
  }

  fn delete(
    &self,
    user_id: String,
    id: String
  ) {
    let Some(pending) = self
      .board
      .borrow_mut()
      .begin_delete(&id)
    else {
      tracing::warn!(id = %id, "delete requested for unknown task");
      return;
    };
    self.redraw.force_update();
    ui_debug("task.delete", &id);

    let handle = self.clone();
    wasm_bindgen_futures::spawn_local(
      async move {
        let title = pending.task.title;
        match api::delete_task(&user_id, &id)
          .await
        {
          | Ok(()) => {
            handle
              .board
              .borrow_mut()
              .confirm_delete(&id);
            handle.notifier.success(format!(
              "Deleted \"{title}\""
            ));
          }
          | Err(err) => {
            handle
              .board
              .borrow_mut()
              .rollback_delete(&id);
            handle.notifier.error(format!(
              "Could not delete \
               \"{title}\": {err}"
            ));
          }
        }
        handle.redraw.force_update();
      }
    );
  }
}

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
  let session = use_session();
  let notifier = use_notifier();
  let config = use_ui_config();
  let board = use_mut_ref(TaskBoard::new);
  let redraw = use_force_update();
  let query = use_state(String::new);
  let today = Local::now().date_naive();
  let month =
    use_state(|| first_of_month(today));
  let selected_day = use_state(|| today);

  let handle = BoardHandle {
    board,
    redraw,
    notifier: notifier.clone()
  };

  let signed_in_uid = session
    .state
    .user()
    .map(|user| user.uid.clone());
  {
    let handle = handle.clone();
    use_effect_with(
      signed_in_uid,
      move |uid| {
        match uid.clone() {
          | Some(uid) => {
            let ticket = handle
              .board
              .borrow_mut()
              .begin_fetch();
            handle.fetch(uid, ticket);
          }
          | None => {
            handle.board.borrow_mut().reset();
          }
        }
        || ()
      }
    );
  }

  let user = match dashboard_gate(
    &session.state
  ) {
    | DashboardGate::Wait => {
      return html! {
          <div class="auth-page"><div class="spinner"></div></div>
      };
    }
    | DashboardGate::Redirect(
      destination
    ) => {
      return html! {
          <Redirect<Route> to={Route::from(destination)} />
      };
    }
    | DashboardGate::Load(user) => {
      user.clone()
    }
  };

  let snapshot = handle.board.borrow().clone();
  let offset = *Local::now().offset();
  let visible =
    filter_by_title(snapshot.tasks(), &query);
  let stats = QuickStats::from_tasks(
    snapshot.tasks(),
    *selected_day,
    offset
  );
  let marked =
    days_with_tasks(snapshot.tasks(), offset);
  let load_error = match snapshot.phase() {
    | LoadPhase::Failed(message) => {
      Some(message.clone())
    }
    | _ => None
  };

  let on_add_open = {
    let handle = handle.clone();
    Callback::from(move |_| {
      ui_debug("task.add.open", "");
      handle.update(TaskBoard::open_add);
    })
  };

  let on_add_close = {
    let handle = handle.clone();
    let uid = user.uid.clone();
    Callback::from(move |()| {
      let ticket = handle
        .board
        .borrow_mut()
        .close_add();
      handle.fetch(uid.clone(), ticket);
    })
  };

  let on_select = {
    let handle = handle.clone();
    Callback::from(move |task: TaskDto| {
      ui_debug("task.select", &task.id);
      handle.update(|board| {
        board.select(task)
      });
    })
  };

  let on_detail_close = {
    let handle = handle.clone();
    Callback::from(move |()| {
      handle.update(
        TaskBoard::clear_selection
      );
    })
  };

  let on_delete = {
    let handle = handle.clone();
    let uid = user.uid.clone();
    Callback::from(move |id: String| {
      handle.delete(uid.clone(), id);
    })
  };

  let on_sign_out = {
    let handle = handle.clone();
    let session = session.clone();
    Callback::from(move |()| {
      ui_debug("auth.sign_out", "");
      let handle = handle.clone();
      let session = session.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          match api::sign_out().await {
            | Ok(()) => {
              handle.board.borrow_mut().reset();
              handle
                .notifier
                .info("Signed out");
              session.dispatch(
                SessionAction::SignedOut
              );
            }
            | Err(err) => {
              handle.notifier.error(format!(
                "Could not sign out: {err}"
              ));
            }
          }
        }
      );
    })
  };

  let on_shift_month = {
    let month = month.clone();
    Callback::from(move |delta: i32| {
      month.set(shift_month(*month, delta));
    })
  };

  let on_pick_day = {
    let selected_day =
      selected_day.clone();
    Callback::from(move |day: NaiveDate| {
      selected_day.set(day);
    })
  };

  html! {
      <div class="shell">
          <Sidebar
              app_name={config.app_name.clone()}
              user={user.clone()}
              on_sign_out={on_sign_out}
          />
          <div class="main">
              <div class="header">
                  <input
                      class="input search"
                      type="search"
                      placeholder="Search tasks"
                      value={(*query).clone()}
                      oninput={bind_input(&query)}
                  />
                  <button class="btn primary" onclick={on_add_open}>
                      { "Add Task" }
                  </button>
              </div>
              <div class="content grid">
                  <TaskList
                      tasks={visible}
                      total={snapshot.tasks().len()}
                      loading={snapshot.is_loading()}
                      error={load_error}
                      selected={snapshot.selected().map(|task| task.id.clone())}
                      on_select={on_select}
                  />
                  <div class="stack">
                      <Calendar
                          month={*month}
                          today={today}
                          selected={*selected_day}
                          marked={marked}
                          week_start={config.week_start_day()}
                          on_shift={on_shift_month}
                          on_pick={on_pick_day}
                      />
                      <QuickStatsPanel
                          stats={stats}
                          day={*selected_day}
                          is_today={*selected_day == today}
                      />
                  </div>
              </div>
          </div>
          if snapshot.is_add_open() {
              <TaskForm
                  user_id={user.uid.clone()}
                  title_max_len={config.title_max_len}
                  on_close={on_add_close}
              />
          }
          if let Some(task) = snapshot.selected().cloned() {
              <TaskModal
                  task={task}
                  on_close={on_detail_close}
                  on_delete={on_delete}
              />
          }
      </div>
  }
}
