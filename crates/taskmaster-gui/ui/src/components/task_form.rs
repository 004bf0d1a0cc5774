use taskmaster_gui_shared::TaskCreate;
use taskmaster_gui_shared::validate::validate_task_title;
use web_sys::{
  Event,
  HtmlInputElement,
  SubmitEvent
};
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  function_component,
  html,
  use_state
};

use super::bind_input;
use crate::api;
use crate::app::ui_debug;
use crate::toast::use_notifier;

#[derive(Properties, PartialEq)]
pub struct TaskFormProps {
  pub user_id:       String,
  pub title_max_len: usize,
  /// Fired on cancel and after a
  /// successful create.
  pub on_close:      Callback<()>
}

#[function_component(TaskForm)]
pub fn task_form(
  props: &TaskFormProps
) -> Html {
  let notifier = use_notifier();
  let title = use_state(String::new);
  let completed = use_state(|| false);
  let error = use_state(|| None::<String>);
  let busy = use_state(|| false);

  let on_completed_change = {
    let completed = completed.clone();
    Callback::from(move |e: Event| {
      let input: HtmlInputElement =
        e.target_unchecked_into();
      completed.set(input.checked());
    })
  };

  let on_submit = {
    let title = title.clone();
    let completed = completed.clone();
    let error = error.clone();
    let busy = busy.clone();
    let user_id = props.user_id.clone();
    let max_len = props.title_max_len;
    let on_close = props.on_close.clone();
    Callback::from(move |e: SubmitEvent| {
      e.prevent_default();
      if *busy {
        return;
      }

      let valid_title =
        match validate_task_title(
          &title, max_len
        ) {
          | Ok(valid) => valid,
          | Err(message) => {
            error.set(Some(message));
            return;
          }
        };

      let create = TaskCreate {
        user_id:   user_id.clone(),
        title:     valid_title,
        completed: *completed
      };
      ui_debug(
        "task.add.submit",
        &create.title
      );
      busy.set(true);
      error.set(None);

      let notifier = notifier.clone();
      let error = error.clone();
      let busy = busy.clone();
      let on_close = on_close.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          match api::create_task(&create)
            .await
          {
            | Ok(task) => {
              tracing::info!(id = %task.id, "task created");
              notifier.success(format!(
                "Added \"{}\"",
                task.title
              ));
              on_close.emit(());
            }
            | Err(err) => {
              tracing::warn!(error = %err, "task create failed");
              error.set(Some(err));
              busy.set(false);
            }
          }
        }
      );
    })
  };

  let on_cancel = {
    let on_close = props.on_close.clone();
    move |_| {
      ui_debug("task.add.cancel", "");
      on_close.emit(())
    }
  };

  html! {
      <div class="modal-backdrop">
          <form class="modal stack" onsubmit={on_submit}>
              <div class="panel-title">{ "New Task" }</div>
              if let Some(message) = (*error).clone() {
                  <div class="form-error">{ message }</div>
              }
              <input
                  class="input"
                  type="text"
                  placeholder="What needs doing?"
                  maxlength={props.title_max_len.to_string()}
                  value={(*title).clone()}
                  oninput={bind_input(&title)}
              />
              <label class="kv">
                  <input
                      type="checkbox"
                      checked={*completed}
                      onchange={on_completed_change}
                  />
                  { "Already done" }
              </label>
              <div class="actions">
                  <button class="btn" type="button" onclick={on_cancel}>
                      { "Close" }
                  </button>
                  <button class="btn primary" type="submit" disabled={*busy}>
                      { if *busy { "Saving..." } else { "Add Task" } }
                  </button>
              </div>
          </form>
      </div>
  }
}
