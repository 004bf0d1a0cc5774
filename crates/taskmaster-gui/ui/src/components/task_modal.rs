use chrono::{
  DateTime,
  Local
};
use taskmaster_gui_shared::TaskDto;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskModalProps {
  pub task:      TaskDto,
  pub on_close:  Callback<()>,
  pub on_delete: Callback<String>
}

fn format_created(raw: &str) -> String {
  DateTime::parse_from_rfc3339(raw)
    .map(|stamp| {
      stamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
    })
    .unwrap_or_else(|_| raw.to_string())
}

#[function_component(TaskModal)]
pub fn task_modal(
  props: &TaskModalProps
) -> Html {
  let task = &props.task;
  let on_close = {
    let on_close = props.on_close.clone();
    move |_| on_close.emit(())
  };
  let on_delete = {
    let on_delete =
      props.on_delete.clone();
    let id = task.id.clone();
    move |_| on_delete.emit(id.clone())
  };
  let status = if task.completed {
    "Completed"
  } else {
    "Open"
  };
  let created = task
    .created
    .as_deref()
    .map(format_created)
    .unwrap_or_else(|| "-".to_string());

  html! {
      <div class="modal-backdrop">
          <div class="modal stack">
              <div class="panel-title">{ &task.title }</div>
              <div class="kv"><span>{ "Status" }</span><strong>{ status }</strong></div>
              <div class="kv"><span>{ "Created" }</span><strong>{ created }</strong></div>
              <div class="actions">
                  <button class="btn" onclick={on_close}>{ "Close" }</button>
                  <button class="btn danger" onclick={on_delete}>{ "Delete" }</button>
              </div>
          </div>
      </div>
  }
}
