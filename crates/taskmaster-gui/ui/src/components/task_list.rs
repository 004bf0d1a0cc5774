use taskmaster_gui_shared::TaskDto;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::TaskListRow;

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
  pub tasks:     Vec<TaskDto>,
  /// Size of the unfiltered list.
  pub total:     usize,
  pub loading:   bool,
  #[prop_or_default]
  pub error:     Option<String>,
  pub selected:  Option<String>,
  pub on_select: Callback<TaskDto>
}

#[function_component(TaskList)]
pub fn task_list(
  props: &TaskListProps
) -> Html {
  let empty_message = if props.loading
    && props.total == 0
  {
    Some("Loading tasks...")
  } else if props.total == 0 {
    Some("No tasks yet. Add one to get started.")
  } else if props.tasks.is_empty() {
    Some("No tasks match your search.")
  } else {
    None
  };

  html! {
      <div class="panel list">
          <div class="panel-title">
              { "Tasks" }
              if props.loading {
                  <span class="spinner"></span>
              }
          </div>
          if let Some(error) = props.error.clone() {
              <div class="form-error">{ error }</div>
          }
          if let Some(message) = empty_message {
              <div class="empty">{ message }</div>
          }
          {
              for props.tasks.iter().map(|task| html! {
                  <TaskListRow
                      key={task.id.clone()}
                      task={task.clone()}
                      selected={props.selected.as_deref() == Some(task.id.as_str())}
                      on_select={props.on_select.clone()}
                  />
              })
          }
      </div>
  }
}
