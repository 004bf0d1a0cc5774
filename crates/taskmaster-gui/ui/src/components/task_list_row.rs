use taskmaster_gui_shared::TaskDto;
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskListRowProps {
  pub task:      TaskDto,
  pub selected:  bool,
  pub on_select: Callback<TaskDto>
}

#[function_component(TaskListRow)]
pub fn task_list_row(
  props: &TaskListRowProps
) -> Html {
  let class = classes!(
    "task-row",
    props.task.completed.then_some("done"),
    props.selected.then_some("selected")
  );
  let on_select = {
    let on_select =
      props.on_select.clone();
    let task = props.task.clone();
    move |_| on_select.emit(task.clone())
  };

  // Completion is fixed at creation.
  html! {
      <div class={class} onclick={on_select}>
          <input
              type="checkbox"
              checked={props.task.completed}
              disabled=true
          />
          <span class="title">{ &props.task.title }</span>
      </div>
  }
}
