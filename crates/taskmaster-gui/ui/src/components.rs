mod auth_card;
mod calendar;
mod quick_stats;
mod sidebar;
mod task_form;
mod task_list;
mod task_list_row;
mod task_modal;

pub use auth_card::AuthCard;
pub use calendar::Calendar;
pub use quick_stats::QuickStatsPanel;
pub use sidebar::Sidebar;
pub use task_form::TaskForm;
pub use task_list::TaskList;
use task_list_row::TaskListRow;
pub use task_modal::TaskModal;
use web_sys::{
  HtmlInputElement,
  InputEvent
};
use yew::{
  Callback,
  TargetCast,
  UseStateHandle
};

/// Mirrors a text input into `state`.
pub fn bind_input(
  state: &UseStateHandle<String>
) -> Callback<InputEvent> {
  let state = state.clone();
  Callback::from(move |e: InputEvent| {
    let input: HtmlInputElement =
      e.target_unchecked_into();
    state.set(input.value());
  })
}
