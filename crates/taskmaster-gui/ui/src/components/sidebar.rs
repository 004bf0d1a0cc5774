use taskmaster_gui_shared::UserDto;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct SidebarProps {
  pub app_name:    String,
  pub user:        UserDto,
  pub on_sign_out: Callback<()>
}

#[function_component(Sidebar)]
pub fn sidebar(
  props: &SidebarProps
) -> Html {
  let on_sign_out =
    props.on_sign_out.clone();

  html! {
      <div class="panel sidebar">
          <div class="brand">{ &props.app_name }</div>
          <div class="item active">{ "Dashboard" }</div>
          <div class="user">
              <div class="kv">
                  <strong>{ props.user.label() }</strong>
                  <span>{ &props.user.email }</span>
              </div>
              <button class="btn" onclick={move |_| on_sign_out.emit(())}>
                  { "Sign out" }
              </button>
          </div>
      </div>
  }
}
