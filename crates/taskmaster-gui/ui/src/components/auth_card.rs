use yew::{
  Html,
  Properties,
  function_component,
  html
};

use crate::app::use_ui_config;

#[derive(Properties, PartialEq)]
pub struct AuthCardProps {
  pub title:    String,
  #[prop_or_default]
  pub error:    Option<String>,
  #[prop_or_default]
  pub children: Html
}

#[function_component(AuthCard)]
pub fn auth_card(
  props: &AuthCardProps
) -> Html {
  let config = use_ui_config();

  html! {
      <div class="auth-page">
          <div class="auth-card panel">
              <div class="brand">{ config.app_name }</div>
              <div class="panel-title">{ &props.title }</div>
              if let Some(error) = props.error.clone() {
                  <div class="form-error">{ error }</div>
              }
              { props.children.clone() }
          </div>
      </div>
  }
}
