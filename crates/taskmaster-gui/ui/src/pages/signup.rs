use taskmaster_gui_shared::SignUpArgs;
use taskmaster_gui_shared::gate::{
  AuthPageGate,
  auth_page_gate
};
use taskmaster_gui_shared::validate::validate_sign_up_form;
use web_sys::SubmitEvent;
use yew::{
  Callback,
  Html,
  function_component,
  html,
  use_state
};
use yew_router::prelude::{
  Link,
  Redirect
};

use crate::api;
use crate::app::{
  Route,
  ui_debug,
  use_ui_config
};
use crate::components::{
  AuthCard,
  bind_input
};
use crate::session::{
  SessionAction,
  use_session
};
use crate::toast::use_notifier;

#[function_component(SignUpPage)]
pub fn sign_up_page() -> Html {
  let session = use_session();
  let notifier = use_notifier();
  let config = use_ui_config();
  let email = use_state(String::new);
  let display_name =
    use_state(String::new);
  let password = use_state(String::new);
  let confirm = use_state(String::new);
  let error = use_state(|| None::<String>);
  let busy = use_state(|| false);

  match auth_page_gate(&session.state) {
    | AuthPageGate::Wait => {
      return html! {
          <div class="auth-page"><div class="spinner"></div></div>
      };
    }
    | AuthPageGate::Redirect(destination) => {
      return html! {
          <Redirect<Route> to={Route::from(destination)} />
      };
    }
    | AuthPageGate::ShowForm => {}
  }

  let on_submit = {
    let session = session.clone();
    let email = email.clone();
    let display_name = display_name.clone();
    let password = password.clone();
    let confirm = confirm.clone();
    let error = error.clone();
    let busy = busy.clone();
    let min_password_len =
      config.min_password_len;
    Callback::from(move |e: SubmitEvent| {
      e.prevent_default();
      if *busy {
        return;
      }

      if let Err(message) =
        validate_sign_up_form(
          &email,
          &password,
          &confirm,
          min_password_len
        )
      {
        error.set(Some(message));
        return;
      }

      let name = display_name.trim();
      let args = SignUpArgs {
        email:        email
          .trim()
          .to_string(),
        password:     (*password).clone(),
        display_name: (!name.is_empty())
          .then(|| name.to_string())
      };

      ui_debug(
        "auth.sign_up.submit",
        &args.email
      );
      busy.set(true);
      error.set(None);

      let session = session.clone();
      let notifier = notifier.clone();
      let error = error.clone();
      let busy = busy.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          match api::sign_up(&args).await {
            | Ok(user) => {
              tracing::info!(uid = %user.uid, "account created");
              notifier.success(format!(
                "Welcome, {}",
                user.label()
              ));
              session.dispatch(
                SessionAction::SignedIn(
                  user
                )
              );
            }
            | Err(err) => {
              tracing::warn!(error = %err, "sign up failed");
              error.set(Some(err));
            }
          }
          busy.set(false);
        }
      );
    })
  };

  html! {
      <AuthCard title="Create account" error={(*error).clone()}>
          <form class="stack" onsubmit={on_submit}>
              <input
                  class="input"
                  type="email"
                  placeholder="Email"
                  autocomplete="email"
                  value={(*email).clone()}
                  oninput={bind_input(&email)}
              />
              <input
                  class="input"
                  type="text"
                  placeholder="Display name (optional)"
                  autocomplete="nickname"
                  value={(*display_name).clone()}
                  oninput={bind_input(&display_name)}
              />
              <input
                  class="input"
                  type="password"
                  placeholder={format!("Password (min {} characters)", config.min_password_len)}
                  autocomplete="new-password"
                  value={(*password).clone()}
                  oninput={bind_input(&password)}
              />
              <input
                  class="input"
                  type="password"
                  placeholder="Confirm password"
                  autocomplete="new-password"
                  value={(*confirm).clone()}
                  oninput={bind_input(&confirm)}
              />
              <button class="btn primary" type="submit" disabled={*busy}>
                  { if *busy { "Creating account..." } else { "Sign up" } }
              </button>
          </form>
          <div class="switch">
              { "Already registered? " }
              <Link<Route> to={Route::Login}>{ "Sign in" }</Link<Route>>
          </div>
      </AuthCard>
  }
}
