use taskmaster_gui_shared::SignInArgs;
use taskmaster_gui_shared::gate::{
  AuthPageGate,
  auth_page_gate
};
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
  ui_debug
};
use crate::components::{
  AuthCard,
  bind_input
};
use crate::session::{
  SessionAction,
  use_session
};

#[function_component(LoginPage)]
pub fn login_page() -> Html {
  let session = use_session();
  let email = use_state(String::new);
  let password = use_state(String::new);
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
    let password = password.clone();
    let error = error.clone();
    let busy = busy.clone();
    Callback::from(move |e: SubmitEvent| {
      e.prevent_default();
      if *busy {
        return;
      }

      let args = SignInArgs {
        email:    email.trim().to_string(),
        password: (*password).clone()
      };
      if args.email.is_empty()
        || args.password.is_empty()
      {
        error.set(Some(
          "email and password are \
           required"
            .to_string()
        ));
        return;
      }

      ui_debug(
        "auth.sign_in.submit",
        &args.email
      );
      busy.set(true);
      error.set(None);

      let session = session.clone();
      let error = error.clone();
      let busy = busy.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          match api::sign_in(&args).await {
            | Ok(user) => {
              tracing::info!(uid = %user.uid, "signed in");
              session.dispatch(
                SessionAction::SignedIn(
                  user
                )
              );
            }
            | Err(err) => {
              tracing::warn!(error = %err, "sign in failed");
              error.set(Some(err));
            }
          }
          busy.set(false);
        }
      );
    })
  };

  html! {
      <AuthCard title="Sign in" error={(*error).clone()}>
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
                  type="password"
                  placeholder="Password"
                  autocomplete="current-password"
                  value={(*password).clone()}
                  oninput={bind_input(&password)}
              />
              <button class="btn primary" type="submit" disabled={*busy}>
                  { if *busy { "Signing in..." } else { "Sign in" } }
              </button>
          </form>
          <div class="switch">
              { "No account yet? " }
              <Link<Route> to={Route::SignUp}>{ "Create one" }</Link<Route>>
          </div>
      </AuthCard>
  }
}
