use gloo::console::log;
use taskmaster_gui_shared::gate::Destination;
use yew::prelude::ContextProvider;
use yew::{
  Html,
  function_component,
  hook,
  html,
  use_context,
  use_effect_with,
  use_state
};
use yew_router::prelude::{
  HashRouter,
  Redirect,
  Routable,
  Switch
};

use crate::api;
use crate::config::{
  UiConfig,
  load_ui_config
};
use crate::pages::{
  DashboardPage,
  LoginPage,
  SignUpPage
};
use crate::session::SessionProvider;
use crate::toast::ToastProvider;

#[derive(Clone, Debug, PartialEq, Routable)]
pub enum Route {
  #[at("/login")]
  Login,
  #[at("/signup")]
  SignUp,
  #[at("/dashboard")]
  Dashboard,
  #[at("/")]
  Home,
  #[not_found]
  #[at("/404")]
  NotFound
}

impl From<Destination> for Route {
  fn from(destination: Destination) -> Self {
    match destination {
      | Destination::Login => Self::Login,
      | Destination::Dashboard => {
        Self::Dashboard
      }
    }
  }
}

fn switch(route: Route) -> Html {
  match route {
    | Route::Login => {
      html! { <LoginPage /> }
    }
    | Route::SignUp => {
      html! { <SignUpPage /> }
    }
    | Route::Dashboard => {
      html! { <DashboardPage /> }
    }
    | Route::Home | Route::NotFound => {
      html! { <Redirect<Route> to={Route::Dashboard} /> }
    }
  }
}

#[function_component(App)]
pub fn app() -> Html {
  let config = use_state(load_ui_config);
  let toast_ms = config.toast_ms;

  {
    let config = config.clone();
    use_effect_with((), move |_| {
      wasm_bindgen_futures::spawn_local(
        async move {
          match api::fetch_limits().await {
            | Ok(limits) => {
              let mut next =
                (*config).clone();
              next.apply_limits(limits);
              config.set(next);
            }
            | Err(err) => {
              tracing::warn!(error = %err, "host limits unavailable; keeping defaults");
            }
          }
        }
      );
      || ()
    });
  }

  html! {
      <ContextProvider<UiConfig> context={(*config).clone()}>
          <ToastProvider toast_ms={toast_ms}>
              <SessionProvider>
                  <HashRouter>
                      <Switch<Route> render={switch} />
                  </HashRouter>
              </SessionProvider>
          </ToastProvider>
      </ContextProvider<UiConfig>>
  }
}

#[hook]
pub fn use_ui_config() -> UiConfig {
  use_context::<UiConfig>()
    .unwrap_or_default()
}

/// Logs a UI interaction locally and
/// forwards it to the host log.
pub fn ui_debug(
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  log!(format!(
    "[ui-debug] {event}: {detail}"
  ));

  let event = event.to_string();
  let detail = detail.to_string();
  wasm_bindgen_futures::spawn_local(
    async move {
      api::log_ui_event(&event, &detail)
        .await;
    }
  );
}
