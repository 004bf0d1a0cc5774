//! Session context shared by every page.
//!
//! The provider asks the host for the
//! current user once on mount; sign-in,
//! sign-up and sign-out dispatch the new
//! state explicitly. Pages read it with
//! [`use_session`].

use std::rc::Rc;

use taskmaster_gui_shared::UserDto;
use taskmaster_gui_shared::gate::SessionState;
use yew::prelude::ContextProvider;
use yew::{
  Html,
  Properties,
  Reducible,
  UseReducerHandle,
  function_component,
  hook,
  html,
  use_context,
  use_effect_with,
  use_reducer
};

use crate::api;
use crate::toast::use_notifier;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionStore {
  pub state: SessionState
}

pub enum SessionAction {
  Resolved(Option<UserDto>),
  SignedIn(UserDto),
  SignedOut
}

impl Reducible for SessionStore {
  type Action = SessionAction;

  fn reduce(
    self: Rc<Self>,
    action: Self::Action
  ) -> Rc<Self> {
    let state = match action {
      | SessionAction::Resolved(user) => {
        SessionState::from_current(user)
      }
      | SessionAction::SignedIn(user) => {
        SessionState::SignedIn(user)
      }
      | SessionAction::SignedOut => {
        SessionState::SignedOut
      }
    };
    tracing::debug!(?state, "session state changed");
    Rc::new(Self { state })
  }
}

pub type SessionContext =
  UseReducerHandle<SessionStore>;

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
  #[prop_or_default]
  pub children: Html
}

#[function_component(SessionProvider)]
pub fn session_provider(
  props: &SessionProviderProps
) -> Html {
  let session =
    use_reducer(SessionStore::default);
  let notifier = use_notifier();

  {
    let session = session.clone();
    use_effect_with((), move |_| {
      wasm_bindgen_futures::spawn_local(
        async move {
          match api::current_user().await
          {
            | Ok(user) => {
              tracing::info!(
                signed_in = user.is_some(),
                "session listener resolved"
              );
              session.dispatch(
                SessionAction::Resolved(
                  user
                )
              );
            }
            | Err(err) => {
              notifier.error(format!(
                "Could not restore your \
                 session: {err}"
              ));
              session.dispatch(
                SessionAction::Resolved(
                  None
                )
              );
            }
          }
        }
      );
      || ()
    });
  }

  html! {
      <ContextProvider<SessionContext> context={session}>
          { props.children.clone() }
      </ContextProvider<SessionContext>>
  }
}

#[hook]
pub fn use_session() -> SessionContext {
  use_context::<SessionContext>()
    .expect(
      "use_session called outside \
       SessionProvider"
    )
}
