//! Session-driven page routing
//! decisions.

use crate::UserDto;

pub const LOGIN_PATH: &str = "/login";
pub const SIGNUP_PATH: &str = "/signup";
pub const DASHBOARD_PATH: &str =
  "/dashboard";

#[derive(
  Debug, Clone, PartialEq, Eq, Default,
)]
pub enum SessionState {
  /// The session listener has not
  /// answered yet.
  #[default]
  Resolving,
  SignedOut,
  SignedIn(UserDto)
}

impl SessionState {
  pub fn from_current(
    user: Option<UserDto>
  ) -> Self {
    match user {
      | Some(user) => Self::SignedIn(user),
      | None => Self::SignedOut
    }
  }

  pub fn user(&self) -> Option<&UserDto> {
    match self {
      | Self::SignedIn(user) => Some(user),
      | _ => None
    }
  }

  pub fn is_resolving(&self) -> bool {
    matches!(self, Self::Resolving)
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Destination {
  Login,
  Dashboard
}

impl Destination {
  pub fn path(self) -> &'static str {
    match self {
      | Self::Login => LOGIN_PATH,
      | Self::Dashboard => DASHBOARD_PATH
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardGate<'a> {
  Wait,
  Redirect(Destination),
  Load(&'a UserDto)
}

/// Signed-out visitors are sent to the
/// login page before anything is
/// fetched.
pub fn dashboard_gate(
  state: &SessionState
) -> DashboardGate<'_> {
  match state {
    | SessionState::Resolving => {
      DashboardGate::Wait
    }
    | SessionState::SignedOut => {
      DashboardGate::Redirect(
        Destination::Login
      )
    }
    | SessionState::SignedIn(user) => {
      DashboardGate::Load(user)
    }
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum AuthPageGate {
  Wait,
  Redirect(Destination),
  ShowForm
}

pub fn auth_page_gate(
  state: &SessionState
) -> AuthPageGate {
  match state {
    | SessionState::Resolving => {
      AuthPageGate::Wait
    }
    | SessionState::SignedOut => {
      AuthPageGate::ShowForm
    }
    | SessionState::SignedIn(_) => {
      AuthPageGate::Redirect(
        Destination::Dashboard
      )
    }
  }
}
