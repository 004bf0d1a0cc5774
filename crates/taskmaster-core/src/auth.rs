//! Account registration, sign-in and the
//! persisted session.

use std::sync::LazyLock;

use anyhow::{
  Context,
  anyhow,
  bail
};
use chrono::{
  DateTime,
  Utc
};
use regex::Regex;
use tracing::{
  info,
  warn
};

use crate::account::{
  Account,
  Session,
  hash_password,
  verify_password
};
use crate::config::Config;
use crate::datastore::DataStore;

static EMAIL_RE: LazyLock<Regex> =
  LazyLock::new(|| {
    Regex::new(
      r"^[^@\s]+@[^@\s]+\.[^@\s]+$"
    )
    .expect("email pattern compiles")
  });

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthPolicy {
  pub min_password_len: usize
}

impl AuthPolicy {
  pub fn from_config(
    cfg: &Config
  ) -> Self {
    Self {
      min_password_len: cfg
        .min_password_len()
    }
  }
}

pub fn normalize_email(
  raw: &str
) -> anyhow::Result<String> {
  let email = raw.trim().to_lowercase();
  if !EMAIL_RE.is_match(&email) {
    bail!(
      "invalid email address: {}",
      raw.trim()
    );
  }
  Ok(email)
}

/// Validates the sign-up fields and
/// hashes the password. Touches no
/// store, so callers can run it without
/// holding their store lock.
#[tracing::instrument(skip(
  policy, password, now
))]
pub fn new_account(
  policy: &AuthPolicy,
  email: &str,
  password: &str,
  display_name: Option<String>,
  now: DateTime<Utc>
) -> anyhow::Result<Account> {
  let email = normalize_email(email)?;
  if password.chars().count()
    < policy.min_password_len
  {
    bail!(
      "password must be at least {} \
       characters",
      policy.min_password_len
    );
  }

  let display_name = display_name
    .map(|name| name.trim().to_string())
    .filter(|name| !name.is_empty());
  Ok(Account::new(
    email,
    display_name,
    hash_password(password)?,
    now
  ))
}

/// Stores a prepared account and signs it
/// in. The email must still be free.
#[tracing::instrument(skip(
  store, account, now
), fields(email = %account.email))]
pub fn register(
  store: &DataStore,
  account: Account,
  now: DateTime<Utc>
) -> anyhow::Result<(Account, Session)> {
  if store
    .find_account_by_email(&account.email)?
    .is_some()
  {
    bail!(
      "an account already exists for \
       {}",
      account.email
    );
  }

  store
    .insert_account(account.clone())
    .context("failed to register account")?;
  let session =
    start_session(store, &account, now)?;

  info!(uid = %account.uid, "account registered");
  Ok((account, session))
}

/// Registers an account and signs it in.
pub fn sign_up(
  store: &DataStore,
  policy: &AuthPolicy,
  email: &str,
  password: &str,
  display_name: Option<String>,
  now: DateTime<Utc>
) -> anyhow::Result<(Account, Session)> {
  let account = new_account(
    policy,
    email,
    password,
    display_name,
    now
  )?;
  register(store, account, now)
}

fn invalid_credentials() -> anyhow::Error {
  anyhow!("invalid email or password")
}

/// Account for a sign-in attempt. Every
/// failure reads the same.
pub fn find_for_sign_in(
  store: &DataStore,
  email: &str
) -> anyhow::Result<Account> {
  let email = normalize_email(email)
    .map_err(|_| invalid_credentials())?;
  store
    .find_account_by_email(&email)?
    .ok_or_else(invalid_credentials)
}

pub fn check_password(
  account: &Account,
  password: &str
) -> anyhow::Result<()> {
  if !verify_password(
    password,
    &account.password_hash
  )? {
    warn!(uid = %account.uid, "password mismatch");
    return Err(invalid_credentials());
  }
  Ok(())
}

pub fn start_session(
  store: &DataStore,
  account: &Account,
  now: DateTime<Utc>
) -> anyhow::Result<Session> {
  let session =
    Session::start(&account.uid, now);
  store.save_session(Some(&session))?;
  Ok(session)
}

#[tracing::instrument(skip(
  store, password, now
))]
pub fn sign_in(
  store: &DataStore,
  email: &str,
  password: &str,
  now: DateTime<Utc>
) -> anyhow::Result<(Account, Session)> {
  let account =
    find_for_sign_in(store, email)?;
  check_password(&account, password)?;
  let session =
    start_session(store, &account, now)?;

  info!(uid = %account.uid, "signed in");
  Ok((account, session))
}

#[tracing::instrument(skip(store))]
pub fn sign_out(
  store: &DataStore
) -> anyhow::Result<()> {
  store.save_session(None)?;
  info!("signed out");
  Ok(())
}

/// Account behind the persisted session.
/// A session pointing at a vanished
/// account is discarded.
#[tracing::instrument(skip(store))]
pub fn current_account(
  store: &DataStore
) -> anyhow::Result<Option<Account>> {
  let Some(session) =
    store.load_session()?
  else {
    return Ok(None);
  };

  match store.find_account(&session.uid)? {
    | Some(account) => Ok(Some(account)),
    | None => {
      warn!(uid = %session.uid, "session refers to unknown account; clearing");
      store.save_session(None)?;
      Ok(None)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn email_is_normalized() {
    assert_eq!(
      normalize_email(
        "  Ada@Example.COM "
      )
      .expect("valid"),
      "ada@example.com"
    );
    assert!(
      normalize_email("not-an-email")
        .is_err()
    );
    assert!(
      normalize_email("a b@c.io").is_err()
    );
  }

  #[test]
  fn new_account_hashes_without_a_store() {
    let policy = AuthPolicy {
      min_password_len: 8
    };
    let account = new_account(
      &policy,
      "Grace@Example.com",
      "compiler1",
      Some("  ".to_string()),
      Utc::now()
    )
    .expect("prepare account");
    assert_eq!(
      account.email,
      "grace@example.com"
    );
    assert_eq!(account.display_name, None);
    assert_ne!(
      account.password_hash,
      "compiler1"
    );
    check_password(&account, "compiler1")
      .expect("password matches");
    let err =
      check_password(&account, "compiler2")
        .expect_err("wrong password");
    assert_eq!(
      err.to_string(),
      "invalid email or password"
    );

    assert!(
      new_account(
        &policy,
        "grace@example.com",
        "short",
        None,
        Utc::now()
      )
      .is_err()
    );
  }
}
