use anyhow::anyhow;
use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
  PasswordHash,
  PasswordHasher,
  PasswordVerifier,
  SaltString
};
use chrono::{
  DateTime,
  Utc
};
use serde::{
  Deserialize,
  Serialize
};
use uuid::Uuid;

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct Account {
  pub uid:           String,
  /// Stored lower-cased; unique.
  pub email:         String,
  #[serde(default)]
  pub display_name:  Option<String>,
  /// Argon2 PHC string
  pub password_hash: String,
  pub created:       DateTime<Utc>
}

impl Account {
  pub fn new(
    email: String,
    display_name: Option<String>,
    password_hash: String,
    now: DateTime<Utc>
  ) -> Self {
    Self {
      uid: Uuid::new_v4().to_string(),
      email,
      display_name,
      password_hash,
      created: now
    }
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct Session {
  pub token:   Uuid,
  pub uid:     String,
  pub started: DateTime<Utc>
}

impl Session {
  pub fn start(
    uid: &str,
    now: DateTime<Utc>
  ) -> Self {
    Self {
      token:   Uuid::new_v4(),
      uid:     uid.to_string(),
      started: now
    }
  }
}

pub fn hash_password(
  password: &str
) -> anyhow::Result<String> {
  let salt =
    SaltString::generate(&mut OsRng);
  let hash = Argon2::default()
    .hash_password(
      password.as_bytes(),
      &salt
    )
    .map_err(|err| {
      anyhow!(
        "failed to hash password: {err}"
      )
    })?;
  Ok(hash.to_string())
}

pub fn verify_password(
  password: &str,
  stored_hash: &str
) -> anyhow::Result<bool> {
  let parsed =
    PasswordHash::new(stored_hash)
      .map_err(|err| {
        anyhow!(
          "stored password hash is \
           invalid: {err}"
        )
      })?;
  Ok(
    Argon2::default()
      .verify_password(
        password.as_bytes(),
        &parsed
      )
      .is_ok()
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hash_verifies_only_the_same_password() {
    let hash = hash_password(
      "correct horse"
    )
    .expect("hash");
    assert!(hash.starts_with("$argon2"));
    assert!(
      verify_password(
        "correct horse",
        &hash
      )
      .expect("verify")
    );
    assert!(
      !verify_password(
        "battery staple",
        &hash
      )
      .expect("verify")
    );
  }

  #[test]
  fn garbage_hash_is_an_error() {
    assert!(
      verify_password("pw", "not-a-hash")
        .is_err()
    );
  }
}
