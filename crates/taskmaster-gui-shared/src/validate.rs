/// Trims the title and enforces the
/// required/length rules shared by the
/// task form and the host.
pub fn validate_task_title(
  raw: &str,
  max_len: usize
) -> Result<String, String> {
  let title = raw.trim();
  if title.is_empty() {
    return Err(
      "title is required".to_string()
    );
  }

  let len = title.chars().count();
  if len > max_len {
    return Err(format!(
      "title is too long ({len} > \
       {max_len} characters)"
    ));
  }

  Ok(title.to_string())
}

pub fn validate_sign_up_form(
  email: &str,
  password: &str,
  confirm: &str,
  min_password_len: usize
) -> Result<(), String> {
  if email.trim().is_empty() {
    return Err(
      "email is required".to_string()
    );
  }

  if password.chars().count()
    < min_password_len
  {
    return Err(format!(
      "password must be at least \
       {min_password_len} characters"
    ));
  }

  if password != confirm {
    return Err(
      "passwords do not match"
        .to_string()
    );
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn title_is_trimmed_and_required() {
    assert_eq!(
      validate_task_title(
        "  Buy milk ",
        200
      ),
      Ok("Buy milk".to_string())
    );
    assert_eq!(
      validate_task_title("   ", 200),
      Err("title is required".to_string())
    );
  }

  #[test]
  fn title_length_counts_characters() {
    assert!(
      validate_task_title("ééé", 3).is_ok()
    );
    let err =
      validate_task_title("abcd", 3)
        .expect_err("too long");
    assert!(err.contains("too long"));
  }

  #[test]
  fn sign_up_form_checks_each_rule() {
    assert!(
      validate_sign_up_form(
        "a@b.io",
        "longenough",
        "longenough",
        8
      )
      .is_ok()
    );
    assert_eq!(
      validate_sign_up_form(
        " ", "longenough", "longenough", 8
      ),
      Err("email is required".to_string())
    );
    assert!(
      validate_sign_up_form(
        "a@b.io", "short", "short", 8
      )
      .is_err()
    );
    assert_eq!(
      validate_sign_up_form(
        "a@b.io",
        "longenough",
        "different",
        8
      ),
      Err(
        "passwords do not match"
          .to_string()
      )
    );
  }
}
