use std::collections::HashMap;
use std::fs;
use std::path::{
  Path,
  PathBuf
};

use anyhow::{
  Context,
  anyhow
};
use tracing::{
  debug,
  info,
  trace,
  warn
};

pub const DATA_LOCATION_KEY: &str =
  "data.location";
pub const MIN_PASSWORD_LEN_KEY: &str =
  "auth.min_password_len";
pub const TITLE_MAX_LEN_KEY: &str =
  "task.title_max_len";

pub const DEFAULT_MIN_PASSWORD_LEN:
  usize = 8;
pub const DEFAULT_TITLE_MAX_LEN: usize =
  200;

/// `key = value` settings read from a
/// taskmasterrc file.
#[derive(Debug, Clone)]
pub struct Config {
  map:              HashMap<String, String>,
  pub loaded_files: Vec<PathBuf>
}

impl Default for Config {
  fn default() -> Self {
    let mut map = HashMap::new();
    map.insert(
      MIN_PASSWORD_LEN_KEY.to_string(),
      DEFAULT_MIN_PASSWORD_LEN
        .to_string()
    );
    map.insert(
      TITLE_MAX_LEN_KEY.to_string(),
      DEFAULT_TITLE_MAX_LEN.to_string()
    );

    Self {
      map,
      loaded_files: vec![]
    }
  }
}

impl Config {
  #[tracing::instrument(skip(
    rc_override
  ))]
  pub fn load(
    rc_override: Option<&Path>
  ) -> anyhow::Result<Self> {
    let mut cfg = Config::default();

    let rc = resolve_rc_path(rc_override)?;
    if let Some(path) = rc {
      info!(rc = %path.display(), "loading taskmasterrc");
      cfg.load_file(&path)?;
    } else {
      warn!(
        "no taskmasterrc found; using \
         defaults"
      );
    }

    Ok(cfg)
  }

  pub fn set(
    &mut self,
    key: &str,
    value: &str
  ) {
    debug!(key, value, "setting config key");
    self
      .map
      .insert(key.to_string(), value.to_string());
  }

  pub fn get(
    &self,
    key: &str
  ) -> Option<String> {
    self.map.get(key).cloned()
  }

  /// Positive integer setting; malformed
  /// values fall back to `default`.
  pub fn get_usize(
    &self,
    key: &str,
    default: usize
  ) -> usize {
    match self.map.get(key) {
      | Some(raw) => {
        match raw.trim().parse::<usize>()
        {
          | Ok(value) if value > 0 => value,
          | _ => {
            warn!(key, value = %raw, "invalid numeric config value; using default");
            default
          }
        }
      }
      | None => default
    }
  }

  pub fn min_password_len(&self) -> usize {
    self.get_usize(
      MIN_PASSWORD_LEN_KEY,
      DEFAULT_MIN_PASSWORD_LEN
    )
  }

  pub fn title_max_len(&self) -> usize {
    self.get_usize(
      TITLE_MAX_LEN_KEY,
      DEFAULT_TITLE_MAX_LEN
    )
  }

  /// Loads `path` and its includes. A file
  /// already loaded in this chain is
  /// skipped, so include cycles terminate.
  #[tracing::instrument(skip(self))]
  pub fn load_file(
    &mut self,
    path: &Path
  ) -> anyhow::Result<()> {
    let path = expand_tilde(path);
    let canonical = fs::canonicalize(&path)
      .with_context(|| {
        format!(
          "failed to resolve {}",
          path.display()
        )
      })?;
    if self.loaded_files.contains(&canonical)
    {
      warn!(file = %canonical.display(), "config file already loaded; skipping include cycle");
      return Ok(());
    }

    let text =
      fs::read_to_string(&canonical)
        .with_context(|| {
          format!(
            "failed to read {}",
            path.display()
          )
        })?;

    self
      .loaded_files
      .push(canonical.clone());

    let base_dir = canonical
      .parent()
      .map(|p| p.to_path_buf())
      .unwrap_or_else(|| {
        PathBuf::from(".")
      });

    for (line_num, raw_line) in
      text.lines().enumerate()
    {
      let mut line = raw_line.trim();
      if let Some((before, _)) =
        line.split_once('#')
      {
        line = before.trim();
      }

      if line.is_empty() {
        continue;
      }

      if let Some(include_rest) =
        line.strip_prefix("include ")
      {
        let include_path =
          resolve_include_path(
            &base_dir,
            include_rest.trim()
          )?;
        debug!(
            file = %path.display(),
            include = %include_path.display(),
            line = line_num + 1,
            "processing include"
        );

        if include_path.exists() {
          self
            .load_file(&include_path)?;
        } else {
          warn!(include = %include_path.display(), "include file does not exist; skipping");
        }
        continue;
      }

      let (k, v) = line
        .split_once('=')
        .ok_or_else(|| {
          anyhow!(
            "invalid config line \
             {}:{}: {}",
            path.display(),
            line_num + 1,
            raw_line
          )
        })?;

      let key = k.trim().to_string();
      let value = v.trim().to_string();
      trace!(key = %key, value = %value, "loaded config key");
      self.map.insert(key, value);
    }

    Ok(())
  }
}

/// Data directory: explicit override,
/// then `data.location`, then
/// `~/.taskmaster`. Created on demand.
#[tracing::instrument(skip(
  cfg,
  override_dir
))]
pub fn resolve_data_dir(
  cfg: &Config,
  override_dir: Option<&Path>
) -> anyhow::Result<PathBuf> {
  let dir = if let Some(path) =
    override_dir
  {
    path.to_path_buf()
  } else if let Some(cfg_value) =
    cfg.get(DATA_LOCATION_KEY)
  {
    expand_tilde(Path::new(&cfg_value))
  } else {
    default_data_dir()?
  };

  if !dir.exists() {
    info!(dir = %dir.display(), "creating data directory");
    fs::create_dir_all(&dir)
      .with_context(|| {
        format!(
          "failed to create {}",
          dir.display()
        )
      })?;
  }

  Ok(dir)
}

#[tracing::instrument(skip(
  override_path
))]
fn resolve_rc_path(
  override_path: Option<&Path>
) -> anyhow::Result<Option<PathBuf>> {
  if let Some(path) = override_path {
    return Ok(Some(path.to_path_buf()));
  }

  if let Ok(rc_env) =
    std::env::var("TASKMASTERRC")
  {
    if rc_env == "/dev/null" {
      return Ok(None);
    }
    return Ok(Some(PathBuf::from(
      rc_env
    )));
  }

  let Some(home) = dirs::home_dir()
  else {
    warn!(
      "cannot determine home \
       directory; skipping \
       taskmasterrc lookup"
    );
    return Ok(None);
  };
  let candidate =
    home.join(".taskmasterrc");
  if candidate.exists() {
    return Ok(Some(candidate));
  }

  Ok(None)
}

fn default_data_dir()
-> anyhow::Result<PathBuf> {
  let home = dirs::home_dir()
    .ok_or_else(|| {
      anyhow!(
        "cannot determine home \
         directory"
      )
    })?;
  Ok(home.join(".taskmaster"))
}

fn resolve_include_path(
  base_dir: &Path,
  include: &str
) -> anyhow::Result<PathBuf> {
  if include.trim().is_empty() {
    return Err(anyhow!(
      "include path cannot be empty"
    ));
  }

  let expanded =
    expand_tilde(Path::new(include));
  if expanded.is_absolute() {
    Ok(expanded)
  } else {
    Ok(base_dir.join(expanded))
  }
}

fn expand_tilde(
  path: &Path
) -> PathBuf {
  let text = path.to_string_lossy();
  if let Some(rest) =
    text.strip_prefix("~/")
    && let Some(home) = dirs::home_dir()
  {
    return home.join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::tempdir;

  use super::*;

  #[test]
  fn defaults_apply_without_rc_file() {
    let cfg = Config::default();
    assert_eq!(
      cfg.min_password_len(),
      DEFAULT_MIN_PASSWORD_LEN
    );
    assert_eq!(
      cfg.title_max_len(),
      DEFAULT_TITLE_MAX_LEN
    );
    assert_eq!(
      cfg.get(DATA_LOCATION_KEY),
      None
    );
  }

  #[test]
  fn rc_file_with_include_and_comments() {
    let dir = tempdir().expect("tempdir");
    let extra = dir.path().join("extra.rc");
    fs::write(
      &extra,
      "task.title_max_len = 80\n"
    )
    .expect("write include");

    let main = dir.path().join("main.rc");
    fs::write(
      &main,
      "# taskmaster settings\n\
       auth.min_password_len = 12 # strict\n\
       \n\
       include extra.rc\n\
       include missing.rc\n"
    )
    .expect("write rc");

    let cfg = Config::load(Some(&main))
      .expect("load rc");
    assert_eq!(cfg.min_password_len(), 12);
    assert_eq!(cfg.title_max_len(), 80);
    assert_eq!(cfg.loaded_files.len(), 2);
  }

  #[test]
  fn malformed_line_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let rc = dir.path().join("bad.rc");
    fs::write(&rc, "no equals sign\n")
      .expect("write rc");

    let err = Config::load(Some(&rc))
      .expect_err("bad line");
    assert!(
      err
        .to_string()
        .contains("invalid config line")
    );
  }

  #[test]
  fn invalid_numbers_fall_back() {
    let mut cfg = Config::default();
    cfg.set(TITLE_MAX_LEN_KEY, "zero");
    assert_eq!(
      cfg.title_max_len(),
      DEFAULT_TITLE_MAX_LEN
    );
    cfg.set(MIN_PASSWORD_LEN_KEY, "0");
    assert_eq!(
      cfg.min_password_len(),
      DEFAULT_MIN_PASSWORD_LEN
    );
  }

  #[test]
  fn self_include_is_loaded_once() {
    let dir = tempdir().expect("tempdir");
    let rc = dir.path().join("self.rc");
    fs::write(
      &rc,
      "task.title_max_len = 90\n\
       include self.rc\n"
    )
    .expect("write rc");

    let cfg = Config::load(Some(&rc))
      .expect("load self-including rc");
    assert_eq!(cfg.title_max_len(), 90);
    assert_eq!(cfg.loaded_files.len(), 1);
  }

  #[test]
  fn include_chain_cycle_terminates() {
    let dir = tempdir().expect("tempdir");
    let first = dir.path().join("a.rc");
    let second = dir.path().join("b.rc");
    fs::write(
      &first,
      "auth.min_password_len = 10\n\
       include b.rc\n"
    )
    .expect("write a.rc");
    fs::write(
      &second,
      "task.title_max_len = 70\n\
       include ./a.rc\n"
    )
    .expect("write b.rc");

    let cfg = Config::load(Some(&first))
      .expect("load cyclic includes");
    assert_eq!(cfg.min_password_len(), 10);
    assert_eq!(cfg.title_max_len(), 70);
    assert_eq!(cfg.loaded_files.len(), 2);
  }

  #[test]
  fn data_location_key_sets_data_dir() {
    let dir = tempdir().expect("tempdir");
    let target = dir.path().join("from-rc");
    let mut cfg = Config::default();
    cfg.set(
      DATA_LOCATION_KEY,
      &target.to_string_lossy()
    );

    let resolved =
      resolve_data_dir(&cfg, None)
        .expect("resolve data dir");
    assert_eq!(resolved, target);
    assert!(target.is_dir());
  }

  #[test]
  fn data_dir_override_is_created() {
    let dir = tempdir().expect("tempdir");
    let target = dir.path().join("nested");
    let resolved = resolve_data_dir(
      &Config::default(),
      Some(&target)
    )
    .expect("resolve data dir");
    assert_eq!(resolved, target);
    assert!(target.is_dir());
  }
}
