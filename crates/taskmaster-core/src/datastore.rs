use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::account::{Account, Session};
use crate::task::Task;

/// Document store backing the app: one JSONL file per collection plus the
/// current session.
#[derive(Debug)]
pub struct DataStore {
    pub data_dir: PathBuf,
    pub tasks_path: PathBuf,
    pub accounts_path: PathBuf,
    pub session_path: PathBuf,
}

impl DataStore {
    #[tracing::instrument(skip(data_dir))]
    pub fn open(data_dir: &Path) -> anyhow::Result<Self> {
        let data_dir = data_dir.to_path_buf();
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("failed to create {}", data_dir.display()))?;

        let tasks_path = data_dir.join("tasks.data");
        let accounts_path = data_dir.join("accounts.data");
        let session_path = data_dir.join("session.data");

        for path in [&tasks_path, &accounts_path, &session_path] {
            if !path.exists() {
                fs::write(path, "")
                    .with_context(|| format!("failed to create {}", path.display()))?;
            }
        }

        info!(
            data_dir = %data_dir.display(),
            tasks = %tasks_path.display(),
            accounts = %accounts_path.display(),
            session = %session_path.display(),
            "opened datastore"
        );

        Ok(Self {
            data_dir,
            tasks_path,
            accounts_path,
            session_path,
        })
    }

    #[tracing::instrument(skip(self))]
    pub fn load_tasks(&self) -> anyhow::Result<Vec<Task>> {
        load_jsonl(&self.tasks_path).context("failed to load tasks.data")
    }

    #[tracing::instrument(skip(self, tasks))]
    pub fn save_tasks(&self, tasks: &[Task]) -> anyhow::Result<()> {
        save_jsonl_atomic(&self.tasks_path, tasks).context("failed to save tasks.data")
    }

    /// Tasks of one owner in insertion order.
    #[tracing::instrument(skip(self))]
    pub fn tasks_for_owner(&self, owner: &str) -> anyhow::Result<Vec<Task>> {
        let tasks: Vec<Task> = self
            .load_tasks()?
            .into_iter()
            .filter(|task| task.is_owned_by(owner))
            .collect();
        debug!(count = tasks.len(), "selected tasks for owner");
        Ok(tasks)
    }

    #[tracing::instrument(skip(self, task), fields(id = %task.id, owner = %task.owner))]
    pub fn add_task(&self, task: Task) -> anyhow::Result<()> {
        let mut tasks = self.load_tasks()?;
        if tasks.iter().any(|existing| existing.id == task.id) {
            return Err(anyhow!("task id already exists: {}", task.id));
        }
        tasks.push(task);
        self.save_tasks(&tasks)
    }

    /// Removes a task. Tasks of other owners are reported as missing.
    #[tracing::instrument(skip(self))]
    pub fn delete_task(&self, owner: &str, id: &str) -> anyhow::Result<Task> {
        let mut tasks = self.load_tasks()?;
        let idx = tasks
            .iter()
            .position(|task| task.id == id && task.is_owned_by(owner))
            .ok_or_else(|| anyhow!("task not found: {id}"))?;

        let removed = tasks.remove(idx);
        self.save_tasks(&tasks)?;
        info!(id = %removed.id, remaining = tasks.len(), "deleted task");
        Ok(removed)
    }

    #[tracing::instrument(skip(self))]
    pub fn load_accounts(&self) -> anyhow::Result<Vec<Account>> {
        load_jsonl(&self.accounts_path).context("failed to load accounts.data")
    }

    #[tracing::instrument(skip(self))]
    pub fn find_account_by_email(&self, email: &str) -> anyhow::Result<Option<Account>> {
        Ok(self
            .load_accounts()?
            .into_iter()
            .find(|account| account.email == email))
    }

    #[tracing::instrument(skip(self))]
    pub fn find_account(&self, uid: &str) -> anyhow::Result<Option<Account>> {
        Ok(self
            .load_accounts()?
            .into_iter()
            .find(|account| account.uid == uid))
    }

    #[tracing::instrument(skip(self, account), fields(uid = %account.uid))]
    pub fn insert_account(&self, account: Account) -> anyhow::Result<()> {
        let mut accounts = self.load_accounts()?;
        if accounts.iter().any(|existing| existing.email == account.email) {
            return Err(anyhow!("an account already exists for {}", account.email));
        }
        accounts.push(account);
        save_jsonl_atomic(&self.accounts_path, &accounts).context("failed to save accounts.data")
    }

    #[tracing::instrument(skip(self))]
    pub fn load_session(&self) -> anyhow::Result<Option<Session>> {
        let raw = fs::read_to_string(&self.session_path)
            .with_context(|| format!("failed reading {}", self.session_path.display()))?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let session: Session = serde_json::from_str(trimmed)
            .with_context(|| format!("failed parsing {}", self.session_path.display()))?;
        Ok(Some(session))
    }

    /// Persists the current session; `None` signs out.
    #[tracing::instrument(skip(self, session), fields(uid = ?session.map(|s| s.uid.as_str())))]
    pub fn save_session(&self, session: Option<&Session>) -> anyhow::Result<()> {
        let payload = match session {
            Some(session) => serde_json::to_string(session)?,
            None => String::new(),
        };

        let dir = self.session_path.parent().unwrap_or_else(|| Path::new("."));
        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(payload.as_bytes())?;
        temp.flush()?;
        temp.persist(&self.session_path).map_err(|err| {
            anyhow!("failed to persist {}: {}", self.session_path.display(), err)
        })?;
        Ok(())
    }
}

#[tracing::instrument(skip(path))]
fn load_jsonl<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    debug!(file = %path.display(), "loading jsonl");
    let file = fs::File::open(path)?;
    let reader = BufReader::new(file);

    let mut out = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let item: T = serde_json::from_str(trimmed)
            .with_context(|| format!("failed parsing {} line {}", path.display(), idx + 1))?;
        out.push(item);
    }

    debug!(count = out.len(), "loaded records from jsonl");
    Ok(out)
}

#[tracing::instrument(skip(path, items))]
fn save_jsonl_atomic<T: Serialize>(path: &Path, items: &[T]) -> anyhow::Result<()> {
    debug!(file = %path.display(), count = items.len(), "saving jsonl atomically");

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(dir)?;
    for item in items {
        let serialized = serde_json::to_string(item)?;
        writeln!(temp, "{serialized}")?;
    }
    temp.flush()?;

    temp.persist(path)
        .map_err(|err| anyhow!("failed to persist {}: {}", path.display(), err))?;

    Ok(())
}
