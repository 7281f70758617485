use std::path::PathBuf;

use anyhow::{anyhow, Result};
use diffy::{DiffOptions, PatchFormatter};
use serde::{Deserialize, Serialize};

use crate::dispatcher::dispatch;
use crate::document::{CursorPosition, Document};
use crate::error::SnippetError;
use crate::host::{BufferHost, InsertionTarget};
use crate::session::SessionStore;
use crate::snippets::Operation;

// MCP gives no way to tell conversations apart, so every tool call uses the default session.
// The store is still keyed by session id so that an embedding host can keep several apart.

/// Session data for snippet insertion
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SnippetSessionData {
    /// Directory that relative paths are resolved against
    pub context_path: Option<PathBuf>,
    /// The document commands insert into
    pub active_document: Option<ActiveDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActiveDocument {
    pub path: PathBuf,
    /// Character offset
    pub cursor: usize,
}

type CommitFn = Box<dyn Fn(PathBuf, String) + 'static>;

/// Tool state: the MCP client acts as the editor, this struct remembers what it has open
#[derive(fieldwork::Fieldwork)]
pub struct SnippetTools {
    #[fieldwork(get)]
    session_store: SessionStore<SnippetSessionData>,
    commit_fn: Option<CommitFn>,
    #[fieldwork(get, with)]
    default_session_id: &'static str,
}

impl std::fmt::Debug for SnippetTools {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnippetTools")
            .field("session_store", &self.session_store)
            .field("default_session_id", &self.default_session_id)
            .finish()
    }
}

impl SnippetTools {
    pub fn new(storage_path: Option<&str>) -> Result<Self> {
        let storage_path = storage_path.map(|s| PathBuf::from(&*shellexpand::tilde(s)));
        let session_store = SessionStore::new(storage_path)?;

        Ok(Self {
            session_store,
            commit_fn: None,
            default_session_id: "default",
        })
    }

    /// Route document writes through `commit` instead of writing to disk
    pub fn with_commit_fn(mut self, commit: impl Fn(PathBuf, String) + 'static) -> Self {
        self.commit_fn = Some(Box::new(commit));
        self
    }

    fn session(&self) -> Result<SnippetSessionData> {
        self.session_store.get_or_create(self.default_session_id)
    }

    fn update_session<R>(&self, fun: impl FnOnce(&mut SnippetSessionData) -> R) -> Result<R> {
        self.session_store.update(self.default_session_id, fun)
    }

    pub fn get_context(&self) -> Result<Option<PathBuf>> {
        Ok(self.session()?.context_path)
    }

    pub fn set_context(&self, path: PathBuf) -> Result<()> {
        self.update_session(|data| data.context_path = Some(path))
    }

    /// Resolve a path relative to the session context if needed
    pub fn resolve_path(&self, path_str: &str) -> Result<PathBuf> {
        let path = PathBuf::from(&*shellexpand::tilde(path_str));

        if path.is_absolute() {
            return Ok(std::fs::canonicalize(path)?);
        }

        match self.get_context()? {
            Some(context) => Ok(std::fs::canonicalize(context.join(path))?),
            None => Err(anyhow!(
                "No context found for `{}`. Use set_context first or provide an absolute path.",
                self.default_session_id
            )),
        }
    }

    pub fn active_document(&self) -> Result<Option<ActiveDocument>> {
        Ok(self.session()?.active_document)
    }

    /// Make `path_str` the active document, optionally placing the cursor
    pub fn open_document(
        &self,
        path_str: &str,
        position: Option<CursorPosition>,
    ) -> Result<Document> {
        let path = self.resolve_path(path_str)?;
        let mut document = Document::open(&path)?;
        if let Some(position) = position {
            document.set_cursor_position(position)?;
        }

        let active = ActiveDocument {
            path,
            cursor: document.cursor(),
        };
        log::debug!("opening {active:?}");
        self.update_session(|data| data.active_document = Some(active))?;
        Ok(document)
    }

    pub fn close_document(&self) -> Result<Option<PathBuf>> {
        let closed = self.update_session(|data| data.active_document.take())?;
        Ok(closed.map(|active| active.path))
    }

    /// Read the active document back from disk with its remembered cursor
    pub fn load_active_document(&self) -> Result<Option<Document>> {
        let Some(ActiveDocument { path, cursor }) = self.active_document()? else {
            return Ok(None);
        };

        let document = Document::open(&path)?;
        let len = document.len_chars();
        if cursor > len {
            log::warn!(
                "{} shrank since it was opened, moving cursor from {cursor} to {len}",
                path.display()
            );
        }
        Ok(Some(document.with_cursor(cursor.min(len))?))
    }

    pub fn set_cursor(&self, position: CursorPosition) -> Result<usize> {
        let mut document = self
            .load_active_document()?
            .ok_or(SnippetError::NoActiveTarget)?;
        document.set_cursor_position(position)?;
        let cursor = document.cursor();
        self.update_session(|data| {
            if let Some(active) = &mut data.active_document {
                active.cursor = cursor;
            }
        })?;
        Ok(cursor)
    }

    /// Run one insertion command against the active document and persist the result
    pub fn insert_snippet(&self, operation: Operation) -> Result<String> {
        let document = self.load_active_document()?;
        let before = document.as_ref().map(Document::text).unwrap_or_default();

        let mut host = BufferHost::new(document);
        let insertion = dispatch(&mut host, operation)?;
        let message = host
            .notifications()
            .last()
            .map(|notification| notification.message().to_string())
            .unwrap_or_default();

        let document = host.into_document().ok_or(SnippetError::NoActiveTarget)?;
        let path = document
            .path()
            .ok_or_else(|| anyhow!("active document has no path"))?
            .to_path_buf();
        let after = document.text();

        let patch = DiffOptions::new()
            .set_context_len(3)
            .create_patch(&before, &after);
        let diff = PatchFormatter::new().fmt_patch(&patch).to_string();
        drop(patch);

        self.commit(path.clone(), after)?;

        let position = document.cursor_position();
        Ok(format!(
            "{message}\nInserted {} ({} characters) into {} at line {}, column {}\n\n{diff}",
            operation.title(),
            insertion.inserted_chars,
            path.display(),
            position.line,
            position.column,
        ))
    }

    fn commit(&self, path: PathBuf, contents: String) -> Result<()> {
        match &self.commit_fn {
            Some(commit) => commit(path, contents),
            None => std::fs::write(path, contents)?,
        }
        Ok(())
    }
}
