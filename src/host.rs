use std::fmt::{self, Display, Formatter};

use crate::{document::Document, error::SnippetError};

/// Something text can be inserted into at a cursor.
///
/// Offsets are character indices. Implementations must either apply an insertion completely or
/// leave the target unchanged.
pub trait InsertionTarget {
    fn cursor(&self) -> usize;
    fn insert_text(&mut self, offset: usize, text: &str) -> Result<(), SnippetError>;
}

/// The editing application that owns documents and shows notifications
pub trait Host {
    /// The currently focused editable document, if any
    fn active_target(&mut self) -> Option<&mut dyn InsertionTarget>;
    fn notify(&mut self, notification: Notification);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Info(String),
    Error(String),
}

impl Notification {
    pub fn is_error(&self) -> bool {
        matches!(self, Notification::Error(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Notification::Info(message) | Notification::Error(message) => message,
        }
    }
}

impl Display for Notification {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Notification::Info(message) => write!(f, "{message}"),
            Notification::Error(message) => write!(f, "Error: {message}"),
        }
    }
}

/// A host holding at most one open document, recording notifications instead of displaying them
#[derive(Debug, Default)]
pub struct BufferHost {
    document: Option<Document>,
    notifications: Vec<Notification>,
}

impl BufferHost {
    pub fn new(document: Option<Document>) -> Self {
        Self {
            document,
            notifications: vec![],
        }
    }

    pub fn open(&mut self, document: Document) {
        self.document = Some(document);
    }

    pub fn close(&mut self) -> Option<Document> {
        self.document.take()
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn into_document(self) -> Option<Document> {
        self.document
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }
}

impl Host for BufferHost {
    fn active_target(&mut self) -> Option<&mut dyn InsertionTarget> {
        self.document
            .as_mut()
            .map(|document| document as &mut dyn InsertionTarget)
    }

    fn notify(&mut self, notification: Notification) {
        if notification.is_error() {
            log::warn!("{notification}");
        } else {
            log::info!("{notification}");
        }
        self.notifications.push(notification);
    }
}
