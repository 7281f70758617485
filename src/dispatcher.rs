use crate::{
    error::SnippetError,
    host::{Host, Notification},
    snippets::Operation,
};

pub const INSERTED_MESSAGE: &str = "C++ code inserted!";

/// Where a snippet landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insertion {
    pub offset: usize,
    pub inserted_chars: usize,
}

pub fn resolve_template(operation: Operation) -> &'static str {
    operation.template()
}

pub fn resolve_named(name: &str) -> Result<&'static str, SnippetError> {
    Operation::from_name(name).map(resolve_template)
}

/// Insert `template` at the cursor of the host's active target.
///
/// Fails with [`SnippetError::NoActiveTarget`] without touching anything when nothing is open.
/// The cursor stays where it was.
pub fn insert_at(host: &mut dyn Host, template: &str) -> Result<Insertion, SnippetError> {
    let target = host.active_target().ok_or(SnippetError::NoActiveTarget)?;
    let offset = target.cursor();
    target.insert_text(offset, template)?;
    Ok(Insertion {
        offset,
        inserted_chars: template.chars().count(),
    })
}

/// Handle one insertion command, reporting the outcome to the host as a notification
pub fn dispatch(host: &mut dyn Host, operation: Operation) -> Result<Insertion, SnippetError> {
    log::debug!("dispatching {}", operation.command_name());
    let template = resolve_template(operation);

    match insert_at(host, template) {
        Ok(insertion) => {
            log::debug!(
                "inserted {} characters of {operation} at {}",
                insertion.inserted_chars,
                insertion.offset
            );
            host.notify(Notification::Info(INSERTED_MESSAGE.into()));
            Ok(insertion)
        }
        Err(e) => {
            host.notify(Notification::Error(e.to_string()));
            Err(e)
        }
    }
}
