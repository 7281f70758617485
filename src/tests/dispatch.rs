use crate::{
    dispatcher::{dispatch, insert_at, resolve_template, Insertion, INSERTED_MESSAGE},
    document::{CursorPosition, Document},
    error::SnippetError,
    host::{BufferHost, Host, InsertionTarget, Notification},
    snippets::Operation,
};

const SOURCE: &str = "#include <vector>\nusing namespace std;\n\nint main() {}\n";

#[test]
fn no_open_document_is_reported_and_nothing_changes() {
    for operation in Operation::ALL {
        let mut host = BufferHost::default();
        assert_eq!(
            dispatch(&mut host, operation),
            Err(SnippetError::NoActiveTarget)
        );
        assert!(host.document().is_none());
        assert_eq!(host.notifications().len(), 1);
        assert!(host.notifications()[0].is_error());
    }
}

#[test]
fn addition_is_spliced_in_at_the_cursor() {
    let offset = SOURCE.find("\nint main").unwrap() + 1;
    let mut host = BufferHost::new(Some(Document::from_text(SOURCE).with_cursor(offset).unwrap()));

    let insertion = dispatch(&mut host, Operation::Addition).unwrap();
    let template = resolve_template(Operation::Addition);

    assert_eq!(
        insertion,
        Insertion {
            offset,
            inserted_chars: template.chars().count()
        }
    );

    let document = host.document().unwrap();
    let expected = format!("{}{template}{}", &SOURCE[..offset], &SOURCE[offset..]);
    assert_eq!(document.text(), expected);
    assert_eq!(
        document.len_chars(),
        SOURCE.chars().count() + template.chars().count()
    );
    assert_eq!(document.cursor(), offset);
    assert_eq!(
        host.notifications(),
        &[Notification::Info(INSERTED_MESSAGE.into())]
    );
}

#[test]
fn multiplication_into_an_empty_document_is_exactly_the_template() {
    let mut host = BufferHost::new(Some(Document::from_text("")));
    dispatch(&mut host, Operation::Multiplication).unwrap();
    assert_eq!(
        host.into_document().unwrap().text(),
        resolve_template(Operation::Multiplication)
    );
}

#[test]
fn cursor_after_multibyte_text_uses_character_offsets() {
    let mut document = Document::from_text("// m×n\n// k×n\n");
    document
        .set_cursor_position(CursorPosition::new(1, 0))
        .unwrap();
    let mut host = BufferHost::new(Some(document));

    let insertion = dispatch(&mut host, Operation::Subtraction).unwrap();
    assert_eq!(insertion.offset, 7);
    assert!(host
        .document()
        .unwrap()
        .text()
        .starts_with("// m×n\n\n/**\n * Element-wise difference"));
}

#[test]
fn repeated_dispatch_inserts_each_time_at_the_same_cursor() {
    let mut host = BufferHost::new(Some(Document::from_text("")));
    dispatch(&mut host, Operation::Inverse).unwrap();
    dispatch(&mut host, Operation::Addition).unwrap();

    let expected = format!(
        "{}{}",
        resolve_template(Operation::Addition),
        resolve_template(Operation::Inverse)
    );
    assert_eq!(host.document().unwrap().text(), expected);
    assert_eq!(host.notifications().len(), 2);
}

#[test]
fn closing_the_document_removes_the_target() {
    let mut host = BufferHost::new(Some(Document::from_text("x")));
    assert!(host.close().is_some());
    assert!(host.active_target().is_none());
    assert_eq!(
        insert_at(&mut host, "y"),
        Err(SnippetError::NoActiveTarget)
    );
    host.open(Document::from_text("x"));
    assert!(insert_at(&mut host, "y").is_ok());
    assert_eq!(host.document().unwrap().text(), "yx");
}

/// A target that rejects every write, standing in for a read-only buffer
#[derive(Default)]
struct ReadOnly;

impl InsertionTarget for ReadOnly {
    fn cursor(&self) -> usize {
        0
    }

    fn insert_text(&mut self, offset: usize, _text: &str) -> Result<(), SnippetError> {
        Err(SnippetError::OffsetOutOfBounds { offset, len: 0 })
    }
}

#[derive(Default)]
struct ReadOnlyHost {
    target: ReadOnly,
    notifications: Vec<Notification>,
}

impl Host for ReadOnlyHost {
    fn active_target(&mut self) -> Option<&mut dyn InsertionTarget> {
        Some(&mut self.target)
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }
}

#[test]
fn target_failures_are_surfaced_as_error_notifications() {
    let mut host = ReadOnlyHost::default();
    assert!(dispatch(&mut host, Operation::Addition).is_err());
    assert_eq!(host.notifications.len(), 1);
    assert!(host.notifications[0].is_error());
}
