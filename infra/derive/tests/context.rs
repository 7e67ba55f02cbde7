use std::borrow::Cow;

#[fh_derive::fh_error]
pub enum ProbeError {
    #[error("I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Marker missing{}: {path}", format_context(.context))]
    Missing { path: String, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn not_found() -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::NotFound, "gone")
}

#[test]
fn source_errors_convert_with_question_mark() {
    fn probe() -> Result<(), ProbeError> {
        Err::<(), _>(not_found())?;
        Ok(())
    }

    let err = probe().unwrap_err();
    assert!(matches!(err, ProbeError::Io { context: None, .. }));
    assert_eq!(err.to_string(), "I/O error: gone");
}

#[test]
fn context_on_source_result_is_rendered() {
    let res: Result<(), std::io::Error> = Err(not_found());
    let err = res.context("reading .env").unwrap_err();
    assert_eq!(err.to_string(), "I/O error (reading .env): gone");
}

#[test]
fn context_on_own_result_overwrites_slot() {
    let res: Result<(), ProbeError> =
        Err(ProbeError::Missing { path: "data/runner/.runner".to_owned(), context: None });
    let err = res.context("start").unwrap_err();
    assert_eq!(err.to_string(), "Marker missing (start): data/runner/.runner");
}

#[test]
fn strings_become_internal_errors() {
    let from_static: ProbeError = "static".into();
    let from_owned: ProbeError = String::from("owned").into();

    assert!(matches!(from_static, ProbeError::Internal { .. }));
    assert_eq!(from_owned.to_string(), "Internal error: owned");
}
