use fh_derive::fh_error;
use std::borrow::Cow;

#[fh_error]
pub enum DemoError {
    #[error("I/O error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn open() -> Result<(), DemoError> {
    std::fs::metadata("/definitely/not/here").context("probing")?;
    Ok(())
}

fn main() {
    let _ = open();
    let _: DemoError = "boom".into();
}
