use std::borrow::Cow;

#[fh_derive::fh_error]
#[derive(Debug)]
pub enum StepError {
    #[error("Step failed{}: {step}", format_context(.context))]
    Failed { step: &'static str, context: Option<Cow<'static, str>> },
}

fn main() {
    let err: Result<(), StepError> = Err(StepError::Failed { step: "pull", context: None });
    let _ = err.context("sync");
}
