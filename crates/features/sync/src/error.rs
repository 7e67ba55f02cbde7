use crate::SyncStep;
use fh_kernel::process::{CommandStatus, ProcessError};
use std::borrow::Cow;

#[fh_derive::fh_error]
pub enum SyncError {
    /// A git step exited unsuccessfully and the cycle was aborted.
    #[error("git {step} failed{}: ended with {status}", format_context(.context))]
    StepFailed { step: SyncStep, status: CommandStatus, context: Option<Cow<'static, str>> },

    /// git could not be started.
    #[error("Process error{}: {source}", format_context(.context))]
    Process { source: ProcessError, context: Option<Cow<'static, str>> },
}
