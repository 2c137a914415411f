//! Maps download tallies onto the process exit outcome.

use crate::ProcessExit;

/// `Success` when nothing failed, `Partial` when some papers made it, `Failure` otherwise.
pub(crate) fn determine_exit_outcome(succeeded: usize, failed: usize) -> ProcessExit {
    match (succeeded, failed) {
        (_, 0) => ProcessExit::Success,
        (0, _) => ProcessExit::Failure,
        _ => ProcessExit::Partial,
    }
}
