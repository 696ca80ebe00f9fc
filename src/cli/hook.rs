//! Hook entry point: one request on stdin, outcome as exit status.
//!
//! Exit 0 lets the operation proceed. Exit 2 holds it and puts the advisory
//! on stderr. Every failure exits 0.

use std::io::{self, Read};
use std::path::PathBuf;

use tracing::{debug, warn};

use super::Settings;
use crate::config::Config;
use crate::matcher::{HookRequest, Matcher, Outcome};

/// Exit status asking the host to hold the operation.
pub const EXIT_INTERCEPT: i32 = 2;

/// Evaluate raw stdin text. Malformed input and internal faults proceed.
pub fn decide(input: &str, matcher: &Matcher) -> Outcome {
    let request = match HookRequest::parse(input) {
        Ok(request) => request,
        Err(e) => {
            debug!(error = %e, "Malformed hook input, proceeding");
            return Outcome::Proceed;
        }
    };

    match matcher.evaluate(&request) {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!(error = %e, "dochint failed, proceeding");
            Outcome::Proceed
        }
    }
}

/// Evaluate raw stdin text against the on-disk marker cache.
///
/// A config the matcher cannot be built from proceeds.
pub fn evaluate_input(input: &str, config: Config, work_root: PathBuf) -> Outcome {
    match Matcher::with_marker_store(config, work_root) {
        Ok(matcher) => decide(input, &matcher),
        Err(e) => {
            warn!(error = %e, "Could not set up matcher, proceeding");
            Outcome::Proceed
        }
    }
}

/// Process exit status for an outcome.
pub fn exit_code(outcome: &Outcome) -> i32 {
    match outcome {
        Outcome::Proceed => 0,
        Outcome::Intercept(_) => EXIT_INTERCEPT,
    }
}

/// Run the hook and return the process exit status.
pub fn run(settings: &Settings) -> i32 {
    let (config, work_root) = match settings.load() {
        Ok(loaded) => loaded,
        Err(e) => {
            warn!(error = %e, "Could not load config, proceeding");
            return 0;
        }
    };

    let mut input = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut input) {
        warn!(error = %e, "Could not read hook input, proceeding");
        return 0;
    }

    let outcome = evaluate_input(&input, config, work_root);
    if let Outcome::Intercept(advisory) = &outcome {
        eprintln!("{}", advisory);
    }
    exit_code(&outcome)
}
