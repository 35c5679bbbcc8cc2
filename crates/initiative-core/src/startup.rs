//! Startup arguments: `Name` adds a subject, `Name:secs` defines or
//! overrides a catalog action.

use crate::catalog::ActionCatalog;
use crate::timeline::{Timeline, UNNAMED_SUBJECT};
use crate::types::SubjectId;
use std::num::IntErrorKind;

/// Durations given on the command line are clamped to this range.
pub const MIN_ARG_DURATION: u32 = 1;
pub const MAX_ARG_DURATION: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupArg {
    Subject(String),
    Action { name: String, duration: u32 },
}

/// `Name:secs` with a non-empty name and an integer suffix is an action;
/// anything else names a subject.
pub fn parse_startup_arg(arg: &str) -> StartupArg {
    if let Some((name, duration)) = arg.rsplit_once(':') {
        if let Some(duration) = clamped_duration(duration.trim()) {
            if !name.trim().is_empty() {
                return StartupArg::Action {
                    name: name.to_string(),
                    duration,
                };
            }
        }
    }
    StartupArg::Subject(arg.to_string())
}

fn clamped_duration(s: &str) -> Option<u32> {
    let (min, max) = (MIN_ARG_DURATION as i64, MAX_ARG_DURATION as i64);
    match s.parse::<i64>() {
        Ok(d) => Some(d.clamp(min, max) as u32),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(MAX_ARG_DURATION),
            IntErrorKind::NegOverflow => Some(MIN_ARG_DURATION),
            _ => None,
        },
    }
}

/// Apply `args` in order. The first subject is selected; if none is named an
/// unnamed subject is created so there is always something to drop onto.
pub fn apply_startup_args<S: AsRef<str>>(
    args: &[S],
    timeline: &mut Timeline,
    catalog: &mut ActionCatalog,
) -> Vec<SubjectId> {
    let mut created = Vec::new();
    for arg in args {
        match parse_startup_arg(arg.as_ref()) {
            StartupArg::Subject(name) => {
                let id = timeline.add_subject(name, created.is_empty());
                created.push(id);
            }
            StartupArg::Action { name, duration } => {
                // Duration is already clamped to a non-zero value.
                if let Err(e) = catalog.define_or_override(&name, duration) {
                    tracing::warn!(action = %name, error = %e, "ignoring startup action");
                }
            }
        }
    }
    if created.is_empty() {
        created.push(timeline.add_subject(UNNAMED_SUBJECT, true));
    }
    created
}
