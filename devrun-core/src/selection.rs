//! Interactive package selection.
//!
//! The resolver turns an optional explicit choice and a set of discovered
//! candidates into exactly one package name. When it has to ask, it races a
//! line of user input against the configured timeout and falls back to the
//! default package when the timeout wins.

use std::time::Duration;

use tracing::debug;

use crate::config::{SelectionConfig, DEFAULT_TASK};
use crate::error::{Error, Result};
use crate::input::{LineEvent, LineSource};

/// Why a package was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionReason {
    /// Named on the command line.
    Explicit,
    /// The only package available.
    OnlyCandidate,
    /// Picked from the menu.
    UserChoice,
    /// No input before the timeout.
    Timeout,
    /// An empty line was entered.
    BlankInput,
    /// The input did not name a menu entry.
    InvalidInputFallback,
}

/// The resolved package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub name: String,
    pub reason: SelectionReason,
}

impl Selection {
    fn new(name: impl Into<String>, reason: SelectionReason) -> Self {
        Self {
            name: name.into(),
            reason,
        }
    }
}

/// What the resolver shows while it works.
pub trait SelectionView {
    /// The numbered menu; `default` is set when the default is one of `candidates`.
    fn menu(&mut self, candidates: &[String], default: Option<&str>);

    /// The request for input; `default` carries the fallback and how long it waits.
    fn prompt(&mut self, count: usize, default: Option<(&str, Duration)>);

    /// Input that named no menu entry; `fallback` is the package used instead.
    fn invalid_input(&mut self, input: &str, fallback: Option<&str>);

    /// Called once the selection is known, except for explicit choices.
    fn resolved(&mut self, selection: &Selection);
}

/// Inputs of a single resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionRequest<'a> {
    pub explicit: Option<&'a str>,
    pub force_interactive: bool,
}

pub struct SelectionResolver {
    default_package: Option<String>,
    timeout: Duration,
    task: String,
}

impl SelectionResolver {
    pub fn new(config: &SelectionConfig) -> Self {
        Self {
            default_package: config.default_package.clone(),
            timeout: config.timeout,
            task: DEFAULT_TASK.to_string(),
        }
    }

    /// Task named in the error reported when nothing offers it.
    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.task = task.into();
        self
    }

    /// Resolves to exactly one package name.
    ///
    /// `discover` only runs when the explicit choice does not settle the
    /// question, and `input` is read at most once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoCandidates`] when discovery finds nothing to offer
    /// and [`Error::InvalidSelection`] when the input names no menu entry and
    /// no default is available.
    pub fn resolve<D, S, V>(
        &self,
        request: SelectionRequest<'_>,
        discover: D,
        input: &mut S,
        view: &mut V,
    ) -> Result<Selection>
    where
        D: FnOnce() -> Vec<String>,
        S: LineSource + ?Sized,
        V: SelectionView + ?Sized,
    {
        if let Some(name) = request.explicit {
            if !request.force_interactive {
                return Ok(Selection::new(name, SelectionReason::Explicit));
            }
        }

        let candidates = discover();
        if candidates.is_empty() {
            return Err(Error::NoCandidates {
                task: self.task.clone(),
            });
        }

        let default = self
            .default_package
            .as_deref()
            .filter(|name| candidates.iter().any(|c| c == name));

        view.menu(&candidates, default);

        if candidates.len() == 1 {
            return Ok(finish(
                view,
                Selection::new(&candidates[0], SelectionReason::OnlyCandidate),
            ));
        }

        view.prompt(candidates.len(), default.map(|name| (name, self.timeout)));

        let deadline = default.map(|_| self.timeout);
        let event = input.next_line(deadline)?;
        debug!(?event, "selection input");

        let answer = match event {
            LineEvent::TimedOut => match default {
                Some(name) => {
                    return Ok(finish(view, Selection::new(name, SelectionReason::Timeout)))
                }
                None => String::new(),
            },
            LineEvent::Closed => String::new(),
            LineEvent::Line(line) => line,
        };

        let answer = answer.trim();
        if answer.is_empty() {
            if let Some(name) = default {
                return Ok(finish(view, Selection::new(name, SelectionReason::BlankInput)));
            }
        }

        if let Some(index) = parse_choice(answer, candidates.len()) {
            return Ok(finish(
                view,
                Selection::new(&candidates[index], SelectionReason::UserChoice),
            ));
        }

        view.invalid_input(answer, default);
        match default {
            Some(name) => Ok(finish(
                view,
                Selection::new(name, SelectionReason::InvalidInputFallback),
            )),
            None => Err(Error::InvalidSelection {
                input: answer.to_string(),
                count: candidates.len(),
            }),
        }
    }
}

fn finish<V: SelectionView + ?Sized>(view: &mut V, selection: Selection) -> Selection {
    view.resolved(&selection);
    selection
}

/// Maps a 1-based menu number onto a 0-based index.
///
/// Only the leading run of decimal digits counts, after an optional sign, so
/// `"2abc"` and `"2.0"` both pick the second entry.
fn parse_choice(answer: &str, count: usize) -> Option<usize> {
    let (negative, rest) = match answer.as_bytes().first() {
        Some(b'-') => (true, &answer[1..]),
        Some(b'+') => (false, &answer[1..]),
        _ => (false, answer),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let number: usize = rest[..end].parse().ok()?;
    if negative {
        return None;
    }
    (1..=count).contains(&number).then(|| number - 1)
}
