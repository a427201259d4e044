use std::io;
use std::time::Duration;

use devrun_core::config::SelectionConfig;
use devrun_core::error::Error;
use devrun_core::input::{LineEvent, LineSource};
use devrun_core::selection::{
    Selection, SelectionReason, SelectionRequest, SelectionResolver, SelectionView,
};

/// Replays one prepared event and remembers how it was asked for.
struct ScriptedInput {
    event: Option<LineEvent>,
    calls: usize,
    timeouts: Vec<Option<Duration>>,
}

impl ScriptedInput {
    fn line(text: &str) -> Self {
        Self::with_event(LineEvent::Line(format!("{}\n", text)))
    }

    /// Never produces a line; only a deadline ends the wait.
    fn silent() -> Self {
        Self::with_event(LineEvent::TimedOut)
    }

    fn closed() -> Self {
        Self::with_event(LineEvent::Closed)
    }

    fn with_event(event: LineEvent) -> Self {
        Self {
            event: Some(event),
            calls: 0,
            timeouts: Vec::new(),
        }
    }
}

impl LineSource for ScriptedInput {
    fn next_line(&mut self, timeout: Option<Duration>) -> io::Result<LineEvent> {
        self.calls += 1;
        self.timeouts.push(timeout);
        let event = self.event.take().unwrap_or(LineEvent::Closed);
        if event == LineEvent::TimedOut && timeout.is_none() {
            panic!("silent input without a deadline would block forever");
        }
        Ok(event)
    }
}

#[derive(Default)]
struct RecordingView {
    menu: Option<(Vec<String>, Option<String>)>,
    prompts: Vec<(usize, Option<(String, Duration)>)>,
    invalid: Vec<(String, Option<String>)>,
    resolved: Vec<Selection>,
}

impl SelectionView for RecordingView {
    fn menu(&mut self, candidates: &[String], default: Option<&str>) {
        self.menu = Some((candidates.to_vec(), default.map(str::to_string)));
    }

    fn prompt(&mut self, count: usize, default: Option<(&str, Duration)>) {
        self.prompts
            .push((count, default.map(|(name, t)| (name.to_string(), t))));
    }

    fn invalid_input(&mut self, input: &str, fallback: Option<&str>) {
        self.invalid
            .push((input.to_string(), fallback.map(str::to_string)));
    }

    fn resolved(&mut self, selection: &Selection) {
        self.resolved.push(selection.clone());
    }
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn resolver(default: Option<&str>) -> SelectionResolver {
    SelectionResolver::new(&SelectionConfig {
        default_package: default.map(str::to_string),
        timeout: Duration::from_secs(10),
    })
}

fn interactive() -> SelectionRequest<'static> {
    SelectionRequest::default()
}

#[test]
fn test_single_candidate_needs_no_prompt() {
    for default in [None, Some("other"), Some("onlyone")] {
        let mut input = ScriptedInput::silent();
        let mut view = RecordingView::default();

        let selection = resolver(default)
            .resolve(interactive(), || names(&["onlyone"]), &mut input, &mut view)
            .unwrap();

        assert_eq!(selection.name, "onlyone");
        assert_eq!(selection.reason, SelectionReason::OnlyCandidate);
        assert_eq!(input.calls, 0);
        assert!(view.prompts.is_empty());
        assert_eq!(view.resolved, vec![selection]);
    }
}

#[test]
fn test_explicit_choice_skips_discovery() {
    let mut input = ScriptedInput::silent();
    let mut view = RecordingView::default();
    let request = SelectionRequest {
        explicit: Some("not-a-package"),
        force_interactive: false,
    };

    let selection = resolver(Some("beta"))
        .resolve(
            request,
            || panic!("discovery must not run for an explicit choice"),
            &mut input,
            &mut view,
        )
        .unwrap();

    assert_eq!(selection.name, "not-a-package");
    assert_eq!(selection.reason, SelectionReason::Explicit);
    assert_eq!(input.calls, 0);
    assert!(view.menu.is_none());
}

#[test]
fn test_forced_interactive_ignores_explicit_choice() {
    let mut input = ScriptedInput::line("1");
    let mut view = RecordingView::default();
    let request = SelectionRequest {
        explicit: Some("gamma"),
        force_interactive: true,
    };

    let selection = resolver(None)
        .resolve(
            request,
            || names(&["alpha", "beta", "gamma"]),
            &mut input,
            &mut view,
        )
        .unwrap();

    assert_eq!(selection.name, "alpha");
    assert_eq!(selection.reason, SelectionReason::UserChoice);
    assert_eq!(input.calls, 1);
}

#[test]
fn test_no_candidates_is_an_error() {
    let mut input = ScriptedInput::silent();
    let mut view = RecordingView::default();

    let err = resolver(Some("beta"))
        .with_task("serve")
        .resolve(interactive(), Vec::new, &mut input, &mut view)
        .unwrap_err();

    match err {
        Error::NoCandidates { task } => assert_eq!(task, "serve"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(input.calls, 0);
    assert!(view.menu.is_none());
}

#[test]
fn test_numbered_choice_is_one_based() {
    let mut input = ScriptedInput::line("2");
    let mut view = RecordingView::default();

    let selection = resolver(Some("beta"))
        .resolve(
            interactive(),
            || names(&["alpha", "beta", "gamma"]),
            &mut input,
            &mut view,
        )
        .unwrap();

    assert_eq!(selection.name, "beta");
    assert_eq!(selection.reason, SelectionReason::UserChoice);
    assert_eq!(input.timeouts, vec![Some(Duration::from_secs(10))]);
    assert_eq!(
        view.menu,
        Some((names(&["alpha", "beta", "gamma"]), Some("beta".to_string())))
    );
    assert_eq!(
        view.prompts,
        vec![(3, Some(("beta".to_string(), Duration::from_secs(10))))]
    );
    assert_eq!(view.resolved.len(), 1);
}

#[test]
fn test_timeout_resolves_to_default() {
    let mut input = ScriptedInput::silent();
    let mut view = RecordingView::default();

    let selection = resolver(Some("beta"))
        .resolve(
            interactive(),
            || names(&["alpha", "beta", "gamma"]),
            &mut input,
            &mut view,
        )
        .unwrap();

    assert_eq!(selection.name, "beta");
    assert_eq!(selection.reason, SelectionReason::Timeout);
    assert!(view.invalid.is_empty());
}

#[test]
fn test_blank_input_resolves_to_default() {
    let mut input = ScriptedInput::line("   ");
    let mut view = RecordingView::default();

    let selection = resolver(Some("gamma"))
        .resolve(
            interactive(),
            || names(&["alpha", "beta", "gamma"]),
            &mut input,
            &mut view,
        )
        .unwrap();

    assert_eq!(selection.name, "gamma");
    assert_eq!(selection.reason, SelectionReason::BlankInput);
}

#[test]
fn test_whitespace_around_number_is_ignored() {
    let mut input = ScriptedInput::line("  3 \t");
    let mut view = RecordingView::default();

    let selection = resolver(None)
        .resolve(
            interactive(),
            || names(&["alpha", "beta", "gamma"]),
            &mut input,
            &mut view,
        )
        .unwrap();

    assert_eq!(selection.name, "gamma");
}

#[test]
fn test_trailing_text_after_number_is_ignored() {
    for answer in ["2abc", "2.0", "+2"] {
        let mut input = ScriptedInput::line(answer);
        let mut view = RecordingView::default();

        let selection = resolver(Some("alpha"))
            .resolve(
                interactive(),
                || names(&["alpha", "beta", "gamma"]),
                &mut input,
                &mut view,
            )
            .unwrap();

        assert_eq!(selection.name, "beta", "answer {:?}", answer);
        assert_eq!(selection.reason, SelectionReason::UserChoice);
        assert!(view.invalid.is_empty());
    }
}

#[test]
fn test_out_of_range_without_default_fails() {
    for answer in ["0", "4", "abc", ""] {
        let mut input = ScriptedInput::line(answer);
        let mut view = RecordingView::default();

        let err = resolver(None)
            .resolve(
                interactive(),
                || names(&["alpha", "beta", "gamma"]),
                &mut input,
                &mut view,
            )
            .unwrap_err();

        assert!(err.to_string().starts_with("Invalid selection"));
        match err {
            Error::InvalidSelection { input, count } => {
                assert_eq!(input, answer);
                assert_eq!(count, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(view.invalid, vec![(answer.to_string(), None)]);
        assert!(view.resolved.is_empty());
    }
}

#[test]
fn test_invalid_input_falls_back_to_default() {
    let mut input = ScriptedInput::line("7");
    let mut view = RecordingView::default();

    let selection = resolver(Some("alpha"))
        .resolve(
            interactive(),
            || names(&["alpha", "beta", "gamma"]),
            &mut input,
            &mut view,
        )
        .unwrap();

    assert_eq!(selection.name, "alpha");
    assert_eq!(selection.reason, SelectionReason::InvalidInputFallback);
    assert_eq!(view.invalid, vec![("7".to_string(), Some("alpha".to_string()))]);
}

#[test]
fn test_default_outside_candidates_disables_timeout() {
    let mut input = ScriptedInput::line("1");
    let mut view = RecordingView::default();

    let selection = resolver(Some("inference"))
        .resolve(
            interactive(),
            || names(&["alpha", "beta"]),
            &mut input,
            &mut view,
        )
        .unwrap();

    assert_eq!(selection.name, "alpha");
    assert_eq!(input.timeouts, vec![None]);
    assert_eq!(view.menu.as_ref().and_then(|(_, d)| d.clone()), None);
    assert_eq!(view.prompts, vec![(2, None)]);
}

#[test]
fn test_default_outside_candidates_does_not_absorb_invalid_input() {
    let mut input = ScriptedInput::line("9");
    let mut view = RecordingView::default();

    let result = resolver(Some("inference")).resolve(
        interactive(),
        || names(&["alpha", "beta"]),
        &mut input,
        &mut view,
    );

    assert!(matches!(result, Err(Error::InvalidSelection { .. })));
}

#[test]
fn test_closed_input_counts_as_blank() {
    let mut input = ScriptedInput::closed();
    let mut view = RecordingView::default();
    let selection = resolver(Some("beta"))
        .resolve(
            interactive(),
            || names(&["alpha", "beta"]),
            &mut input,
            &mut view,
        )
        .unwrap();
    assert_eq!(selection.reason, SelectionReason::BlankInput);

    let mut input = ScriptedInput::closed();
    let mut view = RecordingView::default();
    let result = resolver(None).resolve(
        interactive(),
        || names(&["alpha", "beta"]),
        &mut input,
        &mut view,
    );
    assert!(matches!(result, Err(Error::InvalidSelection { .. })));
}
