//! Property-based tests for the interview state machine
//!
//! Random founder actions, each either answered or failed by the model,
//! must never break the history invariants.

use super::state::*;
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct Step {
    event: Event,
    model_ok: bool,
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        1 => "[a-zA-Z ]{0,30}".prop_map(|document_text| Event::Begin { document_text }),
        3 => "[a-zA-Z ]{1,30}".prop_map(|text| Event::Answer { text }),
        1 => Just(Event::Finish),
    ]
}

fn arb_steps() -> impl Strategy<Value = Vec<Step>> {
    prop::collection::vec(
        (arb_event(), any::<bool>()).prop_map(|(event, model_ok)| Step { event, model_ok }),
        0..40,
    )
}

fn assert_invariants(interview: &Interview) {
    let history = interview.history();
    match interview.state() {
        InterviewState::Idle | InterviewState::Done => assert!(history.is_empty()),
        InterviewState::AwaitingAnswer { questions } => {
            assert_eq!(history.len(), 2 * questions as usize);
            for (i, turn) in history.iter().enumerate() {
                let expected = if i % 2 == 0 { Role::User } else { Role::Model };
                assert_eq!(turn.role, expected, "turn {i} out of order");
            }
        }
    }
}

proptest! {
    #[test]
    fn history_invariants_hold(steps in arb_steps()) {
        let mut interview = Interview::new();

        for (n, step) in steps.into_iter().enumerate() {
            let before_state = interview.state();
            let before_len = interview.history().len();
            let is_begin = matches!(step.event, Event::Begin { .. });

            match interview.start(step.event) {
                Ok(pending) => {
                    let outgoing = interview.outgoing(&pending).count();
                    if is_begin {
                        prop_assert_eq!(outgoing, 1);
                    } else {
                        prop_assert_eq!(outgoing, before_len + 1);
                    }
                    if step.model_ok {
                        interview.commit(pending, &format!("reply {n}"));
                    }
                }
                Err(TransitionError::NotStarted) => {
                    prop_assert!(matches!(
                        before_state,
                        InterviewState::Idle | InterviewState::Done
                    ));
                    prop_assert_eq!(interview.state(), before_state);
                }
            }

            assert_invariants(&interview);
        }
    }

    #[test]
    fn failed_exchanges_change_nothing_but_begin(steps in arb_steps()) {
        let mut interview = Interview::new();

        for step in steps {
            let is_begin = matches!(step.event, Event::Begin { .. });
            let before = interview.clone();

            if let Ok(pending) = interview.start(step.event) {
                if step.model_ok {
                    interview.commit(pending, "reply");
                } else if !is_begin {
                    prop_assert_eq!(interview.history(), before.history());
                    prop_assert_eq!(interview.state(), before.state());
                } else {
                    prop_assert!(interview.history().is_empty());
                    prop_assert_eq!(interview.state(), InterviewState::Idle);
                }
            }
        }
    }
}
