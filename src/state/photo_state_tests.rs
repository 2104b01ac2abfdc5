//! Tests for the search state reducer.

use super::*;
use crate::test_harness::sample_page;
use proptest::prelude::*;

// ===== Helpers =====

fn fetch(state: &mut PhotoState) -> PageRequest {
    match state.reduce(Action::FetchPhotos) {
        Some(Effect::LoadPage(request)) => request,
        other => panic!("FetchPhotos should yield LoadPage, got {:?}", other),
    }
}

fn succeed(state: &mut PhotoState, request: PageRequest, page: PageResponse) {
    assert!(state.complete(Completion::Page {
        request,
        result: Ok(page),
    }));
}

fn fail(state: &mut PhotoState, request: PageRequest, err: FetchError) {
    assert!(state.complete(Completion::Page {
        request,
        result: Err(err),
    }));
}

/// State after a search with two successful pages.
fn state_with_two_pages() -> PhotoState {
    let mut state = PhotoState::new(3);
    state.reduce(Action::SetSearchString("dog".to_string()));
    let first = fetch(&mut state);
    succeed(&mut state, first, sample_page(3, 100, true, 9));
    let second = fetch(&mut state);
    succeed(&mut state, second, sample_page(3, 200, true, 9));
    state
}

// ===== Defaults =====

#[test]
fn new_state_has_defaults() {
    let state = PhotoState::new(20);
    assert_eq!(state.search_string(), "");
    assert!(state.results().is_empty());
    assert_eq!(state.current_page(), 0);
    assert_eq!(state.items_per_page(), 20);
    assert_eq!(state.total(), 0);
    assert_eq!(state.fetch_status(), ExecutionState::Uninitialized);
    assert_eq!(state.test_status(), ExecutionState::Uninitialized);
    assert!(!state.end_of_input_reached());
    assert_eq!(state.last_error(), None);
}

// ===== SetSearchString =====

#[test]
fn set_search_string_resets_everything() {
    let mut state = state_with_two_pages();
    assert_eq!(state.current_page(), 2);

    let effect = state.reduce(Action::SetSearchString("cat".to_string()));

    assert_eq!(effect, None, "SetSearchString issues no request");
    assert_eq!(state.search_string(), "cat");
    assert_eq!(state.current_page(), 0);
    assert!(state.results().is_empty());
    assert_eq!(state.total(), 0);
    assert_eq!(state.fetch_status(), ExecutionState::Uninitialized);
    assert!(!state.end_of_input_reached());
}

#[test]
fn set_search_string_clears_previous_error() {
    let mut state = PhotoState::new(20);
    state.reduce(Action::SetSearchString("dog".to_string()));
    let request = fetch(&mut state);
    fail(&mut state, request, FetchError::Transport("down".to_string()));
    assert!(state.last_error().is_some());

    state.reduce(Action::SetSearchString("cat".to_string()));

    assert_eq!(state.last_error(), None);
}

#[test]
fn set_search_string_resets_end_of_input() {
    let mut state = PhotoState::new(5);
    state.reduce(Action::SetSearchString("rare".to_string()));
    let request = fetch(&mut state);
    succeed(&mut state, request, sample_page(2, 1, false, 2));
    assert!(state.end_of_input_reached());

    state.reduce(Action::SetSearchString("common".to_string()));

    assert!(!state.end_of_input_reached());
}

#[test]
fn set_search_string_bumps_generation() {
    let mut state = PhotoState::new(20);
    let before = state.generation();
    state.reduce(Action::SetSearchString("a".to_string()));
    state.reduce(Action::SetSearchString("a".to_string()));
    assert_eq!(state.generation(), before + 2);
}

// ===== FetchPhotos =====

#[test]
fn fetch_sets_loading_and_next_page_synchronously() {
    let mut state = PhotoState::new(20);
    state.reduce(Action::SetSearchString("dog".to_string()));

    let request = fetch(&mut state);

    assert_eq!(state.fetch_status(), ExecutionState::Loading);
    assert_eq!(state.current_page(), 1);
    assert_eq!(
        request,
        PageRequest {
            query: "dog".to_string(),
            page: 1,
            per_page: 20,
            generation: state.generation(),
        }
    );
}

#[test]
fn fetch_requests_page_after_current() {
    let mut state = state_with_two_pages();
    let request = fetch(&mut state);
    assert_eq!(request.page, 3);
    assert_eq!(state.current_page(), 3);
}

#[test]
fn successful_fetch_replaces_results_with_latest_page() {
    let state = state_with_two_pages();
    let ids: Vec<u64> = state.results().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![200, 201, 202], "Store keeps only the latest page");
    assert_eq!(state.total(), 9);
    assert_eq!(state.fetch_status(), ExecutionState::Success);
    assert!(!state.end_of_input_reached());
    assert_eq!(state.last_error(), None);
}

#[test]
fn ref_index_continues_across_pages() {
    let state = state_with_two_pages();
    let indices: Vec<usize> = state.results().iter().map(|p| p.ref_index).collect();
    assert_eq!(indices, vec![4, 5, 6]);
}

#[test]
fn short_last_page_sets_end_of_input() {
    let mut state = PhotoState::new(3);
    state.reduce(Action::SetSearchString("dog".to_string()));
    let request = fetch(&mut state);
    succeed(&mut state, request, sample_page(1, 1, false, 1));
    assert!(state.end_of_input_reached());
}

#[test]
fn second_fetch_while_loading_is_not_rejected() {
    let mut state = PhotoState::new(20);
    state.reduce(Action::SetSearchString("dog".to_string()));
    let first = fetch(&mut state);
    let second = fetch(&mut state);
    assert_eq!(first.page, 1);
    assert_eq!(second.page, 2);
}

#[test]
fn forbidden_response_becomes_failure_with_last_error() {
    let mut state = state_with_two_pages();
    state.reduce(Action::SetSearchString("dog".to_string()));
    let request = fetch(&mut state);

    fail(
        &mut state,
        request,
        FetchError::Http {
            status: 403,
            message: "unauthorized".to_string(),
        },
    );

    assert_eq!(state.fetch_status(), ExecutionState::Failure);
    assert!(state.results().is_empty());
    assert_eq!(state.total(), 0);
    assert!(!state.end_of_input_reached());
    assert_eq!(state.last_error(), Some(&LastError::new(403, "unauthorized")));
}

#[test]
fn transport_failure_records_empty_response_sentinel() {
    let mut state = PhotoState::new(20);
    state.reduce(Action::SetSearchString("dog".to_string()));
    let request = fetch(&mut state);

    fail(&mut state, request, FetchError::Transport("timed out".to_string()));

    let last = state.last_error().expect("error recorded");
    assert!(last.is_empty_response());
}

#[test]
fn failure_after_end_of_input_clears_flag() {
    let mut state = PhotoState::new(3);
    state.reduce(Action::SetSearchString("dog".to_string()));
    let request = fetch(&mut state);
    succeed(&mut state, request, sample_page(1, 1, false, 1));
    let request = fetch(&mut state);

    fail(&mut state, request, FetchError::MissingCredential);

    assert!(!state.end_of_input_reached());
}

#[test]
fn success_after_failure_clears_last_error() {
    let mut state = PhotoState::new(3);
    state.reduce(Action::SetSearchString("dog".to_string()));
    let request = fetch(&mut state);
    fail(&mut state, request, FetchError::Transport("x".to_string()));

    let request = fetch(&mut state);
    succeed(&mut state, request, sample_page(3, 1, true, 30));

    assert_eq!(state.last_error(), None);
    assert_eq!(state.fetch_status(), ExecutionState::Success);
}

#[test]
fn every_results_replacement_bumps_revision() {
    let mut state = PhotoState::new(3);
    let r0 = state.results_revision();
    state.reduce(Action::SetSearchString("dog".to_string()));
    let r1 = state.results_revision();
    let request = fetch(&mut state);
    assert_eq!(state.results_revision(), r1, "Dispatch alone keeps results");
    succeed(&mut state, request, sample_page(3, 1, true, 9));
    let r2 = state.results_revision();
    assert!(r0 < r1 && r1 < r2);
}

// ===== Stale responses =====

#[test]
fn stale_page_is_discarded_by_default() {
    let mut state = PhotoState::new(3);
    state.reduce(Action::SetSearchString("dog".to_string()));
    let stale = fetch(&mut state);
    state.reduce(Action::SetSearchString("cat".to_string()));
    let current = fetch(&mut state);

    let applied = state.complete(Completion::Page {
        request: stale,
        result: Ok(sample_page(3, 1, true, 9)),
    });

    assert!(!applied);
    assert!(state.results().is_empty());
    assert_eq!(state.fetch_status(), ExecutionState::Loading);

    succeed(&mut state, current, sample_page(2, 50, false, 2));
    assert_eq!(state.results().len(), 2);
}

#[test]
fn stale_page_is_applied_when_discarding_disabled() {
    let mut state = PhotoState::new(3).with_discard_stale_responses(false);
    state.reduce(Action::SetSearchString("dog".to_string()));
    let stale = fetch(&mut state);
    state.reduce(Action::SetSearchString("cat".to_string()));

    let applied = state.complete(Completion::Page {
        request: stale,
        result: Ok(sample_page(3, 1, true, 9)),
    });

    assert!(applied);
    assert_eq!(state.results().len(), 3);
    assert_eq!(state.fetch_status(), ExecutionState::Success);
}

// ===== TestCredential =====

#[test]
fn test_credential_sets_loading_and_yields_probe() {
    let mut state = PhotoState::new(20);
    let effect = state.reduce(Action::TestCredential("key".to_string()));
    assert_eq!(effect, Some(Effect::ProbeCredential("key".to_string())));
    assert_eq!(state.test_status(), ExecutionState::Loading);
    assert_eq!(state.fetch_status(), ExecutionState::Uninitialized);
    assert_eq!(state.current_page(), 0);
}

#[test]
fn probe_success_sets_test_status_and_end_of_input() {
    let mut state = PhotoState::new(20);
    state.reduce(Action::TestCredential("key".to_string()));

    state.complete(Completion::Probe {
        result: Ok(sample_page(10, 1, false, 10)),
    });

    assert_eq!(state.test_status(), ExecutionState::Success);
    assert!(state.end_of_input_reached());
}

#[test]
fn fetch_after_failure_clears_last_error() {
    let mut state = PhotoState::new(20);
    state.reduce(Action::SetSearchString("dog".to_string()));
    let first = fetch(&mut state);
    fail(
        &mut state,
        first,
        FetchError::Http {
            status: 403,
            message: "unauthorized".to_string(),
        },
    );
    assert!(state.last_error().is_some());

    let retry = fetch(&mut state);

    assert_eq!(retry.page, 2);
    assert_eq!(state.fetch_status(), ExecutionState::Loading);
    assert_eq!(state.last_error(), None);
}

#[test]
fn probe_failure_leaves_search_status_alone() {
    let mut state = state_with_two_pages();
    let before = state.clone();
    state.reduce(Action::TestCredential("bad".to_string()));

    state.complete(Completion::Probe {
        result: Err(FetchError::Http {
            status: 401,
            message: "nope".to_string(),
        }),
    });

    assert_eq!(state.test_status(), ExecutionState::Failure);
    assert_eq!(state.fetch_status(), before.fetch_status());
    assert_eq!(state.results(), before.results());
    assert_eq!(state.last_error(), None);
}

#[test]
fn probe_failure_clears_end_of_input() {
    let mut state = PhotoState::new(3);
    state.reduce(Action::SetSearchString("dog".to_string()));
    let request = fetch(&mut state);
    succeed(&mut state, request, sample_page(2, 1, false, 2));
    assert!(state.end_of_input_reached());

    state.reduce(Action::TestCredential("bad".to_string()));
    state.complete(Completion::Probe {
        result: Err(FetchError::Transport("refused".to_string())),
    });

    assert_eq!(state.test_status(), ExecutionState::Failure);
    assert!(!state.end_of_input_reached());
}

#[test]
fn probe_is_independent_of_search_generation() {
    let mut state = PhotoState::new(20);
    state.reduce(Action::TestCredential("key".to_string()));
    state.reduce(Action::SetSearchString("dog".to_string()));

    let applied = state.complete(Completion::Probe {
        result: Ok(sample_page(1, 1, true, 100)),
    });

    assert!(applied);
    assert_eq!(state.test_status(), ExecutionState::Success);
}

// ===== Properties =====

proptest! {
    #[test]
    fn ref_index_matches_formula(
        per_page in 1u32..=80,
        prior_pages in 0u32..20,
        count in 0usize..=80,
    ) {
        let mut state = PhotoState::new(per_page);
        state.reduce(Action::SetSearchString("q".to_string()));
        for _ in 0..prior_pages {
            let request = fetch(&mut state);
            succeed(&mut state, request, sample_page(0, 1, true, 0));
        }

        let request = fetch(&mut state);
        prop_assert_eq!(request.page, prior_pages + 1);
        succeed(&mut state, request, sample_page(count, 1, true, 1000));

        for (position, photo) in state.results().iter().enumerate() {
            let expected = prior_pages as usize * per_page as usize + position + 1;
            prop_assert_eq!(photo.ref_index, expected);
        }
    }

    #[test]
    fn set_search_string_always_resets(query in "[a-z ]{1,12}", pages in 0u32..5) {
        let mut state = PhotoState::new(10);
        state.reduce(Action::SetSearchString("seed".to_string()));
        for _ in 0..pages {
            let request = fetch(&mut state);
            succeed(&mut state, request, sample_page(10, 1, pages % 2 == 0, 50));
        }

        state.reduce(Action::SetSearchString(query.clone()));

        prop_assert_eq!(state.search_string(), query.as_str());
        prop_assert_eq!(state.current_page(), 0);
        prop_assert!(state.results().is_empty());
        prop_assert_eq!(state.total(), 0);
        prop_assert_eq!(state.fetch_status(), ExecutionState::Uninitialized);
        prop_assert!(!state.end_of_input_reached());
    }

    #[test]
    fn current_page_is_monotonic_within_a_search(outcomes in proptest::collection::vec(any::<bool>(), 1..10)) {
        let mut state = PhotoState::new(5);
        state.reduce(Action::SetSearchString("q".to_string()));
        let mut last = state.current_page();
        for ok in outcomes {
            let request = fetch(&mut state);
            if ok {
                succeed(&mut state, request, sample_page(5, 1, true, 100));
            } else {
                fail(&mut state, request, FetchError::Transport("x".to_string()));
            }
            prop_assert!(state.current_page() > last);
            last = state.current_page();
        }
    }
}
