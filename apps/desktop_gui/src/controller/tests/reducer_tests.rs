use super::*;
use client_core::OptionResource;
use shared::domain::SelectOption;

fn philippines() -> Country {
    SelectOption::new(1, "Philippines")
}

fn australia() -> Country {
    SelectOption::new(2, "Australia")
}

fn australian_states() -> Vec<CountryState> {
    vec![
        SelectOption::new(10, "Queensland"),
        SelectOption::new(11, "Victoria"),
    ]
}

fn fetch_effect(transition: &Transition) -> (OptionId, u64) {
    match transition.effects.as_slice() {
        [SelectionEffect::FetchStates {
            country_id,
            generation,
        }] => (*country_id, *generation),
        other => panic!("expected a single FetchStates effect, got {other:?}"),
    }
}

fn loaded(state: &SelectionState, country: Country, states: Vec<CountryState>) -> SelectionState {
    let selected = state.reduce(SelectionAction::SelectCountry(country));
    let (country_id, generation) = fetch_effect(&selected);
    selected
        .state
        .reduce(SelectionAction::StatesLoaded {
            country_id,
            generation,
            result: Ok(states),
        })
        .state
}

fn forbidden(country_id: OptionId) -> FetchError {
    FetchError::Status {
        resource: OptionResource::States { country_id },
        status: 403,
        reason: "Forbidden".to_string(),
    }
}

#[test]
fn select_country_clears_state_and_starts_loading() {
    let state = loaded(
        &SelectionState::new(Capability::SelectionOnly),
        australia(),
        australian_states(),
    );
    let state = state
        .reduce(SelectionAction::SelectState(SelectOption::new(11, "Victoria")))
        .state;
    let state = state.reduce(SelectionAction::Submit).state;
    assert!(state.confirmed_summary().is_some());

    let transition = state.reduce(SelectionAction::SelectCountry(philippines()));
    let next = &transition.state;

    assert_eq!(next.selected_country(), Some(&philippines()));
    assert_eq!(next.selected_state(), None);
    assert!(next.available_states().is_empty());
    assert!(next.is_loading_states());
    assert!(next.is_dirty());
    assert_eq!(next.confirmed_summary(), None);
    assert_eq!(next.resolved_location(), None);
    assert_eq!(next.phase(), SelectionPhase::Loading);
    assert_eq!(
        fetch_effect(&transition),
        (OptionId(1), state.states_generation() + 1)
    );
}

#[test]
fn selected_state_never_survives_a_country_change() {
    let mut state = SelectionState::new(Capability::SelectionOnly);
    for country in [australia(), philippines(), australia(), australia()] {
        state = loaded(&state, country.clone(), australian_states());
        state = state
            .reduce(SelectionAction::SelectState(SelectOption::new(10, "Queensland")))
            .state;
        assert!(state.selected_state().is_some());

        let next = state.reduce(SelectionAction::SelectCountry(country)).state;
        assert_eq!(next.selected_state(), None);
        state = next;
    }
}

#[test]
fn submit_without_country_is_noop_even_when_dirty_flag_is_irrelevant() {
    let state = SelectionState::new(Capability::WithMap);
    let transition = state.reduce(SelectionAction::Submit);

    assert_eq!(transition.state, state);
    assert!(transition.effects.is_empty());
    assert!(!state.can_submit());
    assert_eq!(state.phase(), SelectionPhase::Empty);
}

#[test]
fn submit_when_clean_is_noop() {
    let state = loaded(
        &SelectionState::new(Capability::WithMap),
        australia(),
        australian_states(),
    );
    let confirmed = state.reduce(SelectionAction::Submit).state;
    assert!(!confirmed.is_dirty());

    let again = confirmed.reduce(SelectionAction::Submit);
    assert_eq!(again.state, confirmed);
    assert!(again.effects.is_empty());
}

#[test]
fn dirty_flag_follows_selects_and_submit() {
    let state = loaded(
        &SelectionState::new(Capability::SelectionOnly),
        australia(),
        australian_states(),
    );
    assert!(state.is_dirty());

    let state = state.reduce(SelectionAction::Submit).state;
    assert!(!state.is_dirty());
    assert_eq!(state.phase(), SelectionPhase::Confirmed);

    let state = state
        .reduce(SelectionAction::SelectState(SelectOption::new(10, "Queensland")))
        .state;
    assert!(state.is_dirty());

    let state = state.reduce(SelectionAction::Submit).state;
    let state = state
        .reduce(SelectionAction::SelectState(SelectOption::new(10, "Queensland")))
        .state;
    assert!(state.is_dirty(), "reselecting the same state marks dirty");

    let state = state.reduce(SelectionAction::Submit).state;
    let state = state.reduce(SelectionAction::SelectCountry(australia())).state;
    assert!(state.is_dirty());
}

#[test]
fn stale_states_response_is_dropped() {
    let initial = SelectionState::new(Capability::SelectionOnly);

    let select_a = initial.reduce(SelectionAction::SelectCountry(philippines()));
    let (a_id, a_generation) = fetch_effect(&select_a);
    let select_b = select_a
        .state
        .reduce(SelectionAction::SelectCountry(australia()));
    let (b_id, b_generation) = fetch_effect(&select_b);

    let after_b = select_b.state.reduce(SelectionAction::StatesLoaded {
        country_id: b_id,
        generation: b_generation,
        result: Ok(australian_states()),
    });
    let after_a = after_b.state.reduce(SelectionAction::StatesLoaded {
        country_id: a_id,
        generation: a_generation,
        result: Ok(vec![SelectOption::new(20, "Luzon")]),
    });

    assert!(after_a.effects.is_empty());
    assert_eq!(after_a.state, after_b.state);
    assert_eq!(after_a.state.available_states(), australian_states().as_slice());
    assert_eq!(after_a.state.selected_country(), Some(&australia()));
}

#[test]
fn stale_failure_is_not_reported() {
    let select_a = SelectionState::default().reduce(SelectionAction::SelectCountry(philippines()));
    let (a_id, a_generation) = fetch_effect(&select_a);
    let select_b = select_a
        .state
        .reduce(SelectionAction::SelectCountry(australia()));

    let late_a = select_b.state.reduce(SelectionAction::StatesLoaded {
        country_id: a_id,
        generation: a_generation,
        result: Err(forbidden(a_id)),
    });

    assert!(late_a.effects.is_empty());
    assert!(late_a.state.is_loading_states());
}

#[test]
fn reselecting_same_country_discards_the_earlier_fetch() {
    let first = SelectionState::default().reduce(SelectionAction::SelectCountry(australia()));
    let (_, first_generation) = fetch_effect(&first);
    let second = first
        .state
        .reduce(SelectionAction::SelectCountry(australia()));

    let late_first = second.state.reduce(SelectionAction::StatesLoaded {
        country_id: australia().id,
        generation: first_generation,
        result: Ok(vec![SelectOption::new(99, "Stale")]),
    });

    assert!(late_first.state.available_states().is_empty());
    assert!(late_first.state.is_loading_states());
}

#[test]
fn australia_victoria_scenario() {
    let state = loaded(
        &SelectionState::new(Capability::SelectionOnly),
        australia(),
        australian_states(),
    );
    assert_eq!(state.phase(), SelectionPhase::Dirty);

    let state = state
        .reduce(SelectionAction::SelectState(SelectOption::new(11, "Victoria")))
        .state;
    let transition = state.reduce(SelectionAction::Submit);

    assert_eq!(
        transition.state.confirmed_summary(),
        Some("Your desired location: Australia, Victoria")
    );
    assert!(!transition.state.is_dirty());
    assert!(transition.effects.is_empty());
}

#[test]
fn failed_states_fetch_keeps_country_and_allows_submit() {
    let select = SelectionState::default().reduce(SelectionAction::SelectCountry(philippines()));
    let (country_id, generation) = fetch_effect(&select);

    let failed = select.state.reduce(SelectionAction::StatesLoaded {
        country_id,
        generation,
        result: Err(forbidden(country_id)),
    });

    let state = &failed.state;
    assert!(state.available_states().is_empty());
    assert!(!state.is_loading_states());
    assert_eq!(state.selected_country().map(|c| c.id), Some(OptionId(1)));
    assert!(state.can_submit());
    assert_eq!(
        failed.effects,
        vec![SelectionEffect::Report(ControllerError::States(forbidden(
            OptionId(1)
        )))]
    );

    let submitted = state.reduce(SelectionAction::Submit).state;
    assert_eq!(
        submitted.confirmed_summary(),
        Some("Your desired location: Philippines")
    );
}

#[test]
fn select_state_outside_loaded_list_is_ignored() {
    let state = loaded(&SelectionState::default(), australia(), australian_states());
    let transition = state.reduce(SelectionAction::SelectState(SelectOption::new(20, "Luzon")));

    assert_eq!(transition.state, state);
    assert_eq!(transition.state.selected_state(), None);

    let confirmed = state.reduce(SelectionAction::Submit).state;
    assert!(!confirmed.is_dirty());
    let rejected = confirmed
        .reduce(SelectionAction::SelectState(SelectOption::new(20, "Luzon")))
        .state;
    assert!(!rejected.is_dirty(), "a rejected option leaves the dirty flag alone");
    assert_eq!(rejected, confirmed);
}

#[test]
fn submit_with_map_issues_geocode_and_applies_first_match() {
    let state = loaded(
        &SelectionState::new(Capability::WithMap),
        australia(),
        australian_states(),
    );
    let state = state
        .reduce(SelectionAction::SelectState(SelectOption::new(11, "Victoria")))
        .state;

    let submitted = state.reduce(SelectionAction::Submit);
    let generation = match submitted.effects.as_slice() {
        [SelectionEffect::Geocode {
            address,
            generation,
        }] => {
            assert_eq!(address, "Victoria, Australia");
            *generation
        }
        other => panic!("expected geocode effect, got {other:?}"),
    };
    assert!(submitted.state.confirmed_summary().is_some());
    assert_eq!(submitted.state.resolved_location(), None);

    let resolved = submitted.state.reduce(SelectionAction::LocationResolved {
        generation,
        result: Ok(Coordinates::new(-36.98, 143.39)),
    });
    assert_eq!(
        resolved.state.resolved_location(),
        Some(Coordinates::new(-36.98, 143.39))
    );
    assert_eq!(
        resolved.state.confirmed_summary(),
        Some("Your desired location: Australia, Victoria")
    );
}

#[test]
fn geocode_address_without_state_is_country_only() {
    let state = loaded(
        &SelectionState::new(Capability::WithMap),
        philippines(),
        Vec::new(),
    );
    let submitted = state.reduce(SelectionAction::Submit);
    assert!(matches!(
        submitted.effects.as_slice(),
        [SelectionEffect::Geocode { address, .. }] if address == "Philippines"
    ));
}

#[test]
fn geocode_failure_is_reported_but_summary_stays() {
    let state = loaded(&SelectionState::new(Capability::WithMap), australia(), Vec::new());
    let submitted = state.reduce(SelectionAction::Submit);
    let generation = submitted.state.confirmation_generation();

    let err = GeocodeError::NoMatch {
        address: "Australia".to_string(),
    };
    let failed = submitted.state.reduce(SelectionAction::LocationResolved {
        generation,
        result: Err(err.clone()),
    });

    assert_eq!(failed.state.resolved_location(), None);
    assert_eq!(
        failed.state.confirmed_summary(),
        Some("Your desired location: Australia")
    );
    assert_eq!(
        failed.effects,
        vec![SelectionEffect::Report(ControllerError::Geocode(err))]
    );
}

#[test]
fn geocode_result_after_selection_change_is_dropped() {
    let state = loaded(
        &SelectionState::new(Capability::WithMap),
        australia(),
        australian_states(),
    );
    let submitted = state.reduce(SelectionAction::Submit);
    let generation = submitted.state.confirmation_generation();

    let changed = submitted
        .state
        .reduce(SelectionAction::SelectState(SelectOption::new(10, "Queensland")))
        .state;
    let late = changed.reduce(SelectionAction::LocationResolved {
        generation,
        result: Ok(Coordinates::new(-25.0, 133.0)),
    });

    assert_eq!(late.state.resolved_location(), None);
    assert!(late.effects.is_empty());
}

#[test]
fn selection_only_submit_never_geocodes() {
    let state = loaded(
        &SelectionState::new(Capability::SelectionOnly),
        australia(),
        australian_states(),
    );
    assert!(state.reduce(SelectionAction::Submit).effects.is_empty());
}

#[test]
fn reset_discards_selection_but_keeps_responses_stale() {
    let select = SelectionState::new(Capability::WithMap)
        .reduce(SelectionAction::SelectCountry(australia()));
    let (country_id, generation) = fetch_effect(&select);

    let reset = select.state.reduce(SelectionAction::Reset).state;
    assert_eq!(reset.selected_country(), None);
    assert_eq!(reset.capability(), Capability::WithMap);
    assert_eq!(reset.phase(), SelectionPhase::Empty);

    let reselect = reset.reduce(SelectionAction::SelectCountry(australia()));
    let (_, new_generation) = fetch_effect(&reselect);
    assert_ne!(new_generation, generation);

    let late = reselect.state.reduce(SelectionAction::StatesLoaded {
        country_id,
        generation,
        result: Ok(vec![SelectOption::new(99, "Stale")]),
    });
    assert!(late.state.available_states().is_empty());
}

#[test]
fn summary_and_address_formatting() {
    let victoria = SelectOption::new(11, "Victoria");
    assert_eq!(
        summary_text(&australia(), Some(&victoria)),
        "Your desired location: Australia, Victoria"
    );
    assert_eq!(summary_text(&australia(), None), "Your desired location: Australia");
    assert_eq!(
        geocode_address(&australia(), Some(&victoria)),
        "Victoria, Australia"
    );
}
