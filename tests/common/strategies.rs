use download_query::query_builder::{Combinator, Wildcard};
use download_query::StatusFilter;
use proptest::prelude::*;

/// Strategy for generating column-name tokens
pub fn column_strategy() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,15}"
}

/// Strategy for generating opaque argument values
pub fn argument_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,12}"
}

pub fn wildcard_strategy() -> impl Strategy<Value = Wildcard> {
    prop_oneof![
        Just(Wildcard::Equals),
        Just(Wildcard::MoreThanEqual),
        Just(Wildcard::LessThan),
    ]
}

pub fn combinator_strategy() -> impl Strategy<Value = Combinator> {
    prop_oneof![Just(Combinator::And), Just(Combinator::Or)]
}

/// Strategy for generating any valid status filter, including the empty one
pub fn status_filter_strategy() -> impl Strategy<Value = StatusFilter> {
    (0..=StatusFilter::KNOWN_BITS).prop_map(|bits| StatusFilter::from_bits(bits).unwrap())
}

/// One builder step: a selection with its argument, or a nested group of selections
#[derive(Debug, Clone)]
pub enum Step {
    Selection {
        column: String,
        wildcard: Wildcard,
        argument: String,
    },
    Group(Vec<(Combinator, Step)>),
}

fn selection_strategy() -> impl Strategy<Value = Step> {
    (column_strategy(), wildcard_strategy(), argument_strategy()).prop_map(
        |(column, wildcard, argument)| Step::Selection {
            column,
            wildcard,
            argument,
        },
    )
}

/// Strategy for generating a nested step tree two levels deep
pub fn step_strategy() -> impl Strategy<Value = Step> {
    selection_strategy().prop_recursive(2, 16, 4, |inner| {
        prop::collection::vec((combinator_strategy(), inner), 1..4).prop_map(Step::Group)
    })
}

/// Strategy for generating a top-level sequence of steps
pub fn steps_strategy() -> impl Strategy<Value = Vec<(Combinator, Step)>> {
    prop::collection::vec((combinator_strategy(), step_strategy()), 1..6)
}
