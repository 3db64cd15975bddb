use decision_table::{Action, Condition, DecisionTable, Expect, Mask, NameRegistry};

use proptest::collection::{hash_set, vec};
use proptest::prelude::*;

type Row = (Vec<bool>, Vec<i8>);

// Outcome per condition, plus cases with distinct masks and arbitrary results
fn table_inputs() -> impl Strategy<Value = (Vec<bool>, Vec<Row>)> {
    (1usize..5).prop_flat_map(|n| {
        let outcomes = vec(any::<bool>(), n);
        let max_cases = (1usize << n).min(8);
        let cases = hash_set(vec(any::<bool>(), n), 0..=max_cases).prop_flat_map(move |masks| {
            let masks: Vec<Vec<bool>> = masks.into_iter().collect();
            let count = masks.len();
            let results = vec(vec(prop_oneof![Just(-1i8), Just(0i8), Just(1i8)], n), count);
            (Just(masks), results)
                .prop_map(|(masks, results)| masks.into_iter().zip(results).collect::<Vec<Row>>())
        });
        (outcomes, cases)
    })
}

// Case `i` triggers action `i`, which returns `i`
fn build(outcomes: &[bool], cases: &[Row]) -> DecisionTable<bool, usize> {
    let registry = NameRegistry::new();
    let mut table = DecisionTable::with_registry("property", &registry).unwrap();

    for k in 0..outcomes.len() {
        let condition = Condition::new(format!("c{}", k), 1, |args: &[bool]| args[0]);
        table.register_condition(&condition).unwrap();
    }
    for i in 0..cases.len() {
        table
            .register_action(&Action::new(format!("a{}", i), move || i))
            .unwrap();
    }
    for (i, (mask, result)) in cases.iter().enumerate() {
        table
            .add_case(
                mask.iter().map(|&m| Mask::from(m)).enumerate(),
                result
                    .iter()
                    .map(|&r| Expect::try_from(r).unwrap())
                    .enumerate(),
                [i],
            )
            .unwrap();
    }
    table
}

fn encode(outcome: bool) -> i8 {
    if outcome {
        1
    } else {
        -1
    }
}

fn args(outcomes: &[bool]) -> Vec<(usize, Vec<bool>)> {
    outcomes
        .iter()
        .enumerate()
        .map(|(k, &outcome)| (k, vec![outcome]))
        .collect()
}

proptest! {
    #[test]
    fn prop_case_matches_iff_masked_outcome_equals_result((outcomes, cases) in table_inputs()) {
        let table = build(&outcomes, &cases);

        let expected: Vec<usize> = cases
            .iter()
            .enumerate()
            .filter(|(_, (mask, result))| {
                (0..outcomes.len())
                    .all(|k| i8::from(mask[k]) * encode(outcomes[k]) == result[k])
            })
            .map(|(i, _)| i)
            .collect();

        let triggered = table.run_actions(args(&outcomes)).unwrap();
        prop_assert_eq!(triggered, expected);
    }

    #[test]
    fn prop_new_condition_is_dont_care_everywhere(
        (outcomes, cases) in table_inputs(),
        extra in any::<bool>(),
    ) {
        let mut table = build(&outcomes, &cases);
        let before = table.run_actions(args(&outcomes)).unwrap();

        let n = outcomes.len();
        let condition = Condition::new("extra", 1, |args: &[bool]| args[0]);
        prop_assert_eq!(table.register_condition(&condition).unwrap(), n);

        for case in table.cases() {
            prop_assert_eq!(case.mask().len(), n + 1);
            prop_assert_eq!(case.result().len(), n + 1);
            prop_assert_eq!(case.mask().get(&n), Some(&Mask::Ignore));
            prop_assert_eq!(case.result().get(&n), Some(&Expect::DontCare));
        }

        let mut extended = outcomes.clone();
        extended.push(extra);
        let after = table.run_actions(args(&extended)).unwrap();
        prop_assert_eq!(before, after);
    }
}
