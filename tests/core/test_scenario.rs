use decision_table::{
    Action, Condition, ConditionRef, DecisionTable, Expect, Mask, NameRegistry, TableError,
};

use pretty_assertions::assert_eq;

// Conditions on an order amount and a membership flag, encoded as i64 arguments
fn order_table(name: &str) -> Result<(DecisionTable<i64, String>, Vec<Condition<i64>>), TableError> {
    let mut table = DecisionTable::new(name)?;

    let large = Condition::new("large order", 1, |args: &[i64]| args[0] >= 100);
    let member = Condition::new("member", 1, |args: &[i64]| args[0] != 0);
    let in_range = Condition::new("amount in range", 3, |args: &[i64]| {
        args[1] <= args[0] && args[0] <= args[2]
    });

    for condition in [&large, &member, &in_range] {
        table.register_condition(condition)?;
    }

    let discount = Action::new("discount", || "apply discount".to_string());
    let free_shipping = Action::new("free shipping", || "ship for free".to_string());
    let review = Action::new("review", || "send to review".to_string());

    for action in [&discount, &free_shipping, &review] {
        table.register_action(action)?;
    }

    // Large orders from members get a discount and free shipping
    table.add_case(
        [(&large, Mask::Check), (&member, Mask::Check), (&in_range, Mask::Ignore)],
        [(&large, Expect::True), (&member, Expect::True), (&in_range, Expect::DontCare)],
        [&discount, &free_shipping],
    )?;
    // Any large order ships for free
    table.add_case(
        [(&large, Mask::Check), (&member, Mask::Ignore), (&in_range, Mask::Ignore)],
        [(&large, Expect::True), (&member, Expect::DontCare), (&in_range, Expect::DontCare)],
        [&free_shipping],
    )?;
    // Amounts outside the accepted range are reviewed
    table.add_case(
        [(&large, Mask::Ignore), (&member, Mask::Ignore), (&in_range, Mask::Check)],
        [(&large, Expect::DontCare), (&member, Expect::DontCare), (&in_range, Expect::False)],
        [&review],
    )?;

    Ok((table, vec![large, member, in_range]))
}

fn query(amount: i64, member: bool) -> Vec<(usize, Vec<i64>)> {
    vec![
        (0, vec![amount]),
        (1, vec![i64::from(member)]),
        (2, vec![amount, 1, 10_000]),
    ]
}

#[test]
fn test_order_table_large_member() {
    let (table, _) = order_table("scenario::large_member").unwrap();

    let outputs = table.run_actions(query(250, true)).unwrap();
    assert_eq!(
        outputs,
        vec!["apply discount", "ship for free", "ship for free"]
    );
}

#[test]
fn test_order_table_small_guest() {
    let (table, _) = order_table("scenario::small_guest").unwrap();

    assert!(table.run_actions(query(20, false)).unwrap().is_empty());
}

#[test]
fn test_order_table_out_of_range() {
    let (table, _) = order_table("scenario::out_of_range").unwrap();

    let outputs = table.run_actions(query(50_000, false)).unwrap();
    assert_eq!(outputs, vec!["ship for free", "send to review"]);
}

#[test]
fn test_order_table_query_by_handle() {
    let (table, conditions) = order_table("scenario::by_handle").unwrap();

    let actions = table
        .resolve_actions([
            (&conditions[2], vec![0, 1, 10_000]),
            (&conditions[0], vec![0]),
            (&conditions[1], vec![1]),
        ])
        .unwrap();
    let names: Vec<&str> = actions.iter().map(|a| a.name()).collect();
    assert_eq!(names, vec!["review"]);
}

#[test]
fn test_order_table_name_claimed_process_wide() {
    let _table = order_table("scenario::claimed").unwrap();

    assert!(NameRegistry::global().contains("scenario::claimed"));
    assert!(matches!(
        order_table("scenario::claimed"),
        Err(TableError::DuplicateName(_))
    ));
}

#[test]
fn test_mixed_keys_rejected_through_public_api() {
    let (mut table, conditions) = order_table("scenario::mixed").unwrap();

    let result = table.add_case(
        [
            (ConditionRef::from(&conditions[0]), Mask::Check),
            (ConditionRef::Id(1), Mask::Ignore),
            (ConditionRef::Id(2), Mask::Ignore),
        ],
        [
            (0usize, Expect::False),
            (1usize, Expect::DontCare),
            (2usize, Expect::DontCare),
        ],
        [0usize],
    );

    assert_eq!(result, Err(TableError::MixedReferences("conditions")));
    assert_eq!(table.case_count(), 3);
}

#[test]
fn test_errors_render_with_context() {
    let (table, _) = order_table("scenario::messages").unwrap();

    let err = table.resolve_actions([(0usize, vec![1])]).unwrap_err();
    assert_eq!(err.to_string(), "Expected arguments for 3 conditions, got 1");

    let err = table
        .resolve_actions([(0usize, vec![1]), (1usize, vec![1]), (2usize, vec![1])])
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Condition 'amount in range' takes 3 arguments, got 1"
    );
}
