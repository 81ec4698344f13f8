//! End-to-end tests: build plans, run them against a catalog and post-process
//! the result with the relational operators.

use relq_core::{Record, Table, Value};
use relq_query::executor::{
    execute, inner_join, left_outer_join, order_by_columns, projection, rename, select, Catalog,
    ExecutionError, SortOrder,
};
use relq_query::planner::{BinaryCondition, Condition, JoinType, PlanNode, QueryPlan, QueryPlanBuilder};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

const EMPLOYEES: [(i64, &str, &str); 5] = [
    (0, "Michael Scott", "Regional Manager"),
    (1, "Dwight Schrute", "Assistant to the Regional Manager"),
    (2, "Jim Halpert", "Sales"),
    (3, "Pam Beesly", "Receptionist"),
    (4, "Toby Flenderson", "HR"),
];

fn employees() -> Table {
    EMPLOYEES
        .iter()
        .map(|&(id, name, position)| {
            Record::from_pairs([
                ("id", Value::Int(id)),
                ("name", Value::from(name)),
                ("position", Value::from(position)),
            ])
        })
        .collect()
}

/// Ten tasks spread over employees 0..=3; employee 4 has none.
fn tasks() -> Table {
    (0..10i64)
        .map(|task_id| {
            Record::from_pairs([
                ("task_id", Value::Int(task_id)),
                ("employee_id", Value::Int(task_id % 4)),
                ("title", Value::String(format!("task {}", task_id))),
            ])
        })
        .collect()
}

fn catalog() -> Catalog {
    Catalog::new()
        .with_table("employees", employees())
        .with_table("tasks", tasks())
}

fn assignment_plan(join_type: JoinType) -> QueryPlan {
    match QueryPlanBuilder::new()
        .scan("employees")
        .scan("tasks")
        .join(join_type, [BinaryCondition::eq("id", "employee_id")])
        .build()
    {
        Ok(plan) => plan,
        Err(e) => panic!("failed to build plan: {}", e),
    }
}

#[test]
fn test_inner_join_end_to_end() {
    init_tracing();
    let result = execute(&assignment_plan(JoinType::Inner), &catalog()).unwrap();

    assert_eq!(result.len(), 10);
    assert!(result
        .iter()
        .all(|r| r.get("left.id") == r.get("right.employee_id")));
}

#[test]
fn test_left_outer_join_end_to_end() {
    init_tracing();
    let result = execute(&assignment_plan(JoinType::LeftOuter), &catalog()).unwrap();

    assert_eq!(result.len(), 11);
    let unmatched: Vec<&Record> = result.iter().filter(|r| !r.contains("right")).collect();
    assert_eq!(unmatched.len(), 1);
    assert_eq!(unmatched[0].get("left.name"), &Value::from("Toby Flenderson"));
    assert!(unmatched[0].get("right.task_id").is_null());
}

#[test]
fn test_rename_project_order_pipeline() {
    init_tracing();
    let joined = execute(&assignment_plan(JoinType::LeftOuter), &catalog()).unwrap();

    let renamed = rename(&joined, &[("left.name", "employee"), ("right.task_id", "task")]);
    let projected = projection(&renamed, &["employee", "task"]);
    assert_eq!(projected.len(), 11);

    let ordered = order_by_columns(
        &projected,
        &[("employee", SortOrder::Asc), ("task", SortOrder::Desc)],
    );
    let rows: Vec<(String, Option<i64>)> = ordered
        .iter()
        .map(|r| {
            (
                r.get("employee").as_str().unwrap_or_default().to_string(),
                r.get("task").as_i64(),
            )
        })
        .collect();

    assert_eq!(rows[0], ("Dwight Schrute".to_string(), Some(9)));
    assert_eq!(rows[1], ("Dwight Schrute".to_string(), Some(5)));
    assert_eq!(rows[2], ("Dwight Schrute".to_string(), Some(1)));
    assert_eq!(rows[3], ("Jim Halpert".to_string(), Some(6)));
    assert_eq!(rows[10], ("Toby Flenderson".to_string(), None));
}

#[test]
fn test_select_after_join() {
    let joined = execute(&assignment_plan(JoinType::Inner), &catalog()).unwrap();
    let sales = select(&joined, |r| r.get("left.position") == &Value::from("Sales"));

    // Jim (id 2) owns tasks 2 and 6.
    assert_eq!(sales.len(), 2);
    let mut task_ids: Vec<i64> = sales
        .iter()
        .filter_map(|r| r.get("right.task_id").as_i64())
        .collect();
    task_ids.sort();
    assert_eq!(task_ids, vec![2, 6]);
}

#[test]
fn test_builder_matches_hand_built_plan() {
    let built = assignment_plan(JoinType::Inner);
    let manual = QueryPlan::new(PlanNode::join(
        JoinType::Inner,
        PlanNode::scan("employees"),
        PlanNode::scan("tasks"),
        vec![Condition::from(BinaryCondition::eq("id", "employee_id"))],
    ));
    assert_eq!(built, manual);
    assert_eq!(execute(&built, &catalog()), execute(&manual, &catalog()));
}

#[test]
fn test_plan_matches_direct_operator_call() {
    let condition = BinaryCondition::eq("id", "employee_id");
    let direct = inner_join(&employees(), &tasks(), condition.predicate());
    assert_eq!(execute(&assignment_plan(JoinType::Inner), &catalog()), Ok(direct));

    let direct = left_outer_join(&employees(), &tasks(), condition.predicate());
    assert_eq!(execute(&assignment_plan(JoinType::LeftOuter), &catalog()), Ok(direct));
}

#[test]
fn test_three_way_join() {
    init_tracing();
    let reviews: Table = [(2i64, "great"), (6, "late")]
        .iter()
        .map(|&(task_id, note)| {
            Record::from_pairs([("reviewed_task", Value::Int(task_id)), ("note", Value::from(note))])
        })
        .collect();
    let data = catalog().with_table("reviews", reviews);

    let plan = QueryPlanBuilder::new()
        .scan("employees")
        .scan("tasks")
        .join(JoinType::Inner, [BinaryCondition::eq("id", "employee_id")])
        .scan("reviews")
        .join(
            JoinType::LeftOuter,
            [BinaryCondition::eq("right.task_id", "reviewed_task")],
        )
        .build()
        .unwrap();

    let result = execute(&plan, &data).unwrap();
    assert_eq!(result.len(), 10);
    let reviewed = select(&result, |r| !r.get("right.note").is_null());
    assert_eq!(reviewed.len(), 2);
    assert!(reviewed
        .iter()
        .all(|r| r.get("left.left.name") == &Value::from("Jim Halpert")));
}

#[test]
fn test_unknown_table_is_reported() {
    let plan = QueryPlanBuilder::new()
        .scan("employees")
        .scan("projects")
        .join(JoinType::Cartesian, Vec::<Condition>::new())
        .build()
        .unwrap();
    assert_eq!(
        execute(&plan, &catalog()),
        Err(ExecutionError::UnknownTable("projects".into()))
    );
}
