//! Statement parsing tests over complete queries.

use pretty_assertions::assert_eq;
use relq_sql::{parse, parse_filter, ConditionAtom, FilterExpr, JoinClause, JoinKind, ParseError, Statement};

fn cond(left: &str, op: &str, right: &str) -> FilterExpr {
    FilterExpr::condition(left, op, right)
}

#[test]
fn test_select_with_join_and_where() {
    let statement = parse(
        "select id, name from employees, tasks inner join tasks on employee.id = tasks.employee_id \
         where salary > 10000 and salary < 100000",
    )
    .unwrap();

    assert_eq!(
        statement,
        Statement {
            select_list: vec!["id".into(), "name".into()],
            from_list: vec!["employees".into(), "tasks".into()],
            joins: vec![JoinClause {
                kind: JoinKind::Inner,
                table: "tasks".into(),
                on: cond("employee.id", "=", "tasks.employee_id"),
            }],
            where_clause: Some(FilterExpr::and(
                cond("salary", ">", "10000"),
                cond("salary", "<", "100000"),
            )),
        }
    );

    let atoms = statement.where_clause.as_ref().map(FilterExpr::conditions);
    assert_eq!(
        atoms,
        Some(vec![
            &ConditionAtom::new("salary", ">", "10000"),
            &ConditionAtom::new("salary", "<", "100000"),
        ])
    );
}

#[test]
fn test_and_binds_tighter_than_or() {
    assert_eq!(
        parse_filter("a = 1 and b = 2 or c = 3 and d = 4").unwrap(),
        FilterExpr::or(
            FilterExpr::and(cond("a", "=", "1"), cond("b", "=", "2")),
            FilterExpr::and(cond("c", "=", "3"), cond("d", "=", "4")),
        )
    );
}

#[test]
fn test_parentheses_override_precedence() {
    assert_eq!(
        parse_filter("a = 1 and (b = 2 or c = 3) and d = 4").unwrap(),
        FilterExpr::and(
            cond("a", "=", "1"),
            FilterExpr::and(
                FilterExpr::or(cond("b", "=", "2"), cond("c", "=", "3")),
                cond("d", "=", "4"),
            ),
        )
    );
}

#[test]
fn test_precedence_inside_where_clause() {
    let statement =
        parse("select * from t where a = 1 and (b = 2 or c = 3) and d = 4").unwrap();
    assert_eq!(
        statement.where_clause,
        Some(parse_filter("a = 1 and (b = 2 or c = 3) and d = 4").unwrap())
    );
}

#[test]
fn test_left_outer_join_with_compound_condition() {
    let statement = parse(
        "select e.name, t.title from employees e_alias \
         left outer join tasks on id = employee_id and (status = open or status = blocked)",
    );
    // `e_alias` follows the table name without a comma, so the join keyword
    // is not where the parser expects it.
    assert!(matches!(
        statement,
        Err(ParseError::InvalidToken { ref found, .. }) if found == "e_alias"
    ));

    let statement = parse(
        "select e.name, t.title from employees \
         left outer join tasks on id = employee_id and (status = open or status = blocked)",
    )
    .unwrap();
    assert_eq!(statement.joins.len(), 1);
    assert_eq!(
        statement.joins[0].on,
        FilterExpr::and(
            cond("id", "=", "employee_id"),
            FilterExpr::or(cond("status", "=", "open"), cond("status", "=", "blocked")),
        )
    );
}

#[test]
fn test_error_reports_position_and_expected() {
    let source = "select id from employees inner tasks on id = employee_id";
    let err = parse(source).unwrap_err();
    assert_eq!(err.position(), 31);
    assert_eq!(err.expected(), ["join".to_string()]);
    assert!(err
        .format_with_source(source)
        .contains("expected `join`, found `tasks`"));
}
