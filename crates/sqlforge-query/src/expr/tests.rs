//! Tests for expression, condition and FROM nodes.

use std::collections::BTreeSet;

use super::*;
use crate::{
	backend::{GenericDialect, MySqlDialect, PostgresDialect},
	error::SqlError,
	query::{IsSql, SqlSelect},
	sql_utils,
	types::{JoinMode, Operator},
	value::{Value, Values},
};

mod expression_tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	#[rstest]
	#[case::field(Expression::field("t", "a"), "t.a")]
	#[case::field_without_source(Expression::field("", "a"), "a")]
	#[case::all_fields(Expression::field("t", "*"), "t.*")]
	#[case::name(Expression::name("dbo.Users"), "dbo.Users")]
	#[case::raw(Expression::raw("CURRENT_TIMESTAMP"), "CURRENT_TIMESTAMP")]
	#[case::string(Expression::constant("it's"), "'it''s'")]
	#[case::null(Expression::constant(Value::Int(None)), "null")]
	fn test_generic_rendering(#[case] expr: Expression, #[case] expected: &str) {
		assert_eq!(expr.sql_string(&GenericDialect, false).unwrap(), expected);
	}

	#[rstest]
	fn test_field_quoting_follows_dialect() {
		let expr = Expression::field("u", "Name");
		assert_eq!(expr.sql_string(&PostgresDialect, false).unwrap(), r#""u"."Name""#);
		assert_eq!(expr.sql_string(&MySqlDialect, false).unwrap(), "`u`.`Name`");

		// `*` is never quoted
		let all = Expression::field("u", "*");
		assert_eq!(all.sql_string(&PostgresDialect, false).unwrap(), r#""u".*"#);
	}

	#[rstest]
	fn test_constant_placeholder() {
		let expr = Expression::constant(42);
		assert_eq!(expr.sql_string(&GenericDialect, true).unwrap(), "?");
		assert_eq!(expr.sql_params(), Values(vec![Value::Int(Some(42))]));
	}

	#[rstest]
	fn test_null_constant_is_never_a_parameter() {
		let expr = Expression::constant(Value::String(None));
		assert_eq!(expr.sql_string(&GenericDialect, true).unwrap(), "null");
		assert!(expr.sql_params().is_empty());
	}

	#[rstest]
	fn test_function_params_follow_argument_order() {
		let expr = sql_utils::plus([
			sql_utils::constant(1),
			sql_utils::field("t", "a"),
			sql_utils::constant("x"),
		]);

		assert_eq!(expr.sql_string(&GenericDialect, true).unwrap(), "(? + t.a + ?)");
		assert_eq!(
			expr.sql_params(),
			Values(vec![Value::from(1), Value::from("x")])
		);
	}

	#[rstest]
	fn test_if_expression() {
		let expr = sql_utils::sql_if(
			sql_utils::equal("t", "kind", "A"),
			sql_utils::constant(1),
			sql_utils::field("t", "fallback"),
		);

		assert_eq!(
			expr.sql_string(&GenericDialect, true).unwrap(),
			"CASE WHEN t.kind = ? THEN ? ELSE t.fallback END"
		);
		assert_eq!(
			expr.sql_params(),
			Values(vec![Value::from("A"), Value::from(1)])
		);
		assert_eq!(
			expr.sql_string(&GenericDialect, false).unwrap(),
			"CASE WHEN t.kind = 'A' THEN 1 ELSE t.fallback END"
		);
	}

	#[rstest]
	fn test_bit_and() {
		let expr = sql_utils::bit_and(sql_utils::field("t", "flags"), 4);
		assert_eq!(expr.sql_string(&GenericDialect, false).unwrap(), "(t.flags & 4)");
		assert_eq!(expr.sql_string(&GenericDialect, true).unwrap(), "(t.flags & ?)");
	}

	#[rstest]
	fn test_scalar_subquery() {
		let mut select = SqlSelect::new();
		select
			.add_count("n")
			.add_from("Orders")
			.set_where(sql_utils::equal("Orders", "Open", true));
		let expr = Expression::query(select);

		assert_eq!(
			expr.sql_string(&GenericDialect, true).unwrap(),
			"(SELECT COUNT(*) AS n FROM Orders WHERE Orders.Open = ?)"
		);
		assert_eq!(expr.sql_params().len(), 1);
		assert_eq!(expr.sources(), BTreeSet::from(["Orders".to_string()]));
	}

	#[rstest]
	#[case::empty_name(Expression::name(""), true)]
	#[case::blank_raw(Expression::raw("  "), true)]
	#[case::empty_query(Expression::query(SqlSelect::new()), true)]
	#[case::null(Expression::constant(Value::Int(None)), false)]
	#[case::field(Expression::field("t", "a"), false)]
	fn test_is_empty(#[case] expr: Expression, #[case] expected: bool) {
		assert_eq!(expr.is_empty(), expected);
	}

	#[rstest]
	fn test_sources_collects_nested_fields() {
		let expr = sql_utils::nvl([
			sql_utils::field("a", "x"),
			sql_utils::field("b", "y"),
			sql_utils::field("", "z"),
		]);
		assert_eq!(
			expr.sources(),
			BTreeSet::from(["a".to_string(), "b".to_string()])
		);
	}
}

mod condition_tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	fn render(condition: &Condition) -> String {
		condition.sql_string(&GenericDialect, false).unwrap()
	}

	#[rstest]
	#[case::eq(sql_utils::equal("t", "a", 1), "t.a = 1")]
	#[case::ne(sql_utils::not_equal("t", "a", 1), "t.a <> 1")]
	#[case::lt(sql_utils::less("t", "a", 1), "t.a < 1")]
	#[case::le(sql_utils::less_equal("t", "a", 1), "t.a <= 1")]
	#[case::gt(sql_utils::more("t", "a", 1), "t.a > 1")]
	#[case::ge(sql_utils::more_equal("t", "a", 1), "t.a >= 1")]
	#[case::is_null(sql_utils::is_null("t", "a"), "t.a IS NULL")]
	#[case::not_null(sql_utils::not_null("t", "a"), "t.a IS NOT NULL")]
	#[case::in_list(sql_utils::in_list("t", "a", [1, 2, 3]), "t.a IN (1, 2, 3)")]
	#[case::join(sql_utils::join("a", "id", "b", "a_id"), "a.id = b.a_id")]
	#[case::join_using(sql_utils::join_using("a", "b", "id"), "a.id = b.id")]
	#[case::always(sql_utils::always(), "1 = 1")]
	fn test_leaf_rendering(#[case] condition: Condition, #[case] expected: &str) {
		assert_eq!(render(&condition), expected);
	}

	#[rstest]
	fn test_like_escapes_wildcards() {
		let condition = sql_utils::contains(sql_utils::field("t", "name"), "50%_off|");
		assert_eq!(
			render(&condition),
			"t.name LIKE '%50|%|_off||%' ESCAPE '|'"
		);

		let plain = sql_utils::like(sql_utils::field("t", "name"), "A%");
		assert_eq!(render(&plain), "t.name LIKE 'A%'");
	}

	#[rstest]
	fn test_empty_compounds_render_nothing() {
		assert!(Condition::all().is_empty());
		assert!(Condition::any().is_empty());
		assert!(Condition::all().add(Condition::any()).is_empty());
		assert!(Condition::any().not().is_empty());

		assert_eq!(render(&Condition::all()), "");
		assert_eq!(render(&Condition::any().not()), "");
	}

	#[rstest]
	fn test_and_with_empty_is_identity() {
		let c1 = sql_utils::equal("t", "a", 1);
		let combined = sql_utils::and([c1.clone(), Condition::any()]);

		assert_eq!(render(&combined), render(&c1));
		assert_eq!(combined.sql_params(), c1.sql_params());
	}

	#[rstest]
	fn test_nested_combinators_are_parenthesized() {
		let condition = sql_utils::and([
			sql_utils::equal("t", "a", 1),
			sql_utils::or([sql_utils::equal("t", "b", 2), sql_utils::equal("t", "c", 3)]),
		]);
		assert_eq!(render(&condition), "t.a = 1 AND (t.b = 2 OR t.c = 3)");
	}

	#[rstest]
	fn test_single_child_combinator_is_not_parenthesized() {
		let condition = sql_utils::and([
			sql_utils::equal("t", "a", 1),
			sql_utils::or([sql_utils::equal("t", "b", 2), Condition::all()]),
		]);
		assert_eq!(render(&condition), "t.a = 1 AND t.b = 2");
	}

	#[rstest]
	fn test_add_flattens_same_combinator() {
		let condition = Condition::all()
			.add(sql_utils::equal("t", "a", 1))
			.add(sql_utils::and([sql_utils::equal("t", "b", 2)]));
		assert_eq!(
			condition,
			Condition::And(vec![
				sql_utils::equal("t", "a", 1),
				sql_utils::equal("t", "b", 2)
			])
		);
	}

	#[rstest]
	fn test_add_to_leaf_builds_conjunction() {
		let condition = sql_utils::equal("t", "a", 1).add(sql_utils::equal("t", "b", 2));
		assert_eq!(render(&condition), "t.a = 1 AND t.b = 2");
	}

	#[rstest]
	#[case::some(Some(sql_utils::equal("t", "b", 2)), "t.a = 1 AND t.b = 2")]
	#[case::none(None, "t.a = 1")]
	fn test_add_option(#[case] extra: Option<Condition>, #[case] expected: &str) {
		let condition = Condition::all()
			.add(sql_utils::equal("t", "a", 1))
			.add_option(extra);
		assert_eq!(render(&condition), expected);
	}

	#[rstest]
	fn test_not() {
		let condition = sql_utils::not(sql_utils::or([
			sql_utils::is_null("t", "a"),
			sql_utils::equal("t", "a", 0),
		]));
		assert_eq!(render(&condition), "NOT (t.a IS NULL OR t.a = 0)");
	}

	#[rstest]
	fn test_empty_in_list_fails() {
		let condition = sql_utils::in_list("t", "a", Vec::<i32>::new());
		let err = condition.sql_string(&GenericDialect, false).unwrap_err();
		assert!(matches!(err, SqlError::EmptyInList));
	}

	#[rstest]
	fn test_in_query() {
		let mut sub = SqlSelect::new();
		sub.add_fields("o", ["UserId"])
			.add_from_as("Orders", "o")
			.set_where(sql_utils::more("o", "Total", 100));
		let condition = sql_utils::in_query("u", "Id", sub);

		assert_eq!(
			condition.sql_string(&GenericDialect, true).unwrap(),
			"u.Id IN (SELECT o.UserId FROM Orders o WHERE o.Total > ?)"
		);
		assert_eq!(condition.sql_params(), Values(vec![Value::from(100)]));
	}

	#[rstest]
	fn test_params_skip_empty_children_and_nulls() {
		let condition = sql_utils::and([
			sql_utils::equal("t", "a", 1),
			Condition::any(),
			sql_utils::equal("t", "b", Value::Int(None)),
			sql_utils::in_list("t", "c", ["x", "y"]),
		]);

		assert_eq!(
			condition.sql_string(&GenericDialect, true).unwrap(),
			"t.a = ? AND t.b = null AND t.c IN (?, ?)"
		);
		assert_eq!(
			condition.sql_params(),
			Values(vec![Value::from(1), Value::from("x"), Value::from("y")])
		);
	}

	#[rstest]
	fn test_compare_arbitrary_expressions() {
		let condition = sql_utils::compare(
			sql_utils::length(sql_utils::field("t", "name")),
			Operator::Gt,
			sql_utils::constant(3),
		);
		assert_eq!(render(&condition), "LENGTH(t.name) > 3");
	}

	#[rstest]
	fn test_sources() {
		let condition = sql_utils::or([
			sql_utils::join("a", "id", "b", "a_id"),
			sql_utils::is_null("c", "x"),
		]);
		assert_eq!(
			condition.sources(),
			BTreeSet::from(["a".to_string(), "b".to_string(), "c".to_string()])
		);
	}
}

mod from_tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	#[rstest]
	#[case::table(FromClause::table("Users", None), "Users")]
	#[case::aliased(FromClause::table("Users", Some("u")), "Users u")]
	#[case::dotted(FromClause::table("dbo.Users", Some("u")), "dbo.Users u")]
	fn test_table_rendering(#[case] from: FromClause, #[case] expected: &str) {
		assert_eq!(from.sql_string(&GenericDialect, false).unwrap(), expected);
	}

	#[rstest]
	fn test_postgres_quotes_table_and_alias() {
		let from = FromClause::table("public.Users", Some("u"));
		assert_eq!(
			from.sql_string(&PostgresDialect, false).unwrap(),
			r#""public"."Users" "u""#
		);
	}

	#[rstest]
	fn test_join_appends_on_condition() {
		let from = FromClause::table("Orders", Some("o"))
			.join(JoinMode::Left, sql_utils::join("u", "Id", "o", "UserId"));

		assert_eq!(from.mode(), JoinMode::Left);
		assert_eq!(
			from.sql_string(&GenericDialect, false).unwrap(),
			"Orders o ON u.Id = o.UserId"
		);
	}

	#[rstest]
	fn test_join_with_empty_condition_omits_on() {
		let from = FromClause::table("Orders", Some("o")).join(JoinMode::Inner, Condition::all());
		assert_eq!(from.sql_string(&GenericDialect, false).unwrap(), "Orders o");
	}

	#[rstest]
	fn test_subquery_source() {
		let mut sub = SqlSelect::new();
		sub.add_fields("Orders", ["UserId"])
			.add_from("Orders")
			.set_where(sql_utils::equal("Orders", "Status", "open"));
		let from = FromClause::query(sub, "open_orders")
			.join(JoinMode::Inner, sql_utils::join("u", "Id", "open_orders", "UserId"));

		assert_eq!(
			from.sql_string(&GenericDialect, true).unwrap(),
			"(SELECT Orders.UserId FROM Orders WHERE Orders.Status = ?) open_orders ON u.Id = open_orders.UserId"
		);
		assert_eq!(from.sql_params(), Values(vec![Value::from("open")]));
		assert!(matches!(from.source(), FromSource::Query { alias, .. } if alias == "open_orders"));
	}

	#[rstest]
	fn test_is_empty() {
		assert!(FromClause::table("", None).is_empty());
		assert!(FromClause::query(SqlSelect::new(), "q").is_empty());
		assert!(!FromClause::table("Users", None).is_empty());
	}

	#[rstest]
	fn test_sources_include_join_condition() {
		let from = FromClause::table("Orders", Some("o"))
			.join(JoinMode::Inner, sql_utils::join("u", "Id", "o", "UserId"));
		assert_eq!(
			from.sources(),
			BTreeSet::from(["Orders".to_string(), "o".to_string(), "u".to_string()])
		);
	}
}
