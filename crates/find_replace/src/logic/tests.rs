use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;

use super::*;
use crate::target::RopeTarget;

fn setup(text: &str) -> (FindReplaceLogic, Rc<RefCell<RopeTarget>>) {
	let target = RopeTarget::new(text).shared();
	let mut logic = FindReplaceLogic::new();
	logic.update_target(target.clone());
	(logic, target)
}

fn selection(target: &Rc<RefCell<RopeTarget>>) -> TextRange {
	target.borrow().selection()
}

fn select(target: &Rc<RefCell<RopeTarget>>, range: TextRange) {
	target.borrow_mut().set_selection(range);
}

fn content(target: &Rc<RefCell<RopeTarget>>) -> String {
	target.borrow().content()
}

#[test]
fn test_no_target_is_error() {
	let mut logic = FindReplaceLogic::new();
	assert!(matches!(logic.find_next("x"), Err(FindReplaceError::NoTarget)));
	assert!(matches!(logic.replace_all("x", "y"), Err(FindReplaceError::NoTarget)));
}

#[test]
fn test_busy_target_is_error() {
	let (mut logic, target) = setup("line");
	let _guard = target.borrow_mut();
	assert!(matches!(logic.find_next("line"), Err(FindReplaceError::TargetBusy)));
}

#[test]
fn test_empty_query_is_no_match() {
	let (mut logic, target) = setup("line\nline");
	assert_eq!(logic.find_next("").unwrap(), Some(Status::NoMatch));
	assert_eq!(logic.find_previous("").unwrap(), Some(Status::NoMatch));
	assert_eq!(selection(&target), TextRange::point(0));
}

#[test]
fn test_cyclic_find_wraps() {
	let (mut logic, target) = setup("line\nline\nline");
	for expected in [0, 5, 10] {
		assert_eq!(logic.find_next("line").unwrap(), None);
		assert_eq!(selection(&target), TextRange::new(expected, 4));
	}
	assert_eq!(logic.find_next("line").unwrap(), Some(Status::Wrapped));
	assert_eq!(selection(&target), TextRange::new(0, 4));
	assert_eq!(logic.status(), Some(Status::Wrapped));
}

#[test]
fn test_no_wrap_keeps_selection() {
	let (mut logic, target) = setup("line\nline\nline");
	logic.set_active(SearchOption::Wrap, false);
	select(&target, TextRange::new(10, 4));

	assert_eq!(logic.find_next("line").unwrap(), Some(Status::NoMatch));
	assert_eq!(selection(&target), TextRange::new(10, 4));
}

#[test]
fn test_find_previous_reverses_for_one_call() {
	let (mut logic, target) = setup("line\nline\nline");
	logic.find_next("line").unwrap();
	logic.find_next("line").unwrap();
	assert_eq!(selection(&target), TextRange::new(5, 4));

	assert_eq!(logic.find_previous("line").unwrap(), None);
	assert_eq!(selection(&target), TextRange::new(0, 4));
	assert!(logic.is_active(SearchOption::Forward));

	logic.find_next("line").unwrap();
	assert_eq!(selection(&target), TextRange::new(5, 4));
}

#[test]
fn test_find_previous_with_backward_direction_goes_forward() {
	let (mut logic, target) = setup("line\nline\nline");
	select(&target, TextRange::new(0, 4));
	logic.set_active(SearchOption::Forward, false);

	logic.find_previous("line").unwrap();
	assert_eq!(selection(&target), TextRange::new(5, 4));
}

#[test]
fn test_backward_find_wraps_to_end() {
	let (mut logic, target) = setup("line\nline\nline");
	logic.set_active(SearchOption::Forward, false);

	assert_eq!(logic.find_next("line").unwrap(), Some(Status::Wrapped));
	assert_eq!(selection(&target), TextRange::new(10, 4));
	assert_eq!(logic.find_next("line").unwrap(), None);
	assert_eq!(selection(&target), TextRange::new(5, 4));
}

#[test]
fn test_case_sensitivity() {
	let (mut logic, target) = setup("Line line");
	logic.find_next("line").unwrap();
	assert_eq!(selection(&target), TextRange::new(0, 4));

	select(&target, TextRange::point(0));
	logic.set_active(SearchOption::CaseSensitive, true);
	logic.find_next("line").unwrap();
	assert_eq!(selection(&target), TextRange::new(5, 4));
}

#[test]
fn test_whole_word() {
	let (mut logic, target) = setup("two words twofold two");
	logic.set_active(SearchOption::WholeWord, true);

	logic.find_next("two").unwrap();
	assert_eq!(selection(&target), TextRange::new(0, 3));
	logic.find_next("two").unwrap();
	assert_eq!(selection(&target), TextRange::new(18, 3));
}

#[test]
fn test_whole_word_ignored_for_multiword_query() {
	let (mut logic, target) = setup("two words");
	logic.set_active(SearchOption::WholeWord, true);

	assert_eq!(logic.find_next("two wo").unwrap(), None);
	assert_eq!(selection(&target), TextRange::new(0, 6));
	assert!(logic.is_active(SearchOption::WholeWord));
	assert!(!logic.can_enable(SearchOption::WholeWord));
}

#[test]
fn test_whole_word_ignored_while_regex() {
	let (mut logic, target) = setup("twofold");
	logic.set_active(SearchOption::Regex, true);
	logic.set_active(SearchOption::WholeWord, true);

	assert_eq!(logic.find_next("two").unwrap(), None);
	assert_eq!(selection(&target), TextRange::new(0, 3));
}

#[test]
fn test_whole_word_survives_regex_detour_through_multiword_query() {
	let (mut logic, target) = setup("twofold two");
	logic.set_find_string("two");
	logic.set_active(SearchOption::WholeWord, true);
	logic.set_active(SearchOption::Regex, true);
	logic.set_find_string("two words");
	logic.set_active(SearchOption::Regex, false);
	logic.set_find_string("two");

	assert!(logic.is_active(SearchOption::WholeWord));
	assert!(logic.can_enable(SearchOption::WholeWord));
	logic.find_next("two").unwrap();
	assert_eq!(selection(&target), TextRange::new(8, 3));
}

#[test]
fn test_invalid_regex_fails_before_touching_target() {
	let (mut logic, target) = setup("a(b");
	select(&target, TextRange::new(1, 1));
	logic.set_active(SearchOption::Regex, true);

	assert!(matches!(logic.find_next("("), Err(FindReplaceError::InvalidPattern(_))));
	assert!(matches!(logic.replace_all("(", "x"), Err(FindReplaceError::InvalidPattern(_))));
	assert!(logic.validate("(").is_err());
	assert_eq!(selection(&target), TextRange::new(1, 1));
	assert_eq!(content(&target), "a(b");

	logic.set_active(SearchOption::Regex, false);
	assert!(logic.validate("(").is_ok());
	logic.find_next("(").unwrap();
	assert_eq!(selection(&target), TextRange::new(1, 1));
}

#[test]
fn test_regex_find() {
	let (mut logic, target) = setup("lane line lone");
	logic.set_active(SearchOption::Regex, true);
	logic.find_next("l[io]ne").unwrap();
	assert_eq!(selection(&target), TextRange::new(5, 4));
	logic.find_next("l[io]ne").unwrap();
	assert_eq!(selection(&target), TextRange::new(10, 4));
}

#[test]
fn test_scoped_search_wraps_inside_scope() {
	let (mut logic, target) = setup("line\nline\nline");
	select(&target, TextRange::new(0, 9));
	logic.set_active(SearchOption::Global, false);
	assert_eq!(logic.scope(), Some(TextRange::new(0, 9)));

	assert_eq!(logic.find_next("line").unwrap(), None);
	assert_eq!(selection(&target), TextRange::new(0, 4));
	assert_eq!(logic.find_next("line").unwrap(), None);
	assert_eq!(selection(&target), TextRange::new(5, 4));
	assert_eq!(logic.find_next("line").unwrap(), Some(Status::Wrapped));
	assert_eq!(selection(&target), TextRange::new(0, 4));

	logic.set_active(SearchOption::Global, true);
	assert_eq!(logic.scope(), None);
	logic.find_next("line").unwrap();
	logic.find_next("line").unwrap();
	assert_eq!(selection(&target), TextRange::new(10, 4));
}

#[test]
fn test_scoped_search_without_wrap_stops_at_scope_end() {
	let (mut logic, target) = setup("line\nline\nline");
	select(&target, TextRange::new(0, 9));
	logic.set_active(SearchOption::Global, false);
	logic.set_active(SearchOption::Wrap, false);
	select(&target, TextRange::new(5, 4));

	assert_eq!(logic.find_next("line").unwrap(), Some(Status::NoMatch));
	assert_eq!(selection(&target), TextRange::new(5, 4));
}

#[test]
fn test_first_scoped_find_starts_at_scope_boundary() {
	let (mut logic, target) = setup("line\nline\nline");
	select(&target, TextRange::new(0, 9));
	logic.set_active(SearchOption::Global, false);
	logic.set_active(SearchOption::Forward, false);

	assert_eq!(logic.find_next("line").unwrap(), None);
	assert_eq!(selection(&target), TextRange::new(5, 4));
	assert_eq!(logic.find_next("line").unwrap(), None);
	assert_eq!(selection(&target), TextRange::new(0, 4));
	assert_eq!(logic.find_next("line").unwrap(), Some(Status::Wrapped));
	assert_eq!(selection(&target), TextRange::new(5, 4));
}

#[test]
fn test_scope_boundary_start_applies_only_once() {
	let (mut logic, target) = setup("line line");
	select(&target, TextRange::new(0, 9));
	logic.set_active(SearchOption::Global, false);
	logic.find_next("line line").unwrap();
	assert_eq!(selection(&target), TextRange::new(0, 9));

	assert_eq!(logic.find_next("line line").unwrap(), Some(Status::Wrapped));
	assert_eq!(selection(&target), TextRange::new(0, 9));
}

/// A caret cannot bound a scoped search; this is reported as no match.
#[test]
fn test_zero_length_scope_is_no_match() {
	let (mut logic, target) = setup("line\nline");
	select(&target, TextRange::point(3));
	logic.set_active(SearchOption::Global, false);

	assert_eq!(logic.find_next("line").unwrap(), Some(Status::NoMatch));
	assert_eq!(selection(&target), TextRange::point(3));
}

#[test]
fn test_update_target_captures_scope_when_not_global() {
	let mut logic = FindReplaceLogic::new();
	logic.set_active(SearchOption::Global, false);
	assert_eq!(logic.scope(), None);

	let target = RopeTarget::new("line\nline\nline").shared();
	select(&target, TextRange::new(5, 9));
	logic.update_target(target.clone());
	assert_eq!(logic.scope(), Some(TextRange::new(5, 9)));

	logic.find_next("line").unwrap();
	assert_eq!(selection(&target), TextRange::new(5, 4));
}

#[test]
fn test_incremental_search_stays_on_anchor() {
	let (mut logic, target) = setup("line\nline\nline");
	logic.set_active(SearchOption::Incremental, true);
	assert_eq!(logic.incremental_anchor(), Some(TextRange::point(0)));

	for query in ["l", "li", "lin", "line"] {
		assert_eq!(logic.incremental_search(query).unwrap(), None);
		assert_eq!(selection(&target), TextRange::new(0, query.len()));
	}

	logic.incremental_search("").unwrap();
	assert_eq!(selection(&target), TextRange::point(0));
}

#[test]
fn test_incremental_anchor_restarts_after_commit() {
	let (mut logic, target) = setup("line\nline\nline");
	logic.set_active(SearchOption::Incremental, true);
	logic.incremental_search("lin").unwrap();

	logic.find_next("lin").unwrap();
	assert_eq!(selection(&target), TextRange::new(5, 3));
	assert_eq!(logic.incremental_anchor(), None);

	logic.incremental_search("line").unwrap();
	assert_eq!(logic.incremental_anchor(), Some(TextRange::new(5, 3)));
	assert_eq!(selection(&target), TextRange::new(5, 4));
}

#[test]
fn test_incremental_anchor_cleared_on_disable_and_target_change() {
	let (mut logic, target) = setup("line");
	logic.set_active(SearchOption::Incremental, true);
	assert!(logic.incremental_anchor().is_some());

	logic.set_active(SearchOption::Incremental, false);
	assert_eq!(logic.incremental_anchor(), None);

	logic.set_active(SearchOption::Incremental, true);
	logic.update_target(target);
	assert_eq!(logic.incremental_anchor(), None);
}

#[test]
fn test_incremental_search_inactive_with_regex() {
	let (mut logic, target) = setup("line");
	logic.set_active(SearchOption::Incremental, true);
	logic.set_active(SearchOption::Regex, true);
	assert_eq!(logic.incremental_anchor(), None);

	assert_eq!(logic.incremental_search("li").unwrap(), None);
	assert_eq!(selection(&target), TextRange::point(0));
}

#[test]
fn test_incremental_search_without_incremental_option_is_noop() {
	let (mut logic, target) = setup("line");
	assert_eq!(logic.incremental_search("line").unwrap(), None);
	assert_eq!(selection(&target), TextRange::point(0));
	assert_eq!(logic.options().find_string(), "line");
}

#[test]
fn test_replace_finds_then_replaces() {
	let (mut logic, target) = setup("foo bar foo");

	assert_eq!(logic.replace("foo", "baz").unwrap(), None);
	assert_eq!(content(&target), "baz bar foo");
	assert_eq!(selection(&target), TextRange::point(3));

	assert_eq!(logic.replace("foo", "baz").unwrap(), None);
	assert_eq!(content(&target), "baz bar baz");
	assert_eq!(selection(&target), TextRange::point(11));

	assert_eq!(logic.replace("foo", "baz").unwrap(), Some(Status::NoMatch));
	assert_eq!(content(&target), "baz bar baz");
}

#[test]
fn test_replace_uses_matching_selection() {
	let (mut logic, target) = setup("foo bar foo");
	select(&target, TextRange::new(8, 3));

	logic.replace("foo", "qux").unwrap();
	assert_eq!(content(&target), "foo bar qux");
}

#[test]
fn test_replace_read_only() {
	let target = RopeTarget::read_only("foo bar").shared();
	let mut logic = FindReplaceLogic::new();
	logic.update_target(target.clone());

	assert_eq!(logic.replace("foo", "baz").unwrap(), Some(Status::ReadOnly));
	assert_eq!(content(&target), "foo bar");
	assert_eq!(selection(&target), TextRange::new(0, 3));
}

#[test]
fn test_replace_with_empty_string_deletes() {
	let (mut logic, target) = setup("foo bar");
	logic.replace("foo ", "").unwrap();
	assert_eq!(content(&target), "bar");
	assert_eq!(selection(&target), TextRange::point(0));
}

#[test]
fn test_replace_backward_leaves_caret_before_insertion() {
	let (mut logic, target) = setup("foo bar foo");
	select(&target, TextRange::point(11));
	logic.set_active(SearchOption::Forward, false);

	logic.replace("foo", "baz").unwrap();
	assert_eq!(content(&target), "foo bar baz");
	assert_eq!(selection(&target), TextRange::point(8));
}

#[test]
fn test_replace_grows_scope() {
	let (mut logic, target) = setup("foo foo");
	select(&target, TextRange::new(0, 7));
	logic.set_active(SearchOption::Global, false);

	assert_eq!(logic.replace("foo", "longer").unwrap(), None);
	assert_eq!(content(&target), "longer foo");
	assert_eq!(logic.scope(), Some(TextRange::new(0, 10)));
}

#[test]
fn test_replace_and_find() {
	let (mut logic, target) = setup("foo foo foo");
	assert_eq!(logic.replace_and_find("foo", "bar").unwrap(), None);
	assert_eq!(content(&target), "bar foo foo");
	assert_eq!(selection(&target), TextRange::new(4, 3));
}

#[test]
fn test_replace_and_find_stops_on_read_only() {
	let target = RopeTarget::read_only("foo foo").shared();
	let mut logic = FindReplaceLogic::new();
	logic.update_target(target.clone());

	assert_eq!(logic.replace_and_find("foo", "bar").unwrap(), Some(Status::ReadOnly));
	assert_eq!(selection(&target), TextRange::new(0, 3));
}

#[test]
fn test_replace_all() {
	let (mut logic, target) = setup("foo bar foo baz foo");
	assert_eq!(logic.replace_all("foo", "x").unwrap(), (3, None));
	assert_eq!(content(&target), "x bar x baz x");
	assert_eq!(selection(&target), TextRange::new(12, 1));
}

#[test]
fn test_replace_all_no_match() {
	let (mut logic, target) = setup("foo");
	assert_eq!(logic.replace_all("bar", "x").unwrap(), (0, Some(Status::NoMatch)));
	assert_eq!(content(&target), "foo");
}

#[test]
fn test_replace_all_read_only() {
	let target = RopeTarget::read_only("foo foo").shared();
	let mut logic = FindReplaceLogic::new();
	logic.update_target(target.clone());

	assert_eq!(logic.replace_all("foo", "x").unwrap(), (0, Some(Status::ReadOnly)));
	assert_eq!(content(&target), "foo foo");
}

#[test]
fn test_replace_all_does_not_rematch_insertions() {
	let (mut logic, target) = setup("a");
	assert_eq!(logic.replace_all("a", "aa").unwrap(), (1, None));
	assert_eq!(content(&target), "aa");

	let (mut logic, target) = setup("aaa");
	assert_eq!(logic.replace_all("a", "aa").unwrap(), (3, None));
	assert_eq!(content(&target), "aaaaaa");
}

#[test]
fn test_replace_all_ignores_wrap() {
	let (mut logic, target) = setup("foo foo");
	select(&target, TextRange::point(7));
	assert_eq!(logic.replace_all("foo", "x").unwrap(), (2, None));
	assert_eq!(content(&target), "x x");
}

#[test]
fn test_replace_all_in_selection() {
	let (mut logic, target) = setup("foo foo foo");
	logic.set_active(SearchOption::ReplaceAllScope, true);
	select(&target, TextRange::new(4, 7));

	assert_eq!(logic.replace_all("foo", "x").unwrap(), (2, None));
	assert_eq!(content(&target), "foo x x");
	assert_eq!(selection(&target), TextRange::new(4, 3));
}

#[test]
fn test_replace_all_in_empty_selection_is_no_match() {
	let (mut logic, target) = setup("foo");
	logic.set_active(SearchOption::ReplaceAllScope, true);
	assert_eq!(logic.replace_all("foo", "x").unwrap(), (0, Some(Status::NoMatch)));
	assert_eq!(content(&target), "foo");
}

#[test]
fn test_replace_all_regex_groups() {
	let (mut logic, target) = setup("a=1 b=2");
	logic.set_active(SearchOption::Regex, true);
	assert_eq!(logic.replace_all(r"(\w)=(\d)", "$2=$1").unwrap(), (2, None));
	assert_eq!(content(&target), "1=a 2=b");
}

#[test]
fn test_replace_all_prefixes_every_line() {
	let (mut logic, target) = setup("one\ntwo\nthree");
	logic.set_active(SearchOption::Regex, true);
	assert_eq!(logic.replace_all("^", "// ").unwrap(), (3, None));
	assert_eq!(content(&target), "// one\n// two\n// three");
}

#[test]
fn test_select_all() {
	let (mut logic, target) = setup("a b a");
	assert_eq!(logic.select_all("a").unwrap(), 2);
	assert_eq!(
		target.borrow().selections(),
		[TextRange::new(0, 1), TextRange::new(4, 1)]
	);
	assert_eq!(content(&target), "a b a");
	assert_eq!(logic.status(), None);
}

#[test]
fn test_select_all_no_match() {
	let (mut logic, target) = setup("a b a");
	assert_eq!(logic.select_all("c").unwrap(), 0);
	assert_eq!(logic.status(), Some(Status::NoMatch));
	assert_eq!(selection(&target), TextRange::point(0));
}

#[test]
fn test_status_cleared_by_success() {
	let (mut logic, _target) = setup("line");
	logic.find_next("nope").unwrap();
	assert_eq!(logic.status(), Some(Status::NoMatch));
	logic.find_next("line").unwrap();
	assert_eq!(logic.status(), None);
}

#[test]
fn test_with_config() {
	let config = FindReplaceConfig {
		wrap: false,
		case_sensitive: true,
		..FindReplaceConfig::default()
	};
	let logic = FindReplaceLogic::with_config(&config);
	assert!(!logic.is_active(SearchOption::Wrap));
	assert!(logic.is_active(SearchOption::CaseSensitive));
	assert!(logic.is_active(SearchOption::Forward));
	assert!(logic.target().is_none());
}
