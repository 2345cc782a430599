use super::*;

#[test]
fn test_string_hides_brackets() {
    assert_eq!(values_of("0[1\"]\"2]3"), [3]);
}

#[test]
fn test_line_comment_hides_brackets() {
    assert_eq!(values_of("0[\\ ] \n]5"), [5]);
}

#[test]
fn test_block_comment_hides_brackets() {
    assert_eq!(values_of("0[\\\\\\ ] \\\\\\]7"), [7]);
}

#[test]
fn test_bad_escape_is_ignored() {
    assert_eq!(values_of("0[\"\\q\"]1"), [1]);
}

#[test]
fn test_mismatch() {
    let mut r = Runtime::default();
    r.enter("0[)");
    assert_eq!(
        run(&mut r),
        "?BRACKET MISMATCH AT -3; unexpected ')' in '[]' block\n"
    );
}

#[test]
fn test_nothing_runs() {
    let mut r = Runtime::default();
    r.enter("0[65# 1 2 3 0$ _ {9}?]");
    assert_eq!(run(&mut r), "");
    assert_eq!(r.values(), Vec::<i64>::new());
    assert_eq!(r.memory().page_count(), 1);
}
