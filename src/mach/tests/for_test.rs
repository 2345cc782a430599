use super::*;

#[test]
fn test_counter_is_the_flag() {
    assert_eq!(values_of("0 4(:3,+')"), [10]);
}

#[test]
fn test_body_breaks_early() {
    assert_eq!(values_of("0 5(.1+:3<)"), [3]);
}

#[test]
fn test_zero_and_negative_counts_skip_the_body() {
    assert_eq!(values_of("0(1 2 3)7"), [7]);
    assert_eq!(values_of("5~~(9)1"), [1]);
}

#[test]
fn test_nested_loops() {
    assert_eq!(values_of("0 2(2(3,1+3~~,))"), [4]);
}

#[test]
fn test_nested_loop_inside_skipped_loop() {
    assert_eq!(values_of("0(1(2)3)4"), [4]);
}

#[test]
fn test_loop_frames_are_released() {
    let mut r = Runtime::default();
    r.enter("3( )");
    assert_eq!(run(&mut r), "");
    assert_eq!(r.values(), Vec::<i64>::new());
    assert_eq!(r.control_depth(), 0);
}
