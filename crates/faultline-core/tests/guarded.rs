use std::panic;
use std::sync::{Arc, Barrier};
use std::thread;

use faultline_core::{BoxError, ErrorSlot, Fault, FaultValue, forward, go, recover};
use rstest::rstest;

fn succeeds() -> Result<(), BoxError> {
    Ok(())
}

fn declines() -> Result<(), BoxError> {
    Err("declined".into())
}

#[rstest]
#[case::unit(succeeds, None)]
#[case::error(declines, Some("declined"))]
fn non_panicking_ops_return_their_own_result(
    #[case] op: fn() -> Result<(), BoxError>,
    #[case] expected: Option<&str>,
) {
    let err = go(op).err().map(|e| e.to_string());
    assert_eq!(err.as_deref(), expected);
}

#[rstest]
#[case::literal("x")]
#[case::sentence("not at a disco")]
fn panics_become_fault_errors(#[case] message: &'static str) {
    let fault = go(|| -> Result<(), Fault> { panic!("{message}") }).unwrap_err();

    assert_eq!(fault.short_message(), format!("panic: {message}"));
    assert_eq!(fault.value().as_message(), Some(message));
}

#[test]
fn assigned_error_survives_a_later_panic() {
    let result = go(|| -> Result<(), BoxError> {
        let slot = ErrorSlot::new();
        forward(Some(&slot), || {
            slot.set("already failed".into());
            panic!("not at a disco");
        });
        slot.into_result(())
    });

    assert_eq!(result.unwrap_err().to_string(), "already failed");
}

#[test]
fn absent_handler_does_not_intercept() {
    let escaped = panic::catch_unwind(|| {
        recover(None, || -> u8 { panic!("escapes recover") });
    });
    let payload = escaped.unwrap_err();
    assert_eq!(payload.downcast_ref::<&str>(), Some(&"escapes recover"));
}

#[test]
fn absent_slot_does_not_intercept() {
    let escaped = panic::catch_unwind(|| {
        forward(None::<&ErrorSlot<Fault>>, || -> u8 { panic!("escapes forward") });
    });
    let payload = escaped.unwrap_err();
    assert_eq!(payload.downcast_ref::<&str>(), Some(&"escapes forward"));
}

#[test]
fn full_detail_is_prefix_blank_line_and_stack() {
    let fault = go(|| -> Result<(), Fault> { panic!("detail") }).unwrap_err();
    let detail = fault.full_detail();

    let rest = detail.strip_prefix(&fault.short_message()).unwrap();
    let stack = rest.strip_prefix("\n\n").unwrap();
    assert!(!stack.is_empty());
    assert!(stack.contains("panicked at"));
    assert!(stack.contains("guarded.rs"));
}

#[test]
fn resumed_fault_is_wrapped_by_the_outer_capture() {
    let outer = go(|| -> Result<(), Fault> {
        let inner = go(|| -> Result<(), Fault> { panic!("inner") }).unwrap_err();
        inner.resume()
    })
    .unwrap_err();

    assert_eq!(outer.short_message(), "panic: panic: inner");
    assert!(matches!(outer.value(), FaultValue::Error(_)));
    let source = std::error::Error::source(&outer).unwrap();
    assert!(source.downcast_ref::<Fault>().is_some());
}

#[test]
fn guarded_threads_do_not_protect_each_other() {
    // 各スレッドは自分の区間だけを守る
    let barrier = Arc::new(Barrier::new(2));

    let guarded = {
        let barrier = Arc::clone(&barrier);
        thread::Builder::new()
            .name("guarded".to_string())
            .spawn(move || {
                barrier.wait();
                go(|| -> Result<(), Fault> { panic!("caught here") })
            })
            .unwrap()
    };
    let unguarded = {
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            panic!("not caught");
        })
    };

    let fault = guarded.join().unwrap().unwrap_err();
    assert_eq!(fault.short_message(), "panic: caught here");
    assert!(fault.trace().starts_with("thread 'guarded' panicked at"));

    assert!(unguarded.join().is_err());
}
