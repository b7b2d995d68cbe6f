//! Runs in its own test binary: the counting hook must be in place before
//! faultline chains onto it.

use std::panic;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use faultline_core::FaultCapture;

#[test]
fn previously_installed_hook_still_sees_every_panic() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    panic::set_hook(Box::new(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    let capture = FaultCapture::default();

    // 区間内で呼び出し側が自分で処理した panic
    let out = capture.catch(|| {
        let _ = panic::catch_unwind(|| panic!("handled by caller code"));
        1
    });
    assert_eq!(out.unwrap(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // faultline が捕捉した panic も既存の hook に届き、記録もされる
    let fault = capture.catch(|| -> u8 { panic!("intercepted") }).unwrap_err();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(fault.trace().contains("panic_hook.rs"));

    let _ = panic::take_hook();
}
