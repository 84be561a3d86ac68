//! Browser-only checks; run with `wasm-pack test --headless --firefox`

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;
use workshop_admin_wasm::{bearer_header, clear_session, has_session, save_login, session_user};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_login_round_trip_through_local_storage() {
    clear_session().unwrap();
    assert!(!has_session());

    save_login(
        r#"{"access":"a","refresh":"r","user":{"id":1,"username":"admin","is_active":true}}"#,
    )
    .unwrap();
    assert!(has_session());
    assert_eq!(bearer_header().as_deref(), Some("Bearer a"));
    assert!(session_user().unwrap().unwrap().contains("admin"));

    clear_session().unwrap();
    assert!(!has_session());
    assert_eq!(session_user().unwrap(), None);
}
