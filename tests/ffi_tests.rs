//! Integration tests for the C ABI surface.
//!
//! These exercise lifecycle and string-ownership contracts without a live
//! backend; chat behavior against a scripted backend is covered by the unit
//! tests in `application::agent`.

use astrolabe::ffi::{
    astrolabe_agent_chat, astrolabe_agent_free, astrolabe_agent_new,
    astrolabe_agent_new_with_model, astrolabe_last_error, astrolabe_string_free,
    astrolabe_version,
};
use std::ffi::{CStr, CString};
use std::ptr;

#[test]
fn version_is_a_static_nonempty_string() {
    let version = astrolabe_version();
    assert!(!version.is_null());
    let text = unsafe { CStr::from_ptr(version) }.to_str().unwrap();
    assert!(!text.is_empty());
    // Static: repeated calls hand out the same pointer.
    assert_eq!(version, astrolabe_version());
}

#[test]
fn create_and_destroy_agent() {
    let agent = unsafe { astrolabe_agent_new() };
    assert!(!agent.is_null(), "agent construction must not need a backend");
    unsafe { astrolabe_agent_free(agent) };
}

#[test]
fn create_with_explicit_model() {
    let model = CString::new("llama3.1:8b").unwrap();
    let agent = unsafe { astrolabe_agent_new_with_model(model.as_ptr()) };
    assert!(!agent.is_null());
    unsafe { astrolabe_agent_free(agent) };
}

#[test]
fn create_with_invalid_utf8_model_fails_and_reports() {
    let bogus = CStr::from_bytes_with_nul(b"\xff\xfe\x00").unwrap();
    let agent = unsafe { astrolabe_agent_new_with_model(bogus.as_ptr()) };
    assert!(agent.is_null());

    let error = astrolabe_last_error();
    assert!(!error.is_null());
    let text = unsafe { CStr::from_ptr(error) }.to_str().unwrap();
    assert!(text.contains("UTF-8"));
}

#[test]
fn null_pointers_are_always_no_ops() {
    unsafe {
        astrolabe_agent_free(ptr::null_mut());
        astrolabe_string_free(ptr::null_mut());
    }
}

#[test]
fn chat_with_null_arguments_fails_cleanly() {
    let response = unsafe { astrolabe_agent_chat(ptr::null_mut(), ptr::null()) };
    assert!(response.is_null());

    let error = astrolabe_last_error();
    assert!(!error.is_null());

    // A NULL message on a valid handle fails the same way.
    let agent = unsafe { astrolabe_agent_new() };
    assert!(!agent.is_null());
    let response = unsafe { astrolabe_agent_chat(agent, ptr::null()) };
    assert!(response.is_null());
    unsafe { astrolabe_agent_free(agent) };
}
