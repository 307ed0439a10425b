//! FFI functions for agent lifecycle, chat, and string ownership.

use std::cell::RefCell;
use std::ffi::{CStr, CString, c_char};
use std::ptr;

use once_cell::sync::Lazy;
use tracing::warn;

use crate::application::agent::{Agent, AgentBuilder};
use crate::application::tooling::sysinfo::builtin_tools;
use crate::config::AgentConfig;

static VERSION: Lazy<CString> = Lazy::new(|| {
    CString::new(env!("CARGO_PKG_VERSION")).unwrap_or_else(|_| CString::new("0.0.0").unwrap())
});

thread_local! {
    // Per-thread so concurrent chats on different threads never clobber
    // each other's diagnostics.
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(message: String) {
    warn!(error = %message, "FFI call failed");
    let stored = CString::new(message)
        .unwrap_or_else(|_| CString::new("error message contained a NUL byte").unwrap());
    LAST_ERROR.with(|slot| *slot.borrow_mut() = Some(stored));
}

fn clear_last_error() {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = None);
}

/// Opaque handle to an agent session.
///
/// The handle owns the agent and the tokio runtime that drives its async
/// internals; both are released together by `astrolabe_agent_free`.
pub struct AstrolabeAgent {
    inner: Agent,
    runtime: tokio::runtime::Runtime,
}

fn build_handle(model: Option<String>) -> Option<Box<AstrolabeAgent>> {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            set_last_error(format!("failed to create runtime: {e}"));
            return None;
        }
    };

    let config = match AgentConfig::load(None) {
        Ok(config) => config,
        Err(e) => {
            set_last_error(format!("failed to load configuration: {e}"));
            return None;
        }
    };

    let mut builder = AgentBuilder::from_config(&config).with_tools(builtin_tools());
    if let Some(model) = model {
        builder = builder.with_model(model);
    }

    match builder.build() {
        Ok(agent) => Some(Box::new(AstrolabeAgent {
            inner: agent,
            runtime,
        })),
        Err(e) => {
            set_last_error(format!("failed to build agent: {e}"));
            None
        }
    }
}

/// Create a new agent with the default model and the built-in system
/// information tools.
///
/// Returns NULL on failure.
///
/// # Safety
///
/// The returned pointer must be freed with `astrolabe_agent_free`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn astrolabe_agent_new() -> *mut AstrolabeAgent {
    unsafe { astrolabe_agent_new_with_model(ptr::null()) }
}

/// Create a new agent with a specific model identifier.
///
/// If `model` is NULL, the configured default is used.
/// Returns NULL on failure.
///
/// # Safety
///
/// - `model` must be NULL or a valid null-terminated C string.
/// - The returned pointer must be freed with `astrolabe_agent_free`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn astrolabe_agent_new_with_model(
    model: *const c_char,
) -> *mut AstrolabeAgent {
    clear_last_error();

    let model = if model.is_null() {
        None
    } else {
        match unsafe { CStr::from_ptr(model) }.to_str() {
            Ok(s) => Some(s.to_string()),
            Err(_) => {
                set_last_error("model identifier is not valid UTF-8".to_string());
                return ptr::null_mut();
            }
        }
    };

    match build_handle(model) {
        Some(handle) => Box::into_raw(handle),
        None => ptr::null_mut(),
    }
}

/// Send a message to the agent and block until the tool-calling loop
/// finishes.
///
/// Returns a fresh string the caller owns, or NULL on failure; on failure
/// the cause is available through `astrolabe_last_error`.
///
/// # Safety
///
/// - `agent` must be a valid pointer from `astrolabe_agent_new` and must not
///   be used by another chat call concurrently.
/// - `message` must be a valid null-terminated UTF-8 C string.
/// - The returned string must be freed with `astrolabe_string_free`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn astrolabe_agent_chat(
    agent: *mut AstrolabeAgent,
    message: *const c_char,
) -> *mut c_char {
    clear_last_error();

    if agent.is_null() {
        set_last_error("agent handle is NULL".to_string());
        return ptr::null_mut();
    }
    if message.is_null() {
        set_last_error("message is NULL".to_string());
        return ptr::null_mut();
    }

    let handle = unsafe { &mut *agent };
    let message = match unsafe { CStr::from_ptr(message) }.to_str() {
        Ok(s) => s,
        Err(_) => {
            set_last_error("message is not valid UTF-8".to_string());
            return ptr::null_mut();
        }
    };

    let response = handle.runtime.block_on(handle.inner.chat(message));

    match response {
        Ok(text) => match CString::new(text) {
            Ok(cs) => cs.into_raw(),
            Err(_) => {
                set_last_error("response contained an interior NUL byte".to_string());
                ptr::null_mut()
            }
        },
        Err(e) => {
            set_last_error(e.to_string());
            ptr::null_mut()
        }
    }
}

/// Get the last error reported on the calling thread, or NULL if the most
/// recent call succeeded.
///
/// The returned pointer stays valid until the next astrolabe call on the
/// same thread; it must NOT be freed.
#[unsafe(no_mangle)]
pub extern "C" fn astrolabe_last_error() -> *const c_char {
    LAST_ERROR.with(|slot| {
        slot.borrow()
            .as_ref()
            .map_or(ptr::null(), |message| message.as_ptr())
    })
}

/// Free an agent handle.
///
/// # Safety
///
/// `agent` must be a valid pointer from `astrolabe_agent_new` or NULL.
/// Each handle must be freed exactly once.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn astrolabe_agent_free(agent: *mut AstrolabeAgent) {
    if !agent.is_null() {
        drop(unsafe { Box::from_raw(agent) });
    }
}

/// Free a string returned by `astrolabe_agent_chat`.
///
/// # Safety
///
/// `s` must be a pointer returned by an astrolabe function or NULL.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn astrolabe_string_free(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

/// Get the library version.
///
/// Returns a static string that must NOT be freed.
#[unsafe(no_mangle)]
pub extern "C" fn astrolabe_version() -> *const c_char {
    VERSION.as_ptr()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_matches_package_metadata() {
        let version = astrolabe_version();
        assert!(!version.is_null());
        let version_str = unsafe { CStr::from_ptr(version) }.to_str().unwrap();
        assert_eq!(version_str, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn null_handles_are_no_ops() {
        unsafe {
            astrolabe_agent_free(ptr::null_mut());
            astrolabe_string_free(ptr::null_mut());
            let result = astrolabe_agent_chat(ptr::null_mut(), ptr::null());
            assert!(result.is_null());
        }
        // The failed chat above must have recorded a diagnostic.
        assert!(!astrolabe_last_error().is_null());
    }

    #[test]
    fn last_error_is_cleared_by_the_next_successful_call() {
        set_last_error("boom".to_string());
        assert!(!astrolabe_last_error().is_null());
        clear_last_error();
        assert!(astrolabe_last_error().is_null());
    }
}
