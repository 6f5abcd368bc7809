//! FFI bindings for Synheart Insights
//!
//! This module provides C-compatible functions for calling Insights from the
//! mobile client. All functions use C strings (null-terminated) and return
//! allocated memory that must be freed by the caller using
//! `insights_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::pipeline::{generate_report, InsightEngine};

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

// ============================================================================
// Stateless API
// ============================================================================

/// Generate a report JSON from request JSON using default thresholds.
///
/// # Safety
/// - `request` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `insights_free_string`.
/// - Returns NULL on error; call `insights_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn insights_generate(request: *const c_char) -> *mut c_char {
    clear_last_error();

    let request_str = match cstr_to_string(request) {
        Some(s) => s,
        None => {
            set_last_error("Invalid request string pointer");
            return ptr::null_mut();
        }
    };

    match generate_report(request_str) {
        Ok(report) => string_to_cstr(&report),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Generate a report JSON from request JSON with custom thresholds JSON.
///
/// # Safety
/// - `request` and `thresholds` must be valid null-terminated C strings.
/// - Returns a newly allocated string that must be freed with `insights_free_string`.
/// - Returns NULL on error; call `insights_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn insights_generate_with_thresholds(
    request: *const c_char,
    thresholds: *const c_char,
) -> *mut c_char {
    clear_last_error();

    let request_str = match cstr_to_string(request) {
        Some(s) => s,
        None => {
            set_last_error("Invalid request string pointer");
            return ptr::null_mut();
        }
    };

    let thresholds_str = match cstr_to_string(thresholds) {
        Some(s) => s,
        None => {
            set_last_error("Invalid thresholds string pointer");
            return ptr::null_mut();
        }
    };

    let mut engine = InsightEngine::new();
    if let Err(e) = engine.load_thresholds(&thresholds_str) {
        set_last_error(&e.to_string());
        return ptr::null_mut();
    }

    match engine.process_json(&request_str) {
        Ok(report) => string_to_cstr(&report),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Engine Handle API
// ============================================================================

/// Opaque handle to an InsightEngine
pub struct InsightEngineHandle {
    engine: InsightEngine,
}

/// Create an engine. `thresholds` may be NULL for default thresholds.
///
/// # Safety
/// - `thresholds` must be NULL or a valid null-terminated C string.
/// - Must be freed with `insights_engine_free`.
/// - Returns NULL on error; call `insights_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn insights_engine_new(thresholds: *const c_char) -> *mut InsightEngineHandle {
    clear_last_error();

    let mut engine = InsightEngine::new();

    if !thresholds.is_null() {
        let thresholds_str = match cstr_to_string(thresholds) {
            Some(s) => s,
            None => {
                set_last_error("Invalid thresholds string pointer");
                return ptr::null_mut();
            }
        };
        if let Err(e) = engine.load_thresholds(&thresholds_str) {
            set_last_error(&e.to_string());
            return ptr::null_mut();
        }
    }

    Box::into_raw(Box::new(InsightEngineHandle { engine }))
}

/// Free an engine.
///
/// # Safety
/// - `engine` must be a valid pointer returned by `insights_engine_new`, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn insights_engine_free(engine: *mut InsightEngineHandle) {
    if !engine.is_null() {
        drop(Box::from_raw(engine));
    }
}

/// Generate a report JSON with an engine.
///
/// # Safety
/// - `engine` must be a valid pointer returned by `insights_engine_new`.
/// - `request` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `insights_free_string`.
/// - Returns NULL on error; call `insights_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn insights_engine_generate(
    engine: *const InsightEngineHandle,
    request: *const c_char,
) -> *mut c_char {
    clear_last_error();

    if engine.is_null() {
        set_last_error("Null engine pointer");
        return ptr::null_mut();
    }

    let handle = &*engine;

    let request_str = match cstr_to_string(request) {
        Some(s) => s,
        None => {
            set_last_error("Invalid request string pointer");
            return ptr::null_mut();
        }
    };

    match handle.engine.process_json(&request_str) {
        Ok(report) => string_to_cstr(&report),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by Insights functions.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by an Insights function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn insights_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a thread-local error string.
/// - The returned pointer is valid until the next Insights function call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn insights_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

/// Get the Insights library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn insights_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
