//! C-ABI Foreign Function Interface for wtext.
//!
//! # Memory Management
//!
//! All strings returned by this library must be freed using `wtext_free_string`.
//!
//! # Error Handling
//!
//! Functions that can fail return a null pointer (or a negative status) on
//! error. Use `wtext_last_error` to retrieve the error message.
//!
//! # Example (C)
//!
//! ```c
//! #include <stdio.h>
//! #include "wtext.h"
//!
//! int main() {
//!     if (wtext_extract_to_file("word/document.xml", "document.txt") != 0) {
//!         fprintf(stderr, "Error: %s\n", wtext_last_error());
//!         return 1;
//!     }
//!
//!     char* text = wtext_extract_text("word/document.xml");
//!     if (text) {
//!         printf("%s\n", text);
//!         wtext_free_string(text);
//!     }
//!     return 0;
//! }
//! ```

use std::cell::RefCell;
use std::ffi::{c_char, c_int, CStr, CString};
use std::panic::catch_unwind;
use std::ptr;

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

/// Borrow a C string argument as UTF-8.
unsafe fn path_arg<'a>(ptr: *const c_char, name: &str) -> Result<&'a str, String> {
    if ptr.is_null() {
        return Err(format!("{} is null", name));
    }
    CStr::from_ptr(ptr).to_str().map_err(|e| e.to_string())
}

/// Get the version of the library.
///
/// # Safety
///
/// Returns a static string that must not be freed.
#[no_mangle]
pub extern "C" fn wtext_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
}

/// Get the last error message.
///
/// # Safety
///
/// Returns a pointer to a thread-local error string. The pointer is valid until
/// the next call to any wtext function on the same thread.
#[no_mangle]
pub extern "C" fn wtext_last_error() -> *const c_char {
    LAST_ERROR.with(|e| {
        e.borrow()
            .as_ref()
            .map(|s| s.as_ptr())
            .unwrap_or(ptr::null())
    })
}

/// Extract text from `input` and write it to `output`.
///
/// # Safety
///
/// - `input` and `output` must be valid null-terminated UTF-8 strings.
/// - Returns 0 on success and -1 on error. Use `wtext_last_error` to get the
///   error message.
#[no_mangle]
pub unsafe extern "C" fn wtext_extract_to_file(input: *const c_char, output: *const c_char) -> c_int {
    clear_last_error();

    let result = catch_unwind(|| {
        let input = path_arg(input, "input")?;
        let output = path_arg(output, "output")?;
        crate::extract_to_file(input, output).map_err(|e| e.to_string())
    });

    match result {
        Ok(Ok(_)) => 0,
        Ok(Err(e)) => {
            set_last_error(&e);
            -1
        }
        Err(_) => {
            set_last_error("panic occurred during extraction");
            -1
        }
    }
}

/// Extract text from `input` and return it.
///
/// # Safety
///
/// - `input` must be a valid null-terminated UTF-8 string.
/// - Returns null on error. Use `wtext_last_error` to get the error message.
/// - The returned string must be freed with `wtext_free_string`.
#[no_mangle]
pub unsafe extern "C" fn wtext_extract_text(input: *const c_char) -> *mut c_char {
    clear_last_error();

    let result = catch_unwind(|| {
        let input = path_arg(input, "input")?;
        crate::extract_text(input).map_err(|e| e.to_string())
    });

    match result {
        Ok(Ok(text)) => match CString::new(text) {
            Ok(s) => s.into_raw(),
            Err(_) => {
                set_last_error("output contains null byte");
                ptr::null_mut()
            }
        },
        Ok(Err(e)) => {
            set_last_error(&e);
            ptr::null_mut()
        }
        Err(_) => {
            set_last_error("panic occurred during extraction");
            ptr::null_mut()
        }
    }
}

/// Free a string allocated by this library.
///
/// # Safety
///
/// - `s` must be a pointer returned by a wtext function, or null.
/// - After calling this function, the pointer is invalid and must not be used.
#[no_mangle]
pub unsafe extern "C" fn wtext_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = CString::from_raw(s);
    }
}
