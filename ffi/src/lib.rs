//! C-ABI wrapper around `mural-core`.
//!
//! # Overview
//! Lets a mobile host (Swift, Kotlin, anything with a C FFI) build and parse
//! message-store requests and order the board without linking serde or an
//! async runtime. The host performs the HTTP round-trip and renders.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - `build_*` / `parse_*` mirror the core API 1:1.
//! - `mural_parse_list_messages` also takes the selected order mode name, so
//!   the host keeps the mode and the core stays stateless.
//! - One `FfiMuralResult` envelope with `FfiDataTag` + `void* data` carries
//!   both payloads and errors.
//! - The host owns every returned pointer and releases it with the matching
//!   `mural_free_*` function.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use mural_core::{order_by_name, HttpResponse, MessageId, NewMessage};

use types::*;

/// Borrow a C string as UTF-8; invalid UTF-8 reads as empty.
///
/// # Safety
/// `ptr` must be non-null and point to a NUL-terminated string.
unsafe fn read_str<'a>(ptr: *const c_char) -> &'a str {
    CStr::from_ptr(ptr).to_str().unwrap_or("")
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new `MuralClient` bound to `base_url`.
///
/// Returns null if `base_url` is null or on internal panic. Free with
/// `mural_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn mural_client_new(base_url: *const c_char) -> *mut FfiMuralClient {
    catch_unwind(|| {
        if base_url.is_null() {
            return std::ptr::null_mut();
        }
        let url = unsafe { read_str(base_url) };
        let client = mural_core::MuralClient::new(url);
        Box::into_raw(Box::new(FfiMuralClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `mural_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn mural_client_free(client: *mut FfiMuralClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Draft validation
// ---------------------------------------------------------------------------

/// Check form input before publishing.
///
/// Returns `Ok` when both fields are non-blank after trimming,
/// `InvalidDraft` otherwise, and `NullArg` for null pointers. Hosts use this
/// to show the "fill in name and message" prompt.
#[unsafe(no_mangle)]
pub extern "C" fn mural_check_draft(author: *const c_char, body: *const c_char) -> FfiErrorCode {
    catch_unwind(|| {
        if author.is_null() || body.is_null() {
            return FfiErrorCode::NullArg;
        }
        let (author, body) = unsafe { (read_str(author), read_str(body)) };
        match NewMessage::from_form(author, body) {
            Ok(_) => FfiErrorCode::Ok,
            Err(e) => FfiErrorCode::from(&e),
        }
    })
    .unwrap_or(FfiErrorCode::Panic)
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Build the request that lists every message.
///
/// Returns null if `client` is null. Free with `mural_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn mural_build_list_messages(client: *const FfiMuralClient) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        FfiHttpRequest::from_core(client.inner.build_list_messages())
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build the request that publishes a message.
///
/// Input is trimmed. Returns null if any argument is null or if either
/// field is blank (see `mural_check_draft`).
#[unsafe(no_mangle)]
pub extern "C" fn mural_build_create_message(
    client: *const FfiMuralClient,
    author: *const c_char,
    body: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() || author.is_null() || body.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let (author, body) = unsafe { (read_str(author), read_str(body)) };
        let built = NewMessage::from_form(author, body)
            .and_then(|draft| client.inner.build_create_message(&draft));
        match built {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build the request that deletes a message by id (as shown in
/// `FfiMessage::id`).
///
/// Returns null if `client` or `id` is null or `id` is blank.
#[unsafe(no_mangle)]
pub extern "C" fn mural_build_delete_message(
    client: *const FfiMuralClient,
    id: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() || id.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let raw = unsafe { read_str(id) };
        if raw.trim().is_empty() {
            return std::ptr::null_mut();
        }
        FfiHttpRequest::from_core(client.inner.build_delete_message(&MessageId::parse(raw)))
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Parse response functions
// ---------------------------------------------------------------------------

fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let body = if resp.body.is_null() {
        String::new()
    } else {
        unsafe { read_str(resp.body) }.to_string()
    };
    HttpResponse::new(resp.status, body)
}

/// Parse a list response and order it.
///
/// `order_mode` is a mode name (`newest-first`, `oldest-first`,
/// `alphabetical-by-author`, or the `recentes` / `antigos` / `alfabetica`
/// labels). Null or an unknown name keeps store order. Returns
/// `data_tag = MessageList` on success.
#[unsafe(no_mangle)]
pub extern "C" fn mural_parse_list_messages(
    client: *const FfiMuralClient,
    response: *const FfiHttpResponse,
    order_mode: *const c_char,
) -> *mut FfiMuralResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiMuralResult::null_arg("client");
        }
        if response.is_null() {
            return FfiMuralResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        let mode = if order_mode.is_null() {
            ""
        } else {
            unsafe { read_str(order_mode) }
        };
        match client.inner.parse_list_messages(ffi_response_to_core(resp)) {
            Ok(messages) => FfiMuralResult::ok_message_list(order_by_name(&messages, mode)),
            Err(e) => FfiMuralResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiMuralResult::panic("panic in mural_parse_list_messages"))
}

/// Parse a create response.
///
/// Returns `data_tag = Message` when the store echoed the record, `None`
/// otherwise.
#[unsafe(no_mangle)]
pub extern "C" fn mural_parse_create_message(
    client: *const FfiMuralClient,
    response: *const FfiHttpResponse,
) -> *mut FfiMuralResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiMuralResult::null_arg("client");
        }
        if response.is_null() {
            return FfiMuralResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        match client.inner.parse_create_message(ffi_response_to_core(resp)) {
            Ok(Some(message)) => FfiMuralResult::ok_message(message),
            Ok(None) => FfiMuralResult::ok_empty(),
            Err(e) => FfiMuralResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiMuralResult::panic("panic in mural_parse_create_message"))
}

/// Parse a delete response. Returns `data_tag = None` on success.
#[unsafe(no_mangle)]
pub extern "C" fn mural_parse_delete_message(
    client: *const FfiMuralClient,
    response: *const FfiHttpResponse,
) -> *mut FfiMuralResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiMuralResult::null_arg("client");
        }
        if response.is_null() {
            return FfiMuralResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        match client.inner.parse_delete_message(ffi_response_to_core(resp)) {
            Ok(()) => FfiMuralResult::ok_empty(),
            Err(e) => FfiMuralResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiMuralResult::panic("panic in mural_parse_delete_message"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a request returned by any `mural_build_*` function. Safe with null.
#[unsafe(no_mangle)]
pub extern "C" fn mural_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        if !req.path.is_null() {
            drop(unsafe { CString::from_raw(req.path) });
        }
        if !req.body.is_null() {
            drop(unsafe { CString::from_raw(req.body) });
        }
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len as usize,
                ))
            };
            for h in headers.iter() {
                if !h.key.is_null() {
                    drop(unsafe { CString::from_raw(h.key) });
                }
                if !h.value.is_null() {
                    drop(unsafe { CString::from_raw(h.value) });
                }
            }
        }
    });
}

/// Free a result returned by any `mural_parse_*` function. Safe with null.
/// Uses `data_tag` to determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn mural_free_result(result: *mut FfiMuralResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { CString::from_raw(result.error_message) });
        }
        if result.data.is_null() {
            return;
        }
        match result.data_tag {
            FfiDataTag::Message => {
                let message = unsafe { Box::from_raw(result.data as *mut FfiMessage) };
                free_message_fields(&message);
            }
            FfiDataTag::MessageList => {
                let list = unsafe { Box::from_raw(result.data as *mut FfiMessageList) };
                if !list.items.is_null() && list.len > 0 {
                    let items = unsafe {
                        Box::from_raw(std::ptr::slice_from_raw_parts_mut(list.items, list.len as usize))
                    };
                    for item in items.iter() {
                        free_message_fields(item);
                    }
                }
            }
            FfiDataTag::None => {}
        }
    });
}

/// Free a C string allocated by this library. Safe with null.
#[unsafe(no_mangle)]
pub extern "C" fn mural_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"[
        {"id":1,"autor":"Bia","mensagem":"primeiro","data_criacao":"2024-01-01"},
        {"id":2,"autor":"Ana","mensagem":"segundo","data_criacao":"2024-02-01"},
        {"id":3,"mensagem":"sem autor"}
    ]"#;

    fn new_client() -> *mut FfiMuralClient {
        let url = CString::new("http://localhost:3000").unwrap();
        mural_client_new(url.as_ptr())
    }

    fn text(ptr: *const c_char) -> Option<String> {
        if ptr.is_null() {
            None
        } else {
            Some(unsafe { CStr::from_ptr(ptr) }.to_str().unwrap().to_string())
        }
    }

    fn listed_ids(result: *mut FfiMuralResult) -> Vec<String> {
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        assert_eq!(r.data_tag, FfiDataTag::MessageList);
        let list = unsafe { &*(r.data as *const FfiMessageList) };
        if list.len == 0 {
            return Vec::new();
        }
        let items = unsafe { std::slice::from_raw_parts(list.items, list.len as usize) };
        items.iter().map(|m| text(m.id).unwrap()).collect()
    }

    #[test]
    fn client_new_and_free() {
        let client = new_client();
        assert!(!client.is_null());
        mural_client_free(client);
    }

    #[test]
    fn client_new_null_returns_null() {
        assert!(mural_client_new(std::ptr::null()).is_null());
    }

    #[test]
    fn client_free_null_is_safe() {
        mural_client_free(std::ptr::null_mut());
    }

    #[test]
    fn check_draft_codes() {
        let ok_author = CString::new(" Ana ").unwrap();
        let ok_body = CString::new("oi").unwrap();
        let blank = CString::new("  ").unwrap();
        assert_eq!(mural_check_draft(ok_author.as_ptr(), ok_body.as_ptr()), FfiErrorCode::Ok);
        assert_eq!(mural_check_draft(blank.as_ptr(), ok_body.as_ptr()), FfiErrorCode::InvalidDraft);
        assert_eq!(mural_check_draft(ok_author.as_ptr(), std::ptr::null()), FfiErrorCode::NullArg);
    }

    #[test]
    fn build_list_messages_returns_correct_request() {
        let client = new_client();
        let req = mural_build_list_messages(client);
        assert!(!req.is_null());

        let req_ref = unsafe { &*req };
        assert!(matches!(req_ref.method, FfiHttpMethod::Get));
        assert_eq!(text(req_ref.path).unwrap(), "http://localhost:3000/recados");
        assert!(req_ref.body.is_null());
        assert_eq!(req_ref.headers_len, 0);

        mural_free_request(req);
        mural_client_free(client);
    }

    #[test]
    fn build_list_messages_null_client_returns_null() {
        assert!(mural_build_list_messages(std::ptr::null()).is_null());
    }

    #[test]
    fn build_create_message_produces_post_with_json_body() {
        let client = new_client();
        let author = CString::new("  Ana").unwrap();
        let body = CString::new("Bom dia ").unwrap();
        let req = mural_build_create_message(client, author.as_ptr(), body.as_ptr());
        assert!(!req.is_null());

        let req_ref = unsafe { &*req };
        assert!(matches!(req_ref.method, FfiHttpMethod::Post));
        assert_eq!(req_ref.headers_len, 1);
        let header = unsafe { &*req_ref.headers };
        assert_eq!(text(header.key).unwrap(), "content-type");
        assert_eq!(text(header.value).unwrap(), "application/json");

        let json: serde_json::Value = serde_json::from_str(&text(req_ref.body).unwrap()).unwrap();
        assert_eq!(json["autor"], "Ana");
        assert_eq!(json["mensagem"], "Bom dia");

        mural_free_request(req);
        mural_client_free(client);
    }

    #[test]
    fn build_create_message_blank_field_returns_null() {
        let client = new_client();
        let author = CString::new("Ana").unwrap();
        let body = CString::new("\n").unwrap();
        assert!(mural_build_create_message(client, author.as_ptr(), body.as_ptr()).is_null());
        mural_client_free(client);
    }

    #[test]
    fn build_delete_message_paths() {
        let client = new_client();
        let id = CString::new("12").unwrap();
        let req = mural_build_delete_message(client, id.as_ptr());
        let req_ref = unsafe { &*req };
        assert!(matches!(req_ref.method, FfiHttpMethod::Delete));
        assert_eq!(text(req_ref.path).unwrap(), "http://localhost:3000/recados/12");
        mural_free_request(req);

        let blank = CString::new(" ").unwrap();
        assert!(mural_build_delete_message(client, blank.as_ptr()).is_null());
        mural_client_free(client);
    }

    #[test]
    fn parse_list_messages_orders_by_mode() {
        let client = new_client();
        let body = CString::new(LISTING).unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };

        for (mode, expected) in [
            ("newest-first", vec!["2", "1", "3"]),
            ("antigos", vec!["3", "1", "2"]),
            ("alphabetical-by-author", vec!["3", "2", "1"]),
            ("foo", vec!["1", "2", "3"]),
        ] {
            let mode_c = CString::new(mode).unwrap();
            let result = mural_parse_list_messages(client, &resp, mode_c.as_ptr());
            assert_eq!(listed_ids(result), expected, "{mode}");
            mural_free_result(result);
        }

        let result = mural_parse_list_messages(client, &resp, std::ptr::null());
        assert_eq!(listed_ids(result), vec!["1", "2", "3"]);
        mural_free_result(result);

        mural_client_free(client);
    }

    #[test]
    fn parse_list_messages_absent_fields_are_null() {
        let client = new_client();
        let body = CString::new(LISTING).unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        let result = mural_parse_list_messages(client, &resp, std::ptr::null());
        let r = unsafe { &*result };
        let list = unsafe { &*(r.data as *const FfiMessageList) };
        let items = unsafe { std::slice::from_raw_parts(list.items, list.len as usize) };
        assert_eq!(text(items[2].body).as_deref(), Some("sem autor"));
        assert!(items[2].author.is_null());
        assert!(items[2].created_at.is_null());

        mural_free_result(result);
        mural_client_free(client);
    }

    #[test]
    fn parse_list_messages_non_array_is_empty_list() {
        let client = new_client();
        let body = CString::new(r#"{"erro":"dormindo"}"#).unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        let result = mural_parse_list_messages(client, &resp, std::ptr::null());
        assert!(listed_ids(result).is_empty());
        mural_free_result(result);

        let resp = FfiHttpResponse {
            status: 200,
            body: std::ptr::null(),
        };
        let result = mural_parse_list_messages(client, &resp, std::ptr::null());
        assert!(listed_ids(result).is_empty());
        mural_free_result(result);

        mural_client_free(client);
    }

    #[test]
    fn parse_list_messages_server_error() {
        let client = new_client();
        let body = CString::new("bad gateway").unwrap();
        let resp = FfiHttpResponse {
            status: 502,
            body: body.as_ptr(),
        };
        let result = mural_parse_list_messages(client, &resp, std::ptr::null());
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Http);
        assert_eq!(r.http_status, 502);
        assert!(r.data.is_null());
        assert!(text(r.error_message).unwrap().contains("bad gateway"));

        mural_free_result(result);
        mural_client_free(client);
    }

    #[test]
    fn parse_create_message_with_and_without_echo() {
        let client = new_client();
        let body = CString::new(
            r#"{"id":5,"autor":"Ana","mensagem":"oi","data_criacao":"2024-05-01T12:00:00Z"}"#,
        )
        .unwrap();
        let resp = FfiHttpResponse {
            status: 201,
            body: body.as_ptr(),
        };
        let result = mural_parse_create_message(client, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        assert_eq!(r.data_tag, FfiDataTag::Message);
        let message = unsafe { &*(r.data as *const FfiMessage) };
        assert_eq!(text(message.id).as_deref(), Some("5"));
        assert_eq!(text(message.author).as_deref(), Some("Ana"));
        mural_free_result(result);

        let empty = CString::new("").unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: empty.as_ptr(),
        };
        let result = mural_parse_create_message(client, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        assert_eq!(r.data_tag, FfiDataTag::None);
        assert!(r.data.is_null());
        mural_free_result(result);

        mural_client_free(client);
    }

    #[test]
    fn parse_delete_message_success_and_not_found() {
        let client = new_client();
        let empty = CString::new("").unwrap();

        let resp = FfiHttpResponse {
            status: 204,
            body: empty.as_ptr(),
        };
        let result = mural_parse_delete_message(client, &resp);
        assert_eq!(unsafe { &*result }.error_code, FfiErrorCode::Ok);
        mural_free_result(result);

        let resp = FfiHttpResponse {
            status: 404,
            body: empty.as_ptr(),
        };
        let result = mural_parse_delete_message(client, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::NotFound);
        assert_eq!(r.http_status, 404);
        assert!(!r.error_message.is_null());
        mural_free_result(result);

        mural_client_free(client);
    }

    #[test]
    fn parse_null_args_return_null_arg() {
        let body = CString::new("[]").unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        let result = mural_parse_list_messages(std::ptr::null(), &resp, std::ptr::null());
        assert_eq!(unsafe { &*result }.error_code, FfiErrorCode::NullArg);
        mural_free_result(result);

        let client = new_client();
        let result = mural_parse_delete_message(client, std::ptr::null());
        assert_eq!(unsafe { &*result }.error_code, FfiErrorCode::NullArg);
        mural_free_result(result);
        mural_client_free(client);
    }

    #[test]
    fn free_functions_accept_null() {
        mural_free_request(std::ptr::null_mut());
        mural_free_result(std::ptr::null_mut());
        mural_free_string(std::ptr::null_mut());
    }
}
