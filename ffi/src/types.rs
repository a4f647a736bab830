//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` instead of `String` (null for an absent optional field),
//! raw pointer + length instead of `Vec`, and tagged enums with explicit
//! discriminants. Conversions live here so `lib.rs` stays focused on the
//! `extern "C"` surface.

use std::ffi::{c_void, CString};
use std::os::raw::c_char;

use mural_core::{ApiError, HttpMethod, Message};

/// Opaque handle to a `MuralClient`.
pub struct FfiMuralClient {
    pub(crate) inner: mural_core::MuralClient,
}

/// Owned C string from Rust text. Interior NULs cannot be represented and
/// are dropped.
pub(crate) fn c_string(s: impl Into<String>) -> *mut c_char {
    let mut s = s.into();
    s.retain(|c| c != '\0');
    CString::new(s).unwrap_or_default().into_raw()
}

fn c_string_opt(s: Option<String>) -> *mut c_char {
    match s {
        Some(s) => c_string(s),
        None => std::ptr::null_mut(),
    }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
    Delete = 2,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
            HttpMethod::Delete => FfiHttpMethod::Delete,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by `mural_build_*`. The host executes it and passes the response
/// back through `mural_parse_*`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub path: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    pub(crate) fn from_core(req: mural_core::HttpRequest) -> *mut Self {
        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Vec<FfiHeader> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: c_string(k),
                    value: c_string(v),
                })
                .collect();
            // into_boxed_slice makes capacity == len for the matching free.
            Box::into_raw(ffi_headers.into_boxed_slice()) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            path: c_string(req.path),
            headers,
            headers_len,
            body: c_string_opt(req.body),
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// Built by the host after executing a request. The FFI layer reads but does
/// not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiMuralResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    NotFound = 1,
    Http = 2,
    Serialization = 3,
    InvalidDraft = 4,
    Panic = 5,
    NullArg = 6,
}

impl From<&ApiError> for FfiErrorCode {
    fn from(err: &ApiError) -> Self {
        match err {
            ApiError::NotFound => FfiErrorCode::NotFound,
            ApiError::Http { .. } => FfiErrorCode::Http,
            ApiError::Serialization(_) => FfiErrorCode::Serialization,
            ApiError::InvalidDraft(_) => FfiErrorCode::InvalidDraft,
        }
    }
}

/// Tag that tells `mural_free_result` what `FfiMuralResult::data` points to.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiDataTag {
    None = 0,
    Message = 1,
    MessageList = 2,
}

/// A message exposed to C. Absent fields are null; `id` is rendered as text.
#[repr(C)]
pub struct FfiMessage {
    pub id: *mut c_char,
    pub author: *mut c_char,
    pub body: *mut c_char,
    pub created_at: *mut c_char,
}

impl FfiMessage {
    fn from_core(m: Message) -> Self {
        FfiMessage {
            id: c_string_opt(m.id.map(|id| id.to_string())),
            author: c_string_opt(m.author),
            body: c_string_opt(m.body),
            created_at: c_string_opt(m.created_at),
        }
    }
}

/// An ordered list of messages exposed to C.
#[repr(C)]
pub struct FfiMessageList {
    pub items: *mut FfiMessage,
    pub len: u32,
}

/// Result envelope for all parse operations.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `data`
/// points to the payload tagged by `data_tag`. On failure `error_code`
/// gives the category, `error_message` is a C string, and `data` is null.
#[repr(C)]
pub struct FfiMuralResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data_tag: FfiDataTag,
    pub data: *mut c_void,
}

impl FfiMuralResult {
    fn boxed(
        error_code: FfiErrorCode,
        error_message: *mut c_char,
        http_status: u16,
        data_tag: FfiDataTag,
        data: *mut c_void,
    ) -> *mut Self {
        Box::into_raw(Box::new(FfiMuralResult {
            error_code,
            error_message,
            http_status,
            data_tag,
            data,
        }))
    }

    pub(crate) fn ok_message(message: Message) -> *mut Self {
        let data = Box::into_raw(Box::new(FfiMessage::from_core(message))) as *mut c_void;
        Self::boxed(FfiErrorCode::Ok, std::ptr::null_mut(), 0, FfiDataTag::Message, data)
    }

    pub(crate) fn ok_message_list(messages: Vec<Message>) -> *mut Self {
        let len = messages.len() as u32;
        let items = if messages.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi: Vec<FfiMessage> = messages.into_iter().map(FfiMessage::from_core).collect();
            Box::into_raw(ffi.into_boxed_slice()) as *mut FfiMessage
        };
        let data = Box::into_raw(Box::new(FfiMessageList { items, len })) as *mut c_void;
        Self::boxed(FfiErrorCode::Ok, std::ptr::null_mut(), 0, FfiDataTag::MessageList, data)
    }

    /// Success with no payload (delete, or a create the store did not echo).
    pub(crate) fn ok_empty() -> *mut Self {
        Self::boxed(FfiErrorCode::Ok, std::ptr::null_mut(), 0, FfiDataTag::None, std::ptr::null_mut())
    }

    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let http_status = match &err {
            ApiError::NotFound => 404,
            ApiError::Http { status, .. } => *status,
            _ => 0,
        };
        Self::boxed(
            FfiErrorCode::from(&err),
            c_string(err.to_string()),
            http_status,
            FfiDataTag::None,
            std::ptr::null_mut(),
        )
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::boxed(
            FfiErrorCode::NullArg,
            c_string(format!("null argument: {name}")),
            0,
            FfiDataTag::None,
            std::ptr::null_mut(),
        )
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::boxed(FfiErrorCode::Panic, c_string(msg), 0, FfiDataTag::None, std::ptr::null_mut())
    }
}

/// Free the C-string fields of an `FfiMessage` (not the struct itself).
pub(crate) fn free_message_fields(message: &FfiMessage) {
    for ptr in [message.id, message.author, message.body, message.created_at] {
        if !ptr.is_null() {
            drop(unsafe { CString::from_raw(ptr) });
        }
    }
}
