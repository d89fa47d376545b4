//! ABI layer for frame/request recovery.
//!
//! Foreign callers interpose at the point the framework hands them a
//! navigation-action or frame-info object: they record what the framework
//! knew under the object's identity, and read it back through the accessors.
//! Identity `0` means "no object" and an absent recovery reads back as `0` /
//! a negative length, mirroring the nullability of the underlying fields.

use std::ffi::{CStr, c_char};
use std::sync::LazyLock;

use bridgekit_core::webframe::{ActionId, FrameId, FrameRegistry, RequestRecord};

static REGISTRY: LazyLock<FrameRegistry> = LazyLock::new(FrameRegistry::new);

/// Process-wide recovery table, shared with Rust callers.
#[must_use]
pub fn registry() -> &'static FrameRegistry {
    &REGISTRY
}

/// Records a navigation action's originating frame (`0` = the framework has
/// none, e.g. top-level navigation). A zero action identity is ignored.
#[unsafe(no_mangle)]
pub extern "C" fn webframe_record_navigation_action(action: u64, source_frame: u64) {
    let Some(action) = ActionId::new(action) else {
        return;
    };
    REGISTRY.record_action(action, FrameId::new(source_frame));
}

/// Originating frame of a navigation action; `0` exactly when none was
/// recorded.
#[unsafe(no_mangle)]
pub extern "C" fn webframe_real_source_frame(action: u64) -> u64 {
    ActionId::new(action)
        .and_then(|a| REGISTRY.real_source_frame(a))
        .map_or(0, FrameId::get)
}

/// Records the request underlying a frame-info object. A null `url` means
/// the framework had no request; `method` defaults to GET when null.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn webframe_record_frame_request(
    frame: u64,
    url: *const c_char,
    method: *const c_char,
) {
    let Some(frame) = FrameId::new(frame) else {
        return;
    };
    let request = if url.is_null() {
        None
    } else {
        let url = unsafe { CStr::from_ptr(url) }.to_string_lossy().into_owned();
        let method = if method.is_null() {
            "GET".to_owned()
        } else {
            unsafe { CStr::from_ptr(method) }.to_string_lossy().into_owned()
        };
        Some(RequestRecord { url, method })
    };
    REGISTRY.record_frame(frame, request);
}

/// Copies the recovered request URL into `buf` (NUL-terminated, truncating
/// to `cap`). Returns the full URL length in bytes excluding the NUL, or -1
/// exactly when no request was recorded. `buf` may be null to query the
/// length.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn webframe_real_request_url(
    frame: u64,
    buf: *mut c_char,
    cap: usize,
) -> isize {
    unsafe { copy_recovered(frame, buf, cap, |r| r.url.as_str()) }
}

/// Same contract as [`webframe_real_request_url`], for the request method.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn webframe_real_request_method(
    frame: u64,
    buf: *mut c_char,
    cap: usize,
) -> isize {
    unsafe { copy_recovered(frame, buf, cap, |r| r.method.as_str()) }
}

/// Drops a navigation action's entry once its lifecycle ends.
#[unsafe(no_mangle)]
pub extern "C" fn webframe_retire_navigation_action(action: u64) {
    if let Some(action) = ActionId::new(action) {
        REGISTRY.retire_action(action);
    }
}

/// Drops a frame-info entry once its lifecycle ends.
#[unsafe(no_mangle)]
pub extern "C" fn webframe_retire_frame(frame: u64) {
    if let Some(frame) = FrameId::new(frame) {
        REGISTRY.retire_frame(frame);
    }
}

/// `buf`, when non-null, must be writable for `cap` bytes.
unsafe fn copy_recovered(
    frame: u64,
    buf: *mut c_char,
    cap: usize,
    field: impl Fn(&RequestRecord) -> &str,
) -> isize {
    let record = FrameId::new(frame).and_then(|f| REGISTRY.real_request(f));
    let Some(record) = record else {
        return -1;
    };
    let bytes = field(&record).as_bytes();
    if !buf.is_null() && cap > 0 {
        let n = bytes.len().min(cap - 1);
        unsafe {
            std::ptr::copy_nonoverlapping(bytes.as_ptr(), buf.cast::<u8>(), n);
            *buf.add(n) = 0;
        }
    }
    bytes.len() as isize
}
