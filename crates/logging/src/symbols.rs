//! crates/logging/src/symbols.rs
//! Best-effort function names for trace output.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Names registered by [`trace_call!`](crate::trace_call) call sites.
#[derive(Debug, Default)]
pub(crate) struct SymbolTable {
    names: RwLock<HashMap<usize, &'static str>>,
}

impl SymbolTable {
    pub(crate) fn register(&self, addr: usize, name: &'static str) {
        let mut names = self.names.write().unwrap_or_else(PoisonError::into_inner);
        names.entry(addr).or_insert(name);
    }

    pub(crate) fn lookup(&self, addr: usize) -> Option<&'static str> {
        let names = self.names.read().unwrap_or_else(PoisonError::into_inner);
        names.get(&addr).copied()
    }
}

/// Fallback rendering for an address no table knows about.
pub(crate) fn hex_name(addr: usize) -> String {
    format!("0x{addr:08x}")
}

#[cfg(unix)]
pub(crate) use dynamic::DynamicSymbols;

#[cfg(unix)]
#[allow(unsafe_code)]
mod dynamic {
    use std::ffi::{CStr, c_void};
    use std::fmt;
    use std::ptr::NonNull;

    /// Handle on the executable's dynamic symbol table.
    pub(crate) struct DynamicSymbols {
        handle: NonNull<c_void>,
    }

    // SAFETY: the handle returned by dlopen() is process-global and the
    // dl* functions used here are thread-safe.
    unsafe impl Send for DynamicSymbols {}
    // SAFETY: see above; no method mutates through the handle.
    unsafe impl Sync for DynamicSymbols {}

    impl DynamicSymbols {
        /// Opens the main program's symbol table. `None` if the loader refuses.
        pub(crate) fn open() -> Option<Self> {
            // SAFETY: a null filename asks for the main program and has no
            // other preconditions.
            let handle = unsafe { libc::dlopen(std::ptr::null(), libc::RTLD_LAZY) };
            NonNull::new(handle).map(|handle| Self { handle })
        }

        /// Name of the exported symbol starting exactly at `addr`.
        pub(crate) fn lookup(&self, addr: usize) -> Option<String> {
            let mut info = std::mem::MaybeUninit::<libc::Dl_info>::zeroed();
            // SAFETY: dladdr only writes into `info`, which is valid for writes.
            let found = unsafe { libc::dladdr(addr as *const c_void, info.as_mut_ptr()) };
            if found == 0 {
                return None;
            }
            // SAFETY: dladdr returned non-zero, so `info` has been filled in.
            let info = unsafe { info.assume_init() };
            if info.dli_sname.is_null() || info.dli_saddr as usize != addr {
                return None;
            }
            // SAFETY: dli_sname is a NUL-terminated string owned by the loader
            // and valid while the object stays mapped.
            let name = unsafe { CStr::from_ptr(info.dli_sname) };
            Some(name.to_string_lossy().into_owned())
        }
    }

    impl fmt::Debug for DynamicSymbols {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("DynamicSymbols")
                .field("handle", &self.handle)
                .finish()
        }
    }

    impl Drop for DynamicSymbols {
        fn drop(&mut self) {
            // SAFETY: the handle came from dlopen() and is closed exactly once.
            unsafe {
                libc::dlclose(self.handle.as_ptr());
            }
        }
    }
}
