// Administrator check, consulted once at startup for the warning banner.

/// Whether the process token carries elevated rights.
#[cfg(windows)]
pub fn is_elevated() -> bool {
    use std::mem::size_of;
    use winapi::um::handleapi::CloseHandle;
    use winapi::um::processthreadsapi::{GetCurrentProcess, OpenProcessToken};
    use winapi::um::securitybaseapi::GetTokenInformation;
    use winapi::um::winnt::{HANDLE, TOKEN_ELEVATION, TOKEN_QUERY, TokenElevation};

    let mut token: HANDLE = std::ptr::null_mut();
    // SAFETY: GetCurrentProcess returns a pseudo-handle that needs no cleanup, and
    // `token` is a valid out-pointer for the duration of the call.
    let opened = unsafe { OpenProcessToken(GetCurrentProcess(), TOKEN_QUERY, &mut token) };
    if opened == 0 {
        tracing::debug!("OpenProcessToken failed; assuming not elevated");
        return false;
    }

    let mut elevation = TOKEN_ELEVATION { TokenIsElevated: 0 };
    let buffer_len: u32 = u32::try_from(size_of::<TOKEN_ELEVATION>()).unwrap_or(0);
    let mut returned_len: u32 = 0;

    // SAFETY: `token` was opened above with TOKEN_QUERY; the buffer is a live
    // TOKEN_ELEVATION whose size is passed in `buffer_len`.
    let queried = unsafe {
        GetTokenInformation(
            token,
            TokenElevation,
            (&mut elevation as *mut TOKEN_ELEVATION).cast(),
            buffer_len,
            &mut returned_len,
        )
    };

    // SAFETY: `token` is owned by this function and closed exactly once.
    unsafe { CloseHandle(token) };

    queried != 0 && elevation.TokenIsElevated != 0
}

/// Whether the process runs as root.
#[cfg(not(windows))]
pub fn is_elevated() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail.
    unsafe { libc::geteuid() == 0 }
}
