//! Descriptor-level entry point for callers holding raw endpoints (pipes,
//! sockets, already-open files) rather than `Read`/`Write` objects.

use std::fs::File;
use std::mem::ManuallyDrop;
use std::os::fd::{AsRawFd, BorrowedFd, FromRawFd};

use crate::{transfer, TransformResult};

/// Decompress the zstd stream readable on `src` onto `dst`.
///
/// Both descriptors stay owned by the caller and are left open; no seeking
/// or positioning is performed, so they may be non-seekable endpoints such
/// as pipes. Writes that the destination does not accept in full are fatal
/// ([`TransformError::ShortWrite`](crate::TransformError::ShortWrite)).
pub fn decompress_fd(src: BorrowedFd<'_>, dst: BorrowedFd<'_>) -> TransformResult<()> {
    let mut src = borrow_file(src);
    let mut dst = borrow_file(dst);
    transfer::decompress(&mut *src, &mut *dst)
}

// View a borrowed descriptor as a File without taking ownership. The
// ManuallyDrop keeps the File's close from running; the descriptor must
// stay open for the returned value's lifetime, which the BorrowedFd
// lifetime guarantees at the call site.
fn borrow_file(fd: BorrowedFd<'_>) -> ManuallyDrop<File> {
    // SAFETY: the fd is valid for the duration of the borrow and the
    // wrapper never closes it.
    ManuallyDrop::new(unsafe { File::from_raw_fd(fd.as_raw_fd()) })
}
