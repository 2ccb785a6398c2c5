//! Single-line reads from kernel-exposed virtual files.
//!
//! Failures never propagate: a file that cannot be opened or read comes back
//! as a sentinel string, and an unparsable integer comes back as zero. The
//! status line prefers a wrong-looking token over a crash.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::config::sysfs::LINE_MAX;

/// Read `root/file` and return its content with a single trailing newline
/// stripped. Reads are capped at [`LINE_MAX`] bytes.
///
/// On open failure returns `"Can't open <file>"`, on an empty read
/// `"Can't read <file>"`; both sentinels flow into the status line as-is.
pub fn read_line(root: &Path, file: &str) -> String {
    let path = root.join(file);
    let mut handle = match File::open(&path) {
        Ok(f) => f.take(LINE_MAX),
        Err(_) => return format!("Can't open {file}"),
    };

    let mut buf = Vec::new();
    match handle.read_to_end(&mut buf) {
        Ok(0) | Err(_) => return format!("Can't read {file}"),
        Ok(_) => {}
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }

    String::from_utf8_lossy(&buf).into_owned()
}

/// Read `root/file` as a base-10 unsigned integer.
///
/// Anything that does not parse, including the [`read_line`] sentinels,
/// yields `0` rather than an error.
pub fn read_u64(root: &Path, file: &str) -> u64 {
    read_line(root, file).trim().parse().unwrap_or(0)
}
