const KIB: u64 = 1024;
const MIB: u64 = 1024 * KIB;

/// Screenshot sizes for the upload log line: whole kilobytes below a
/// megabyte, one decimal above.
pub fn format_size(bytes: u64) -> String {
    match bytes {
        b if b >= MIB => format!("{:.1} MB", b as f64 / MIB as f64),
        b if b >= KIB => format!("{} KB", b / KIB),
        b => format!("{} B", b),
    }
}
