//! Table marker detection
use std::sync::LazyLock;

use regex::bytes::Regex;

// Byte oriented (no Unicode case folding) and `.` stops at '\n'.
static TABLE_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i-u)^-- Table structure for table `(.*)`").expect("valid marker regex")
});

/// Fast check: only lines starting with `--` can be markers.
pub fn is_comment(line: &[u8]) -> bool {
    line.starts_with(b"--")
}

/// Return the table identifier if `line` starts a new table section:
/// ```text
/// -- Table structure for table `name`
/// ```
///
/// The identifier extends to the last backtick of the line.
pub fn table_name(line: &[u8]) -> Option<&[u8]> {
    if !is_comment(line) {
        return None;
    }
    TABLE_START
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_bytes())
}

#[cfg(test)]
mod test {
    use super::table_name;

    #[test]
    fn marker() {
        assert_eq!(
            Some(&b"users"[..]),
            table_name(b"-- Table structure for table `users`\n")
        );
    }

    #[test]
    fn marker_case_insensitive() {
        assert_eq!(
            Some(&b"Orders"[..]),
            table_name(b"-- TABLE STRUCTURE FOR TABLE `Orders`\r\n")
        );
        assert_eq!(
            Some(&b"t"[..]),
            table_name(b"-- table Structure for Table `t`")
        );
    }

    #[test]
    fn greedy_identifier() {
        assert_eq!(
            Some(&b"a` and `b"[..]),
            table_name(b"-- Table structure for table `a` and `b`\n")
        );
        assert_eq!(Some(&b""[..]), table_name(b"-- Table structure for table ``\n"));
    }

    #[test]
    fn not_a_marker() {
        assert_eq!(None, table_name(b"-- Dumping data for table `users`\n"));
        assert_eq!(None, table_name(b"--Table structure for table `users`\n"));
        assert_eq!(None, table_name(b" -- Table structure for table `users`\n"));
        assert_eq!(None, table_name(b"-- Table structure for table `users\n"));
        assert_eq!(None, table_name(b"-- Table structure for table users\n"));
        assert_eq!(None, table_name(b"-"));
        assert_eq!(None, table_name(b""));
    }

    #[test]
    fn trailing_text_is_ignored() {
        assert_eq!(
            Some(&b"t"[..]),
            table_name(b"-- Table structure for table `t` (InnoDB)\n")
        );
    }

    #[test]
    fn non_utf8_identifier() {
        assert_eq!(
            Some(&b"caf\xe9"[..]),
            table_name(b"-- Table structure for table `caf\xe9`\n")
        );
    }
}
