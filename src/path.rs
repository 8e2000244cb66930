//! Dot-segment removal and path merging (RFC 3986 §5.2.3, §5.2.4).

/// Removes `.` and `..` segments from a path.
///
/// The input is consumed from the left, one rule at a time:
///
/// | input starts with | action |
/// |---|---|
/// | `../` or `./` | drop the prefix |
/// | `/./` or `/.` (complete) | replace with `/` |
/// | `/../` or `/..` (complete) | replace with `/`, pop the last output segment |
/// | `.` or `..` (complete) | drop it |
/// | anything else | move the first segment (with its leading `/`) to the output |
///
/// # Examples
///
/// ```
/// use uri_idn::path::remove_dot_segments;
///
/// assert_eq!(remove_dot_segments("/a/b/c/./../../g"), "/a/g");
/// assert_eq!(remove_dot_segments("mid/content=5/../6"), "mid/6");
/// ```
#[must_use]
pub fn remove_dot_segments(path: &str) -> String {
    let mut output: Vec<&str> = Vec::new();
    let mut input = path;

    while !input.is_empty() {
        if let Some(rest) = input.strip_prefix("../").or_else(|| input.strip_prefix("./")) {
            input = rest;
        } else if input.starts_with("/./") {
            input = &input[2..];
        } else if input == "/." {
            input = "/";
        } else if input.starts_with("/../") {
            input = &input[3..];
            output.pop();
        } else if input == "/.." {
            input = "/";
            output.pop();
        } else if input == "." || input == ".." {
            input = "";
        } else {
            let first = input.chars().next().map_or(0, char::len_utf8);
            let end = input[first..].find('/').map_or(input.len(), |idx| idx + first);
            let (segment, rest) = input.split_at(end);
            if !segment.is_empty() {
                output.push(segment);
            }
            input = rest;
        }
    }

    output.concat()
}

/// Merges a relative-path reference with the path of its base.
///
/// A base with an authority but an empty path yields `/` followed by the
/// reference; otherwise everything after the base's last `/` is replaced
/// by the reference.
///
/// # Examples
///
/// ```
/// use uri_idn::path::merge_paths;
///
/// assert_eq!(merge_paths("/b/c/d;p", true, "g"), "/b/c/g");
/// assert_eq!(merge_paths("", true, "g"), "/g");
/// assert_eq!(merge_paths("d", false, "g"), "g");
/// ```
#[must_use]
pub fn merge_paths(base_path: &str, base_has_authority: bool, reference: &str) -> String {
    if base_has_authority && base_path.is_empty() {
        return format!("/{reference}");
    }
    let kept = base_path.rfind('/').map_or("", |idx| &base_path[..=idx]);
    format!("{kept}{reference}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_single_dots() {
        assert_eq!(remove_dot_segments("/a/./b"), "/a/b");
        assert_eq!(remove_dot_segments("/a/."), "/a/");
        assert_eq!(remove_dot_segments("./a"), "a");
        assert_eq!(remove_dot_segments("."), "");
    }

    #[test]
    fn removes_double_dots() {
        assert_eq!(remove_dot_segments("/a/b/../c"), "/a/c");
        assert_eq!(remove_dot_segments("/a/b/.."), "/a/");
        assert_eq!(remove_dot_segments("../a"), "a");
        assert_eq!(remove_dot_segments(".."), "");
    }

    #[test]
    fn double_dots_do_not_underflow() {
        assert_eq!(remove_dot_segments("/../../g"), "/g");
        assert_eq!(remove_dot_segments("/a/../../.."), "/");
    }

    #[test]
    fn keeps_dot_like_segments() {
        assert_eq!(remove_dot_segments("/a/.hidden"), "/a/.hidden");
        assert_eq!(remove_dot_segments("/g..h/..g"), "/g..h/..g");
        assert_eq!(remove_dot_segments("/a/.../b"), "/a/.../b");
    }

    #[test]
    fn keeps_empty_segments() {
        assert_eq!(remove_dot_segments("/a//b/"), "/a//b/");
        assert_eq!(remove_dot_segments("//a"), "//a");
        assert_eq!(remove_dot_segments("/"), "/");
        assert_eq!(remove_dot_segments(""), "");
    }

    #[test]
    fn is_idempotent_on_samples() {
        for path in ["/a/b/c/./../../g", "a/..//b", "/./../x/.", "..//..", "a/.././b/"] {
            let once = remove_dot_segments(path);
            assert_eq!(remove_dot_segments(&once), once, "path {path}");
        }
    }

    #[test]
    fn merge_drops_last_base_segment() {
        assert_eq!(merge_paths("/a/b", false, "c"), "/a/c");
        assert_eq!(merge_paths("/a/b/", true, "c"), "/a/b/c");
        assert_eq!(merge_paths("", false, "c"), "c");
    }
}
