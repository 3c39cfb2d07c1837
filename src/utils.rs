

#[inline]
pub fn safe_truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}


#[inline]
pub fn safe_truncate_ellipsis(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        format!("{}...", s.chars().take(max_chars).collect::<String>())
    } else {
        s.to_string()
    }
}

/// Byte offset of the char boundary at or before `idx`.
#[inline]
pub fn floor_char_boundary(s: &str, idx: usize) -> usize {
    if idx >= s.len() {
        return s.len();
    }
    let mut i = idx;
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_truncate_vietnamese() {
        assert_eq!(safe_truncate("đau đầu dữ dội", 7), "đau đầu");
    }

    #[test]
    fn test_safe_truncate_chinese() {
        assert_eq!(safe_truncate("胸痛已经持续了两天", 2), "胸痛");
    }

    #[test]
    fn test_safe_truncate_shorter() {
        assert_eq!(safe_truncate("ho", 10), "ho");
    }

    #[test]
    fn test_safe_truncate_ellipsis() {
        assert_eq!(safe_truncate_ellipsis("sốt cao ho khan", 7), "sốt cao...");
        assert_eq!(safe_truncate_ellipsis("sốt", 10), "sốt");
    }

    #[test]
    fn test_floor_char_boundary() {
        let s = "ađb";
        assert_eq!(floor_char_boundary(s, 2), 1);
        assert_eq!(floor_char_boundary(s, 3), 3);
        assert_eq!(floor_char_boundary(s, 99), s.len());
    }
}
