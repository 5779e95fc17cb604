pub const fn wrap_decrement(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    if index == 0 {
        len - 1
    } else {
        index - 1
    }
}

pub const fn wrap_increment(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    (index + 1) % len
}

/// Accepts printable characters into a text field of at most `limit` chars.
pub fn push_char(field: &mut String, ch: char, limit: usize) {
    if !ch.is_control() && field.chars().count() < limit {
        field.push(ch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_both_ways() {
        assert_eq!(wrap_increment(2, 3), 0);
        assert_eq!(wrap_decrement(0, 3), 2);
        assert_eq!(wrap_increment(0, 0), 0);
    }

    #[test]
    fn push_char_respects_the_limit() {
        let mut field = String::from("ab");
        push_char(&mut field, 'c', 3);
        push_char(&mut field, 'd', 3);
        push_char(&mut field, '\u{7}', 10);
        assert_eq!(field, "abc");
    }
}
