/// Finds `release/[v]MAJOR.MINOR.PATCH` in `text` and returns the version as `vMAJOR.MINOR.PATCH`.
///
/// The match must start at a word boundary before `release` and end at a word boundary after the
/// patch number, so `release/v1.2.3-rc1` yields `v1.2.3` while `release/v1.2.3x` and
/// `prerelease/1.2.3` yield nothing. The leading `v` is optional in the input and always present
/// in the output.
pub fn extract_release_version(text: &str) -> Option<String> {
    const MARKER: &str = "release/";
    let bytes = text.as_bytes();

    let mut from = 0;
    while let Some(pos) = text[from..].find(MARKER) {
        let start = from + pos;
        from = start + MARKER.len();

        if start > 0 && is_word_byte(bytes[start - 1]) {
            continue;
        }
        if let Some(version) = scan_triple(&bytes[from..]) {
            return Some(version);
        }
    }
    None
}

fn scan_triple(rest: &[u8]) -> Option<String> {
    let mut i = usize::from(rest.first() == Some(&b'v'));
    let mut groups: Vec<&str> = Vec::with_capacity(3);

    for n in 0..3 {
        if n > 0 {
            if rest.get(i) != Some(&b'.') {
                return None;
            }
            i += 1;
        }
        let digits = rest[i..].iter().take_while(|b| b.is_ascii_digit()).count();
        if digits == 0 {
            return None;
        }
        // Only ASCII digits were consumed, so the slice is valid UTF-8.
        groups.push(std::str::from_utf8(&rest[i..i + digits]).ok()?);
        i += digits;
    }

    if rest.get(i).is_some_and(|b| is_word_byte(*b)) {
        return None;
    }
    Some(format!("v{}", groups.join(".")))
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
