//! Line splitting that accepts `\n`, `\r\n` and a lone `\r` as terminators.
//!
//! [`str::lines`] and [`std::io::BufRead::lines`] only break on `\n`, which
//! leaves old Mac-style `\r` output glued into a single line.

/// Split `text` into lines, each terminator counting as one break.
///
/// A trailing terminator yields a final empty line, like `split`.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = Some(text);
    std::iter::from_fn(move || {
        let s = rest?;
        match s.find(['\r', '\n']) {
            Some(i) => {
                let width = if s[i..].starts_with("\r\n") { 2 } else { 1 };
                rest = Some(&s[i + width..]);
                Some(&s[..i])
            }
            None => {
                rest = None;
                Some(s)
            }
        }
    })
}
