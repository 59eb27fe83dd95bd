//! Line folding for serialized content lines.

/// Longest physical line, in octets, excluding the CRLF.
const MAX_LINE_OCTETS: usize = 75;

/// Folds a content line with CRLF + space continuations.
///
/// Breaks only at UTF-8 character boundaries; continuation lines count
/// their leading space.
#[must_use]
pub fn fold_line(line: &str) -> String {
    pack(
        line.split_inclusive(|_: char| true),
        line.len(),
        MAX_LINE_OCTETS,
        MAX_LINE_OCTETS - 1,
        "\r\n ",
    )
}

/// Folds a quoted-printable line with `=` soft line breaks.
///
/// An `=XX` escape is never split across lines. Each physical line,
/// including its trailing `=`, stays within 75 octets.
#[must_use]
pub fn fold_quoted_printable(line: &str) -> String {
    pack(
        qp_tokens(line),
        line.len(),
        MAX_LINE_OCTETS - 1,
        MAX_LINE_OCTETS - 1,
        "=\r\n",
    )
}

/// Concatenates `tokens`, inserting `joiner` before a token that would push
/// the current physical line past its width.
fn pack<'a>(
    tokens: impl IntoIterator<Item = &'a str>,
    total: usize,
    first_width: usize,
    width: usize,
    joiner: &str,
) -> String {
    let mut folded = String::with_capacity(total + total / width * joiner.len());
    let mut limit = first_width;
    let mut used = 0;

    for token in tokens {
        if used > 0 && used + token.len() > limit {
            folded.push_str(joiner);
            limit = width;
            used = 0;
        }
        folded.push_str(token);
        used += token.len();
    }

    folded
}

/// Splits a line into characters, keeping `=XX` escapes as one token.
fn qp_tokens(line: &str) -> Vec<&str> {
    let mut tokens = Vec::with_capacity(line.len());
    let mut rest = line;

    while let Some(c) = rest.chars().next() {
        let mut len = c.len_utf8();
        if c == '=' {
            len += rest[1..]
                .bytes()
                .take(2)
                .take_while(u8::is_ascii_hexdigit)
                .count();
        }
        let (token, tail) = rest.split_at(len);
        tokens.push(token);
        rest = tail;
    }

    tokens
}
