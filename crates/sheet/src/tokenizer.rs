//! Single-line CSV tokenizer.

/// Fields of one line plus whether the scan ended inside quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTokens {
    pub fields: Vec<String>,
    pub unterminated: bool,
}

/// Split one line into fields.
///
/// `"` toggles quote mode; `""` inside quotes is a literal quote; `,` outside
/// quotes ends a field. The last field is always pushed, even when empty.
/// An unterminated quote is tolerated and fields are not trimmed.
pub fn parse_line(line: &str) -> Vec<String> {
    tokenize(line).fields
}

/// Like [`parse_line`], also reporting an unterminated quote.
pub fn tokenize(line: &str) -> LineTokens {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);

    LineTokens {
        fields,
        unterminated: in_quotes,
    }
}
