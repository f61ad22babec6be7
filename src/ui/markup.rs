#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emphasis {
    Plain,
    Italic,
    Bold,
}

/// Split `text` into styled segments. `*x*` is bold; `_x_` is italic when
/// `allow_italic` is set. Unpaired markers are kept as literal text.
pub fn parse(text: &str, allow_italic: bool) -> Vec<(String, Emphasis)> {
    let mut segments: Vec<(String, Emphasis)> = Vec::new();
    let mut plain = String::new();
    let mut rest = text;

    while let Some(ch) = rest.chars().next() {
        let marker = match ch {
            '*' => Some(Emphasis::Bold),
            '_' if allow_italic => Some(Emphasis::Italic),
            _ => None,
        };

        if let Some(style) = marker {
            let after = &rest[1..];
            if let Some(end) = after.find(ch) {
                let inner = &after[..end];
                // italics need content; bold matches even when empty
                if style == Emphasis::Bold || !inner.is_empty() {
                    if !plain.is_empty() {
                        segments.push((std::mem::take(&mut plain), Emphasis::Plain));
                    }
                    if !inner.is_empty() {
                        segments.push((inner.to_string(), style));
                    }
                    rest = &after[end + 1..];
                    continue;
                }
            }
        }

        plain.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    if !plain.is_empty() {
        segments.push((plain, Emphasis::Plain));
    }
    segments
}
