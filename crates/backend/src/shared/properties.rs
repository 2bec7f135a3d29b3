//! `server.properties` reader/writer
//!
//! Untouched lines are written back verbatim, so editing one setting from the
//! dashboard leaves the rest of the file as the game wrote it. Keys and values
//! use Java properties escapes (`\\:`, `\\=`, `\\uXXXX`).

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    /// Comment or blank line, kept verbatim
    Raw(String),
    /// `key`/`value` are unescaped; `raw` is the source line until the entry is changed
    Entry {
        key: String,
        value: String,
        raw: Option<String>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    lines: Vec<Line>,
}

const BLANK: [char; 3] = [' ', '\t', '\x0c'];

/// Key and value part of an entry line, separated by the first unescaped
/// `=`, `:` or whitespace
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    for (idx, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' | '\x0c' => {
                let rest = line[idx..].trim_start_matches(BLANK);
                let rest = rest.strip_prefix(['=', ':']).unwrap_or(rest);
                return (&line[..idx], rest.trim_start_matches(BLANK));
            }
            _ => {}
        }
    }
    (line, "")
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // \uXXXX приходят UTF-16 единицами, суррогатные пары склеиваются здесь
    let mut units: Vec<u16> = Vec::new();
    let flush = |units: &mut Vec<u16>, out: &mut String| {
        out.extend(
            char::decode_utf16(units.drain(..)).map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER)),
        );
    };

    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            flush(&mut units, &mut out);
            out.push(c);
            continue;
        }
        let Some(next) = chars.next() else {
            break;
        };
        if next == 'u' {
            let hex: String = chars.clone().take(4).collect();
            if let Some(unit) = (hex.len() == 4)
                .then(|| u16::from_str_radix(&hex, 16).ok())
                .flatten()
            {
                units.push(unit);
                for _ in 0..4 {
                    chars.next();
                }
                continue;
            }
        }
        flush(&mut units, &mut out);
        out.push(match next {
            't' => '\t',
            'n' => '\n',
            'r' => '\r',
            'f' => '\x0c',
            other => other,
        });
    }
    flush(&mut units, &mut out);
    out
}

fn escape(text: &str, is_key: bool, out: &mut String) {
    for (idx, c) in text.chars().enumerate() {
        match c {
            '\\' | '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            ' ' if is_key || idx == 0 => out.push_str("\\ "),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            c if c < ' ' || c > '~' => {
                let mut buf = [0u16; 2];
                for unit in c.encode_utf16(&mut buf) {
                    out.push_str(&format!("\\u{:04X}", unit));
                }
            }
            c => out.push(c),
        }
    }
}

impl Properties {
    pub fn parse(text: &str) -> Self {
        let lines = text
            .lines()
            .map(|raw| {
                let trimmed = raw.trim_start();
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                    return Line::Raw(raw.to_string());
                }
                let (key, value) = split_entry(trimmed);
                Line::Entry {
                    key: unescape(key),
                    value: unescape(value),
                    raw: Some(raw.to_string()),
                }
            })
            .collect();
        Self { lines }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.lines.iter().find_map(|line| match line {
            Line::Entry { key: k, value, .. } if k == key => Some(value.as_str()),
            _ => None,
        })
    }

    /// Replace the value of `key`, appending a new entry when it is absent
    pub fn set(&mut self, key: &str, value: &str) {
        for line in self.lines.iter_mut() {
            if let Line::Entry { key: k, value: v, raw } = line {
                if k == key {
                    *v = value.to_string();
                    *raw = None;
                    return;
                }
            }
        }
        self.lines.push(Line::Entry {
            key: key.to_string(),
            value: value.to_string(),
            raw: None,
        });
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.lines.iter().filter_map(|line| match line {
            Line::Entry { key, value, .. } => Some((key.as_str(), value.as_str())),
            Line::Raw(_) => None,
        })
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            match line {
                Line::Raw(raw)
                | Line::Entry {
                    raw: Some(raw), ..
                } => out.push_str(raw),
                Line::Entry {
                    key,
                    value,
                    raw: None,
                } => {
                    escape(key, true, &mut out);
                    out.push('=');
                    escape(value, false, &mut out);
                }
            }
            out.push('\n');
        }
        out
    }
}
