//! Renderers over the finished model — man pages and the dump digest.

pub mod dump;
pub mod man;

use crate::model::{Function, Member, Parameter};

/// Right-pad `s` to width `w`, inserting the padding before any trailing
/// run of `*` so pointer markers stay adjacent to the name that follows:
/// `char *` padded to 8 becomes `char   *`, not `char *  `.
pub fn fill_right(s: &str, w: usize) -> String {
    let a = s.trim();
    let len = a.chars().count();
    if len >= w {
        return a.to_string();
    }
    let pad = " ".repeat(w - len);
    let bytes = a.as_bytes();
    if !bytes.is_empty() && bytes[bytes.len() - 1] == b'*' {
        let mut i = bytes.len() - 1;
        while i > 0 && bytes[i - 1] == b'*' {
            i -= 1;
        }
        format!("{}{}{}", &a[..i], pad, &a[i..])
    } else {
        format!("{}{}", a, pad)
    }
}

/// Widest return type among sibling functions, floor 5, plus one space.
pub fn func_type_width(list: &[Function]) -> usize {
    let mut w = 5;
    for f in list {
        w = w.max(f.type_.chars().count());
    }
    w + 1
}

/// Widest member type, floor 8, plus one space.
pub fn member_type_width(list: &[Member]) -> usize {
    let mut w = 8;
    for m in list {
        w = w.max(m.type_.chars().count());
    }
    w + 1
}

/// Widest parameter type (trimmed), floor 8, plus one space.
pub fn param_type_width(list: &[Parameter]) -> usize {
    let mut w = 8;
    for p in list {
        w = w.max(p.type_.trim().chars().count());
    }
    w + 1
}

/// Widest name in a sibling list; brief comments right-align to this.
pub fn max_name_len<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(|n| n.chars().count()).max().unwrap_or(0)
}

/// First line of a trimmed text block.
pub fn first_line(s: &str) -> &str {
    let a = s.trim();
    match a.find('\n') {
        Some(i) => &a[..i],
        None => a,
    }
}

/// Trim and strip one trailing period; subsection titles read better
/// without it.
pub fn remove_fullstop(s: &str) -> &str {
    let a = s.trim();
    a.strip_suffix('.').unwrap_or(a)
}

/// All authors across the given functions, exact-string duplicates
/// removed, first-appearance order preserved.
pub fn extract_authors(functions: &[Function]) -> Vec<String> {
    let mut list: Vec<String> = Vec::new();
    for f in functions {
        for a in &f.authors {
            if !list.contains(a) {
                list.push(a.clone());
            }
        }
    }
    list
}
