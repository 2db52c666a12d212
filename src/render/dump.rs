//! Plain-text model digest behind `-d/--dump`.
//!
//! Debugging aid: shows what the parse actually collected, without any
//! troff noise.

use crate::model::Header;

pub fn render(h: &Header) -> String {
    let mut o = String::new();

    o.push_str(&format!("File: {}\n", h.name));
    o.push_str(&format!("{}\n", h.brief_desc));
    o.push_str(&format!("Detailed: {}\n", h.desc));

    for f in &h.functions {
        o.push_str(&format!("{} {}\n    (\n", f.type_, f.name));
        let mut it = f.parameters.iter();
        if let Some(first) = it.next() {
            let mut prev = first;
            o.push_str(&format!("        {} {}", prev.type_, prev.name));
            for p in it {
                o.push(',');
                if !prev.brief_desc.is_empty() {
                    o.push_str(&format!(" // {}", prev.brief_desc));
                }
                o.push('\n');
                o.push_str(&format!("        {} {}", p.type_, p.name));
                prev = p;
            }
            if f.parameters.len() == 1 && !prev.brief_desc.is_empty() {
                o.push_str(&format!(" // {}", prev.brief_desc));
            }
        }
        o.push_str("\n    )\n");
        o.push_str(&format!("    {}\n\n", f.brief_desc));
        o.push_str(&format!("    {}\n", f.desc));
        o.push_str(&format!(
            "    Author: {}\n",
            f.authors.first().map(String::as_str).unwrap_or("")
        ));
        o.push_str("    Parameters:\n");
        for p in &f.parameters {
            o.push_str(&format!("      {} {} || {}\n", p.name, p.brief_desc, p.desc));
        }
        o.push_str("    Ret Values:\n");
        for rv in &f.ret_values {
            o.push_str(&format!("      {}  || {}\n", rv.name, rv.desc));
        }
        o.push('\n');
    }

    for st in &h.structs {
        o.push_str(&format!("struct {}\n", st.name));
    }

    o
}
