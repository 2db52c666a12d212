//! Man(7) renderer — one summary page per header, one page per function.
//!
//! Pages are plain sequential text builders over the completed,
//! reference-resolved model; every conditional section is a predicate on
//! the model, decided before any text for it is emitted.

use crate::model::{Function, Header, Struct};
use crate::options::Options;
use crate::render::{
    extract_authors, fill_right, first_line, func_type_width, max_name_len, member_type_width,
    param_type_width, remove_fullstop,
};
use chrono::{Local, NaiveDate};

const GENERATOR: &str = concat!("doxyman ", env!("CARGO_PKG_VERSION"));

pub struct ManRenderer<'a> {
    opts: &'a Options,
    date: NaiveDate,
}

impl<'a> ManRenderer<'a> {
    /// Samples the generation date once, so every page of a run carries the
    /// same date and rendering a model twice is byte-identical.
    pub fn new(opts: &'a Options) -> Self {
        Self::with_date(opts, Local::now().date_naive())
    }

    pub fn with_date(opts: &'a Options, date: NaiveDate) -> Self {
        ManRenderer { opts, date }
    }

    fn preamble(&self, o: &mut String, title: &str) {
        o.push_str(&format!(
            ".\\\" File automatically generated by {}\n",
            GENERATOR
        ));
        o.push_str(&format!(
            ".\\\" Generation date: {}\n",
            self.date.format("%a %b %-d %Y")
        ));
        o.push_str(&format!(
            ".TH {} {} {} \"{}\" \"{}\"\n",
            title,
            self.opts.man_section,
            self.date.format("%Y-%m-%d"),
            self.opts.short_pkg,
            self.opts.pkg
        ));
    }

    /// The per-header summary page: include line, signature list, embedded
    /// structs, cross links to every function page.
    pub fn summary_page(&self, h: &Header) -> String {
        let mut o = String::new();
        self.preamble(&mut o, &h.module_name);

        o.push_str(".SH \"NAME\"\n");
        o.push_str(&format!("{} \\- {}\n", h.name, first_line(&h.brief_desc)));

        o.push_str(".SH SYNOPSIS\n.nf\n");
        o.push_str(&format!(
            ".B #include <{}{}>\n",
            self.opts.include_prefix, h.name
        ));
        o.push_str(".fi\n");

        o.push_str(".SH DESCRIPTION\n");
        paragraphs(&mut o, &h.desc);

        o.push_str(".PP\n.sp\n.RS\n.nf\n\\fB\n");
        let w = func_type_width(&h.functions);
        for f in &h.functions {
            o.push_str(&fill_right(&f.type_, w));
            o.push_str(&f.name);
            o.push('(');
            let types: Vec<&str> = f.parameters.iter().map(|p| p.type_.as_str()).collect();
            o.push_str(&types.join(", "));
            o.push_str(");\n");
        }
        o.push_str("\\fP\n.fi\n.RE\n");

        for s in &h.structs {
            struct_block(&mut o, s);
        }

        o.push_str(".SH SEE ALSO\n.PP\n.nh\n.ad l\n");
        let mut it = h.functions_sorted.iter();
        if let Some(f) = it.next() {
            o.push_str(&format!("\\fI{}\\fP({})", f.name, self.opts.man_section));
        }
        for f in it {
            o.push_str(&format!(", \\fI{}\\fP({})", f.name, self.opts.man_section));
        }
        o.push('\n');
        o.push_str(".ad\n.hy\n");

        let authors = extract_authors(&h.functions);
        if !authors.is_empty() {
            o.push_str(".SH AUTHORS\n.nf\n");
            for a in &authors {
                o.push_str(a);
                o.push('\n');
            }
            o.push_str(".fi\n");
        }

        if self.opts.enable_copyright && !h.copyright.is_empty() {
            o.push_str(".SH COPYRIGHT\n.PP\n");
            o.push_str(&h.copyright);
            o.push('\n');
        }

        o
    }

    /// One man page for one function.
    pub fn function_page(&self, f: &Function, h: &Header) -> String {
        let mut o = String::new();
        self.preamble(&mut o, &f.name);

        o.push_str(".SH \"NAME\"\n");
        o.push_str(&format!("{} \\- {}\n", f.name, first_line(&f.brief_desc)));

        o.push_str(".SH SYNOPSIS\n.nf\n");
        o.push_str(&format!(
            ".B #include <{}{}>\n",
            self.opts.include_prefix, h.name
        ));
        o.push_str(".sp\n");

        o.push_str(&format!("\\fB{} {}\\fP(\n", f.type_, f.name));
        let w = param_type_width(&f.parameters);
        let name_w = max_name_len(f.parameters.iter().map(|p| p.name.as_str()));
        let mut it = f.parameters.iter();
        if let Some(first) = it.next() {
            let mut prev = first;
            o.push_str(&format!(
                "    \\fB{}\\fP\\fI{}\\fP",
                fill_right(&prev.type_, w),
                prev.name
            ));
            for p in it {
                o.push(',');
                push_brief(&mut o, name_w, &prev.name, &prev.brief_desc);
                o.push('\n');
                o.push_str(&format!(
                    "    \\fB{}\\fP\\fI{}\\fP",
                    fill_right(&p.type_, w),
                    p.name
                ));
                prev = p;
            }
            if f.parameters.len() == 1 {
                push_brief(&mut o, name_w, &prev.name, &prev.brief_desc);
            }
        }
        o.push_str("\n);\n");
        o.push_str(".fi\n");

        o.push_str(".SH DESCRIPTION\n");
        paragraphs(&mut o, &f.desc);

        if f.has_detailed_param_desc() {
            o.push_str(".SH PARAMETERS\n");
            for p in &f.parameters {
                o.push_str(".TP\n.B ");
                o.push_str(&p.name);
                o.push('\n');
                if p.desc.is_empty() {
                    o.push_str(&p.brief_desc);
                } else {
                    o.push_str(&p.desc);
                }
                o.push('\n');
            }
        }

        if self.opts.enable_structs && !f.ref_ids.is_empty() {
            o.push_str(".SH STRUCTURES\n");
            let mut printed: Vec<&str> = Vec::new();
            for ref_id in &f.ref_ids {
                if printed.contains(&ref_id.as_str()) {
                    continue;
                }
                printed.push(ref_id);
                match h.struct_by_id(ref_id) {
                    Some(s) => struct_block(&mut o, s),
                    None => eprintln!(
                        "warning: could not find referenced structure: {} (in {})",
                        ref_id, f.name
                    ),
                }
            }
        }

        if !f.return_desc.is_empty() || !f.ret_values.is_empty() {
            o.push_str(".SH RETURN VALUE\n");
            if !f.return_desc.is_empty() {
                o.push_str(".PP\n");
                o.push_str(&f.return_desc);
                o.push('\n');
            }
            for rv in &f.ret_values {
                o.push_str(".TP\n.B ");
                o.push_str(&rv.name);
                o.push('\n');
                o.push_str(&rv.desc);
                o.push('\n');
            }
        }

        o.push_str(".SH SEE ALSO\n.PP\n.nh\n.ad l\n");
        o.push_str(&format!("\\fI{}\\fP({})", h.name, self.opts.man_section));
        if self.opts.enable_seealso_all {
            for g in &h.functions_sorted {
                o.push_str(&format!(", \\fI{}\\fP({})", g.name, self.opts.man_section));
            }
        }
        for see in &f.see_also {
            o.push_str(&format!(", \\fI{}\\fP", see.name));
        }
        o.push('\n');
        o.push_str(".ad\n.hy\n");

        if !f.authors.is_empty() {
            o.push_str(".SH AUTHORS\n.nf\n");
            for a in &f.authors {
                o.push_str(a);
                o.push('\n');
            }
            o.push_str(".fi\n");
        }

        if self.opts.enable_copyright && (!f.copyright.is_empty() || !h.copyright.is_empty()) {
            o.push_str(".SH COPYRIGHT\n.PP\n");
            if f.copyright.is_empty() {
                o.push_str(&h.copyright);
            } else {
                o.push_str(&f.copyright);
            }
            o.push('\n');
        }

        o
    }
}

/// Paragraph split: blank-separated chunks arrive newline-delimited from
/// the parse; empty chunks are dropped.
fn paragraphs(o: &mut String, text: &str) {
    for p in text.split('\n').filter(|p| !p.is_empty()) {
        o.push_str(".PP \n");
        o.push_str(p);
        o.push('\n');
    }
}

/// Trailing brief comment, right-aligned to the widest sibling name.
fn push_brief(o: &mut String, name_w: usize, name: &str, brief: &str) {
    if brief.is_empty() {
        return;
    }
    let used = name.chars().count();
    if name_w > used {
        o.push_str(&" ".repeat(name_w - used));
    }
    o.push_str(" // ");
    o.push_str(brief);
}

/// Struct subsection: title from the brief (period stripped), paragraph
/// body, then the declaration as a literal block with aligned members.
fn struct_block(o: &mut String, s: &Struct) {
    o.push_str(".SS \"");
    o.push_str(remove_fullstop(&s.brief_desc));
    o.push_str("\"\n");
    o.push_str(".PP\n.sp\n");
    paragraphs(o, &s.desc);
    o.push_str(".sp\n.RS\n.nf\n\\fB\n");
    o.push_str(&format!("struct {} {{\n", s.name));
    let w = member_type_width(&s.members);
    let name_w = max_name_len(s.members.iter().map(|m| m.name.as_str()));
    for m in &s.members {
        o.push_str("  ");
        o.push_str(&fill_right(&m.type_, w));
        o.push_str(&format!("\\fI{}\\fP;", m.name));
        push_brief(o, name_w, &m.name, &m.brief_desc);
        o.push('\n');
    }
    o.push_str("};\n");
    o.push_str("\\fP\n.fi\n.RE\n");
}
