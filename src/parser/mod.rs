//! Doxygen XML parsing — a single forward pass, no document tree.
//!
//! The tokenizer (quick-xml) delivers open/text/close events in document
//! order; the handler classifies each element and routes text by ancestry.
//! Referenced struct files go through the same pass into the same model.

pub mod context;
pub mod handler;
pub mod refs;
pub mod tag;
pub mod validate;

use crate::model::Header;
use anyhow::{bail, Context, Result};
use handler::Handler;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs;
use std::path::Path;
use tag::Attrs;

/// Parse one documentation XML file into the shared header model.
pub fn parse_file(path: &Path, header: &mut Header) -> Result<()> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_str(&content, header)
        .with_context(|| format!("XML parse error ({})", path.display()))
}

/// Run the event loop over one document.
pub fn parse_str(xml: &str, header: &mut Header) -> Result<()> {
    let mut reader = Reader::from_str(xml);
    let mut handler = Handler::new(header);

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let attrs = collect_attrs(&e)?;
                handler.open(&local_name(&e), &attrs);
            }
            Ok(Event::Empty(e)) => {
                // an empty element is an open immediately followed by a close
                let attrs = collect_attrs(&e)?;
                handler.open(&local_name(&e), &attrs);
                handler.close();
            }
            Ok(Event::End(_)) => handler.close(),
            Ok(Event::Text(e)) => handler.text(&e.unescape()?),
            Ok(Event::CData(e)) => handler.text(&String::from_utf8_lossy(e.as_ref())),
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => bail!("{}", e),
        }
    }

    // the tokenizer reports mismatched closes itself, but a truncated
    // document just runs out of events
    if handler.depth() != 0 {
        bail!("unexpected end of file inside an open element");
    }
    Ok(())
}

fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn collect_attrs(e: &BytesStart<'_>) -> Result<Attrs> {
    let mut attrs = Attrs::default();
    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        attrs.push(key, value);
    }
    Ok(attrs)
}
