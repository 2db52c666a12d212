//! Event handler — routes classified events into the document model.
//!
//! The meaning of an element depends on the stack of enclosing elements: a
//! `para` under a brief description is a different thing from a `para`
//! under a parameter description. Every routing rule therefore pairs the
//! tag being closed with one or more ancestor-depth checks. Rules form an
//! ordered if/else chain; first match wins, and the order (function before
//! parameter before header before member before struct) is part of the
//! contract.
//!
//! There is exactly one entity under construction per kind at any time —
//! the input format closes one `memberdef`/`param`/`compounddef` fully
//! before the next of the same kind opens — so the in-progress entities
//! are plain fields, committed with `std::mem::take` on their own close.

use crate::model::{Direction, Function, Header, Member, ParamItem, Parameter, SeeAlso, Struct};
use crate::parser::context::TagStack;
use crate::parser::tag::{classify, Attrs, Tag};

pub struct Handler<'a> {
    h: &'a mut Header,
    stack: TagStack,
    buffer: String,

    func: Function,
    param: Parameter,
    item: ParamItem,
    st: Struct,
    member: Member,

    /// Link target captured at `ulink` open, consumed at its close.
    url: String,
    /// Link label; character events inside a `ulink` land here.
    url_text: String,
}

impl<'a> Handler<'a> {
    pub fn new(header: &'a mut Header) -> Self {
        Handler {
            h: header,
            stack: TagStack::default(),
            buffer: String::new(),
            func: Function::default(),
            param: Parameter::default(),
            item: ParamItem::default(),
            st: Struct::default(),
            member: Member::default(),
            url: String::new(),
            url_text: String::new(),
        }
    }

    pub fn open(&mut self, name: &str, attrs: &Attrs) {
        let tag = classify(name, attrs);

        // a classified block element starts a fresh character buffer;
        // inline markup keeps appending into the enclosing block's buffer
        if tag != Tag::Ignore && !tag.is_inline() {
            self.buffer.clear();
        }
        self.stack.push(tag);

        match tag {
            Tag::MemberdefFunc => self.func = Function::default(),
            Tag::Param => self.param = Parameter::default(),
            Tag::MemberdefVar => self.member = Member::default(),
            Tag::CompounddefStruct => {
                self.st = Struct::default();
                self.st.id = attrs.get("id").to_string();
            }
            Tag::ParameterName => {
                self.item = ParamItem::default();
                self.item.dir = match attrs.get("direction") {
                    "in" => Direction::In,
                    "out" => Direction::Out,
                    _ => Direction::None,
                };
            }
            Tag::Ref => {
                // a compound reference inside a parameter type points at a
                // struct defined in a sibling file
                if self.stack.from_top(1, Tag::Type)
                    && self.stack.from_top(2, Tag::Param)
                    && attrs.get("kindref") == "compound"
                {
                    let id = attrs.get("refid");
                    self.param.compound_ref = Some(id.to_string());
                    self.func.ref_ids.push(id.to_string());
                    self.h.add_ref_id(id);
                }
            }
            Tag::RefMember => {
                if self.stack.from_top(1, Tag::Para)
                    && self.stack.from_top(2, Tag::DetailDesc)
                    && self.stack.from_top(3, Tag::MemberdefFunc)
                {
                    self.func.see_also.push(SeeAlso::from_ref(attrs.get("refid")));
                }
            }
            Tag::Ulink => self.url = attrs.get("url").to_string(),
            _ => {}
        }
    }

    pub fn text(&mut self, chars: &str) {
        if self.stack.top() == Tag::Ulink {
            self.url_text.push_str(chars);
            return;
        }
        self.buffer.push_str(chars);
    }

    /// Number of still-open elements; non-zero after the last event means
    /// the document was truncated.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn close(&mut self) {
        let tag = self.stack.top();

        match tag {
            Tag::Type => {
                if self.stack.from_top(1, Tag::MemberdefFunc) {
                    self.func.type_ = self.buffer.clone();
                } else if self.stack.from_top(1, Tag::Param) {
                    self.param.type_ = self.buffer.clone();
                } else if self.stack.from_top(1, Tag::MemberdefVar) {
                    self.member.type_ = self.buffer.clone();
                }
            }
            Tag::Name => {
                if self.stack.from_top(1, Tag::MemberdefFunc) {
                    self.func.name = self.buffer.clone();
                } else if self.stack.from_top(1, Tag::MemberdefVar) {
                    self.member.name = self.buffer.clone();
                }
            }
            Tag::MemberdefFunc => {
                self.h.functions.push(std::mem::take(&mut self.func));
            }
            Tag::Para => self.close_para(),
            Tag::DeclName => self.param.name = self.buffer.clone(),
            Tag::Param => {
                self.func.parameters.push(std::mem::take(&mut self.param));
            }
            Tag::ParameterName => self.item.name = self.buffer.clone(),
            Tag::ParameterItem => self.close_parameter_item(),
            Tag::CompoundName => {
                if self.stack.from_top(1, Tag::CompounddefStruct) {
                    self.st.name = self.buffer.clone();
                } else if self.stack.from_top(1, Tag::CompounddefFile) {
                    self.h.name = self.buffer.clone();
                    self.h.module_name = self.h.name.clone();
                }
            }
            Tag::Ulink => {
                if !self.url.is_empty() {
                    if let Some(addr) = self.url.strip_prefix("mailto:") {
                        self.buffer.push('<');
                        self.buffer.push_str(addr);
                        self.buffer.push('>');
                    } else {
                        self.buffer.push_str(&self.url_text);
                        self.buffer.push_str(&self.url);
                    }
                }
                self.url.clear();
                self.url_text.clear();
            }
            Tag::CompounddefStruct => {
                let st = std::mem::take(&mut self.st);
                self.h.ref_id_struct_map.insert(st.id.clone(), self.h.structs.len());
                self.h.structs.push(st);
            }
            Tag::MemberdefVar => {
                if self.stack.from_top(2, Tag::CompounddefStruct) {
                    self.st.members.push(std::mem::take(&mut self.member));
                }
            }
            Tag::RefMember => {
                if self.stack.from_top(1, Tag::Para)
                    && self.stack.from_top(2, Tag::DetailDesc)
                    && self.stack.from_top(3, Tag::MemberdefFunc)
                {
                    if let Some(last) = self.func.see_also.last_mut() {
                        last.set_name_last(&self.buffer);
                    }
                }
            }
            _ => {}
        }

        self.stack.pop();
    }

    /// Paragraph routing. Which entity the accumulated text belongs to is
    /// decided entirely by ancestry; nesting depth breaks any tie.
    fn close_para(&mut self) {
        if self.stack.from_top(1, Tag::BriefDesc) {
            if self.stack.from_top(2, Tag::MemberdefFunc) {
                self.func.brief_desc = self.buffer.clone();
            } else if self.stack.from_top(2, Tag::Param) {
                self.param.brief_desc = self.buffer.clone();
            } else if self.stack.from_top(2, Tag::CompounddefFile) {
                self.h.brief_desc = self.buffer.clone();
            } else if self.stack.from_top(2, Tag::MemberdefVar) {
                self.member.brief_desc = self.buffer.clone();
            } else if self.stack.from_top(2, Tag::CompounddefStruct) {
                self.st.brief_desc = self.buffer.clone();
            }
        } else if self.stack.from_top(1, Tag::DetailDesc) {
            if self.stack.from_top(2, Tag::MemberdefFunc) {
                self.func.desc.push_str(&self.buffer);
                self.func.desc.push('\n');
            } else if self.stack.from_top(2, Tag::CompounddefFile) {
                self.h.desc.push_str(&self.buffer);
                self.h.desc.push('\n');
            } else if self.stack.from_top(2, Tag::MemberdefVar) {
                self.member.desc.push_str(&self.buffer);
                self.member.desc.push('\n');
            } else if self.stack.from_top(2, Tag::CompounddefStruct) {
                self.st.desc.push_str(&self.buffer);
                self.st.desc.push('\n');
            }
        } else if self.stack.from_top(1, Tag::SimplesectAuthor)
            && self.stack.from_top(3, Tag::DetailDesc)
            && self.stack.from_top(4, Tag::MemberdefFunc)
        {
            self.func.authors.push(self.buffer.trim().to_string());
            self.buffer.clear();
        } else if self.stack.from_top(1, Tag::ParameterDesc) {
            self.item.desc.push_str(&self.buffer);
            self.item.desc.push('\n');
            self.buffer.clear();
        } else if self.stack.from_top(1, Tag::SimplesectReturn) {
            self.func.return_desc = self.buffer.clone();
            self.buffer.clear();
        } else if self.stack.from_top(1, Tag::SimplesectCopyright) {
            if self.stack.from_top(4, Tag::CompounddefFile) {
                self.h.copyright = self.buffer.clone();
                self.buffer.clear();
            } else if self.stack.from_top(3, Tag::DetailDesc)
                && self.stack.from_top(4, Tag::MemberdefFunc)
            {
                self.func.copyright = self.buffer.clone();
                self.buffer.clear();
            }
        } else if self.stack.from_top(1, Tag::SimplesectSee)
            && self.stack.from_top(3, Tag::DetailDesc)
            && self.stack.from_top(4, Tag::MemberdefFunc)
        {
            let mut see = SeeAlso::default();
            see.set_name(&self.buffer);
            self.func.see_also.push(see);
            self.buffer.clear();
        }
    }

    /// Join a closed `parameteritem` back onto the model.
    ///
    /// Under a param list the item updates an existing parameter in place,
    /// matched by exact name; an unmatched name is a recoverable warning.
    /// Under a retval list the item becomes a synthetic return-value entry,
    /// never matched against parameters.
    fn close_parameter_item(&mut self) {
        if self.stack.from_top(1, Tag::ParameterList) {
            match self.func.index_of_parameter(&self.item.name) {
                Some(i) => self.func.parameters[i].apply_item(&self.item),
                None => eprintln!("warning: can't find parameter name: {}", self.item.name),
            }
        }
        if self.stack.from_top(1, Tag::RetvalList) {
            let item = std::mem::take(&mut self.item);
            self.func.ret_values.push(Parameter {
                name: item.name,
                dir: item.dir,
                desc: item.desc,
                ..Parameter::default()
            });
        }
    }
}
