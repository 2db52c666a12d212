//! Semantic tag classification.
//!
//! A raw element name plus its attributes maps to one member of a closed
//! tag set. The same element name can classify differently depending on a
//! distinguishing attribute (`sectiondef kind="func"` vs `kind="enum"`,
//! `ref kindref="member"` vs anything else), but never on context — ancestry
//! is the context stack's job.

/// Closed set of semantic tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Ignore,
    SectiondefEnum,
    SectiondefTypedef,
    SectiondefFunc,
    SectiondefDefine,
    MemberdefEnum,
    MemberdefTypedef,
    MemberdefFunc,
    MemberdefDefine,
    MemberdefVar,
    Name,
    EnumValue,
    BriefDesc,
    DetailDesc,
    Type,
    Definition,
    ArgsString,
    Param,
    DeclName,
    CompoundName,
    Linebreak,
    SimplesectAuthor,
    SimplesectReturn,
    SimplesectCopyright,
    SimplesectSee,
    /// `parameterlist` with kind `param`.
    ParameterList,
    /// `parameterlist` with kind `retval`.
    RetvalList,
    ParameterName,
    ParameterDesc,
    ParameterItem,
    /// Cross reference to another xml file.
    Ref,
    /// Inline member reference inside descriptive prose.
    RefMember,
    CompounddefFile,
    CompounddefStruct,
    /// External link markup, e.g. mailto.
    Ulink,
    Para,
}

impl Tag {
    /// Inline markup contributes its text to the enclosing block's buffer
    /// instead of starting a fresh one.
    pub fn is_inline(self) -> bool {
        matches!(self, Tag::Ulink | Tag::Ref | Tag::RefMember | Tag::Linebreak)
    }
}

/// Flat attribute lookup captured at element open.
#[derive(Debug, Default)]
pub struct Attrs {
    pairs: Vec<(String, String)>,
}

impl Attrs {
    pub fn push(&mut self, key: String, value: String) {
        self.pairs.push((key, value));
    }

    /// Value for `key`, or the empty string when absent.
    pub fn get(&self, key: &str) -> &str {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }
}

#[cfg(test)]
impl Attrs {
    pub fn of(pairs: &[(&str, &str)]) -> Self {
        let mut a = Attrs::default();
        for (k, v) in pairs {
            a.push((*k).to_string(), (*v).to_string());
        }
        a
    }
}

/// Classify an element by local name and attribute lookup.
///
/// Total and pure: unrecognized names, and recognized names whose
/// distinguishing attribute matches no known value, go to `Ignore`.
pub fn classify(name: &str, attrs: &Attrs) -> Tag {
    match name {
        "sectiondef" => match attrs.get("kind") {
            "enum" => Tag::SectiondefEnum,
            "typedef" => Tag::SectiondefTypedef,
            "func" => Tag::SectiondefFunc,
            "define" => Tag::SectiondefDefine,
            _ => Tag::Ignore,
        },
        "memberdef" => match attrs.get("kind") {
            "enum" => Tag::MemberdefEnum,
            "typedef" => Tag::MemberdefTypedef,
            "function" => Tag::MemberdefFunc,
            "define" => Tag::MemberdefDefine,
            "variable" => Tag::MemberdefVar,
            _ => Tag::Ignore,
        },
        "name" => Tag::Name,
        "enumvalue" => Tag::EnumValue,
        "briefdescription" => Tag::BriefDesc,
        "detaileddescription" => Tag::DetailDesc,
        "type" => Tag::Type,
        "definition" => Tag::Definition,
        "argsstring" => Tag::ArgsString,
        "param" => Tag::Param,
        "declname" => Tag::DeclName,
        "compoundname" => Tag::CompoundName,
        "linebreak" => Tag::Linebreak,
        "simplesect" => match attrs.get("kind") {
            "author" => Tag::SimplesectAuthor,
            "return" => Tag::SimplesectReturn,
            "copyright" => Tag::SimplesectCopyright,
            "see" => Tag::SimplesectSee,
            _ => Tag::Ignore,
        },
        "parameterlist" => match attrs.get("kind") {
            "param" => Tag::ParameterList,
            "retval" => Tag::RetvalList,
            _ => Tag::Ignore,
        },
        "parametername" => Tag::ParameterName,
        "parameterdescription" => Tag::ParameterDesc,
        "parameteritem" => Tag::ParameterItem,
        "ref" => {
            if attrs.get("kindref") == "member" {
                Tag::RefMember
            } else {
                Tag::Ref
            }
        }
        "compounddef" => match attrs.get("kind") {
            "file" => Tag::CompounddefFile,
            "struct" => Tag::CompounddefStruct,
            _ => Tag::Ignore,
        },
        "ulink" => Tag::Ulink,
        "para" => Tag::Para,
        _ => Tag::Ignore,
    }
}
