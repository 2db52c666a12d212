//! Document model for parsed doxygen XML — format-agnostic.

use std::collections::HashMap;

/// Parameter passing direction, taken from the `direction` attribute of a
/// detailed parameter description.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    None,
    In,
    Out,
}

/// Transient carrier for one `parameteritem` block.
///
/// Direction and long description live in a different part of the document
/// than the parameter's type and brief; they are joined onto an existing
/// Parameter by exact name match after the block closes.
#[derive(Debug, Default)]
pub struct ParamItem {
    pub name: String,
    pub dir: Direction,
    pub desc: String,
}

/// A single function parameter.
#[derive(Debug, Default, Clone)]
pub struct Parameter {
    /// Type text, e.g. `struct widget_opts *`.
    pub type_: String,
    pub name: String,
    /// Reference id of the struct behind the type, when the type carries a
    /// compound-kind cross reference. Struct printing runs off the owning
    /// function's ref_ids; this stays with the parameter that caused it.
    #[allow(dead_code)]
    pub compound_ref: Option<String>,
    /// From the inline signature block.
    pub brief_desc: String,
    /// From the detailed parameter description block, matched by name.
    pub desc: String,
    pub dir: Direction,
}

impl Parameter {
    /// Take direction and long description from a matched description item.
    /// Type, name and brief come from the signature block and stay.
    pub fn apply_item(&mut self, item: &ParamItem) {
        self.dir = item.dir;
        self.desc = item.desc.clone();
    }
}

/// One SEE ALSO entry: either a pending cross reference (`ref_id` set) or a
/// free-text name from an external link. The provisional display name is
/// what gets rendered; there is no later resolution step.
#[derive(Debug, Default, Clone)]
pub struct SeeAlso {
    pub ref_id: String,
    pub name: String,
}

impl SeeAlso {
    pub fn from_ref(ref_id: &str) -> Self {
        SeeAlso {
            ref_id: ref_id.to_string(),
            name: String::new(),
        }
    }

    pub fn set_name(&mut self, s: &str) {
        self.name = s.trim().to_string();
    }

    /// Keep only the substring after the last space. The accumulated buffer
    /// contains the surrounding prose as well, so this approximates the
    /// last identifier token of an inline member reference.
    pub fn set_name_last(&mut self, s: &str) {
        if let Some(i) = s.rfind(' ') {
            self.name = s[i + 1..].to_string();
        }
    }
}

/// A documented function.
#[derive(Debug, Default, Clone)]
pub struct Function {
    pub name: String,
    /// Return type text.
    pub type_: String,
    pub parameters: Vec<Parameter>,
    /// Synthetic entries from a retval list; never matched against
    /// parameters.
    pub ret_values: Vec<Parameter>,
    /// Source order, duplicates preserved. The summary page deduplicates
    /// across functions; a function's own page prints the list as-is.
    pub authors: Vec<String>,
    pub brief_desc: String,
    pub desc: String,
    pub return_desc: String,
    /// Overrides the header's copyright when non-empty.
    pub copyright: String,
    /// Struct reference ids in first-seen order, duplicates preserved.
    pub ref_ids: Vec<String>,
    pub see_also: Vec<SeeAlso>,
}

impl Function {
    pub fn index_of_parameter(&self, name: &str) -> Option<usize> {
        self.parameters.iter().position(|p| p.name == name)
    }

    /// The PARAMETERS section only appears when at least one parameter has
    /// a detailed description.
    pub fn has_detailed_param_desc(&self) -> bool {
        self.parameters.iter().any(|p| !p.desc.is_empty())
    }
}

/// A member of a documented struct.
#[derive(Debug, Default, Clone)]
pub struct Member {
    pub name: String,
    pub type_: String,
    pub brief_desc: String,
    pub desc: String,
}

/// A struct referenced from function parameter types.
///
/// Identity for lookup purposes is the id string from the source schema,
/// preserved verbatim; two structs may share a name if their ids differ.
#[derive(Debug, Default, Clone)]
pub struct Struct {
    pub id: String,
    pub name: String,
    pub brief_desc: String,
    pub desc: String,
    pub members: Vec<Member>,
}

/// One parsed header file plus everything accumulated from its referenced
/// struct files.
#[derive(Debug, Default)]
pub struct Header {
    pub name: String,
    pub module_name: String,
    pub brief_desc: String,
    pub desc: String,
    pub copyright: String,

    pub functions: Vec<Function>,
    /// Filled by `sort`; alphabetical when sorting is enabled.
    pub functions_sorted: Vec<Function>,
    pub structs: Vec<Struct>,

    /// Unresolved cross-file reference ids, insertion order, no duplicates.
    pub ref_ids: Vec<String>,
    /// Resolved reference id → index into `structs`. Only contains ids that
    /// actually resolved.
    pub ref_id_struct_map: HashMap<String, usize>,
}

impl Header {
    /// Record a cross-file reference id, keeping insertion order.
    pub fn add_ref_id(&mut self, id: &str) {
        if !self.ref_ids.iter().any(|r| r == id) {
            self.ref_ids.push(id.to_string());
        }
    }

    pub fn struct_by_id(&self, id: &str) -> Option<&Struct> {
        self.ref_id_struct_map.get(id).map(|&i| &self.structs[i])
    }

    pub fn sort(&mut self, enable: bool) {
        self.functions_sorted = self.functions.clone();
        if enable {
            self.functions_sorted.sort_by(|a, b| a.name.cmp(&b.name));
        }
    }

    /// Advisory brief-description heuristics. Returns messages instead of
    /// printing so the caller decides whether warnings are enabled.
    pub fn check(&self) -> Vec<String> {
        let mut msgs = Vec::new();
        if self.brief_desc.is_empty() {
            msgs.push(format!("header file {} has no brief description", self.name));
        }
        if self.brief_desc.chars().count() > 70 {
            msgs.push(format!("brief description of {} is not very brief", self.name));
        }
        for f in &self.functions {
            if f.brief_desc.is_empty() {
                msgs.push(format!("function {} has no brief description", f.name));
            }
            if f.brief_desc.chars().count() > 70 {
                msgs.push(format!(
                    "the brief description of function {} is not very brief",
                    f.name
                ));
            }
        }
        msgs
    }
}
