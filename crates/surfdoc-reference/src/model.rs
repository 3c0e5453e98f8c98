//! Reference class registry.

use std::collections::BTreeMap;

use crate::doc::DocBlock;

/// Parameter passing modifier as written in the declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamModifier {
    #[default]
    None,
    Out,
    Ref,
    In,
    Params,
    This,
}

impl ParamModifier {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "out" => Some(Self::Out),
            "ref" => Some(Self::Ref),
            "in" => Some(Self::In),
            "params" => Some(Self::Params),
            "this" => Some(Self::This),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub ty: String,
    pub modifier: ParamModifier,
}

impl Parameter {
    pub fn is_out(&self) -> bool {
        self.modifier == ParamModifier::Out
    }
}

#[derive(Debug, Clone, Default)]
pub struct Constructor {
    pub params: Vec<Parameter>,
    pub doc: Option<DocBlock>,
}

#[derive(Debug, Clone)]
pub struct Method {
    pub name: String,
    pub return_type: String,
    pub params: Vec<Parameter>,
    pub is_static: bool,
    pub doc: Option<DocBlock>,
}

impl Method {
    /// Parameters the caller supplies, i.e. everything but `out` parameters.
    pub fn inputs(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter().filter(|p| !p.is_out())
    }

    pub fn outputs(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter().filter(|p| p.is_out())
    }

    pub fn input_count(&self) -> usize {
        self.inputs().count()
    }

    pub fn has_out(&self) -> bool {
        self.params.iter().any(Parameter::is_out)
    }
}

#[derive(Debug, Clone)]
pub struct Property {
    pub name: String,
    pub ty: String,
    pub is_static: bool,
    pub doc: Option<DocBlock>,
}

/// A class or struct of the reference corpus with its public surface.
#[derive(Debug, Clone)]
pub struct ReferenceClass {
    pub qualified_name: String,
    pub doc: Option<DocBlock>,
    pub constructors: Vec<Constructor>,
    pub methods: Vec<Method>,
    pub properties: Vec<Property>,
}

impl ReferenceClass {
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            doc: None,
            constructors: Vec::new(),
            methods: Vec::new(),
            properties: Vec::new(),
        }
    }

    pub fn short_name(&self) -> &str {
        short_name(&self.qualified_name)
    }

    pub fn summary(&self) -> Option<&str> {
        self.doc.as_ref().and_then(DocBlock::summary)
    }

    pub fn methods_named<'a, 'n>(&'a self, name: &'n str) -> impl Iterator<Item = &'a Method> + use<'a, 'n> {
        self.methods
            .iter()
            .filter(move |m| m.name.eq_ignore_ascii_case(name))
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Keep the first documentation block seen for this class.
    pub(crate) fn set_doc_if_empty(&mut self, doc: Option<DocBlock>) {
        if self.doc.is_none() {
            self.doc = doc;
        }
    }
}

/// Substring after the last `.` of a qualified name.
pub fn short_name(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}

fn key(name: &str) -> String {
    short_name(name).to_lowercase()
}

/// Case-insensitive registry of reference classes keyed by short name.
#[derive(Debug, Clone, Default)]
pub struct ReferenceModel {
    classes: BTreeMap<String, ReferenceClass>,
}

impl ReferenceModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a class by short or qualified name, ignoring case.
    pub fn class(&self, name: &str) -> Option<&ReferenceClass> {
        self.classes.get(&key(name))
    }

    /// Entry for a class scope, created on first use.
    ///
    /// The qualified name of the first writer is kept; later scopes with the
    /// same short name (partial classes, or a homonym in another namespace)
    /// add members to the same entry.
    pub fn entry(&mut self, qualified_name: &str) -> &mut ReferenceClass {
        self.classes
            .entry(key(qualified_name))
            .or_insert_with(|| ReferenceClass::new(qualified_name))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReferenceClass> {
        self.classes.values()
    }
}
