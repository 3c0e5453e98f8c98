//! Binding entities and their registries.

use std::collections::BTreeMap;

use crate::line::Dialect;

/// A method registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundMethod {
    pub name: String,
    pub is_static: bool,
    /// Native function the method is bound to, e.g. `&BND_Curve::Trim`. May be empty.
    pub native_symbol: String,
    /// Argument names from `py::arg`. Always empty for the JavaScript dialect.
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassEntity {
    pub name: String,
    pub base: Option<String>,
    /// Normalized parameter types of each constructor registration.
    pub constructors: Vec<Vec<String>>,
    pub properties: Vec<String>,
    pub methods: Vec<BoundMethod>,
}

impl ClassEntity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// First method bound to `native_symbol`.
    pub fn method_by_symbol(&self, native_symbol: &str) -> Option<&BoundMethod> {
        if native_symbol.is_empty() {
            return None;
        }
        self.methods.iter().find(|m| m.native_symbol == native_symbol)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnumEntity {
    pub name: String,
    pub values: Vec<String>,
}

/// A declaration being scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    Class(ClassEntity),
    Enum(EnumEntity),
}

impl Entity {
    pub fn name(&self) -> &str {
        match self {
            Entity::Class(c) => &c.name,
            Entity::Enum(e) => &e.name,
        }
    }
}

fn key(name: &str) -> String {
    name.to_lowercase()
}

/// Registries produced by scanning: classes per dialect plus enumerations.
///
/// All three are keyed case-insensitively and iterate in case-insensitive
/// name order.
#[derive(Debug, Clone, Default)]
pub struct BindingSet {
    javascript: BTreeMap<String, ClassEntity>,
    python: BTreeMap<String, ClassEntity>,
    enums: BTreeMap<String, EnumEntity>,
}

impl BindingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the registry `entity` belongs to in `dialect`.
    pub fn registry_name(dialect: Dialect, entity: &Entity) -> &'static str {
        match entity {
            Entity::Class(_) => dialect.name(),
            Entity::Enum(_) => "enum",
        }
    }

    pub fn contains(&self, dialect: Dialect, entity: &Entity) -> bool {
        let key = key(entity.name());
        match entity {
            Entity::Class(_) => self.classes_map(dialect).contains_key(&key),
            Entity::Enum(_) => self.enums.contains_key(&key),
        }
    }

    /// Register an entity, replacing any entry with the same key.
    pub fn insert(&mut self, dialect: Dialect, entity: Entity) {
        let key = key(entity.name());
        match entity {
            Entity::Class(class) => {
                let map = match dialect {
                    Dialect::JavaScript => &mut self.javascript,
                    Dialect::Python => &mut self.python,
                };
                map.insert(key, class);
            }
            Entity::Enum(e) => {
                self.enums.insert(key, e);
            }
        }
    }

    fn classes_map(&self, dialect: Dialect) -> &BTreeMap<String, ClassEntity> {
        match dialect {
            Dialect::JavaScript => &self.javascript,
            Dialect::Python => &self.python,
        }
    }

    pub fn class(&self, dialect: Dialect, name: &str) -> Option<&ClassEntity> {
        self.classes_map(dialect).get(&key(name))
    }

    pub fn classes(&self, dialect: Dialect) -> impl Iterator<Item = &ClassEntity> {
        self.classes_map(dialect).values()
    }

    pub fn javascript_class(&self, name: &str) -> Option<&ClassEntity> {
        self.class(Dialect::JavaScript, name)
    }

    pub fn python_class(&self, name: &str) -> Option<&ClassEntity> {
        self.class(Dialect::Python, name)
    }

    pub fn javascript_classes(&self) -> impl Iterator<Item = &ClassEntity> {
        self.javascript.values()
    }

    pub fn python_classes(&self) -> impl Iterator<Item = &ClassEntity> {
        self.python.values()
    }

    pub fn enumeration(&self, name: &str) -> Option<&EnumEntity> {
        self.enums.get(&key(name))
    }

    pub fn enums(&self) -> impl Iterator<Item = &EnumEntity> {
        self.enums.values()
    }

    /// Registry key of a class, used to break ordering ties.
    pub fn key_of(name: &str) -> String {
        key(name)
    }
}
