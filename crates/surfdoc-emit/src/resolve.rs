//! Pairing binding members with their documented reference declarations.

use surfdoc_bindings::{BindingSet, BoundMethod, ClassEntity, Dialect};
use surfdoc_reference::{Constructor, Method, Property, ReferenceClass, ReferenceModel};

/// Looks up the reference declaration behind a binding member.
///
/// Resolution is a pure function of the two registries, so every emitter
/// asking about the same member gets the same answer.
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    reference: &'a ReferenceModel,
    bindings: &'a BindingSet,
}

impl<'a> Resolver<'a> {
    pub fn new(reference: &'a ReferenceModel, bindings: &'a BindingSet) -> Self {
        Self {
            reference,
            bindings,
        }
    }

    pub fn class(&self, name: &str) -> Option<&'a ReferenceClass> {
        self.reference.class(name)
    }

    /// Constructor whose parameter types equal `types` position by position.
    pub fn constructor(&self, class: &str, types: &[String]) -> Option<&'a Constructor> {
        self.class(class)?.constructors.iter().find(|c| {
            c.params.len() == types.len() && c.params.iter().zip(types).all(|(p, t)| p.ty == *t)
        })
    }

    /// First constructor registration of `entity` that resolves.
    pub fn first_constructor(&self, entity: &ClassEntity) -> Option<&'a Constructor> {
        entity
            .constructors
            .iter()
            .find_map(|types| self.constructor(&entity.name, types))
    }

    /// Every constructor registration of `entity` with its resolution.
    pub fn constructors<'e>(
        &self,
        entity: &'e ClassEntity,
    ) -> impl Iterator<Item = (&'e [String], Option<&'a Constructor>)> + use<'a, 'e> {
        let resolver = *self;
        entity
            .constructors
            .iter()
            .map(move |types| (types.as_slice(), resolver.constructor(&entity.name, types)))
    }

    /// Argument names known for a binding method.
    ///
    /// Python registrations carry their own. A JavaScript registration
    /// borrows them from the Python method of the same class bound to the
    /// same native symbol; `None` when there is no such method.
    pub fn arguments<'b>(
        &self,
        dialect: Dialect,
        class: &str,
        method: &'b BoundMethod,
    ) -> Option<&'b [String]>
    where
        'a: 'b,
    {
        match dialect {
            Dialect::Python => Some(method.args.as_slice()),
            Dialect::JavaScript => self
                .bindings
                .python_class(class)?
                .method_by_symbol(&method.native_symbol)
                .map(|sibling| sibling.args.as_slice()),
        }
    }

    /// Reference method for a binding method.
    ///
    /// Among same-named overloads the first whose non-`out` parameter count
    /// equals the known argument count wins, otherwise the first overload.
    pub fn method(&self, dialect: Dialect, class: &str, method: &BoundMethod) -> Option<&'a Method> {
        let reference = self.class(class)?;
        let first = reference.methods_named(&method.name).next()?;
        let Some(args) = self.arguments(dialect, class, method) else {
            return Some(first);
        };
        let by_arity = reference
            .methods_named(&method.name)
            .find(|m| m.input_count() == args.len());
        Some(by_arity.unwrap_or(first))
    }

    pub fn property(&self, class: &str, name: &str) -> Option<&'a Property> {
        self.class(class)?.property(name)
    }
}
