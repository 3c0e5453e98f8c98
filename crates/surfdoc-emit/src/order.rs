//! Class ordering for emitters that list base classes first.

use surfdoc_bindings::{BindingSet, ClassEntity};

/// Rough inheritance depth of a class, judged from its base.
pub fn class_value(class: &ClassEntity) -> u8 {
    match class.base.as_deref() {
        None | Some("") => 0,
        Some("CommonObject") => 1,
        Some("GeometryBase") => 2,
        Some("Curve") | Some("Surface") => 3,
        Some(_) => 4,
    }
}

/// Classes sorted by [`class_value`], ties broken by registry key.
pub fn by_inheritance<'a>(classes: impl Iterator<Item = &'a ClassEntity>) -> Vec<&'a ClassEntity> {
    let mut sorted: Vec<&ClassEntity> = classes.collect();
    sorted.sort_by_cached_key(|c| (class_value(c), BindingSet::key_of(&c.name)));
    sorted
}
