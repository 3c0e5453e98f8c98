//! Registry of built-in emitters.

use crate::traits::{EmitError, Emitter, Target};

/// All built-in emitters, in output order.
pub fn emitters() -> Vec<&'static dyn Emitter> {
    #[allow(unused_mut)]
    let mut emitters: Vec<&'static dyn Emitter> = Vec::new();

    #[cfg(feature = "emit-jsdoc")]
    {
        emitters.push(&crate::output::jsdoc::JSDOC_EMITTER);
    }

    #[cfg(feature = "emit-typescript")]
    {
        emitters.push(&crate::output::typescript::TYPESCRIPT_EMITTER);
    }

    #[cfg(feature = "emit-rst")]
    {
        emitters.push(&crate::output::rst::RST_EMITTER);
    }

    #[cfg(feature = "emit-python")]
    {
        emitters.push(&crate::output::python::PYTHON_EMITTER);
    }

    #[cfg(feature = "emit-pyi")]
    {
        emitters.push(&crate::output::pyi::PYI_EMITTER);
    }

    emitters
}

/// Get an emitter by name.
pub fn get_emitter(name: &str) -> Option<&'static dyn Emitter> {
    emitters().into_iter().find(|e| e.name() == name)
}

/// Get all emitters for a target runtime.
pub fn emitters_for_target(target: Target) -> Vec<&'static dyn Emitter> {
    emitters()
        .into_iter()
        .filter(|e| e.target() == target)
        .collect()
}

/// List all built-in emitter names.
pub fn emitter_names() -> Vec<&'static str> {
    emitters().iter().map(|e| e.name()).collect()
}

/// Emitters named in `names`, or every built-in when `names` is empty.
pub fn select_emitters(names: &[String]) -> Result<Vec<&'static dyn Emitter>, EmitError> {
    if names.is_empty() {
        return Ok(emitters());
    }
    names
        .iter()
        .map(|name| {
            get_emitter(name).ok_or_else(|| EmitError::UnknownEmitter {
                name: name.clone(),
                available: emitter_names().join(", "),
            })
        })
        .collect()
}
