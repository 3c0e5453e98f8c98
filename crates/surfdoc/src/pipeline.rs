//! Extraction, resolution and emission in one pass.

use std::path::{Path, PathBuf};

use anyhow::Context;
use surfdoc_bindings::scan_dir;
use surfdoc_emit::{Artifact, EmitContext, Emitter, Target, emitters_for_target, select_emitters};
use surfdoc_reference::extract_dir;

use crate::config::SurfdocConfig;

/// Input trees of one run.
#[derive(Debug, Clone)]
pub struct Sources {
    pub reference_root: PathBuf,
    pub bindings_root: PathBuf,
}

/// Render every selected emitter's artifacts without writing them.
///
/// Emitter names are checked before either tree is read.
pub fn generate(config: &SurfdocConfig, sources: &Sources) -> anyhow::Result<Vec<Artifact>> {
    let emitters = selected_emitters(config)?;

    let reference = extract_dir(&sources.reference_root, &config.reference.extract_options())
        .context("failed to extract reference model")?;
    tracing::info!(classes = reference.len(), "reference model ready");

    let bindings = scan_dir(&sources.bindings_root, &config.bindings.scan_options())
        .context("failed to extract bindings")?;
    tracing::info!(
        javascript = bindings.javascript_classes().count(),
        python = bindings.python_classes().count(),
        enums = bindings.enums().count(),
        "binding registries ready"
    );

    let options = config.output.emit_options();
    let ctx = EmitContext::new(&reference, &bindings, &options);
    let mut artifacts = Vec::new();
    for emitter in emitters {
        let produced = emitter.emit(&ctx);
        tracing::debug!(emitter = emitter.name(), files = produced.len(), "emitted");
        artifacts.extend(produced);
    }
    Ok(artifacts)
}

/// Emitters named in `[output].emitters`, narrowed to `[output].target` when set.
fn selected_emitters(config: &SurfdocConfig) -> anyhow::Result<Vec<&'static dyn Emitter>> {
    let output = &config.output;
    let emitters = match output.target.map(Target::from) {
        Some(target) if output.emitters.is_empty() => emitters_for_target(target),
        Some(target) => select_emitters(&output.emitters)?
            .into_iter()
            .filter(|e| e.target() == target)
            .collect(),
        None => select_emitters(&output.emitters)?,
    };
    Ok(emitters)
}

/// Generate and write everything under `output_root`. Returns the written paths.
pub fn run(config: &SurfdocConfig, sources: &Sources, output_root: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let artifacts = generate(config, sources)?;
    let mut written = Vec::with_capacity(artifacts.len());
    for artifact in &artifacts {
        let path = artifact.write(output_root)?;
        tracing::info!(path = %path.display(), "wrote");
        written.push(path);
    }
    Ok(written)
}
