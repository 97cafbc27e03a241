use clap::Args;
use eyre::Result;
use plinth_core::{Log, Settings};
use plinth_resolve::Registry;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct ResolveCommand {
    /// Dotted module path (e.g. "json")
    module: String,

    /// Object to look up in the module (e.g. "dumps")
    object: String,

    /// Report only through the exit status
    #[arg(long)]
    check: bool,
}

impl ResolveCommand {
    pub fn run(&self, settings: &Settings) -> Result<()> {
        let registry = plinth_resolve::global();

        if self.check {
            if !registry.is_importable(&self.module, &self.object) {
                std::process::exit(1);
            }
            return Ok(());
        }

        let line = describe(registry, &self.module, &self.object).unwrap_or_exit();

        settings
            .logger("plinth.resolve")
            .info(&format!("Resolved `{}.{}`", self.module, self.object));
        println!("{line}");
        Ok(())
    }
}

/// Resolve an object and describe it with its type.
fn describe(registry: &Registry, module: &str, object: &str) -> plinth_resolve::Result<String> {
    registry.import_from(module, object)?;
    let type_name = registry
        .import_module(module)?
        .type_name(object)
        .unwrap_or("unknown");
    Ok(format!("✓ {module}.{object}: {type_name}"))
}
