use std::{collections::BTreeMap, fmt::Write, sync::Arc};

use clap::Args;
use eyre::Result;
use plinth_resolve::Module;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct ModulesCommand {
    /// Package to walk recursively (lists every registered module when omitted)
    package: Option<String>,
}

impl ModulesCommand {
    pub fn run(&self) -> Result<()> {
        let registry = plinth_resolve::global();

        let Some(package) = &self.package else {
            for name in registry.modules() {
                println!("{}", name);
            }
            return Ok(());
        };

        let modules = registry.import_submodules(package).unwrap_or_exit();
        if modules.is_empty() {
            println!("No modules found in '{}'", package);
        } else {
            print!("{}", render(&modules));
        }
        Ok(())
    }
}

/// One line per module: its dotted path followed by its attribute names.
fn render(modules: &BTreeMap<String, Arc<Module>>) -> String {
    let mut out = String::new();
    for (name, module) in modules {
        let attrs: Vec<_> = module.attrs().collect();
        if attrs.is_empty() {
            let _ = writeln!(out, "{}", name);
        } else {
            let _ = writeln!(out, "{} ({})", name, attrs.join(", "));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use plinth_resolve::Registry;

    use super::*;

    #[test]
    fn test_render() {
        let registry = Registry::new();
        registry
            .register("app.handlers.on_transfer", |m: &mut Module| {
                m.insert("on_transfer", ());
                Ok(())
            })
            .unwrap();
        registry
            .register("app.models", |m: &mut Module| {
                m.insert("Holder", ());
                m.insert("Token", ());
                Ok(())
            })
            .unwrap();

        let modules = registry.import_submodules("app").unwrap();
        insta::assert_snapshot!(render(&modules).trim_end(), @r"
        app.handlers
        app.handlers.on_transfer (on_transfer)
        app.models (Holder, Token)
        ");
    }
}
