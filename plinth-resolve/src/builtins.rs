//! Modules available in every registry created with [`Registry::with_builtins`].
//!
//! - `json`: `dumps`, `loads`, `exclude_none`
//! - `naming`: `snake_to_pascal`, `pascal_to_snake`, `to_camel_case`, `to_kebab_case`
//!
//! Functions are stored as plain function pointers; import them with
//! [`Registry::import_as`] and the matching alias below.

use plinth_core::{
    JsonError, exclude_none, json_dumps, json_loads, pascal_to_snake, snake_to_pascal,
    to_camel_case, to_kebab_case,
};
use serde_json::Value;

use crate::{Module, Registry};

/// `json.dumps`
pub type DumpsFn = fn(&Value) -> Result<String, JsonError>;
/// `json.loads`
pub type LoadsFn = fn(&str) -> Result<Value, JsonError>;
/// `json.exclude_none`
pub type ExcludeNoneFn = fn(Value) -> Value;
/// `naming.snake_to_pascal`, `naming.to_camel_case`, `naming.to_kebab_case`
pub type ConvertFn = fn(&str) -> String;
/// `naming.pascal_to_snake`
pub type PascalToSnakeFn = fn(&str, bool) -> String;

pub(crate) fn install(registry: &Registry) {
    let json = Module::new("json")
        .with("dumps", json_dumps::<Value> as DumpsFn)
        .with("loads", json_loads as LoadsFn)
        .with("exclude_none", exclude_none as ExcludeNoneFn);

    let naming = Module::new("naming")
        .with("snake_to_pascal", snake_to_pascal as ConvertFn)
        .with("pascal_to_snake", pascal_to_snake as PascalToSnakeFn)
        .with("to_camel_case", to_camel_case as ConvertFn)
        .with("to_kebab_case", to_kebab_case as ConvertFn);

    for module in [json, naming] {
        // A fresh registry cannot hold these names yet
        let _ = registry.register_module(module);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_json_dumps_resolves() {
        let registry = Registry::with_builtins();
        let dumps = registry.import_as::<DumpsFn>("json", "dumps").unwrap();

        assert_eq!((*dumps)(&json!({"a": [1, 2]})).unwrap(), r#"{"a":[1,2]}"#);
    }

    #[test]
    fn test_naming_resolves() {
        let registry = Registry::with_builtins();
        let to_pascal = registry
            .import_as::<ConvertFn>("naming", "snake_to_pascal")
            .unwrap();
        let to_snake = registry
            .import_as::<PascalToSnakeFn>("naming", "pascal_to_snake")
            .unwrap();

        assert_eq!((*to_pascal)("token_transfer"), "TokenTransfer");
        assert_eq!((*to_snake)("TokenTransfer", true), "token_transfer");
    }
}
