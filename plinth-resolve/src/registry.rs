//! Process-wide module registry.
//!
//! Modules are registered under dotted paths with an initializer that fills
//! their namespace. Nothing runs at registration time: a module is
//! initialized the first time it, or one of its descendants, is imported,
//! and the loaded instance is cached for every later import.
//!
//! # Example
//!
//! ```
//! use plinth_resolve::{Module, Registry};
//!
//! let registry = Registry::new();
//! registry
//!     .register("demo.handlers", |module: &mut Module| {
//!         module.insert("on_transfer", "handler");
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! assert!(registry.is_importable("demo.handlers", "on_transfer"));
//! assert!(!registry.is_importable("demo.handlers", "on_mint"));
//! ```

use std::{
    any::{Any, type_name},
    collections::BTreeMap,
    sync::{Arc, Mutex, OnceLock, PoisonError, RwLock},
};

use tracing::debug;

use crate::{
    builtins,
    error::{BoxError, Error, Result},
    module::{Module, Object},
};

type Initializer = Box<dyn Fn(&mut Module) -> std::result::Result<(), BoxError> + Send + Sync>;

/// A registered module, loaded at most once.
struct Slot {
    /// `None` for packages that only exist because a descendant was registered.
    init: Option<Initializer>,
    loaded: OnceLock<Arc<Module>>,
    loading: Mutex<()>,
}

impl Slot {
    fn new(init: Option<Initializer>) -> Self {
        Self {
            init,
            loaded: OnceLock::new(),
            loading: Mutex::new(()),
        }
    }

    fn preloaded(module: Module) -> Self {
        let slot = Self::new(None);
        let _ = slot.loaded.set(Arc::new(module));
        slot
    }

    fn is_namespace(&self) -> bool {
        self.init.is_none() && self.loaded.get().is_none()
    }

    fn load(&self, name: &str) -> Result<Arc<Module>> {
        if let Some(module) = self.loaded.get() {
            return Ok(Arc::clone(module));
        }

        let _guard = self.loading.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(module) = self.loaded.get() {
            return Ok(Arc::clone(module));
        }

        debug!(module = name, "Initializing module");
        let mut module = Module::new(name);
        if let Some(init) = &self.init {
            init(&mut module).map_err(|source| {
                Box::new(Error::ModuleInit {
                    module: name.to_string(),
                    source,
                })
            })?;
        }

        Ok(Arc::clone(self.loaded.get_or_init(|| Arc::new(module))))
    }
}

/// Registry mapping dotted module paths to lazily initialized modules.
///
/// Registering `a.b.c` implicitly creates empty `a` and `a.b` packages unless
/// they are registered themselves. Importing a module initializes its
/// ancestors first.
#[derive(Default)]
pub struct Registry {
    slots: RwLock<BTreeMap<String, Arc<Slot>>>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("modules", &self.modules())
            .finish()
    }
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in `json` and `naming` modules.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        builtins::install(&registry);
        registry
    }

    /// Register a module whose namespace is filled by `init` on first import.
    pub fn register<F>(&self, name: impl Into<String>, init: F) -> Result<()>
    where
        F: Fn(&mut Module) -> std::result::Result<(), BoxError> + Send + Sync + 'static,
    {
        self.insert_slot(name.into(), Slot::new(Some(Box::new(init))))
    }

    /// Register an already built module.
    pub fn register_module(&self, module: Module) -> Result<()> {
        self.insert_slot(module.name().to_string(), Slot::preloaded(module))
    }

    fn insert_slot(&self, name: String, slot: Slot) -> Result<()> {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);

        if slots.get(&name).is_some_and(|existing| !existing.is_namespace()) {
            return Err(Box::new(Error::DuplicateModule { module: name }));
        }

        for (i, _) in name.match_indices('.') {
            slots
                .entry(name[..i].to_string())
                .or_insert_with(|| Arc::new(Slot::new(None)));
        }
        slots.insert(name, Arc::new(slot));
        Ok(())
    }

    /// Check whether a module path is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.read_slots().contains_key(name)
    }

    /// All registered module paths in sorted order.
    pub fn modules(&self) -> Vec<String> {
        self.read_slots().keys().cloned().collect()
    }

    fn read_slots(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<String, Arc<Slot>>> {
        self.slots.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn slot(&self, name: &str) -> Result<Arc<Slot>> {
        self.read_slots().get(name).cloned().ok_or_else(|| {
            Box::new(Error::ModuleNotFound {
                module: name.to_string(),
            })
        })
    }

    /// Import a module by dotted path, initializing it and its ancestors if needed.
    pub fn import_module(&self, name: &str) -> Result<Arc<Module>> {
        for (i, _) in name.match_indices('.') {
            let parent = &name[..i];
            self.slot(parent)?.load(parent)?;
        }
        self.slot(name)?.load(name)
    }

    /// Import a module and get one of its objects.
    ///
    /// Whether the module is missing, fails to initialize, or lacks the
    /// object, the failure is reported as [`Error::ProjectImport`].
    pub fn import_from(&self, module: &str, object: &str) -> Result<Object> {
        self.import_module(module)
            .and_then(|loaded| {
                loaded.get(object).cloned().ok_or_else(|| {
                    Box::new(Error::AttributeNotFound {
                        module: module.to_string(),
                        object: object.to_string(),
                    })
                })
            })
            .map_err(|source| Error::project_import(module, object, source))
    }

    /// Import an object as a concrete type.
    pub fn import_as<T: Any + Send + Sync>(&self, module: &str, object: &str) -> Result<Arc<T>> {
        self.import_from(module, object)?.downcast::<T>().map_err(|_| {
            let mismatch = Box::new(Error::TypeMismatch {
                module: module.to_string(),
                object: object.to_string(),
                expected: type_name::<T>(),
            });
            Error::project_import(module, object, mismatch)
        })
    }

    /// Check whether an object can be imported. Never fails.
    pub fn is_importable(&self, module: &str, object: &str) -> bool {
        self.import_from(module, object).is_ok()
    }

    /// Recursively import every module nested under `package`.
    ///
    /// The result is keyed by fully-qualified dotted path and holds each
    /// descendant exactly once; the package itself is not included. An
    /// unknown package yields an empty map. The first initialization error is
    /// returned as-is.
    pub fn import_submodules(&self, package: &str) -> Result<BTreeMap<String, Arc<Module>>> {
        let mut results = BTreeMap::new();
        for (name, is_package) in self.children(package) {
            let module = self.import_module(&name)?;
            results.insert(name.clone(), module);
            if is_package {
                results.extend(self.import_submodules(&name)?);
            }
        }
        Ok(results)
    }

    /// Direct children of a package, with whether each has children of its own.
    fn children(&self, package: &str) -> Vec<(String, bool)> {
        let prefix = format!("{package}.");
        let slots = self.read_slots();
        let has_descendants = |name: &str| {
            let nested = format!("{name}.");
            slots
                .range(nested.clone()..)
                .next()
                .is_some_and(|(key, _)| key.starts_with(&nested))
        };

        slots
            .range(prefix.clone()..)
            .take_while(|(name, _)| name.starts_with(&prefix))
            .filter(|(name, _)| !name[prefix.len()..].contains('.'))
            .map(|(name, _)| (name.clone(), has_descendants(name)))
            .collect()
    }
}

/// The process-wide registry, created with the built-in modules on first use.
pub fn global() -> &'static Registry {
    static GLOBAL: OnceLock<Registry> = OnceLock::new();
    GLOBAL.get_or_init(Registry::with_builtins)
}

/// Register a module in the [`global`] registry.
pub fn register<F>(name: impl Into<String>, init: F) -> Result<()>
where
    F: Fn(&mut Module) -> std::result::Result<(), BoxError> + Send + Sync + 'static,
{
    global().register(name, init)
}

/// Import an object from the [`global`] registry.
pub fn import_from(module: &str, object: &str) -> Result<Object> {
    global().import_from(module, object)
}

/// Check whether an object is importable from the [`global`] registry.
pub fn is_importable(module: &str, object: &str) -> bool {
    global().is_importable(module, object)
}

/// Recursively import a package's modules from the [`global`] registry.
pub fn import_submodules(package: &str) -> Result<BTreeMap<String, Arc<Module>>> {
    global().import_submodules(package)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn test_register_creates_parent_packages() {
        let registry = Registry::new();
        registry.register("a.b.c", |_: &mut Module| Ok(())).unwrap();

        assert_eq!(registry.modules(), vec!["a", "a.b", "a.b.c"]);
    }

    #[test]
    fn test_explicit_package_replaces_namespace() {
        let registry = Registry::new();
        registry.register("pkg.child", |_: &mut Module| Ok(())).unwrap();
        registry
            .register("pkg", |m: &mut Module| {
                m.insert("version", 2u32);
                Ok(())
            })
            .unwrap();

        let pkg = registry.import_module("pkg").unwrap();
        assert_eq!(pkg.get_as::<u32>("version"), Some(&2));
    }

    #[test]
    fn test_duplicate_registration() {
        let registry = Registry::new();
        registry.register("dup", |_: &mut Module| Ok(())).unwrap();

        let err = registry.register("dup", |_: &mut Module| Ok(())).unwrap_err();
        assert!(matches!(*err, Error::DuplicateModule { ref module } if module == "dup"));

        let err = registry.register_module(Module::new("dup")).unwrap_err();
        assert!(matches!(*err, Error::DuplicateModule { .. }));
    }

    #[test]
    fn test_module_initialized_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let registry = Registry::new();
        registry
            .register("counted", move |m: &mut Module| {
                counter.fetch_add(1, Ordering::SeqCst);
                m.insert("value", 1u8);
                Ok(())
            })
            .unwrap();

        let first = registry.import_module("counted").unwrap();
        let second = registry.import_module("counted").unwrap();
        registry.import_from("counted", "value").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_initialization_is_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let registry = Registry::new();
        registry
            .register("flaky", move |_: &mut Module| {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err("first attempt fails".into())
                } else {
                    Ok(())
                }
            })
            .unwrap();

        let err = registry.import_module("flaky").unwrap_err();
        assert!(matches!(*err, Error::ModuleInit { .. }));
        assert!(registry.import_module("flaky").is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_import_initializes_ancestors() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let registry = Registry::new();
        registry
            .register("app", move |_: &mut Module| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .unwrap();
        registry.register("app.models", |_: &mut Module| Ok(())).unwrap();

        registry.import_module("app.models").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_import_as_type_mismatch() {
        let registry = Registry::new();
        registry
            .register_module(Module::new("typed").with("count", 3usize))
            .unwrap();

        assert_eq!(*registry.import_as::<usize>("typed", "count").unwrap(), 3);

        let err = registry.import_as::<String>("typed", "count").unwrap_err();
        assert_eq!(err.import_target(), Some(("typed", "count")));
        match *err {
            Error::ProjectImport { source, .. } => {
                assert!(matches!(*source, Error::TypeMismatch { .. }))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_children() {
        let registry = Registry::new();
        for name in ["pkg.a", "pkg.b.c", "pkg.b.d", "pkg.e", "pkgx.f"] {
            registry.register(name, |_: &mut Module| Ok(())).unwrap();
        }

        assert_eq!(
            registry.children("pkg"),
            vec![
                ("pkg.a".to_string(), false),
                ("pkg.b".to_string(), true),
                ("pkg.e".to_string(), false),
            ]
        );
        assert!(registry.children("missing").is_empty());
    }

    #[test]
    fn test_global_has_builtins() {
        assert!(global().contains("json"));
        assert!(is_importable("json", "dumps"));
        assert!(!is_importable("json", "does_not_exist"));
    }
}
