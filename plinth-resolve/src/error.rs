use miette::Diagnostic;
use thiserror::Error;

/// Result type for resolution (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Error raised by module initializers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// Any failure to resolve an object. The underlying cause is kept as the source.
    #[error("failed to import `{object}` from `{module}`")]
    #[diagnostic(
        code(plinth::project_import),
        help("check that `{module}` is registered and defines `{object}`")
    )]
    ProjectImport {
        module: String,
        object: String,
        #[source]
        source: Box<Error>,
    },

    #[error("no module named `{module}`")]
    #[diagnostic(code(plinth::module_not_found))]
    ModuleNotFound { module: String },

    #[error("module `{module}` has no attribute `{object}`")]
    #[diagnostic(code(plinth::attribute_not_found))]
    AttributeNotFound { module: String, object: String },

    #[error("failed to initialize module `{module}`")]
    #[diagnostic(code(plinth::module_init))]
    ModuleInit {
        module: String,
        #[source]
        source: BoxError,
    },

    #[error("`{module}.{object}` is not a `{expected}`")]
    #[diagnostic(code(plinth::type_mismatch))]
    TypeMismatch {
        module: String,
        object: String,
        expected: &'static str,
    },

    #[error("module `{module}` is already registered")]
    #[diagnostic(
        code(plinth::duplicate_module),
        help("each dotted path can be registered only once")
    )]
    DuplicateModule { module: String },
}

impl Error {
    /// Wrap a cause into the import error reported to callers.
    pub(crate) fn project_import(
        module: impl Into<String>,
        object: impl Into<String>,
        source: Box<Error>,
    ) -> Box<Self> {
        Box::new(Error::ProjectImport {
            module: module.into(),
            object: object.into(),
            source,
        })
    }

    /// The `(module, object)` pair of a failed import.
    pub fn import_target(&self) -> Option<(&str, &str)> {
        match self {
            Error::ProjectImport { module, object, .. } => Some((module.as_str(), object.as_str())),
            _ => None,
        }
    }
}
