//! Loading of template files as modules.
//!
//! A [`ModuleLoader`] is registered for a file extension. It compiles the files of
//! that extension and hands the generated code to a [`ModuleHost`], which is the
//! module system evaluating it. Compiled code is cached for the whole process.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};

use fxhash::FxHashMap;

use crate::{compile, errors::LoadError, CompileOptions};

lazy_static! {
    /// Compiled code keyed by the canonical path of the template
    static ref COMPILE_CACHE: Mutex<FxHashMap<PathBuf, Arc<String>>> =
        Mutex::new(FxHashMap::default());
}

/// A module system which can evaluate generated code
pub trait ModuleHost {
    fn compile_module(
        &mut self,
        code: &str,
        filename: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

#[derive(Debug, Clone)]
pub struct ModuleLoader {
    /// Extension including the dot, e.g. `.html`
    extension: String,
}

impl Default for ModuleLoader {
    fn default() -> Self {
        ModuleLoader::new(".html")
    }
}

impl ModuleLoader {
    pub fn new(extension: impl Into<String>) -> ModuleLoader {
        ModuleLoader {
            extension: extension.into(),
        }
    }

    #[inline]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Whether the file is handled by this loader
    pub fn handles(&self, path: &Path) -> bool {
        path.to_str().map_or(false, |it| it.ends_with(&self.extension))
    }

    /// Reads, compiles and hands over the template to the host.
    /// The file is neither read nor compiled when this process already compiled it.
    ///
    /// When the host fails, the whole generated code is logged for diagnosis.
    pub fn load(&self, path: &Path, host: &mut impl ModuleHost) -> Result<Arc<String>, LoadError> {
        if !self.handles(path) {
            return Err(LoadError::UnsupportedExtension {
                path: path.to_owned(),
                extension: self.extension.to_owned(),
            });
        }

        let io_error = |source: std::io::Error| LoadError::Io {
            path: path.to_owned(),
            source,
        };

        // A removed file keeps being served from the cache
        let filename = fs::canonicalize(path)
            .or_else(|_| std::path::absolute(path))
            .map_err(io_error)?;

        let code = match cached(&filename) {
            Some(code) => {
                tracing::debug!(filename = %filename.display(), "compile cache hit");
                code
            }

            None => {
                let source = fs::read_to_string(&filename).map_err(io_error)?;
                let options = CompileOptions {
                    filename: filename.to_string_lossy(),
                    ..Default::default()
                };
                let result = compile(&source, &options).map_err(|source| LoadError::Compile {
                    path: filename.to_owned(),
                    source,
                })?;

                let code = Arc::new(result.code);
                lock_cache().insert(filename.to_owned(), Arc::clone(&code));
                code
            }
        };

        if let Err(source) = host.compile_module(&code, &filename) {
            tracing::error!(
                filename = %filename.display(),
                code = %code,
                "generated module failed to load"
            );
            return Err(LoadError::Host {
                path: filename,
                source,
            });
        }

        Ok(code)
    }
}

/// Whether the template at the canonical `path` is cached
pub fn is_cached(path: &Path) -> bool {
    lock_cache().contains_key(path)
}

fn cached(path: &Path) -> Option<Arc<String>> {
    lock_cache().get(path).cloned()
}

fn lock_cache() -> std::sync::MutexGuard<'static, FxHashMap<PathBuf, Arc<String>>> {
    COMPILE_CACHE.lock().unwrap_or_else(PoisonError::into_inner)
}
