//! Generation driver for the `weftgen` CLI.
//!
//! Loads a JSON catalog, validates it, and writes one backend's
//! compilation unit to a file or stdout. All real work happens in
//! `weft_catalog` and `weft_codegen`; this crate only wires I/O around
//! them.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;

use thiserror::Error;
use weft_catalog::{Backend, Catalog, CatalogError, TypeDescriptor};
use weft_codegen::{generate, GenError};

/// One generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub catalog_path: PathBuf,
    pub backend: Backend,
    /// Write destination; stdout when absent.
    pub output: Option<PathBuf>,
}

/// Driver failure: I/O, catalog, or generation.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read `{path}`: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write `{path}`: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Gen(#[from] GenError),
}

/// Parse a `--backend=` value.
#[must_use]
pub fn parse_backend(raw: &str) -> Option<Backend> {
    match raw {
        "host" => Some(Backend::Host),
        "accel" | "accelerator" => Some(Backend::Accelerator),
        _ => None,
    }
}

/// Read and validate a JSON catalog file.
pub fn load_catalog(path: &Path) -> Result<Catalog, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let entries: Vec<TypeDescriptor> = serde_json::from_str(&text)?;
    Ok(Catalog::new(entries)?)
}

/// Run one generation end to end.
pub fn run_generate(options: &GenerateOptions) -> Result<(), CliError> {
    let catalog = load_catalog(&options.catalog_path)?;
    let unit = generate(&catalog, options.backend)?;

    match &options.output {
        Some(path) => {
            fs::write(path, &unit).map_err(|source| CliError::Write {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(path = %path.display(), bytes = unit.len(), "wrote unit");
        }
        None => print!("{unit}"),
    }
    Ok(())
}

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber once, only when `RUST_LOG` asks for it.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use weft_catalog::Backend;

    use super::{load_catalog, parse_backend, run_generate, CliError, GenerateOptions};

    const CATALOG_JSON: &str = r#"[
        {
            "backend": "host",
            "scalar": "f32",
            "density": "dense",
            "type_id": 0,
            "display_name": "HostFloat32",
            "tensor_kind": "HostFloat32Tensor"
        },
        {
            "backend": "accelerator",
            "scalar": "f32",
            "density": "dense",
            "type_id": 1,
            "display_name": "AccelFloat32",
            "tensor_kind": "AccelFloat32Tensor"
        }
    ]"#;

    #[test]
    fn parse_backend_accepts_both_spellings() {
        assert_eq!(parse_backend("host"), Some(Backend::Host));
        assert_eq!(parse_backend("accel"), Some(Backend::Accelerator));
        assert_eq!(parse_backend("accelerator"), Some(Backend::Accelerator));
        assert_eq!(parse_backend("gpu"), None);
    }

    #[test]
    fn load_catalog_round_trips_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, CATALOG_JSON).unwrap();

        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.entries()[1].display_name, "AccelFloat32");
    }

    #[test]
    fn shipped_catalog_is_valid() {
        let path =
            std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../catalogs/weft.json");
        let catalog = load_catalog(&path).unwrap();
        assert!(catalog.dense_for_backend(Backend::Host).next().is_some());
        assert!(catalog
            .dense_for_backend(Backend::Accelerator)
            .next()
            .is_some());
    }

    #[test]
    fn missing_catalog_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_catalog(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, CliError::Read { .. }));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, "[{\"backend\": \"host\"").unwrap();
        let err = load_catalog(&path).unwrap_err();
        assert!(matches!(err, CliError::Json(_)));
    }

    #[test]
    fn run_generate_writes_the_unit_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let catalog_path = dir.path().join("catalog.json");
        fs::write(&catalog_path, CATALOG_JSON).unwrap();
        let output = dir.path().join("CopyHost.cpp");

        run_generate(&GenerateOptions {
            catalog_path,
            backend: Backend::Host,
            output: Some(output.clone()),
        })
        .unwrap();

        let unit = fs::read_to_string(&output).unwrap();
        assert!(unit.starts_with("// @generated by weftgen; do not edit by hand.\n"));
        assert!(unit.contains("HostFloat32Type::copy_"));
    }
}
