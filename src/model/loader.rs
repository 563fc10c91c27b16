//! Runtime initialization and model loading.

use std::path::Path;
use std::sync::Once;

use ort::session::Session;

use crate::error::{Error, Result};

use super::session::{InferenceSession, ModelInfo};

/// Name the runtime environment registers under.
const RUNTIME_NAME: &str = "rawinfer";

static RUNTIME_INIT: Once = Once::new();

/// Outcome of committing the global runtime environment.
trait CommitOutcome {
    fn into_result(self) -> Result<()>;
}

impl CommitOutcome for bool {
    fn into_result(self) -> Result<()> {
        if !self {
            tracing::debug!("ONNX Runtime environment was already configured");
        }
        Ok(())
    }
}

impl CommitOutcome for ort::Result<()> {
    fn into_result(self) -> Result<()> {
        self.map_err(|source| Error::Runtime { source })
    }
}

impl CommitOutcome for ort::Result<bool> {
    fn into_result(self) -> Result<()> {
        self.map_err(|source| Error::Runtime { source })?.into_result()
    }
}

/// Initialize the process-wide ONNX Runtime environment.
///
/// Only the first call commits the environment; later calls return `Ok`.
/// The runtime's own logging is routed through `tracing`, so its verbosity
/// follows the `ort` filter directive installed by the binary.
///
/// # Errors
///
/// Returns [`Error::Runtime`] if the environment cannot be created.
pub fn init_runtime() -> Result<()> {
    let mut outcome = Ok(());
    RUNTIME_INIT.call_once(|| {
        outcome = ort::init().with_name(RUNTIME_NAME).commit().into_result();
        if outcome.is_ok() {
            tracing::debug!("ONNX Runtime environment initialized");
        }
    });
    outcome
}

/// Load an ONNX model with default session options.
///
/// Resolves the names of the graph's first input and first output, which
/// are the only ports the pipeline feeds and reads.
///
/// # Errors
///
/// Returns an error if the model cannot be loaded or declares no inputs or
/// no outputs.
pub fn load_session<P: AsRef<Path>>(path: P) -> Result<InferenceSession> {
    let path = path.as_ref();
    init_runtime()?;

    tracing::info!("Loading model: {}", path.display());

    let session = Session::builder()
        .map_err(|source| Error::ModelLoad {
            path: path.to_path_buf(),
            source,
        })?
        .commit_from_file(path)
        .map_err(|source| Error::ModelLoad {
            path: path.to_path_buf(),
            source,
        })?;

    let info = resolve_ports(&session)?;
    tracing::debug!(
        "Resolved ports: input={}, output={}",
        info.input_name,
        info.output_name
    );

    Ok(InferenceSession::new(session, info))
}

/// Look up the first declared input and output names.
fn resolve_ports(session: &Session) -> Result<ModelInfo> {
    let input_name = session
        .inputs()
        .first()
        .map(|input| input.name().to_string())
        .ok_or(Error::MissingPort { kind: "inputs" })?;

    let output_name = session
        .outputs()
        .first()
        .map(|output| output.name().to_string())
        .ok_or(Error::MissingPort { kind: "outputs" })?;

    Ok(ModelInfo {
        input_name,
        output_name,
    })
}
