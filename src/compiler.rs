//! Invocation of the Solidity compiler through its standard-JSON interface
//!
//! The compiler is treated as an opaque subprocess: a standard-JSON input
//! naming every source unit and the requested outputs goes in on stdin,
//! and diagnostics plus per-contract ABI & bytecode come back on stdout.

use std::{
    collections::BTreeMap,
    path::Path,
    process::{Command, Stdio},
};

use ethers::abi::Abi;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        ABI_SELECTION, BYTECODE_SELECTION, SOLC_COMMAND, SOLIDITY_LANGUAGE, STANDARD_JSON_FLAG,
        WILDCARD_SELECTION,
    },
    errors::ScriptError,
    resolver::{collect_sources, ResolutionError},
};

/// The `solc --standard-json` input
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerInput {
    /// The source language
    pub language: String,
    /// The source units to compile, keyed by virtual path
    pub sources: BTreeMap<String, SourceContent>,
    /// Compilation settings, restricted here to output selection
    pub settings: CompilerSettings,
}

/// One source unit's content in the standard-JSON input
#[derive(Debug, Serialize)]
pub struct SourceContent {
    /// The literal source text
    pub content: String,
}

/// The `settings` object of the standard-JSON input
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerSettings {
    /// Which outputs to retain, per source file and contract
    pub output_selection: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl CompilerInput {
    /// Build an input over the given sources, selecting ABI and creation
    /// bytecode for every contract in every source
    pub fn new(sources: BTreeMap<String, String>) -> Self {
        let selections = vec![ABI_SELECTION.to_string(), BYTECODE_SELECTION.to_string()];
        let per_file = BTreeMap::from([(WILDCARD_SELECTION.to_string(), selections)]);
        let output_selection = BTreeMap::from([(WILDCARD_SELECTION.to_string(), per_file)]);

        Self {
            language: SOLIDITY_LANGUAGE.to_string(),
            sources: sources
                .into_iter()
                .map(|(path, content)| (path, SourceContent { content }))
                .collect(),
            settings: CompilerSettings { output_selection },
        }
    }
}

/// The severity of a compiler diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational output, never blocking
    Info,
    /// A warning; artifacts are still emitted
    Warning,
    /// An error; the compile call produces no usable artifacts
    Error,
}

/// A single compiler-emitted message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// The message severity
    pub severity: Severity,
    /// The bare message body
    #[serde(default)]
    pub message: String,
    /// The human-readable body including source location, when present
    #[serde(default)]
    pub formatted_message: Option<String>,
}

impl Diagnostic {
    /// The preferred human-readable body of the diagnostic
    pub fn text(&self) -> &str {
        self.formatted_message.as_deref().unwrap_or(&self.message)
    }
}

impl From<ResolutionError> for Diagnostic {
    fn from(failure: ResolutionError) -> Self {
        Self {
            severity: Severity::Error,
            message: format!("File not found: {}", failure.import_path),
            formatted_message: None,
        }
    }
}

/// The `solc --standard-json` output subset consumed here
#[derive(Debug, Deserialize)]
struct CompilerOutput {
    /// Diagnostics for the whole invocation, in receipt order
    #[serde(default)]
    errors: Vec<Diagnostic>,
    /// Compiled contracts, keyed by source file then contract name
    #[serde(default)]
    contracts: BTreeMap<String, BTreeMap<String, ContractArtifact>>,
}

/// The durable output of compilation for one named contract
///
/// Field order is the persisted key order: `abi` before `evm`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractArtifact {
    /// The contract's ABI
    pub abi: Abi,
    /// The contract's EVM outputs
    pub evm: EvmOutput,
}

/// The `evm` object of a compiled contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvmOutput {
    /// The creation bytecode
    pub bytecode: BytecodeObject,
}

/// A bytecode object in the compiler's output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BytecodeObject {
    /// The bytecode as an unprefixed hex string
    pub object: String,
}

/// The result of one compile call: every contract the compiler emitted,
/// plus all diagnostics (import-resolution failures first, then the
/// compiler's own, each batch in receipt order)
#[derive(Debug)]
pub struct CompileOutcome {
    /// Compiled contracts keyed by contract name
    pub artifacts: BTreeMap<String, ContractArtifact>,
    /// All diagnostics collected for the invocation
    pub diagnostics: Vec<Diagnostic>,
}

impl CompileOutcome {
    /// Whether any diagnostic carries error severity
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// The number of error-severity diagnostics
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }
}

/// Compile the entry source and its import closure
pub fn compile_source(project_root: &Path, entry_source: &str) -> Result<CompileOutcome, ScriptError> {
    let resolved = collect_sources(project_root, entry_source)?;
    let mut diagnostics: Vec<Diagnostic> =
        resolved.failures.into_iter().map(Diagnostic::from).collect();

    let input = CompilerInput::new(resolved.sources);
    let output = run_solc(&input)?;
    diagnostics.extend(output.errors);

    Ok(CompileOutcome {
        artifacts: flatten_contracts(output.contracts),
        diagnostics,
    })
}

/// Run the compiler subprocess, writing the input to stdin and parsing
/// the standard-JSON output from stdout
fn run_solc(input: &CompilerInput) -> Result<CompilerOutput, ScriptError> {
    let mut child = Command::new(SOLC_COMMAND)
        .arg(STANDARD_JSON_FLAG)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| ScriptError::CompilerExecution(e.to_string()))?;

    let stdin = child
        .stdin
        .take()
        .ok_or_else(|| ScriptError::CompilerExecution("could not open compiler stdin".to_string()))?;
    serde_json::to_writer(stdin, input).map_err(|e| ScriptError::CompilerExecution(e.to_string()))?;

    let output = child
        .wait_with_output()
        .map_err(|e| ScriptError::CompilerExecution(e.to_string()))?;
    if !output.status.success() {
        return Err(ScriptError::CompilerExecution(
            String::from_utf8_lossy(&output.stderr).into_owned(),
        ));
    }

    serde_json::from_slice(&output.stdout).map_err(|e| ScriptError::CompilerExecution(e.to_string()))
}

/// Collapse the compiler's source-file → contract-name nesting into a
/// single map keyed by contract name
fn flatten_contracts(
    contracts: BTreeMap<String, BTreeMap<String, ContractArtifact>>,
) -> BTreeMap<String, ContractArtifact> {
    contracts
        .into_values()
        .flat_map(BTreeMap::into_iter)
        .collect()
}
