use crate::{
    artifacts::CompilerInput,
    error::{Result, SolcError},
};
use semver::Version;
use serde::{de::DeserializeOwned, Serialize};
use std::{
    io::Write,
    path::{Path, PathBuf},
    process::{Command, Output, Stdio},
};
use tracing::{debug, trace};

/// The name of the `solc` binary on the system
pub const SOLC: &str = "solc";

/// Something that turns a [`CompilerInput`] into a standard-json output document for a pinned
/// compiler version.
///
/// The batch driver only depends on this seam, the concrete compiler is an external
/// collaborator.
pub trait Compiler {
    /// Compiles `input` with the compiler release `version`, e.g. `0.8.24`
    fn compile(&self, version: &str, input: &CompilerInput) -> Result<serde_json::Value>;
}

impl<T: Compiler + ?Sized> Compiler for &T {
    fn compile(&self, version: &str, input: &CompilerInput) -> Result<serde_json::Value> {
        (**self).compile(version, input)
    }
}

/// Abstraction over `solc` command line utility
#[derive(Debug, Clone, Eq, PartialEq, PartialOrd, Ord)]
pub struct Solc {
    /// Path to the `solc` executable
    pub solc: PathBuf,
}

impl Default for Solc {
    fn default() -> Self {
        Solc::new(SOLC)
    }
}

impl Solc {
    /// A new instance which points to `solc`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Solc { solc: path.into() }
    }

    /// Returns the directory in which [svm](https://github.com/roynalnaruto/svm-rs) stores all versions
    ///
    /// This will be `~/.svm` on unix
    pub fn svm_home() -> Option<PathBuf> {
        home::home_dir().map(|dir| dir.join(".svm"))
    }

    /// Returns the path of an svm installed version below `svm_home`.
    ///
    /// svm lays out installations as `<svm_home>/<version>/solc-<version>`.
    pub fn find_svm_installed_version(svm_home: &Path, version: &Version) -> Option<Self> {
        let solc = svm_home.join(version.to_string()).join(format!("solc-{version}"));
        if !solc.is_file() {
            return None
        }
        Some(Solc::new(solc))
    }

    /// Run `solc --stand-json` and return the `solc`'s output as the given json
    /// output
    pub fn compile_as<T: Serialize, D: DeserializeOwned>(&self, input: &T) -> Result<D> {
        let output = self.compile_output(input)?;
        Ok(serde_json::from_slice(&output)?)
    }

    pub fn compile_output<T: Serialize>(&self, input: &T) -> Result<Vec<u8>> {
        let content = serde_json::to_vec(input)?;
        trace!(solc = %self.solc.display(), "spawning solc --standard-json");
        let mut child = Command::new(&self.solc)
            .arg("--standard-json")
            .stdin(Stdio::piped())
            .stderr(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|err| SolcError::io(err, &self.solc))?;
        {
            // dropping stdin closes the pipe so solc sees EOF
            let mut stdin = child
                .stdin
                .take()
                .ok_or_else(|| SolcError::Message("solc stdin not captured".to_string()))?;
            stdin.write_all(&content).map_err(|err| SolcError::io(err, &self.solc))?;
        }
        compile_output(child.wait_with_output().map_err(|err| SolcError::io(err, &self.solc))?)
    }
}

impl Compiler for Solc {
    fn compile(&self, _version: &str, input: &CompilerInput) -> Result<serde_json::Value> {
        self.compile_as(input)
    }
}

/// A [`Compiler`] that runs the svm installed `solc` matching the requested version.
///
/// Installing missing versions is not handled here, a version without an installation is
/// reported as [`SolcError::UnresolvedVersion`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvmSolc {
    svm_home: PathBuf,
}

impl SvmSolc {
    pub fn new(svm_home: impl Into<PathBuf>) -> Self {
        Self { svm_home: svm_home.into() }
    }

    pub fn svm_home(&self) -> &Path {
        &self.svm_home
    }

    /// Returns the installed `solc` for the pinned `version`
    pub fn find(&self, version: &str) -> Result<Solc> {
        let parsed = Version::parse(version).map_err(|_| SolcError::unresolved(version))?;
        Solc::find_svm_installed_version(&self.svm_home, &parsed)
            .ok_or_else(|| SolcError::unresolved(version))
    }
}

impl Compiler for SvmSolc {
    fn compile(&self, version: &str, input: &CompilerInput) -> Result<serde_json::Value> {
        let solc = self.find(version)?;
        debug!(solc = %solc.solc.display(), version, files = input.sources.len(), "compiling");
        solc.compile(version, input)
    }
}

fn compile_output(output: Output) -> Result<Vec<u8>> {
    if output.status.success() {
        Ok(output.stdout)
    } else {
        Err(SolcError::solc(String::from_utf8_lossy(&output.stderr).to_string()))
    }
}
