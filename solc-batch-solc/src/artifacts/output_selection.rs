//! bindings for standard json output selection

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{collections::BTreeMap, fmt, str::FromStr};

/// Represents the selected output of files and contracts
/// The first level key is the file name and the second level key is the
/// contract name. An empty contract name is used for outputs that are
/// not tied to a contract but to the whole source file like the AST.
/// A star as contract name refers to all contracts in the file.
/// Similarly, a star as a file name matches all files.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutputSelection(pub BTreeMap<String, FileOutputSelection>);

/// contract name -> selected outputs
pub type FileOutputSelection = BTreeMap<String, Vec<ContractOutputSelection>>;

impl OutputSelection {
    /// The selection every batch compilation requests for every contract in every file:
    ///
    /// ```json
    /// { "*": { "*": ["evm.bytecode", "evm.deployedBytecode", "devdoc", "userdoc", "metadata", "abi"] } }
    /// ```
    pub fn batch_output_selection() -> Self {
        Self::common_output_selection(ContractOutputSelection::batch())
    }

    /// Applies the given contract selection to all contracts of all files
    pub fn common_output_selection(
        selection: impl IntoIterator<Item = ContractOutputSelection>,
    ) -> Self {
        BTreeMap::from([(
            "*".to_string(),
            BTreeMap::from([("*".to_string(), selection.into_iter().collect())]),
        )])
        .into()
    }
}

impl From<BTreeMap<String, FileOutputSelection>> for OutputSelection {
    fn from(s: BTreeMap<String, FileOutputSelection>) -> Self {
        OutputSelection(s)
    }
}

/// Contract level output selection
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContractOutputSelection {
    Abi,
    DevDoc,
    UserDoc,
    Metadata,
    Evm(EvmOutputSelection),
}

impl ContractOutputSelection {
    /// The outputs requested by the batch compile pass, in the order solc receives them:
    ///    - "evm.bytecode"
    ///    - "evm.deployedBytecode"
    ///    - "devdoc"
    ///    - "userdoc"
    ///    - "metadata"
    ///    - "abi"
    pub fn batch() -> Vec<ContractOutputSelection> {
        vec![
            EvmOutputSelection::Bytecode.into(),
            EvmOutputSelection::DeployedBytecode.into(),
            ContractOutputSelection::DevDoc,
            ContractOutputSelection::UserDoc,
            ContractOutputSelection::Metadata,
            ContractOutputSelection::Abi,
        ]
    }
}

impl Serialize for ContractOutputSelection {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ContractOutputSelection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer)?.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for ContractOutputSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractOutputSelection::Abi => f.write_str("abi"),
            ContractOutputSelection::DevDoc => f.write_str("devdoc"),
            ContractOutputSelection::UserDoc => f.write_str("userdoc"),
            ContractOutputSelection::Metadata => f.write_str("metadata"),
            ContractOutputSelection::Evm(e) => e.fmt(f),
        }
    }
}

impl FromStr for ContractOutputSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "abi" => Ok(ContractOutputSelection::Abi),
            "devdoc" => Ok(ContractOutputSelection::DevDoc),
            "userdoc" => Ok(ContractOutputSelection::UserDoc),
            "metadata" => Ok(ContractOutputSelection::Metadata),
            s => EvmOutputSelection::from_str(s).map(ContractOutputSelection::Evm),
        }
    }
}

impl From<EvmOutputSelection> for ContractOutputSelection {
    fn from(evm: EvmOutputSelection) -> Self {
        ContractOutputSelection::Evm(evm)
    }
}

/// Contract level output selection for `evm`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EvmOutputSelection {
    Bytecode,
    DeployedBytecode,
}

impl fmt::Display for EvmOutputSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvmOutputSelection::Bytecode => f.write_str("evm.bytecode"),
            EvmOutputSelection::DeployedBytecode => f.write_str("evm.deployedBytecode"),
        }
    }
}

impl FromStr for EvmOutputSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bytecode" | "evm.bytecode" => Ok(EvmOutputSelection::Bytecode),
            "deployedBytecode" | "evm.deployedBytecode" | "evm.deployedbytecode" => {
                Ok(EvmOutputSelection::DeployedBytecode)
            }
            s => Err(format!("Invalid evm selection: {s}")),
        }
    }
}
