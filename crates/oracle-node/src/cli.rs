//! Command line definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use fo_02_signature_verification::FinalityStatus;
use shared_types::{parse_address, parse_hash, Address, ChainId, Hash, Timestamp, Wei};
use std::path::PathBuf;

/// Finality oracle node: attestation aggregation and stake accounting
#[derive(Parser, Debug)]
#[command(name = "oracle-node")]
#[command(version, about = "Finality oracle attestation engine")]
pub struct Cli {
    /// Engine configuration file (TOML)
    #[arg(short, long, default_value = "config/oracle.toml")]
    pub config: PathBuf,

    /// Snapshot file, overriding `storage.snapshot_path`
    #[arg(short, long)]
    pub snapshot: Option<PathBuf>,

    /// Print proofs and oracles as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write an empty engine snapshot
    Init {
        /// Overwrite an existing snapshot
        #[arg(long)]
        force: bool,
    },

    /// Admit (or re-admit) an oracle with a stake in wei
    Admit {
        #[arg(long, value_parser = address_arg)]
        caller: Address,
        #[arg(value_parser = address_arg)]
        address: Address,
        stake: Wei,
    },

    /// Deactivate an oracle
    Remove {
        #[arg(long, value_parser = address_arg)]
        caller: Address,
        #[arg(value_parser = address_arg)]
        address: Address,
    },

    /// Change one global parameter
    SetParam {
        #[arg(long, value_parser = address_arg)]
        caller: Address,
        #[arg(value_enum)]
        name: ParamName,
        value: u128,
    },

    /// Submit a signed attestation
    Submit {
        /// Submitting oracle
        #[arg(long, value_parser = address_arg)]
        oracle: Address,
        #[command(flatten)]
        claim: ClaimArgs,
        /// 65-byte r||s||v signature, hex
        #[arg(long)]
        signature: String,
        /// Merkle sibling hash, repeatable
        #[arg(long = "merkle-node", value_parser = hash_arg)]
        merkle_nodes: Vec<Hash>,
    },

    /// Show the proofs recorded for a transaction
    Proof {
        #[arg(value_parser = hash_arg)]
        tx_hash: Hash,
        /// Restrict to one chain
        #[arg(long)]
        chain_id: Option<ChainId>,
    },

    /// Whether a transaction is finalized on any chain
    Finalized {
        #[arg(value_parser = hash_arg)]
        tx_hash: Hash,
    },

    /// List active oracles in admission order
    Oracles,

    /// Show one oracle
    Oracle {
        #[arg(value_parser = address_arg)]
        address: Address,
    },

    /// Sign an attestation with a development key
    Sign {
        /// 32-byte secp256k1 secret, hex
        #[arg(long)]
        key: String,
        #[command(flatten)]
        claim: ClaimArgs,
    },
}

/// The attested claim, shared by `submit` and `sign`.
#[derive(Args, Debug, Clone)]
pub struct ClaimArgs {
    #[arg(long, value_parser = hash_arg)]
    pub tx_hash: Hash,
    /// Observation time, seconds since the Unix epoch
    #[arg(long)]
    pub timestamp: Timestamp,
    #[arg(long, value_enum, default_value = "finalized")]
    pub status: StatusArg,
    /// Confirmations promised by the SLA
    #[arg(long)]
    pub sla_target: u64,
    #[arg(long, default_value = "1")]
    pub chain_id: ChainId,
    /// Confirmations observed
    #[arg(long)]
    pub confirmations: u64,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusArg {
    Pending,
    Finalized,
}

impl From<StatusArg> for FinalityStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Pending => FinalityStatus::Pending,
            StatusArg::Finalized => FinalityStatus::Finalized,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamName {
    RequiredSignatures,
    MaxOracles,
    MinStake,
    SlashingAmount,
}

fn address_arg(value: &str) -> Result<Address, String> {
    parse_address(value).map_err(|e| e.to_string())
}

fn hash_arg(value: &str) -> Result<Hash, String> {
    parse_hash(value).map_err(|e| e.to_string())
}
