//! Command execution against the service API.

use crate::cli::{ClaimArgs, Command, ParamName};
use crate::views::{OracleView, ProofView};
use anyhow::{bail, Context, Result};
use fo_01_oracle_registry::{Oracle, Parameters};
use fo_02_signature_verification::{AttestationPayload, AttestationSigner};
use fo_03_attestation_ledger::FinalityProof;
use fo_04_oracle_service::{
    EngineConfig, FileSnapshotStore, FinalityOracleApi, FinalityOracleService, OracleAdminApi,
    SnapshotStore, SubmitAttestationRequest,
};
use shared_types::{decode_hex, to_hex, SystemTimeSource};
use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Load the engine configuration, falling back to defaults when `path` is absent.
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let config = if path.exists() {
        EngineConfig::load(path).with_context(|| format!("loading {}", path.display()))?
    } else {
        info!("Config {} not found, using defaults", path.display());
        EngineConfig::default()
    };
    config
        .with_env_overrides()
        .context("applying FO_* environment overrides")
}

/// Run `command` and return its printable output.
pub async fn execute(config: &EngineConfig, command: Command, json: bool) -> Result<String> {
    let store = FileSnapshotStore::new(&config.storage.snapshot_path);

    match command {
        Command::Init { force } => init(config, &store, force),
        Command::Sign { key, claim } => sign(&key, &claim),
        command => {
            let service = FinalityOracleService::open(config, &store, Arc::new(SystemTimeSource))
                .context("opening engine")?;
            let mutates = matches!(
                command,
                Command::Admit { .. }
                    | Command::Remove { .. }
                    | Command::SetParam { .. }
                    | Command::Submit { .. }
            );
            let output = run(&service, command, json).await?;
            if mutates {
                service.persist(&store).context("saving snapshot")?;
            }
            Ok(output)
        }
    }
}

fn init(config: &EngineConfig, store: &FileSnapshotStore, force: bool) -> Result<String> {
    if !force && store.load().context("reading snapshot")?.is_some() {
        bail!(
            "snapshot {} already exists (use --force to overwrite)",
            store.path().display()
        );
    }
    let service = FinalityOracleService::new(config, Arc::new(SystemTimeSource))
        .context("creating engine")?;
    service.persist(store).context("saving snapshot")?;
    Ok(format!(
        "initialized engine v{} at {}",
        fo_04_oracle_service::version(),
        store.path().display()
    ))
}

fn sign(key: &str, claim: &ClaimArgs) -> Result<String> {
    let signer = AttestationSigner::from_hex(key).context("parsing signing key")?;
    let signature = signer
        .sign_payload(&payload(claim))
        .context("signing attestation")?;
    Ok(format!(
        "signer    {}\nsignature {}",
        to_hex(&signer.address()),
        to_hex(&signature.to_bytes())
    ))
}

async fn run(service: &FinalityOracleService, command: Command, json: bool) -> Result<String> {
    let output = match command {
        Command::Admit {
            caller,
            address,
            stake,
        } => {
            let cap = service.authorize(&caller)?;
            let oracle = service.admit_oracle(&cap, address, stake).await?;
            format!("admitted\n{}", describe_oracle(&oracle))
        }
        Command::Remove { caller, address } => {
            let cap = service.authorize(&caller)?;
            let oracle = service.remove_oracle(&cap, address).await?;
            format!("removed\n{}", describe_oracle(&oracle))
        }
        Command::SetParam {
            caller,
            name,
            value,
        } => {
            let cap = service.authorize(&caller)?;
            let params = match name {
                ParamName::RequiredSignatures => {
                    service
                        .set_required_signatures(&cap, small(value, "required-signatures")?)
                        .await?
                }
                ParamName::MaxOracles => {
                    service
                        .set_max_oracles(&cap, small(value, "max-oracles")?)
                        .await?
                }
                ParamName::MinStake => {
                    let (params, deactivated) = service.set_min_stake(&cap, value).await?;
                    for address in deactivated {
                        info!("Deactivated {} below new minimum stake", to_hex(&address));
                    }
                    params
                }
                ParamName::SlashingAmount => service.set_slashing_amount(&cap, value).await?,
            };
            describe_parameters(&params)
        }
        Command::Submit {
            oracle,
            claim,
            signature,
            merkle_nodes,
        } => {
            let request = SubmitAttestationRequest {
                oracle,
                tx_hash: claim.tx_hash.to_vec(),
                timestamp: claim.timestamp,
                status: fo_02_signature_verification::FinalityStatus::from(claim.status).as_u8(),
                sla_target: claim.sla_target,
                chain_id: claim.chain_id,
                confirmations: claim.confirmations,
                merkle_proof: merkle_nodes.iter().map(|node| node.to_vec()).collect(),
                signature: decode_hex(&signature).context("parsing signature")?,
            };
            let receipt = service.submit_attestation(request).await?;
            let mut out = format!("outcome   {}", receipt.outcome.as_str());
            if let Some(proof) = &receipt.state {
                let _ = write!(out, "\n{}", describe_proof(proof));
            }
            out
        }
        Command::Proof { tx_hash, chain_id } => {
            let proofs: Vec<FinalityProof> = match chain_id {
                Some(chain_id) => service
                    .query_proof_on(chain_id, tx_hash)
                    .await
                    .into_iter()
                    .collect(),
                None => service.query_proof(tx_hash).await,
            };
            if json {
                let views: Vec<ProofView> = proofs.iter().map(ProofView::from).collect();
                serde_json::to_string_pretty(&views)?
            } else if proofs.is_empty() {
                "not found".to_string()
            } else {
                proofs
                    .iter()
                    .map(describe_proof)
                    .collect::<Vec<_>>()
                    .join("\n\n")
            }
        }
        Command::Finalized { tx_hash } => service.query_finalized(tx_hash).await.to_string(),
        Command::Oracles => {
            let active = service.list_active_oracles().await;
            if json {
                let mut views = Vec::with_capacity(active.len());
                for address in active {
                    if let Some(oracle) = service.get_oracle(address).await {
                        views.push(OracleView::from(&oracle));
                    }
                }
                serde_json::to_string_pretty(&views)?
            } else {
                active
                    .iter()
                    .map(|address| to_hex(address))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
        Command::Oracle { address } => match service.get_oracle(address).await {
            Some(oracle) if json => serde_json::to_string_pretty(&OracleView::from(&oracle))?,
            Some(oracle) => describe_oracle(&oracle),
            None if json => "null".to_string(),
            None => "not found".to_string(),
        },
        Command::Init { .. } | Command::Sign { .. } => {
            bail!("command does not run against a loaded engine")
        }
    };
    Ok(output)
}

fn payload(claim: &ClaimArgs) -> AttestationPayload {
    AttestationPayload {
        tx_hash: claim.tx_hash,
        timestamp: claim.timestamp,
        status: claim.status.into(),
        sla_target: claim.sla_target,
        chain_id: claim.chain_id,
        confirmations: claim.confirmations,
    }
}

fn small(value: u128, name: &str) -> Result<u32> {
    u32::try_from(value).with_context(|| format!("{} must fit in 32 bits", name))
}

fn describe_oracle(oracle: &Oracle) -> String {
    format!(
        "address    {}\nstake      {} wei\nactive     {}\nreputation {}",
        to_hex(&oracle.address),
        oracle.stake,
        oracle.is_active,
        oracle.reputation
    )
}

fn describe_parameters(params: &Parameters) -> String {
    format!(
        "required_signatures {}\nmax_oracles         {}\nmin_stake           {} wei\nslashing_amount     {} wei",
        params.required_signatures, params.max_oracles, params.min_stake, params.slashing_amount
    )
}

fn describe_proof(proof: &FinalityProof) -> String {
    let mut out = format!(
        "chain {} tx {}\nstatus        {:?}\nconfirmations {} (sla {})\nattestations  {}\nconflicts     {}",
        proof.chain_id,
        to_hex(&proof.tx_hash),
        proof.status,
        proof.confirmations,
        proof.sla_target,
        proof.attestations.len(),
        proof.conflicts.len()
    );
    if let Some(at) = proof.finalized_at {
        let _ = write!(out, "\nfinalized_at  {}", at);
    }
    out
}
