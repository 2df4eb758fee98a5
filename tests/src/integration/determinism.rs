//! # Replay Laws
//!
//! Property tests over random attestation logs:
//! - two engines fed the same ordered log end in byte-identical state
//! - a finalized key never changes its reported claim
//! - every active oracle stays at or above the minimum stake

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use fo_02_signature_verification::{AttestationPayload, AttestationSigner, FinalityStatus};
    use fo_03_attestation_ledger::ProofKey;
    use fo_04_oracle_service::{FinalityOracleService, OracleAdminApi};
    use proptest::prelude::*;
    use shared_types::milli_ether;
    use std::collections::HashMap;

    const ORACLES: u8 = 5;

    #[derive(Clone, Debug)]
    struct Step {
        oracle: usize,
        tx: u8,
        confirmations: u64,
        finalized: bool,
        advance: u64,
    }

    fn step() -> impl Strategy<Value = Step> {
        (0..ORACLES as usize, 1..=3u8, 14..=16u64, prop::bool::weighted(0.8), 0..5u64).prop_map(
            |(oracle, tx, confirmations, finalized, advance)| Step {
                oracle,
                tx,
                confirmations,
                finalized,
                advance,
            },
        )
    }

    fn claim(step: &Step) -> AttestationPayload {
        let mut claim = payload_for([step.tx; 32], 1, step.confirmations);
        if !step.finalized {
            claim.status = FinalityStatus::Pending;
        }
        claim
    }

    /// Fresh engine with `ORACLES` oracles whose stake survives a few slashes.
    fn seeded_engine(
        signers: &[AttestationSigner],
    ) -> (FinalityOracleService, std::sync::Arc<shared_types::FixedTimeSource>) {
        let (service, clock) = engine();
        let cap = service.authorize(&OWNER).unwrap();
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        runtime.block_on(async {
            service.set_slashing_amount(&cap, milli_ether(400)).await.unwrap();
            for (i, signer) in signers.iter().enumerate() {
                let stake = milli_ether(1_000 + 500 * i as u64);
                service.admit_oracle(&cap, signer.address(), stake).await.unwrap();
            }
        });
        (service, clock)
    }

    fn replay(signers: &[AttestationSigner], log: &[Step]) -> FinalityOracleService {
        let (service, clock) = seeded_engine(signers);
        for step in log {
            clock.advance(step.advance);
            let _ = service.ledger().submit(submission(&signers[step.oracle], &claim(step)));
        }
        service
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_replays_are_byte_identical(log in prop::collection::vec(step(), 1..40)) {
            let signers = signers(ORACLES);
            let first = replay(&signers, &log);
            let second = replay(&signers, &log);

            let a = bincode::serialize(&first.snapshot()).unwrap();
            let b = bincode::serialize(&second.snapshot()).unwrap();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_finalized_claims_never_change(log in prop::collection::vec(step(), 1..40)) {
            let signers = signers(ORACLES);
            let (service, clock) = seeded_engine(&signers);
            let mut frozen: HashMap<ProofKey, AttestationPayload> = HashMap::new();

            for step in &log {
                clock.advance(step.advance);
                let _ = service.ledger().submit(submission(&signers[step.oracle], &claim(step)));

                for proof in service.ledger().all_proofs() {
                    if let Some(previous) = frozen.get(&proof.key()) {
                        prop_assert!(proof.is_finalized());
                        prop_assert_eq!(proof.reported_payload(), *previous);
                    } else if proof.is_finalized() {
                        prop_assert_eq!(proof.reported_payload().status, FinalityStatus::Finalized);
                        frozen.insert(proof.key(), proof.reported_payload());
                    }
                }
            }
        }

        #[test]
        fn prop_active_oracles_stay_bonded(log in prop::collection::vec(step(), 1..40)) {
            let signers = signers(ORACLES);
            let (service, clock) = seeded_engine(&signers);
            let min_stake = service.registry().parameters().current().min_stake;

            for step in &log {
                clock.advance(step.advance);
                let _ = service.ledger().submit(submission(&signers[step.oracle], &claim(step)));

                for oracle in service.registry().all() {
                    if oracle.is_active {
                        prop_assert!(oracle.stake >= min_stake);
                    }
                }
            }
        }
    }
}
