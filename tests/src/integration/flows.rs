//! # Integration Test Flows
//!
//! Attestation lifecycles through `FinalityOracleApi` and `OracleAdminApi`:
//!
//! 1. **Quorum**: three identical claims finalize, a split stays pending
//! 2. **Misbehaviour**: conflicts, signature replays and dissent are slashed once
//! 3. **Stake economics**: slashing below the minimum deactivates
//! 4. **Administration**: owner gating, parameter changes at check time

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use fo_01_oracle_registry::MisbehaviorReason;
    use fo_02_signature_verification::FinalityStatus;
    use fo_03_attestation_ledger::SubmissionOutcome;
    use fo_04_oracle_service::{
        AdmissionError, FinalityOracleApi, OracleAdminApi, SubmissionError,
    };
    use shared_types::milli_ether;

    // =============================================================================
    // QUORUM
    // =============================================================================

    #[tokio::test]
    async fn test_three_identical_attestations_finalize() {
        let (service, _) = engine();
        let oracles = signers(3);
        admit(&service, &oracles, TWO_ETH).await;
        let claim = payload(15);

        for (i, oracle) in oracles.iter().enumerate() {
            let receipt = service.submit_attestation(request(oracle, &claim)).await.unwrap();
            assert_eq!(receipt.outcome, SubmissionOutcome::Accepted);
            assert_eq!(receipt.is_finalized(), i == 2);
        }

        let proof = service.query_proof_on(1, TX).await.unwrap();
        assert_eq!(proof.status, FinalityStatus::Finalized);
        assert_eq!(proof.timestamp, 1_000);
        assert_eq!(proof.sla_target, 12);
        assert_eq!(proof.confirmations, 15);
        assert_eq!(proof.finalized_at, Some(GENESIS_TIME));
        assert!(service.query_finalized(TX).await);
    }

    #[tokio::test]
    async fn test_split_vote_stays_pending_then_dissenter_is_slashed() {
        let (service, _) = engine();
        let oracles = signers(4);
        admit(&service, &oracles, TWO_ETH).await;

        service.submit_attestation(request(&oracles[0], &payload(15))).await.unwrap();
        service.submit_attestation(request(&oracles[1], &payload(15))).await.unwrap();
        let receipt = service
            .submit_attestation(request(&oracles[2], &payload(16)))
            .await
            .unwrap();

        assert!(!receipt.is_finalized());
        assert!(!service.verify_finality(1, TX).await);
        let dissenter = oracles[2].address();
        assert_eq!(service.get_oracle(dissenter).await.unwrap().stake, TWO_ETH);

        // A fourth consistent claim closes the quorum and exposes the dissent.
        let receipt = service
            .submit_attestation(request(&oracles[3], &payload(15)))
            .await
            .unwrap();
        assert!(receipt.is_finalized());

        let dissenter_state = service.get_oracle(dissenter).await.unwrap();
        assert_eq!(dissenter_state.stake, milli_ether(1_900));
        assert!(dissenter_state.is_active);

        let log = service.slash_log();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].oracle, dissenter);
        assert_eq!(log[0].reason, MisbehaviorReason::InconsistentWithQuorum);
    }

    #[tokio::test]
    async fn test_pending_claims_never_finalize() {
        let (service, _) = engine();
        let oracles = signers(3);
        admit(&service, &oracles, TWO_ETH).await;
        let mut claim = payload(3);
        claim.status = FinalityStatus::Pending;

        for oracle in &oracles {
            service.submit_attestation(request(oracle, &claim)).await.unwrap();
        }

        let proof = service.query_proof_on(1, TX).await.unwrap();
        assert_eq!(proof.attestations.len(), 3);
        assert_eq!(proof.status, FinalityStatus::Pending);
        assert_eq!(proof.finalized_at, None);
    }

    #[tokio::test]
    async fn test_finalized_proof_is_frozen() {
        let (service, clock) = engine();
        let oracles = signers(4);
        admit(&service, &oracles, TWO_ETH).await;
        for oracle in &oracles[..3] {
            service.submit_attestation(request(oracle, &payload(15))).await.unwrap();
        }
        let frozen = service.query_proof_on(1, TX).await.unwrap();

        clock.advance(60);
        let receipt = service
            .submit_attestation(request(&oracles[3], &payload(99)))
            .await
            .unwrap();
        assert_eq!(receipt.outcome, SubmissionOutcome::AlreadyFinalized);
        let receipt = service
            .submit_attestation(request(&oracles[0], &payload(15)))
            .await
            .unwrap();
        assert_eq!(receipt.outcome, SubmissionOutcome::AlreadyFinalized);

        assert_eq!(service.query_proof_on(1, TX).await.unwrap(), frozen);
        assert!(service.slash_log().is_empty());
    }

    #[tokio::test]
    async fn test_chains_are_independent_keys() {
        let (service, _) = engine();
        let oracles = signers(3);
        admit(&service, &oracles, TWO_ETH).await;

        for oracle in &oracles {
            service.submit_attestation(request(oracle, &payload(15))).await.unwrap();
        }
        service
            .submit_attestation(request(&oracles[0], &payload_for(TX, 5, 15)))
            .await
            .unwrap();

        let proofs = service.query_proof(TX).await;
        assert_eq!(proofs.len(), 2);
        assert_eq!((proofs[0].chain_id, proofs[1].chain_id), (1, 5));
        assert!(service.verify_finality(1, TX).await);
        assert!(!service.verify_finality(5, TX).await);
        assert!(service.slash_log().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_keys_are_not_found() {
        let (service, _) = engine();
        assert!(service.query_proof([0x99; 32]).await.is_empty());
        assert!(service.query_proof_on(1, [0x99; 32]).await.is_none());
        assert!(!service.query_finalized([0x99; 32]).await);
        assert!(service.get_oracle([0x99; 20]).await.is_none());
    }

    // =============================================================================
    // MISBEHAVIOUR
    // =============================================================================

    #[tokio::test]
    async fn test_duplicate_submission_is_noop() {
        let (service, clock) = engine();
        let oracles = signers(1);
        admit(&service, &oracles, TWO_ETH).await;
        service.submit_attestation(request(&oracles[0], &payload(15))).await.unwrap();
        let before = service.snapshot();

        clock.advance(5);
        let receipt = service
            .submit_attestation(request(&oracles[0], &payload(15)))
            .await
            .unwrap();

        assert_eq!(receipt.outcome, SubmissionOutcome::Duplicate);
        assert_eq!(service.snapshot(), before);
    }

    #[tokio::test]
    async fn test_conflict_is_not_counted_and_slashed_once() {
        let (service, _) = engine();
        let oracles = signers(3);
        admit(&service, &oracles, TWO_ETH).await;
        let liar = &oracles[0];

        service.submit_attestation(request(liar, &payload(15))).await.unwrap();
        let first = service
            .submit_attestation(request(liar, &payload(20)))
            .await
            .unwrap();
        let again = service
            .submit_attestation(request(liar, &payload(20)))
            .await
            .unwrap();

        assert_eq!(first.outcome, SubmissionOutcome::Conflict { slashed: true });
        assert_eq!(again.outcome, SubmissionOutcome::Conflict { slashed: false });

        let proof = service.query_proof_on(1, TX).await.unwrap();
        assert_eq!(proof.attestations.len(), 1);
        assert_eq!(proof.consistent_count(), 1);
        assert_eq!(proof.conflicts.len(), 1);

        let log = service.slash_log();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].reason, MisbehaviorReason::ConflictingAttestation);
        let state = service.get_oracle(liar.address()).await.unwrap();
        assert_eq!(state.stake, milli_ether(1_900));
        assert_eq!(state.reputation, 100 + 1 - 50);
    }

    #[tokio::test]
    async fn test_replayed_signature_slashes_submitter() {
        let (service, _) = engine();
        let oracles = signers(2);
        admit(&service, &oracles, TWO_ETH).await;
        let (honest, thief) = (&oracles[0], &oracles[1]);

        let receipt = service
            .submit_attestation(request_as(thief.address(), honest, &payload(15)))
            .await
            .unwrap();

        assert_eq!(receipt.outcome, SubmissionOutcome::SignatureReplay { slashed: true });
        assert!(service.query_proof(TX).await.is_empty());
        assert_eq!(
            service.get_oracle(thief.address()).await.unwrap().stake,
            milli_ether(1_900)
        );
        assert_eq!(service.get_oracle(honest.address()).await.unwrap().stake, TWO_ETH);
    }

    #[tokio::test]
    async fn test_rejected_submissions_have_no_side_effects() {
        let (service, _) = engine();
        let oracles = signers(1);
        admit(&service, &oracles, TWO_ETH).await;
        let stranger = &random_signers(1)[0];
        let before = service.snapshot();

        let result = service.submit_attestation(request(stranger, &payload(15))).await;
        assert_eq!(
            result,
            Err(SubmissionError::OracleNotActive { oracle: stranger.address() })
        );

        let result = service
            .submit_attestation(request_as(oracles[0].address(), stranger, &payload(15)))
            .await;
        assert_eq!(
            result,
            Err(SubmissionError::BadSignature { oracle: oracles[0].address() })
        );

        let mut bad = request(&oracles[0], &payload(15));
        bad.tx_hash.truncate(31);
        let result = service.submit_attestation(bad).await;
        assert!(matches!(
            result,
            Err(SubmissionError::InvalidArgument { field: "tx_hash", .. })
        ));

        let mut bad = request(&oracles[0], &payload(15));
        bad.merkle_proof = vec![vec![0u8; 32]];
        let result = service.submit_attestation(bad).await;
        assert!(matches!(result, Err(SubmissionError::MalformedProof { .. })));

        assert_eq!(service.snapshot(), before);
    }

    // =============================================================================
    // STAKE ECONOMICS
    // =============================================================================

    #[tokio::test]
    async fn test_slash_below_minimum_deactivates() {
        let (service, _) = engine();
        let oracles = signers(1);
        admit(&service, &oracles, TWO_ETH).await;
        let cap = service.authorize(&OWNER).unwrap();
        service
            .set_slashing_amount(&cap, milli_ether(1_500))
            .await
            .unwrap();
        let oracle = &oracles[0];

        service.submit_attestation(request(oracle, &payload(15))).await.unwrap();
        service.submit_attestation(request(oracle, &payload(16))).await.unwrap();

        let state = service.get_oracle(oracle.address()).await.unwrap();
        assert_eq!(state.stake, milli_ether(500));
        assert!(!state.is_active);
        assert!(service.list_active_oracles().await.is_empty());
        assert!(service.slash_log()[0].deactivated);

        // The attestation recorded while active is kept.
        assert_eq!(service.query_proof_on(1, TX).await.unwrap().attestations.len(), 1);

        let result = service.submit_attestation(request(oracle, &payload_for([1; 32], 1, 15))).await;
        assert!(matches!(result, Err(SubmissionError::OracleNotActive { .. })));
    }

    #[tokio::test]
    async fn test_raising_min_stake_deactivates_underbonded() {
        let (service, _) = engine();
        let oracles = signers(2);
        admit(&service, &oracles[..1], milli_ether(1_500)).await;
        admit(&service, &oracles[1..], milli_ether(3_000)).await;
        let cap = service.authorize(&OWNER).unwrap();

        let (params, deactivated) = service
            .set_min_stake(&cap, milli_ether(2_000))
            .await
            .unwrap();

        assert_eq!(params.min_stake, milli_ether(2_000));
        assert_eq!(deactivated, vec![oracles[0].address()]);
        assert_eq!(service.list_active_oracles().await, vec![oracles[1].address()]);
    }

    #[tokio::test]
    async fn test_missed_sla_lowers_reputation_of_quorum() {
        let (service, _) = engine();
        let oracles = signers(3);
        admit(&service, &oracles, TWO_ETH).await;

        for oracle in &oracles {
            service.submit_attestation(request(oracle, &payload(10))).await.unwrap();
        }

        assert!(service.verify_finality(1, TX).await);
        for oracle in &oracles {
            let state = service.get_oracle(oracle.address()).await.unwrap();
            assert_eq!(state.reputation, 100 + 1 - 10);
            assert_eq!(state.stake, TWO_ETH);
        }
    }

    // =============================================================================
    // ADMINISTRATION
    // =============================================================================

    #[tokio::test]
    async fn test_capacity_and_admission_order() {
        let (service, _) = engine();
        let cap = service.authorize(&OWNER).unwrap();
        service.set_max_oracles(&cap, 3).await.unwrap();
        let oracles = signers(4);

        admit(&service, &oracles[..3], TWO_ETH).await;
        let result = service.admit_oracle(&cap, oracles[3].address(), TWO_ETH).await;
        assert_eq!(result, Err(AdmissionError::CapacityExceeded { max: 3 }));

        let result = service.admit_oracle(&cap, oracles[0].address(), TWO_ETH).await;
        assert!(matches!(result, Err(AdmissionError::AlreadyRegistered { .. })));

        // Removing frees a slot; re-admission keeps the original listing position.
        service.remove_oracle(&cap, oracles[0].address()).await.unwrap();
        service.admit_oracle(&cap, oracles[3].address(), TWO_ETH).await.unwrap();
        assert!(service
            .admit_oracle(&cap, oracles[0].address(), TWO_ETH)
            .await
            .is_err());
        service.remove_oracle(&cap, oracles[3].address()).await.unwrap();
        service.admit_oracle(&cap, oracles[0].address(), TWO_ETH).await.unwrap();

        let expected: Vec<_> = oracles[..3].iter().map(|s| s.address()).collect();
        assert_eq!(service.list_active_oracles().await, expected);
    }

    #[tokio::test]
    async fn test_insufficient_stake_rejected() {
        let (service, _) = engine();
        let cap = service.authorize(&OWNER).unwrap();
        let result = service
            .admit_oracle(&cap, signers(1)[0].address(), milli_ether(999))
            .await;
        assert_eq!(
            result,
            Err(AdmissionError::InsufficientStake {
                stake: milli_ether(999),
                min: milli_ether(1_000),
            })
        );
    }

    #[tokio::test]
    async fn test_only_owner_administers() {
        let (service, _) = engine();
        let intruder = signers(1)[0].address();
        assert_eq!(
            service.authorize(&intruder),
            Err(AdmissionError::Unauthorized { caller: intruder })
        );

        let (other, _) = engine();
        let foreign_cap = other.authorize(&OWNER).unwrap();
        let result = service.set_required_signatures(&foreign_cap, 1).await;
        assert!(matches!(result, Err(AdmissionError::Unauthorized { .. })));
        assert_eq!(service.parameters().await.required_signatures, 3);
    }

    #[tokio::test]
    async fn test_required_signatures_read_at_check_time() {
        let (service, _) = engine();
        let oracles = signers(4);
        admit(&service, &oracles, TWO_ETH).await;
        let cap = service.authorize(&OWNER).unwrap();

        service.submit_attestation(request(&oracles[0], &payload(15))).await.unwrap();
        service.submit_attestation(request(&oracles[1], &payload(15))).await.unwrap();
        service.set_required_signatures(&cap, 4).await.unwrap();

        let receipt = service
            .submit_attestation(request(&oracles[2], &payload(15)))
            .await
            .unwrap();
        assert!(!receipt.is_finalized());

        // Lowering does not finalize retroactively; the next submission checks.
        service.set_required_signatures(&cap, 3).await.unwrap();
        assert!(!service.verify_finality(1, TX).await);
        let receipt = service
            .submit_attestation(request(&oracles[3], &payload(15)))
            .await
            .unwrap();
        assert!(receipt.is_finalized());
    }

    #[tokio::test]
    async fn test_remove_waits_for_conflicts_to_resolve() {
        let (service, _) = engine();
        let oracles = signers(3);
        admit(&service, &oracles, TWO_ETH).await;
        let cap = service.authorize(&OWNER).unwrap();

        service.submit_attestation(request(&oracles[0], &payload(15))).await.unwrap();
        service.submit_attestation(request(&oracles[0], &payload(16))).await.unwrap();
        let result = service.remove_oracle(&cap, oracles[0].address()).await;
        assert!(matches!(
            result,
            Err(AdmissionError::OracleHasUnresolvedConflicts { pending: 1, .. })
        ));

        for oracle in &oracles[1..] {
            service.submit_attestation(request(oracle, &payload(15))).await.unwrap();
        }
        assert!(service.remove_oracle(&cap, oracles[0].address()).await.is_ok());
    }
}
