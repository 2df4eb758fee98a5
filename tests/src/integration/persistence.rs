//! # Snapshot Persistence Tests
//!
//! Engine state written through `FileSnapshotStore` and restored into a new
//! engine, plus snapshots that must be refused.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use fo_02_signature_verification::FinalityStatus;
    use fo_03_attestation_ledger::SubmissionOutcome;
    use fo_04_oracle_service::{
        FileSnapshotStore, FinalityOracleApi, FinalityOracleService, OracleAdminApi,
        ServiceError, Snapshot, SnapshotError, SnapshotStore, SNAPSHOT_VERSION,
    };
    use shared_types::{milli_ether, FixedTimeSource};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn reopen(store: &FileSnapshotStore) -> Result<FinalityOracleService, ServiceError> {
        FinalityOracleService::open(
            &engine_config(),
            store,
            Arc::new(FixedTimeSource::new(GENESIS_TIME)),
        )
    }

    #[tokio::test]
    async fn test_file_round_trip_preserves_everything() {
        let dir = TempDir::new().unwrap();
        let store = FileSnapshotStore::new(dir.path().join("nested/engine.bin"));
        let (service, _) = engine();
        let oracles = signers(4);
        admit(&service, &oracles, TWO_ETH).await;
        let cap = service.authorize(&OWNER).unwrap();
        service.set_required_signatures(&cap, 2).await.unwrap();

        // One finalized key, one pending key with a conflict on it.
        service.submit_attestation(request(&oracles[0], &payload(15))).await.unwrap();
        service.submit_attestation(request(&oracles[1], &payload(15))).await.unwrap();
        let other = payload_for([0x21; 32], 1, 15);
        service.submit_attestation(request(&oracles[2], &other)).await.unwrap();
        service
            .submit_attestation(request(&oracles[2], &payload_for([0x21; 32], 1, 16)))
            .await
            .unwrap();
        service.remove_oracle(&cap, oracles[3].address()).await.unwrap();
        service.persist(&store).unwrap();

        let restored = reopen(&store).unwrap();
        assert_eq!(restored.snapshot(), service.snapshot());
        assert_eq!(restored.parameters().await.required_signatures, 2);
        assert!(restored.verify_finality(1, TX).await);
        assert!(!restored.verify_finality(1, [0x21; 32]).await);
        assert_eq!(restored.list_active_oracles().await.len(), 3);
        assert!(restored
            .ledger()
            .has_unresolved_conflicts(&oracles[2].address()));

        // Evidence already acted on is not slashed again after restart.
        let receipt = restored
            .submit_attestation(request(&oracles[2], &payload_for([0x21; 32], 1, 16)))
            .await
            .unwrap();
        assert_eq!(receipt.outcome, SubmissionOutcome::Conflict { slashed: false });
        assert_eq!(
            restored.get_oracle(oracles[2].address()).await.unwrap().stake,
            milli_ether(1_900)
        );

        // The restored owner keeps control; capabilities from the old engine do not.
        assert!(restored.set_required_signatures(&cap, 3).await.is_err());
        let new_cap = restored.authorize(&OWNER).unwrap();
        assert!(restored.set_required_signatures(&new_cap, 3).await.is_ok());
    }

    #[tokio::test]
    async fn test_restored_engine_finalizes_pending_keys() {
        let dir = TempDir::new().unwrap();
        let store = FileSnapshotStore::new(dir.path().join("engine.bin"));
        let (service, _) = engine();
        let oracles = signers(3);
        admit(&service, &oracles, TWO_ETH).await;
        for oracle in &oracles[..2] {
            service.submit_attestation(request(oracle, &payload(15))).await.unwrap();
        }
        service.persist(&store).unwrap();
        drop(service);

        let restored = reopen(&store).unwrap();
        let receipt = restored
            .submit_attestation(request(&oracles[2], &payload(15)))
            .await
            .unwrap();
        assert!(receipt.is_finalized());
        let proof = restored.query_proof_on(1, TX).await.unwrap();
        assert_eq!(proof.status, FinalityStatus::Finalized);
        let seqs: Vec<u32> = proof.attestations.iter().map(|a| a.seq).collect();
        assert_eq!(seqs, vec![0, 1, 2]);
    }

    #[test]
    fn test_missing_file_opens_empty_engine() {
        let dir = TempDir::new().unwrap();
        let store = FileSnapshotStore::new(dir.path().join("absent.bin"));
        let service = reopen(&store).unwrap();
        assert_eq!(service.snapshot().oracles.len(), 0);
    }

    #[test]
    fn test_corrupt_file_is_refused() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("engine.bin");
        std::fs::write(&path, b"not a snapshot").unwrap();

        let result = reopen(&FileSnapshotStore::new(&path));
        assert!(matches!(result, Err(ServiceError::Snapshot(_))));
    }

    #[tokio::test]
    async fn test_snapshot_violating_invariants_is_refused() {
        let (service, _) = engine();
        let oracles = signers(3);
        admit(&service, &oracles, TWO_ETH).await;
        for oracle in &oracles {
            service.submit_attestation(request(oracle, &payload(15))).await.unwrap();
        }
        let good = service.snapshot();
        let time = || Arc::new(FixedTimeSource::new(GENESIS_TIME));

        // Finalized claim that no attestation group backs.
        let mut bad: Snapshot = good.clone();
        bad.proofs[0].confirmations = 99;
        let result = FinalityOracleService::from_snapshot(&engine_config(), bad, time());
        assert!(matches!(
            result,
            Err(ServiceError::Snapshot(SnapshotError::Invariant(_)))
        ));

        // Attestation from an oracle the registry never admitted.
        let mut bad = good.clone();
        bad.oracles.remove(0);
        let result = FinalityOracleService::from_snapshot(&engine_config(), bad, time());
        assert!(matches!(
            result,
            Err(ServiceError::Snapshot(SnapshotError::Invariant(_)))
        ));

        let mut bad = good;
        bad.version = SNAPSHOT_VERSION + 1;
        let result = FinalityOracleService::from_snapshot(&engine_config(), bad, time());
        assert!(matches!(
            result,
            Err(ServiceError::Snapshot(SnapshotError::UnsupportedVersion { .. }))
        ));
    }

    #[tokio::test]
    async fn test_save_replaces_previous_snapshot() {
        let dir = TempDir::new().unwrap();
        let store = FileSnapshotStore::new(dir.path().join("engine.bin"));
        let (first, _) = engine();
        first.persist(&store).unwrap();

        let (second, _) = engine();
        let cap = second.authorize(&OWNER).unwrap();
        second.set_max_oracles(&cap, 5).await.unwrap();
        second.persist(&store).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.parameters.max_oracles, 5);
    }
}
