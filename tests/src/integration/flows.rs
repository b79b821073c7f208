//! # Lifecycle Flows
//!
//! Instantiate, transfer, query and delete through the peer simulator.
//!
//! ## Properties checked
//!
//! - A rejected transaction leaves committed state untouched
//! - Each transfer leg applies its own amount
//! - Query reads back exactly what init or invoke committed
//! - Unknown functions follow the configured policy

#[cfg(test)]
mod tests {
    use super::super::fixtures::{balance, funded_peer, peer, peer_with, request};
    use asset_transfer::prelude::*;

    // =============================================================================
    // INIT
    // =============================================================================

    #[tokio::test]
    async fn test_instantiate_seeds_both_accounts() {
        let peer = peer();
        let outcome = peer
            .instantiate(request("init", &["a", "100", "b", "200"]))
            .await;

        assert_eq!(outcome.response, Response::success_empty());
        assert!(outcome.committed);
        assert_eq!(outcome.writes, 2);
        assert_eq!(balance(&peer, "a").as_deref(), Some("100"));
        assert_eq!(balance(&peer, "b").as_deref(), Some("200"));
    }

    #[tokio::test]
    async fn test_instantiate_wrong_arity_commits_nothing() {
        let peer = peer();
        let outcome = peer.instantiate(request("init", &["a", "100", "b"])).await;

        assert_eq!(
            outcome.response.message(),
            Some("Incorrect number of arguments. Expecting 4")
        );
        assert!(!outcome.committed);
        assert_eq!(outcome.writes, 0);
        assert!(peer.state().is_empty());
    }

    #[tokio::test]
    async fn test_instantiate_rejects_non_numeric_holding() {
        let peer = peer();
        let outcome = peer
            .instantiate(request("init", &["a", "lots", "b", "200"]))
            .await;

        assert_eq!(
            outcome.response.message(),
            Some("Expecting number value for asset holding")
        );
        assert!(peer.state().is_empty());
    }

    #[tokio::test]
    async fn test_instantiate_rejects_empty_key() {
        let peer = peer();
        let outcome = peer.instantiate(request("init", &["", "1", "b", "2"])).await;

        assert!(!outcome.response.is_success());
        assert!(peer.state().is_empty());
    }

    #[tokio::test]
    async fn test_instantiate_accepts_zero_holding() {
        let peer = peer();
        let outcome = peer.instantiate(request("init", &["a", "0", "b", "5"])).await;

        assert!(outcome.committed);
        assert_eq!(balance(&peer, "a").as_deref(), Some("0"));
    }

    // =============================================================================
    // TRANSFER
    // =============================================================================

    #[tokio::test]
    async fn test_transfer_updates_both_legs() {
        for mode in [WriteMode::Buffered, WriteMode::Direct] {
            let peer = funded_peer(ChaincodeConfig::default().with_write_mode(mode)).await;
            let outcome = peer.submit(request("invoke", &["a", "10", "b", "10"])).await;

            assert_eq!(outcome.response, Response::success_empty());
            assert!(outcome.committed);
            assert_eq!(balance(&peer, "a").as_deref(), Some("90"));
            assert_eq!(balance(&peer, "b").as_deref(), Some("60"));
        }
    }

    #[tokio::test]
    async fn test_transfer_legs_use_independent_amounts() {
        let peer = funded_peer(ChaincodeConfig::default()).await;
        peer.submit(request("invoke", &["a", "30", "b", "5"])).await;

        assert_eq!(balance(&peer, "a").as_deref(), Some("70"));
        assert_eq!(balance(&peer, "b").as_deref(), Some("55"));
    }

    #[tokio::test]
    async fn test_transfer_may_overdraw() {
        let peer = funded_peer(ChaincodeConfig::default()).await;
        let outcome = peer.submit(request("invoke", &["b", "75", "a", "75"])).await;

        assert!(outcome.committed);
        assert_eq!(balance(&peer, "b").as_deref(), Some("-25"));
        assert_eq!(balance(&peer, "a").as_deref(), Some("175"));
    }

    #[tokio::test]
    async fn test_transfer_wrong_arity() {
        let peer = funded_peer(ChaincodeConfig::default()).await;
        let outcome = peer.submit(request("invoke", &["a", "10", "b"])).await;

        assert_eq!(
            outcome.response.message(),
            Some("Incorrect number of arguments. Expecting 4")
        );
        assert!(!outcome.committed);
    }

    #[tokio::test]
    async fn test_transfer_zero_and_text_amounts_rejected_alike() {
        let peer = funded_peer(ChaincodeConfig::default()).await;
        let before = peer.state().snapshot();

        for amount in ["0", "ten", "", "1.5", " 10", "10abc", "1e3"] {
            let outcome = peer.submit(request("invoke", &["a", amount, "b", "10"])).await;
            assert_eq!(
                outcome.response.message(),
                Some("Transfer values must not be empty"),
                "amount {amount:?}"
            );
            assert!(!outcome.committed);
        }
        assert_eq!(peer.state().snapshot(), before);
    }

    #[tokio::test]
    async fn test_transfer_zero_amount_when_allowed() {
        let peer = funded_peer(ChaincodeConfig::default().with_zero_amounts(true)).await;
        let outcome = peer.submit(request("invoke", &["a", "0", "b", "0"])).await;

        assert!(outcome.committed);
        assert_eq!(balance(&peer, "a").as_deref(), Some("100"));
        assert_eq!(balance(&peer, "b").as_deref(), Some("50"));
    }

    #[tokio::test]
    async fn test_transfer_missing_account() {
        let peer = funded_peer(ChaincodeConfig::default()).await;

        let outcome = peer.submit(request("invoke", &["ghost", "1", "b", "1"])).await;
        assert_eq!(
            outcome.response.message(),
            Some("Failed to get state of asset holder ghost")
        );
        let outcome = peer.submit(request("invoke", &["a", "1", "ghost", "1"])).await;
        assert_eq!(
            outcome.response.message(),
            Some("Failed to get state of asset holder ghost")
        );

        assert_eq!(balance(&peer, "a").as_deref(), Some("100"));
        assert_eq!(balance(&peer, "b").as_deref(), Some("50"));
    }

    #[tokio::test]
    async fn test_transfer_corrupt_stored_balance() {
        let peer = funded_peer(ChaincodeConfig::default()).await;
        peer.state().seed("b", b"fifty".to_vec());

        let outcome = peer.submit(request("invoke", &["a", "1", "b", "1"])).await;
        assert!(!outcome.response.is_success());
        assert!(!outcome.committed);
        assert_eq!(balance(&peer, "a").as_deref(), Some("100"));
    }

    #[tokio::test]
    async fn test_partial_write_never_committed() {
        for mode in [WriteMode::Buffered, WriteMode::Direct] {
            let peer = funded_peer(ChaincodeConfig::default().with_write_mode(mode)).await;
            let writes_before = peer.state().write_count();
            peer.state().fail_next_write("b", "endorsement conflict");

            let outcome = peer.submit(request("invoke", &["a", "10", "b", "10"])).await;

            assert!(!outcome.response.is_success());
            assert!(!outcome.committed);
            // The debit reached the transaction write set but not the world state.
            assert_eq!(outcome.writes, 1);
            assert_eq!(balance(&peer, "a").as_deref(), Some("100"));
            assert_eq!(balance(&peer, "b").as_deref(), Some("50"));
            assert_eq!(peer.state().write_count(), writes_before);
        }
    }

    // =============================================================================
    // QUERY AND DELETE
    // =============================================================================

    #[tokio::test]
    async fn test_query_reads_committed_balance() {
        let peer = funded_peer(ChaincodeConfig::default()).await;
        peer.submit(request("invoke", &["a", "10", "b", "10"])).await;

        let outcome = peer.submit(request("query", &["b"])).await;
        assert_eq!(outcome.response.payload(), Some(&b"60"[..]));
        assert_eq!(outcome.writes, 0);
    }

    #[tokio::test]
    async fn test_query_wrong_arity() {
        let peer = funded_peer(ChaincodeConfig::default()).await;
        let outcome = peer.submit(request("query", &[])).await;

        assert_eq!(
            outcome.response.message(),
            Some("Incorrect number of arguments. Expecting name of the person to query")
        );
    }

    #[tokio::test]
    async fn test_query_after_delete_fails() {
        let peer = funded_peer(ChaincodeConfig::default()).await;

        let outcome = peer.submit(request("delete", &["a"])).await;
        assert_eq!(outcome.response, Response::success_empty());
        assert!(outcome.committed);
        assert!(!peer.state().contains("a"));

        let outcome = peer.submit(request("query", &["a"])).await;
        assert_eq!(
            outcome.response.message(),
            Some(r#"{"error":"Failed to get state for a"}"#)
        );
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let peer = funded_peer(ChaincodeConfig::default()).await;

        let first = peer.submit(request("delete", &["a"])).await;
        let second = peer.submit(request("delete", &["a"])).await;

        assert!(first.committed);
        assert!(second.committed);
        assert_eq!(peer.state().len(), 1);
    }

    #[tokio::test]
    async fn test_transfer_from_deleted_account_fails() {
        let peer = funded_peer(ChaincodeConfig::default()).await;
        peer.submit(request("delete", &["a"])).await;

        let outcome = peer.submit(request("invoke", &["a", "1", "b", "1"])).await;
        assert_eq!(
            outcome.response.message(),
            Some("Failed to get state of asset holder a")
        );
        assert_eq!(balance(&peer, "b").as_deref(), Some("50"));
    }

    // =============================================================================
    // DISPATCH
    // =============================================================================

    #[tokio::test]
    async fn test_unknown_function_lenient() {
        let peer = funded_peer(ChaincodeConfig::default()).await;
        let outcome = peer.submit(request("transfer", &["a", "1", "b", "1"])).await;

        assert_eq!(outcome.response, Response::success_empty());
        assert_eq!(outcome.writes, 0);
        assert_eq!(balance(&peer, "a").as_deref(), Some("100"));
    }

    #[tokio::test]
    async fn test_unknown_function_strict() {
        let peer = funded_peer(ChaincodeConfig::strict()).await;
        let outcome = peer.submit(request("Invoke", &[])).await;

        assert_eq!(
            outcome.response.message(),
            Some("no method of name: Invoke found")
        );
        assert!(!outcome.committed);
    }

    #[tokio::test]
    async fn test_invoke_init_seeds_accounts() {
        let peer = peer_with(ChaincodeConfig::default());
        let outcome = peer.submit(request("Init", &["a", "100", "b", "200"])).await;

        assert_eq!(outcome.response, Response::success_empty());
        assert!(outcome.committed);
        assert_eq!(outcome.writes, 2);
        assert_eq!(balance(&peer, "a").as_deref(), Some("100"));
        assert_eq!(balance(&peer, "b").as_deref(), Some("200"));
    }

    #[tokio::test]
    async fn test_invoke_init_overwrites_balances() {
        let peer = funded_peer(ChaincodeConfig::default()).await;
        peer.submit(request("invoke", &["a", "10", "b", "10"])).await;

        let outcome = peer.submit(request("Init", &["a", "7", "c", "3"])).await;
        assert!(outcome.committed);
        assert_eq!(balance(&peer, "a").as_deref(), Some("7"));
        assert_eq!(balance(&peer, "b").as_deref(), Some("60"));
        assert_eq!(balance(&peer, "c").as_deref(), Some("3"));
    }

    #[tokio::test]
    async fn test_lowercase_init_is_unknown() {
        let peer = peer_with(ChaincodeConfig::strict());
        let outcome = peer.submit(request("init", &["a", "1", "b", "2"])).await;

        assert_eq!(outcome.response.message(), Some("no method of name: init found"));
        assert!(peer.state().is_empty());
    }

    #[tokio::test]
    async fn test_testing_config_round_trip() {
        let peer = funded_peer(ChaincodeConfig::for_testing()).await;

        let outcome = peer.submit(request("invoke", &["a", "40", "b", "40"])).await;
        assert!(outcome.committed);
        let outcome = peer.submit(request("query", &["a"])).await;
        assert_eq!(outcome.response.payload(), Some(&b"60"[..]));

        let outcome = peer.submit(request("qeury", &["a"])).await;
        assert!(!outcome.response.is_success());
    }

    #[tokio::test]
    async fn test_sequential_tx_ids() {
        let peer = funded_peer(ChaincodeConfig::default()).await;
        let outcome = peer.submit(request("query", &["a"])).await;
        // tx-0 was the instantiate.
        assert_eq!(outcome.tx_id, "tx-1");
    }
}
