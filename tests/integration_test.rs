use serde_json::json;
use solana_wallet_delta::export::{save_report, ExportFormat};
use solana_wallet_delta::{build_report, MissingWalletPolicy, ReportConfig, ReportError};
use tempfile::tempdir;
use wiremock::matchers::{body_partial_json, body_string_contains, method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WALLET: &str = "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM";

/// Mock getSignaturesForAddress returning the given signatures
async fn mock_signatures(server: &MockServer, signatures: &[&str]) {
    let result: Vec<_> = signatures
        .iter()
        .enumerate()
        .map(|(i, sig)| json!({ "signature": sig, "slot": 1000 - i, "err": null, "memo": null }))
        .collect();

    Mock::given(method("POST"))
        .and(query_param("api-key", "integration-key"))
        .and(body_string_contains("getSignaturesForAddress"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "result": result,
            "id": 1
        })))
        .mount(server)
        .await;
}

/// Mock getTransaction for one signature
async fn mock_transaction(server: &MockServer, signature: &str, keys: &[&str], pre: &[u64], post: &[u64], block_time: i64) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "getTransaction", "params": [signature] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "result": {
                "slot": 1000,
                "blockTime": block_time,
                "transaction": {
                    "signatures": [signature],
                    "message": {
                        "accountKeys": keys,
                        "instructions": [],
                        "recentBlockhash": "11111111111111111111111111111111"
                    }
                },
                "meta": {
                    "err": null,
                    "status": { "Ok": null },
                    "fee": 5000,
                    "preBalances": pre,
                    "postBalances": post,
                    "innerInstructions": [],
                    "logMessages": [],
                    "preTokenBalances": [],
                    "postTokenBalances": [],
                    "rewards": []
                },
                "version": 0
            },
            "id": 1
        })))
        .mount(server)
        .await;
}

fn config_for(server: &MockServer) -> ReportConfig {
    ReportConfig::builder()
        .with_api_key("integration-key")
        .with_rpc(format!("{}/", server.uri()))
        .with_limit(3)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_report_skips_failed_detail_fetch() {
    let server = MockServer::start().await;
    mock_signatures(&server, &["sig-1", "sig-2", "sig-3"]).await;
    mock_transaction(&server, "sig-1", &[WALLET, "B"], &[2_000_000_000, 0], &[1_000_000_000, 999_995_000], 1700000200).await;
    mock_transaction(&server, "sig-2", &["A", WALLET], &[0, 0], &[0, 250_000_000], 1700000100).await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "getTransaction", "params": ["sig-3"] })))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let report = build_report(WALLET, &config_for(&server)).await.unwrap();

    assert_eq!(report.len(), 2);
    assert_eq!(report.times(), vec![Some(1700000200), Some(1700000100)]);
    assert_eq!(report.wallet_deltas(), vec![-1.0, 0.25]);

    let dir = tempdir().unwrap();
    let path = dir.path().join("report.csv");
    save_report(&report, &path, ExportFormat::Csv).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines, vec!["Time,Wallet Delta", "1700000200,-1.0", "1700000100,0.25"]);
}

#[tokio::test]
async fn test_report_empty_when_signature_fetch_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let report = build_report(WALLET, &config_for(&server)).await.unwrap();

    assert!(report.is_empty());
    assert_eq!(report.columns(), ["Time", "Wallet Delta"]);
}

#[tokio::test]
async fn test_report_aborts_when_wallet_missing() {
    let server = MockServer::start().await;
    mock_signatures(&server, &["sig-1"]).await;
    mock_transaction(&server, "sig-1", &["A", "B"], &[1, 2], &[1, 2], 1700000000).await;

    let result = build_report(WALLET, &config_for(&server)).await;
    assert!(matches!(result, Err(ReportError::WalletNotFound { .. })));
}

#[tokio::test]
async fn test_report_skip_policy_with_concurrency() {
    let server = MockServer::start().await;
    mock_signatures(&server, &["sig-1", "sig-2", "sig-3"]).await;
    mock_transaction(&server, "sig-1", &[WALLET], &[10], &[20], 3).await;
    mock_transaction(&server, "sig-2", &["A"], &[10], &[20], 2).await;
    mock_transaction(&server, "sig-3", &[WALLET], &[20], &[10], 1).await;

    let config = ReportConfig::builder()
        .with_api_key("integration-key")
        .with_rpc(format!("{}/", server.uri()))
        .with_concurrency(3)
        .with_missing_wallet_policy(MissingWalletPolicy::Skip)
        .build()
        .unwrap();

    let report = build_report(WALLET, &config).await.unwrap();

    assert_eq!(report.times(), vec![Some(3), Some(1)]);
    assert_eq!(report.rows.iter().map(|r| r.delta_lamports).collect::<Vec<_>>(), vec![10, -10]);
}
