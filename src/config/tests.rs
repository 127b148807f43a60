#[cfg(test)]
mod tests {
    use super::super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_build_defaults() {
        let config = ReportConfig::builder().with_api_key("secret").build().unwrap();

        assert_eq!(config.endpoint.as_str(), "https://mainnet.helius-rpc.com/?api-key=secret");
        assert_eq!(config.commitment, "confirmed");
        assert_eq!(config.signature_limit, 100);
        assert_eq!(config.concurrency, 1);
        assert_eq!(config.missing_wallet_policy, MissingWalletPolicy::Fail);
    }

    #[test]
    fn test_build_requires_api_key() {
        let result = ReportConfig::builder().build();
        assert!(matches!(result, Err(ReportError::Config(_))));

        let result = ReportConfig::builder().with_api_key("   ").build();
        assert!(matches!(result, Err(ReportError::Config(_))));
    }

    #[test]
    fn test_build_accepts_key_already_in_url() {
        let config = ReportConfig::builder()
            .with_rpc("https://rpc.example.com/?api-key=inline")
            .build()
            .unwrap();

        assert_eq!(config.endpoint.query(), Some("api-key=inline"));
    }

    #[test]
    fn test_explicit_key_replaces_key_in_url() {
        let config = ReportConfig::builder()
            .with_api_key("new")
            .with_rpc("https://rpc.example.com/?cluster=mainnet&api-key=old")
            .build()
            .unwrap();

        let keys: Vec<_> = config
            .endpoint
            .query_pairs()
            .filter(|(name, _)| name == "api-key")
            .map(|(_, value)| value.into_owned())
            .collect();
        assert_eq!(keys, vec!["new".to_string()]);
        assert!(config.endpoint.query_pairs().any(|(name, value)| name == "cluster" && value == "mainnet"));
    }

    #[test]
    fn test_build_carries_commitment_and_timeout() {
        let config = ReportConfig::builder()
            .with_api_key("k")
            .with_commitment("finalized")
            .with_timeout(5)
            .build()
            .unwrap();

        assert_eq!(config.commitment, "finalized");
        assert_eq!(config.timeout_secs, 5);

        let empty = ReportConfig::builder().with_api_key("k").with_commitment(" ").build();
        assert!(matches!(empty, Err(ReportError::Config(_))));
    }

    #[test]
    fn test_build_rejects_invalid_settings() {
        let zero_limit = ReportConfig::builder().with_api_key("k").with_limit(0).build();
        assert!(matches!(zero_limit, Err(ReportError::Config(_))));

        let zero_concurrency = ReportConfig::builder().with_api_key("k").with_concurrency(0).build();
        assert!(matches!(zero_concurrency, Err(ReportError::Config(_))));

        let bad_url = ReportConfig::builder().with_api_key("k").with_rpc("not a url").build();
        assert!(matches!(bad_url, Err(ReportError::Config(_))));
    }

    #[test]
    fn test_missing_wallet_policy_from_str() {
        assert_eq!("fail".parse::<MissingWalletPolicy>().unwrap(), MissingWalletPolicy::Fail);
        assert_eq!("SKIP".parse::<MissingWalletPolicy>().unwrap(), MissingWalletPolicy::Skip);
        assert!("ignore".parse::<MissingWalletPolicy>().is_err());
    }

    #[test]
    fn test_read_key_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        assert_eq!(read_key_file(&path).unwrap(), None);

        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, r#"{{"helius_key": "from-file"}}"#).unwrap();
        assert_eq!(read_key_file(&path).unwrap(), Some("from-file".to_string()));

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(read_key_file(&path), Err(ReportError::Config(_))));
    }

    #[test]
    fn test_resolve_prefers_explicit_key() {
        let key = resolve_api_key(Some("explicit".to_string())).unwrap();
        assert_eq!(key, Some("explicit".to_string()));
    }
}
