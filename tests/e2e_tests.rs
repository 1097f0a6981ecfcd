//! End-to-end integration tests
//!
//! These tests validate the complete replay pipeline using predefined CSV
//! journal fixtures. Each test:
//! 1. Reads input.csv from a fixture directory
//! 2. Replays all operations against a fresh token
//! 3. Generates the account report
//! 4. Compares actual output with expected.csv
//!
//! Test fixtures are located in tests/fixtures/ and cover:
//! - The deployment scenario in both fee modes
//! - Trade windows (count limit, rollover, amount cap)
//! - Administration authorization and validation
//! - Fee exemptions on either side of a transfer
//! - Tax rounding on tiny and fractional amounts
//! - Rejected transfers leaving no trace
//! - Liquidity manager rotation
//! - Malformed journal records
//!
//! Each fixture is run with the sync strategy and with the async strategy
//! at several batch sizes.

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use std::fs;
    use std::io::Write;
    use std::path::Path;
    use taxed_token_engine::cli::StrategyType;
    use taxed_token_engine::strategy::{create_strategy, BatchConfig};
    use taxed_token_engine::types::{tokens, Address, FeeMode, TokenGenesis};
    use tempfile::NamedTempFile;

    /// Genesis shared by every fixture: one billion tokens minted to
    /// `owner`, default tax and limits
    fn genesis_for(fixture_name: &str) -> TokenGenesis {
        let mut genesis = TokenGenesis::new(
            Address::from("owner"),
            tokens(1_000_000_000).unwrap(),
            Address::from("liquidity-manager"),
        );
        if fixture_name.starts_with("surcharge") {
            genesis.fee_mode = FeeMode::Surcharge;
        }
        genesis
    }

    /// Run a test fixture by processing input.csv and comparing with expected.csv
    ///
    /// # Panics
    ///
    /// Panics if:
    /// - Input or expected files cannot be read
    /// - Output doesn't match expected
    fn run_test_fixture(fixture_name: &str, strategy_type: StrategyType, config: Option<BatchConfig>) {
        let fixture_dir = format!("tests/fixtures/{}", fixture_name);
        let input_path = format!("{}/input.csv", fixture_dir);
        let expected_path = format!("{}/expected.csv", fixture_dir);

        assert!(
            Path::new(&input_path).exists(),
            "Input file not found: {}",
            input_path
        );
        assert!(
            Path::new(&expected_path).exists(),
            "Expected file not found: {}",
            expected_path
        );

        let strategy = create_strategy(strategy_type.clone(), genesis_for(fixture_name), config);

        let mut temp_output = NamedTempFile::new().expect("Failed to create temp file");

        strategy
            .process(Path::new(&input_path), &mut temp_output)
            .unwrap_or_else(|e| panic!("Failed to process journal: {}", e));

        temp_output.flush().expect("Failed to flush temp file");

        let actual_output = fs::read_to_string(temp_output.path())
            .unwrap_or_else(|e| panic!("Failed to read temp output file: {}", e));

        let expected_output = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read expected file {}: {}", expected_path, e));

        assert_eq!(
            actual_output, expected_output,
            "\n\nOutput mismatch for fixture: {} (strategy: {:?})\n\nActual output:\n{}\n\nExpected output:\n{}\n",
            fixture_name, strategy_type, actual_output, expected_output
        );
    }

    #[rstest]
    #[case("deployment_scenario")]
    #[case("surcharge_scenario")]
    #[case("trade_limit_window")]
    #[case("admin_authorization")]
    #[case("fee_exemptions")]
    #[case("tax_rounding")]
    #[case("insufficient_balance")]
    #[case("liquidity_manager_rotation")]
    #[case("malformed_records")]
    fn test_fixtures(
        #[case] fixture: &str,
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        run_test_fixture(fixture, strategy, None);
    }

    /// Batch boundaries must not change the outcome
    #[rstest]
    #[case("deployment_scenario")]
    #[case("trade_limit_window")]
    #[case("admin_authorization")]
    #[case("fee_exemptions")]
    #[case("liquidity_manager_rotation")]
    fn test_fixtures_with_small_batches(
        #[case] fixture: &str,
        #[values(1, 2, 5)] batch_size: usize,
    ) {
        run_test_fixture(
            fixture,
            StrategyType::Async,
            Some(BatchConfig::new(batch_size, 4)),
        );
    }
}
