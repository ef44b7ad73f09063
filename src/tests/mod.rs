mod config_validator_tests;
mod daemon_tests;
