#![cfg(feature = "std")]

use log::LevelFilter;
use seabattle::{init_logging, parse_level};

#[test]
fn level_parsing_falls_back_to_default() {
    assert_eq!(parse_level(Some("debug"), LevelFilter::Info), LevelFilter::Debug);
    assert_eq!(parse_level(Some("TRACE"), LevelFilter::Info), LevelFilter::Trace);
    assert_eq!(parse_level(Some("loud"), LevelFilter::Warn), LevelFilter::Warn);
    assert_eq!(parse_level(None, LevelFilter::Info), LevelFilter::Info);
}

#[test]
fn init_is_idempotent() {
    init_logging();
    init_logging();
    log::info!("logger installed");
}
