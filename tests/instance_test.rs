// Own test binary: the process-wide instance can only be initialized once.
mod common;

use atin_config::{instance, ConfigError, Load, MasterConfig};
use common::with_env;

#[test]
fn test_instance_lifecycle() {
    assert!(!instance::is_initialized());

    // A failed first build leaves nothing behind
    let errors = with_env(&[("CHECK_INTERVAL_SECONDS", "abc")], instance::get_instance)
        .unwrap_err();
    assert!(matches!(
        &errors[0],
        ConfigError::TypeConversion { key, .. } if key == "CHECK_INTERVAL_SECONDS"
    ));
    assert!(!instance::is_initialized());

    // The retry succeeds; racing first callers all get the same instance
    let addresses: Vec<usize> = with_env(&[("TRADING_SYMBOL", "ETH/USDT")], || {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                std::thread::spawn(|| {
                    instance::get_instance().map(|config| config as *const MasterConfig as usize)
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap().unwrap())
            .collect()
    });
    assert_eq!(addresses.len(), 8);
    assert!(addresses.windows(2).all(|pair| pair[0] == pair[1]));
    assert!(instance::is_initialized());

    let first = instance::get_instance().unwrap();
    assert_eq!(first as *const MasterConfig as usize, addresses[0]);
    assert_eq!(*first.trading.symbol, "ETH/USDT");

    // Environment changes after initialization are not picked up
    let third = with_env(&[("TRADING_SYMBOL", "SOL/USDT")], instance::get_instance).unwrap();
    assert!(std::ptr::eq(first, third));
    assert_eq!(*third.trading.symbol, "ETH/USDT");

    // An explicitly built config cannot replace the existing instance
    let replacement = with_env(&[], MasterConfig::from_env).unwrap();
    let rejected = instance::install(replacement).unwrap_err();
    assert_eq!(*rejected.trading.symbol, "BTC/USDT");
    assert!(std::ptr::eq(first, instance::get_instance().unwrap()));
}
