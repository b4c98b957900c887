//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `pointshare_core` linkage without a UI runtime.
//! - Print the active allocation policy, optionally loaded from a JSON file
//!   given as the first argument.

use pointshare_core::AllocationPolicy;
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("pointshare_core ping={}", pointshare_core::ping());
    println!("pointshare_core version={}", pointshare_core::core_version());

    let policy = match std::env::args().nth(1) {
        Some(path) => match AllocationPolicy::load_from_path(&path) {
            Ok(policy) => policy,
            Err(err) => {
                eprintln!("pointshare_core policy error: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => AllocationPolicy::default(),
    };
    println!(
        "pointshare_core policy budget={} max_per_field={} floor={} step={}",
        policy.total_budget, policy.max_per_field, policy.floor_reservation, policy.step
    );
    ExitCode::SUCCESS
}
