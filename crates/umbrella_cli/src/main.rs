//! CLI smoke entry point.
//!
//! # Responsibility
//! - Bind the built-in baseline extension and print the resulting namespace.
//! - Keep output deterministic for quick local sanity checks.

use std::sync::Arc;
use umbrella_core::{
    bind_package, global_alias_registry, BindOutcome, BindingState, PackageNamespace,
    StaticExtensionLoader, StaticExtensionModule,
};

fn main() {
    let mut loader = StaticExtensionLoader::new();
    loader.register(
        "umbrella",
        Arc::new(StaticExtensionModule::objc_baseline()),
    );

    let mut namespace = PackageNamespace::new("umbrella");
    let mut state = BindingState::new();
    let mut aliases = global_alias_registry()
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    match bind_package(&mut namespace, &loader, &mut aliases, &mut state) {
        Ok(BindOutcome::Bound(report)) => {
            println!(
                "umbrella bound extension={} symbols={} aliases={}",
                report.extension, report.symbols_flattened, report.aliases_registered
            );
            for name in namespace.binding_names() {
                println!("symbol {name}");
            }
            for key in aliases.keys() {
                println!("alias {key}");
            }
        }
        Ok(BindOutcome::AlreadyBound) => {
            println!("umbrella already bound");
        }
        Err(err) => {
            eprintln!("umbrella bind failed: {err}");
            std::process::exit(1);
        }
    }
}
