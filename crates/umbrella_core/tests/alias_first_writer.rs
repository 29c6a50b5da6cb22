use std::sync::Arc;
use umbrella_core::{
    bind_package, AliasRegistry, BindOutcome, BindingState, ExtensionModule, PackageNamespace,
    StaticExtensionLoader, StaticExtensionModule, VersionMetadata,
};

fn metadata() -> VersionMetadata {
    VersionMetadata::compose("umbrella", "0.1.0", "abc1234", "abc1234")
}

fn loader_with_submodule(submodule: Arc<dyn ExtensionModule>) -> StaticExtensionLoader {
    let mut module = StaticExtensionModule::new("_umbrella", metadata());
    module.set_submodule("objc", submodule);

    let mut loader = StaticExtensionLoader::new();
    loader.register("umbrella", Arc::new(module));
    loader
}

#[test]
fn preseeded_alias_sentinel_is_left_untouched() {
    let sentinel: Arc<dyn ExtensionModule> =
        Arc::new(StaticExtensionModule::new("sentinel", metadata()));
    let genuine: Arc<dyn ExtensionModule> =
        Arc::new(StaticExtensionModule::new("objc", metadata()));

    let mut aliases = AliasRegistry::new();
    assert!(aliases.insert_if_absent("umbrella.objc", Arc::clone(&sentinel)));

    let loader = loader_with_submodule(genuine);
    let mut namespace = PackageNamespace::new("umbrella");
    let mut state = BindingState::new();
    let outcome = bind_package(&mut namespace, &loader, &mut aliases, &mut state)
        .expect("bind should succeed despite the alias conflict");

    match outcome {
        BindOutcome::Bound(report) => {
            assert_eq!(report.aliases_registered, 0);
            assert_eq!(report.aliases_skipped, 1);
        }
        BindOutcome::AlreadyBound => panic!("first bind must not be skipped"),
    }

    let kept = aliases.get("umbrella.objc").expect("preseeded alias");
    assert!(Arc::ptr_eq(&kept, &sentinel));
    assert_eq!(aliases.len(), 1);
}

#[test]
fn aliases_from_two_packages_do_not_collide() {
    let objc: Arc<dyn ExtensionModule> =
        Arc::new(StaticExtensionModule::new("objc", metadata()));
    let swift: Arc<dyn ExtensionModule> =
        Arc::new(StaticExtensionModule::new("swift", metadata()));

    let mut umbrella = StaticExtensionModule::new("_umbrella", metadata());
    umbrella.set_submodule("objc", Arc::clone(&objc));
    let mut parasol = StaticExtensionModule::new("_parasol", metadata());
    parasol.set_submodule("swift", Arc::clone(&swift));

    let mut loader = StaticExtensionLoader::new();
    loader.register("umbrella", Arc::new(umbrella));
    loader.register("parasol", Arc::new(parasol));

    let mut aliases = AliasRegistry::new();
    let mut state = BindingState::new();

    let mut first = PackageNamespace::new("umbrella");
    bind_package(&mut first, &loader, &mut aliases, &mut state)
        .expect("umbrella bind should succeed");
    let mut second = PackageNamespace::new("parasol");
    bind_package(&mut second, &loader, &mut aliases, &mut state)
        .expect("parasol bind should succeed");

    assert_eq!(aliases.keys(), ["parasol.swift", "umbrella.objc"]);
    assert!(state.is_bound("umbrella"));
    assert!(state.is_bound("parasol"));
}

#[test]
fn alias_registry_never_shrinks_during_rebind_attempts() {
    let objc: Arc<dyn ExtensionModule> =
        Arc::new(StaticExtensionModule::new("objc", metadata()));
    let loader = loader_with_submodule(objc);

    let mut aliases = AliasRegistry::new();
    let mut state = BindingState::new();
    let mut namespace = PackageNamespace::new("umbrella");

    bind_package(&mut namespace, &loader, &mut aliases, &mut state)
        .expect("first bind should succeed");
    assert_eq!(aliases.len(), 1);

    for _ in 0..3 {
        let outcome = bind_package(&mut namespace, &loader, &mut aliases, &mut state)
            .expect("rebind attempts should skip cleanly");
        assert_eq!(outcome, BindOutcome::AlreadyBound);
        assert_eq!(aliases.len(), 1);
    }
}
