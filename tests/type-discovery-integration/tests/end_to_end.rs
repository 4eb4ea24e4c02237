//! 类型发现端到端集成测试

mod fixtures;

use discovery_abstractions::TypeDiscovery;
use discovery_common::{global_type_registry, DiscoveryError, TypeKind, TypeReflector, Visibility};
use std::sync::Once;
use type_discovery::{DiscoverySettings, TypeFinder, TypeFinderBuilder};

static INIT_LOGGER: Once = Once::new();

/// 初始化测试日志系统（只初始化一次）
fn init_test_logger() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

fn discoverable_finder(dir: &tempfile::TempDir) -> TypeFinder {
    init_test_logger();
    let mut finder = TypeFinder::new(dir.path());
    finder.path("Discoverable");
    finder
}

#[test]
fn test_macro_declarations_are_registered() {
    let registry = global_type_registry();

    let provider = registry.reflect("Framework::ServiceProvider").unwrap();
    assert_eq!(provider.kind(), TypeKind::AbstractClass);
    assert_eq!(provider.method_visibility("register"), Some(Visibility::Public));
    assert_eq!(provider.method_visibility("boot"), Some(Visibility::Protected));
    assert_eq!(provider.property_visibility("booted"), Some(Visibility::Protected));

    let implementing = registry
        .reflect("App::Discoverable::Subdirectory::Implementing")
        .unwrap();
    assert!(implementing.implements_interface("Serializable"));
    assert!(implementing.implements_interface("ArrayAccess"));
    assert!(implementing.has_public_method("offset_get"));

    let normal = registry.reflect("App::Discoverable::NormalClass").unwrap();
    assert!(normal.has_public_property("foo"));
    assert_eq!(normal.property_visibility("bar"), Some(Visibility::Private));

    let class_using = registry
        .reflect("App::Discoverable::Subdirectory::ClassUsing")
        .unwrap();
    assert!(class_using.uses_mixin("App::Discoverable::Traits"));
    assert!(class_using.has_public_method("discovered"));
}

#[test]
fn test_discovers_all_instantiable_types() {
    let dir = fixtures::project();
    let result = discoverable_finder(&dir).get().unwrap();

    assert_eq!(result.len(), 8);
    assert_eq!(
        result.names(),
        vec![
            "App::Discoverable::ClassUsing",
            "App::Discoverable::Extending",
            "App::Discoverable::Implementing",
            "App::Discoverable::NormalClass",
            "App::Discoverable::Subdirectory::ClassUsing",
            "App::Discoverable::Subdirectory::Extending",
            "App::Discoverable::Subdirectory::Implementing",
            "App::Discoverable::Subdirectory::NormalClass",
        ]
    );
    assert!(!result.has("App::Discoverable::AbstractProvider"));
    assert!(!result.has("App::Discoverable::Traits"));
}

#[test]
fn test_default_root_is_app_path() {
    let dir = fixtures::project();
    init_test_logger();
    let result = TypeFinder::new(dir.path()).get().unwrap();

    assert_eq!(result.len(), 8);
}

#[test]
fn test_non_recursive() {
    let dir = fixtures::project();
    let mut finder = discoverable_finder(&dir);
    finder.non_recursive();

    assert_eq!(finder.get().unwrap().len(), 4);
}

#[test]
fn test_implementing() {
    let dir = fixtures::project();
    let mut finder = discoverable_finder(&dir);

    finder.implementing(["ArrayAccess"]);
    assert_eq!(finder.get().unwrap().len(), 1);

    finder.implementing(["Serializable"]);
    assert_eq!(finder.get().unwrap().len(), 2);

    finder.implementing(["Serializable", "ArrayAccess"]);
    assert_eq!(
        finder.get().unwrap().names(),
        vec!["App::Discoverable::Subdirectory::Implementing"]
    );
}

#[test]
fn test_non_recursive_before_implementing() {
    let dir = fixtures::project();
    let mut finder = discoverable_finder(&dir);
    finder.non_recursive().implementing(["Serializable"]);

    assert_eq!(
        finder.get().unwrap().names(),
        vec!["App::Discoverable::Implementing"]
    );
}

#[test]
fn test_extending() {
    let dir = fixtures::project();
    let mut finder = discoverable_finder(&dir);
    finder.extending("Framework::ServiceProvider");

    assert_eq!(finder.get().unwrap().len(), 2);
}

#[test]
fn test_methods() {
    let dir = fixtures::project();
    let mut finder = discoverable_finder(&dir);

    finder.methods(["register"]);
    assert_eq!(finder.get().unwrap().len(), 2);

    finder.methods(["serialize"]);
    assert_eq!(finder.get().unwrap().len(), 2);

    finder.methods(["serialize", "offset_get"]);
    assert_eq!(finder.get().unwrap().len(), 1);

    finder.methods(["something"]);
    assert!(finder.get().unwrap().is_empty());

    // 受保护的方法不满足条件
    finder.methods(["boot"]);
    assert!(finder.get().unwrap().is_empty());
}

#[test]
fn test_using() {
    let dir = fixtures::project();
    let mut finder = discoverable_finder(&dir);

    finder.using(["App::Discoverable::Traits"]);
    assert_eq!(finder.get().unwrap().len(), 2);

    finder.using([
        "App::Discoverable::Traits",
        "App::Discoverable::Subdirectory::Traits",
    ]);
    assert_eq!(
        finder.get().unwrap().names(),
        vec!["App::Discoverable::Subdirectory::ClassUsing"]
    );

    finder.using(["App::Discoverable::InvalidTrait"]);
    assert!(finder.get().unwrap().is_empty());
}

#[test]
fn test_properties() {
    let dir = fixtures::project();
    let mut finder = discoverable_finder(&dir);

    finder.properties(["foo"]);
    assert_eq!(finder.get().unwrap().len(), 2);

    finder.properties(["bar"]);
    assert!(finder.get().unwrap().is_empty());
}

#[test]
fn test_combined_filters() {
    let dir = fixtures::project();
    let mut finder = discoverable_finder(&dir);
    finder
        .implementing(["Serializable"])
        .methods(["offset_get"])
        .non_recursive();

    assert!(finder.get().unwrap().is_empty());

    finder.recursive(true);
    assert_eq!(finder.get().unwrap().len(), 1);
}

#[test]
fn test_untrusted_base_path() {
    let dir = fixtures::project();
    let mut finder = discoverable_finder(&dir);
    finder.base_path("storage");

    let error = finder.get().unwrap_err();
    assert!(matches!(error, DiscoveryError::UntrustedPath { ref path } if path == "storage"));
    assert!(error.to_string().contains("[storage]"));
}

#[test]
fn test_base_path_under_app_is_trusted() {
    let dir = fixtures::project();
    let mut finder = discoverable_finder(&dir);
    finder.base_path("app/Discoverable/Subdirectory");

    assert_eq!(finder.get().unwrap().len(), 4);
}

#[test]
fn test_discovery_is_idempotent() {
    let dir = fixtures::project();
    let mut finder = discoverable_finder(&dir);
    finder.using(["App::Discoverable::Traits"]);

    let discovery: &dyn TypeDiscovery = &finder;
    let first = discovery.discover().unwrap();
    let second = discovery.discover().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.names(), second.names());
}

#[test]
fn test_finder_from_settings() {
    let dir = fixtures::project();
    init_test_logger();

    let settings = DiscoverySettings {
        base_path: dir.path().to_path_buf(),
        paths: vec!["Discoverable/Subdirectory".to_string()],
        ..DiscoverySettings::default()
    };
    let mut finder = TypeFinderBuilder::from_settings(&settings)
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(finder.get().unwrap().len(), 4);

    finder.implementing(["ArrayAccess"]);
    assert_eq!(finder.get().unwrap().len(), 1);
}
