//! 发现流程测试

use crate::{NamespaceRootRegistry, TypeFinder, TypeFinderBuilder};
use discovery_common::{DiscoveryError, InMemoryTypeRegistry, TypeDeclaration, Visibility};
use std::fs;
use std::path::Path;
use std::sync::{Arc, Once};
use tempfile::TempDir;

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

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "").unwrap();
}

/// 项目目录结构
///
/// app/Http/{Kernel,Middleware}.rs, app/Http/Controllers/{Home,Api}.rs,
/// app/Models/{User,Model}.rs, app/Contracts/Jsonable.rs, modules/Billing/Invoice.rs, storage/Cache.rs
fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    for file in [
        "app/Http/Kernel.rs",
        "app/Http/Middleware.rs",
        "app/Http/README.md",
        "app/Http/Controllers/Home.rs",
        "app/Http/Controllers/Api.rs",
        "app/Http/Controllers/routes.json",
        "app/Models/User.rs",
        "app/Models/Model.rs",
        "app/Contracts/Jsonable.rs",
        "app/helpers.rs",
        "modules/Billing/Invoice.rs",
        "storage/Cache.rs",
    ] {
        touch(dir.path(), file);
    }
    dir
}

fn registry() -> Arc<InMemoryTypeRegistry> {
    let registry = InMemoryTypeRegistry::new();
    registry.declare(TypeDeclaration::interface("App::Contracts::Jsonable"));
    registry.declare(TypeDeclaration::mixin("App::Concerns::Authorizes").public_method("authorize"));
    registry.declare(
        TypeDeclaration::abstract_class("App::Models::Model")
            .public_method("save")
            .public_property("id"),
    );
    registry.declare(
        TypeDeclaration::class("App::Models::User")
            .extends("App::Models::Model")
            .implements(["App::Contracts::Jsonable"])
            .public_property("email")
            .property("password", Visibility::Private),
    );
    registry.declare(TypeDeclaration::class("App::Http::Kernel").public_method("handle"));
    registry.declare(
        TypeDeclaration::class("App::Http::Middleware")
            .public_method("handle")
            .method("terminate", Visibility::Protected),
    );
    registry.declare(
        TypeDeclaration::class("App::Http::Controllers::Home")
            .uses(["App::Concerns::Authorizes"])
            .public_method("index"),
    );
    registry.declare(
        TypeDeclaration::class("App::Http::Controllers::Api")
            .uses(["App::Concerns::Authorizes"])
            .implements(["App::Contracts::Jsonable"]),
    );
    registry.declare(TypeDeclaration::class("App::Admin::Dashboard"));
    registry.declare(TypeDeclaration::class("Modules::Billing::Invoice"));
    registry.declare(TypeDeclaration::class("Storage::Cache"));
    Arc::new(registry)
}

fn finder(dir: &TempDir) -> TypeFinder {
    init_test_logger();
    TypeFinderBuilder::new(dir.path())
        .with_reflector(registry())
        .with_autoload(Arc::new(
            NamespaceRootRegistry::new().with_prefix("Modules::", dir.path().join("modules")),
        ))
        .build()
        .unwrap()
}

#[test]
fn test_default_root_scans_app_recursively() {
    let dir = project();
    let result = finder(&dir).get().unwrap();

    assert_eq!(
        result.names(),
        vec![
            "App::Http::Controllers::Api",
            "App::Http::Controllers::Home",
            "App::Http::Kernel",
            "App::Http::Middleware",
            "App::Models::User",
        ]
    );
}

#[test]
fn test_recursion_toggle() {
    let dir = project();
    let mut finder = finder(&dir);
    finder.path("Http");
    assert_eq!(finder.get().unwrap().len(), 4);

    finder.non_recursive();
    assert_eq!(
        finder.get().unwrap().names(),
        vec!["App::Http::Kernel", "App::Http::Middleware"]
    );
}

#[test]
fn test_untrusted_base_path_fails_get() {
    let dir = project();
    let mut finder = finder(&dir);
    finder.base_path("storage");

    match finder.get() {
        Err(DiscoveryError::UntrustedPath { path }) => assert_eq!(path, "storage"),
        other => panic!("应该拒绝不受信任的目录: {:?}", other.map(|r| r.len())),
    }
}

#[test]
fn test_autoloaded_base_path_is_scanned() {
    let dir = project();
    let mut finder = finder(&dir);
    finder.base_path("modules/Billing");

    assert_eq!(finder.get().unwrap().names(), vec!["Modules::Billing::Invoice"]);
}

#[test]
fn test_roots_are_scanned_in_order() {
    let dir = project();
    let mut finder = finder(&dir);
    finder.path("Models").add_base_path("modules").add_path("Http");
    finder.non_recursive();

    assert_eq!(
        finder.get().unwrap().names(),
        vec!["App::Models::User", "App::Http::Kernel", "App::Http::Middleware"]
    );

    finder.recursive(true);
    let result = finder.get().unwrap();
    assert_eq!(result.len(), 6);
    assert_eq!(result.names()[1], "Modules::Billing::Invoice");
}

#[test]
fn test_duplicate_roots_keep_first_position() {
    let dir = project();
    let mut finder = finder(&dir);
    finder.path("Models").add_path("Http").add_path("Models");

    let result = finder.get().unwrap();
    assert_eq!(result.len(), 5);
    assert_eq!(result.names()[0], "App::Models::User");
}

#[test]
fn test_non_instantiable_types_are_excluded() {
    let dir = project();
    let result = finder(&dir).get().unwrap();

    assert!(!result.has("App::Models::Model"));
    assert!(!result.has("App::Contracts::Jsonable"));
    assert!(!result.has("App::Helpers"));
}

#[test]
fn test_filters_are_and_composed() {
    let dir = project();
    let mut finder = finder(&dir);

    finder.implementing(["App::Contracts::Jsonable"]);
    assert_eq!(
        finder.get().unwrap().names(),
        vec!["App::Http::Controllers::Api", "App::Models::User"]
    );

    finder.using(["App::Concerns::Authorizes"]);
    assert_eq!(finder.get().unwrap().names(), vec!["App::Http::Controllers::Api"]);

    finder.methods(["authorize", "index"]);
    assert!(finder.get().unwrap().is_empty());
}

#[test]
fn test_same_filter_kind_is_replaced() {
    let dir = project();
    let mut finder = finder(&dir);

    finder.methods(["terminate"]);
    assert!(finder.get().unwrap().is_empty());

    finder.methods(["handle"]);
    assert_eq!(
        finder.get().unwrap().names(),
        vec!["App::Http::Kernel", "App::Http::Middleware"]
    );
    assert_eq!(finder.filter_kinds().len(), 1);
}

#[test]
fn test_extending_and_properties() {
    let dir = project();
    let mut finder = finder(&dir);

    finder.extending("App::Models::Model");
    assert_eq!(finder.get().unwrap().names(), vec!["App::Models::User"]);

    finder.properties(["id", "email"]);
    assert_eq!(finder.get().unwrap().len(), 1);

    finder.properties(["password"]);
    assert!(finder.get().unwrap().is_empty());

    finder.reset_filters();
    assert_eq!(finder.get().unwrap().len(), 5);
}

#[test]
fn test_get_is_idempotent() {
    let dir = project();
    let mut finder = finder(&dir);
    finder.using(["App::Concerns::Authorizes"]);

    let first = finder.get().unwrap();
    let second = finder.get().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.names(), second.names());
}

#[test]
fn test_file_system_is_reread_on_each_get() {
    let dir = project();
    let finder = finder(&dir);
    assert_eq!(finder.get().unwrap().len(), 5);

    fs::remove_file(dir.path().join("app/Http/Kernel.rs")).unwrap();
    assert_eq!(finder.get().unwrap().len(), 4);
}

#[test]
fn test_loosely_cased_file_is_keyed_by_declared_name() {
    let dir = project();
    touch(dir.path(), "app/admin/Dashboard.rs");
    let mut finder = finder(&dir);
    finder.path("admin");

    let result = finder.get().unwrap();
    assert_eq!(result.names(), vec!["App::Admin::Dashboard"]);
    assert!(!result.has("App::admin::Dashboard"));
}
