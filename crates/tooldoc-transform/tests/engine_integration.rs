//! End-to-end tests for the transformation engine.
//!
//! Loads the fixture configuration through `ConfigLoader` and checks the
//! behavior documentation generators rely on:
//! - Parameter display names and identifier splitting
//! - Title casing and its idempotence
//! - Filename tiers, cleaning and the main service page
//! - Description post-processing
//! - Sharing one engine across threads

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use tooldoc_core::ConfigLoader;
use tooldoc_transform::{ResolutionTier, TransformationEngine};

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/naming.json")
}

fn engine() -> TransformationEngine {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("tooldoc=trace")
        .with_test_writer()
        .try_init();
    TransformationEngine::from_loader(&ConfigLoader::new(), fixture()).unwrap()
}

// ============================================================================
// Parameters
// ============================================================================

#[test]
fn test_configured_parameters_return_display_verbatim() {
    let e = engine();
    for parameter in e.config().parameters() {
        assert_eq!(e.normalize_parameter(&parameter.name), parameter.display);
    }
    assert_eq!(e.normalize_parameter("subscriptionId"), "subscription ID");
    assert_eq!(e.normalize_parameter("vmSize"), "VM");
}

#[test]
fn test_unmapped_parameters_are_split() {
    let e = engine();
    assert_eq!(e.normalize_parameter("resourceGroupName"), "resource group name");
    assert_eq!(e.normalize_parameter("vmId"), "VM ID");
    assert_eq!(e.normalize_parameter("callbackUrls"), "callback URLs");
    assert_eq!(e.normalize_parameter("SQLAPIVersion"), "SQL API version");
    assert_eq!(e.normalize_parameter("max_page_size"), "max page size");
}

// ============================================================================
// Title case
// ============================================================================

#[test]
fn test_title_case() {
    let e = engine();
    assert_eq!(
        e.to_title_case("manage the vms of an aks cluster", "titleCase"),
        "Manage the VMs of an AKS Cluster"
    );
    assert_eq!(e.to_title_case("ios apps", "titleCase"), "iOS Apps");
}

#[test]
fn test_title_case_idempotent() {
    let e = engine();
    for input in [
        "manage the vms of an aks cluster",
        "A guide to the api",
        "in and out",
        "sql",
    ] {
        let once = e.to_title_case(input, "titleCase");
        assert_eq!(e.to_title_case(&once, "titleCase"), once);
    }
}

// ============================================================================
// Filenames
// ============================================================================

#[test]
fn test_service_mapping_beats_compound_word() {
    let e = engine();
    assert_eq!(e.filenames().resolve("aks").tier, ResolutionTier::ExplicitFilename);
    assert_eq!(
        e.generate_filename("aks", Some("nodepool list"), None),
        "azure-kubernetes-service-nodepool-list.md"
    );
}

#[test]
fn test_compound_and_fallback_tiers() {
    let e = engine();
    assert_eq!(e.generate_filename("cosmosdb", Some("database_list"), None), "cosmos-db-database-list.md");
    assert_eq!(e.generate_filename("Monitor", Some("Get Metrics"), None), "monitor-get-metrics.md");
}

#[test]
fn test_filename_with_type_part() {
    let e = engine();
    assert_eq!(
        e.generate_filename("storage", Some("list of the blobs"), Some("examples")),
        "storage-list-blobs-examples.md"
    );
}

#[test]
fn test_acronyms_lowercased_in_filenames() {
    let e = engine();
    assert_eq!(e.generate_filename("sql", Some("get the API keys"), None), "sql-get-api-keys.md");
    // "ios" belongs to the platform category, which has no default
    assert_eq!(e.clean_filename("build_for_ios"), "build-iOS");
}

#[test]
fn test_clean_filename_keeps_first_token() {
    let e = engine();
    assert_eq!(e.clean_filename("get-a-list-of-the-items"), "get-list-items");
    assert_eq!(e.clean_filename("the-items"), "the-items");
}

#[test]
fn test_main_service_filenames() {
    let e = engine();
    assert_eq!(e.generate_main_service_filename("aks"), "azure-kubernetes-service.md");
    assert_eq!(e.generate_main_service_filename("storage"), "storage.md");
    assert_eq!(e.generate_main_service_filename("sql"), "sql.md");
    assert_eq!(e.generate_main_service_filename("keyvault"), "key-vault.md");
    assert_eq!(e.generate_main_service_filename("unknown"), "unknown.md");
}

#[test]
fn test_empty_area() {
    let e = engine();
    assert_eq!(e.generate_filename("", None, None), "");
    assert_eq!(e.generate_main_service_filename("  "), "");
}

// ============================================================================
// Service names and descriptions
// ============================================================================

#[test]
fn test_service_names() {
    let e = engine();
    assert_eq!(e.service_display_name("keyvault"), "Azure Key Vault");
    assert_eq!(e.service_display_name("monitor"), "Monitor");
    assert_eq!(e.service_short_name("sql"), "SQL");
    assert_eq!(e.service_short_name("keyvault"), "keyvault");
}

#[test]
fn test_transform_description() {
    let e = engine();
    assert_eq!(e.transform_description("This is a test"), "This is a test.");
    assert_eq!(e.transform_description("This is a test."), "This is a test.");
    assert_eq!(
        e.transform_description("Shows config info, i.e. the current values"),
        "Shows configuration information, that is the current values."
    );
}

// ============================================================================
// Sharing
// ============================================================================

#[test]
fn test_engines_from_same_path_share_configuration() {
    let loader = ConfigLoader::new();
    let a = TransformationEngine::from_loader(&loader, fixture()).unwrap();
    let b = TransformationEngine::from_loader(&loader, fixture()).unwrap();
    assert!(Arc::ptr_eq(a.config(), b.config()));
}

#[test]
fn test_engine_used_across_threads() {
    let e = Arc::new(engine());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let e = Arc::clone(&e);
            thread::spawn(move || {
                let name = e.generate_filename("storage", Some(&format!("op {i}")), None);
                assert_eq!(name, format!("storage-op-{i}.md"));
                e.normalize_parameter("vmId")
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), "VM ID");
    }
}

#[tokio::test]
async fn test_async_loaded_engine() {
    let loader = Arc::new(ConfigLoader::new());
    let config = loader.load_async(fixture()).await.unwrap();
    let e = TransformationEngine::new(config).unwrap();
    assert_eq!(e.service_display_name("aks"), "Azure Kubernetes Service");
}
