//! Integration tests for configuration loading.
//!
//! Covers:
//! - Reference-stable caching across relative and absolute paths
//! - At-most-one parse under concurrent first loads
//! - Async loading sharing the sync cache
//! - Fatal load errors (missing file, malformed document, dangling reference)

use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Barrier};
use std::thread;
use tempfile::TempDir;
use tooldoc_core::{ConfigLoader, Error};

const NAMING: &str = r#"{
    "lexicon": {
        "acronyms": {
            "aks": { "canonical": "AKS" },
            "vm": { "canonical": "VM", "plural": "VMs" }
        },
        "compoundWords": { "keyvault": ["key", "vault"] },
        "stopWords": ["a", "of", "the"]
    },
    "services": [
        {
            "id": "aks",
            "shortName": "$lexicon.acronyms.aks",
            "brandName": "Azure Kubernetes Service",
            "filename": "azure-kubernetes-service"
        },
        { "id": "keyvault", "shortName": "$lexicon.compoundWords.keyvault" }
    ],
    "parameters": [
        { "name": "vmName", "display": "$lexicon.acronyms.vm" }
    ]
}"#;

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
fn test_equivalent_paths_share_instance() {
    let temp = TempDir::new().unwrap();
    let path = write(temp.path(), "naming.json", NAMING);
    let dotted = temp.path().join(".").join("naming.json");

    let loader = ConfigLoader::new();
    let a = loader.load(&path).unwrap();
    let b = loader.load(&dotted).unwrap();

    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(loader.len(), 1);
}

#[test]
fn test_references_resolved_on_load() {
    let temp = TempDir::new().unwrap();
    let path = write(temp.path(), "naming.json", NAMING);

    let config = ConfigLoader::new().load(&path).unwrap();
    assert_eq!(config.service("aks").unwrap().short_name.as_deref(), Some("AKS"));
    assert_eq!(
        config.service("keyvault").unwrap().short_name.as_deref(),
        Some("key-vault")
    );
    assert_eq!(config.parameter("vmname").unwrap().display, "VM");
}

#[test]
fn test_concurrent_first_loads_parse_once() {
    let temp = TempDir::new().unwrap();
    let path = write(temp.path(), "naming.json", NAMING);

    let loader = Arc::new(ConfigLoader::new());
    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let loader = Arc::clone(&loader);
            let barrier = Arc::clone(&barrier);
            let path = path.clone();
            thread::spawn(move || {
                barrier.wait();
                loader.load(&path).unwrap()
            })
        })
        .collect();

    let configs: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for config in &configs[1..] {
        assert!(Arc::ptr_eq(&configs[0], config));
    }
    let stats = loader.stats();
    assert_eq!(stats.parses, 1);
    assert_eq!(stats.cache_hits, (threads - 1) as u64);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_async_load_shares_cache() {
    let temp = TempDir::new().unwrap();
    let path = write(temp.path(), "naming.json", NAMING);

    let loader = Arc::new(ConfigLoader::new());
    let (a, b) = tokio::join!(loader.load_async(&path), loader.load_async(&path));
    let a = a.unwrap();
    let b = b.unwrap();
    let c = loader.load(&path).unwrap();

    assert!(Arc::ptr_eq(&a, &b));
    assert!(Arc::ptr_eq(&a, &c));
    assert_eq!(loader.stats().parses, 1);
}

#[tokio::test]
async fn test_async_missing_file() {
    let loader = Arc::new(ConfigLoader::new());
    let err = loader.load_async("/no/such/naming.json").await.unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_dangling_reference_fails_load() {
    let temp = TempDir::new().unwrap();
    let path = write(
        temp.path(),
        "naming.json",
        r#"{ "services": [ { "id": "sql", "shortName": "$lexicon.acronyms.sql" } ] }"#,
    );

    let loader = ConfigLoader::new();
    match loader.load(&path).unwrap_err() {
        Error::UnresolvedReference { field, reference } => {
            assert_eq!(field, "services[sql].shortName");
            assert_eq!(reference, "$lexicon.acronyms.sql");
        }
        other => panic!("Expected UnresolvedReference, got {other:?}"),
    }
    assert!(loader.is_empty());
}

#[test]
fn test_failed_load_can_be_retried_after_fix() {
    let temp = TempDir::new().unwrap();
    let path = write(temp.path(), "naming.json", "[1, 2");

    let loader = ConfigLoader::new();
    assert!(loader.load(&path).unwrap_err().is_malformed());

    write(temp.path(), "naming.json", NAMING);
    assert!(loader.load(&path).is_ok());
    assert_eq!(loader.stats().parses, 1);
}

#[test]
fn test_toml_document() {
    let temp = TempDir::new().unwrap();
    let path = write(
        temp.path(),
        "naming.toml",
        r#"
        [lexicon.acronyms.aks]
        canonical = "AKS"

        [[services]]
        id = "aks"
        shortName = "$lexicon.acronyms.aks"
        "#,
    );

    let config = ConfigLoader::new().load(&path).unwrap();
    assert_eq!(config.service("aks").unwrap().short_name.as_deref(), Some("AKS"));
}

#[test]
fn test_directory_is_not_a_config() {
    let temp = TempDir::new().unwrap();
    let err = ConfigLoader::new().load(temp.path()).unwrap_err();
    assert!(err.is_io_error());
}
