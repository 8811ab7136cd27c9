//! Integration tests for manifest loading and validation.

use l20n::{ImportError, Manifest};

#[test]
fn parses_a_valid_manifest() {
    let manifest = Manifest::parse(
        r#"{
            "default_locale": "en",
            "locales": ["en", "fr", "ru"],
            "resources": ["locales/{locale}.l20n"]
        }"#,
        "manifest.json",
    )
    .unwrap();

    assert_eq!(manifest.default_locale(), "en");
    assert_eq!(manifest.locales().len(), 3);
    assert!(manifest.supports("fr"));
    assert!(!manifest.supports("de"));
    assert_eq!(
        manifest.resource_paths("fr"),
        vec!["locales/fr.l20n".to_string()]
    );
}

#[test]
fn rejects_malformed_json() {
    let err = Manifest::parse("{ not json", "manifest.json").unwrap_err();
    assert!(matches!(err, ImportError::Manifest { .. }));
}

#[test]
fn rejects_missing_default_locale_field() {
    let err = Manifest::parse(
        r#"{ "locales": ["en"], "resources": ["{locale}.l20n"] }"#,
        "manifest.json",
    )
    .unwrap_err();
    assert!(matches!(err, ImportError::Manifest { .. }));
}

#[test]
fn rejects_default_outside_locale_list() {
    let err = Manifest::parse(
        r#"{
            "default_locale": "de",
            "locales": ["en", "fr"],
            "resources": ["{locale}.l20n"]
        }"#,
        "manifest.json",
    )
    .unwrap_err();
    let ImportError::Manifest { message, .. } = err else {
        panic!("expected manifest error");
    };
    assert!(message.contains("default locale"));
}

#[test]
fn rejects_empty_locale_list() {
    let err = Manifest::parse(
        r#"{
            "default_locale": "en",
            "locales": [],
            "resources": ["{locale}.l20n"]
        }"#,
        "manifest.json",
    )
    .unwrap_err();
    assert!(matches!(err, ImportError::Manifest { .. }));
}

#[test]
fn rejects_empty_resource_list() {
    let err = Manifest::parse(
        r#"{
            "default_locale": "en",
            "locales": ["en"],
            "resources": []
        }"#,
        "manifest.json",
    )
    .unwrap_err();
    assert!(matches!(err, ImportError::Manifest { .. }));
}

#[test]
fn expands_multiple_resource_templates() {
    let manifest = Manifest::parse(
        r#"{
            "default_locale": "en",
            "locales": ["en"],
            "resources": ["core/{locale}.l20n", "extra/{locale}.l20n"]
        }"#,
        "manifest.json",
    )
    .unwrap();
    assert_eq!(
        manifest.resource_paths("en"),
        vec!["core/en.l20n".to_string(), "extra/en.l20n".to_string()]
    );
}
