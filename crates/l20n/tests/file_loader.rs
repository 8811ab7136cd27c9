//! Integration test for filesystem-backed loading.

use std::fs;

use l20n::{FileLoader, Translator, vars};

#[test]
fn loads_manifest_and_resources_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("locales")).unwrap();
    fs::write(
        dir.path().join("manifest.json"),
        r#"{
            "default_locale": "en",
            "locales": ["en", "fr"],
            "resources": ["locales/{locale}.l20n"]
        }"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("locales/en.l20n"),
        r#"greeting = "Hello, {$name}!";"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("locales/fr.l20n"),
        r#"greeting = "Bonjour, {$name} !";"#,
    )
    .unwrap();

    let mut translator = Translator::builder()
        .loader(Box::new(FileLoader::new(dir.path())))
        .build();
    translator.import_manifest("manifest.json").unwrap();

    assert_eq!(
        translator.translate_with("greeting", &vars! { "name" => "Ana" }),
        "Hello, Ana!"
    );

    translator.set_locale("fr").unwrap();
    assert_eq!(
        translator.translate_with("greeting", &vars! { "name" => "Ana" }),
        "Bonjour, Ana !"
    );
}
