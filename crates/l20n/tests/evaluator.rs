//! Integration tests for expression evaluation, through the façade.

use l20n::{Global, HashValue, InfoCollector, MemoryLoader, Translator, Value, vars};

const MANIFEST: &str = r#"{
    "default_locale": "en",
    "locales": ["en", "ru"],
    "resources": ["{locale}.l20n"]
}"#;

fn translator(en: &str) -> Translator {
    let loader = MemoryLoader::new()
        .with("manifest.json", MANIFEST)
        .with("en.l20n", en)
        .with("ru.l20n", "");
    let mut translator = Translator::builder().loader(Box::new(loader)).build();
    translator.import_manifest("manifest.json").unwrap();
    translator
}

#[test]
fn literal_template() {
    let t = translator(r#"hello = "Hello, world!";"#);
    assert_eq!(t.translate("hello"), "Hello, world!");
}

#[test]
fn external_variable_substitution() {
    let t = translator(r#"greeting = "Hello, {$name}!";"#);
    assert_eq!(
        t.translate_with("greeting", &vars! { "name" => "Ana" }),
        "Hello, Ana!"
    );
}

#[test]
fn number_and_bool_externals_render() {
    let t = translator(r#"status = "{$count} items, active: {$active}";"#);
    assert_eq!(
        t.translate_with("status", &vars! { "count" => 3, "active" => true }),
        "3 items, active: true"
    );
}

#[test]
fn missing_external_degrades_to_id() {
    let t = translator(r#"greeting = "Hello, {$name}!";"#);
    assert_eq!(t.translate("greeting"), "greeting");
}

#[test]
fn entity_references_resolve() {
    let t = translator(
        r#"
        brand = "L20n";
        about = "About {brand}";
    "#,
    );
    assert_eq!(t.translate("about"), "About L20n");
}

#[test]
fn cyclic_references_error_instead_of_looping() {
    let t = translator(
        r#"
        ping = "{pong}";
        pong = "{ping}";
    "#,
    );
    let err = t.try_translate("ping", &vars! {}).unwrap_err();
    assert!(err.to_string().contains("cyclic reference"));
    // The façade degrades to the identifier
    assert_eq!(t.translate("ping"), "ping");
}

#[test]
fn self_reference_is_a_cycle() {
    let t = translator(r#"narcissus = "{narcissus}";"#);
    assert_eq!(t.translate("narcissus"), "narcissus");
}

#[test]
fn attributes_are_addressed_with_property_paths() {
    let t = translator(
        r#"
        exit = "Exit"
            .tooltip: "Quit the game";
    "#,
    );
    assert_eq!(t.translate("exit"), "Exit");
    assert_eq!(t.translate("exit.tooltip"), "Quit the game");
}

#[test]
fn property_access_on_string_value_returns_the_string() {
    let t = translator(r#"brand = "L20n";"#);
    assert_eq!(t.translate("brand.short"), "L20n");
}

#[test]
fn hash_branches_are_addressed_with_property_paths() {
    let t = translator(r#"colors = { red: "Red", *green: "Green" };"#);
    assert_eq!(t.translate("colors.red"), "Red");
    assert_eq!(t.translate("colors"), "Green");
}

#[test]
fn hash_without_default_cannot_render_bare() {
    let t = translator(r#"colors = { red: "Red", green: "Green" };"#);
    assert_eq!(t.translate("colors.red"), "Red");
    // No default branch, no index: the lookup degrades to the id
    assert_eq!(t.translate("colors"), "colors");
}

#[test]
fn nested_hashes_resolve_deep_paths() {
    let t = translator(r#"menu = { file: { open: "Open", *close: "Close" }, *help: "Help" };"#);
    assert_eq!(t.translate("menu.file.open"), "Open");
    assert_eq!(t.translate("menu.file"), "Close");
    assert_eq!(t.translate("menu"), "Help");
}

#[test]
fn index_selects_plural_branch() {
    let t = translator(r#"files[@plural($n)] = { one: "one file", *other: "{$n} files" };"#);
    assert_eq!(t.translate_with("files", &vars! { "n" => 1 }), "one file");
    assert_eq!(t.translate_with("files", &vars! { "n" => 5 }), "5 files");
}

#[test]
fn russian_plural_categories() {
    let loader = MemoryLoader::new()
        .with("manifest.json", MANIFEST)
        .with("en.l20n", "")
        .with(
            "ru.l20n",
            r#"files[@plural($n)] = { one: "файл", few: "файла", *many: "файлов" };"#,
        );
    let mut t = Translator::builder().loader(Box::new(loader)).build();
    t.import_manifest("manifest.json").unwrap();
    t.set_locale("ru").unwrap();

    assert_eq!(t.translate_with("files", &vars! { "n" => 1 }), "файл");
    assert_eq!(t.translate_with("files", &vars! { "n" => 2 }), "файла");
    assert_eq!(t.translate_with("files", &vars! { "n" => 5 }), "файлов");
}

#[test]
fn index_miss_falls_back_to_default_branch() {
    // English has no "few" category; 2 maps to "other", which is absent
    let t = translator(r#"files[@plural($n)] = { one: "one file", *some: "some files" };"#);
    assert_eq!(t.translate_with("files", &vars! { "n" => 2 }), "some files");
}

#[test]
fn static_global_substitution() {
    let mut t = translator(r#"note = "Running on {@os}";"#);
    t.add_global("os", "linux");
    assert_eq!(t.translate("note"), "Running on linux");
}

#[test]
fn provider_global_is_resolved_lazily() {
    let mut t = translator(r#"note = "Platform: {@platform}";"#);
    t.add_global("platform", Global::provider(|| Value::from("desktop")));
    assert_eq!(t.translate("note"), "Platform: desktop");
}

#[test]
fn unknown_global_degrades_to_id() {
    let t = translator(r#"note = "Platform: {@platform}";"#);
    assert_eq!(t.translate("note"), "note");
}

struct Screen;

impl HashValue for Screen {
    fn collect(&self, info: &mut InfoCollector) {
        info.add("width", 1920);
        info.add_lazy("height", || 1080);
    }
}

#[test]
fn hash_global_fields_resolve() {
    let mut t = translator(r#"size = "{@screen.width}x{@screen.height}";"#);
    t.add_global("screen", Global::hash(Screen));
    assert_eq!(t.translate("size"), "1920x1080");
}

#[test]
fn hash_global_missing_field_uses_primary() {
    let mut t = translator(r#"size = "{@screen.depth}";"#);
    t.add_global("screen", Global::hash(Screen));
    assert_eq!(t.translate("size"), "1920");
}

struct User {
    gender: &'static str,
    name: &'static str,
}

impl HashValue for User {
    fn collect(&self, info: &mut InfoCollector) {
        info.add("gender", self.gender);
        info.add("name", self.name);
    }
}

#[test]
fn hash_external_fields_resolve() {
    let t = translator(r#"profile = "{$user.name} ({$user.gender})";"#);
    let user = Value::hash(User {
        gender: "feminine",
        name: "Ana",
    });
    assert_eq!(
        t.translate_with("profile", &vars! { "user" => user }),
        "Ana (feminine)"
    );
}

#[test]
fn hash_external_selects_branch_by_field() {
    let t = translator(
        r#"welcome[$user.gender] = {
            feminine: "Welcome back, madam {$user.name}",
           *masculine: "Welcome back, sir {$user.name}",
        };"#,
    );
    let user = Value::hash(User {
        gender: "feminine",
        name: "Ana",
    });
    assert_eq!(
        t.translate_with("welcome", &vars! { "user" => user }),
        "Welcome back, madam Ana"
    );
}

#[test]
fn bare_hash_external_cannot_render() {
    let t = translator(r#"profile = "{$user}";"#);
    let user = Value::hash(User {
        gender: "feminine",
        name: "Ana",
    });
    let err = t
        .try_translate("profile", &vars! { "user" => user })
        .unwrap_err();
    assert!(err.to_string().contains("cannot be rendered"));
}

#[test]
fn unknown_entity_suggests_close_names() {
    let t = translator(r#"greeting = "Hello!";"#);
    let err = t.try_translate("greetng", &vars! {}).unwrap_err();
    assert!(err.to_string().contains("greeting"));
}
