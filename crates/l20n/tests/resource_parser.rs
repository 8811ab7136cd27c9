//! Integration tests for .l20n resource file parsing.

use l20n::parser::{Body, Expr, Item, ParseError, Segment, parse_resource, parse_template};

fn entity(item: &Item) -> &l20n::parser::Entity {
    match item {
        Item::Entity(entity) => entity,
        Item::Import(path) => panic!("expected entity, got import '{path}'"),
    }
}

#[test]
fn simple_entity() {
    let items = parse_resource(r#"hello = "Hello, world!";"#).unwrap();
    assert_eq!(items.len(), 1);
    let e = entity(&items[0]);
    assert_eq!(e.name, "hello");
    assert!(e.index.is_none());
    assert!(e.attrs.is_empty());
    match &e.value {
        Body::Template(t) => assert_eq!(t.segments.len(), 1),
        Body::Hash(_) => panic!("expected template body"),
    }
}

#[test]
fn multiple_entities_and_comments() {
    let items = parse_resource(
        r#"
        // greetings
        hello = "Hello!";
        bye = "Bye!"; // trailing comment
    "#,
    )
    .unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(entity(&items[0]).name, "hello");
    assert_eq!(entity(&items[1]).name, "bye");
}

#[test]
fn import_directive() {
    let items = parse_resource(r#"import "common.l20n";"#).unwrap();
    assert_eq!(items, vec![Item::Import("common.l20n".to_string())]);
}

#[test]
fn entity_with_attributes() {
    let items = parse_resource(
        r#"
        exit = "Exit"
            .tooltip: "Quit the game",
            .confirm: "Really quit?";
    "#,
    )
    .unwrap();
    let e = entity(&items[0]);
    assert_eq!(e.attrs.len(), 2);
    assert_eq!(e.attrs[0].0, "tooltip");
    assert_eq!(e.attrs[1].0, "confirm");
    assert!(e.attr("tooltip").is_some());
    assert!(e.attr("missing").is_none());
}

#[test]
fn entity_with_index() {
    let items = parse_resource(r#"files[@plural($n)] = { one: "file", *other: "files" };"#)
        .unwrap();
    let e = entity(&items[0]);
    assert_eq!(
        e.index,
        Some(Expr::Call {
            name: "plural".to_string(),
            args: vec![Expr::External("n".to_string())],
        })
    );
}

#[test]
fn hash_with_default_branch() {
    let items = parse_resource(
        r#"
        files = {
            one: "file",
           *other: "files",
        };
    "#,
    )
    .unwrap();
    let e = entity(&items[0]);
    match &e.value {
        Body::Hash(hash) => {
            assert_eq!(hash.branches.len(), 2);
            assert!(!hash.branches[0].default);
            assert!(hash.branches[1].default);
            assert_eq!(hash.keys(), vec!["one".to_string(), "other".to_string()]);
            assert!(hash.default_body().is_some());
        }
        Body::Template(_) => panic!("expected hash body"),
    }
}

#[test]
fn nested_hash() {
    let items = parse_resource(
        r#"
        menu = {
            file: { open: "Open", close: "Close" },
           *help: "Help",
        };
    "#,
    )
    .unwrap();
    let e = entity(&items[0]);
    let Body::Hash(hash) = &e.value else {
        panic!("expected hash body");
    };
    let Some(Body::Hash(inner)) = hash.get("file") else {
        panic!("expected nested hash");
    };
    assert!(inner.get("open").is_some());
}

#[test]
fn interpolation_expressions() {
    let items = parse_resource(
        r#"msg = "{$user.name} on {@os} has {count} ({-3}, {true}, {"raw"})";"#,
    )
    .unwrap();
    let e = entity(&items[0]);
    let Body::Template(template) = &e.value else {
        panic!("expected template body");
    };
    let exprs: Vec<&Expr> = template
        .segments
        .iter()
        .filter_map(|segment| match segment {
            Segment::Interpolation(expr) => Some(expr),
            Segment::Literal(_) => None,
        })
        .collect();
    assert_eq!(exprs.len(), 6);
    assert_eq!(
        exprs[0],
        &Expr::Property {
            base: Box::new(Expr::External("user".to_string())),
            name: "name".to_string(),
        }
    );
    assert_eq!(exprs[1], &Expr::Global("os".to_string()));
    assert_eq!(exprs[2], &Expr::Identifier("count".to_string()));
    assert_eq!(exprs[3], &Expr::Number(-3));
    assert_eq!(exprs[4], &Expr::Bool(true));
    assert_eq!(exprs[5], &Expr::String("raw".to_string()));
}

#[test]
fn brace_escapes() {
    let template = parse_template("literal {{braces}} here").unwrap();
    assert_eq!(
        template.segments,
        vec![Segment::Literal("literal {braces} here".to_string())]
    );
}

#[test]
fn entity_name_must_start_lowercase() {
    assert!(parse_resource(r#"Foo = "x";"#).is_err());
}

#[test]
fn error_reports_position() {
    let err = parse_resource("hello = \"Hi\";\n???").unwrap_err();
    match err {
        ParseError::Syntax { line, column, .. } => {
            assert_eq!(line, 2);
            assert_eq!(column, 1);
        }
        other => panic!("expected syntax error, got {other:?}"),
    }
}

#[test]
fn missing_semicolon_is_an_error() {
    assert!(parse_resource(r#"hello = "Hi""#).is_err());
}

#[test]
fn parse_is_deterministic() {
    let source = r#"
        files[@plural($n)] = { one: "file", *other: "{$n} files" };
        exit = "Exit" .tooltip: "Quit";
    "#;
    let first = parse_resource(source).unwrap();
    let second = parse_resource(source).unwrap();
    assert_eq!(first, second);
}
