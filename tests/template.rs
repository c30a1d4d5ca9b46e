//! Tests for URI template expansion through the public API.

#[macro_use]
mod utils;

use std::cell::RefCell;

use generic_uri::template::{Context, ErrorKind, Processor, UriTemplate, Value};

#[test]
fn build_request_uri() {
    let template = UriTemplate::new("https://api.example.com{/version,resource}{?fields*}{#section}")
        .expect("valid template");
    let context: Context = [
        ("version", Value::from("v2")),
        ("resource", Value::from("user profiles")),
        ("fields", Value::from(&[("name", "A B"), ("sort", "-age")][..])),
        ("section", Value::Undefined),
    ]
    .into_iter()
    .collect();

    let uri = template.expand_uri(&context).expect("valid expansion");
    assert_eq!(uri.host(), Some("api.example.com"));
    assert_eq!(uri.path(), Some("/v2/user%20profiles"));
    assert_eq!(uri.query(), Some("name=A%20B&sort=-age"));
    assert_eq!(uri.fragment(), None);
    assert_eq!(
        uri.query_values().expect("query is present"),
        [
            ("name".to_owned(), Some("A B".to_owned())),
            ("sort".to_owned(), Some("-age".to_owned())),
        ]
    );
}

#[test]
fn context_updates() {
    let template = UriTemplate::new("/search{?q,page}").expect("valid template");
    let mut context = Context::new();
    context.insert("q", "rust");
    assert_eq!(template.expand(&context).expect("expandable"), "/search?q=rust");

    context.extend([("page", "2")]);
    assert_eq!(
        template.expand(&context).expect("expandable"),
        "/search?q=rust&page=2"
    );

    // Inserting an undefined value removes the variable.
    context.insert("q", Value::Undefined);
    assert!(context.get("q").is_none());
    assert_eq!(template.expand(&context).expect("expandable"), "/search?page=2");

    context.clear();
    assert_eq!(template.expand(&context).expect("expandable"), "/search");
}

#[test]
fn processor_sees_every_defined_variable() {
    let seen = RefCell::new(Vec::new());
    let processor = Processor::new().with_validate(|name, _value| {
        seen.borrow_mut().push(name.to_owned());
        true
    });
    let template = UriTemplate::new("{a}{/b}{?c,a}").expect("valid template");
    let context: Context = [("a", "1"), ("c", "3")].into_iter().collect();

    let expanded = template
        .expand_with(&context, &processor)
        .expect("every value is accepted");
    assert_eq!(expanded, "1?c=3&a=1");
    assert_eq!(*seen.borrow(), ["a", "c", "a"]);
}

#[test]
fn processor_rejects_value() {
    let processor = Processor::new().with_validate(|name, value| match (name, value) {
        ("id", Value::String(s)) => !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()),
        _ => true,
    });
    let template = UriTemplate::new("/items/{id}").expect("valid template");

    let ok: Context = [("id", "123")].into_iter().collect();
    assert_eq!(
        template.expand_uri_with(&ok, &processor).expect("accepted").to_string(),
        "/items/123"
    );

    let bad: Context = [("id", "../admin")].into_iter().collect();
    let err = template
        .expand_uri_with(&bad, &processor)
        .expect_err("rejected by the processor");
    assert_eq!(err.kind(), ErrorKind::InvalidTemplateValue);
    assert_eq!(err.location(), 7);
}

#[test]
fn parse_errors_have_locations() {
    for (template, kind, location) in [
        ("/a/{b", ErrorKind::UnclosedExpression, 3),
        ("/a/b}", ErrorKind::UnexpectedBrace, 4),
        ("/a/{}", ErrorKind::EmptyExpression, 3),
        ("{!x}", ErrorKind::ReservedOperator, 1),
        ("{x:10000}", ErrorKind::InvalidModifier, 2),
    ] {
        let err = UriTemplate::new(template).expect_err("invalid template");
        assert_eq!((err.kind(), err.location()), (kind, location), "template={template:?}");
        assert!(
            err.to_string().contains(&format!("at byte {location}")),
            "template={template:?}, err={err}"
        );
    }
}

#[test]
fn display_and_parse() {
    let source = "http://example.com/{+path}{?q*}";
    let template: UriTemplate = source.parse().expect("valid template");
    assert_eq_display!(template, source);
    assert_eq!(template.as_str(), source);
    assert_eq!(template.variables(), ["path", "q"]);
    assert_eq!(UriTemplate::try_from(source), Ok(template));
}
