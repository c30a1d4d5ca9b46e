//! Tests for URI resolution.

#[macro_use]
mod utils;

use generic_uri::Uri;

/// Test cases for resolution.
// [(base, [(input, output)])]
const TEST_CASES: &[(&str, &[(&str, &str)])] = &[
    // RFC 3986, section 5.4.1.
    (
        "http://a/b/c/d;p?q",
        &[
            ("g:h", "g:h"),
            ("g", "http://a/b/c/g"),
            ("./g", "http://a/b/c/g"),
            ("g/", "http://a/b/c/g/"),
            ("/g", "http://a/g"),
            ("//g", "http://g"),
            ("?y", "http://a/b/c/d;p?y"),
            ("g?y", "http://a/b/c/g?y"),
            ("#s", "http://a/b/c/d;p?q#s"),
            ("g#s", "http://a/b/c/g#s"),
            ("g?y#s", "http://a/b/c/g?y#s"),
            (";x", "http://a/b/c/;x"),
            ("g;x", "http://a/b/c/g;x"),
            ("g;x?y#s", "http://a/b/c/g;x?y#s"),
            ("", "http://a/b/c/d;p?q"),
            (".", "http://a/b/c/"),
            ("./", "http://a/b/c/"),
            ("..", "http://a/b/"),
            ("../", "http://a/b/"),
            ("../g", "http://a/b/g"),
            ("../..", "http://a/"),
            ("../../", "http://a/"),
            ("../../g", "http://a/g"),
        ],
    ),
    // RFC 3986, section 5.4.2.
    (
        "http://a/b/c/d;p?q",
        &[
            ("../../../g", "http://a/g"),
            ("../../../../g", "http://a/g"),
            ("/./g", "http://a/g"),
            ("/../g", "http://a/g"),
            ("g.", "http://a/b/c/g."),
            (".g", "http://a/b/c/.g"),
            ("g..", "http://a/b/c/g.."),
            ("..g", "http://a/b/c/..g"),
            ("./../g", "http://a/b/g"),
            ("./g/.", "http://a/b/c/g/"),
            ("g/./h", "http://a/b/c/g/h"),
            ("g/../h", "http://a/b/c/h"),
            ("g;x=1/./y", "http://a/b/c/g;x=1/y"),
            ("g;x=1/../y", "http://a/b/c/y"),
            ("g?y/./x", "http://a/b/c/g?y/./x"),
            ("g?y/../x", "http://a/b/c/g?y/../x"),
            ("g#s/./x", "http://a/b/c/g#s/./x"),
            ("g#s/../x", "http://a/b/c/g#s/../x"),
            ("http:g", "http:g"),
        ],
    ),
];

#[test]
fn resolve() {
    for (base, pairs) in TEST_CASES {
        let base = utils::uri(base);

        for (target, expected) in *pairs {
            let resolved = base.resolve(*target).expect("should be resolvable");
            assert_eq_display!(resolved, expected, "base={base}, target={target:?}");

            let by_uri = base
                .resolve(&utils::uri(target))
                .expect("should be resolvable");
            assert!(resolved.eq_raw(&by_uri), "base={base}, target={target:?}");
        }
    }
}

#[test]
fn merge_in_place() {
    for (base, pairs) in TEST_CASES {
        for (target, expected) in *pairs {
            let mut uri = utils::uri(base);
            uri.merge_mut(*target).expect("should be resolvable");
            assert_eq_display!(uri, expected, "base={base}, target={target:?}");
        }
    }
}

#[test]
fn percent_encoded_dots() {
    // [(base, ref, result)]
    const TEST_CASES: &[(&str, &str, &str)] = &[
        ("scheme://a", ".", "scheme://a/"),
        ("scheme://a", "%2e", "scheme://a/"),
        ("scheme://a", "%2E", "scheme://a/"),
        ("scheme://a/b/c", ".", "scheme://a/b/"),
        ("scheme://a/b/c", "%2e", "scheme://a/b/"),
        ("scheme://a/b/c", "%2E", "scheme://a/b/"),
        ("scheme://a/b/c", "./g", "scheme://a/b/g"),
        ("scheme://a/b/c", "%2e/g", "scheme://a/b/g"),
        ("scheme://a/b/c", "%2E/g", "scheme://a/b/g"),
        ("scheme://a/b/c/d/e/f", "../../../g", "scheme://a/b/g"),
        (
            "scheme://a/b/c/d/e/f",
            "%2E%2E/%2E%2e/%2E./g",
            "scheme://a/b/g",
        ),
        (
            "scheme://a/b/c/d/e/f",
            "%2e%2E/%2e%2e/%2e./g",
            "scheme://a/b/g",
        ),
        ("scheme://a/b/c/d/e/f", ".%2E/.%2e/../g", "scheme://a/b/g"),
    ];

    // Encoded dots are removed once the result is normalized.
    for (base, reference, expected) in TEST_CASES {
        let resolved = utils::uri(base)
            .resolve(*reference)
            .and_then(|uri| uri.normalize())
            .expect("should be resolvable");
        assert_eq_display!(resolved, *expected, "base={base}, reference={reference}");
    }
}

#[test]
fn join_and_operator() {
    let base = utils::uri("http://example.com/a/b/c");
    let joined = base.join(["../d/", "e?x", "#frag"]).expect("should be resolvable");
    assert_eq_display!(joined, "http://example.com/a/d/e?x#frag");

    let added = (&base + "../d/")
        .and_then(|uri| &uri + "e?x")
        .and_then(|uri| &uri + &utils::uri("#frag"))
        .expect("should be resolvable");
    assert!(joined.eq_raw(&added));
}

/// Resolving the relative reference should give the target back.
#[test]
fn route_round_trip() {
    let uris = [
        "http://example.com/",
        "http://example.com/a/b/c",
        "http://example.com/a/b/",
        "http://example.com/a/d?q#f",
        "http://example.com/x:y/z",
        "http://example.com//double",
        "http://user@example.com/a",
        "https://example.com/a",
        "http://example.org:8080/a",
        "urn:example:a:b",
        "foo:x/y/z",
    ];
    for base in uris {
        let base = utils::uri(base);
        for target in uris {
            let target = utils::uri(target);
            let relative = target.route_from(&base).expect("both are absolute");
            let resolved = base
                .normalize()
                .and_then(|base| base.resolve(&relative))
                .expect("should be resolvable");
            assert_eq!(resolved, target, "base={base}, target={target}, relative={relative}");
            assert!(
                resolved.eq_raw(&target.normalize().expect("normalizable")),
                "base={base}, target={target}, relative={relative}"
            );
        }
    }
}

#[test]
fn route_to_is_route_from() {
    let base = utils::uri("http://example.com/a/b");
    let target = utils::uri("http://example.com/c");
    let to = base.route_to(&target).expect("both are absolute");
    let from = target.route_from(&base).expect("both are absolute");
    assert!(to.eq_raw(&from));
    assert_eq_display!(to, "/c");
    assert!(Uri::matches(&to, "/c"));
}
