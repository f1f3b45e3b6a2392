#![cfg(test)]

use core::error::Error;
use css_minify::{Compatibility, Options, minify};

fn init_logging() {
    let _logger = env_logger::builder().is_test(true).try_init();
}

fn compact(source: &str) -> String {
    minify(source, &Options::default()).styles
}

/// # Panics
/// Panics if adjacent rules are not merged end to end.
#[test]
fn merges_adjacent_rules() {
    init_logging();
    assert_eq!(
        compact("a { color: red }\na { font-size: 1px }"),
        "a{color:red;font-size:1px}"
    );
    assert_eq!(compact(".a{color:red}.b{color:red}"), ".a,.b{color:red}");
}

/// # Panics
/// Panics if the earlier duplicate survives.
#[test]
fn removes_duplicate_rules() {
    init_logging();
    assert_eq!(
        compact("a{color:red}b{color:blue}a{color:red}"),
        "b{color:blue}a{color:red}"
    );
}

/// # Panics
/// Panics if an overridden non-adjacent declaration survives.
#[test]
fn reduces_non_adjacent_rules() {
    init_logging();
    assert_eq!(
        compact("a{color:red;top:0}b{color:blue}a{color:red}"),
        "a{top:0}b{color:blue}a{color:red}"
    );
    assert_eq!(
        compact("a{color:red}b{top:0}a{color:blue}"),
        "b{top:0}a{color:blue}"
    );
}

/// # Panics
/// Panics if rules inside media blocks are not optimized.
#[test]
fn optimizes_inside_media_blocks() {
    init_logging();
    assert_eq!(
        compact("@media print{a{color:red}a{top:0}}@import url(x.css);"),
        "@media print{a{color:red;top:0}}@import url(x.css)"
    );
}

/// # Panics
/// Panics if the compatibility profile does not guard body merges.
///
/// # Errors
/// Returns an error if the options fail to parse.
#[test]
fn compatibility_guards_body_merges() -> Result<(), Box<dyn Error>> {
    init_logging();
    let source = "a:focus{color:red}p{color:red}";
    let ie7 = Options::from_json(r#"{"compatibility": "ie7-compatible"}"#)?;
    assert_eq!(ie7.compatibility, Compatibility::Ie7);
    assert_eq!(minify(source, &ie7).styles, source);
    assert_eq!(compact(source), "a:focus,p{color:red}");
    Ok(())
}

/// # Panics
/// Panics if beautified output differs.
///
/// # Errors
/// Returns an error if the options fail to parse.
#[test]
fn beautifies_output() -> Result<(), Box<dyn Error>> {
    init_logging();
    let options = Options::from_json(r#"{"beautify": true, "advanced": false}"#)?;
    let output = minify("a{color:red;top:0}", &options).styles;
    assert_eq!(
        output.lines().collect::<Vec<_>>(),
        vec!["a {", "  color: red;", "  top: 0;", "}"]
    );
    Ok(())
}

/// # Panics
/// Panics if the non-advanced mode changes the structure.
#[test]
fn advanced_off_only_reformats() {
    init_logging();
    let options = Options {
        advanced: false,
        ..Options::default()
    };
    assert_eq!(
        minify("a{color:red}a{color:red}", &options).styles,
        "a{color:red}a{color:red}"
    );
}

/// # Panics
/// Panics if giving up is not reported as a warning.
#[test]
fn low_pass_ceiling_warns() {
    init_logging();
    let options = Options {
        max_passes: 2,
        ..Options::default()
    };
    let result = minify("a{color:red}a{color:red}", &options);
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.styles, "a{color:red}");
}

/// # Panics
/// Panics if separate `@font-face` blocks are merged or emptied.
#[test]
fn keeps_every_font_face() {
    init_logging();
    let adjacent = "@font-face{font-family:A;src:url(a.woff)}@font-face{font-family:B;src:url(b.woff)}";
    assert_eq!(compact(adjacent), adjacent);
    let apart = "@font-face{font-family:A;src:url(a.woff)}.x{top:0}@font-face{font-family:B;src:url(b.woff)}";
    assert_eq!(compact(apart), apart);
}

/// # Panics
/// Panics if merging rules rewrites quoted selector text.
#[test]
fn merged_selectors_keep_attribute_strings() {
    init_logging();
    assert_eq!(
        compact("a[href$=\"*.pdf\"]{color:red}b{color:red}"),
        "a[href$=\"*.pdf\"],b{color:red}"
    );
    assert_eq!(compact("a[title=\"x  y\"]{top:0}"), "a[title=\"x  y\"]{top:0}");
}

/// # Panics
/// Panics if custom properties differing only in case collapse.
#[test]
fn custom_properties_are_case_sensitive() {
    init_logging();
    assert_eq!(compact("a{--Main:1px;--main:2px}"), "a{--Main:1px;--main:2px}");
}

/// # Panics
/// Panics if merging rules drops a legacy fallback.
#[test]
fn merging_keeps_fallbacks() {
    init_logging();
    assert_eq!(
        compact("a{color:red}a{color:rgba(0,0,0,.5)}"),
        "a{color:red;color:rgba(0,0,0,.5)}"
    );
    let apart = "a{display:-webkit-box}b{top:0}a{display:flex}";
    assert_eq!(compact(apart), apart);
}

/// # Panics
/// Panics if the result does not serialize as expected.
///
/// # Errors
/// Returns an error if serialization fails.
#[test]
fn result_serializes_as_json() -> Result<(), Box<dyn Error>> {
    init_logging();
    let result = minify("a{top:0}a{top:0}", &Options::default());
    assert_eq!(
        serde_json::to_string(&result)?,
        r#"{"styles":"a{top:0}","warnings":[]}"#
    );
    Ok(())
}

