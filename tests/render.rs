//! Integration tests for parsing, resolution and serialization of plain markup

use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use tdom::{
    html, render, render_with_config, t, HtmlConfig, NormalizationError, ParseError,
    RenderConfig, RenderError, Template, Value,
};

#[test]
fn test_static_markup_is_verbatim() {
    let input = concat!(
        r#"<!DOCTYPE html><html><head><meta charset="utf-8" /><title>Demo</title></head>"#,
        r#"<body><p class="lead">one &amp; two</p><!-- note -->"#,
        r#"<input type="checkbox" checked /></body></html>"#,
    );
    let markup = render(input).expect("Should render");
    assert_eq!(markup, input);
}

#[test]
fn test_static_markup_keeps_references_as_written() {
    let input = r#"<p title="it&#39;s" data-x='say "hi"'>&quot;hi&quot;&nbsp;x &gt; a > b</p>"#;
    let markup = render(input).expect("Should render");
    assert_eq!(
        markup,
        r#"<p title="it&#39;s" data-x="say &quot;hi&quot;">&quot;hi&quot;&nbsp;x &gt; a > b</p>"#
    );
}

#[test]
fn test_unquoted_url_attributes() {
    let markup = render("<a href=/docs/x>go</a><img src=/a.png/>").expect("Should render");
    assert_eq!(markup, r#"<a href="/docs/x">go</a><img src="/a.png" />"#);
}

#[test]
fn test_static_markup_keeps_whitespace() {
    let input = "<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>";
    assert_eq!(render(input).expect("Should render"), input);
}

#[test]
fn test_text_escaping() {
    let text = "a < b & c";
    let safe = Value::safe("a < b & c");
    let markup = render(t!("<p>" {text} "</p><p>" {safe} "</p>")).expect("Should render");
    assert_eq!(markup, "<p>a &lt; b &amp; c</p><p>a < b & c</p>");
}

#[test]
fn test_attribute_escaping() {
    let title = r#"say "hi" & <go>"#;
    let markup = render(t!("<a title=" {title} "></a>")).expect("Should render");
    assert_snapshot!(markup, @r#"<a title="say &quot;hi&quot; &amp; &lt;go&gt;"></a>"#);
}

#[test]
fn test_quoted_and_unquoted_attribute_forms() {
    let id = "x";
    let markup = render(t!(
        "<div a='single' b=bare c=\"" {id} "\" d=" {id} "></div>"
    ))
    .expect("Should render");
    assert_eq!(markup, r#"<div a="single" b="bare" c="x" d="x"></div>"#);
}

#[test]
fn test_conditional_rendering() {
    let shown = Some("yes");
    let hidden: Option<&str> = None;
    let markup = render(t!("<p>" {shown} {hidden} {false} "</p>")).expect("Should render");
    assert_eq!(markup, "<p>yes</p>");
}

#[test]
fn test_boolean_and_null_attributes() {
    let markup = render(t!(
        "<option selected=" {true} " disabled=" {false} " label=" {None::<String>} ">x</option>"
    ))
    .expect("Should render");
    assert_eq!(markup, "<option selected>x</option>");
}

#[test]
fn test_duplicate_attributes_last_write_wins() {
    let markup = render(r#"<p id="a" class="c" id="b"></p>"#).expect("Should render");
    assert_eq!(markup, r#"<p class="c" id="b"></p>"#);
}

#[test]
fn test_names_are_lowercased() {
    let markup = render(r#"<DIV Class="x"><Span></SPAN></DIV>"#).expect("Should render");
    assert_eq!(markup, r#"<div class="x"><span></span></div>"#);
}

#[test]
fn test_void_elements_close_implicitly() {
    let markup = render("<p>a<br>b<img src=\"x.png\"></p>").expect("Should render");
    assert_eq!(markup, r#"<p>a<br />b<img src="x.png" /></p>"#);
}

#[test]
fn test_html_style_void_config() {
    let config = RenderConfig::new().with_html(HtmlConfig::new().with_self_closing_void(false));
    let markup = render_with_config("<hr /><div />", &config).expect("Should render");
    assert_eq!(markup, "<hr><div></div>");
}

#[test]
fn test_sequence_of_templates() {
    let rows = Value::seq((1..=3).map(|n| t!("<tr><td>" {n} "</td></tr>")));
    let markup = render(t!("<table>" {rows} "</table>")).expect("Should render");
    assert_snapshot!(
        markup,
        @"<table><tr><td>1</td></tr><tr><td>2</td></tr><tr><td>3</td></tr></table>"
    );
}

#[test]
fn test_sequence_interpolated_twice() {
    let once = Value::seq(vec!["a", "b"]);
    let result = render(t!("<p>" {once.clone()} "</p><p>" {once} "</p>"));
    assert!(matches!(
        result,
        Err(RenderError::Normalization(NormalizationError::Exhausted { .. }))
    ));
}

#[test]
fn test_script_body_is_raw() {
    let markup = render("<script>if (a < b && c > d) { go(); }</script>").expect("Should render");
    assert_eq!(markup, "<script>if (a < b && c > d) { go(); }</script>");
}

#[test]
fn test_script_interpolation_cannot_close_element() {
    let code = "x = '</script><b>';";
    let markup = render(t!("<script>" {code} "</script>")).expect("Should render");
    assert_eq!(markup, r"<script>x = '<\/script><b>';</script>");
}

#[test]
fn test_script_close_split_across_literal_and_value() {
    let payload = "/script><img src=x onerror=alert(1)>";
    let markup = render(t!("<script>var s = '<" {payload} "';</script>")).expect("Should render");
    assert_eq!(
        markup,
        r"<script>var s = '<\/script><img src=x onerror=alert(1)>';</script>"
    );
}

#[test]
fn test_comment_value_cannot_open_markup() {
    let payload = "><img src=x onerror=alert(1)>";
    let markup = render(t!("<!--" {payload} "-->")).expect("Should render");
    assert_eq!(markup, "<!--&gt;<img src=x onerror=alert(1)>-->");

    let payload = "-><b>";
    let markup = render(t!("<!--" {payload} "-->")).expect("Should render");
    assert_eq!(markup, "<!---&gt;<b>-->");
}

#[test]
fn test_comment_interpolation_is_escaped() {
    let note = "done --> really";
    let markup = render(t!("<!-- " {note} " -->")).expect("Should render");
    assert_eq!(markup, "<!-- done --&gt; really -->");
}

#[test]
fn test_unrenderable_value_is_error() {
    let opaque = Value::any(vec![1u8, 2, 3]);
    let result = render(t!("<p>" {opaque} "</p>"));
    match result {
        Err(RenderError::Normalization(NormalizationError::Unrecognized { kind, origin })) => {
            assert_eq!(kind, "opaque");
            assert_eq!(origin.to_string(), "interpolation `{opaque}`");
        }
        other => panic!("Expected normalization error, got {:?}", other),
    }
}

#[test]
fn test_parse_error_aborts_render() {
    let result = render("<div><span></div>");
    let Err(RenderError::Parse(errors)) = result else {
        panic!("Expected parse errors");
    };
    assert!(matches!(
        &errors[0],
        ParseError::MismatchedTag { expected, found, .. } if expected == "span" && found == "div"
    ));
}

#[test]
fn test_parse_error_report_points_at_source() {
    let id = 1;
    let template = t!("<a href=\"/x/" {id} "\"></a>");
    let source = template.source();
    let errors = match html(template) {
        Err(RenderError::Parse(errors)) => errors,
        other => panic!("Expected parse errors, got {:?}", other),
    };
    let ParseError::MixedAttributeValue { name, span } = &errors[0] else {
        panic!("Expected mixed attribute error, got {:?}", errors[0]);
    };
    assert_eq!(name, "href");
    assert!(span.end <= source.len());

    let report = errors[0].format(&source, "page.html");
    assert!(report.contains("page.html"));
    assert!(report.contains("href"));
}

#[test]
fn test_template_from_parts() {
    let template = Template::builder()
        .text("<b>")
        .interpolate(5, "count")
        .text("</b>")
        .build();
    assert_eq!(template.source(), "<b>{count}</b>");
    assert_eq!(render(template).expect("Should render"), "<b>5</b>");
}

#[test]
fn test_config_from_toml_file() {
    let path = std::env::temp_dir().join(format!("tdom-config-{}.toml", std::process::id()));
    std::fs::write(&path, "[html]\nself_closing_void = false\n").expect("Should write");
    let config = RenderConfig::from_file(&path).expect("Should load");
    let _ = std::fs::remove_file(&path);

    assert!(!config.svg);
    assert_eq!(render_with_config("<br />", &config).expect("Should render"), "<br>");
}
