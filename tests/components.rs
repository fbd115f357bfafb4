//! Integration tests for component calls at dynamic tag positions

use std::cell::Cell;
use std::rc::Rc;

use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use tdom::{html, render, t, BindingError, Component, Node, RenderError, Signature, Value};

fn heading() -> Component {
    Component::new(
        "Heading",
        Signature::new().optional("title", "My Title"),
        |props| Ok(t!("<h1>" {props.get("title")} "</h1>")),
    )
}

#[test]
fn test_default_prop() {
    let heading = heading();
    let markup = render(t!("<" {&heading} " />")).expect("Should render");
    assert_eq!(markup, "<h1>My Title</h1>");
}

#[test]
fn test_supplied_prop_overrides_default() {
    let heading = heading();
    let markup = render(t!("<" {&heading} " title=\"Welcome\" />")).expect("Should render");
    assert_eq!(markup, "<h1>Welcome</h1>");
}

#[test]
fn test_literal_prop_references_are_decoded() {
    let heading = heading();
    let markup = render(t!("<" {&heading} " title=\"Tom &amp; Jerry &#+65;\" />"))
        .expect("Should render");
    assert_eq!(markup, "<h1>Tom &amp; Jerry &amp;#+65;</h1>");
}

#[test]
fn test_callable_passed_as_prop() {
    let body = Component::new("Body", Signature::new().required("heading"), |props| {
        Ok(t!("<body><" {props.get("heading")} " /></body>"))
    });
    let other = Component::new("OtherHeading", Signature::new(), |_| {
        Ok(t!("<h1>Other</h1>"))
    });

    let markup = render(t!("<" {&body} " heading=" {&other} " />")).expect("Should render");
    assert_eq!(markup, "<body><h1>Other</h1></body>");
}

#[test]
fn test_invoked_once_per_call_position() {
    let calls = Rc::new(Cell::new(0));
    let counted = {
        let calls = Rc::clone(&calls);
        Component::new("Counted", Signature::new(), move |_| {
            calls.set(calls.get() + 1);
            Ok(t!("<i>x</i>"))
        })
    };
    // Emits its children twice
    let twice = Component::new("Twice", Signature::new().children(), |mut props| {
        let children = props.take_children().unwrap_or_default();
        let mut doubled = children.clone();
        doubled.extend(children);
        Ok(doubled)
    });

    let markup = render(t!("<" {&twice} "><" {&counted} " /></" {&twice} ">"))
        .expect("Should render");
    assert_eq!(markup, "<i>x</i><i>x</i>");
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_declared_children_default_to_empty() {
    let seen = Rc::new(Cell::new(None));
    let frame = {
        let seen = Rc::clone(&seen);
        Component::new("Frame", Signature::new().children(), move |props| {
            seen.set(props.children().map(<[Node]>::len));
            Ok(t!("<section></section>"))
        })
    };

    render(t!("<" {&frame} " />")).expect("Should render");
    assert_eq!(seen.get(), Some(0));
}

#[test]
fn test_children_param_declares_slot() {
    let card = Component::new(
        "Card",
        Signature::new().required("children"),
        |mut props| {
            let children = props.take_children().unwrap_or_default();
            Ok(t!("<div class=\"card\">" {children} "</div>"))
        },
    );

    let markup = render(t!("<" {&card} "><p>a</p>b</" {&card} ">")).expect("Should render");
    assert_eq!(markup, r#"<div class="card"><p>a</p>b</div>"#);
}

#[test]
fn test_undeclared_children_are_dropped() {
    let heading = Component::new("Heading", Signature::new().required("title"), |props| {
        Ok(t!("<h1>" {props.get("title")} "</h1>"))
    });

    let markup = render(t!("<" {&heading} " title=\"X\">ignored</" {&heading} ">"))
        .expect("Should render");
    assert_eq!(markup, "<h1>X</h1>");
    assert!(!markup.contains("ignored"));
}

#[test]
fn test_unknown_prop_is_binding_error() {
    let heading = heading();
    let result = render(t!("<" {&heading} " colour=\"red\" />"));
    match result {
        Err(RenderError::Binding(BindingError::UnknownProp { component, prop })) => {
            assert_eq!(component, "Heading");
            assert_eq!(prop, "colour");
        }
        other => panic!("Expected binding error, got {:?}", other),
    }
}

#[test]
fn test_missing_required_prop() {
    let greeting = Component::new("Greeting", Signature::new().required("name"), |props| {
        Ok(t!("<p>" {props.get("name")} "</p>"))
    });
    let result = render(t!("<" {&greeting} " />"));
    assert!(matches!(
        result,
        Err(RenderError::Binding(BindingError::MissingProp { ref prop, .. })) if prop == "name"
    ));
}

#[test]
fn test_children_attribute_is_reserved() {
    let card = Component::new("Card", Signature::new().children(), |_| Ok(Value::Null));
    let result = render(t!("<" {&card} " children=\"x\" />"));
    assert!(matches!(
        result,
        Err(RenderError::Binding(BindingError::ReservedChildren { .. }))
    ));
}

#[test]
fn test_kebab_case_props_and_rest() {
    let link = Component::new(
        "Link",
        Signature::new().required("data_id").rest(),
        |props| {
            let extra: Vec<String> = props.iter().skip(1).map(|(k, _)| k.clone()).collect();
            Ok(t!("<a data-id=" {props.get("data_id")} ">" {extra.join(",")} "</a>"))
        },
    );

    let markup = render(t!("<" {&link} " data-id=" {7} " aria-label=\"x\" hidden />"))
        .expect("Should render");
    assert_eq!(markup, r#"<a data-id="7">aria_label,hidden</a>"#);
}

#[test]
fn test_lazy_sequence_result() {
    let todos = Component::new("Todos", Signature::new().required("items"), |props| {
        let items = props
            .get("items")
            .and_then(Value::downcast_ref::<Vec<String>>)
            .cloned()
            .unwrap_or_default();
        Ok(Value::seq(items.into_iter().map(|item| t!("<li>" {item} "</li>"))))
    });

    let items = Value::any(vec![
        "first".to_string(),
        "second".to_string(),
        "third".to_string(),
    ]);
    let markup = render(t!("<" {&todos} " items=" {items} " />")).expect("Should render");
    assert_snapshot!(markup, @"<li>first</li><li>second</li><li>third</li>");
}

#[test]
fn test_nested_template_reentry_at_depth() {
    let mut component = Component::new("Leaf", Signature::new(), |_| Ok(t!("<b>leaf</b>")));
    for level in 0..5 {
        let inner = component.clone();
        component = Component::new(format!("Level{}", level), Signature::new(), move |_| {
            Ok(t!("<div><" {&inner} " /></div>"))
        });
    }

    let node = html(t!("<" {&component} " />")).expect("Should render");
    assert_eq!(
        node.to_string(),
        "<div><div><div><div><div><b>leaf</b></div></div></div></div></div>"
    );

    fn depth(node: &Node) -> usize {
        match node {
            Node::Element(el) => 1 + el.children.iter().map(depth).max().unwrap_or(0),
            Node::Fragment(children) => children.iter().map(depth).max().unwrap_or(0),
            _ => 0,
        }
    }
    assert_eq!(depth(&node), 6);
}

#[test]
fn test_component_in_text_position() {
    let heading = heading();
    let markup = render(t!("<header>" {&heading} "</header>")).expect("Should render");
    assert_eq!(markup, "<header><h1>My Title</h1></header>");
}

#[derive(Debug)]
struct Unavailable;

impl std::fmt::Display for Unavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "backend unavailable")
    }
}

impl std::error::Error for Unavailable {}

#[test]
fn test_user_error_propagates_unchanged() {
    let failing = Component::new("Failing", Signature::new(), |_| {
        Err::<Value, _>(RenderError::user(Unavailable))
    });
    let err = render(t!("<main><" {&failing} " /></main>")).unwrap_err();
    match err {
        RenderError::User(source) => assert!(source.downcast_ref::<Unavailable>().is_some()),
        other => panic!("Expected user error, got {:?}", other),
    }
}

#[test]
fn test_nested_render_error_passes_through_component() {
    let heading = heading();
    let page = Component::new("Page", Signature::new(), move |_| {
        let inner = html(t!("<" {&heading} " bogus=\"1\" />"))?;
        Ok(inner)
    });
    let err = render(t!("<" {&page} " />")).unwrap_err();
    assert!(matches!(
        err,
        RenderError::Binding(BindingError::UnknownProp { ref prop, .. }) if prop == "bogus"
    ));
}
