//! Lua bindings for `tagtree`.
//!
//! [`register`] installs a global table `h` whose functions build nodes as
//! plain Lua tables (serialized [`OwnedNode`]s) and render them:
//!
//! ```lua
//! local list = h.add(h.ul{}, h.add(h.li{}, "a"), h.add(h.li{}, "b"))
//! print(h.render(list))
//! ```

use mlua::{LuaSerdeExt, Value, Variadic};
use tagtree::{
    builder::{Builder, EXPLICIT_CLOSE_TAGS, SELF_CLOSING_TAGS},
    bumpalo::{collections::Vec as BumpVec, Bump},
    Attribute, Document, Element, ElementKind, Node, OwnedNode,
};

/// Install the `h` table into the globals of `lua`.
pub fn register(lua: &mlua::Lua) -> mlua::Result<()> {
    let table = lua.create_table()?;

    table.set(
        "element",
        lua.create_function(|lua, (name, attributes): (String, Option<mlua::Table>)| {
            build_node(lua, attributes, |b, attributes| b.element(&name, attributes))
        })?,
    )?;

    for name in SELF_CLOSING_TAGS.iter().chain(EXPLICIT_CLOSE_TAGS) {
        table.set(*name, build_tag_function(lua, *name)?)?;
    }

    table.set(
        "css",
        lua.create_function(|lua, (url, attributes): (String, Option<mlua::Table>)| {
            build_node(lua, attributes, |b, attributes| b.css(&url, attributes))
        })?,
    )?;

    table.set(
        "js",
        lua.create_function(|lua, (url, attributes): (String, Option<mlua::Table>)| {
            build_node(lua, attributes, |b, attributes| b.js(&url, attributes))
        })?,
    )?;

    table.set(
        "doctype",
        lua.create_function(|lua, attributes: Option<mlua::Table>| {
            build_node(lua, attributes, |b, attributes| b.doctype(attributes))
        })?,
    )?;

    table.set(
        "text",
        lua.create_function(|lua, text: String| lua.to_value(&OwnedNode::from(text)))?,
    )?;

    table.set(
        "add",
        lua.create_function(|lua, (node, children): (Value, Variadic<Value>)| {
            add_children(lua, node, &children)
        })?,
    )?;

    table.set(
        "add_if",
        lua.create_function(
            |lua, (node, condition, children): (Value, bool, Variadic<Value>)| {
                if condition {
                    add_children(lua, node, &children)
                } else {
                    Ok(node)
                }
            },
        )?,
    )?;

    table.set(
        "render",
        lua.create_function(|lua, children: Variadic<Value>| {
            let mut nodes = vec![];
            for child in children.iter() {
                process_child_value(lua, "document", child, &mut nodes)?;
            }
            let bump = Bump::new();
            let nodes: Vec<Node> = nodes.into_iter().map(|n| n.into_bump(&bump)).collect();
            let document = Document::new(&bump).add(nodes);
            Ok(document.render())
        })?,
    )?;

    lua.globals().set("h", table)?;
    tracing::debug!(
        "Registered {} tag constructors",
        SELF_CLOSING_TAGS.len() + EXPLICIT_CLOSE_TAGS.len()
    );

    Ok(())
}

fn build_tag_function(lua: &mlua::Lua, name: &'static str) -> mlua::Result<mlua::Function> {
    let kind = ElementKind::for_tag(name);
    lua.create_function(move |lua, attributes: Option<mlua::Table>| {
        build_node(lua, attributes, |b, attributes| b.tag(name, kind, attributes))
    })
}

/// Build an element with the core builder and hand it to Lua as an owned table.
fn build_node(
    lua: &mlua::Lua,
    attributes: Option<mlua::Table>,
    build: impl for<'bump> FnOnce(&Builder<'bump>, BumpVec<'bump, Attribute<'bump>>) -> Element<'bump>,
) -> mlua::Result<Value> {
    let bump = Bump::new();
    let b = Builder::new(&bump);
    let mut collected = BumpVec::new_in(&bump);
    if let Some(attributes) = attributes {
        for pair in attributes.pairs::<Value, Value>() {
            let (key, value) = pair?;
            let attribute = match key {
                Value::Integer(_) | Value::Number(_) => b.attr(scalar_string(&value)?.as_str()),
                Value::String(key) => {
                    b.attr((key.to_string_lossy().as_str(), scalar_string(&value)?))
                }
                other => {
                    return Err(mlua::Error::RuntimeError(format!(
                        "Invalid attribute key: {}",
                        other.type_name()
                    )))
                }
            };
            collected.push(attribute);
        }
    }
    let node: Node = build(&b, collected).into();
    lua.to_value(&node.to_owned_node())
}

fn scalar_string(value: &Value) -> mlua::Result<String> {
    match value {
        Value::String(s) => Ok(s.to_string_lossy()),
        Value::Integer(i) => Ok(i.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(mlua::Error::RuntimeError(format!(
            "Invalid attribute value: {}",
            other.type_name()
        ))),
    }
}

fn add_children(lua: &mlua::Lua, node: Value, children: &[Value]) -> mlua::Result<Value> {
    let mut node: OwnedNode = lua.from_value(node)?;
    match &mut node {
        OwnedNode::Element {
            name,
            children: existing,
            ..
        } => {
            for child in children {
                process_child_value(lua, name, child, existing)?;
            }
        }
        OwnedNode::Text { .. } => {
            return Err(mlua::Error::RuntimeError(
                "Cannot add children to a text node".to_string(),
            ))
        }
    }
    lua.to_value(&node)
}

fn unsupported(parent: &str, found: String) -> mlua::Error {
    mlua::Error::external(tagtree::Error::UnsupportedChildType {
        parent: parent.to_string(),
        found,
    })
}

/// Classify a Lua value and append it to `output`.
fn process_child_value(
    lua: &mlua::Lua,
    parent: &str,
    child: &Value,
    output: &mut Vec<OwnedNode>,
) -> mlua::Result<()> {
    match child {
        Value::Nil => {}
        Value::String(_) | Value::Integer(_) | Value::Number(_) => {
            output.push(OwnedNode::from(scalar_string(child)?));
        }
        Value::Table(table) => {
            if let Ok(node) = lua.from_value::<OwnedNode>(child.clone()) {
                output.push(node);
                return Ok(());
            }
            if table.clone().pairs::<Value, Value>().count() != table.raw_len() {
                return Err(unsupported(parent, "table".to_string()));
            }
            for item in table.sequence_values::<Value>() {
                let item = item?;
                let node = lua.from_value::<OwnedNode>(item.clone()).map_err(|_| {
                    unsupported(parent, format!("{} in sequence", item.type_name()))
                })?;
                output.push(node);
            }
        }
        other => return Err(unsupported(parent, other.type_name().to_string())),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn eval(code: &str) -> mlua::Result<String> {
        let lua = mlua::Lua::new();
        register(&lua)?;
        lua.load(code).eval()
    }

    #[test]
    fn renders_a_list() {
        let output = eval(
            r#"return h.render(h.add(h.ul{}, h.add(h.li{}, "a"), h.add(h.li{}, "b")))"#,
        )
        .unwrap();
        assert_eq!(output, "<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>\n");
    }

    #[test]
    fn keyword_attributes() {
        let output = eval(r#"return h.render(h.add(h.div{cls = "row"}, "x"))"#).unwrap();
        assert_eq!(output, "<div class=\"row\">x</div>\n");
    }

    #[test]
    fn shorthands() {
        let output = eval(
            r#"return h.render(h.doctype{"html"}, h.css("a.css"), h.add(h.js("a.js"), nil))"#,
        )
        .unwrap();
        assert_eq!(
            output,
            concat!(
                "<!DOCTYPE html>\n\n",
                "<link href=\"a.css\" type=\"text/css\" rel=\"stylesheet\"/>\n",
                "<script src=\"a.js\" type=\"text/javascript\" charset=\"utf-8\"></script>\n",
            )
        );
    }

    #[test]
    fn numbers_nil_and_sequences() {
        let output = eval(
            r#"
            local items = {}
            for i = 1, 2 do items[i] = h.add(h.li{}, i) end
            return h.render(h.add(h.ol{}, nil, items))
            "#,
        )
        .unwrap();
        assert_eq!(output, "<ol>\n  <li>1</li>\n  <li>2</li>\n</ol>\n");
    }

    #[test]
    fn text_nodes() {
        let output = eval(r#"return h.render(h.add(h.p{}, h.text("hi")), h.text(5))"#).unwrap();
        assert_eq!(output, "<p>hi</p>\n5");
    }

    #[test]
    fn add_if_skips_when_false() {
        let output =
            eval(r#"return h.render(h.add_if(h.add_if(h.p{}, false, "no"), true, "yes"))"#)
                .unwrap();
        assert_eq!(output, "<p>yes</p>\n");
    }

    #[rstest]
    #[case(r#"h.add(h.div{}, true)"#, "boolean")]
    #[case(r#"h.add(h.div{}, function() end)"#, "function")]
    #[case(r#"h.add(h.div{}, {"loose"})"#, "string in sequence")]
    #[case(r#"h.add(h.div{}, {answer = 42})"#, "table")]
    fn unsupported_children(#[case] code: &str, #[case] found: &str) {
        let err = eval(&format!("return h.render({code})")).unwrap_err();
        assert!(
            err.to_string()
                .contains(&format!("cannot add item to div of type {found}")),
            "unexpected error: {err}"
        );
    }
}
