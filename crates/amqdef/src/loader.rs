// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Protocol definition document loader.
//!
//!
//! Parses the protocol's XML type schema (`<amqp>` root, `<section>`
//! children carrying `<type>` declarations) into the in-memory [`Schema`].
//! Section items other than type declarations are out of scope and
//! skipped. Item order is preserved from document order.

use crate::error::{GenError, GenResult};
use crate::schema::{Choice, Descriptor, Field, Schema, Section, TypeClass, TypeDef};
use roxmltree::{Document, Node};
use std::fs;
use std::path::Path;

/// Load a schema from a protocol definition document on disk.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> GenResult<Schema> {
    let content = fs::read_to_string(&path).map_err(|e| GenError::SchemaParse {
        detail: format!(
            "failed to read schema document {}: {}",
            path.as_ref().display(),
            e
        ),
    })?;
    load_from_str(&content)
}

/// Parse a protocol definition document.
pub fn load_from_str(xml: &str) -> GenResult<Schema> {
    let doc = Document::parse(xml).map_err(|e| GenError::SchemaParse {
        detail: format!("failed to parse schema document: {}", e),
    })?;

    let root = doc.root_element();
    if root.tag_name().name() != "amqp" {
        return Err(GenError::SchemaParse {
            detail: format!("expected <amqp> root, found <{}>", root.tag_name().name()),
        });
    }

    let mut sections = Vec::new();
    for section_node in root
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "section")
    {
        let name = required_attr(&section_node, "name")?;
        let mut types = Vec::new();
        for type_node in section_node
            .children()
            .filter(|n| n.is_element() && n.tag_name().name() == "type")
        {
            types.push(parse_type(&type_node)?);
        }
        log::debug!("loaded section `{}` with {} types", name, types.len());
        sections.push(Section::new(name).with_types(types));
    }

    Ok(Schema::new(sections))
}

fn parse_type(node: &Node<'_, '_>) -> GenResult<TypeDef> {
    let name = required_attr(node, "name")?;
    let class = match required_attr(node, "class")? {
        "composite" => TypeClass::Composite,
        "restricted" => TypeClass::Restricted,
        other => {
            return Err(GenError::SchemaParse {
                detail: format!("type `{}` has unknown class `{}`", name, other),
            })
        }
    };

    let mut ty = TypeDef {
        name: name.to_string(),
        class,
        source: node.attribute("source").unwrap_or_default().to_string(),
        fields: Vec::new(),
        descriptor: None,
        choices: Vec::new(),
    };

    for item in node.children().filter(Node::is_element) {
        match item.tag_name().name() {
            "field" => {
                ty.fields.push(Field {
                    name: required_attr(&item, "name")?.to_string(),
                    type_ref: required_attr(&item, "type")?.to_string(),
                    mandatory: flag_attr(&item, "mandatory"),
                    multiple: flag_attr(&item, "multiple"),
                });
            }
            "descriptor" => {
                if ty.descriptor.is_some() {
                    return Err(GenError::SchemaParse {
                        detail: format!("type `{}` declares more than one descriptor", name),
                    });
                }
                ty.descriptor = Some(Descriptor {
                    code: required_attr(&item, "code")?.to_string(),
                });
            }
            "choice" => {
                ty.choices.push(Choice::new(
                    required_attr(&item, "name")?,
                    required_attr(&item, "value")?,
                ));
            }
            // Doc elements and other item kinds are out of scope.
            _ => {}
        }
    }

    Ok(ty)
}

fn required_attr<'a>(node: &Node<'a, '_>, attr: &str) -> GenResult<&'a str> {
    node.attribute(attr).ok_or_else(|| GenError::SchemaParse {
        detail: format!(
            "<{}> element is missing required attribute `{}`",
            node.tag_name().name(),
            attr
        ),
    })
}

fn flag_attr(node: &Node<'_, '_>, attr: &str) -> bool {
    node.attribute(attr).map(|v| v == "true").unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::load_from_str;
    use crate::schema::TypeClass;

    const DOC: &str = r#"
<amqp name="messaging">
    <section name="transport">
        <doc><p>ignored prose</p></doc>
        <type name="open" class="composite" source="list">
            <descriptor name="amqp:open:list" code="0x00000000:0x00000010"/>
            <field name="container-id" type="string" mandatory="true"/>
            <field name="hostname" type="string"/>
            <field name="offered-capabilities" type="symbol" multiple="true"/>
        </type>
        <type name="role" class="restricted" source="boolean">
            <choice name="sender" value="false"/>
            <choice name="receiver" value="true"/>
        </type>
    </section>
    <section name="definitions">
        <type name="seconds" class="restricted" source="uint"/>
    </section>
</amqp>
"#;

    #[test]
    fn loads_sections_and_types_in_order() {
        let schema = load_from_str(DOC).unwrap();
        assert_eq!(schema.sections.len(), 2);
        assert_eq!(schema.sections[0].name, "transport");
        assert_eq!(schema.sections[0].types.len(), 2);
        assert_eq!(schema.sections[0].types[0].name, "open");
        assert_eq!(schema.sections[1].types[0].name, "seconds");
    }

    #[test]
    fn loads_type_items() {
        let schema = load_from_str(DOC).unwrap();
        let open = &schema.sections[0].types[0];
        assert_eq!(open.class, TypeClass::Composite);
        assert_eq!(
            open.descriptor.as_ref().unwrap().code,
            "0x00000000:0x00000010"
        );
        assert_eq!(open.fields.len(), 3);
        assert!(open.fields[0].mandatory);
        assert!(!open.fields[1].mandatory);
        assert!(open.fields[2].multiple);

        let role = &schema.sections[0].types[1];
        assert_eq!(role.class, TypeClass::Restricted);
        assert_eq!(role.source, "boolean");
        assert_eq!(role.choices.len(), 2);
        assert_eq!(role.choices[0].name, "sender");
        assert_eq!(role.choices[0].value, "false");
    }

    #[test]
    fn rejects_duplicate_descriptor() {
        let doc = r#"
<amqp name="x">
    <section name="s">
        <type name="t" class="composite">
            <descriptor code="00000000:00000001"/>
            <descriptor code="00000000:00000002"/>
        </type>
    </section>
</amqp>
"#;
        assert!(load_from_str(doc).is_err());
    }

    #[test]
    fn rejects_missing_attributes() {
        assert!(load_from_str(r#"<amqp><section name="s"><type name="t"/></section></amqp>"#).is_err());
        assert!(load_from_str(r#"<amqp><section><type name="t" class="composite"/></section></amqp>"#).is_err());
    }

    #[test]
    fn rejects_wrong_root() {
        assert!(load_from_str("<schema/>").is_err());
    }
}
