use roxmltree::{Document, Node};

use super::builtins::BSD_NAMESPACE;
use super::error::ReadError;

/// The kind tag of a schema record, taken from its element name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordKind {
    Enumeration,
    Opaque,
    Structured,
    Unsupported(String),
}

impl RecordKind {
    fn from_tag(tag: &str) -> Self {
        match tag {
            "EnumeratedType" => Self::Enumeration,
            "OpaqueType" => Self::Opaque,
            "StructuredType" => Self::Structured,
            other => Self::Unsupported(other.to_string()),
        }
    }
}

/// A `<Field>` of a structured type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    /// Referenced type, possibly still carrying a namespace prefix.
    pub type_name: String,
    /// Name of the sibling field holding this field's element count.
    pub length_field: Option<String>,
}

/// An `<EnumeratedValue>` of an enumerated type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumeratedValue {
    pub name: String,
    pub value: String,
}

/// One raw type description of the dictionary, in document order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemaRecord {
    pub kind: RecordKind,
    pub name: String,
    pub documentation: Option<String>,
    pub fields: Vec<FieldDescriptor>,
    pub values: Vec<EnumeratedValue>,
}

fn required_attribute<'a>(
    node: Node<'a, '_>,
    attribute: &'static str,
) -> Result<&'a str, ReadError> {
    node.attribute(attribute)
        .ok_or_else(|| ReadError::MissingAttribute {
            element: node.tag_name().name().to_string(),
            attribute,
            pos: node.document().text_pos_at(node.range().start),
        })
}

fn children_named<'a, 'input>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && child.tag_name().name() == name)
}

impl SchemaRecord {
    fn map_from_xml(node: Node) -> Result<Self, ReadError> {
        let kind = RecordKind::from_tag(node.tag_name().name());
        let name = required_attribute(node, "Name")?.to_string();

        let documentation = children_named(node, "Documentation")
            .filter_map(|doc| doc.text())
            .map(str::trim)
            .find(|text| !text.is_empty())
            .map(String::from);

        let fields = children_named(node, "Field")
            .map(|field| -> Result<_, ReadError> {
                Ok(FieldDescriptor {
                    name: required_attribute(field, "Name")?.to_string(),
                    type_name: required_attribute(field, "TypeName")?.to_string(),
                    length_field: field.attribute("LengthField").map(String::from),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let values = children_named(node, "EnumeratedValue")
            .map(|value| -> Result<_, ReadError> {
                Ok(EnumeratedValue {
                    name: required_attribute(value, "Name")?.to_string(),
                    value: required_attribute(value, "Value")?.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            kind,
            name,
            documentation,
            fields,
            values,
        })
    }
}

/// Reads every type description below the `<TypeDictionary>` root, skipping imports.
pub fn read_type_dictionary(document: &Document) -> Result<Vec<SchemaRecord>, ReadError> {
    let root = document.root_element();
    let tag = root.tag_name();
    if tag.name() != "TypeDictionary" || tag.namespace() != Some(BSD_NAMESPACE) {
        return Err(ReadError::UnexpectedRoot {
            found: tag.name().to_string(),
        });
    }

    root.children()
        .filter(|child| child.is_element())
        .filter(|child| child.tag_name().name() != "Import")
        .map(SchemaRecord::map_from_xml)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DICTIONARY: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<opc:TypeDictionary
  xmlns:opc="http://opcfoundation.org/BinarySchema/"
  xmlns:tns="http://opcfoundation.org/UA/"
  TargetNamespace="http://opcfoundation.org/UA/">
  <opc:Import Namespace="http://opcfoundation.org/BinarySchema/" />
  <opc:EnumeratedType Name="Color" LengthInBits="32">
    <opc:Documentation>
      Primary colors.
    </opc:Documentation>
    <opc:EnumeratedValue Name="Red" Value="0" />
    <opc:EnumeratedValue Name="Green" Value="1" />
  </opc:EnumeratedType>
  <opc:OpaqueType Name="Blob" />
  <opc:StructuredType Name="Palette" BaseType="ua:ExtensionObject">
    <opc:Field Name="NoOfColors" TypeName="opc:Int32" />
    <opc:Field Name="Colors" TypeName="tns:Color" LengthField="NoOfColors" />
  </opc:StructuredType>
  <opc:Union Name="Shape" />
</opc:TypeDictionary>"#;

    fn read(text: &str) -> Result<Vec<SchemaRecord>, ReadError> {
        let document = Document::parse(text)?;
        read_type_dictionary(&document)
    }

    #[test]
    fn reads_records_in_document_order() {
        let records = read(DICTIONARY).unwrap();
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Color", "Blob", "Palette", "Shape"]);
        assert_eq!(records[0].kind, RecordKind::Enumeration);
        assert_eq!(records[1].kind, RecordKind::Opaque);
        assert_eq!(records[2].kind, RecordKind::Structured);
        assert_eq!(records[3].kind, RecordKind::Unsupported("Union".into()));
    }

    #[test]
    fn reads_documentation_and_values() {
        let records = read(DICTIONARY).unwrap();
        let color = &records[0];
        assert_eq!(color.documentation.as_deref(), Some("Primary colors."));
        assert_eq!(
            color.values,
            vec![
                EnumeratedValue {
                    name: "Red".into(),
                    value: "0".into()
                },
                EnumeratedValue {
                    name: "Green".into(),
                    value: "1".into()
                },
            ]
        );
        assert_eq!(records[1].documentation, None);
    }

    #[test]
    fn reads_fields_with_length_references() {
        let records = read(DICTIONARY).unwrap();
        let palette = &records[2];
        assert_eq!(palette.fields.len(), 2);
        assert_eq!(palette.fields[0].type_name, "opc:Int32");
        assert_eq!(palette.fields[0].length_field, None);
        assert_eq!(palette.fields[1].type_name, "tns:Color");
        assert_eq!(palette.fields[1].length_field.as_deref(), Some("NoOfColors"));
    }

    #[test]
    fn rejects_foreign_root() {
        let err = read(r#"<schema xmlns="http://www.w3.org/2001/XMLSchema"/>"#).unwrap_err();
        assert!(matches!(err, ReadError::UnexpectedRoot { found } if found == "schema"));
    }

    #[test]
    fn reports_missing_attribute() {
        let text = r#"<opc:TypeDictionary xmlns:opc="http://opcfoundation.org/BinarySchema/">
  <opc:StructuredType Name="Broken">
    <opc:Field Name="Value" />
  </opc:StructuredType>
</opc:TypeDictionary>"#;
        let err = read(text).unwrap_err();
        match err {
            ReadError::MissingAttribute {
                element,
                attribute,
                pos,
            } => {
                assert_eq!(element, "Field");
                assert_eq!(attribute, "TypeName");
                assert_eq!(pos.row, 3);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn malformed_xml_propagates() {
        assert!(matches!(read("<opc:TypeDictionary"), Err(ReadError::Xml(_))));
    }
}
