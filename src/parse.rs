//! SVG parsing from XML.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::ast::*;
use crate::error::SvgslimError;

/// Parse an SVG string into a Document.
///
/// Whitespace text nodes, comments, CDATA sections and processing
/// instructions are all preserved; several optimization rules operate on
/// them and the serializer must round-trip untouched input faithfully.
pub fn parse_svg(svg: &str) -> Result<Document, SvgslimError> {
    let mut reader = Reader::from_str(svg);

    let mut xml_declaration = None;
    let mut doctype = None;
    let mut prolog = Vec::new();
    let mut root = None;

    loop {
        match reader.read_event()? {
            Event::Decl(decl) => {
                xml_declaration = Some(XmlDeclaration {
                    version: String::from_utf8_lossy(decl.version()?.as_ref()).into_owned(),
                    encoding: decl
                        .encoding()
                        .transpose()
                        .ok()
                        .flatten()
                        .map(|e| String::from_utf8_lossy(e.as_ref()).into_owned()),
                    standalone: decl.standalone().transpose().ok().flatten().map(|s| {
                        let s = String::from_utf8_lossy(s.as_ref());
                        s == "yes"
                    }),
                });
            }
            Event::DocType(dt) => {
                doctype = Some(String::from_utf8_lossy(&dt).into_owned());
            }
            Event::Start(start) => {
                root = Some(parse_element(&mut reader, &start)?);
                break;
            }
            Event::Empty(start) => {
                root = Some(parse_element_start(&start)?);
                break;
            }
            Event::Comment(comment) => {
                prolog.push(Node::Comment(
                    String::from_utf8_lossy(&comment).into_owned(),
                ));
            }
            Event::PI(pi) => {
                prolog.push(parse_pi(&pi));
            }
            Event::Text(_) => {
                // Whitespace between prolog items carries no information
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let root = root.ok_or_else(|| SvgslimError::InvalidSvg("No root element found".into()))?;

    let mut epilog = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Comment(comment) => {
                epilog.push(Node::Comment(
                    String::from_utf8_lossy(&comment).into_owned(),
                ));
            }
            Event::PI(pi) => {
                epilog.push(parse_pi(&pi));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(Document {
        xml_declaration,
        doctype,
        prolog,
        root,
        epilog,
    })
}

fn parse_element(reader: &mut Reader<&[u8]>, start: &BytesStart) -> Result<Element, SvgslimError> {
    let mut element = parse_element_start(start)?;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                element
                    .children
                    .push(Node::Element(parse_element(reader, &start)?));
            }
            Event::Empty(start) => {
                element
                    .children
                    .push(Node::Element(parse_element_start(&start)?));
            }
            Event::End(_) => {
                break;
            }
            Event::Text(text) => {
                let text = text.unescape()?;
                element.children.push(Node::Text(text.into_owned()));
            }
            Event::Comment(comment) => {
                element.children.push(Node::Comment(
                    String::from_utf8_lossy(&comment).into_owned(),
                ));
            }
            Event::CData(cdata) => {
                element
                    .children
                    .push(Node::CData(String::from_utf8_lossy(&cdata).into_owned()));
            }
            Event::PI(pi) => {
                element.children.push(parse_pi(&pi));
            }
            Event::Eof => {
                return Err(SvgslimError::InvalidSvg("Unexpected end of file".into()));
            }
            _ => {}
        }
    }

    Ok(element)
}

fn parse_pi(pi: &[u8]) -> Node {
    let content = String::from_utf8_lossy(pi).into_owned();
    let (target, rest) = content
        .split_once(char::is_whitespace)
        .map(|(t, r)| (t.to_string(), Some(r.to_string())))
        .unwrap_or((content, None));
    Node::ProcessingInstruction {
        target,
        content: rest,
    }
}

fn parse_element_start(start: &BytesStart) -> Result<Element, SvgslimError> {
    let name_bytes = start.name();
    let name = std::str::from_utf8(name_bytes.as_ref())?;

    let mut element = Element {
        name: QName::parse(name),
        attributes: Vec::new(),
        children: Vec::new(),
    };

    for attr in start.attributes() {
        let attr =
            attr.map_err(|e| SvgslimError::InvalidSvg(format!("Invalid attribute: {}", e)))?;
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = attr.unescape_value()?;
        element.attributes.push(Attribute {
            name: QName::parse(key),
            value: value.into_owned(),
        });
    }

    Ok(element)
}
